use clap::{Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "presently")]
#[command(about = "Content-negotiating response presenters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the demo HTTP server
    Server(ServerArgs),
    /// Print the presenters registered from configuration
    Presenters,
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (defaults to `server.bind_addr`)
    #[arg(long)]
    pub address: Option<SocketAddr>,
}
