mod cli;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use presently::config::Config;
use presently::presenter::PresenterRegistry;
use presently::views::FileViews;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Server(args) => presently::api::run(config, args.address).await?,
        Commands::Presenters => print_presenters(&config),
    }

    Ok(())
}

fn print_presenters(config: &Config) {
    let views = Arc::new(FileViews::new(config.views.path.clone()));
    let registry = PresenterRegistry::from_config(config, views);

    for name in registry.presenters() {
        let extensions: Vec<&str> = registry
            .extensions()
            .iter()
            .filter(|(_, presenter)| presenter.as_str() == name)
            .map(|(extension, _)| extension.as_str())
            .collect();
        let mimes: Vec<&str> = registry
            .mimes()
            .iter()
            .filter(|(_, presenter)| presenter.as_str() == name)
            .map(|(mime, _)| mime.as_str())
            .collect();

        println!(
            "{name}\textensions=[{}]\tmimes=[{}]",
            extensions.join(", "),
            mimes.join(", ")
        );
    }
}
