mod error;
pub mod models;
pub mod present;
mod server;
pub mod services;
pub mod state;

pub use error::ApiError;
pub use present::{Action, Present};
pub use server::{router, run};
