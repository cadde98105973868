pub mod api;
pub mod config;
pub mod negotiation;
pub mod observability;
pub mod presenter;
pub mod views;
