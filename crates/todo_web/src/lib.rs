pub mod config;
pub mod controllers;
pub mod error;
pub mod middleware;
pub mod server;
pub mod views;

pub use config::{ServerConfig, SessionConfig};
pub use server::{AppState, WebService};
