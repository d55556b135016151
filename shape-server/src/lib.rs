//! Shape of Us server: config loading, logging setup and the per-connection TCP handler.

pub mod config;
pub mod logging;
pub mod server;

pub use config::Config;
pub use server::{handle_connection, ConnectionError, ConnectionState, Server};
