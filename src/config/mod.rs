pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, GroqConfig, ServerConfig};
pub use loader::load_config;
