pub mod client;
pub mod inference;
pub mod prompt;

pub use client::GroqClient;
pub use prompt::build_prompt;
