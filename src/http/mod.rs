mod form;
mod handler;
mod router;
mod state;

pub use router::router;
pub use state::ServerState;
