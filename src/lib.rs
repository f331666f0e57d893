pub mod error;
pub mod schedule;
pub mod server;
pub mod state;
