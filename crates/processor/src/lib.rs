//! Event dispatch and the reactions to each event kind

pub mod handler;

pub use handler::EventHandler;
