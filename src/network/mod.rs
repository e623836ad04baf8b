//! Network layer - chain API client, polling feeds and action execution
//!
//! The Network actor owns the pollers, runs dispatched actions and sends
//! back responses.

pub mod actor;
pub mod client;
pub mod governance;
pub mod poller;

pub use actor::NetworkActor;
