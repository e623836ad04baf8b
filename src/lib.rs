//! # WTF Cosmos TUI
//!
//! A terminal dashboard for the WTF Cosmos toy blockchain.
//!
//! ## Features
//! - Live chain stats, latest blocks and miner status, each polled on its own interval
//! - Wallet creation, balance lookup and transfers
//! - Start/stop mining with a sample address filler
//! - Governance proposals with simulated voting
//! - One-at-a-time toast notifications with auto-dismiss
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;
pub mod validate;

// Re-export commonly used types
pub use models::{Block, MiningStatus, Proposal, StatsSnapshot, Wallet};
pub use error::{ApiError, GovernanceError, ValidationError};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
