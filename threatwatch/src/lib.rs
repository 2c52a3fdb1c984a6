//! Live network threat dashboard: a TUI client for a push-channel backend.
//!
//! The backend sends JSON event frames over a WebSocket (`stats_update`,
//! `new_threat`, `model_info`); [`feed::FeedState`] folds them into bounded
//! in-memory state, and the `ui` modules render that state with ratatui.

pub mod app;
pub mod demo;
pub mod feed;
pub mod history;
pub mod profiles;
pub mod sampler;
pub mod types;
pub mod ui;
pub mod ws;
