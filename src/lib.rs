//! Wire decoder and live-state engine for a push-style live-odds protocol.
//!
//! The crate accepts raw transport-frame bytes and maintains a queryable
//! model of every live event the upstream publishes, emitting a typed
//! stream of change events out of each delta. It performs no I/O: callers
//! feed it bytes from whatever transport they use and consume the
//! [`model::MatchUpdate`] events it returns.

pub mod config;
pub mod field_parser;
pub mod formatter;
pub mod frame_splitter;
pub mod item_id;
pub mod model;
pub mod parse;
pub mod registry;
pub mod state_manager;

pub use config::Config;
pub use model::{Market, Match, MatchStatus, MatchUpdate, Selection, UpdateKind};
pub use state_manager::StateManager;
