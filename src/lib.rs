//! TUI Match-3 (workspace facade crate).
//!
//! Re-exports the member crates under `tui_match3::{core,engine,input,term,types}`
//! and hosts the binary's file logger.

pub mod logging;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
