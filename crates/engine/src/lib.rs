//! Resolution engine - turns swap requests into a stable board
//!
//! The engine sits between input and rendering. It owns the board, decides
//! whether a swap stands, runs the clear/collapse/refill cascade, keeps the
//! score, and tells collaborators what happened through [`EngineEvent`]s.
//!
//! # Module Structure
//!
//! - [`resolver`]: the state machine and cascade loop (synchronous)
//! - [`runtime`]: tokio task that paces the resolver and runs the hint timer
//! - [`events`]: event type and sinks
//! - [`state`]: engine states and per-step reports
//! - [`error`]: engine errors
//!
//! # Example
//!
//! ```
//! use tui_match3_engine::{EngineEvent, EngineState, Resolver};
//! use tui_match3_engine::types::GameConfig;
//!
//! let mut resolver = Resolver::new(GameConfig::with_size(6, 6), 12345).unwrap();
//! let mut events: Vec<EngineEvent> = Vec::new();
//!
//! if let Some(hint) = resolver.scan_hint().unwrap() {
//!     resolver.request_swap(hint.from, hint.to, &mut events).unwrap();
//!     let resolution = resolver.run_to_idle(&mut events).unwrap();
//!     assert!(resolution.award > 0);
//! }
//! assert_eq!(resolver.state(), EngineState::Idle);
//! ```

pub mod error;
pub mod events;
pub mod resolver;
pub mod runtime;
pub mod state;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use error::EngineError;
pub use events::{EngineEvent, EventSink};
pub use resolver::Resolver;
pub use runtime::{run_engine, EngineCommand, EngineHandle};
pub use state::{CascadeStep, EngineState, Resolution, Settlement, SwapOutcome};
