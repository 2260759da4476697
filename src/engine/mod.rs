//! Engine
//!
//! Owns both versions, the configured strategies and the shared service
//! registry, and walks them through `Unstarted → Aligned → Diffed`.

mod engine;
mod errors;
mod state;

pub use engine::Engine;
pub use errors::{EngineError, EngineResult};
pub use state::EngineState;
