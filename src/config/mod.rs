//! Configuration
//!
//! [`Parameters`] is the opaque string map threaded through both phases.
//! [`DiffConfig`] is the run file the CLI reads.

mod errors;
mod file;
mod parameters;

pub use errors::{ConfigError, ConfigResult};
pub use file::DiffConfig;
pub use parameters::Parameters;
