//! Library side of the `drugdex` binary: logging setup, the run pipeline and
//! progress printing.

pub mod logging;
pub mod pipeline;
pub mod progress;
pub mod types;
