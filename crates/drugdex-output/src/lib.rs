//! Output writer for merged substance records.

pub mod error;
pub mod json;

pub use error::{OutputError, Result};
pub use json::{default_output_path, write_substances};
