//! Domain layer for header validation
//!
//! Pure values only: headers, outcomes, verdicts, diagnostics and errors.

mod diagnostics;
mod error;
mod header;
mod verdict;

pub use diagnostics::*;
pub use error::*;
pub use header::*;
pub use verdict::*;
