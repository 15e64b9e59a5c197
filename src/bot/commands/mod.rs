//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Exam cycle commands
pub mod cycle;

/// Weekly exam commands
pub mod exam;

/// General utility commands
pub mod general;

/// Parsing and formatting shared by the commands
pub mod utils;

// Export commands
pub use cycle::*;
pub use exam::*;
pub use general::*;
