//! Terminal output formatting
//!
//! Console summaries for command results and the human-readable tree format.

pub mod display;
pub mod readable;

pub use display::{print_build_outcome, print_root_line, print_table_summary, print_verify_report};
pub use readable::{ReadableTree, TreeFormatError};
