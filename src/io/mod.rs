//! Terminal and filesystem I/O.

pub mod fs;
pub mod scanner;
pub mod term;

pub use scanner::{is_aborted, Scanner};
