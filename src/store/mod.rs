//! CFWORKER local stores.
//!
//! Accounts and script URLs are kept as pretty-printed JSON arrays in the
//! working directory unless configured otherwise. Below is an example
//! script store:
//! ```json
//! [
//!   {
//!     "name": "Default Worker",
//!     "url": "https://raw.githubusercontent.com/vapaxemu/cli/refs/heads/main/worker.js",
//!     "is_default": true
//!   }
//! ]
//! ```

pub mod accounts;
pub mod scripts;

pub use accounts::AccountStore;
pub use scripts::ScriptStore;

/// Parse a 1-based list position.
pub(crate) fn parse_index(selector: &str, len: usize) -> Option<usize> {
    selector
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|idx| *idx > 0 && *idx <= len)
        .map(|idx| idx - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("1", 3), Some(0));
        assert_eq!(parse_index(" 3 ", 3), Some(2));
        assert_eq!(parse_index("0", 3), None);
        assert_eq!(parse_index("4", 3), None);
        assert_eq!(parse_index("one", 3), None);
    }
}
