//! Validation of compiled emoji data.
//!
//! Runs a suite of invariant checks and reports errors and warnings. Used by
//! `emojidata build` before anything is written and by `emojidata validate`
//! on artifacts read back from disk.

mod checks;
mod warning;

pub use checks::check_equivalent;
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::compile::EmojiData;

/// Run all validation checks against compiled data.
pub fn validate_data(data: &EmojiData) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_unique_keys(data));
    result.merge(checks::check_positions(data));
    result.merge(checks::check_shortcodes(data));
    result.merge(checks::check_availability(data));

    result
}
