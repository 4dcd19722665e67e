//! Utility functions and types.

use std::fmt::Debug;

/// Masks a sensitive string when formatted for debugging.
///
/// Short values are fully masked; longer values keep their first two
/// characters so different keys remain distinguishable in logs without
/// revealing anything useful.
pub struct Masked<'a>(&'a str);

impl<'a> From<&'a str> for Masked<'a> {
    fn from(value: &'a str) -> Self {
        Masked(value)
    }
}

impl<'a> From<&'a String> for Masked<'a> {
    fn from(value: &'a String) -> Self {
        Masked(value.as_str())
    }
}

impl Debug for Masked<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("EMPTY")
        } else if self.0.len() < 8 {
            f.write_str("***")
        } else {
            f.write_str(&self.0[..2])?;
            f.write_str("***")
        }
    }
}
