use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A-share ticker in the upstream's suffixed form.
///
/// Raw user input is numeric (`600519`) or carries a legacy 2-letter market
/// suffix (`000001.SZ`); [`Symbol::normalize`] maps both to the suffix form
/// the upstream expects (`.SHH` / `.SHZ`). Unrecognized input passes through
/// unchanged, so a bad identifier degrades its own record at the upstream
/// instead of blocking its siblings. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Trim, uppercase, and rewrite to the upstream suffix form.
    ///
    /// - `.SH` -> `.SHH`, `.SZ` -> `.SHZ`
    /// - bare codes starting with `6` -> `.SHH` appended
    /// - bare codes starting with `0` or `3` -> `.SHZ` appended
    /// - anything else (already suffixed or unrecognized) passes through
    pub fn normalize(input: &str) -> Self {
        let s = input.trim().to_ascii_uppercase();

        let mapped = if let Some(bare) = s.strip_suffix(".SH") {
            format!("{bare}.SHH")
        } else if let Some(bare) = s.strip_suffix(".SZ") {
            format!("{bare}.SHZ")
        } else if s.contains('.') {
            s
        } else {
            match s.as_bytes().first() {
                Some(b'6') => format!("{s}.SHH"),
                Some(b'0' | b'3') => format!("{s}.SHZ"),
                _ => s,
            }
        };

        Self(mapped)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self::normalize(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
