//! Sheet/column inclusion by path pattern.

use std::collections::BTreeSet;

use super::naming::clean_name;

/// Pattern accepting every sheet and every column.
pub const ACCEPT_ALL: &str = "*.*";

/// Decides which sheets and columns take part in a conversion.
///
/// Patterns have the forms `sheet`, `sheet.column`, `sheet.*` and `*.*`; a sheet or column is
/// accepted when any pattern matches. Patterns are cleaned with [`clean_name`] on construction so
/// they compare equal to cleaned sheet and column names.
///
/// The universal pattern is matched asymmetrically: any pattern starting with `*.` accepts every
/// sheet, but only the exact pattern `*.*` accepts every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    patterns: BTreeSet<String>,
}

impl PathFilter {
    /// Create a filter from an explicit pattern set. An empty set accepts nothing.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns.into_iter().map(|p| clean_name(p.as_ref())).collect(),
        }
    }

    /// Create a filter accepting everything (`{"*.*"}`).
    pub fn accept_all() -> Self {
        Self::new([ACCEPT_ALL])
    }

    /// Cleaned patterns, in sorted order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    /// Whether the sheet with display name `sheet_name` participates.
    pub fn accepts_sheet(&self, sheet_name: &str) -> bool {
        let sheet = clean_name(sheet_name);
        let sheet_prefix = format!("{sheet}.");
        self.patterns
            .iter()
            .any(|p| p.starts_with("*.") || *p == sheet || p.starts_with(&sheet_prefix))
    }

    /// Whether column `column_name` of sheet `sheet_name` participates.
    ///
    /// `sheet_name` is the display name; `column_name` must already be cleaned.
    pub fn accepts_column(&self, sheet_name: &str, column_name: &str) -> bool {
        let sheet = clean_name(sheet_name);
        self.patterns.iter().any(|p| {
            if p == ACCEPT_ALL {
                return true;
            }
            match p.strip_prefix(sheet.as_str()).and_then(|rest| rest.strip_prefix('.')) {
                Some(column_path) => column_path == "*" || column_path == column_name,
                None => false,
            }
        })
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::accept_all()
    }
}
