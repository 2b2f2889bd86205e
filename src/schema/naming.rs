//! Name cleaning shared by table names, column names and path patterns.

/// Clean a sheet name, header text or path pattern.
///
/// Single quotes become `\'` and every space character is removed. The same transform is applied
/// wherever names are read or compared, so filter patterns line up with generated identifiers.
///
/// Not idempotent: cleaning an already cleaned name escapes its quotes a second time.
pub fn clean_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            ' ' => {}
            '\'' => out.push_str("\\'"),
            other => out.push(other),
        }
    }
    out
}
