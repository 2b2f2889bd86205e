//! Unified conversion entrypoints.
//!
//! Most callers should use [`convert_from_path`], which reads a workbook and applies the
//! generated statements through a [`StatementExecutor`].
//!
//! - If [`ConversionOptions::format`] is `None`, the workbook format is inferred from the file
//!   extension.
//! - If a [`ConversionObserver`] is provided, converted/skipped sheets and failures are reported
//!   to it.

use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ConversionConfig;
use crate::error::{ConversionError, ConversionResult};
use crate::schema::ACCEPT_ALL;
use crate::sql::StatementExecutor;

use super::observability::{ConversionContext, ConversionObserver, ConversionSeverity};
use super::pipeline::{convert_sheets, ConversionStats};

/// Supported workbook formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Office Open XML workbook (`.xlsx`, `.xlsm`).
    Xlsx,
    /// Excel binary workbook (`.xlsb`).
    Xlsb,
    /// Legacy Excel workbook (`.xls`).
    Xls,
    /// OpenDocument spreadsheet (`.ods`).
    Ods,
}

impl WorkbookFormat {
    /// Parse a workbook format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xlsb" => Some(Self::Xlsb),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            _ => None,
        }
    }
}

/// Options controlling conversion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ConversionOptions {
    /// Reader to use. If `None`, detect the format from the file extension.
    pub format: Option<WorkbookFormat>,
    /// Path patterns selecting sheets and columns (default `["*.*"]`).
    pub patterns: Vec<String>,
    /// Also insert the type-sample row (the row after the header).
    pub include_sample_row: bool,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ConversionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ConversionSeverity,
}

impl fmt::Debug for ConversionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionOptions")
            .field("format", &self.format)
            .field("patterns", &self.patterns)
            .field("include_sample_row", &self.include_sample_row)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            format: None,
            patterns: vec![ACCEPT_ALL.to_string()],
            include_sample_row: false,
            observer: None,
            alert_at_or_above: ConversionSeverity::Critical,
        }
    }
}

impl From<ConversionConfig> for ConversionOptions {
    fn from(config: ConversionConfig) -> Self {
        Self {
            patterns: config.patterns,
            include_sample_row: config.include_sample_row,
            ..Default::default()
        }
    }
}

/// Convert one workbook: every accepted sheet becomes DROP/CREATE/INSERT statements applied in
/// order through `executor`.
///
/// When an observer is configured, this function reports:
///
/// - `on_sheet_converted` / `on_sheet_skipped` per sheet
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ## Write a SQL script
///
/// ```no_run
/// use std::fs::File;
///
/// use sheet_to_sql::conversion::{convert_from_path, ConversionOptions};
/// use sheet_to_sql::sql::SqlScriptWriter;
///
/// # fn main() -> Result<(), sheet_to_sql::ConversionError> {
/// let mut script = SqlScriptWriter::new(File::create("orders.sql")?);
/// let stats = convert_from_path("orders.xlsx", &mut script, &ConversionOptions::default())?;
/// println!("tables={} rows={}", stats.sheets_converted, stats.rows_inserted);
/// # Ok(())
/// # }
/// ```
///
/// ## Select sheets and columns
///
/// ```no_run
/// use sheet_to_sql::conversion::{convert_from_path, ConversionOptions};
/// use sheet_to_sql::sql::StatementLog;
///
/// # fn main() -> Result<(), sheet_to_sql::ConversionError> {
/// let opts = ConversionOptions {
///     patterns: vec!["Orders.*".to_string(), "Customers.Name".to_string()],
///     ..Default::default()
/// };
/// let mut log = StatementLog::new();
/// convert_from_path("shop.xlsx", &mut log, &opts)?;
/// for statement in log.statements() {
///     println!("{statement}");
/// }
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (stderr logging + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use sheet_to_sql::conversion::{
///     convert_from_path, ConversionOptions, ConversionSeverity, StdErrObserver,
/// };
/// use sheet_to_sql::sql::StatementLog;
///
/// let opts = ConversionOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     alert_at_or_above: ConversionSeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are treated as Critical and will trigger `on_alert` at this threshold.
/// let _err = convert_from_path("does_not_exist.xlsx", &mut StatementLog::new(), &opts).unwrap_err();
/// ```
pub fn convert_from_path<E>(
    path: impl AsRef<Path>,
    executor: &mut E,
    options: &ConversionOptions,
) -> ConversionResult<ConversionStats>
where
    E: StatementExecutor + ?Sized,
{
    let path = path.as_ref();
    let ctx = ConversionContext {
        workbook: path.to_path_buf(),
        sheet: None,
    };

    let sheets = match read_sheets(path, options) {
        Ok(sheets) => sheets,
        Err(e) => {
            report_failure(options, &ctx, &e);
            return Err(e);
        }
    };

    convert_sheets(path, &sheets, executor, options)
}

/// Convert every workbook matching a glob pattern, in path order.
///
/// Stops at the first workbook that fails; totals of the workbooks converted so far are lost.
pub fn convert_from_glob<E>(
    pattern: &str,
    executor: &mut E,
    options: &ConversionOptions,
) -> ConversionResult<ConversionStats>
where
    E: StatementExecutor + ?Sized,
{
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in glob::glob(pattern)? {
        paths.push(entry?);
    }
    paths.sort();

    let mut stats = ConversionStats::default();
    for path in paths {
        stats.merge(convert_from_path(&path, &mut *executor, options)?);
    }
    Ok(stats)
}

pub(crate) fn report_failure(options: &ConversionOptions, ctx: &ConversionContext, e: &ConversionError) {
    if let Some(obs) = options.observer.as_ref() {
        let sev = severity_for_error(e);
        obs.on_failure(ctx, sev, e);
        if sev >= options.alert_at_or_above {
            obs.on_alert(ctx, sev, e);
        }
    }
}

fn severity_for_error(e: &ConversionError) -> ConversionSeverity {
    match e {
        ConversionError::Io(_) => ConversionSeverity::Critical,
        #[cfg(feature = "excel")]
        ConversionError::Excel(err) => {
            if error_chain_contains_io(err) {
                ConversionSeverity::Critical
            } else {
                ConversionSeverity::Error
            }
        }
        ConversionError::Glob(_) => ConversionSeverity::Critical,
        ConversionError::Execution { .. }
        | ConversionError::Config(_)
        | ConversionError::Pattern(_)
        | ConversionError::UnsupportedFormat { .. } => ConversionSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

fn read_sheets(path: &Path, options: &ConversionOptions) -> ConversionResult<Vec<crate::types::Sheet>> {
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    #[cfg(feature = "excel")]
    {
        super::excel::read_workbook_from_path(path, format)
    }

    #[cfg(not(feature = "excel"))]
    {
        let _ = format;
        Err(ConversionError::UnsupportedFormat {
            message: "workbook reading not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}

fn infer_format_from_path(path: &Path) -> ConversionResult<WorkbookFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ConversionError::UnsupportedFormat {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    WorkbookFormat::from_extension(ext).ok_or_else(|| ConversionError::UnsupportedFormat {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue conversion work in a job system.
#[derive(Clone)]
pub struct ConversionRequest {
    /// Path to the workbook.
    pub path: PathBuf,
    /// Options controlling conversion.
    pub options: ConversionOptions,
}

impl fmt::Debug for ConversionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl ConversionRequest {
    /// Execute the request by calling [`convert_from_path`].
    pub fn run<E>(&self, executor: &mut E) -> ConversionResult<ConversionStats>
    where
        E: StatementExecutor + ?Sized,
    {
        convert_from_path(&self.path, executor, &self.options)
    }
}
