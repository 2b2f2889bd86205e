use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConversionError;

use super::pipeline::{SheetStats, SkipReason};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConversionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (conversion failed).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

/// Where an event happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionContext {
    /// Workbook path (or a caller-chosen label for in-memory sheets).
    pub workbook: PathBuf,
    /// Sheet display name; `None` for workbook-level events.
    pub sheet: Option<String>,
}

impl fmt::Display for ConversionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sheet {
            Some(sheet) => write!(f, "workbook={} sheet={sheet}", self.workbook.display()),
            None => write!(f, "workbook={}", self.workbook.display()),
        }
    }
}

/// Observer interface for conversion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ConversionObserver: Send + Sync {
    /// Called after all statements of a sheet were applied.
    fn on_sheet_converted(&self, _ctx: &ConversionContext, _stats: SheetStats) {}

    /// Called when a sheet produces no table.
    fn on_sheet_skipped(&self, _ctx: &ConversionContext, _reason: &SkipReason) {}

    /// Called when conversion fails.
    fn on_failure(&self, _ctx: &ConversionContext, _severity: ConversionSeverity, _error: &ConversionError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ConversionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ConversionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ConversionObserver for CompositeObserver {
    fn on_sheet_converted(&self, ctx: &ConversionContext, stats: SheetStats) {
        for o in &self.observers {
            o.on_sheet_converted(ctx, stats);
        }
    }

    fn on_sheet_skipped(&self, ctx: &ConversionContext, reason: &SkipReason) {
        for o in &self.observers {
            o.on_sheet_skipped(ctx, reason);
        }
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs conversion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ConversionObserver for StdErrObserver {
    fn on_sheet_converted(&self, ctx: &ConversionContext, stats: SheetStats) {
        eprintln!("[convert][ok] {ctx} {stats}");
    }

    fn on_sheet_skipped(&self, ctx: &ConversionContext, reason: &SkipReason) {
        eprintln!("[convert][skip] {ctx} reason={reason}");
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        eprintln!("[convert][{severity:?}] {ctx} err={error}");
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        eprintln!("[ALERT][convert][{severity:?}] {ctx} err={error}");
    }
}

/// Appends conversion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ConversionObserver for FileObserver {
    fn on_sheet_converted(&self, ctx: &ConversionContext, stats: SheetStats) {
        self.append_line(&format!("{} ok {ctx} {stats}", unix_ts()));
    }

    fn on_sheet_skipped(&self, ctx: &ConversionContext, reason: &SkipReason) {
        self.append_line(&format!("{} skip {ctx} reason={reason}", unix_ts()));
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        self.append_line(&format!(
            "{} fail severity={severity:?} {ctx} err={error}",
            unix_ts()
        ));
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &ConversionError) {
        self.append_line(&format!(
            "{} ALERT severity={severity:?} {ctx} err={error}",
            unix_ts()
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct Counting {
        skipped: Mutex<usize>,
    }

    impl ConversionObserver for Counting {
        fn on_sheet_skipped(&self, _ctx: &ConversionContext, _reason: &SkipReason) {
            *self.skipped.lock().unwrap() += 1;
        }
    }

    fn ctx() -> ConversionContext {
        ConversionContext {
            workbook: PathBuf::from("book.xlsx"),
            sheet: Some("Orders".to_string()),
        }
    }

    #[test]
    fn composite_fans_out_to_every_observer() {
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        let composite = CompositeObserver::new(vec![
            a.clone() as Arc<dyn ConversionObserver>,
            b.clone() as Arc<dyn ConversionObserver>,
        ]);
        composite.on_sheet_skipped(&ctx(), &SkipReason::FilteredOut);
        assert_eq!(*a.skipped.lock().unwrap(), 1);
        assert_eq!(*b.skipped.lock().unwrap(), 1);
    }

    #[test]
    fn context_display_includes_sheet_when_present() {
        assert_eq!(ctx().to_string(), "workbook=book.xlsx sheet=Orders");
        let wb = ConversionContext {
            sheet: None,
            ..ctx()
        };
        assert_eq!(wb.to_string(), "workbook=book.xlsx");
    }

    #[test]
    fn file_observer_appends_lines() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("sheet-to-sql-observer-{nanos}.log"));
        let obs = FileObserver::new(&path);
        obs.on_sheet_skipped(&ctx(), &SkipReason::TooFewRows { rows: 1 });
        obs.on_sheet_skipped(&ctx(), &SkipReason::NoUsableColumns);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("skip workbook=book.xlsx sheet=Orders reason=fewer than two rows (1)"));
        assert!(lines[1].ends_with("reason=no usable columns"));
        let _ = std::fs::remove_file(&path);
    }
}
