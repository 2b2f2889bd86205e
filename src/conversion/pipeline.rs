//! Per-sheet orchestration: filter → schema → statements → executor.

use std::fmt;
use std::path::Path;

use crate::error::{ConversionError, ConversionResult};
use crate::schema::{infer_schema, PathFilter};
use crate::sql::{create_statement, drop_statement, insert_statement, StatementExecutor};
use crate::types::Sheet;

use super::observability::ConversionContext;
use super::unified::{report_failure, ConversionOptions};

/// Why a sheet produced no table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No path pattern accepts the sheet.
    FilteredOut,
    /// The sheet lacks a header row and a sample row.
    TooFewRows { rows: usize },
    /// Every header position was excluded or untyped. Only the DROP statement is produced.
    NoUsableColumns,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FilteredOut => write!(f, "filtered out by path patterns"),
            SkipReason::TooFewRows { rows } => write!(f, "fewer than two rows ({rows})"),
            SkipReason::NoUsableColumns => write!(f, "no usable columns"),
        }
    }
}

/// Ordered statements for one sheet plus what went into them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPlan {
    /// Cleaned table name.
    pub table_name: String,
    /// `[DROP, CREATE?, INSERT*]`, in application order.
    pub statements: Vec<String>,
    /// Number of columns in the CREATE statement (excluding the synthetic key).
    pub columns: usize,
    /// Data rows that produced an INSERT.
    pub rows_inserted: usize,
    /// Data rows skipped because every column was null.
    pub rows_skipped: usize,
}

impl SheetPlan {
    /// Whether the plan creates a table.
    pub fn creates_table(&self) -> bool {
        self.columns > 0
    }

    /// Summary counters for observers.
    pub fn stats(&self) -> SheetStats {
        SheetStats {
            columns: self.columns,
            rows_inserted: self.rows_inserted,
            rows_skipped: self.rows_skipped,
            statements: self.statements.len(),
        }
    }
}

/// Outcome of planning one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetOutcome {
    /// Statements were produced. A plan without columns holds only the DROP statement.
    Planned(SheetPlan),
    /// Nothing was produced.
    Skipped(SkipReason),
}

/// Counters reported when a sheet is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SheetStats {
    /// Columns in the CREATE statement (excluding the synthetic key).
    pub columns: usize,
    /// Data rows that produced an INSERT.
    pub rows_inserted: usize,
    /// Data rows skipped because every column was null.
    pub rows_skipped: usize,
    /// Statements applied for the sheet, DROP and CREATE included.
    pub statements: usize,
}

impl fmt::Display for SheetStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "columns={} rows_inserted={} rows_skipped={} statements={}",
            self.columns, self.rows_inserted, self.rows_skipped, self.statements
        )
    }
}

/// Totals across every sheet of one or more workbooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionStats {
    /// Workbooks read.
    pub workbooks: usize,
    /// Sheets that produced a table.
    pub sheets_converted: usize,
    /// Sheets that produced no table.
    pub sheets_skipped: usize,
    /// Statements applied by the executor.
    pub statements_executed: usize,
    /// INSERT statements applied.
    pub rows_inserted: usize,
}

impl ConversionStats {
    /// Add another run's totals to this one.
    pub fn merge(&mut self, other: ConversionStats) {
        self.workbooks += other.workbooks;
        self.sheets_converted += other.sheets_converted;
        self.sheets_skipped += other.sheets_skipped;
        self.statements_executed += other.statements_executed;
        self.rows_inserted += other.rows_inserted;
    }
}

/// Produce the statements for one sheet without executing anything.
///
/// Data rows start after the sample row unless `include_sample_row` is set, in which case the
/// sample row is inserted as well.
pub fn plan_sheet(sheet: &Sheet, filter: &PathFilter, include_sample_row: bool) -> SheetOutcome {
    if !filter.accepts_sheet(&sheet.name) {
        return SheetOutcome::Skipped(SkipReason::FilteredOut);
    }
    let Some(schema) = infer_schema(sheet, filter) else {
        return SheetOutcome::Skipped(SkipReason::TooFewRows {
            rows: sheet.rows.len(),
        });
    };

    let mut plan = SheetPlan {
        table_name: schema.table_name.clone(),
        statements: vec![drop_statement(&schema)],
        columns: 0,
        rows_inserted: 0,
        rows_skipped: 0,
    };
    let Some(create) = create_statement(&schema) else {
        return SheetOutcome::Planned(plan);
    };
    plan.statements.push(create);
    plan.columns = schema.accepted_count();

    let first_data_row = if include_sample_row { 1 } else { 2 };
    for row in sheet.rows.iter().skip(first_data_row) {
        match insert_statement(&schema, row) {
            Some(insert) => {
                plan.statements.push(insert);
                plan.rows_inserted += 1;
            }
            None => plan.rows_skipped += 1,
        }
    }
    SheetOutcome::Planned(plan)
}

/// Plan every sheet in order and apply the statements through `executor`.
///
/// `workbook` labels observer events. Sheets are processed sequentially; the first statement the
/// executor rejects aborts the run with [`ConversionError::Execution`]. Statements applied before
/// the failure are not rolled back.
pub fn convert_sheets<E>(
    workbook: impl AsRef<Path>,
    sheets: &[Sheet],
    executor: &mut E,
    options: &ConversionOptions,
) -> ConversionResult<ConversionStats>
where
    E: StatementExecutor + ?Sized,
{
    let filter = PathFilter::new(&options.patterns);
    let mut stats = ConversionStats {
        workbooks: 1,
        ..Default::default()
    };

    for sheet in sheets {
        let ctx = ConversionContext {
            workbook: workbook.as_ref().to_path_buf(),
            sheet: Some(sheet.name.clone()),
        };
        let plan = match plan_sheet(sheet, &filter, options.include_sample_row) {
            SheetOutcome::Planned(plan) => plan,
            SheetOutcome::Skipped(reason) => {
                stats.sheets_skipped += 1;
                if let Some(obs) = options.observer.as_ref() {
                    obs.on_sheet_skipped(&ctx, &reason);
                }
                continue;
            }
        };

        if let Err(e) = apply_plan(&plan, &mut *executor) {
            report_failure(options, &ctx, &e);
            return Err(e);
        }
        stats.statements_executed += plan.statements.len();

        if plan.creates_table() {
            stats.sheets_converted += 1;
            stats.rows_inserted += plan.rows_inserted;
            if let Some(obs) = options.observer.as_ref() {
                obs.on_sheet_converted(&ctx, plan.stats());
            }
        } else {
            stats.sheets_skipped += 1;
            if let Some(obs) = options.observer.as_ref() {
                obs.on_sheet_skipped(&ctx, &SkipReason::NoUsableColumns);
            }
        }
    }

    Ok(stats)
}

fn apply_plan<E>(plan: &SheetPlan, executor: &mut E) -> ConversionResult<()>
where
    E: StatementExecutor + ?Sized,
{
    for (index, statement) in plan.statements.iter().enumerate() {
        executor
            .execute(statement)
            .map_err(|source| ConversionError::Execution {
                table: plan.table_name.clone(),
                index,
                source,
            })?;
    }
    Ok(())
}
