//! Replay a script of adapter operations.

use std::path::Path;

use flexlist_core::tracing::span_names;
use flexlist_core::{AdapterState, ExpandableAdapter, Notification, RecordingListener};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::format::{RowView, collect_rows, format_notification, format_rows_table};
use crate::script::Operation;
use crate::util::{load_adapter, read_json};

/// Outcome of one scripted operation
#[derive(Debug, Serialize)]
pub struct StepReport {
    /// One-based step number
    pub step: usize,
    /// The operation that ran
    pub operation: Operation,
    /// Numeric result of the call
    pub result: usize,
    /// Notifications emitted by the call
    pub notifications: Vec<Notification>,
}

/// Everything `replay` prints
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    /// Per-step outcomes
    pub steps: Vec<StepReport>,
    /// Final flat sequence
    pub rows: Vec<RowView>,
    /// Number of removals still pending
    pub pending_removals: usize,
    /// Final expansion and selection state
    pub state: AdapterState,
}

/// Replay command handler
pub fn cmd_replay(
    config_path: Option<&Path>,
    tree: &Path,
    script: &Path,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut adapter = load_adapter(config_path, tree)?;
    let operations: Vec<Operation> = read_json(script)?;
    let report = run_script(&mut adapter, operations)?;

    match format {
        OutputFormat::Table => println!("{}", format_report(&report)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::Output(format!("Failed to serialize report: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Applies `operations` in order, recording the notifications of each.
///
/// Stops at the first operation the adapter rejects.
pub fn run_script(
    adapter: &mut ExpandableAdapter<String>,
    operations: Vec<Operation>,
) -> Result<ReplayReport, CliError> {
    let _span =
        flexlist_core::trace_operation!(span_names::SCRIPT_REPLAY, steps = operations.len())
            .entered();
    let recorder = RecordingListener::new();
    adapter.set_listener(recorder.clone());

    let mut steps = Vec::with_capacity(operations.len());
    for (index, operation) in operations.into_iter().enumerate() {
        let step = index + 1;
        let result = operation
            .apply(adapter)
            .map_err(|source| CliError::Operation {
                step,
                operation: operation.name(),
                source,
            })?;
        tracing::debug!(step, operation = operation.name(), result, "Applied operation");
        steps.push(StepReport {
            step,
            operation,
            result,
            notifications: recorder.drain(),
        });
    }

    Ok(ReplayReport {
        steps,
        rows: collect_rows(adapter),
        pending_removals: adapter.pending_removals().len(),
        state: adapter.export_state(),
    })
}

fn format_report(report: &ReplayReport) -> String {
    let mut lines = Vec::new();
    for step in &report.steps {
        lines.push(format!(
            "#{} {} -> {}",
            step.step,
            step.operation.name(),
            step.result
        ));
        for notification in &step.notifications {
            lines.push(format!("    {}", format_notification(notification)));
        }
    }
    lines.push(String::new());
    lines.push(format_rows_table(&report.rows));
    lines.push(String::new());
    lines.push(format!("Pending removals: {}", report.pending_removals));
    lines.join("\n")
}
