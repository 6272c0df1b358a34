//! Rendering of adapter rows and notifications

use std::fmt::Write as _;

use flexlist_core::{ChangeEvent, ExpandableAdapter, Notification, RowKind};
use serde::Serialize;

/// One flat row as printed by the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Flat position
    pub position: usize,
    /// Parent or child
    pub kind: RowKind,
    /// 0 for parents, 1 for children
    pub depth: usize,
    /// Row payload
    pub payload: String,
    /// Parent is expanded
    pub expanded: bool,
    /// Row is selected
    pub selected: bool,
    /// Row is hidden by a filter
    pub hidden: bool,
}

/// Collects every flat row of `adapter`
#[must_use]
pub fn collect_rows(adapter: &ExpandableAdapter<String>) -> Vec<RowView> {
    (0..adapter.len())
        .filter_map(|position| {
            let node = adapter.node(position).ok()?;
            Some(RowView {
                position,
                kind: node.row_kind(),
                depth: usize::from(!node.is_parent()),
                payload: node.payload().clone(),
                expanded: node.is_expanded(),
                selected: adapter.is_selected(position),
                hidden: node.is_hidden(),
            })
        })
        .collect()
}

/// Formats rows as an indented table
#[must_use]
pub fn format_rows_table(rows: &[RowView]) -> String {
    if rows.is_empty() {
        return "No rows.".to_string();
    }

    let mut output = String::new();
    let pos_width = rows.len().saturating_sub(1).to_string().len().max(3);
    let _ = writeln!(output, "{:>pos_width$}  {:<6}  ITEM", "POS", "KIND");
    for row in rows {
        let kind = match row.kind {
            RowKind::Expandable => "parent",
            RowKind::Regular => "child",
        };
        let marker = match (row.kind, row.expanded) {
            (RowKind::Expandable, true) => "- ",
            (RowKind::Expandable, false) => "+ ",
            (RowKind::Regular, _) => "  ",
        };
        let mut flags = Vec::new();
        if row.selected {
            flags.push("selected");
        }
        if row.hidden {
            flags.push("hidden");
        }
        let indent = "  ".repeat(row.depth);
        let _ = write!(
            output,
            "{:>pos_width$}  {kind:<6}  {indent}{marker}{}",
            row.position, row.payload
        );
        if !flags.is_empty() {
            let _ = write!(output, "  [{}]", flags.join(", "));
        }
        output.push('\n');
    }
    output.pop();
    output
}

/// Formats a notification on one line
#[must_use]
pub fn format_notification(notification: &Notification) -> String {
    let mut line = match notification.event {
        ChangeEvent::ItemsInserted { start, count } => format!("inserted {start}+{count}"),
        ChangeEvent::ItemsRemoved { start, count } => format!("removed {start}+{count}"),
        ChangeEvent::ItemChanged { position } => format!("changed {position}"),
        ChangeEvent::DataSetInvalidated => "invalidated".to_string(),
    };
    if notification.multi_remove {
        line.push_str(" (batch)");
    }
    line
}
