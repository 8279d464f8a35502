//! Plain-text terminal output.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use etl_console_app::ports::{Notification, NotificationKind, NotificationSink};
use etl_console_app::test_result_view::{ResultPanel, TestResultView};
use etl_console_domain::{Database, EntityField, ErrorMap, Mapping};

/// Prints settled notifications to stderr. Pending ones are left to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotificationSink;

impl NotificationSink for ConsoleNotificationSink {
    fn notify(&self, notification: &Notification) {
        let prefix = match notification.kind {
            NotificationKind::Pending => return,
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        let _ = writeln!(io::stderr(), "{prefix}: {}", notification.message);
    }
}

pub fn write_out(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}

/// Asks a yes/no question on the terminal. Anything but `y`/`yes` is a no.
pub fn confirm(title: &str, description: &str) -> io::Result<bool> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{title}\n{description} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

pub fn render_mapping_row(mapping: &Mapping) -> String {
    let id = mapping.id.map(|id| id.to_string()).unwrap_or_default();
    format!(
        "{id}\t{}\t{}\t{}",
        mapping.name, mapping.source, mapping.cron_expression
    )
}

pub fn render_database_row(database: &Database) -> String {
    let mut line = format!(
        "{}\t{}\t{}\t{}",
        database.name, database.db_type, database.url, database.user
    );
    if let Some(outcome) = database.test_result {
        let _ = write!(line, "\t{outcome}");
    }
    line
}

pub fn render_errors<F: EntityField>(errors: &ErrorMap<F>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {} ({}): {message}", field.label(), field.key()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_test_view(view: &TestResultView) -> String {
    format!(
        "{}\n\n{}",
        render_panel(&view.extracted),
        render_panel(&view.transformed)
    )
}

pub fn render_panel(panel: &ResultPanel) -> String {
    match panel {
        ResultPanel::Table {
            label,
            columns,
            rows,
        } => render_table(label, columns, rows),
        ResultPanel::Empty { label } => format!("{label}\n(no rows)"),
        ResultPanel::ParseFailure { message, .. } => message.clone(),
    }
}

fn render_table(label: &str, columns: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .chain(std::iter::once(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::from(label);
    out.push('\n');
    out.push_str(&render_row(columns, &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        out.push('\n');
        out.push_str(&render_row(row, &widths));
    }
    out
}

/// The last cell is not padded so lines carry no trailing spaces.
fn render_row(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            if i == last {
                cell.clone()
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use etl_console_domain::{MappingField, MappingTestResults};
    use serde_json::json;

    #[test]
    fn renders_test_view() {
        let view = TestResultView::from_results(&MappingTestResults {
            extracted: json!([
                { "id": 1, "name": "Alice" },
                { "id": 22, "name": "Bob" }
            ]),
            transformed: json!([]),
        });

        insta::assert_snapshot!(render_test_view(&view), @r"
        Extracted
        id | name
        ---+------
        1  | Alice
        22 | Bob

        Transformed
        (no rows)
        ");
    }

    #[test]
    fn renders_parse_failure() {
        let panel = ResultPanel::build("Transformed", &json!("oops"));

        insta::assert_snapshot!(render_panel(&panel), @"Transformed: Unable to display mapping testing result.");
    }

    #[test]
    fn renders_errors_by_label_and_wire_key() {
        let mut errors = ErrorMap::new();
        errors.insert(MappingField::Name, "This field is required");
        errors.insert(MappingField::FetchSize, "Must be a whole number");

        insta::assert_snapshot!(render_errors(&errors), @r"
        Name (name): This field is required
        Fetch Size (fetchSize): Must be a whole number
        ");
    }
}
