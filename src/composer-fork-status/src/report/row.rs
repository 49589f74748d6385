//! Markdown table rows.

use std::fmt;

/// Placeholder for unknown or inapplicable cells.
pub const PLACEHOLDER: &str = "-";

/// Column headings of the status table.
pub const HEADER: &str = "| Age | Package | Branch | Fork PR | Merged | Description |";

/// Divider between the headings and the rows.
pub const DIVIDER: &str = "| --- | --- | --- | --- | --- | --- |";

/// Descriptions longer than this many characters are cut.
pub const DESCRIPTION_MAX_CHARS: usize = 25;

/// Appended to a cut description.
const ELLIPSIS: char = '…';

/// One rendered line of the status table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    /// Age of the tracked branch.
    pub age: String,
    /// Link to the fork, labelled with its name.
    pub package: String,
    /// Link to the tracked branch.
    pub branch: String,
    /// Link to the upstream pull request, `No PR`, or a placeholder.
    pub fork_pr: String,
    /// `Yes`, `No`, or a placeholder.
    pub merged: String,
    /// Shortened repository description.
    pub description: String,
}

impl StatusRow {
    /// Formats a repository description for the table.
    ///
    /// Empty or missing descriptions become [`PLACEHOLDER`]. Longer ones are
    /// cut to [`DESCRIPTION_MAX_CHARS`] characters plus an ellipsis. Pipes and
    /// line breaks are neutralised so the cell cannot break the table.
    #[must_use]
    pub fn description_cell(description: Option<&str>) -> String {
        let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
            return PLACEHOLDER.to_string();
        };

        let mut cell: String = description.chars().take(DESCRIPTION_MAX_CHARS).collect();
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            cell.push(ELLIPSIS);
        }

        cell.replace(['\r', '\n'], " ").replace('|', "\\|")
    }
}

impl fmt::Display for StatusRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| {} | {} | {} | {} | {} | {} |",
            self.age, self.package, self.branch, self.fork_pr, self.merged, self.description
        )
    }
}

/// Renders the header, divider and rows as one newline-separated table.
#[must_use]
pub fn render_table(rows: &[StatusRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(HEADER.to_string());
    lines.push(DIVIDER.to_string());
    lines.extend(rows.iter().map(ToString::to_string));
    lines.join("\n")
}
