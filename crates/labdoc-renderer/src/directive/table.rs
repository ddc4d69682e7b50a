//! Table widget configuration derived from `lab:data-table` directives.

use super::{DirectiveAttrs, DirectiveElement};

/// Default number of data rows in a generated table.
pub const DEFAULT_TABLE_ROWS: usize = 5;

/// Column headers used when a directive body has no table header.
pub const DEFAULT_MEASUREMENT_COLUMNS: [&str; 3] =
    ["Physical Aspect", "Measurement Device", "Measurement Unit"];

/// Configuration for a generated data table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSpec {
    /// Number of numbered data rows. Zero yields a header-only table.
    pub rows: usize,
    /// Column headers, excluding the leading `#` column.
    pub columns: Vec<String>,
    /// Render data cells with the `fillable` styling hook.
    pub fillable: bool,
    /// Optional subheading rendered above the table.
    pub title: Option<String>,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self {
            rows: DEFAULT_TABLE_ROWS,
            columns: default_columns(),
            fillable: true,
            title: None,
        }
    }
}

impl TableSpec {
    /// Build a table spec from directive attributes and body.
    ///
    /// `rows` falls back to [`DEFAULT_TABLE_ROWS`] when absent or malformed.
    /// Columns are taken from the first pipe-delimited line of the body.
    #[must_use]
    pub fn from_directive(attrs: &DirectiveAttrs, body: &str) -> Self {
        Self {
            rows: attrs.get_usize("rows").unwrap_or(DEFAULT_TABLE_ROWS),
            columns: header_columns(body).unwrap_or_else(default_columns),
            fillable: true,
            title: attrs
                .get("title")
                .filter(|t| !t.is_empty())
                .map(str::to_owned),
        }
    }

    /// Build a table spec from a parsed `data-table` element.
    #[must_use]
    pub fn from_element(element: &DirectiveElement) -> Self {
        Self::from_directive(&element.attrs, &element.raw_content)
    }

    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_fillable(mut self, fillable: bool) -> Self {
        self.fillable = fillable;
        self
    }
}

fn default_columns() -> Vec<String> {
    DEFAULT_MEASUREMENT_COLUMNS
        .iter()
        .map(|c| (*c).to_owned())
        .collect()
}

/// Extract header cells from the first pipe-delimited line of `body`.
fn header_columns(body: &str) -> Option<Vec<String>> {
    let header = body.lines().find(|line| line.contains('|'))?;
    let columns: Vec<String> = header
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_owned)
        .collect();

    // A bare delimiter row carries no header names
    let is_delimiter = columns
        .iter()
        .all(|cell| cell.chars().all(|c| matches!(c, '-' | ':')));

    (!columns.is_empty() && !is_delimiter).then_some(columns)
}
