//! Emit phase: rewrite each test's values into its own results file.

use crate::dialect::Dialect;
use crate::errors::{HarvestError, Result};
use crate::layout::Layout;
use crate::model::TestValues;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};

/// How the header text is laid out in the first row.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStyle {
    /// One row, one field per character of the text (`R u n t i m e`).
    /// Byte-compatible with results files produced by earlier tooling.
    #[default]
    PerCharacter,
    /// One row holding the text as a single field.
    Single,
    /// No header row.
    None,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    pub text: String,
    pub style: HeaderStyle,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            text: "Runtime".to_string(),
            style: HeaderStyle::PerCharacter,
        }
    }
}

impl HeaderConfig {
    /// Fields of the header row, or `None` when no header row is written.
    pub fn row(&self) -> Option<Vec<String>> {
        if self.text.is_empty() {
            return None;
        }
        match self.style {
            HeaderStyle::PerCharacter => Some(self.text.chars().map(String::from).collect()),
            HeaderStyle::Single => Some(vec![self.text.clone()]),
            HeaderStyle::None => None,
        }
    }
}

/// Write the header row, then one single-field row per value. Values are
/// written as bytes.
pub fn write_results<W: Write, V: AsRef<[u8]>>(
    writer: W,
    dialect: &Dialect,
    header: &HeaderConfig,
    values: &[V],
) -> std::result::Result<(), csv::Error> {
    let mut wtr = dialect.writer_builder().from_writer(writer);
    if let Some(row) = header.row() {
        wtr.write_record(&row)?;
    }
    for value in values {
        wtr.write_record([value.as_ref()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create or overwrite the results file of one test.
pub fn emit_test(
    layout: &Layout,
    dialect: &Dialect,
    header: &HeaderConfig,
    test: &TestValues,
) -> Result<()> {
    let path = layout.output_path(test.index);
    let file = File::create(&path).map_err(|source| HarvestError::Io {
        path: path.clone(),
        source,
    })?;
    write_results(BufWriter::new(file), dialect, header, &test.values).map_err(|source| {
        HarvestError::Write {
            path: path.clone(),
            source,
        }
    })?;
    tracing::debug!(test = %test.index, rows = test.values.len(), path = %path.display(), "emitted");
    Ok(())
}
