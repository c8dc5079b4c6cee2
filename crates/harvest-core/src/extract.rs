//! Collect phase: pull one column out of every qualifying row.

use crate::dialect::Dialect;
use crate::errors::{HarvestError, Result};
use crate::layout::{Layout, TestIndex};
use crate::model::{TestValues, Value};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};

/// Which rows qualify and what is taken from them.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractRule {
    /// Rows with any other number of fields are skipped.
    pub field_count: usize,
    /// Zero-based column to take from a qualifying row.
    pub column: usize,
    /// Leading characters dropped from the taken field. A field that is not
    /// UTF-8 loses this many bytes instead.
    pub strip_prefix: usize,
}

impl Default for ExtractRule {
    fn default() -> Self {
        Self {
            field_count: 3,
            column: 2,
            strip_prefix: 1,
        }
    }
}

impl ExtractRule {
    pub fn validate(&self) -> Result<()> {
        if self.column >= self.field_count {
            return Err(HarvestError::config(format!(
                "column {} is out of range for rows of {} fields",
                self.column, self.field_count
            )));
        }
        Ok(())
    }

    /// Value for one row, or `None` when the row does not qualify.
    pub fn apply(&self, row: &csv::ByteRecord) -> Option<Value> {
        if row.len() != self.field_count {
            return None;
        }
        let field = row.get(self.column)?;
        Some(Value::from(strip_leading(field, self.strip_prefix)))
    }
}

fn strip_leading(field: &[u8], n: usize) -> &[u8] {
    let start = match std::str::from_utf8(field) {
        Ok(s) => s.char_indices().nth(n).map_or(s.len(), |(i, _)| i),
        Err(_) => n.min(field.len()),
    };
    &field[start..]
}

/// Parse `reader` with `dialect` and return the values of qualifying rows in order.
pub fn extract_values<R: Read>(
    reader: R,
    dialect: &Dialect,
    rule: &ExtractRule,
) -> std::result::Result<Vec<Value>, csv::Error> {
    let mut rdr = dialect.reader_builder().from_reader(reader);
    let mut values = Vec::new();
    let mut row = csv::ByteRecord::new();
    while rdr.read_byte_record(&mut row)? {
        if let Some(value) = rule.apply(&row) {
            values.push(value);
        }
    }
    Ok(values)
}

/// Collect the value list for one test directory.
pub fn collect_test(
    layout: &Layout,
    dialect: &Dialect,
    rule: &ExtractRule,
    index: TestIndex,
) -> Result<TestValues> {
    let path = layout.input_path(index);
    let file = File::open(&path).map_err(|source| HarvestError::Open {
        path: path.clone(),
        source,
    })?;
    let values = extract_values(BufReader::new(file), dialect, rule)
        .map_err(|source| HarvestError::Parse {
            path: path.clone(),
            source,
        })?;

    if values.is_empty() {
        tracing::warn!(test = %index, path = %path.display(), "no qualifying rows");
    } else {
        tracing::debug!(test = %index, values = values.len(), "collected");
    }
    Ok(TestValues::new(index, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(data: &str) -> Vec<Value> {
        extract_bytes(data.as_bytes())
    }

    fn extract_bytes(data: &[u8]) -> Vec<Value> {
        extract_values(data, &Dialect::default(), &ExtractRule::default()).unwrap()
    }

    #[test]
    fn keeps_only_three_field_rows() {
        let data = "Total runtime: :5.2\nx y\none two three four\nRun time: \t7\n";
        assert_eq!(extract(data), vec!["5.2", "7"]);
    }

    #[test]
    fn quote_is_consumed_before_strip() {
        // `|5.2|` parses to `5.2`; the first character strip then removes `5`.
        assert_eq!(extract("a b |5.2|\nx y\n"), vec![".2"]);
    }

    #[test]
    fn quoted_field_may_hold_delimiter() {
        assert_eq!(extract("a b |:12 ms|\n"), vec!["12 ms"]);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(extract("").is_empty());
        assert!(extract("\n\n").is_empty());
    }

    #[test]
    fn consecutive_delimiters_make_empty_fields() {
        // Two spaces between `a` and `b` produce an empty middle field: 4 fields.
        assert!(extract("a  b c\n").is_empty());
        // `a  :9` is three fields: "a", "", ":9".
        assert_eq!(extract("a  :9\n"), vec!["9"]);
    }

    #[test]
    fn short_field_strips_to_empty() {
        assert_eq!(extract("a b c\n"), vec![""]);
        assert_eq!(extract("a b ||\n"), vec![""]);
    }

    #[test]
    fn strip_is_character_wise() {
        assert_eq!(extract("a b µ42\n"), vec!["42"]);
    }

    #[test]
    fn non_utf8_field_passes_through_and_strips_one_byte() {
        let values = extract_bytes(b"a b :\xff9\nx y\n");
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].as_bytes(), b"\xff9");

        let mut out = Vec::new();
        crate::emit::write_results(
            &mut out,
            &Dialect::default(),
            &crate::emit::HeaderConfig::default(),
            &values,
        )
        .unwrap();
        assert!(out.ends_with(b"\r\n\xff9\r\n"), "{:?}", out);
    }

    #[test]
    fn custom_rule() {
        let rule = ExtractRule {
            field_count: 2,
            column: 0,
            strip_prefix: 0,
        };
        let values =
            extract_values("k v\nonly\nk2 v2\n".as_bytes(), &Dialect::default(), &rule).unwrap();
        assert_eq!(values, vec!["k", "k2"]);
    }

    #[test]
    fn rule_rejects_out_of_range_column() {
        let rule = ExtractRule {
            field_count: 2,
            column: 2,
            strip_prefix: 1,
        };
        assert!(rule.validate().is_err());
        ExtractRule::default().validate().unwrap();
    }

    #[test]
    fn missing_input_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout {
            root: dir.path().to_path_buf(),
            ..Layout::default()
        };
        let err = collect_test(
            &layout,
            &Dialect::default(),
            &ExtractRule::default(),
            TestIndex(1),
        )
        .unwrap_err();
        assert!(matches!(err, HarvestError::Open { .. }));
        assert_eq!(err.path(), Some(layout.input_path(TestIndex(1)).as_path()));
    }
}
