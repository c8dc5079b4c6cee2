//! Check that emitted results files still agree with their inputs.

use crate::dialect::Dialect;
use crate::emit::HeaderConfig;
use crate::errors::{HarvestError, Result};
use crate::extract::{collect_test, ExtractRule};
use crate::layout::{Layout, TestIndex};
use crate::model::Value;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Match {
        count: usize,
    },
    CountMismatch {
        expected: usize,
        actual: usize,
    },
    /// `row` is zero-based, header excluded. Values are shown lossily.
    ValueMismatch {
        row: usize,
        expected: String,
        actual: String,
    },
    MissingOutput,
}

impl CheckOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCheck {
    pub index: TestIndex,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

/// Read an emitted results file back into its value list.
pub fn read_results<R: Read>(
    reader: R,
    dialect: &Dialect,
    header: &HeaderConfig,
) -> std::result::Result<Vec<Value>, csv::Error> {
    let mut rdr = dialect.reader_builder().from_reader(reader);
    let mut row = csv::ByteRecord::new();
    if header.row().is_some() && !rdr.read_byte_record(&mut row)? {
        return Ok(Vec::new());
    }
    let mut values = Vec::new();
    while rdr.read_byte_record(&mut row)? {
        values.push(Value::from(row.get(0).unwrap_or_default()));
    }
    Ok(values)
}

fn compare(expected: &[Value], actual: &[Value]) -> CheckOutcome {
    if expected.len() != actual.len() {
        return CheckOutcome::CountMismatch {
            expected: expected.len(),
            actual: actual.len(),
        };
    }
    match expected.iter().zip(actual).position(|(e, a)| e != a) {
        Some(row) => CheckOutcome::ValueMismatch {
            row,
            expected: expected[row].to_string(),
            actual: actual[row].to_string(),
        },
        None => CheckOutcome::Match {
            count: expected.len(),
        },
    }
}

/// Re-collect one test's input and compare it with its results file.
pub fn check_test(
    layout: &Layout,
    dialect: &Dialect,
    rule: &ExtractRule,
    header: &HeaderConfig,
    index: TestIndex,
) -> Result<TestCheck> {
    let expected = collect_test(layout, dialect, rule, index)?;
    let path = layout.output_path(index);
    let file = match File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(TestCheck {
                index,
                outcome: CheckOutcome::MissingOutput,
            })
        }
        Err(source) => return Err(HarvestError::Open { path, source }),
    };
    let actual = read_results(BufReader::new(file), dialect, header)
        .map_err(|source| HarvestError::Parse {
            path: path.clone(),
            source,
        })?;

    let outcome = compare(&expected.values, &actual);
    if !outcome.is_match() {
        tracing::warn!(test = %index, ?outcome, "results file out of date");
    }
    Ok(TestCheck { index, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{write_results, HeaderStyle};

    fn vals(v: &[&str]) -> Vec<Value> {
        v.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn emitted_file_reads_back() {
        let values = vals(&["5.2", "12 ms", "a|b"]);
        for style in [HeaderStyle::PerCharacter, HeaderStyle::Single, HeaderStyle::None] {
            let header = HeaderConfig {
                style,
                ..HeaderConfig::default()
            };
            let mut buf = Vec::new();
            write_results(&mut buf, &Dialect::default(), &header, &values).unwrap();
            let back = read_results(buf.as_slice(), &Dialect::default(), &header).unwrap();
            assert_eq!(back, values, "style {:?}", style);
        }
    }

    #[test]
    fn non_utf8_bytes_read_back_exactly() {
        let values = vec![Value::new(b"\xff9".to_vec()), Value::new(b"\xfe9".to_vec())];
        let header = HeaderConfig::default();
        let mut buf = Vec::new();
        write_results(&mut buf, &Dialect::default(), &header, &values).unwrap();
        let back = read_results(buf.as_slice(), &Dialect::default(), &header).unwrap();
        assert_eq!(back, values);
        // Both decode to the same lossy text but still differ.
        assert!(matches!(
            compare(&values[..1], &values[1..]),
            CheckOutcome::ValueMismatch { row: 0, .. }
        ));
    }

    #[test]
    fn header_only_file_is_empty_list() {
        let back = read_results(
            "R u n t i m e\r\n".as_bytes(),
            &Dialect::default(),
            &HeaderConfig::default(),
        )
        .unwrap();
        assert!(back.is_empty());
    }

    #[test]
    fn compare_reports_first_difference() {
        assert_eq!(
            compare(&vals(&["1", "2"]), &vals(&["1", "2"])),
            CheckOutcome::Match { count: 2 }
        );
        assert_eq!(
            compare(&vals(&["1", "2"]), &vals(&["1"])),
            CheckOutcome::CountMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            compare(&vals(&["1", "2"]), &vals(&["1", "3"])),
            CheckOutcome::ValueMismatch {
                row: 1,
                expected: "2".into(),
                actual: "3".into()
            }
        );
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let check = TestCheck {
            index: TestIndex(4),
            outcome: CheckOutcome::CountMismatch {
                expected: 3,
                actual: 1,
            },
        };
        let v = serde_json::to_value(&check).unwrap();
        assert_eq!(v["index"], 4);
        assert_eq!(v["status"], "count_mismatch");
        assert_eq!(v["expected"], 3);
    }
}
