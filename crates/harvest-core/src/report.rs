use crate::model::{Harvest, Value};
use std::io::Write;
use std::path::Path;

/// Every value followed by a single space; an empty list gives an empty line.
/// Values keep their input bytes.
#[must_use]
pub fn format_line(values: &[Value]) -> Vec<u8> {
    values.iter().fold(Vec::new(), |mut line, value| {
        line.extend_from_slice(value.as_bytes());
        line.push(b' ');
        line
    })
}

/// One line per test, in index order.
pub fn write_text<W: Write>(harvest: &Harvest, mut out: W) -> std::io::Result<()> {
    for test in &harvest.tests {
        out.write_all(&format_line(&test.values))?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

pub fn to_json(harvest: &Harvest) -> serde_json::Value {
    let tests: Vec<serde_json::Value> = harvest
        .tests
        .iter()
        .map(|t| {
            serde_json::json!({
                "index": t.index,
                "count": t.values.len(),
                "values": t.values,
            })
        })
        .collect();
    serde_json::json!({
        "experiment": harvest.experiment,
        "tests": tests,
    })
}

pub fn write_json<W: Write>(harvest: &Harvest, mut out: W) -> std::io::Result<()> {
    let text = serde_json::to_string_pretty(&to_json(harvest))?;
    writeln!(out, "{}", text)?;
    out.flush()
}

pub fn write_json_file(harvest: &Harvest, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(&to_json(harvest))?)
}

/// Footer for stderr, mirroring the per-run summary the runner logs.
#[must_use]
pub fn summary_line(harvest: &Harvest) -> String {
    format!(
        "Harvested {} values from {} tests ({} empty)",
        harvest.total_values(),
        harvest.tests.len(),
        harvest.empty_tests()
    )
}

pub fn print_summary(harvest: &Harvest) {
    eprintln!("{}", summary_line(harvest));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TestIndex;
    use crate::model::TestValues;

    fn sample() -> Harvest {
        Harvest::new(
            "ex1.1",
            vec![
                TestValues::new(TestIndex(1), vec!["5.2".into()]),
                TestValues::new(TestIndex(2), vec![]),
                TestValues::new(TestIndex(3), vec!["1".into(), "2".into()]),
            ],
        )
    }

    #[test]
    fn line_has_trailing_space_per_value() {
        assert_eq!(format_line(&[Value::from("5.2")]), b"5.2 ");
        assert_eq!(format_line(&[Value::from("1"), Value::from("2")]), b"1 2 ");
        assert_eq!(format_line(&[]), b"");
        assert_eq!(format_line(&[Value::new(b"\xff9".to_vec())]), b"\xff9 ");
    }

    #[test]
    fn text_report_is_one_line_per_test() {
        let mut out = Vec::new();
        write_text(&sample(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "5.2 \n\n1 2 \n");
    }

    #[test]
    fn json_report_shape() {
        let v = to_json(&sample());
        assert_eq!(v["experiment"], "ex1.1");
        let tests = v["tests"].as_array().unwrap();
        assert_eq!(tests.len(), 3);
        assert_eq!(tests[0]["index"], 1);
        assert_eq!(tests[0]["values"][0], "5.2");
        assert_eq!(tests[1]["count"], 0);
        assert_eq!(tests[2]["count"], 2);
    }

    #[test]
    fn summary_counts_empty_tests() {
        assert_eq!(
            summary_line(&sample()),
            "Harvested 3 values from 3 tests (1 empty)"
        );
    }
}
