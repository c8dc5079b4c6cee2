//! Directory layout of an experiment: `<root>/<experiment>/test<i>/<file>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One numbered test directory (`test<i>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestIndex(pub u32);

impl TestIndex {
    pub fn dir_name(self) -> String {
        format!("test{}", self.0)
    }
}

impl fmt::Display for TestIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    pub root: PathBuf,
    pub experiment: String,
    /// Index of the first test directory.
    pub first: u32,
    /// Number of consecutive test directories.
    pub count: u32,
    pub input_file: String,
    pub output_file: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("results"),
            experiment: "ex1.1".to_string(),
            first: 1,
            count: 64,
            input_file: "output.csv".to_string(),
            output_file: "results.csv".to_string(),
        }
    }
}

impl Layout {
    /// Test indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = TestIndex> {
        let first = self.first;
        let last = first.saturating_add(self.count);
        (first..last).map(TestIndex)
    }

    pub fn experiment_dir(&self) -> PathBuf {
        self.root.join(&self.experiment)
    }

    pub fn test_dir(&self, index: TestIndex) -> PathBuf {
        self.experiment_dir().join(index.dir_name())
    }

    pub fn input_path(&self, index: TestIndex) -> PathBuf {
        self.test_dir(index).join(&self.input_file)
    }

    pub fn output_path(&self, index: TestIndex) -> PathBuf {
        self.test_dir(index).join(&self.output_file)
    }
}
