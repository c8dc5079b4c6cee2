use crate::dialect::Dialect;
use crate::emit::HeaderConfig;
use crate::errors::{HarvestError, Result};
use crate::extract::ExtractRule;
use crate::layout::Layout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level harvest configuration (`harvest.yaml`).
///
/// Every section is optional; an empty document yields the built-in layout
/// (`results/ex1.1/test1..64`).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HarvestConfig {
    pub layout: Layout,
    pub dialect: Dialect,
    pub extract: ExtractRule,
    pub header: HeaderConfig,
    /// Upper bound on files processed concurrently. `1` is fully sequential.
    pub parallel: usize,
}

fn default_parallel() -> usize {
    4
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            dialect: Dialect::default(),
            extract: ExtractRule::default(),
            header: HeaderConfig::default(),
            parallel: default_parallel(),
        }
    }
}

impl HarvestConfig {
    /// Load config from YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| HarvestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| HarvestError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like `load`, but a missing file means defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.layout.count == 0 {
            return Err(HarvestError::config("layout.count must be at least 1"));
        }
        if self.parallel == 0 {
            return Err(HarvestError::config("parallel must be at least 1"));
        }
        self.dialect.validate()?;
        self.extract.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::HeaderStyle;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(HarvestConfig::from_yaml("").unwrap(), HarvestConfig::default());
        assert_eq!(
            HarvestConfig::from_yaml("{}").unwrap(),
            HarvestConfig::default()
        );
    }

    #[test]
    fn example_file_spells_out_defaults() {
        let cfg = HarvestConfig::from_yaml(include_str!("../../../harvest.example.yaml")).unwrap();
        assert_eq!(cfg, HarvestConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = HarvestConfig::from_yaml(
            r#"
layout:
  root: out
  count: 8
header:
  style: single
parallel: 1
"#,
        )
        .unwrap();
        assert_eq!(cfg.layout.root, Path::new("out"));
        assert_eq!(cfg.layout.count, 8);
        assert_eq!(cfg.layout.experiment, "ex1.1");
        assert_eq!(cfg.header.style, HeaderStyle::Single);
        assert_eq!(cfg.header.text, "Runtime");
        assert_eq!(cfg.parallel, 1);
        assert_eq!(cfg.extract, ExtractRule::default());
        cfg.validate().unwrap();
    }

    #[test]
    fn dialect_chars_from_yaml() {
        let cfg = HarvestConfig::from_yaml(
            "dialect:\n  delimiter: ','\n  quote: '\"'\n  line_terminator: lf\n",
        )
        .unwrap();
        assert_eq!(cfg.dialect.delimiter, ',');
        assert_eq!(cfg.dialect.quote, '"');
        assert_eq!(cfg.dialect.line_terminator, crate::dialect::LineTerminator::Lf);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(HarvestConfig::from_yaml("paralel: 2\n").is_err());
    }

    #[test]
    fn unknown_keys_inside_sections_are_rejected() {
        for doc in [
            "extract: { colum: 1 }\n",
            "layout: { rot: out }\n",
            "dialect: { delimeter: ',' }\n",
            "header: { styel: single }\n",
        ] {
            let err = HarvestConfig::from_yaml(doc).unwrap_err();
            assert!(err.to_string().contains("unknown field"), "{}: {}", doc, err);
        }
    }

    #[test]
    fn validate_rejects_zero_values() {
        let cfg = HarvestConfig {
            parallel: 0,
            ..HarvestConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = HarvestConfig {
            layout: Layout {
                count: 0,
                ..Layout::default()
            },
            ..HarvestConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = HarvestConfig::load_or_default(&dir.path().join("harvest.yaml")).unwrap();
        assert_eq!(cfg, HarvestConfig::default());
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("harvest.yaml");
        std::fs::write(&path, "parallel: [1, 2]\n").unwrap();
        let err = HarvestConfig::load(&path).unwrap_err();
        assert!(matches!(err, HarvestError::ConfigParse { .. }));
        assert_eq!(err.path(), Some(path.as_path()));
    }
}
