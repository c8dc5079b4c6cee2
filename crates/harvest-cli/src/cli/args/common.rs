//! Shared argument types used across multiple commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::ValueEnum;
use harvest_core::{HarvestConfig, HeaderStyle};

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum HeaderStyleArg {
    /// `R u n t i m e`: one field per character
    PerCharacter,
    /// `Runtime`: one field
    Single,
    /// No header row
    #[value(name = "none")]
    NoHeader,
}

impl From<HeaderStyleArg> for HeaderStyle {
    fn from(arg: HeaderStyleArg) -> Self {
        match arg {
            HeaderStyleArg::PerCharacter => HeaderStyle::PerCharacter,
            HeaderStyleArg::Single => HeaderStyle::Single,
            HeaderStyleArg::NoHeader => HeaderStyle::None,
        }
    }
}

/// Where the experiment lives and how many workers process it.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct LayoutArgs {
    /// Config file (default: ./harvest.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the experiment directories
    #[arg(long, env = "HARVEST_ROOT")]
    pub root: Option<PathBuf>,

    /// Experiment directory name under the root
    #[arg(long)]
    pub experiment: Option<String>,

    /// Number of test directories
    #[arg(long)]
    pub tests: Option<u32>,

    /// Index of the first test directory
    #[arg(long)]
    pub first: Option<u32>,

    /// Files processed concurrently (1 = sequential)
    #[arg(long, env = "HARVEST_PARALLEL")]
    pub parallel: Option<usize>,
}

pub const DEFAULT_CONFIG: &str = "harvest.yaml";

impl LayoutArgs {
    /// Load the config file and apply flag overrides on top.
    pub fn resolve(&self) -> anyhow::Result<HarvestConfig> {
        let mut cfg = match &self.config {
            Some(path) => HarvestConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => HarvestConfig::load_or_default(std::path::Path::new(DEFAULT_CONFIG))?,
        };
        if let Some(root) = &self.root {
            cfg.layout.root = root.clone();
        }
        if let Some(experiment) = &self.experiment {
            cfg.layout.experiment = experiment.clone();
        }
        if let Some(count) = self.tests {
            cfg.layout.count = count;
        }
        if let Some(first) = self.first {
            cfg.layout.first = first;
        }
        if let Some(parallel) = self.parallel {
            cfg.parallel = parallel;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
