use crate::check::{check_test, TestCheck};
use crate::config::HarvestConfig;
use crate::dialect::Dialect;
use crate::emit::{emit_test, HeaderConfig};
use crate::errors::{HarvestError, Result};
use crate::extract::{collect_test, ExtractRule};
use crate::layout::{Layout, TestIndex};
use crate::model::{Harvest, TestValues};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub phase: &'static str,
    pub done: usize,
    pub total: usize,
}

/// Called after each per-test job completes, in completion order.
pub type ProgressSink = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct Harvester {
    pub layout: Layout,
    pub dialect: Dialect,
    pub rule: ExtractRule,
    pub header: HeaderConfig,
    pub parallel: usize,
}

impl Harvester {
    pub fn from_config(cfg: &HarvestConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            layout: cfg.layout.clone(),
            dialect: cfg.dialect.clone(),
            rule: cfg.extract.clone(),
            header: cfg.header.clone(),
            parallel: cfg.parallel,
        })
    }

    /// Collect the value list of every test. The result is in index order
    /// whatever order the workers finished in.
    pub async fn collect_all(&self, progress: Option<ProgressSink>) -> Result<Harvest> {
        let layout = self.layout.clone();
        let dialect = self.dialect.clone();
        let rule = self.rule.clone();
        let items: Vec<_> = self.layout.indices().map(|i| (i, ())).collect();
        let tests = self
            .run_pool("collect", items, progress, move |index, ()| {
                collect_test(&layout, &dialect, &rule, index)
            })
            .await?;
        let harvest = Harvest::new(self.layout.experiment.clone(), tests);
        tracing::info!(
            tests = harvest.tests.len(),
            values = harvest.total_values(),
            "collect finished"
        );
        Ok(harvest)
    }

    /// Write `results.csv` for every test in `harvest`.
    pub async fn emit_all(&self, harvest: &Harvest, progress: Option<ProgressSink>) -> Result<()> {
        let layout = self.layout.clone();
        let dialect = self.dialect.clone();
        let header = self.header.clone();
        let items: Vec<_> = harvest.tests.iter().map(|t| (t.index, t.clone())).collect();
        let written = self
            .run_pool("emit", items, progress, move |_, test: TestValues| {
                emit_test(&layout, &dialect, &header, &test)
            })
            .await?;
        tracing::info!(files = written.len(), "emit finished");
        Ok(())
    }

    /// Compare every test's results file with a fresh collect of its input.
    pub async fn check_all(&self, progress: Option<ProgressSink>) -> Result<Vec<TestCheck>> {
        let layout = self.layout.clone();
        let dialect = self.dialect.clone();
        let rule = self.rule.clone();
        let header = self.header.clone();
        let items: Vec<_> = self.layout.indices().map(|i| (i, ())).collect();
        self.run_pool("check", items, progress, move |index, ()| {
            check_test(&layout, &dialect, &rule, &header, index)
        })
        .await
    }

    /// Run `job` once per item on at most `parallel` blocking workers.
    ///
    /// After the first failure no further jobs are started; jobs already
    /// running finish. The error returned is the one of the lowest failing
    /// index, so `parallel == 1` fails exactly where a sequential loop would.
    async fn run_pool<I, T, F>(
        &self,
        phase: &'static str,
        items: Vec<(TestIndex, I)>,
        progress: Option<ProgressSink>,
        job: F,
    ) -> Result<Vec<T>>
    where
        I: Send + 'static,
        T: Send + 'static,
        F: Fn(TestIndex, I) -> Result<T> + Send + Sync + 'static,
    {
        let total = items.len();
        let sem = Arc::new(Semaphore::new(self.parallel.max(1)));
        let failed = Arc::new(AtomicBool::new(false));
        let job = Arc::new(job);
        let mut join_set = JoinSet::new();

        tracing::debug!(phase, total, parallel = self.parallel, "starting pool");
        for (index, item) in items {
            let permit = sem
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| HarvestError::Worker {
                    message: e.to_string(),
                })?;
            if failed.load(Ordering::SeqCst) {
                tracing::debug!(phase, test = %index, "not started after earlier failure");
                break;
            }
            let job = Arc::clone(&job);
            let failed = Arc::clone(&failed);
            join_set.spawn_blocking(move || {
                let _permit = permit;
                let res = job(index, item);
                if res.is_err() {
                    failed.store(true, Ordering::SeqCst);
                }
                (index, res)
            });
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some(res) = join_set.join_next().await {
            let (index, outcome) = res.map_err(|e| HarvestError::Worker {
                message: format!("{} job: {}", phase, e),
            })?;
            outcomes.push((index, outcome));
            if let Some(ref sink) = progress {
                sink(ProgressEvent {
                    phase,
                    done: outcomes.len(),
                    total,
                });
            }
        }

        // Deterministic order for reporting and for picking the error.
        outcomes.sort_by_key(|(index, _)| *index);
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }
}
