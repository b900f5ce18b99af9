//! Scores many result files into one summary table

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::analysis::{score_file, ScoreResult};
use crate::records::LoadError;
use crate::reporting::SummaryTable;

/// Configuration for the aggregator
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Maximum number of files scored at once; 1 scores files in order on the caller
    pub parallel_files: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self { parallel_files: 4 }
    }
}

/// Error scoring one file during aggregation
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Scoring worker for {} failed: {message}", .path.display())]
    Worker { path: PathBuf, message: String },
}

impl AggregateError {
    pub fn path(&self) -> &Path {
        match self {
            AggregateError::Load(e) => e.path(),
            AggregateError::Worker { path, .. } => path,
        }
    }
}

/// Aggregator over an explicit list of result files
pub struct Aggregator {
    config: AggregatorConfig,
    semaphore: Arc<Semaphore>,
}

impl Aggregator {
    /// Create a new aggregator
    pub fn new(config: AggregatorConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.parallel_files.max(1)));
        Self { config, semaphore }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Score every file, one result per path in input order.
    ///
    /// A failing file does not stop the others.
    pub async fn score_all(&self, paths: &[PathBuf]) -> Vec<Result<ScoreResult, AggregateError>> {
        if self.config.parallel_files <= 1 {
            return paths
                .iter()
                .map(|path| score_file(path).map_err(AggregateError::from))
                .collect();
        }

        let mut handles = Vec::with_capacity(paths.len());
        for path in paths {
            // Waiting here bounds the number of files in flight.
            let permit = self.semaphore.clone().acquire_owned().await.ok();
            let path = path.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                score_file(&path)
            }));
        }

        let mut results = Vec::with_capacity(paths.len());
        for (path, handle) in paths.iter().zip(handles) {
            let result = match handle.await {
                Ok(scored) => scored.map_err(AggregateError::from),
                Err(e) => {
                    tracing::error!("Scoring {} panicked: {}", path.display(), e);
                    Err(AggregateError::Worker {
                        path: path.clone(),
                        message: e.to_string(),
                    })
                }
            };
            results.push(result);
        }

        results
    }

    /// Score every file into a summary table.
    ///
    /// Fails with the first error in input order.
    pub async fn run(&self, paths: &[PathBuf]) -> Result<SummaryTable, AggregateError> {
        let rows = self
            .score_all(paths)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Scored {} result files", rows.len());
        Ok(SummaryTable::new(rows))
    }
}
