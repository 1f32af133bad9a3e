//! Job handler trait and registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use farelens_core::error::AppError;
use farelens_core::result::AppResult;

/// Trait for scheduled job implementations.
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// The job name this handler runs under.
    fn name(&self) -> &str;

    /// Execute the job, returning a summary for the run log.
    async fn run(&self) -> AppResult<Value>;
}

/// Dispatches scheduled runs to the handler registered under each name.
#[derive(Debug, Default)]
pub struct JobRegistry {
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job handler.
    pub fn register(&mut self, handler: Arc<dyn JobHandler>) {
        let name = handler.name().to_string();
        info!(job = %name, "Registered job handler");
        self.handlers.insert(name, handler);
    }

    /// Run the named job.
    pub async fn run(&self, name: &str) -> AppResult<Value> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| AppError::internal(format!("No handler registered for job '{name}'")))?;
        let summary = handler.run().await?;
        info!(job = %name, %summary, "Job completed");
        Ok(summary)
    }

    /// Names of all registered jobs.
    pub fn registered_names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NoopJob;

    #[async_trait]
    impl JobHandler for NoopJob {
        fn name(&self) -> &str {
            "noop"
        }

        async fn run(&self) -> AppResult<Value> {
            Ok(serde_json::json!({"ok": true}))
        }
    }

    #[tokio::test]
    async fn test_registry_dispatches_by_name() {
        let mut registry = JobRegistry::new();
        registry.register(Arc::new(NoopJob));
        let summary = registry.run("noop").await.unwrap();
        assert_eq!(summary["ok"], true);
    }

    #[tokio::test]
    async fn test_unknown_job_errors() {
        let registry = JobRegistry::new();
        assert!(registry.run("missing").await.is_err());
    }
}
