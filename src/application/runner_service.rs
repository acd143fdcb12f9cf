// Runner service - Use case for listing runners
use crate::application::snapshot_repository::SnapshotRepository;
use crate::domain::runner::Runner;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunnerService {
    repository: Arc<dyn SnapshotRepository>,
}

impl RunnerService {
    pub fn new(repository: Arc<dyn SnapshotRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_runners(&self) -> anyhow::Result<Vec<Runner>> {
        let ids = self.repository.list_runner_ids().await?;
        Ok(ids.into_iter().map(Runner::new).collect())
    }
}
