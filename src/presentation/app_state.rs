// Application state for HTTP handlers
use crate::application::history_service::HistoryService;
use crate::application::runner_service::RunnerService;

#[derive(Clone)]
pub struct AppState {
    pub runner_service: RunnerService,
    pub history_service: HistoryService,
}
