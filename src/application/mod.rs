// Application layer - Use cases and the trend analysis core
pub mod history_service;
pub mod runner_service;
pub mod snapshot_repository;
pub mod trend_analyzer;
