pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod service;
pub mod tasks;
pub mod workflow;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use llm::{TextGenerator, build_generator};
pub use models::*;
pub use service::{AppState, build_router};
pub use workflow::{SymptomPipeline, build_triage_workflow};

/// Assemble the HTTP application from configuration
pub fn create_app(config: &ServiceConfig) -> axum::Router {
    let pipeline = SymptomPipeline::new(build_generator(&config.llm));
    build_router(AppState::new(pipeline, config.hospital_name.as_str()))
}
