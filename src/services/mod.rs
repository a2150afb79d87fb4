pub mod generation_client;
pub mod llm_service;
pub mod planner;
pub mod preprocess;
pub mod validator;

pub use generation_client::GenerationClient;
pub use llm_service::{LlmService, TextGenerator};
pub use planner::plan_batches;
pub use preprocess::preprocess;
pub use validator::validate_response;
