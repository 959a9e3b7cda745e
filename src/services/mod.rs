pub mod essay_store;
pub mod llm_service;

pub use essay_store::EssayStore;
pub use llm_service::LlmService;
