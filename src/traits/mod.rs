pub mod inference_gateway;
pub mod retrieval_gateway;
pub mod evaluation_service;
pub mod review_roles;
pub mod qa_system;

// Re-export traits
pub use inference_gateway::InferenceGateway;
pub use retrieval_gateway::RetrievalGateway;
pub use evaluation_service::EvaluationService;
pub use review_roles::{ Architect, Auditor };
pub use qa_system::QaSystem;
