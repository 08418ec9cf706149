pub mod config;
pub mod llm_client;
pub mod lexical_index;
pub mod llm_judge;
pub mod classifier;
pub mod retriever;
pub mod drafter;
pub mod pipeline;
pub mod review_agents;
pub mod refinement;
pub mod evaluator;
pub mod batch;
pub mod orchestrator;
