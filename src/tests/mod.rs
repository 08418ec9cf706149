mod fakes;
mod pipeline_tests;
mod evaluator_tests;
mod orchestrator_tests;
