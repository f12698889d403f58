// Resume rewriting: one generation call per request, filled into the
// caller's format template, plus match analysis and plain-text export.
// All LLM calls go through llm_client.

pub mod analysis;
pub mod export;
pub mod generator;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
