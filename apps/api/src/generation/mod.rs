// Contract generation: prompt templates, prompt assembly, the completion call,
// and the download endpoints.
// All model calls go through llm_client; nothing here talks HTTP to the provider.

pub mod generator;
pub mod handlers;
pub mod prompts;
