// Cover letters: AI-written with template fallback, persisted per user.
// All provider calls go through llm_client and resilience.

pub mod generator;
pub mod handlers;
pub mod prompts;
