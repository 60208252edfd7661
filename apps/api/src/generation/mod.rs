// Knowledge-card generation: prompt contract, data model, gateway and HTTP handlers.
// All provider calls go through llm_client — no direct HTTP calls here.

pub mod gateway;
pub mod handlers;
pub mod models;
pub mod prompts;
