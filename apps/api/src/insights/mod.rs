// Industry insights: one shared row per industry, filled by the quiz model
// with placeholder values as the degraded form.

pub mod generator;
pub mod handlers;
pub mod prompts;
