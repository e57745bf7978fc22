// Resume: markdown storage plus AI section rewrites with template fallback.

pub mod handlers;
pub mod improver;
pub mod prompts;
