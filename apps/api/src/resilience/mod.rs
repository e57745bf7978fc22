// AI-call resilience: retry with backoff around every provider call, plus
// deterministic templates the workflows fall back to when the provider is out.
// Workflows choose the fallback policy; nothing here swallows an error.

pub mod degrade;
pub mod error;
pub mod fallback;
pub mod policy;
pub mod question_bank;
pub mod retry;

pub use degrade::{invoke_or_template, ContentSource, Generated};
pub use error::CallError;
pub use fallback::{generate, generate_named, FallbackCategory, FallbackContext, QuizQuestion};
pub use policy::FallbackPolicy;
pub use retry::{invoke, RetryPolicy};
