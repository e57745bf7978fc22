// Interview prep: AI-generated quizzes with a fixed question bank as fallback,
// server-side scoring and assessment history.

pub mod handlers;
pub mod prompts;
pub mod quiz;
