// User profile: lookup by external identity, onboarding, profile updates.

pub mod handlers;
pub mod users;
