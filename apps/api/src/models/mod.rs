pub mod assessment;
pub mod cover_letter;
pub mod resume;
pub mod user;
