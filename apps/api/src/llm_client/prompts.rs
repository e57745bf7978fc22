// Shared system prompts. Each workflow builds its own user prompt in a
// prompts.rs next to it; only the cross-cutting fragments live here.

pub const COVER_LETTER_SYSTEM: &str = "You are an expert professional cover letter writer.";

pub const RESUME_WRITER_SYSTEM: &str = "You are an expert resume writer and career coach.";

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
