pub const IMPROVE_TEMPERATURE: f32 = 0.7;
pub const IMPROVE_MAX_TOKENS: u32 = 500;

pub fn build_improve_prompt(section: &str, industry: &str, current: &str) -> String {
    format!(
        "As an expert resume writer, improve the following {section} description for a {industry} professional.
Make it more impactful, quantifiable, and aligned with industry standards.
Current content: \"{current}\"

Requirements:
1. Use action verbs
2. Include metrics and results where possible
3. Highlight relevant technical skills
4. Keep it concise but detailed
5. Focus on achievements over responsibilities
6. Use industry-specific keywords

Format the response as a single paragraph without any additional text or explanations."
    )
}
