use crate::models::user::UserRow;

pub const COVER_LETTER_TEMPERATURE: f32 = 0.7;
pub const COVER_LETTER_MAX_TOKENS: u32 = 1000;

pub fn build_cover_letter_prompt(
    user: &UserRow,
    job_title: &str,
    company_name: &str,
    job_description: &str,
) -> String {
    format!(
        "Write a professional cover letter for a {job_title} position at {company_name}.

About the candidate:
- Industry: {industry}
- Years of Experience: {experience}
- Skills: {skills}
- Professional Background: {bio}

Job Description:
{job_description}

Requirements:
1. Use a professional, enthusiastic tone
2. Highlight relevant skills and experience
3. Show understanding of the company's needs
4. Keep it concise (max 400 words)
5. Use proper business letter formatting in markdown
6. Include specific examples of achievements
7. Relate candidate's background to job requirements

Format the letter in markdown.",
        industry = user.industry.as_deref().unwrap_or("not specified"),
        experience = user
            .experience
            .map(|y| y.to_string())
            .unwrap_or_else(|| "not specified".to_string()),
        skills = user.skills.join(", "),
        bio = user.bio.as_deref().unwrap_or(""),
    )
}
