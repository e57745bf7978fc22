//! Template fallback: deterministic stand-ins for AI output.
//!
//! Each category produces content with exactly the shape the matching AI call
//! returns (plain text, or the quiz question list), so storage, scoring and
//! rendering never branch on where the content came from.
//!
//! Pure and total: no I/O, no clock, no randomness.

use serde::{Deserialize, Serialize};

use crate::resilience::question_bank::interview_questions;

/// First line of every templated cover letter.
pub const UNAVAILABLE_BANNER: &str = "[AI Service Temporarily Unavailable - Using Template]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackCategory {
    CoverLetter,
    ResumeImprovement,
    InterviewQuestions,
}

impl FallbackCategory {
    /// Maps a wire name (`coverLetter`, ...) to a category. Unknown names are `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "coverLetter" => Some(FallbackCategory::CoverLetter),
            "resumeImprovement" => Some(FallbackCategory::ResumeImprovement),
            "interviewQuestions" => Some(FallbackCategory::InterviewQuestions),
            _ => None,
        }
    }
}

/// Values interpolated into the templates. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FallbackContext {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub experience: Option<i32>,
    pub skills: Vec<String>,
    pub candidate_name: Option<String>,
}

/// A multiple-choice interview question, in the same JSON shape the quiz model returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FallbackResult {
    Text(String),
    Questions(Vec<QuizQuestion>),
}

impl FallbackResult {
    pub fn into_text(self) -> Option<String> {
        match self {
            FallbackResult::Text(text) => Some(text),
            FallbackResult::Questions(_) => None,
        }
    }

    pub fn into_questions(self) -> Option<Vec<QuizQuestion>> {
        match self {
            FallbackResult::Questions(questions) => Some(questions),
            FallbackResult::Text(_) => None,
        }
    }
}

pub fn generate(category: FallbackCategory, context: &FallbackContext) -> FallbackResult {
    match category {
        FallbackCategory::CoverLetter => FallbackResult::Text(cover_letter(context)),
        FallbackCategory::ResumeImprovement => FallbackResult::Text(resume_improvement(context)),
        FallbackCategory::InterviewQuestions => {
            FallbackResult::Questions(interview_questions(context))
        }
    }
}

/// Name-keyed entry point. `None` means "no template for this category".
pub fn generate_named(name: &str, context: &FallbackContext) -> Option<FallbackResult> {
    FallbackCategory::from_name(name).map(|category| generate(category, context))
}

/// Up to the first two skills joined with " and ", or `default` when there are none.
pub(crate) fn top_skills(context: &FallbackContext, default: &str) -> String {
    let skills: Vec<&str> = context
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .take(2)
        .collect();

    if skills.is_empty() {
        default.to_string()
    } else {
        skills.join(" and ")
    }
}

/// Trimmed, non-empty value or the default.
pub(crate) fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(default)
}

fn years(context: &FallbackContext) -> String {
    context
        .experience
        .map(|y| y.to_string())
        .unwrap_or_else(|| "several".to_string())
}

fn cover_letter(context: &FallbackContext) -> String {
    let job_title = or_default(context.job_title.as_deref(), "open");
    let company = or_default(context.company_name.as_deref(), "your company");
    let industry = or_default(context.industry.as_deref(), "this field");
    let name = or_default(context.candidate_name.as_deref(), "Candidate");
    let skills = top_skills(context, "various technical domains");
    let years = years(context);

    format!(
        "{UNAVAILABLE_BANNER}

Dear Hiring Manager,

I am writing to express my strong interest in the {job_title} position at {company}.

With my background in {industry} and {years} years of experience, I am confident that my skills and expertise align well with your requirements. Throughout my career, I have developed strong capabilities in {skills}.

I am particularly drawn to this opportunity because of {company}'s reputation for innovation and excellence. I am excited about the prospect of contributing to your team and helping drive success.

Thank you for considering my application. I look forward to the opportunity to discuss how my background, skills, and enthusiasm can benefit your organization.

Best regards,
{name}"
    )
}

fn resume_improvement(context: &FallbackContext) -> String {
    format!(
        "Leveraged advanced technical skills in {} to drive business outcomes, resulting in \
         measurable improvements in project delivery and team performance across {} years of \
         experience.",
        top_skills(context, "technology"),
        years(context)
    )
}
