use crate::interview::quiz::QuestionResult;

pub const QUIZ_TEMPERATURE: f32 = 0.7;
pub const QUIZ_MAX_TOKENS: u32 = 4096;
pub const TIP_TEMPERATURE: f32 = 0.7;
pub const TIP_MAX_TOKENS: u32 = 256;

pub fn build_quiz_prompt(industry: &str, skills: &[String]) -> String {
    let expertise = if skills.is_empty() {
        String::new()
    } else {
        format!(" with expertise in {}", skills.join(", "))
    };

    format!(
        r#"Generate 10 technical interview questions for a {industry} professional{expertise}.

Each question should be multiple choice with 4 options.

Return the response in this JSON format only, no additional text:
{{
  "questions": [
    {{
      "question": "string",
      "options": ["string", "string", "string", "string"],
      "correctAnswer": "string",
      "explanation": "string"
    }}
  ]
}}"#
    )
}

/// Only called with at least one wrong answer.
pub fn build_tip_prompt(industry: &str, wrong: &[&QuestionResult]) -> String {
    let wrong_text = wrong
        .iter()
        .map(|q| {
            format!(
                "Question: \"{}\"\nCorrect Answer: \"{}\"\nUser Answer: \"{}\"",
                q.question, q.answer, q.user_answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "The user got the following {industry} technical interview questions wrong:

{wrong_text}

Based on these mistakes, provide a concise, specific improvement tip.
Focus on the knowledge gaps revealed by these wrong answers.
Keep the response under 2 sentences and make it encouraging.
Don't explicitly mention the mistakes, instead focus on what to learn/practice."
    )
}
