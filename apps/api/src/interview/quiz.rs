//! Interview quiz generation, scoring and assessment history.
//!
//! Quiz flow: profile → quiz model (retried) → parse + validate JSON → template
//! question bank on an admitted failure. A response that does not parse into
//! well-formed questions is a `MalformedResponse`, so whether it degrades is up
//! to the configured fallback policy like any other terminal failure.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::prompts::{
    build_quiz_prompt, build_tip_prompt, QUIZ_MAX_TOKENS, QUIZ_TEMPERATURE, TIP_MAX_TOKENS,
    TIP_TEMPERATURE,
};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, AiProvider, CompletionRequest};
use crate::models::assessment::AssessmentRow;
use crate::models::user::UserRow;
use crate::profile::users::fallback_context;
use crate::resilience::{
    generate, invoke, invoke_or_template, CallError, ContentSource, FallbackCategory,
    FallbackPolicy, Generated, QuizQuestion, RetryPolicy,
};
use crate::state::AiServices;

const OPTIONS_PER_QUESTION: usize = 4;
const ASSESSMENT_CATEGORY: &str = "Technical";

#[derive(Debug, Deserialize)]
struct QuizPayload {
    questions: Vec<QuizQuestion>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
    pub source: ContentSource,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuizRequest {
    pub questions: Vec<QuizQuestion>,
    pub answers: Vec<String>,
}

/// Stored per question inside `assessments.questions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: String,
    pub answer: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// Parses the quiz model's output and checks every question is answerable.
pub fn parse_quiz(text: &str) -> Result<Vec<QuizQuestion>, CallError> {
    let payload: QuizPayload = serde_json::from_str(strip_json_fences(text))
        .map_err(|e| CallError::MalformedResponse(format!("quiz JSON: {e}")))?;

    if payload.questions.is_empty() {
        return Err(CallError::MalformedResponse(
            "quiz contained no questions".to_string(),
        ));
    }

    for (i, q) in payload.questions.iter().enumerate() {
        if q.options.len() != OPTIONS_PER_QUESTION {
            return Err(CallError::MalformedResponse(format!(
                "question {} has {} options, expected {OPTIONS_PER_QUESTION}",
                i + 1,
                q.options.len()
            )));
        }
        if !q.options.contains(&q.correct_answer) {
            return Err(CallError::MalformedResponse(format!(
                "question {} has a correct answer that is not one of its options",
                i + 1
            )));
        }
    }

    Ok(payload.questions)
}

pub async fn fetch_quiz(
    provider: &dyn AiProvider,
    retry: &RetryPolicy,
    fallback: FallbackPolicy,
    user: &UserRow,
    industry: &str,
) -> Result<Generated<Vec<QuizQuestion>>, CallError> {
    let prompt = build_quiz_prompt(industry, &user.skills);
    let completion = CompletionRequest {
        system: Some(JSON_ONLY_SYSTEM),
        prompt: &prompt,
        temperature: QUIZ_TEMPERATURE,
        max_tokens: QUIZ_MAX_TOKENS,
    };
    let completion = &completion;

    invoke_or_template(
        retry,
        fallback,
        move || async move {
            let text = provider.generate(completion).await?;
            parse_quiz(&text)
        },
        || generate(FallbackCategory::InterviewQuestions, &fallback_context(user)).into_questions(),
    )
    .await
}

pub async fn generate_quiz(ai: &AiServices, user: &UserRow) -> Result<QuizResponse, AppError> {
    let industry = user
        .industry
        .as_deref()
        .filter(|i| !i.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation("Complete your profile industry before taking a quiz".to_string())
        })?;

    let provider = ai.quiz()?;
    info!("Generating quiz for user {} via {}", user.id, provider.name());

    let quiz = fetch_quiz(provider, &ai.retry, ai.fallback, user, industry).await?;
    info!(
        "Quiz ready: {} questions (source: {:?})",
        quiz.value.len(),
        quiz.source
    );

    Ok(QuizResponse {
        questions: quiz.value,
        source: quiz.source,
    })
}

/// Grades each answer against its question. Returns the results and the score in percent.
pub fn score_answers(
    questions: &[QuizQuestion],
    answers: &[String],
) -> Result<(Vec<QuestionResult>, f64), AppError> {
    if questions.is_empty() {
        return Err(AppError::Validation("questions cannot be empty".to_string()));
    }
    if questions.len() != answers.len() {
        return Err(AppError::Validation(format!(
            "expected {} answers, got {}",
            questions.len(),
            answers.len()
        )));
    }

    let results: Vec<QuestionResult> = questions
        .iter()
        .zip(answers)
        .map(|(q, a)| QuestionResult {
            question: q.question.clone(),
            answer: q.correct_answer.clone(),
            user_answer: a.clone(),
            is_correct: q.correct_answer == *a,
            explanation: q.explanation.clone(),
        })
        .collect();

    let correct = results.iter().filter(|r| r.is_correct).count();
    let score = correct as f64 / results.len() as f64 * 100.0;

    Ok((results, score))
}

/// Asks the quiz model for a short study tip. Single attempt, never fails the
/// save: any error is logged and the tip is left empty.
async fn improvement_tip(
    ai: &AiServices,
    industry: &str,
    results: &[QuestionResult],
) -> Option<String> {
    let wrong: Vec<&QuestionResult> = results.iter().filter(|r| !r.is_correct).collect();
    if wrong.is_empty() {
        return None;
    }

    let provider = match ai.quiz() {
        Ok(p) => p,
        Err(_) => {
            warn!("Quiz model not configured; skipping improvement tip");
            return None;
        }
    };

    let prompt = build_tip_prompt(industry, &wrong);
    let completion = CompletionRequest {
        system: None,
        prompt: &prompt,
        temperature: TIP_TEMPERATURE,
        max_tokens: TIP_MAX_TOKENS,
    };

    match invoke(&ai.retry.without_retries(), || provider.generate(&completion)).await {
        Ok(tip) => Some(tip),
        Err(e) => {
            warn!("Improvement tip generation failed: {e}");
            None
        }
    }
}

pub async fn save_quiz_result(
    pool: &PgPool,
    ai: &AiServices,
    user: &UserRow,
    request: SaveQuizRequest,
) -> Result<AssessmentRow, AppError> {
    let (results, score) = score_answers(&request.questions, &request.answers)?;

    let industry = user.industry.as_deref().unwrap_or("technology");
    let tip = improvement_tip(ai, industry, &results).await;

    let questions = serde_json::to_value(&results)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize results: {e}")))?;

    let assessment = sqlx::query_as::<_, AssessmentRow>(
        r#"
        INSERT INTO assessments (id, user_id, quiz_score, questions, category, improvement_tip)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(score)
    .bind(&questions)
    .bind(ASSESSMENT_CATEGORY)
    .bind(&tip)
    .fetch_one(pool)
    .await?;

    info!(
        "Saved assessment {} for user {}: score {:.1}",
        assessment.id, user.id, score
    );
    Ok(assessment)
}

/// Oldest first, so the history reads as a progression.
pub async fn list_assessments(
    pool: &PgPool,
    user: &UserRow,
) -> Result<Vec<AssessmentRow>, AppError> {
    let rows = sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user.id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedProvider;
    use chrono::Utc;
    use std::sync::Arc;

    fn user() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            external_id: "dev_user_1".to_string(),
            email: "dev@example.com".to_string(),
            name: Some("Dev Local".to_string()),
            image_url: None,
            industry: Some("software-development".to_string()),
            experience: Some(5),
            bio: None,
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn question(correct: &str) -> QuizQuestion {
        QuizQuestion {
            question: "What does `?` do in Rust?".to_string(),
            options: vec![
                "Propagates errors".to_string(),
                "Panics".to_string(),
                "Clones".to_string(),
                "Nothing".to_string(),
            ],
            correct_answer: correct.to_string(),
            explanation: "It returns early with the error.".to_string(),
        }
    }

    fn quiz_json() -> String {
        serde_json::json!({ "questions": [question("Propagates errors")] }).to_string()
    }

    fn services(quiz: Option<Arc<ScriptedProvider>>, fallback: FallbackPolicy) -> AiServices {
        AiServices {
            writer: None,
            quiz: quiz.map(|p| p as Arc<dyn AiProvider>),
            retry: RetryPolicy::new(1, 10),
            fallback,
        }
    }

    #[test]
    fn test_parse_quiz_accepts_fenced_json() {
        let text = format!("```json\n{}\n```", quiz_json());
        let questions = parse_quiz(&text).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer, "Propagates errors");
    }

    #[test]
    fn test_parse_quiz_rejects_answer_outside_options() {
        let text = serde_json::json!({ "questions": [question("Compiles faster")] }).to_string();
        assert!(matches!(
            parse_quiz(&text),
            Err(CallError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_quiz_rejects_wrong_option_count() {
        let mut q = question("Panics");
        q.options.pop();
        let text = serde_json::json!({ "questions": [q] }).to_string();
        assert!(matches!(
            parse_quiz(&text),
            Err(CallError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_quiz_rejects_prose() {
        assert!(matches!(
            parse_quiz("Sure! Here are your questions:"),
            Err(CallError::MalformedResponse(_))
        ));
        assert!(parse_quiz(r#"{"questions": []}"#).is_err());
    }

    #[tokio::test]
    async fn test_quota_exhaustion_serves_question_bank() {
        let provider = ScriptedProvider::always(Err(CallError::QuotaExceeded));
        let quiz = fetch_quiz(
            &provider,
            &RetryPolicy::default(),
            FallbackPolicy::QuotaOnly,
            &user(),
            "software-development",
        )
        .await
        .unwrap();

        assert_eq!(quiz.source, ContentSource::Template);
        assert_eq!(quiz.value.len(), 10);
        assert_eq!(quiz.value[0].question, "Describe your experience with Rust.");
    }

    #[tokio::test]
    async fn test_malformed_quiz_degrades_only_under_always_policy() {
        let provider = ScriptedProvider::always(Ok("not json".to_string()));
        let err = fetch_quiz(
            &provider,
            &RetryPolicy::default(),
            FallbackPolicy::QuotaOnly,
            &user(),
            "software-development",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CallError::MalformedResponse(_)));
        assert_eq!(provider.calls(), 1);

        let quiz = fetch_quiz(
            &provider,
            &RetryPolicy::default(),
            FallbackPolicy::Always,
            &user(),
            "software-development",
        )
        .await
        .unwrap();
        assert_eq!(quiz.source, ContentSource::Template);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiz_retries_server_error_then_parses() {
        let provider = ScriptedProvider::new(vec![Err(CallError::ServerError), Ok(quiz_json())]);
        let quiz = fetch_quiz(
            &provider,
            &RetryPolicy::default(),
            FallbackPolicy::QuotaOnly,
            &user(),
            "software-development",
        )
        .await
        .unwrap();
        assert_eq!(quiz.source, ContentSource::Ai);
        assert_eq!(quiz.value.len(), 1);
        assert_eq!(provider.calls(), 2);
        assert!(provider
            .last_prompt()
            .unwrap()
            .contains("software-development professional with expertise in Rust, SQL"));
    }

    #[tokio::test]
    async fn test_generate_quiz_requires_industry() {
        let mut u = user();
        u.industry = None;
        let ai = services(None, FallbackPolicy::QuotaOnly);
        assert!(matches!(
            generate_quiz(&ai, &u).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_quiz_without_key_is_not_configured() {
        let ai = services(None, FallbackPolicy::QuotaOnly);
        assert!(matches!(
            generate_quiz(&ai, &user()).await,
            Err(AppError::AiNotConfigured("GEMINI_API_KEY"))
        ));
    }

    #[test]
    fn test_score_answers_marks_each_question() {
        let questions = vec![question("Propagates errors"), question("Propagates errors")];
        let answers = vec!["Propagates errors".to_string(), "Panics".to_string()];
        let (results, score) = score_answers(&questions, &answers).unwrap();
        assert!(results[0].is_correct);
        assert!(!results[1].is_correct);
        assert_eq!(results[1].user_answer, "Panics");
        assert_eq!(score, 50.0);
    }

    #[test]
    fn test_score_answers_rejects_mismatched_lengths() {
        let questions = vec![question("Panics")];
        assert!(matches!(
            score_answers(&questions, &[]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_question_result_stores_camel_case() {
        let (results, _) =
            score_answers(&[question("Panics")], &["Panics".to_string()]).unwrap();
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["isCorrect"], true);
        assert_eq!(json["userAnswer"], "Panics");
    }

    #[tokio::test]
    async fn test_no_tip_when_everything_is_correct() {
        let provider = Arc::new(ScriptedProvider::always(Ok("Practice more".to_string())));
        let ai = services(Some(provider.clone()), FallbackPolicy::QuotaOnly);
        let (results, _) =
            score_answers(&[question("Panics")], &["Panics".to_string()]).unwrap();

        assert_eq!(improvement_tip(&ai, "software", &results).await, None);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_tip_prompt_lists_wrong_answers() {
        let provider = Arc::new(ScriptedProvider::always(Ok(
            "Review error propagation in Rust.".to_string()
        )));
        let ai = services(Some(provider.clone()), FallbackPolicy::QuotaOnly);
        let (results, _) =
            score_answers(&[question("Propagates errors")], &["Clones".to_string()]).unwrap();

        let tip = improvement_tip(&ai, "software", &results).await;
        assert_eq!(tip.as_deref(), Some("Review error propagation in Rust."));
        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("User Answer: \"Clones\""));
        assert!(prompt.contains("software technical interview questions wrong"));
    }

    #[tokio::test]
    async fn test_tip_failure_is_swallowed() {
        let provider = Arc::new(ScriptedProvider::always(Err(CallError::QuotaExceeded)));
        let ai = services(Some(provider.clone()), FallbackPolicy::QuotaOnly);
        let (results, _) =
            score_answers(&[question("Propagates errors")], &["Clones".to_string()]).unwrap();

        assert_eq!(improvement_tip(&ai, "software", &results).await, None);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_tip_is_not_retried_on_rate_limit() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(CallError::RateLimited),
            Ok("Practice ownership rules.".to_string()),
        ]));
        let mut ai = services(Some(provider.clone()), FallbackPolicy::QuotaOnly);
        ai.retry = RetryPolicy::default();
        let (results, _) =
            score_answers(&[question("Propagates errors")], &["Clones".to_string()]).unwrap();

        assert_eq!(improvement_tip(&ai, "software", &results).await, None);
        assert_eq!(provider.calls(), 1);
    }
}
