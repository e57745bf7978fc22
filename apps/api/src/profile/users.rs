//! User lookup and profile updates.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::insights::generator::{find_insight, insert_insight, insights_for_new_row, InsightData};
use crate::models::user::{IndustryInsightRow, UserRow};
use crate::resilience::{FallbackContext, Generated};
use crate::state::AiServices;

enum PendingInsight {
    Stored(IndustryInsightRow),
    New(Generated<InsightData>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub industry: String,
    pub experience: Option<i32>,
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub user: UserRow,
    pub industry_insight: IndustryInsightRow,
}

/// Resolves the caller's external id to their user row.
pub async fn load_user(pool: &PgPool, external_id: &str) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE external_id = $1")
        .bind(external_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Updates the profile and makes sure an insight row exists for the industry.
/// A missing row is generated before the transaction opens, so no database
/// connection is held across the AI call.
pub async fn update_profile(
    pool: &PgPool,
    ai: &AiServices,
    user: &UserRow,
    request: UpdateProfileRequest,
) -> Result<UpdateProfileResponse, AppError> {
    let request = validate_profile(request)?;

    let pending = match find_insight(pool, &request.industry).await? {
        Some(insight) => PendingInsight::Stored(insight),
        None => PendingInsight::New(insights_for_new_row(ai, &request.industry).await?),
    };

    let mut tx = pool.begin().await?;

    let industry_insight = match pending {
        PendingInsight::Stored(insight) => insight,
        PendingInsight::New(insights) => {
            info!(
                "Creating insight row for industry '{}' (source: {:?})",
                request.industry, insights.source
            );
            insert_insight(&mut *tx, &request.industry, &insights.value).await?
        }
    };

    let updated = sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET industry = $2, experience = $3, bio = $4, skills = $5, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&request.industry)
    .bind(request.experience)
    .bind(&request.bio)
    .bind(&request.skills)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Updated profile for user {}", user.id);

    Ok(UpdateProfileResponse {
        success: true,
        user: updated,
        industry_insight,
    })
}

/// Onboarding is complete once the user has picked an industry.
pub fn is_onboarded(user: &UserRow) -> bool {
    user.industry
        .as_deref()
        .is_some_and(|i| !i.trim().is_empty())
}

/// The profile fields the templates interpolate.
pub fn fallback_context(user: &UserRow) -> FallbackContext {
    FallbackContext {
        industry: user.industry.clone(),
        experience: user.experience,
        skills: user.skills.clone(),
        candidate_name: user.name.clone(),
        ..Default::default()
    }
}

fn validate_profile(mut request: UpdateProfileRequest) -> Result<UpdateProfileRequest, AppError> {
    request.industry = request.industry.trim().to_string();
    if request.industry.is_empty() {
        return Err(AppError::Validation("industry cannot be empty".to_string()));
    }

    if request.experience.is_some_and(|y| y < 0) {
        return Err(AppError::Validation(
            "experience must be a non-negative number of years".to_string(),
        ));
    }

    let mut skills: Vec<String> = Vec::with_capacity(request.skills.len());
    for skill in request.skills.iter().map(|s| s.trim()) {
        if !skill.is_empty() && !skills.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            skills.push(skill.to_string());
        }
    }
    request.skills = skills;

    Ok(request)
}
