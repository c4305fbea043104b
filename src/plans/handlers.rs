use axum::{
    extract::{Path, State},
    Json,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::{ApiError, Result},
    plans::{
        dto::{
            DietSuggestion, DietSuggestionRequest, DietSuggestionResponse, GeneratePlanRequest,
            GeneratedPlan, MessageResponse, PlanDetailResponse, PlanListResponse, PlanResponse,
        },
        repo::Plan,
        services,
    },
    state::AppState,
};

/// Unauthenticated generation: same engine, output is never persisted.
#[instrument(skip(state, payload))]
pub async fn trial(
    State(state): State<AppState>,
    Json(payload): Json<GeneratePlanRequest>,
) -> Result<Json<PlanResponse>> {
    generate(&state, payload, None).await
}

#[instrument(skip(state, payload))]
pub async fn generate_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GeneratePlanRequest>,
) -> Result<Json<PlanResponse>> {
    generate(&state, payload, Some(user_id)).await
}

async fn generate(
    state: &AppState,
    payload: GeneratePlanRequest,
    owner: Option<Uuid>,
) -> Result<Json<PlanResponse>> {
    let inputs = services::resolve_inputs(payload)?;
    let generated_at = OffsetDateTime::now_utc();
    let (plan_text, user_info, parameters) = services::build_plan(&inputs, generated_at);

    // Persistence is best-effort: the caller gets their plan even if the
    // save fails, just without an id.
    let mut saved_id = None;
    if let Some(user_id) = owner {
        match Plan::insert(&state.db, user_id, &plan_text, &parameters, &user_info).await {
            Ok(saved) => {
                info!(user_id = %user_id, plan_id = %saved.id, "plan saved");
                saved_id = Some(saved.id);
            }
            Err(e) => {
                warn!(error = %e, user_id = %user_id, "failed to save plan, returning it unsaved");
            }
        }
    }

    Ok(Json(PlanResponse {
        success: true,
        data: GeneratedPlan {
            plan: plan_text,
            user_info,
            parameters,
            created_at: generated_at,
            id: saved_id,
        },
    }))
}

/// Stateless: nothing is read or written.
#[instrument(skip(payload))]
pub async fn diet_suggestion(
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<DietSuggestionRequest>,
) -> Json<DietSuggestionResponse> {
    let suggestion = services::render_diet_suggestion(
        payload.meal_type.as_deref().unwrap_or("meal"),
        payload.dietary_preferences.as_deref().unwrap_or("Balanced"),
        payload.calories.unwrap_or(500),
    );
    Json(DietSuggestionResponse {
        success: true,
        data: DietSuggestion { suggestion },
    })
}

#[instrument(skip(state))]
pub async fn list_plans(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PlanListResponse>> {
    let plans = Plan::list_by_user(&state.db, user_id).await?;
    Ok(Json(PlanListResponse {
        success: true,
        data: plans,
    }))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PlanDetailResponse>> {
    let plan = Plan::find_for_user(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Plan not found".into()))?;
    Ok(Json(PlanDetailResponse {
        success: true,
        data: plan,
    }))
}

#[instrument(skip(state))]
pub async fn delete_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    let deleted = Plan::delete_for_user(&state.db, user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Plan not found".into()));
    }
    info!(user_id = %user_id, plan_id = %id, "plan deleted");
    Ok(Json(MessageResponse {
        success: true,
        message: "Plan deleted successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plan_request(body: serde_json::Value) -> GeneratePlanRequest {
        serde_json::from_value(body).expect("request should deserialize")
    }

    #[tokio::test]
    async fn diet_suggestion_uses_defaults() {
        let req: DietSuggestionRequest = serde_json::from_value(json!({})).unwrap();
        let Json(res) = diet_suggestion(AuthUser(Uuid::new_v4()), Json(req)).await;
        assert!(res.success);
        assert!(res.data.suggestion.contains("MEAL SUGGESTION"));
        assert!(res.data.suggestion.contains("Dietary Preference: Balanced"));
        assert!(res.data.suggestion.contains("Target Calories: ~500 kcal"));
    }

    #[tokio::test]
    async fn diet_suggestion_substitutes_inputs() {
        let req: DietSuggestionRequest = serde_json::from_value(
            json!({"mealType": "dinner", "dietaryPreferences": "Keto", "calories": 800}),
        )
        .unwrap();
        let Json(res) = diet_suggestion(AuthUser(Uuid::new_v4()), Json(req)).await;
        assert!(res.data.suggestion.contains("DINNER SUGGESTION"));
        assert!(res.data.suggestion.contains("Dietary Preference: Keto"));
        assert!(res.data.suggestion.contains("~800"));
    }

    #[tokio::test]
    async fn trial_generation_never_persists() {
        // No owner: the store is never touched, so the lazy test pool is fine.
        let state = AppState::fake();
        let req = plan_request(json!({"goal": "weight_loss", "age": 30, "weight": 70, "height": 175}));
        let Json(res) = generate(&state, req, None).await.expect("generate");
        assert!(res.success);
        assert!(res.data.id.is_none());
        assert_eq!(res.data.user_info.bmi, "22.9");
    }

    #[tokio::test]
    async fn generation_survives_save_failure() {
        // The test pool has nothing to connect to, so the insert fails; the
        // caller still gets the plan, just without an id.
        let state = AppState::fake();
        let req = plan_request(json!({"goal": "endurance", "age": 35, "weight": 68, "height": 172}));
        let Json(res) = generate(&state, req, Some(Uuid::new_v4()))
            .await
            .expect("generate");
        assert!(res.success);
        assert!(res.data.id.is_none());
        assert!(res.data.plan.contains("WEEKLY WORKOUT SCHEDULE"));
    }
}
