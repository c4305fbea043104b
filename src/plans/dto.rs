use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::de;
use crate::models::{ActivityLevel, Gender, Goal};
use crate::plans::repo::Plan;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    pub goal: Option<Goal>,
    pub activity_level: Option<ActivityLevel>,
    pub focus_area: Option<String>,
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub height: Option<f64>,
    pub gender: Option<Gender>,
    pub dietary_restrictions: Option<String>,
}

/// The generation request as actually used, after defaulting. Stored with
/// the plan so a saved plan can be regenerated or inspected later.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanParameters {
    pub goal: Goal,
    pub activity_level: ActivityLevel,
    pub focus_area: String,
    pub duration: String,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<String>,
}

/// Biometric snapshot at generation time, including the derived BMI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub gender: Gender,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
    pub bmi: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub plan: String,
    pub user_info: UserInfo,
    pub parameters: PlanParameters,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub success: bool,
    pub data: GeneratedPlan,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietSuggestionRequest {
    pub meal_type: Option<String>,
    pub dietary_preferences: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub calories: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct DietSuggestion {
    pub suggestion: String,
}

#[derive(Debug, Serialize)]
pub struct DietSuggestionResponse {
    pub success: bool,
    pub data: DietSuggestion,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PlanListResponse {
    pub success: bool,
    pub data: Vec<Plan>,
}

#[derive(Debug, Serialize)]
pub struct PlanDetailResponse {
    pub success: bool,
    pub data: Plan,
}
