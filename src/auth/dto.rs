use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::User;
use crate::de;
use crate::models::{ActivityLevel, Gender, Goal};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub height: Option<f64>,
    pub gender: Option<Gender>,
    pub goal: Option<Goal>,
    pub activity_level: Option<ActivityLevel>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i32")]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub height: Option<f64>,
    pub gender: Option<Gender>,
    pub goal: Option<Goal>,
    pub activity_level: Option<ActivityLevel>,
}

impl UpdateProfileRequest {
    /// Overlay the supplied fields onto an existing profile.
    ///
    /// A zero or empty value is treated as absent, not as a reset; the web
    /// client has always relied on this to leave untouched form fields alone.
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = self.name.as_deref() {
            if !name.is_empty() {
                user.name = name.to_string();
            }
        }
        if let Some(age) = self.age {
            if age != 0 {
                user.age = Some(age);
            }
        }
        if let Some(weight) = self.weight {
            if weight != 0.0 {
                user.weight = Some(weight);
            }
        }
        if let Some(height) = self.height {
            if height != 0.0 {
                user.height = Some(height);
            }
        }
        if let Some(gender) = self.gender {
            user.gender = gender;
        }
        if let Some(goal) = self.goal {
            user.goal = goal;
        }
        if let Some(level) = self.activity_level {
            user.activity_level = level;
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// User projection safe to return to clients: no password hash, and
/// `createdAt` only where the endpoint includes it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub gender: Gender,
    pub goal: Goal,
    pub activity_level: ActivityLevel,
    #[serde(skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl PublicUser {
    pub fn from_user(user: User) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            weight: user.weight,
            height: user.height,
            gender: user.gender,
            goal: user.goal,
            activity_level: user.activity_level,
            created_at: None,
        }
    }

    pub fn with_created_at(user: User) -> Self {
        let created_at = user.created_at;
        let mut public = Self::from_user(user);
        public.created_at = Some(created_at);
        public
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}
