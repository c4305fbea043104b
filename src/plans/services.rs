//! Plan text generation.
//!
//! The "AI" is a deterministic template: a profile summary, a fixed weekly
//! schedule and a nutrition section branched on the goal. Only the inputs
//! and the generation timestamp vary.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::error::ApiError;
use crate::models::{ActivityLevel, Gender, Goal};
use crate::plans::dto::{GeneratePlanRequest, PlanParameters, UserInfo};

const STAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[day]/[month]/[year], [hour]:[minute]:[second]");

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const BOX_TOP: &str = "╔═══════════════════════════════════════════════════════════════╗";
const BOX_BOTTOM: &str = "╚═══════════════════════════════════════════════════════════════╝";

/// A generation request with every optional field resolved.
#[derive(Debug, Clone)]
pub struct PlanInputs {
    pub goal: Goal,
    pub age: i32,
    pub weight: f64,
    pub height: f64,
    pub activity_level: ActivityLevel,
    pub focus_area: String,
    pub duration: String,
    pub gender: Gender,
    pub dietary_restrictions: Option<String>,
}

/// Validate required fields and fill in the defaults.
pub fn resolve_inputs(req: GeneratePlanRequest) -> Result<PlanInputs, ApiError> {
    let (Some(goal), Some(age), Some(weight), Some(height)) =
        (req.goal, req.age, req.weight, req.height)
    else {
        return Err(ApiError::BadRequest(
            "Missing required fields: goal, age, weight, height".into(),
        ));
    };

    Ok(PlanInputs {
        goal,
        age,
        weight,
        height,
        activity_level: req.activity_level.unwrap_or(ActivityLevel::Moderate),
        focus_area: req.focus_area.unwrap_or_else(|| "full_body".into()),
        duration: req.duration.unwrap_or_else(|| "4_weeks".into()),
        gender: req.gender.unwrap_or(Gender::Male),
        dietary_restrictions: req
            .dietary_restrictions
            .filter(|s| !s.trim().is_empty()),
    })
}

/// BMI from weight in kg and height in cm, formatted to one decimal.
pub fn bmi_label(weight: f64, height_cm: f64) -> String {
    let height_m = height_cm / 100.0;
    format!("{:.1}", weight / (height_m * height_m))
}

/// Daily protein target in grams: 2.2 g/kg when building muscle, 1.8 g/kg
/// for every other goal.
pub fn daily_protein_grams(goal: Goal, weight: f64) -> i64 {
    let factor = match goal {
        Goal::MuscleGain => 2.2,
        _ => 1.8,
    };
    (weight * factor).round() as i64
}

/// Render the full plan and the snapshots persisted alongside it.
pub fn build_plan(
    inputs: &PlanInputs,
    generated_at: OffsetDateTime,
) -> (String, UserInfo, PlanParameters) {
    let bmi = bmi_label(inputs.weight, inputs.height);
    let text = render_plan_text(inputs, &bmi, generated_at);

    let user_info = UserInfo {
        age: inputs.age,
        weight: inputs.weight,
        height: inputs.height,
        gender: inputs.gender,
        goal: inputs.goal,
        activity_level: inputs.activity_level,
        bmi,
    };
    let parameters = PlanParameters {
        goal: inputs.goal,
        activity_level: inputs.activity_level,
        focus_area: inputs.focus_area.clone(),
        duration: inputs.duration.clone(),
        age: inputs.age,
        weight: inputs.weight,
        height: inputs.height,
        gender: inputs.gender,
        dietary_restrictions: inputs.dietary_restrictions.clone(),
    };

    (text, user_info, parameters)
}

fn render_plan_text(inputs: &PlanInputs, bmi: &str, generated_at: OffsetDateTime) -> String {
    let protein = daily_protein_grams(inputs.goal, inputs.weight);
    let restrictions_line = inputs
        .dietary_restrictions
        .as_deref()
        .map(|r| format!("\n• Dietary Restrictions: {r}"))
        .unwrap_or_default();

    let nutrition = match inputs.goal {
        Goal::WeightLoss => format!(
            "🔥 WEIGHT LOSS NUTRITION:\n\
             • Daily Calories: Deficit of 300-500 calories\n\
             • Protein: {protein}g per day\n\
             • Water: Minimum 2.5-3 liters per day"
        ),
        Goal::MuscleGain => format!(
            "💪 MUSCLE GAIN NUTRITION:\n\
             • Daily Calories: Surplus of 300-500 calories\n\
             • Protein: {protein}g per day\n\
             • Water: Minimum 3-4 liters per day"
        ),
        Goal::Maintenance | Goal::Endurance => format!(
            "⚖️ MAINTENANCE NUTRITION:\n\
             • Daily Calories: Maintenance level\n\
             • Protein: {protein}g per day\n\
             • Water: Minimum 2-3 liters per day"
        ),
    };

    let stamp = generated_at
        .format(STAMP_FORMAT)
        .unwrap_or_else(|_| generated_at.unix_timestamp().to_string());

    format!(
        "\n{BOX_TOP}\n\
         ║         {title} PERSONALIZED FITNESS PLAN\n\
         {BOX_BOTTOM}\n\
         \n\
         👤 PROFILE SUMMARY:\n\
         {RULE}\n\
         • Age: {age} years\n\
         • Gender: {gender}\n\
         • Weight: {weight} kg\n\
         • Height: {height} cm\n\
         • BMI: {bmi} kg/m²\n\
         • Goal: {goal}\n\
         • Activity Level: {activity}\n\
         • Focus Area: {focus}{restrictions_line}\n\
         \n\
         {BOX_TOP}\n\
         ║                   WEEKLY WORKOUT SCHEDULE\n\
         {BOX_BOTTOM}\n\
         \n\
         {schedule}\n\
         \n\
         {BOX_TOP}\n\
         ║                    NUTRITION GUIDELINES\n\
         {BOX_BOTTOM}\n\
         \n\
         {nutrition}\n\
         \n\
         ✨ Generated by FITSPHERE AI on {stamp}\n",
        title = upper_words(&inputs.duration),
        age = inputs.age,
        gender = capitalize(inputs.gender.as_str()),
        weight = inputs.weight,
        height = inputs.height,
        goal = upper_words(inputs.goal.as_str()),
        activity = inputs.activity_level.as_str().to_uppercase(),
        focus = upper_words(&inputs.focus_area),
        schedule = weekly_schedule(),
    )
}

/// The seven-day schedule is the same for every profile.
fn weekly_schedule() -> String {
    format!(
        "📅 MONDAY - Upper Body Strength\n\
         {RULE}\n\
         • Warm-up: 5-10 minutes light cardio\n\
         • Push-ups: 3 sets × 12 reps\n\
         • Dumbbell Bench Press: 3 sets × 10 reps\n\
         • Shoulder Press: 3 sets × 12 reps\n\
         • Tricep Dips: 3 sets × 10 reps\n\
         • Cool-down: 5-10 minutes stretching\n\
         \n\
         📅 TUESDAY - Lower Body Power\n\
         {RULE}\n\
         • Warm-up: 5-10 minutes light cardio\n\
         • Squats: 4 sets × 12 reps\n\
         • Lunges: 3 sets × 10 reps per leg\n\
         • Leg Press: 3 sets × 12 reps\n\
         • Calf Raises: 3 sets × 15 reps\n\
         • Cool-down: 5-10 minutes stretching\n\
         \n\
         📅 WEDNESDAY - Active Recovery\n\
         {RULE}\n\
         • 30-minute walk, yoga, or stretching\n\
         \n\
         📅 THURSDAY - Back & Biceps\n\
         {RULE}\n\
         • Warm-up: 5-10 minutes light cardio\n\
         • Pull-ups or Lat Pulldowns: 3 sets × 10 reps\n\
         • Bent-over Rows: 3 sets × 12 reps\n\
         • Bicep Curls: 3 sets × 12 reps\n\
         • Hammer Curls: 3 sets × 10 reps\n\
         • Cool-down: 5-10 minutes stretching\n\
         \n\
         📅 FRIDAY - Core & Cardio\n\
         {RULE}\n\
         • Planks: 3 sets × 45-60 seconds\n\
         • Russian Twists: 3 sets × 20 reps\n\
         • Leg Raises: 3 sets × 15 reps\n\
         • Mountain Climbers: 3 sets × 20 reps\n\
         • 20-30 minutes cardio\n\
         \n\
         📅 SATURDAY - Active Day\n\
         {RULE}\n\
         • Sports, swimming, or outdoor activities\n\
         \n\
         📅 SUNDAY - Complete Rest\n\
         {RULE}\n\
         • Focus on recovery and meal prep"
    )
}

pub fn render_diet_suggestion(meal_type: &str, preferences: &str, calories: i32) -> String {
    format!(
        "\n🍽️ {meal} SUGGESTION\n\
         {RULE}\n\
         \n\
         Dietary Preference: {preferences}\n\
         Target Calories: ~{calories} kcal\n\
         \n\
         RECOMMENDED MEAL:\n\
         • Protein: Grilled chicken breast (200g)\n\
         • Carbs: Brown rice (150g cooked)\n\
         • Vegetables: Mixed steamed vegetables\n\
         • Healthy Fats: Olive oil drizzle\n\
         \n\
         MACROS:\n\
         Protein: 45g | Carbs: 55g | Fats: 12g\n\
         Total: ~{calories} calories\n\
         \n\
         Generated by FITSPHERE AI\n",
        meal = meal_type.to_uppercase(),
    )
}

fn upper_words(s: &str) -> String {
    s.replace('_', " ").to_uppercase()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
