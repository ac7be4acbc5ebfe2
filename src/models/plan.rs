use chrono::Weekday;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    #[default]
    Normal,
    Warmup,
    Failure,
    DropSet,
}

impl SetType {
    pub fn label(&self) -> &'static str {
        match self {
            SetType::Normal => "normal",
            SetType::Warmup => "warmup",
            SetType::Failure => "failure",
            SetType::DropSet => "drop set",
        }
    }
}

/// One prescribed set inside a plan exercise. Weight and reps travel as
/// strings on the wire; unparseable values read as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSet {
    #[serde(rename = "type", default)]
    pub set_type: SetType,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub reps: String,
}

impl PlanSet {
    pub fn weight_value(&self) -> f64 {
        self.weight.trim().parse().unwrap_or(0.0)
    }

    pub fn reps_value(&self) -> u32 {
        self.reps
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u32)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanExercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<PlanSet>,
}

/// A saved training plan as served by the remote service. Day keys are
/// kept in insertion order; day resolution depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub days_of_week: Vec<String>,
    #[serde(default)]
    pub exercises_by_day: IndexMap<String, Vec<PlanExercise>>,
    #[serde(default)]
    pub creator_id: Option<String>,
    #[serde(default)]
    pub mentee_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TrainingPlan {
    /// The days this plan runs on: the explicit weekday list when present,
    /// otherwise whichever days carry exercises.
    pub fn configured_days(&self) -> Vec<&str> {
        if !self.days_of_week.is_empty() {
            self.days_of_week.iter().map(String::as_str).collect()
        } else {
            self.exercises_by_day.keys().map(String::as_str).collect()
        }
    }

    pub fn runs_on(&self, day: &str) -> bool {
        self.configured_days().contains(&day)
    }

    pub fn day_exercises(&self, day: &str) -> &[PlanExercise] {
        self.exercises_by_day
            .get(day)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Pick the day a session should default to: today when the plan runs
/// today, else the plan's first configured day, else today regardless
/// (the caller must accept a possibly-empty exercise list).
pub fn resolve_default_day(plan: &TrainingPlan, today: &str) -> String {
    let days = plan.configured_days();
    if days.contains(&today) {
        return today.to_string();
    }
    days.first()
        .map(|day| day.to_string())
        .unwrap_or_else(|| today.to_string())
}

/// Three-letter day codes, matching the remote service's `days_of_week`.
pub fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with_days(days: &[&str]) -> TrainingPlan {
        TrainingPlan {
            id: 1,
            name: "Push Pull Legs".to_string(),
            description: None,
            template_id: "ppl".to_string(),
            template_name: "PPL".to_string(),
            days_of_week: days.iter().map(|d| d.to_string()).collect(),
            exercises_by_day: IndexMap::new(),
            creator_id: None,
            mentee_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_default_day_prefers_today() {
        let plan = plan_with_days(&["Mon", "Wed"]);
        assert_eq!(resolve_default_day(&plan, "Wed"), "Wed");
    }

    #[test]
    fn test_default_day_falls_back_to_first_configured() {
        let plan = plan_with_days(&["Mon", "Wed"]);
        assert_eq!(resolve_default_day(&plan, "Sun"), "Mon");
    }

    #[test]
    fn test_default_day_without_configured_days() {
        let plan = plan_with_days(&[]);
        assert_eq!(resolve_default_day(&plan, "Thu"), "Thu");
    }

    #[test]
    fn test_configured_days_fall_back_to_exercise_keys() {
        let mut plan = plan_with_days(&[]);
        plan.exercises_by_day.insert("Fri".to_string(), vec![]);
        plan.exercises_by_day.insert("Sat".to_string(), vec![]);
        assert_eq!(plan.configured_days(), vec!["Fri", "Sat"]);
        assert_eq!(resolve_default_day(&plan, "Tue"), "Fri");
    }

    #[test]
    fn test_plan_set_values_parse_leniently() {
        let set = PlanSet {
            set_type: SetType::Normal,
            weight: "62.5".to_string(),
            reps: "8".to_string(),
        };
        assert_eq!(set.weight_value(), 62.5);
        assert_eq!(set.reps_value(), 8);

        let blank = PlanSet {
            set_type: SetType::Warmup,
            weight: "".to_string(),
            reps: "heavy".to_string(),
        };
        assert_eq!(blank.weight_value(), 0.0);
        assert_eq!(blank.reps_value(), 0);
    }

    #[test]
    fn test_set_type_wire_format() {
        let json = serde_json::to_string(&SetType::DropSet).unwrap();
        assert_eq!(json, "\"drop_set\"");
        let parsed: SetType = serde_json::from_str("\"warmup\"").unwrap();
        assert_eq!(parsed, SetType::Warmup);
        assert_eq!(SetType::DropSet.label(), "drop set");
    }
}
