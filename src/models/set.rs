use serde::{Deserialize, Serialize};

/// One displayed row of the active workout: a weight x reps slot with a
/// completion flag. Rows are positional; `id` is the 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: String,
    pub prev: String,
    pub weight: f64,
    pub reps: u32,
    pub done: bool,
}

impl WorkoutSet {
    pub fn at_position(position: usize, weight: f64, reps: u32, done: bool) -> Self {
        Self {
            id: (position + 1).to_string(),
            prev: prev_label(weight, reps),
            weight,
            reps,
            done,
        }
    }

    /// The single placeholder row shown when there is nothing to track yet.
    pub fn synthetic() -> Self {
        Self::at_position(0, 0.0, 0, false)
    }
}

/// Display summary of a slot's previous value, `-` standing in for zero.
pub fn prev_label(weight: f64, reps: u32) -> String {
    if weight == 0.0 && reps == 0 {
        return "-".to_string();
    }
    let weight_part = if weight != 0.0 {
        weight.to_string()
    } else {
        "-".to_string()
    };
    let reps_part = if reps != 0 {
        reps.to_string()
    } else {
        "-".to_string()
    };
    format!("{} x {}", weight_part, reps_part)
}

/// A single numeric edit to a displayed set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetUpdate {
    Weight(f64),
    Reps(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prev_label() {
        assert_eq!(prev_label(0.0, 0), "-");
        assert_eq!(prev_label(100.0, 5), "100 x 5");
        assert_eq!(prev_label(62.5, 8), "62.5 x 8");
        assert_eq!(prev_label(80.0, 0), "80 x -");
        assert_eq!(prev_label(0.0, 12), "- x 12");
    }

    #[test]
    fn test_synthetic_set_shape() {
        let set = WorkoutSet::synthetic();
        assert_eq!(set.id, "1");
        assert_eq!(set.prev, "-");
        assert_eq!(set.weight, 0.0);
        assert_eq!(set.reps, 0);
        assert!(!set.done);
    }
}
