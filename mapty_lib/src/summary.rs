use crate::workout::{Workout, WorkoutKind, WorkoutType};

const MINUTES_PER_HOUR: f64 = 60.;

/// One labelled value in a workout list row.
#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Stat {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// Display-ready contents of a list row.
///
/// Derived values are rounded to one decimal here; the workout itself keeps full precision.
/// Speed is stored per minute of duration and shown per hour.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSummary {
    pub id: String,
    pub workout_type: WorkoutType,
    pub description: String,
    pub stats: [Stat; 4],
}

impl From<&Workout> for WorkoutSummary {
    fn from(workout: &Workout) -> Self {
        let workout_type = workout.workout_type();
        let distance = Stat::new(workout_type.icon(), workout.distance().to_string(), "km");
        let duration = Stat::new("⏱", workout.duration().to_string(), "min");

        let stats = match *workout.kind() {
            WorkoutKind::Running { cadence, pace } => [
                distance,
                duration,
                Stat::new("⚡️", format!("{pace:.1}"), "min/km"),
                Stat::new("🦶🏼", cadence.to_string(), "spm"),
            ],
            WorkoutKind::Cycling { elevation, speed } => [
                distance,
                duration,
                Stat::new("⚡️", format!("{:.1}", speed * MINUTES_PER_HOUR), "km/h"),
                Stat::new("⛰", elevation.to_string(), "m"),
            ],
        };

        Self {
            id: workout.id().to_owned(),
            workout_type,
            description: workout.description().to_owned(),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::workout::{Coords, KindField};

    #[test]
    fn running_row() {
        let date = Local.with_ymd_and_hms(2024, 4, 15, 7, 0, 0).unwrap();
        let workout = Workout::at(date, Coords::new(0., 0.), 3., 20., KindField::Cadence(170.));
        let summary = WorkoutSummary::from(&workout);

        assert_eq!(summary.description, "Running on April 15");
        assert_eq!(summary.id, workout.id());
        let values: Vec<_> = summary.stats.iter().map(|s| (s.value.as_str(), s.unit)).collect();
        assert_eq!(values, [("3", "km"), ("20", "min"), ("6.7", "min/km"), ("170", "spm")]);
    }

    #[test]
    fn cycling_row_keeps_negative_elevation() {
        let workout = Workout::new(Coords::new(0., 0.), 27.5, 95., KindField::Elevation(-523.));
        let summary = WorkoutSummary::from(&workout);

        assert_eq!(summary.workout_type, WorkoutType::Cycling);
        assert_eq!(summary.stats[0].value, "27.5");
        assert_eq!(summary.stats[2].value, "17.4");
        assert_eq!(summary.stats[2].unit, "km/h");
        assert_eq!(summary.stats[3].value, "-523");
    }
}
