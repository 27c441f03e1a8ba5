use std::fmt;

use crate::{
    error::MaptyError,
    workout::{KindField, WorkoutType},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Distance => "distance",
            Field::Duration => "duration",
            Field::Cadence => "cadence",
            Field::Elevation => "elevation",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Field::Distance => "km",
            Field::Duration => "min",
            Field::Cadence => "step/min",
            Field::Elevation => "meters",
        }
    }

    /// The kind-specific field shown for a workout type.
    pub fn for_type(workout_type: WorkoutType) -> Self {
        match workout_type {
            WorkoutType::Running => Field::Cadence,
            WorkoutType::Cycling => Field::Elevation,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw contents of the entry form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub workout_type: WorkoutType,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Form values that passed validation and can build a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidInput {
    pub distance: f64,
    pub duration: f64,
    pub field: KindField,
}

impl FormInput {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Distance => &self.distance,
            Field::Duration => &self.duration,
            Field::Cadence => &self.cadence,
            Field::Elevation => &self.elevation,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Distance => &mut self.distance,
            Field::Duration => &mut self.duration,
            Field::Cadence => &mut self.cadence,
            Field::Elevation => &mut self.elevation,
        };
        *slot = value.into();
    }

    /// Empties every value field. The selected type is kept.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
    }

    /// All three numbers must be finite; distance, duration and cadence must be positive.
    /// Elevation may be zero or negative.
    pub fn validate(&self) -> Result<ValidInput, MaptyError> {
        let kind_field = Field::for_type(self.workout_type);

        let distance = parse_number(&self.distance);
        let duration = parse_number(&self.duration);
        let extra = parse_number(self.get(kind_field));

        let values = [(Field::Distance, distance), (Field::Duration, duration), (kind_field, extra)];
        if let Some((field, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(MaptyError::InvalidInput { field: *field });
        }

        let must_be_positive: &[(Field, f64)] = match self.workout_type {
            WorkoutType::Running => &values,
            WorkoutType::Cycling => &values[..2],
        };
        if let Some((field, _)) = must_be_positive.iter().find(|(_, value)| *value <= 0.) {
            return Err(MaptyError::InvalidInput { field: *field });
        }

        let field = match self.workout_type {
            WorkoutType::Running => KindField::Cadence(extra),
            WorkoutType::Cycling => KindField::Elevation(extra),
        };

        Ok(ValidInput { distance, duration, field })
    }
}

/// Numeric coercion the way the browser does it for input values:
/// blank reads as zero, anything unparseable reads as NaN.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}
