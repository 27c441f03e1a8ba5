use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Local};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MaptyError;

pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Ids keep the last ten digits of the creation millis.
const ID_MODULUS: i64 = 10_000_000_000;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lat, self.lng)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkoutType {
    #[default]
    Running,
    Cycling,
}

impl WorkoutType {
    /// Value used by the type selector and the popup class names.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = MaptyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(MaptyError::UnknownWorkoutType(other.to_owned())),
        }
    }
}

/// The extra input that distinguishes the two kinds of workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindField {
    /// Steps per minute.
    Cadence(f64),
    /// Meters gained. Negative values mean descent.
    Elevation(f64),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutKind {
    Running { cadence: f64, pace: f64 },
    Cycling { elevation: f64, speed: f64 },
}

impl WorkoutKind {
    fn derive(distance: f64, duration: f64, field: KindField) -> Self {
        match field {
            KindField::Cadence(cadence) => WorkoutKind::Running {
                cadence,
                pace: duration / distance,
            },
            KindField::Elevation(elevation) => WorkoutKind::Cycling {
                elevation,
                speed: distance / duration,
            },
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// A single logged activity. Immutable once built; every field is behind an accessor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: String,
    date: DateTime<Local>,
    coords: Coords,
    distance: f64,
    duration: f64,
    description: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    kind: WorkoutKind,
}

impl Workout {
    /// Builds a workout stamped with the current local time.
    ///
    /// Distance (km) and duration (min) are expected to be validated by the caller.
    pub fn new(coords: Coords, distance: f64, duration: f64, field: KindField) -> Self {
        Self::at(Local::now(), coords, distance, duration, field)
    }

    pub fn at(date: DateTime<Local>, coords: Coords, distance: f64, duration: f64, field: KindField) -> Self {
        Self::with_id(id_token(&date), date, coords, distance, duration, field)
    }

    /// Like [`Workout::at`] with an id chosen by the caller, see [`id_token`].
    pub fn with_id(id: u64, date: DateTime<Local>, coords: Coords, distance: f64, duration: f64, field: KindField) -> Self {
        let kind = WorkoutKind::derive(distance, duration, field);
        let description = describe(kind.workout_type(), &date);

        Self {
            id: format!("{id:010}"),
            date,
            coords,
            distance,
            duration,
            description,
            kind,
        }
    }

    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        Self::new(coords, distance, duration, KindField::Cadence(cadence))
    }

    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation: f64) -> Self {
        Self::new(coords, distance, duration, KindField::Elevation(elevation))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> &DateTime<Local> {
        &self.date
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }

    /// Minutes per km, running only.
    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Running { pace, .. } => Some(pace),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Cycling { speed, .. } => Some(speed),
            WorkoutKind::Running { .. } => None,
        }
    }
}

/// `"Running on April 15"`: capitalized type, full month name, unpadded day.
pub fn describe<D: Datelike>(workout_type: WorkoutType, date: &D) -> String {
    format!(
        "{} on {} {}",
        workout_type.label(),
        MONTHS[date.month0() as usize],
        date.day()
    )
}

/// Short token derived from the creation time: the last ten digits of its millis.
pub fn id_token(date: &DateTime<Local>) -> u64 {
    date.timestamp_millis().rem_euclid(ID_MODULUS) as u64
}
