use thiserror::Error;

use crate::{form::Field, location::LocationError};

/// Everything that can go wrong while logging a workout.
///
/// The `Display` text is what the user sees in the blocking alert.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaptyError {
    #[error("Could not get your position.")]
    LocationUnavailable(#[from] LocationError),

    #[error("Inputs have to be positive numbers.")]
    InvalidInput { field: Field },

    #[error("Unknown workout type: {0}")]
    UnknownWorkoutType(String),

    #[error("Click on the map to choose where the workout took place.")]
    NoLocationSelected,
}
