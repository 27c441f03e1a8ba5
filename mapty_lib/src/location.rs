use thiserror::Error;

use crate::workout::Coords;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("permission to read the position was denied")]
    PermissionDenied,
    #[error("the position could not be determined")]
    PositionUnavailable,
    #[error("timed out waiting for a position")]
    Timeout,
    #[error("geolocation is not available")]
    Unsupported,
}

impl LocationError {
    /// Maps a `GeolocationPositionError.code` from the browser.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            2 => LocationError::PositionUnavailable,
            3 => LocationError::Timeout,
            _ => LocationError::Unsupported,
        }
    }
}

pub type LocationCallback = Box<dyn FnOnce(Result<Coords, LocationError>)>;

/// Source of the user's current position.
///
/// The callback is invoked exactly once, either from inside the call or later from the event loop.
/// Requests cannot be cancelled.
pub trait LocationProvider {
    fn request_current_position(&self, callback: LocationCallback);
}
