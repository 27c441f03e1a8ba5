use std::{cell::RefCell, rc::Rc};

use gloo_console::error;
use gloo_utils::window;
use mapty_lib::{
    location::{LocationCallback, LocationError, LocationProvider},
    workout::Coords,
};
use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::{GeolocationPosition, GeolocationPositionError};

/// `navigator.geolocation`, one shot.
pub struct BrowserGeolocation;

impl LocationProvider for BrowserGeolocation {
    fn request_current_position(&self, callback: LocationCallback) {
        let geolocation = match window().navigator().geolocation() {
            Ok(geolocation) => geolocation,
            Err(_) => {
                callback(Err(LocationError::Unsupported));
                return;
            }
        };

        // Shared so whichever side the browser picks can take it.
        let callback = Rc::new(RefCell::new(Some(callback)));

        let on_success = {
            let callback = callback.clone();
            Closure::once(move |position: GeolocationPosition| {
                let coords = position.coords();
                if let Some(callback) = callback.borrow_mut().take() {
                    callback(Ok(Coords::new(coords.latitude(), coords.longitude())));
                }
            })
        };

        let on_error = {
            let callback = callback.clone();
            Closure::once(move |err: GeolocationPositionError| {
                if let Some(callback) = callback.borrow_mut().take() {
                    callback(Err(LocationError::from_code(err.code())));
                }
            })
        };

        let requested = geolocation.get_current_position_with_error_callback(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
        );

        if let Err(err) = requested {
            error!(format!("Position request failed: {:?}", err));
            if let Some(callback) = callback.borrow_mut().take() {
                callback(Err(LocationError::Unsupported));
            }
            return;
        }

        on_success.forget();
        on_error.forget();
    }
}
