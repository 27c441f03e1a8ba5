pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod location;
pub mod summary;
pub mod view;
pub mod workout;

pub use controller::{AppState, Controller};
pub use error::MaptyError;
