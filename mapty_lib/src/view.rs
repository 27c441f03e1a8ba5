use crate::{
    config::{MapConfig, MarkerPopup},
    workout::{Coords, Workout, WorkoutType},
};

/// The UI surfaces the controller drives. Built once at startup and owned by the controller.
pub trait WorkoutView {
    /// Blocking notification to the user.
    fn alert(&mut self, message: &str);

    /// Renders the map centered on `center` and arms its click handler.
    fn load_map(&mut self, center: Coords, config: &MapConfig);

    /// Reveals the entry form and focuses the distance field.
    fn show_form(&mut self);

    /// Clears every input and hides the entry form.
    fn hide_form(&mut self);

    /// Shows the cadence row for running or the elevation row for cycling, hiding the other.
    fn show_kind_field(&mut self, workout_type: WorkoutType);

    /// Places a marker at the workout's coordinates and opens its popup.
    fn render_marker(&mut self, workout: &Workout, popup: &MarkerPopup);

    fn render_list_entry(&mut self, workout: &Workout);
}
