use gloo_console::error;
use gloo_utils::window;
use mapty_lib::{
    config::{MapConfig, MarkerPopup},
    form::FormInput,
    summary::WorkoutSummary,
    view::WorkoutView,
    workout::{Coords, Workout, WorkoutType},
};
use yew::Callback;

use crate::components::map_component::MapHandle;

/// Every UI handle the controller drives, created once when the app starts.
///
/// The map is updated directly through leaflet; form and list state is kept here and rendered by yew.
pub struct BrowserView {
    map: MapHandle,
    pub input: FormInput,
    form_visible: bool,
    focus_pending: bool,
    rows: Vec<WorkoutSummary>,
}

impl BrowserView {
    pub fn new(on_map_click: Callback<Coords>) -> Self {
        Self {
            map: MapHandle::new(on_map_click),
            input: FormInput::default(),
            form_visible: false,
            focus_pending: false,
            rows: Vec::new(),
        }
    }

    pub fn map(&self) -> &MapHandle {
        &self.map
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn rows(&self) -> &[WorkoutSummary] {
        &self.rows
    }

    /// True once after the form was opened, so the distance field gets focus on the next render.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_pending)
    }
}

impl WorkoutView for BrowserView {
    fn alert(&mut self, message: &str) {
        if let Err(err) = window().alert_with_message(message) {
            error!(format!("Could not show alert: {:?}", err));
        }
    }

    fn load_map(&mut self, center: Coords, config: &MapConfig) {
        self.map.load(center, config);
    }

    fn show_form(&mut self) {
        self.form_visible = true;
        self.focus_pending = true;
    }

    fn hide_form(&mut self) {
        self.input.clear();
        self.form_visible = false;
    }

    fn show_kind_field(&mut self, workout_type: WorkoutType) {
        self.input.workout_type = workout_type;
    }

    fn render_marker(&mut self, workout: &Workout, popup: &MarkerPopup) {
        self.map.add_marker(workout.coords(), popup);
    }

    fn render_list_entry(&mut self, workout: &Workout) {
        self.rows.push(WorkoutSummary::from(workout));
    }
}
