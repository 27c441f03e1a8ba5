use chrono::Local;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::MaptyError,
    form::FormInput,
    location::{LocationError, LocationProvider},
    view::WorkoutView,
    workout::{id_token, Coords, Workout, WorkoutType},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    /// The position request is out, nothing is on screen yet.
    AwaitingLocation,
    MapReady,
    FormOpen { clicked: Coords },
    /// Terminal. The session has no map and cannot log workouts.
    LocationDenied,
}

/// Mediates between the user, the map, the entry form and the workout model.
///
/// Every handler runs to completion on the caller's thread; the controller is the only writer
/// of its state and workout list.
pub struct Controller<V: WorkoutView> {
    state: AppState,
    location_requested: bool,
    origin: Option<Coords>,
    workouts: Vec<Workout>,
    last_id: Option<u64>,
    selected_type: WorkoutType,
    config: Config,
    view: V,
}

impl<V: WorkoutView> Controller<V> {
    pub fn new(mut view: V, config: Config) -> Self {
        let selected_type = WorkoutType::default();
        view.show_kind_field(selected_type);

        Self {
            state: AppState::AwaitingLocation,
            location_requested: false,
            origin: None,
            workouts: Vec::new(),
            last_id: None,
            selected_type,
            config,
            view,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    /// Where the map was first centered, once the position is known.
    pub fn origin(&self) -> Option<Coords> {
        self.origin
    }

    /// Workouts in creation order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn workout(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn selected_type(&self) -> WorkoutType {
        self.selected_type
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Issues the session's single position request. The outcome goes to `deliver`, which is
    /// expected to hand it back to [`Controller::location_resolved`] once the current handler is done.
    ///
    /// Returns false if a request was already made.
    pub fn request_location<P, F>(&mut self, provider: &P, deliver: F) -> bool
    where
        P: LocationProvider + ?Sized,
        F: FnOnce(Result<Coords, LocationError>) + 'static,
    {
        if self.location_requested || self.state != AppState::AwaitingLocation {
            warn!("Position already requested, state {:?}", self.state);
            return false;
        }

        info!("Requesting current position");
        self.location_requested = true;
        provider.request_current_position(Box::new(deliver));
        true
    }

    pub fn location_resolved(&mut self, result: Result<Coords, LocationError>) -> Result<(), MaptyError> {
        if self.state != AppState::AwaitingLocation {
            warn!("Ignoring location result in state {:?}", self.state);
            return Ok(());
        }

        match result {
            Ok(center) => {
                info!("Position found at {center}, loading map");
                self.view.load_map(center, &self.config.map);
                self.origin = Some(center);
                self.state = AppState::MapReady;
                Ok(())
            }
            Err(err) => {
                warn!("Could not get position: {err}");
                let err = MaptyError::from(err);
                self.view.alert(&err.to_string());
                self.state = AppState::LocationDenied;
                Err(err)
            }
        }
    }

    /// Returns whether the click was accepted. Clicks before the map is ready are dropped.
    pub fn map_clicked(&mut self, clicked: Coords) -> bool {
        match self.state {
            AppState::MapReady => {
                debug!("Map clicked at {clicked}, opening form");
                self.view.show_form();
                self.state = AppState::FormOpen { clicked };
                true
            }
            AppState::FormOpen { .. } => {
                debug!("Map clicked at {clicked}, moving pending workout");
                self.state = AppState::FormOpen { clicked };
                true
            }
            AppState::AwaitingLocation | AppState::LocationDenied => {
                warn!("Ignoring map click in state {:?}", self.state);
                false
            }
        }
    }

    pub fn select_type(&mut self, workout_type: WorkoutType) {
        self.selected_type = workout_type;
        self.view.show_kind_field(workout_type);
    }

    /// Validates the form and logs a workout at the clicked coordinate.
    ///
    /// The workout type is the selected one, whatever `input.workout_type` says.
    /// On failure the user is alerted and nothing changes; the form keeps its values.
    pub fn submit(&mut self, input: &FormInput) -> Result<&Workout, MaptyError> {
        let AppState::FormOpen { clicked } = self.state else {
            return Err(self.reject(MaptyError::NoLocationSelected));
        };

        let mut input = input.clone();
        input.workout_type = self.selected_type;

        let valid = match input.validate() {
            Ok(valid) => valid,
            Err(err) => return Err(self.reject(err)),
        };

        let date = Local::now();
        let id = self.next_id(id_token(&date));
        let workout = Workout::with_id(id, date, clicked, valid.distance, valid.duration, valid.field);
        info!("New workout {}: {}", workout.id(), workout.description());
        debug!("{workout:?}");

        let index = self.workouts.len();
        self.workouts.push(workout);

        let popup = self.config.popup.for_workout(&self.workouts[index]);
        self.view.render_marker(&self.workouts[index], &popup);
        self.view.render_list_entry(&self.workouts[index]);
        self.view.hide_form();
        self.state = AppState::MapReady;

        Ok(&self.workouts[index])
    }

    /// Time-derived ids, bumped past the last one issued so they stay unique within the session.
    fn next_id(&mut self, token: u64) -> u64 {
        let id = match self.last_id {
            Some(last) if token <= last => last + 1,
            _ => token,
        };
        self.last_id = Some(id);
        id
    }

    fn reject(&mut self, err: MaptyError) -> MaptyError {
        warn!("Rejected submit: {err:?}");
        self.view.alert(&err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    use crate::{
        config::{MapConfig, MarkerPopup},
        form::Field,
        location::LocationCallback,
    };

    /// Counts requests and answers each one straight away.
    #[derive(Default)]
    struct CountingLocation(RefCell<usize>);

    impl LocationProvider for CountingLocation {
        fn request_current_position(&self, callback: LocationCallback) {
            *self.0.borrow_mut() += 1;
            callback(Ok(Coords::new(51.5, -0.12)));
        }
    }

    #[derive(Default)]
    struct Recorder {
        alerts: Vec<String>,
        maps: Vec<Coords>,
        form_shown: usize,
        form_hidden: usize,
        kind_field: Option<WorkoutType>,
        markers: Vec<(String, Coords)>,
        rows: Vec<String>,
    }

    impl WorkoutView for Recorder {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_owned());
        }

        fn load_map(&mut self, center: Coords, _config: &MapConfig) {
            self.maps.push(center);
        }

        fn show_form(&mut self) {
            self.form_shown += 1;
        }

        fn hide_form(&mut self) {
            self.form_hidden += 1;
        }

        fn show_kind_field(&mut self, workout_type: WorkoutType) {
            self.kind_field = Some(workout_type);
        }

        fn render_marker(&mut self, workout: &Workout, _popup: &MarkerPopup) {
            self.markers.push((workout.id().to_owned(), workout.coords()));
        }

        fn render_list_entry(&mut self, workout: &Workout) {
            self.rows.push(workout.id().to_owned());
        }
    }

    fn ready_controller() -> Controller<Recorder> {
        let mut controller = Controller::new(Recorder::default(), Config::default());
        controller.location_resolved(Ok(Coords::new(51.5, -0.12))).unwrap();
        controller
    }

    fn running_input(distance: &str) -> FormInput {
        FormInput {
            distance: distance.into(),
            duration: "25".into(),
            cadence: "178".into(),
            ..Default::default()
        }
    }

    #[test]
    fn starts_waiting_for_a_position_with_cadence_visible() {
        let controller = Controller::new(Recorder::default(), Config::default());
        assert_eq!(controller.state(), AppState::AwaitingLocation);
        assert_eq!(controller.view().kind_field, Some(WorkoutType::Running));
    }

    #[test]
    fn position_loads_the_map() {
        let controller = ready_controller();
        assert_eq!(controller.state(), AppState::MapReady);
        assert_eq!(controller.origin(), Some(Coords::new(51.5, -0.12)));
        assert_eq!(controller.view().maps, [Coords::new(51.5, -0.12)]);
    }

    #[test]
    fn denied_position_is_terminal() {
        let mut controller = Controller::new(Recorder::default(), Config::default());
        let err = controller.location_resolved(Err(LocationError::PermissionDenied)).unwrap_err();

        assert_eq!(err, MaptyError::LocationUnavailable(LocationError::PermissionDenied));
        assert_eq!(controller.state(), AppState::LocationDenied);
        assert_eq!(controller.view().alerts, ["Could not get your position."]);

        // No retry, and no map to click on.
        controller.location_resolved(Ok(Coords::new(1., 1.))).unwrap();
        assert!(!controller.map_clicked(Coords::new(1., 1.)));
        assert_eq!(controller.state(), AppState::LocationDenied);
        assert!(controller.view().maps.is_empty());
    }

    #[test]
    fn clicks_before_the_map_are_ignored() {
        let mut controller = Controller::new(Recorder::default(), Config::default());
        assert!(!controller.map_clicked(Coords::new(1., 1.)));
        assert_eq!(controller.view().form_shown, 0);
    }

    #[test]
    fn click_opens_the_form_and_a_second_click_moves_it() {
        let mut controller = ready_controller();

        assert!(controller.map_clicked(Coords::new(51.51, -0.13)));
        assert!(controller.map_clicked(Coords::new(51.52, -0.14)));

        assert_eq!(controller.state(), AppState::FormOpen { clicked: Coords::new(51.52, -0.14) });
        assert_eq!(controller.view().form_shown, 1);
    }

    #[test]
    fn valid_submit_renders_once_and_closes_the_form() {
        let mut controller = ready_controller();
        controller.map_clicked(Coords::new(51.51, -0.13));

        let id = controller.submit(&running_input("5")).unwrap().id().to_owned();

        assert_eq!(controller.workouts().len(), 1);
        assert_eq!(controller.view().markers, [(id.clone(), Coords::new(51.51, -0.13))]);
        assert_eq!(controller.view().rows, [id.clone()]);
        assert_eq!(controller.view().form_hidden, 1);
        assert_eq!(controller.state(), AppState::MapReady);
        assert!(controller.workout(&id).is_some());
    }

    #[test]
    fn invalid_submit_keeps_the_form_open() {
        let mut controller = ready_controller();
        controller.map_clicked(Coords::new(51.51, -0.13));

        for distance in ["-1", "NaN", ""] {
            let err = controller.submit(&running_input(distance)).unwrap_err();
            assert_eq!(err, MaptyError::InvalidInput { field: Field::Distance });
        }

        assert!(controller.workouts().is_empty());
        assert!(controller.view().markers.is_empty());
        assert_eq!(controller.view().form_hidden, 0);
        assert_eq!(controller.view().alerts.len(), 3);
        assert!(controller.view().alerts.iter().all(|a| a == "Inputs have to be positive numbers."));
        assert_eq!(controller.state(), AppState::FormOpen { clicked: Coords::new(51.51, -0.13) });
    }

    #[test]
    fn submit_without_a_click_is_rejected() {
        let mut controller = ready_controller();
        let err = controller.submit(&running_input("5")).unwrap_err();

        assert_eq!(err, MaptyError::NoLocationSelected);
        assert!(controller.workouts().is_empty());
        assert_eq!(controller.view().alerts.len(), 1);
    }

    #[test]
    fn selecting_a_type_switches_the_kind_field() {
        let mut controller = ready_controller();

        controller.select_type(WorkoutType::Cycling);
        assert_eq!(controller.view().kind_field, Some(WorkoutType::Cycling));
        assert_eq!(controller.selected_type(), WorkoutType::Cycling);

        controller.select_type(WorkoutType::Running);
        assert_eq!(controller.view().kind_field, Some(WorkoutType::Running));
    }

    #[test]
    fn cycling_workouts_accept_descent() {
        let mut controller = ready_controller();
        controller.map_clicked(Coords::new(46.0, 7.5));
        controller.select_type(WorkoutType::Cycling);

        let input = FormInput {
            workout_type: WorkoutType::Cycling,
            distance: "27".into(),
            duration: "95".into(),
            elevation: "-523".into(),
            ..Default::default()
        };
        let workout = controller.submit(&input).unwrap();

        assert_eq!(workout.workout_type(), WorkoutType::Cycling);
        assert_eq!(workout.speed(), Some(27. / 95.));
    }

    #[test]
    fn position_is_requested_once() {
        let provider = CountingLocation::default();
        let delivered = Rc::new(RefCell::new(Vec::new()));
        let mut controller = Controller::new(Recorder::default(), Config::default());

        for _ in 0..2 {
            let delivered = delivered.clone();
            controller.request_location(&provider, move |result| delivered.borrow_mut().push(result));
        }

        assert_eq!(*provider.0.borrow(), 1);
        assert_eq!(*delivered.borrow(), [Ok(Coords::new(51.5, -0.12))]);
        assert_eq!(controller.state(), AppState::AwaitingLocation);

        for result in delivered.take() {
            controller.location_resolved(result).unwrap();
        }
        assert_eq!(controller.state(), AppState::MapReady);
    }

    #[test]
    fn selected_type_decides_the_workout_kind() {
        let mut controller = ready_controller();
        controller.map_clicked(Coords::new(51.51, -0.13));
        controller.select_type(WorkoutType::Cycling);

        let input = FormInput {
            distance: "10".into(),
            duration: "40".into(),
            cadence: "150".into(),
            ..Default::default()
        };
        let workout = controller.submit(&input).unwrap();
        assert_eq!(workout.workout_type(), WorkoutType::Cycling);
        assert_eq!(workout.kind(), &crate::workout::WorkoutKind::Cycling { elevation: 0., speed: 10. / 40. });
        assert_eq!(controller.workouts()[0].workout_type(), controller.selected_type());
    }

    #[test]
    fn back_to_back_workouts_get_distinct_ids() {
        let mut controller = ready_controller();

        for _ in 0..5 {
            controller.map_clicked(Coords::new(51.51, -0.13));
            controller.submit(&running_input("5")).unwrap();
        }

        let mut ids: Vec<_> = controller.workouts().iter().map(|w| w.id().to_owned()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert!(ids.iter().all(|id| id.len() == 10));
    }

    #[test]
    fn next_id_only_bumps_on_collision() {
        let mut controller = ready_controller();

        assert_eq!(controller.next_id(100), 100);
        assert_eq!(controller.next_id(100), 101);
        assert_eq!(controller.next_id(100), 102);
        assert_eq!(controller.next_id(500), 500);
    }
}
