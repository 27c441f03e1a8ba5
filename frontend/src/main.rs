use browser_view::BrowserView;
use components::{workout_form::WorkoutForm, workout_list::WorkoutList};
use geolocation::BrowserGeolocation;
use gloo_console::{error, info, warn};
use mapty_lib::{
    form::Field,
    location::LocationError,
    workout::{Coords, WorkoutType},
    Controller,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web_sys::HtmlInputElement;
use yew::prelude::*;

mod browser_view;
mod components;
mod config;
mod geolocation;

enum MainMsg {
    Located(Result<Coords, LocationError>),
    MapClicked(Coords),
    TypeChanged(WorkoutType),
    Input(Field, String),
    Submit,
}

struct Model {
    controller: Controller<BrowserView>,
    distance_ref: NodeRef,
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();

        let view = BrowserView::new(link.callback(MainMsg::MapClicked));
        let mut controller = Controller::new(view, config::load());

        let on_located = link.callback(MainMsg::Located);
        if !controller.request_location(&BrowserGeolocation, move |result| on_located.emit(result)) {
            warn!("Position was not requested");
        }

        Self {
            controller,
            distance_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::Located(result) => {
                if let Err(err) = self.controller.location_resolved(result) {
                    error!(format!("No map this session: {err}"));
                }
            }
            MainMsg::MapClicked(coords) => {
                return self.controller.map_clicked(coords);
            }
            MainMsg::TypeChanged(workout_type) => {
                self.controller.select_type(workout_type);
            }
            MainMsg::Input(field, value) => {
                self.controller.view_mut().input.set(field, value);
            }
            MainMsg::Submit => {
                let input = self.controller.view().input.clone();
                match self.controller.submit(&input) {
                    Ok(workout) => info!(format!("Logged workout {}: {:?}", workout.id(), workout)),
                    Err(err) => error!(format!("Workout not logged: {err}")),
                }
            }
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.controller.view().map().invalidate_size();
        }

        if self.controller.view_mut().take_focus_request() {
            if let Some(input) = self.distance_ref.cast::<HtmlInputElement>() {
                if let Err(err) = input.focus() {
                    error!(format!("Could not focus distance: {:?}", err));
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let view = self.controller.view();

        let on_input = link.callback(|(field, value): (Field, String)| MainMsg::Input(field, value));
        let on_type = link.callback(MainMsg::TypeChanged);
        let on_submit = link.callback(|()| MainMsg::Submit);

        html! { <>
            <div class="sidebar">
                <h1 class="logo">{"Mapty"}</h1>
                <ul class="workouts">
                    <WorkoutForm
                        input={view.input.clone()}
                        visible={view.form_visible()}
                        distance_ref={self.distance_ref.clone()}
                        {on_input}
                        {on_type}
                        {on_submit}
                    />
                    <WorkoutList rows={view.rows().to_vec()} />
                </ul>
            </div>
            <div id="map" class="map-container">
                {view.map().render()}
            </div>
        </> }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "mapty_lib=debug,frontend=debug".into())
        )
        .with(tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .without_time()
            .with_writer(tracing_web::MakeWebConsoleWriter::new())
        )
        .init();

    yew::Renderer::<Model>::new().render();
}
