use gloo_console::error;
use mapty_lib::{
    form::{Field, FormInput},
    workout::WorkoutType,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutFormProps {
    pub input: FormInput,
    pub visible: bool,
    pub distance_ref: NodeRef,
    pub on_input: Callback<(Field, String)>,
    pub on_type: Callback<WorkoutType>,
    pub on_submit: Callback<()>,
}

#[function_component]
pub fn WorkoutForm(props: &WorkoutFormProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let onchange = {
        let on_type = props.on_type.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<WorkoutType>() {
                Ok(workout_type) => on_type.emit(workout_type),
                Err(err) => error!(err.to_string()),
            }
        })
    };

    let selected = props.input.workout_type;

    html! {
        <form class={classes!("form", (!props.visible).then_some("hidden"))} {onsubmit}>
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" {onchange}>
                    <option value="running" selected={selected == WorkoutType::Running}>{"Running"}</option>
                    <option value="cycling" selected={selected == WorkoutType::Cycling}>{"Cycling"}</option>
                </select>
            </div>
            { field_row(props, Field::Distance, "Distance", false, Some(props.distance_ref.clone())) }
            { field_row(props, Field::Duration, "Duration", false, None) }
            { field_row(props, Field::Cadence, "Cadence", selected != WorkoutType::Running, None) }
            { field_row(props, Field::Elevation, "Elev Gain", selected != WorkoutType::Cycling, None) }
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}

fn field_row(props: &WorkoutFormProps, field: Field, label: &'static str, hidden: bool, node_ref: Option<NodeRef>) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit((field, input.value()));
        })
    };

    html! {
        <div class={classes!("form__row", hidden.then_some("form__row--hidden"))}>
            <label class="form__label">{label}</label>
            <input
                class={classes!("form__input", format!("form__input--{}", field.name()))}
                placeholder={field.unit()}
                value={props.input.get(field).to_owned()}
                ref={node_ref.unwrap_or_default()}
                {oninput}
            />
        </div>
    }
}
