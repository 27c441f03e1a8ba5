use mapty_lib::summary::WorkoutSummary;
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutListProps {
    pub rows: Vec<WorkoutSummary>,
}

#[function_component]
pub fn WorkoutList(props: &WorkoutListProps) -> Html {
    html! {
        for props.rows.iter().map(|row| html! {
            <li key={row.id.clone()} class={classes!("workout", format!("workout--{}", row.workout_type))} data-id={row.id.clone()}>
                <h2 class="workout__title">{&row.description}</h2>
                { for row.stats.iter().map(|stat| html! {
                    <div class="workout__details">
                        <span class="workout__icon">{stat.icon}</span>
                        <span class="workout__value">{&stat.value}</span>
                        <span class="workout__unit">{stat.unit}</span>
                    </div>
                }) }
            </li>
        })
    }
}
