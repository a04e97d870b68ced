mod components;
mod services;
mod state;

use components::birthday_celebration::BirthdayCelebration;
use components::birthday_form::BirthdayForm;
use shared::{CelebrationData, ViewState};
use state::{AppState, ViewAction};
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| services::config::load_config());
    let app_state = use_reducer(AppState::default);

    let on_submit = {
        let app_state = app_state.clone();
        Callback::from(move |data: CelebrationData| app_state.dispatch(ViewAction::Submit(data)))
    };

    let on_reset = {
        let app_state = app_state.clone();
        Callback::from(move |_: ()| app_state.dispatch(ViewAction::Reset))
    };

    html! {
        <main class="app">
            {match app_state.view() {
                ViewState::Form => html! {
                    <BirthdayForm config={config.clone()} on_submit={on_submit} />
                },
                ViewState::Celebration(data) => html! {
                    <BirthdayCelebration data={data.clone()} config={config.clone()} on_reset={on_reset} />
                },
            }}
        </main>
    }
}

fn main() {
    services::logging::init(log::LevelFilter::Debug);
    yew::Renderer::<App>::new().render();
}
