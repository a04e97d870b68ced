use std::rc::Rc;

use shared::month::{day_options, year_options};
use shared::{BirthRecord, CelebrationConfig, CelebrationData, DateOfBirthValidator, Field, FieldErrors, MONTH_NAMES};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::sparkles::Sparkles;
use crate::services::date_utils;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct BirthdayFormProps {
    pub config: Rc<CelebrationConfig>,
    pub on_submit: Callback<CelebrationData>,
}

fn select_callback(target: UseStateHandle<String>) -> Callback<Event> {
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        target.set(select.value());
    })
}

fn field_class(base: &str, errors: &FieldErrors, field: Field) -> String {
    if errors.contains(field) || (field != Field::Name && errors.contains(Field::Date)) {
        format!("{} has-error", base)
    } else {
        base.to_string()
    }
}

#[function_component(BirthdayForm)]
pub fn birthday_form(props: &BirthdayFormProps) -> Html {
    let name = use_state(String::new);
    let day = use_state(String::new);
    let month = use_state(String::new);
    let year = use_state(String::new);
    let errors = use_state(FieldErrors::new);

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_submit = {
        let name = name.clone();
        let day = day.clone();
        let month = month.clone();
        let year = year.clone();
        let errors = errors.clone();
        let on_submit = props.on_submit.clone();
        let validator = DateOfBirthValidator::from_config(&props.config);

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(today) = date_utils::today() else {
                Logger::error_with_component("birthday-form", "Could not read today's date from the browser");
                return;
            };

            let record = BirthRecord::new((*name).clone(), (*day).clone(), (*month).clone(), (*year).clone());
            match validator.validate(&record, today) {
                Ok(data) => {
                    Logger::info_with_component("birthday-form", &format!("Form submitted for {}", data.name));
                    errors.set(FieldErrors::new());
                    on_submit.emit(data);
                }
                Err(field_errors) => {
                    let fields: Vec<&str> = field_errors.iter().map(|(field, _)| field.key()).collect();
                    Logger::debug_with_component(
                        "birthday-form",
                        &format!("Form has invalid fields: {}", fields.join(", ")),
                    );
                    errors.set(field_errors);
                }
            }
        })
    };

    let years = date_utils::today()
        .map(|today| year_options(today, props.config.year_span))
        .unwrap_or_default();

    let error_line = |field: Field| -> Html {
        match errors.message(field) {
            Some(message) => html! {
                <p id={format!("{}-error", field.key())} class="field-error" role="alert">{message}</p>
            },
            None => html! {},
        }
    };

    html! {
        <div class="birthday-form-page">
            <Sparkles count={props.config.sparkle_count} color="#fff" />
            <div class="birthday-card">
                <div class="birthday-card-header">
                    <div class="gift-icon">{"🎁"}</div>
                    <h1 class="birthday-card-title">{"Let's Celebrate You!"}</h1>
                    <p class="birthday-card-description">{"Tell us about yourself to start the party 🎉"}</p>
                </div>

                <form class="birthday-form" onsubmit={on_submit} novalidate=true>
                    <div class="form-group">
                        <label for="name">{"Your Name"}</label>
                        <input
                            id="name"
                            type="text"
                            class={field_class("birthday-input", &errors, Field::Name)}
                            placeholder="Enter your name"
                            value={(*name).clone()}
                            oninput={on_name_input}
                            aria-describedby={errors.contains(Field::Name).then_some("name-error")}
                        />
                        {error_line(Field::Name)}
                    </div>

                    <div class="form-group">
                        <label>{"📅 Date of Birth"}</label>
                        <div class="date-selects">
                            <select
                                class={field_class("birthday-select", &errors, Field::Day)}
                                aria-label="Day"
                                onchange={select_callback(day.clone())}
                            >
                                <option value="" disabled=true selected={day.is_empty()}>{"DD"}</option>
                                {for day_options().map(|d| {
                                    let value = d.to_string();
                                    html! {
                                        <option selected={*day == value} value={value.clone()}>{value}</option>
                                    }
                                })}
                            </select>

                            <select
                                class={field_class("birthday-select", &errors, Field::Month)}
                                aria-label="Month"
                                onchange={select_callback(month.clone())}
                            >
                                <option value="" disabled=true selected={month.is_empty()}>{"Month"}</option>
                                {for MONTH_NAMES.iter().map(|m| html! {
                                    <option selected={*month == *m} value={*m}>{*m}</option>
                                })}
                            </select>

                            <select
                                class={field_class("birthday-select", &errors, Field::Year)}
                                aria-label="Year"
                                onchange={select_callback(year.clone())}
                            >
                                <option value="" disabled=true selected={year.is_empty()}>{"YYYY"}</option>
                                {for years.iter().map(|y| {
                                    let value = y.to_string();
                                    html! {
                                        <option selected={*year == value} value={value.clone()}>{value}</option>
                                    }
                                })}
                            </select>
                        </div>
                        {error_line(Field::Day)}
                        {error_line(Field::Month)}
                        {error_line(Field::Year)}
                        {error_line(Field::Date)}
                    </div>

                    <button type="submit" class="btn btn-primary celebrate-btn" aria-label="Start celebration">
                        {"🎉 Start My Celebration! 🎂"}
                    </button>
                </form>
            </div>
        </div>
    }
}
