use std::rc::Rc;

use gloo::timers::callback::Timeout;
use shared::{is_birthday, CelebrationConfig, CelebrationData};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlAudioElement, MouseEvent};
use yew::prelude::*;

use crate::components::confetti::Confetti;
use crate::components::scene_canvas::SceneCanvas;
use crate::services::audio::AudioHandle;
use crate::services::date_utils;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct BirthdayCelebrationProps {
    pub data: CelebrationData,
    pub config: Rc<CelebrationConfig>,
    pub on_reset: Callback<()>,
}

/// Try to start the song; blocked autoplay only logs
fn spawn_playback(element: HtmlAudioElement, audio: AudioHandle, fft_size: u32, is_playing: UseStateHandle<bool>) {
    spawn_local(async move {
        match audio.play(&element, fft_size).await {
            Ok(()) => {
                Logger::info_with_component("celebration", "Audio playback started");
                is_playing.set(true);
            }
            Err(e) => {
                Logger::warn_with_component("celebration", &format!("Audio autoplay prevented: {:#}", e));
            }
        }
    });
}

#[function_component(BirthdayCelebration)]
pub fn birthday_celebration(props: &BirthdayCelebrationProps) -> Html {
    let audio_ref = use_node_ref();
    let audio = use_state(AudioHandle::default);
    let is_muted = use_state(|| false);
    let is_playing = use_state(|| false);

    // Delayed autoplay; stop and rewind when leaving the page
    {
        let audio_ref = audio_ref.clone();
        let audio = (*audio).clone();
        let is_playing = is_playing.clone();
        let delay_ms = props.config.autoplay_delay_ms;
        let fft_size = props.config.fft_size;

        use_effect_with((), move |_| {
            let element = audio_ref.cast::<HtmlAudioElement>();

            let timeout = element.clone().map(|element| {
                Timeout::new(delay_ms, move || spawn_playback(element, audio, fft_size, is_playing))
            });

            move || {
                drop(timeout);
                if let Some(element) = element {
                    let _ = element.pause();
                    element.set_current_time(0.0);
                }
            }
        });
    }

    let on_toggle_mute = {
        let audio_ref = audio_ref.clone();
        let audio = audio.clone();
        let is_muted = is_muted.clone();
        let is_playing = is_playing.clone();
        let fft_size = props.config.fft_size;

        Callback::from(move |_: MouseEvent| {
            let Some(element) = audio_ref.cast::<HtmlAudioElement>() else {
                return;
            };
            let muted = !*is_muted;
            element.set_muted(muted);

            // The click counts as a user gesture, so playback is allowed now
            if !*is_playing {
                spawn_playback(element, (*audio).clone(), fft_size, is_playing.clone());
            }
            is_muted.set(muted);
        })
    };

    let on_back = {
        let on_reset = props.on_reset.clone();
        Callback::from(move |_: MouseEvent| on_reset.emit(()))
    };

    let on_ended = {
        let is_playing = is_playing.clone();
        Callback::from(move |_: Event| is_playing.set(false))
    };

    // Age is recomputed on every render so it rolls over at the birthday
    let today = date_utils::today();
    let headline = today.map(|today| props.data.age_headline(today));
    let birthday_today = today.is_some_and(|today| is_birthday(props.data.date_of_birth, today));

    html! {
        <div class="celebration">
            <Confetti count={props.config.confetti_count} duration_ms={props.config.confetti_duration_ms} />

            <div class="celebration-info">
                {if let Some(headline) = headline {
                    html! { <p class="celebration-age">{headline}</p> }
                } else {
                    html! {}
                }}
                <p class="celebration-born">
                    {format!("Born {}", date_utils::format_date_for_display(props.data.date_of_birth))}
                </p>
                {if birthday_today {
                    html! { <p class="celebration-greeting">{props.data.greeting()}</p> }
                } else {
                    html! {}
                }}
            </div>

            <div class="celebration-scene">
                <SceneCanvas
                    name={props.data.name.clone()}
                    audio={(*audio).clone()}
                    particle_count={props.config.particle_count}
                />
            </div>

            <div class="celebration-controls">
                <button
                    class="btn btn-mute"
                    onclick={on_toggle_mute}
                    aria-label={if *is_muted { "Unmute audio" } else { "Mute audio" }}
                >
                    {if *is_muted { "Unmute 🔊" } else { "Mute 🔇" }}
                </button>
                <button class="btn btn-back" onclick={on_back} aria-label="Go back to form">
                    {"Back"}
                </button>
            </div>

            <audio ref={audio_ref} loop=true preload="auto" crossorigin="anonymous" onended={on_ended}>
                <source src={props.config.audio_src.clone()} type="audio/mpeg" />
            </audio>
        </div>
    }
}
