use gloo::timers::callback::Timeout;
use shared::scene::ConfettiPiece;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfettiProps {
    pub count: usize,
    pub duration_ms: u32,
}

/// One burst of falling confetti, removed after `duration_ms`
#[function_component(Confetti)]
pub fn confetti(props: &ConfettiProps) -> Html {
    let pieces = use_state(Vec::<ConfettiPiece>::new);

    {
        let pieces = pieces.clone();
        use_effect_with((props.count, props.duration_ms), move |(count, duration_ms)| {
            pieces.set(ConfettiPiece::scatter(*count, js_sys::Math::random));

            let clear = pieces.clone();
            let timeout = Timeout::new(*duration_ms, move || clear.set(Vec::new()));
            move || drop(timeout)
        });
    }

    html! {
        <div class="confetti" aria-hidden="true">
            {for pieces.iter().map(|piece| html! {
                <div class="confetti-piece" style={piece.style()}></div>
            })}
        </div>
    }
}
