use shared::scene::Sparkle;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SparklesProps {
    pub count: usize,
    #[prop_or_else(|| AttrValue::from("#ffffff"))]
    pub color: AttrValue,
}

/// Twinkling dots behind the form. Placement is fixed for the component's lifetime.
#[function_component(Sparkles)]
pub fn sparkles(props: &SparklesProps) -> Html {
    let sparkles = use_memo(props.count, |count| Sparkle::scatter(*count, js_sys::Math::random));

    html! {
        <div class="sparkles" aria-hidden="true">
            {for sparkles.iter().map(|sparkle| html! {
                <div class="sparkle" style={sparkle.style(&props.color)}></div>
            })}
        </div>
    }
}
