use anyhow::{anyhow, Result};
use gloo::render::{request_animation_frame, AnimationFrame};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_canvas::CanvasBackend;
use shared::scene::{
    Camera, ParticleField, SceneFrame, Vec3, BALLOON_RADIUS, CAKE_BOTTOM_TIER, CAKE_TOP_TIER,
};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::services::audio::AudioHandle;
use crate::services::logging::Logger;

const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 500;

const BACKGROUND: &str = "#FFF5F8";
const CAKE_SPONGE: &str = "#8B4513";
const CAKE_ICING: &str = "#FFB6C1";
const CANDLE: &str = "#FFFF00";
const FLAME: &str = "#FF4500";
const STRING: &str = "#333333";
const HEADLINE: &str = "#FF69B4";
const NAME: &str = "#9370DB";

#[derive(Properties, PartialEq)]
pub struct SceneCanvasProps {
    pub name: AttrValue,
    pub audio: AudioHandle,
    pub particle_count: usize,
}

pub enum Msg {
    Frame(f64),
}

/// Canvas that redraws the celebration scene every animation frame
pub struct SceneCanvas {
    canvas_ref: NodeRef,
    camera: Camera,
    particles: ParticleField,
    started_at: Option<f64>,
    next_frame: Option<AnimationFrame>,
    draw_failed: bool,
}

impl Component for SceneCanvas {
    type Message = Msg;
    type Properties = SceneCanvasProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut scene = Self {
            canvas_ref: NodeRef::default(),
            camera: Camera::default(),
            particles: ParticleField::scatter(ctx.props().particle_count, js_sys::Math::random),
            started_at: None,
            next_frame: None,
            draw_failed: false,
        };
        scene.schedule(ctx);
        scene
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Frame(timestamp) => {
                let started_at = *self.started_at.get_or_insert(timestamp);
                let elapsed = (timestamp - started_at) / 1000.0;
                let level = ctx.props().audio.sample();
                let frame = SceneFrame::compute(elapsed, level, &self.particles);

                if let Err(e) = self.draw(&ctx.props().name, &frame) {
                    // Report once; the loop keeps running in case the canvas comes back
                    if !self.draw_failed {
                        Logger::warn_with_component("scene-canvas", &format!("Failed to draw scene: {:#}", e));
                        self.draw_failed = true;
                    }
                }

                self.schedule(ctx);
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().particle_count != old_props.particle_count {
            self.particles = ParticleField::scatter(ctx.props().particle_count, js_sys::Math::random);
        }
        false
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <canvas
                ref={self.canvas_ref.clone()}
                class="scene-canvas"
                width={CANVAS_WIDTH.to_string()}
                height={CANVAS_HEIGHT.to_string()}
            ></canvas>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.next_frame.take();
    }
}

impl SceneCanvas {
    fn schedule(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        self.next_frame = Some(request_animation_frame(move |timestamp| {
            link.send_message(Msg::Frame(timestamp));
        }));
    }

    fn draw(&self, name: &str, frame: &SceneFrame) -> Result<()> {
        let canvas = self
            .canvas_ref
            .cast::<HtmlCanvasElement>()
            .ok_or_else(|| anyhow!("canvas is not mounted"))?;
        let backend = CanvasBackend::with_canvas_object(canvas).ok_or_else(|| anyhow!("no 2d context"))?;
        let root = backend.into_drawing_area();
        let (width, height) = (CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        root.fill(&hex_color(BACKGROUND)).map_err(plot_error)?;

        let project = |point: Vec3| -> Option<(i32, i32)> {
            self.camera
                .project(point, width, height)
                .map(|(x, y)| (x.round() as i32, y.round() as i32))
        };
        let pixels = |point: Vec3, units: f64| -> i32 {
            self.camera
                .scale_at(point, height)
                .map(|scale| (units * scale).round() as i32)
                .unwrap_or(0)
        };

        // Particles behind the cake first
        for particle in frame.particles.iter().filter(|p| p.position.z < 0.0) {
            if let Some(center) = project(particle.position) {
                let color = hex_color(particle.color).mix(0.5 + particle.glow / 2.0);
                root.draw(&Circle::new(center, pixels(particle.position, 0.1 * particle.scale).max(1), color.filled()))
                    .map_err(plot_error)?;
            }
        }

        for balloon in &frame.balloons {
            let (Some(center), Some(string_end)) = (project(balloon.center), project(balloon.string_end)) else {
                continue;
            };
            let radius = pixels(balloon.center, BALLOON_RADIUS * balloon.scale);
            let knot = (center.0 - (balloon.tilt.sin() * radius as f64) as i32, center.1 + radius);

            root.draw(&PathElement::new(vec![knot, string_end], hex_color(STRING).stroke_width(1)))
                .map_err(plot_error)?;
            root.draw(&Circle::new(center, radius, hex_color(balloon.color).filled()))
                .map_err(plot_error)?;
        }

        let cake = &frame.cake;
        let apparent = cake.scale * cake.sway.cos();
        for (tier, center_y, color) in [
            (CAKE_BOTTOM_TIER, 0.0, CAKE_SPONGE),
            (CAKE_TOP_TIER, 0.75, CAKE_ICING),
        ] {
            let (tier_width, tier_height) = tier;
            let top_left = Vec3::new(
                cake.base.x - tier_width * apparent / 2.0,
                cake.base.y + (center_y + tier_height / 2.0) * cake.scale,
                cake.base.z,
            );
            let bottom_right = Vec3::new(
                cake.base.x + tier_width * apparent / 2.0,
                cake.base.y + (center_y - tier_height / 2.0) * cake.scale,
                cake.base.z,
            );
            if let (Some(a), Some(b)) = (project(top_left), project(bottom_right)) {
                root.draw(&Rectangle::new([a, b], hex_color(color).filled()))
                    .map_err(plot_error)?;
            }
        }

        for flame in &cake.flames {
            let wick = Vec3::new(flame.x, flame.y - 0.4 * cake.scale, flame.z);
            if let (Some(top), Some(bottom)) = (project(*flame), project(wick)) {
                root.draw(&PathElement::new(vec![top, bottom], hex_color(CANDLE).stroke_width(3)))
                    .map_err(plot_error)?;
                let glow = hex_color(FLAME).mix((cake.flame_glow / 1.2).clamp(0.3, 1.0));
                let radius = pixels(*flame, 0.05 * (1.0 + cake.flame_glow)).max(2);
                root.draw(&Circle::new(top, radius, glow.filled())).map_err(plot_error)?;
            }
        }

        for particle in frame.particles.iter().filter(|p| p.position.z >= 0.0) {
            if let Some(center) = project(particle.position) {
                let color = hex_color(particle.color).mix(0.5 + particle.glow / 2.0);
                root.draw(&Circle::new(center, pixels(particle.position, 0.1 * particle.scale).max(1), color.filled()))
                    .map_err(plot_error)?;
            }
        }

        let title = &frame.title;
        for (text, position, size, color) in [
            ("Happy Birthday!", title.headline_position, title.headline_size, HEADLINE),
            (name, title.name_position, title.name_size, NAME),
        ] {
            if let Some(anchor) = project(position) {
                let style = ("sans-serif", pixels(position, size) as f64)
                    .into_font()
                    .color(&hex_color(color))
                    .pos(Pos::new(HPos::Center, VPos::Center));
                root.draw(&Text::new(text, anchor, style)).map_err(plot_error)?;
            }
        }

        root.present().map_err(plot_error)?;
        Ok(())
    }
}

fn plot_error<E: std::fmt::Debug>(e: E) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// Parse "#RRGGBB" into a plotters colour; malformed channels read as 0
fn hex_color(hex: &str) -> RGBColor {
    let hex = hex.trim_start_matches('#');
    let channel = |start: usize| {
        hex.get(start..start + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    RGBColor(channel(0), channel(2), channel(4))
}
