//! Audio-reactive celebration scene model.
//!
//! Pure per-frame math for the balloons, cake and floating particles, plus
//! the layout of the confetti and sparkle overlays. The renderer feeds in the
//! elapsed time and a normalized audio level and draws whatever comes out;
//! nothing here touches the browser. Random placement takes an injected
//! source yielding values in `[0, 1)`.

use serde::{Deserialize, Serialize};

/// Colours shared by balloons, particles and confetti
pub const PALETTE: [&str; 5] = ["#FF69B4", "#FFD700", "#00CED1", "#FF6347", "#9370DB"];

/// Whole scene sits one unit below the origin
const SCENE_OFFSET_Y: f64 = -1.0;
const CANDLE_COUNT: usize = 5;

/// Normalized audio energy in `[0, 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct AudioLevel(f64);

impl AudioLevel {
    pub const SILENT: AudioLevel = AudioLevel(0.0);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::SILENT;
        }
        AudioLevel(value.clamp(0.0, 1.0))
    }

    /// Mean of byte frequency magnitudes scaled so 128 is full energy
    pub fn from_frequency_bins(bins: &[u8]) -> Self {
        if bins.is_empty() {
            return Self::SILENT;
        }
        let sum: u32 = bins.iter().map(|&b| b as u32).sum();
        let mean = sum as f64 / bins.len() as f64;
        Self::new(mean / 128.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate about the vertical axis by `angle` radians
    pub fn rotate_y(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos + self.z * sin, self.y, self.z * cos - self.x * sin)
    }
}

/// Fixed perspective camera looking down -z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 7.0),
            fov: 50.0,
        }
    }
}

impl Camera {
    /// Pixels per world unit at the given depth, or `None` behind the camera
    pub fn scale_at(&self, point: Vec3, viewport_height: f64) -> Option<f64> {
        let depth = self.position.z - point.z;
        if depth <= 0.0 {
            return None;
        }
        let focal = (viewport_height / 2.0) / (self.fov.to_radians() / 2.0).tan();
        Some(focal / depth)
    }

    /// Project a world point to canvas pixels
    pub fn project(&self, point: Vec3, width: f64, height: f64) -> Option<(f64, f64)> {
        let scale = self.scale_at(point, height)?;
        let x = width / 2.0 + (point.x - self.position.x) * scale;
        let y = height / 2.0 - (point.y - self.position.y) * scale;
        Some((x, y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balloon {
    pub anchor: Vec3,
    pub color: &'static str,
}

pub const BALLOONS: [Balloon; 5] = [
    Balloon { anchor: Vec3::new(-1.5, 2.2, -1.0), color: PALETTE[0] },
    Balloon { anchor: Vec3::new(-0.8, 2.4, 0.0), color: PALETTE[1] },
    Balloon { anchor: Vec3::new(0.8, 2.4, 0.0), color: PALETTE[2] },
    Balloon { anchor: Vec3::new(1.5, 2.2, -1.0), color: PALETTE[3] },
    Balloon { anchor: Vec3::new(0.0, 3.2, -1.0), color: PALETTE[4] },
];

pub const BALLOON_RADIUS: f64 = 0.8;
pub const BALLOON_STRING_LENGTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalloonPose {
    pub center: Vec3,
    /// Where the string hangs to (fixed, the balloon bobs above it)
    pub string_end: Vec3,
    /// Sway about the view axis in radians
    pub tilt: f64,
    pub scale: f64,
    pub color: &'static str,
}

impl Balloon {
    pub fn pose_at(&self, elapsed: f64, level: AudioLevel) -> BalloonPose {
        let level = level.value();
        let bob = (elapsed + self.anchor.x).sin() * (0.3 + level * 0.3);

        BalloonPose {
            center: Vec3::new(self.anchor.x, self.anchor.y + bob + SCENE_OFFSET_Y, self.anchor.z),
            string_end: Vec3::new(
                self.anchor.x,
                self.anchor.y - 1.5 - BALLOON_STRING_LENGTH / 2.0 + SCENE_OFFSET_Y,
                self.anchor.z,
            ),
            tilt: (elapsed * 0.5 + self.anchor.x).sin() * 0.1,
            scale: 1.0 + level * 0.15,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CakePose {
    /// Centre of the bottom tier
    pub base: Vec3,
    /// Rotation about the vertical axis in radians
    pub sway: f64,
    pub scale: f64,
    /// Candle flame positions after sway and scale
    pub flames: Vec<Vec3>,
    /// Flame emissive intensity
    pub flame_glow: f64,
}

pub const CAKE_BOTTOM_TIER: (f64, f64) = (2.5, 1.0);
pub const CAKE_TOP_TIER: (f64, f64) = (2.0, 0.5);

pub fn cake_pose(elapsed: f64, level: AudioLevel) -> CakePose {
    let level = level.value();
    let base = Vec3::new(0.0, -0.5 + SCENE_OFFSET_Y, 0.0);
    let sway = (elapsed * 0.5).sin() * 0.1;
    let scale = 1.0 + level * 0.1;

    let flames = (0..CANDLE_COUNT)
        .map(|i| {
            let local = Vec3::new(i as f64 * 0.5 - 1.0, 1.7, 0.0).rotate_y(sway);
            Vec3::new(base.x + local.x * scale, base.y + local.y * scale, base.z + local.z * scale)
        })
        .collect();

    CakePose {
        base,
        sway,
        scale,
        flames,
        flame_glow: 0.5 + level * 0.7,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub home: Vec3,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticlePose {
    pub position: Vec3,
    pub spin: f64,
    pub scale: f64,
    pub glow: f64,
    pub color: &'static str,
}

/// Cloud of small glowing spheres drifting around the cake
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn scatter(count: usize, mut random: impl FnMut() -> f64) -> Self {
        let particles = (0..count)
            .map(|i| Particle {
                home: Vec3::new((random() - 0.5) * 6.0, (random() - 0.5) * 5.0, (random() - 0.5) * 6.0),
                color: PALETTE[i % PALETTE.len()],
            })
            .collect();
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Field rotation angle at `elapsed` seconds
    pub fn rotation_at(elapsed: f64) -> f64 {
        elapsed * 0.1
    }

    pub fn poses_at(&self, elapsed: f64, level: AudioLevel) -> Vec<ParticlePose> {
        let level = level.value();
        let rotation = Self::rotation_at(elapsed);

        self.particles
            .iter()
            .enumerate()
            .map(|(i, particle)| {
                let phase = elapsed + i as f64;
                // Bob replaces the home height entirely
                let bob = phase.sin() * (0.5 + level * 0.4);
                let local = Vec3::new(particle.home.x, bob, particle.home.z).rotate_y(rotation);

                ParticlePose {
                    position: Vec3::new(local.x, local.y + SCENE_OFFSET_Y, local.z),
                    spin: phase,
                    scale: 1.0 + level * 0.2,
                    glow: 0.3 + level * 0.3,
                    color: particle.color,
                }
            })
            .collect()
    }
}

/// Font sizes for the two title lines, in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitlePose {
    pub headline_position: Vec3,
    pub headline_size: f64,
    pub name_position: Vec3,
    pub name_size: f64,
}

pub fn title_pose(level: AudioLevel) -> TitlePose {
    let level = level.value();
    TitlePose {
        headline_position: Vec3::new(0.0, 3.0 + SCENE_OFFSET_Y, 0.0),
        headline_size: 1.2 + level * 0.15,
        name_position: Vec3::new(0.0, 1.5 + SCENE_OFFSET_Y, 0.0),
        name_size: 0.8 + level * 0.1,
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub level: AudioLevel,
    pub balloons: Vec<BalloonPose>,
    pub cake: CakePose,
    pub particles: Vec<ParticlePose>,
    pub title: TitlePose,
}

impl SceneFrame {
    pub fn compute(elapsed: f64, level: AudioLevel, particles: &ParticleField) -> Self {
        Self {
            level,
            balloons: BALLOONS.iter().map(|b| b.pose_at(elapsed, level)).collect(),
            cake: cake_pose(elapsed, level),
            particles: particles.poses_at(elapsed, level),
            title: title_pose(level),
        }
    }
}

/// One falling confetti strip, animated by CSS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfettiPiece {
    pub color: String,
    /// Horizontal start position, percent of the container width
    pub left_percent: f64,
    pub fall_secs: f64,
    pub delay_secs: f64,
}

impl ConfettiPiece {
    pub fn scatter(count: usize, mut random: impl FnMut() -> f64) -> Vec<Self> {
        (0..count)
            .map(|_| {
                let index = ((random() * PALETTE.len() as f64) as usize).min(PALETTE.len() - 1);
                ConfettiPiece {
                    color: PALETTE[index].to_string(),
                    left_percent: random() * 100.0,
                    fall_secs: 2.0 + random() * 3.0,
                    delay_secs: random(),
                }
            })
            .collect()
    }

    /// Inline style for the piece's element
    pub fn style(&self) -> String {
        format!(
            "background-color: {}; left: {:.2}%; animation-duration: {:.2}s; animation-delay: {:.2}s;",
            self.color, self.left_percent, self.fall_secs, self.delay_secs
        )
    }
}

/// One twinkling dot in the form background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sparkle {
    pub left_percent: f64,
    pub top_percent: f64,
    pub delay_secs: f64,
}

impl Sparkle {
    pub fn scatter(count: usize, mut random: impl FnMut() -> f64) -> Vec<Self> {
        (0..count)
            .map(|_| Sparkle {
                left_percent: random() * 100.0,
                top_percent: random() * 100.0,
                delay_secs: random() * 3.0,
            })
            .collect()
    }

    pub fn style(&self, color: &str) -> String {
        format!(
            "left: {:.2}%; top: {:.2}%; background-color: {}; animation-delay: {:.2}s;",
            self.left_percent, self.top_percent, color, self.delay_secs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    /// Deterministic stand-in for Math.random
    fn sequence(values: &'static [f64]) -> impl FnMut() -> f64 {
        let mut index = 0;
        move || {
            let value = values[index % values.len()];
            index += 1;
            value
        }
    }

    #[test]
    fn test_audio_level_from_bins() {
        assert_eq!(AudioLevel::from_frequency_bins(&[]), AudioLevel::SILENT);
        assert_eq!(AudioLevel::from_frequency_bins(&[0, 0, 0]).value(), 0.0);
        assert!((AudioLevel::from_frequency_bins(&[64, 64]).value() - 0.5).abs() < EPSILON);
        // Loud input would exceed 1.0 unclamped
        assert_eq!(AudioLevel::from_frequency_bins(&[255, 255]).value(), 1.0);
    }

    #[test]
    fn test_audio_level_clamps() {
        assert_eq!(AudioLevel::new(-0.5).value(), 0.0);
        assert_eq!(AudioLevel::new(3.0).value(), 1.0);
        assert_eq!(AudioLevel::new(f64::NAN), AudioLevel::SILENT);
    }

    #[test]
    fn test_balloon_at_rest_when_silent() {
        let balloon = BALLOONS[4];
        let pose = balloon.pose_at(0.0, AudioLevel::SILENT);

        // anchor.x is 0 so sin(0) = 0: no bob, no tilt
        assert!((pose.center.y - (3.2 - 1.0)).abs() < EPSILON);
        assert!(pose.tilt.abs() < EPSILON);
        assert_eq!(pose.scale, 1.0);
        assert_eq!(pose.color, "#9370DB");
    }

    #[test]
    fn test_balloon_grows_with_level() {
        let quiet = BALLOONS[0].pose_at(1.0, AudioLevel::new(0.0));
        let loud = BALLOONS[0].pose_at(1.0, AudioLevel::new(1.0));

        assert!((loud.scale - 1.15).abs() < EPSILON);
        let quiet_bob = (quiet.center.y - (2.2 - 1.0)).abs();
        let loud_bob = (loud.center.y - (2.2 - 1.0)).abs();
        assert!((loud_bob - quiet_bob * 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_cake_pose() {
        let pose = cake_pose(0.0, AudioLevel::new(1.0));

        assert_eq!(pose.flames.len(), 5);
        assert!(pose.sway.abs() < EPSILON);
        assert!((pose.scale - 1.1).abs() < EPSILON);
        assert!((pose.flame_glow - 1.2).abs() < EPSILON);
        // Candles spaced half a unit apart, scaled with the cake
        assert!((pose.flames[0].x - (-1.1)).abs() < EPSILON);
        assert!((pose.flames[4].x - 1.1).abs() < EPSILON);
    }

    #[test]
    fn test_particle_scatter_and_colors() {
        let field = ParticleField::scatter(7, sequence(&[0.0, 0.5, 1.0]));

        assert_eq!(field.len(), 7);
        let poses = field.poses_at(0.0, AudioLevel::SILENT);
        assert_eq!(poses[0].color, PALETTE[0]);
        assert_eq!(poses[5].color, PALETTE[0]);
        assert_eq!(poses[6].color, PALETTE[1]);
        // First particle: x = (0.0 - 0.5) * 6, bob sin(0) = 0, no rotation yet
        assert!((poses[0].position.x - (-3.0)).abs() < EPSILON);
        assert!((poses[0].position.y - SCENE_OFFSET_Y).abs() < EPSILON);
        assert!((poses[0].glow - 0.3).abs() < EPSILON);
    }

    #[test]
    fn test_particle_field_rotates() {
        let field = ParticleField::scatter(1, sequence(&[1.0, 0.5, 0.5]));
        let elapsed = std::f64::consts::PI * 5.0; // quarter turn at 0.1 rad/s
        let pose = field.poses_at(elapsed, AudioLevel::SILENT)[0];

        assert!(pose.position.x.abs() < 1e-6);
        assert!((pose.position.z - (-3.0)).abs() < 1e-6);
    }

    #[test]
    fn test_title_sizes() {
        let title = title_pose(AudioLevel::new(1.0));
        assert!((title.headline_size - 1.35).abs() < EPSILON);
        assert!((title.name_size - 0.9).abs() < EPSILON);
    }

    #[test]
    fn test_frame_bundles_everything() {
        let field = ParticleField::scatter(15, sequence(&[0.25, 0.75]));
        let frame = SceneFrame::compute(2.5, AudioLevel::new(0.4), &field);

        assert_eq!(frame.balloons.len(), 5);
        assert_eq!(frame.particles.len(), 15);
        assert_eq!(frame.level.value(), 0.4);
    }

    #[test]
    fn test_camera_projection() {
        let camera = Camera::default();

        let (x, y) = camera.project(Vec3::new(0.0, 2.0, 0.0), 800.0, 600.0).unwrap();
        assert!((x - 400.0).abs() < EPSILON);
        assert!((y - 300.0).abs() < EPSILON);

        // Higher points land higher on screen, nearer points spread wider
        let (_, high) = camera.project(Vec3::new(0.0, 3.0, 0.0), 800.0, 600.0).unwrap();
        assert!(high < 300.0);
        let far = camera.scale_at(Vec3::new(0.0, 0.0, -1.0), 600.0).unwrap();
        let near = camera.scale_at(Vec3::new(0.0, 0.0, 1.0), 600.0).unwrap();
        assert!(near > far);

        assert!(camera.project(Vec3::new(0.0, 0.0, 8.0), 800.0, 600.0).is_none());
    }

    #[test]
    fn test_confetti_ranges() {
        let pieces = ConfettiPiece::scatter(4, sequence(&[0.0, 0.999, 0.5, 0.25]));

        assert_eq!(pieces.len(), 4);
        for piece in &pieces {
            assert!(PALETTE.contains(&piece.color.as_str()));
            assert!((0.0..=100.0).contains(&piece.left_percent));
            assert!((2.0..=5.0).contains(&piece.fall_secs));
            assert!((0.0..=1.0).contains(&piece.delay_secs));
        }
        assert!(pieces[0].style().starts_with("background-color: #FF69B4;"));
    }

    #[test]
    fn test_sparkle_style() {
        let sparkles = Sparkle::scatter(1, sequence(&[0.5, 0.25, 0.5]));
        assert_eq!(
            sparkles[0].style("#fff"),
            "left: 50.00%; top: 25.00%; background-color: #fff; animation-delay: 1.50s;"
        );
    }
}
