//! Explosion particles, themed by command category.

use std::f32::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{IconCategory, Particle, Size, Vec2};

pub const PARTICLE_COLORS: [&str; 5] = ["#f38ba8", "#f9e2af", "#a6e3a1", "#89b4fa", "#cba6f7"];
pub const PARTICLE_MAX_LIFE: f32 = 1000.0;
/// Added to every particle's vertical velocity each tick.
pub const PARTICLE_GRAVITY: f32 = 0.1;

/// Reference frame length all velocities are expressed in.
const REFERENCE_FRAME_MS: f32 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Rightward bias.
    Directional,
    Expand,
    /// Downward bias.
    Cascade,
    Burst,
    /// Start on a ring, move inward.
    Implode,
    /// Every other particle spawns at a second random point.
    Duplicate,
    Transform,
    /// Radial with an upward kick.
    Fountain,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleColor {
    Fixed(&'static str),
    Palette,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    pub count: usize,
    pub color: ParticleColor,
    pub size: (f32, f32),
    pub speed: (f32, f32),
    pub pattern: Pattern,
    pub gravity: f32,
}

const DEFAULT_PRESET: Preset = Preset {
    count: 30,
    color: ParticleColor::Palette,
    size: (2.0, 4.0),
    speed: (1.0, 3.0),
    pattern: Pattern::Fountain,
    gravity: 0.1,
};

/// Effect preset for a category; `None` and unthemed categories get the
/// fountain default.
pub fn preset_for(category: Option<IconCategory>) -> Preset {
    use ParticleColor::Fixed;

    match category {
        Some(IconCategory::Move) => Preset {
            count: 20,
            color: Fixed("#89b4fa"),
            size: (2.0, 5.0),
            speed: (1.0, 3.0),
            pattern: Pattern::Directional,
            gravity: -0.5,
        },
        Some(IconCategory::List) => Preset {
            count: 30,
            color: Fixed("#a6e3a1"),
            size: (1.0, 3.0),
            speed: (0.5, 2.0),
            pattern: Pattern::Expand,
            gravity: 0.0,
        },
        Some(IconCategory::Print) => Preset {
            count: 25,
            color: Fixed("#cdd6f4"),
            size: (1.0, 4.0),
            speed: (1.0, 2.0),
            pattern: Pattern::Cascade,
            gravity: 0.2,
        },
        Some(IconCategory::Create) => Preset {
            count: 35,
            color: Fixed("#f9e2af"),
            size: (2.0, 4.0),
            speed: (1.0, 3.0),
            pattern: Pattern::Burst,
            gravity: -0.1,
        },
        Some(IconCategory::Delete) => Preset {
            count: 40,
            color: Fixed("#f38ba8"),
            size: (2.0, 5.0),
            speed: (2.0, 4.0),
            pattern: Pattern::Implode,
            gravity: 0.3,
        },
        Some(IconCategory::Copy) => Preset {
            count: 30,
            color: Fixed("#89dceb"),
            size: (2.0, 4.0),
            speed: (1.0, 2.5),
            pattern: Pattern::Duplicate,
            gravity: 0.0,
        },
        Some(IconCategory::Rename) => Preset {
            count: 25,
            color: Fixed("#cba6f7"),
            size: (2.0, 4.0),
            speed: (1.0, 3.0),
            pattern: Pattern::Transform,
            gravity: 0.1,
        },
        _ => DEFAULT_PRESET,
    }
}

fn lerp(range: (f32, f32), t: f32) -> f32 {
    range.0 + t * (range.1 - range.0)
}

/// Spawn an explosion over the box at `position` (top-left) of `size`.
pub fn explosion(
    position: Vec2,
    size: Size,
    category: Option<IconCategory>,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    let preset = preset_for(category);
    let center = Vec2::new(position.x + size.w / 2.0, position.y + size.h / 2.0);

    (0..preset.count)
        .map(|i| {
            let mut origin = center;
            let angle = rng.gen::<f32>() * TAU;
            let speed = lerp(preset.speed, rng.gen());

            let velocity = match preset.pattern {
                Pattern::Directional => Vec2::new(
                    speed,
                    (rng.gen::<f32>() - 0.5) * preset.speed.1,
                ),
                Pattern::Cascade => Vec2::new(
                    (rng.gen::<f32>() - 0.5) * preset.speed.1,
                    speed,
                ),
                Pattern::Implode => {
                    let distance = rng.gen::<f32>() * size.w / 2.0;
                    origin = Vec2::new(
                        center.x + angle.cos() * distance,
                        center.y + angle.sin() * distance,
                    );
                    Vec2::new(-angle.cos() * preset.speed.0, -angle.sin() * preset.speed.0)
                }
                Pattern::Duplicate => {
                    if i % 2 == 0 {
                        origin = Vec2::new(
                            position.x + rng.gen::<f32>() * size.w,
                            position.y + rng.gen::<f32>() * size.h,
                        );
                    }
                    Vec2::new(angle.cos() * speed, angle.sin() * speed)
                }
                Pattern::Fountain => Vec2::new(angle.cos() * speed, angle.sin() * speed - 2.0),
                Pattern::Expand | Pattern::Burst | Pattern::Transform => {
                    Vec2::new(angle.cos() * speed, angle.sin() * speed)
                }
            };

            let color = match preset.color {
                ParticleColor::Fixed(c) => c,
                ParticleColor::Palette => PARTICLE_COLORS
                    .choose(rng)
                    .copied()
                    .unwrap_or(PARTICLE_COLORS[0]),
            };

            Particle {
                position: origin,
                velocity,
                color,
                size: lerp(preset.size, rng.gen()),
                life: PARTICLE_MAX_LIFE * (0.5 + rng.gen::<f32>() * 0.5),
                max_life: PARTICLE_MAX_LIFE,
                gravity: preset.gravity,
            }
        })
        .collect()
}

/// Integrate one step and drop expired particles.
pub fn tick(particles: &[Particle], delta_ms: f32) -> Vec<Particle> {
    let scale = delta_ms / REFERENCE_FRAME_MS;
    particles
        .iter()
        .map(|p| {
            let vy = p.velocity.y + PARTICLE_GRAVITY + p.gravity;
            Particle {
                position: Vec2::new(p.position.x + p.velocity.x * scale, p.position.y + vy * scale),
                velocity: Vec2::new(p.velocity.x, vy),
                life: p.life - delta_ms,
                ..p.clone()
            }
        })
        .filter(|p| p.life > 0.0)
        .collect()
}
