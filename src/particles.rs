/// Explosion particles: batch spawning, per-frame aging and fade curve.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{ItemKind, Particle, ParticleShape, Rgb};
use crate::geometry::Vec2;

// ── Palettes ──────────────────────────────────────────────────────────────────

pub const PALETTE_DEFAULT: &[Rgb] = &[
    Rgb(0xff, 0xff, 0xff),
    Rgb(0xff, 0xd1, 0x66),
    Rgb(0xef, 0x47, 0x6f),
    Rgb(0x06, 0xd6, 0xa0),
    Rgb(0x11, 0x8a, 0xb2),
];
pub const PALETTE_BOSS: &[Rgb] = &[
    Rgb(0xcc, 0xe8, 0xff),
    Rgb(0x99, 0xd0, 0xff),
    Rgb(0x66, 0xb8, 0xff),
    Rgb(0xff, 0xff, 0xff),
];
pub const PALETTE_ENEMY: &[Rgb] = &[
    Rgb(0xff, 0x5a, 0x5a),
    Rgb(0xff, 0x9a, 0x9a),
    Rgb(0xaa, 0x2e, 0x2e),
];
pub const PALETTE_PLAYER_DEATH: &[Rgb] = &[
    Rgb(0xff, 0xff, 0xff),
    Rgb(0xff, 0xd1, 0x66),
    Rgb(0x06, 0xd6, 0xa0),
    Rgb(0x11, 0x8a, 0xb2),
    Rgb(0xef, 0x47, 0x6f),
];
pub const PALETTE_PLAYER_HIT: &[Rgb] = &[Rgb(0xff, 0x7b, 0x7b), Rgb(0xff, 0xb3, 0xb3)];
pub const PALETTE_AUTO_FIRE: &[Rgb] = &[Rgb(0xbc, 0xdc, 0xff), Rgb(0xe1, 0xf0, 0xff)];
pub const PALETTE_ATTACK_BOOST: &[Rgb] = &[Rgb(0xbb, 0xe6, 0x7f), Rgb(0xd7, 0xff, 0x9a)];

/// Largest random upward kick added to a particle's initial velocity.
const UPWARD_BIAS: f64 = 1.5;
/// Probability that a particle is drawn filled rather than outlined.
const FILL_CHANCE: f64 = 0.6;
/// Frames over which a standard / faint particle fades to transparent.
const FADE_FRAMES: f64 = 50.0;
const FADE_FRAMES_FAINT: f64 = 30.0;

const SHAPES: [ParticleShape; 3] = [ParticleShape::Circle, ParticleShape::Square, ParticleShape::Star];

// ── Explosion profiles ────────────────────────────────────────────────────────

/// Parameters of one explosion burst.  Ranges are `(min, max)`; the
/// lifetime range is inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionOptions {
    pub count: usize,
    pub speed: (f64, f64),
    pub gravity: f64,
    pub life: (i32, i32),
    pub size: (f64, f64),
    pub palette: &'static [Rgb],
    pub faint: bool,
}

impl Default for ExplosionOptions {
    fn default() -> Self {
        ExplosionOptions {
            count: 30,
            speed: (1.5, 4.0),
            gravity: 0.35,
            life: (30, 60),
            size: (2.0, 5.0),
            palette: PALETTE_DEFAULT,
            faint: false,
        }
    }
}

impl ExplosionOptions {
    pub const BOSS_DEATH: ExplosionOptions = ExplosionOptions {
        count: 90,
        speed: (2.5, 6.0),
        gravity: 0.4,
        life: (45, 90),
        size: (2.0, 6.0),
        palette: PALETTE_BOSS,
        faint: false,
    };

    pub const NORMAL_DEATH: ExplosionOptions = ExplosionOptions {
        count: 16,
        speed: (1.2, 3.0),
        gravity: 0.35,
        life: (25, 45),
        size: (1.5, 3.5),
        palette: PALETTE_ENEMY,
        faint: true,
    };

    pub const ELITE_DEATH: ExplosionOptions = ExplosionOptions {
        count: 22,
        ..ExplosionOptions::NORMAL_DEATH
    };

    pub const PLAYER_DEATH: ExplosionOptions = ExplosionOptions {
        count: 80,
        speed: (2.0, 6.0),
        gravity: 0.4,
        life: (40, 80),
        size: (2.0, 6.0),
        palette: PALETTE_PLAYER_DEATH,
        faint: false,
    };

    pub const PLAYER_HIT: ExplosionOptions = ExplosionOptions {
        count: 12,
        speed: (1.0, 2.5),
        gravity: 0.35,
        life: (18, 30),
        size: (1.5, 3.0),
        palette: PALETTE_PLAYER_HIT,
        faint: true,
    };

    pub fn item_pickup(kind: ItemKind) -> ExplosionOptions {
        ExplosionOptions {
            count: 10,
            speed: (1.0, 2.5),
            gravity: 0.3,
            life: (18, 30),
            size: (1.5, 3.0),
            palette: match kind {
                ItemKind::AutoFireUnlock => PALETTE_AUTO_FIRE,
                ItemKind::AttackBoost => PALETTE_ATTACK_BOOST,
            },
            faint: true,
        }
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

fn lerp_random(rng: &mut impl Rng, (min, max): (f64, f64)) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}

/// Push `opts.count` freshly sampled particles at `origin`.
pub fn create_explosion(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    opts: &ExplosionOptions,
    rng: &mut impl Rng,
) {
    particles.reserve(opts.count);
    for _ in 0..opts.count {
        let angle = rng.gen::<f64>() * std::f64::consts::TAU;
        let speed = lerp_random(rng, opts.speed);
        let mut vel = Vec2::from_angle(angle, speed);
        vel.y -= rng.gen::<f64>() * UPWARD_BIAS;

        let (life_min, life_max) = opts.life;
        let life = if life_max > life_min {
            rng.gen_range(life_min..=life_max)
        } else {
            life_min
        };

        particles.push(Particle {
            pos: origin,
            vel,
            gravity: opts.gravity,
            life,
            size: lerp_random(rng, opts.size),
            color: opts.palette.choose(rng).copied().unwrap_or(Rgb::WHITE),
            shape: SHAPES[rng.gen_range(0..SHAPES.len())],
            fill: rng.gen_bool(FILL_CHANCE),
            faint: opts.faint,
        });
    }
}

// ── Aging ─────────────────────────────────────────────────────────────────────

/// Integrate one frame of motion and drop particles whose lifetime ran out.
pub fn age_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.vel.y += p.gravity;
        p.pos = p.pos.add(p.vel);
        p.life -= 1;
    }
    particles.retain(|p| p.life > 0);
}

/// Draw opacity in `[0, 1]`.
pub fn opacity(p: &Particle) -> f64 {
    let frames = if p.faint { FADE_FRAMES_FAINT } else { FADE_FRAMES };
    (p.life as f64 / frames).clamp(0.0, 1.0)
}
