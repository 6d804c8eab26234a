/// Time-driven enemy creation and the per-tier dispatch table.
///
/// The host calls `compute::spawn_enemy` every `SPAWN_INTERVAL_MS` of wall
/// time; this module decides what that call produces.

use log::debug;
use rand::Rng;

use crate::entities::{Enemy, ItemKind, Rgb, Tier};
use crate::geometry::Vec2;
use crate::particles::ExplosionOptions;

pub const SPAWN_INTERVAL_MS: u64 = 500;
/// Every Nth spawn is a boss.
pub const BOSS_EVERY: u32 = 50;
pub const ELITE_CHANCE: f64 = 0.2;

pub const ENEMY_RADIUS: f64 = 10.0;
pub const ENEMY_SPEED: f64 = 2.0;
pub const ENEMY_DRIFT: f64 = 0.2;
pub const ENEMY_TURN_DROP: f64 = 20.0;
/// Gap between the spawn origin and the top-right corner, beyond the radius.
const SPAWN_INSET: f64 = 2.0;

// ── Tier table ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitPoints {
    Fixed(i32),
    /// Uniform over `[min, max)`.
    Uniform(i32, i32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropRule {
    Always(ItemKind),
    Chance(ItemKind, f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierProfile {
    pub hit_points: HitPoints,
    pub body_color: Rgb,
    pub explosion: ExplosionOptions,
    pub drop: DropRule,
    /// Boss kills pulse the whole screen.
    pub kill_flash: bool,
}

pub fn profile(tier: Tier) -> TierProfile {
    match tier {
        Tier::Normal => TierProfile {
            hit_points: HitPoints::Fixed(100),
            body_color: Rgb(0xff, 0x00, 0x00),
            explosion: ExplosionOptions::NORMAL_DEATH,
            drop: DropRule::Chance(ItemKind::AttackBoost, 0.15),
            kill_flash: false,
        },
        Tier::Elite => TierProfile {
            hit_points: HitPoints::Uniform(400, 1200),
            body_color: Rgb(0xcc, 0x33, 0x33),
            explosion: ExplosionOptions::ELITE_DEATH,
            drop: DropRule::Chance(ItemKind::AttackBoost, 0.15),
            kill_flash: false,
        },
        Tier::Boss => TierProfile {
            hit_points: HitPoints::Fixed(1000),
            body_color: Rgb(0x33, 0x99, 0xff),
            explosion: ExplosionOptions::BOSS_DEATH,
            drop: DropRule::Always(ItemKind::AutoFireUnlock),
            kill_flash: true,
        },
    }
}

impl HitPoints {
    pub fn roll(self, rng: &mut impl Rng) -> i32 {
        match self {
            HitPoints::Fixed(hp) => hp,
            HitPoints::Uniform(min, max) => rng.gen_range(min..max),
        }
    }
}

impl DropRule {
    /// Which item, if any, a death under this rule leaves behind.
    pub fn roll(self, rng: &mut impl Rng) -> Option<ItemKind> {
        match self {
            DropRule::Always(kind) => Some(kind),
            DropRule::Chance(kind, p) => rng.gen_bool(p).then_some(kind),
        }
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Tier of the spawn numbered `count` (1-based).
pub fn pick_tier(count: u32, rng: &mut impl Rng) -> Tier {
    if count % BOSS_EVERY == 0 {
        Tier::Boss
    } else if rng.gen_bool(ELITE_CHANCE) {
        Tier::Elite
    } else {
        Tier::Normal
    }
}

pub fn spawn_origin(width: f64) -> Vec2 {
    Vec2::new(
        width - ENEMY_RADIUS - SPAWN_INSET,
        ENEMY_RADIUS + SPAWN_INSET,
    )
}

/// Build the enemy for spawn number `count`.
pub fn make_enemy(count: u32, width: f64, rng: &mut impl Rng) -> Enemy {
    let tier = pick_tier(count, rng);
    let hp = profile(tier).hit_points.roll(rng);
    if tier == Tier::Boss {
        debug!("spawn #{count}: boss with {hp} hp");
    }
    Enemy {
        pos: spawn_origin(width),
        radius: ENEMY_RADIUS,
        speed: ENEMY_SPEED,
        dir_x: -1.0,
        drift: ENEMY_DRIFT,
        turn_drop: ENEMY_TURN_DROP,
        hp,
        tier,
    }
}
