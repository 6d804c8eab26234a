/// Simulation entities and the master frame state. Plain data.

use crate::geometry::Vec2;

// ── Tags ──────────────────────────────────────────────────────────────────────

/// Enemy classification, fixed at spawn.  Drives hit points, explosion
/// profile, body colour and drop rule (see `spawner::profile`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Normal,
    Elite,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Raises attack power by `compute::ATTACK_BOOST`.
    AttackBoost,
    /// Unlocks held-fire auto-fire.  Dropped only by bosses.
    AutoFireUnlock,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleShape {
    Circle,
    Square,
    Star,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// 24-bit colour.  Renderer-agnostic; hosts convert as they see fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f64,
    pub speed: f64,
    pub life: u32,
    pub attack_power: u32,
    pub auto_fire: bool,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f64,
    /// Horizontal speed per frame.
    pub speed: f64,
    /// −1.0 (leftward) or 1.0 (rightward).
    pub dir_x: f64,
    /// Continuous downward drift per frame.
    pub drift: f64,
    /// Extra descent applied on the frame the enemy turns at an edge.
    pub turn_drop: f64,
    pub hp: i32,
    pub tier: Tier,
}

// ── Projectiles & items ───────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Vec2,
    pub radius: f64,
    /// Upward speed per frame.
    pub speed: f64,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub pos: Vec2,
    /// Downward speed per frame.
    pub speed: f64,
    pub radius: f64,
    pub kind: ItemKind,
}

// ── Effects ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub gravity: f64,
    /// Remaining frames.
    pub life: i32,
    pub size: f64,
    pub color: Rgb,
    pub shape: ParticleShape,
    pub fill: bool,
    /// Faint particles fade out over 30 frames instead of 50.
    pub faint: bool,
}

/// Advisory visual timers, read by rendering only.  Timestamps are host
/// milliseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feedback {
    pub shake_until: Option<u64>,
    pub flash_start: Option<u64>,
}

/// Something notable that happened during the last `tick`.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    EnemyHit { tier: Tier, hp_left: i32 },
    EnemyKilled { tier: Tier, at: Vec2 },
    ItemDropped { kind: ItemKind },
    ItemPicked { kind: ItemKind },
    PlayerHit { life_left: u32 },
    PlayerDied,
    EnemyEscaped { tier: Tier },
    Explosion { at: Vec2, count: usize },
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub items: Vec<Item>,
    pub particles: Vec<Particle>,
    pub feedback: Feedback,
    pub status: GameStatus,
    /// Number of spawner invocations that produced an enemy.
    pub spawn_count: u32,
    /// Timestamp of the most recent projectile creation.
    pub last_fire: u64,
    /// Deadline for the host's restart action once the game is over.
    pub restart_at: Option<u64>,
    /// Events produced by the most recent `tick`.
    pub events: Vec<FrameEvent>,
    pub frame: u64,
    pub width: f64,
    pub height: f64,
}
