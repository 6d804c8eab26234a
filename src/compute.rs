/// Frame controller: builds the starting state, applies commands and
/// advances the simulation.
///
/// State transitions never mutate their argument.  `fire_projectile`,
/// `adjust_attack`, `spawn_enemy`, `tick` and friends clone the incoming
/// `GameState` and return the updated copy; `restart_due` only inspects it.
/// Time arrives as a host-supplied millisecond timestamp and randomness
/// through an injected `Rng`.

use log::info;
use rand::Rng;

use crate::combat;
use crate::entities::{Feedback, GameState, GameStatus, Player, Projectile};
use crate::geometry::Vec2;
use crate::input::{Command, InputState};
use crate::movement::{self, player_rest_y};
use crate::particles;
use crate::spawner;

pub const PLAYER_RADIUS: f64 = 15.0;
pub const PLAYER_SPEED: f64 = 3.0;
pub const START_LIFE: u32 = 3;
pub const START_ATTACK_POWER: u32 = 15;

pub const PROJECTILE_RADIUS: f64 = 3.0;
pub const PROJECTILE_SPEED: f64 = 8.0;

/// Delay between entering GameOver and the host's restart action.
pub const RESTART_DELAY_MS: u64 = 1200;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a playfield of the given size.
pub fn init_state(width: f64, height: f64) -> GameState {
    GameState {
        player: Player {
            pos: Vec2::new(width / 2.0, player_rest_y(height, PLAYER_RADIUS)),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            life: START_LIFE,
            attack_power: START_ATTACK_POWER,
            auto_fire: false,
        },
        enemies: Vec::new(),
        projectiles: Vec::new(),
        items: Vec::new(),
        particles: Vec::new(),
        feedback: Feedback::default(),
        status: GameStatus::Playing,
        spawn_count: 0,
        last_fire: 0,
        restart_at: None,
        events: Vec::new(),
        frame: 0,
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

fn push_projectile(state: &mut GameState, now: u64) {
    let p = &state.player;
    state.projectiles.push(Projectile {
        pos: Vec2::new(p.pos.x, p.pos.y - p.radius),
        radius: PROJECTILE_RADIUS,
        speed: PROJECTILE_SPEED,
    });
    state.last_fire = now;
}

/// Launch one projectile from the player's nose.  Ignored once the game is
/// over.
pub fn fire_projectile(state: &GameState, now: u64) -> GameState {
    let mut next = state.clone();
    if next.status == GameStatus::Playing {
        push_projectile(&mut next, now);
    }
    next
}

/// Debug adjustment of attack power, floored at zero.  Applies in any mode.
pub fn adjust_attack(state: &GameState, delta: i32) -> GameState {
    let mut next = state.clone();
    let power = &mut next.player.attack_power;
    *power = if delta >= 0 {
        power.saturating_add(delta.unsigned_abs())
    } else {
        power.saturating_sub(delta.unsigned_abs())
    };
    next
}

/// Apply a one-shot command produced by `InputState::key_down`.
pub fn apply_command(state: &GameState, command: Command, now: u64) -> GameState {
    match command {
        Command::Fire => fire_projectile(state, now),
        Command::AdjustAttack(delta) => adjust_attack(state, delta),
    }
}

// ── Spawner & restart ────────────────────────────────────────────────────────

/// One spawner invocation: bump the counter and add one enemy at the spawn
/// origin.  Does nothing once the game is over.
pub fn spawn_enemy(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    if next.status == GameStatus::GameOver {
        return next;
    }
    next.spawn_count += 1;
    let enemy = spawner::make_enemy(next.spawn_count, next.width, rng);
    next.enemies.push(enemy);
    next
}

pub fn restart_due(state: &GameState, now: u64) -> bool {
    matches!(state.restart_at, Some(at) if now >= at)
}

pub fn cancel_restart(state: &GameState) -> GameState {
    GameState {
        restart_at: None,
        ..state.clone()
    }
}

/// Fresh game on the same playfield.  Nothing carries over.
pub fn restart(state: &GameState) -> GameState {
    info!("restarting after game over (spawned {} enemies)", state.spawn_count);
    init_state(state.width, state.height)
}

// ── Per-frame tick (RNG injected) ─────────────────────────────────────────────

/// Advance the simulation by one frame at host time `now` (milliseconds).
pub fn tick(state: &GameState, input: &InputState, now: u64, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.frame += 1;
    next.events.clear();

    next.feedback.expire(now);

    if next.status == GameStatus::GameOver {
        particles::age_particles(&mut next.particles);
        return next;
    }

    // ── 1. Movement & AI ─────────────────────────────────────────────────────
    let (width, height) = (next.width, next.height);
    movement::move_player(&mut next.player, input, width, height);
    movement::move_enemies(&mut next.enemies, width);
    movement::move_projectiles(&mut next.projectiles);
    movement::move_items(&mut next.items);
    if movement::auto_fire_due(&next, input, now) {
        push_projectile(&mut next, now);
    }
    movement::cull_projectiles(&mut next.projectiles);

    // ── 2. Collisions, damage, drops ─────────────────────────────────────────
    let player_died = combat::resolve(&mut next, now, rng);

    // ── 3. Effects ───────────────────────────────────────────────────────────
    // The death frame ends at the collision pass; the burst first moves next tick.
    if !player_died {
        particles::age_particles(&mut next.particles);
    }

    // ── 4. Status ────────────────────────────────────────────────────────────
    if state.player.life > 0 && next.player.life == 0 {
        next.status = GameStatus::GameOver;
        next.restart_at = Some(now + RESTART_DELAY_MS);
        info!(
            "game over on frame {} (attack {}, auto-fire {})",
            next.frame, next.player.attack_power, next.player.auto_fire
        );
    }

    next
}
