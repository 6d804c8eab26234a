/// Per-entity motion rules, applied once per frame while playing.

use crate::entities::{Enemy, GameState, Item, Player, Projectile};
use crate::input::{InputState, Key};

/// Gap between the bottom of the player circle and the playfield floor.
pub const PLAYER_BOTTOM_MARGIN: f64 = 10.0;
pub const AUTO_FIRE_INTERVAL_MS: u64 = 140;

/// Fixed vertical position of a player of `radius` on a field `height` tall.
pub fn player_rest_y(height: f64, radius: f64) -> f64 {
    height - radius - PLAYER_BOTTOM_MARGIN
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Steer horizontally from held keys, clamp to the field, re-pin vertically.
pub fn move_player(player: &mut Player, input: &InputState, width: f64, height: f64) {
    if input.is_pressed(Key::Left) {
        player.pos.x -= player.speed;
    }
    if input.is_pressed(Key::Right) {
        player.pos.x += player.speed;
    }
    player.pos.x = player.pos.x.max(player.radius).min(width - player.radius);
    player.pos.y = player_rest_y(height, player.radius);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Serpentine sweep: constant drift downward, plus a turn-drop on the frame
/// the enemy reverses at an edge.
pub fn move_enemy(enemy: &mut Enemy, width: f64) {
    enemy.pos.x += enemy.speed * enemy.dir_x;
    enemy.pos.y += enemy.drift;

    let at_left = enemy.dir_x < 0.0 && enemy.pos.x <= enemy.radius;
    let at_right = enemy.dir_x > 0.0 && enemy.pos.x >= width - enemy.radius;
    if at_left || at_right {
        enemy.dir_x = -enemy.dir_x;
        enemy.pos.y += enemy.turn_drop;
    }
}

pub fn move_enemies(enemies: &mut [Enemy], width: f64) {
    for enemy in enemies {
        move_enemy(enemy, width);
    }
}

// ── Projectiles & items ───────────────────────────────────────────────────────

pub fn move_projectiles(projectiles: &mut [Projectile]) {
    for p in projectiles {
        p.pos.y -= p.speed;
    }
}

/// Drop projectiles that have fully left through the top edge.
pub fn cull_projectiles(projectiles: &mut Vec<Projectile>) {
    projectiles.retain(|p| p.pos.y + p.radius >= 0.0);
}

pub fn move_items(items: &mut [Item]) {
    for item in items {
        item.pos.y += item.speed;
    }
}

// ── Auto-fire ─────────────────────────────────────────────────────────────────

/// Rate limiter for held fire once auto-fire is unlocked.
pub fn auto_fire_due(state: &GameState, input: &InputState, now: u64) -> bool {
    input.fire_held()
        && state.player.auto_fire
        && now.saturating_sub(state.last_fire) >= AUTO_FIRE_INTERVAL_MS
}
