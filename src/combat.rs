/// Collision & combat resolution.
///
/// `resolve` runs the four passes in their fixed order.  Each pass is public
/// so tests can drive it in isolation.  Registries are scanned back to front
/// so removal during a scan never skips an entry.

use log::{debug, info};
use rand::Rng;

use crate::entities::{FrameEvent, GameState, Item, ItemKind, Tier};
use crate::geometry::{circles_overlap, Vec2};
use crate::particles::{create_explosion, ExplosionOptions};
use crate::spawner::profile;

pub const ATTACK_BOOST: u32 = 3;

const ATTACK_BOOST_ITEM_SPEED: f64 = 1.8;
const ATTACK_BOOST_ITEM_RADIUS: f64 = 7.0;
const AUTO_FIRE_ITEM_SPEED: f64 = 2.0;
const AUTO_FIRE_ITEM_RADIUS: f64 = 9.0;

pub fn make_item(kind: ItemKind, pos: Vec2) -> Item {
    let (speed, radius) = match kind {
        ItemKind::AttackBoost => (ATTACK_BOOST_ITEM_SPEED, ATTACK_BOOST_ITEM_RADIUS),
        ItemKind::AutoFireUnlock => (AUTO_FIRE_ITEM_SPEED, AUTO_FIRE_ITEM_RADIUS),
    };
    Item { pos, speed, radius, kind }
}

fn explode(state: &mut GameState, at: Vec2, opts: &ExplosionOptions, rng: &mut impl Rng) {
    create_explosion(&mut state.particles, at, opts, rng);
    state.events.push(FrameEvent::Explosion { at, count: opts.count });
}

/// Run every collision pass for one frame.  Returns `true` when the player
/// died, in which case the remaining passes were skipped.
pub fn resolve(state: &mut GameState, now: u64, rng: &mut impl Rng) -> bool {
    resolve_projectile_hits(state, now, rng);
    if resolve_player_contacts(state, now, rng) {
        return true;
    }
    resolve_item_pickups(state, rng);
    cull_escaped_enemies(state);
    false
}

// ── 1. Projectile × enemy ─────────────────────────────────────────────────────

/// Each enemy consumes at most one projectile per frame.
pub fn resolve_projectile_hits(state: &mut GameState, now: u64, rng: &mut impl Rng) {
    let damage = i32::try_from(state.player.attack_power).unwrap_or(i32::MAX);

    for i in (0..state.enemies.len()).rev() {
        let enemy_pos = state.enemies[i].pos;
        let enemy_radius = state.enemies[i].radius;

        let hit = state
            .projectiles
            .iter()
            .rposition(|p| circles_overlap(enemy_pos, enemy_radius, p.pos, p.radius));
        let Some(j) = hit else {
            continue;
        };
        state.projectiles.remove(j);

        let enemy = &mut state.enemies[i];
        enemy.hp = enemy.hp.saturating_sub(damage);
        let (tier, hp_left) = (enemy.tier, enemy.hp);
        state.events.push(FrameEvent::EnemyHit { tier, hp_left });

        if hp_left <= 0 {
            kill_enemy(state, i, now, rng);
        }
    }
}

fn kill_enemy(state: &mut GameState, index: usize, now: u64, rng: &mut impl Rng) {
    let enemy = state.enemies.remove(index);
    let tier_profile = profile(enemy.tier);

    explode(state, enemy.pos, &tier_profile.explosion, rng);
    if tier_profile.kill_flash {
        state.feedback.arm_flash(now);
    }
    if let Some(kind) = tier_profile.drop.roll(rng) {
        state.items.push(make_item(kind, enemy.pos));
        state.events.push(FrameEvent::ItemDropped { kind });
    }
    state.events.push(FrameEvent::EnemyKilled { tier: enemy.tier, at: enemy.pos });

    if enemy.tier == Tier::Boss {
        info!("boss defeated at ({:.0}, {:.0})", enemy.pos.x, enemy.pos.y);
    } else {
        debug!("{:?} enemy destroyed", enemy.tier);
    }
}

// ── 2. Enemy × player ─────────────────────────────────────────────────────────

/// Returns `true` when a contact took the player's last life.
pub fn resolve_player_contacts(state: &mut GameState, now: u64, rng: &mut impl Rng) -> bool {
    for i in (0..state.enemies.len()).rev() {
        let enemy = &state.enemies[i];
        if !circles_overlap(enemy.pos, enemy.radius, state.player.pos, state.player.radius) {
            continue;
        }
        let enemy = state.enemies.remove(i);
        state.player.life = state.player.life.saturating_sub(1);

        if state.player.life == 0 {
            let at = state.player.pos;
            explode(state, at, &ExplosionOptions::PLAYER_DEATH, rng);
            state.events.push(FrameEvent::PlayerDied);
            return true;
        }

        explode(state, enemy.pos, &ExplosionOptions::PLAYER_HIT, rng);
        state.feedback.arm_shake(now);
        state.events.push(FrameEvent::PlayerHit { life_left: state.player.life });
        debug!("player hit, {} lives left", state.player.life);
    }
    false
}

// ── 3. Item × player ──────────────────────────────────────────────────────────

pub fn resolve_item_pickups(state: &mut GameState, rng: &mut impl Rng) {
    let height = state.height;
    for k in (0..state.items.len()).rev() {
        let item = &state.items[k];
        if circles_overlap(item.pos, item.radius, state.player.pos, state.player.radius) {
            let item = state.items.remove(k);
            match item.kind {
                ItemKind::AttackBoost => state.player.attack_power += ATTACK_BOOST,
                ItemKind::AutoFireUnlock => state.player.auto_fire = true,
            }
            explode(state, item.pos, &ExplosionOptions::item_pickup(item.kind), rng);
            state.events.push(FrameEvent::ItemPicked { kind: item.kind });
            debug!("picked up {:?}", item.kind);
        } else if item.pos.y - item.radius > height {
            state.items.remove(k);
        }
    }
}

// ── 4. Boundary cleanup ───────────────────────────────────────────────────────

/// Enemies that slipped past the bottom edge leave without penalty.
pub fn cull_escaped_enemies(state: &mut GameState) {
    let height = state.height;
    for i in (0..state.enemies.len()).rev() {
        let enemy = &state.enemies[i];
        if enemy.pos.y - enemy.radius > height {
            let tier = enemy.tier;
            state.enemies.remove(i);
            state.events.push(FrameEvent::EnemyEscaped { tier });
        }
    }
}
