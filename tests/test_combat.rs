use sweep_shooter::combat::*;
use sweep_shooter::compute::init_state;
use sweep_shooter::entities::*;
use sweep_shooter::geometry::Vec2;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    init_state(600.0, 800.0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(9)
}

fn enemy(x: f64, y: f64, hp: i32, tier: Tier) -> Enemy {
    Enemy {
        pos: Vec2::new(x, y),
        radius: 10.0,
        speed: 2.0,
        dir_x: -1.0,
        drift: 0.2,
        turn_drop: 20.0,
        hp,
        tier,
    }
}

fn shot(x: f64, y: f64) -> Projectile {
    Projectile { pos: Vec2::new(x, y), radius: 3.0, speed: 8.0 }
}

fn count<F: Fn(&FrameEvent) -> bool>(state: &GameState, f: F) -> usize {
    state.events.iter().filter(|e| f(e)).count()
}

// ── projectile × enemy ────────────────────────────────────────────────────────

#[test]
fn hit_consumes_projectile_and_applies_attack_power() {
    let mut s = make_state();
    s.enemies.push(enemy(100.0, 100.0, 100, Tier::Normal));
    s.projectiles.push(shot(100.0, 110.0));
    resolve_projectile_hits(&mut s, 0, &mut seeded_rng());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.enemies[0].hp, 85);
    assert!(s.particles.is_empty());
}

#[test]
fn near_miss_does_nothing() {
    let mut s = make_state();
    s.enemies.push(enemy(100.0, 100.0, 100, Tier::Normal));
    s.projectiles.push(shot(100.0, 113.0)); // distance == radii sum
    resolve_projectile_hits(&mut s, 0, &mut seeded_rng());
    assert_eq!(s.projectiles.len(), 1);
    assert_eq!(s.enemies[0].hp, 100);
}

#[test]
fn enemy_takes_at_most_one_projectile_per_frame() {
    let mut s = make_state();
    s.enemies.push(enemy(100.0, 100.0, 100, Tier::Normal));
    s.projectiles.push(shot(100.0, 105.0));
    s.projectiles.push(shot(100.0, 95.0));
    resolve_projectile_hits(&mut s, 0, &mut seeded_rng());
    assert_eq!(s.projectiles.len(), 1);
    assert_eq!(s.enemies[0].hp, 85);
}

#[test]
fn projectile_damages_only_one_of_overlapping_enemies() {
    let mut s = make_state();
    s.enemies.push(enemy(100.0, 100.0, 100, Tier::Normal));
    s.enemies.push(enemy(104.0, 100.0, 100, Tier::Normal));
    s.projectiles.push(shot(102.0, 100.0));
    resolve_projectile_hits(&mut s, 0, &mut seeded_rng());
    assert!(s.projectiles.is_empty());
    let total: i32 = s.enemies.iter().map(|e| e.hp).sum();
    assert_eq!(total, 185);
}

#[test]
fn zero_attack_power_still_consumes_projectile() {
    let mut s = make_state();
    s.player.attack_power = 0;
    s.enemies.push(enemy(100.0, 100.0, 100, Tier::Normal));
    s.projectiles.push(shot(100.0, 100.0));
    resolve_projectile_hits(&mut s, 0, &mut seeded_rng());
    assert!(s.projectiles.is_empty());
    assert_eq!(s.enemies[0].hp, 100);
}

#[test]
fn surviving_enemy_stays_registered() {
    let mut s = make_state();
    s.enemies.push(enemy(100.0, 100.0, 16, Tier::Normal));
    s.projectiles.push(shot(100.0, 100.0));
    resolve_projectile_hits(&mut s, 0, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].hp, 1);
    assert_eq!(count(&s, |e| matches!(e, FrameEvent::EnemyKilled { .. })), 0);
}

#[test]
fn normal_death_explodes_once_and_drops_at_most_attack_boost() {
    let mut rng = seeded_rng();
    let mut drops = 0;
    for _ in 0..400 {
        let mut s = make_state();
        s.enemies.push(enemy(100.0, 100.0, 15, Tier::Normal));
        s.projectiles.push(shot(100.0, 100.0));
        resolve_projectile_hits(&mut s, 0, &mut rng);

        assert!(s.enemies.is_empty());
        assert_eq!(count(&s, |e| matches!(e, FrameEvent::Explosion { count: 16, .. })), 1);
        assert_eq!(s.particles.len(), 16);
        assert!(s.particles.iter().all(|p| p.faint));
        assert!(s.items.len() <= 1);
        if let Some(item) = s.items.first() {
            assert_eq!(item.kind, ItemKind::AttackBoost);
            assert_eq!(item.pos, Vec2::new(100.0, 100.0));
            drops += 1;
        }
        assert_eq!(s.feedback.flash_start, None);
    }
    // 15 % of 400
    assert!((30..95).contains(&drops), "drops = {drops}");
}

#[test]
fn elite_death_uses_bigger_burst() {
    let mut s = make_state();
    s.enemies.push(enemy(100.0, 100.0, 10, Tier::Elite));
    s.projectiles.push(shot(100.0, 100.0));
    resolve_projectile_hits(&mut s, 0, &mut seeded_rng());
    assert_eq!(s.particles.len(), 22);
}

#[test]
fn boss_death_flashes_and_always_drops_auto_fire() {
    let mut s = make_state();
    s.enemies.push(enemy(200.0, 150.0, 5, Tier::Boss));
    s.projectiles.push(shot(200.0, 150.0));
    resolve_projectile_hits(&mut s, 777, &mut seeded_rng());

    assert!(s.enemies.is_empty());
    assert_eq!(s.feedback.flash_start, Some(777));
    assert_eq!(s.particles.len(), 90);
    assert_eq!(s.items.len(), 1);
    assert_eq!(s.items[0].kind, ItemKind::AutoFireUnlock);
    assert_eq!(s.items[0].radius, 9.0);
    assert!(s.events.contains(&FrameEvent::EnemyKilled { tier: Tier::Boss, at: Vec2::new(200.0, 150.0) }));
}

// ── enemy × player ────────────────────────────────────────────────────────────

#[test]
fn contact_reports_death_only_on_last_life() {
    let mut s = make_state();
    let at = s.player.pos;
    s.enemies.push(enemy(at.x, at.y, 100, Tier::Normal));
    s.enemies.push(enemy(at.x + 5.0, at.y, 100, Tier::Normal));
    s.player.life = 2;

    let died = resolve_player_contacts(&mut s, 50, &mut seeded_rng());
    assert!(died);
    assert_eq!(s.player.life, 0);
    assert!(s.enemies.is_empty());
    // one small hit burst, then the big death burst
    assert_eq!(s.particles.len(), 12 + 80);
}

#[test]
fn death_skips_remaining_passes() {
    let mut s = make_state();
    let at = s.player.pos;
    s.player.life = 1;
    s.enemies.push(enemy(at.x, at.y, 100, Tier::Normal));
    s.items.push(make_item(ItemKind::AttackBoost, at));
    assert!(resolve(&mut s, 0, &mut seeded_rng()));
    assert_eq!(s.items.len(), 1);
    assert_eq!(s.player.attack_power, 15);
}

// ── item × player ─────────────────────────────────────────────────────────────

#[test]
fn attack_boost_pickup() {
    let mut s = make_state();
    let at = s.player.pos;
    s.items.push(make_item(ItemKind::AttackBoost, Vec2::new(at.x + 10.0, at.y)));
    resolve_item_pickups(&mut s, &mut seeded_rng());
    assert!(s.items.is_empty());
    assert_eq!(s.player.attack_power, 15 + ATTACK_BOOST);
    assert_eq!(s.particles.len(), 10);
    assert!(s.events.contains(&FrameEvent::ItemPicked { kind: ItemKind::AttackBoost }));
}

#[test]
fn auto_fire_unlock_is_idempotent() {
    let mut s = make_state();
    let at = s.player.pos;
    s.items.push(make_item(ItemKind::AutoFireUnlock, at));
    s.items.push(make_item(ItemKind::AutoFireUnlock, at));
    resolve_item_pickups(&mut s, &mut seeded_rng());
    assert!(s.player.auto_fire);
    assert!(s.items.is_empty());
    assert_eq!(s.player.attack_power, 15);
}

#[test]
fn item_past_bottom_vanishes_without_effect() {
    let mut s = make_state();
    s.items.push(make_item(ItemKind::AttackBoost, Vec2::new(20.0, 808.0)));
    s.items.push(make_item(ItemKind::AttackBoost, Vec2::new(20.0, 806.0)));
    resolve_item_pickups(&mut s, &mut seeded_rng());
    assert_eq!(s.items.len(), 1);
    assert_eq!(s.items[0].pos.y, 806.0);
    assert_eq!(s.player.attack_power, 15);
    assert!(s.particles.is_empty());
}

#[test]
fn pickup_never_creates_items() {
    let mut s = make_state();
    let at = s.player.pos;
    for _ in 0..5 {
        s.items.push(make_item(ItemKind::AttackBoost, at));
    }
    resolve_item_pickups(&mut s, &mut seeded_rng());
    assert!(s.items.is_empty());
    assert_eq!(s.player.attack_power, 15 + 5 * ATTACK_BOOST);
}

// ── boundary ──────────────────────────────────────────────────────────────────

#[test]
fn only_fully_escaped_enemies_are_culled() {
    let mut s = make_state();
    s.enemies.push(enemy(50.0, 810.0, 100, Tier::Normal)); // top edge on the floor
    s.enemies.push(enemy(90.0, 811.0, 100, Tier::Boss));
    cull_escaped_enemies(&mut s);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.enemies[0].tier, Tier::Normal);
}
