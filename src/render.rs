/// Frame composition over an abstract drawing surface.
///
/// The simulation never depends on what gets drawn; a host implements
/// `Surface` for its back end and calls `draw_frame` once per refresh.

use crate::entities::{GameState, ItemKind, Particle, ParticleShape, Rgb};
use crate::geometry::Vec2;
use crate::particles::opacity;
use crate::spawner::profile;

const C_PLAYER: Rgb = Rgb(0x00, 0xff, 0x00);
const C_PROJECTILE: Rgb = Rgb::WHITE;
const C_HUD: Rgb = Rgb(0xdd, 0xdd, 0xdd);
const C_ITEM_AUTO_FIRE: Rgb = Rgb(0x99, 0xcc, 0xff);
const C_ITEM_ATTACK: Rgb = Rgb(0xbb, 0xee, 0x66);

const HUD_ORIGIN: Vec2 = Vec2::new(10.0, 22.0);
const STAR_SPIKES: usize = 5;
const STAR_INNER_RATIO: f64 = 0.5;

/// Primitive draw calls.  Sizes and positions are in playfield units;
/// `alpha` is in `[0, 1]`.
pub trait Surface {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgb, alpha: f64);
    fn stroke_circle(&mut self, center: Vec2, radius: f64, color: Rgb, alpha: f64);
    /// Square of edge `size` centred on `center`, rotated by `rotation` radians.
    fn fill_rect(&mut self, center: Vec2, size: f64, rotation: f64, color: Rgb, alpha: f64);
    fn stroke_rect(&mut self, center: Vec2, size: f64, color: Rgb, alpha: f64);
    fn fill_path(&mut self, points: &[Vec2], color: Rgb, alpha: f64);
    fn stroke_path(&mut self, points: &[Vec2], color: Rgb, alpha: f64);
    /// Left-aligned text whose baseline starts at `at`.
    fn text(&mut self, at: Vec2, text: &str, color: Rgb);
    /// Text centred on `at`, drawn with an outline.
    fn outlined_text(&mut self, at: Vec2, text: &str, fill: Rgb, outline: Rgb);
    /// Translucent overlay across the whole surface.
    fn fill_screen(&mut self, color: Rgb, alpha: f64);
}

/// Closed outline of a five-pointed star, tip up.
pub fn star_points(center: Vec2, radius: f64) -> Vec<Vec2> {
    let step = std::f64::consts::PI / STAR_SPIKES as f64;
    (0..STAR_SPIKES * 2)
        .map(|i| {
            let r = if i % 2 == 0 { radius } else { radius * STAR_INNER_RATIO };
            let angle = -std::f64::consts::FRAC_PI_2 + step * i as f64;
            center.add(Vec2::from_angle(angle, r))
        })
        .collect()
}

pub fn hud_line(state: &GameState) -> String {
    format!(
        "LIFE: {}   ATK: {}   AUTO: {}",
        state.player.life,
        state.player.attack_power,
        if state.player.auto_fire { "ON" } else { "OFF" }
    )
}

/// Render one complete frame at host time `now`.
pub fn draw_frame<S: Surface>(surface: &mut S, state: &GameState, now: u64) {
    surface.clear();

    let player = &state.player;
    let shaken = Vec2::new(player.pos.x + state.feedback.shake_offset(now), player.pos.y);
    surface.fill_circle(shaken, player.radius, C_PLAYER, 1.0);

    for p in &state.projectiles {
        surface.fill_circle(p.pos, p.radius, C_PROJECTILE, 1.0);
    }

    for e in &state.enemies {
        surface.fill_circle(e.pos, e.radius, profile(e.tier).body_color, 1.0);
        surface.outlined_text(e.pos, &e.hp.to_string(), Rgb::WHITE, Rgb::BLACK);
    }

    for item in &state.items {
        let color = match item.kind {
            ItemKind::AutoFireUnlock => C_ITEM_AUTO_FIRE,
            ItemKind::AttackBoost => C_ITEM_ATTACK,
        };
        surface.fill_rect(item.pos, item.radius, std::f64::consts::FRAC_PI_4, color, 1.0);
    }

    for p in &state.particles {
        draw_particle(surface, p);
    }

    surface.text(HUD_ORIGIN, &hud_line(state), C_HUD);

    let flash = state.feedback.flash_alpha(now);
    if flash > 0.0 {
        surface.fill_screen(Rgb::WHITE, flash);
    }
}

fn draw_particle<S: Surface>(surface: &mut S, p: &Particle) {
    let alpha = opacity(p);
    match (p.shape, p.fill) {
        (ParticleShape::Square, true) => surface.fill_rect(p.pos, p.size, 0.0, p.color, alpha),
        (ParticleShape::Square, false) => surface.stroke_rect(p.pos, p.size, p.color, alpha),
        (ParticleShape::Star, true) => surface.fill_path(&star_points(p.pos, p.size), p.color, alpha),
        (ParticleShape::Star, false) => {
            surface.stroke_path(&star_points(p.pos, p.size), p.color, alpha)
        }
        (ParticleShape::Circle, true) => surface.fill_circle(p.pos, p.size / 2.0, p.color, alpha),
        (ParticleShape::Circle, false) => {
            surface.stroke_circle(p.pos, p.size / 2.0, p.color, alpha)
        }
    }
}
