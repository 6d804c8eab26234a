use sweep_shooter::entities::Feedback;
use sweep_shooter::feedback::*;

// ── shake ─────────────────────────────────────────────────────────────────────

#[test]
fn shake_is_zero_when_idle() {
    let fb = Feedback::default();
    assert_eq!(fb.shake_offset(12_345), 0.0);
    assert_eq!(fb.shake_until, None);
}

#[test]
fn shake_decays_and_ends_after_window() {
    let t = 1000;
    let mut fb = Feedback::default();
    fb.arm_shake(t);
    assert_eq!(fb.shake_until, Some(t + SHAKE_WINDOW_MS));

    let mid = fb.shake_offset(t + 80);
    assert!(mid != 0.0);
    // half the window left → at most half the 3-unit amplitude
    assert!(mid.abs() <= 1.5);

    assert_eq!(fb.shake_offset(t + 160), 0.0);
    assert_eq!(fb.shake_offset(t + 161), 0.0);
}

#[test]
fn shake_envelope_shrinks_over_time() {
    let t = 5000;
    let mut fb = Feedback::default();
    fb.arm_shake(t);
    for dt in 0..SHAKE_WINDOW_MS {
        let envelope = 3.0 * (SHAKE_WINDOW_MS - dt) as f64 / SHAKE_WINDOW_MS as f64;
        assert!(fb.shake_offset(t + dt).abs() <= envelope + 1e-12);
    }
}

#[test]
fn rearming_shake_extends_deadline() {
    let mut fb = Feedback::default();
    fb.arm_shake(100);
    fb.arm_shake(200);
    assert_eq!(fb.shake_until, Some(360));
}

#[test]
fn expire_clears_shake() {
    let mut fb = Feedback::default();
    fb.arm_shake(0);
    fb.expire(159);
    assert!(fb.shake_until.is_some());
    fb.expire(160);
    assert_eq!(fb.shake_until, None);
}

// ── flash ─────────────────────────────────────────────────────────────────────

#[test]
fn flash_ramps_up_then_down() {
    let mut fb = Feedback::default();
    fb.arm_flash(1000);
    assert_eq!(fb.flash_alpha(1000), 0.0);
    assert_eq!(fb.flash_alpha(1025), 0.5);
    assert_eq!(fb.flash_alpha(1050), 1.0);
    assert_eq!(fb.flash_alpha(1150), 0.5);
    assert_eq!(fb.flash_alpha(1250), 0.0);
    assert_eq!(fb.flash_alpha(1300), 0.0);
}

#[test]
fn flash_is_zero_without_start() {
    assert_eq!(Feedback::default().flash_alpha(50), 0.0);
}

#[test]
fn flash_clears_only_after_full_duration() {
    let mut fb = Feedback::default();
    fb.arm_flash(0);
    fb.expire(FLASH_TOTAL_MS);
    assert_eq!(fb.flash_start, Some(0));
    fb.expire(FLASH_TOTAL_MS + 1);
    assert_eq!(fb.flash_start, None);
}

#[test]
fn shake_and_flash_are_independent() {
    let mut fb = Feedback::default();
    fb.arm_flash(0);
    fb.arm_shake(200);
    fb.expire(300);
    assert_eq!(fb.flash_start, None);
    assert_eq!(fb.shake_until, Some(360));
}
