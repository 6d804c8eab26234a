/// Hit-shake and boss-kill flash timers.
///
/// Both are advisory: gameplay never reads them, rendering does.

use crate::entities::Feedback;

pub const SHAKE_WINDOW_MS: u64 = 160;
/// Peak horizontal displacement of the shake, in playfield units.
const SHAKE_AMPLITUDE: f64 = 3.0;
/// Angular frequency of the shake, radians per millisecond.
const SHAKE_FREQUENCY: f64 = 80.0;

pub const FLASH_RISE_MS: u64 = 50;
pub const FLASH_FALL_MS: u64 = 200;
pub const FLASH_TOTAL_MS: u64 = FLASH_RISE_MS + FLASH_FALL_MS;

impl Feedback {
    pub fn arm_shake(&mut self, now: u64) {
        self.shake_until = Some(now + SHAKE_WINDOW_MS);
    }

    pub fn arm_flash(&mut self, now: u64) {
        self.flash_start = Some(now);
    }

    /// Horizontal draw offset for the player.  Decays linearly to zero over
    /// the shake window.
    pub fn shake_offset(&self, now: u64) -> f64 {
        match self.shake_until {
            Some(until) if now < until => {
                let k = (until - now) as f64 / SHAKE_WINDOW_MS as f64;
                (now as f64 * SHAKE_FREQUENCY).sin() * SHAKE_AMPLITUDE * k
            }
            _ => 0.0,
        }
    }

    /// Full-screen overlay opacity in `[0, 1]`.
    pub fn flash_alpha(&self, now: u64) -> f64 {
        let Some(start) = self.flash_start else {
            return 0.0;
        };
        let dt = now.saturating_sub(start);
        if dt <= FLASH_RISE_MS {
            dt as f64 / FLASH_RISE_MS as f64
        } else if dt <= FLASH_TOTAL_MS {
            (1.0 - (dt - FLASH_RISE_MS) as f64 / FLASH_FALL_MS as f64).max(0.0)
        } else {
            0.0
        }
    }

    /// Clear timers whose window has passed.  Run at the top of every update.
    pub fn expire(&mut self, now: u64) {
        if matches!(self.flash_start, Some(start) if now.saturating_sub(start) > FLASH_TOTAL_MS) {
            self.flash_start = None;
        }
        if matches!(self.shake_until, Some(until) if now >= until) {
            self.shake_until = None;
        }
    }
}
