mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sweep_shooter::compute::{apply_command, init_state, restart, restart_due, spawn_enemy, tick};
use sweep_shooter::config::Config;
use sweep_shooter::input::{HeldKeys, InputState, Key};
use sweep_shooter::render::draw_frame;
use sweep_shooter::spawner::SPAWN_INTERVAL_MS;

use display::TerminalSurface;

fn key_for(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(c) => {
            let mut buf = [0u8; 4];
            Key::from_identifier(c.encode_utf8(&mut buf))
        }
        _ => None,
    }
}

fn is_quit(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Per iteration: drain input events, fire the spawn timer and the restart
/// deadline if due, advance the simulation one frame, then draw.  The spawn
/// timer runs on wall time, independent of the frame rate.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cfg: &Config,
) -> std::io::Result<()> {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let clock = Instant::now();
    let frame = cfg.frame_duration();

    let mut state = init_state(cfg.width, cfg.height);
    let mut input = InputState::default();
    let mut held = HeldKeys::default();
    let mut next_spawn = SPAWN_INTERVAL_MS;

    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(cols, rows, cfg.width, cfg.height);

    loop {
        let frame_start = Instant::now();
        let now = clock.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if kind != KeyEventKind::Release && is_quit(&code, modifiers) {
                        return Ok(());
                    }
                    let Some(key) = key_for(&code) else {
                        continue;
                    };
                    match kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            if let Some(command) = held.press(&mut input, key, now) {
                                state = apply_command(&state, command, now);
                            }
                        }
                        KeyEventKind::Release => held.release(&mut input, key),
                    }
                }
                Event::Resize(cols, rows) => surface.resize(cols, rows),
                _ => {}
            }
        }

        // Release events arrive only on enhanced terminals; expiry covers the rest.
        held.expire(&mut input, now);

        // ── Timers ────────────────────────────────────────────────────────────
        if now >= next_spawn {
            state = spawn_enemy(&state, &mut rng);
            next_spawn += SPAWN_INTERVAL_MS;
            if next_spawn <= now {
                next_spawn = now + SPAWN_INTERVAL_MS;
            }
        }
        if restart_due(&state, now) {
            state = restart(&state);
        }

        state = tick(&state, &input, now, &mut rng);

        draw_frame(&mut surface, &state, now);
        display::draw_game_over(&mut surface, &state);
        display::draw_controls_hint(&mut surface);
        surface.present(out).map_err(|e| {
            error!("Failed to draw frame {}: {}", state.frame, e);
            e
        })?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let cfg = Config::parse();

    if let Err(e) = simple_logging::log_to_file(&cfg.log_file, LevelFilter::from(cfg.log_level)) {
        eprintln!("warning: cannot open log file {}: {}", cfg.log_file.display(), e);
    }
    info!(
        "Starting sweep_shooter: {}x{} playfield at {} fps, seed {:?}",
        cfg.width, cfg.height, cfg.fps, cfg.seed
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().map_err(|e| {
        error!("Failed to enable raw mode: {}", e);
        e
    })?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events where the terminal can
    // report them.  Writing the flags always succeeds, so ask first.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    info!("Keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                error!("Failed to read terminal event: {}", e);
                break;
            }
        }
    });

    let result = game_loop(&mut out, &rx, &cfg);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("Exiting sweep_shooter");
    result
}
