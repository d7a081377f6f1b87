//! Terminal blockfall runner.
//!
//! A fixed-rate outer loop: poll input for the remainder of the frame,
//! advance the simulation with the current wall time, and flush one frame
//! through the diffing renderer.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::GameState;
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_TIME_MS;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore the terminal, even on error.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let epoch = Instant::now();
    let now_ms = |epoch: Instant| epoch.elapsed().as_millis() as u64;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);

    let mut game = GameState::new(seed, now_ms(epoch));
    let view = GameView::default();
    let mut input = InputHandler::new();

    let frame_duration = Duration::from_millis(FRAME_TIME_MS);
    let mut next_frame = Instant::now() + frame_duration;

    loop {
        // Drain input until the frame deadline.
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    let now = now_ms(epoch);
                    match key.kind {
                        // Terminal auto-repeat doubles as hold detection for
                        // the soft drop, so repeats go through the same path.
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            if should_quit(&key) {
                                return Ok(());
                            }
                            if let Some(action) = input.handle_key_press(key.code, now) {
                                game.apply_action(action, now);
                            }
                        }
                        KeyEventKind::Release => {
                            if let Some(action) = input.handle_key_release(key.code) {
                                game.apply_action(action, now);
                            }
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
            if Instant::now() >= next_frame {
                break;
            }
        }
        next_frame += frame_duration;

        let now = now_ms(epoch);
        if let Some(action) = input.poll_release(now) {
            game.apply_action(action, now);
        }
        game.update(now);

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let mut fb = view.render(&game, Viewport::new(w, h));
        term.draw_swap(&mut fb)?;
    }
}
