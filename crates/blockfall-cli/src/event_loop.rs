use std::time::Instant;

use blockfall_engine::DriveLoop;
use crossterm::event::{self, Event as CrosstermEvent};

/// Events processed by the play loop.
#[derive(Debug, derive_more::From)]
pub(crate) enum TuiEvent {
    /// A gravity or soft-drop step is due.
    Step,
    /// Screen render timing (after state changes).
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}

/// Blocking event loop paced by the engine's drive deadlines.
///
/// Due steps drain first, then a dirty screen renders, and only then does
/// the loop block on terminal input — at most until the drive loop's next
/// deadline, so blocking never delays a due step. With the drive halted
/// (game over) the loop simply waits for input.
#[derive(Debug)]
pub(crate) struct EventLoop {
    dirty: bool,
}

impl EventLoop {
    pub(crate) fn new() -> Self {
        // Initial render is required on startup.
        Self { dirty: true }
    }

    /// Returns the next event, blocking until a step is due or a terminal
    /// event arrives.
    pub(crate) fn next(&mut self, drive: &mut DriveLoop) -> anyhow::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if drive.poll(now) {
                self.dirty = true;
                return Ok(TuiEvent::Step);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = drive.timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }
}
