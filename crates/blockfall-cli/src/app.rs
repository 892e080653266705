use std::{io, time::Instant};

use blockfall_engine::{DriveLoop, GameConfig, GameEngine, PieceSpawner, StepOutcome};
use crossterm::{
    event::{
        Event, KeyCode, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Flex, Layout},
    text::Text,
    widgets::Block,
};

use crate::{
    event_loop::{EventLoop, TuiEvent},
    ui::{BoardDisplay, style},
};

/// The single interactive screen: engine, drive loop, and key wiring.
#[derive(Debug)]
pub(crate) struct PlayApp {
    engine: GameEngine,
    drive: DriveLoop,
    events: EventLoop,
    cell_width: u16,
    rows_cleared: usize,
    release_events: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(config: GameConfig, seed: Option<u64>, cell_width: u16) -> Self {
        let spawner = seed.map_or_else(PieceSpawner::new, PieceSpawner::with_seed);
        let mut drive = DriveLoop::start(&config, Instant::now());
        let engine = GameEngine::with_spawner(config, spawner);
        if engine.phase().is_game_over() {
            // A board too small for the first spawn is over before it starts.
            drive.halt();
        }
        Self {
            engine,
            drive,
            events: EventLoop::new(),
            cell_width,
            rows_cleared: 0,
            release_events: false,
            is_exiting: false,
        }
    }

    pub(crate) fn run(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        // Soft drop needs key-release reporting; terminals without the
        // keyboard enhancement protocol fall back to one step per press.
        self.release_events = supports_keyboard_enhancement().unwrap_or(false);
        if self.release_events {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let result = self.event_loop(terminal);

        if self.release_events {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.is_exiting {
            match self.events.next(&mut self.drive)? {
                TuiEvent::Step => self.apply_step(),
                TuiEvent::Render => {
                    terminal.draw(|frame| self.draw(frame))?;
                }
                TuiEvent::Crossterm(event) => self.handle_event(&event),
            }
        }
        Ok(())
    }

    /// One gravity step; both the gravity timer and the held soft drop end
    /// up here.
    fn apply_step(&mut self) {
        match self.engine.step() {
            StepOutcome::Locked { rows_cleared } => self.rows_cleared += rows_cleared,
            StepOutcome::ToppedOut { rows_cleared } => {
                self.rows_cleared += rows_cleared;
                self.drive.halt();
            }
            StepOutcome::Descended | StepOutcome::Ignored => {}
        }
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        let is_running = self.engine.phase().is_running();
        let is_pressed = matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat);

        match key.code {
            KeyCode::Left if is_running && is_pressed => _ = self.engine.try_move_left(),
            KeyCode::Right if is_running && is_pressed => _ = self.engine.try_move_right(),
            KeyCode::Up if is_running && is_pressed => _ = self.engine.try_rotate(),
            KeyCode::Down if is_running => self.handle_soft_drop_key(key.kind),
            KeyCode::Char('r') if key.kind == KeyEventKind::Press => self.restart(),
            KeyCode::Char('q') if key.kind == KeyEventKind::Press => self.is_exiting = true,
            _ => {}
        }
    }

    fn handle_soft_drop_key(&mut self, kind: KeyEventKind) {
        match kind {
            KeyEventKind::Press if self.release_events => {
                self.drive.start_soft_drop(Instant::now());
            }
            // Without release reporting a held key arrives as repeated
            // presses; apply one accelerated step per press.
            KeyEventKind::Press => self.apply_step(),
            KeyEventKind::Release => self.drive.stop_soft_drop(),
            KeyEventKind::Repeat => {}
        }
    }

    fn restart(&mut self) {
        self.engine.reset();
        self.rows_cleared = 0;
        self.drive.rearm(Instant::now());
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let board_display = BoardDisplay::new(self.engine.board(), self.cell_width)
            .active_piece(self.engine.active_piece())
            .block(Block::bordered().title("blockfall"));

        let info = Text::from(format!("Rows cleared: {}", self.rows_cleared))
            .style(style::INFO)
            .centered();
        let status = if self.engine.phase().is_game_over() {
            Text::from("GAME OVER  |  r (Restart)  |  q (Quit)")
                .style(style::GAME_OVER)
                .centered()
        } else {
            Text::from("Controls: \u{2190} \u{2192} (Move) | \u{2191} (Rotate) | \u{2193} (Soft Drop) | r (Restart) | q (Quit)")
                .style(style::HELP)
                .centered()
        };

        let [board_area, info_area, status_area] = Layout::vertical([
            Constraint::Length(board_display.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas::<3>(frame.area());
        let [board_area] = Layout::horizontal([Constraint::Length(board_display.width())])
            .flex(Flex::Center)
            .areas::<1>(board_area);

        frame.render_widget(board_display, board_area);
        frame.render_widget(info, info_area);
        frame.render_widget(status, status_area);
    }
}
