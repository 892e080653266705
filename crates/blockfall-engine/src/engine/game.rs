use std::time::Duration;

use crate::{
    CommandError, PieceCollisionError,
    core::{board::Board, collision::collides, piece::ActivePiece},
    engine::spawner::PieceSpawner,
};

/// Construction-time configuration for a game.
///
/// Fixed once the engine is built; a new configuration requires a new
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Board height in rows.
    pub rows: usize,
    /// Board width in columns.
    pub cols: usize,
    /// Period of the always-armed gravity timer.
    pub gravity_interval: Duration,
    /// Period of the accelerated timer while soft drop is held.
    pub soft_drop_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 10,
            gravity_interval: Duration::from_millis(500),
            soft_drop_interval: Duration::from_millis(100),
        }
    }
}

/// Phase of the engine state machine.
///
/// `GameOver` is terminal: every operation except [`GameEngine::reset`] is
/// rejected until a reset re-enters `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// Result of a single gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Descended,
    /// The piece could not descend: it locked at its last valid position,
    /// `rows_cleared` complete rows were removed, and a new piece spawned.
    Locked { rows_cleared: usize },
    /// The piece locked, but the replacement piece collided at spawn; the
    /// engine is now in game over.
    ToppedOut { rows_cleared: usize },
    /// The engine was already in game over; nothing changed.
    Ignored,
}

/// The game-state engine: board and active piece owned together, driven by
/// the control API and the gravity step.
///
/// Invariant: while the phase is `Running` the active piece exists and is
/// collision-free against the board. Every mutation goes through a
/// candidate piece that is committed only after [`collides`] clears it, so
/// a rejected command leaves no observable state change.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    active: Option<ActivePiece>,
    phase: GamePhase,
    spawner: PieceSpawner,
}

impl GameEngine {
    /// Creates an engine with a randomly seeded spawner and spawns the
    /// first piece.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_spawner(config, PieceSpawner::new())
    }

    /// Like [`Self::new`], but with an explicit spawner (deterministic runs,
    /// tests).
    #[must_use]
    pub fn with_spawner(config: GameConfig, spawner: PieceSpawner) -> Self {
        let board = Board::new(config.cols, config.rows);
        let mut engine = Self {
            config,
            board,
            active: None,
            phase: GamePhase::Running,
            spawner,
        };
        let _ = engine.spawn_piece();
        engine
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Spawns the next piece horizontally centered on row 0, latching game
    /// over if the spawn position already collides.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn spawn_piece(&mut self) -> Result<(), PieceCollisionError> {
        let kind = self.spawner.next_kind();
        let x = (self.config.cols / 2) as i32 - (kind.shape().width() / 2) as i32;
        let piece = ActivePiece::spawn(kind, x);
        if collides(&self.board, &piece) {
            self.phase = GamePhase::GameOver;
            self.active = None;
            return Err(PieceCollisionError);
        }
        self.active = Some(piece);
        Ok(())
    }

    fn active_or_game_over(&self) -> Result<&ActivePiece, CommandError> {
        self.active.as_ref().ok_or(CommandError::GameOver)
    }

    fn try_commit(&mut self, candidate: ActivePiece) -> Result<(), PieceCollisionError> {
        if collides(&self.board, &candidate) {
            return Err(PieceCollisionError);
        }
        self.active = Some(candidate);
        Ok(())
    }

    /// Moves the piece one column left, if the target position is free.
    pub fn try_move_left(&mut self) -> Result<(), CommandError> {
        let candidate = self.active_or_game_over()?.shifted(-1);
        Ok(self.try_commit(candidate)?)
    }

    /// Moves the piece one column right, if the target position is free.
    pub fn try_move_right(&mut self) -> Result<(), CommandError> {
        let candidate = self.active_or_game_over()?.shifted(1);
        Ok(self.try_commit(candidate)?)
    }

    /// Turns the piece by a quarter turn, if the rotated shape fits.
    ///
    /// No wall kicks: a colliding rotation is rejected wholesale and the
    /// prior shape is retained unchanged.
    pub fn try_rotate(&mut self) -> Result<(), CommandError> {
        let candidate = self.active_or_game_over()?.rotated();
        Ok(self.try_commit(candidate)?)
    }

    /// Applies one gravity step: descend if possible, otherwise lock, clear
    /// completed rows, and spawn the next piece.
    ///
    /// Both the gravity timer and the held soft drop invoke this same
    /// operation; they differ only in cadence.
    pub fn step(&mut self) -> StepOutcome {
        let Some(piece) = self.active.take() else {
            return StepOutcome::Ignored;
        };

        let candidate = piece.descended();
        if !collides(&self.board, &candidate) {
            self.active = Some(candidate);
            return StepOutcome::Descended;
        }

        self.board.lock(&piece);
        let rows_cleared = self.board.clear_completed_rows();
        match self.spawn_piece() {
            Ok(()) => StepOutcome::Locked { rows_cleared },
            Err(PieceCollisionError) => StepOutcome::ToppedOut { rows_cleared },
        }
    }

    /// Replaces the board wholesale with an empty one and re-enters
    /// `Running` with a fresh spawn. Valid from any phase.
    pub fn reset(&mut self) {
        self.board = Board::new(self.config.cols, self.config.rows);
        self.phase = GamePhase::Running;
        self.active = None;
        let _ = self.spawn_piece();
    }

    #[cfg(test)]
    fn set_active_unchecked(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceKind;

    fn small_config() -> GameConfig {
        GameConfig {
            rows: 6,
            cols: 5,
            ..GameConfig::default()
        }
    }

    fn seeded(config: GameConfig) -> GameEngine {
        GameEngine::with_spawner(config, PieceSpawner::with_seed(1))
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn expected_spawn_x(engine: &GameEngine) -> i32 {
        let piece = engine.active_piece().expect("piece should be spawned");
        (engine.config().cols / 2) as i32 - (piece.shape().width() / 2) as i32
    }

    #[test]
    fn test_initial_spawn_is_centered_on_row_zero() {
        let engine = seeded(GameConfig::default());
        assert!(engine.phase().is_running());
        let piece = engine.active_piece().expect("piece should be spawned");
        assert_eq!(piece.x(), expected_spawn_x(&engine));
        assert_eq!(piece.y(), 0);
    }

    #[test]
    fn test_step_descends_on_open_board() {
        let mut engine = seeded(GameConfig::default());
        assert_eq!(engine.step(), StepOutcome::Descended);
        assert_eq!(engine.active_piece().map(ActivePiece::y), Some(1));
    }

    #[test]
    fn test_move_rejected_at_left_wall() {
        let mut engine = seeded(GameConfig::default());
        while engine.try_move_left().is_ok() {}

        // Every catalogue shape occupies a cell in its leftmost column, so
        // the rejected piece sits flush at x = 0.
        let piece = engine.active_piece().expect("piece should be spawned");
        assert_eq!(piece.x(), 0);
        assert!(matches!(
            engine.try_move_left(),
            Err(CommandError::PieceCollision(_))
        ));
        assert_eq!(engine.active_piece().map(ActivePiece::x), Some(0));
    }

    #[test]
    fn test_rejected_rotation_keeps_prior_shape() {
        let mut engine = seeded(GameConfig::default());
        // A flat I piece on the bottom row has no room to stand upright.
        engine.set_active_unchecked({
            let mut piece = ActivePiece::spawn(PieceKind::I, 3);
            for _ in 0..19 {
                piece = piece.descended();
            }
            piece
        });

        assert!(matches!(
            engine.try_rotate(),
            Err(CommandError::PieceCollision(_))
        ));
        let piece = engine.active_piece().expect("piece should be present");
        assert_eq!((piece.shape().width(), piece.shape().height()), (4, 1));
        assert_eq!((piece.x(), piece.y()), (3, 19));
    }

    #[test]
    fn test_first_lock_spawns_replacement() {
        let mut engine = seeded(GameConfig::default());
        let outcome = loop {
            match engine.step() {
                StepOutcome::Descended => {}
                outcome => break outcome,
            }
        };

        // A single piece cannot complete a 10-wide row.
        assert_eq!(outcome, StepOutcome::Locked { rows_cleared: 0 });

        let locked: Vec<_> = engine
            .board()
            .rows()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, cell)| !cell.is_empty())
                    .map(move |(x, _)| (x, y))
            })
            .collect();
        assert_eq!(locked.len(), 4);
        assert!(locked.iter().all(|&(_, y)| y >= 18), "{locked:?}");

        let piece = engine.active_piece().expect("replacement piece");
        assert_eq!(piece.y(), 0);
        assert_eq!(piece.x(), expected_spawn_x(&engine));
    }

    #[test]
    fn test_stacking_in_place_tops_out() {
        // On a 5-wide board no unmoved piece ever reaches column 4, so no
        // row can complete and the center stack must reach the spawn cells.
        let mut engine = seeded(small_config());
        let mut topped_out = false;
        for _ in 0..500 {
            if let StepOutcome::ToppedOut { .. } = engine.step() {
                topped_out = true;
                break;
            }
        }
        assert!(topped_out, "stacking should reach the spawn row");
        assert!(engine.phase().is_game_over());
        assert!(engine.active_piece().is_none());
    }

    #[test]
    fn test_game_over_rejects_everything_but_reset() {
        let mut engine = seeded(small_config());
        while !engine.phase().is_game_over() {
            engine.step();
        }

        assert!(matches!(engine.try_move_left(), Err(CommandError::GameOver)));
        assert!(matches!(engine.try_move_right(), Err(CommandError::GameOver)));
        assert!(matches!(engine.try_rotate(), Err(CommandError::GameOver)));
        assert_eq!(engine.step(), StepOutcome::Ignored);
        assert!(engine.phase().is_game_over());
    }

    #[test]
    fn test_reset_restores_running_state() {
        let mut engine = seeded(small_config());
        while !engine.phase().is_game_over() {
            engine.step();
        }

        engine.reset();

        assert!(engine.phase().is_running());
        assert!(
            engine
                .board()
                .rows()
                .all(|row| row.iter().all(|cell| cell.is_empty()))
        );
        let piece = engine.active_piece().expect("piece after reset");
        assert_eq!(piece.y(), 0);
        assert_eq!(piece.x(), expected_spawn_x(&engine));
    }

    #[test]
    fn test_active_piece_never_collides_while_running() {
        let mut engine = seeded(GameConfig::default());
        for turn in 0..400 {
            match turn % 5 {
                0 => _ = engine.try_move_left(),
                1 => _ = engine.try_rotate(),
                2 => _ = engine.try_move_right(),
                3 => _ = engine.try_move_right(),
                _ => _ = engine.step(),
            }
            match engine.active_piece() {
                Some(piece) => assert!(!collides(engine.board(), piece), "turn {turn}"),
                None => {
                    assert!(engine.phase().is_game_over());
                    engine.reset();
                }
            }
        }
    }
}
