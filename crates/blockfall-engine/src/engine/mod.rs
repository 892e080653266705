//! Game orchestration on top of the core data structures:
//!
//! - [`GameEngine`] - the spawn → fall → lock → clear → respawn state
//!   machine, owning the board and the active piece together
//! - [`PieceSpawner`] - uniform random piece source (seedable)
//! - [`DriveLoop`] - timing policy for gravity and held soft drop
//!
//! A shell drives the engine by polling the [`DriveLoop`] and feeding due
//! steps into [`GameEngine::step`], and maps its input events onto the
//! `try_*` control methods. All legality checks go through
//! [`collides`](crate::collides).

pub use self::{drive::*, game::*, spawner::*};

mod drive;
mod game;
mod spawner;
