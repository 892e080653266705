pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece would collide at the requested position")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CommandError {
    #[display("{_0}")]
    PieceCollision(PieceCollisionError),
    #[display("game is over; reset required")]
    GameOver,
}

impl From<PieceCollisionError> for CommandError {
    fn from(err: PieceCollisionError) -> Self {
        CommandError::PieceCollision(err)
    }
}
