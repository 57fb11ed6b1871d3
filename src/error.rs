//! errors raised while building a world.

use thiserror::Error;

use crate::Pos;

pub type Result<T> = std::result::Result<T, WorldError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("invalid world dimensions {width}x{height}, both must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("initial cell {pos} is outside of the {width}x{height} world")]
    OutOfRange { pos: Pos, width: i32, height: i32 },
}
