//! Initialization errors.  Once built, the simulator does not fail.

use thiserror::Error;

use mapd_core::Coord;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{what} {at} is outside the {width}x{height} grid")]
    OutOfBounds { what: &'static str, at: Coord, width: u32, height: u32 },

    #[error("{what} {at} is not traversable")]
    Blocked { what: &'static str, at: Coord },

    #[error("agents {first} and {second} share start cell {at}")]
    StartCollision { first: usize, second: usize, at: Coord },
}

/// Shorthand result type for simulator construction.
pub type SimResult<T> = Result<T, SimError>;
