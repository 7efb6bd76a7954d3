//! Error types for the display core

use thiserror::Error;

/// Faults that can only come from misuse of the raster primitives
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("pixel ({row}, {col}) is outside the 240x160 surface")]
    PixelOutOfBounds { row: i32, col: i32 },

    #[error("palette is full ({capacity} entries)")]
    PaletteFull { capacity: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
