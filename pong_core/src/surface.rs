//! Packed 8-bit indexed pixel surface
//!
//! A page stores two horizontally adjacent pixels per 16-bit unit: the low
//! byte holds the even column and the high byte the odd column. Single-pixel
//! writes therefore read the unit, replace one half and write it back.

use std::fmt;

use glam::IVec2;

use crate::error::{Error, Result};
use crate::palette::ColorIndex;
use crate::params::Params;

const WIDTH: i32 = Params::SCREEN_WIDTH;
const HEIGHT: i32 = Params::SCREEN_HEIGHT;

/// Number of 16-bit storage units in one page
pub const UNITS_PER_PAGE: usize = (WIDTH * HEIGHT / 2) as usize;

/// Axis-aligned pixel rectangle; `min` is (col, row), `size` is (width, height)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(min: IVec2, size: IVec2) -> Self {
        Self { min, size }
    }

    /// Exclusive bottom-right corner
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    /// Grow the rectangle by `margin` pixels on every side
    pub fn expand(&self, margin: i32) -> Self {
        Self {
            min: self.min - IVec2::splat(margin),
            size: self.size + IVec2::splat(margin * 2),
        }
    }

    pub fn contains(&self, point: IVec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }

    /// Intersect with the screen; `None` when nothing is left
    pub fn clip(&self) -> Option<Self> {
        let min = self.min.max(IVec2::ZERO);
        let max = self.max().min(IVec2::new(WIDTH, HEIGHT));
        if max.x <= min.x || max.y <= min.y {
            return None;
        }
        Some(Self::new(min, max - min))
    }
}

/// One 240x160 page of indexed pixels
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    units: Box<[u16]>,
}

impl Surface {
    /// Allocate a page filled with `color`
    pub fn new(color: ColorIndex) -> Self {
        Self {
            units: vec![pack(color, color); UNITS_PER_PAGE].into_boxed_slice(),
        }
    }

    pub fn in_bounds(row: i32, col: i32) -> bool {
        (0..HEIGHT).contains(&row) && (0..WIDTH).contains(&col)
    }

    /// Write one pixel, preserving its neighbour in the same storage unit.
    /// Coordinates outside the page are rejected and nothing is written.
    pub fn put_pixel(&mut self, row: i32, col: i32, color: ColorIndex) -> Result<()> {
        if !Self::in_bounds(row, col) {
            return Err(Error::PixelOutOfBounds { row, col });
        }
        self.write(row, col, color);
        Ok(())
    }

    /// Read one pixel back; `None` outside the page
    pub fn pixel(&self, row: i32, col: i32) -> Option<ColorIndex> {
        if !Self::in_bounds(row, col) {
            return None;
        }
        let unit = self.units[offset(row, col)];
        let byte = if col & 1 == 1 { unit >> 8 } else { unit & 0x00ff };
        Some(ColorIndex(byte as u8))
    }

    /// Fill a rectangle, clipped to the page
    pub fn fill_rect(&mut self, rect: Rect, color: ColorIndex) {
        let Some(rect) = rect.clip() else {
            return;
        };
        let max = rect.max();
        for row in rect.min.y..max.y {
            for col in rect.min.x..max.x {
                self.write(row, col, color);
            }
        }
    }

    /// Raw storage units, row-major
    pub fn units(&self) -> &[u16] {
        &self.units
    }

    fn write(&mut self, row: i32, col: i32, color: ColorIndex) {
        debug_assert!(Self::in_bounds(row, col));
        let index = offset(row, col);
        let unit = self.units[index];
        let value = u16::from(color.0);
        self.units[index] = if col & 1 == 1 {
            (value << 8) | (unit & 0x00ff)
        } else {
            (unit & 0xff00) | value
        };
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .finish_non_exhaustive()
    }
}

fn offset(row: i32, col: i32) -> usize {
    ((row * WIDTH + col) >> 1) as usize
}

fn pack(even: ColorIndex, odd: ColorIndex) -> u16 {
    (u16::from(odd.0) << 8) | u16::from(even.0)
}
