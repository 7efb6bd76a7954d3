//! Fixed text: logo, score digits and the winner banners
//!
//! Each glyph is five rows of at most five pixels; bit `width - 1` of a row
//! is the leftmost column. All placements are absolute screen positions.

use tracing::warn;

use crate::palette::ColorIndex;
use crate::surface::{Rect, Surface};

pub const GLYPH_HEIGHT: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub width: u8,
    pub rows: [u8; 5],
}

impl Glyph {
    const fn new(width: u8, rows: [u8; 5]) -> Self {
        Self { width, rows }
    }

    /// Set pixels as (row, col) offsets from the glyph origin
    pub fn points(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = i32::from(self.width);
        self.rows.iter().enumerate().flat_map(move |(row, bits)| {
            (0..width)
                .filter(move |col| bits >> (width - 1 - col) & 1 == 1)
                .map(move |col| (row as i32, col))
        })
    }
}

/// A glyph at a fixed screen position
#[derive(Debug, Clone, Copy)]
pub struct Placed {
    pub glyph: &'static Glyph,
    pub row: i32,
    pub col: i32,
}

const fn at(glyph: &'static Glyph, row: i32, col: i32) -> Placed {
    Placed { glyph, row, col }
}

// Capitals
const P: Glyph = Glyph::new(4, [0b1111, 0b1001, 0b1111, 0b1000, 0b1000]);
const O: Glyph = Glyph::new(4, [0b1111, 0b1001, 0b1001, 0b1001, 0b1111]);
const N: Glyph = Glyph::new(4, [0b1111, 0b1001, 0b1001, 0b1001, 0b1001]);
const G: Glyph = Glyph::new(4, [0b1111, 0b1000, 0b1011, 0b1001, 0b1111]);
const A: Glyph = Glyph::new(4, [0b0110, 0b1001, 0b1111, 0b1001, 0b1001]);
const I: Glyph = Glyph::new(3, [0b111, 0b010, 0b010, 0b010, 0b111]);
const W: Glyph = Glyph::new(5, [0b10001, 0b10001, 0b10101, 0b10101, 0b01010]);

// Lower case ('o' and 'n' share the capitals' shapes)
const U_LOWER: Glyph = Glyph::new(4, [0b1001, 0b1001, 0b1001, 0b1001, 0b1111]);
const S_LOWER: Glyph = Glyph::new(4, [0b1111, 0b1000, 0b1111, 0b0001, 0b1111]);
const E_LOWER: Glyph = Glyph::new(4, [0b1111, 0b1000, 0b1111, 0b1000, 0b1111]);
const R_LOWER: Glyph = Glyph::new(4, [0b1111, 0b1001, 0b1110, 0b1001, 0b1001]);
const BANG: Glyph = Glyph::new(1, [0b1, 0b1, 0b1, 0b0, 0b1]);

const DIGITS: [Glyph; 4] = [
    Glyph::new(3, [0b111, 0b101, 0b101, 0b101, 0b111]),
    Glyph::new(3, [0b010, 0b010, 0b010, 0b010, 0b010]),
    Glyph::new(3, [0b111, 0b001, 0b111, 0b100, 0b111]),
    Glyph::new(3, [0b111, 0b001, 0b111, 0b001, 0b111]),
];

pub const LOGO: [Placed; 4] = [at(&P, 1, 110), at(&O, 1, 115), at(&N, 1, 120), at(&G, 1, 125)];

const WON: [Placed; 4] = [at(&W, 81, 112), at(&O, 81, 118), at(&N, 81, 123), at(&BANG, 81, 128)];

pub const AI_BANNER: [Placed; 6] = [
    at(&A, 74, 116),
    at(&I, 74, 121),
    WON[0],
    WON[1],
    WON[2],
    WON[3],
];

pub const USER_BANNER: [Placed; 8] = [
    at(&U_LOWER, 74, 111),
    at(&S_LOWER, 74, 116),
    at(&E_LOWER, 74, 121),
    at(&R_LOWER, 74, 126),
    WON[0],
    WON[1],
    WON[2],
    WON[3],
];

pub const SCORE_ROW: i32 = 7;
pub const AI_SCORE_COL: i32 = 115;
pub const USER_SCORE_COL: i32 = 121;
pub const DIGIT_WIDTH: i32 = 3;
/// Single-pixel dash between the two scores (row, col)
pub const SCORE_SEPARATOR: (i32, i32) = (9, 119);

pub fn digit(value: u8) -> Option<&'static Glyph> {
    DIGITS.get(usize::from(value))
}

/// Draw one glyph; pixels that fall off the surface are dropped
pub fn blit(surface: &mut Surface, glyph: &Glyph, row: i32, col: i32, color: ColorIndex) {
    for (dr, dc) in glyph.points() {
        if let Err(err) = surface.put_pixel(row + dr, col + dc, color) {
            warn!(%err, "glyph pixel rejected");
        }
    }
}

pub fn blit_all(surface: &mut Surface, text: &[Placed], color: ColorIndex) {
    for placed in text {
        blit(surface, placed.glyph, placed.row, placed.col, color);
    }
}

/// Clear a digit slot and draw `value` into it
pub fn draw_digit(
    surface: &mut Surface,
    value: u8,
    col: i32,
    color: ColorIndex,
    background: ColorIndex,
) {
    let slot = Rect::new(
        glam::IVec2::new(col, SCORE_ROW),
        glam::IVec2::new(DIGIT_WIDTH, GLYPH_HEIGHT),
    );
    surface.fill_rect(slot, background);
    if let Some(glyph) = digit(value) {
        blit(surface, glyph, SCORE_ROW, col, color);
    }
}
