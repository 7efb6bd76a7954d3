//! Drawing into the hidden page
//!
//! Pages are never cleared between frames. Each page remembers where the
//! sprites were when it was last drawn ([`Footprints`]) and only those
//! boxes, grown by a small margin, are painted over before the next draw.

use crate::components::{Ball, Paddle};
use crate::display::DisplayPort;
use crate::error::Result;
use crate::glyphs::{self, AI_SCORE_COL, SCORE_SEPARATOR, USER_SCORE_COL};
use crate::palette::{ColorIndex, Palette};
use crate::params::{Config, Params};
use crate::resources::{Player, Score};
use crate::surface::{Rect, Surface};

/// Palette slots for everything the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    pub user_paddle: ColorIndex,
    pub ai_paddle: ColorIndex,
    pub ball: ColorIndex,
    pub background: ColorIndex,
    pub text: ColorIndex,
    pub ai_won: ColorIndex,
    pub user_won: ColorIndex,
}

impl Colors {
    /// Allocate every color once, in a fixed order, at startup
    pub fn allocate<P: DisplayPort + ?Sized>(
        palette: &mut Palette,
        port: &mut P,
        config: &Config,
    ) -> Result<Self> {
        Ok(Self {
            user_paddle: palette.add_color(port, config.user_paddle_color)?,
            ai_paddle: palette.add_color(port, config.ai_paddle_color)?,
            ball: palette.add_color(port, config.ball_color)?,
            background: palette.add_color(port, config.background_color)?,
            text: palette.add_color(port, config.text_color)?,
            ai_won: palette.add_color(port, config.ai_won_color)?,
            user_won: palette.add_color(port, config.user_won_color)?,
        })
    }

    pub fn banner(&self, winner: Player) -> ColorIndex {
        match winner {
            Player::Ai => self.ai_won,
            Player::User => self.user_won,
        }
    }
}

/// Where the sprites were last drawn on one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprints {
    pub user: Rect,
    pub ai: Rect,
    pub ball: Rect,
}

impl Footprints {
    pub fn capture(user: &Paddle, ai: &Paddle, ball: &Ball) -> Self {
        Self {
            user: user.rect(),
            ai: ai.rect(),
            ball: ball.rect(),
        }
    }

    fn rects(&self) -> [Rect; 3] {
        [self.user, self.ai, self.ball]
    }
}

/// Paint over the old sprite boxes plus the erase margin
pub fn erase(surface: &mut Surface, footprints: &Footprints, background: ColorIndex) {
    for rect in footprints.rects() {
        surface.fill_rect(rect.expand(Params::ERASE_MARGIN), background);
    }
}

pub fn draw_paddle(surface: &mut Surface, paddle: &Paddle) {
    surface.fill_rect(paddle.rect(), paddle.color);
}

pub fn draw_ball(surface: &mut Surface, ball: &Ball) {
    surface.fill_rect(ball.rect(), ball.color);
}

/// Logo, both score digits and the dash between them
pub fn draw_hud(surface: &mut Surface, score: &Score, colors: &Colors) {
    glyphs::blit_all(surface, &glyphs::LOGO, colors.text);
    glyphs::draw_digit(surface, score.ai, AI_SCORE_COL, colors.text, colors.background);
    glyphs::draw_digit(surface, score.user, USER_SCORE_COL, colors.text, colors.background);

    let (row, col) = SCORE_SEPARATOR;
    if let Err(err) = surface.put_pixel(row, col, colors.text) {
        tracing::warn!(%err, "score separator rejected");
    }
}

/// Full scene for one page; returns what to erase next time round
pub fn draw_scene(
    surface: &mut Surface,
    user: &Paddle,
    ai: &Paddle,
    ball: &Ball,
    score: &Score,
    colors: &Colors,
) -> Footprints {
    draw_hud(surface, score, colors);
    draw_paddle(surface, user);
    draw_paddle(surface, ai);
    draw_ball(surface, ball);
    Footprints::capture(user, ai, ball)
}

pub fn draw_banner(surface: &mut Surface, winner: Player, colors: &Colors) {
    let text = match winner {
        Player::Ai => &glyphs::AI_BANNER[..],
        Player::User => &glyphs::USER_BANNER[..],
    };
    glyphs::blit_all(surface, text, colors.banner(winner));
}
