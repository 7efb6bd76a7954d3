use glam::IVec2;

use crate::palette::ColorIndex;
use crate::params::{Config, Params};
use crate::surface::Rect;

/// A paddle; `pos` is its top-left pixel. Width is `size`, height `size * 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paddle {
    pub pos: IVec2,
    pub size: i32,
    pub color: ColorIndex,
}

impl Paddle {
    pub fn new(x: i32, y: i32, color: ColorIndex) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: Params::PADDLE_SIZE,
            color,
        }
    }

    /// The player's paddle on the right
    pub fn user(color: ColorIndex) -> Self {
        Self::new(Params::USER_PADDLE_X, Params::PADDLE_START_Y, color)
    }

    /// The computer's paddle on the left
    pub fn ai(color: ColorIndex) -> Self {
        Self::new(Params::AI_PADDLE_X, Params::PADDLE_START_Y, color)
    }

    pub fn height(&self) -> i32 {
        self.size * Params::PADDLE_HEIGHT_FACTOR
    }

    /// First of the two rows that send the ball back straight
    pub fn center_row(&self) -> i32 {
        self.pos.y + Params::PADDLE_CENTER_OFFSET
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, IVec2::new(self.size, self.height()))
    }

    /// Move vertically by `dy`, staying inside the paddle range
    pub fn nudge(&mut self, dy: i32) {
        self.pos.y = Config::clamp_paddle_y(self.pos.y + dy);
    }
}

/// Straight and diagonal travel directions, screen-relative (north is up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    East,
    NorthEast,
    /// Reserved; no rule moves the ball straight up
    North,
    NorthWest,
    West,
    SouthWest,
    /// Reserved; no rule moves the ball straight down
    South,
    SouthEast,
}

impl Heading {
    pub fn is_westward(self) -> bool {
        matches!(
            self,
            Heading::West | Heading::NorthWest | Heading::SouthWest
        )
    }

    pub fn is_eastward(self) -> bool {
        matches!(
            self,
            Heading::East | Heading::NorthEast | Heading::SouthEast
        )
    }
}

/// Which goal line the ball crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    /// Past the AI paddle: the user scores
    LeftWall,
    /// Past the user paddle: the AI scores
    RightWall,
}

/// Ball state. `Scored` only exists between the motion step and the score
/// handling of the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Parked at the serve point until a vertical button is pressed
    Idle,
    Moving(Heading),
    Scored(Goal),
}

impl Direction {
    /// Direction of every serve
    pub const SERVE: Direction = Direction::Moving(Heading::East);

    /// Legacy numeric code: 1-8 for headings, 100 idle, 101/102 for goals
    pub fn code(self) -> u8 {
        match self {
            Direction::Moving(Heading::East) => 1,
            Direction::Moving(Heading::NorthEast) => 2,
            Direction::Moving(Heading::North) => 3,
            Direction::Moving(Heading::NorthWest) => 4,
            Direction::Moving(Heading::West) => 5,
            Direction::Moving(Heading::SouthWest) => 6,
            Direction::Moving(Heading::South) => 7,
            Direction::Moving(Heading::SouthEast) => 8,
            Direction::Idle => 100,
            Direction::Scored(Goal::LeftWall) => 101,
            Direction::Scored(Goal::RightWall) => 102,
        }
    }

    pub fn heading(self) -> Option<Heading> {
        match self {
            Direction::Moving(heading) => Some(heading),
            _ => None,
        }
    }

    /// Moving toward the AI side
    pub fn is_westward(self) -> bool {
        self.heading().is_some_and(Heading::is_westward)
    }
}

/// The ball; always 2x2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ball {
    pub pos: IVec2,
    pub size: i32,
    pub color: ColorIndex,
    pub direction: Direction,
}

impl Ball {
    pub fn new(color: ColorIndex) -> Self {
        Self {
            pos: Self::serve_point(),
            size: Params::BALL_SIZE,
            color,
            direction: Direction::Idle,
        }
    }

    pub fn serve_point() -> IVec2 {
        IVec2::new(Params::BALL_SERVE_X, Params::BALL_SERVE_Y)
    }

    /// Park the ball at the serve point, waiting for the next serve
    pub fn reset(&mut self) {
        self.pos = Self::serve_point();
        self.direction = Direction::Idle;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, IVec2::splat(self.size))
    }
}
