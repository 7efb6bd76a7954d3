use glam::IVec2;
use tracing::debug;

use crate::components::{Ball, Direction, Goal, Heading, Paddle};
use crate::params::Params;
use crate::resources::Events;

/// Rows in front of a paddle face that send the ball back.
///
/// `above` and `below` are exclusive. Which way the ball leaves depends on
/// exact equality with the paddle's two center rows, not on a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitBand {
    pub face_x: i32,
    pub above: i32,
    pub below: i32,
    pub center_row: i32,
    /// Outgoing headings for the upper part, the center rows and the lower part
    pub rebound: [Heading; 3],
}

impl HitBand {
    /// Band in front of the user paddle, reached by eastbound balls
    pub fn user(paddle: &Paddle) -> Self {
        Self {
            face_x: paddle.pos.x - 1,
            above: paddle.pos.y - Params::USER_BAND_ABOVE,
            below: paddle.pos.y + Params::USER_BAND_BELOW,
            center_row: paddle.center_row(),
            rebound: [Heading::NorthWest, Heading::West, Heading::SouthWest],
        }
    }

    /// Band in front of the AI paddle, reached by westbound balls
    pub fn ai(paddle: &Paddle) -> Self {
        Self {
            face_x: paddle.pos.x + 1,
            above: paddle.pos.y - Params::AI_BAND_ABOVE,
            below: paddle.pos.y + Params::AI_BAND_BELOW,
            center_row: paddle.center_row(),
            rebound: [Heading::NorthEast, Heading::East, Heading::SouthEast],
        }
    }

    /// Outgoing heading if the ball is touching the paddle face
    pub fn check(&self, ball: IVec2) -> Option<Heading> {
        if ball.x != self.face_x || ball.y <= self.above || ball.y >= self.below {
            return None;
        }
        let [upper, straight, lower] = self.rebound;
        let heading = if ball.y == self.center_row || ball.y == self.center_row + 1 {
            straight
        } else if ball.y < self.center_row {
            upper
        } else {
            lower
        };
        Some(heading)
    }
}

/// Advance the ball by one frame and return its new direction.
///
/// A frame does one of: rebound off a paddle, cross a goal line, reflect off
/// the top or bottom wall, or move one pixel. Only the last one changes the
/// position. `Idle` and `Scored` are left untouched.
pub fn advance(ball: &mut Ball, user: &Paddle, ai: &Paddle, events: &mut Events) -> Direction {
    let next = match ball.direction {
        Direction::Moving(heading) => travel(ball, heading, user, ai, events),
        other => other,
    };
    ball.direction = next;
    next
}

fn travel(
    ball: &mut Ball,
    heading: Heading,
    user: &Paddle,
    ai: &Paddle,
    events: &mut Events,
) -> Direction {
    let Some(step) = velocity(heading) else {
        // Reserved headings have no rule
        return Direction::Moving(heading);
    };

    let band = if heading.is_westward() {
        HitBand::ai(ai)
    } else {
        HitBand::user(user)
    };
    if let Some(rebound) = band.check(ball.pos) {
        debug!(?heading, ?rebound, x = ball.pos.x, y = ball.pos.y, "paddle bounce");
        events.ball_hit_paddle = true;
        return Direction::Moving(rebound);
    }

    if let Some(goal) = crossed_goal(heading, ball.pos.x) {
        return Direction::Scored(goal);
    }

    if let Some(reflected) = wall_reflection(heading, ball.pos.y) {
        debug!(?heading, ?reflected, y = ball.pos.y, "wall bounce");
        events.ball_hit_wall = true;
        return Direction::Moving(reflected);
    }

    ball.pos += step;
    Direction::Moving(heading)
}

fn velocity(heading: Heading) -> Option<IVec2> {
    let step = match heading {
        Heading::East => IVec2::new(1, 0),
        Heading::NorthEast => IVec2::new(1, -1),
        Heading::NorthWest => IVec2::new(-1, -1),
        Heading::West => IVec2::new(-1, 0),
        Heading::SouthWest => IVec2::new(-1, 1),
        Heading::SouthEast => IVec2::new(1, 1),
        Heading::North | Heading::South => return None,
    };
    Some(step)
}

fn crossed_goal(heading: Heading, x: i32) -> Option<Goal> {
    let crossed = match heading {
        Heading::West | Heading::NorthWest | Heading::SouthWest => {
            return (x <= Params::LEFT_GOAL_X).then_some(Goal::LeftWall);
        }
        Heading::East => x > Params::RIGHT_GOAL_X,
        Heading::NorthEast | Heading::SouthEast => x >= Params::RIGHT_GOAL_X,
        Heading::North | Heading::South => false,
    };
    crossed.then_some(Goal::RightWall)
}

fn wall_reflection(heading: Heading, y: i32) -> Option<Heading> {
    match heading {
        Heading::NorthWest if y == Params::TOP_WALL_Y => Some(Heading::SouthWest),
        Heading::SouthWest if y >= Params::BOTTOM_WALL_Y => Some(Heading::NorthWest),
        Heading::NorthEast if y <= Params::TOP_WALL_Y => Some(Heading::SouthEast),
        Heading::SouthEast if y >= Params::BOTTOM_WALL_Y_EAST => Some(Heading::NorthEast),
        _ => None,
    }
}
