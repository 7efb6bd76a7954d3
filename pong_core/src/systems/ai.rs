use crate::components::{Ball, Paddle};
use crate::params::Params;

/// Vertical choice the AI paddle carries from frame to frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiMove {
    Up,
    #[default]
    Down,
}

impl AiMove {
    pub fn dy(self) -> i32 {
        match self {
            AiMove::Up => -1,
            AiMove::Down => 1,
        }
    }
}

/// Pick this frame's move. The paddle chases the ball only while the ball
/// heads west; otherwise, and when level with the ball, it keeps its last
/// choice. The field limits override everything.
pub fn track_ball(paddle: &Paddle, ball: &Ball, previous: AiMove) -> AiMove {
    let mut choice = previous;

    if ball.direction.is_westward() {
        let mid = paddle.center_row();
        if mid > ball.pos.y {
            choice = AiMove::Up;
        } else if mid < ball.pos.y {
            choice = AiMove::Down;
        }
    }

    // `>=`: the paddle is clamped at 150, so `>` would leave it stuck there
    if paddle.pos.y >= Params::PADDLE_Y_MAX {
        choice = AiMove::Up;
    } else if paddle.pos.y == Params::PADDLE_Y_MIN {
        choice = AiMove::Down;
    }

    choice
}

/// Run the AI for one frame: decide, then move exactly one pixel
pub fn move_ai_paddle(paddle: &mut Paddle, ball: &Ball, previous: AiMove) -> AiMove {
    let choice = track_ball(paddle, ball, previous);
    paddle.nudge(choice.dy());
    choice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Direction, Heading};
    use crate::palette::ColorIndex;
    use glam::IVec2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ball_at(y: i32, heading: Heading) -> Ball {
        let mut ball = Ball::new(ColorIndex(2));
        ball.pos = IVec2::new(100, y);
        ball.direction = Direction::Moving(heading);
        ball
    }

    #[test]
    fn test_tracks_westbound_ball() {
        let paddle = Paddle::ai(ColorIndex(1)); // mid row 84
        assert_eq!(
            track_ball(&paddle, &ball_at(60, Heading::West), AiMove::Down),
            AiMove::Up
        );
        assert_eq!(
            track_ball(&paddle, &ball_at(100, Heading::SouthWest), AiMove::Up),
            AiMove::Down
        );
    }

    #[test]
    fn test_holds_when_level() {
        let paddle = Paddle::ai(ColorIndex(1));
        for previous in [AiMove::Up, AiMove::Down] {
            assert_eq!(
                track_ball(&paddle, &ball_at(84, Heading::NorthWest), previous),
                previous
            );
        }
    }

    #[test]
    fn test_ignores_eastbound_and_idle_ball() {
        let paddle = Paddle::ai(ColorIndex(1));
        assert_eq!(
            track_ball(&paddle, &ball_at(10, Heading::East), AiMove::Down),
            AiMove::Down,
            "Keeps drifting while the ball heads away"
        );
        let idle = Ball::new(ColorIndex(2));
        assert_eq!(track_ball(&paddle, &idle, AiMove::Up), AiMove::Up);
    }

    #[test]
    fn test_limits_override_tracking() {
        let mut paddle = Paddle::ai(ColorIndex(1));
        paddle.pos.y = 150;
        assert_eq!(
            track_ball(&paddle, &ball_at(159, Heading::West), AiMove::Down),
            AiMove::Up
        );
        paddle.pos.y = 0;
        assert_eq!(
            track_ball(&paddle, &ball_at(0, Heading::West), AiMove::Up),
            AiMove::Down
        );
    }

    #[test]
    fn test_does_not_stick_at_bottom_limit() {
        let mut paddle = Paddle::ai(ColorIndex(1));
        paddle.pos.y = 150;
        // Eastbound ball: the paddle keeps whatever the limit chose
        let ball = ball_at(159, Heading::East);
        let mut memory = AiMove::Down;
        for expected in [149, 148, 147] {
            memory = move_ai_paddle(&mut paddle, &ball, memory);
            assert_eq!(paddle.pos.y, expected, "Paddle should sweep away from the limit");
        }
    }

    #[test]
    fn test_moves_exactly_one_pixel() {
        let mut paddle = Paddle::ai(ColorIndex(1));
        let choice = move_ai_paddle(&mut paddle, &ball_at(10, Heading::West), AiMove::Down);
        assert_eq!(choice, AiMove::Up);
        assert_eq!(paddle.pos.y, 79);
    }

    #[test]
    fn test_idle_paddle_sweeps_between_limits() {
        let mut paddle = Paddle::ai(ColorIndex(1));
        let ball = Ball::new(ColorIndex(2));
        let mut choice = AiMove::default();
        let mut seen_top = false;
        let mut seen_bottom = false;
        for _ in 0..400 {
            choice = move_ai_paddle(&mut paddle, &ball, choice);
            seen_top |= paddle.pos.y == 0;
            seen_bottom |= paddle.pos.y == 150;
        }
        assert!(seen_top && seen_bottom, "Paddle sweeps the full range");
    }

    #[test]
    fn test_stays_in_range_for_random_balls() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut paddle = Paddle::ai(ColorIndex(1));
        let mut choice = AiMove::default();
        let headings = [Heading::West, Heading::NorthWest, Heading::SouthWest, Heading::East];
        for _ in 0..20_000 {
            let ball = ball_at(rng.gen_range(0..=160), headings[rng.gen_range(0..4)]);
            choice = move_ai_paddle(&mut paddle, &ball, choice);
            assert!((0..=150).contains(&paddle.pos.y), "y = {}", paddle.pos.y);
        }
    }
}
