use tracing::debug;

use crate::components::{Ball, Direction, Paddle};
use crate::input::Buttons;
use crate::params::Params;
use crate::resources::Events;

/// Move the user paddle one pixel per held direction. Down is applied
/// first and up is then checked against the new position, so holding both
/// leaves the paddle where it started.
pub fn apply_user_input(paddle: &mut Paddle, buttons: Buttons) {
    if buttons.down() && paddle.pos.y <= Params::PADDLE_Y_MAX {
        paddle.nudge(1);
    }
    if buttons.up() && paddle.pos.y > Params::PADDLE_Y_MIN {
        paddle.nudge(-1);
    }
}

/// Launch a parked ball when either vertical button is held
pub fn try_serve(ball: &mut Ball, buttons: Buttons, events: &mut Events) -> bool {
    if ball.direction != Direction::Idle || !buttons.any_vertical() {
        return false;
    }
    debug!("serve");
    ball.direction = Direction::SERVE;
    events.served = true;
    true
}
