use std::time::Duration;

use crate::palette::Rgb15;

/// Fixed geometry and rules for the match
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Screen (mode 4: 8-bit indexed, two pages)
    pub const SCREEN_WIDTH: i32 = 240;
    pub const SCREEN_HEIGHT: i32 = 160;

    // Paddles
    pub const PADDLE_SIZE: i32 = 2;
    pub const PADDLE_HEIGHT_FACTOR: i32 = 5; // height = size * 5
    pub const PADDLE_START_Y: i32 = 80;
    pub const USER_PADDLE_X: i32 = 220;
    pub const AI_PADDLE_X: i32 = 20;
    pub const PADDLE_Y_MIN: i32 = 0;
    pub const PADDLE_Y_MAX: i32 = 150;
    pub const PADDLE_CENTER_OFFSET: i32 = 4; // first of the two center rows

    // Hit bands (exclusive bounds, relative to paddle y)
    pub const USER_BAND_ABOVE: i32 = 1;
    pub const USER_BAND_BELOW: i32 = 9;
    pub const AI_BAND_ABOVE: i32 = 2;
    pub const AI_BAND_BELOW: i32 = 10;

    // Ball
    pub const BALL_SIZE: i32 = 2;
    pub const BALL_SERVE_X: i32 = 120;
    pub const BALL_SERVE_Y: i32 = 80;

    // Field edges
    pub const LEFT_GOAL_X: i32 = 1; // x <= this scores for the user
    pub const RIGHT_GOAL_X: i32 = 235; // x > this (x >= on diagonals) scores for the AI
    pub const TOP_WALL_Y: i32 = 0;
    pub const BOTTOM_WALL_Y: i32 = 160; // westbound reflection row
    pub const BOTTOM_WALL_Y_EAST: i32 = 159; // eastbound reflection row

    // Rendering
    pub const ERASE_MARGIN: i32 = 3;

    // Score
    pub const WIN_SCORE: u8 = 3;

    // Timing
    pub const FRAME_HZ: u32 = 60;
}

/// Runtime configuration: frame pacing and the palette colors
#[derive(Debug, Clone)]
pub struct Config {
    pub frame_hz: u32,
    pub user_paddle_color: Rgb15,
    pub ai_paddle_color: Rgb15,
    pub ball_color: Rgb15,
    pub background_color: Rgb15,
    pub text_color: Rgb15,
    pub ai_won_color: Rgb15,
    pub user_won_color: Rgb15,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_hz: Params::FRAME_HZ,
            user_paddle_color: Rgb15::new(20, 20, 20),
            ai_paddle_color: Rgb15::new(20, 20, 20),
            ball_color: Rgb15::new(0, 10, 20),
            background_color: Rgb15::new(0, 0, 0),
            text_color: Rgb15::new(20, 20, 20),
            ai_won_color: Rgb15::new(20, 0, 0),
            user_won_color: Rgb15::new(0, 20, 0),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration of one display frame; a zero rate is treated as 1 Hz
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_hz.max(1)))
    }

    /// Clamp a paddle's y to the on-screen range
    pub fn clamp_paddle_y(y: i32) -> i32 {
        y.clamp(Params::PADDLE_Y_MIN, Params::PADDLE_Y_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval_default() {
        let config = Config::new();
        let interval = config.frame_interval();
        assert!(
            (interval.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9,
            "Default rate should be 60 Hz"
        );
    }

    #[test]
    fn test_frame_interval_zero_rate() {
        let config = Config {
            frame_hz: 0,
            ..Config::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_clamp_paddle_y() {
        assert_eq!(Config::clamp_paddle_y(-5), Params::PADDLE_Y_MIN);
        assert_eq!(Config::clamp_paddle_y(151), Params::PADDLE_Y_MAX);
        assert_eq!(Config::clamp_paddle_y(80), 80);
    }
}
