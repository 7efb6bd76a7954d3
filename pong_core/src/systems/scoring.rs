use tracing::info;

use crate::components::{Ball, Direction, Goal};
use crate::fsm::{MatchAction, MatchFsm};
use crate::resources::{Events, Player, Score};

/// Credit a goal and park the ball back at the serve point
pub fn check_scoring(ball: &mut Ball, score: &mut Score, events: &mut Events) -> Option<Player> {
    let Direction::Scored(goal) = ball.direction else {
        return None;
    };

    let scorer = match goal {
        // Ball got past the AI paddle
        Goal::LeftWall => Player::User,
        Goal::RightWall => Player::Ai,
    };
    score.increment(scorer);
    events.scored = Some(scorer);
    ball.reset();

    info!(?scorer, points = score.get(scorer), "point scored");
    Some(scorer)
}

/// Move the match to its won state once either side reaches the target
pub fn check_winner(score: &Score, fsm: &mut MatchFsm, events: &mut Events) -> Option<Player> {
    let winner = score.winner()?;
    let result = fsm.transition(MatchAction::Win(winner));
    if !result.success {
        return None;
    }
    events.won = Some(winner);
    info!(?winner, user = score.user, ai = score.ai, "match over");
    Some(winner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Heading;
    use crate::fsm::MatchState;
    use crate::palette::ColorIndex;
    use glam::IVec2;

    fn scored_ball(goal: Goal) -> Ball {
        let mut ball = Ball::new(ColorIndex(2));
        ball.pos = IVec2::new(236, 40);
        ball.direction = Direction::Scored(goal);
        ball
    }

    fn playing() -> MatchFsm {
        let mut fsm = MatchFsm::new();
        fsm.transition(MatchAction::Serve);
        fsm
    }

    #[test]
    fn test_right_wall_scores_for_ai() {
        let mut ball = scored_ball(Goal::RightWall);
        let mut score = Score::new();
        let mut events = Events::new();

        assert_eq!(check_scoring(&mut ball, &mut score, &mut events), Some(Player::Ai));
        assert_eq!(score, Score { user: 0, ai: 1 });
        assert_eq!(events.scored, Some(Player::Ai));
        assert_eq!(ball.pos, IVec2::new(120, 80), "Ball should return to serve point");
        assert_eq!(ball.direction, Direction::Idle);
    }

    #[test]
    fn test_left_wall_scores_for_user() {
        let mut ball = scored_ball(Goal::LeftWall);
        let mut score = Score::new();
        let mut events = Events::new();

        check_scoring(&mut ball, &mut score, &mut events);
        assert_eq!(score, Score { user: 1, ai: 0 });
        assert_eq!(events.scored, Some(Player::User));
    }

    #[test]
    fn test_moving_ball_does_not_score() {
        let mut ball = Ball::new(ColorIndex(2));
        ball.direction = Direction::Moving(Heading::West);
        let mut score = Score::new();
        let mut events = Events::new();

        assert_eq!(check_scoring(&mut ball, &mut score, &mut events), None);
        assert_eq!(score, Score::new());
        assert_eq!(events, Events::new());
    }

    #[test]
    fn test_winner_moves_fsm() {
        let mut fsm = playing();
        let mut events = Events::new();
        let score = Score { user: 1, ai: 3 };

        assert_eq!(check_winner(&score, &mut fsm, &mut events), Some(Player::Ai));
        assert_eq!(fsm.state(), MatchState::AiWon);
        assert_eq!(events.won, Some(Player::Ai));
    }

    #[test]
    fn test_user_win() {
        let mut fsm = playing();
        let mut events = Events::new();
        let score = Score { user: 3, ai: 2 };

        assert_eq!(check_winner(&score, &mut fsm, &mut events), Some(Player::User));
        assert_eq!(fsm.state(), MatchState::UserWon);
    }

    #[test]
    fn test_no_winner_below_three() {
        let mut fsm = playing();
        let mut events = Events::new();
        let score = Score { user: 2, ai: 2 };

        assert_eq!(check_winner(&score, &mut fsm, &mut events), None);
        assert_eq!(fsm.state(), MatchState::Playing);
        assert_eq!(events.won, None);
    }

    #[test]
    fn test_winner_reported_once() {
        let mut fsm = playing();
        let mut events = Events::new();
        let score = Score { user: 3, ai: 0 };

        check_winner(&score, &mut fsm, &mut events);
        events.clear();
        assert_eq!(
            check_winner(&score, &mut fsm, &mut events),
            None,
            "Already won; the transition is not repeated"
        );
        assert_eq!(events.won, None);
    }
}
