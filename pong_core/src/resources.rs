use crate::params::Params;

/// One of the two sides of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    User,
    Ai,
}

/// Match score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub user: u8,
    pub ai: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, player: Player) {
        match player {
            Player::User => self.user += 1,
            Player::Ai => self.ai += 1,
        }
    }

    pub fn get(&self, player: Player) -> u8 {
        match player {
            Player::User => self.user,
            Player::Ai => self.ai,
        }
    }

    /// The AI is checked first, matching the order of the win test
    pub fn winner(&self) -> Option<Player> {
        if self.ai == Params::WIN_SCORE {
            Some(Player::Ai)
        } else if self.user == Params::WIN_SCORE {
            Some(Player::User)
        } else {
            None
        }
    }
}

/// Things that happened during the current frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub served: bool,
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
    pub scored: Option<Player>,
    pub won: Option<Player>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_increment() {
        let mut score = Score::new();
        score.increment(Player::User);
        score.increment(Player::Ai);
        score.increment(Player::Ai);
        assert_eq!(score.user, 1);
        assert_eq!(score.ai, 2);
        assert_eq!(score.get(Player::Ai), 2);
    }

    #[test]
    fn test_score_winner_at_three() {
        let mut score = Score::new();
        for _ in 0..2 {
            score.increment(Player::User);
        }
        assert_eq!(score.winner(), None, "No winner below threshold");
        score.increment(Player::User);
        assert_eq!(score.winner(), Some(Player::User));
    }

    #[test]
    fn test_score_winner_ai() {
        let score = Score { user: 2, ai: 3 };
        assert_eq!(score.winner(), Some(Player::Ai));
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.served = true;
        events.ball_hit_paddle = true;
        events.ball_hit_wall = true;
        events.scored = Some(Player::Ai);
        events.won = Some(Player::Ai);

        events.clear();

        assert_eq!(events, Events::default());
    }
}
