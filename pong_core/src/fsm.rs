//! Match State Machine
//!
//! Idle -> Playing -> {AiWon, UserWon} -> Frozen. Every transition moves
//! forward; Frozen is terminal.

use crate::resources::Player;

/// Match states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// Ball parked, waiting for the first serve
    Idle,
    Playing,
    AiWon,
    UserWon,
    /// Winner banner shown; nothing changes any more
    Frozen,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    Serve,
    Win(Player),
    BannerShown,
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: MatchState,
    pub to_state: MatchState,
    pub action: MatchAction,
}

/// Match Finite State Machine
#[derive(Debug, Clone)]
pub struct MatchFsm {
    state: MatchState,
}

impl MatchFsm {
    pub fn new() -> Self {
        Self {
            state: MatchState::Idle,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Check if a transition is valid
    pub fn can_transition(&self, action: MatchAction) -> bool {
        self.get_next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: MatchAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    fn get_next_state(&self, action: MatchAction) -> Option<MatchState> {
        match (self.state, action) {
            (MatchState::Idle, MatchAction::Serve) => Some(MatchState::Playing),

            (MatchState::Playing, MatchAction::Win(Player::Ai)) => Some(MatchState::AiWon),
            (MatchState::Playing, MatchAction::Win(Player::User)) => Some(MatchState::UserWon),

            (MatchState::AiWon | MatchState::UserWon, MatchAction::BannerShown) => {
                Some(MatchState::Frozen)
            }

            _ => None,
        }
    }

    /// Ball and scores may still change
    pub fn is_live(&self) -> bool {
        matches!(self.state, MatchState::Idle | MatchState::Playing)
    }

    /// Winner decided but banner not yet shown
    pub fn pending_winner(&self) -> Option<Player> {
        match self.state {
            MatchState::AiWon => Some(Player::Ai),
            MatchState::UserWon => Some(Player::User),
            _ => None,
        }
    }
}

impl Default for MatchFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let fsm = MatchFsm::new();
        assert_eq!(fsm.state(), MatchState::Idle);
        assert!(fsm.is_live());
    }

    #[test]
    fn test_full_match_flow() {
        let mut fsm = MatchFsm::new();
        assert!(fsm.transition(MatchAction::Serve).success);
        assert_eq!(fsm.state(), MatchState::Playing);
        fsm.transition(MatchAction::Win(Player::Ai));
        assert_eq!(fsm.state(), MatchState::AiWon);
        assert_eq!(fsm.pending_winner(), Some(Player::Ai));
        fsm.transition(MatchAction::BannerShown);
        assert_eq!(fsm.state(), MatchState::Frozen);
        assert!(!fsm.is_live(), "Nothing moves once frozen");
    }

    #[test]
    fn test_serve_only_leaves_idle() {
        let mut fsm = MatchFsm::new();
        fsm.transition(MatchAction::Serve);
        let result = fsm.transition(MatchAction::Serve);
        assert!(!result.success, "Later serves do not change the match state");
        assert_eq!(fsm.state(), MatchState::Playing);
    }

    #[test]
    fn test_frozen_is_terminal() {
        let mut fsm = MatchFsm::new();
        fsm.transition(MatchAction::Serve);
        fsm.transition(MatchAction::Win(Player::User));
        fsm.transition(MatchAction::BannerShown);
        for action in [
            MatchAction::Serve,
            MatchAction::Win(Player::Ai),
            MatchAction::Win(Player::User),
            MatchAction::BannerShown,
        ] {
            assert!(!fsm.can_transition(action), "{action:?} must not leave Frozen");
        }
    }

    #[test]
    fn test_cannot_win_before_playing() {
        let mut fsm = MatchFsm::new();
        let result = fsm.transition(MatchAction::Win(Player::User));
        assert!(!result.success);
        assert_eq!(result.to_state, MatchState::Idle);
    }
}
