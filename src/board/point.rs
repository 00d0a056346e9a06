//! Point states and the two playing colors.
//!
//! The integer codes follow the flat-buffer convention used at the request
//! boundary: `Empty = 0`, first player = 1, second player = 2.

use crate::error::EstimateError;

/// One of the two playing colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Returns the other color.
    pub const fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Returns the stone this player places on the board.
    pub const fn stone(self) -> PointState {
        match self {
            Player::First => PointState::First,
            Player::Second => PointState::Second,
        }
    }

    /// Signed contribution of this player to an aggregate score.
    pub const fn sign(self) -> i32 {
        match self {
            Player::First => 1,
            Player::Second => -1,
        }
    }

    /// Returns the boundary integer code for this player.
    pub const fn code(self) -> i32 {
        self.stone().code()
    }

    /// Parses a player from its boundary integer code.
    ///
    /// `0` (empty) and any unknown code are rejected: only a playing color
    /// can be on move.
    pub fn from_code(code: i32) -> Result<Player, EstimateError> {
        match code {
            1 => Ok(Player::First),
            2 => Ok(Player::Second),
            other => Err(EstimateError::InvalidParameter(format!(
                "player to move must be 1 or 2, got {}",
                other
            ))),
        }
    }

    /// Parses a player from a CLI name.
    pub fn from_name(name: &str) -> Option<Player> {
        match name.to_ascii_lowercase().as_str() {
            "first" | "black" | "b" | "x" | "1" => Some(Player::First),
            "second" | "white" | "w" | "o" | "2" => Some(Player::Second),
            _ => None,
        }
    }
}

/// The state of a single point on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointState {
    #[default]
    Empty,
    First,
    Second,
}

impl PointState {
    /// Returns the player owning this point, if any.
    pub const fn player(self) -> Option<Player> {
        match self {
            PointState::Empty => None,
            PointState::First => Some(Player::First),
            PointState::Second => Some(Player::Second),
        }
    }

    /// Returns true if no stone occupies the point.
    pub const fn is_empty(self) -> bool {
        matches!(self, PointState::Empty)
    }

    /// Returns the same point with the colors exchanged.
    pub const fn swapped(self) -> PointState {
        match self {
            PointState::Empty => PointState::Empty,
            PointState::First => PointState::Second,
            PointState::Second => PointState::First,
        }
    }

    /// Returns the boundary integer code.
    pub const fn code(self) -> i32 {
        match self {
            PointState::Empty => 0,
            PointState::First => 1,
            PointState::Second => 2,
        }
    }

    /// Parses a point state from its boundary integer code.
    pub fn from_code(code: i32) -> Option<PointState> {
        match code {
            0 => Some(PointState::Empty),
            1 => Some(PointState::First),
            2 => Some(PointState::Second),
            _ => None,
        }
    }
}

impl From<Player> for PointState {
    fn from(player: Player) -> Self {
        player.stone()
    }
}

impl TryFrom<PointState> for Player {
    type Error = EstimateError;

    fn try_from(state: PointState) -> Result<Self, Self::Error> {
        state.player().ok_or_else(|| {
            EstimateError::InvalidParameter("an empty point is not a playing color".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        for p in [Player::First, Player::Second] {
            assert_ne!(p.opponent(), p);
            assert_eq!(p.opponent().opponent(), p);
        }
    }

    #[test]
    fn point_codes_roundtrip() {
        for s in [PointState::Empty, PointState::First, PointState::Second] {
            assert_eq!(PointState::from_code(s.code()), Some(s));
        }
        assert_eq!(PointState::from_code(3), None);
        assert_eq!(PointState::from_code(-1), None);
    }

    #[test]
    fn player_from_code_rejects_empty() {
        assert_eq!(Player::from_code(1), Ok(Player::First));
        assert_eq!(Player::from_code(2), Ok(Player::Second));
        assert!(matches!(
            Player::from_code(0),
            Err(EstimateError::InvalidParameter(_))
        ));
        assert!(Player::try_from(PointState::Empty).is_err());
        assert_eq!(Player::try_from(PointState::Second), Ok(Player::Second));
    }

    #[test]
    fn player_names() {
        assert_eq!(Player::from_name("Black"), Some(Player::First));
        assert_eq!(Player::from_name("second"), Some(Player::Second));
        assert_eq!(Player::from_name("red"), None);
    }

    #[test]
    fn swapped_exchanges_colors_only() {
        assert_eq!(PointState::Empty.swapped(), PointState::Empty);
        assert_eq!(PointState::First.swapped(), PointState::Second);
        assert_eq!(PointState::Second.swapped(), PointState::First);
    }
}
