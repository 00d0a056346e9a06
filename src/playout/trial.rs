//! A single randomized playout.
//!
//! Starting from a private copy of the position, the two sides alternate
//! placing stones on uniformly chosen informative points until neither side
//! has one left (two consecutive passes) or the step bound is reached. The
//! settled position is then converted to an ownership snapshot.
//!
//! A point is informative for the side on move when playing there is legal
//! and useful:
//! - not occupied, not suicide, not an immediate single-stone ko recapture;
//! - not one of the mover's own eyes;
//! - not a self-atari of a multi-stone group that captures nothing.
//!
//! Every rule is stated relative to the side on move, so a color-swapped
//! position driven by the same random stream plays out as an exact mirror.

use rand::Rng;

use crate::board::group::{collect_group, liberties_up_to};
use crate::board::territory::ownership_snapshot;
use crate::board::{Board, Player, PointState};

/// How a playout ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialSummary {
    /// Stones placed during the playout.
    pub moves: usize,
    /// Stones removed by captures.
    pub captures: usize,
    /// True if the step bound cut the playout short.
    pub hit_step_bound: bool,
}

/// Plays one trial out from `board` with `to_move` starting, returning the
/// ownership snapshot and a summary.
pub fn play_out<R: Rng + ?Sized>(
    board: &Board,
    to_move: Player,
    max_moves: usize,
    rng: &mut R,
) -> (Board, TrialSummary) {
    let mut playout = Playout::new(board.clone(), to_move);
    let summary = playout.run(max_moves, rng);
    (ownership_snapshot(&playout.board), summary)
}

/// Working state of one playout.
struct Playout {
    board: Board,
    to_move: Player,
    /// Empty points not yet tried since the last stone was placed.
    candidates: Vec<usize>,
    /// Empty points rejected for the side on move; retried after the next
    /// stone or pass.
    deferred: Vec<usize>,
    /// Point the side on move may not retake immediately.
    ko: Option<usize>,
    captures: usize,
}

impl Playout {
    fn new(board: Board, to_move: Player) -> Self {
        let candidates = (0..board.len())
            .filter(|&idx| board.at(idx).is_empty())
            .collect();
        Playout {
            board,
            to_move,
            candidates,
            deferred: Vec::new(),
            ko: None,
            captures: 0,
        }
    }

    fn run<R: Rng + ?Sized>(&mut self, max_moves: usize, rng: &mut R) -> TrialSummary {
        let mut moves = 0;
        let mut passes = 0;

        while moves < max_moves {
            if self.play_random(rng) {
                moves += 1;
                passes = 0;
            } else {
                passes += 1;
                if passes >= 2 {
                    break;
                }
                self.pass();
            }
        }

        TrialSummary {
            moves,
            captures: self.captures,
            hit_step_bound: moves >= max_moves,
        }
    }

    /// Tries random candidates until one is informative and plays it.
    /// Returns false if the side on move has nothing left to play.
    fn play_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        while !self.candidates.is_empty() {
            let pick = rng.gen_range(0..self.candidates.len());
            let pt = self.candidates.swap_remove(pick);
            if !self.board.at(pt).is_empty() {
                continue;
            }
            if self.try_play(pt) {
                return true;
            }
            self.deferred.push(pt);
        }
        false
    }

    fn pass(&mut self) {
        self.candidates.append(&mut self.deferred);
        self.ko = None;
        self.to_move = self.to_move.opponent();
    }

    /// Plays `pt` for the side on move if it is informative.
    fn try_play(&mut self, pt: usize) -> bool {
        let player = self.to_move;
        if self.ko == Some(pt) || is_own_eye(&self.board, pt, player) {
            return false;
        }

        let stone = player.stone();
        let enemy = player.opponent().stone();
        self.board.put(pt, stone);

        let mut captured = Vec::new();
        for n in self.board.neighbor_indices(pt) {
            if self.board.at(n) != enemy || liberties_up_to(&self.board, n, 1) > 0 {
                continue;
            }
            if let Some(group) = collect_group(&self.board, n) {
                for &s in &group.stones {
                    self.board.put(s, PointState::Empty);
                }
                captured.extend(group.stones);
            }
        }

        let libs = liberties_up_to(&self.board, pt, 2);
        if captured.is_empty() {
            let self_atari = libs == 1 && group_size(&self.board, pt) > 1;
            if libs == 0 || self_atari {
                self.board.put(pt, PointState::Empty);
                return false;
            }
        }

        let lone_stone = self
            .board
            .neighbor_indices(pt)
            .all(|n| self.board.at(n) != stone);
        self.ko = if captured.len() == 1 && lone_stone && libs == 1 {
            Some(captured[0])
        } else {
            None
        };

        self.captures += captured.len();
        self.candidates.append(&mut self.deferred);
        self.candidates.extend(captured);
        self.to_move = player.opponent();
        true
    }
}

fn group_size(board: &Board, pt: usize) -> usize {
    collect_group(board, pt).map_or(0, |g| g.stones.len())
}

/// Returns true if `pt` is an eye of `player`: every orthogonal neighbor is
/// one of `player`'s stones and the diagonals do not make it a false eye.
pub(crate) fn is_own_eye(board: &Board, pt: usize, player: Player) -> bool {
    let stone = player.stone();
    if board.neighbor_indices(pt).any(|n| board.at(n) != stone) {
        return false;
    }
    let enemy = player.opponent().stone();
    let enemy_diagonals = board
        .diagonal_indices(pt)
        .filter(|&d| board.at(d) == enemy)
        .count();
    if board.on_edge(pt) {
        enemy_diagonals == 0
    } else {
        enemy_diagonals < 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::diagram::parse_diagram;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn idx(board: &Board, x: usize, y: usize) -> usize {
        board.index(x, y)
    }

    #[test]
    fn corner_eye_detected() {
        let board = parse_diagram(
            ".X.\n\
             XX.\n\
             ...",
        )
        .unwrap();
        assert!(is_own_eye(&board, idx(&board, 0, 0), Player::First));
        assert!(!is_own_eye(&board, idx(&board, 0, 0), Player::Second));
        assert!(!is_own_eye(&board, idx(&board, 2, 2), Player::First));
    }

    #[test]
    fn edge_eye_with_enemy_diagonal_is_false() {
        let board = parse_diagram(
            "X.XO\n\
             OX..\n\
             ....",
        )
        .unwrap();
        assert!(!is_own_eye(&board, idx(&board, 1, 0), Player::First));
    }

    #[test]
    fn center_eye_tolerates_one_enemy_diagonal() {
        let board = parse_diagram(
            "OX.\n\
             X.X\n\
             .X.",
        )
        .unwrap();
        assert!(is_own_eye(&board, idx(&board, 1, 1), Player::First));

        let board = parse_diagram(
            "OX.\n\
             X.X\n\
             .XO",
        )
        .unwrap();
        assert!(!is_own_eye(&board, idx(&board, 1, 1), Player::First));
    }

    #[test]
    fn suicide_is_rejected() {
        let board = parse_diagram(
            ".X.\n\
             X.X\n\
             XXX",
        )
        .unwrap();
        let mut playout = Playout::new(board.clone(), Player::Second);
        assert!(!playout.try_play(idx(&board, 1, 1)));
        assert_eq!(playout.board, board);
    }

    #[test]
    fn capture_removes_stones_and_frees_points() {
        let board = parse_diagram(
            ".X...\n\
             XO...\n\
             .X...",
        )
        .unwrap();
        let mut playout = Playout::new(board.clone(), Player::First);
        assert!(playout.try_play(idx(&board, 2, 1)));
        assert_eq!(playout.board.at(idx(&board, 1, 1)), PointState::Empty);
        assert_eq!(playout.captures, 1);
        assert!(playout.candidates.contains(&idx(&board, 1, 1)));
        assert_eq!(playout.to_move, Player::Second);
    }

    #[test]
    fn immediate_ko_recapture_is_rejected() {
        let board = parse_diagram(
            ".XO.\n\
             XO.O\n\
             .XO.",
        )
        .unwrap();
        let mut playout = Playout::new(board.clone(), Player::First);
        // First captures at (2,1), Second may not retake at (1,1) at once.
        assert!(playout.try_play(idx(&board, 2, 1)));
        assert_eq!(playout.ko, Some(idx(&board, 1, 1)));
        assert!(!playout.try_play(idx(&board, 1, 1)));
    }

    #[test]
    fn multi_stone_self_atari_is_rejected() {
        let board = parse_diagram(
            "X.O..\n\
             XOO..\n\
             .O...",
        )
        .unwrap();
        let mut playout = Playout::new(board.clone(), Player::First);
        assert!(!playout.try_play(idx(&board, 0, 2)));
        assert_eq!(playout.board, board);
    }

    #[test]
    fn filled_board_settles_without_moves() {
        let board = parse_diagram(
            ".XX\n\
             XX.\n\
             XXX",
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        let (outcome, summary) = play_out(&board, Player::Second, 100, &mut rng);
        assert_eq!(summary.moves, 0);
        assert!(!summary.hit_step_bound);
        assert!(outcome.cells().iter().all(|&c| c == PointState::First));
    }

    #[test]
    fn dead_stone_is_captured() {
        let board = parse_diagram(
            ".XXXX\n\
             XXXXX\n\
             XXO.X\n\
             XXXXX\n\
             XXXX.",
        )
        .unwrap();
        for to_move in [Player::First, Player::Second] {
            let mut rng = SmallRng::seed_from_u64(11);
            let (outcome, summary) = play_out(&board, to_move, 100, &mut rng);
            assert_eq!(summary.captures, 1);
            assert!(outcome.cells().iter().all(|&c| c == PointState::First));
        }
    }

    #[test]
    fn step_bound_is_respected() {
        let board = Board::new(9, 9).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let (_, summary) = play_out(&board, Player::First, 5, &mut rng);
        assert_eq!(summary.moves, 5);
        assert!(summary.hit_step_bound);
    }

    #[test]
    fn playout_leaves_input_untouched() {
        let board = parse_diagram(
            "..X..\n\
             .OX..\n\
             .....",
        )
        .unwrap();
        let before = board.clone();
        let mut rng = SmallRng::seed_from_u64(5);
        let _ = play_out(&board, Player::First, 200, &mut rng);
        assert_eq!(board, before);
    }
}
