//! Naughts-and-crosses fixture shared by the integration tests.
#![allow(dead_code)]

use mcts_engine::GameState;

/// A 3x3 board where `1` is X, `-1` is O and `0` is empty
///
/// Rewards are from X's point of view: `1.0` for an X line, `-1.0` for an O
/// line and `0.0` otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NaughtsAndCrosses {
    pub board: [[i8; 3]; 3],
    pub current_player: i8,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub player: i8,
    pub x: usize,
    pub y: usize,
}

impl NaughtsAndCrosses {
    pub fn new() -> Self {
        NaughtsAndCrosses {
            board: [[0; 3]; 3],
            current_player: 1,
        }
    }

    /// Builds a position from rows of `X`, `O` and `.`
    pub fn from_rows(rows: [&str; 3], current_player: i8) -> Self {
        let mut board = [[0; 3]; 3];
        for (x, row) in rows.iter().enumerate() {
            for (y, cell) in row.chars().enumerate() {
                board[x][y] = match cell {
                    'X' => 1,
                    'O' => -1,
                    _ => 0,
                };
            }
        }
        NaughtsAndCrosses {
            board,
            current_player,
        }
    }

    fn lines(&self) -> impl Iterator<Item = i8> + '_ {
        let b = &self.board;
        let rows = (0..3).map(move |x| b[x][0] + b[x][1] + b[x][2]);
        let cols = (0..3).map(move |y| b[0][y] + b[1][y] + b[2][y]);
        let diagonals = [b[0][0] + b[1][1] + b[2][2], b[0][2] + b[1][1] + b[2][0]];
        rows.chain(cols).chain(diagonals)
    }

    pub fn winner(&self) -> Option<i8> {
        self.lines().find(|sum| sum.abs() == 3).map(|sum| sum / 3)
    }

    pub fn is_full(&self) -> bool {
        self.board.iter().flatten().all(|&cell| cell != 0)
    }
}

impl GameState for NaughtsAndCrosses {
    type Action = Move;
    type Player = i8;

    fn get_possible_actions(&self) -> Vec<Move> {
        let mut actions = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                if self.board[x][y] == 0 {
                    actions.push(Move {
                        player: self.current_player,
                        x,
                        y,
                    });
                }
            }
        }
        actions
    }

    fn take_action(&self, action: &Move) -> Self {
        let mut next = self.clone();
        next.board[action.x][action.y] = action.player;
        next.current_player = -self.current_player;
        next
    }

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    fn get_reward(&self) -> f64 {
        self.winner().map(f64::from).unwrap_or(0.0)
    }

    fn get_current_player(&self) -> i8 {
        self.current_player
    }
}
