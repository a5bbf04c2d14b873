//! Naughts-and-crosses self-play for the search engine
//!
//! Runs a competitive game where both sides use MCTS. Pass `--cooperative`
//! to instead play the cooperative variant, where both agents try to finish
//! with a chequered board.

use std::fmt;

use mcts_engine::{GameState, MCTSConfig, NoPlayer, MCTS};

fn main() {
    // Initialize logging
    env_logger::init();

    let cooperative = std::env::args().any(|arg| arg == "--cooperative");

    let config = MCTSConfig::default().with_iteration_limit(5_000);

    let result = if cooperative {
        println!("MCTS Cooperative Naughts and Crosses");
        println!("====================================");
        play(Cooperative(Board::new()), config)
    } else {
        println!("MCTS Naughts and Crosses");
        println!("========================");
        play(Board::new(), config)
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn play<S>(mut game: S, config: MCTSConfig) -> mcts_engine::Result<()>
where
    S: GameState<Action = Move> + fmt::Display + 'static,
{
    let mut mcts = MCTS::new(config)?;

    while !game.is_terminal() {
        println!("{}", game);

        let (action, value) = mcts.search_with_details(game.clone())?;
        println!(
            "{} plays row {}, col {} (expected reward {:.3})",
            symbol(action.player),
            action.x,
            action.y,
            value
        );
        println!("{}", mcts.get_statistics().summary());

        game = game.take_action(&action);
    }

    println!("{}", game);
    println!("Final reward: {}", game.get_reward());
    Ok(())
}

fn symbol(cell: i8) -> &'static str {
    match cell {
        1 => "X",
        -1 => "O",
        _ => ".",
    }
}

/// Naughts-and-crosses move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Move {
    player: i8,
    x: usize,
    y: usize,
}

/// Competitive game; rewards are from X's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
struct Board {
    /// 1 = X, -1 = O, 0 = empty
    cells: [[i8; 3]; 3],
    current_player: i8,
}

impl Board {
    fn new() -> Self {
        Board {
            cells: [[0; 3]; 3],
            current_player: 1,
        }
    }

    fn winner(&self) -> Option<i8> {
        let c = &self.cells;
        let mut lines = Vec::with_capacity(8);
        for i in 0..3 {
            lines.push(c[i][0] + c[i][1] + c[i][2]);
            lines.push(c[0][i] + c[1][i] + c[2][i]);
        }
        lines.push(c[0][0] + c[1][1] + c[2][2]);
        lines.push(c[0][2] + c[1][1] + c[2][0]);

        lines.into_iter().find(|sum| sum.abs() == 3).map(|sum| sum / 3)
    }

    fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != 0)
    }

    fn empty_cells(&self) -> Vec<Move> {
        let mut actions = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                if self.cells[x][y] == 0 {
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

    fn play(&self, action: &Move) -> Self {
        let mut next = self.clone();
        next.cells[action.x][action.y] = action.player;
        next.current_player = -self.current_player;
        next
    }

    fn neighbours(x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .map(move |(dx, dy)| (x as i32 + dx, y as i32 + dy))
            .filter(|&(nx, ny)| (0..3).contains(&nx) && (0..3).contains(&ny))
            .map(|(nx, ny)| (nx as usize, ny as usize))
    }
}

impl GameState for Board {
    type Action = Move;
    type Player = i8;

    fn get_possible_actions(&self) -> Vec<Move> {
        self.empty_cells()
    }

    fn take_action(&self, action: &Move) -> Self {
        self.play(action)
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

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2")?;
        for (x, row) in self.cells.iter().enumerate() {
            write!(f, "{} ", x)?;
            for &cell in row {
                write!(f, "{} ", symbol(cell))?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\n{}'s turn", symbol(self.current_player))
    }
}

/// Cooperative variant: both agents win if the full board is chequered
///
/// The agents share one goal, so the player sign is constant.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Cooperative(Board);

impl Cooperative {
    /// True if `symbol` at (x, y) would not touch the same symbol
    fn can_place(&self, x: usize, y: usize, symbol: i8) -> bool {
        Board::neighbours(x, y).all(|(nx, ny)| self.0.cells[nx][ny] != symbol)
    }

    fn is_chequered(&self) -> bool {
        let cells = &self.0.cells;
        (0..3).all(|x| {
            (0..3).all(|y| Board::neighbours(x, y).all(|(nx, ny)| cells[x][y] != cells[nx][ny]))
        })
    }
}

impl GameState for Cooperative {
    type Action = Move;
    type Player = NoPlayer;

    fn get_possible_actions(&self) -> Vec<Move> {
        self.0.empty_cells()
    }

    fn take_action(&self, action: &Move) -> Self {
        Cooperative(self.0.play(action))
    }

    fn is_terminal(&self) -> bool {
        if self.0.is_full() {
            return true;
        }

        // The pattern is lost once some empty cell can take neither symbol
        (0..3).any(|x| {
            (0..3).any(|y| {
                self.0.cells[x][y] == 0 && !self.can_place(x, y, 1) && !self.can_place(x, y, -1)
            })
        })
    }

    fn get_reward(&self) -> f64 {
        if self.0.is_full() && self.is_chequered() {
            1.0
        } else {
            0.0
        }
    }

    fn get_current_player(&self) -> NoPlayer {
        NoPlayer
    }
}

impl fmt::Display for Cooperative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
