use mcts_engine::{GameState, MCTSConfig, NoPlayer, MCTS};

// Simple game state for testing visualization
#[derive(Clone, Debug)]
struct TestGame {
    depth: usize,
    max_depth: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TestAction(usize);

impl GameState for TestGame {
    type Action = TestAction;
    type Player = NoPlayer;

    fn get_possible_actions(&self) -> Vec<Self::Action> {
        if self.depth >= self.max_depth {
            vec![]
        } else {
            vec![TestAction(0), TestAction(1)]
        }
    }

    fn take_action(&self, _action: &Self::Action) -> Self {
        Self {
            depth: self.depth + 1,
            max_depth: self.max_depth,
        }
    }

    fn is_terminal(&self) -> bool {
        self.depth >= self.max_depth
    }

    fn get_reward(&self) -> f64 {
        0.5
    }

    fn get_current_player(&self) -> Self::Player {
        NoPlayer
    }
}

#[test]
fn test_tree_visualization() {
    let game = TestGame {
        depth: 0,
        max_depth: 2,
    };

    let config = MCTSConfig::default().with_iteration_limit(20).with_seed(0);
    let mut mcts = MCTS::new(config).unwrap();

    assert_eq!(mcts.visualize_tree(), "", "Nothing to show before a search");

    mcts.search(game).unwrap();
    let tree_vis = mcts.visualize_tree();

    assert!(tree_vis.starts_with("Root (visits: 20, value: 0.500)"));
    assert!(tree_vis.contains("  TestAction(0)"));
    assert!(tree_vis.contains("    TestAction(1)"));

    // A depth-two binary tree has seven nodes once fully expanded
    assert_eq!(tree_vis.lines().count(), 7);
    assert_eq!(mcts.get_statistics().tree_size, 7);
    assert_eq!(mcts.get_statistics().max_depth, 2);
}
