//! MCTS integration tests on Amazons positions and a scripted game.

use amazons_mcts::core::{Cell, Move, PlayerId};
use amazons_mcts::games::amazons::{Amazons, AmazonsBuilder};
use amazons_mcts::mcts::{
    group_by_relocation, Difficulty, MCTSConfig, MCTSSearch, SearchError, StopReason,
};
use amazons_mcts::rules::GameState;

fn config(iterations: u32) -> MCTSConfig {
    MCTSConfig::default()
        .with_max_iterations(iterations)
        .with_timeout_secs(60.0)
        .with_seed(2024)
}

/// W . . B on a 4x1 strip.
fn corridor() -> Amazons {
    AmazonsBuilder::new()
        .size(4, 1)
        .amazon(PlayerId::FIRST, Cell::new(0, 0))
        .amazon(PlayerId::SECOND, Cell::new(3, 0))
        .build()
        .unwrap()
}

/// 5x5 board with two amazons a side.
fn small_board() -> Amazons {
    AmazonsBuilder::new()
        .size(5, 5)
        .amazon(PlayerId::FIRST, Cell::new(0, 1))
        .amazon(PlayerId::FIRST, Cell::new(4, 1))
        .amazon(PlayerId::SECOND, Cell::new(1, 4))
        .amazon(PlayerId::SECOND, Cell::new(3, 4))
        .build()
        .unwrap()
}

// =============================================================================
// Scripted Game
// =============================================================================

/// Two candidate moves: move 0 lets the opponent reply and then leaves the
/// first player stuck, move 1 leaves the opponent stuck at once.
#[derive(Clone)]
struct TwoBranches {
    history: Vec<Move>,
    to_move: PlayerId,
}

fn branch_move(col: i8) -> Move {
    Move::new(Cell::new(col, 0), Cell::new(col, 1), Cell::new(col, 2))
}

impl GameState for TwoBranches {
    fn legal_moves(&self, _player: PlayerId) -> Vec<Move> {
        match self.history.as_slice() {
            [] => vec![branch_move(0), branch_move(1)],
            [first] if *first == branch_move(0) => vec![branch_move(7)],
            _ => Vec::new(),
        }
    }

    fn apply_move(&mut self, _player: PlayerId, mv: &Move) {
        self.history.push(*mv);
    }

    fn side_to_move(&self) -> PlayerId {
        self.to_move
    }

    fn advance_turn(&mut self) {
        self.to_move = self.to_move.opponent();
    }
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_single_legal_move_returns_zero() {
    // a1-b1 with the arrow back to a1 is the only move
    let game = AmazonsBuilder::new()
        .size(2, 1)
        .amazon(PlayerId::FIRST, Cell::new(0, 0))
        .build()
        .unwrap();
    let moves = game.legal_moves(PlayerId::FIRST);
    assert_eq!(moves.len(), 1);

    let mut search = MCTSSearch::new(config(100));

    assert_eq!(search.search(&game, &moves, PlayerId::FIRST), Ok(0));
}

#[test]
fn test_two_branch_game_picks_winner() {
    let game = TwoBranches {
        history: Vec::new(),
        to_move: PlayerId::FIRST,
    };
    let moves = game.legal_moves(PlayerId::FIRST);

    for seed in 0..5 {
        let mut search = MCTSSearch::new(config(300).with_seed(seed));
        assert_eq!(search.search(&game, &moves, PlayerId::FIRST), Ok(1));
    }
}

#[test]
fn test_two_branch_game_second_player() {
    // Same script, searched for the second side
    let game = TwoBranches {
        history: Vec::new(),
        to_move: PlayerId::SECOND,
    };
    let moves = game.legal_moves(PlayerId::SECOND);
    let mut search = MCTSSearch::new(config(300));

    assert_eq!(search.search(&game, &moves, PlayerId::SECOND), Ok(1));
}

#[test]
fn test_search_for_side_not_to_move_is_rejected() {
    let game = TwoBranches {
        history: Vec::new(),
        to_move: PlayerId::FIRST,
    };
    let moves = game.legal_moves(PlayerId::FIRST);
    let mut search = MCTSSearch::new(config(300).with_seed(1));

    assert_eq!(
        search.search(&game, &moves, PlayerId::SECOND),
        Err(SearchError::WrongSide {
            expected: PlayerId::FIRST,
            got: PlayerId::SECOND,
        })
    );
    assert!(search.tree().is_none());
}

#[test]
fn test_avoids_losing_move() {
    // Only a1-b1/a1 lets the second player escape and win
    let game = corridor();
    let moves = game.legal_moves(PlayerId::FIRST);
    assert_eq!(moves[1], Move::new(Cell::new(0, 0), Cell::new(1, 0), Cell::new(0, 0)));

    let mut search = MCTSSearch::new(config(500));
    let index = search.search(&game, &moves, PlayerId::FIRST).unwrap();

    assert_ne!(index, 1);
}

#[test]
fn test_empty_candidate_list() {
    let game = small_board();
    let mut search = MCTSSearch::new(config(100));

    assert_eq!(
        search.search(&game, &[], PlayerId::FIRST),
        Err(SearchError::NoLegalMoves)
    );
}

#[test]
fn test_caller_game_unchanged() {
    let game = small_board();
    let before = game.clone();
    let moves = game.legal_moves(PlayerId::FIRST);
    let mut search = MCTSSearch::new(config(300));

    search.search(&game, &moves, PlayerId::FIRST).unwrap();

    assert_eq!(game, before);
}

#[test]
fn test_result_indexes_candidate_list() {
    let game = small_board();
    let mut moves = game.legal_moves(PlayerId::FIRST);
    moves.reverse();
    moves.truncate(10);

    let mut search = MCTSSearch::new(config(200));
    let index = search.search(&game, &moves, PlayerId::FIRST).unwrap();

    assert!(index < moves.len());
    assert_eq!(search.stats().root_children, 10);
}

// =============================================================================
// Budget Tests
// =============================================================================

#[test]
fn test_iteration_cap() {
    let game = small_board();
    let moves = game.legal_moves(PlayerId::FIRST);
    let mut search = MCTSSearch::new(config(250));

    search.search(&game, &moves, PlayerId::FIRST).unwrap();

    let stats = search.stats();
    assert_eq!(stats.iterations, 250);
    assert_eq!(stats.simulations, 250);
    assert_eq!(stats.stop_reason, Some(StopReason::IterationCap));
    assert_eq!(stats.final_exploration, 5.0);
    assert!(stats.iterations_per_second() > 0.0);
}

#[test]
fn test_zero_timeout_stops_after_one_iteration() {
    let game = small_board();
    let moves = game.legal_moves(PlayerId::FIRST);
    let mut search = MCTSSearch::new(config(u32::MAX).with_timeout_secs(0.0));

    let index = search.search(&game, &moves, PlayerId::FIRST).unwrap();

    let stats = search.stats();
    assert!(index < moves.len());
    assert_eq!(stats.iterations, 1);
    assert_eq!(stats.stop_reason, Some(StopReason::Timeout));
    // Both decay steps fire once
    assert_eq!(stats.final_exploration, 1.25);
}

#[test]
fn test_short_timeout_is_honoured() {
    let game = AmazonsBuilder::standard().build().unwrap();
    let moves = game.legal_moves(PlayerId::FIRST);
    let mut search = MCTSSearch::new(config(u32::MAX).with_timeout_secs(0.2));

    search.search(&game, &moves, PlayerId::FIRST).unwrap();

    let stats = search.stats();
    assert_eq!(stats.stop_reason, Some(StopReason::Timeout));
    // One playout past the deadline at most
    assert!(stats.time_us < 5_000_000, "took {}us", stats.time_us);
}

#[test]
fn test_difficulty_presets() {
    let easy = MCTSConfig::for_difficulty(Difficulty::Easy);
    assert_eq!(easy.budget.max_iterations, 1_000);
    assert_eq!(easy.budget.timeout_secs, 5.0);

    let god: Difficulty = "God".parse().unwrap();
    assert_eq!(god, Difficulty::GodMode);
    assert_eq!(MCTSConfig::for_difficulty(god).budget.max_iterations, u32::MAX);
}

#[test]
fn test_config_json_round_trip() {
    let config = MCTSConfig::for_difficulty(Difficulty::Hard).with_seed(5);

    let json = serde_json::to_string(&config).unwrap();
    let parsed: MCTSConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, config);
}

// =============================================================================
// Pruning Tests
// =============================================================================

#[test]
fn test_standard_opening_pruned_to_relocations() {
    let game = AmazonsBuilder::standard().build().unwrap();
    let moves = game.legal_moves(PlayerId::FIRST);
    let relocations = group_by_relocation(&moves).len();

    assert_eq!(moves.len(), 2176);
    assert_eq!(relocations, 80);

    let mut search = MCTSSearch::new(config(1));
    let index = search.search(&game, &moves, PlayerId::FIRST).unwrap();

    // Every relocation can shoot back at its origin, so none is discarded
    assert_eq!(search.stats().root_children, relocations);
    assert_eq!(search.stats().discarded_relocations, 0);
    assert_eq!(search.stats().pruned_expansions, 1);
    assert!(index < moves.len());
}

#[test]
fn test_pruned_children_match_caller_moves() {
    let game = AmazonsBuilder::standard().build().unwrap();
    let moves = game.legal_moves(PlayerId::FIRST);
    let mut search = MCTSSearch::new(config(10));

    search.start(&moves, &game, PlayerId::FIRST).unwrap();
    search.step().unwrap();

    let tree = search.tree().unwrap();
    let children = tree.children(tree.root());
    assert_eq!(children.len(), 80);

    for (i, &child) in children.iter().enumerate() {
        let node = tree.get(child);
        assert_eq!(moves[node.source_index], node.mv);
        assert_ne!(node.mv.arrow, node.mv.to);
        // One child per relocation, in first-appearance order
        for &other in &children[..i] {
            assert!(!tree.get(other).mv.same_relocation(&node.mv));
        }
    }
}

#[test]
fn test_threshold_disables_pruning() {
    let game = AmazonsBuilder::standard().build().unwrap();
    let moves = game.legal_moves(PlayerId::FIRST);
    let mut search = MCTSSearch::new(config(1).with_prune_threshold(usize::MAX));

    search.search(&game, &moves, PlayerId::FIRST).unwrap();

    assert_eq!(search.stats().root_children, 2176);
    assert_eq!(search.stats().pruned_expansions, 0);
}

// =============================================================================
// Tree Statistics Tests
// =============================================================================

#[test]
fn test_statistics_monotonic_and_bounded() {
    let game = small_board();
    let moves = game.legal_moves(PlayerId::FIRST);
    let mut search = MCTSSearch::new(config(1_000));
    search.start(&moves, &game, PlayerId::FIRST).unwrap();

    let mut previous: Vec<u32> = Vec::new();

    for step in 1..=150u32 {
        search.step().unwrap();
        let tree = search.tree().unwrap();

        assert_eq!(tree.root_node().visits, step + 1);

        let visits: Vec<u32> = tree.iter().map(|(_, n)| n.visits).collect();
        for (before, after) in previous.iter().zip(&visits) {
            assert!(after >= before, "visits decreased");
        }
        previous = visits;

        for (id, node) in tree.iter() {
            if node.is_root() {
                continue;
            }
            assert!(node.total_reward <= node.visits);
            let through_children: u32 = tree.children(id).iter().map(|&c| tree.get(c).visits).sum();
            assert!(node.visits >= through_children);
        }
    }
}

#[test]
fn test_seeded_searches_agree() {
    let game = small_board();
    let moves = game.legal_moves(PlayerId::FIRST);

    let mut a = MCTSSearch::new(config(300));
    let mut b = MCTSSearch::new(config(300));

    assert_eq!(
        a.search(&game, &moves, PlayerId::FIRST),
        b.search(&game, &moves, PlayerId::FIRST)
    );
    assert_eq!(a.stats().node_count, b.stats().node_count);
}

#[test]
fn test_tree_dropped_after_execute() {
    let game = small_board();
    let moves = game.legal_moves(PlayerId::FIRST);
    let mut search = MCTSSearch::new(config(50));

    search.start(&moves, &game, PlayerId::FIRST).unwrap();
    assert!(search.tree().is_some());

    search.execute().unwrap();

    assert!(search.tree().is_none());
    assert_eq!(search.execute(), Err(SearchError::NotStarted));
    assert!(search.stats().node_count > 1);
}
