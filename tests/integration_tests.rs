//! End-to-end scenarios exercising the public crate API together: position setup, move
//! generation, full games via the simulator, and the search driver's cancellation contract.
//! Per-algorithm unit tests live alongside their modules under `src/`; these drive the crate the
//! way `main.rs` and a hypothetical game loop actually would.

use std::sync::atomic::AtomicBool;

use draughts_mcts::bitboard;
use draughts_mcts::controller::{ComputerController, Controller};
use draughts_mcts::mcts::{SearchConfig, Tree};
use draughts_mcts::notation;
use draughts_mcts::position::Position;
use draughts_mcts::simulator::HostSimulator;

#[test]
fn starting_position_white_pawn_moves_land_on_rank_five() {
    let p = Position::starting();
    assert_eq!(p.get_all_capturing(), 0);

    // White occupies rank 6/7/8 (indices 20..31); only its frontmost rank, 20..23, has a free
    // square to move into on rank 5 (16..19) - everything behind is blocked by white's own pawns.
    let moving = p.get_all_moving();
    assert_eq!(moving, 0x00f0_0000);

    // Index 20 can reach both 16 and 17; index 21 can reach 17 and 18.
    let from20 = p.get_moves(bitboard::from_index(20));
    assert_ne!(from20 & bitboard::from_index(16), 0);
    assert_ne!(from20 & bitboard::from_index(17), 0);

    let from21 = p.get_moves(bitboard::from_index(21));
    for target in [17, 18] {
        assert_ne!(from21 & bitboard::from_index(target), 0, "index 21 should reach {target}");
    }
}

#[test]
fn mandatory_capture_forbids_plain_moves_for_the_whole_side() {
    // White pawn at 8, black pawn at 12, empty landing at 17: white must capture.
    let p = Position {
        black: bitboard::from_index(12),
        white: bitboard::from_index(8),
        queens: 0,
        since_capture: 0,
        black_turn: false,
    };

    assert_ne!(p.get_all_capturing() & bitboard::from_index(8), 0);

    // Every legal successor must be reached through the mandatory capture, not a plain move.
    for successor in p.legal_successors() {
        assert_eq!(successor.black, 0, "the only legal turn captures the black pawn");
    }
}

#[test]
fn compound_capture_from_starting_scenario_clears_both_pieces_in_one_turn() {
    let p = Position {
        black: bitboard::from_index(4) | bitboard::from_index(13),
        white: bitboard::from_index(0),
        queens: 0,
        since_capture: 0,
        black_turn: false,
    };

    let successors = p.legal_successors();
    assert_eq!(successors.len(), 1);
    assert_eq!(successors[0].black, 0);
    assert_eq!(successors[0].since_capture, 0);
    assert!(successors[0].black_turn);
}

#[test]
fn white_pawn_promotes_when_reaching_its_back_rank() {
    let mut p = Position {
        black: bitboard::from_index(31),
        white: bitboard::from_index(4),
        queens: 0,
        since_capture: 0,
        black_turn: false,
    };

    assert_ne!(p.get_moves(bitboard::from_index(4)) & bitboard::from_index(0), 0);
    p.make_move(4, 0);
    p.end_turn();

    assert_ne!(p.queens & bitboard::from_index(0), 0);
    assert!(p.black_turn);
}

#[test]
fn thirty_half_moves_of_king_shuffling_between_two_kings_reaches_a_draw() {
    // White king at g1/h2 (indices 3 and 7, its only diagonal) and black king at a1, alone on
    // the a1-h8 diagonal: the two diagonals never intersect, so the kings can shuffle back and
    // forth forever without ever capturing or blocking each other.
    let mut p = Position {
        black: bitboard::from_index(0),
        white: bitboard::from_index(3),
        queens: bitboard::from_index(0) | bitboard::from_index(3),
        since_capture: 0,
        black_turn: false,
    };

    for _ in 0..30 {
        assert!(!p.is_draw());
        let mover = p.checkers();
        let from = bitboard::bits_of(mover).next().unwrap();
        let moves = p.get_moves(bitboard::from_index(from));
        assert_ne!(moves, 0);
        let to = bitboard::bits_of(moves).next().unwrap();
        p.make_move(from, to);
        p.end_turn();
    }

    assert!(p.is_draw());
}

#[test]
fn notation_round_trips_every_ply_of_a_full_self_play_game() {
    let mut position = Position::starting();
    let mut plies = 0;

    while !position.has_lost() && !position.is_draw() && plies < 40 {
        let successors = position.legal_successors();
        assert!(!successors.is_empty());
        let next = successors[0];

        // Exercise notation formatting on a representative move each ply.
        let before_mover = position.checkers();
        let after_mover = if position.black_turn { next.black } else { next.white };
        let from_bits = before_mover & !after_mover;
        if from_bits != 0 {
            let from = from_bits.trailing_zeros();
            let formatted = notation::format_square(from);
            assert_eq!(notation::parse_square(&formatted), Some(from));
        }

        position = next;
        plies += 1;
    }
}

#[test]
fn find_best_move_returns_a_legal_successor_of_the_starting_position() {
    let mut tree = Tree::new(HostSimulator::new(), SearchConfig { max_iterations: 200, ..Default::default() });
    let cancelled = AtomicBool::new(false);

    let root = Position::starting();
    let best = tree.find_best_move(root, &cancelled);

    assert!(root.legal_successors().contains(&best));
}

#[test]
fn cancelling_before_the_search_starts_returns_the_sentinel_position() {
    let mut tree = Tree::new(
        HostSimulator::new(),
        SearchConfig { max_iterations: 1_000_000_000, max_time: std::time::Duration::from_secs(10), ..Default::default() },
    );
    let cancelled = AtomicBool::new(true);

    let result = tree.find_best_move(Position::starting(), &cancelled);

    assert_eq!(result, Position::default());
}

#[test]
fn controller_make_move_ignores_a_stale_cancellation_from_a_prior_search() {
    let mut controller = ComputerController::new(
        HostSimulator::new(),
        SearchConfig { max_iterations: 200, ..Default::default() },
    );

    controller.cancel_move();
    let result = controller.make_move(Position::starting());

    assert_ne!(result, Position::default());
}

#[test]
fn position_wire_layout_round_trips_through_bytes() {
    let p = Position { black: 0xdead_beef, white: 0x0010_0100, queens: 0x0000_ff00, since_capture: 12, black_turn: true };
    assert_eq!(Position::from_bytes(p.to_bytes()), p);
}
