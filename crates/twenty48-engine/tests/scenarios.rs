// Scripted-random scenarios: every spawn below is fully determined by the
// integers handed to ScriptedSource (row, column, value draw per tile).

use twenty48_engine::{Board, Direction, EngineError, RngSource, ScriptedSource, parse_rendered};

fn started(script: &[u32]) -> (Board, ScriptedSource) {
    let mut rng = ScriptedSource::new(script.to_vec());
    let mut board = Board::new();
    board.initialize(&mut rng).expect("initialize");
    (board, rng)
}

fn sum(board: &Board) -> u32 {
    board.rows().iter().flatten().sum()
}

fn last(board: &Board) -> usize {
    board.board_size() - 1
}

// Two tiles on row 1: a 4 at column 1 and a 2 at column 2.
const FOUR_TWO: [u32; 9] = [1, 1, 0, 1, 2, 1, 0, 0, 0];

#[test]
fn initialize_places_two_tiles() {
    let mut rng = RngSource::seeded(2048);
    for _ in 0..32 {
        let mut b = Board::new();
        b.initialize(&mut rng).unwrap();
        assert_eq!(b.board_size(), 4);
        assert_eq!(b.empty_cells(), 14);
        assert!([4, 6, 8].contains(&sum(&b)));
        assert!(!b.is_won());
        assert!(!b.is_over());
    }
}

#[test]
fn initialize_uses_injected_source() {
    let (b, rng) = started(&FOUR_TWO);
    assert_eq!(rng.draws(), 6);
    assert_eq!(sum(&b), 6);
    assert_eq!(b.value_at(1, 1), Ok(4));
    assert_eq!(b.value_at(2, 1), Ok(2));
}

#[test]
fn initialize_twice_is_not_guarded() {
    let (mut b, mut rng) = started(&[0, 0, 1, 0, 1, 1, 0, 2, 1, 0, 3, 1]);
    b.initialize(&mut rng).unwrap();
    assert_eq!(b.empty_cells(), 12);
}

#[test]
fn full_alternating_board_is_over_not_won() {
    let mut b = Board::new();
    for x in 0..b.board_size() {
        for y in 0..b.board_size() {
            b.place_tile(x, y, if (x + y) % 2 == 0 { 4 } else { 2 }).unwrap();
        }
    }
    assert!(b.is_over());
    assert!(!b.is_won());

    b.place_tile(0, 0, 2).unwrap();
    assert!(!b.is_over());
}

#[test]
fn single_2048_wins_and_ends() {
    let mut b = Board::new();
    b.place_tile(0, 0, 2048).unwrap();
    assert!(b.is_won());
    assert!(b.is_over());
}

#[test]
fn moves_slide_tiles_to_each_edge() {
    let (mut b, mut rng) = started(&FOUR_TWO);
    b.make_move(Direction::Right, &mut rng).unwrap();
    assert_eq!(b.value_at(last(&b) - 1, 1), Ok(4));
    assert_eq!(b.value_at(last(&b), 1), Ok(2));

    let (mut b, mut rng) = started(&FOUR_TWO);
    b.make_move(Direction::Left, &mut rng).unwrap();
    assert_eq!(b.value_at(0, 1), Ok(4));
    assert_eq!(b.value_at(1, 1), Ok(2));

    let (mut b, mut rng) = started(&FOUR_TWO);
    b.make_move(Direction::Up, &mut rng).unwrap();
    assert_eq!(b.value_at(1, 0), Ok(4));
    assert_eq!(b.value_at(2, 0), Ok(2));

    let (mut b, mut rng) = started(&FOUR_TWO);
    b.make_move(Direction::Down, &mut rng).unwrap();
    assert_eq!(b.value_at(1, last(&b)), Ok(4));
    assert_eq!(b.value_at(2, last(&b)), Ok(2));
}

#[test]
fn changing_move_spawns_exactly_one_tile() {
    let (mut b, mut rng) = started(&[1, 0, 1, 1, 1, 1, 1, 2, 1, 1, 3, 1]);
    let out = b.make_move(Direction::Down, &mut rng).unwrap();
    assert!(out.changed);
    assert_eq!(b.empty_cells(), 13);
    let spawned = out.spawned.expect("spawned tile");
    assert_eq!((spawned.x, spawned.y, spawned.value), (2, 1, 2));
}

#[test]
fn move_counter_tracks_changing_moves_only() {
    let (mut b, mut rng) = started(&[0, 1, 1, 1, 1, 1, 3, 1, 0, 0, 0, 0]);
    b.make_move(Direction::Down, &mut rng).unwrap();
    assert_eq!(b.moves(), 1);

    let (mut b, mut rng) = started(&[0, 1, 1, 1, 1, 1, 0, 0, 0]);
    b.make_move(Direction::Up, &mut rng).unwrap();
    b.make_move(Direction::Up, &mut rng).unwrap();
    assert_eq!(b.moves(), 1);

    let (mut b, mut rng) = started(&[0, 1, 1, 1, 1, 1, 2, 1, 0, 0, 0, 0]);
    b.make_move(Direction::Down, &mut rng).unwrap();
    b.make_move(Direction::Up, &mut rng).unwrap();
    assert_eq!(b.moves(), 2);

    let (mut b, mut rng) = started(&[0, 0, 1, 1, 0, 0]);
    let out = b.make_move(Direction::Up, &mut rng).unwrap();
    assert!(!out.changed);
    assert_eq!(b.moves(), 0);
}

#[test]
fn equal_pairs_merge_towards_the_edge() {
    // 2s at columns 1 and 2 of row 1
    for d in [Direction::Left, Direction::Right] {
        let (mut b, mut rng) = started(&[1, 1, 1, 1, 2, 1, 0, 0, 0]);
        b.make_move(d, &mut rng).unwrap();
        let x = if d == Direction::Left { 0 } else { last(&b) };
        assert_eq!(b.value_at(x, 1), Ok(4), "{d}");
    }
    // 2s at columns 2 and 3 of row 1
    for d in [Direction::Left, Direction::Right] {
        let (mut b, mut rng) = started(&[1, 2, 1, 1, 3, 1, 0, 0, 0]);
        b.make_move(d, &mut rng).unwrap();
        let x = if d == Direction::Left { 0 } else { last(&b) };
        assert_eq!(b.value_at(x, 1), Ok(4), "{d}");
    }
    // 2s at columns 0 and 1 of row 1
    let (mut b, mut rng) = started(&[1, 0, 1, 1, 1, 1, 0, 0, 0]);
    b.make_move(Direction::Left, &mut rng).unwrap();
    assert_eq!(b.value_at(0, 1), Ok(4));
}

#[test]
fn four_twos_merge_pairwise() {
    let (mut b, mut rng) = started(&[1, 0, 1, 1, 1, 1, 1, 2, 1, 1, 3, 1, 0, 0, 0]);
    b.place_random_tile(&mut rng).unwrap();
    b.place_random_tile(&mut rng).unwrap();
    assert_eq!(b.rows()[1], [2, 2, 2, 2]);

    let out = b.make_move(Direction::Left, &mut rng).unwrap();
    assert_eq!(b.value_at(0, 1), Ok(4));
    assert_eq!(b.value_at(1, 1), Ok(4));
    assert_eq!(out.merged_score, 8);
    assert_eq!(b.score(), 8);
}

#[test]
fn merged_tile_does_not_absorb_a_third() {
    let (mut b, mut rng) = started(&[1, 0, 1, 1, 1, 1, 1, 2, 0, 0, 0, 0]);
    b.place_random_tile(&mut rng).unwrap();
    assert_eq!(b.rows()[1], [2, 2, 4, 0]);
    b.make_move(Direction::Left, &mut rng).unwrap();
    assert_eq!(b.value_at(0, 1), Ok(4));
    assert_eq!(b.value_at(1, 1), Ok(4));

    // column 1 holds 2, 2, _, 4 top to bottom
    let script = [0, 1, 1, 1, 1, 1, 3, 1, 0, 0, 0, 0];
    let (mut b, mut rng) = started(&script);
    b.place_random_tile(&mut rng).unwrap();
    b.make_move(Direction::Up, &mut rng).unwrap();
    assert_eq!(b.value_at(1, 0), Ok(4));
    assert_eq!(b.value_at(1, 1), Ok(4));

    let (mut b, mut rng) = started(&script);
    b.place_random_tile(&mut rng).unwrap();
    b.make_move(Direction::Down, &mut rng).unwrap();
    assert_eq!(b.value_at(1, last(&b) - 1), Ok(4));
    assert_eq!(b.value_at(1, last(&b)), Ok(4));
}

#[test]
fn row_scenarios_from_the_rules() {
    let mut rng = ScriptedSource::new([3, 3, 1]);

    let mut b = Board::with_tiles([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    b.make_move(Direction::Left, &mut rng).unwrap();
    assert_eq!(b.rows()[0], [4, 0, 0, 0]);
    assert_eq!((b.score(), b.moves()), (4, 1));

    let mut b = Board::with_tiles([[2, 0, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    b.make_move(Direction::Left, &mut rng).unwrap();
    assert_eq!(b.rows()[0], [4, 2, 0, 0]);

    let mut b = Board::with_tiles([[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    b.make_move(Direction::Left, &mut rng).unwrap();
    assert_eq!(b.rows()[0], [4, 4, 0, 0]);
    assert_eq!(b.score(), 8);
}

#[test]
fn score_accumulates_merged_values() {
    let (mut b, mut rng) = started(&[0, 1, 1, 1, 1, 1, 0, 0, 0]);
    b.make_move(Direction::Down, &mut rng).unwrap();
    assert_eq!(b.score(), 4);

    let (mut b, mut rng) = started(&[0, 1, 1, 1, 1, 1, 3, 2, 0, 0, 0, 0]);
    b.make_move(Direction::Down, &mut rng).unwrap();
    b.make_move(Direction::Left, &mut rng).unwrap();
    assert_eq!(b.score(), 12);
}

#[test]
fn render_tracks_play() {
    let (b, _) = started(&FOUR_TWO);
    assert_eq!(
        b.to_string(),
        "Moves: 0\t\tScore: 0\n\
         .    .    .    .\n\
         .    4    2    .\n\
         .    .    .    .\n\
         .    .    .    ."
    );

    let (mut b, _) = started(&FOUR_TWO);
    b.place_tile(0, 0, 2048).unwrap();
    assert_eq!(
        b.render(),
        "Moves: 0\t\tScore: 0\n\
         2048 .    .    .\n\
         .    4    2    .\n\
         .    .    .    .\n\
         .    .    .    ."
    );

    let (mut b, mut rng) = started(&[0, 0, 0, 2, 2, 1, 1, 1, 0, 0, 0, 0]);
    assert_eq!(
        b.render(),
        "Moves: 0\t\tScore: 0\n\
         4    .    .    .\n\
         .    .    .    .\n\
         .    .    2    .\n\
         .    .    .    ."
    );
    b.make_move(Direction::Down, &mut rng).unwrap();
    assert_eq!(
        b.render(),
        "Moves: 1\t\tScore: 0\n\
         .    .    .    .\n\
         .    4    .    .\n\
         .    .    .    .\n\
         4    .    2    ."
    );
}

#[test]
fn rendering_parses_back() {
    let (mut b, mut rng) = started(&[0, 1, 1, 1, 1, 1, 3, 2, 0, 0, 0, 0]);
    b.make_move(Direction::Down, &mut rng).unwrap();
    b.make_move(Direction::Left, &mut rng).unwrap();
    let parsed = parse_rendered(&b.render()).unwrap();
    assert_eq!(parsed.rows, b.rows());
    assert_eq!(parsed.moves, b.moves());
    assert_eq!(parsed.score, b.score());
}

#[test]
fn out_of_range_cells_are_errors() {
    let mut b = Board::new();
    assert_eq!(b.value_at(0, 4), Err(EngineError::OutOfBounds { x: 0, y: 4 }));
    assert_eq!(
        b.place_tile(9, 9, 2),
        Err(EngineError::OutOfBounds { x: 9, y: 9 })
    );
}
