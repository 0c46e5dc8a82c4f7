use cube_core::{Face, Move, Playback, PuzzleState, parse_sequence, simplify};

#[test]
fn quarter_turn_and_inverse_cancel() {
    for face in Face::ALL {
        let mut state = PuzzleState::new();
        state.apply_notation("L2 F' D").unwrap();
        let before = state.clone();

        state
            .apply(Move::clockwise(face))
            .apply(Move::counter_clockwise(face));
        assert_eq!(state, before);

        state
            .apply(Move::counter_clockwise(face))
            .apply(Move::clockwise(face));
        assert_eq!(state, before);
    }
}

#[test]
fn half_turn_twice_is_identity() {
    for face in Face::ALL {
        let mut state = PuzzleState::new();
        state.apply_notation("B U' R").unwrap();
        let before = state.clone();
        state.apply(Move::half(face)).apply(Move::half(face));
        assert_eq!(state, before);
    }
}

#[test]
fn four_quarter_turns_restore_solved() {
    let mut state = PuzzleState::new();
    state.apply_notation("R R R R").unwrap();
    assert_eq!(state, PuzzleState::new());
}

#[test]
fn every_move_four_times_is_identity() {
    for mv in Move::ALL {
        let mut state = PuzzleState::new();
        state.apply_notation("F2 U' L D B' R2").unwrap();
        let before = state.clone();
        state.apply(mv).apply(mv).apply(mv).apply(mv);
        assert_eq!(state, before, "{mv} four times");
    }
}

#[test]
fn centers_never_move() {
    let mut state = PuzzleState::new();
    state.scramble(200, &mut fastrand::Rng::with_seed(13));
    for face in Face::ALL {
        assert_eq!(state.center(face), face.solved_color());
    }
}

#[test]
fn zero_length_scramble_is_a_no_op() {
    let mut state = PuzzleState::new();
    state.apply_notation("D F").unwrap();
    let before = state.clone();
    assert!(state.scramble(0, &mut fastrand::Rng::with_seed(1)).is_empty());
    assert_eq!(state, before);
}

#[test]
fn simplify_examples() {
    let cancel = parse_sequence("U U'").unwrap();
    assert!(simplify(&cancel).is_empty());

    let merge = parse_sequence("R R").unwrap();
    assert_eq!(simplify(&merge), vec![Move::half(Face::R)]);
}

#[test]
fn playback_reaches_solved_and_back() {
    let mut scrambled = PuzzleState::new();
    scrambled.apply_notation("R U R' U'").unwrap();

    let mut state = scrambled.clone();
    let mut playback = Playback::new(parse_sequence("U R U' R'").unwrap());
    while playback.step_forward(&mut state).is_some() {}
    assert!(state.is_solved());

    playback.rewind(&mut state);
    assert_eq!(state, scrambled);
}
