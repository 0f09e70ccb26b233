//! Full quiz sessions driven through the reducer.

use std::collections::BTreeSet;

use fretboard_core::fretboard::cells;
use fretboard_core::{
    BoardGeometry, BoardLayout, Cell, DrawCommand, Event, FretRange, Mode, PitchClass,
    TrainerState, Tuning, TuningPreset, cell_at, random_target, reduce, render,
};
use fretboard_core::geometry::NOTE_RADIUS;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn set(cells: &[(u8, u8)]) -> BTreeSet<Cell> {
    cells.iter().map(|&(s, f)| Cell::new(s, f)).collect()
}

#[test]
fn c_positions_for_an_explicit_tuning() {
    let tuning = Tuning::try_from(&[4u8, 9, 2, 7, 11, 4][..]).unwrap();
    let found: BTreeSet<Cell> = cells(&FretRange::new(0, 12))
        .filter(|cell| cell.pitch_class(&tuning) == PitchClass::C)
        .collect();
    assert_eq!(found, set(&[(0, 8), (1, 3), (2, 10), (3, 5), (4, 1), (5, 8)]));
}

#[test]
fn c_positions_in_standard_tuning() {
    let state = reduce(TrainerState::default(), Event::StartQuiz { target: PitchClass::C });
    assert_eq!(state.preset(), TuningPreset::Standard);
    assert_eq!(
        state.correct_set(),
        set(&[(0, 8), (1, 1), (2, 5), (3, 10), (4, 3), (5, 8)])
    );
}

#[test]
fn open_strings_count_when_the_nut_is_visible() {
    let state = reduce(TrainerState::default(), Event::StartQuiz { target: PitchClass::E });
    let correct = state.correct_set();
    assert!(correct.contains(&Cell::new(0, 0)));
    assert!(correct.contains(&Cell::new(5, 12)));
    assert_eq!(correct.len(), 8);
}

#[test]
fn seeded_session_clicks_through_the_board() {
    let mut rng = StdRng::seed_from_u64(7);
    let target = random_target(&mut rng);
    let mut state = reduce(TrainerState::default(), Event::StartQuiz { target });
    assert_eq!(state.mode(), Mode::Quiz);

    let geometry = BoardGeometry::new(BoardLayout::for_width(1100.0), &state.range());
    let origin = geometry.origin();
    let answers: Vec<Cell> = state.correct_set().into_iter().collect();
    assert!(!answers.is_empty());

    // One wrong click first, then every answer through the pointer path.
    let wrong = cells(&state.range())
        .find(|&cell| !state.is_correct(cell))
        .unwrap();
    state = reduce(state, Event::ToggleCell(wrong));
    for &cell in &answers {
        let pointer = geometry.cell_center(cell).unwrap();
        let hit = cell_at(pointer, origin, &geometry).unwrap();
        state = reduce(state, Event::ToggleCell(hit));
    }
    assert_eq!(state.found_count(), answers.len());
    assert!(state.all_found());

    let commands = render(&geometry, &state);
    let markers = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Circle { radius, .. } if *radius == NOTE_RADIUS))
        .count();
    assert_eq!(markers, answers.len() + 1);

    // A new target empties the board.
    state = reduce(state, Event::NextTarget);
    assert_eq!(state.quiz_target(), target.transpose(1));
    assert!(state.clicked().is_empty());
    assert!(!state.all_found());
}

#[test]
fn narrowing_the_range_resets_answers() {
    let state = reduce(TrainerState::default(), Event::StartQuiz { target: PitchClass::C });
    let state = reduce(state, Event::ToggleCell(Cell::new(0, 8)));
    let state = reduce(state, Event::SetFretRange { start: 5, end: 9 });
    assert!(state.clicked().is_empty());
    assert_eq!(state.correct_set(), set(&[(0, 8), (2, 5), (5, 8)]));
}
