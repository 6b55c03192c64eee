use jointkit_core::{shared, CutColor, Shared};
use jointkit_engine::edges::finger::{FingerParams, FINGER_JOINT};
use jointkit_engine::{Bolts, EdgeDrawOptions, PathCommand, PathRecorder, Settings, Sheet};
use jointkit_settings::EngineConfig;
use nalgebra::Point2;
use proptest::prelude::*;

fn sheet(config: &EngineConfig) -> (Sheet, Shared<PathRecorder>) {
    let recorder = shared(PathRecorder::new());
    let sheet = Sheet::from_config(config, Box::new(recorder.clone())).unwrap();
    (sheet, recorder)
}

fn exact_config() -> EngineConfig {
    let mut config = EngineConfig::with_thickness(3.0);
    config.burn = 0.0;
    config
}

#[test]
fn test_hundred_mm_edge_with_narrow_fingers() {
    let mut config = exact_config();
    config
        .set_override("FingerJoint", "space", 1.0)
        .set_override("FingerJoint", "finger", 1.0)
        .set_override("FingerJoint", "surroundingspaces", 1.0);
    let (mut sheet, recorder) = sheet(&config);

    let settings = sheet.edges().finger_joint();
    let layout = FingerParams::from_settings(&settings.borrow()).layout(100.0, None);
    assert_eq!(layout.fingers, 16);
    assert!((layout.leftover - 7.0).abs() < 1e-9);

    sheet.draw_edge('f', 100.0, &EdgeDrawOptions::default()).unwrap();
    sheet.finish();

    let recorder = recorder.borrow();
    let commands = &recorder.paths()[0].commands;
    assert_eq!(commands[0], PathCommand::MoveTo(Point2::origin()));
    match commands[1] {
        PathCommand::LineTo(p) => {
            assert!((p.x - 3.5).abs() < 1e-9);
            assert!(p.y.abs() < 1e-9);
        }
        other => panic!("expected a line, got {:?}", other),
    }
}

#[test]
fn test_finger_edge_reaches_finger_depth() {
    let (mut sheet, recorder) = sheet(&exact_config());
    sheet.draw_edge('f', 100.0, &EdgeDrawOptions::default()).unwrap();
    sheet.finish();

    let (min, max) = recorder.borrow().bounding_box().unwrap();
    assert!((min.y + 3.0).abs() < 1e-9);
    assert!(max.y.abs() < 1e-9);
    assert!(min.x.abs() < 1e-9 && (max.x - 100.0).abs() < 1e-9);
}

#[test]
fn test_opposing_edge_cuts_upwards() {
    let (mut sheet, recorder) = sheet(&exact_config());
    sheet.draw_edge('F', 100.0, &EdgeDrawOptions::default()).unwrap();
    sheet.finish();

    let (min, max) = recorder.borrow().bounding_box().unwrap();
    assert!(min.y.abs() < 1e-9);
    assert!((max.y - 3.0).abs() < 1e-9);
}

#[test]
fn test_bolted_opposing_edge_cuts_bolt_holes() {
    let (mut sheet, recorder) = sheet(&exact_config());
    let bolts = Bolts::new(2);
    sheet
        .draw_edge('F', 150.0, &EdgeDrawOptions::with_bolts(&bolts))
        .unwrap();
    sheet.finish();

    let holes = recorder
        .borrow()
        .paths_with_color(CutColor::InnerCut)
        .count();
    assert_eq!(holes, 2);
}

#[test]
fn test_finger_holes_match_edge_layout() {
    let (mut sheet, recorder) = sheet(&exact_config());
    sheet
        .finger_holes_at(0.0, 10.0, 100.0, 0.0, &EdgeDrawOptions::default())
        .unwrap();
    sheet.finish();

    let recorder = recorder.borrow();
    let holes: Vec<_> = recorder.paths_with_color(CutColor::InnerCut).collect();
    assert_eq!(holes.len(), 7);
    // finger x width, cut 3 + 3 long each
    for hole in holes {
        assert!((hole.length() - 2.0 * (6.0 + 3.0)).abs() < 1e-9);
    }
    assert!(sheet.position().coords.norm() < 1e-12);
}

fn config_with_play() -> EngineConfig {
    let mut config = exact_config();
    config.set_override("FingerJoint", "play", 0.1);
    config
}

/// Horizontal runs of the first path lying at height `y`, left to right.
fn runs_at(recorder: &PathRecorder, y: f64) -> Vec<(f64, f64)> {
    let points: Vec<Point2<f64>> = recorder.paths()[0]
        .commands
        .iter()
        .filter_map(|c| match c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
            _ => None,
        })
        .collect();
    let mut runs: Vec<(f64, f64)> = points
        .windows(2)
        .filter(|w| (w[0].y - y).abs() < 1e-9 && (w[1].y - y).abs() < 1e-9)
        .filter(|w| (w[1].x - w[0].x).abs() > 1e-9)
        .map(|w| (w[0].x.min(w[1].x), w[0].x.max(w[1].x)))
        .collect();
    runs.sort_by(|a, b| a.0.total_cmp(&b.0));
    runs
}

#[test]
fn test_play_widens_opposing_notches() {
    let settings = Settings::new(&FINGER_JOINT, 3.0, true, [("play", 0.1)]).unwrap();
    let p = FingerParams::from_settings(&settings);
    assert!((p.play - 0.3).abs() < 1e-9);
    assert_eq!(p.layout(100.0, None).fingers, 7);

    let config = config_with_play();
    let (mut fingers, finger_recorder) = sheet(&config);
    fingers.draw_edge('f', 100.0, &EdgeDrawOptions::default()).unwrap();
    fingers.finish();
    let (mut notches, notch_recorder) = sheet(&config);
    notches.draw_edge('F', 100.0, &EdgeDrawOptions::default()).unwrap();
    notches.finish();

    let teeth = runs_at(&finger_recorder.borrow(), -3.0);
    let slots = runs_at(&notch_recorder.borrow(), 3.0);
    assert_eq!(teeth.len(), 7);
    assert_eq!(slots.len(), 7);

    for (tooth, slot) in teeth.iter().zip(&slots) {
        assert!((tooth.1 - tooth.0 - 6.0).abs() < 1e-9);
        assert!((slot.1 - slot.0 - 6.3).abs() < 1e-9);
        // play is split evenly on both flanks
        let centre = (tooth.0 + tooth.1) / 2.0;
        assert!(((slot.0 + slot.1) / 2.0 - centre).abs() < 1e-9);
    }
    for pair in teeth.windows(2) {
        assert!((pair[1].0 - pair[0].1 - 6.0).abs() < 1e-9);
    }
    for pair in slots.windows(2) {
        assert!((pair[1].0 - pair[0].1 - 5.7).abs() < 1e-9);
    }
}

#[test]
fn test_opposing_edge_too_short_for_fingers_stays_straight() {
    let (mut sheet, recorder) = sheet(&config_with_play());
    sheet.draw_edge('F', 2.0, &EdgeDrawOptions::default()).unwrap();
    assert!((sheet.position().x - 2.0).abs() < 1e-9);
    assert!(sheet.position().y.abs() < 1e-9);
    sheet.finish();

    let (min, max) = recorder.borrow().bounding_box().unwrap();
    assert!(min.y.abs() < 1e-9 && max.y.abs() < 1e-9);
}

#[test]
fn test_zero_finger_width_draws_full_length() {
    let mut config = config_with_play();
    config.set_override("FingerJoint", "finger", 0.0);
    for symbol in ['f', 'F'] {
        let (mut sheet, _) = sheet(&config);
        sheet.draw_edge(symbol, 100.0, &EdgeDrawOptions::default()).unwrap();
        assert!((sheet.position().x - 100.0).abs() < 1e-9, "{}", symbol);
        assert!(sheet.position().y.abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn finger_edges_end_on_their_baseline(length in 1.0f64..500.0, positive in any::<bool>()) {
        let (mut sheet, _) = sheet(&exact_config());
        let symbol = if positive { 'f' } else { 'F' };
        sheet.draw_edge(symbol, length, &EdgeDrawOptions::default()).unwrap();

        prop_assert!((sheet.position().x - length).abs() < 1e-6);
        prop_assert!(sheet.position().y.abs() < 1e-6);
        prop_assert!(sheet.heading().abs() < 1e-6);
    }

    #[test]
    fn finger_edges_with_play_end_on_their_baseline(
        length in 0.5f64..500.0,
        positive in any::<bool>(),
    ) {
        let (mut sheet, _) = sheet(&config_with_play());
        let symbol = if positive { 'f' } else { 'F' };
        sheet.draw_edge(symbol, length, &EdgeDrawOptions::default()).unwrap();

        prop_assert!((sheet.position().x - length).abs() < 1e-6);
        prop_assert!(sheet.position().y.abs() < 1e-6);
        prop_assert!(sheet.heading().abs() < 1e-6);
    }
}
