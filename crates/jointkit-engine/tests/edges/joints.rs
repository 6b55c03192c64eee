use jointkit_core::{shared, CutColor, Shared};
use jointkit_engine::{
    BoundaryEdge, Bolts, EdgeDrawOptions, EngineError, PathRecorder, Sheet,
};
use jointkit_settings::EngineConfig;
use proptest::prelude::*;

fn sheet(burn: f64) -> (Sheet, Shared<PathRecorder>) {
    let recorder = shared(PathRecorder::new());
    let mut config = EngineConfig::with_thickness(3.0);
    config.burn = burn;
    let sheet = Sheet::from_config(&config, Box::new(recorder.clone())).unwrap();
    (sheet, recorder)
}

fn assert_on_baseline(sheet: &Sheet, length: f64) {
    assert!((sheet.position().x - length).abs() < 1e-6, "x = {}", sheet.position().x);
    assert!(sheet.position().y.abs() < 1e-6, "y = {}", sheet.position().y);
    assert!(sheet.heading().abs() < 1e-6);
}

#[test]
fn test_corner_round_trip_restores_heading() {
    let (mut sheet, _) = sheet(0.0);
    sheet.corner(70.0, 0.0);
    sheet.corner(-70.0, 0.0);
    assert!(sheet.position().coords.norm() < 1e-12);
    assert!(sheet.heading().abs() < 1e-9);

    let (mut sheet, _) = self::sheet(0.1);
    sheet.corner(70.0, 2.0);
    sheet.corner(-70.0, 2.0);
    assert!(sheet.heading().abs() < 1e-9);
    assert!(sheet.position().coords.norm() > 1e-3);
}

#[test]
fn test_four_rounded_corners_close() {
    let (mut sheet, recorder) = sheet(0.1);
    for _ in 0..4 {
        sheet.corner(90.0, 10.0);
    }
    assert!(sheet.position().coords.norm() < 1e-9);
    assert!(sheet.heading().abs() < 1e-9);
    sheet.finish();
    assert_eq!(recorder.borrow().paths().len(), 1);
}

#[test]
fn test_dovetail_keeps_baseline() {
    for symbol in ['d', 'D'] {
        for length in [40.0, 77.7, 100.0] {
            let (mut sheet, _) = sheet(0.0);
            sheet.draw_edge(symbol, length, &EdgeDrawOptions::default()).unwrap();
            assert_on_baseline(&sheet, length);
        }
    }
}

#[test]
fn test_dovetail_too_short_is_straight() {
    let (mut sheet, recorder) = sheet(0.0);
    // tails are 9 wide at t = 3, two of them do not fit
    sheet.draw_edge('d', 15.0, &EdgeDrawOptions::default()).unwrap();
    sheet.finish();
    assert!((recorder.borrow().paths()[0].length() - 15.0).abs() < 1e-9);
}

#[test]
fn test_dovetail_tails_stick_out() {
    let (mut sheet, recorder) = sheet(0.0);
    sheet.draw_edge('d', 60.0, &EdgeDrawOptions::default()).unwrap();
    sheet.finish();
    let (min, max) = recorder.borrow().bounding_box().unwrap();
    let depth = sheet.edges().get('d').unwrap().margin();
    assert!((depth - 4.5).abs() < 1e-9);
    // tails point away from the part
    assert!((min.y + depth).abs() < 1e-6);
    assert!(max.y.abs() < 1e-6);
}

#[test]
fn test_flex_needs_height() {
    let (mut sheet, _) = sheet(0.0);
    let err = sheet
        .draw_edge('X', 50.0, &EdgeDrawOptions::default())
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingHeight(_)));
}

#[test]
fn test_flex_cuts_between_baseline_and_height() {
    let (mut sheet, recorder) = sheet(0.0);
    sheet
        .draw_edge('X', 50.0, &EdgeDrawOptions::with_height(40.0))
        .unwrap();
    assert_on_baseline(&sheet, 50.0);
    sheet.finish();

    let recorder = recorder.borrow();
    // 50 / 1.5 -> 33 lines, the first position is the edge itself
    assert!(recorder.paths().len() >= 2);
    let (min, max) = recorder.bounding_box().unwrap();
    assert!(min.y >= -1e-9 && max.y <= 40.0 + 1e-9);
    assert!(max.y > 30.0);
}

#[test]
fn test_flex_stretch_is_absolute() {
    let mut config = EngineConfig::with_thickness(3.0);
    config.set_override("Flex", "stretch", 1.1);
    let sheet = Sheet::from_config(&config, Box::new(PathRecorder::new())).unwrap();
    let flex = sheet.edges().settings("Flex").unwrap();
    assert!((flex.borrow().number("stretch") - 1.1).abs() < 1e-12);
    assert!((flex.borrow().number("distance") - 1.5).abs() < 1e-12);
}

#[test]
fn test_flex_rejects_tiny_distance() {
    let mut config = EngineConfig::with_thickness(3.0);
    config.set_override("Flex", "distance", 0.001);
    let err = Sheet::from_config(&config, Box::new(PathRecorder::new())).unwrap_err();
    assert!(matches!(err, EngineError::InvalidParameter { .. }));
}

#[test]
fn test_gripping_edge_wave_and_bumps() {
    for style in ["wave", "bumps"] {
        let (mut sheet, _) = sheet(0.0);
        sheet
            .edges()
            .set_values("Grip", false, [("style", style)])
            .unwrap();
        sheet.draw_edge('g', 30.0, &EdgeDrawOptions::default()).unwrap();
        assert_on_baseline(&sheet, 30.0);
    }
}

#[test]
fn test_gripping_edge_of_zero_length_draws_nothing() {
    let (mut sheet, recorder) = sheet(0.0);
    sheet.draw_edge('g', 0.0, &EdgeDrawOptions::default()).unwrap();
    sheet.finish();
    assert!(recorder.borrow().paths().is_empty());
}

#[test]
fn test_outset_edge_with_bolts_cuts_holes() {
    let (mut sheet, recorder) = sheet(0.0);
    let bolts = Bolts::new(3);
    sheet
        .draw_edge('E', 90.0, &EdgeDrawOptions::with_bolts(&bolts))
        .unwrap();
    assert_on_baseline(&sheet, 90.0);
    sheet.finish();
    assert_eq!(
        recorder
            .borrow()
            .paths_with_color(CutColor::InnerCut)
            .count(),
        3
    );
}

#[test]
fn test_plain_edge_with_bolts_cuts_bed_bolt_slots() {
    let (mut sheet, recorder) = sheet(0.0);
    let bolts = Bolts::new(2);
    sheet
        .draw_edge('e', 80.0, &EdgeDrawOptions::with_bolts(&bolts))
        .unwrap();
    assert_on_baseline(&sheet, 80.0);
    sheet.finish();
    let (_, max) = recorder.borrow().bounding_box().unwrap();
    assert!(max.y > 10.0);
}

proptest! {
    #[test]
    fn corner_round_trip_keeps_heading(degrees in -180.0f64..180.0, radius in 0.0f64..20.0) {
        let (mut sheet, _) = sheet(0.1);
        sheet.corner(degrees, radius);
        sheet.corner(-degrees, radius);
        prop_assert!(sheet.heading().abs() < 1e-6);
    }

    #[test]
    fn sharp_round_trip_without_burn_stays_put(degrees in -180.0f64..180.0) {
        let (mut sheet, _) = sheet(0.0);
        sheet.corner(degrees, 0.0);
        sheet.corner(-degrees, 0.0);
        prop_assert!(sheet.position().coords.norm() < 1e-9);
    }
}
