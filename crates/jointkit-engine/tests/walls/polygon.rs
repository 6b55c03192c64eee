use jointkit_core::{shared, CutColor, PolygonSize, Shared};
use jointkit_engine::{EngineError, FeatureContext, PathRecorder, Sheet, WallOptions};
use jointkit_settings::EngineConfig;

fn sheet() -> (Sheet, Shared<PathRecorder>) {
    let recorder = shared(PathRecorder::new());
    let mut config = EngineConfig::with_thickness(3.0);
    config.burn = 0.0;
    let sheet = Sheet::from_config(&config, Box::new(recorder.clone())).unwrap();
    (sheet, recorder)
}

#[test]
fn test_hexagon_wall_size() {
    let (mut sheet, recorder) = sheet();
    let outcome = sheet
        .regular_polygon_wall(6, PolygonSize::Side(20.0), "e", None, WallOptions::new())
        .unwrap();
    let apothem = 20.0 * 30f64.to_radians().cos();
    assert!((outcome.overall_width - (40.0 + 9.0)).abs() < 1e-9);
    assert!((outcome.overall_height - (2.0 * apothem + 6.0)).abs() < 1e-9);

    let recorder = recorder.borrow();
    assert_eq!(recorder.paths().len(), 1);
    assert!((recorder.paths()[0].length() - 120.0).abs() < 1e-9);
}

#[test]
fn test_odd_polygon_height() {
    let (mut sheet, _) = sheet();
    let outcome = sheet
        .regular_polygon_wall(3, PolygonSize::Radius(10.0), "e", None, WallOptions::new())
        .unwrap();
    // radius plus apothem
    assert!((outcome.overall_height - (15.0 + 6.0)).abs() < 1e-9);
}

#[test]
fn test_per_side_edges_and_centre_hole() {
    let (mut sheet, recorder) = sheet();
    let mut centre = None;
    sheet
        .regular_polygon_wall(
            4,
            PolygonSize::Side(30.0),
            "fFfF",
            Some(10.0),
            WallOptions::new().callback(0, |_: &mut Sheet, ctx: FeatureContext| {
                centre = Some(ctx.offset);
                Ok(())
            }),
        )
        .unwrap();

    let recorder = recorder.borrow();
    assert_eq!(recorder.paths_with_color(CutColor::InnerCut).count(), 1);
    let offset = centre.unwrap();
    assert!((offset.x - 15.0).abs() < 1e-9);
    assert!((offset.y - 15.0).abs() < 1e-9);
}

#[test]
fn test_polygon_edge_count_mismatch() {
    let (mut sheet, _) = sheet();
    let err = sheet
        .regular_polygon_wall(6, PolygonSize::Side(20.0), "ef", None, WallOptions::new())
        .unwrap_err();
    assert!(matches!(err, EngineError::EdgeCount { expected: 6, found: 2 }));
}

#[test]
fn test_degenerate_polygon() {
    let (mut sheet, _) = sheet();
    let err = sheet
        .regular_polygon_wall(2, PolygonSize::Side(20.0), "e", None, WallOptions::new())
        .unwrap_err();
    assert!(matches!(err, EngineError::Geometry(_)));
}
