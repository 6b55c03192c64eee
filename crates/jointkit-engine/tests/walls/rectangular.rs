use std::rc::Rc;

use jointkit_core::{shared, CutColor, Shared};
use jointkit_engine::{
    Bolts, BoundaryEdge, EdgeDrawOptions, EngineError, EngineResult, FeatureContext,
    PathRecorder, Sheet, WallOptions, WallOutcome,
};
use jointkit_settings::{EngineConfig, HexHoleSettings};

fn sheet() -> (Sheet, Shared<PathRecorder>) {
    let recorder = shared(PathRecorder::new());
    let mut config = EngineConfig::with_thickness(3.0);
    config.burn = 0.0;
    let sheet = Sheet::from_config(&config, Box::new(recorder.clone())).unwrap();
    (sheet, recorder)
}

fn bbox_size(recorder: &Shared<PathRecorder>) -> (f64, f64) {
    let (min, max) = recorder.borrow().bounding_box().unwrap();
    (max.x - min.x, max.y - min.y)
}

#[test]
fn test_overall_size_counts_edge_spacing() {
    for (edges, dx, dy) in [
        ("eeee", 0.0, 0.0),
        ("EEEE", 6.0, 6.0),
        ("fFfF", 6.0, 6.0),
        ("ffee", 3.0, 3.0),
        ("FeFe", 0.0, 6.0),
    ] {
        let (mut sheet, recorder) = sheet();
        let outcome = sheet
            .rectangular_wall(100.0, 60.0, edges, WallOptions::new())
            .unwrap();
        assert_eq!(
            outcome,
            WallOutcome {
                overall_width: 100.0 + dx,
                overall_height: 60.0 + dy,
                skipped: false,
            },
            "edges {}",
            edges
        );
        if edges != "ffee" && edges != "FeFe" {
            let (w, h) = bbox_size(&recorder);
            assert!((w - outcome.overall_width).abs() < 1e-9, "{} width {}", edges, w);
            assert!((h - outcome.overall_height).abs() < 1e-9, "{} height {}", edges, h);
        }
    }
}

#[test]
fn test_wall_outline_is_one_closed_path() {
    let (mut sheet, recorder) = sheet();
    sheet
        .rectangular_wall(100.0, 60.0, "fFfF", WallOptions::new())
        .unwrap();

    let recorder = recorder.borrow();
    assert_eq!(recorder.paths().len(), 1);
    let points = recorder.paths()[0].sample_points();
    assert!((points[0] - points[points.len() - 1]).norm() < 1e-9);
    assert!(sheet.position().coords.norm() < 1e-12);
    assert_eq!(sheet.cursor().depth(), 0);
}

#[test]
fn test_wall_needs_four_edges() {
    let (mut sheet, _) = sheet();
    let err = sheet
        .rectangular_wall(10.0, 10.0, "eee", WallOptions::new())
        .unwrap_err();
    assert!(matches!(err, EngineError::EdgeCount { expected: 4, found: 3 }));
}

#[test]
fn test_unknown_edge_symbol() {
    let (mut sheet, recorder) = sheet();
    let err = sheet
        .rectangular_wall(10.0, 10.0, "eeqe", WallOptions::new())
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownEdge('q')));
    assert!(recorder.borrow().paths().is_empty());
}

#[test]
fn test_unknown_move_is_rejected() {
    let (mut sheet, _) = sheet();
    let err = sheet
        .rectangular_wall(10.0, 10.0, "eeee", WallOptions::new().moves("right diagonal"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown direction: 'diagonal'");
}

#[test]
fn test_only_move_skips_drawing() {
    let (mut sheet, recorder) = sheet();
    let outcome = sheet
        .rectangular_wall(10.0, 20.0, "eeee", WallOptions::new().moves("right only"))
        .unwrap();
    assert!(outcome.skipped);
    assert!(recorder.borrow().paths().is_empty());
    assert!((sheet.position().x - (10.0 + sheet.spacing())).abs() < 1e-12);
}

#[test]
fn test_callbacks_run_per_side() {
    let (mut sheet, recorder) = sheet();
    let mut seen = Vec::new();
    sheet
        .rectangular_wall(
            80.0,
            40.0,
            "eeee",
            WallOptions::new()
                .callback(0, |sheet: &mut Sheet, ctx: FeatureContext| {
                    seen.push(ctx);
                    sheet.hole(ctx.length / 2.0, 10.0, 2.0)
                })
                .callback(3, |_: &mut Sheet, ctx: FeatureContext| {
                    assert_eq!(ctx.index, 3);
                    assert_eq!(ctx.length, 40.0);
                    Ok(())
                }),
        )
        .unwrap();

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].index, 0);
    assert_eq!(seen[0].length, 80.0);

    let recorder = recorder.borrow();
    let holes: Vec<_> = recorder.paths_with_color(CutColor::InnerCut).collect();
    assert_eq!(holes.len(), 1);
    // centred on the bottom side, 10 above it
    let (min, max) = recorder.bounding_box().unwrap();
    let centre = holes[0].sample_points()[0];
    assert!((centre.x - 2.0 - (min.x + max.x) / 2.0).abs() < 1e-6);
}

#[test]
fn test_callback_errors_abort_the_wall() {
    let (mut sheet, _) = sheet();
    let err = sheet
        .rectangular_wall(
            80.0,
            40.0,
            "eeee",
            WallOptions::new().callback(1, |_: &mut Sheet, _: FeatureContext| {
                Err(EngineError::UnknownEdge('z'))
            }),
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownEdge('z')));
}

#[test]
fn test_ignore_widths_start_flush() {
    let (mut sheet, recorder) = sheet();
    sheet
        .rectangular_wall(100.0, 60.0, "fFfF", WallOptions::new().ignore_widths(&[7]))
        .unwrap();
    let (min, _) = recorder.borrow().bounding_box().unwrap();
    let sp = sheet.spacing();
    assert!((min.x - (sp / 2.0 - 3.0)).abs() < 1e-9);
}

#[test]
fn test_holes_margin_fills_with_hex_holes() {
    let (mut sheet, recorder) = sheet();
    let settings = HexHoleSettings {
        radius: 3.0,
        spacing: 2.0,
    };
    sheet
        .rectangular_wall(
            100.0,
            60.0,
            "eeee",
            WallOptions::new().holes_margin(5.0).hex_holes(settings),
        )
        .unwrap();

    let recorder = recorder.borrow();
    let holes = recorder.paths_with_color(CutColor::InnerCut).count();
    assert!(holes > 20);
    assert_eq!(recorder.paths_with_color(CutColor::OuterCut).count(), 1);
}

#[test]
fn test_bolted_side() {
    let (mut sheet, recorder) = sheet();
    let bolts = Bolts::new(2);
    sheet
        .rectangular_wall(150.0, 60.0, "FeFe", WallOptions::new().bolts(0, &bolts))
        .unwrap();
    let holes = recorder
        .borrow()
        .paths_with_color(CutColor::InnerCut)
        .count();
    assert_eq!(holes, 2);
}

/// Straight edge whose end leaves the baseline at 30 degrees.
struct Bevelled;

impl BoundaryEdge for Bevelled {
    fn description(&self) -> &'static str {
        "Bevelled"
    }

    fn draw(&self, sheet: &mut Sheet, length: f64, _: &EdgeDrawOptions<'_>) -> EngineResult<()> {
        sheet.edge(length);
        Ok(())
    }

    fn end_angle(&self) -> f64 {
        30.0
    }
}

#[test]
fn test_end_angle_reduces_the_following_corner() {
    let (mut sheet, _) = sheet();
    sheet.edges_mut().register_as('a', Rc::new(Bevelled));

    let seen: Shared<Vec<(usize, f64, f64)>> = shared(Vec::new());
    let record = |seen: &Shared<Vec<(usize, f64, f64)>>| {
        let seen = Rc::clone(seen);
        move |sheet: &mut Sheet, ctx: FeatureContext| -> EngineResult<()> {
            seen.borrow_mut().push((ctx.index, ctx.length, sheet.heading()));
            Ok(())
        }
    };

    sheet
        .rectangular_wall(
            80.0,
            40.0,
            "aeee",
            WallOptions::new()
                .callback(0, record(&seen))
                .callback(1, record(&seen))
                .callback(2, record(&seen))
                .callback(3, record(&seen)),
        )
        .unwrap();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 4);
    // 60 degree corner after the bevelled side, square corners after that
    for ((index, length, heading), (want_length, want_heading)) in
        seen.iter().zip([(80.0, 0.0), (40.0, 60.0), (80.0, 150.0), (40.0, -120.0)])
    {
        assert_eq!(*length, want_length, "side {}", index);
        assert!((heading - want_heading).abs() < 1e-9, "side {}: {}", index, heading);
    }
    assert_eq!(
        seen.iter().map(|s| s.0).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
    assert_eq!(sheet.cursor().depth(), 0);
}
