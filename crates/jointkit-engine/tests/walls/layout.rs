use jointkit_core::{shared, Shared};
use jointkit_engine::{MoveSpec, MoveToken, PathRecorder, Sheet, WallOptions};
use jointkit_settings::EngineConfig;

fn sheet() -> (Sheet, Shared<PathRecorder>) {
    let recorder = shared(PathRecorder::new());
    let mut config = EngineConfig::with_thickness(3.0);
    config.burn = 0.0;
    let sheet = Sheet::from_config(&config, Box::new(recorder.clone())).unwrap();
    (sheet, recorder)
}

#[test]
fn test_walls_placed_right_do_not_overlap() {
    let (mut sheet, recorder) = sheet();
    for _ in 0..3 {
        sheet
            .rectangular_wall(20.0, 10.0, "eeee", WallOptions::new().moves("right"))
            .unwrap();
    }

    let recorder = recorder.borrow();
    let paths = recorder.paths();
    assert_eq!(paths.len(), 3);
    let extent = |i: usize| {
        let points = paths[i].sample_points();
        let min = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    };
    for i in 1..3 {
        let gap = extent(i).0 - extent(i - 1).1;
        assert!((gap - sheet.spacing()).abs() < 1e-9);
    }
}

#[test]
fn test_parts_matrix_lays_out_rows() {
    let (mut sheet, recorder) = sheet();
    sheet
        .parts_matrix(5, 2, "right", |sheet, moves| {
            sheet
                .rectangular_wall(20.0, 10.0, "eeee", WallOptions::new().moves(moves))
                .map(|_| ())
        })
        .unwrap();

    assert_eq!(recorder.borrow().paths().len(), 5);
    let sp = sheet.spacing();
    assert!((sheet.position().x - 2.0 * (20.0 + sp)).abs() < 1e-9);
    assert!(sheet.position().y.abs() < 1e-9);

    let (_, max) = recorder.borrow().bounding_box().unwrap();
    // three rows
    assert!((max.y - (3.0 * 10.0 + 2.5 * sp)).abs() < 1e-9);
}

#[test]
fn test_parts_matrix_only_moves() {
    let (mut sheet, recorder) = sheet();
    sheet
        .parts_matrix(4, 0, "up only", |sheet, moves| {
            sheet
                .rectangular_wall(20.0, 10.0, "eeee", WallOptions::new().moves(moves))
                .map(|_| ())
        })
        .unwrap();
    assert!(recorder.borrow().paths().is_empty());
    assert!((sheet.position().y - 4.0 * (10.0 + sheet.spacing())).abs() < 1e-9);
}

#[test]
fn test_parts_matrix_rejects_bad_moves() {
    let (mut sheet, _) = sheet();
    let err = sheet
        .parts_matrix(2, 1, "sideways", |_, _| Ok(()))
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown direction: 'sideways'");
}

#[test]
fn test_move_spec_round_trip() {
    let spec = MoveSpec::new(&[MoveToken::Left, MoveToken::Down]);
    assert_eq!(spec.to_string(), "left down");
    assert_eq!("left down".parse::<MoveSpec>().unwrap(), spec);
}
