use jointkit_core::{shared, Shared};
use jointkit_engine::{
    parse_sections, BoundaryEdge, CompoundEdge, EdgeDrawOptions, EngineError, PathRecorder,
    Sheet, Slot, SlottedEdge,
};
use jointkit_settings::EngineConfig;
use std::rc::Rc;

fn sheet() -> (Sheet, Shared<PathRecorder>) {
    let recorder = shared(PathRecorder::new());
    let mut config = EngineConfig::with_thickness(3.0);
    config.burn = 0.0;
    let sheet = Sheet::from_config(&config, Box::new(recorder.clone())).unwrap();
    (sheet, recorder)
}

#[test]
fn test_compound_edge_draws_its_parts() {
    let (mut sheet, _) = sheet();
    let edge = CompoundEdge::new(sheet.edges(), [('e', 20.0), ('f', 60.0), ('e', 20.0)]).unwrap();
    assert_eq!(edge.length(), 100.0);

    edge.draw(&mut sheet, 100.0, &EdgeDrawOptions::default()).unwrap();
    assert!((sheet.position().x - 100.0).abs() < 1e-9);
    assert!(sheet.position().y.abs() < 1e-9);
}

#[test]
fn test_compound_edge_length_mismatch() {
    let (mut sheet, _) = sheet();
    let edge = CompoundEdge::new(sheet.edges(), [('e', 20.0), ('e', 30.0)]).unwrap();
    let err = edge
        .draw(&mut sheet, 60.0, &EdgeDrawOptions::default())
        .unwrap_err();
    match err {
        EngineError::LengthMismatch { expected, actual } => {
            assert_eq!(expected, 60.0);
            assert_eq!(actual, 50.0);
        }
        other => panic!("unexpected error {:?}", other),
    }

    // zero length skips the check
    edge.draw(&mut sheet, 0.0, &EdgeDrawOptions::default()).unwrap();
}

#[test]
fn test_compound_edge_widths_come_from_the_ends() {
    let (sheet, _) = sheet();
    let edge = CompoundEdge::new(sheet.edges(), [('F', 20.0), ('e', 10.0), ('E', 20.0)]).unwrap();
    assert_eq!(edge.start_width(), 3.0);
    assert_eq!(edge.end_width(), 3.0);
    assert_eq!(edge.margin(), 0.0);

    let edge = CompoundEdge::new(sheet.edges(), [('e', 20.0), ('f', 20.0)]).unwrap();
    assert_eq!(edge.start_width(), 0.0);
    assert_eq!(edge.margin(), 3.0);
}

#[test]
fn test_compound_edge_needs_parts() {
    let (sheet, _) = sheet();
    let parts: [(char, f64); 0] = [];
    assert!(matches!(
        CompoundEdge::new(sheet.edges(), parts),
        Err(EngineError::EdgeCount { expected: 1, found: 0 })
    ));
    assert!(matches!(
        CompoundEdge::new(sheet.edges(), [('?', 1.0)]),
        Err(EngineError::UnknownEdge('?'))
    ));
}

#[test]
fn test_compound_edge_can_be_registered() {
    let (mut sheet, _) = sheet();
    let edge = CompoundEdge::new(sheet.edges(), [('e', 10.0), ('f', 40.0), ('e', 10.0)]).unwrap();
    sheet.edges_mut().register_as('c', Rc::new(edge));
    let outcome = sheet
        .rectangular_wall(60.0, 30.0, "cFeF", Default::default())
        .unwrap();
    assert!((outcome.overall_height - (30.0 + 3.0)).abs() < 1e-9);
    assert!((outcome.overall_width - (60.0 + 6.0)).abs() < 1e-9);
}

#[test]
fn test_slot_goes_into_the_part() {
    let (mut sheet, recorder) = sheet();
    Slot::new(5.0)
        .draw(&mut sheet, 3.0, &EdgeDrawOptions::default())
        .unwrap();
    assert!((sheet.position().x - 3.0).abs() < 1e-9);
    sheet.finish();
    let (_, max) = recorder.borrow().bounding_box().unwrap();
    assert!((max.y - 5.0).abs() < 1e-9);
}

#[test]
fn test_slotted_edge_length() {
    let (mut sheet, recorder) = sheet();
    let sections = parse_sections("20*3").unwrap();
    let edge = SlottedEdge::new(sheet.edges(), sections, 'e', 10.0).unwrap();
    // three sections, two thickness wide gaps
    assert!((edge.length() - 66.0).abs() < 1e-9);

    edge.draw(&mut sheet, edge.length(), &EdgeDrawOptions::default())
        .unwrap();
    assert!((sheet.position().x - 66.0).abs() < 1e-9);
    sheet.finish();
    let paths = recorder.borrow();
    let path = &paths.paths()[0];
    assert!((path.length() - (66.0 + 4.0 * 10.0)).abs() < 1e-9);
}

#[test]
fn test_slotted_edge_needs_sections() {
    let (sheet, _) = sheet();
    assert!(matches!(
        SlottedEdge::new(sheet.edges(), Vec::new(), 'e', 0.0),
        Err(EngineError::InvalidSections(_))
    ));
}
