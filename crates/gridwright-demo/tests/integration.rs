use std::io::Write;
use std::path::{Path, PathBuf};

use gridwright_demo::{SceneError, load_scene, render_board, run_scene};
use gridwright_session::SessionEvent;
use gridwright_spatial::{Cell, TileClass};

fn scene_path(name: &str) -> PathBuf {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/scenes")).join(name)
}

// -----------------------------------------------------------------------
// Bundled scenes
// -----------------------------------------------------------------------

#[test]
fn living_room_final_layout() {
    let scene = load_scene(&scene_path("living_room.ron")).unwrap();
    let report = run_scene(&scene, None).unwrap();

    assert_eq!(
        render_board(&report.scene.board),
        "layer 0\n  ......B#\n  .L....B#\n  ...TT.B.\n  ...TT...\n  ........\n"
    );
    assert_eq!(report.session.storage().count("sofa"), 1);
    assert!(!report.session.is_editing());
    assert!(!report.session.is_holding());
    assert_eq!(report.dropped_events, 0);
}

#[test]
fn living_room_event_outline() {
    let scene = load_scene(&scene_path("living_room.ron")).unwrap();
    let report = run_scene(&scene, None).unwrap();

    let outline: Vec<&str> = report
        .events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::Placed { .. } => Some("placed"),
            SessionEvent::ConfirmRejected { .. } => Some("rejected"),
            SessionEvent::Reverted { .. } => Some("reverted"),
            SessionEvent::Stored { .. } => Some("stored"),
            _ => None,
        })
        .collect();
    assert_eq!(
        outline,
        vec!["rejected", "placed", "reverted", "placed", "stored"]
    );
}

#[test]
fn loft_desk_snaps_back_and_bed_goes_upstairs() {
    let scene = load_scene(&scene_path("loft.ron")).unwrap();
    let report = run_scene(&scene, None).unwrap();
    let board = &report.scene.board;

    let desk = report.scene.objects["desk"];
    assert_eq!(board.get(desk).unwrap().footprint().origin, Cell::flat(0, 0));
    assert_eq!(board.field.classify(Cell::flat(1, 0)), TileClass::Impossible);
    assert_eq!(board.field.classify(Cell::flat(2, 3)), TileClass::Empty);

    assert_eq!(board.field.classify(Cell::new(1, 1, 1)), TileClass::Impossible);
    assert_eq!(report.session.storage().count("crate"), 1);
    assert_eq!(report.session.events().capacity(), 64);
}

// -----------------------------------------------------------------------
// Failures
// -----------------------------------------------------------------------

#[test]
fn missing_scene_is_io_error() {
    let result = load_scene(&scene_path("no_such_scene.ron"));
    assert!(matches!(result, Err(SceneError::Io(_))));
}

#[test]
fn malformed_scene_reports_file() {
    let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
    write!(file, "(title: \"Broken\", ground: [").unwrap();

    match load_scene(file.path()) {
        Err(SceneError::Parse { file: reported, .. }) => assert_eq!(reported, file.path()),
        other => panic!("expected parse error, got {other:?}"),
    }
}
