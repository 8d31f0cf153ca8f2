//! Headless scene runner: drives a placement session through a scene's
//! scripted steps.

use crate::error::SceneError;
use crate::scene::{BuiltScene, SceneData, SceneStep, build_scene};
use gridwright_session::{
    EditIndicator, EditSignal, ObjectStorage, PlacementSession, PointerFrame, SessionConfig,
    SessionEvent,
};
use gridwright_spatial::WorldPos;
use std::collections::BTreeMap;
use tracing::{debug, info};

// ===========================================================================
// Collaborators
// ===========================================================================

/// Edit indicator that logs instead of drawing.
#[derive(Debug, Default)]
pub struct LogIndicator {
    open: bool,
    position: Option<WorldPos>,
}

impl LogIndicator {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn position(&self) -> Option<WorldPos> {
        self.position
    }
}

impl EditIndicator for LogIndicator {
    fn open(&mut self) {
        self.open = true;
        debug!("indicator opened");
    }

    fn close(&mut self) {
        self.open = false;
        debug!("indicator closed");
    }

    fn set_position(&mut self, position: WorldPos) {
        self.position = Some(position);
    }
}

/// Storage panel that keeps a count per object kind.
#[derive(Debug, Default)]
pub struct StorageTally {
    counts: BTreeMap<String, u32>,
}

impl StorageTally {
    pub fn count(&self, kind: &str) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(kind, count)| (kind.as_str(), *count))
    }
}

impl ObjectStorage for StorageTally {
    fn add_object_count(&mut self, kind: &str, amount: u32) {
        let count = self.counts.entry(kind.to_string()).or_insert(0);
        *count += amount;
        info!(kind, count = *count, "returned to storage");
    }
}

pub type DemoSession = PlacementSession<LogIndicator, StorageTally>;

// ===========================================================================
// Running
// ===========================================================================

/// Everything left over after a scene has run.
#[derive(Debug)]
pub struct RunReport {
    pub scene: BuiltScene,
    pub session: DemoSession,
    pub events: Vec<SessionEvent>,
    /// Events lost because the notification buffer overflowed.
    pub dropped_events: u64,
}

/// Build a scene and play its steps in order.
///
/// `config` overrides any configuration embedded in the scene.
pub fn run_scene(
    scene: &SceneData,
    config: Option<&SessionConfig>,
) -> Result<RunReport, SceneError> {
    let config = config
        .or(scene.config.as_ref())
        .cloned()
        .unwrap_or_default();
    let mut built = build_scene(scene)?;
    let mut session = PlacementSession::with_config(
        &config,
        LogIndicator::default(),
        StorageTally::default(),
    )?;

    info!(title = %scene.title, steps = scene.steps.len(), "running scene");
    for (index, step) in scene.steps.iter().enumerate() {
        debug!(index, ?step, "step");
        apply_step(&mut session, &mut built, step);
    }

    let dropped_events = session.events().dropped_count();
    let events = session.drain_events();
    info!(
        events = events.len(),
        dropped_events,
        objects = built.board.len(),
        "scene finished"
    );

    Ok(RunReport {
        scene: built,
        session,
        events,
        dropped_events,
    })
}

fn apply_step(session: &mut DemoSession, built: &mut BuiltScene, step: &SceneStep) {
    let board = &mut built.board;
    match step {
        SceneStep::Hover(at) => session.tick(board, &PointerFrame::hover(*at)),
        SceneStep::Press { at, over_ui } => {
            let position = WorldPos::from(*at);
            let hit = board.placeable_at(session.layout().world_to_cell(position));
            let frame = PointerFrame::press(position, hit);
            let frame = if *over_ui { frame.over_ui() } else { frame };
            session.tick(board, &frame);
        }
        SceneStep::Release(at) => session.tick(board, &PointerFrame::release(*at)),
        SceneStep::Hold { object, drag } => {
            if let Some(&id) = built.objects.get(object) {
                session.begin_hold(board, id, *drag);
            }
        }
        SceneStep::Rotate => session.rotate(board),
        SceneStep::Confirm => {
            let outcome = session.confirm(board);
            info!(?outcome, "confirm");
        }
        SceneStep::Cancel { keep } => {
            let outcome = session.cancel(board, *keep);
            info!(?outcome, keep, "cancel");
        }
        SceneStep::EditStart => session.on_edit_signal(board, EditSignal::EditStart),
        SceneStep::EditEnd => session.on_edit_signal(board, EditSignal::EditEnd),
    }
}
