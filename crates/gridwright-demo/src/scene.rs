//! Scene files: the ground layout, the objects on it, and a script of steps
//! to drive a session with.

use crate::error::SceneError;
use gridwright_session::{Board, PlaceableId, SessionConfig};
use gridwright_spatial::{Cell, Extent, OccupancyField, PlaceableFootprint, TileClass};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level scene definition loaded from a `.ron` file.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneData {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Session settings. A `--config` file on the command line wins.
    #[serde(default)]
    pub config: Option<SessionConfig>,
    pub ground: Vec<GroundRegion>,
    /// Cells on layer 0 that can never be built on.
    #[serde(default)]
    pub blocked: Vec<(i32, i32)>,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub steps: Vec<SceneStep>,
}

/// A rectangle of buildable ground.
#[derive(Debug, Clone, Deserialize)]
pub struct GroundRegion {
    pub origin: (i32, i32),
    pub size: (u32, u32),
    #[serde(default)]
    pub layer: i32,
}

/// An object in the world when the scene starts.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneObject {
    /// Unique name within this scene (used by steps to reference objects).
    pub name: String,
    /// Storage kind the object returns to when put away.
    pub kind: String,
    pub origin: (i32, i32),
    pub size: (u32, u32),
    #[serde(default)]
    pub layer: i32,
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Already committed to the ground, rather than freshly taken out of
    /// storage.
    #[serde(default)]
    pub placed: bool,
}

fn default_depth() -> u32 {
    1
}

/// One scripted action. Pointer positions are in world space.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum SceneStep {
    Hover((f32, f32)),
    /// Button-down. The object under the pointer is found by hit-testing the
    /// board.
    Press {
        at: (f32, f32),
        #[serde(default)]
        over_ui: bool,
    },
    Release((f32, f32)),
    /// Pick an object up directly, as a storage panel would.
    Hold {
        object: String,
        #[serde(default)]
        drag: bool,
    },
    Rotate,
    Confirm,
    Cancel {
        #[serde(default)]
        keep: bool,
    },
    EditStart,
    EditEnd,
}

/// A board built from a scene, with its object names resolved.
#[derive(Debug)]
pub struct BuiltScene {
    pub board: Board,
    pub objects: BTreeMap<String, PlaceableId>,
}

impl BuiltScene {
    /// Scene name of an entity, if it came from the scene file.
    pub fn name_of(&self, id: PlaceableId) -> Option<&str> {
        self.objects
            .iter()
            .find(|(_, other)| **other == id)
            .map(|(name, _)| name.as_str())
    }
}

/// Load a scene from a `.ron` file.
pub fn load_scene(path: &Path) -> Result<SceneData, SceneError> {
    let content = std::fs::read_to_string(path)?;
    ron::from_str(&content).map_err(|e| SceneError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Build the board a scene describes and check that every step refers to a
/// defined object.
pub fn build_scene(scene: &SceneData) -> Result<BuiltScene, SceneError> {
    let mut field = OccupancyField::new();
    for region in &scene.ground {
        let (x, y) = region.origin;
        let (width, height) = region.size;
        field.paint_ground(
            Cell::new(x, y, region.layer),
            Extent::flat(width, height),
            TileClass::Empty,
        );
    }
    for &(x, y) in &scene.blocked {
        field.paint_cell(Cell::flat(x, y), TileClass::Impossible);
    }

    let mut board = Board::new(field);
    let mut objects = BTreeMap::new();
    for object in &scene.objects {
        if objects.contains_key(&object.name) {
            return Err(SceneError::DuplicateObject {
                name: object.name.clone(),
            });
        }
        let (x, y) = object.origin;
        let (width, height) = object.size;
        let footprint = PlaceableFootprint::new(
            Cell::new(x, y, object.layer),
            Extent::new(width, height, object.depth),
        );
        let id = if object.placed {
            board
                .spawn_placed(object.kind.clone(), footprint)
                .map_err(|source| SceneError::Blocked {
                    name: object.name.clone(),
                    source,
                })?
        } else {
            board.spawn(object.kind.clone(), footprint)
        };
        objects.insert(object.name.clone(), id);
    }

    for (index, step) in scene.steps.iter().enumerate() {
        match step {
            SceneStep::Hold { object, .. } if !objects.contains_key(object) => {
                return Err(SceneError::ObjectNotFound {
                    name: object.clone(),
                    step: index,
                });
            }
            _ => {}
        }
    }

    Ok(BuiltScene { board, objects })
}
