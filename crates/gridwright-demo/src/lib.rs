//! Headless demo runner for gridwright placement sessions.
//!
//! Loads a scene (ground layout, objects, and a script of pointer input and
//! commands), plays it through a [`PlacementSession`] with logging
//! collaborators, and renders the resulting board as text.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gridwright_demo::{load_scene, render_board, run_scene};
//!
//! let scene = load_scene(Path::new("scenes/living_room.ron"))?;
//! let report = run_scene(&scene, None)?;
//! println!("{}", render_board(&report.scene.board));
//! ```
//!
//! [`PlacementSession`]: gridwright_session::PlacementSession

pub mod error;
pub mod render;
pub mod runner;
pub mod scene;

pub use error::SceneError;
pub use render::render_board;
pub use runner::{DemoSession, LogIndicator, RunReport, StorageTally, run_scene};
pub use scene::{BuiltScene, SceneData, SceneStep, build_scene, load_scene};
