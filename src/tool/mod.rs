//! The interactive layer: parameters, input handling, drawing and placement
//! around the sampling pipeline.

mod config;
mod controller;
pub mod draw;
pub mod input;
pub mod placement;
mod params;

pub use config::ScatterConfig;
pub use controller::{FrameInput, FrameReport, FrameSample, ScatterTool};
pub use draw::{Color, DrawCommand, DrawList, DrawSurface};
pub use input::{EventResponse, InputEvent, KeyCode, Modifier, Modifiers, MouseButton};
pub use params::{PrefabHandle, ToolParameters};
pub use placement::{spawn, InstanceId, Placement, PlacementHost, PlacementStore, SpawnedInstance};
