//=========================================================================
// Scene Graph
//
// Tree of transform nodes driving update, draw, build, and command
// broadcast. Parents own children; children keep a non-owning parent
// back-reference for world-transform composition.
//
//=========================================================================

mod entity;
mod node;

pub use entity::{AircraftType, Entity};
pub use node::{NodeHandle, NodeKind, SceneNode};
