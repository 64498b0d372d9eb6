//=========================================================================
// Core Systems
//
// Simulation heart of the crate: the scene graph, command dispatch,
// player input binding, world rules, and the stacked state machine.
//
// Module Map:
// - `category` — broadcast targeting bitmask
// - `command`  — type-erased scene commands and their FIFO queue
// - `scene`    — SceneNode hierarchy, entities, transforms
// - `player`   — key bindings and command production
// - `world`    — gameplay assembly and per-tick rules
// - `state`    — State trait, Title/Menu/Game/Pause, StateStack
//
//=========================================================================

pub mod category;
pub mod command;
pub mod player;
pub mod scene;
pub mod state;
pub mod world;
