//=========================================================================
// Skyward — Library Root
//
// This crate defines the core of a small 3D arcade game demo: a scene
// graph of aircraft and sprite entities, a stack of game states (title,
// menu, gameplay, pause), and a command queue routing player input into
// the scene.
//
// Responsibilities:
// - Expose the tick-loop driver (`App`) as the main entry point
// - Provide the core simulation systems (scene graph, states, commands)
// - Define the contracts the excluded platform layers must fulfil
//   (`Renderer` for draw submission, `InputSource` for key polling)
//
// Typical usage:
// ```no_run
// use skyward::prelude::*;
// use std::cell::RefCell;
// use std::rc::Rc;
//
// let renderer: Rc<RefCell<dyn Renderer>> =
//     Rc::new(RefCell::new(HeadlessRenderer::new()));
// let mut app = App::new(renderer);
// while let TickControl::Continue = app.tick().expect("renderer failure") {}
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the simulation systems (scene graph, command dispatch,
// player input binding, world rules, and the state machine).
//
// `render` and `input` define the collaborator contracts for the external
// graphics and windowing layers, plus headless stand-ins for tests and
// driver-less operation.
//
pub mod app;
pub mod core;
pub mod input;
pub mod prelude;
pub mod render;
pub mod time;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the driver types as the main entry point for applications.
//
pub use app::{App, TickControl};
