//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use skyward::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Driver
pub use crate::app::{App, TickControl};

// Scene graph
pub use crate::core::scene::{AircraftType, NodeHandle, SceneNode};

// Command dispatch
pub use crate::core::category::Category;
pub use crate::core::command::{Command, CommandQueue};

// Player input binding
pub use crate::core::player::{Action, Player};

// Gameplay
pub use crate::core::world::World;

// State machine
pub use crate::core::state::{
    Context, State, StateId, StateStack, StateTransition, TransitionQueue,
};

// Collaborator contracts
pub use crate::input::{InputSource, KeyCode, KeyboardState};
pub use crate::render::{HeadlessRenderer, RenderError, RenderItemHandle, Renderer};

// Frame timing
pub use crate::time::GameTimer;
