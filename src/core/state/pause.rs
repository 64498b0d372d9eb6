//=========================================================================
// Pause Screen
//
// Overlay pushed above the game. While on top it freezes the game by
// blocking update, event, and realtime propagation to the states
// beneath. P resumes; Q abandons the session back to the menu.
//
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::scene::NodeHandle;
use crate::core::state::{
    build_backdrop_scene, Context, State, StateId, StateTransition, TransitionQueue,
};
use crate::input::KeyCode;
use crate::render::RenderError;
use crate::time::GameTimer;

//=== PauseState ==========================================================

pub struct PauseState {
    scene_graph: NodeHandle,
}

impl PauseState {
    pub fn new(context: &Context) -> Result<Self, RenderError> {
        let mut renderer = context.renderer.borrow_mut();
        let scene_graph = build_backdrop_scene(&mut *renderer, "AircraftsPause")?;
        Ok(Self { scene_graph })
    }
}

impl State for PauseState {
    fn update(
        &mut self,
        timer: &GameTimer,
        context: &Context,
        _transitions: &mut TransitionQueue,
    ) -> bool {
        let mut renderer = context.renderer.borrow_mut();
        self.scene_graph.update(timer, &mut *renderer);
        // The paused game beneath must not tick.
        false
    }

    fn draw(&mut self, context: &Context) {
        let mut renderer = context.renderer.borrow_mut();
        self.scene_graph.draw(&mut *renderer);
    }

    fn handle_event(
        &mut self,
        key: KeyCode,
        _context: &Context,
        transitions: &mut TransitionQueue,
    ) -> bool {
        match key {
            KeyCode::KeyP => {
                transitions.push(StateTransition::Pop);
            }
            KeyCode::KeyQ => {
                transitions.push(StateTransition::Clear);
                transitions.push(StateTransition::Push(StateId::Menu));
            }
            _ => {}
        }
        false
    }

    fn handle_realtime_input(
        &mut self,
        _context: &Context,
        _transitions: &mut TransitionQueue,
    ) -> bool {
        false
    }
}
