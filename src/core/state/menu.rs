//=========================================================================
// Main Menu
//
// Offers play (S) and quit (Q). Quitting clears the stack; the driver
// treats an empty stack as the exit signal.
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

//=== MenuState ===========================================================

pub struct MenuState {
    scene_graph: NodeHandle,
}

impl MenuState {
    pub fn new(context: &Context) -> Result<Self, RenderError> {
        let mut renderer = context.renderer.borrow_mut();
        let scene_graph = build_backdrop_scene(&mut *renderer, "AircraftsMenu")?;
        Ok(Self { scene_graph })
    }
}

impl State for MenuState {
    fn update(
        &mut self,
        timer: &GameTimer,
        context: &Context,
        _transitions: &mut TransitionQueue,
    ) -> bool {
        let mut renderer = context.renderer.borrow_mut();
        self.scene_graph.update(timer, &mut *renderer);
        true
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
            KeyCode::KeyS => {
                transitions.push(StateTransition::Pop);
                transitions.push(StateTransition::Push(StateId::Game));
            }
            KeyCode::KeyQ => {
                transitions.push(StateTransition::Clear);
            }
            _ => {}
        }
        true
    }

    fn handle_realtime_input(
        &mut self,
        _context: &Context,
        _transitions: &mut TransitionQueue,
    ) -> bool {
        true
    }
}
