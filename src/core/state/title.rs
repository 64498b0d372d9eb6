//=========================================================================
// Title Screen
//
// Splash screen shown at startup. Any key press replaces it with the
// main menu.
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

//=== TitleState ==========================================================

pub struct TitleState {
    scene_graph: NodeHandle,
}

impl TitleState {
    pub fn new(context: &Context) -> Result<Self, RenderError> {
        let mut renderer = context.renderer.borrow_mut();
        let scene_graph = build_backdrop_scene(&mut *renderer, "AircraftsTitle")?;
        Ok(Self { scene_graph })
    }
}

impl State for TitleState {
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
        _key: KeyCode,
        _context: &Context,
        transitions: &mut TransitionQueue,
    ) -> bool {
        // Any key dismisses the splash.
        transitions.push(StateTransition::Pop);
        transitions.push(StateTransition::Push(StateId::Menu));
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
