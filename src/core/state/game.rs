//=========================================================================
// Gameplay State
//
// Owns the world and routes player input into its command queue. P
// pushes the pause overlay; the game itself stays on the stack beneath
// it, frozen until resumed.
//
//=========================================================================

//=== Internal Modules ====================================================

use crate::core::state::{Context, State, StateId, StateTransition, TransitionQueue};
use crate::core::world::World;
use crate::input::KeyCode;
use crate::render::RenderError;
use crate::time::GameTimer;

//=== GameState ===========================================================

pub struct GameState {
    world: World,
}

impl GameState {
    /// Builds the gameplay scene through the full renderer rebuild
    /// sequence: reset, re-register materials, build the world's graph,
    /// then size frame resources to the allocated items.
    pub fn new(context: &Context) -> Result<Self, RenderError> {
        let mut renderer = context.renderer.borrow_mut();
        renderer.reset_frame_resources();
        renderer.rebuild_materials();

        let mut world = World::new();
        world.build_scene(&mut *renderer)?;

        let count = renderer.render_item_count();
        renderer.build_frame_resources(count)?;

        Ok(Self { world })
    }

    /// Lets the player bindings fill the world's command queue from the
    /// current key snapshot.
    fn process_input(&mut self, context: &Context) {
        let input = context.input.borrow();
        let mut player = context.player.borrow_mut();
        let commands = self.world.command_queue_mut();
        player.handle_event(&*input, commands);
        player.handle_realtime_input(&*input, commands);
    }

}

impl State for GameState {
    fn update(
        &mut self,
        timer: &GameTimer,
        context: &Context,
        _transitions: &mut TransitionQueue,
    ) -> bool {
        self.process_input(context);

        let mut renderer = context.renderer.borrow_mut();
        self.world.update(timer, &mut *renderer);
        true
    }

    fn draw(&mut self, context: &Context) {
        let mut renderer = context.renderer.borrow_mut();
        self.world.draw(&mut *renderer);
    }

    fn handle_event(
        &mut self,
        key: KeyCode,
        _context: &Context,
        transitions: &mut TransitionQueue,
    ) -> bool {
        if key == KeyCode::KeyP {
            transitions.push(StateTransition::Push(StateId::Pause));
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
