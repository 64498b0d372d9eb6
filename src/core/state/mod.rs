//=========================================================================
// Game States
//
// The stacked state machine: Title, Menu, Game, and Pause screens, the
// trait they implement, and the deferred transition plumbing.
//
// States never mutate the stack directly. They record requested
// transitions into a `TransitionQueue`; the stack flushes the queue
// exactly once at the end of its own update, so structural changes
// never happen mid-traversal.
//
// Transition Table:
// ```text
// Title  —any key→ pop, push Menu
// Menu   —S→ pop, push Game      —Q→ clear (quit)
// Game   —P→ push Pause (Game stays beneath)
// Pause  —P→ pop (resume)        —Q→ clear, push Menu
// ```
//
//=========================================================================

//=== Submodules ==========================================================

mod game;
mod menu;
mod pause;
mod stack;
mod title;

pub use game::GameState;
pub use menu::MenuState;
pub use pause::PauseState;
pub use stack::StateStack;
pub use title::TitleState;

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

//=== Internal Modules ====================================================

use crate::core::player::Player;
use crate::core::scene::{NodeHandle, SceneNode};
use crate::input::{InputSource, KeyCode};
use crate::render::{RenderError, Renderer};
use crate::time::GameTimer;

//=== StateId =============================================================

/// Identifier for each registered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Title,
    Menu,
    Game,
    Pause,
}

//=== StateTransition =====================================================

/// A requested structural change to the state stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTransition {
    /// Construct and push the identified state on top.
    Push(StateId),

    /// Remove the top state.
    Pop,

    /// Remove every state.
    Clear,
}

//=== TransitionQueue =====================================================

/// Buffered transitions awaiting the end-of-update flush.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<StateTransition>,
}

impl TransitionQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Records a transition for the next flush.
    pub fn push(&mut self, transition: StateTransition) {
        self.queue.push(transition);
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending transitions.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drains the queue, leaving it empty.
    pub fn take(&mut self) -> Vec<StateTransition> {
        mem::take(&mut self.queue)
    }
}

//=== Context =============================================================

/// Shared collaborator bundle handed to every state.
///
/// Non-owning: the driver owns the renderer, input source, and player;
/// states borrow them through `RefCell` for the duration of a call.
#[derive(Clone)]
pub struct Context {
    pub renderer: Rc<RefCell<dyn Renderer>>,
    pub input: Rc<RefCell<dyn InputSource>>,
    pub player: Rc<RefCell<Player>>,
}

impl Context {
    pub fn new(
        renderer: Rc<RefCell<dyn Renderer>>,
        input: Rc<RefCell<dyn InputSource>>,
        player: Rc<RefCell<Player>>,
    ) -> Self {
        Self {
            renderer,
            input,
            player,
        }
    }
}

//=== State ===============================================================

/// One screen of the game.
///
/// Each method's `bool` return controls downward propagation through
/// the stack: `false` stops the traversal at this state.
pub trait State {
    /// Advances the state's scene one tick.
    fn update(
        &mut self,
        timer: &GameTimer,
        context: &Context,
        transitions: &mut TransitionQueue,
    ) -> bool;

    /// Submits the state's drawables for this frame.
    fn draw(&mut self, context: &Context);

    /// Reacts to one discrete key press.
    fn handle_event(
        &mut self,
        key: KeyCode,
        context: &Context,
        transitions: &mut TransitionQueue,
    ) -> bool;

    /// Polls held keys for realtime bindings.
    fn handle_realtime_input(
        &mut self,
        context: &Context,
        transitions: &mut TransitionQueue,
    ) -> bool;
}

//=== Shared Scene Helpers ================================================

/// Builds the single-backdrop scene the menu-like screens share.
///
/// Runs the full renderer rebuild sequence: reset, re-register
/// materials, build the graph, then size frame resources to the items
/// the graph allocated.
pub(crate) fn build_backdrop_scene(
    renderer: &mut dyn Renderer,
    material: &str,
) -> Result<NodeHandle, RenderError> {
    renderer.reset_frame_resources();
    renderer.rebuild_materials();

    let root = NodeHandle::new(SceneNode::plain());
    let backdrop = NodeHandle::new(SceneNode::sprite());
    {
        let mut node = backdrop.get_mut();
        node.set_sprite_names(material, "boxGeo", "box");
        node.set_scale(60.0, 1.0, 50.0);
    }
    root.attach_child(backdrop);
    root.build(renderer)?;

    let count = renderer.render_item_count();
    renderer.build_frame_resources(count)?;
    Ok(root)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// take drains the queue in push order and empties it.
    #[test]
    fn transition_queue_take_drains_in_order() {
        let mut queue = TransitionQueue::new();
        queue.push(StateTransition::Pop);
        queue.push(StateTransition::Push(StateId::Menu));
        assert_eq!(queue.len(), 2);

        let drained = queue.take();
        assert_eq!(
            drained,
            vec![StateTransition::Pop, StateTransition::Push(StateId::Menu)]
        );
        assert!(queue.is_empty());
    }

    /// The backdrop helper allocates one item and sizes frame resources
    /// to match.
    #[test]
    fn backdrop_scene_builds_one_item() {
        let mut renderer = crate::render::HeadlessRenderer::new();
        let root = build_backdrop_scene(&mut renderer, "AircraftsTitle").unwrap();

        use crate::render::Renderer as _;
        assert_eq!(renderer.render_item_count(), 1);
        assert_eq!(renderer.frame_resource_capacity(), Some(1));
        assert_eq!(root.child_count(), 1);
    }

    /// An unregistered backdrop material fails construction.
    #[test]
    fn backdrop_scene_rejects_unknown_material() {
        let mut renderer = crate::render::HeadlessRenderer::new();
        let result = build_backdrop_scene(&mut renderer, "NoSuchMaterial");
        assert!(result.is_err());
    }
}
