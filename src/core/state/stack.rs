//=========================================================================
// State Stack
//
// Owns the live states and applies deferred structural changes.
//
// Responsibilities:
// - Map StateIds to registered fallible constructors
// - Route update / draw / input calls through the stacked states
// - Buffer Push/Pop/Clear requests and flush them exactly once, at the
//   end of update, never mid-traversal
//
// Traversal Direction:
// ```text
// update / handle_event / handle_realtime_input:
//     top → bottom, stopping where a state returns false
// draw:
//     bottom → top, so overlays paint over what they cover
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Modules ====================================================

use crate::core::state::{Context, State, StateId, StateTransition, TransitionQueue};
use crate::input::KeyCode;
use crate::render::RenderError;
use crate::time::GameTimer;

//=== StateFactory ========================================================

/// Fallible constructor for a registered state.
type StateFactory = Box<dyn Fn(&Context) -> Result<Box<dyn State>, RenderError>>;

//=== StateStack ==========================================================

/// One live state plus the id it was registered under.
struct StackEntry {
    id: StateId,
    state: Box<dyn State>,
}

/// The stack of live game states.
///
/// States request structural changes through the `TransitionQueue` they
/// receive in each call; the stack flushes those requests after its own
/// update traversal completes. Between flushes the stack's shape is
/// stable, so a state can safely request its own removal while running.
pub struct StateStack {
    stack: Vec<StackEntry>,
    pending: TransitionQueue,
    factories: HashMap<StateId, StateFactory>,
    context: Context,
}

impl StateStack {
    /// Creates an empty stack over the shared context.
    pub fn new(context: Context) -> Self {
        Self {
            stack: Vec::new(),
            pending: TransitionQueue::new(),
            factories: HashMap::new(),
            context,
        }
    }

    /// Registers the constructor used when `id` is pushed.
    pub fn register_state<F>(&mut self, id: StateId, factory: F)
    where
        F: Fn(&Context) -> Result<Box<dyn State>, RenderError> + 'static,
    {
        self.factories.insert(id, Box::new(factory));
    }

    //--- Transition Requests ----------------------------------------------

    /// Requests a push, applied on the next flush.
    pub fn push_state(&mut self, id: StateId) {
        self.pending.push(StateTransition::Push(id));
    }

    /// Requests a pop, applied on the next flush.
    pub fn pop_state(&mut self) {
        self.pending.push(StateTransition::Pop);
    }

    /// Requests removal of every state, applied on the next flush.
    pub fn clear_states(&mut self) {
        self.pending.push(StateTransition::Clear);
    }

    //--- Traversals -------------------------------------------------------

    /// Updates states top-down, stopping where one returns `false`,
    /// then flushes pending transitions.
    ///
    /// State construction failures during the flush propagate to the
    /// caller; the failed push leaves the stack as the preceding
    /// transitions shaped it.
    pub fn update(&mut self, timer: &GameTimer) -> Result<(), RenderError> {
        let Self {
            stack,
            pending,
            context,
            ..
        } = self;

        for entry in stack.iter_mut().rev() {
            if !entry.state.update(timer, context, pending) {
                break;
            }
        }

        self.apply_pending_changes()
    }

    /// Routes one discrete key press top-down, stopping where a state
    /// returns `false`. Transitions buffer until the update flush.
    pub fn handle_event(&mut self, key: KeyCode) {
        let Self {
            stack,
            pending,
            context,
            ..
        } = self;

        for entry in stack.iter_mut().rev() {
            if !entry.state.handle_event(key, context, pending) {
                break;
            }
        }
    }

    /// Polls realtime bindings top-down, stopping where a state returns
    /// `false`.
    pub fn handle_realtime_input(&mut self) {
        let Self {
            stack,
            pending,
            context,
            ..
        } = self;

        for entry in stack.iter_mut().rev() {
            if !entry.state.handle_realtime_input(context, pending) {
                break;
            }
        }
    }

    /// Draws states bottom-up so overlays paint last.
    pub fn draw(&mut self) {
        let Self { stack, context, .. } = self;
        for entry in stack.iter_mut() {
            entry.state.draw(context);
        }
    }

    //--- Introspection ----------------------------------------------------

    /// True when no states are live (the quit condition).
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of live states.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Id of the topmost state, if any.
    pub fn top_id(&self) -> Option<StateId> {
        self.stack.last().map(|entry| entry.id)
    }

    //--- Deferred Flush ---------------------------------------------------

    /// Constructs a state through its registered factory.
    ///
    /// An unregistered id is a programmer error; construction failures
    /// from the factory itself propagate.
    fn create_state(&self, id: StateId) -> Result<Box<dyn State>, RenderError> {
        let factory = self
            .factories
            .get(&id)
            .expect("no state factory registered for requested id");
        factory(&self.context)
    }

    /// Applies every buffered transition in request order.
    fn apply_pending_changes(&mut self) -> Result<(), RenderError> {
        for transition in self.pending.take() {
            match transition {
                StateTransition::Push(id) => {
                    let state = self.create_state(id)?;
                    self.stack.push(StackEntry { id, state });
                    debug!("state stack: pushed {:?} (depth {})", id, self.stack.len());
                }
                StateTransition::Pop => {
                    if let Some(entry) = self.stack.pop() {
                        debug!(
                            "state stack: popped {:?} (depth {})",
                            entry.id,
                            self.stack.len()
                        );
                    }
                }
                StateTransition::Clear => {
                    debug!("state stack: cleared {} state(s)", self.stack.len());
                    self.stack.clear();
                }
            }
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
