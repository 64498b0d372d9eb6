//=========================================================================
// Scene Commands
//
// Type-erased actions broadcast through the scene graph, and the FIFO
// queue carrying them from input handling to world update.
//
// A command pairs a target category mask with a closure over a scene
// node and the frame timer. The producer (Player) pushes commands while
// handling input; the consumer (World) drains them once per tick and
// broadcasts each into the graph.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

//=== Internal Modules ====================================================

use crate::core::category::Category;
use crate::core::scene::SceneNode;
use crate::time::GameTimer;

//=== Command =============================================================

/// Shared, type-erased command action.
pub type CommandAction = Rc<dyn Fn(&mut SceneNode, &GameTimer)>;

/// A targeted action applied to matching scene nodes.
///
/// Cloning is cheap; the action closure is reference-counted so a
/// binding table can hand out copies of the same command every tick.
#[derive(Clone)]
pub struct Command {
    category: Category,
    action: CommandAction,
}

impl Command {
    /// Creates a command targeting `category`.
    pub fn new<F>(category: Category, action: F) -> Self
    where
        F: Fn(&mut SceneNode, &GameTimer) + 'static,
    {
        Self {
            category,
            action: Rc::new(action),
        }
    }

    /// Target mask this command applies to.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Runs the action against one node.
    pub fn invoke(&self, node: &mut SceneNode, timer: &GameTimer) {
        (self.action)(node, timer);
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

//=== CommandQueue ========================================================

/// FIFO of pending scene commands.
///
/// Single-threaded producer/consumer within one tick: the player pushes
/// during input handling, the world drains during update.
#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: VecDeque<Command>,
}

impl CommandQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Appends a command at the back.
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Removes and returns the oldest command.
    ///
    /// Panics when the queue is empty; callers check `is_empty` first.
    pub fn pop(&mut self) -> Command {
        self.queue
            .pop_front()
            .expect("pop called on an empty command queue")
    }

    /// True when no commands are pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending commands.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(category: Category) -> Command {
        Command::new(category, |_, _| {})
    }

    /// Commands come back out in push order.
    #[test]
    fn queue_is_fifo() {
        let mut queue = CommandQueue::new();
        queue.push(tagged(Category::SCENE));
        queue.push(tagged(Category::PLAYER_AIRCRAFT));
        queue.push(tagged(Category::ENEMY_AIRCRAFT));

        assert_eq!(queue.pop().category(), Category::SCENE);
        assert_eq!(queue.pop().category(), Category::PLAYER_AIRCRAFT);
        assert_eq!(queue.pop().category(), Category::ENEMY_AIRCRAFT);
    }

    /// Emptiness tracks pushes and pops.
    #[test]
    fn emptiness_lifecycle() {
        let mut queue = CommandQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);

        queue.push(tagged(Category::SCENE));
        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 1);

        queue.pop();
        assert!(queue.is_empty());
    }

    /// Popping an empty queue is a programmer error.
    #[test]
    #[should_panic(expected = "empty command queue")]
    fn pop_empty_panics() {
        let mut queue = CommandQueue::new();
        queue.pop();
    }

    /// Cloned commands share one action.
    #[test]
    fn clone_shares_action() {
        use std::cell::Cell;
        use std::rc::Rc;

        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let command = Command::new(Category::SCENE, move |_, _| {
            counter.set(counter.get() + 1);
        });
        let copy = command.clone();

        let mut node = crate::core::scene::SceneNode::plain();
        let timer = crate::time::GameTimer::from_delta(0.1);
        command.invoke(&mut node, &timer);
        copy.invoke(&mut node, &timer);

        assert_eq!(hits.get(), 2);
    }
}
