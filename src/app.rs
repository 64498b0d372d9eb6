//=========================================================================
// Application Driver
//
// Owns the state stack, frame timer, and keyboard snapshot, and runs
// one logical frame per `tick`. The platform shell feeds key events in
// through `key_down`/`key_up` and calls `tick` once per frame; an empty
// state stack is the quit signal.
//
// Tick Order:
// ```text
// staged key events → handle_event
// held keys         → handle_realtime_input
// timer tick        → stack update (+ transition flush)
// empty stack?      → Exit, else draw → Continue
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== External Dependencies ===============================================

use log::info;

//=== Internal Modules ====================================================

use crate::core::player::Player;
use crate::core::state::{
    Context, GameState, MenuState, PauseState, State, StateId, StateStack, TitleState,
};
use crate::input::{InputSource, KeyCode, KeyboardState};
use crate::render::{RenderError, Renderer};
use crate::time::GameTimer;

//=== TickControl =========================================================

/// Whether the shell should keep ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    /// Keep running.
    Continue,

    /// The last state quit; stop the loop.
    Exit,
}

//=== App =================================================================

/// The tick-loop driver.
///
/// Construction registers every state factory and requests the initial
/// title push; the push lands on the first tick's flush.
pub struct App {
    stack: StateStack,
    timer: GameTimer,
    keyboard: Rc<RefCell<KeyboardState>>,
    staged_events: Vec<KeyCode>,
}

impl App {
    /// Creates the driver over an externally owned renderer.
    pub fn new(renderer: Rc<RefCell<dyn Renderer>>) -> Self {
        let keyboard = Rc::new(RefCell::new(KeyboardState::new()));
        let input: Rc<RefCell<dyn InputSource>> = keyboard.clone();
        let player = Rc::new(RefCell::new(Player::new()));
        let context = Context::new(renderer, input, player);

        let mut stack = StateStack::new(context);
        stack.register_state(StateId::Title, |ctx| {
            Ok(Box::new(TitleState::new(ctx)?) as Box<dyn State>)
        });
        stack.register_state(StateId::Menu, |ctx| {
            Ok(Box::new(MenuState::new(ctx)?) as Box<dyn State>)
        });
        stack.register_state(StateId::Game, |ctx| {
            Ok(Box::new(GameState::new(ctx)?) as Box<dyn State>)
        });
        stack.register_state(StateId::Pause, |ctx| {
            Ok(Box::new(PauseState::new(ctx)?) as Box<dyn State>)
        });
        stack.push_state(StateId::Title);

        info!("app: registered 4 states, starting on the title screen");

        Self {
            stack,
            timer: GameTimer::new(),
            keyboard,
            staged_events: Vec::new(),
        }
    }

    //--- Event Intake -----------------------------------------------------

    /// Records a key press: updates the held-key snapshot and stages a
    /// discrete event for the next tick.
    pub fn key_down(&mut self, key: KeyCode) {
        self.keyboard.borrow_mut().press(key);
        self.staged_events.push(key);
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: KeyCode) {
        self.keyboard.borrow_mut().release(key);
    }

    //--- Frame Loop -------------------------------------------------------

    /// Runs one logical frame.
    pub fn tick(&mut self) -> Result<TickControl, RenderError> {
        for key in self.staged_events.drain(..).collect::<Vec<_>>() {
            self.stack.handle_event(key);
        }
        self.stack.handle_realtime_input();

        self.timer.tick();
        self.stack.update(&self.timer)?;

        if self.stack.is_empty() {
            info!("app: state stack drained, exiting");
            return Ok(TickControl::Exit);
        }

        self.stack.draw();
        Ok(TickControl::Continue)
    }

    /// The live state stack, for shells that inspect it.
    pub fn state_stack(&self) -> &StateStack {
        &self.stack
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessRenderer;

    fn test_app() -> App {
        let _ = env_logger::builder().is_test(true).try_init();
        let renderer: Rc<RefCell<dyn Renderer>> = Rc::new(RefCell::new(HeadlessRenderer::new()));
        App::new(renderer)
    }

    /// The first tick lands on the title screen and keeps running.
    #[test]
    fn first_tick_shows_title() {
        let mut app = test_app();

        let control = app.tick().unwrap();

        assert_eq!(control, TickControl::Continue);
        assert_eq!(app.state_stack().top_id(), Some(StateId::Title));
    }

    /// A key press on the title screen reaches the menu next tick.
    #[test]
    fn key_press_advances_to_menu() {
        let mut app = test_app();
        app.tick().unwrap();

        app.key_down(KeyCode::KeyA);
        app.tick().unwrap();
        app.key_up(KeyCode::KeyA);

        assert_eq!(app.state_stack().top_id(), Some(StateId::Menu));
    }

    /// Quitting from the menu reports Exit.
    #[test]
    fn menu_quit_exits() {
        let mut app = test_app();
        app.tick().unwrap();
        app.key_down(KeyCode::KeyA);
        app.tick().unwrap();
        app.key_up(KeyCode::KeyA);

        app.key_down(KeyCode::KeyQ);
        let control = app.tick().unwrap();

        assert_eq!(control, TickControl::Exit);
        assert!(app.state_stack().is_empty());
    }

    /// A full playable session: title → menu → game → pause → back.
    #[test]
    fn session_reaches_game_and_pause() {
        let mut app = test_app();
        app.tick().unwrap();

        app.key_down(KeyCode::KeyA);
        app.tick().unwrap();
        app.key_up(KeyCode::KeyA);

        app.key_down(KeyCode::KeyS);
        app.tick().unwrap();
        app.key_up(KeyCode::KeyS);
        assert_eq!(app.state_stack().top_id(), Some(StateId::Game));

        app.key_down(KeyCode::KeyP);
        app.tick().unwrap();
        app.key_up(KeyCode::KeyP);
        assert_eq!(app.state_stack().top_id(), Some(StateId::Pause));
        assert_eq!(app.state_stack().len(), 2);

        app.key_down(KeyCode::KeyP);
        app.tick().unwrap();
        app.key_up(KeyCode::KeyP);
        assert_eq!(app.state_stack().top_id(), Some(StateId::Game));
        assert_eq!(app.state_stack().len(), 1);
    }
}
