//=========================================================================
// Input Contract
//
// Defines the key polling interface the platform shell fulfils, plus a
// portable key identifier and an in-crate keyboard stand-in.
//
// Responsibilities:
// - Represent physical keys in a stable, portable way (`KeyCode`)
// - Declare the polling contract gameplay code reads from (`InputSource`)
// - Provide a settable keyboard snapshot (`KeyboardState`) for the driver
//   and tests
//
// Input Flow:
// ```text
// Platform Shell (window events)
//         ↓
//    KeyboardState (held-key snapshot)
//         ↓
//    Player (bindings → Commands)
//         ↓
//    CommandQueue → Scene Graph
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
///
/// Additional keys can be added as needed without breaking existing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Fallback for keys not explicitly mapped by the platform shell.
    Unidentified
}

//=== InputSource =========================================================

/// Key polling contract.
///
/// Gameplay code never talks to the platform shell directly; it polls
/// through this trait. The driver hands states an `InputSource` via the
/// shared context, so realtime bindings work identically against a real
/// window or a scripted test keyboard.
pub trait InputSource {
    /// Returns true while the given key is held down.
    fn is_key_down(&self, key: KeyCode) -> bool;
}

//=== KeyboardState =======================================================

/// Settable held-key snapshot.
///
/// The platform shell (or a test) feeds `press`/`release` as events
/// arrive; gameplay code polls the snapshot through `InputSource`.
#[derive(Debug, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Creates an empty snapshot (no keys held).
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
        }
    }

    /// Marks a key as held.
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    /// Marks a key as released.
    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Releases every held key (focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

//--- Trait Implementations -----------------------------------------------

impl InputSource for KeyboardState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
