//=========================================================================
// Command Categories
//
// Bitmask identifying which scene nodes a broadcast command targets.
//
// Every node reports a category derived from its kind; a command carries
// a mask, and dispatch applies the command wherever the two intersect.
//
//=========================================================================

//=== External Dependencies ===============================================

use bitflags::bitflags;

bitflags! {
    /// Broadcast target mask for scene commands.
    ///
    /// Masks combine with `|` to address several node families with one
    /// command (e.g. `PLAYER_AIRCRAFT | ENEMY_AIRCRAFT`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Category: u32 {
        /// Background and structural nodes.
        const SCENE = 1 << 0;

        /// The player-controlled aircraft.
        const PLAYER_AIRCRAFT = 1 << 1;

        /// Enemy aircraft.
        const ENEMY_AIRCRAFT = 1 << 2;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
