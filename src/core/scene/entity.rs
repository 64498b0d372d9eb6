//=========================================================================
// Entities
//
// Moving drawable state shared by aircraft and sprite nodes.
//
//=========================================================================

//=== External Dependencies ===============================================

use nalgebra::Vector3;

//=== Internal Modules ====================================================

use crate::core::category::Category;
use crate::render::RenderItemHandle;

//=== Entity ==============================================================

/// Velocity and render-item state for a drawable node.
///
/// The render item is allocated once on build and reused for the node's
/// lifetime.
#[derive(Debug, Clone)]
pub struct Entity {
    pub(super) velocity: Vector3<f32>,
    pub(super) render_item: Option<RenderItemHandle>,
}

impl Entity {
    /// Creates a motionless entity with no render item yet.
    pub fn new() -> Self {
        Self {
            velocity: Vector3::zeros(),
            render_item: None,
        }
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

//=== AircraftType ========================================================

/// Aircraft family. Determines sprite material and broadcast category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AircraftType {
    /// Player-controlled craft.
    Eagle,

    /// Enemy craft.
    Raptor,
}

impl AircraftType {
    /// Material name the renderer draws this aircraft with.
    pub fn sprite_name(self) -> &'static str {
        match self {
            Self::Eagle => "Eagle",
            Self::Raptor => "Raptor",
        }
    }

    /// Broadcast category for command targeting.
    pub fn category(self) -> Category {
        match self {
            Self::Eagle => Category::PLAYER_AIRCRAFT,
            Self::Raptor => Category::ENEMY_AIRCRAFT,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aircraft_types_map_to_materials() {
        assert_eq!(AircraftType::Eagle.sprite_name(), "Eagle");
        assert_eq!(AircraftType::Raptor.sprite_name(), "Raptor");
    }

    #[test]
    fn aircraft_types_map_to_categories() {
        assert_eq!(AircraftType::Eagle.category(), Category::PLAYER_AIRCRAFT);
        assert_eq!(AircraftType::Raptor.category(), Category::ENEMY_AIRCRAFT);
    }

    #[test]
    fn new_entity_is_motionless() {
        let entity = Entity::new();
        assert_eq!(entity.velocity, Vector3::zeros());
        assert!(entity.render_item.is_none());
    }
}
