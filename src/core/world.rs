//=========================================================================
// World
//
// Assembles the gameplay scene and applies the per-tick rules: command
// drain, graph update, facing rotations, player clamping, and enemy
// bouncing.
//
// Tick order inside `update` is load-bearing:
// ```text
// zero player velocity → drain commands → graph update
//     → facing rotations → clamp player → bounce enemies
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use nalgebra::Vector3;

//=== Internal Modules ====================================================

use crate::core::command::CommandQueue;
use crate::core::scene::{AircraftType, NodeHandle, SceneNode};
use crate::render::{RenderError, Renderer};
use crate::time::GameTimer;

//=== Constants ===========================================================

/// Number of enemy craft spawned by `build_scene`.
pub const ENEMY_COUNT: usize = 6;

/// Horizontal play-field half-extent; player x clamps to ±this.
pub const MAX_WIDTH: f32 = 12.0;

/// Lower vertical bound for the player.
pub const MIN_HEIGHT: f32 = -6.0;

/// Upper vertical bound for the player.
pub const MAX_HEIGHT: f32 = 12.0;

/// Background scroll speed along -z, units/s.
pub const SCROLL_SPEED: f32 = 1.0;

//=== World ===============================================================

/// The gameplay scene and its rules.
///
/// Owns the scene graph root and the command queue. The player, enemy,
/// and background handles are clones into the graph; the graph retains
/// ownership through the root.
pub struct World {
    scene_graph: NodeHandle,
    command_queue: CommandQueue,
    player_aircraft: Option<NodeHandle>,
    enemies: Vec<NodeHandle>,
    background: Option<NodeHandle>,
}

impl World {
    /// Creates an empty world; `build_scene` populates it.
    pub fn new() -> Self {
        Self {
            scene_graph: NodeHandle::new(SceneNode::plain()),
            command_queue: CommandQueue::new(),
            player_aircraft: None,
            enemies: Vec::new(),
            background: None,
        }
    }

    //--- Scene Assembly ---------------------------------------------------

    /// Populates the graph and allocates its render items.
    ///
    /// Spawns the player Eagle, `ENEMY_COUNT` Raptors with index-scaled
    /// speeds, and the scrolling desert backdrop.
    pub fn build_scene(&mut self, renderer: &mut dyn Renderer) -> Result<(), RenderError> {
        let player = NodeHandle::new(SceneNode::aircraft(AircraftType::Eagle));
        {
            let mut node = player.get_mut();
            node.set_position(0.0, 0.0, -10.0);
            node.set_scale(3.0, 3.0, 3.0);
        }
        self.scene_graph.attach_child(player.clone());
        self.player_aircraft = Some(player);

        for i in 0..ENEMY_COUNT {
            let enemy = NodeHandle::new(SceneNode::aircraft(AircraftType::Raptor));
            {
                let mut node = enemy.get_mut();
                node.set_position(1.5 * i as f32, 5.0 + (i % 5) as f32, 0.0);
                node.set_scale(3.0, 3.0, 3.0);
                node.set_velocity(Vector3::new(3.0 * i as f32, 2.0, 0.0));
            }
            self.scene_graph.attach_child(enemy.clone());
            self.enemies.push(enemy);
        }

        let background = NodeHandle::new(SceneNode::sprite());
        {
            let mut node = background.get_mut();
            node.set_sprite_names("Desert", "boxGeo", "box");
            node.set_position(0.0, -30.0, 0.0);
            node.set_scale(200.0, 1.0, 200.0);
            node.set_rotation(20.0, 0.0, 0.0);
            node.set_velocity(Vector3::new(0.0, 0.0, -SCROLL_SPEED));
        }
        self.scene_graph.attach_child(background.clone());
        self.background = Some(background);

        self.scene_graph.build(renderer)
    }

    //--- Per-Tick Rules ---------------------------------------------------

    /// Advances the world one tick.
    pub fn update(&mut self, timer: &GameTimer, renderer: &mut dyn Renderer) {
        // Player velocity is rebuilt from held keys every tick.
        self.player().get_mut().set_velocity(Vector3::zeros());

        while !self.command_queue.is_empty() {
            let command = self.command_queue.pop();
            self.scene_graph.on_command(&command, timer);
        }

        self.scene_graph.update(timer, renderer);

        self.update_facing();
        self.clamp_player();
        self.bounce_enemies();
    }

    /// Submits the graph's drawables for this frame.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.scene_graph.draw(renderer);
    }

    /// Turns craft to face their direction of travel. Vertical motion
    /// wins over horizontal when both are present.
    fn update_facing(&self) {
        let player = self.player();
        let velocity = player.get().velocity();
        let rotation = if velocity.y > 0.0 {
            Vector3::new(-1.0, 0.0, 0.0)
        } else if velocity.y < 0.0 {
            Vector3::new(1.0, 0.0, 0.0)
        } else if velocity.x > 0.0 {
            Vector3::new(0.0, 0.0, -1.0)
        } else if velocity.x < 0.0 {
            Vector3::new(0.0, 0.0, 1.0)
        } else {
            Vector3::zeros()
        };
        player.get_mut().set_rotation(rotation.x, rotation.y, rotation.z);

        for enemy in &self.enemies {
            let velocity = enemy.get().velocity();
            let rotation = if velocity.y > 0.0 {
                Vector3::new(-1.0, 135.0, 0.0)
            } else if velocity.y < 0.0 {
                Vector3::new(1.0, 135.0, 0.0)
            } else {
                Vector3::zeros()
            };
            enemy.get_mut().set_rotation(rotation.x, rotation.y, rotation.z);
        }
    }

    /// Hard-clamps the player inside the play field.
    fn clamp_player(&self) {
        let player = self.player();
        let position = player.get().position();
        let clamped = Vector3::new(
            position.x.clamp(-MAX_WIDTH, MAX_WIDTH),
            position.y.clamp(MIN_HEIGHT, MAX_HEIGHT),
            position.z,
        );
        if clamped != position {
            player.get_mut().set_position(clamped.x, clamped.y, clamped.z);
        }
    }

    /// Reflects the matching velocity component for enemies crossing the
    /// play-field bounds. Magnitude is preserved.
    fn bounce_enemies(&self) {
        for enemy in &self.enemies {
            let position = enemy.get().position();
            let mut velocity = enemy.get().velocity();

            if (position.x > MAX_WIDTH && velocity.x > 0.0)
                || (position.x < -MAX_WIDTH && velocity.x < 0.0)
            {
                velocity.x = -velocity.x;
            }
            if (position.y > MAX_HEIGHT && velocity.y > 0.0)
                || (position.y < MIN_HEIGHT && velocity.y < 0.0)
            {
                velocity.y = -velocity.y;
            }

            enemy.get_mut().set_velocity(velocity);
        }
    }

    //--- Accessors --------------------------------------------------------

    /// Pending commands, for the input path to fill.
    pub fn command_queue_mut(&mut self) -> &mut CommandQueue {
        &mut self.command_queue
    }

    /// Player craft handle.
    ///
    /// Panics before `build_scene` has run.
    pub fn player_aircraft(&self) -> NodeHandle {
        self.player().clone()
    }

    /// Enemy craft handles.
    pub fn enemies(&self) -> &[NodeHandle] {
        &self.enemies
    }

    fn player(&self) -> &NodeHandle {
        self.player_aircraft
            .as_ref()
            .expect("world scene has not been built")
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::Category;
    use crate::core::command::Command;
    use crate::render::HeadlessRenderer;
    use approx::assert_relative_eq;

    fn built_world() -> (World, HeadlessRenderer) {
        let mut renderer = HeadlessRenderer::new();
        renderer.rebuild_materials();
        let mut world = World::new();
        world.build_scene(&mut renderer).unwrap();
        (world, renderer)
    }

    /// One item per drawable: player + enemies + background.
    #[test]
    fn build_allocates_expected_items() {
        let (world, renderer) = built_world();
        assert_eq!(renderer.render_item_count(), ENEMY_COUNT + 2);
        assert_eq!(world.enemies().len(), ENEMY_COUNT);
    }

    /// The player spawns at the documented position and scale.
    #[test]
    fn player_spawn_transform() {
        let (world, _) = built_world();
        let player = world.player_aircraft();
        assert_eq!(player.get().position(), Vector3::new(0.0, 0.0, -10.0));
        assert_eq!(player.get().scale(), Vector3::new(3.0, 3.0, 3.0));
    }

    /// A player pushed past the horizontal bound lands exactly on it.
    #[test]
    fn player_clamps_to_play_field() {
        let (mut world, mut renderer) = built_world();
        let player = world.player_aircraft();
        player.get_mut().set_position(MAX_WIDTH + 5.0, 0.0, -10.0);

        let timer = GameTimer::from_delta(0.0);
        world.update(&timer, &mut renderer);

        assert_relative_eq!(player.get().position().x, MAX_WIDTH, epsilon = 1e-6);
    }

    /// Enemies crossing a bound reflect the matching velocity component,
    /// keeping its magnitude.
    #[test]
    fn enemies_bounce_off_bounds() {
        let (mut world, mut renderer) = built_world();
        let enemy = world.enemies()[0].clone();
        enemy.get_mut().set_position(MAX_WIDTH + 1.0, 0.0, 0.0);
        enemy.get_mut().set_velocity(Vector3::new(3.0, 2.0, 0.0));

        let timer = GameTimer::from_delta(0.0);
        world.update(&timer, &mut renderer);

        let velocity = enemy.get().velocity();
        assert_relative_eq!(velocity.x, -3.0, epsilon = 1e-6);
        assert_relative_eq!(velocity.y, 2.0, epsilon = 1e-6);
    }

    /// Vertical motion dominates the player's facing when both axes move.
    #[test]
    fn player_facing_prefers_vertical() {
        let (mut world, mut renderer) = built_world();
        world.command_queue_mut().push(Command::new(
            Category::PLAYER_AIRCRAFT,
            |node, _| node.accelerate(Vector3::new(5.0, 7.0, 0.0)),
        ));

        let timer = GameTimer::from_delta(0.016);
        world.update(&timer, &mut renderer);

        let player = world.player_aircraft();
        assert_eq!(player.get().rotation(), Vector3::new(-1.0, 0.0, 0.0));
    }

    /// A motionless player returns to the neutral facing.
    #[test]
    fn player_facing_neutral_when_still() {
        let (mut world, mut renderer) = built_world();
        let timer = GameTimer::from_delta(0.016);
        world.update(&timer, &mut renderer);

        let player = world.player_aircraft();
        assert_eq!(player.get().rotation(), Vector3::zeros());
    }

    /// Update drains every queued command.
    #[test]
    fn update_drains_command_queue() {
        let (mut world, mut renderer) = built_world();
        world.command_queue_mut().push(Command::new(
            Category::PLAYER_AIRCRAFT,
            |node, _| node.accelerate(Vector3::new(1.0, 0.0, 0.0)),
        ));
        world.command_queue_mut().push(Command::new(
            Category::ENEMY_AIRCRAFT,
            |node, _| node.accelerate(Vector3::new(0.0, 1.0, 0.0)),
        ));

        let timer = GameTimer::from_delta(0.016);
        world.update(&timer, &mut renderer);

        assert!(world.command_queue_mut().is_empty());
    }

    /// The background scrolls along -z.
    #[test]
    fn background_scrolls() {
        let (mut world, mut renderer) = built_world();
        let background = world.background.clone().unwrap();
        let before = background.get().position();

        let timer = GameTimer::from_delta(1.0);
        world.update(&timer, &mut renderer);

        let after = background.get().position();
        assert_relative_eq!(after.z, before.z - SCROLL_SPEED, epsilon = 1e-6);
    }
}
