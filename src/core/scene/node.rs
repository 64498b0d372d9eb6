//=========================================================================
// Scene Nodes
//
// The transform tree itself: node state, parent/child wiring, and the
// recursive update / draw / build / command traversals.
//
// Ownership:
// - Parents own children through `NodeHandle` (shared `Rc<RefCell<_>>`)
// - Children keep a `Weak` back-reference to their parent; the chain is
//   walked on demand to compose world transforms
//
// Transform convention (column vectors):
// ```text
// local = translate · rotZ · rotY · rotX · scale
// world = parent_world · local
// ```
// i.e. scale applies first, then the fixed X→Y→Z rotation order, then
// translation; world space composes root-first down the ancestor chain.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

//=== External Dependencies ===============================================

use nalgebra::{Matrix4, Point3, Rotation3, Translation3, Vector3};

//=== Internal Modules ====================================================

use crate::core::category::Category;
use crate::core::command::Command;
use crate::core::scene::entity::{AircraftType, Entity};
use crate::render::{RenderError, RenderItemHandle, Renderer};
use crate::time::GameTimer;

//=== NodeKind ============================================================

/// What a node is, and the per-kind state that comes with it.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Pure transform node; no drawable, no velocity.
    Plain,

    /// Aircraft entity. Material and category derive from the type.
    Aircraft {
        kind: AircraftType,
        entity: Entity,
    },

    /// Textured quad entity (backgrounds, banners).
    Sprite {
        material: String,
        geometry: String,
        draw_name: String,
        entity: Entity,
    },
}

//=== SceneNode ===========================================================

/// One node of the scene graph.
///
/// Holds the local transform, the kind-specific state, and the tree
/// wiring. All traversal entry points live on [`NodeHandle`]; methods
/// here operate on a single node.
#[derive(Debug)]
pub struct SceneNode {
    position: Vector3<f32>,
    rotation: Vector3<f32>,
    scale: Vector3<f32>,
    kind: NodeKind,
    children: Vec<NodeHandle>,
    parent: Weak<RefCell<SceneNode>>,
}

impl SceneNode {
    //--- Constructors -----------------------------------------------------

    fn with_kind(kind: NodeKind) -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            kind,
            children: Vec::new(),
            parent: Weak::new(),
        }
    }

    /// Creates a pure transform node.
    pub fn plain() -> Self {
        Self::with_kind(NodeKind::Plain)
    }

    /// Creates an aircraft node of the given type.
    pub fn aircraft(kind: AircraftType) -> Self {
        Self::with_kind(NodeKind::Aircraft {
            kind,
            entity: Entity::new(),
        })
    }

    /// Creates a sprite node. Material/geometry/draw names start empty;
    /// set them with [`set_sprite_names`](Self::set_sprite_names) before
    /// building.
    pub fn sprite() -> Self {
        Self::with_kind(NodeKind::Sprite {
            material: String::new(),
            geometry: String::new(),
            draw_name: String::new(),
            entity: Entity::new(),
        })
    }

    /// Assigns the renderer-facing names of a sprite node.
    pub fn set_sprite_names(&mut self, material: &str, geometry: &str, draw_name: &str) {
        match &mut self.kind {
            NodeKind::Sprite {
                material: m,
                geometry: g,
                draw_name: d,
                ..
            } => {
                *m = material.to_owned();
                *g = geometry.to_owned();
                *d = draw_name.to_owned();
            }
            _ => debug_assert!(false, "set_sprite_names called on a non-sprite node"),
        }
    }

    //--- Transform Accessors ----------------------------------------------

    /// Local position relative to the parent.
    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// Sets the local position.
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    /// Local Euler rotation in radians (applied X, then Y, then Z).
    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    /// Sets the local Euler rotation in radians.
    pub fn set_rotation(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Vector3::new(x, y, z);
    }

    /// Local scale factors.
    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    /// Sets the local scale.
    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vector3::new(x, y, z);
    }

    /// Offsets the local position.
    pub fn move_by(&mut self, offset: Vector3<f32>) {
        self.position += offset;
    }

    //--- Entity Accessors -------------------------------------------------

    /// Current velocity. Plain nodes report zero.
    pub fn velocity(&self) -> Vector3<f32> {
        match &self.kind {
            NodeKind::Aircraft { entity, .. } | NodeKind::Sprite { entity, .. } => {
                entity.velocity
            }
            NodeKind::Plain => Vector3::zeros(),
        }
    }

    /// Replaces the velocity. No effect on plain nodes.
    pub fn set_velocity(&mut self, velocity: Vector3<f32>) {
        match &mut self.kind {
            NodeKind::Aircraft { entity, .. } | NodeKind::Sprite { entity, .. } => {
                entity.velocity = velocity;
            }
            NodeKind::Plain => {
                debug_assert!(false, "set_velocity called on a plain node");
            }
        }
    }

    /// Adds to the velocity. No effect on plain nodes.
    pub fn accelerate(&mut self, delta: Vector3<f32>) {
        match &mut self.kind {
            NodeKind::Aircraft { entity, .. } | NodeKind::Sprite { entity, .. } => {
                entity.velocity += delta;
            }
            NodeKind::Plain => {
                debug_assert!(false, "accelerate called on a plain node");
            }
        }
    }

    /// Render item allocated for this node, once built.
    pub fn render_item(&self) -> Option<RenderItemHandle> {
        match &self.kind {
            NodeKind::Aircraft { entity, .. } | NodeKind::Sprite { entity, .. } => {
                entity.render_item
            }
            NodeKind::Plain => None,
        }
    }

    /// Broadcast category derived from the node kind.
    pub fn category(&self) -> Category {
        match &self.kind {
            NodeKind::Plain | NodeKind::Sprite { .. } => Category::SCENE,
            NodeKind::Aircraft { kind, .. } => kind.category(),
        }
    }

    /// Kind-specific state, read-only.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    //--- Transform Composition --------------------------------------------

    /// Local transform matrix (scale first, then X→Y→Z rotation, then
    /// translation).
    pub fn local_transform(&self) -> Matrix4<f32> {
        let translation = Translation3::from(self.position).to_homogeneous();
        let rot_x =
            Rotation3::from_axis_angle(&Vector3::x_axis(), self.rotation.x).to_homogeneous();
        let rot_y =
            Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation.y).to_homogeneous();
        let rot_z =
            Rotation3::from_axis_angle(&Vector3::z_axis(), self.rotation.z).to_homogeneous();
        let scaling = Matrix4::new_nonuniform_scaling(&self.scale);

        translation * rot_z * rot_y * rot_x * scaling
    }

    //--- Per-Node Hooks ---------------------------------------------------

    /// Integrates velocity into position for entity kinds.
    fn update_current(&mut self, timer: &GameTimer) {
        let step = self.velocity() * timer.delta_seconds();
        if step != Vector3::zeros() {
            self.position += step;
        }
    }

    /// Allocates this node's render item if it is drawable and not yet
    /// built. Idempotent across repeated builds.
    fn build_current(&mut self, renderer: &mut dyn Renderer) -> Result<(), RenderError> {
        match &mut self.kind {
            NodeKind::Plain => Ok(()),
            NodeKind::Aircraft { kind, entity } => {
                if entity.render_item.is_none() {
                    let handle =
                        renderer.allocate_render_item(kind.sprite_name(), "boxGeo", "box")?;
                    entity.render_item = Some(handle);
                }
                Ok(())
            }
            NodeKind::Sprite {
                material,
                geometry,
                draw_name,
                entity,
            } => {
                if entity.render_item.is_none() {
                    let handle = renderer.allocate_render_item(material, geometry, draw_name)?;
                    entity.render_item = Some(handle);
                }
                Ok(())
            }
        }
    }
}

//=== NodeHandle ==========================================================

/// Shared handle to a scene node.
///
/// Cloning the handle clones the reference, not the node. All tree
/// traversals (update, draw, build, command broadcast) start here and
/// recurse through children in insertion order.
#[derive(Debug, Clone)]
pub struct NodeHandle {
    node: Rc<RefCell<SceneNode>>,
}

impl NodeHandle {
    /// Wraps a node in a fresh handle with no parent.
    pub fn new(node: SceneNode) -> Self {
        Self {
            node: Rc::new(RefCell::new(node)),
        }
    }

    /// Immutable access to the node.
    ///
    /// Panics if the node is already mutably borrowed; traversals drop
    /// their borrows before recursing to keep this safe.
    pub fn get(&self) -> Ref<'_, SceneNode> {
        self.node.borrow()
    }

    /// Mutable access to the node.
    pub fn get_mut(&self) -> RefMut<'_, SceneNode> {
        self.node.borrow_mut()
    }

    /// True when both handles refer to the same node.
    pub fn ptr_eq(&self, other: &NodeHandle) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    //--- Tree Wiring ------------------------------------------------------

    /// Attaches `child` under this node, taking ownership and setting
    /// the child's parent back-reference.
    pub fn attach_child(&self, child: NodeHandle) {
        child.node.borrow_mut().parent = Rc::downgrade(&self.node);
        self.node.borrow_mut().children.push(child);
    }

    /// Detaches the child identified by `child` (node identity, not
    /// value) and returns ownership of it.
    ///
    /// Panics when `child` is not a direct child of this node.
    pub fn detach_child(&self, child: &NodeHandle) -> NodeHandle {
        let mut node = self.node.borrow_mut();
        let index = node
            .children
            .iter()
            .position(|candidate| candidate.ptr_eq(child))
            .expect("detach_child: node is not a child of this parent");
        let detached = node.children.remove(index);
        drop(node);

        detached.node.borrow_mut().parent = Weak::new();
        detached
    }

    /// Parent handle, if this node is attached.
    pub fn parent(&self) -> Option<NodeHandle> {
        self.node
            .borrow()
            .parent
            .upgrade()
            .map(|node| NodeHandle { node })
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.node.borrow().children.len()
    }

    //--- Traversals -------------------------------------------------------

    /// Updates this node then its children, in insertion order.
    ///
    /// Entity nodes integrate velocity and push their refreshed world
    /// transform at the renderer (dirty marking).
    pub fn update(&self, timer: &GameTimer, renderer: &mut dyn Renderer) {
        let mut node = self.node.borrow_mut();
        node.update_current(timer);
        let item = node.render_item();
        drop(node);

        if let Some(item) = item {
            let world = self.world_transform();
            renderer.update_transform(item, &world);
        }

        let children = self.node.borrow().children.clone();
        for child in &children {
            child.update(timer, renderer);
        }
    }

    /// Submits this node's drawable (if any) then draws the children.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        let item = self.node.borrow().render_item();
        if let Some(item) = item {
            let world = self.world_transform();
            renderer.submit_draw(item, &world);
        }

        let children = self.node.borrow().children.clone();
        for child in &children {
            child.draw(renderer);
        }
    }

    /// Allocates render items for this subtree. Safe to call again; each
    /// entity keeps its first allocation.
    pub fn build(&self, renderer: &mut dyn Renderer) -> Result<(), RenderError> {
        self.node.borrow_mut().build_current(renderer)?;

        let children = self.node.borrow().children.clone();
        for child in &children {
            child.build(renderer)?;
        }
        Ok(())
    }

    /// Broadcasts a command through this subtree.
    ///
    /// The action runs on every node whose category intersects the
    /// command's mask; recursion continues regardless of the match.
    pub fn on_command(&self, command: &Command, timer: &GameTimer) {
        let applies = command.category().intersects(self.node.borrow().category());
        if applies {
            command.invoke(&mut self.node.borrow_mut(), timer);
        }

        let children = self.node.borrow().children.clone();
        for child in &children {
            child.on_command(command, timer);
        }
    }

    //--- World Space ------------------------------------------------------

    /// World transform: the product of every ancestor's local transform,
    /// root first, ending with this node's own.
    pub fn world_transform(&self) -> Matrix4<f32> {
        let node = self.node.borrow();
        let local = node.local_transform();
        let parent = node.parent.upgrade();
        drop(node);

        match parent {
            Some(parent) => NodeHandle { node: parent }.world_transform() * local,
            None => local,
        }
    }

    /// World-space position of this node's origin.
    pub fn world_position(&self) -> Vector3<f32> {
        self.world_transform()
            .transform_point(&Point3::origin())
            .coords
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
