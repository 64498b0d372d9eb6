//=========================================================================
// Render Contract
//
// Defines the draw-submission interface the graphics layer fulfils, plus
// a headless stand-in used by tests and driver-less operation.
//
// Responsibilities:
// - Declare the renderer contract the scene graph builds against
// - Hand out opaque render item handles (`slotmap` keys)
// - Report collaborator failures as `RenderError`
// - Track frame-resource rotation and per-frame draw submission in the
//   headless stand-in so tests can observe renderer traffic
//
// Lifecycle (per state construction, order is load-bearing):
// ```text
// reset_frame_resources → rebuild_materials → allocate_render_item*
//     → build_frame_resources(render_item_count)
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== External Dependencies ===============================================

use nalgebra::Matrix4;
use slotmap::SlotMap;
use thiserror::Error;

//=== Constants ===========================================================

/// Number of in-flight frame resource sets the renderer rotates through.
pub const NUM_FRAME_RESOURCES: usize = 3;

//=== RenderItemHandle ====================================================

slotmap::new_key_type! {
    /// Opaque handle to a renderer-owned item (one per drawable entity).
    pub struct RenderItemHandle;
}

//=== RenderError =========================================================

/// Failure reported by the graphics layer.
///
/// These are collaborator failures, not gameplay errors; they propagate
/// with `?` through scene building and state construction up to the
/// driver tick.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Allocation named a material the renderer has not registered.
    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    /// Allocation named a geometry the renderer has not registered.
    #[error("unknown geometry: {0}")]
    UnknownGeometry(String),

    /// Frame resource allocation failed.
    #[error("frame resource failure: {0}")]
    FrameResources(String),
}

//=== Renderer ============================================================

/// Draw-submission contract.
///
/// The scene graph and states drive the renderer exclusively through
/// this trait. Real graphics device work lives outside the crate; the
/// in-crate implementation is [`HeadlessRenderer`].
pub trait Renderer {
    /// Discards every render item and frame resource set. Called first
    /// when a state rebuilds its scene.
    fn reset_frame_resources(&mut self);

    /// (Re)registers the material table. Must run before allocation.
    fn rebuild_materials(&mut self);

    /// Allocates one render item for a drawable entity.
    ///
    /// Fails when the material or geometry name is not registered.
    fn allocate_render_item(
        &mut self,
        material: &str,
        geometry: &str,
        draw_name: &str,
    ) -> Result<RenderItemHandle, RenderError>;

    /// Sizes the per-frame constant buffers to the number of items the
    /// scene allocated. Must run after the scene graph is built.
    fn build_frame_resources(&mut self, render_item_count: usize) -> Result<(), RenderError>;

    /// Pushes a fresh world transform for an item, marking it dirty for
    /// every in-flight frame resource set.
    fn update_transform(&mut self, item: RenderItemHandle, world: &Matrix4<f32>);

    /// Submits an item for drawing this frame.
    fn submit_draw(&mut self, item: RenderItemHandle, world: &Matrix4<f32>);

    /// Number of currently allocated render items.
    fn render_item_count(&self) -> usize;
}

//=== HeadlessRenderer ====================================================

/// Renderer-side record for one allocated item.
#[derive(Debug, Clone)]
struct RenderItem {
    material: String,
    geometry: String,
    draw_name: String,
    world: Matrix4<f32>,
    frames_dirty: usize,
}

/// In-crate renderer stand-in.
///
/// Validates allocations against a fixed material/geometry registry and
/// records transforms and draw submissions so tests can observe exactly
/// what the scene pushed at it. `next_frame` rotates the frame resource
/// index the way a real triple-buffered device would.
pub struct HeadlessRenderer {
    materials: HashSet<&'static str>,
    geometries: HashSet<&'static str>,
    items: SlotMap<RenderItemHandle, RenderItem>,
    frame_resource_slots: Option<usize>,
    frame_index: usize,
    draws_this_frame: usize,
    total_draws: usize,
}

impl HeadlessRenderer {
    /// Creates a renderer with empty registries. `rebuild_materials`
    /// must run before the first allocation.
    pub fn new() -> Self {
        Self {
            materials: HashSet::new(),
            geometries: HashSet::new(),
            items: SlotMap::with_key(),
            frame_resource_slots: None,
            frame_index: 0,
            draws_this_frame: 0,
            total_draws: 0,
        }
    }

    /// Advances to the next in-flight frame resource set.
    pub fn next_frame(&mut self) {
        self.frame_index = (self.frame_index + 1) % NUM_FRAME_RESOURCES;
        self.draws_this_frame = 0;
        for item in self.items.values_mut() {
            item.frames_dirty = item.frames_dirty.saturating_sub(1);
        }
    }

    //--- Test Observers ---------------------------------------------------

    /// Last world transform pushed for an item, if it exists.
    pub fn item_world(&self, item: RenderItemHandle) -> Option<Matrix4<f32>> {
        self.items.get(item).map(|record| record.world)
    }

    /// Material name an item was allocated with.
    pub fn item_material(&self, item: RenderItemHandle) -> Option<&str> {
        self.items.get(item).map(|record| record.material.as_str())
    }

    /// Geometry and draw-call names an item was allocated with.
    pub fn item_geometry(&self, item: RenderItemHandle) -> Option<(&str, &str)> {
        self.items
            .get(item)
            .map(|record| (record.geometry.as_str(), record.draw_name.as_str()))
    }

    /// Frames the item's transform still needs re-uploading for.
    pub fn item_frames_dirty(&self, item: RenderItemHandle) -> Option<usize> {
        self.items.get(item).map(|record| record.frames_dirty)
    }

    /// Draw submissions since the last `next_frame`.
    pub fn draws_this_frame(&self) -> usize {
        self.draws_this_frame
    }

    /// Draw submissions over the renderer's lifetime.
    pub fn total_draws(&self) -> usize {
        self.total_draws
    }

    /// Current in-flight frame resource index.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Item capacity the frame resources were last sized to.
    pub fn frame_resource_capacity(&self) -> Option<usize> {
        self.frame_resource_slots
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

//--- Renderer Implementation ----------------------------------------------

impl Renderer for HeadlessRenderer {
    fn reset_frame_resources(&mut self) {
        self.items.clear();
        self.frame_resource_slots = None;
        self.draws_this_frame = 0;
    }

    fn rebuild_materials(&mut self) {
        self.materials = [
            "Eagle",
            "Raptor",
            "Desert",
            "AircraftsTitle",
            "AircraftsMenu",
            "AircraftsPause",
        ]
        .into_iter()
        .collect();
        self.geometries = ["boxGeo"].into_iter().collect();
    }

    fn allocate_render_item(
        &mut self,
        material: &str,
        geometry: &str,
        draw_name: &str,
    ) -> Result<RenderItemHandle, RenderError> {
        if !self.materials.contains(material) {
            return Err(RenderError::UnknownMaterial(material.to_owned()));
        }
        if !self.geometries.contains(geometry) {
            return Err(RenderError::UnknownGeometry(geometry.to_owned()));
        }

        let handle = self.items.insert(RenderItem {
            material: material.to_owned(),
            geometry: geometry.to_owned(),
            draw_name: draw_name.to_owned(),
            world: Matrix4::identity(),
            frames_dirty: NUM_FRAME_RESOURCES,
        });
        Ok(handle)
    }

    fn build_frame_resources(&mut self, render_item_count: usize) -> Result<(), RenderError> {
        if render_item_count < self.items.len() {
            return Err(RenderError::FrameResources(format!(
                "requested {} slots for {} allocated items",
                render_item_count,
                self.items.len()
            )));
        }
        self.frame_resource_slots = Some(render_item_count);
        Ok(())
    }

    fn update_transform(&mut self, item: RenderItemHandle, world: &Matrix4<f32>) {
        if let Some(record) = self.items.get_mut(item) {
            record.world = *world;
            record.frames_dirty = NUM_FRAME_RESOURCES;
        }
    }

    fn submit_draw(&mut self, item: RenderItemHandle, world: &Matrix4<f32>) {
        if let Some(record) = self.items.get_mut(item) {
            record.world = *world;
        }
        self.draws_this_frame += 1;
        self.total_draws += 1;
    }

    fn render_item_count(&self) -> usize {
        self.items.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_renderer() -> HeadlessRenderer {
        let mut renderer = HeadlessRenderer::new();
        renderer.rebuild_materials();
        renderer
    }

    /// Allocation succeeds for registered names and counts the item.
    #[test]
    fn allocate_registered_item() {
        let mut renderer = ready_renderer();

        let handle = renderer
            .allocate_render_item("Eagle", "boxGeo", "box")
            .unwrap();

        assert_eq!(renderer.render_item_count(), 1);
        assert_eq!(renderer.item_material(handle), Some("Eagle"));
    }

    /// Unknown material is reported, not silently accepted.
    #[test]
    fn allocate_unknown_material_fails() {
        let mut renderer = ready_renderer();

        let result = renderer.allocate_render_item("Chrome", "boxGeo", "box");

        assert!(matches!(result, Err(RenderError::UnknownMaterial(_))));
        assert_eq!(renderer.render_item_count(), 0);
    }

    /// Unknown geometry is reported as its own error.
    #[test]
    fn allocate_unknown_geometry_fails() {
        let mut renderer = ready_renderer();

        let result = renderer.allocate_render_item("Eagle", "sphereGeo", "box");

        assert!(matches!(result, Err(RenderError::UnknownGeometry(_))));
    }

    /// Allocation before rebuild_materials fails (empty registry).
    #[test]
    fn allocate_before_rebuild_fails() {
        let mut renderer = HeadlessRenderer::new();

        let result = renderer.allocate_render_item("Eagle", "boxGeo", "box");

        assert!(matches!(result, Err(RenderError::UnknownMaterial(_))));
    }

    /// Reset drops every item and the frame resource sizing.
    #[test]
    fn reset_clears_items_and_frame_resources() {
        let mut renderer = ready_renderer();
        renderer
            .allocate_render_item("Desert", "boxGeo", "box")
            .unwrap();
        renderer.build_frame_resources(1).unwrap();

        renderer.reset_frame_resources();

        assert_eq!(renderer.render_item_count(), 0);
        assert_eq!(renderer.frame_resource_capacity(), None);
    }

    /// Frame resources sized below the allocated item count is an error.
    #[test]
    fn undersized_frame_resources_fail() {
        let mut renderer = ready_renderer();
        renderer
            .allocate_render_item("Eagle", "boxGeo", "box")
            .unwrap();
        renderer
            .allocate_render_item("Raptor", "boxGeo", "box")
            .unwrap();

        let result = renderer.build_frame_resources(1);

        assert!(matches!(result, Err(RenderError::FrameResources(_))));
    }

    /// Frame index rotates round-robin through the in-flight sets.
    #[test]
    fn frame_index_round_robin() {
        let mut renderer = ready_renderer();

        assert_eq!(renderer.frame_index(), 0);
        for expected in [1, 2, 0, 1] {
            renderer.next_frame();
            assert_eq!(renderer.frame_index(), expected);
        }
    }

    /// update_transform stores the world matrix and re-dirties the item
    /// for every in-flight frame.
    #[test]
    fn update_transform_records_world() {
        let mut renderer = ready_renderer();
        let handle = renderer
            .allocate_render_item("Eagle", "boxGeo", "box")
            .unwrap();

        let world = Matrix4::new_translation(&nalgebra::Vector3::new(1.0, 2.0, 3.0));
        renderer.update_transform(handle, &world);

        assert_eq!(renderer.item_world(handle), Some(world));
    }

    /// Draw counters reset each frame but accumulate over the lifetime.
    #[test]
    fn draw_counters_track_submissions() {
        let mut renderer = ready_renderer();
        let handle = renderer
            .allocate_render_item("Eagle", "boxGeo", "box")
            .unwrap();
        let world = Matrix4::identity();

        renderer.submit_draw(handle, &world);
        renderer.submit_draw(handle, &world);
        assert_eq!(renderer.draws_this_frame(), 2);

        renderer.next_frame();
        assert_eq!(renderer.draws_this_frame(), 0);
        assert_eq!(renderer.total_draws(), 2);
    }
}
