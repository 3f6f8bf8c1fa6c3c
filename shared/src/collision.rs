//! Collision data as exposed by the host
//!
//! A scene has one static [`CollisionHeader`] plus up to [`DYN_SLOT_COUNT`]
//! dynamic slots (moving platforms, doors, ...). Dynamic polygons live in a
//! shared pool and are reached through singly linked lists of
//! [`PolyListNode`]s terminated by [`LIST_END`].

use std::sync::Arc;

use crate::math::Vec3s;

/// Number of dynamic collision slots the host tracks
pub const DYN_SLOT_COUNT: usize = 32;

/// "No next node" marker in dynamic polygon lists
pub const LIST_END: u16 = 0xFFFF;

/// Water box room group that matches every room
pub const WATER_ALL_ROOMS: u8 = 0x3F;

/// Decoded surface-type properties of a collision polygon
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceType {
    /// Hookshot can attach to this surface
    pub hookshot: bool,
    /// Interaction code (climbable, crawlspace, ...)
    pub interaction: u8,
    /// Special floor code (void-out, hurt floor, ...)
    pub special: u8,
    /// Scene exit index, 0 for none
    pub exit: u8,
    /// Floor behavior code
    pub behavior: u8,
    /// Touching the wall deals damage
    pub wall_damage: bool,
    /// Terrain slope class
    pub terrain: u8,
}

/// One collision triangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionPoly {
    /// Index into the owning header's surface-type table
    pub surface_type: u16,
    pub va: u16,
    pub vb: u16,
    pub vc: u16,
    /// Face normal scaled to 0x7FFF
    pub normal: Vec3s,
    pub dist: i16,
}

impl CollisionPoly {
    pub const fn new(surface_type: u16, va: u16, vb: u16, vc: u16, normal: Vec3s) -> Self {
        Self {
            surface_type,
            va,
            vb,
            vc,
            normal,
            dist: 0,
        }
    }
}

/// Axis-aligned water volume; extends from `pos.y` down to the scene floor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaterBox {
    /// Minimum corner on the water surface
    pub pos: Vec3s,
    /// Extent along X
    pub width: i16,
    /// Extent along Z
    pub depth: i16,
    /// Room the box belongs to, or [`WATER_ALL_ROOMS`]
    pub room: u8,
}

impl WaterBox {
    /// Whether this box is visible while the player is in `room`
    pub fn visible_in(&self, room: u8) -> bool {
        self.room == WATER_ALL_ROOMS || self.room == room
    }
}

/// Collision mesh with its surface-type table and water boxes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionHeader {
    pub vertices: Vec<Vec3s>,
    pub polys: Vec<CollisionPoly>,
    pub surface_types: Vec<SurfaceType>,
    pub water_boxes: Vec<WaterBox>,
}

impl CollisionHeader {
    /// Number of polygons in the mesh
    pub fn poly_count(&self) -> usize {
        self.polys.len()
    }

    /// Surface type of `poly`, or the default type if the index is out of range
    pub fn surface_type(&self, poly: &CollisionPoly) -> SurfaceType {
        self.surface_types
            .get(poly.surface_type as usize)
            .copied()
            .unwrap_or_default()
    }
}

/// Node of a dynamic polygon list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolyListNode {
    /// Index into [`CollisionContext::dyn_polys`]
    pub poly: u16,
    /// Next node index or [`LIST_END`]
    pub next: u16,
}

/// One dynamic collision instance
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicSlot {
    pub active: bool,
    /// Header providing the surface-type table and water boxes
    pub header: Arc<CollisionHeader>,
    pub floor_list: u16,
    pub wall_list: u16,
    pub ceiling_list: u16,
}

impl Default for DynamicSlot {
    fn default() -> Self {
        Self {
            active: false,
            header: Arc::default(),
            floor_list: LIST_END,
            wall_list: LIST_END,
            ceiling_list: LIST_END,
        }
    }
}

/// Static and dynamic collision of the current scene
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionContext {
    /// Static scene collision
    pub header: CollisionHeader,
    /// Transformed vertices of all dynamic meshes
    pub dyn_vertices: Vec<Vec3s>,
    /// Polygon pool for all dynamic meshes
    pub dyn_polys: Vec<CollisionPoly>,
    /// Linked-list node pool
    pub dyn_lists: Vec<PolyListNode>,
    /// Dynamic instances; only the first [`DYN_SLOT_COUNT`] are considered
    pub dyn_slots: Vec<DynamicSlot>,
}

impl CollisionContext {
    /// Active dynamic slots, in slot order
    pub fn active_slots(&self) -> impl Iterator<Item = &DynamicSlot> {
        self.dyn_slots
            .iter()
            .take(DYN_SLOT_COUNT)
            .filter(|slot| slot.active)
    }

    /// Walk a dynamic polygon list starting at node `head`
    pub fn dyn_list(&self, head: u16) -> DynPolyList<'_> {
        DynPolyList {
            nodes: &self.dyn_lists,
            next: head,
            remaining: self.dyn_lists.len(),
        }
    }

    /// Total number of polygons reachable from the active slots' lists
    pub fn dyn_poly_count(&self) -> usize {
        self.active_slots()
            .map(|slot| {
                self.dyn_list(slot.ceiling_list).count()
                    + self.dyn_list(slot.wall_list).count()
                    + self.dyn_list(slot.floor_list).count()
            })
            .sum()
    }
}

/// Iterator over a sentinel-terminated dynamic polygon list
///
/// Never yields more nodes than the pool holds, so a cyclic list still ends.
pub struct DynPolyList<'a> {
    nodes: &'a [PolyListNode],
    next: u16,
    remaining: usize,
}

impl<'a> Iterator for DynPolyList<'a> {
    type Item = &'a PolyListNode;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == LIST_END {
            return None;
        }
        let Some(node) = self.nodes.get(self.next as usize) else {
            tracing::warn!(index = self.next, "dynamic poly list points past node pool");
            self.next = LIST_END;
            return None;
        };
        if self.remaining == 0 {
            tracing::warn!("dynamic poly list does not terminate, truncating");
            self.next = LIST_END;
            return None;
        }
        self.remaining -= 1;
        self.next = node.next;
        Some(node)
    }
}
