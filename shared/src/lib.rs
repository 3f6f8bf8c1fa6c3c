//! Shared types for the colview debug renderer.
//!
//! Everything in this crate describes data owned by the host simulation:
//! collision geometry, hitboxes, waypoint paths and the per-frame game state,
//! plus the user-facing view settings. The renderer only ever reads these.

pub mod collision;
pub mod game;
pub mod hitbox;
pub mod math;
pub mod path;
pub mod settings;

pub use collision::{
    CollisionContext, CollisionHeader, CollisionPoly, DYN_SLOT_COUNT, DynPolyList, DynamicSlot,
    LIST_END, PolyListNode, SurfaceType, WATER_ALL_ROOMS, WaterBox,
};
pub use game::GameState;
pub use hitbox::{Collider, HitboxContext, SphereElement};
pub use math::{Vec3f, Vec3s};
pub use path::{Path, PathList};
pub use settings::{
    CollisionViewSettings, HitboxViewSettings, PathViewSettings, SettingsError, SurfaceMode,
    ViewSettings, WaterViewSettings,
};
