//! Collision surface classification
//!
//! Maps a polygon's surface properties to the color it is drawn with. Rules
//! are checked in priority order and the first match wins.

use colview_shared::SurfaceType;

use crate::gfx::Rgba;

pub const HOOKSHOT: Rgba = Rgba::from_rgba32(0x8080FFFF);
pub const INTERACTIVE: Rgba = Rgba::from_rgba32(0xC000C0FF);
pub const VOID: Rgba = Rgba::from_rgba32(0xFF0000FF);
pub const LOADING: Rgba = Rgba::from_rgba32(0x00FF00FF);
pub const SPECIAL: Rgba = Rgba::from_rgba32(0xC0FFC0FF);
pub const SLOPE: Rgba = Rgba::from_rgba32(0xFFFF80FF);
pub const PLAIN: Rgba = Rgba::WHITE;

/// Special-floor code of void-out planes
const SPECIAL_VOID: u8 = 0x0C;
/// Special-floor code that loads the next area
const SPECIAL_LOAD: u8 = 0x05;
/// Terrain class of steep, non-walkable slopes
const TERRAIN_STEEP: u8 = 0x01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Color(Rgba),
    /// Plain surface hidden by the restricted-only filter
    Skip,
}

pub fn classify(surface: &SurfaceType, restricted_only: bool) -> Classification {
    let color = if surface.hookshot {
        HOOKSHOT
    } else if surface.interaction > 0x01 {
        INTERACTIVE
    } else if surface.special == SPECIAL_VOID {
        VOID
    } else if surface.exit != 0 || surface.special == SPECIAL_LOAD {
        LOADING
    } else if surface.behavior != 0 || surface.wall_damage {
        SPECIAL
    } else if surface.terrain == TERRAIN_STEEP {
        SLOPE
    } else if restricted_only {
        return Classification::Skip;
    } else {
        PLAIN
    };
    Classification::Color(color)
}
