//! Per-frame snapshot of host state the views read

use crate::collision::CollisionContext;
use crate::hitbox::HitboxContext;
use crate::path::{Path, PathList};

/// Host game state for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameState {
    /// A scene is loaded and running (false on title screens, during loads)
    pub in_game: bool,
    pub paused: bool,
    pub scene_index: u16,
    /// Room the player is in
    pub room_index: u8,
    pub collision: CollisionContext,
    pub hitboxes: HitboxContext,
    /// Scene path table, terminated by an empty path
    pub paths: Vec<Path>,
}

impl GameState {
    /// Whether debug views may draw this frame
    pub fn views_enabled(&self) -> bool {
        self.in_game && !self.paused
    }

    pub fn path_list(&self) -> PathList<'_> {
        PathList::new(&self.paths)
    }
}
