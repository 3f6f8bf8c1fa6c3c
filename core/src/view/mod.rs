//! Feature views
//!
//! Each view turns one kind of host data into display lists once per frame
//! and appends calls to them to the host's render passes. Views are driven
//! by a small lifecycle state machine so buffers are allocated when a view
//! is switched on and released a frame after it is switched off, never while
//! the host may still be reading them.

mod collision;
mod hitbox;
mod path;
mod water;

use colview_shared::{GameState, ViewSettings};

use crate::gfx::{DisplayList, ListRef};
use crate::sink::{RenderSink, writeback};

pub use collision::{
    CollisionView, DYN_MIN_CAPACITY, dyn_line_capacity, dyn_poly_capacity, line_capacity,
    poly_capacity,
};
pub use hitbox::{AC_COLOR, AT_COLOR, HitboxView, OC_COLOR};
pub use path::{PATH_MARKER_RADIUS, PathView};
pub use water::{WATER_COLOR, WATER_FLOOR, WaterView};

/// Words initially allocated for per-frame view lists
pub const BASE_CAPACITY: usize = 0x800;

/// Lifecycle of a view
///
/// `Inactive -> Start -> Active -> BeginStop -> Stop -> Inactive`, and for
/// views that cache generated data, `Active -> BeginRestart -> Restart ->
/// Active` when the cached data goes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Inactive,
    /// Requested on; buffers are allocated on the next enabled frame
    Start,
    Active,
    /// Requested off; drawing stops this frame
    BeginStop,
    /// Buffers are released on the next frame
    Stop,
    BeginRestart,
    /// Buffers are released and regenerated on the next enabled frame
    Restart,
}

impl ViewState {
    /// On, or on its way on
    pub fn is_running(self) -> bool {
        matches!(
            self,
            ViewState::Start | ViewState::Active | ViewState::BeginRestart | ViewState::Restart
        )
    }

    fn set(&mut self, view: &'static str, next: ViewState) {
        if *self != next {
            tracing::debug!(view, from = ?*self, to = ?next, "view state");
            *self = next;
        }
    }

    pub(crate) fn request_start(&mut self, view: &'static str) {
        if *self == ViewState::Inactive {
            self.set(view, ViewState::Start);
        }
    }

    pub(crate) fn request_stop(&mut self, view: &'static str) {
        match *self {
            ViewState::Start => self.set(view, ViewState::Inactive),
            ViewState::Active | ViewState::BeginRestart => self.set(view, ViewState::BeginStop),
            // Restart still holds the old buffers until the next frame
            ViewState::Restart => self.set(view, ViewState::Stop),
            _ => {}
        }
    }

    /// Step pending transitions at the top of a frame
    ///
    /// Returns `true` when the view must release its buffers this frame.
    pub(crate) fn advance(&mut self, view: &'static str) -> bool {
        match *self {
            ViewState::BeginStop => {
                self.set(view, ViewState::Stop);
                false
            }
            ViewState::BeginRestart => {
                self.set(view, ViewState::Restart);
                false
            }
            ViewState::Stop => {
                self.set(view, ViewState::Inactive);
                true
            }
            ViewState::Restart => true,
            _ => false,
        }
    }
}

/// A per-feature debug view
pub trait DebugView {
    type Settings;

    fn name(&self) -> &'static str;

    fn state(&self) -> ViewState;

    /// Request the view on; no-op unless inactive
    fn start(&mut self);

    /// Request the view off; buffers are released over the next frames
    fn stop(&mut self);

    /// Whether any buffer is currently held
    fn is_allocated(&self) -> bool;

    /// Run one frame
    fn update(&mut self, game: &GameState, settings: &Self::Settings, sink: &mut dyn RenderSink);

    /// Turn a polled on/off setting into start and stop requests
    fn sync(&mut self, enabled: bool) {
        let running = self.state().is_running();
        if enabled && self.state() == ViewState::Inactive {
            self.start();
        } else if !enabled && running {
            self.stop();
        }
    }
}

/// Reuse a published list's storage if it is big enough and nobody else
/// holds it, otherwise allocate a fresh one
pub(crate) fn recycle(slot: Option<ListRef>, name: &'static str, capacity: usize) -> DisplayList {
    match slot.map(ListRef::try_unwrap) {
        Some(Ok(mut list)) if list.capacity() >= capacity => {
            list.clear();
            list
        }
        Some(Ok(list)) => {
            tracing::debug!(
                list = name,
                old = list.capacity(),
                capacity,
                "list too small, reallocating"
            );
            DisplayList::new(name, capacity)
        }
        Some(Err(_)) => {
            tracing::debug!(list = name, capacity, "list still held by sink, reallocating");
            DisplayList::new(name, capacity)
        }
        None => {
            tracing::debug!(list = name, capacity, "allocating list");
            DisplayList::new(name, capacity)
        }
    }
}

/// Two lists written on alternate frames
#[derive(Debug, Default)]
pub(crate) struct DoubleBuffer {
    lists: [Option<ListRef>; 2],
    index: usize,
}

impl DoubleBuffer {
    /// Allocate both halves up front
    pub fn allocate(&mut self, name: &'static str, capacity: usize) {
        self.lists = [
            Some(ListRef::new(DisplayList::new(name, capacity))),
            Some(ListRef::new(DisplayList::new(name, capacity))),
        ];
    }

    /// Drop both halves
    pub fn release(&mut self) {
        for list in &mut self.lists {
            list.take();
        }
    }

    pub fn is_allocated(&self) -> bool {
        self.lists.iter().any(Option::is_some)
    }

    pub fn current(&self) -> Option<&ListRef> {
        self.lists[self.index].as_ref()
    }

    /// Switch halves and hand back the new current half's storage
    pub fn flip(&mut self) -> Option<ListRef> {
        self.index ^= 1;
        self.lists[self.index].take()
    }

    pub fn set_current(&mut self, list: ListRef) {
        self.lists[self.index] = Some(list);
    }
}

/// Lifecycle and double buffer of a view that regenerates every frame
#[derive(Debug, Default)]
pub(crate) struct PerFrame {
    pub state: ViewState,
    pub buffers: DoubleBuffer,
}

impl PerFrame {
    /// Step the lifecycle and, if active, fill the next buffer half
    ///
    /// `capacity` must include the terminator. Returns the finished list to
    /// hand to the sink.
    pub fn run(
        &mut self,
        view: &'static str,
        enable: bool,
        capacity: usize,
        fill: impl FnOnce(&mut DisplayList),
    ) -> Option<ListRef> {
        if self.state.advance(view) {
            self.buffers.release();
            tracing::debug!(view, "released lists");
        }

        if enable && self.state == ViewState::Start {
            self.buffers.allocate(view, BASE_CAPACITY.max(capacity));
            self.state.set(view, ViewState::Active);
        }

        if !enable || self.state != ViewState::Active {
            return None;
        }

        let mut list = recycle(self.buffers.flip(), view, capacity);
        fill(&mut list);
        let list = writeback(list);
        self.buffers.set_current(list.clone());
        tracing::trace!(view, words = list.used(), "regenerated");
        Some(list)
    }
}

/// All four views, driven from one settings snapshot
#[derive(Debug, Default)]
pub struct ViewSet {
    pub collision: CollisionView,
    pub hitbox: HitboxView,
    pub path: PathView,
    pub water: WaterView,
}

impl ViewSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sync each view's on/off state with `settings` and run one frame
    pub fn update(&mut self, game: &GameState, settings: &ViewSettings, sink: &mut dyn RenderSink) {
        self.collision.sync(settings.collision.enabled);
        self.collision.update(game, &settings.collision, sink);

        self.hitbox.sync(settings.hitbox.enabled);
        self.hitbox.update(game, &settings.hitbox, sink);

        self.path.sync(settings.path.enabled);
        self.path.update(game, &settings.path, sink);

        self.water.sync(settings.water.enabled);
        self.water.update(game, &settings.water, sink);
    }

    pub fn stop_all(&mut self) {
        self.collision.stop();
        self.hitbox.stop();
        self.path.stop();
        self.water.stop();
    }
}

#[cfg(test)]
mod tests;
