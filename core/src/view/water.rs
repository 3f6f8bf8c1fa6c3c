//! Water box view

use colview_shared::{CollisionHeader, GameState, SurfaceMode, WaterBox, WaterViewSettings};
use glam::Vec3;

use super::{DebugView, PerFrame, ViewState};
use crate::gfx::{Command, DisplayList, ListRef, Rgba};
use crate::primitives::{QUAD_WORDS, draw_quad};
use crate::sink::{POLY_SETUP_WORDS, RenderPass, RenderSink, emit_poly_setup};

const NAME: &str = "water";

pub const WATER_COLOR: u32 = 0x57ACF3;
/// Height the sides of every box extend down to
pub const WATER_FLOOR: f32 = -4000.0;

/// Corner indices of the top and four side faces
const FACES: [[usize; 4]; 5] = [
    [0, 1, 2, 3],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

const BOX_WORDS: usize = FACES.len() * QUAD_WORDS;

/// Static header first, then every active dynamic header
fn headers(game: &GameState) -> impl Iterator<Item = &CollisionHeader> {
    let collision = &game.collision;
    std::iter::once(&collision.header)
        .chain(collision.active_slots().map(|slot| &*slot.header))
}

fn has_water(game: &GameState) -> bool {
    headers(game).any(|h| !h.water_boxes.is_empty())
}

fn capacity(game: &GameState) -> usize {
    let (headers, boxes) = headers(game).fold((0, 0), |(h, b), header| {
        (h + 1, b + header.water_boxes.len())
    });
    POLY_SETUP_WORDS + headers + BOX_WORDS * boxes + 1
}

fn box_corners(water: &WaterBox) -> [Vec3; 8] {
    let x0 = water.pos.x as f32;
    let z0 = water.pos.z as f32;
    let x1 = x0 + water.width as f32;
    let z1 = z0 + water.depth as f32;
    let y = water.pos.y as f32;
    [
        Vec3::new(x0, y, z0),
        Vec3::new(x1, y, z0),
        Vec3::new(x1, y, z1),
        Vec3::new(x0, y, z1),
        Vec3::new(x0, WATER_FLOOR, z0),
        Vec3::new(x1, WATER_FLOOR, z0),
        Vec3::new(x1, WATER_FLOOR, z1),
        Vec3::new(x0, WATER_FLOOR, z1),
    ]
}

fn draw_boxes(list: &mut DisplayList, boxes: &[WaterBox], room: u8) {
    list.push(Command::SetPrimColor(Rgba::from_rgb24(WATER_COLOR, 0xFF)));
    for water in boxes.iter().filter(|b| b.visible_in(room)) {
        let p = box_corners(water);
        for face in FACES {
            draw_quad(list, face.map(|i| p[i]));
        }
    }
}

#[derive(Debug, Default)]
pub struct WaterView {
    frame: PerFrame,
}

impl WaterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// List drawn this frame
    pub fn current_list(&self) -> Option<&ListRef> {
        self.frame.buffers.current()
    }
}

impl DebugView for WaterView {
    type Settings = WaterViewSettings;

    fn name(&self) -> &'static str {
        NAME
    }

    fn state(&self) -> ViewState {
        self.frame.state
    }

    fn start(&mut self) {
        self.frame.state.request_start(NAME);
    }

    fn stop(&mut self) {
        self.frame.state.request_stop(NAME);
    }

    fn is_allocated(&self) -> bool {
        self.frame.buffers.is_allocated()
    }

    fn update(&mut self, game: &GameState, settings: &WaterViewSettings, sink: &mut dyn RenderSink) {
        let list = self.frame.run(NAME, game.views_enabled(), capacity(game), |list| {
            if !has_water(game) {
                return;
            }
            emit_poly_setup(list, SurfaceMode::Surface, settings.translucent, settings.shade);
            for header in headers(game) {
                draw_boxes(list, &header.water_boxes, game.room_index);
            }
        });

        if let Some(list) = list {
            sink.pass_mut(RenderPass::select(settings.translucent))
                .push(Command::DisplayList(list));
        }
    }
}
