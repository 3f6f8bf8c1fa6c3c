//! Scene waypoint path view

use colview_shared::{GameState, Path, PathViewSettings, SurfaceMode};

use super::{DebugView, PerFrame, ViewState};
use crate::gfx::{Command, DisplayList, ListRef, Rgba};
use crate::mesh::{MESH_DRAW_WORDS, draw_icosphere};
use crate::primitives::{LINE_WORDS, draw_line, vec3_from_s};
use crate::sink::{
    LINE_SETUP_WORDS, POLY_SETUP_WORDS, RenderPass, RenderSink, emit_line_setup, emit_poly_setup,
};

const NAME: &str = "path";

/// Radius of the sphere drawn at each waypoint
pub const PATH_MARKER_RADIUS: f32 = 18.0;

fn path_words(path: &Path, settings: &PathViewSettings) -> usize {
    let n = path.points.len();
    let mut words = 0;
    if settings.lines {
        words += 3 + LINE_SETUP_WORDS + LINE_WORDS * n.saturating_sub(1);
    }
    if settings.points {
        words += POLY_SETUP_WORDS + 1 + MESH_DRAW_WORDS * n;
    }
    words
}

fn capacity(game: &GameState, settings: &PathViewSettings) -> usize {
    game.path_list()
        .map(|path| path_words(path, settings))
        .sum::<usize>()
        + 1
}

fn draw_path(list: &mut DisplayList, path: &Path, settings: &PathViewSettings) {
    if settings.lines {
        list.push(Command::LoadLineMicrocode);
        emit_line_setup(list, settings.translucent);
        for (a, b) in path.segments() {
            draw_line(list, a, b);
        }
        list.push(Command::RestoreLighting);
        list.push(Command::UnloadLineMicrocode);
    }

    if settings.points {
        emit_poly_setup(list, SurfaceMode::Surface, settings.translucent, false);
        list.push(Command::SetPrimColor(Rgba::WHITE));
        for &point in &path.points {
            draw_icosphere(list, vec3_from_s(point), PATH_MARKER_RADIUS);
        }
    }
}

#[derive(Debug, Default)]
pub struct PathView {
    frame: PerFrame,
}

impl PathView {
    pub fn new() -> Self {
        Self::default()
    }

    /// List drawn this frame
    pub fn current_list(&self) -> Option<&ListRef> {
        self.frame.buffers.current()
    }
}

impl DebugView for PathView {
    type Settings = PathViewSettings;

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

    fn update(&mut self, game: &GameState, settings: &PathViewSettings, sink: &mut dyn RenderSink) {
        let list = self.frame.run(
            NAME,
            game.views_enabled(),
            capacity(game, settings),
            |list| {
                if settings.points || settings.lines {
                    for path in game.path_list() {
                        draw_path(list, path, settings);
                    }
                }
            },
        );

        if let Some(list) = list {
            sink.pass_mut(RenderPass::select(settings.translucent))
                .push(Command::DisplayList(list));
        }
    }
}
