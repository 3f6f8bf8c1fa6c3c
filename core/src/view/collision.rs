//! Scene collision view
//!
//! Static collision is converted once per scene into a polygon list and an
//! optional wireframe list. Dynamic collision moves, so it is rebuilt into a
//! double buffer every frame while continuous update is on.

use colview_shared::{
    CollisionPoly, CollisionViewSettings, GameState, SurfaceType, Vec3s,
};

use super::{DebugView, DoubleBuffer, ViewState, recycle};
use crate::classify::{Classification, classify};
use crate::edge_set::EdgeSet;
use crate::gfx::{Command, DisplayList, GeometryMode, ListRef, Rgba, Vtx};
use crate::sink::{RenderPass, RenderSink, emit_line_setup, emit_poly_setup, writeback};
use crate::writer::{LineWriter, PolyWriter};

const NAME: &str = "collision";

/// Smallest dynamic list, so typical scenes never reallocate
pub const DYN_MIN_CAPACITY: usize = 0x1000;

/// Polygon list words for `polys` collision polygons
pub fn poly_capacity(polys: usize) -> usize {
    17 + 9 * polys
}

/// Wireframe list words for `polys` collision polygons
pub fn line_capacity(polys: usize) -> usize {
    24 + 11 * polys
}

pub fn dyn_poly_capacity(polys: usize) -> usize {
    poly_capacity(polys).max(DYN_MIN_CAPACITY)
}

pub fn dyn_line_capacity(polys: usize) -> usize {
    line_capacity(polys).max(DYN_MIN_CAPACITY)
}

/// Settings and scene the cached lists were generated for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Generation {
    scene: u16,
    wireframe: bool,
    restricted_only: bool,
}

impl Generation {
    fn capture(game: &GameState, settings: &CollisionViewSettings) -> Self {
        Self {
            scene: game.scene_index,
            wireframe: settings.wireframe,
            restricted_only: settings.restricted_only,
        }
    }
}

/// Draw one collision polygon and, if requested, its outline
///
/// With an edge set, only edges not drawn by an earlier polygon are kept:
/// each corner is sent to the line writer if either of its edges is new.
fn emit_poly(
    polys: &mut PolyWriter<'_>,
    lines: Option<&mut LineWriter<'_>>,
    edges: Option<&mut EdgeSet>,
    vertices: &[Vec3s],
    poly: &CollisionPoly,
    surface: SurfaceType,
    restricted_only: bool,
) {
    let (Some(&a), Some(&b), Some(&c)) = (
        vertices.get(poly.va as usize),
        vertices.get(poly.vb as usize),
        vertices.get(poly.vc as usize),
    ) else {
        tracing::warn!(
            va = poly.va,
            vb = poly.vb,
            vc = poly.vc,
            vertices = vertices.len(),
            "collision poly references missing vertex"
        );
        return;
    };

    if let Classification::Color(color) = classify(&surface, restricted_only) {
        let n = poly.normal;
        let normal = [
            (n.x / 0x100) as i8,
            (n.y / 0x100) as i8,
            (n.z / 0x100) as i8,
        ];
        let vtx = [a, b, c].map(|p| Vtx::with_normal(p.to_array(), normal, 0xFF));
        polys.add(&vtx, color);
    }

    if let Some(lines) = lines {
        let [ab, bc, ca] = match edges {
            Some(set) => set.insert_triangle(poly.va, poly.vb, poly.vc),
            None => [true; 3],
        };
        let mut points = [Vtx::default(); 3];
        let mut n = 0;
        for (p, keep) in [(a, ab || ca), (b, ab || bc), (c, bc || ca)] {
            if keep {
                points[n] = Vtx::with_color(p.to_array(), Rgba::BLACK);
                n += 1;
            }
        }
        lines.add(&points[..n]);
    }
}

/// Static and dynamic scene collision
///
/// The cached lists are rebuilt when the scene, wireframe or restricted-only
/// setting changes, whether or not continuous update is on. Continuous update
/// only controls per-frame regeneration of the dynamic lists.
#[derive(Debug, Default)]
pub struct CollisionView {
    state: ViewState,
    generation: Generation,
    static_poly: Option<ListRef>,
    static_line: Option<ListRef>,
    dyn_poly: DoubleBuffer,
    dyn_line: DoubleBuffer,
}

impl CollisionView {
    pub fn new() -> Self {
        Self::default()
    }

    fn release(&mut self) {
        self.static_poly = None;
        self.static_line = None;
        self.dyn_poly.release();
        self.dyn_line.release();
        tracing::debug!(view = NAME, "released lists");
    }

    fn is_stale(&self, game: &GameState, settings: &CollisionViewSettings) -> bool {
        Generation::capture(game, settings) != self.generation
    }

    fn generate_static(&mut self, game: &GameState, settings: &CollisionViewSettings) {
        self.generation = Generation::capture(game, settings);
        let wireframe = self.generation.wireframe;
        let restricted_only = self.generation.restricted_only;
        let header = &game.collision.header;
        let count = header.poly_count();

        let mut poly_list = DisplayList::new("collision.static_poly", poly_capacity(count));
        let mut line_list =
            wireframe.then(|| DisplayList::new("collision.static_line", line_capacity(count)));
        let mut edges = EdgeSet::new();
        {
            let mut polys = PolyWriter::new(&mut poly_list);
            let mut lines = line_list.as_mut().map(LineWriter::new);
            for poly in &header.polys {
                emit_poly(
                    &mut polys,
                    lines.as_mut(),
                    Some(&mut edges),
                    &header.vertices,
                    poly,
                    header.surface_type(poly),
                    restricted_only,
                );
            }
            polys.finish();
            if let Some(lines) = lines {
                lines.finish();
            }
        }

        self.static_poly = Some(writeback(poly_list));
        self.static_line = line_list.map(writeback);

        self.dyn_poly.allocate("collision.dyn_poly", DYN_MIN_CAPACITY);
        if wireframe {
            self.dyn_line.allocate("collision.dyn_line", DYN_MIN_CAPACITY);
        }

        tracing::debug!(
            view = NAME,
            scene = self.generation.scene,
            polys = count,
            edges = edges.len(),
            capacity = poly_capacity(count),
            "generated static collision"
        );
    }

    fn generate_dynamic(&mut self, game: &GameState) {
        let collision = &game.collision;
        let wireframe = self.generation.wireframe;
        let restricted_only = self.generation.restricted_only;
        let count = collision.dyn_poly_count();

        let mut poly_list = recycle(
            self.dyn_poly.flip(),
            "collision.dyn_poly",
            dyn_poly_capacity(count),
        );
        let old_line = self.dyn_line.flip();
        let mut line_list = wireframe
            .then(|| recycle(old_line, "collision.dyn_line", dyn_line_capacity(count)));
        {
            let mut polys = PolyWriter::new(&mut poly_list);
            let mut lines = line_list.as_mut().map(LineWriter::new);
            for slot in collision.active_slots() {
                for head in [slot.ceiling_list, slot.wall_list, slot.floor_list] {
                    for node in collision.dyn_list(head) {
                        let Some(poly) = collision.dyn_polys.get(node.poly as usize) else {
                            tracing::warn!(poly = node.poly, "dynamic list references missing poly");
                            continue;
                        };
                        emit_poly(
                            &mut polys,
                            lines.as_mut(),
                            None,
                            &collision.dyn_vertices,
                            poly,
                            slot.header.surface_type(poly),
                            restricted_only,
                        );
                    }
                }
            }
            polys.finish();
            if let Some(lines) = lines {
                lines.finish();
            }
        }

        self.dyn_poly.set_current(writeback(poly_list));
        if let Some(line_list) = line_list {
            self.dyn_line.set_current(writeback(line_list));
        }
        tracing::trace!(view = NAME, polys = count, "regenerated dynamic collision");
    }

    fn draw(&self, settings: &CollisionViewSettings, sink: &mut dyn RenderSink) {
        let (Some(static_poly), Some(dyn_poly)) = (&self.static_poly, self.dyn_poly.current())
        else {
            return;
        };
        let list = sink.pass_mut(RenderPass::select(settings.translucent));

        emit_poly_setup(list, settings.mode, settings.translucent, settings.shade);
        list.push(Command::SetGeometryMode(GeometryMode::CULL_BACK));
        list.push(Command::DisplayList(static_poly.clone()));
        list.push(Command::DisplayList(dyn_poly.clone()));

        if self.generation.wireframe
            && let (Some(static_line), Some(dyn_line)) = (&self.static_line, self.dyn_line.current())
        {
            list.push(Command::LoadLineMicrocode);
            emit_line_setup(list, settings.translucent);
            list.push(Command::DisplayList(static_line.clone()));
            list.push(Command::DisplayList(dyn_line.clone()));
            list.push(Command::UnloadLineMicrocode);
            list.push(Command::RestoreLighting);
        }
    }

    /// Static polygon list, while active
    pub fn static_poly_list(&self) -> Option<&ListRef> {
        self.static_poly.as_ref()
    }

    /// Static wireframe list, while active with wireframe on
    pub fn static_line_list(&self) -> Option<&ListRef> {
        self.static_line.as_ref()
    }

    /// Dynamic polygon list drawn this frame
    pub fn dyn_poly_list(&self) -> Option<&ListRef> {
        self.dyn_poly.current()
    }

    pub fn dyn_line_list(&self) -> Option<&ListRef> {
        self.dyn_line.current()
    }
}

impl DebugView for CollisionView {
    type Settings = CollisionViewSettings;

    fn name(&self) -> &'static str {
        NAME
    }

    fn state(&self) -> ViewState {
        self.state
    }

    fn start(&mut self) {
        self.state.request_start(NAME);
    }

    fn stop(&mut self) {
        self.state.request_stop(NAME);
    }

    fn is_allocated(&self) -> bool {
        self.static_poly.is_some()
            || self.static_line.is_some()
            || self.dyn_poly.is_allocated()
            || self.dyn_line.is_allocated()
    }

    fn update(
        &mut self,
        game: &GameState,
        settings: &CollisionViewSettings,
        sink: &mut dyn RenderSink,
    ) {
        let enable = game.views_enabled();
        let init = matches!(self.state, ViewState::Start | ViewState::Restart);

        if enable && self.state == ViewState::Active && self.is_stale(game, settings) {
            self.state.set(NAME, ViewState::BeginRestart);
        }

        if self.state.advance(NAME) {
            self.release();
        }

        if enable && init {
            self.generate_static(game, settings);
            self.state.set(NAME, ViewState::Active);
        }

        let active = self.state == ViewState::Active;
        if enable && (init || (active && settings.update_continuously)) {
            self.generate_dynamic(game);
        }

        if enable && active {
            self.draw(settings, sink);
        }
    }
}
