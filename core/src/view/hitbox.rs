//! Actor hitbox view

use colview_shared::{Collider, GameState, HitboxViewSettings, SurfaceMode};

use super::{DebugView, PerFrame, ViewState};
use crate::gfx::{Command, DisplayList, ListRef, Rgba};
use crate::mesh::{MESH_DRAW_WORDS, draw_cylinder, draw_icosphere};
use crate::primitives::{QUAD_WORDS, TRI_WORDS, draw_quad, draw_tri, vec3_from_f, vec3_from_s};
use crate::sink::{POLY_SETUP_WORDS, RenderPass, RenderSink, emit_poly_setup};

const NAME: &str = "hitbox";

/// Object-collision (push) colliders
pub const OC_COLOR: u32 = 0xFFFFFF;
/// Attack-collision (vulnerable) colliders
pub const AC_COLOR: u32 = 0x0000FF;
/// Attack (hurting) colliders
pub const AT_COLOR: u32 = 0xFF0000;

const ELEMENT_WORDS: usize = max_words(MESH_DRAW_WORDS, max_words(TRI_WORDS, QUAD_WORDS));

const fn max_words(a: usize, b: usize) -> usize {
    if a > b { a } else { b }
}

/// List words for `elements` drawable collider elements
fn capacity(elements: usize) -> usize {
    POLY_SETUP_WORDS + 3 + ELEMENT_WORDS * elements + 1
}

/// Zero-size colliders are drawn tiny instead of vanishing
fn visible_radius(radius: i16) -> f32 {
    if radius == 0 { 1.0 } else { radius as f32 }
}

fn draw_colliders(list: &mut DisplayList, colliders: &[Collider], color: u32) {
    list.push(Command::SetPrimColor(Rgba::from_rgb24(color, 0xFF)));

    for collider in colliders {
        match collider {
            Collider::SphereList(elements) => {
                for e in elements {
                    draw_icosphere(list, vec3_from_s(e.center), visible_radius(e.radius));
                }
            }
            Collider::Cylinder {
                pos,
                radius,
                height,
                y_offset,
            } => {
                let mut base = vec3_from_s(*pos);
                base.y += *y_offset as f32;
                draw_cylinder(list, base, visible_radius(*radius), *height as f32);
            }
            Collider::TriList(tris) => {
                for t in tris {
                    draw_tri(list, [t[0], t[2], t[1]].map(vec3_from_f));
                }
            }
            Collider::Quad(q) => {
                draw_quad(list, [q[0], q[2], q[3], q[1]].map(vec3_from_f));
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct HitboxView {
    frame: PerFrame,
}

impl HitboxView {
    pub fn new() -> Self {
        Self::default()
    }

    /// List drawn this frame
    pub fn current_list(&self) -> Option<&ListRef> {
        self.frame.buffers.current()
    }
}

impl DebugView for HitboxView {
    type Settings = HitboxViewSettings;

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

    fn update(&mut self, game: &GameState, settings: &HitboxViewSettings, sink: &mut dyn RenderSink) {
        let hitboxes = &game.hitboxes;
        let list = self.frame.run(
            NAME,
            game.views_enabled(),
            capacity(hitboxes.element_count()),
            |list| {
                emit_poly_setup(list, SurfaceMode::Surface, settings.translucent, settings.shade);
                let groups = [
                    (settings.oc, &hitboxes.oc, OC_COLOR),
                    (settings.ac, &hitboxes.ac, AC_COLOR),
                    (settings.at, &hitboxes.at, AT_COLOR),
                ];
                for (enabled, colliders, color) in groups {
                    if enabled {
                        draw_colliders(list, colliders, color);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{cylinder_mesh, icosphere_mesh};
    use colview_shared::{SphereElement, Vec3f, Vec3s};

    fn matrices(list: &DisplayList) -> Vec<glam::Mat4> {
        list.commands()
            .iter()
            .filter_map(|c| match c {
                Command::Matrix { data, .. } => Some(list.matrix(*data).to_mat4()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_zero_radius_sphere_drawn_small() {
        let mut list = DisplayList::new("test", 64);
        let sphere = Collider::SphereList(vec![SphereElement {
            center: Vec3s::new(10, 20, 30),
            radius: 0,
        }]);
        draw_colliders(&mut list, &[sphere], AT_COLOR);

        assert_eq!(list.commands()[0], Command::SetPrimColor(Rgba::new(0xFF, 0, 0, 0xFF)));
        assert_eq!(list.commands()[2], Command::DisplayList(icosphere_mesh()));
        let m = matrices(&list)[0];
        let top = m.transform_point3(glam::Vec3::new(0.0, 128.0, 0.0));
        assert!((top - glam::Vec3::new(10.0, 21.0, 30.0)).length() < 1e-3);
    }

    #[test]
    fn test_cylinder_offset() {
        let mut list = DisplayList::new("test", 64);
        let cyl = Collider::Cylinder {
            pos: Vec3s::new(0, 100, 0),
            radius: 0,
            height: 64,
            y_offset: -10,
        };
        draw_colliders(&mut list, &[cyl], OC_COLOR);

        assert_eq!(list.commands()[2], Command::DisplayList(cylinder_mesh()));
        let m = matrices(&list)[0];
        let base = m.transform_point3(glam::Vec3::ZERO);
        assert_eq!(base, glam::Vec3::new(0.0, 90.0, 0.0));
        let rim = m.transform_point3(glam::Vec3::new(128.0, 128.0, 0.0));
        assert!((rim - glam::Vec3::new(1.0, 154.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_triangle_and_quad_order() {
        let mut list = DisplayList::new("test", 64);
        let p = |x: f32| Vec3f::new(x, 0.0, 0.0);
        draw_colliders(
            &mut list,
            &[
                Collider::TriList(vec![[p(0.0), p(1.0), p(2.0)]]),
                Collider::Quad([p(10.0), p(11.0), p(12.0), p(13.0)]),
            ],
            AC_COLOR,
        );

        let xs: Vec<Vec<i16>> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                Command::Vertex { data, .. } => {
                    Some(list.vertices(*data).iter().map(|v| v.ob[0]).collect())
                }
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![vec![0, 2, 1], vec![10, 12, 13, 11]]);
    }

    #[test]
    fn test_capacity_covers_worst_case() {
        let mut list = DisplayList::new("test", capacity(3));
        emit_poly_setup(&mut list, SurfaceMode::Surface, true, true);
        let spheres = Collider::SphereList(vec![SphereElement::default(); 3]);
        draw_colliders(&mut list, std::slice::from_ref(&spheres), OC_COLOR);
        draw_colliders(&mut list, &[], AC_COLOR);
        draw_colliders(&mut list, &[], AT_COLOR);
        list.end();
        assert_eq!(list.remaining(), 0);
    }
}
