//! Physics hitboxes registered by actors this frame

use crate::math::{Vec3f, Vec3s};

/// One sphere of a sphere-list collider
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SphereElement {
    pub center: Vec3s,
    pub radius: i16,
}

/// Collider shapes the host can register
#[derive(Clone, Debug, PartialEq)]
pub enum Collider {
    /// Several spheres moving together (limbs, bodies)
    SphereList(Vec<SphereElement>),
    /// Upright cylinder; `pos` is the base before `y_offset` is applied
    Cylinder {
        pos: Vec3s,
        radius: i16,
        height: i16,
        y_offset: i16,
    },
    /// Independent triangles
    TriList(Vec<[Vec3f; 3]>),
    /// Quad with corners in host order
    Quad([Vec3f; 4]),
}

impl Collider {
    /// Number of drawable elements (spheres, triangles, or 1)
    pub fn element_count(&self) -> usize {
        match self {
            Self::SphereList(elements) => elements.len(),
            Self::TriList(tris) => tris.len(),
            Self::Cylinder { .. } | Self::Quad(_) => 1,
        }
    }
}

/// Colliders grouped by the host's collision check category
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HitboxContext {
    /// Object-collision colliders (pushing)
    pub oc: Vec<Collider>,
    /// Attack-collision colliders (vulnerable)
    pub ac: Vec<Collider>,
    /// Attack colliders (hurting)
    pub at: Vec<Collider>,
}

impl HitboxContext {
    /// Every collider across all three groups
    pub fn len(&self) -> usize {
        self.oc.len() + self.ac.len() + self.at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of [`Collider::element_count`] across all three groups
    pub fn element_count(&self) -> usize {
        self.oc
            .iter()
            .chain(&self.ac)
            .chain(&self.at)
            .map(Collider::element_count)
            .sum()
    }
}
