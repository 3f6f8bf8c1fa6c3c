//! Undirected edge set for wireframe deduplication
//!
//! Scoped to one static mesh pass. Membership is a linear scan, which is
//! fine for the few thousand edges of a scene and keeps insertion order.

/// Set of undirected vertex-index pairs
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    edges: Vec<(u16, u16)>,
}

fn key(a: u16, b: u16) -> (u16, u16) {
    if a <= b { (a, b) } else { (b, a) }
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, a: u16, b: u16) -> bool {
        self.edges.contains(&key(a, b))
    }

    /// Insert `a-b`; returns `true` if it was not present
    pub fn contains_or_insert(&mut self, a: u16, b: u16) -> bool {
        if self.contains(a, b) {
            return false;
        }
        self.edges.push(key(a, b));
        true
    }

    /// Test the three edges `a-b`, `b-c`, `c-a` against the set as it was
    /// before this triangle, then insert the new ones
    pub fn insert_triangle(&mut self, a: u16, b: u16, c: u16) -> [bool; 3] {
        let new = [
            !self.contains(a, b),
            !self.contains(b, c),
            !self.contains(c, a),
        ];
        for (&(x, y), is_new) in [(a, b), (b, c), (c, a)].iter().zip(new) {
            if is_new {
                self.contains_or_insert(x, y);
            }
        }
        new
    }
}
