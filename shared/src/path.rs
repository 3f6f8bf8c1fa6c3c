//! Waypoint paths of the current scene

use crate::math::Vec3s;

/// Ordered waypoint list
///
/// The host terminates its path table with a zero-point entry, see [`PathList`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    pub points: Vec<Vec3s>,
}

impl Path {
    pub fn new(points: Vec<Vec3s>) -> Self {
        Self { points }
    }

    /// Consecutive point pairs
    pub fn segments(&self) -> impl Iterator<Item = (Vec3s, Vec3s)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Iterator over a path table up to its zero-point sentinel
pub struct PathList<'a> {
    inner: std::slice::Iter<'a, Path>,
    done: bool,
}

impl<'a> PathList<'a> {
    pub fn new(paths: &'a [Path]) -> Self {
        Self {
            inner: paths.iter(),
            done: false,
        }
    }
}

impl<'a> Iterator for PathList<'a> {
    type Item = &'a Path;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next() {
            Some(path) if !path.points.is_empty() => Some(path),
            _ => {
                self.done = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for PathList<'_> {}
