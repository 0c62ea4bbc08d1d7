use serde::Serialize;

use crate::{Line, LevelFormat, LevelNamespace, Sector, Side, Thing, Vertex};

/// A fully decoded level.
///
/// Index fields inside the entities are not validated against the arrays
/// here; a corrupt level can reference vertices, sides or sectors that do not
/// exist. Use the `Option`-returning accessors to follow references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Level {
    pub name: String,
    pub namespace: LevelNamespace,
    pub format: LevelFormat,
    pub vertices: Vec<Vertex>,
    pub lines: Vec<Line>,
    pub sides: Vec<Side>,
    pub sectors: Vec<Sector>,
    pub things: Vec<Thing>,
}

impl Level {
    pub fn vertex(&self, index: u32) -> Option<&Vertex> {
        self.vertices.get(index as usize)
    }

    pub fn side(&self, index: u32) -> Option<&Side> {
        self.sides.get(index as usize)
    }

    pub fn sector(&self, index: u32) -> Option<&Sector> {
        self.sectors.get(index as usize)
    }

    /// Both endpoints of `line`, or `None` if either index is out of range.
    pub fn line_vertices(&self, line: &Line) -> Option<(&Vertex, &Vertex)> {
        Some((self.vertex(line.vertex_start)?, self.vertex(line.vertex_end)?))
    }

    /// Front and back sides of `line`. A missing or dangling reference is `None`.
    pub fn line_sides(&self, line: &Line) -> (Option<&Side>, Option<&Side>) {
        (
            line.side_front.and_then(|i| self.side(i)),
            line.side_back.and_then(|i| self.side(i)),
        )
    }

    pub fn side_sector(&self, side: &Side) -> Option<&Sector> {
        self.sector(side.sector)
    }

    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let first = self.vertices.first()?;
        Some(self.vertices.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), v| {
                (min_x.min(v.x), min_y.min(v.y), max_x.max(v.x), max_y.max(v.y))
            },
        ))
    }
}
