// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygons and compound shapes produced by the path parser.

extern crate alloc;
use alloc::vec::Vec;

use peniko::{kurbo::Point, Color};
use smallvec::SmallVec;

use crate::Error;

/// Maximum number of polygons kept in one [`CompoundShape`].
///
/// Subpaths started beyond this bound are discarded and counted in
/// [`CompoundShape::dropped_subpaths`].
pub const MAX_SUBPATHS: usize = 10;

/// Number of points reserved up front for every polygon.
pub const INITIAL_POINT_CAPACITY: usize = 100;

/// How a polygon contributes to the fill of its [`CompoundShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The silhouette of the shape.
    Outer,
    /// A region cut out of the outer silhouette.
    Hole,
}

/// An implicitly closed ring of points.
///
/// The rasterizer always connects the last point back to the first, whether or
/// not the source path closed the ring explicitly.
#[derive(Debug, Clone)]
pub struct Polygon {
    points: Vec<Point>,
    role: Role,
}

impl Polygon {
    /// Make an empty polygon with [`INITIAL_POINT_CAPACITY`] points reserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] when the initial buffer can't be allocated.
    pub fn with_role(role: Role) -> Result<Self, Error> {
        let mut points = Vec::new();
        points
            .try_reserve_exact(INITIAL_POINT_CAPACITY)
            .map_err(|_| Error::OutOfMemory {
                what: "polygon point buffer",
            })?;
        Ok(Self { points, role })
    }

    /// Make a polygon from existing points.
    pub fn from_points(role: Role, points: Vec<Point>) -> Self {
        Self { points, role }
    }

    /// Append a point, doubling the buffer when it is full.
    ///
    /// Returns `false`, leaving the polygon unchanged, when growing the buffer fails.
    pub fn push(&mut self, p: Point) -> bool {
        if self.points.len() == self.points.capacity() {
            let additional = self.points.capacity().max(1);
            if self.points.try_reserve_exact(additional).is_err() {
                tracing::warn!(len = self.points.len(), "dropping point, buffer growth failed");
                return false;
            }
        }
        self.points.push(p);
        true
    }

    /// Points in insertion order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Mutable access to the points, for in-place transforms.
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Role of this polygon within its shape.
    pub fn role(&self) -> Role {
        self.role
    }

    /// `true` if this polygon is cut out of the outer silhouette.
    pub fn is_hole(&self) -> bool {
        self.role == Role::Hole
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate the edges of the closed ring, including the one from the last
    /// point back to the first.
    ///
    /// Polygons with fewer than two points have no edges.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = if self.points.len() < 2 {
            0
        } else {
            self.points.len()
        };
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// One fill color and a bounded list of polygons.
///
/// The first polygon is the outer boundary, all later ones are holes.
#[derive(Debug, Clone)]
pub struct CompoundShape {
    polygons: SmallVec<[Polygon; MAX_SUBPATHS]>,
    color: Color,
    dropped_subpaths: usize,
}

impl CompoundShape {
    /// Make an empty shape with the given fill color.
    pub fn new(color: Color) -> Self {
        Self {
            polygons: SmallVec::new(),
            color,
            dropped_subpaths: 0,
        }
    }

    /// Add a polygon.
    ///
    /// Returns the polygon back when the shape already holds [`MAX_SUBPATHS`]
    /// polygons; the shape then records one more dropped subpath.
    pub fn push(&mut self, polygon: Polygon) -> Result<(), Polygon> {
        if self.polygons.len() >= MAX_SUBPATHS {
            self.dropped_subpaths += 1;
            return Err(polygon);
        }
        self.polygons.push(polygon);
        Ok(())
    }

    /// Record a subpath that was discarded before it became a polygon.
    pub(crate) fn note_dropped_subpath(&mut self) {
        self.dropped_subpaths += 1;
    }

    /// Polygons in parse order.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Mutable access to the polygons, for in-place transforms.
    pub fn polygons_mut(&mut self) -> &mut [Polygon] {
        &mut self.polygons
    }

    /// Fill color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Number of subpaths discarded because of the [`MAX_SUBPATHS`] bound.
    pub fn dropped_subpaths(&self) -> usize {
        self.dropped_subpaths
    }

    /// `true` if any subpath was discarded.
    pub fn is_truncated(&self) -> bool {
        self.dropped_subpaths > 0
    }

    /// Iterate every point of every polygon.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.polygons.iter().flat_map(|p| p.points().iter().copied())
    }
}
