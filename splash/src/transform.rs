// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utilities for transformations

use peniko::kurbo::{Point, Vec2};

use crate::{shape::CompoundShape, AUTHORING_SIZE};

/// A rotation by a whole number of right angles.
///
/// Uses exact sine and cosine values, so rotated coordinates carry no
/// trigonometric round-off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuarterTurn {
    /// No rotation.
    #[default]
    Deg0 = 0,
    /// 90 degrees.
    Deg90 = 1,
    /// 180 degrees.
    Deg180 = 2,
    /// 270 degrees.
    Deg270 = 3,
}

/// `(cos, sin)` for each [`QuarterTurn`], in declaration order.
const COS_SIN: [(f64, f64); 4] = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];

impl QuarterTurn {
    /// Reduce an angle in degrees to a quarter turn.
    ///
    /// The angle is divided by 90 and taken modulo 4, so `-90` is [`Self::Deg270`]
    /// and `450` is [`Self::Deg90`]. Angles that aren't multiples of 90 are
    /// truncated toward zero first; normalizing them is up to the caller.
    pub fn from_degrees(degrees: i32) -> Self {
        match (degrees / 90).rem_euclid(4) {
            1 => Self::Deg90,
            2 => Self::Deg180,
            3 => Self::Deg270,
            _ => Self::Deg0,
        }
    }

    /// The angle in degrees, one of 0, 90, 180 or 270.
    pub fn degrees(self) -> i32 {
        self as i32 * 90
    }

    /// `true` for [`Self::Deg0`].
    pub fn is_identity(self) -> bool {
        self == Self::Deg0
    }

    /// Rotate `p` about `center`.
    #[inline]
    pub fn rotate_about(self, p: Point, center: Point) -> Point {
        let (cos, sin) = COS_SIN[self as usize];
        let Vec2 { x, y } = p - center;
        Point::new(x * cos - y * sin + center.x, x * sin + y * cos + center.y)
    }
}

/// Center of the authoring space, the pivot for every rotation.
pub fn authoring_center() -> Point {
    Point::new(AUTHORING_SIZE.width / 2.0, AUTHORING_SIZE.height / 2.0)
}

/// Rotate every point of `shape` in place about the center of the authoring space.
#[tracing::instrument(skip(shape))]
pub fn rotate_shape(shape: &mut CompoundShape, turn: QuarterTurn) {
    if turn.is_identity() {
        return;
    }
    let center = authoring_center();
    for polygon in shape.polygons_mut() {
        for p in polygon.points_mut() {
            *p = turn.rotate_about(*p, center);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use alloc::vec::Vec;

    use peniko::Color;

    use super::*;
    use crate::shape::{Polygon, Role};

    fn sample_shape() -> CompoundShape {
        let mut shape = CompoundShape::new(Color::from_rgba8(1, 1, 1, 255));
        let outer = alloc::vec![
            Point::new(0.0, 0.0),
            Point::new(140.106, 359.628),
            Point::new(1284.0, 27.138),
        ];
        let hole = alloc::vec![Point::new(600.557, 158.2), Point::new(-0.002, 1000.5)];
        assert!(shape.push(Polygon::from_points(Role::Outer, outer)).is_ok());
        assert!(shape.push(Polygon::from_points(Role::Hole, hole)).is_ok());
        shape
    }

    fn all_points(shape: &CompoundShape) -> Vec<Point> {
        shape.points().collect()
    }

    #[test]
    fn degrees_reduce_modulo_four_turns() {
        assert_eq!(QuarterTurn::from_degrees(0), QuarterTurn::Deg0);
        assert_eq!(QuarterTurn::from_degrees(90), QuarterTurn::Deg90);
        assert_eq!(QuarterTurn::from_degrees(180), QuarterTurn::Deg180);
        assert_eq!(QuarterTurn::from_degrees(270), QuarterTurn::Deg270);
        assert_eq!(QuarterTurn::from_degrees(360), QuarterTurn::Deg0);
        assert_eq!(QuarterTurn::from_degrees(450), QuarterTurn::Deg90);
        assert_eq!(QuarterTurn::from_degrees(-90), QuarterTurn::Deg270);
        assert_eq!(QuarterTurn::Deg270.degrees(), 270);
    }

    #[test]
    fn zero_is_identity() {
        let mut shape = sample_shape();
        let before = all_points(&shape);
        rotate_shape(&mut shape, QuarterTurn::Deg0);
        assert_eq!(all_points(&shape), before);
    }

    #[test]
    fn half_turn_reflects_through_center() {
        let mut shape = sample_shape();
        let before = all_points(&shape);
        rotate_shape(&mut shape, QuarterTurn::Deg180);
        let c = authoring_center();
        for (old, new) in before.iter().zip(all_points(&shape)) {
            assert!((new.x - (2.0 * c.x - old.x)).abs() < 1e-9, "{old:?} -> {new:?}");
            assert!((new.y - (2.0 * c.y - old.y)).abs() < 1e-9, "{old:?} -> {new:?}");
        }
    }

    #[test]
    fn quarter_turn_maps_axes() {
        let c = authoring_center();
        // Screen coordinates: +x rotates onto +y.
        let p = QuarterTurn::Deg90.rotate_about(Point::new(c.x + 10.0, c.y), c);
        assert_eq!(p, Point::new(c.x, c.y + 10.0));
        let p = QuarterTurn::Deg270.rotate_about(Point::new(c.x + 10.0, c.y), c);
        assert_eq!(p, Point::new(c.x, c.y - 10.0));
    }

    #[test]
    fn four_quarter_turns_round_trip() {
        let mut shape = sample_shape();
        let before = all_points(&shape);
        for _ in 0..4 {
            rotate_shape(&mut shape, QuarterTurn::Deg90);
        }
        for (old, new) in before.iter().zip(all_points(&shape)) {
            assert!((old.x - new.x).abs() < 1e-9 && (old.y - new.y).abs() < 1e-9);
        }
    }

    #[test]
    fn roles_survive_rotation() {
        let mut shape = sample_shape();
        rotate_shape(&mut shape, QuarterTurn::Deg270);
        assert_eq!(shape.polygons()[1].role(), Role::Hole);
    }
}
