// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scanline fill of compound shapes onto pixel sinks.
//!
//! Each device row is intersected with every edge of every polygon. The
//! crossings are sorted by x and swept left to right, toggling "inside outer"
//! on outer-polygon crossings and "inside hole" on hole crossings. Spans that
//! are inside the outer boundary and outside every hole are filled.
//!
//! This is exact for one outer boundary with disjoint holes. Several
//! overlapping outer polygons in one shape have no defined result.

extern crate alloc;
use alloc::vec::Vec;

use core::ops::AddAssign;

#[cfg(all(not(feature = "std"), not(test)))]
use crate::floatfuncs::FloatFuncs;
use crate::{
    color::pack_rgb,
    layout::Placement,
    shape::{CompoundShape, Polygon},
};

/// Maximum number of edge crossings considered on one row.
///
/// Crossings beyond this are dropped and the row is counted in
/// [`Coverage::truncated_rows`].
pub const MAX_INTERSECTIONS: usize = 1000;

/// Destination of rasterized pixels.
pub trait PixelSink {
    /// Width of the surface in pixels.
    fn width(&self) -> u32;

    /// Height of the surface in pixels.
    fn height(&self) -> u32;

    /// Overwrite one pixel with a `0x00RRGGBB` color.
    ///
    /// Implementations ignore coordinates outside the surface.
    fn set_pixel(&mut self, x: i32, y: i32, rgb: u32);
}

/// An in-memory `0x00RRGGBB` surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Canvas {
    /// Make a black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: alloc::vec![0; width as usize * height as usize],
        }
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

impl PixelSink for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, rgb: u32) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        if let Some(px) = self.pixels.get_mut(idx) {
            *px = rgb;
        }
    }
}

/// Whether a render call starts a fresh pass over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Clear the whole surface to `background` before drawing.
    First {
        /// `0x00RRGGBB` color for every pixel of the surface.
        background: u32,
    },
    /// Draw over whatever earlier calls left on the surface.
    Continuation,
}

/// What a render call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coverage {
    /// Device rows scanned.
    pub rows: u32,
    /// Pixels written by fill spans.
    pub pixels: u64,
    /// Rows that had more than [`MAX_INTERSECTIONS`] crossings.
    pub truncated_rows: u32,
}

impl AddAssign for Coverage {
    fn add_assign(&mut self, rhs: Self) {
        self.rows += rhs.rows;
        self.pixels += rhs.pixels;
        self.truncated_rows += rhs.truncated_rows;
    }
}

/// Set every pixel of `sink` to `rgb`.
pub fn clear(sink: &mut impl PixelSink, rgb: u32) {
    let width = i32::try_from(sink.width()).unwrap_or(i32::MAX);
    let height = i32::try_from(sink.height()).unwrap_or(i32::MAX);
    for y in 0..height {
        for x in 0..width {
            sink.set_pixel(x, y, rgb);
        }
    }
}

/// Draw `shape` onto `sink`, clearing the surface first on [`Pass::First`].
#[tracing::instrument(skip(sink, shape))]
pub fn render(
    sink: &mut impl PixelSink,
    shape: &CompoundShape,
    placement: Placement,
    pass: Pass,
) -> Coverage {
    if let Pass::First { background } = pass {
        clear(sink, background);
    }
    fill(sink, shape, placement)
}

/// A polygon edge crossing the current row.
#[derive(Debug, Clone, Copy)]
struct Crossing {
    x: f64,
    hole: bool,
}

/// Per-row crossing buffer bounded at [`MAX_INTERSECTIONS`].
#[derive(Debug)]
struct Crossings {
    items: Vec<Crossing>,
    truncated: bool,
}

impl Crossings {
    fn new() -> Option<Self> {
        let mut items = Vec::new();
        items.try_reserve_exact(MAX_INTERSECTIONS).ok()?;
        Some(Self {
            items,
            truncated: false,
        })
    }

    fn reset(&mut self) {
        self.items.clear();
        self.truncated = false;
    }

    fn push(&mut self, c: Crossing) {
        if self.items.len() < MAX_INTERSECTIONS {
            self.items.push(c);
        } else {
            self.truncated = true;
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "Device coordinates are floored floats; `as` saturates out-of-range values."
)]
fn device_floor(v: f64) -> i32 {
    v.floor() as i32
}

/// Scanline-fill `shape` without touching pixels outside it.
#[tracing::instrument(skip_all)]
pub fn fill(sink: &mut impl PixelSink, shape: &CompoundShape, placement: Placement) -> Coverage {
    let mut coverage = Coverage::default();
    let width = i32::try_from(sink.width()).unwrap_or(i32::MAX);
    let height = i32::try_from(sink.height()).unwrap_or(i32::MAX);
    if width == 0 || height == 0 {
        return coverage;
    }

    // Device-space copies; rings are closed implicitly by `Polygon::edges`.
    let rings: Vec<Polygon> = shape
        .polygons()
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| {
            let points = p.points().iter().map(|&pt| placement.apply(pt)).collect();
            Polygon::from_points(p.role(), points)
        })
        .collect();

    let (min_y, max_y) = rings
        .iter()
        .flat_map(|r| r.points().iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    if !(min_y.is_finite() && max_y.is_finite()) {
        return coverage;
    }
    let first_row = device_floor(min_y).max(0);
    let last_row = device_floor(max_y).min(height - 1);

    let Some(mut crossings) = Crossings::new() else {
        tracing::warn!("can't allocate crossing buffer, skipping shape");
        return coverage;
    };
    let rgb = pack_rgb(shape.color());

    for y in first_row..=last_row {
        coverage.rows += 1;
        crossings.reset();
        let row = f64::from(y);

        for ring in &rings {
            let hole = ring.is_hole();
            for (a, b) in ring.edges() {
                // Half-open so a vertex shared by two edges counts once.
                if (a.y <= row && b.y > row) || (b.y <= row && a.y > row) {
                    let x = if a.y == b.y {
                        a.x
                    } else {
                        a.x + (row - a.y) * (b.x - a.x) / (b.y - a.y)
                    };
                    crossings.push(Crossing { x, hole });
                }
            }
        }

        if crossings.truncated {
            coverage.truncated_rows += 1;
            tracing::warn!(row = y, "too many edge crossings, row truncated");
        }

        let items = &mut crossings.items;
        items.sort_unstable_by(|l, r| l.x.total_cmp(&r.x));

        let mut inside_outer = false;
        let mut inside_hole = false;
        for pair in items.windows(2) {
            if pair[0].hole {
                inside_hole = !inside_hole;
            } else {
                inside_outer = !inside_outer;
            }
            if !inside_outer || inside_hole {
                continue;
            }
            let start = device_floor(pair[0].x).max(0);
            let end = device_floor(pair[1].x).min(width);
            for x in start..end {
                sink.set_pixel(x, y, rgb);
            }
            if end > start {
                coverage.pixels += u64::from(end.abs_diff(start));
            }
        }
    }

    tracing::debug!(
        rows = coverage.rows,
        pixels = coverage.pixels,
        truncated_rows = coverage.truncated_rows,
        "filled shape"
    );
    coverage
}
