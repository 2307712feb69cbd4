// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where the logo lands on the destination surface.

use peniko::kurbo::{Point, Rect, Vec2};

use crate::AUTHORING_SIZE;

/// Share of the smaller screen dimension the logo occupies by default.
pub const DEFAULT_FRACTION: f64 = 0.6;

/// Screen size and the rectangle the logo is centered in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Surface width in pixels.
    pub screen_width: u32,
    /// Surface height in pixels.
    pub screen_height: u32,
    /// Target rectangle in device pixels.
    pub target: Rect,
}

impl Layout {
    /// Center a target with the authoring aspect ratio on the screen.
    ///
    /// The target is `fraction` of the screen width, or of the screen height
    /// when the width-based target would be too tall. Its size and offsets
    /// are whole pixels.
    pub fn centered(screen_width: u32, screen_height: u32, fraction: f64) -> Self {
        let aspect = AUTHORING_SIZE.height / AUTHORING_SIZE.width;
        let mut width = f64::from(screen_width) * fraction;
        let mut height = width * aspect;
        let max_height = f64::from(screen_height) * fraction;
        if height > max_height {
            height = max_height;
            width = height / aspect;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Target sizes are whole pixels, truncation is intended."
        )]
        let (width, height) = (width as u32, height as u32);
        let x = screen_width.saturating_sub(width) / 2;
        let y = screen_height.saturating_sub(height) / 2;
        Self {
            screen_width,
            screen_height,
            target: Rect::new(
                f64::from(x),
                f64::from(y),
                f64::from(x + width),
                f64::from(y + height),
            ),
        }
    }
}

/// Uniform scale and translation from authoring space to device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Device pixels per authoring unit.
    pub scale: f64,
    /// Device position of the authoring origin.
    pub offset: Vec2,
}

impl Placement {
    /// Make a placement from its parts.
    pub fn new(scale: f64, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    /// Scale the authoring space to fit `target` without distortion and
    /// center it there.
    pub fn fit(target: Rect) -> Self {
        let scale =
            (target.width() / AUTHORING_SIZE.width).min(target.height() / AUTHORING_SIZE.height);
        let slack = Vec2::new(
            target.width() - AUTHORING_SIZE.width * scale,
            target.height() - AUTHORING_SIZE.height * scale,
        );
        Self {
            scale,
            offset: target.origin().to_vec2() + slack / 2.0,
        }
    }

    /// Map an authoring-space point to device space.
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.offset.x, p.y * self.scale + self.offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_screen_is_height_limited() {
        let layout = Layout::centered(1920, 1080, DEFAULT_FRACTION);
        // 1920 * 0.6 = 1152 is taller than 1080 * 0.6 = 648.
        assert_eq!(layout.target, Rect::new(636.0, 216.0, 1284.0, 864.0));
    }

    #[test]
    fn portrait_screen_is_width_limited() {
        let layout = Layout::centered(480, 800, 0.5);
        assert_eq!(layout.target, Rect::new(120.0, 280.0, 360.0, 520.0));
    }

    #[test]
    fn fit_preserves_aspect_and_centers() {
        let placement = Placement::fit(Rect::new(100.0, 50.0, 742.0, 1334.0));
        assert!((placement.scale - 0.5).abs() < 1e-12);
        // 642 wide fits exactly; 1284 tall leaves 642 to split.
        assert!((placement.offset.x - 100.0).abs() < 1e-9);
        assert!((placement.offset.y - 371.0).abs() < 1e-9);
        let corner = placement.apply(Point::new(1284.0, 1284.0));
        assert!((corner.x - 742.0).abs() < 1e-9);
        assert!((corner.y - 1013.0).abs() < 1e-9);
    }
}
