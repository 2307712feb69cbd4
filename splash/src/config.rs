// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime settings for drawing the splash.

use crate::{layout::DEFAULT_FRACTION, transform::QuarterTurn};

/// How the splash is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashConfig {
    /// `0x00RRGGBB` color the surface is cleared to.
    pub background: u32,
    /// Share of the screen the logo occupies, see [`Layout::centered`](crate::layout::Layout::centered).
    pub fraction: f64,
    /// Rotation applied to every part of the logo.
    pub rotation: QuarterTurn,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            background: 0x0000_0000,
            fraction: DEFAULT_FRACTION,
            rotation: QuarterTurn::Deg0,
        }
    }
}
