// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splash draws a small vector logo onto a raw pixel surface.
//!
//! Path data in a compact subset of the SVG path grammar is parsed into
//! [`CompoundShape`]s, optionally rotated by a quarter turn, and scanline
//! filled onto anything implementing [`PixelSink`].
//!
//! ```
//! use splash::{
//!     kurbo::Vec2,
//!     layout::Placement,
//!     raster::{render, Canvas, Pass},
//!     path::parse_path,
//! };
//!
//! let shape = parse_path("M 0 0 L 8 0 L 8 8 L 0 8 Z", "rgb(255,85,85)").unwrap();
//! let mut canvas = Canvas::new(16, 16);
//! render(
//!     &mut canvas,
//!     &shape,
//!     Placement::new(1.0, Vec2::new(4.0, 4.0)),
//!     Pass::First { background: 0 },
//! );
//! assert_eq!(canvas.pixel(4, 4), Some(0x00ff_5555));
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the Rust standard library.
//! - `libm`: Use `libm` for float math when `std` is disabled.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

pub use peniko;
pub use peniko::kurbo;

pub mod color;
pub mod config;
mod floatfuncs;
pub mod layout;
pub mod logo;
pub mod path;
pub mod raster;
pub mod shape;
pub mod transform;

use peniko::kurbo::Size;

pub use config::SplashConfig;
pub use logo::{Splash, Summary, LOGO};
pub use raster::{Canvas, Coverage, Pass, PixelSink};
pub use shape::{CompoundShape, Polygon, Role};
pub use transform::QuarterTurn;

/// Size of the square coordinate space logo paths are authored in.
pub const AUTHORING_SIZE: Size = Size::new(1284.0, 1284.0);

/// Errors reported by the path parser.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A buffer the parser can't work without couldn't be allocated.
    #[error("out of memory allocating {what}")]
    OutOfMemory {
        /// The buffer that failed.
        what: &'static str,
    },
}
