// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linux backend for Splash.
//!
//! [`Framebuffer`] is a [`PixelSink`](splash::PixelSink) over a framebuffer
//! device such as `/dev/fb0`, and [`display_rotation`] reads the panel
//! rotation from the device tree.

mod devicetree;
mod framebuffer;

pub use devicetree::{display_rotation, DEVICE_TREE_ROOT};
pub use framebuffer::{Framebuffer, Geometry, DEFAULT_DEVICE};

use std::path::PathBuf;

/// Errors from the framebuffer backend.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a device or sysfs file failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A sysfs attribute didn't have the expected form.
    #[error("{}: malformed attribute {value:?}", path.display())]
    Attribute {
        /// Attribute file.
        path: PathBuf,
        /// Its contents.
        value: String,
    },
    /// The device path has no file name to look up in sysfs.
    #[error("{}: not a framebuffer device path", path.display())]
    NotADevice {
        /// The offending path.
        path: PathBuf,
    },
}
