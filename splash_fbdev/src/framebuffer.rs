// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{
    fs::{self, File, OpenOptions},
    io::{self, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use splash::PixelSink;

use crate::Error;

/// Framebuffer used when none is given.
pub const DEFAULT_DEVICE: &str = "/dev/fb0";

/// Where the kernel describes framebuffer devices.
const SYSFS_GRAPHICS: &str = "/sys/class/graphics";

/// Only this depth is written; pixels of other depths are skipped.
const SUPPORTED_BPP: u32 = 32;

/// Layout of a framebuffer in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Visible width in pixels.
    pub width: u32,
    /// Visible height in pixels.
    pub height: u32,
    /// Height of the whole buffer in lines, at least `height`.
    pub virtual_height: u32,
    /// Bits per pixel.
    pub bits_per_pixel: u32,
    /// Bytes per line.
    pub stride: u32,
    /// Horizontal pan offset in pixels.
    pub x_offset: u32,
    /// Vertical pan offset in pixels.
    pub y_offset: u32,
}

impl Geometry {
    /// Read the geometry of a framebuffer from its sysfs directory,
    /// e.g. `/sys/class/graphics/fb0`.
    ///
    /// The visible size comes from the current `mode`, or the first entry of
    /// `modes`; `virtual_size` stands in when neither names a mode.
    ///
    /// # Errors
    ///
    /// Fails when `virtual_size`, `bits_per_pixel` or `stride` can't be read or
    /// parsed. A missing `pan` attribute means no panning.
    pub fn from_sysfs(dir: &Path) -> Result<Self, Error> {
        let (virtual_width, virtual_height) = read_pair(&dir.join("virtual_size"))?;
        let bits_per_pixel = read_number(&dir.join("bits_per_pixel"))?;
        let stride = read_number(&dir.join("stride"))?;
        let pan = dir.join("pan");
        let (x_offset, y_offset) = if pan.exists() {
            read_pair(&pan)?
        } else {
            (0, 0)
        };
        let (width, height) = visible_size(dir).unwrap_or((virtual_width, virtual_height));
        Ok(Self {
            width: width.min(virtual_width),
            height: height.min(virtual_height),
            virtual_height,
            bits_per_pixel,
            stride,
            x_offset,
            y_offset,
        })
    }

    /// Bytes of device memory: every line of the virtual buffer.
    pub fn byte_len(&self) -> usize {
        self.stride as usize * self.virtual_height as usize
    }

    /// Byte offset of pixel `(x, y)`.
    fn location(&self, x: u32, y: u32) -> usize {
        (x as usize + self.x_offset as usize) * (self.bits_per_pixel as usize / 8)
            + (y as usize + self.y_offset as usize) * self.stride as usize
    }
}

/// A framebuffer device drawn through an in-memory staging copy.
///
/// Pixels land in the staging copy and reach the device on [`Framebuffer::flush`].
/// The staging copy starts out black.
#[derive(Debug)]
pub struct Framebuffer {
    path: PathBuf,
    file: File,
    geometry: Geometry,
    staging: Vec<u8>,
}

impl Framebuffer {
    /// Open a framebuffer device, reading its geometry from
    /// `/sys/class/graphics/<name>`.
    ///
    /// # Errors
    ///
    /// See [`Framebuffer::open_with_sysfs`].
    pub fn open(device: impl AsRef<Path>) -> Result<Self, Error> {
        let device = device.as_ref();
        let Some(name) = device.file_name() else {
            return Err(Error::NotADevice {
                path: device.to_owned(),
            });
        };
        Self::open_with_sysfs(device, Path::new(SYSFS_GRAPHICS).join(name))
    }

    /// Open a framebuffer device whose geometry is described in `sysfs`.
    ///
    /// # Errors
    ///
    /// Fails when the device can't be opened for reading and writing, or the
    /// geometry can't be read.
    #[tracing::instrument(skip_all, fields(device = %device.as_ref().display()))]
    pub fn open_with_sysfs(
        device: impl AsRef<Path>,
        sysfs: impl AsRef<Path>,
    ) -> Result<Self, Error> {
        let path = device.as_ref().to_owned();
        let geometry = Geometry::from_sysfs(sysfs.as_ref())?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
        if geometry.bits_per_pixel != SUPPORTED_BPP {
            tracing::warn!(
                bits_per_pixel = geometry.bits_per_pixel,
                "unsupported depth, nothing will be drawn"
            );
        }
        tracing::debug!(?geometry, "opened framebuffer");
        Ok(Self {
            path,
            staging: vec![0; geometry.byte_len()],
            file,
            geometry,
        })
    }

    /// Layout of the device.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Write the staging copy to the device.
    ///
    /// # Errors
    ///
    /// Fails when the device rejects the write.
    #[tracing::instrument(skip_all)]
    pub fn flush(&mut self) -> Result<(), Error> {
        let write = |file: &mut File, bytes: &[u8]| -> io::Result<()> {
            file.seek(SeekFrom::Start(0))?;
            file.write_all(bytes)?;
            file.flush()
        };
        write(&mut self.file, &self.staging).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl PixelSink for Framebuffer {
    fn width(&self) -> u32 {
        self.geometry.width
    }

    fn height(&self) -> u32 {
        self.geometry.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, rgb: u32) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.geometry.width
            || y >= self.geometry.height
            || self.geometry.bits_per_pixel != SUPPORTED_BPP
        {
            return;
        }
        let at = self.geometry.location(x, y);
        if let Some(px) = self.staging.get_mut(at..at + 4) {
            px.copy_from_slice(&rgb.to_ne_bytes());
        }
    }
}

fn read_attribute(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path)
        .map(|s| s.trim().to_owned())
        .map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })
}

fn malformed(path: &Path, value: &str) -> Error {
    Error::Attribute {
        path: path.to_owned(),
        value: value.to_owned(),
    }
}

fn read_number(path: &Path) -> Result<u32, Error> {
    let value = read_attribute(path)?;
    value.parse().map_err(|_| malformed(path, &value))
}

/// Visible resolution of the current mode, if one is set.
fn visible_size(dir: &Path) -> Option<(u32, u32)> {
    ["mode", "modes"].iter().find_map(|name| {
        let value = fs::read_to_string(dir.join(name)).ok()?;
        parse_mode(value.lines().next()?.trim())
    })
}

/// Parse the resolution out of a mode name such as `U:1920x1080p-60`.
fn parse_mode(mode: &str) -> Option<(u32, u32)> {
    let (_, resolution) = mode.split_once(':')?;
    let (width, rest) = resolution.split_once('x')?;
    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let size = (width.parse().ok()?, rest[..digits].parse().ok()?);
    (size.0 > 0 && size.1 > 0).then_some(size)
}

/// Read a `<a>,<b>` attribute such as `virtual_size` or `pan`.
fn read_pair(path: &Path) -> Result<(u32, u32), Error> {
    let value = read_attribute(path)?;
    let parsed = value
        .split_once(',')
        .and_then(|(a, b)| Some((a.parse().ok()?, b.parse().ok()?)));
    parsed.ok_or_else(|| malformed(path, &value))
}
