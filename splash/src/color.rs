// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color descriptors.

use peniko::Color;

/// Color used when a descriptor can't be understood: opaque black.
pub const FALLBACK: Color = Color::from_rgba8(0, 0, 0, 255);

/// Parse an `rgb(R,G,B)` descriptor with integer channels.
///
/// Anything else, including a malformed `rgb(...)`, yields [`FALLBACK`].
/// Channel values are truncated to their low 8 bits.
pub fn parse_color(descriptor: &str) -> Color {
    match parse_rgb(descriptor) {
        Some([r, g, b]) => Color::from_rgba8(r, g, b, 255),
        None => {
            tracing::warn!(descriptor, "unrecognized color, using opaque black");
            FALLBACK
        }
    }
}

fn parse_rgb(descriptor: &str) -> Option<[u8; 3]> {
    let body = descriptor.strip_prefix("rgb(")?;
    let (body, _) = body.split_once(')')?;
    let mut channels = body.split(',');
    let mut out = [0_u8; 3];
    for slot in &mut out {
        let value: i32 = channels.next()?.trim().parse().ok()?;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Channels wrap into a byte like the C-style descriptors this mirrors."
        )]
        let byte = value as u8;
        *slot = byte;
    }
    channels.next().is_none().then_some(out)
}

/// Pack a color into the `0x00RRGGBB` form written to pixel sinks.
///
/// Alpha is ignored.
pub fn pack_rgb(color: Color) -> u32 {
    let c = color.to_rgba8();
    (u32::from(c.r) << 16) | (u32::from(c.g) << 8) | u32::from(c.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(color: Color) -> (u8, u8, u8, u8) {
        let c = color.to_rgba8();
        (c.r, c.g, c.b, c.a)
    }

    #[test]
    fn parses_rgb() {
        assert_eq!(rgba(parse_color("rgb(1,2,3)")), (1, 2, 3, 255));
        assert_eq!(rgba(parse_color("rgb(255,85,85)")), (255, 85, 85, 255));
    }

    #[test]
    fn tolerates_spaces_between_channels() {
        assert_eq!(rgba(parse_color("rgb(10, 20, 30)")), (10, 20, 30, 255));
    }

    #[test]
    fn unknown_descriptor_is_black() {
        assert_eq!(rgba(parse_color("blue")), (0, 0, 0, 255));
        assert_eq!(rgba(parse_color("")), (0, 0, 0, 255));
    }

    #[test]
    fn malformed_rgb_is_black() {
        for bad in ["rgb(1,2)", "rgb 1,2,3", "rgb(1,2,3", "rgb(a,b,c)", "rgb(1,2,3,4)"] {
            assert_eq!(rgba(parse_color(bad)), (0, 0, 0, 255), "{bad}");
        }
    }

    #[test]
    fn packs_without_alpha() {
        assert_eq!(pack_rgb(Color::from_rgba8(0x12, 0x34, 0x56, 0x78)), 0x0012_3456);
    }
}
