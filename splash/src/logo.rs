// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The splash logo and the pass that draws it.

use crate::{
    config::SplashConfig,
    layout::{Layout, Placement},
    path::parse_path,
    raster::{clear, render, Coverage, Pass, PixelSink},
    transform::rotate_shape,
};

const ACCENT: &str = "rgb(255,85,85)";
const MUTED: &str = "rgb(85,85,85)";

/// One single-color piece of the logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPart {
    /// Path data in authoring space.
    pub path: &'static str,
    /// Color descriptor.
    pub color: &'static str,
}

/// The logo, one part per letter.
pub const LOGO: [LogoPart; 7] = [
    // R
    LogoPart {
        path: "M -0.002 140.106 L -0.002 359.628 L 27.138 359.628 L 27.138 270.09 L 47.626 270.09 L 115.612 359.628 L 150.077 359.628 L 77.701 267.695 C 112.29 262.506 133.445 239.357 133.445 204.499 C 133.445 164.719 105.902 140.106 62.269 140.106 L -0.002 140.106 Z M 27.138 161.925 L 54.944 161.925 C 86.613 161.925 105.368 178.024 105.368 204.499 C 105.368 230.975 86.613 247.073 54.944 247.073 L 27.138 247.073 L 27.138 161.925 Z",
        color: ACCENT,
    },
    // O
    LogoPart {
        path: "M 166.036 250 C 166.036 313.329 215.268 363.886 276.734 363.886 C 338.2 363.886 387.424 313.329 387.424 250 C 387.424 186.671 338.2 136.116 276.734 136.116 C 215.268 136.116 166.036 186.671 166.036 250 Z M 195.306 250 C 195.306 200.375 230.561 162.325 276.734 162.325 C 322.899 162.325 358.154 200.375 358.154 250 C 358.154 299.625 322.899 337.676 276.734 337.676 C 230.561 337.676 195.306 299.625 195.306 250 Z",
        color: ACCENT,
    },
    // C
    LogoPart {
        path: "M 530.178 363.886 C 557.45 363.886 582.461 355.504 600.557 341.801 L 586.99 319.715 C 572.619 331.023 552.928 337.144 531.905 337.144 C 478.957 337.144 443.965 299.093 443.965 250 C 443.965 200.907 478.957 162.857 531.905 162.857 C 552.928 162.857 572.619 168.977 586.99 180.285 L 600.557 158.2 C 582.461 144.497 557.45 136.116 530.178 136.116 C 463.254 136.116 414.432 185.874 414.432 250 C 414.432 314.128 463.254 363.886 530.178 363.886 Z",
        color: ACCENT,
    },
    // K
    LogoPart {
        path: "M 661.357 359.628 L 661.357 262.108 L 762.073 359.628 L 799.853 359.628 L 685.438 247.872 L 788.145 140.106 L 754.353 140.106 L 661.357 237.894 L 661.357 140.106 L 634.217 140.106 L 634.217 359.628 L 661.357 359.628 Z",
        color: ACCENT,
    },
    // N
    LogoPart {
        path: "M 821.944 140.106 L 821.944 359.628 L 849.084 359.628 L 849.084 186.006 L 960.038 359.628 L 987.178 359.628 L 987.178 140.106 L 960.038 140.106 L 960.038 313.861 L 849.084 140.106 L 821.944 140.106 Z",
        color: MUTED,
    },
    // I
    LogoPart {
        path: "M 1034.814 140.106 L 1034.814 359.627 L 1061.955 359.627 L 1061.955 140.106 L 1034.814 140.106 Z",
        color: MUTED,
    },
    // X
    LogoPart {
        path: "M 1116.9 359.628 L 1183.554 264.768 L 1250.208 359.628 L 1284 359.628 L 1200.45 241.219 L 1270.96 140.106 L 1238.369 140.106 L 1183.554 218.469 L 1128.74 140.106 L 1096.141 140.106 L 1166.658 241.219 L 1083.109 359.628 L 1116.9 359.628 Z",
        color: MUTED,
    },
];

/// Result of drawing a sequence of parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Parts rasterized.
    pub drawn: usize,
    /// Parts skipped because they couldn't be parsed.
    pub skipped: usize,
    /// Combined rasterizer output.
    pub coverage: Coverage,
}

/// Draws logo parts onto a surface in one pass.
#[derive(Debug, Clone, Copy)]
pub struct Splash<'a> {
    parts: &'a [LogoPart],
    config: SplashConfig,
}

impl Splash<'static> {
    /// Draw [`LOGO`] with `config`.
    pub fn new(config: SplashConfig) -> Self {
        Self::with_parts(&LOGO, config)
    }
}

impl<'a> Splash<'a> {
    /// Draw custom parts with `config`.
    pub fn with_parts(parts: &'a [LogoPart], config: SplashConfig) -> Self {
        Self { parts, config }
    }

    /// Where the parts land on a `width` by `height` surface.
    pub fn placement(&self, width: u32, height: u32) -> Placement {
        Placement::fit(Layout::centered(width, height, self.config.fraction).target)
    }

    /// Clear `sink` and draw every part onto it.
    ///
    /// A part that can't be parsed is logged and skipped; the rest are still drawn.
    #[tracing::instrument(skip_all)]
    pub fn render(&self, sink: &mut impl PixelSink) -> Summary {
        let placement = self.placement(sink.width(), sink.height());
        let mut summary = Summary::default();
        let mut pass = Pass::First {
            background: self.config.background,
        };

        for (idx, part) in self.parts.iter().enumerate() {
            let mut shape = match parse_path(part.path, part.color) {
                Ok(shape) => shape,
                Err(e) => {
                    tracing::error!(part = idx, "failed to parse logo part: {e}");
                    summary.skipped += 1;
                    continue;
                }
            };
            rotate_shape(&mut shape, self.config.rotation);
            summary.coverage += render(sink, &shape, placement, pass);
            summary.drawn += 1;
            pass = Pass::Continuation;
        }

        if summary.drawn == 0 {
            clear(sink, self.config.background);
        }
        tracing::info!(
            drawn = summary.drawn,
            skipped = summary.skipped,
            pixels = summary.coverage.pixels,
            "splash drawn"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{raster::Canvas, transform::QuarterTurn};

    const ACCENT_RGB: u32 = 0x00ff_5555;
    const MUTED_RGB: u32 = 0x0055_5555;

    fn count(canvas: &Canvas, rgb: u32) -> usize {
        canvas.pixels().iter().filter(|&&p| p == rgb).count()
    }

    #[test]
    fn logo_parts_parse_cleanly() {
        for part in &LOGO {
            let shape = parse_path(part.path, part.color).unwrap();
            assert!(!shape.polygons().is_empty());
            assert!(!shape.is_truncated());
        }
        // R and O each carry one counter.
        for idx in [0, 1] {
            let shape = parse_path(LOGO[idx].path, LOGO[idx].color).unwrap();
            assert_eq!(shape.polygons().len(), 2, "part {idx}");
        }
    }

    #[test]
    fn draws_every_part() {
        let mut canvas = Canvas::new(320, 240);
        let summary = Splash::new(SplashConfig::default()).render(&mut canvas);
        assert_eq!(summary.drawn, LOGO.len());
        assert_eq!(summary.skipped, 0);
        assert!(count(&canvas, ACCENT_RGB) > 0);
        assert!(count(&canvas, MUTED_RGB) > 0);
        let painted = count(&canvas, ACCENT_RGB) + count(&canvas, MUTED_RGB);
        assert_eq!(painted + count(&canvas, 0), canvas.pixels().len());
    }

    #[test]
    fn logo_stays_in_target() {
        let mut canvas = Canvas::new(320, 240);
        let config = SplashConfig {
            background: 0x0010_2030,
            ..SplashConfig::default()
        };
        Splash::new(config).render(&mut canvas);
        // 240 * 0.6 = 144 pixel target square at (88, 48). The R reaches a
        // hair left of the authoring origin, so allow one pixel of slack.
        for y in 0..240 {
            for x in 0..320 {
                if !(87..233).contains(&x) || !(47..193).contains(&y) {
                    assert_eq!(canvas.pixel(x, y), Some(0x0010_2030), "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn half_turn_moves_accent_to_the_right() {
        let mut upright = Canvas::new(200, 200);
        let mut flipped = Canvas::new(200, 200);
        Splash::new(SplashConfig::default()).render(&mut upright);
        let config = SplashConfig {
            rotation: QuarterTurn::Deg180,
            ..SplashConfig::default()
        };
        Splash::new(config).render(&mut flipped);

        let mean_x = |canvas: &Canvas| {
            let xs: alloc::vec::Vec<u32> = (0..200)
                .flat_map(|y| (0..200).map(move |x| (x, y)))
                .filter(|&(x, y)| canvas.pixel(x, y) == Some(ACCENT_RGB))
                .map(|(x, _)| x)
                .collect();
            xs.iter().map(|&x| f64::from(x)).sum::<f64>() / xs.len() as f64
        };
        assert!(mean_x(&upright) < 100.0);
        assert!(mean_x(&flipped) > 100.0);
    }

    #[test]
    fn empty_part_still_clears() {
        let parts = [LogoPart {
            path: "",
            color: "blue",
        }];
        let mut canvas = Canvas::new(4, 4);
        canvas.set_pixel(1, 1, 5);
        let config = SplashConfig {
            background: 9,
            ..SplashConfig::default()
        };
        let summary = Splash::with_parts(&parts, config).render(&mut canvas);
        assert_eq!(summary.drawn, 1);
        assert_eq!(count(&canvas, 9), 16);
    }
}
