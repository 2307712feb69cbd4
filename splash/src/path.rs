// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path data parser.
//!
//! Understands the absolute subset `M`, `L`, `H`, `V`, `C` and `Z`/`z` of the
//! SVG path grammar. Every other command letter is skipped together with its
//! operands. Cubic curves are flattened into [`CURVE_SAMPLES`] points.
//!
//! The first subpath becomes the outer boundary of the resulting
//! [`CompoundShape`]; every subpath started by a later `M` is a hole.

use peniko::kurbo::{CubicBez, ParamCurve, Point};

use crate::{
    color::parse_color,
    shape::{CompoundShape, Polygon, Role, MAX_SUBPATHS},
    Error,
};

/// Number of points emitted for every cubic curve, at `t = 0, 0.1, ..., 1`.
pub const CURVE_SAMPLES: usize = 11;

/// Parse `data` into a shape filled with the color described by `color`.
///
/// Malformed input never fails: unknown commands are skipped, a command whose
/// operands aren't numbers is abandoned, and subpaths beyond
/// [`MAX_SUBPATHS`](crate::shape::MAX_SUBPATHS) are discarded.
///
/// # Errors
///
/// Returns [`Error::OutOfMemory`] if the first point buffer can't be allocated.
#[tracing::instrument(skip_all)]
pub fn parse_path(data: &str, color: &str) -> Result<CompoundShape, Error> {
    let mut parser = Parser {
        tokens: Tokens::new(data),
        shape: CompoundShape::new(parse_color(color)),
        active: Some(Polygon::with_role(Role::Outer)?),
        current: Point::ZERO,
        start: Point::ZERO,
    };
    parser.run();
    let shape = parser.finish();
    tracing::debug!(
        polygons = shape.polygons().len(),
        dropped = shape.dropped_subpaths(),
        "parsed path"
    );
    Ok(shape)
}

struct Parser<'a> {
    tokens: Tokens<'a>,
    shape: CompoundShape,
    /// Subpath receiving points; `None` once the subpath bound is exhausted.
    active: Option<Polygon>,
    current: Point,
    start: Point,
}

impl Parser<'_> {
    fn run(&mut self) {
        let mut command = b'M';
        loop {
            self.tokens.skip_whitespace();
            let Some(b) = self.tokens.peek() else {
                break;
            };
            if b.is_ascii_alphabetic() {
                self.tokens.bump();
                if b == b'M' {
                    self.begin_subpath();
                }
                command = b;
            }
            command = self.execute(command);
        }
    }

    /// Run one command, returning the command that bare operands which follow
    /// will repeat.
    fn execute(&mut self, command: u8) -> u8 {
        let applied = match command {
            b'M' => self.move_to(),
            b'L' => self.line_to(),
            b'H' => self.horizontal_to(),
            b'V' => self.vertical_to(),
            b'C' => self.curve_to(),
            b'Z' | b'z' => {
                self.close();
                // Stray operands after a close have no meaning.
                self.tokens.skip_to_command();
                Some(())
            }
            other => {
                tracing::warn!(command = %char::from(other), "skipping unsupported path command");
                self.tokens.skip_to_command();
                Some(())
            }
        };
        if applied.is_none() {
            tracing::warn!(
                command = %char::from(command),
                offset = self.tokens.pos,
                "abandoning command with malformed operands"
            );
            self.tokens.skip_to_command();
        }
        match command {
            b'M' => b'L',
            other => other,
        }
    }

    /// A `M` that follows a non-empty subpath closes it and opens a hole.
    fn begin_subpath(&mut self) {
        match self.active.take() {
            Some(active) if active.is_empty() => {
                self.active = Some(active);
                return;
            }
            Some(done) => {
                if self.shape.push(done).is_err() {
                    tracing::warn!("subpath limit reached, dropping subpath");
                }
            }
            None => {}
        }
        // Points of a dropped subpath go nowhere until the next `M`.
        if self.shape.polygons().len() >= MAX_SUBPATHS {
            tracing::warn!(limit = MAX_SUBPATHS, "subpath limit reached, dropping subpath");
            self.shape.note_dropped_subpath();
            return;
        }
        match Polygon::with_role(Role::Hole) {
            Ok(polygon) => self.active = Some(polygon),
            Err(e) => {
                tracing::warn!("{e}, dropping subpath");
                self.shape.note_dropped_subpath();
            }
        }
    }

    fn push(&mut self, p: Point) {
        if let Some(active) = &mut self.active {
            active.push(p);
        }
    }

    fn move_to(&mut self) -> Option<()> {
        let p = self.tokens.pair()?;
        self.push(p);
        self.current = p;
        self.start = p;
        Some(())
    }

    fn line_to(&mut self) -> Option<()> {
        let p = self.tokens.pair()?;
        self.push(p);
        self.current = p;
        Some(())
    }

    fn horizontal_to(&mut self) -> Option<()> {
        let x = self.tokens.number()?;
        let p = Point::new(x, self.current.y);
        self.push(p);
        self.current = p;
        Some(())
    }

    fn vertical_to(&mut self) -> Option<()> {
        let y = self.tokens.number()?;
        let p = Point::new(self.current.x, y);
        self.push(p);
        self.current = p;
        Some(())
    }

    fn curve_to(&mut self) -> Option<()> {
        let p1 = self.tokens.pair()?;
        let p2 = self.tokens.pair()?;
        let p3 = self.tokens.pair()?;
        let curve = CubicBez::new(self.current, p1, p2, p3);
        for p in flatten_cubic(&curve) {
            self.push(p);
        }
        self.current = p3;
        Some(())
    }

    fn close(&mut self) {
        let start = self.start;
        if let Some(active) = &mut self.active {
            if !active.is_empty() {
                active.push(start);
            }
        }
    }

    fn finish(mut self) -> CompoundShape {
        if let Some(last) = self.active.take() {
            if !last.is_empty() && self.shape.push(last).is_err() {
                tracing::warn!("subpath limit reached, dropping final subpath");
            }
        }
        self.shape
    }
}

/// Sample a cubic at [`CURVE_SAMPLES`] evenly spaced parameter values.
pub fn flatten_cubic(curve: &CubicBez) -> impl Iterator<Item = Point> + '_ {
    let last = (CURVE_SAMPLES - 1) as f64;
    (0..CURVE_SAMPLES).map(move |i| curve.eval(i as f64 / last))
}

/// Byte cursor over path data.
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            data: data.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_whitespace() || b == b',')
        {
            self.pos += 1;
        }
    }

    /// Advance to the next command letter or the end of input.
    fn skip_to_command(&mut self) {
        while self.peek().is_some_and(|b| !b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Read a decimal number: optional sign, digits, optional fraction and
    /// optional exponent, after any whitespace or commas.
    ///
    /// Leaves the cursor in place and returns `None` if there is no number.
    fn number(&mut self) -> Option<f64> {
        self.skip_separators();
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut mantissa = self.digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            mantissa += self.digits();
        }
        if mantissa == 0 {
            self.pos = start;
            return None;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let before_exponent = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                self.pos = before_exponent;
            }
        }
        let text = core::str::from_utf8(&self.data[start..self.pos]).ok()?;
        match text.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                self.pos = start;
                None
            }
        }
    }

    fn pair(&mut self) -> Option<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Some(Point::new(x, y))
    }
}
