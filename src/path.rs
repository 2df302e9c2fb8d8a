//! The path pipeline: an owned segment list plus a stack of pending
//! transforms, applied lazily just before any operation that needs to
//! observe concrete coordinates.

use std::fmt;
use std::str::FromStr;

use crate::arc::arc_to_cubic_curves;
use crate::ellipse::Ellipse;
use crate::errors::Error;
use crate::matrix::Matrix;
use crate::parser::parse;
use crate::transform_attr::parse_transform;
use crate::types::{fstr, Segment};

/// Outcome of one visitor call during [`SvgPath::iterate`].
///
/// `Keep` retains the (possibly mutated-in-place) segment;
/// `Replace` substitutes zero or more segments for it. An empty
/// replacement deletes the segment.
pub enum Visit {
    Keep,
    Replace(Vec<Segment>),
}

/// A parsed SVG path with a pending transform stack.
///
/// Transform-queueing methods are O(1); the queued matrices are
/// composed and applied in one segment pass when first needed.
/// Cloning is the only supported sharing mechanism.
#[derive(Debug, Clone, Default)]
pub struct SvgPath {
    segments: Vec<Segment>,
    stack: Vec<Matrix>,
}

impl FromStr for SvgPath {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Error> {
        Ok(Self {
            segments: parse(value)?,
            stack: Vec::new(),
        })
    }
}

impl SvgPath {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    // --- transform queueing -------------------------------------------

    pub fn translate(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.stack.push(Matrix::new().translate(tx, ty));
        self
    }

    /// Uniform scale.
    pub fn scale(&mut self, s: f64) -> &mut Self {
        self.scale_xy(s, s)
    }

    pub fn scale_xy(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.stack.push(Matrix::new().scale(sx, sy));
        self
    }

    /// Rotate around the origin by `angle` degrees.
    pub fn rotate(&mut self, angle: f64) -> &mut Self {
        self.rotate_around(angle, 0., 0.)
    }

    pub fn rotate_around(&mut self, angle: f64, cx: f64, cy: f64) -> &mut Self {
        self.stack.push(Matrix::new().rotate(angle, cx, cy));
        self
    }

    pub fn skew_x(&mut self, angle: f64) -> &mut Self {
        self.stack.push(Matrix::new().skew_x(angle));
        self
    }

    pub fn skew_y(&mut self, angle: f64) -> &mut Self {
        self.stack.push(Matrix::new().skew_y(angle));
        self
    }

    pub fn matrix(&mut self, m: [f64; 6]) -> &mut Self {
        self.stack.push(Matrix::new().matrix(m));
        self
    }

    /// Queue an SVG `transform` attribute string.
    pub fn transform(&mut self, transform_string: &str) -> &mut Self {
        if !transform_string.trim().is_empty() {
            self.stack.push(parse_transform(transform_string));
        }
        self
    }

    // --- segment iteration --------------------------------------------

    /// Visit every segment with its index and the absolute position
    /// reached *before* it. Unless `keep_lazy` is set, pending
    /// transforms are flushed first so the visitor observes concrete
    /// coordinates.
    ///
    /// Position tracking follows in-place mutations made by the
    /// visitor, while `Visit::Replace` leaves tracking on the original
    /// segment; replacements are spliced in afterwards.
    pub fn iterate<F>(&mut self, mut visitor: F, keep_lazy: bool) -> &mut Self
    where
        F: FnMut(&mut Segment, usize, f64, f64) -> Visit,
    {
        if !keep_lazy {
            self.evaluate_stack();
        }

        let mut replacements: Vec<(usize, Vec<Segment>)> = Vec::new();
        let (mut last_x, mut last_y) = (0., 0.);
        let (mut start_x, mut start_y) = (0., 0.);

        for (index, s) in self.segments.iter_mut().enumerate() {
            if let Visit::Replace(repl) = visitor(s, index, last_x, last_y) {
                replacements.push((index, repl));
            }

            let is_relative = s.is_relative();
            match s.cmd.to_ascii_lowercase() {
                'm' => {
                    last_x = s.args[0] + if is_relative { last_x } else { 0. };
                    last_y = s.args[1] + if is_relative { last_y } else { 0. };
                    start_x = last_x;
                    start_y = last_y;
                }
                'h' => {
                    last_x = s.args[0] + if is_relative { last_x } else { 0. };
                }
                'v' => {
                    last_y = s.args[0] + if is_relative { last_y } else { 0. };
                }
                'z' => {
                    // resolve closepath against the subpath start
                    last_x = start_x;
                    last_y = start_y;
                }
                _ => {
                    if let [.., x, y] = s.args.as_slice() {
                        last_x = x + if is_relative { last_x } else { 0. };
                        last_y = y + if is_relative { last_y } else { 0. };
                    }
                }
            }
        }

        if replacements.is_empty() {
            return self;
        }

        // replacement lengths vary, so rebuild rather than splice
        let old = std::mem::take(&mut self.segments);
        let mut repl = replacements.into_iter().peekable();
        let mut segments = Vec::with_capacity(old.len());
        for (index, seg) in old.into_iter().enumerate() {
            if repl.peek().is_some_and(|(i, _)| *i == index) {
                segments.extend(repl.next().unwrap().1);
            } else {
                segments.push(seg);
            }
        }
        self.segments = segments;
        self
    }

    // --- transform flushing -------------------------------------------

    /// Compose and apply any pending transforms. Queued matrices
    /// apply in call order: the first-queued acts on the original
    /// geometry first.
    fn evaluate_stack(&mut self) {
        if self.stack.is_empty() {
            return;
        }
        if self.stack.len() == 1 {
            let m = self.stack.pop().unwrap();
            self.apply_matrix(m);
            return;
        }
        let mut combined = Matrix::new();
        while let Some(mut m) = self.stack.pop() {
            combined = combined.matrix(m.to_array());
        }
        self.apply_matrix(combined);
    }

    fn apply_matrix(&mut self, mut m: Matrix) {
        if m.is_empty() {
            return;
        }
        let ma = m.to_array();
        let orientation_flipped = ma[0] * ma[3] - ma[1] * ma[2] < 0.;

        self.iterate(
            |s, index, x, y| {
                let result = match s.cmd {
                    // horizontal / vertical lines gain a cross-axis
                    // component under the general transform
                    'v' => {
                        let (px, py) = m.apply(0., s.args[0], true);
                        if px == 0. {
                            Segment::new('v', vec![py])
                        } else {
                            Segment::new('l', vec![px, py])
                        }
                    }
                    'V' => {
                        let (px, py) = m.apply(x, s.args[0], false);
                        let (cx, _) = m.apply(x, y, false);
                        if px == cx {
                            Segment::new('V', vec![py])
                        } else {
                            Segment::new('L', vec![px, py])
                        }
                    }
                    'h' => {
                        let (px, py) = m.apply(s.args[0], 0., true);
                        if py == 0. {
                            Segment::new('h', vec![px])
                        } else {
                            Segment::new('l', vec![px, py])
                        }
                    }
                    'H' => {
                        let (px, py) = m.apply(s.args[0], y, false);
                        let (_, cy) = m.apply(x, y, false);
                        if py == cy {
                            Segment::new('H', vec![px])
                        } else {
                            Segment::new('L', vec![px, py])
                        }
                    }
                    'a' | 'A' => {
                        // [rx, ry, rotation, large-arc, sweep, x, y]
                        let mut ellipse = Ellipse::new(s.args[0], s.args[1], s.args[2]);
                        ellipse.transform(ma);

                        // an orientation-reversing matrix flips the
                        // drawing direction
                        let sweep = if orientation_flipped {
                            if s.args[4] != 0. {
                                0.
                            } else {
                                1.
                            }
                        } else {
                            s.args[4]
                        };

                        let (px, py) = m.apply(s.args[5], s.args[6], s.cmd == 'a');

                        // empty arcs can be ignored by the renderer but
                        // must not be dropped, to keep segment indices
                        // stable; same for arcs collapsing to a line
                        let line_cmd = if s.cmd == 'a' { 'l' } else { 'L' };
                        if (s.cmd == 'A' && s.args[5] == x && s.args[6] == y)
                            || (s.cmd == 'a' && s.args[5] == 0. && s.args[6] == 0.)
                        {
                            Segment::new(line_cmd, vec![px, py])
                        } else if ellipse.is_degenerate() {
                            Segment::new(line_cmd, vec![px, py])
                        } else {
                            Segment::new(
                                s.cmd,
                                vec![ellipse.rx, ellipse.ry, ellipse.ax, s.args[3], sweep, px, py],
                            )
                        }
                    }
                    'm' => {
                        // the very first `m` acts as an absolute moveto
                        let is_relative = index > 0;
                        let (px, py) = m.apply(s.args[0], s.args[1], is_relative);
                        Segment::new('m', vec![px, py])
                    }
                    _ => {
                        let is_relative = s.is_relative();
                        let mut args = Vec::with_capacity(s.args.len());
                        for pair in s.args.chunks_exact(2) {
                            let (px, py) = m.apply(pair[0], pair[1], is_relative);
                            args.push(px);
                            args.push(py);
                        }
                        Segment::new(s.cmd, args)
                    }
                };
                Visit::Replace(vec![result])
            },
            true,
        );
    }

    // --- coordinate conversions ---------------------------------------

    /// Convert all segments to absolute coordinates.
    pub fn abs(&mut self) -> &mut Self {
        self.iterate(
            |s, _index, x, y| {
                let cmd = s.cmd;
                let upper = cmd.to_ascii_uppercase();
                if cmd == upper {
                    return Visit::Keep;
                }
                s.cmd = upper;
                match cmd {
                    // v has shifted coordinate parity
                    'v' => s.args[0] += y,
                    // arcs: only the endpoint is a coordinate
                    'a' => {
                        s.args[5] += x;
                        s.args[6] += y;
                    }
                    _ => {
                        for (i, arg) in s.args.iter_mut().enumerate() {
                            *arg += if i % 2 == 0 { x } else { y };
                        }
                    }
                }
                Visit::Keep
            },
            false,
        )
    }

    /// Convert all segments to relative coordinates. The first `M`
    /// always stays absolute.
    pub fn rel(&mut self) -> &mut Self {
        self.iterate(
            |s, index, x, y| {
                let cmd = s.cmd;
                let lower = cmd.to_ascii_lowercase();
                if cmd == lower {
                    return Visit::Keep;
                }
                if index == 0 && cmd == 'M' {
                    return Visit::Keep;
                }
                s.cmd = lower;
                match cmd {
                    'V' => s.args[0] -= y,
                    'A' => {
                        s.args[5] -= x;
                        s.args[6] -= y;
                    }
                    _ => {
                        for (i, arg) in s.args.iter_mut().enumerate() {
                            *arg -= if i % 2 == 0 { x } else { y };
                        }
                    }
                }
                Visit::Keep
            },
            false,
        )
    }

    // --- expansions ---------------------------------------------------

    /// Replace every arc with cubic Bézier curves. A degenerate arc
    /// becomes a line rather than vanishing.
    pub fn unarc(&mut self) -> &mut Self {
        self.iterate(
            |s, _index, x, y| {
                if !matches!(s.cmd, 'A' | 'a') {
                    return Visit::Keep;
                }

                let (next_x, next_y) = if s.cmd == 'a' {
                    (x + s.args[5], y + s.args[6])
                } else {
                    (s.args[5], s.args[6])
                };

                let curves = arc_to_cubic_curves(
                    x,
                    y,
                    next_x,
                    next_y,
                    s.args[3] != 0.,
                    s.args[4] != 0.,
                    s.args[0],
                    s.args[1],
                    s.args[2],
                );

                if curves.is_empty() {
                    let line_cmd = if s.cmd == 'a' { 'l' } else { 'L' };
                    return Visit::Replace(vec![Segment::new(
                        line_cmd,
                        vec![s.args[5], s.args[6]],
                    )]);
                }

                Visit::Replace(
                    curves
                        .iter()
                        .map(|c| Segment::new('C', vec![c[2], c[3], c[4], c[5], c[6], c[7]]))
                        .collect(),
                )
            },
            false,
        )
    }

    /// Expand smooth-curve shorthands `T`/`t` and `S`/`s` into
    /// explicit `Q`/`q` and `C`/`c`, reflecting the previous control
    /// point through the current point. An incompatible predecessor
    /// reflects to the current point itself.
    pub fn unshort(&mut self) -> &mut Self {
        let mut prev: Option<Segment> = None;
        self.iterate(
            |s, index, x, y| {
                // the first command is always M; nothing to reflect
                if index == 0 {
                    prev = Some(s.clone());
                    return Visit::Keep;
                }

                match s.cmd {
                    'T' | 't' => {
                        let is_relative = s.cmd == 't';
                        let (pcx, pcy) = match &prev {
                            Some(p) if p.cmd == 'Q' => (p.args[0] - x, p.args[1] - y),
                            Some(p) if p.cmd == 'q' => {
                                (p.args[0] - p.args[2], p.args[1] - p.args[3])
                            }
                            _ => (0., 0.),
                        };
                        let mut ccx = -pcx;
                        let mut ccy = -pcy;
                        if !is_relative {
                            ccx += x;
                            ccy += y;
                        }
                        let (ex, ey) = (s.args[0], s.args[1]);
                        *s = Segment::new(
                            if is_relative { 'q' } else { 'Q' },
                            vec![ccx, ccy, ex, ey],
                        );
                    }
                    'S' | 's' => {
                        let is_relative = s.cmd == 's';
                        let (pcx, pcy) = match &prev {
                            Some(p) if p.cmd == 'C' => (p.args[2] - x, p.args[3] - y),
                            Some(p) if p.cmd == 'c' => {
                                (p.args[2] - p.args[4], p.args[3] - p.args[5])
                            }
                            _ => (0., 0.),
                        };
                        let mut ccx = -pcx;
                        let mut ccy = -pcy;
                        if !is_relative {
                            ccx += x;
                            ccy += y;
                        }
                        let old = s.args.clone();
                        *s = Segment::new(
                            if is_relative { 'c' } else { 'C' },
                            vec![ccx, ccy, old[0], old[1], old[2], old[3]],
                        );
                    }
                    _ => {}
                }

                prev = Some(s.clone());
                Visit::Keep
            },
            false,
        )
    }

    // --- rounding -----------------------------------------------------

    /// Round coordinates to `precision` decimal digits, carrying the
    /// rounding error into the next relative segment so chains of
    /// relative commands don't drift. The arc rotation angle keeps
    /// two extra digits.
    pub fn round(&mut self, precision: usize) -> &mut Self {
        self.evaluate_stack();

        let pow = 10f64.powi(precision as i32);
        let pow_arc = pow * 100.;
        let quantize = |v: f64, p: f64| (v * p).round() / p;

        let (mut contour_start_dx, mut contour_start_dy) = (0., 0.);
        let (mut dx, mut dy) = (0., 0.);

        for s in &mut self.segments {
            let is_relative = s.is_relative();
            match s.cmd.to_ascii_lowercase() {
                'h' => {
                    if is_relative {
                        s.args[0] += dx;
                    }
                    dx = s.args[0] - quantize(s.args[0], pow);
                    s.args[0] = quantize(s.args[0], pow);
                }
                'v' => {
                    if is_relative {
                        s.args[0] += dy;
                    }
                    dy = s.args[0] - quantize(s.args[0], pow);
                    s.args[0] = quantize(s.args[0], pow);
                }
                'z' => {
                    // the subpath continues from its start point
                    dx = contour_start_dx;
                    dy = contour_start_dy;
                }
                'm' => {
                    if is_relative {
                        s.args[0] += dx;
                        s.args[1] += dy;
                    }
                    dx = s.args[0] - quantize(s.args[0], pow);
                    dy = s.args[1] - quantize(s.args[1], pow);
                    contour_start_dx = dx;
                    contour_start_dy = dy;
                    s.args[0] = quantize(s.args[0], pow);
                    s.args[1] = quantize(s.args[1], pow);
                }
                'a' => {
                    if is_relative {
                        s.args[5] += dx;
                        s.args[6] += dy;
                    }
                    dx = s.args[5] - quantize(s.args[5], pow);
                    dy = s.args[6] - quantize(s.args[6], pow);
                    s.args[0] = quantize(s.args[0], pow);
                    s.args[1] = quantize(s.args[1], pow);
                    s.args[2] = quantize(s.args[2], pow_arc);
                    s.args[5] = quantize(s.args[5], pow);
                    s.args[6] = quantize(s.args[6], pow);
                }
                _ => {
                    if let [.., x, y] = s.args.as_mut_slice() {
                        if is_relative {
                            *x += dx;
                            *y += dy;
                        }
                        dx = *x - quantize(*x, pow);
                        dy = *y - quantize(*y, pow);
                    }
                    for arg in s.args.iter_mut() {
                        *arg = quantize(*arg, pow);
                    }
                }
            }
        }

        self
    }

    // --- serialization ------------------------------------------------

    fn write_segments(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        let mut prev_cmd = None;

        for s in &self.segments {
            // repeated command letters are implied, but `M` always
            // restates itself (an implied M pair would be a lineto)
            let skip_cmd = !matches!(s.cmd, 'm' | 'M') && prev_cmd == Some(s.cmd);
            if !skip_cmd {
                // keep `z m` apart: some consumers mis-parse `zm`
                if s.cmd == 'm' && out.ends_with('z') {
                    out.push(' ');
                }
                out.push(s.cmd);
            }
            for arg in &s.args {
                let num = fstr(*arg);
                let after_cmd = out.ends_with(|c: char| c.is_ascii_alphabetic());
                if !out.is_empty() && !after_cmd && !num.starts_with('-') {
                    out.push(' ');
                }
                out.push_str(&num);
            }
            prev_cmd = Some(s.cmd);
        }

        f.write_str(&out)
    }
}

impl fmt::Display for SvgPath {
    /// Serialize to a minimal path string, reflecting any pending
    /// transforms.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stack.is_empty() {
            self.write_segments(f)
        } else {
            let mut flushed = self.clone();
            flushed.evaluate_stack();
            flushed.write_segments(f)
        }
    }
}
