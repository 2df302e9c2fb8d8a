//! Affine transform queue with memoized composition.
//!
//! A `Matrix` accumulates raw 2×3 components in the order they are
//! queued; `to_array()` flattens them into a single `[a b c d e f]`
//! matrix and caches the result until another component is queued.
//! When applied to a point, the last-queued component acts first;
//! this is what makes `rotate(angle, cx, cy)` work as three queued
//! entries.

const IDENTITY: [f64; 6] = [1., 0., 0., 1., 0., 0.];

/// Standard 2×3 affine composition: `m1 · m2`.
fn combine(m1: &[f64; 6], m2: &[f64; 6]) -> [f64; 6] {
    [
        m1[0] * m2[0] + m1[2] * m2[1],
        m1[1] * m2[0] + m1[3] * m2[1],
        m1[0] * m2[2] + m1[2] * m2[3],
        m1[1] * m2[2] + m1[3] * m2[3],
        m1[0] * m2[4] + m1[2] * m2[5] + m1[4],
        m1[1] * m2[4] + m1[3] * m2[5] + m1[5],
    ]
}

#[derive(Debug, Clone, Default)]
pub struct Matrix {
    queue: Vec<[f64; 6]>,
    cache: Option<[f64; 6]>,
}

impl Matrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queue a raw matrix; identity is skipped.
    pub fn matrix(mut self, m: [f64; 6]) -> Self {
        if m != IDENTITY {
            self.cache = None;
            self.queue.push(m);
        }
        self
    }

    pub fn translate(mut self, tx: f64, ty: f64) -> Self {
        if tx != 0. || ty != 0. {
            self.cache = None;
            self.queue.push([1., 0., 0., 1., tx, ty]);
        }
        self
    }

    pub fn scale(mut self, sx: f64, sy: f64) -> Self {
        if sx != 1. || sy != 1. {
            self.cache = None;
            self.queue.push([sx, 0., 0., sy, 0., 0.]);
        }
        self
    }

    pub fn rotate(mut self, angle: f64, cx: f64, cy: f64) -> Self {
        if angle != 0. {
            self = self.translate(cx, cy);
            let (sin, cos) = angle.to_radians().sin_cos();
            self.cache = None;
            self.queue.push([cos, sin, -sin, cos, 0., 0.]);
            self = self.translate(-cx, -cy);
        }
        self
    }

    pub fn skew_x(mut self, angle: f64) -> Self {
        if angle != 0. {
            self.cache = None;
            self.queue
                .push([1., 0., angle.to_radians().tan(), 1., 0., 0.]);
        }
        self
    }

    pub fn skew_y(mut self, angle: f64) -> Self {
        if angle != 0. {
            self.cache = None;
            self.queue
                .push([1., angle.to_radians().tan(), 0., 1., 0., 0.]);
        }
        self
    }

    /// Flatten the queue into a single matrix, memoizing the result.
    pub fn to_array(&mut self) -> [f64; 6] {
        if let Some(m) = self.cache {
            return m;
        }
        let m = match self.queue.as_slice() {
            [] => IDENTITY,
            [first, rest @ ..] => rest.iter().fold(*first, |acc, m| combine(&acc, m)),
        };
        self.cache = Some(m);
        m
    }

    /// Apply the composed transform to a point. For relative deltas
    /// the translation column is dropped so offsets are not shifted.
    pub fn apply(&mut self, x: f64, y: f64, is_relative: bool) -> (f64, f64) {
        // don't change the point on an empty queue
        if self.queue.is_empty() {
            return (x, y);
        }
        let m = self.to_array();
        (
            x * m[0] + y * m[2] + if is_relative { 0. } else { m[4] },
            x * m[1] + y * m[3] + if is_relative { 0. } else { m[5] },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_skipped() {
        let m = Matrix::new()
            .matrix(IDENTITY)
            .translate(0., 0.)
            .scale(1., 1.)
            .rotate(0., 5., 5.)
            .skew_x(0.)
            .skew_y(0.);
        assert!(m.is_empty());
        let mut m = m;
        assert_eq!(m.apply(3., 4., false), (3., 4.));
    }

    #[test]
    fn test_translate_then_scale() {
        // first-queued applies to the point last
        let mut m = Matrix::new().translate(10., 0.).scale(2., 2.);
        assert_eq!(m.to_array(), [2., 0., 0., 2., 10., 0.]);
        assert_eq!(m.apply(10., 10., false), (30., 20.));
        // relative deltas ignore translation
        assert_eq!(m.apply(10., 10., true), (20., 20.));
    }

    #[test]
    fn test_rotate_around() {
        let mut m = Matrix::new().rotate(90., 10., 10.);
        let (x, y) = m.apply(20., 10., false);
        assert!((x - 10.).abs() < 1e-9);
        assert!((y - 20.).abs() < 1e-9);
    }

    #[test]
    fn test_skew() {
        let mut m = Matrix::new().skew_x(45.);
        let (x, y) = m.apply(0., 10., false);
        assert!((x - 10.).abs() < 1e-9);
        assert_eq!(y, 10.);
    }

    #[test]
    fn test_cache_invalidation() {
        let mut m = Matrix::new().translate(5., 0.);
        assert_eq!(m.to_array()[4], 5.);
        let mut m = m.translate(5., 0.);
        assert_eq!(m.to_array()[4], 10.);
    }
}
