//! Re-parameterization of an ellipse under an affine map.
//!
//! An arc's `(rx, ry, x-axis-angle)` triple describes the image of the
//! unit circle under `scale(rx, ry)` then `rotate(ax)`. Applying a
//! further matrix `m` gives another ellipse; its new radii and axis
//! angle are recovered from the eigen-decomposition of `ma · maᵗ`
//! where `ma = m · rotate(ax) · scale(rx, ry)`.

// precision below which an ellipse is treated as a circle
const EPSILON: f64 = 1e-10;

/// An ellipse centred at the origin: radii `rx`, `ry` and x-axis
/// rotation `ax` in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub rx: f64,
    pub ry: f64,
    pub ax: f64,
}

impl Ellipse {
    pub fn new(rx: f64, ry: f64, ax: f64) -> Self {
        Self { rx, ry, ax }
    }

    /// Apply the linear part of `m` (translation is irrelevant for
    /// radii and axis angle), recomputing `(rx, ry, ax)` in place.
    pub fn transform(&mut self, m: [f64; 6]) -> &mut Self {
        let (s, c) = self.ax.to_radians().sin_cos();
        let ma = [
            self.rx * (m[0] * c + m[2] * s),
            self.rx * (m[1] * c + m[3] * s),
            self.ry * (-m[0] * s + m[2] * c),
            self.ry * (-m[1] * s + m[3] * c),
        ];

        // ma · maᵗ = [ j l ]
        //            [ l k ]
        let j = ma[0] * ma[0] + ma[2] * ma[2];
        let k = ma[1] * ma[1] + ma[3] * ma[3];

        // discriminant of the characteristic polynomial
        let mut d = ((ma[0] - ma[3]) * (ma[0] - ma[3]) + (ma[2] + ma[1]) * (ma[2] + ma[1]))
            * ((ma[0] + ma[3]) * (ma[0] + ma[3]) + (ma[2] - ma[1]) * (ma[2] - ma[1]));

        // mean eigenvalue
        let mean = (j + k) / 2.;

        // near-degenerate discriminant: the angle extraction is
        // unstable, so treat the image as a circle
        if d < EPSILON * mean {
            self.rx = mean.sqrt();
            self.ry = self.rx;
            self.ax = 0.;
            return self;
        }

        let l = ma[0] * ma[1] + ma[2] * ma[3];
        d = d.sqrt();

        // eigenvalues, l1 >= l2
        let l1 = mean + d / 2.;
        let l2 = mean - d / 2.;

        // the axis angle is the argument of the l1 eigenvector
        self.ax = if l.abs() < EPSILON && (l1 - k).abs() < EPSILON {
            90.
        } else {
            (if l.abs() > (l1 - k).abs() {
                (l1 - j) / l
            } else {
                l / (l1 - k)
            })
            .atan()
            .to_degrees()
        };

        if self.ax >= 0. {
            // ax in [0, 90]
            self.rx = l1.sqrt();
            self.ry = l2.sqrt();
        } else {
            // ax in (-90, 0): exchange axes
            self.ax += 90.;
            self.rx = l2.sqrt();
            self.ry = l1.sqrt();
        }

        self
    }

    /// True when one radius vanishes relative to the other, i.e. the
    /// ellipse collapses to a line.
    pub fn is_degenerate(&self) -> bool {
        self.rx < EPSILON * self.ry || self.ry < EPSILON * self.rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_identity() {
        let mut e = Ellipse::new(10., 5., 0.);
        e.transform([1., 0., 0., 1., 0., 0.]);
        assert_close(e.rx, 10.);
        assert_close(e.ry, 5.);
        assert_close(e.ax, 0.);
    }

    #[test]
    fn test_rotation() {
        let rad = 45f64.to_radians();
        let (s, c) = rad.sin_cos();
        let mut e = Ellipse::new(10., 5., 0.);
        e.transform([c, s, -s, c, 0., 0.]);
        assert_close(e.rx, 10.);
        assert_close(e.ry, 5.);
        assert_close(e.ax, 45.);
    }

    #[test]
    fn test_circle_stays_circle() {
        // rotating a circle must not introduce an axis angle
        let rad = 30f64.to_radians();
        let (s, c) = rad.sin_cos();
        let mut e = Ellipse::new(7., 7., 0.);
        e.transform([c, s, -s, c, 0., 0.]);
        assert_close(e.rx, 7.);
        assert_close(e.ry, 7.);
        assert_eq!(e.ax, 0.);
    }

    #[test]
    fn test_scale() {
        let mut e = Ellipse::new(10., 5., 0.);
        e.transform([2., 0., 0., 2., 0., 0.]);
        assert_close(e.rx, 20.);
        assert_close(e.ry, 10.);
    }

    #[test]
    fn test_flatten_to_line() {
        let mut e = Ellipse::new(10., 5., 0.);
        e.transform([1., 0., 0., 0., 0., 0.]);
        assert!(e.is_degenerate());

        let e = Ellipse::new(10., 5., 0.);
        assert!(!e.is_degenerate());
    }
}
