//! Conversion of elliptical arcs to cubic Bézier curves.
//!
//! Implements the endpoint-to-center parameterization from the SVG
//! implementation notes
//! (<https://www.w3.org/TR/SVG11/implnote.html#ArcImplementationNotes>),
//! then approximates each ≤90° span of the unit circle with a single
//! cubic using the 4/3·tan(δ/4) tangent-length construction.

use std::f64::consts::TAU;

/// Angle between two unit vectors, signed by their cross product.
fn unit_vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let sign = if ux * vy - uy * vx < 0. { -1. } else { 1. };
    // clamp: rounding can push the dot product just outside [-1, 1]
    let dot = (ux * vx + uy * vy).clamp(-1., 1.);
    sign * dot.acos()
}

/// Endpoint to center parameterization: returns
/// `(cx, cy, theta1, delta_theta)`.
#[allow(clippy::too_many_arguments)]
fn get_arc_center(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    large_arc: bool,
    sweep: bool,
    rx: f64,
    ry: f64,
    sin_phi: f64,
    cos_phi: f64,
) -> (f64, f64, f64, f64) {
    // move the origin to the midpoint of the endpoints and rotate to
    // line up the ellipse axes with the coordinate axes
    let x1p = cos_phi * (x1 - x2) / 2. + sin_phi * (y1 - y2) / 2.;
    let y1p = -sin_phi * (x1 - x2) / 2. + cos_phi * (y1 - y2) / 2.;

    let rx_sq = rx * rx;
    let ry_sq = ry * ry;
    let x1p_sq = x1p * x1p;
    let y1p_sq = y1p * y1p;

    // center of the ellipse in the primed coordinate system
    let mut radicant = (rx_sq * ry_sq) - (rx_sq * y1p_sq) - (ry_sq * x1p_sq);
    if radicant < 0. {
        // rounding errors can make this slightly negative
        radicant = 0.;
    }
    radicant /= (rx_sq * y1p_sq) + (ry_sq * x1p_sq);
    radicant = radicant.sqrt() * if large_arc == sweep { -1. } else { 1. };

    let cxp = radicant * rx / ry * y1p;
    let cyp = radicant * -ry / rx * x1p;

    // back to the original coordinate system
    let cx = cos_phi * cxp - sin_phi * cyp + (x1 + x2) / 2.;
    let cy = sin_phi * cxp + cos_phi * cyp + (y1 + y2) / 2.;

    let v1x = (x1p - cxp) / rx;
    let v1y = (y1p - cyp) / ry;
    let v2x = (-x1p - cxp) / rx;
    let v2y = (-y1p - cyp) / ry;

    let theta1 = unit_vector_angle(1., 0., v1x, v1y);
    let mut delta_theta = unit_vector_angle(v1x, v1y, v2x, v2y);

    if !sweep && delta_theta > 0. {
        delta_theta -= TAU;
    }
    if sweep && delta_theta < 0. {
        delta_theta += TAU;
    }

    (cx, cy, theta1, delta_theta)
}

/// One cubic segment approximating a unit-circle arc from `theta1`
/// spanning `delta_theta`, see
/// <http://math.stackexchange.com/questions/873224>.
fn approximate_unit_arc(theta1: f64, delta_theta: f64) -> [f64; 8] {
    let alpha = 4. / 3. * (delta_theta / 4.).tan();

    let x1 = theta1.cos();
    let y1 = theta1.sin();
    let x2 = (theta1 + delta_theta).cos();
    let y2 = (theta1 + delta_theta).sin();

    [
        x1,
        y1,
        x1 - y1 * alpha,
        y1 + x1 * alpha,
        x2 + y2 * alpha,
        y2 - x2 * alpha,
        x2,
        y2,
    ]
}

/// Convert an arc from `(x1, y1)` to `(x2, y2)` into cubic curves,
/// each returned as eight numbers: start point, two control points,
/// end point.
///
/// Degenerate arcs (coincident endpoints or a zero radius) return an
/// empty list.
#[allow(clippy::too_many_arguments)]
pub fn arc_to_cubic_curves(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    large_arc: bool,
    sweep: bool,
    rx: f64,
    ry: f64,
    phi: f64,
) -> Vec<[f64; 8]> {
    let (sin_phi, cos_phi) = (phi * TAU / 360.).sin_cos();

    let x1p = cos_phi * (x1 - x2) / 2. + sin_phi * (y1 - y2) / 2.;
    let y1p = -sin_phi * (x1 - x2) / 2. + cos_phi * (y1 - y2) / 2.;

    if (x1p == 0. && y1p == 0.) || rx == 0. || ry == 0. {
        return vec![];
    }

    let mut rx = rx.abs();
    let mut ry = ry.abs();

    // compensate out-of-range radii
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1. {
        rx *= lambda.sqrt();
        ry *= lambda.sqrt();
    }

    let (cx, cy, theta1, delta_theta) =
        get_arc_center(x1, y1, x2, y2, large_arc, sweep, rx, ry, sin_phi, cos_phi);

    // split into segments of at most 90° each
    let segments = ((delta_theta.abs() / (TAU / 4.)).ceil() as usize).max(1);
    let delta = delta_theta / segments as f64;

    let mut result = Vec::with_capacity(segments);
    let mut theta = theta1;
    for _ in 0..segments {
        result.push(approximate_unit_arc(theta, delta));
        theta += delta;
    }

    // transform the unit-circle approximation back onto the ellipse
    for curve in &mut result {
        for point in curve.chunks_exact_mut(2) {
            let x = point[0] * rx;
            let y = point[1] * ry;
            point[0] = cos_phi * x - sin_phi * y + cx;
            point[1] = sin_phi * x + cos_phi * y + cy;
        }
    }

    result
}
