//! SVG `transform` attribute parsing.
//!
//! Deliberately permissive, matching browser handling of the
//! attribute: unknown function names and calls with the wrong number
//! of arguments are skipped rather than failing the whole string.

use crate::matrix::Matrix;

/// Parse a `transform` attribute value into a single composed matrix.
///
/// Transforms are queued in document order, so
/// `translate(10,0) scale(2)` maps x to `2x + 10`.
pub fn parse_transform(value: &str) -> Matrix {
    let mut matrix = Matrix::new();

    for item in value.split_inclusive(')') {
        let item = item
            .trim_start_matches([',', ' ', '\t', '\n', '\r'])
            .trim();
        if item.is_empty() {
            continue;
        }
        let Some(body) = item.strip_suffix(')') else {
            continue;
        };
        let Some((name, args)) = body.split_once('(') else {
            continue;
        };
        // junk before the function name is skipped, not fatal
        let name = name
            .trim_end()
            .rsplit(|c: char| !c.is_ascii_alphabetic())
            .next()
            .unwrap_or_default();
        let args: Vec<f64> = args
            .split([',', ' ', '\t', '\n', '\r'])
            .filter(|v| !v.is_empty())
            .map(|v| v.parse().unwrap_or(0.))
            .collect();

        matrix = match (name, args.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => matrix.matrix([a, b, c, d, e, f]),
            ("translate", &[tx]) => matrix.translate(tx, 0.),
            ("translate", &[tx, ty]) => matrix.translate(tx, ty),
            ("scale", &[s]) => matrix.scale(s, s),
            ("scale", &[sx, sy]) => matrix.scale(sx, sy),
            ("rotate", &[angle]) => matrix.rotate(angle, 0., 0.),
            ("rotate", &[angle, cx, cy]) => matrix.rotate(angle, cx, cy),
            ("skewX", &[angle]) => matrix.skew_x(angle),
            ("skewY", &[angle]) => matrix.skew_y(angle),
            // wrong arity or unknown name: ignore the call
            _ => matrix,
        };
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_scale_order() {
        let mut m = parse_transform("translate(10,0) scale(2)");
        assert_eq!(m.to_array(), [2., 0., 0., 2., 10., 0.]);
        assert_eq!(m.apply(1., 1., false), (12., 2.));
    }

    #[test]
    fn test_separators() {
        let mut a = parse_transform("translate( 10 , 20 ) , scale(2,3)");
        let mut b = parse_transform("translate(10 20)scale(2 3)");
        assert_eq!(a.to_array(), b.to_array());
    }

    #[test]
    fn test_single_arg_forms() {
        let mut m = parse_transform("translate(5)");
        assert_eq!(m.to_array(), [1., 0., 0., 1., 5., 0.]);

        let mut m = parse_transform("scale(3)");
        assert_eq!(m.to_array(), [3., 0., 0., 3., 0., 0.]);
    }

    #[test]
    fn test_matrix_form() {
        let mut m = parse_transform("matrix(1 2 3 4 5 6)");
        assert_eq!(m.to_array(), [1., 2., 3., 4., 5., 6.]);
    }

    #[test]
    fn test_wrong_arity_ignored() {
        let mut m = parse_transform("translate(1,2,3) scale(2)");
        assert_eq!(m.to_array(), [2., 0., 0., 2., 0., 0.]);

        let m = parse_transform("skewX(1 2) rotate(1 2)");
        assert!(m.is_empty());
    }

    #[test]
    fn test_unknown_name_ignored() {
        let mut m = parse_transform("frobnicate(42) junk translate(1,1)");
        assert_eq!(m.to_array(), [1., 0., 0., 1., 1., 1.]);
    }

    #[test]
    fn test_empty() {
        assert!(parse_transform("").is_empty());
        assert!(parse_transform("  ,  ").is_empty());
    }
}
