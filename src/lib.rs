//! Parse, transform and minify SVG path data.
//!
//! The entry point is [`SvgPath`], parsed from a path-data string via
//! `FromStr`. Transform operations queue up and are applied in a
//! single pass when the result is needed, so chains of calls stay
//! cheap:
//!
//! ```
//! use pathdx::SvgPath;
//!
//! let mut path: SvgPath = "M0 0 L10 10".parse().unwrap();
//! path.translate(10., 0.).scale(2.).round(2);
//! assert_eq!(path.to_string(), "M20 0L40 20");
//! ```
//!
//! Beyond affine transforms, paths can be converted between absolute
//! and relative forms, have arcs expanded to cubic Béziers, smooth
//! shorthands made explicit, and coordinates rounded with error
//! carrying to avoid drift.

mod arc;
mod ellipse;
mod errors;
mod matrix;
mod parser;
mod path;
mod transform_attr;
mod types;

pub use arc::arc_to_cubic_curves;
pub use ellipse::Ellipse;
pub use errors::{Error, Result};
pub use matrix::Matrix;
pub use parser::parse;
pub use path::{SvgPath, Visit};
pub use transform_attr::parse_transform;
pub use types::{fstr, Segment};

/// Apply an SVG `transform` attribute string to path data, returning
/// the transformed path string.
pub fn transform_path(path_data: &str, transform: &str) -> Result<String> {
    let mut path: SvgPath = path_data.parse()?;
    path.transform(transform);
    Ok(path.to_string())
}
