//! Vector path output for rendering engines such as SVG or WPF.
use core::fmt;

use crate::bars::Bars;
use crate::error::EncodingError;

/// Default height of the bars relative to the width of the barcode.
const DEFAULT_ASPECT: f64 = 0.3;

/// Placement and size of a rendered barcode.
///
/// Without a width each module is one unit wide. Without a height the
/// bars are 30% of the barcode width high, rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub left: f64,
    pub top: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the top left corner to (`left`, `top`).
    pub fn at(self, left: f64, top: f64) -> Self {
        Self { left, top, ..self }
    }

    /// Scale the barcode to the total `width`.
    pub fn with_width(self, width: f64) -> Self {
        Self {
            width: Some(width),
            ..self
        }
    }

    pub fn with_height(self, height: f64) -> Self {
        Self {
            height: Some(height),
            ..self
        }
    }

    fn check(&self) -> Result<(), EncodingError> {
        let positive = |v: Option<f64>| v.map_or(true, |v| v.is_finite() && v > 0.0);
        if self.left.is_finite() && self.top.is_finite() && positive(self.width) && positive(self.height)
        {
            Ok(())
        } else {
            Err(EncodingError::InvalidGeometry)
        }
    }
}

/// Segment of a vector graphics path, all coordinates are absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Start a new subpath at (x, y), like `M` in SVG.
    Move(f64, f64),
    /// Horizontal line to x, like `H` in SVG.
    Horizontal(f64),
    /// Vertical line to y, like `V` in SVG.
    Vertical(f64),
    /// Close the current subpath, like `Z` in SVG.
    Close,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display of f64 never depends on a locale and omits ".0"
        match self {
            Self::Move(x, y) => write!(f, "M{},{}", x, y),
            Self::Horizontal(x) => write!(f, "H{}", x),
            Self::Vertical(y) => write!(f, "V{}", y),
            Self::Close => write!(f, "Z"),
        }
    }
}

impl Bars {
    /// Get drawing instructions for the bars.
    ///
    /// Each bar becomes one closed rectangle, spaces are skipped.
    pub fn path(&self, geometry: &Geometry) -> Result<Vec<PathSegment>, EncodingError> {
        geometry.check()?;
        let total = self.total_width() as f64;
        let (module, width) = match geometry.width {
            Some(width) => (width / total, width),
            None => (1.0, total),
        };
        let top = geometry.top;
        let bottom = match geometry.height {
            Some(height) => top + height,
            None => top + (width * DEFAULT_ASPECT).ceil(),
        };
        let x = |modules: u32| geometry.left + modules as f64 * module;

        let mut segments = Vec::with_capacity((self.widths().len() / 2 + 1) * 5);
        let mut pos = 0;
        for (i, w) in self.widths().iter().map(|w| *w as u32).enumerate() {
            if i % 2 == 0 {
                let (x0, x1) = (x(pos), x(pos + w));
                segments.extend_from_slice(&[
                    PathSegment::Move(x0, top),
                    PathSegment::Horizontal(x1),
                    PathSegment::Vertical(bottom),
                    PathSegment::Horizontal(x0),
                    PathSegment::Close,
                ]);
            }
            pos += w;
        }
        Ok(segments)
    }

    /// Get the path as a string of `M`, `H`, `V` and `Z` commands.
    pub fn path_string(&self, geometry: &Geometry) -> Result<String, EncodingError> {
        Ok(path_to_string(&self.path(geometry)?))
    }
}

pub fn path_to_string(segments: &[PathSegment]) -> String {
    use fmt::Write;

    let mut out = String::with_capacity(segments.len() * 6);
    for segment in segments {
        // writing to a String can not fail
        let _ = write!(out, "{}", segment);
    }
    out
}
