//! Code 128 barcode encoding.
//!
//! A Code 128 barcode is a sequence of symbol values between 0 and 106.
//! Each symbol is printed as three bars and three spaces covering eleven
//! modules. The symbology has three code sets: A for control characters
//! and upper case ASCII, B for printable ASCII, and C which packs two
//! decimal digits into one symbol. The encoder in this crate switches
//! between them to keep the barcode short.
//!
//! The encoding runs in stages:
//!
//! 1. plan the code set segments (see [data::encodation_plan]),
//! 2. emit START, the segment symbols with CODE and SHIFT symbols
//!    in between, the checksum and STOP ([encode]),
//! 3. expand the symbols into bar and space widths ([to_bars]),
//! 4. draw the bars as a vector path ([to_path]).
//!
//! # Example
//!
//! ```rust
//! let symbols = code128::encode(b"1234", 0, 4).unwrap();
//! assert_eq!(symbols, vec![105, 12, 34, 82, 106]);
//!
//! let code = code128::Code128::encode(b"PJJ123C").unwrap();
//! let path = code.path(&code128::Geometry::new()).unwrap();
//! assert!(path.starts_with("M0,0H2V34H0Z"));
//! ```
mod bars;
mod code_set;
mod encodation;
mod error;
mod path;
mod patterns;

pub mod data;

pub use bars::{Bars, Module, QUIET_ZONE};
pub use code_set::{classify, CodeSet};
pub use error::{EncodingError, ErrorKind};
pub use path::{path_to_string, Geometry, PathSegment};
pub use patterns::{pattern, PATTERNS};

use encodation::{payload_range, Encoder};

/// An encoded Code 128 barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code128 {
    symbols: Vec<u8>,
}

impl Code128 {
    /// Encode all of `data`.
    pub fn encode(data: &[u8]) -> Result<Self, EncodingError> {
        Self::encode_range(data, 0, None)
    }

    /// Encode a string, only ASCII characters can be encoded.
    pub fn encode_str(text: &str) -> Result<Self, EncodingError> {
        Self::encode(text.as_bytes())
    }

    /// Encode `count` bytes of `data` starting at `offset`.
    ///
    /// `count = None` encodes until the end. A count reaching past the end
    /// is cut off at the end.
    pub fn encode_range(
        data: &[u8],
        offset: usize,
        count: Option<usize>,
    ) -> Result<Self, EncodingError> {
        let range = payload_range(data, offset, count)?;
        let symbols = Encoder::encode(data, range)?;
        Ok(Self { symbols })
    }

    /// Symbol values, beginning with START and ending with checksum and STOP.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn into_symbols(self) -> Vec<u8> {
        self.symbols
    }

    /// The checksum symbol.
    pub fn checksum(&self) -> u8 {
        self.symbols[self.symbols.len() - 2]
    }

    pub fn bars(&self) -> Bars {
        Bars::from_symbols(&self.symbols)
    }

    pub fn path_segments(&self, geometry: &Geometry) -> Result<Vec<PathSegment>, EncodingError> {
        self.bars().path(geometry)
    }

    /// Get the bars as path string, see [to_path].
    pub fn path(&self, geometry: &Geometry) -> Result<String, EncodingError> {
        self.bars().path_string(geometry)
    }

    /// Render as unicode block characters, see [Bars::unicode].
    pub fn unicode(&self) -> String {
        self.bars().unicode()
    }
}

/// Encode `count` bytes of `data` starting at `offset` into symbol values.
///
/// The result starts with a START symbol and ends with the checksum and STOP.
pub fn encode(data: &[u8], offset: usize, count: usize) -> Result<Vec<u8>, EncodingError> {
    Code128::encode_range(data, offset, Some(count)).map(Code128::into_symbols)
}

/// Encode and expand into bar and space widths.
///
/// `count = None` encodes until the end of `data`.
pub fn to_bars(data: &[u8], offset: usize, count: Option<usize>) -> Result<Bars, EncodingError> {
    Ok(Code128::encode_range(data, offset, count)?.bars())
}

/// Encode and draw as a vector path.
///
/// The path consists of absolute `M`, `H`, `V` and `Z` commands, one closed
/// rectangle per bar. Numbers are always written with `.` as decimal separator.
///
/// ```rust
/// # use code128::{to_path, Geometry};
/// let path = to_path(b"1234", 0, None, &Geometry::new().at(10.0, 5.0).with_height(20.0)).unwrap();
/// assert!(path.starts_with("M10,5H12V25H10ZM13,5H14V25H13Z"));
/// ```
pub fn to_path(
    data: &[u8],
    offset: usize,
    count: Option<usize>,
    geometry: &Geometry,
) -> Result<String, EncodingError> {
    Code128::encode_range(data, offset, count)?.path(geometry)
}
