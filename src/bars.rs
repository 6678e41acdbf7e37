//! Bar and space widths of an encoded symbol sequence.
use arrayvec::ArrayVec;

use crate::patterns::{PATTERNS, STOP_BAR};

/// Number of empty modules rendered on each side by [Bars::unicode].
pub const QUIET_ZONE: usize = 10;

/// Module widths of a barcode, alternating bar and space, starting with a bar.
///
/// The last entry is the terminating bar of the STOP pattern, so the number
/// of widths is always odd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bars {
    widths: Vec<u8>,
    total: u32,
}

/// A bar followed by a space, both given in modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    pub bar: u8,
    pub space: u8,
}

impl Bars {
    /// Expand symbol values into their bar patterns.
    ///
    /// The symbols must have been produced by the encoder, values above 106 panic.
    pub(crate) fn from_symbols(symbols: &[u8]) -> Self {
        let mut widths = Vec::with_capacity(symbols.len() * 6 + 1);
        for symbol in symbols {
            widths.extend_from_slice(&PATTERNS[*symbol as usize]);
        }
        widths.push(STOP_BAR);
        let total = widths.iter().map(|w| *w as u32).sum();
        Self { widths, total }
    }

    pub fn widths(&self) -> &[u8] {
        &self.widths
    }

    /// Width of the whole barcode in modules, no quiet zone included.
    pub fn total_width(&self) -> u32 {
        self.total
    }

    /// Iterate over (bar, space) pairs. The final bar has no space.
    pub fn modules(&self) -> impl Iterator<Item = Module> + '_ {
        self.widths.chunks(2).map(|pair| Module {
            bar: pair[0],
            space: pair.get(1).copied().unwrap_or(0),
        })
    }

    /// Compute a unicode representation with block characters.
    ///
    /// Two modules share one character, the quiet zone is included.
    /// Meant for previews in a terminal.
    pub fn unicode(&self) -> String {
        let modules = self.total as usize + 2 * QUIET_ZONE;
        let mut buf = Blocks(String::with_capacity((modules / 2 + 1) * 3), ArrayVec::new());
        for _ in 0..QUIET_ZONE {
            buf.push(false);
        }
        for module in self.modules() {
            for _ in 0..module.bar {
                buf.push(true);
            }
            for _ in 0..module.space {
                buf.push(false);
            }
        }
        for _ in 0..QUIET_ZONE {
            buf.push(false);
        }
        buf.into_string()
    }
}

struct Blocks(String, ArrayVec<bool, 2>);

impl Blocks {
    fn push(&mut self, dark: bool) {
        self.1.push(dark);
        if self.1.is_full() {
            self.0.push(match (self.1[0], self.1[1]) {
                (true, true) => '█',
                (true, false) => '▌',
                (false, true) => '▐',
                (false, false) => ' ',
            });
            self.1.clear();
        }
    }

    fn into_string(mut self) -> String {
        if !self.1.is_empty() {
            self.push(false);
        }
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_symbols() {
        // "1234" in code set C
        let bars = Bars::from_symbols(&[105, 12, 34, 82, 106]);
        #[rustfmt::skip]
        let expected: [u8; 31] = [
            2, 1, 1, 2, 3, 2,
            1, 1, 2, 2, 3, 2,
            1, 3, 1, 1, 2, 3,
            1, 2, 1, 2, 4, 1,
            2, 3, 3, 1, 1, 1,
            2,
        ];
        assert_eq!(bars.widths(), &expected[..]);
        assert_eq!(bars.total_width(), 57);
    }

    #[test]
    fn test_modules() {
        let bars = Bars::from_symbols(&[106]);
        let modules: Vec<Module> = bars.modules().collect();
        assert_eq!(
            modules,
            vec![
                Module { bar: 2, space: 3 },
                Module { bar: 3, space: 1 },
                Module { bar: 1, space: 1 },
                Module { bar: 2, space: 0 },
            ]
        );
    }

    #[test]
    fn test_unicode() {
        let bars = Bars::from_symbols(&[106]);
        // 10 + 13 + 10 modules, rounded up to 17 characters
        assert_eq!(bars.unicode(), "     █ ▐█▐▐▌     ");
    }
}
