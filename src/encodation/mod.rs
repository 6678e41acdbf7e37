//! Translation of a payload into Code 128 symbol values.
use core::ops::Range;

use arrayvec::ArrayVec;

use crate::code_set::{classify, pair_value, CodeSet};
use crate::error::EncodingError;

pub(crate) mod planner;


pub use planner::{Lookahead, Planner, Segment};

// The following is not implemented
// const FNC1: u8 = 102;
// const FNC2: u8 = 97;
// const FNC3: u8 = 96;

pub(crate) const SHIFT: u8 = 98;
pub(crate) const CODE_C: u8 = 99;
pub(crate) const CODE_B: u8 = 100;
pub(crate) const CODE_A: u8 = 101;
pub(crate) const START_A: u8 = 103;
pub(crate) const START_B: u8 = 104;
pub(crate) const START_C: u8 = 105;
pub(crate) const STOP: u8 = 106;

const CHECKSUM_MODULUS: usize = 103;

/// Symbol values written so far together with the running checksum.
#[derive(Debug)]
struct CheckedSymbols {
    symbols: Vec<u8>,
    checksum: usize,
}

impl CheckedSymbols {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity),
            checksum: 0,
        }
    }

    fn push(&mut self, symbol: u8) {
        // the start symbol and the first data symbol both have weight 1
        let weight = self.symbols.len().max(1) % CHECKSUM_MODULUS;
        self.checksum = (self.checksum + weight * symbol as usize) % CHECKSUM_MODULUS;
        self.symbols.push(symbol);
    }

    fn finish(mut self) -> Vec<u8> {
        let checksum = self.checksum as u8;
        self.symbols.push(checksum);
        self.symbols.push(STOP);
        self.symbols
    }
}

/// Turn `offset` and `count` into a range of `data`.
///
/// A `count` reaching past the end is clamped.
pub(crate) fn payload_range(
    data: &[u8],
    offset: usize,
    count: Option<usize>,
) -> Result<Range<usize>, EncodingError> {
    if data.is_empty() {
        return Err(EncodingError::EmptyPayload);
    }
    let count = count.unwrap_or_else(|| data.len().saturating_sub(offset));
    if count == 0 || offset >= data.len() {
        return Err(EncodingError::InvalidRange {
            offset,
            count,
            len: data.len(),
        });
    }
    Ok(offset..offset.saturating_add(count).min(data.len()))
}

pub(crate) struct Encoder<'a> {
    data: &'a [u8],
    symbols: CheckedSymbols,
    active: Option<CodeSet>,
}

impl<'a> Encoder<'a> {
    /// Encode `data[range]` into symbol values, including checksum and STOP.
    pub(crate) fn encode(data: &'a [u8], range: Range<usize>) -> Result<Vec<u8>, EncodingError> {
        // fail early, before planning
        if let Some((i, ch)) = data[range.clone()]
            .iter()
            .enumerate()
            .find(|(_i, ch)| classify(**ch).is_none())
        {
            return Err(EncodingError::UnencodableCharacter {
                offset: range.start + i,
                byte: *ch,
            });
        }

        let mut encoder = Self {
            data,
            // one symbol per character is the worst case, plus a few switches
            symbols: CheckedSymbols::with_capacity(range.len() + 8),
            active: None,
        };
        for segment in Planner::new(data, range) {
            encoder.write_segment(&segment?)?;
        }
        if encoder.active.is_none() {
            return Err(EncodingError::Internal {
                reason: "no segment was planned",
                offset: 0,
            });
        }
        let symbols = encoder.symbols.finish();
        log::debug!("encoded {} symbols", symbols.len());
        Ok(symbols)
    }

    fn write_segment(&mut self, segment: &Segment) -> Result<(), EncodingError> {
        let mut pos = segment.start;
        if let Some(lead_in) = segment.lead_in {
            self.switch_to(lead_in);
            let value = self.value_at(pos, lead_in)?;
            self.symbols.push(value);
            pos += 1;
        }

        if segment.shift {
            let shifted = self.active.and_then(|active| active.shifted());
            if shifted != Some(segment.code_set) || segment.len() != 1 {
                return Err(EncodingError::Internal {
                    reason: "shift outside of a single A/B character",
                    offset: pos,
                });
            }
            for symbol in self.shifted_char(pos, segment.code_set)? {
                self.symbols.push(symbol);
            }
            return Ok(());
        }

        self.switch_to(segment.code_set);
        match segment.code_set {
            CodeSet::C => {
                let data = self.data;
                for (i, pair) in data[pos..segment.end].chunks(2).enumerate() {
                    let offset = pos + 2 * i;
                    let value = match pair {
                        [a, b] => pair_value(*a, *b)
                            .ok_or(EncodingError::InvalidDigitPair { offset })?,
                        _ => {
                            return Err(EncodingError::Internal {
                                reason: "odd number of digits in code set C",
                                offset,
                            })
                        }
                    };
                    self.symbols.push(value);
                }
            }
            set => {
                for offset in pos..segment.end {
                    let value = self.value_at(offset, set)?;
                    self.symbols.push(value);
                }
            }
        }
        Ok(())
    }

    /// Write the START or CODE symbol if `set` is not active.
    fn switch_to(&mut self, set: CodeSet) {
        match self.active {
            None => self.symbols.push(set.start_symbol()),
            Some(active) if active != set => {
                log::trace!("switch from {:?} to {:?}", active, set);
                self.symbols.push(set.switch_symbol());
            }
            Some(_) => return,
        }
        self.active = Some(set);
    }

    fn shifted_char(&self, offset: usize, set: CodeSet) -> Result<ArrayVec<u8, 2>, EncodingError> {
        let mut out = ArrayVec::new();
        out.push(SHIFT);
        out.push(self.value_at(offset, set)?);
        Ok(out)
    }

    fn value_at(&self, offset: usize, set: CodeSet) -> Result<u8, EncodingError> {
        set.value_of(self.data[offset])
            .ok_or(EncodingError::Internal {
                reason: "character not in active code set",
                offset,
            })
    }
}

#[test]
fn test_checksum_weights() {
    let mut symbols = CheckedSymbols::with_capacity(4);
    // "PJJ" in code set A
    for s in [START_A, 48, 42, 42] {
        symbols.push(s);
    }
    assert_eq!(symbols.checksum, (103 + 48 + 2 * 42 + 3 * 42) % 103);
    assert_eq!(
        symbols.finish(),
        vec![START_A, 48, 42, 42, ((103 + 48 + 84 + 126) % 103) as u8, STOP]
    );
}

#[test]
fn test_invalid_digit_pair() {
    let mut encoder = Encoder {
        data: b"x1a",
        symbols: CheckedSymbols::with_capacity(4),
        active: Some(CodeSet::C),
    };
    let segment = Segment {
        code_set: CodeSet::C,
        start: 1,
        end: 3,
        lead_in: None,
        shift: false,
    };
    let err = encoder.write_segment(&segment).unwrap_err();
    assert_eq!(err, EncodingError::InvalidDigitPair { offset: 1 });
    assert_eq!(err.kind(), crate::ErrorKind::Format);

    let segment = Segment {
        end: 2,
        ..segment
    };
    let err = encoder.write_segment(&segment).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::Invariant);
}

#[test]
fn test_payload_range() {
    assert_eq!(payload_range(b"abc", 0, None), Ok(0..3));
    assert_eq!(payload_range(b"abc", 1, Some(10)), Ok(1..3));
    assert_eq!(payload_range(b"abc", 2, None), Ok(2..3));
    assert_eq!(payload_range(b"", 0, None), Err(EncodingError::EmptyPayload));
    assert_eq!(
        payload_range(b"abc", 3, None),
        Err(EncodingError::InvalidRange {
            offset: 3,
            count: 0,
            len: 3
        })
    );
    assert_eq!(
        payload_range(b"abc", 0, Some(0)),
        Err(EncodingError::InvalidRange {
            offset: 0,
            count: 0,
            len: 3
        })
    );
    assert_eq!(payload_range(b"abc", 1, Some(usize::MAX)), Ok(1..3));
}
