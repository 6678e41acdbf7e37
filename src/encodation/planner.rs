//! Decides where to switch code sets.
//!
//! The planner walks the payload greedily. At each decision point it looks
//! ahead once and picks the code set of the next segment together with
//! its end. Digit runs go to code set C when they are long enough to pay
//! for the switch symbols, otherwise A or B is picked by which one is
//! forced first.
use core::ops::Range;

use flagset::FlagSet;

use crate::code_set::{classify, CodeSet};
use crate::error::EncodingError;

/// Minimum digit run for code set C at the start or the end of the payload.
const C_MIN_AT_EDGE: usize = 4;
/// Minimum digit run for code set C in the middle of the payload.
const C_MIN_INNER: usize = 6;

/// Result of scanning ahead from a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookahead {
    /// First position which only code set A can encode, the end of the range if none.
    pub next_only_a: usize,
    /// First position which only code set B can encode, the end of the range if none.
    pub next_only_b: usize,
    /// Number of consecutive digits starting at the decision point.
    pub digits: usize,
    /// Start of the first later digit run long enough for code set C.
    ///
    /// The end of the range if no such run starts before both
    /// `next_only_a` and `next_only_b` were found.
    pub next_run: usize,
    /// Number of digits in the run at `next_run`, zero if there is none.
    pub next_run_len: usize,
}

impl Lookahead {
    /// Scan `data[pos..end]`.
    ///
    /// `end` is clamped to the length of `data`. An empty range gives a
    /// lookahead with every position at the end.
    pub fn scan(data: &[u8], pos: usize, end: usize) -> Result<Self, EncodingError> {
        let end = end.min(data.len());
        let pos = pos.min(end);
        let mut next_only_a = None;
        let mut next_only_b = None;
        let mut next_run = None;
        for (offset, ch) in data[pos..end].iter().enumerate().map(|(i, ch)| (pos + i, *ch)) {
            let sets = code_sets(ch, offset)?;
            if sets == FlagSet::from(CodeSet::A) {
                if next_only_a.is_none() {
                    next_only_a = Some(offset);
                }
            } else if sets == FlagSet::from(CodeSet::B) {
                if next_only_b.is_none() {
                    next_only_b = Some(offset);
                }
            } else if next_run.is_none()
                && offset > pos
                && ch.is_ascii_digit()
                && !data[offset - 1].is_ascii_digit()
            {
                let digits = digit_run(data, offset, end);
                if c_eligible(digits, offset, end, false) {
                    next_run = Some((offset, digits));
                }
            }
            // segments never reach past the later of both
            if next_only_a.is_some() && next_only_b.is_some() {
                break;
            }
        }
        let (next_run, next_run_len) = next_run.unwrap_or((end, 0));
        Ok(Self {
            next_only_a: next_only_a.unwrap_or(end),
            next_only_b: next_only_b.unwrap_or(end),
            digits: digit_run(data, pos, end),
            next_run,
            next_run_len,
        })
    }

    /// Pick A or B, whichever is needed first. A wins ties.
    pub fn preferred(&self) -> CodeSet {
        if self.next_only_a <= self.next_only_b {
            CodeSet::A
        } else {
            CodeSet::B
        }
    }
}

/// A run of the payload encoded in one code set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub code_set: CodeSet,
    /// First position of the segment.
    pub start: usize,
    /// Position after the last character of the segment.
    pub end: usize,
    /// Set C segments over an odd number of digits emit the first digit
    /// in this code set before switching to C.
    pub lead_in: Option<CodeSet>,
    /// The single character of this segment is written after a SHIFT,
    /// the active code set stays unchanged.
    pub shift: bool,
}

impl Segment {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Iterator over the planned segments of a payload range.
///
/// Segments partition the range in order. After the first error the
/// iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Planner<'a> {
    data: &'a [u8],
    pos: usize,
    end: usize,
    active: Option<CodeSet>,
}

impl<'a> Planner<'a> {
    pub fn new(data: &'a [u8], range: Range<usize>) -> Self {
        Self {
            data,
            pos: range.start,
            end: range.end.min(data.len()),
            active: None,
        }
    }

    /// Code set active after the segments planned so far.
    pub fn active(&self) -> Option<CodeSet> {
        self.active
    }

    fn plan_next(&self) -> Result<Segment, EncodingError> {
        let pos = self.pos;
        let ahead = Lookahead::scan(self.data, pos, self.end)?;
        let preferred = ahead.preferred();

        if c_eligible(ahead.digits, pos, self.end, self.active.is_none()) {
            let lead_in = if ahead.digits % 2 == 1 {
                Some(
                    self.active
                        .filter(|set| set.is_single_char())
                        .unwrap_or(preferred),
                )
            } else {
                None
            };
            return Ok(Segment {
                code_set: CodeSet::C,
                start: pos,
                end: pos + ahead.digits,
                lead_in,
                shift: false,
            });
        }

        let end = self.segment_end(preferred, pos, &ahead)?;
        // the character after a shifted one must be in the active set again
        let shift = end - pos == 1
            && end < ahead.next_run
            && self
                .active
                .and_then(|active| active.shifted())
                .map_or(false, |shifted| shifted == preferred);
        Ok(Segment {
            code_set: preferred,
            start: pos,
            end,
            lead_in: None,
            shift,
        })
    }

    /// Find the end of an A or B segment starting at `pos`.
    ///
    /// The segment stops at the first character `set` can not encode or at
    /// the next digit run for set C. For an odd run the first digit stays
    /// in this segment.
    fn segment_end(
        &self,
        set: CodeSet,
        pos: usize,
        ahead: &Lookahead,
    ) -> Result<usize, EncodingError> {
        let stop = ahead.next_run + ahead.next_run_len % 2;
        let mut at = pos + 1;
        while at < stop && code_sets(self.data[at], at)?.contains(set) {
            at += 1;
        }
        Ok(at)
    }
}

impl<'a> Iterator for Planner<'a> {
    type Item = Result<Segment, EncodingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        match self.plan_next() {
            Ok(segment) => {
                log::trace!(
                    "segment {:?} in {:?} (lead-in {:?}, shift {})",
                    segment.range(),
                    segment.code_set,
                    segment.lead_in,
                    segment.shift
                );
                self.pos = segment.end;
                if !segment.shift {
                    self.active = Some(segment.code_set);
                }
                Some(Ok(segment))
            }
            Err(err) => {
                self.pos = self.end;
                Some(Err(err))
            }
        }
    }
}

fn code_sets(ch: u8, offset: usize) -> Result<FlagSet<CodeSet>, EncodingError> {
    classify(ch).ok_or(EncodingError::UnencodableCharacter { offset, byte: ch })
}

/// Whether `digits` digits at `at` are worth the switch to code set C.
fn c_eligible(digits: usize, at: usize, end: usize, is_first: bool) -> bool {
    digits >= C_MIN_INNER || (digits >= C_MIN_AT_EDGE && (is_first || at + digits == end))
}

fn digit_run(data: &[u8], pos: usize, end: usize) -> usize {
    data[pos..end]
        .iter()
        .take_while(|ch| ch.is_ascii_digit())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plan(data: &[u8]) -> Vec<Segment> {
        Planner::new(data, 0..data.len())
            .collect::<Result<_, _>>()
            .unwrap()
    }

    fn seg(code_set: CodeSet, start: usize, end: usize) -> Segment {
        Segment {
            code_set,
            start,
            end,
            lead_in: None,
            shift: false,
        }
    }

    #[test]
    fn test_lookahead() {
        let data = b"AB\x01cd12";
        let ahead = Lookahead::scan(data, 0, data.len()).unwrap();
        assert_eq!(
            ahead,
            Lookahead {
                next_only_a: 2,
                next_only_b: 3,
                digits: 0,
                next_run: data.len(),
                next_run_len: 0,
            }
        );
        assert_eq!(ahead.preferred(), CodeSet::A);

        let ahead = Lookahead::scan(data, 3, data.len()).unwrap();
        assert_eq!(ahead.next_only_a, data.len());
        assert_eq!(ahead.next_only_b, 3);
        assert_eq!(ahead.preferred(), CodeSet::B);

        let ahead = Lookahead::scan(data, 5, data.len()).unwrap();
        assert_eq!(ahead.digits, 2);
    }

    #[test]
    fn test_lookahead_finds_digit_run() {
        let data = b"AB123456cd";
        let ahead = Lookahead::scan(data, 0, data.len()).unwrap();
        assert_eq!(ahead.next_run, 2);
        assert_eq!(ahead.next_run_len, 6);
        assert_eq!(ahead.next_only_b, 8);

        // five inner digits are too short
        let ahead = Lookahead::scan(b"X12345Y", 0, 7).unwrap();
        assert_eq!(ahead.next_run, 7);
        assert_eq!(ahead.next_run_len, 0);

        // four digits are enough at the end
        let ahead = Lookahead::scan(b"FA1234", 0, 6).unwrap();
        assert_eq!((ahead.next_run, ahead.next_run_len), (2, 4));
    }

    #[test]
    fn test_lookahead_clamps_range() {
        let empty = Lookahead {
            next_only_a: 2,
            next_only_b: 2,
            digits: 0,
            next_run: 2,
            next_run_len: 0,
        };
        assert_eq!(Lookahead::scan(b"ab", 3, 2), Ok(empty));
        assert_eq!(Lookahead::scan(b"ab", 2, 2), Ok(empty));
        let ahead = Lookahead::scan(b"ab", 0, 10).unwrap();
        assert_eq!(ahead.next_only_b, 0);
        assert_eq!(ahead.next_only_a, 2);
    }

    #[test]
    fn test_tie_prefers_a() {
        let ahead = Lookahead::scan(b"HELLO", 0, 5).unwrap();
        assert_eq!(ahead.next_only_a, ahead.next_only_b);
        assert_eq!(ahead.preferred(), CodeSet::A);
    }

    #[test]
    fn test_lookahead_rejects_non_ascii() {
        assert_eq!(
            Lookahead::scan(b"ab\xc3", 0, 3),
            Err(EncodingError::UnencodableCharacter {
                offset: 2,
                byte: 0xc3
            })
        );
    }

    #[test]
    fn test_plan_upper_case_with_short_digits() {
        assert_eq!(plan(b"PJJ123C"), vec![seg(CodeSet::A, 0, 7)]);
    }

    #[test]
    fn test_plan_digits_only() {
        assert_eq!(plan(b"1234"), vec![seg(CodeSet::C, 0, 4)]);
        assert_eq!(plan(b"123"), vec![seg(CodeSet::A, 0, 3)]);
    }

    #[test]
    fn test_plan_leading_digits_need_four() {
        assert_eq!(
            plan(b"1234AB"),
            vec![seg(CodeSet::C, 0, 4), seg(CodeSet::A, 4, 6)]
        );
        assert_eq!(plan(b"123AB"), vec![seg(CodeSet::A, 0, 5)]);
    }

    #[test]
    fn test_plan_inner_digits_need_six() {
        assert_eq!(plan(b"X12345Y"), vec![seg(CodeSet::A, 0, 7)]);
        assert_eq!(
            plan(b"X123456Y"),
            vec![
                seg(CodeSet::A, 0, 1),
                seg(CodeSet::C, 1, 7),
                seg(CodeSet::A, 7, 8),
            ]
        );
    }

    #[test]
    fn test_plan_trailing_digits_need_four() {
        assert_eq!(plan(b"FA12"), vec![seg(CodeSet::A, 0, 4)]);
        assert_eq!(
            plan(b"HI345678"),
            vec![seg(CodeSet::A, 0, 2), seg(CodeSet::C, 2, 8)]
        );
    }

    #[test]
    fn test_plan_odd_run_keeps_first_digit() {
        assert_eq!(
            plan(b"AB1234567"),
            vec![seg(CodeSet::A, 0, 3), seg(CodeSet::C, 3, 9)]
        );
    }

    #[test]
    fn test_plan_odd_run_at_start_has_lead_in() {
        let segments = plan(b"12345AB");
        assert_eq!(
            segments,
            vec![
                Segment {
                    lead_in: Some(CodeSet::A),
                    ..seg(CodeSet::C, 0, 5)
                },
                seg(CodeSet::A, 5, 7),
            ]
        );
    }

    #[test]
    fn test_plan_lower_case_picks_b() {
        assert_eq!(plan(b"abc"), vec![seg(CodeSet::B, 0, 3)]);
        assert_eq!(plan(b"ABcDE"), vec![seg(CodeSet::B, 0, 5)]);
    }

    #[test]
    fn test_plan_shift_for_single_char() {
        let segments = plan(b"\x01abc\x02b");
        assert_eq!(
            segments,
            vec![
                seg(CodeSet::A, 0, 1),
                seg(CodeSet::B, 1, 4),
                Segment {
                    shift: true,
                    ..seg(CodeSet::A, 4, 5)
                },
                seg(CodeSet::B, 5, 6),
            ]
        );
    }

    #[test]
    fn test_plan_no_shift_before_c() {
        assert_eq!(
            plan(b"ab\x01123456"),
            vec![
                seg(CodeSet::B, 0, 2),
                seg(CodeSet::A, 2, 3),
                seg(CodeSet::C, 3, 9),
            ]
        );
    }

    #[test]
    fn test_plan_no_shift_at_end() {
        assert_eq!(
            plan(b"abc\x01"),
            vec![seg(CodeSet::B, 0, 3), seg(CodeSet::A, 3, 4)]
        );
    }

    #[test]
    fn test_plan_no_shift_for_first_segment() {
        let segments = plan(b"\x01abc");
        assert!(!segments[0].shift);
    }

    #[test]
    fn test_segments_partition_range() {
        let data = b"Ab\x0212345678cd\x7f99x";
        let segments = plan(data);
        let mut at = 0;
        for pair in segments.windows(2) {
            if !pair[0].shift && !pair[1].shift {
                assert_ne!(pair[0].code_set, pair[1].code_set);
            }
        }
        for segment in segments {
            assert_eq!(segment.start, at);
            assert!(!segment.is_empty());
            at = segment.end;
        }
        assert_eq!(at, data.len());
    }

    #[test]
    fn test_planner_respects_range() {
        let data = b"xx1234yy";
        let segments: Vec<_> = Planner::new(data, 2..6)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(segments, vec![seg(CodeSet::C, 2, 6)]);
    }

    #[test]
    fn test_planner_stops_after_error() {
        let mut planner = Planner::new(b"a\xffb", 0..3);
        assert!(matches!(planner.next(), Some(Err(_))));
        assert_eq!(planner.next(), None);
    }
}
