//! Low level access to the encoder.
//!
//! The functions in this module expose intermediate steps of the encoding.
//! They are not needed to create a barcode, but they are useful to see
//! why a payload was encoded the way it was.
use crate::encodation::payload_range;
pub use crate::encodation::{Lookahead, Planner, Segment};
use crate::error::EncodingError;

/// Compute the code set segments the encoder will use for a payload range.
///
/// `count = None` plans until the end of the payload. The segments
/// partition the range in order, see [Segment] for the details of a
/// single entry.
///
/// # Example
///
/// ```rust
/// # use code128::{data::encodation_plan, CodeSet};
/// let plan = encodation_plan(b"AB123456", 0, None).unwrap();
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan[0].code_set, CodeSet::A);
/// assert_eq!(plan[1].code_set, CodeSet::C);
/// assert_eq!(plan[1].range(), 2..8);
/// ```
pub fn encodation_plan(
    data: &[u8],
    offset: usize,
    count: Option<usize>,
) -> Result<Vec<Segment>, EncodingError> {
    let range = payload_range(data, offset, count)?;
    Planner::new(data, range).collect()
}

#[test]
fn test_plan_with_offset() {
    let plan = encodation_plan(b"ab\x01\x02", 2, None).unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].code_set, crate::CodeSet::A);
    assert_eq!(plan[0].range(), 2..4);
}

#[test]
fn test_plan_rejects_empty_range() {
    assert_eq!(
        encodation_plan(b"abc", 5, None),
        Err(EncodingError::InvalidRange {
            offset: 5,
            count: 0,
            len: 3
        })
    );
}

#[test]
fn test_shift_keeps_active_set() {
    use crate::CodeSet;

    let mut planner = Planner::new(b"ab\x01cd", 0..5);
    assert_eq!(planner.active(), None);
    let first = planner.next().unwrap().unwrap();
    assert_eq!(first.code_set, CodeSet::B);
    assert_eq!(planner.active(), Some(CodeSet::B));
    let shifted = planner.next().unwrap().unwrap();
    assert!(shifted.shift);
    assert_eq!(shifted.code_set, CodeSet::A);
    assert_eq!(planner.active(), Some(CodeSet::B));
    assert_eq!(planner.next().unwrap().unwrap().range(), 3..5);
    assert!(planner.next().is_none());
}
