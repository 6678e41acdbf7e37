use flagset::{flags, FlagSet};

use crate::encodation::{CODE_A, CODE_B, CODE_C, START_A, START_B, START_C};

flags! {
    /// List of Code 128 code sets
    ///
    /// A symbol can switch between the three code sets at any point. Set A
    /// holds the control characters and upper case ASCII, set B the printable
    /// ASCII range, and set C encodes two decimal digits per symbol.
    pub enum CodeSet: u8 {
        A = 0b001,
        B = 0b010,
        C = 0b100,
    }
}

/// Get the code sets which can represent `ch` directly.
///
/// Returns `None` for anything outside of 7-bit ASCII. Set C is reported for
/// decimal digits only, encoding them still needs a partner digit.
pub fn classify(ch: u8) -> Option<FlagSet<CodeSet>> {
    match ch {
        0..=31 => Some(CodeSet::A.into()),
        b'0'..=b'9' => Some(CodeSet::A | CodeSet::B | CodeSet::C),
        32..=95 => Some(CodeSet::A | CodeSet::B),
        96..=127 => Some(CodeSet::B.into()),
        _ => None,
    }
}

impl CodeSet {
    /// Get the START symbol which begins a barcode in this code set.
    pub fn start_symbol(&self) -> u8 {
        match self {
            Self::A => START_A,
            Self::B => START_B,
            Self::C => START_C,
        }
    }

    /// Get the CODE symbol which switches to this code set.
    pub fn switch_symbol(&self) -> u8 {
        match self {
            Self::A => CODE_A,
            Self::B => CODE_B,
            Self::C => CODE_C,
        }
    }

    pub(crate) fn is_single_char(&self) -> bool {
        !matches!(self, Self::C)
    }

    /// Symbol value of `ch` in this code set.
    ///
    /// Only defined for A and B, set C works on digit pairs, see [pair_value].
    pub(crate) fn value_of(&self, ch: u8) -> Option<u8> {
        match (self, ch) {
            (Self::A, 0..=31) => Some(ch + 64),
            (Self::A, 32..=95) | (Self::B, 32..=127) => Some(ch - 32),
            _ => None,
        }
    }

    /// The set a SHIFT symbol temporarily changes to.
    pub(crate) fn shifted(&self) -> Option<Self> {
        match self {
            Self::A => Some(Self::B),
            Self::B => Some(Self::A),
            Self::C => None,
        }
    }
}

/// Symbol value of two digits in code set C.
pub(crate) fn pair_value(first: u8, second: u8) -> Option<u8> {
    if first.is_ascii_digit() && second.is_ascii_digit() {
        Some((first - b'0') * 10 + (second - b'0'))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_ranges() {
        assert_eq!(classify(0), Some(CodeSet::A.into()));
        assert_eq!(classify(31), Some(CodeSet::A.into()));
        assert_eq!(classify(b' '), Some(CodeSet::A | CodeSet::B));
        assert_eq!(classify(b'/'), Some(CodeSet::A | CodeSet::B));
        assert_eq!(classify(b'0'), Some(CodeSet::A | CodeSet::B | CodeSet::C));
        assert_eq!(classify(b'9'), Some(CodeSet::A | CodeSet::B | CodeSet::C));
        assert_eq!(classify(b'_'), Some(CodeSet::A | CodeSet::B));
        assert_eq!(classify(b'`'), Some(CodeSet::B.into()));
        assert_eq!(classify(127), Some(CodeSet::B.into()));
        assert_eq!(classify(128), None);
        assert_eq!(classify(255), None);
    }

    #[test]
    fn test_colon_is_not_a_digit() {
        let set = classify(b':').unwrap();
        assert!(set.contains(CodeSet::A));
        assert!(set.contains(CodeSet::B));
        assert!(!set.contains(CodeSet::C));
    }

    #[test]
    fn test_every_classified_char_has_a_value() {
        for ch in 0..128u8 {
            for set in classify(ch).unwrap().into_iter().filter(|s| s.is_single_char()) {
                assert!(set.value_of(ch).is_some(), "{} in {:?}", ch, set);
            }
        }
    }

    #[test]
    fn test_values() {
        assert_eq!(CodeSet::A.value_of(b' '), Some(0));
        assert_eq!(CodeSet::A.value_of(b'P'), Some(48));
        assert_eq!(CodeSet::A.value_of(0), Some(64));
        assert_eq!(CodeSet::A.value_of(31), Some(95));
        assert_eq!(CodeSet::A.value_of(b'a'), None);
        assert_eq!(CodeSet::B.value_of(b'a'), Some(65));
        assert_eq!(CodeSet::B.value_of(127), Some(95));
        assert_eq!(CodeSet::B.value_of(1), None);
        assert_eq!(CodeSet::C.value_of(b'1'), None);
        assert_eq!(pair_value(b'0', b'7'), Some(7));
        assert_eq!(pair_value(b'9', b'9'), Some(99));
        assert_eq!(pair_value(b'9', b'a'), None);
    }

    #[test]
    fn test_control_symbols() {
        assert_eq!(CodeSet::A.start_symbol(), 103);
        assert_eq!(CodeSet::B.start_symbol(), 104);
        assert_eq!(CodeSet::C.start_symbol(), 105);
        assert_eq!(CodeSet::A.switch_symbol(), 101);
        assert_eq!(CodeSet::B.switch_symbol(), 100);
        assert_eq!(CodeSet::C.switch_symbol(), 99);
        assert_eq!(CodeSet::A.shifted(), Some(CodeSet::B));
        assert_eq!(CodeSet::C.shifted(), None);
    }
}
