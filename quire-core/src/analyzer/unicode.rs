//! Unicode decoding, encoding, classification and case folding.
//!
//! Everything here works on raw codepoints (`u32`) rather than `char` because
//! the tokenizer decodes straight out of untrusted bytes: a failed decode is
//! reported as codepoint `0` with length `0`, and `0` belongs to no class and
//! folds to nothing. That lets callers treat "undecodable" and "end of run"
//! the same way without a separate error path.
//!
//! ## Folding
//!
//! [`casefold`] maps one codepoint to the sequence the index should store for
//! it. The codepoint is NFKC-normalized, the result is case-folded with the
//! full Unicode folding (so `ς` and `σ` meet, and `ß` becomes `ss`), and only
//! alphanumeric characters are kept:
//!
//! ```text
//! 'Α' -> "α"   'ς' -> "σ"   'ß' -> "ss"   '①' -> "1"   '½' -> "12"   '℃' -> "c"   'ﬁ' -> "fi"
//! ```
//!
//! A codepoint with no alphanumeric expansion (punctuation, symbols) folds to
//! its own case fold, so `'©'` stays `"©"`.
//!
//! All the data comes from `core`, `unicode-normalization` and `caseless`,
//! all immutable, so every function here is safe to call from any number of
//! threads.

use caseless::Caseless;
use smallvec::SmallVec;
use unicode_normalization::UnicodeNormalization;

/// Longest UTF-8 encoding of a single codepoint.
pub const MAX_UTF8_LEN: usize = 4;

/// Decodes the UTF-8 sequence starting at `bytes[pos]`.
///
/// Returns `(codepoint, byte_length)`. A `byte_length` of zero means nothing
/// could be decoded: `pos` is at or past the end, the lead byte is invalid,
/// the sequence is cut off by the end of `bytes`, or it is overlong, a
/// surrogate, or above U+10FFFF. Never reads outside `bytes`.
#[inline]
pub fn decode_utf8(bytes: &[u8], pos: usize) -> (u32, usize) {
    let Some(&lead) = bytes.get(pos) else {
        return (0, 0);
    };

    if lead < 0x80 {
        return (lead as u32, 1);
    }

    let (len, init, min) = match lead {
        0xc2..=0xdf => (2, (lead & 0x1f) as u32, 0x80),
        0xe0..=0xef => (3, (lead & 0x0f) as u32, 0x800),
        0xf0..=0xf4 => (4, (lead & 0x07) as u32, 0x1_0000),
        _ => return (0, 0),
    };

    let Some(tail) = bytes.get(pos + 1..pos + len) else {
        return (0, 0);
    };

    let mut codepoint = init;
    for &b in tail {
        if b & 0xc0 != 0x80 {
            return (0, 0);
        }
        codepoint = (codepoint << 6) | (b & 0x3f) as u32;
    }

    if codepoint < min || codepoint > 0x10_ffff || (0xd800..=0xdfff).contains(&codepoint) {
        return (0, 0);
    }

    (codepoint, len)
}

/// Encodes `codepoint` as UTF-8 at the start of `out`.
///
/// All-or-nothing: if the full encoding does not fit in `out`, or the
/// codepoint is not a Unicode scalar value, nothing is written and 0 is
/// returned. Callers treat 0 as "window full" and keep consuming input.
#[inline]
pub fn encode_utf8(codepoint: u32, out: &mut [u8]) -> usize {
    let Some(ch) = char::from_u32(codepoint) else {
        return 0;
    };

    let len = ch.len_utf8();
    match out.get_mut(..len) {
        Some(window) => {
            ch.encode_utf8(window);
            len
        }
        None => 0,
    }
}

/// Unicode `Alphabetic`.
#[inline]
pub fn is_alpha(codepoint: u32) -> bool {
    char::from_u32(codepoint).is_some_and(char::is_alphabetic)
}

/// Unicode `Numeric_Type` of decimal, digit or numeric (`Nd`, `Nl`, `No`).
#[inline]
pub fn is_digit(codepoint: u32) -> bool {
    char::from_u32(codepoint).is_some_and(char::is_numeric)
}

/// Unicode `White_Space`.
#[inline]
pub fn is_space(codepoint: u32) -> bool {
    char::from_u32(codepoint).is_some_and(char::is_whitespace)
}

/// XML 1.0 `NameStartChar` (production [4]).
#[inline]
pub fn is_xml_name_start(codepoint: u32) -> bool {
    matches!(
        codepoint,
        0x3a | 0x41..=0x5a
            | 0x5f
            | 0x61..=0x7a
            | 0xc0..=0xd6
            | 0xd8..=0xf6
            | 0xf8..=0x2ff
            | 0x370..=0x37d
            | 0x37f..=0x1fff
            | 0x200c..=0x200d
            | 0x2070..=0x218f
            | 0x2c00..=0x2fef
            | 0x3001..=0xd7ff
            | 0xf900..=0xfdcf
            | 0xfdf0..=0xfffd
            | 0x1_0000..=0xe_ffff
    )
}

/// XML 1.0 `NameChar` (production [4a]).
#[inline]
pub fn is_xml_name_char(codepoint: u32) -> bool {
    is_xml_name_start(codepoint)
        || matches!(
            codepoint,
            0x2d | 0x2e | 0x30..=0x39 | 0xb7 | 0x300..=0x36f | 0x203f..=0x2040
        )
}

/// The folded expansion of a single codepoint.
///
/// A finite sequence that can be walked any number of times. Almost every
/// codepoint folds to one character, a few (`½`, `ﬃ`, `㎒`) to several, so
/// the sequence lives inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFold {
    chars: SmallVec<[char; 4]>,
}

impl CaseFold {
    /// The folded characters.
    #[inline(always)]
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Iterates the folded sequence as codepoints.
    #[inline]
    pub fn codepoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.chars.iter().map(|&c| c as u32)
    }

    /// `true` if the sequence is non-empty and every character satisfies `pred`.
    #[inline]
    pub fn is_all(&self, pred: impl Fn(char) -> bool) -> bool {
        !self.chars.is_empty() && self.chars.iter().all(|&c| pred(c))
    }
}

impl IntoIterator for CaseFold {
    type Item = char;
    type IntoIter = smallvec::IntoIter<[char; 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars.into_iter()
    }
}

impl<'a> IntoIterator for &'a CaseFold {
    type Item = &'a char;
    type IntoIter = core::slice::Iter<'a, char>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars.iter()
    }
}

/// Folds `codepoint` to the sequence stored in the index.
///
/// Codepoint 0 (the failed-decode marker) and non-scalar values fold to the
/// empty sequence.
pub fn casefold(codepoint: u32) -> CaseFold {
    let mut chars = SmallVec::new();

    let Some(ch) = char::from_u32(codepoint).filter(|&c| c != '\0') else {
        return CaseFold { chars };
    };

    if ch.is_ascii() {
        chars.push(ch.to_ascii_lowercase());
        return CaseFold { chars };
    }

    chars.extend(
        core::iter::once(ch)
            .nfkc()
            .default_case_fold()
            .filter(|c| c.is_alphanumeric()),
    );

    if chars.is_empty() {
        chars.extend(core::iter::once(ch).default_case_fold());
    }

    CaseFold { chars }
}

/// `true` if `codepoint` may start or extend an alphabetic run.
///
/// Alphabetic codepoints do, and so do compatibility characters whose fold is
/// purely alphabetic (`℃` folds to `c`).
#[inline]
pub fn joins_alpha(codepoint: u32) -> bool {
    is_alpha(codepoint) || casefold(codepoint).is_all(char::is_alphabetic)
}

/// `true` if `codepoint` may start or extend a numeric run.
#[inline]
pub fn joins_digit(codepoint: u32) -> bool {
    is_digit(codepoint) || casefold(codepoint).is_all(char::is_numeric)
}

/// [`joins_alpha`] for a codepoint whose fold is already known.
#[inline]
pub fn folded_joins_alpha(codepoint: u32, fold: &CaseFold) -> bool {
    is_alpha(codepoint) || fold.is_all(char::is_alphabetic)
}

/// [`joins_digit`] for a codepoint whose fold is already known.
#[inline]
pub fn folded_joins_digit(codepoint: u32, fold: &CaseFold) -> bool {
    is_digit(codepoint) || fold.is_all(char::is_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fold(c: char) -> String {
        casefold(c as u32).into_iter().collect()
    }

    #[test]
    fn decode_ascii() {
        assert_eq!(decode_utf8(b"abc", 0), (b'a' as u32, 1));
        assert_eq!(decode_utf8(b"abc", 2), (b'c' as u32, 1));
    }

    #[test]
    fn decode_multibyte() {
        assert_eq!(decode_utf8("α".as_bytes(), 0), (0x3b1, 2));
        assert_eq!(decode_utf8("℃".as_bytes(), 0), (0x2103, 3));
        assert_eq!(decode_utf8("𝄞".as_bytes(), 0), (0x1d11e, 4));
    }

    #[test]
    fn decode_past_end() {
        assert_eq!(decode_utf8(b"a", 1), (0, 0));
        assert_eq!(decode_utf8(b"", 0), (0, 0));
        assert_eq!(decode_utf8(b"a", 100), (0, 0));
    }

    #[test]
    fn decode_truncated_sequences() {
        assert_eq!(decode_utf8(b"\xc3", 0), (0, 0));
        assert_eq!(decode_utf8(b"\xe2\x84", 0), (0, 0));
        assert_eq!(decode_utf8(b"\xf0\x9d\x84", 0), (0, 0));
        assert_eq!(decode_utf8(b"\xc3>", 0), (0, 0));
    }

    #[test]
    fn decode_rejects_invalid_forms() {
        // continuation byte as lead
        assert_eq!(decode_utf8(b"\x80", 0), (0, 0));
        // overlong
        assert_eq!(decode_utf8(b"\xc0\xaf", 0), (0, 0));
        assert_eq!(decode_utf8(b"\xe0\x80\xaf", 0), (0, 0));
        // surrogate
        assert_eq!(decode_utf8(b"\xed\xa0\x80", 0), (0, 0));
        // above U+10FFFF
        assert_eq!(decode_utf8(b"\xf4\x90\x80\x80", 0), (0, 0));
        assert_eq!(decode_utf8(b"\xf8\x88\x80\x80\x80", 0), (0, 0));
    }

    #[test]
    fn encode_fits() {
        let mut out = [0u8; 4];
        assert_eq!(encode_utf8(0x3b1, &mut out), 2);
        assert_eq!(&out[..2], "α".as_bytes());
    }

    #[test]
    fn encode_without_room_writes_nothing() {
        let mut out = [0u8; 2];
        assert_eq!(encode_utf8(0x2103, &mut out), 0);
        assert_eq!(out, [0, 0]);
        assert_eq!(encode_utf8(b'a' as u32, &mut []), 0);
    }

    #[test]
    fn encode_rejects_non_scalars() {
        let mut out = [0u8; 4];
        assert_eq!(encode_utf8(0xd800, &mut out), 0);
        assert_eq!(encode_utf8(0x11_0000, &mut out), 0);
    }

    #[test]
    fn classes() {
        assert!(is_alpha('α' as u32) && is_alpha('a' as u32));
        assert!(!is_alpha('1' as u32) && !is_alpha('℃' as u32));
        assert!(is_digit('①' as u32) && is_digit('½' as u32) && is_digit('٣' as u32));
        assert!(is_space(0x3000) && is_space(0xa0) && is_space(b' ' as u32));
        assert!(!is_alpha(0) && !is_digit(0) && !is_space(0));
        assert!(!is_alpha(0xd800) && !is_space(0x11_0000));
    }

    #[test]
    fn xml_name_classes() {
        for c in [':', '_', 'A', 'z', 'é', 'α', '中'] {
            assert!(is_xml_name_start(c as u32), "{c} should start a name");
        }
        for c in ['-', '.', '0', '9', '\u{b7}', '\u{301}'] {
            assert!(!is_xml_name_start(c as u32), "{c} should not start a name");
            assert!(is_xml_name_char(c as u32), "{c} should continue a name");
        }
        for c in [' ', '/', '>', '"', '!', '?'] {
            assert!(!is_xml_name_char(c as u32));
        }
        assert!(!is_xml_name_start(0));
        assert!(!is_xml_name_start(0xf_0000));
    }

    #[test]
    fn fold_lowercases() {
        assert_eq!(fold('A'), "a");
        assert_eq!(fold('Α'), "α");
        assert_eq!(fold('Ж'), "ж");
        assert_eq!(fold('é'), "é");
    }

    #[test]
    fn fold_is_full_case_folding() {
        assert_eq!(fold('ς'), "σ");
        assert_eq!(fold('Σ'), "σ");
        assert_eq!(fold('ß'), "ss");
        assert_eq!(fold('ẞ'), "ss");
        assert_eq!(fold('ſ'), "s");
    }

    #[test]
    fn fold_compatibility_forms() {
        assert_eq!(fold('①'), "1");
        assert_eq!(fold('③'), "3");
        assert_eq!(fold('½'), "12");
        assert_eq!(fold('℃'), "c");
        assert_eq!(fold('ﬁ'), "fi");
        assert_eq!(fold('Ａ'), "a");
    }

    #[test]
    fn fold_symbols_to_themselves() {
        assert_eq!(fold('©'), "©");
        assert_eq!(fold('!'), "!");
        assert_eq!(fold('→'), "→");
    }

    #[test]
    fn fold_of_nothing_is_empty() {
        assert!(casefold(0).is_empty());
        assert!(casefold(0xd800).is_empty());
        assert_eq!(casefold(0).codepoints().count(), 0);
    }

    #[test]
    fn fold_is_restartable() {
        let f = casefold('½' as u32);
        let first: Vec<u32> = f.codepoints().collect();
        let second: Vec<u32> = f.codepoints().collect();
        assert_eq!(first, second);
        assert_eq!(f.len(), 2);
        assert_eq!(f.as_slice(), &['1', '2']);
    }

    #[test]
    fn run_joining() {
        assert!(joins_alpha('β' as u32));
        assert!(joins_alpha('℃' as u32));
        assert!(!joins_alpha('½' as u32));
        assert!(!joins_alpha('©' as u32));
        assert!(joins_digit('②' as u32));
        assert!(joins_digit('½' as u32));
        assert!(!joins_digit('℃' as u32));
        assert!(!joins_alpha(0) && !joins_digit(0));
    }

    proptest! {
        #[test]
        fn decode_agrees_with_core(c in any::<char>()) {
            let mut buf = [0u8; MAX_UTF8_LEN];
            let encoded = c.encode_utf8(&mut buf);
            prop_assert_eq!(decode_utf8(encoded.as_bytes(), 0), (c as u32, c.len_utf8()));
        }

        #[test]
        fn encode_agrees_with_core(c in any::<char>()) {
            let mut ours = [0u8; MAX_UTF8_LEN];
            let mut theirs = [0u8; MAX_UTF8_LEN];
            let n = encode_utf8(c as u32, &mut ours);
            prop_assert_eq!(&ours[..n], c.encode_utf8(&mut theirs).as_bytes());
        }

        #[test]
        fn decode_never_overruns(bytes in proptest::collection::vec(any::<u8>(), 0..16), pos in 0usize..20) {
            let (_, len) = decode_utf8(&bytes, pos);
            prop_assert!(len == 0 || pos + len <= bytes.len());
        }

        #[test]
        fn folded_joins_match_joins(c in any::<char>()) {
            let fold = casefold(c as u32);
            prop_assert_eq!(folded_joins_alpha(c as u32, &fold), joins_alpha(c as u32));
            prop_assert_eq!(folded_joins_digit(c as u32, &fold), joins_digit(c as u32));
        }

        #[test]
        fn fold_is_idempotent_on_letters(
            c in proptest::char::range('\u{41}', '\u{4ff}').prop_filter("alphabetic", |c| c.is_alphabetic())
        ) {
            let once: String = casefold(c as u32).into_iter().collect();
            let twice: String = once.chars().flat_map(|c| casefold(c as u32)).collect();
            prop_assert_eq!(once, twice);
        }
    }
}
