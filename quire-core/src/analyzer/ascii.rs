//! ASCII byte classification.
//!
//! Table-driven equivalents of the C `ctype` predicates, fixed to the "C"
//! locale so results never depend on the environment. Bytes `0x80..=0xFF`
//! belong to no class and map to themselves under case conversion: they are
//! the Unicode decoder's business, not this module's.
//!
//! All tables are `const` data, so they are shared by every tokenizer without
//! any initialisation or locking.

use bitflags::bitflags;

bitflags! {
    /// Character classes of a single byte.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct CharClass: u8 {
        /// `A-Z`
        const UPPER = 1 << 0;
        /// `a-z`
        const LOWER = 1 << 1;
        /// `0-9`
        const DIGIT = 1 << 2;
        /// `0x00-0x1F` and `0x7F`
        const CONTROL = 1 << 3;
        /// Printable, not alphanumeric, not space.
        const PUNCT = 1 << 4;
        /// Space, `\t`, `\n`, `\v`, `\f`, `\r`.
        const SPACE = 1 << 5;
        /// `0-9`, `A-F`, `a-f`
        const HEX = 1 << 6;

        const ALPHA = Self::UPPER.bits() | Self::LOWER.bits();
        const ALNUM = Self::ALPHA.bits() | Self::DIGIT.bits();
    }
}

const fn class_bits(b: u8) -> u8 {
    let mut bits = 0;
    if b.is_ascii_uppercase() {
        bits |= CharClass::UPPER.bits();
    }
    if b.is_ascii_lowercase() {
        bits |= CharClass::LOWER.bits();
    }
    if b.is_ascii_digit() {
        bits |= CharClass::DIGIT.bits();
    }
    if b < 0x20 || b == 0x7f {
        bits |= CharClass::CONTROL.bits();
    }
    if b.is_ascii_punctuation() {
        bits |= CharClass::PUNCT.bits();
    }
    // C isspace() includes vertical tab, which is_ascii_whitespace() does not.
    if matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r') {
        bits |= CharClass::SPACE.bits();
    }
    if b.is_ascii_hexdigit() {
        bits |= CharClass::HEX.bits();
    }
    bits
}

const fn build_class_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = class_bits(i as u8);
        i += 1;
    }
    table
}

static CLASS_TABLE: [u8; 256] = build_class_table();

#[rustfmt::skip]
static LOWERCASE_TABLE: [u8; 256] = [
    0x00,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0a,0x0b,0x0c,0x0d,0x0e,0x0f,
    0x10,0x11,0x12,0x13,0x14,0x15,0x16,0x17,0x18,0x19,0x1a,0x1b,0x1c,0x1d,0x1e,0x1f,
    0x20,0x21,0x22,0x23,0x24,0x25,0x26,0x27,0x28,0x29,0x2a,0x2b,0x2c,0x2d,0x2e,0x2f,
    0x30,0x31,0x32,0x33,0x34,0x35,0x36,0x37,0x38,0x39,0x3a,0x3b,0x3c,0x3d,0x3e,0x3f,
    0x40,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x5b,0x5c,0x5d,0x5e,0x5f,
    0x60,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x7b,0x7c,0x7d,0x7e,0x7f,
    0x80,0x81,0x82,0x83,0x84,0x85,0x86,0x87,0x88,0x89,0x8a,0x8b,0x8c,0x8d,0x8e,0x8f,
    0x90,0x91,0x92,0x93,0x94,0x95,0x96,0x97,0x98,0x99,0x9a,0x9b,0x9c,0x9d,0x9e,0x9f,
    0xa0,0xa1,0xa2,0xa3,0xa4,0xa5,0xa6,0xa7,0xa8,0xa9,0xaa,0xab,0xac,0xad,0xae,0xaf,
    0xb0,0xb1,0xb2,0xb3,0xb4,0xb5,0xb6,0xb7,0xb8,0xb9,0xba,0xbb,0xbc,0xbd,0xbe,0xbf,
    0xc0,0xc1,0xc2,0xc3,0xc4,0xc5,0xc6,0xc7,0xc8,0xc9,0xca,0xcb,0xcc,0xcd,0xce,0xcf,
    0xd0,0xd1,0xd2,0xd3,0xd4,0xd5,0xd6,0xd7,0xd8,0xd9,0xda,0xdb,0xdc,0xdd,0xde,0xdf,
    0xe0,0xe1,0xe2,0xe3,0xe4,0xe5,0xe6,0xe7,0xe8,0xe9,0xea,0xeb,0xec,0xed,0xee,0xef,
    0xf0,0xf1,0xf2,0xf3,0xf4,0xf5,0xf6,0xf7,0xf8,0xf9,0xfa,0xfb,0xfc,0xfd,0xfe,0xff,
];

#[rustfmt::skip]
static UPPERCASE_TABLE: [u8; 256] = [
    0x00,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0a,0x0b,0x0c,0x0d,0x0e,0x0f,
    0x10,0x11,0x12,0x13,0x14,0x15,0x16,0x17,0x18,0x19,0x1a,0x1b,0x1c,0x1d,0x1e,0x1f,
    0x20,0x21,0x22,0x23,0x24,0x25,0x26,0x27,0x28,0x29,0x2a,0x2b,0x2c,0x2d,0x2e,0x2f,
    0x30,0x31,0x32,0x33,0x34,0x35,0x36,0x37,0x38,0x39,0x3a,0x3b,0x3c,0x3d,0x3e,0x3f,
    0x40,0x41,0x42,0x43,0x44,0x45,0x46,0x47,0x48,0x49,0x4a,0x4b,0x4c,0x4d,0x4e,0x4f,
    0x50,0x51,0x52,0x53,0x54,0x55,0x56,0x57,0x58,0x59,0x5a,0x5b,0x5c,0x5d,0x5e,0x5f,
    0x60,0x41,0x42,0x43,0x44,0x45,0x46,0x47,0x48,0x49,0x4a,0x4b,0x4c,0x4d,0x4e,0x4f,
    0x50,0x51,0x52,0x53,0x54,0x55,0x56,0x57,0x58,0x59,0x5a,0x7b,0x7c,0x7d,0x7e,0x7f,
    0x80,0x81,0x82,0x83,0x84,0x85,0x86,0x87,0x88,0x89,0x8a,0x8b,0x8c,0x8d,0x8e,0x8f,
    0x90,0x91,0x92,0x93,0x94,0x95,0x96,0x97,0x98,0x99,0x9a,0x9b,0x9c,0x9d,0x9e,0x9f,
    0xa0,0xa1,0xa2,0xa3,0xa4,0xa5,0xa6,0xa7,0xa8,0xa9,0xaa,0xab,0xac,0xad,0xae,0xaf,
    0xb0,0xb1,0xb2,0xb3,0xb4,0xb5,0xb6,0xb7,0xb8,0xb9,0xba,0xbb,0xbc,0xbd,0xbe,0xbf,
    0xc0,0xc1,0xc2,0xc3,0xc4,0xc5,0xc6,0xc7,0xc8,0xc9,0xca,0xcb,0xcc,0xcd,0xce,0xcf,
    0xd0,0xd1,0xd2,0xd3,0xd4,0xd5,0xd6,0xd7,0xd8,0xd9,0xda,0xdb,0xdc,0xdd,0xde,0xdf,
    0xe0,0xe1,0xe2,0xe3,0xe4,0xe5,0xe6,0xe7,0xe8,0xe9,0xea,0xeb,0xec,0xed,0xee,0xef,
    0xf0,0xf1,0xf2,0xf3,0xf4,0xf5,0xf6,0xf7,0xf8,0xf9,0xfa,0xfb,0xfc,0xfd,0xfe,0xff,
];

/// Returns the class set of a byte. Empty for `0x80..=0xFF`.
#[inline(always)]
pub fn classify(b: u8) -> CharClass {
    CharClass::from_bits_retain(CLASS_TABLE[b as usize])
}

#[inline(always)]
fn has(b: u8, class: CharClass) -> bool {
    CLASS_TABLE[b as usize] & class.bits() != 0
}

/// `true` for `0x00..=0x7F`.
#[inline(always)]
pub const fn is_ascii(b: u8) -> bool {
    b < 0x80
}

#[inline(always)]
pub fn is_alpha(b: u8) -> bool {
    has(b, CharClass::ALPHA)
}

#[inline(always)]
pub fn is_digit(b: u8) -> bool {
    has(b, CharClass::DIGIT)
}

#[inline(always)]
pub fn is_alnum(b: u8) -> bool {
    has(b, CharClass::ALNUM)
}

#[inline(always)]
pub fn is_space(b: u8) -> bool {
    has(b, CharClass::SPACE)
}

#[inline(always)]
pub fn is_upper(b: u8) -> bool {
    has(b, CharClass::UPPER)
}

#[inline(always)]
pub fn is_lower(b: u8) -> bool {
    has(b, CharClass::LOWER)
}

#[inline(always)]
pub fn is_punct(b: u8) -> bool {
    has(b, CharClass::PUNCT)
}

#[inline(always)]
pub fn is_control(b: u8) -> bool {
    has(b, CharClass::CONTROL)
}

#[inline(always)]
pub fn is_xdigit(b: u8) -> bool {
    has(b, CharClass::HEX)
}

/// Lower-cases `A-Z`; every other byte is returned unchanged.
#[inline(always)]
pub fn to_lower(b: u8) -> u8 {
    LOWERCASE_TABLE[b as usize]
}

/// Upper-cases `a-z`; every other byte is returned unchanged.
#[inline(always)]
pub fn to_upper(b: u8) -> u8 {
    UPPERCASE_TABLE[b as usize]
}
