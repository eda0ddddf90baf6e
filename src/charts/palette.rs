//! Chart colours shared by the live and static charts.

use crate::stats::{APPROVAL_SCALE, CANONICAL_PARTIES};

/// One colour per canonical party, same order as `CANONICAL_PARTIES`.
pub const PARTY_COLORS: [(u8, u8, u8); 9] = [
    (0xa8, 0xda, 0xdc),
    (0x45, 0x7b, 0x9d),
    (0xe6, 0x39, 0x46),
    (0xff, 0xb7, 0x03),
    (0x90, 0xbe, 0x6d),
    (0xf4, 0xa2, 0x61),
    (0xbd, 0xbd, 0xbd),
    (0xe0, 0xaa, 0xff),
    (0xcf, 0xd8, 0xdc),
];

/// Red to green, same order as `APPROVAL_SCALE`.
pub const APPROVAL_COLORS: [(u8, u8, u8); 5] = [
    (0xe6, 0x39, 0x46),
    (0xf4, 0xa2, 0x61),
    (0xff, 0xe0, 0x66),
    (0x90, 0xbe, 0x6d),
    (0x2a, 0x9d, 0x8f),
];

const FALLBACK: (u8, u8, u8) = (0x9e, 0x9e, 0x9e);

/// Colour of a party; follows the party through re-sorting.
pub fn party_rgb(party: &str) -> (u8, u8, u8) {
    CANONICAL_PARTIES
        .iter()
        .position(|p| *p == party)
        .map(|i| PARTY_COLORS[i])
        .unwrap_or(FALLBACK)
}

pub fn approval_rgb(rating: &str) -> (u8, u8, u8) {
    APPROVAL_SCALE
        .iter()
        .position(|r| *r == rating)
        .map(|i| APPROVAL_COLORS[i])
        .unwrap_or(FALLBACK)
}
