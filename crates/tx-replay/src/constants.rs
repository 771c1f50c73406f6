//! Constants describing the ABI layout the response decoder slices.
//!
//! All lengths count hexadecimal characters of a `0x`-prefixed response.

/// Length of the `0x` prefix.
pub const HEX_PREFIX_LEN: usize = 2;

/// Hex length of a 4-byte function or error selector.
pub const SELECTOR_HEX_LEN: usize = 8;

/// Hex length of one 32-byte ABI word.
pub const WORD_HEX_LEN: usize = 64;

/// Header in front of a selector-prefixed ABI string: prefix, selector, offset word and length
/// word. This is the layout of `Error(string)` revert data.
pub const SELECTOR_STRING_HEADER_LEN: usize =
    HEX_PREFIX_LEN + SELECTOR_HEX_LEN + WORD_HEX_LEN + WORD_HEX_LEN;

/// Header in front of a plain ABI-encoded `string` return value: prefix, offset word and length
/// word.
pub const STRING_RETURN_HEADER_LEN: usize = HEX_PREFIX_LEN + WORD_HEX_LEN + WORD_HEX_LEN;

/// Default number of hex characters stripped from a call response before decoding.
pub const DEFAULT_HEADER_LEN: usize = SELECTOR_STRING_HEADER_LEN;
