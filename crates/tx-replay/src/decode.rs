use alloy_primitives::{Bytes, U256};
use tracing::trace;

use crate::{
    constants::{DEFAULT_HEADER_LEN, HEX_PREFIX_LEN, WORD_HEX_LEN},
    DecodeError, ReplayError, Result,
};

/// A call response split at the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedResponse {
    /// Bytes after the header, ABI padding included.
    pub remainder: Bytes,
    /// The remainder decoded as UTF-8, cut to the length declared in the header or, when the
    /// header declares none, with trailing zero padding removed.
    pub text: String,
}

/// Strips a fixed-size header from a call response and decodes the rest as UTF-8.
///
/// The header length counts hex characters of the `0x`-prefixed response, so the default of
/// [`DEFAULT_HEADER_LEN`] skips the prefix, a selector and two ABI words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseDecoder {
    header_len: usize,
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self { header_len: DEFAULT_HEADER_LEN }
    }
}

impl ResponseDecoder {
    /// Creates a decoder that strips `header_len` hex characters.
    ///
    /// The length must cover at least the `0x` prefix and be even so the cut falls on a byte
    /// boundary.
    pub fn new(header_len: usize) -> Result<Self> {
        if header_len < HEX_PREFIX_LEN || header_len % 2 != 0 {
            return Err(ReplayError::InvalidHeaderLength(header_len));
        }
        Ok(Self { header_len })
    }

    /// Number of hex characters stripped, `0x` prefix included.
    pub const fn header_len(&self) -> usize {
        self.header_len
    }

    /// Number of response bytes covered by the header.
    const fn header_bytes(&self) -> usize {
        (self.header_len - HEX_PREFIX_LEN) / 2
    }

    /// String length declared by the ABI length word closing the header.
    fn declared_len(&self, response: &[u8]) -> Option<usize> {
        let end = self.header_bytes();
        let word = response.get(end.checked_sub(WORD_HEX_LEN / 2)?..end)?;
        usize::try_from(U256::from_be_slice(word)).ok()
    }

    /// Splits the response after the header and decodes the remainder.
    ///
    /// Responses not longer than the header yield an empty remainder and an empty string. A
    /// non-zero length word that fits the remainder bounds the text, so NUL characters inside
    /// the string survive. Otherwise trailing zero bytes are treated as padding.
    pub fn decode(&self, response: &[u8]) -> Result<DecodedResponse> {
        let remainder = response.get(self.header_bytes()..).unwrap_or_default();
        trace!(
            response_len = response.len(),
            remainder_len = remainder.len(),
            "Splitting call response"
        );

        let end = self
            .declared_len(response)
            .filter(|len| (1..=remainder.len()).contains(len))
            .unwrap_or_else(|| {
                remainder.iter().rposition(|byte| *byte != 0).map_or(0, |idx| idx + 1)
            });
        let text = String::from_utf8(remainder[..end].to_vec()).map_err(DecodeError::from)?;

        Ok(DecodedResponse { remainder: Bytes::copy_from_slice(remainder), text })
    }
}
