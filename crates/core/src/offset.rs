//! The offset register: the single logical cursor shared between the
//! engine's io-offset field and the external provider's string mirror.

use crate::provider::ProviderError;

/// Upper bound on the wire form: `0x` plus sixteen hex digits.
pub const MAX_HEX_LEN: usize = 18;

/// Single-owner 64-bit cursor with a lowercase `0x`-prefixed hex mirror.
///
/// Exactly one register exists per backend regardless of how many
/// descriptors are open; all mutation funnels through seek. The register is
/// plain owned state threaded into the operations that need it — the
/// out-of-band protocol the provider sees stays the same, but nothing here
/// is process-global.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRegister {
    value: u64,
}

impl OffsetRegister {
    pub fn new() -> Self {
        Self { value: 0 }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Absolute positioning.
    pub fn set(&mut self, offset: u64) {
        self.value = offset;
    }

    /// Relative positioning.
    ///
    /// The delta is narrowed to a signed 32-bit value before widening, so
    /// relative seeks beyond that range truncate (see DESIGN.md).
    pub fn advance(&mut self, delta: u64) {
        let narrowed = delta as i32;
        self.value = self.value.wrapping_add(narrowed as i64 as u64);
    }

    /// Render the wire form: lowercase hex digits, `0x`-prefixed.
    pub fn to_hex(&self) -> String {
        format!("{:#x}", self.value)
    }
}

/// Decode a wire-form offset back to its integer value.
///
/// Accepts the `0x`-prefixed form produced by [`OffsetRegister::to_hex`] as
/// well as the bare decimal form (`"0"`) providers start from before the
/// first notification arrives.
pub fn parse_hex_offset(s: &str) -> Result<u64, ProviderError> {
    let parsed = match s.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|_| ProviderError::BadOffset(s.to_string()))
}
