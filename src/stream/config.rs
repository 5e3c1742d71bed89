use crate::ByteOrder;

/// Default byte caps used by the `*_safe` varint operations.
///
/// Each cap counts the total number of bytes a bounded decode may consume (or a bounded encode
/// may emit), including the terminal byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarintLimits {
    /// Cap for ULEB128 and ULEB128p1 (default: 16)
    pub uleb128_max_bytes: usize,

    /// Cap for SLEB128 (default: 5)
    pub sleb128_max_bytes: usize,
}

impl Default for VarintLimits {
    fn default() -> Self {
        Self {
            uleb128_max_bytes: 16,
            sleb128_max_bytes: 5,
        }
    }
}

impl VarintLimits {
    /// Caps large enough to hold any complete 64-bit encoding.
    #[must_use]
    pub fn wide() -> Self {
        Self {
            uleb128_max_bytes: crate::stream::leb128::MAX_LEB128_LEN,
            sleb128_max_bytes: crate::stream::leb128::MAX_LEB128_LEN,
        }
    }
}

/// Construction-time settings of a stream facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamConfig {
    /// Byte order for fixed-width values
    pub byte_order: ByteOrder,

    /// Caps for the `*_safe` varint operations
    pub limits: VarintLimits,
}

impl StreamConfig {
    /// Configuration with the given byte order and default limits.
    #[must_use]
    pub fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            limits: VarintLimits::default(),
        }
    }

    /// Replace the varint limits.
    #[must_use]
    pub fn with_limits(mut self, limits: VarintLimits) -> Self {
        self.limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.byte_order, ByteOrder::Little);
        assert_eq!(config.limits.uleb128_max_bytes, 16);
        assert_eq!(config.limits.sleb128_max_bytes, 5);
    }

    #[test]
    fn with_limits() {
        let config = StreamConfig::new(ByteOrder::Big).with_limits(VarintLimits::wide());
        assert_eq!(config.byte_order, ByteOrder::Big);
        assert_eq!(config.limits.sleb128_max_bytes, 10);
    }
}
