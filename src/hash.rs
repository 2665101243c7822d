use crate::constants::features::{FNV1A64_OFFSET, FNV1A64_PRIME};

/// FNV-1a 64-bit over the UTF-8 bytes of `value`.
///
/// Output is identical on every platform and toolchain.
pub fn fnv1a64(value: &str) -> u64 {
    let mut hash = FNV1A64_OFFSET;
    for byte in value.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV1A64_PRIME);
    }
    hash
}
