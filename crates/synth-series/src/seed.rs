pub const FALLBACK_IDENTIFIER: &str = "x";

/// Rolling 31x hash over the identifier's UTF-16 code units, wrapped to
/// 32-bit signed arithmetic at every step. Empty or missing identifiers hash
/// as [`FALLBACK_IDENTIFIER`].
pub fn seed(identifier: Option<&str>) -> u32 {
    let identifier = match identifier {
        Some(value) if !value.is_empty() => value,
        _ => FALLBACK_IDENTIFIER,
    };

    let hash = identifier.encode_utf16().fold(0_i32, |hash, code| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(code))
    });

    hash.unsigned_abs()
}
