//! Base-62 encoding of sequence values into short code payloads.

/// The 62-symbol alphabet: digits first, then lowercase, then uppercase.
///
/// The ordering is load-bearing: `encode(1)` is `'1'`, so a fresh generator
/// with shard id `A0` and total length 8 produces `A0000001` first.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The symbol encoding zero, also used to left-pad payloads to a fixed width.
pub const ZERO_SYMBOL: char = '0';

/// Encodes a non-negative integer as a base-62 string.
///
/// `encode(0)` returns `"0"`. For any other value the result is the
/// minimal-length representation, most-significant symbol first, with no
/// leading zero symbol. Pure and deterministic.
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return ZERO_SYMBOL.to_string();
    }

    // u64::MAX needs at most 11 base-62 digits.
    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % 62) as usize] as char);
        n /= 62;
    }
    digits.iter().rev().collect()
}
