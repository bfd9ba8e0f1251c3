//! Entry name hashing.

/// Hashes an entry name into the identifier archives address it by.
///
/// The name is upper-cased, then every character folds into the accumulator
/// as `acc * 61 + (codepoint - 32)` with 32-bit wraparound.
#[must_use]
pub fn name_hash(name: &str) -> i32 {
    name.chars()
        .flat_map(char::to_uppercase)
        .fold(0i32, |acc, ch| {
            acc.wrapping_mul(61)
                .wrapping_add(u32::from(ch) as i32)
                .wrapping_sub(32)
        })
}
