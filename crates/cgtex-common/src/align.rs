//! Alignment arithmetic.

/// Number of zero bytes needed to move `position` up to the next multiple of `alignment`.
///
/// Returns 0 when `position` is already aligned.
#[inline]
pub const fn padding_for(position: u64, alignment: u64) -> u64 {
    (alignment - position % alignment) % alignment
}
