//! Fixed-width word primitives (layer L0).
//!
//! Every arithmetic layer above this one is built from a single word
//! size. Widening a pair of words into a double-word is what lets the
//! rest of the kernel propagate carries and borrows without ever
//! overflowing the type doing the carrying.

/// The fundamental unit of storage and arithmetic: an unsigned 32-bit
/// word. Field elements and MPIs alike are arrays of `Word`.
pub type Word = u32;

/// Double-width unsigned accumulator. Holds any sum or product of two
/// [`Word`] values without loss.
pub type DoubleWord = u64;

/// Signed double-width accumulator, used where an intermediate value
/// in a carry chain must be allowed to go negative (subtraction,
/// conditional negation, halving).
pub type SignedDoubleWord = i64;

/// Number of bits in a [`Word`].
pub const WORD_BITS: u32 = Word::BITS;

/// Exponent of the pseudo-Mersenne prime `p = 2^K - C`.
pub const K: u32 = 255;

/// Small subtrahend of the pseudo-Mersenne prime `p = 2^K - C`.
pub const C: Word = 19;

/// Number of [`Word`]s needed to hold a `K`-bit value, rounded up to a
/// whole word. This is the fixed length of every field element.
pub const LEN: usize = (K as usize).div_ceil(WORD_BITS as usize);

/// Mask of the bits below position `K` within the top word of a field
/// element (`K mod WORD_BITS` low bits set). The top word of a field
/// element never needs more than these bits plus the carry folded in
/// by reduction.
pub const TOP_WORD_MASK: Word = (1 << (K % WORD_BITS)) - 1;

/// `2 * C`, used when folding the bit above `TOP_WORD_MASK`'s span
/// back into the accumulator during addition-style reductions.
pub const C2: Word = 2 * C;
