//! Field kernel for `GF(p)`, `p = 2^255 - 19` (layers L2 and L3).
//!
//! Every function below operates on a fixed-length, little-endian
//! [`Fe`] (`[Word; LEN]`, `LEN = 8`) and fuses its arithmetic with the
//! pseudo-Mersenne reduction built on the identity `2^255 ≡ 19 (mod p)`.
//!
//! ## The output tightness contract
//!
//! Every function here accepts operands anywhere in `[0, 2^256)` and
//! produces a result in `[0, 2p)`, not necessarily the canonical
//! least-non-negative residue. Call [`fred`] when a canonical value is
//! required (encoding, equality against a known constant, etc.).
//! [`cmp`] and [`cmpp`] already canonicalize internally, so callers
//! never need to call [`fred`] before comparing.
//!
//! ## Buffers, not objects
//!
//! There is no owning field-element type at this layer: every
//! function takes caller-provided `&Fe` / `&mut Fe` buffers, mirroring
//! a C calling convention, because this is the layer external
//! collaborators (point arithmetic, scalar multiplication, signature
//! and key-exchange envelopes) are expected to call directly. A thin
//! [`FieldElement`] wrapper with the usual operator overloads sits on
//! top of this for callers who want value semantics.
//!
//! ## Masked inversion is the caller's job
//!
//! [`inv`] is the one operation in this module that is *not*
//! constant-time: the binary Euclidean algorithm it runs takes a
//! data-dependent number of steps. Safe use in the presence of a
//! secret operand requires multiplicative masking: pick a fresh random
//! field element `u`, invert `a * u`, then multiply the result by `u`
//! to recover `a^-1` without ever calling `inv` on `a` itself. This
//! crate has no RNG dependency and deliberately does not perform that
//! masking internally. See spec.md §9's "Inverter masking is a caller
//! obligation" note.

mod element;
pub mod constants;

pub use element::FieldElement;

use crate::mpi;
use crate::word::{DoubleWord, Word, C, C2, LEN, TOP_WORD_MASK};
use constants::P;

/// A field element buffer: 8 little-endian 32-bit words, `LEN = 8`.
pub type Fe = [Word; LEN];

/// The one way a field operation in this crate can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// [`inv`] was called on the zero field element, which has no
    /// multiplicative inverse.
    InversionOfZero,
}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldError::InversionOfZero => write!(f, "attempted to invert the zero field element"),
        }
    }
}

/// `r <- p`.
pub fn setp(r: &mut Fe) {
    mpi::copy(r, &P);
}

/// Compares `a` against the hard-coded word pattern of `p`, without
/// canonicalizing first (`a`'s 256-bit domain already matches `p`'s).
pub fn cmpp(a: &Fe) -> i32 {
    mpi::cmp(a, &P)
}

/// `r <- a + b`.
///
/// The top word of the raw sum `a[7] + b[7]` (up to 33 bits) is split
/// at bit 31: the low 31 bits become the new top word, and the bits
/// above it (at most `3`, since each addend contributes at most one
/// such bit) are multiplied by `c` and folded into the carry chain
/// that drives the rest of the addition. This single pass leaves the
/// result in `[0, 2p)` per the output tightness contract.
pub fn add(r: &mut Fe, a: &Fe, b: &Fe) {
    let top_sum = a[LEN - 1] as DoubleWord + b[LEN - 1] as DoubleWord;
    let msw = (top_sum & TOP_WORD_MASK as DoubleWord) as Word;

    let mut carry: DoubleWord = C as DoubleWord * (top_sum >> 31);
    for i in 0..LEN - 1 {
        let sum = carry + a[i] as DoubleWord + b[i] as DoubleWord;
        r[i] = sum as Word;
        carry = sum >> 32;
    }
    r[LEN - 1] = msw + carry as Word;
}

/// `r <- 4p + a - b`, a non-negative quantity that folds to `[0, 2p)`.
///
/// Rather than a signed accumulator, this uses the unsigned
/// pre-biased formulation spec.md §9 documents as an alternative to
/// the arithmetic-shift form: every word of `4p` is large enough
/// (`4 * P[i]`, each comfortably above any possible borrow) that the
/// running accumulator never needs to go negative, so plain
/// [`DoubleWord`] arithmetic suffices. The top word is handled first
/// and independently, exactly as in [`add`], because its raw
/// combination (`4 * P[7] + a[7] - b[7]`) does not depend on any
/// carry produced by the lower words.
pub fn sub(r: &mut Fe, a: &Fe, b: &Fe) {
    let four_p_top = 4 * P[LEN - 1] as DoubleWord;
    let top = four_p_top + a[LEN - 1] as DoubleWord - b[LEN - 1] as DoubleWord;
    let msw = (top & TOP_WORD_MASK as DoubleWord) as Word;

    let mut carry: DoubleWord = C as DoubleWord * (top >> 31);
    for i in 0..LEN - 1 {
        let four_p_i = 4 * P[i] as DoubleWord;
        let mut sum = carry + four_p_i + a[i] as DoubleWord;
        sum -= b[i] as DoubleWord;
        r[i] = sum as Word;
        carry = sum >> 32;
    }
    r[LEN - 1] = msw + carry as Word;
}

/// Branch-free conditional negation: `r <- -a mod p` when `neg & 1 ==
/// 1`, `r <- a mod p` when `neg & 1 == 0`.
///
/// Both branches are unified into a single accumulation. Let `m` be
/// `0` or all-ones depending on `neg`'s LSB. Every limb of `a` is
/// XOR-ed with `m` (the identity when `m == 0`, bitwise complement,
/// i.e. `2^256 - 1 - a`, when `m` is all-ones), and the running
/// accumulator is offset by `(2c - 1)` whenever `m` is all-ones. That
/// offset is exactly what turns "`2p +` (bitwise complement of `a`)"
/// into "`4p - a`": complementing every bit of an 8-word value
/// computes `2^256 - 1 - a`, and `2p - (2^256 - 1) = -(2c - 1)` because
/// `2p = 2^256 - 2c`. The reduction itself reuses the same top-word
/// split-and-fold scheme as [`sub`].
pub fn cneg(r: &mut Fe, a: &Fe, neg: Word) {
    let mask = 0u32.wrapping_sub(neg & 1);
    let offset: i64 = if mask == 0 {
        0
    } else {
        -(constants::C2_MINUS_1 as i64)
    };

    let b_top = a[LEN - 1] ^ mask;
    let top = 2 * P[LEN - 1] as i64 + b_top as i64;
    let msw = (top & TOP_WORD_MASK as i64) as Word;

    let mut carry: i64 = C as i64 * (top >> 31) + offset;
    for i in 0..LEN - 1 {
        let b_i = a[i] ^ mask;
        let sum = carry + 2 * P[i] as i64 + b_i as i64;
        r[i] = sum as Word;
        carry = sum >> 32;
    }
    r[LEN - 1] = msw.wrapping_add(carry as Word);
}

/// `r <- a / 2 mod p`.
///
/// If `a` is even this is an exact shift. If `a` is odd, `p` (which is
/// odd) is added first so the sum is even, then the whole thing is
/// shifted. `(a + p) / 2 ≡ a / 2 (mod p)` because `p ≡ 0`. The
/// conditional add is [`mpi::cadd`] keyed on `a[0]`'s LSB, and the
/// shift folds in the carry bit `cadd` produced out of the top word
/// so no bit is lost across the word boundary.
pub fn hlv(r: &mut Fe, a: &Fe) {
    let odd = a[0] & 1;
    let mut sum = [0 as Word; LEN];
    let carry_out = mpi::cadd(&mut sum, a, &P, odd);

    for i in 0..LEN - 1 {
        r[i] = (sum[i] >> 1) | ((sum[i + 1] & 1) << 31);
    }
    r[LEN - 1] = (sum[LEN - 1] >> 1) | (carry_out << 31);
}

/// `r <- a * b`.
///
/// 1. The full 16-word product is formed by the operand-scanning
///    schoolbook multiplier in [`mpi::mul`].
/// 2. **First pass:** each high word `t[i + 8]` is scaled by `2c` and
///    folded into `t[i]`, for `i` in `0..8`. This is the
///    `2^256 ≡ 2c (mod p)` identity applied word-by-word, collapsing
///    the 16-word product to a 9-word one (8 words plus a small
///    leftover carry).
/// 3. **Second pass:** that leftover carry and the new top word are
///    treated exactly like [`add`]'s raw top-word sum, split at bit
///    31, the excess folded in via `c`, leaving a result in `[0, 2p)`.
pub fn mul(r: &mut Fe, a: &Fe, b: &Fe) {
    let mut t = [0 as Word; 2 * LEN];
    mpi::mul(&mut t, a, b);

    let mut lo = [0 as Word; LEN];
    let mut carry: DoubleWord = 0;
    for i in 0..LEN {
        let acc = C2 as DoubleWord * t[i + LEN] as DoubleWord + t[i] as DoubleWord + carry;
        lo[i] = acc as Word;
        carry = acc >> 32;
    }

    let top_combined = (carry << 32) | lo[LEN - 1] as DoubleWord;
    let msw = (top_combined & TOP_WORD_MASK as DoubleWord) as Word;
    let mut carry2: DoubleWord = C as DoubleWord * (top_combined >> 31);
    for i in 0..LEN - 1 {
        let sum = lo[i] as DoubleWord + carry2;
        r[i] = sum as Word;
        carry2 = sum >> 32;
    }
    r[LEN - 1] = msw + carry2 as Word;
}

/// `r <- a^2`.
///
/// Squaring is multiplication with both operands equal. The reference
/// design exploits that symmetry to roughly halve the number of limb
/// products; this rewrite prioritizes the correctness-focused budget
/// spec.md §2 explicitly allows ("hand-optimized equivalents... not
/// required for a correctness-focused rewrite") and delegates to
/// [`mul`] directly. The output is bit-for-bit identical to
/// `mul(r, a, a)` either way.
pub fn sqr(r: &mut Fe, a: &Fe) {
    let a2 = *a;
    mul(r, &a2, &a2);
}

/// `r <- a * b` where `b` is a single word.
///
/// The 9-word product is formed directly (a plain scalar multiply),
/// then reduced in one pass: the top word's bit 31 and the 9th word
/// are the only places a multiple of `2^255` can appear, so both are
/// folded through `c` into the carry seed for a propagation through
/// the remaining low words, the same top-word-first structure as
/// [`add`] and [`sub`].
pub fn mul32(r: &mut Fe, a: &Fe, b: Word) {
    let mut t = [0 as Word; LEN + 1];
    let mut carry: DoubleWord = 0;
    for i in 0..LEN {
        let prod = a[i] as DoubleWord * b as DoubleWord + carry;
        t[i] = prod as Word;
        carry = prod >> 32;
    }
    t[LEN] = carry as Word;

    let msw = t[LEN - 1] & TOP_WORD_MASK;
    let top_bit = t[LEN - 1] >> 31;
    let mut carry2: DoubleWord =
        C2 as DoubleWord * t[LEN] as DoubleWord + C as DoubleWord * top_bit as DoubleWord;
    for i in 0..LEN - 1 {
        let sum = t[i] as DoubleWord + carry2;
        r[i] = sum as Word;
        carry2 = sum >> 32;
    }
    r[LEN - 1] = msw + carry2 as Word;
}

/// `r <- a mod p`, canonical (`r` in `[0, p)`).
///
/// Two rounds of "subtract `p`, conditionally add it back if that
/// underflowed". One round is not enough because an externally
/// supplied `a` can be as large as `2^256 - 1`, which is slightly more
/// than `2p`; two rounds always bring it below `p` (spec.md §4.3).
/// Both the subtraction and the conditional re-add are the
/// constant-time [`mpi::sub`] / [`mpi::cadd`] primitives, so `fred`
/// itself never branches on the value of `a`.
pub fn fred(r: &mut Fe, a: &Fe) {
    let mut x = *a;
    for _ in 0..2 {
        let prev = x;
        let borrow = mpi::sub(&mut x, &prev, &P);
        let prev = x;
        mpi::cadd(&mut x, &prev, &P, borrow);
    }
    *r = x;
}

/// Compares the mathematical values of `a` and `b`: `-1`, `0`, or `1`.
///
/// Both operands are canonicalized via [`fred`] into scratch buffers
/// first, then compared with [`mpi::cmp`]'s constant-time bit-parallel
/// accumulator.
pub fn cmp(a: &Fe, b: &Fe) -> i32 {
    let mut ca = [0 as Word; LEN];
    fred(&mut ca, a);
    let mut cb = [0 as Word; LEN];
    fred(&mut cb, b);
    mpi::cmp(&ca, &cb)
}

/// `r <- a^-1 mod p`.
///
/// Binary Extended Euclidean Algorithm maintaining `(ux, vx, x1, x2)`
/// with the invariant that `x1` and `x2` track the Bezout
/// coefficients of `ux` and `vx` against `a` and `p` as the algorithm
/// halves and subtracts its way down to a gcd of `1`. `a` is first
/// canonicalized with [`fred`] (equivalent to, and replacing, the
/// reference's "reduce `ux` by repeated subtraction of `vx`" guard
/// step for inputs greater than `p`).
///
/// Unlike every other function in this module, `inv` is **not**
/// constant-time: the number of loop iterations and the branches
/// taken depend on the bit pattern of `a`. See the module-level docs
/// for the multiplicative-masking contract this implies for callers
/// holding a secret `a`.
///
/// # Errors
///
/// Returns [`FieldError::InversionOfZero`] if `a ≡ 0 (mod p)`. `r` is
/// left unmodified in that case.
pub fn inv(r: &mut Fe, a: &Fe) -> Result<(), FieldError> {
    let mut ux = [0 as Word; LEN];
    fred(&mut ux, a);
    if ux == constants::ZERO {
        return Err(FieldError::InversionOfZero);
    }

    let mut vx = P;
    let mut x1 = constants::ONE;
    let mut x2 = constants::ZERO;
    let mut uvlen = LEN;

    while mpi::cmpw(&ux[..uvlen], 1) != 0 && mpi::cmpw(&vx[..uvlen], 1) != 0 {
        while ux[0] & 1 == 0 {
            let prev_ux = ux;
            mpi::shr(&mut ux[..uvlen], &prev_ux[..uvlen]);
            let prev_x1 = x1;
            hlv(&mut x1, &prev_x1);
        }
        while vx[0] & 1 == 0 {
            let prev_vx = vx;
            mpi::shr(&mut vx[..uvlen], &prev_vx[..uvlen]);
            let prev_x2 = x2;
            hlv(&mut x2, &prev_x2);
        }

        if mpi::cmp(&ux[..uvlen], &vx[..uvlen]) >= 0 {
            let prev_ux = ux;
            mpi::sub(&mut ux[..uvlen], &prev_ux[..uvlen], &vx[..uvlen]);
            let prev_x1 = x1;
            sub(&mut x1, &prev_x1, &x2);
        } else {
            let prev_vx = vx;
            mpi::sub(&mut vx[..uvlen], &prev_vx[..uvlen], &ux[..uvlen]);
            let prev_x2 = x2;
            sub(&mut x2, &prev_x2, &x1);
        }

        if uvlen > 1 && ux[uvlen - 1] == 0 && vx[uvlen - 1] == 0 {
            uvlen -= 1;
        }
    }

    *r = if mpi::cmpw(&ux[..uvlen], 1) == 0 { x1 } else { x2 };
    Ok(())
}
