//! Constant-time arithmetic core for Curve25519/Ed25519: prime-field
//! arithmetic over `GF(2^255 - 19)` built on a multi-precision integer
//! kernel, sized for resource-constrained 8/16/32-bit targets.
//!
//! This crate is the arithmetic floor a point-arithmetic or
//! signature/key-exchange layer is built on. It does not know what a
//! curve point, a scalar, or a signature is. It knows how to add,
//! subtract, negate, halve, multiply and invert residues modulo a
//! pseudo-Mersenne prime, and how to add, subtract, multiply and
//! compare the plain multi-precision integers those operations are
//! built from.
//!
//! # Layering
//!
//! - [`word`] — the fixed word size and the wider accumulator types
//!   every carry chain above it is built from.
//! - [`mpi`] — little-endian multi-precision integer arithmetic over
//!   caller-chosen-length `Word` slices: addition, subtraction,
//!   schoolbook multiplication, shifting, and constant-time
//!   three-way comparison. General-purpose, no notion of a modulus.
//! - [`field`] — the fixed `LEN`-word field kernel fused with
//!   pseudo-Mersenne reduction (`2^255 ≡ 19 (mod p)`), plus the
//!   composite operations (full reduction, comparison, inversion)
//!   built on top of it.
//!
//! # No allocation, no panics in the published contract, `no_std`
//!
//! Every function takes caller-owned, fixed-size buffers and neither
//! allocates nor frees memory. None of the constant-time functions
//! branch or index on secret data; [`field::inv`] is the sole
//! documented exception, and its module docs describe the masking a
//! caller must apply to use it safely on a secret operand.
#![no_std]
#![warn(missing_docs)]

pub mod field;
pub mod mpi;
pub mod word;

pub use field::{Fe, FieldElement, FieldError};
pub use word::{Word, LEN};
