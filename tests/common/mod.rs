//! Hex and test-vector-file helpers shared by the integration tests.
//!
//! This module is layer L4 in spec.md's terms: it exists only to feed
//! and check the arithmetic core from tests, and links `std` freely
//! (every integration test crate links `std` regardless of the
//! library's own `#![no_std]`), unlike anything under `src/`.

#![allow(dead_code)]

use gf25519::word::{Word, LEN};
use gf25519::Fe;

/// Decodes a hex string (an optional `0x`/`0X` prefix followed by
/// exactly `2 * LEN * 4` digits) into a little-endian [`Fe`],
/// most-significant byte first in the string per the test-vector
/// file's convention (spec.md §6: `0x…`).
pub fn hex_to_fe(s: &str) -> Fe {
    let bytes = hex_to_bytes(s);
    assert_eq!(bytes.len(), LEN * 4, "hex string is not exactly LEN words wide");

    let mut fe: Fe = [0 as Word; LEN];
    for (i, word) in fe.iter_mut().enumerate() {
        let start = bytes.len() - (i + 1) * 4;
        let chunk = [bytes[start], bytes[start + 1], bytes[start + 2], bytes[start + 3]];
        *word = Word::from_be_bytes(chunk);
    }
    fe
}

/// Encodes a [`Fe`] back to the same big-endian-string convention
/// [`hex_to_fe`] reads.
pub fn fe_to_hex(fe: &Fe) -> String {
    let mut bytes = Vec::with_capacity(LEN * 4);
    for word in fe.iter().rev() {
        bytes.extend_from_slice(&word.to_be_bytes());
    }
    bytes_to_hex(&bytes)
}

fn hex_to_bytes(s: &str) -> Vec<u8> {
    let s = s.trim();
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    assert_eq!(s.len() % 2, 0, "hex string has an odd number of digits");
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).expect("invalid hex digit"))
        .collect()
}

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

/// A single `op1` / `op2` / `res` record from a test-vector file.
/// `op2` is `None` for unary operations (halving, negation), which
/// spec.md §6 says omit the `op2:` line entirely.
pub struct Vector {
    pub op1: Fe,
    pub op2: Option<Fe>,
    pub res: Fe,
}

/// Operations named in the spec.md §6 header line that take a single
/// operand (no `op2:` line between `op1:` and `res:`).
const UNARY_HEADERS: &[&str] = &["Squaring", "Halving", "Negation"];

/// Parses the test-vector file format from spec.md §6: a header line
/// naming the operation, followed by repeated `op1:` / (`op2:`) /
/// `res:` groups, one hex value per line. `op2:` is absent for unary
/// operations (see [`UNARY_HEADERS`]).
pub fn parse_vectors(contents: &str) -> (String, Vec<Vector>) {
    let mut lines = contents.lines().map(str::trim).filter(|l| !l.is_empty());
    let header = lines.next().expect("vector file has no header line").to_string();
    let is_unary = UNARY_HEADERS.contains(&header.as_str());

    let mut vectors = Vec::new();
    loop {
        let Some(op1_line) = lines.next() else { break };
        let op1 = hex_to_fe(strip_field(op1_line, "op1:"));

        let op2 = if is_unary {
            None
        } else {
            let op2_line = lines.next().expect("op1 line with no matching op2 line");
            Some(hex_to_fe(strip_field(op2_line, "op2:")))
        };

        let res_line = lines.next().expect("operand line(s) with no matching res line");
        let res = hex_to_fe(strip_field(res_line, "res:"));
        vectors.push(Vector { op1, op2, res });
    }

    (header, vectors)
}

fn strip_field<'a>(line: &'a str, prefix: &str) -> &'a str {
    line.strip_prefix(prefix)
        .unwrap_or_else(|| panic!("expected line starting with {prefix:?}, got {line:?}"))
        .trim()
}
