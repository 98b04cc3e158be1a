//! Pure byte-mixing primitives: rotation, XOR, multi-round scrambling,
//! and keyed permutation.
//!
//! Inputs are borrowed, outputs are freshly allocated; nothing here holds
//! state. The scramblers are deterministic and reproducible but not
//! cryptographically secure, and must not be treated as such.

use crate::error::EngineError;

/// Rotate the buffer left by `n` bits, treating it as a single big-endian
/// unsigned integer of `8 * len` bits.
///
/// `n` is reduced modulo the bit width, so a full rotation is the
/// identity. Fails with [`EngineError::InvalidInput`] on an empty buffer.
pub fn rotate_left_bits(data: &[u8], n: usize) -> Result<Vec<u8>, EngineError> {
    if data.is_empty() {
        return Err(EngineError::InvalidInput(
            "rotate_left_bits expected a non-empty buffer",
        ));
    }
    let len = data.len();
    let n = n % (len * 8);
    let byte_shift = n / 8;
    let bit_shift = n % 8;

    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let hi = data[(i + byte_shift) % len];
        if bit_shift == 0 {
            out.push(hi);
        } else {
            let lo = data[(i + byte_shift + 1) % len];
            out.push((hi << bit_shift) | (lo >> (8 - bit_shift)));
        }
    }
    Ok(out)
}

/// Position-wise XOR of two equal-length buffers.
pub fn xor_bytes(a: &[u8], b: &[u8]) -> Result<Vec<u8>, EngineError> {
    if a.len() != b.len() {
        return Err(EngineError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

/// Multi-round scrambler over a non-empty buffer.
///
/// Each round applies three passes in order:
/// 1. Per-byte rotation by `((i + round) % 7) + 1` bits.
/// 2. Neighbor XOR: a single left-to-right in-place pass where byte `i`
///    absorbs byte `(i + 1) % len`. The wrap-around read at the end sees
///    the already-rewritten first byte; this ordering is part of the
///    output contract and must not be reordered or vectorized.
/// 3. Conditional swap of each adjacent even-indexed pair when the byte
///    sum plus the round number is even.
///
/// `rounds = 0` executes no passes and returns the input unchanged (the
/// emptiness check still applies).
pub fn mix_bytes(data: &[u8], rounds: usize) -> Result<Vec<u8>, EngineError> {
    if data.is_empty() {
        return Err(EngineError::InvalidInput(
            "mix_bytes expected a non-empty buffer",
        ));
    }
    let mut buf = data.to_vec();
    let len = buf.len();

    for round in 0..rounds {
        for (i, byte) in buf.iter_mut().enumerate() {
            let shift = ((i + round) % 7) + 1;
            *byte = byte.rotate_left(shift as u32);
        }

        for i in 0..len {
            buf[i] ^= buf[(i + 1) % len];
        }

        for i in (0..len - 1).step_by(2) {
            if (usize::from(buf[i]) + usize::from(buf[i + 1]) + round) % 2 == 0 {
                buf.swap(i, i + 1);
            }
        }
    }
    Ok(buf)
}

/// Deterministic Fisher-Yates-style permutation of `data`'s byte
/// positions, with swap indices drawn from `mix_bytes(key, 2)` instead of
/// randomness.
///
/// Returns `data` unchanged when either input is empty.
pub fn permute_bytes(data: &[u8], key: &[u8]) -> Result<Vec<u8>, EngineError> {
    if data.is_empty() || key.is_empty() {
        return Ok(data.to_vec());
    }
    let mixed_key = mix_bytes(key, 2)?;
    let mut indices: Vec<usize> = (0..data.len()).collect();
    for i in (1..data.len()).rev() {
        let j = usize::from(mixed_key[i % mixed_key.len()]) % (i + 1);
        indices.swap(i, j);
    }
    Ok(indices.iter().map(|&index| data[index]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// XOR of a buffer with itself is all zeros.
    #[test]
    fn xor_with_self_is_zero() {
        let a = [0xAB, 0xCD, 0xEF];
        assert_eq!(xor_bytes(&a, &a).expect("xor"), vec![0, 0, 0]);
    }

    /// XOR is an involution: applying the same mask twice restores input.
    #[test]
    fn xor_is_involution() {
        let a = [1, 2, 3, 4];
        let b = [0xF0, 0x0F, 0xAA, 0x55];
        let once = xor_bytes(&a, &b).expect("xor");
        assert_eq!(xor_bytes(&once, &b).expect("xor"), a.to_vec());
    }

    #[test]
    fn xor_rejects_length_mismatch() {
        let err = xor_bytes(&[1, 2], &[1]).expect_err("mismatch");
        assert_eq!(err, EngineError::LengthMismatch { left: 2, right: 1 });
    }

    /// Rotating by the full bit width is the identity.
    #[test]
    fn rotate_full_width_is_identity() {
        let a = [0x12, 0x34, 0x56];
        assert_eq!(rotate_left_bits(&a, 24).expect("rotate"), a.to_vec());
    }

    /// Rotation composes with its complement back to the input.
    #[test]
    fn rotate_composes_with_complement() {
        let a = [0xDE, 0xAD, 0xBE, 0xEF];
        for n in [1, 7, 8, 13, 31] {
            let rotated = rotate_left_bits(&a, n).expect("rotate");
            let back = rotate_left_bits(&rotated, 32 - n).expect("rotate back");
            assert_eq!(back, a.to_vec(), "n = {n}");
        }
    }

    /// Pinned vectors for cross-byte carry and whole-byte shifts.
    #[test]
    fn rotate_fixed_vectors() {
        assert_eq!(
            rotate_left_bits(&[0x80, 0x01], 1).expect("rotate"),
            vec![0x00, 0x03]
        );
        assert_eq!(
            rotate_left_bits(&[0x80, 0x01], 9).expect("rotate"),
            vec![0x03, 0x00]
        );
        assert_eq!(
            rotate_left_bits(&[0x12, 0x34], 8).expect("rotate"),
            vec![0x34, 0x12]
        );
    }

    #[test]
    fn rotate_rejects_empty_buffer() {
        assert!(matches!(
            rotate_left_bits(&[], 3),
            Err(EngineError::InvalidInput(_))
        ));
    }

    /// Same input and round count always produce the same bytes.
    #[test]
    fn mix_is_deterministic() {
        let data = [7, 11, 13, 17, 19];
        let first = mix_bytes(&data, 3).expect("mix");
        let second = mix_bytes(&data, 3).expect("mix");
        assert_eq!(first, second);
    }

    /// Zero rounds executes no passes: identity after the emptiness check.
    #[test]
    fn mix_zero_rounds_is_identity() {
        let data = [9, 8, 7];
        assert_eq!(mix_bytes(&data, 0).expect("mix"), data.to_vec());
    }

    #[test]
    fn mix_rejects_empty_buffer() {
        assert!(matches!(
            mix_bytes(&[], 3),
            Err(EngineError::InvalidInput(_))
        ));
    }

    /// Pinned vector for the sequential neighbor-XOR pass.
    ///
    /// The last byte of round one must absorb the already-rewritten first
    /// byte (`0x0A`), not its pre-pass value (`0x02`). A pass that reads a
    /// snapshot of the buffer produces `[0x0A, 0x0A]` here instead.
    #[test]
    fn mix_neighbor_xor_reads_in_place() {
        assert_eq!(mix_bytes(&[0x01, 0x02], 1).expect("mix"), vec![0x02, 0x0A]);
    }

    /// Pinned vectors covering odd lengths and multi-round accumulation.
    #[test]
    fn mix_fixed_vectors() {
        assert_eq!(
            mix_bytes(&[0x01, 0x02, 0x03], 1).expect("mix"),
            vec![0x10, 0x0A, 0x12]
        );
        assert_eq!(
            mix_bytes(&[0x01, 0x02, 0x03], 2).expect("mix"),
            vec![0x71, 0x10, 0x31]
        );
    }

    /// A single byte XORs with itself in the neighbor pass and zeroes out.
    #[test]
    fn mix_single_byte_collapses_to_zero() {
        assert_eq!(mix_bytes(&[0x5C], 1).expect("mix"), vec![0x00]);
    }

    /// Empty data or empty key both leave the data untouched.
    #[test]
    fn permute_passes_through_on_empty_inputs() {
        assert_eq!(permute_bytes(&[], &[1, 2]).expect("permute"), Vec::<u8>::new());
        assert_eq!(
            permute_bytes(&[1, 2, 3], &[]).expect("permute"),
            vec![1, 2, 3]
        );
    }

    /// Pinned vector: swap indices come from `mix_bytes(key, 2)`.
    #[test]
    fn permute_fixed_vector() {
        assert_eq!(
            permute_bytes(&[10, 20, 30, 40], &[1, 2, 3]).expect("permute"),
            vec![30, 10, 40, 20]
        );
    }

    /// The output is a rearrangement of the input, never a rewrite.
    #[test]
    fn permute_preserves_multiset() {
        let data = [5, 5, 9, 1, 7, 3];
        let mut permuted = permute_bytes(&data, &[0xAA, 0xBB]).expect("permute");
        permuted.sort_unstable();
        let mut expected = data.to_vec();
        expected.sort_unstable();
        assert_eq!(permuted, expected);
    }

    /// Same (data, key) pair always yields the same arrangement.
    #[test]
    fn permute_is_deterministic() {
        let data = [1, 2, 3, 4, 5, 6, 7, 8];
        let key = [0x42, 0x17];
        assert_eq!(
            permute_bytes(&data, &key).expect("permute"),
            permute_bytes(&data, &key).expect("permute")
        );
    }
}
