//! CRC-8 appended by the HTU31D to every data word.
//!
//! Generator x⁸ + x⁵ + x⁴ + 1 (0x31), MSB first, initial value 0, no final XOR.  The
//! datasheet describes it as a long division of the left-justified payload by 0x988000.

use crc::{Algorithm, Crc};

#[cfg(feature = "defmt")]
use defmt::Format;

const CRC_8_HTU31D: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0x00,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xa2,
    residue: 0x00,
};

const CRC: Crc<u8> = Crc::<u8>::new(&CRC_8_HTU31D);

/// Longest payload the device ever protects with a single CRC byte
pub const MAX_PAYLOAD_LEN: usize = 3;

/// Reasons a payload failed verification
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CrcError {
    /// Computed CRC differs from the received one
    Mismatch,
    /// Payload length outside 1..=3
    InvalidLength(usize),
}

/// Verify `data` (1 to 3 bytes) against the `received` CRC byte
pub fn verify(data: &[u8], received: u8) -> Result<(), CrcError> {
    if data.is_empty() || data.len() > MAX_PAYLOAD_LEN {
        return Err(CrcError::InvalidLength(data.len()));
    }
    if CRC.checksum(data) == received {
        Ok(())
    } else {
        Err(CrcError::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Bit-serial division as printed in the datasheet
    fn reference(data: &[u8]) -> u8 {
        let mut result: u32 = match *data {
            [b0] => (b0 as u32) << 8,
            [b0, b1] => (b0 as u32) << 16 | (b1 as u32) << 8,
            [b0, b1, b2] => (b0 as u32) << 24 | (b1 as u32) << 16 | (b2 as u32) << 8,
            _ => unreachable!(),
        };
        let mut polynom: u32 = 0x9880_0000;
        let mut msb: u32 = 0x8000_0000;
        let mut mask: u32 = 0xFF80_0000;
        while msb != 0x80 {
            if result & msb != 0 {
                result = ((result ^ polynom) & mask) | (result & !mask);
            }
            msb >>= 1;
            mask >>= 1;
            polynom >>= 1;
        }
        result as u8
    }

    #[test]
    fn known_vectors() {
        assert_eq!(verify(&[0xDC], 0x79), Ok(()));
        assert_eq!(verify(&[0x68, 0x3A], 0x7C), Ok(()));
        assert_eq!(verify(&[0x4E, 0x85], 0x6B), Ok(()));
        assert_eq!(verify(&[0xBE, 0xEF], 0x13), Ok(()));
        assert_eq!(verify(&[0x12, 0x34, 0x56], 0xC1), Ok(()));
        assert_eq!(verify(&[0x00, 0x00], 0x00), Ok(()));
    }

    #[test]
    fn single_bit_flips_fail() {
        let data = [0x68, 0x3A];
        let crc = 0x7C;
        for bit in 0..16 {
            let mut flipped = data;
            flipped[bit / 8] ^= 1 << (bit % 8);
            assert_eq!(verify(&flipped, crc), Err(CrcError::Mismatch), "payload bit {bit}");
        }
        for bit in 0..8 {
            assert_eq!(verify(&data, crc ^ (1 << bit)), Err(CrcError::Mismatch), "crc bit {bit}");
        }
    }

    #[test]
    fn invalid_lengths() {
        assert_eq!(verify(&[], 0x00), Err(CrcError::InvalidLength(0)));
        assert_eq!(verify(&[0; 4], 0x00), Err(CrcError::InvalidLength(4)));
    }

    #[test]
    fn matches_bit_serial_division() {
        for b0 in 0..=255u8 {
            assert_eq!(CRC.checksum(&[b0]), reference(&[b0]));
            for b1 in (0..=255u8).step_by(7) {
                assert_eq!(CRC.checksum(&[b0, b1]), reference(&[b0, b1]));
                let b2 = b0 ^ b1.rotate_left(3);
                assert_eq!(CRC.checksum(&[b0, b1, b2]), reference(&[b0, b1, b2]));
            }
        }
    }
}
