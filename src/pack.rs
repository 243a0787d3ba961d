// pack.rs
//
// Copyright (c) 2020-2023  Douglas Lau
//
//! Variable-width code packing (least significant bit first)
use crate::lzw::Code;

/// Packs codes into a continuous LSB-first bit stream
#[derive(Debug, Default)]
pub struct BitPacker {
    /// Packed bytes
    buffer: Vec<u8>,
    /// Pending bits
    code: u32,
    /// Number of pending bits
    n_bits: u8,
}

impl BitPacker {
    /// Create a new bit packer
    pub fn new() -> Self {
        Self::default()
    }

    /// Pack the low `bits` bits of a code
    pub fn push(&mut self, code: Code, bits: u8) {
        debug_assert!(bits <= 16);
        let mask = (1u32 << bits) - 1;
        self.code |= (u32::from(code) & mask) << self.n_bits;
        self.n_bits += bits;
        while self.n_bits >= 8 {
            self.buffer.push(self.code as u8);
            self.code >>= 8;
            self.n_bits -= 8;
        }
    }

    /// Finish packing, zero-filling the last byte
    pub fn finish(mut self) -> Vec<u8> {
        if self.n_bits > 0 {
            self.buffer.push(self.code as u8);
        }
        self.buffer
    }
}

/// Pack a sequence of `(code, bits)` pairs into bytes
pub fn pack_codes(codes: &[(Code, u8)]) -> Vec<u8> {
    let mut packer = BitPacker::new();
    for (code, bits) in codes {
        packer.push(*code, *bits);
    }
    packer.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lsb_first() {
        // bit stream: 100 101 1100 -> bytes 0b1110_1001, 0b0000_0000
        assert_eq!(pack_codes(&[(1, 3), (5, 3), (3, 4)]), vec![0xE9, 0x00]);
        assert_eq!(pack_codes(&[(0xABC, 12), (0x5, 4)]), vec![0xBC, 0x5A]);
    }

    #[test]
    fn code_spans_bytes() {
        assert_eq!(pack_codes(&[(0x7F, 7), (0x1FF, 9)]), vec![0xFF, 0xFF]);
        assert_eq!(pack_codes(&[(0, 7), (0x1FF, 9)]), vec![0x80, 0xFF]);
    }

    #[test]
    fn length_and_padding() {
        assert!(pack_codes(&[]).is_empty());
        assert_eq!(pack_codes(&[(1, 1)]), vec![0x01]);
        let codes = [(8, 4), (3, 4), (17, 5), (255, 9)];
        let bytes = pack_codes(&codes);
        assert_eq!(bytes.len(), (4 + 4 + 5 + 9 + 7) / 8);
        // 22 bits used, top 2 bits of last byte are zero
        assert_eq!(bytes[2] & 0b1100_0000, 0);
    }

    #[test]
    fn extra_bits_masked() {
        assert_eq!(pack_codes(&[(0xFF, 4), (0, 4)]), vec![0x0F]);
    }
}
