use crate::error::StreamError;
use bitvec::prelude::*;

type StreamResult<T> = std::result::Result<T, StreamError>;

/// Sequential MSB-first bit cursor over a capture buffer
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            bits: data.view_bits::<Msb0>(),
            pos: 0,
        }
    }

    /// Current bit offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining_bits(&self) -> usize {
        self.bits.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.bits.len()
    }

    fn check_available(&self, bits: usize) -> StreamResult<()> {
        let available = self.remaining_bits();
        if bits > available {
            return Err(StreamError::Truncated {
                requested: bits,
                available,
                bit_position: self.pos,
            });
        }
        Ok(())
    }

    /// Read the next `bits` bits as an unsigned integer, most significant bit first
    pub fn read(&mut self, bits: usize) -> StreamResult<u64> {
        if bits > 64 {
            return Err(StreamError::InvalidWidth(bits));
        }
        if bits == 0 {
            return Ok(0);
        }
        self.check_available(bits)?;

        let value = self.bits[self.pos..self.pos + bits].load_be::<u64>();
        self.pos += bits;
        Ok(value)
    }

    /// Read `bits` bits packed MSB-first into bytes.
    /// A trailing partial byte keeps its bits in the high positions.
    pub fn read_packed(&mut self, bits: usize) -> StreamResult<Vec<u8>> {
        self.check_available(bits)?;

        let mut bytes = Vec::with_capacity((bits + 7) / 8);
        for chunk in self.bits[self.pos..self.pos + bits].chunks(8) {
            let byte = chunk.load_be::<u8>();
            bytes.push(byte << (8 - chunk.len()));
        }
        self.pos += bits;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_is_msb_first() {
        let data = [0b1010_0000u8];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(1).unwrap(), 1);
        assert_eq!(reader.read(1).unwrap(), 0);
        assert_eq!(reader.read(2).unwrap(), 0b10);
        assert_eq!(reader.position(), 4);
        assert_eq!(reader.remaining_bits(), 4);
    }

    #[test]
    fn test_read_across_byte_boundary() {
        let data = [0x12u8, 0x34, 0x56];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(4).unwrap(), 0x1);
        assert_eq!(reader.read(12).unwrap(), 0x234);
        assert_eq!(reader.read(3).unwrap(), 0b010);
        assert_eq!(reader.read(5).unwrap(), 0b10110);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn test_read_full_64_bits() {
        let data = 0x4563_9182_44F4_0000u64.to_be_bytes();
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(64).unwrap(), 0x4563_9182_44F4_0000);
        assert_eq!(reader.remaining_bits(), 0);
    }

    #[test]
    fn test_unaligned_64_bit_read() {
        let data = [0xFFu8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0F];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(4).unwrap(), 0xF);
        assert_eq!(reader.read(64).unwrap(), 0xF000_0000_0000_0000);
        assert_eq!(reader.read(4).unwrap(), 0xF);
    }

    #[test]
    fn test_truncated_read_does_not_advance() {
        let data = [0xABu8, 0xCD];
        let mut reader = BitReader::new(&data);
        reader.read(10).unwrap();
        let err = reader.read(7).unwrap_err();
        assert_eq!(
            err,
            StreamError::Truncated {
                requested: 7,
                available: 6,
                bit_position: 10
            }
        );
        assert_eq!(reader.position(), 10);
        assert_eq!(reader.read(6).unwrap(), 0x0D);
    }

    #[test]
    fn test_width_over_64_rejected() {
        let data = [0u8; 16];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read(65), Err(StreamError::InvalidWidth(65)));
        assert_eq!(reader.read(0), Ok(0));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_packed_pads_partial_byte() {
        let data = [0b1100_1010u8, 0b1111_0000];
        let mut reader = BitReader::new(&data);
        reader.read(2).unwrap();
        // 0b00_1010_11 followed by 0b11_0 → [0b0010_1011, 0b1100_0000]
        let bytes = reader.read_packed(11).unwrap();
        assert_eq!(bytes, vec![0b0010_1011, 0b1100_0000]);
        assert_eq!(reader.position(), 13);
    }

    #[test]
    fn test_empty_buffer() {
        let mut reader = BitReader::new(&[]);
        assert!(reader.is_exhausted());
        assert_eq!(reader.remaining_bits(), 0);
        assert!(reader.read(1).is_err());
        assert_eq!(reader.read_packed(0).unwrap(), Vec::<u8>::new());
    }
}
