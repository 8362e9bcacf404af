//! Test utilities for building synthetic captures.
//!
//! Frames are written bit-contiguously with the same schema the decoder
//! reads. Reserved fields are filled with ones so tests notice if their
//! values leak into decoded frames.

use crate::types::schema::{body_fields, field_index, header_fields, FRAME_DATE, FRAME_SIZE};
use bitvec::prelude::*;

/// Body bytes covering every known field
pub const FULL_BODY_BYTES: u32 = 62;

/// Field overrides and payload for one frame
#[derive(Debug, Default)]
pub struct FrameSpec {
    values: Vec<(usize, u64)>,
    payload: Option<(BitVec<u8, Msb0>, usize)>,
}

impl FrameSpec {
    fn set(&mut self, name: &str, value: u64) -> &mut Self {
        let index = field_index(name).unwrap_or_else(|| panic!("unknown field {name}"));
        self.values.push((index, value));
        self
    }

    pub fn header(&mut self, name: &str, value: u64) -> &mut Self {
        self.set(name, value)
    }

    pub fn body(&mut self, name: &str, value: u64) -> &mut Self {
        self.set(name, value)
    }

    pub fn payload(&mut self, bytes: &[u8]) -> &mut Self {
        let bits = BitVec::<u8, Msb0>::from_slice(bytes);
        let len = bits.len();
        self.payload = Some((bits, len));
        self
    }

    /// Payload of `len` bits taken from the low end of `value`
    pub fn payload_bits(&mut self, value: u64, len: usize) -> &mut Self {
        let mut bits = BitVec::<u8, Msb0>::repeat(false, len);
        bits.store_be(value);
        self.payload = Some((bits, len));
        self
    }

    fn value_for(&self, index: usize, significant: bool) -> u64 {
        self.values
            .iter()
            .rev()
            .find(|(i, _)| *i == index)
            .map(|(_, v)| *v)
            .unwrap_or(if significant { 0 } else { u64::MAX })
    }
}

/// Bit-level capture writer
#[derive(Debug, Default)]
pub struct CaptureBuilder {
    bits: BitVec<u8, Msb0>,
}

impl CaptureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, value: u64, width: usize) {
        let start = self.bits.len();
        self.bits.resize(start + width, false);
        let masked = if width == 64 {
            value
        } else {
            value & ((1u64 << width) - 1)
        };
        self.bits[start..].store_be(masked);
    }

    /// Append one frame. Body fields are written in order while they fit
    /// `frame_size`; any remainder is the payload (zero bits if unset).
    pub fn frame(
        mut self,
        frame_date: u64,
        frame_size: u32,
        configure: impl FnOnce(&mut FrameSpec),
    ) -> Self {
        let mut spec = FrameSpec::default();
        spec.values.push((FRAME_DATE, frame_date));
        spec.values.push((FRAME_SIZE, frame_size as u64));
        configure(&mut spec);

        for (index, field) in header_fields().iter().enumerate() {
            let value = spec.value_for(index, field.is_significant());
            self.push(value, field.width());
        }

        let budget = frame_size as usize * 8;
        let mut consumed = 0;
        for (offset, field) in body_fields().iter().enumerate() {
            if consumed + field.width() > budget {
                break;
            }
            let index = header_fields().len() + offset;
            let value = spec.value_for(index, field.is_significant());
            self.push(value, field.width());
            consumed += field.width();
        }

        let remainder = budget - consumed;
        match spec.payload {
            Some((bits, len)) => {
                assert_eq!(len, remainder, "payload length must fill the frame");
                self.bits.extend_from_bitslice(&bits[..len]);
            }
            None => {
                let start = self.bits.len();
                self.bits.resize(start + remainder, false);
            }
        }
        self
    }

    /// Raw bytes appended after the frames written so far
    pub fn raw_bytes(mut self, bytes: &[u8]) -> Self {
        self.bits.extend_from_bitslice(bytes.view_bits::<Msb0>());
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.bits.set_uninitialized(false);
        self.bits.into_vec()
    }
}
