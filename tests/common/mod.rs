//! Shared capture writer for integration tests

#![allow(dead_code)]

use bench_frame_parser::{body_fields, field_index, header_fields};
use bitvec::prelude::*;

fn push(bits: &mut BitVec<u8, Msb0>, value: u64, width: usize) {
    let start = bits.len();
    bits.resize(start + width, false);
    bits[start..].store_be(value);
}

/// Write one frame with the given field values; unspecified fields are zero.
/// Body fields are written while they fit, `payload` fills the remainder.
pub fn push_frame(
    bits: &mut BitVec<u8, Msb0>,
    frame_date: u64,
    frame_size: u32,
    values: &[(&str, u64)],
    payload: &[u8],
) {
    let value_of = |index: usize| {
        values
            .iter()
            .find(|(name, _)| field_index(name) == Some(index))
            .map(|(_, v)| *v)
            .unwrap_or(0)
    };

    for (index, field) in header_fields().iter().enumerate() {
        let value = match field.name {
            "frame_date" => frame_date,
            "frame_size" => frame_size as u64,
            _ => value_of(index),
        };
        push(bits, value, field.width());
    }

    let budget = frame_size as usize * 8;
    let mut consumed = 0;
    for (offset, field) in body_fields().iter().enumerate() {
        if consumed + field.width() > budget {
            break;
        }
        push(bits, value_of(header_fields().len() + offset), field.width());
        consumed += field.width();
    }

    assert_eq!(payload.len() * 8, budget - consumed, "payload must fill the frame");
    bits.extend_from_bitslice(payload.view_bits::<Msb0>());
}

/// Two frames: an address-only frame and a complete frame with a payload
pub fn sample_capture() -> Vec<u8> {
    let mut bits = BitVec::<u8, Msb0>::new();
    push_frame(
        &mut bits,
        0x4563_9182_44F4_0000,
        34,
        &[
            ("MAC_dest", 0x0011_2233_4455),
            ("MAC_src", 0xAABB_CCDD_EEFF),
            ("IP_src", 0x0A00_0001),
            ("IP_dest", 0x0A00_0002),
        ],
        &[],
    );
    push_frame(
        &mut bits,
        0,
        62 + 4,
        &[
            ("bench_3", 0xBEEF),
            ("field_14", 0x1),
            ("field_18", 0x2),
            ("field_28", 0x3),
            ("field_29", 0x4),
            ("field_30", 0x5),
            ("field_33", 60),
            ("field_34", 0),
            ("field_35", 32768),
        ],
        b"OK!\x00",
    );
    bits.into_vec()
}
