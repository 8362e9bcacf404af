//! Field catalog of a benchmark telemetry frame.
//!
//! Order is the wire order. The first [`HEADER_FIELD_COUNT`] descriptors form
//! the fixed header; the rest are body fields read only while the frame's
//! declared size still covers them.

#[cfg(feature = "serde")]
use serde::Serialize;

/// Whether a field's value is kept in the decoded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Significance {
    Significant,
    /// Bits are consumed but the value is dropped
    Reserved,
}

/// Static description of one bitfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub bits: u8,
    pub significance: Significance,
}

impl FieldDescriptor {
    const fn kept(name: &'static str, bits: u8) -> Self {
        Self {
            name,
            bits,
            significance: Significance::Significant,
        }
    }

    const fn reserved(name: &'static str, bits: u8) -> Self {
        Self {
            name,
            bits,
            significance: Significance::Reserved,
        }
    }

    pub fn is_significant(&self) -> bool {
        self.significance == Significance::Significant
    }

    pub fn width(&self) -> usize {
        self.bits as usize
    }
}

pub const HEADER_SIZE_BYTES: usize = 28;
pub const HEADER_FIELD_COUNT: usize = 7;
pub const FIELD_COUNT: usize = 47;

// Indices of the fields the derived values are computed from
pub const FRAME_DATE: usize = 1;
pub const FRAME_SIZE: usize = 6;
pub const MAC_DEST: usize = 7;
pub const MAC_SRC: usize = 8;
pub const IP_SRC: usize = 17;
pub const IP_DEST: usize = 18;
/// field_14, field_18, field_28, field_29, field_30, in concatenation order
pub const MESSAGE_TYPE_FIELDS: [usize; 5] = [24, 28, 38, 39, 40];
/// field_33 and field_34 (whole seconds), field_35 (1/65536 s)
pub const PACKET_DATE_FIELDS: [usize; 3] = [43, 44, 45];

pub static FIELD_SCHEMA: [FieldDescriptor; FIELD_COUNT] = [
    // Header
    FieldDescriptor::reserved("bench_1", 64),
    FieldDescriptor::kept("frame_date", 64),
    FieldDescriptor::kept("bench_3", 32),
    FieldDescriptor::reserved("bench_4", 12),
    FieldDescriptor::kept("bench_5", 4),
    FieldDescriptor::reserved("bench_6", 16),
    FieldDescriptor::kept("frame_size", 32),
    // Body
    FieldDescriptor::kept("MAC_dest", 48),
    FieldDescriptor::kept("MAC_src", 48),
    FieldDescriptor::kept("field_1", 16),
    FieldDescriptor::kept("field_2", 16),
    FieldDescriptor::kept("field_3", 16),
    FieldDescriptor::kept("field_4", 16),
    FieldDescriptor::kept("field_5", 16),
    FieldDescriptor::kept("field_6", 8),
    FieldDescriptor::reserved("field_7", 8),
    FieldDescriptor::reserved("field_8", 16),
    FieldDescriptor::kept("IP_src", 32),
    FieldDescriptor::kept("IP_dest", 32),
    FieldDescriptor::kept("field_9", 16),
    FieldDescriptor::kept("field_10", 16),
    FieldDescriptor::kept("field_11", 16),
    FieldDescriptor::reserved("field_12", 16),
    FieldDescriptor::reserved("field_13", 3),
    FieldDescriptor::kept("field_14", 1),
    FieldDescriptor::reserved("field_15", 1),
    FieldDescriptor::kept("field_16", 3),
    FieldDescriptor::kept("field_17", 3),
    FieldDescriptor::kept("field_18", 5),
    FieldDescriptor::reserved("field_19", 2),
    FieldDescriptor::kept("field_20", 14),
    FieldDescriptor::kept("field_21", 16),
    FieldDescriptor::reserved("field_22", 4),
    FieldDescriptor::kept("field_23", 1),
    FieldDescriptor::reserved("field_24", 1),
    FieldDescriptor::kept("field_25", 1),
    FieldDescriptor::kept("field_26", 1),
    FieldDescriptor::kept("field_27", 2),
    FieldDescriptor::kept("field_28", 6),
    FieldDescriptor::kept("field_29", 6),
    FieldDescriptor::kept("field_30", 10),
    FieldDescriptor::reserved("field_31", 8),
    FieldDescriptor::kept("field_32", 8),
    FieldDescriptor::kept("field_33", 16),
    FieldDescriptor::kept("field_34", 16),
    FieldDescriptor::kept("field_35", 16),
    FieldDescriptor::reserved("field_36", 16),
];

/// Header descriptors, always read
pub fn header_fields() -> &'static [FieldDescriptor] {
    &FIELD_SCHEMA[..HEADER_FIELD_COUNT]
}

/// Body descriptors, read in order until the frame size budget runs out
pub fn body_fields() -> &'static [FieldDescriptor] {
    &FIELD_SCHEMA[HEADER_FIELD_COUNT..]
}

/// Look up a descriptor index by field name
pub fn field_index(name: &str) -> Option<usize> {
    FIELD_SCHEMA.iter().position(|field| field.name == name)
}

/// Sum of the widths of the given descriptors
pub fn total_bits(fields: &[FieldDescriptor]) -> usize {
    fields.iter().map(FieldDescriptor::width).sum()
}
