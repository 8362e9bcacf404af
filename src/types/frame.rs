use crate::conversion::{format_hex, format_timestamp, hexdump};
use crate::types::metadata::TestMetadata;
use crate::types::schema::{
    FIELD_COUNT, FIELD_SCHEMA, FRAME_DATE, IP_DEST, IP_SRC, MAC_DEST, MAC_SRC,
};
use chrono::{DateTime, Utc};
use std::fmt;
use std::net::Ipv4Addr;

/// 48-bit hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// Build from the low 48 bits of a raw field value
    pub fn from_raw(raw: u64) -> Self {
        let bytes = raw.to_be_bytes();
        let mut octets = [0u8; 6];
        octets.copy_from_slice(&bytes[2..]);
        MacAddress(octets)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            a, b, c, d, e, g
        )
    }
}

/// One frame as read off the wire, before derived values are computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// Zero-based position of the frame in the capture
    pub index: usize,
    /// Bit offset of the frame's first header bit
    pub bit_offset: usize,
    /// Raw values indexed like [`FIELD_SCHEMA`]; `None` for reserved or unread fields
    pub values: [Option<u64>; FIELD_COUNT],
    /// Body bits read against the frame size budget
    pub body_bits: usize,
    /// Trailing bytes beyond all known fields
    pub payload: Option<Vec<u8>>,
    /// Exact payload length in bits (the last byte may be partial)
    pub payload_bits: usize,
}

impl RawFrame {
    pub fn new(index: usize, bit_offset: usize) -> Self {
        Self {
            index,
            bit_offset,
            values: [None; FIELD_COUNT],
            body_bits: 0,
            payload: None,
            payload_bits: 0,
        }
    }

    pub fn value(&self, index: usize) -> Option<u64> {
        self.values.get(index).copied().flatten()
    }

    /// Declared frame size in bytes (body and payload, header excluded)
    pub fn frame_size(&self) -> u64 {
        self.value(crate::types::schema::FRAME_SIZE).unwrap_or(0)
    }

    /// Total bits the frame occupies in the capture
    pub fn total_bits(&self) -> usize {
        crate::types::schema::HEADER_SIZE_BYTES * 8 + self.body_bits + self.payload_bits
    }
}

/// Values computed from decoded fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedFields {
    pub frame_date: DateTime<Utc>,
    pub packet_date: Option<DateTime<Utc>>,
    pub message_type: Option<String>,
    pub mac_dest: Option<MacAddress>,
    pub mac_src: Option<MacAddress>,
    pub ip_src: Option<Ipv4Addr>,
    pub ip_dest: Option<Ipv4Addr>,
}

/// Fully decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub raw: RawFrame,
    pub derived: DerivedFields,
    pub test_name: Option<String>,
    pub test_execution_date: Option<String>,
}

impl Frame {
    pub fn new(raw: RawFrame, derived: DerivedFields, metadata: &TestMetadata) -> Self {
        Self {
            raw,
            derived,
            test_name: metadata.test_name.clone(),
            test_execution_date: metadata.test_execution_date.clone(),
        }
    }

    pub fn index(&self) -> usize {
        self.raw.index
    }

    /// Raw value of a field by schema name
    pub fn value(&self, name: &str) -> Option<u64> {
        crate::types::schema::field_index(name).and_then(|i| self.raw.value(i))
    }

    /// Canonical `0x`-prefixed hex of a field by schema name
    pub fn hex_value(&self, name: &str) -> Option<String> {
        self.value(name).map(format_hex)
    }

    pub fn has_payload(&self) -> bool {
        self.raw.payload.is_some()
    }

    /// Hex-dump rendering of the trailing payload
    pub fn payload_dump(&self) -> Option<String> {
        self.raw.payload.as_deref().map(hexdump)
    }

    fn render_field(&self, index: usize) -> Option<String> {
        match index {
            FRAME_DATE => Some(format_timestamp(&self.derived.frame_date)),
            MAC_DEST => self.derived.mac_dest.map(|m| m.to_string()),
            MAC_SRC => self.derived.mac_src.map(|m| m.to_string()),
            IP_SRC => self.derived.ip_src.map(|ip| ip.to_string()),
            IP_DEST => self.derived.ip_dest.map(|ip| ip.to_string()),
            _ => self.raw.value(index).map(format_hex),
        }
    }

    /// Output attribute set in column order (see [`output_columns`])
    pub fn attributes(&self) -> Vec<(&'static str, Option<String>)> {
        let mut attributes = Vec::with_capacity(FIELD_COUNT);
        attributes.push(("test_name", self.test_name.clone()));
        attributes.push(("test_execution_date", self.test_execution_date.clone()));

        for (index, field) in FIELD_SCHEMA.iter().enumerate() {
            if field.is_significant() {
                attributes.push((field.name, self.render_field(index)));
            }
        }

        attributes.push((
            "packet_date",
            self.derived.packet_date.as_ref().map(format_timestamp),
        ));
        attributes.push(("message_type", self.derived.message_type.clone()));
        attributes.push(("payload", self.payload_dump()));
        attributes
    }
}

/// Column names of [`Frame::attributes`]
pub fn output_columns() -> Vec<&'static str> {
    let mut columns = vec!["test_name", "test_execution_date"];
    columns.extend(
        FIELD_SCHEMA
            .iter()
            .filter(|field| field.is_significant())
            .map(|field| field.name),
    );
    columns.extend(["packet_date", "message_type", "payload"]);
    columns
}

#[cfg(feature = "serde")]
impl serde::Serialize for Frame {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let attributes = self.attributes();
        let mut map = serializer.serialize_map(Some(attributes.len() + 1))?;
        map.serialize_entry("index", &self.raw.index)?;
        for (name, value) in &attributes {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
