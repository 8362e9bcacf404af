//! Derived value computations for decoded frames
//!
//! Timestamps, address formatting, the composite message type code and the
//! hex renderings used at the output boundary.

use crate::types::schema::{
    FRAME_DATE, IP_DEST, IP_SRC, MAC_DEST, MAC_SRC, MESSAGE_TYPE_FIELDS, PACKET_DATE_FIELDS,
};
use crate::types::{DerivedFields, MacAddress, RawFrame};
use chrono::{DateTime, Duration, Utc};
use std::fmt::Write;
use std::net::Ipv4Addr;

/// Frame dates count 100 ps ticks
const TICKS_PER_MICROSECOND: u64 = 10_000;
/// 2000-01-01T12:00:00Z as a Unix timestamp
const PACKET_EPOCH_UNIX_SECONDS: i64 = 946_728_000;
const PACKET_FRACTION_UNITS: u64 = 1 << 16;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Integer division rounding to nearest, ties to even
fn div_round_half_even(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let twice = remainder * 2;
    if twice > denominator || (twice == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Canonical hex rendering of a raw value (`0x` prefix, no padding)
pub fn format_hex(value: u64) -> String {
    format!("{:#x}", value)
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Convert 100 ps ticks since the Unix epoch to a UTC instant
pub fn frame_date_from_ticks(ticks: u64) -> DateTime<Utc> {
    // u64::MAX ticks is ~1.8e9 s, well inside chrono's range
    let micros = div_round_half_even(ticks, TICKS_PER_MICROSECOND);
    DateTime::UNIX_EPOCH + Duration::microseconds(micros as i64)
}

/// Packet date: whole seconds `a + b` plus `fraction / 65536` s since 2000-01-01 12:00 UTC
pub fn packet_date_from_fields(a: u64, b: u64, fraction: u64) -> DateTime<Utc> {
    let whole_seconds = a + b;
    let fraction_micros = div_round_half_even(fraction * 1_000_000, PACKET_FRACTION_UNITS);
    DateTime::UNIX_EPOCH
        + Duration::seconds(PACKET_EPOCH_UNIX_SECONDS)
        + Duration::seconds(whole_seconds as i64)
        + Duration::microseconds(fraction_micros as i64)
}

/// Concatenate the unpadded hex digits of each component behind a single `0x`
pub fn message_type_code(components: &[u64]) -> String {
    let mut code = String::from("0x");
    for component in components {
        let _ = write!(code, "{:x}", component);
    }
    code
}

/// IPv4 address from the low 32 bits of a raw value
pub fn ipv4_from_raw(raw: u64) -> Ipv4Addr {
    Ipv4Addr::from((raw & 0xFFFF_FFFF) as u32)
}

/// Format the raw value of a MAC field as `aa:bb:cc:dd:ee:ff`
pub fn format_mac(raw: u64) -> String {
    MacAddress::from_raw(raw).to_string()
}

/// Format the raw value of an IP field as dotted decimal
pub fn format_ipv4(raw: u64) -> String {
    ipv4_from_raw(raw).to_string()
}

/// Collect all values at `indices`, or `None` if any of them is absent
fn all_present<const N: usize>(raw: &RawFrame, indices: [usize; N]) -> Option<[u64; N]> {
    let mut values = [0u64; N];
    for (slot, index) in values.iter_mut().zip(indices) {
        *slot = raw.value(index)?;
    }
    Some(values)
}

/// Compute every derived value a decoded frame supports
pub fn derive_fields(raw: &RawFrame) -> DerivedFields {
    // frame_date is a header field and is always read
    let frame_date = frame_date_from_ticks(raw.value(FRAME_DATE).unwrap_or(0));

    let packet_date = all_present(raw, PACKET_DATE_FIELDS)
        .map(|[a, b, fraction]| packet_date_from_fields(a, b, fraction));

    let message_type = all_present(raw, MESSAGE_TYPE_FIELDS).map(|codes| message_type_code(&codes));

    DerivedFields {
        frame_date,
        packet_date,
        message_type,
        mac_dest: raw.value(MAC_DEST).map(MacAddress::from_raw),
        mac_src: raw.value(MAC_SRC).map(MacAddress::from_raw),
        ip_src: raw.value(IP_SRC).map(ipv4_from_raw),
        ip_dest: raw.value(IP_DEST).map(ipv4_from_raw),
    }
}

/// Classic 16-bytes-per-line hex dump with offset column and ASCII gutter
pub fn hexdump(data: &[u8]) -> String {
    let mut lines = Vec::with_capacity((data.len() + 15) / 16);

    for (line_index, chunk) in data.chunks(16).enumerate() {
        let mut line = format!("{:08X}: ", line_index * 16);

        for (i, byte) in chunk.iter().enumerate() {
            if i == 8 {
                line.push(' ');
            }
            let _ = write!(line, "{:02X}", byte);
            if i + 1 < chunk.len() {
                line.push(' ');
            }
        }

        // Keep the ASCII gutter in the same column on short lines
        let mut pad = 2 + 3 * (16 - chunk.len());
        if chunk.len() <= 8 {
            pad += 1;
        }
        line.extend(std::iter::repeat(' ').take(pad));

        line.extend(chunk.iter().map(|&byte| {
            if (0x20..=0x7E).contains(&byte) {
                byte as char
            } else {
                '.'
            }
        }));
        lines.push(line);
    }

    lines.join("\n")
}
