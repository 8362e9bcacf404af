use crate::error::{DecodeStage, Result};
use crate::parser::stream::BitReader;
use crate::types::schema::{body_fields, header_fields, FRAME_SIZE, HEADER_FIELD_COUNT};
use crate::types::RawFrame;

/// Read the fixed header. Returns the body budget in bits.
fn read_header(reader: &mut BitReader, frame: &mut RawFrame) -> Result<usize> {
    let mut budget_bits = 0usize;

    for (index, field) in header_fields().iter().enumerate() {
        let value = reader
            .read(field.width())
            .map_err(|e| e.in_field(DecodeStage::ReadingHeader, field.name, frame.index))?;

        if index == FRAME_SIZE {
            budget_bits = value as usize * 8;
        }
        if field.is_significant() {
            frame.values[index] = Some(value);
        }
    }

    Ok(budget_bits)
}

/// Read body fields in order while they fit the budget.
///
/// The first field that would overrun the budget ends the body; later
/// (possibly narrower) fields are never considered.
fn read_body(reader: &mut BitReader, frame: &mut RawFrame, budget_bits: usize) -> Result<()> {
    let mut consumed = 0usize;

    for (offset, field) in body_fields().iter().enumerate() {
        if consumed + field.width() > budget_bits {
            log::trace!(
                "frame {}: body stops before {} ({} of {} bits used)",
                frame.index,
                field.name,
                consumed,
                budget_bits
            );
            break;
        }

        let value = reader
            .read(field.width())
            .map_err(|e| e.in_field(DecodeStage::ReadingBody, field.name, frame.index))?;
        consumed += field.width();

        if field.is_significant() {
            frame.values[HEADER_FIELD_COUNT + offset] = Some(value);
        }
    }

    frame.body_bits = consumed;
    Ok(())
}

/// Read whatever the frame size declares beyond the known fields
fn read_payload(reader: &mut BitReader, frame: &mut RawFrame, budget_bits: usize) -> Result<()> {
    let remaining = budget_bits - frame.body_bits;
    if remaining == 0 {
        return Ok(());
    }

    let payload = reader
        .read_packed(remaining)
        .map_err(|e| e.in_field(DecodeStage::ReadingPayload, "payload", frame.index))?;
    frame.payload = Some(payload);
    frame.payload_bits = remaining;
    Ok(())
}

/// Decode one frame starting at the reader's current position
pub fn decode_frame(reader: &mut BitReader, index: usize) -> Result<RawFrame> {
    let mut frame = RawFrame::new(index, reader.position());

    let budget_bits = read_header(reader, &mut frame)?;
    if budget_bits == 0 {
        log::warn!(
            "frame {} at bit {} declares a zero frame size",
            index,
            frame.bit_offset
        );
    }

    read_body(reader, &mut frame, budget_bits)?;
    read_payload(reader, &mut frame, budget_bits)?;

    log::trace!(
        "frame {}: size {} bytes, body {} bits, payload {} bits",
        index,
        frame.frame_size(),
        frame.body_bits,
        frame.payload_bits
    );
    Ok(frame)
}

/// Streaming decoder yielding raw frames until the buffer is consumed.
///
/// Stops for good after the first error.
pub struct FrameDecoder<'a> {
    reader: BitReader<'a>,
    next_index: usize,
    failed: bool,
}

impl<'a> FrameDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: BitReader::new(data),
            next_index: 0,
            failed: false,
        }
    }

    pub fn position(&self) -> usize {
        self.reader.position()
    }

    pub fn remaining_bits(&self) -> usize {
        self.reader.remaining_bits()
    }
}

impl<'a> Iterator for FrameDecoder<'a> {
    type Item = Result<RawFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_exhausted() {
            return None;
        }

        let result = decode_frame(&mut self.reader, self.next_index);
        match &result {
            Ok(_) => self.next_index += 1,
            Err(_) => self.failed = true,
        }
        Some(result)
    }
}
