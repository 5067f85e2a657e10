//! Fixed-width encode/decode primitives.
//!
//! Two rules keep this module honest:
//!
//! 1. Encoding truncates FIRST, then pads. Padding first could push an
//!    oversized value past its field width, and a single extra byte shifts
//!    every field after it — the gateway does not forgive that.
//! 2. Decoding never panics on short input. It clamps the requested range
//!    to the buffer and returns whatever is there; deciding that a short
//!    message is malformed is the parser's job, not the slicer's.

use crate::config::AMOUNT_WIDTH;

/// Which side of the field the value sits on.
///
/// Left-aligned fields (strings) are padded on the right; right-aligned
/// fields (numbers) are padded on the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Value first, padding after. Used for textual fields.
    Left,
    /// Padding first, value after. Used for numeric fields.
    Right,
}

/// Renders `value` into exactly `width` characters.
///
/// The value is truncated to `width` characters before padding, so the
/// result never exceeds the field. Truncation and counting operate on
/// characters, not bytes — the wire format is ASCII in practice, but a
/// misconfigured description with multibyte characters must not be allowed
/// to slice a codepoint in half.
pub fn encode_fixed(value: &str, width: usize, pad: char, align: Alignment) -> String {
    let truncated: String = value.chars().take(width).collect();
    let missing = width - truncated.chars().count();
    if missing == 0 {
        return truncated;
    }

    let padding: String = std::iter::repeat(pad).take(missing).collect();
    match align {
        Alignment::Left => truncated + &padding,
        Alignment::Right => padding + &truncated,
    }
}

/// Encodes a major-unit amount into the 12-digit minor-unit wire field.
///
/// `12.34` becomes `"000000001234"`: multiply by 100, round to the nearest
/// minor unit, zero-pad on the left. The caller validates sign and
/// finiteness before the value gets anywhere near this function.
pub fn encode_amount(major_units: f64) -> String {
    let minor_units = (major_units * 100.0).round() as u64;
    format!("{:0>width$}", minor_units, width = AMOUNT_WIDTH)
}

/// Slices `len` bytes starting at `offset` out of `buf` as a string.
///
/// Out-of-range requests are clamped: a buffer shorter than `offset`
/// yields an empty string, one shorter than `offset + len` yields the
/// partial tail. Callers that need a hard length guarantee (the response
/// parser) check the total message length up front.
pub fn decode_field(buf: &[u8], offset: usize, len: usize) -> String {
    let start = offset.min(buf.len());
    let end = offset.saturating_add(len).min(buf.len());
    String::from_utf8_lossy(&buf[start..end]).into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_left_aligned_with_spaces() {
        assert_eq!(encode_fixed("AB", 5, ' ', Alignment::Left), "AB   ");
    }

    #[test]
    fn pads_right_aligned_with_zeros() {
        assert_eq!(encode_fixed("42", 5, '0', Alignment::Right), "00042");
    }

    #[test]
    fn truncates_before_padding() {
        // An oversized value must come out at exactly the field width,
        // never longer.
        assert_eq!(encode_fixed("ABCDEFGH", 4, ' ', Alignment::Left), "ABCD");
        assert_eq!(encode_fixed("123456", 4, '0', Alignment::Right), "1234");
    }

    #[test]
    fn exact_width_passes_through() {
        assert_eq!(encode_fixed("ABCD", 4, ' ', Alignment::Left), "ABCD");
    }

    #[test]
    fn empty_value_is_all_padding() {
        assert_eq!(encode_fixed("", 3, ' ', Alignment::Left), "   ");
        assert_eq!(encode_fixed("", 3, '0', Alignment::Right), "000");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // "Плащане" is 7 characters but 14 bytes; width counts characters.
        assert_eq!(encode_fixed("Плащане", 4, ' ', Alignment::Left), "Плащ");
    }

    #[test]
    fn amount_in_minor_units_zero_padded() {
        assert_eq!(encode_amount(12.34), "000000001234");
        assert_eq!(encode_amount(0.0), "000000000000");
        assert_eq!(encode_amount(1.0), "000000000100");
    }

    #[test]
    fn amount_rounds_to_nearest_minor_unit() {
        // Sub-stotinka fractions round to the nearest minor unit, they
        // don't truncate.
        assert_eq!(encode_amount(12.344), "000000001234");
        assert_eq!(encode_amount(12.346), "000000001235");
        assert_eq!(encode_amount(0.125), "000000000013");
    }

    #[test]
    fn decode_slices_at_offset() {
        let buf = b"00123ABC";
        assert_eq!(decode_field(buf, 0, 2), "00");
        assert_eq!(decode_field(buf, 5, 3), "ABC");
    }

    #[test]
    fn decode_clamps_short_buffers() {
        let buf = b"XY";
        assert_eq!(decode_field(buf, 0, 10), "XY");
        assert_eq!(decode_field(buf, 5, 3), "");
        assert_eq!(decode_field(buf, 1, 5), "Y");
    }

    #[test]
    fn amount_field_round_trips_through_decode() {
        let field = encode_amount(12.34);
        let decoded = decode_field(field.as_bytes(), 0, AMOUNT_WIDTH);
        let minor: u64 = decoded.parse().unwrap();
        assert_eq!(minor as f64 / 100.0, 12.34);
    }
}
