use crate::utils::encoding::base64_encode_standard;
use log::warn;

/// Get a string from single byte (Latin-1) data. Stops at the first NUL byte
pub(crate) fn extract_latin1_string(data: &[u8]) -> String {
    data.iter()
        .take_while(|value| **value != 0)
        .map(|value| *value as char)
        .collect()
}

/// Convert bytes to UTF16 code units. A trailing odd byte is ignored
pub(crate) fn utf16_units(data: &[u8]) -> Vec<u16> {
    data.chunks_exact(2)
        .map(|wide_char| u16::from_le_bytes([wide_char[0], wide_char[1]]))
        .collect()
}

/// Get a UTF16 string from provided bytes data. Invalid UTF16 is base64 encoded
pub(crate) fn extract_utf16_string(data: &[u8]) -> String {
    let units = utf16_units(data);
    let end = units
        .iter()
        .position(|unit| *unit == 0)
        .unwrap_or(units.len());

    let utf16_result = String::from_utf16(&units[..end]);
    match utf16_result {
        Ok(result) => result,
        Err(err) => {
            warn!("[strings] Failed to get UTF16 string: {err:?}");
            base64_encode_standard(data)
        }
    }
}

/**
 * Get a string by keeping only the low byte of every UTF16 code unit
 * This is how older tooling read `Shortcut` strings. Only Latin-1 characters survive
 */
pub(crate) fn extract_truncated_utf16_string(data: &[u8]) -> String {
    utf16_units(data)
        .iter()
        .take_while(|unit| **unit != 0)
        .map(|unit| (*unit & 0xff) as u8 as char)
        .collect()
}

/// Convert a string to Latin-1 bytes. Characters outside Latin-1 become `?`
pub(crate) fn encode_latin1(value: &str) -> Vec<u8> {
    let unknown = b'?';
    value
        .chars()
        .map(|character| u8::try_from(u32::from(character)).unwrap_or(unknown))
        .collect()
}

pub(crate) fn encode_utf16(value: &str) -> Vec<u16> {
    value.encode_utf16().collect()
}
