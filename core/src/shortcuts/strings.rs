use super::error::LnkError;
use crate::utils::{
    buffer::LinkBuffer,
    nom_helper::nom_unsigned_two_bytes,
    strings::{
        encode_utf16, extract_latin1_string, extract_truncated_utf16_string, extract_utf16_string,
    },
};
use log::warn;
use nom::bytes::complete::take;
use serde::{Deserialize, Serialize};

/**
 * How UTF16 text in `Shortcut` data is turned into strings
 *
 * `Legacy`: keep only the low byte of every UTF16 code unit. Matches older tooling and only handles Latin-1 text
 * `Unicode`: decode full UTF16. Strings are read as single bytes when the header `IsUnicode` flag is not set
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    #[default]
    Legacy,
    Unicode,
}

impl TextMode {
    /// Convert UTF16 bytes to a string based on the mode
    pub(crate) fn utf16_to_string(&self, data: &[u8]) -> String {
        match self {
            TextMode::Legacy => extract_truncated_utf16_string(data),
            TextMode::Unicode => extract_utf16_string(data),
        }
    }
}

/// Windows limits `Shortcut` strings to 260 characters even though the format allows more
const WINDOWS_MAX_STRING: u16 = 260;

/// Extract a size prefixed string from `Shortcut` data
pub(crate) fn extract_string(
    data: &[u8],
    is_unicode: bool,
    mode: TextMode,
) -> nom::IResult<&[u8], String> {
    let (input, size) = nom_unsigned_two_bytes(data)?;
    if size > WINDOWS_MAX_STRING {
        warn!("[shortcuts] Got abnormal string size {size}. LNK data could be malformed");
    }

    // Size for UTF16 chars (2 bytes)
    let adjust_size = 2;
    if mode == TextMode::Unicode && !is_unicode {
        let (input, string_data) = take(size as usize)(input)?;
        return Ok((input, extract_latin1_string(string_data)));
    }

    let (input, string_data) = take(size as usize * adjust_size)(input)?;
    Ok((input, mode.utf16_to_string(string_data)))
}

/// Write a size prefixed UTF16 string. The size is the number of UTF16 code units
pub(crate) fn write_string(buffer: &mut LinkBuffer, value: &str) -> Result<(), LnkError> {
    let units = encode_utf16(value);
    let size = match u16::try_from(units.len()) {
        Ok(result) => result,
        Err(_err) => {
            warn!("[shortcuts] String too long for shortcut data: {} characters", units.len());
            return Err(LnkError::FieldTooLarge);
        }
    };

    buffer.push_u16(size);
    buffer.push_utf16(&units);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{extract_string, write_string, TextMode};
    use crate::{shortcuts::error::LnkError, utils::buffer::LinkBuffer};

    #[test]
    fn test_extract_string() {
        let test = [
            7, 0, 46, 0, 92, 0, 97, 0, 46, 0, 116, 0, 120, 0, 116, 0, 7, 0,
        ];
        let (remaining, result) = extract_string(&test, true, TextMode::Legacy).unwrap();
        assert_eq!(result, ".\\a.txt");
        assert_eq!(remaining, [7, 0]);
    }

    #[test]
    fn test_extract_string_modes() {
        let test = [3, 0, 169, 3, 233, 0, 122, 0];

        let (_, result) = extract_string(&test, true, TextMode::Legacy).unwrap();
        assert_eq!(result, "©éz");

        let (_, result) = extract_string(&test, true, TextMode::Unicode).unwrap();
        assert_eq!(result, "Ωéz");
    }

    #[test]
    fn test_extract_ansi_string() {
        let test = [4, 0, 99, 97, 102, 233];
        let (remaining, result) = extract_string(&test, false, TextMode::Unicode).unwrap();
        assert_eq!(result, "café");
        assert!(remaining.is_empty());

        // Legacy mode always reads UTF16 units
        assert!(extract_string(&test, false, TextMode::Legacy).is_err());
    }

    #[test]
    fn test_extract_string_truncated() {
        let test = [20, 0, 97, 0];
        assert!(extract_string(&test, true, TextMode::Legacy).is_err());
    }

    #[test]
    fn test_write_string() {
        let mut buffer = LinkBuffer::new();
        write_string(&mut buffer, "C:\\test").unwrap();
        assert_eq!(
            buffer.as_slice(),
            [7, 0, 67, 0, 58, 0, 92, 0, 116, 0, 101, 0, 115, 0, 116, 0]
        );

        let (_, result) = extract_string(buffer.as_slice(), true, TextMode::Unicode).unwrap();
        assert_eq!(result, "C:\\test");
    }

    #[test]
    fn test_write_string_too_large() {
        let mut buffer = LinkBuffer::new();
        let value = "a".repeat(70000);
        assert_eq!(
            write_string(&mut buffer, &value),
            Err(LnkError::FieldTooLarge)
        );
        assert_eq!(buffer.len(), 0);
    }
}
