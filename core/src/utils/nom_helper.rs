/**
 * When parsing binary formats often we parse X bytes and convert bytes to a number
 * With nom we can do that in two steps, ex:
 *   `take X bytes`
 *   `le_uX` to number
 *
 * Every number in a `Shortcut` file is little endian, so these helpers only support little endian
 */
use nom::{
    bytes::complete::{take, take_while},
    number::complete::{le_i32, le_u16, le_u32, le_u64, le_u8},
};
use std::mem::size_of;

/// Nom eight (8) bytes to u64
pub(crate) fn nom_unsigned_eight_bytes(data: &[u8]) -> nom::IResult<&[u8], u64> {
    let (input, value_data) = take(size_of::<u64>())(data)?;
    let (_, value) = le_u64(value_data)?;
    Ok((input, value))
}

/// Nom four (4) bytes to u32
pub(crate) fn nom_unsigned_four_bytes(data: &[u8]) -> nom::IResult<&[u8], u32> {
    let (input, value_data) = take(size_of::<u32>())(data)?;
    let (_, value) = le_u32(value_data)?;
    Ok((input, value))
}

/// Nom four (4) bytes to i32
pub(crate) fn nom_signed_four_bytes(data: &[u8]) -> nom::IResult<&[u8], i32> {
    let (input, value_data) = take(size_of::<i32>())(data)?;
    let (_, value) = le_i32(value_data)?;
    Ok((input, value))
}

/// Nom two (2) bytes to u16
pub(crate) fn nom_unsigned_two_bytes(data: &[u8]) -> nom::IResult<&[u8], u16> {
    let (input, value_data) = take(size_of::<u16>())(data)?;
    let (_, value) = le_u16(value_data)?;
    Ok((input, value))
}

/// Nom one (1) byte to u8
pub(crate) fn nom_unsigned_one_byte(data: &[u8]) -> nom::IResult<&[u8], u8> {
    let (input, value_data) = take(size_of::<u8>())(data)?;
    let (_, value) = le_u8(value_data)?;
    Ok((input, value))
}

/**
 * Nom a NUL terminated byte string. The returned bytes do not include the NUL
 * A missing NUL terminator is an error
 */
pub(crate) fn nom_cstring(data: &[u8]) -> nom::IResult<&[u8], &[u8]> {
    let (input, string_data) = take_while(|b| b != 0)(data)?;
    let (input, _end_of_string) = take(size_of::<u8>())(input)?;
    Ok((input, string_data))
}

#[cfg(test)]
mod tests {
    use super::{
        nom_cstring, nom_signed_four_bytes, nom_unsigned_eight_bytes, nom_unsigned_four_bytes,
        nom_unsigned_one_byte, nom_unsigned_two_bytes,
    };

    #[test]
    fn test_nom_unsigned_eight_bytes() {
        let test = [208, 233, 238, 242, 21, 21, 201, 1];
        let (_, results) = nom_unsigned_eight_bytes(&test).unwrap();
        assert_eq!(results, 0x1c91515f2eee9d0);
    }

    #[test]
    fn test_nom_unsigned_four_bytes() {
        let test = [76, 0, 0, 0, 1];
        let (remaining, results) = nom_unsigned_four_bytes(&test).unwrap();
        assert_eq!(results, 76);
        assert_eq!(remaining, [1]);
    }

    #[test]
    fn test_nom_signed_four_bytes() {
        let test = [255, 255, 255, 255];
        let (_, results) = nom_signed_four_bytes(&test).unwrap();
        assert_eq!(results, -1);
    }

    #[test]
    fn test_nom_unsigned_two_bytes() {
        let test = [189, 0];
        let (_, results) = nom_unsigned_two_bytes(&test).unwrap();
        assert_eq!(results, 189);
    }

    #[test]
    fn test_nom_unsigned_one_byte() {
        let test = [0x2f];
        let (_, results) = nom_unsigned_one_byte(&test).unwrap();
        assert_eq!(results, 0x2f);
    }

    #[test]
    fn test_nom_cstring() {
        let test = [67, 58, 92, 0, 1];
        let (remaining, results) = nom_cstring(&test).unwrap();
        assert_eq!(results, b"C:\\");
        assert_eq!(remaining, [1]);
    }

    #[test]
    fn test_nom_cstring_missing_end() {
        let test = [67, 58, 92];
        assert!(nom_cstring(&test).is_err());
    }

    #[test]
    fn test_nom_truncated() {
        let test = [1, 2, 3];
        assert!(nom_unsigned_four_bytes(&test).is_err());
    }
}
