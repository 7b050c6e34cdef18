use crate::utils::nom_helper::nom_unsigned_four_bytes;
use common::windows::{ExtraData, ExtraDataType};
use nom::bytes::complete::take;

/// Blocks smaller than 4 bytes end the extra data
const TERMINAL_BLOCK_SIZE: u32 = 4;

/**
 * Walk the extra data blocks at the end of `Shortcut` data
 * Only the size and signature of each block are read
 */
pub(crate) fn parse_extra_data(data: &[u8]) -> nom::IResult<&[u8], Vec<ExtraData>> {
    let mut input = data;
    let mut blocks = Vec::new();

    loop {
        let (remaining, size) = nom_unsigned_four_bytes(input)?;
        if size < TERMINAL_BLOCK_SIZE {
            return Ok((remaining, blocks));
        }

        // Size includes the size itself (4 bytes)
        let (remaining, block_data) = take(size as usize)(input)?;
        let (block_data, _size) = nom_unsigned_four_bytes(block_data)?;
        let (_, signature) = nom_unsigned_four_bytes(block_data)?;

        blocks.push(ExtraData {
            size,
            signature,
            block_type: extra_type(signature),
        });
        input = remaining;
    }
}

/// Determine the extra data block type from its signature
pub(crate) fn extra_type(signature: u32) -> ExtraDataType {
    match signature {
        0xa0000001 => ExtraDataType::EnvironmentVariables,
        0xa0000002 => ExtraDataType::Console,
        0xa0000003 => ExtraDataType::Tracker,
        0xa0000004 => ExtraDataType::ConsoleCodepage,
        0xa0000005 => ExtraDataType::SpecialFolder,
        0xa0000006 => ExtraDataType::Darwin,
        0xa0000007 => ExtraDataType::IconEnvironment,
        0xa0000008 => ExtraDataType::Shim,
        0xa0000009 => ExtraDataType::PropertyStore,
        0xa000000b => ExtraDataType::KnownFolder,
        0xa000000c => ExtraDataType::VistaIdList,
        _ => ExtraDataType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::{extra_type, parse_extra_data};
    use common::windows::ExtraDataType;

    #[test]
    fn test_parse_extra_data() {
        let test = [
            12, 0, 0, 0, 3, 0, 0, 160, 1, 2, 3, 4, 16, 0, 0, 0, 11, 0, 0, 160, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 9, 9,
        ];
        let (remaining, results) = parse_extra_data(&test).unwrap();
        assert_eq!(remaining, [9, 9]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].size, 12);
        assert_eq!(results[0].block_type, ExtraDataType::Tracker);
        assert_eq!(results[1].signature, 0xa000000b);
        assert_eq!(results[1].block_type, ExtraDataType::KnownFolder);
    }

    #[test]
    fn test_parse_extra_data_terminal_only() {
        let test = [0, 0, 0, 0];
        let (remaining, results) = parse_extra_data(&test).unwrap();
        assert!(remaining.is_empty());
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_extra_data_truncated() {
        let test = [12, 0, 0, 0, 3, 0, 0, 160, 1, 2, 3, 4, 0, 0, 0];
        for size in 0..test.len() {
            assert!(parse_extra_data(&test[..size]).is_err());
        }
    }

    #[test]
    fn test_extra_type() {
        assert_eq!(extra_type(0xa0000009), ExtraDataType::PropertyStore);
        assert_eq!(extra_type(0xa000000a), ExtraDataType::Unknown);
    }
}
