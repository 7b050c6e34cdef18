use super::{
    error::LnkError,
    network::{LnkNetwork, NETWORK_VOLUME_TABLE_SIZE},
    volume::{LnkVolume, LOCAL_VOLUME_TABLE_SIZE},
};
use crate::utils::{
    buffer::LinkBuffer,
    nom_helper::{nom_cstring, nom_unsigned_four_bytes},
    strings::{encode_latin1, extract_latin1_string},
};
use common::windows::LocationFlag;
use nom::{bytes::complete::take, Needed};

/// Fixed location header: size, header size, flags and four offsets
pub(crate) const LOCATION_HEADER_SIZE: u32 = 28;

const LOCAL_LOCATION: u32 = 1;
const NETWORK_LOCATION: u32 = 2;

#[derive(Debug, PartialEq, Default)]
pub(crate) struct LnkLocation {
    pub(crate) size: u32,
    pub(crate) header_size: u32,
    pub(crate) flags: u32,
    pub(crate) volume_offset: u32,
    pub(crate) base_path_offset: u32,
    pub(crate) network_offset: u32,
    pub(crate) final_path_offset: u32,
    pub(crate) base_path: String,
    pub(crate) final_path: String,
    pub(crate) volume: Option<LnkVolume>,
    pub(crate) network: Option<LnkNetwork>,
}

impl LnkLocation {
    /**
     * Parse the location block from `shortcut` data
     * All offsets are relative to the start of the block. The returned input starts right after the block
     */
    pub(crate) fn parse_location(data: &[u8]) -> nom::IResult<&[u8], LnkLocation> {
        let (input, size) = nom_unsigned_four_bytes(data)?;

        let mut location = LnkLocation {
            size,
            ..Default::default()
        };
        let empty = 0;
        if size == empty {
            return Ok((input, location));
        }
        if size < LOCATION_HEADER_SIZE {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }

        // Size includes the size itself (4 bytes)
        let (remaining_input, block) = take(size as usize)(data)?;
        let (input, _size) = nom_unsigned_four_bytes(block)?;
        let (input, header_size) = nom_unsigned_four_bytes(input)?;
        let (input, flags) = nom_unsigned_four_bytes(input)?;
        let (input, volume_offset) = nom_unsigned_four_bytes(input)?;
        let (input, base_path_offset) = nom_unsigned_four_bytes(input)?;
        let (input, network_offset) = nom_unsigned_four_bytes(input)?;
        let (_, final_path_offset) = nom_unsigned_four_bytes(input)?;

        location.header_size = header_size;
        location.flags = flags;
        location.volume_offset = volume_offset;
        location.base_path_offset = base_path_offset;
        location.network_offset = network_offset;
        location.final_path_offset = final_path_offset;

        location.base_path = LnkLocation::block_string(block, base_path_offset)?;
        location.final_path = LnkLocation::block_string(block, final_path_offset)?;

        if (flags & LOCAL_LOCATION) != 0 && volume_offset != 0 {
            let table = LnkLocation::block_table(block, volume_offset)?;
            let (_, volume) = LnkVolume::parse_volume(table)?;
            location.volume = Some(volume);
        }
        if (flags & NETWORK_LOCATION) != 0 && network_offset != 0 {
            let table = LnkLocation::block_table(block, network_offset)?;
            let (_, network) = LnkNetwork::parse_network(table)?;
            location.network = Some(network);
        }

        Ok((remaining_input, location))
    }

    /**
     * Check if `data` starts with a location block without parsing it
     * The size must cover the fixed header, the header size must be 28, and the block must fit in `data`
     */
    pub(crate) fn is_location_block(data: &[u8]) -> bool {
        let Ok((input, size)) = nom_unsigned_four_bytes(data) else {
            return false;
        };
        let Ok((_, header_size)) = nom_unsigned_four_bytes(input) else {
            return false;
        };
        size >= LOCATION_HEADER_SIZE
            && header_size == LOCATION_HEADER_SIZE
            && size as usize <= data.len()
    }

    /// Read an ASCII path at an offset inside the block. Offset 0 means no path
    fn block_string(block: &[u8], offset: u32) -> Result<String, nom::Err<nom::error::Error<&[u8]>>> {
        if offset == 0 {
            return Ok(String::new());
        }
        let table = LnkLocation::block_table(block, offset)?;
        let (_, path_data) = nom_cstring(table)?;
        Ok(extract_latin1_string(path_data))
    }

    /// Get the block data starting at an offset. The offset must be inside the block
    fn block_table(block: &[u8], offset: u32) -> Result<&[u8], nom::Err<nom::error::Error<&[u8]>>> {
        if offset as usize >= block.len() {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }
        let (table, _) = take(offset as usize)(block)?;
        Ok(table)
    }

    /// Check if a volume table is smaller than its fixed size
    pub(crate) fn has_malformed_table(&self) -> bool {
        let bad_volume = self
            .volume
            .as_ref()
            .is_some_and(|volume| volume.size < LOCAL_VOLUME_TABLE_SIZE);
        let bad_network = self
            .network
            .as_ref()
            .is_some_and(|network| network.size < NETWORK_VOLUME_TABLE_SIZE);
        bad_volume || bad_network
    }

    /// Get the location type. Network wins when both tables are flagged
    pub(crate) fn location_flag(&self) -> LocationFlag {
        if (self.flags & NETWORK_LOCATION) != 0 {
            LocationFlag::CommonNetworkRelativeLinkAndPathSuffix
        } else if (self.flags & LOCAL_LOCATION) != 0 {
            LocationFlag::VolumeIDAndLocalBasePath
        } else {
            LocationFlag::None
        }
    }

    /// Combine the base path and the final path into a target path
    pub(crate) fn target_path(&self) -> String {
        let mut target = self.base_path.clone();
        if !self.final_path.is_empty() {
            if !target.is_empty() {
                target.push('\\');
            }
            target.push_str(&self.final_path);
        }
        target
    }

    /// Combine the network share name and the final path. Empty when there is no network table
    pub(crate) fn network_path(&self) -> String {
        match &self.network {
            Some(network) => format!("{}\\{}", network.share_name, self.final_path),
            None => String::new(),
        }
    }

    /**
     * Write the location block for a local `target`
     * Layout: header, local volume table, `target` as the base path, empty final path
     */
    pub(crate) fn write_location(buffer: &mut LinkBuffer, target: &str) -> Result<(), LnkError> {
        let base_path = encode_latin1(target);
        let end_of_string = 1;
        let size = LOCATION_HEADER_SIZE as usize
            + LOCAL_VOLUME_TABLE_SIZE as usize
            + base_path.len()
            + end_of_string * 2;
        let size = match u32::try_from(size) {
            Ok(result) => result,
            Err(_err) => return Err(LnkError::FieldTooLarge),
        };

        let start = buffer.len();
        buffer.push_u32(size);
        buffer.push_u32(LOCATION_HEADER_SIZE);
        buffer.push_u32(LOCAL_LOCATION);
        // Volume table follows the header
        buffer.push_u32(LOCATION_HEADER_SIZE);
        buffer.push_u32(LOCATION_HEADER_SIZE + LOCAL_VOLUME_TABLE_SIZE);
        buffer.push_u32(0);
        // Final path is the last byte of the block
        buffer.push_u32(size - 1);

        LnkVolume::write_local_volume(buffer);
        buffer.push_cstring(&base_path);
        buffer.push_cstring(&[]);

        debug_assert_eq!(buffer.len() - start, size as usize);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::LnkLocation;
    use crate::utils::buffer::LinkBuffer;
    use common::windows::{DriveType, LocationFlag};

    #[test]
    fn test_parse_location() {
        let test = [
            60, 0, 0, 0, 28, 0, 0, 0, 1, 0, 0, 0, 28, 0, 0, 0, 45, 0, 0, 0, 0, 0, 0, 0, 59, 0, 0,
            0, 17, 0, 0, 0, 3, 0, 0, 0, 129, 138, 122, 48, 16, 0, 0, 0, 0, 67, 58, 92, 116, 101,
            115, 116, 92, 97, 46, 116, 120, 116, 0, 0, 7, 0,
        ];
        let (remaining, result) = LnkLocation::parse_location(&test).unwrap();
        assert_eq!(remaining, [7, 0]);
        assert_eq!(result.size, 60);
        assert_eq!(result.header_size, 28);
        assert_eq!(result.location_flag(), LocationFlag::VolumeIDAndLocalBasePath);
        assert_eq!(result.base_path, "C:\\test\\a.txt");
        assert_eq!(result.final_path, "");
        assert_eq!(result.target_path(), "C:\\test\\a.txt");
        assert_eq!(result.network_path(), "");
        assert!(!result.has_malformed_table());

        let volume = result.volume.unwrap();
        assert_eq!(volume.drive_type(), DriveType::DriveFixed);
        assert_eq!(volume.drive_serial, 0x307a8a81);
    }

    #[test]
    fn test_parse_location_network() {
        let test = [
            65, 0, 0, 0, 28, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 28, 0, 0, 0, 59, 0, 0,
            0, 31, 0, 0, 0, 2, 0, 0, 0, 20, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 92, 92, 115, 114,
            118, 92, 100, 111, 99, 115, 0, 97, 46, 116, 120, 116, 0,
        ];
        let (remaining, result) = LnkLocation::parse_location(&test).unwrap();
        assert!(remaining.is_empty());
        assert_eq!(
            result.location_flag(),
            LocationFlag::CommonNetworkRelativeLinkAndPathSuffix
        );
        assert_eq!(result.base_path, "");
        assert_eq!(result.final_path, "a.txt");
        assert_eq!(result.network_path(), "\\\\srv\\docs\\a.txt");
        assert_eq!(result.target_path(), "a.txt");
    }

    #[test]
    fn test_network_path_empty_share() {
        let mut test = [
            65, 0, 0, 0, 28, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 28, 0, 0, 0, 59, 0, 0,
            0, 31, 0, 0, 0, 2, 0, 0, 0, 20, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 92, 92, 115, 114,
            118, 92, 100, 111, 99, 115, 0, 97, 46, 116, 120, 116, 0,
        ];
        // Share name starts with its terminator
        test[48] = 0;
        let (_, result) = LnkLocation::parse_location(&test).unwrap();
        assert_eq!(result.network.as_ref().unwrap().share_name, "");
        assert_eq!(result.network_path(), "\\a.txt");
    }

    #[test]
    fn test_is_location_block() {
        let test = [
            60, 0, 0, 0, 28, 0, 0, 0, 1, 0, 0, 0, 28, 0, 0, 0, 45, 0, 0, 0, 0, 0, 0, 0, 59, 0, 0,
            0, 17, 0, 0, 0, 3, 0, 0, 0, 129, 138, 122, 48, 16, 0, 0, 0, 0, 67, 58, 92, 116, 101,
            115, 116, 92, 97, 46, 116, 120, 116, 0, 0,
        ];
        assert!(LnkLocation::is_location_block(&test));
        assert!(!LnkLocation::is_location_block(&test[..59]));
        // Counted string and terminal block
        assert!(!LnkLocation::is_location_block(&[7, 0, 46, 0, 92, 0, 97, 0]));
        assert!(!LnkLocation::is_location_block(&[0, 0, 0, 0]));
        assert!(!LnkLocation::is_location_block(&[]));
    }

    #[test]
    fn test_parse_location_empty() {
        let test = [0, 0, 0, 0, 1, 2];
        let (remaining, result) = LnkLocation::parse_location(&test).unwrap();
        assert_eq!(remaining, [1, 2]);
        assert_eq!(result.size, 0);
        assert_eq!(result.target_path(), "");
        assert_eq!(result.location_flag(), LocationFlag::None);
    }

    #[test]
    fn test_parse_location_too_small() {
        let test = [12, 0, 0, 0, 28, 0, 0, 0, 1, 0, 0, 0];
        assert!(LnkLocation::parse_location(&test).is_err());
    }

    #[test]
    fn test_parse_location_bad_offset() {
        let test = [
            28, 0, 0, 0, 28, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 200, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        ];
        assert!(LnkLocation::parse_location(&test).is_err());
    }

    #[test]
    fn test_parse_location_malformed_volume() {
        let test = [
            36, 0, 0, 0, 28, 0, 0, 0, 1, 0, 0, 0, 28, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            8, 0, 0, 0, 3, 0, 0, 0,
        ];
        let (_, result) = LnkLocation::parse_location(&test).unwrap();
        assert!(result.has_malformed_table());
    }

    #[test]
    fn test_write_location() {
        let mut buffer = LinkBuffer::new();
        LnkLocation::write_location(&mut buffer, "C:\\test\\a.txt").unwrap();
        assert_eq!(
            buffer.as_slice(),
            [
                60, 0, 0, 0, 28, 0, 0, 0, 1, 0, 0, 0, 28, 0, 0, 0, 45, 0, 0, 0, 0, 0, 0, 0, 59, 0,
                0, 0, 17, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 16, 0, 0, 0, 0, 67, 58, 92, 116, 101,
                115, 116, 92, 97, 46, 116, 120, 116, 0, 0,
            ]
        );

        let (_, result) = LnkLocation::parse_location(buffer.as_slice()).unwrap();
        assert_eq!(result.target_path(), "C:\\test\\a.txt");
        assert_eq!(result.final_path_offset, 59);
    }
}
