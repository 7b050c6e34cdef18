use crate::utils::{
    buffer::LinkBuffer,
    nom_helper::{nom_cstring, nom_unsigned_four_bytes},
    strings::extract_latin1_string,
};
use common::windows::DriveType;
use nom::{bytes::complete::take, Needed};

/// Fixed size of a local volume table including the one byte label
pub(crate) const LOCAL_VOLUME_TABLE_SIZE: u32 = 17;
const DRIVE_FIXED: u32 = 3;

#[derive(Debug, PartialEq)]
pub(crate) struct LnkVolume {
    pub(crate) size: u32,
    pub(crate) drive_type: u32,
    pub(crate) drive_serial: u32,
    pub(crate) label_offset: u32,
    pub(crate) volume_label: String,
}

impl LnkVolume {
    /**
     * Parse volume metadata from `shortcut` data. `data` starts at the volume table
     * Tables smaller than `LOCAL_VOLUME_TABLE_SIZE` only have their size parsed
     */
    pub(crate) fn parse_volume(data: &[u8]) -> nom::IResult<&[u8], LnkVolume> {
        let (_, size) = nom_unsigned_four_bytes(data)?;

        let mut volume_info = LnkVolume {
            size,
            drive_type: 0,
            drive_serial: 0,
            label_offset: 0,
            volume_label: String::new(),
        };
        if size < LOCAL_VOLUME_TABLE_SIZE {
            return Ok((data, volume_info));
        }

        // Size includes the size itself (4 bytes)
        let (remaining_input, table) = take(size as usize)(data)?;
        let (input, _size) = nom_unsigned_four_bytes(table)?;
        let (input, drive_type) = nom_unsigned_four_bytes(input)?;
        let (input, drive_serial) = nom_unsigned_four_bytes(input)?;
        let (_, label_offset) = nom_unsigned_four_bytes(input)?;

        volume_info.drive_type = drive_type;
        volume_info.drive_serial = drive_serial;
        volume_info.label_offset = label_offset;

        // The label must be inside the volume table
        if label_offset >= size {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }
        let (label_start, _) = take(label_offset as usize)(table)?;
        let (_, label_data) = nom_cstring(label_start)?;
        volume_info.volume_label = extract_latin1_string(label_data);

        Ok((remaining_input, volume_info))
    }

    /// Get drive types from `shortcut` data
    pub(crate) fn drive_type(&self) -> DriveType {
        match self.drive_type {
            0 => DriveType::DriveUnknown,
            1 => DriveType::DriveNotRootDir,
            2 => DriveType::DriveRemovable,
            DRIVE_FIXED => DriveType::DriveFixed,
            4 => DriveType::DriveRemote,
            5 => DriveType::DriveCdrom,
            6 => DriveType::DriveRamdisk,
            _ => DriveType::None,
        }
    }

    /// Write the volume table used for new `Shortcut` files: a fixed drive with no serial and an empty label
    pub(crate) fn write_local_volume(buffer: &mut LinkBuffer) {
        buffer.push_u32(LOCAL_VOLUME_TABLE_SIZE);
        buffer.push_u32(DRIVE_FIXED);
        buffer.push_u32(0);
        // Label is the last byte of the table
        buffer.push_u32(LOCAL_VOLUME_TABLE_SIZE - 1);
        buffer.push_cstring(&[]);
    }
}

#[cfg(test)]
mod tests {
    use super::{LnkVolume, LOCAL_VOLUME_TABLE_SIZE};
    use crate::utils::buffer::LinkBuffer;
    use common::windows::DriveType;

    #[test]
    fn test_parse_volume() {
        let test = [17, 0, 0, 0, 3, 0, 0, 0, 129, 138, 122, 48, 16, 0, 0, 0, 0, 67, 58];
        let (remaining, result) = LnkVolume::parse_volume(&test).unwrap();
        assert_eq!(result.size, 17);
        assert_eq!(result.drive_type(), DriveType::DriveFixed);
        assert_eq!(result.drive_serial, 0x307a8a81);
        assert_eq!(result.label_offset, 16);
        assert_eq!(result.volume_label, "");
        assert_eq!(remaining, [67, 58]);
    }

    #[test]
    fn test_parse_volume_label() {
        let test = [
            22, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 16, 0, 0, 0, 68, 65, 84, 65, 0, 0,
        ];
        let (_, result) = LnkVolume::parse_volume(&test).unwrap();
        assert_eq!(result.drive_type(), DriveType::DriveRemovable);
        assert_eq!(result.volume_label, "DATA");
    }

    #[test]
    fn test_parse_volume_too_small() {
        let test = [8, 0, 0, 0, 3, 0, 0, 0];
        let (_, result) = LnkVolume::parse_volume(&test).unwrap();
        assert_eq!(result.size, 8);
        assert_eq!(result.drive_type, 0);
    }

    #[test]
    fn test_parse_volume_bad_label() {
        let test = [17, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 40, 0, 0, 0, 0];
        assert!(LnkVolume::parse_volume(&test).is_err());
    }

    #[test]
    fn test_write_local_volume() {
        let mut buffer = LinkBuffer::new();
        LnkVolume::write_local_volume(&mut buffer);
        assert_eq!(buffer.len(), LOCAL_VOLUME_TABLE_SIZE as usize);

        let (_, result) = LnkVolume::parse_volume(buffer.as_slice()).unwrap();
        assert_eq!(result.drive_type(), DriveType::DriveFixed);
        assert_eq!(result.drive_serial, 0);
        assert_eq!(result.label_offset, 16);
    }
}
