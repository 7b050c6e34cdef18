use crate::utils::{
    buffer::LinkBuffer,
    nom_helper::{
        nom_signed_four_bytes, nom_unsigned_eight_bytes, nom_unsigned_four_bytes,
        nom_unsigned_two_bytes,
    },
    uuid::format_guid_le_bytes,
};
use common::windows::{AttributeFlags, DataFlags, HotKey, ShowCommand};
use nom::bytes::complete::take;

/// Size of the fixed `Shortcut` header
pub(crate) const HEADER_SIZE: usize = 76;
/// Header size field. Doubles as the file signature (`4C 00 00 00`)
const HEADER_SIGNATURE: u32 = 0x4c;
/// 00021401-0000-0000-c000-000000000046
pub(crate) const LINK_CLSID: [u8; 16] = [
    0x01, 0x14, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x46,
];

pub(crate) const HAS_TARGET_ID_LIST: u32 = 0x1;
pub(crate) const HAS_LINK_INFO: u32 = 0x2;
pub(crate) const HAS_NAME: u32 = 0x4;
pub(crate) const HAS_RELATIVE_PATH: u32 = 0x8;
pub(crate) const HAS_WORKING_DIRECTORY: u32 = 0x10;
pub(crate) const HAS_ARGUMENTS: u32 = 0x20;
pub(crate) const HAS_ICON_LOCATION: u32 = 0x40;
pub(crate) const IS_UNICODE: u32 = 0x80;

pub(crate) const ATTRIBUTE_DIRECTORY: u32 = 0x10;
pub(crate) const ATTRIBUTE_ARCHIVE: u32 = 0x20;

pub(crate) const SHOW_NORMAL: u32 = 1;

#[derive(Debug, PartialEq)]
pub(crate) struct LnkHeader {
    /**Should always be 0x4c (76) */
    pub(crate) size: u32,
    /**Should be 00021401-0000-0000-c000-000000000046 */
    pub(crate) class_id: String,
    pub(crate) flags: u32,
    pub(crate) attributes: u32,
    pub(crate) created: u64,
    pub(crate) accessed: u64,
    pub(crate) modified: u64,
    pub(crate) file_size: u32,
    pub(crate) icon_index: i32,
    pub(crate) show_command: u32,
    pub(crate) hot_key: HotKey,
    _reserved: u16,
    _reserved2: u32,
    _reserved3: u32,
}

/// Cheap check for the `Shortcut` signature and class id
pub(crate) fn is_link_header(data: &[u8]) -> bool {
    if data.len() < HEADER_SIZE {
        return false;
    }
    data[0..4] == HEADER_SIGNATURE.to_le_bytes() && data[4..20] == LINK_CLSID
}

impl LnkHeader {
    /// Parse the `Shortcut` file header. Contains the data flags, target attributes, timestamps, and target file size
    pub(crate) fn parse_header(data: &[u8]) -> nom::IResult<&[u8], LnkHeader> {
        let (input, size) = nom_unsigned_four_bytes(data)?;
        let (input, guid_data) = take(LINK_CLSID.len())(input)?;
        let (input, flags) = nom_unsigned_four_bytes(input)?;
        let (input, attributes) = nom_unsigned_four_bytes(input)?;

        let (input, created) = nom_unsigned_eight_bytes(input)?;
        let (input, accessed) = nom_unsigned_eight_bytes(input)?;
        let (input, modified) = nom_unsigned_eight_bytes(input)?;

        let (input, file_size) = nom_unsigned_four_bytes(input)?;
        let (input, icon_index) = nom_signed_four_bytes(input)?;
        let (input, show_command) = nom_unsigned_four_bytes(input)?;
        let (input, hot_key) = nom_unsigned_two_bytes(input)?;

        let (input, reserved) = nom_unsigned_two_bytes(input)?;
        let (input, reserved2) = nom_unsigned_four_bytes(input)?;
        let (input, reserved3) = nom_unsigned_four_bytes(input)?;

        let header = LnkHeader {
            size,
            class_id: format_guid_le_bytes(guid_data),
            flags,
            attributes,
            created,
            accessed,
            modified,
            file_size,
            icon_index,
            show_command,
            hot_key: HotKey::from_u16(hot_key),
            _reserved: reserved,
            _reserved2: reserved2,
            _reserved3: reserved3,
        };

        Ok((input, header))
    }

    /// Header for a new `Shortcut`. Timestamps are left at zero
    pub(crate) fn new(
        flags: u32,
        attributes: u32,
        file_size: u32,
        icon_index: i32,
        hot_key: HotKey,
    ) -> LnkHeader {
        LnkHeader {
            size: HEADER_SIGNATURE,
            class_id: format_guid_le_bytes(&LINK_CLSID),
            flags,
            attributes,
            created: 0,
            accessed: 0,
            modified: 0,
            file_size,
            icon_index,
            show_command: SHOW_NORMAL,
            hot_key,
            _reserved: 0,
            _reserved2: 0,
            _reserved3: 0,
        }
    }

    /// Serialize the header. Always writes `HEADER_SIZE` bytes
    pub(crate) fn write_header(&self, buffer: &mut LinkBuffer) {
        buffer.push_u32(HEADER_SIGNATURE);
        buffer.push_bytes(&LINK_CLSID);
        buffer.push_u32(self.flags);
        buffer.push_u32(self.attributes);
        buffer.push_u64(self.created);
        buffer.push_u64(self.accessed);
        buffer.push_u64(self.modified);
        buffer.push_u32(self.file_size);
        buffer.push_i32(self.icon_index);
        buffer.push_u32(self.show_command);
        buffer.push_u16(self.hot_key.as_u16());
        buffer.push_u16(self._reserved);
        buffer.push_u32(self._reserved2);
        buffer.push_u32(self._reserved3);
    }

    pub(crate) fn has_flag(&self, flag: u32) -> bool {
        (self.flags & flag) == flag
    }

    /// Get data flags from `Shortcut` header. Controls which other structures are available
    pub(crate) fn data_flags(&self) -> Vec<DataFlags> {
        let flag_list = [
            (HAS_TARGET_ID_LIST, DataFlags::HasTargetIdList),
            (HAS_LINK_INFO, DataFlags::HasLinkInfo),
            (HAS_NAME, DataFlags::HasName),
            (HAS_RELATIVE_PATH, DataFlags::HasRelativePath),
            (HAS_WORKING_DIRECTORY, DataFlags::HasWorkingDirectory),
            (HAS_ARGUMENTS, DataFlags::HasArguments),
            (HAS_ICON_LOCATION, DataFlags::HasIconLocation),
            (IS_UNICODE, DataFlags::IsUnicode),
            (0x100, DataFlags::ForceNoLinkInfo),
            (0x200, DataFlags::HasExpString),
            (0x400, DataFlags::RunInSeparateProcess),
            (0x1000, DataFlags::HasDarwinId),
            (0x2000, DataFlags::RunAsUser),
            (0x4000, DataFlags::HasExpIcon),
            (0x8000, DataFlags::NoPidAlias),
            (0x20000, DataFlags::RunWithShimLayer),
            (0x40000, DataFlags::ForceNoLinkTrack),
            (0x80000, DataFlags::EnableTargetMetadata),
            (0x100000, DataFlags::DisableLinkPathTracking),
            (0x200000, DataFlags::DisableKnownFolderTracking),
            (0x400000, DataFlags::DisableKnownFolderAlias),
            (0x800000, DataFlags::AllowLinkToLink),
            (0x1000000, DataFlags::UnaliasOnSave),
            (0x2000000, DataFlags::PreferEnvironmentPath),
            (0x4000000, DataFlags::KeepLocalDListForUncTarget),
        ];

        // A shortcut file may have multiple flags
        flag_list
            .into_iter()
            .filter(|(flag, _)| self.has_flag(*flag))
            .map(|(_, data_flag)| data_flag)
            .collect()
    }

    /// Get target attribute flags. Only the first 13 bits are meaningful
    pub(crate) fn attribute_flags(&self) -> Vec<AttributeFlags> {
        let attribute_list = [
            (0x1, AttributeFlags::ReadOnly),
            (0x2, AttributeFlags::Hidden),
            (0x4, AttributeFlags::System),
            (0x8, AttributeFlags::VolumeLabel),
            (ATTRIBUTE_DIRECTORY, AttributeFlags::Directory),
            (ATTRIBUTE_ARCHIVE, AttributeFlags::Archive),
            (0x40, AttributeFlags::Encrypted),
            (0x80, AttributeFlags::Normal),
            (0x100, AttributeFlags::Temporary),
            (0x200, AttributeFlags::SparseFile),
            (0x400, AttributeFlags::ReparsePoint),
            (0x800, AttributeFlags::Compressed),
            (0x1000, AttributeFlags::Offline),
        ];

        attribute_list
            .into_iter()
            .filter(|(flag, _)| (self.attributes & flag) == *flag)
            .map(|(_, attribute)| attribute)
            .collect()
    }

    pub(crate) fn show_command(&self) -> ShowCommand {
        match self.show_command {
            SHOW_NORMAL => ShowCommand::Normal,
            3 => ShowCommand::Maximized,
            7 => ShowCommand::MinNoActive,
            _ => ShowCommand::Unknown,
        }
    }
}
