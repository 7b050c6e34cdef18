use super::{
    error::LnkError,
    extras::parse_extra_data,
    header::{
        is_link_header, LnkHeader, HAS_ARGUMENTS, HAS_ICON_LOCATION, HAS_LINK_INFO, HAS_NAME,
        HAS_RELATIVE_PATH, HAS_TARGET_ID_LIST, HAS_WORKING_DIRECTORY, IS_UNICODE,
    },
    location::LnkLocation,
    shellitems::{parse_id_list, resolve_target},
    strings::{extract_string, TextMode},
};
use crate::utils::time::filetime_to_iso;
use common::windows::{CustomIcon, DriveType, ExtraData, LinkInfo, ShellItem, ShortcutInfo};
use log::{error, warn};

/// All structures found in `Shortcut` data
#[derive(Debug)]
pub(crate) struct LnkDocument {
    pub(crate) header: LnkHeader,
    pub(crate) shellitems: Vec<ShellItem>,
    pub(crate) location: LnkLocation,
    pub(crate) description: String,
    pub(crate) relative_path: String,
    pub(crate) working_directory: String,
    pub(crate) arguments: String,
    pub(crate) icon_location: String,
    pub(crate) extra_data: Vec<ExtraData>,
}

/// Decode `Shortcut` data into its structures
pub(crate) fn decode_document(data: &[u8], mode: TextMode) -> Result<LnkDocument, LnkError> {
    if !is_link_header(data) {
        error!("[shortcuts] Data does not have a shortcut header");
        return Err(LnkError::NotALinkFile);
    }

    let document = match parse_document(data, mode) {
        Ok((_, result)) => result,
        Err(err) => {
            error!("[shortcuts] Shortcut data is truncated: {err:?}");
            return Err(LnkError::TruncatedRecord);
        }
    };

    if document.location.has_malformed_table() {
        error!("[shortcuts] Volume table is smaller than its fixed size");
        return Err(LnkError::MalformedVolumeTable);
    }
    Ok(document)
}

/// Parse the `Shortcut` structures in file order
fn parse_document(data: &[u8], mode: TextMode) -> nom::IResult<&[u8], LnkDocument> {
    let (mut input, header) = LnkHeader::parse_header(data)?;

    let mut document = LnkDocument {
        header,
        shellitems: Vec::new(),
        location: LnkLocation::default(),
        description: String::new(),
        relative_path: String::new(),
        working_directory: String::new(),
        arguments: String::new(),
        icon_location: String::new(),
        extra_data: Vec::new(),
    };

    if document.header.has_flag(HAS_TARGET_ID_LIST) {
        let (remaining, shellitems) = parse_id_list(input, mode)?;
        document.shellitems = shellitems;
        input = remaining;
    }

    if has_location(&document.header, input) {
        let (remaining, location) = LnkLocation::parse_location(input)?;
        document.location = location;
        input = remaining;
    }

    let is_unicode = document.header.has_flag(IS_UNICODE);
    let string_flags = [
        HAS_NAME,
        HAS_RELATIVE_PATH,
        HAS_WORKING_DIRECTORY,
        HAS_ARGUMENTS,
        HAS_ICON_LOCATION,
    ];
    for flag in string_flags {
        if !document.header.has_flag(flag) {
            continue;
        }
        let (remaining, value) = extract_string(input, is_unicode, mode)?;
        input = remaining;

        match flag {
            HAS_NAME => document.description = value,
            HAS_RELATIVE_PATH => document.relative_path = value,
            HAS_WORKING_DIRECTORY => document.working_directory = value,
            HAS_ARGUMENTS => document.arguments = value,
            _ => document.icon_location = value,
        }
    }

    let (input, extra_data) = parse_extra_data(input)?;
    document.extra_data = extra_data;

    Ok((input, document))
}

/**
 * Check if a location block follows the shell items
 * Writers set `HasLinkInfo` only when the target existed but still emit the block,
 * so without the flag the block is recognized by its fixed header
 */
pub(crate) fn has_location(header: &LnkHeader, data: &[u8]) -> bool {
    header.has_flag(HAS_LINK_INFO) || LnkLocation::is_location_block(data)
}

impl LnkDocument {
    /**
     * Get the shortcut details needed to use or rebuild the link
     * Shell items provide the target. The location block is only used when they produce nothing
     */
    pub(crate) fn link_info(&self) -> LinkInfo {
        let mut target = resolve_target(&self.shellitems);
        if target.is_empty() {
            target = self.location.target_path();
        }
        if target.is_empty() {
            warn!("[shortcuts] Could not determine shortcut target");
        }

        LinkInfo {
            target,
            network_path: self.location.network_path(),
            description: self.description.clone(),
            working_directory: self.working_directory.clone(),
            arguments: self.arguments.clone(),
            custom_icon: CustomIcon {
                filename: self.icon_location.clone(),
                index: self.header.icon_index,
            },
            hot_key: self.header.hot_key,
        }
    }

    /// Get every parsed structure for reporting
    pub(crate) fn shortcut_info(self, source_path: &str) -> ShortcutInfo {
        let link = self.link_info();

        let (drive_type, drive_serial, volume_label) = match &self.location.volume {
            Some(volume) => (
                volume.drive_type(),
                format!("{:X}", volume.drive_serial),
                volume.volume_label.clone(),
            ),
            None => (DriveType::None, String::new(), String::new()),
        };
        let network_share_name = match &self.location.network {
            Some(network) => network.share_name.clone(),
            None => String::new(),
        };

        ShortcutInfo {
            source_path: source_path.to_string(),
            data_flags: self.header.data_flags(),
            attribute_flags: self.header.attribute_flags(),
            created: filetime_to_iso(self.header.created),
            modified: filetime_to_iso(self.header.modified),
            accessed: filetime_to_iso(self.header.accessed),
            file_size: self.header.file_size,
            icon_index: self.header.icon_index,
            show_command: self.header.show_command(),
            hot_key: self.header.hot_key.to_string(),
            location_flags: self.location.location_flag(),
            base_path: self.location.base_path,
            final_path: self.location.final_path,
            drive_type,
            drive_serial,
            volume_label,
            network_share_name,
            shellitems: self.shellitems,
            description: self.description,
            relative_path: self.relative_path,
            working_directory: self.working_directory,
            command_line_args: self.arguments,
            icon_location: self.icon_location,
            extra_data: self.extra_data,
            link,
        }
    }
}
