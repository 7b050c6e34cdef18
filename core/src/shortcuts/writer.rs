use super::{
    error::LnkError,
    header::{
        LnkHeader, ATTRIBUTE_ARCHIVE, ATTRIBUTE_DIRECTORY, HAS_ARGUMENTS, HAS_ICON_LOCATION,
        HAS_LINK_INFO, HAS_NAME, HAS_TARGET_ID_LIST, HAS_WORKING_DIRECTORY, IS_UNICODE,
    },
    items::build_id_list,
    location::LnkLocation,
    strings::write_string,
};
use crate::{filesystem::LinkFileSystem, utils::buffer::LinkBuffer};
use common::windows::LinkInfo;
use log::{error, warn};

/**
 * Encode `LinkInfo` into `Shortcut` data
 * `fs` is used to classify the target and to look up its 8.3 path. Nothing is written to disk
 */
pub fn encode<F: LinkFileSystem>(info: &LinkInfo, fs: &F) -> Result<Vec<u8>, LnkError> {
    let target = &info.target;
    let short_path = fs.short_path(target);
    if short_path.is_empty() {
        error!("[shortcuts] Could not get the short path for target: {target}");
        return Err(LnkError::UnresolvableTarget);
    }

    let short_parts = fs.split_path(&short_path);
    let long_parts = fs.split_path(target);
    let id_list = build_id_list(&short_parts, &long_parts)?;

    let is_file = fs.is_file(target);
    let is_directory = fs.is_directory(target);
    if !is_file && !is_directory {
        warn!("[shortcuts] Target does not exist: {target}");
    }

    let mut attributes = ATTRIBUTE_ARCHIVE;
    if is_directory {
        attributes |= ATTRIBUTE_DIRECTORY;
    }
    // Only the low 32 bits of the size are stored
    let file_size = if is_file {
        (fs.file_size(target) & u64::from(u32::MAX)) as u32
    } else {
        0
    };
    let icon_index = if info.custom_icon.filename.is_empty() {
        0
    } else {
        info.custom_icon.index
    };

    let header = LnkHeader::new(
        link_flags(info, is_file || is_directory),
        attributes,
        file_size,
        icon_index,
        info.hot_key,
    );

    let mut buffer = LinkBuffer::with_capacity(1024);
    header.write_header(&mut buffer);
    buffer.push_bytes(&id_list);
    LnkLocation::write_location(&mut buffer, target)?;

    // Same order the flags are read in
    let strings = [
        &info.description,
        &info.working_directory,
        &info.arguments,
        &info.custom_icon.filename,
    ];
    for value in strings {
        if !value.is_empty() {
            write_string(&mut buffer, value)?;
        }
    }

    let terminal_block = 0;
    buffer.push_u32(terminal_block);

    Ok(buffer.into_bytes())
}

/**
 * Data flags for a new `Shortcut`. Shell items, location block, and UTF16 strings are always written
 * `HasLinkInfo` is only set when the target exists, even though the location block is always present
 */
fn link_flags(info: &LinkInfo, target_exists: bool) -> u32 {
    let mut flags = HAS_TARGET_ID_LIST | IS_UNICODE;
    if target_exists {
        flags |= HAS_LINK_INFO;
    }
    let optional = [
        (&info.description, HAS_NAME),
        (&info.working_directory, HAS_WORKING_DIRECTORY),
        (&info.arguments, HAS_ARGUMENTS),
        (&info.custom_icon.filename, HAS_ICON_LOCATION),
    ];
    for (value, flag) in optional {
        if !value.is_empty() {
            flags |= flag;
        }
    }
    flags
}
