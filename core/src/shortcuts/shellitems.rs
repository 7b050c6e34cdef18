use super::strings::TextMode;
use crate::utils::{
    nom_helper::{nom_cstring, nom_unsigned_one_byte, nom_unsigned_two_bytes},
    strings::extract_latin1_string,
};
use common::windows::{ShellItem, ShellType};
use log::warn;
use nom::{bytes::complete::take, Needed};

pub(crate) const COMPUTER_ITEM: u8 = 0x1f;
pub(crate) const DRIVE_ITEM: u8 = 0x2f;
pub(crate) const DIRECTORY_ITEM: u8 = 0x31;
pub(crate) const FILE_ITEM: u8 = 0x32;

/// Offset of the 8.3 name in directory and file items (after size, type, unknown, file size, timestamp, attributes)
const SHORT_NAME_OFFSET: usize = 14;
/// Directory and file items end with 2 reserved bytes after the long name
const ITEM_TRAILER_SIZE: usize = 2;

/**
 * Parse the shell item ID list found after the `Shortcut` header
 * The list starts with its total size, followed by size prefixed items. An item size of 0 ends the list
 */
pub(crate) fn parse_id_list(data: &[u8], mode: TextMode) -> nom::IResult<&[u8], Vec<ShellItem>> {
    let (mut input, _list_size) = nom_unsigned_two_bytes(data)?;
    let mut items = Vec::new();

    loop {
        let (_, item_size) = nom_unsigned_two_bytes(input)?;
        let end_of_list = 0;
        if item_size == end_of_list {
            let (remaining, _) = take(ITEM_TRAILER_SIZE)(input)?;
            input = remaining;
            break;
        }

        // Item size includes the size itself
        let (remaining, item_data) = take(item_size as usize)(input)?;
        input = remaining;

        let (_, item) = parse_item(item_data, mode)?;
        items.push(item);
    }

    Ok((input, items))
}

/// Parse a single shell item. `data` contains the whole item including its size
pub(crate) fn parse_item(data: &[u8], mode: TextMode) -> nom::IResult<&[u8], ShellItem> {
    let (input, _size) = nom_unsigned_two_bytes(data)?;
    let (_, item_type) = nom_unsigned_one_byte(input)?;

    let item = match item_type {
        COMPUTER_ITEM => ShellItem {
            value: String::new(),
            short_name: String::new(),
            shell_type: ShellType::Computer,
        },
        DRIVE_ITEM => {
            let (drive_data, _) = take(3_usize)(data)?;
            ShellItem {
                value: extract_latin1_string(drive_data),
                short_name: String::new(),
                shell_type: ShellType::Drive,
            }
        }
        DIRECTORY_ITEM | FILE_ITEM => {
            let (_, (short_name, long_name)) = parse_names(data, mode)?;
            let shell_type = if item_type == DIRECTORY_ITEM {
                ShellType::Directory
            } else {
                ShellType::File
            };
            ShellItem {
                value: long_name,
                short_name,
                shell_type,
            }
        }
        _ => {
            warn!("[shortcuts] Unsupported shell item type: {item_type:#x}");
            ShellItem {
                value: String::new(),
                short_name: String::new(),
                shell_type: ShellType::Unknown,
            }
        }
    };

    Ok((&data[data.len()..], item))
}

/// Get the 8.3 name and the long name from a directory or file item
fn parse_names(data: &[u8], mode: TextMode) -> nom::IResult<&[u8], (String, String)> {
    let (name_start, _) = take(SHORT_NAME_OFFSET)(data)?;
    let (input, short_data) = nom_cstring(name_start)?;
    let short_name = extract_latin1_string(short_data);

    // Older items have no extension block. Only the 8.3 name exists
    if input.len() < ITEM_TRAILER_SIZE {
        return Ok((input, (short_name.clone(), short_name)));
    }

    /*
     * The padding byte after the 8.3 name is not always written
     * If the first byte is 0 it is the padding and the extension size follows
     * Otherwise the byte is already the low byte of the extension size
     */
    let (input, first) = nom_unsigned_one_byte(input)?;
    let (input, size_low) = if first == 0 {
        nom_unsigned_one_byte(input)?
    } else {
        (input, first)
    };
    let (input, size_high) = nom_unsigned_one_byte(input)?;
    let extension_size = u16::from_le_bytes([size_low, size_high]);
    if extension_size == 0 {
        return Ok((input, (short_name.clone(), short_name)));
    }

    let long_name = long_name(data, mode)?;
    Ok((input, (short_name, long_name)))
}

/**
 * Find the long name by scanning backward over UTF16 units from the end of the item
 * The declared extension size is not reliable across Windows versions, but the layout of the tail is:
 *   `<NUL unit> <long name units> <NUL unit> <2 reserved bytes>`
 */
fn long_name(data: &[u8], mode: TextMode) -> Result<String, nom::Err<nom::error::Error<&[u8]>>> {
    let unit_size = 2;
    let is_nul = |offset: usize| data[offset] == 0 && data[offset + 1] == 0;

    if data.len() < ITEM_TRAILER_SIZE + unit_size {
        return Err(nom::Err::Incomplete(Needed::Unknown));
    }

    // Terminator of the long name
    let mut end = data.len() - ITEM_TRAILER_SIZE - unit_size;
    while !is_nul(end) {
        if end < unit_size {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }
        end -= unit_size;
    }

    // NUL unit just before the long name
    let mut start = end;
    loop {
        if start < unit_size {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }
        start -= unit_size;
        if is_nul(start) {
            break;
        }
    }

    Ok(mode.utf16_to_string(&data[start + unit_size..end]))
}

/**
 * Build the target path from the shell items
 * The drive item starts the path. Directory and file names are appended with `\`
 * If no drive was seen the path is marked relative with `.\`
 */
pub(crate) fn resolve_target(items: &[ShellItem]) -> String {
    let mut target = String::new();
    for item in items {
        match item.shell_type {
            ShellType::Drive => target = item.value.clone(),
            ShellType::Directory | ShellType::File => {
                if target.is_empty() {
                    target.push_str(".\\");
                } else if !target.ends_with('\\') {
                    target.push('\\');
                }
                target.push_str(&item.value);
            }
            ShellType::Computer | ShellType::Unknown => {}
        }
    }
    target
}
