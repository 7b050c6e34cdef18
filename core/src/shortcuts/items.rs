use super::{
    error::LnkError,
    shellitems::{DIRECTORY_ITEM, FILE_ITEM},
};
use crate::utils::{
    buffer::LinkBuffer,
    strings::{encode_latin1, encode_utf16},
};
use log::warn;

/// My Computer shell item. Written as is
const COMPUTER_ITEM_DATA: [u8; 20] = [
    0x14, 0x00, 0x1f, 0x50, 0xe0, 0x4f, 0xd0, 0x20, 0xea, 0x3a, 0x69, 0x10, 0xa2, 0xd8, 0x08, 0x00,
    0x2b, 0x30, 0x30, 0x9d,
];

/// Drive shell item. The drive letter is at offset 3
const DRIVE_ITEM_DATA: [u8; 25] = [
    0x19, 0x00, 0x2f, b'C', b':', b'\\', 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];
const DRIVE_LETTER_OFFSET: usize = 3;

/// Extension block version written for directory and file items (Windows XP style)
const EXTENSION_VERSION: [u8; 4] = [0x03, 0x00, 0x04, 0x00];
const EXTENSION_SIGNATURE: [u8; 2] = [0xef, 0xbe];
const EXTENSION_TRAILER: [u8; 2] = [0x18, 0x00];

/// Fixed bytes of an item extension block: size, version, signature, two timestamps, unknown dword, trailer
const EXTENSION_FIXED_SIZE: usize = 22;
/// Fixed bytes of a directory or file item before the 8.3 name, plus the padding byte and the extension fixed bytes
const ITEM_FIXED_SIZE: usize = 37;

/**
 * Values that differ between directory and file items
 * Besides the type and attribute only the third byte of the timestamp patterns changes (0x0e vs 0x13)
 */
struct ItemTemplate {
    item_type: u8,
    attribute: u16,
    timestamp: [u8; 4],
}

const DIRECTORY_TEMPLATE: ItemTemplate = ItemTemplate {
    item_type: DIRECTORY_ITEM,
    attribute: 0x10,
    timestamp: [0x3a, 0x3e, 0x0e, 0x6b],
};

const FILE_TEMPLATE: ItemTemplate = ItemTemplate {
    item_type: FILE_ITEM,
    attribute: 0x20,
    timestamp: [0x3a, 0x3e, 0x13, 0x6b],
};

/**
 * Build the shell item ID list for a target path
 * `short_parts` and `long_parts` are the 8.3 and long components of the same path (drive, directories, file)
 * Returns `UnresolvableTarget` when the components cannot describe a drive, a directory and a file
 */
pub(crate) fn build_id_list(
    short_parts: &[String],
    long_parts: &[String],
) -> Result<Vec<u8>, LnkError> {
    let min_parts = 3;
    if short_parts.len() < min_parts || long_parts.len() < min_parts {
        warn!("[shortcuts] Target needs at least a drive, a directory, and a file");
        return Err(LnkError::UnresolvableTarget);
    }
    if short_parts.len() != long_parts.len() {
        warn!(
            "[shortcuts] Short path has {} components but long path has {}",
            short_parts.len(),
            long_parts.len()
        );
        return Err(LnkError::UnresolvableTarget);
    }

    let drive_letter = match short_parts[0].as_bytes().first() {
        Some(letter) if letter.is_ascii_alphabetic() => letter.to_ascii_uppercase(),
        _ => {
            warn!("[shortcuts] Target does not start with a drive: {}", short_parts[0]);
            return Err(LnkError::UnresolvableTarget);
        }
    };

    let mut buffer = LinkBuffer::with_capacity(512);
    // List size is updated once all items are written
    buffer.push_u16(0);
    buffer.push_bytes(&COMPUTER_ITEM_DATA);

    let mut drive = DRIVE_ITEM_DATA;
    drive[DRIVE_LETTER_OFFSET] = drive_letter;
    buffer.push_bytes(&drive);

    let last = short_parts.len() - 1;
    for (index, (short_name, long_name)) in short_parts.iter().zip(long_parts).enumerate().skip(1) {
        let template = if index == last {
            &FILE_TEMPLATE
        } else {
            &DIRECTORY_TEMPLATE
        };
        write_item(&mut buffer, short_name, long_name, template)?;
    }

    let end_of_list = 0;
    buffer.push_u16(end_of_list);

    // List size does not include itself
    let list_size = match u16::try_from(buffer.len() - 2) {
        Ok(result) => result,
        Err(_err) => return Err(LnkError::FieldTooLarge),
    };
    buffer.set_u16(0, list_size);

    Ok(buffer.into_bytes())
}

/// Append one directory or file item
fn write_item(
    buffer: &mut LinkBuffer,
    short_name: &str,
    long_name: &str,
    template: &ItemTemplate,
) -> Result<(), LnkError> {
    let short_bytes = encode_latin1(short_name);
    let long_units = encode_utf16(long_name);
    if short_bytes.is_empty() || long_units.is_empty() {
        warn!("[shortcuts] Empty path component in target");
        return Err(LnkError::UnresolvableTarget);
    }

    // Long name is written with its NUL terminator
    let long_size = (long_units.len() + 1) * 2;
    let item_size = ITEM_FIXED_SIZE + short_bytes.len() + 1 + long_size;
    let extension_size = EXTENSION_FIXED_SIZE + long_size;
    let (item_size, extension_size) =
        match (u16::try_from(item_size), u16::try_from(extension_size)) {
            (Ok(item), Ok(extension)) => (item, extension),
            _ => return Err(LnkError::FieldTooLarge),
        };

    let start = buffer.len();
    buffer.push_u16(item_size);
    buffer.push_u8(template.item_type);
    buffer.push_bytes(&[0; 5]);
    buffer.push_bytes(&template.timestamp);
    buffer.push_u16(template.attribute);
    buffer.push_cstring(&short_bytes);
    // Padding byte is always written
    buffer.push_u8(0);

    buffer.push_u16(extension_size);
    buffer.push_bytes(&EXTENSION_VERSION);
    buffer.push_bytes(&EXTENSION_SIGNATURE);
    buffer.push_bytes(&template.timestamp);
    buffer.push_bytes(&template.timestamp);
    buffer.push_u32(0x14);
    buffer.push_utf16(&long_units);
    buffer.push_u16(0);
    buffer.push_bytes(&EXTENSION_TRAILER);

    debug_assert_eq!(buffer.len() - start, item_size as usize);
    Ok(())
}
