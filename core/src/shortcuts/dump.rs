use super::{
    extras::parse_extra_data,
    header::{
        is_link_header, LnkHeader, HAS_ARGUMENTS, HAS_ICON_LOCATION, HAS_NAME, HAS_RELATIVE_PATH,
        HAS_TARGET_ID_LIST, HAS_WORKING_DIRECTORY, HEADER_SIZE, IS_UNICODE,
    },
    location::LnkLocation,
    network::NETWORK_VOLUME_TABLE_SIZE,
    parser::has_location,
    shellitems::parse_id_list,
    strings::{extract_string, TextMode},
    volume::LOCAL_VOLUME_TABLE_SIZE,
};
use crate::utils::{encoding::hex_string, time::filetime_to_display};
use log::warn;

/**
 * Render `Shortcut` data as a readable trace
 * Malformed data does not stop the dump. Everything parsed before the problem is still shown
 */
pub fn dump(data: &[u8]) -> String {
    let mut lines = Vec::new();
    if !is_link_header(data) {
        lines.push(String::from("Not shortcut data"));
        lines.push(format!("  first bytes: {}", hex_string(&data[..data.len().min(20)])));
        return lines.join("\n");
    }

    match dump_sections(data, &mut lines) {
        Ok((remaining, _)) => {
            if !remaining.is_empty() {
                lines.push(format!("Trailing data: {} bytes", remaining.len()));
            }
        }
        Err(err) => {
            warn!("[shortcuts] Dump stopped on truncated data: {err:?}");
            lines.push(String::from("Truncated data: dump stopped"));
        }
    }
    lines.join("\n")
}

/// Append every section that can be parsed
fn dump_sections<'a>(data: &'a [u8], lines: &mut Vec<String>) -> nom::IResult<&'a [u8], ()> {
    let (mut input, header) = LnkHeader::parse_header(data)?;
    dump_header(&header, &data[..HEADER_SIZE], lines);

    let mode = TextMode::Unicode;
    if header.has_flag(HAS_TARGET_ID_LIST) {
        let list_start = input;
        let (remaining, items) = parse_id_list(input, mode)?;
        lines.push(format!(
            "Shell items ({} bytes)",
            list_start.len() - remaining.len()
        ));
        for (index, item) in items.iter().enumerate() {
            lines.push(format!(
                "  [{index}] {:?}: {} ({})",
                item.shell_type, item.value, item.short_name
            ));
        }
        input = remaining;
    }

    if has_location(&header, input) {
        let (remaining, location) = LnkLocation::parse_location(input)?;
        dump_location(&location, lines);
        input = remaining;
    }

    let is_unicode = header.has_flag(IS_UNICODE);
    let string_flags = [
        (HAS_NAME, "description"),
        (HAS_RELATIVE_PATH, "relative path"),
        (HAS_WORKING_DIRECTORY, "working directory"),
        (HAS_ARGUMENTS, "arguments"),
        (HAS_ICON_LOCATION, "icon location"),
    ];
    lines.push(String::from("Strings"));
    for (flag, name) in string_flags {
        if !header.has_flag(flag) {
            continue;
        }
        let (remaining, value) = extract_string(input, is_unicode, mode)?;
        lines.push(format!("  {name}: {value}"));
        input = remaining;
    }

    let (remaining, extras) = parse_extra_data(input)?;
    lines.push(format!("Extra data ({} blocks)", extras.len()));
    let mut block_start = input;
    for extra in extras {
        let preview_size = (extra.size as usize).min(16);
        lines.push(format!(
            "  {:?}: size {} signature {:#010x}",
            extra.block_type, extra.size, extra.signature
        ));
        lines.push(format!("    {}", hex_string(&block_start[..preview_size])));
        block_start = &block_start[extra.size as usize..];
    }

    Ok((remaining, ()))
}

fn dump_header(header: &LnkHeader, raw: &[u8], lines: &mut Vec<String>) {
    lines.push(String::from("Header"));
    lines.push(format!("  bytes: {}", hex_string(raw)));
    lines.push(format!("  size: {}", header.size));
    lines.push(format!("  class id: {}", header.class_id));
    lines.push(format!(
        "  flags: {:#010x} {:?}",
        header.flags,
        header.data_flags()
    ));
    lines.push(format!(
        "  attributes: {:#010x} {:?}",
        header.attributes,
        header.attribute_flags()
    ));
    lines.push(format!("  created: {}", filetime_to_display(header.created)));
    lines.push(format!("  accessed: {}", filetime_to_display(header.accessed)));
    lines.push(format!("  modified: {}", filetime_to_display(header.modified)));
    lines.push(format!("  file size: {}", header.file_size));
    lines.push(format!("  icon index: {}", header.icon_index));
    lines.push(format!("  show command: {:?}", header.show_command()));
    lines.push(format!("  hot key: {}", header.hot_key));
}

fn dump_location(location: &LnkLocation, lines: &mut Vec<String>) {
    lines.push(format!(
        "Location ({} bytes, header {} bytes)",
        location.size, location.header_size
    ));
    lines.push(format!("  type: {:?}", location.location_flag()));
    lines.push(format!(
        "  offsets: volume {} base path {} network {} final path {}",
        location.volume_offset,
        location.base_path_offset,
        location.network_offset,
        location.final_path_offset
    ));
    lines.push(format!("  base path: {}", location.base_path));
    lines.push(format!("  final path: {}", location.final_path));

    if let Some(volume) = &location.volume {
        if volume.size < LOCAL_VOLUME_TABLE_SIZE {
            lines.push(format!(
                "  warning: volume table is {} bytes, expected at least {LOCAL_VOLUME_TABLE_SIZE}",
                volume.size
            ));
        } else {
            lines.push(format!(
                "  volume: {:?} serial {:X} label {}",
                volume.drive_type(),
                volume.drive_serial,
                volume.volume_label
            ));
        }
    }
    if let Some(network) = &location.network {
        if network.size < NETWORK_VOLUME_TABLE_SIZE {
            lines.push(format!(
                "  warning: network table is {} bytes, expected at least {NETWORK_VOLUME_TABLE_SIZE}",
                network.size
            ));
        } else {
            lines.push(format!(
                "  network: {} device {} provider {:#x} flags {}",
                network.share_name, network.device_name, network.provider_type, network.flags
            ));
            lines.push(format!("  network path: {}", location.network_path()));
        }
    }
}
