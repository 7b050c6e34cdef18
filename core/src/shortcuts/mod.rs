/**
 * Windows `Shortcut` (lnk) files point to another file or directory
 * They contain a fixed header, a shell item ID list, a location block with the volume or network share,
 * a handful of optional strings, and trailing extra data blocks
 *
 * References:
 *   `https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-shllink`
 *   `https://github.com/libyal/liblnk/blob/main/documentation/Windows%20Shortcut%20File%20(LNK)%20format.asciidoc`
 */
mod command;
mod dump;
pub mod error;
mod extras;
mod header;
mod items;
mod location;
mod network;
mod parser;
mod shellitems;
mod strings;
mod volume;
mod writer;

use self::{error::LnkError, header::is_link_header, parser::decode_document};
use common::windows::{LinkInfo, ShortcutInfo};
use serde::{Deserialize, Serialize};

pub use command::link_command;
pub use dump::dump;
pub use strings::TextMode;
pub use writer::encode;

/// Options that change how `Shortcut` data is decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    pub text_mode: TextMode,
}

/// Decode `Shortcut` data with the default options
pub fn decode(data: &[u8]) -> Result<LinkInfo, LnkError> {
    decode_with_options(data, &DecodeOptions::default())
}

/// Decode `Shortcut` data into the details needed to use or rebuild the link
pub fn decode_with_options(data: &[u8], options: &DecodeOptions) -> Result<LinkInfo, LnkError> {
    let document = decode_document(data, options.text_mode)?;
    Ok(document.link_info())
}

/// Decode `Shortcut` data into every parsed structure. `source_path` is only recorded
pub fn parse_shortcut(
    data: &[u8],
    options: &DecodeOptions,
    source_path: &str,
) -> Result<ShortcutInfo, LnkError> {
    let document = decode_document(data, options.text_mode)?;
    Ok(document.shortcut_info(source_path))
}

/// Check for the `Shortcut` signature and class id without decoding anything else
pub fn is_recognized(data: &[u8]) -> bool {
    is_link_header(data)
}
