use serde::{Deserialize, Serialize};
use std::fmt;

/**
 * The flat description of a `Shortcut` file.
 * Produced by decoding `lnk` bytes and consumed when creating a new `lnk` file
 *
 * `target`: Absolute path (or `.\` prefixed relative path) to the shortcut target. Empty if undetermined
 * `network_path`: Only populated when the target lives on a network share
 */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub target: String,
    pub network_path: String,
    pub description: String,
    pub working_directory: String,
    pub arguments: String,
    pub custom_icon: CustomIcon,
    pub hot_key: HotKey,
}

/// Icon location for a `Shortcut`. An empty filename means no custom icon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomIcon {
    pub filename: String,
    pub index: i32,
}

/// Keyboard shortcut assigned to a `Shortcut`. Key code 0 with no modifiers is the "no hotkey" value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotKey {
    pub key_code: u8,
    pub modifiers: u8,
}

impl HotKey {
    pub const NONE: HotKey = HotKey {
        key_code: 0,
        modifiers: 0,
    };

    pub const MOD_SHIFT: u8 = 0x1;
    pub const MOD_CONTROL: u8 = 0x2;
    pub const MOD_ALT: u8 = 0x4;

    pub const KEY_F1: u8 = 0x70;
    pub const KEY_F24: u8 = 0x87;
    pub const KEY_NUMLOCK: u8 = 0x90;
    pub const KEY_SCROLL: u8 = 0x91;

    /// Build a `HotKey` from the 16 bit header value (low byte key code, high byte modifiers)
    pub fn from_u16(value: u16) -> HotKey {
        let [key_code, modifiers] = value.to_le_bytes();
        HotKey {
            key_code,
            modifiers,
        }
    }

    pub fn as_u16(&self) -> u16 {
        u16::from_le_bytes([self.key_code, self.modifiers])
    }

    pub fn is_none(&self) -> bool {
        self.key_code == 0 && self.modifiers == 0
    }
}

impl fmt::Display for HotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "None");
        }

        let mut parts: Vec<String> = Vec::new();
        if self.modifiers & HotKey::MOD_CONTROL != 0 {
            parts.push(String::from("CTRL"));
        }
        if self.modifiers & HotKey::MOD_ALT != 0 {
            parts.push(String::from("ALT"));
        }
        if self.modifiers & HotKey::MOD_SHIFT != 0 {
            parts.push(String::from("SHIFT"));
        }

        let key = match self.key_code {
            b'0'..=b'9' | b'A'..=b'Z' => (self.key_code as char).to_string(),
            HotKey::KEY_F1..=HotKey::KEY_F24 => format!("F{}", self.key_code - HotKey::KEY_F1 + 1),
            HotKey::KEY_NUMLOCK => String::from("NumLock"),
            HotKey::KEY_SCROLL => String::from("ScrollLock"),
            0 => String::new(),
            other => format!("0x{other:02X}"),
        };
        if !key.is_empty() {
            parts.push(key);
        }

        write!(f, "{}", parts.join(" + "))
    }
}

/// Full view of a parsed `Shortcut` file
#[derive(Debug, PartialEq, Serialize)]
pub struct ShortcutInfo {
    pub source_path: String,
    pub data_flags: Vec<DataFlags>,
    pub attribute_flags: Vec<AttributeFlags>,
    pub created: String,
    pub modified: String,
    pub accessed: String,
    pub file_size: u32,
    pub icon_index: i32,
    pub show_command: ShowCommand,
    pub hot_key: String,
    pub shellitems: Vec<ShellItem>,
    pub location_flags: LocationFlag,
    pub base_path: String,
    pub final_path: String,
    pub drive_type: DriveType,
    pub drive_serial: String,
    pub volume_label: String,
    pub network_share_name: String,
    pub description: String,
    pub relative_path: String,
    pub working_directory: String,
    pub command_line_args: String,
    pub icon_location: String,
    pub extra_data: Vec<ExtraData>,
    pub link: LinkInfo,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum DataFlags {
    HasTargetIdList,
    HasLinkInfo,
    HasName,
    HasRelativePath,
    HasWorkingDirectory,
    HasArguments,
    HasIconLocation,
    IsUnicode,
    ForceNoLinkInfo,
    HasExpString,
    RunInSeparateProcess,
    HasDarwinId,
    RunAsUser,
    HasExpIcon,
    NoPidAlias,
    RunWithShimLayer,
    ForceNoLinkTrack,
    EnableTargetMetadata,
    DisableLinkPathTracking,
    DisableKnownFolderTracking,
    DisableKnownFolderAlias,
    AllowLinkToLink,
    UnaliasOnSave,
    PreferEnvironmentPath,
    KeepLocalDListForUncTarget,
}

/// Target file attributes. Only the first 13 bits carry meaning in `Shortcut` headers
#[derive(Debug, PartialEq, Serialize)]
pub enum AttributeFlags {
    ReadOnly,
    Hidden,
    System,
    VolumeLabel,
    Directory,
    Archive,
    Encrypted,
    Normal,
    Temporary,
    SparseFile,
    ReparsePoint,
    Compressed,
    Offline,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum ShowCommand {
    Normal,
    Maximized,
    MinNoActive,
    Unknown,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum LocationFlag {
    VolumeIDAndLocalBasePath,
    CommonNetworkRelativeLinkAndPathSuffix,
    None,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum DriveType {
    DriveUnknown,
    DriveNotRootDir,
    DriveRemovable,
    DriveFixed,
    DriveRemote,
    DriveCdrom,
    DriveRamdisk,
    None,
}

/**  Return a `ShellItem` structure containing
 * value: Drive root for drive items, long name for directory and file items
 * short_name: 8.3 name, only found on directory and file items
 */
#[derive(Debug, PartialEq, Serialize)]
pub struct ShellItem {
    pub value: String,
    pub short_name: String,
    pub shell_type: ShellType,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum ShellType {
    Computer,
    Drive,
    Directory,
    File,
    Unknown,
}

/// Extra data block found after the `Shortcut` strings. Only the signature is interpreted
#[derive(Debug, PartialEq, Serialize)]
pub struct ExtraData {
    pub size: u32,
    pub signature: u32,
    pub block_type: ExtraDataType,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum ExtraDataType {
    EnvironmentVariables,
    Console,
    Tracker,
    ConsoleCodepage,
    SpecialFolder,
    Darwin,
    IconEnvironment,
    Shim,
    PropertyStore,
    KnownFolder,
    VistaIdList,
    Unknown,
}
