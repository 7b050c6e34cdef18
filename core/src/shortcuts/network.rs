use crate::utils::{
    nom_helper::{nom_cstring, nom_unsigned_four_bytes},
    strings::extract_latin1_string,
};
use nom::{bytes::complete::take, Needed};

/// Fixed size of a network volume table: size, flags, name offset, device offset, provider type
/// The share name is not counted, so 0x14 is the smallest valid table (the local table counts its label byte)
pub(crate) const NETWORK_VOLUME_TABLE_SIZE: u32 = 20;

#[derive(Debug, PartialEq)]
pub(crate) struct LnkNetwork {
    pub(crate) size: u32,
    pub(crate) flags: u32,
    name_offset: u32,
    device_offset: u32,
    pub(crate) provider_type: u32,
    pub(crate) share_name: String,
    pub(crate) device_name: String,
}

impl LnkNetwork {
    /**
     * Parse network share metadata from `shortcut` data. `data` starts at the network volume table
     * Tables smaller than `NETWORK_VOLUME_TABLE_SIZE` only have their size parsed
     */
    pub(crate) fn parse_network(data: &[u8]) -> nom::IResult<&[u8], LnkNetwork> {
        let (_, size) = nom_unsigned_four_bytes(data)?;

        let mut network = LnkNetwork {
            size,
            flags: 0,
            name_offset: 0,
            device_offset: 0,
            provider_type: 0,
            share_name: String::new(),
            device_name: String::new(),
        };
        if size < NETWORK_VOLUME_TABLE_SIZE {
            return Ok((data, network));
        }

        // Size includes the size itself (4 bytes)
        let (remaining_input, table) = take(size as usize)(data)?;
        let (input, _size) = nom_unsigned_four_bytes(table)?;
        let (input, flags) = nom_unsigned_four_bytes(input)?;
        let (input, name_offset) = nom_unsigned_four_bytes(input)?;
        let (input, device_offset) = nom_unsigned_four_bytes(input)?;
        let (_, provider_type) = nom_unsigned_four_bytes(input)?;

        network.flags = flags;
        network.name_offset = name_offset;
        network.device_offset = device_offset;
        network.provider_type = provider_type;

        network.share_name = LnkNetwork::table_string(table, name_offset)?;
        // Device name is optional
        if device_offset != 0 {
            network.device_name = LnkNetwork::table_string(table, device_offset)?;
        }

        Ok((remaining_input, network))
    }

    /// Read an ASCII string at an offset inside the network table
    fn table_string(table: &[u8], offset: u32) -> Result<String, nom::Err<nom::error::Error<&[u8]>>> {
        if offset as usize >= table.len() {
            return Err(nom::Err::Incomplete(Needed::Unknown));
        }
        let (string_start, _) = take(offset as usize)(table)?;
        let (_, string_data) = nom_cstring(string_start)?;
        Ok(extract_latin1_string(string_data))
    }
}
