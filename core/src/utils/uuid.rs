use log::warn;
use uuid::Uuid;

/// Convert little endian bytes to a GUID string. Used for the `Shortcut` class id
pub(crate) fn format_guid_le_bytes(data: &[u8]) -> String {
    let guid_data: Result<[u8; 16], _> = data.try_into();
    match guid_data {
        Ok(result) => Uuid::from_bytes_le(result).hyphenated().to_string(),
        Err(_err) => {
            warn!(
                "[shelllink] Provided data does not meet GUID size of 16 bytes, got: {}",
                data.len()
            );
            format!("Not a GUID: {data:?}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::format_guid_le_bytes;

    #[test]
    fn test_format_guid_le_bytes() {
        let test = [1, 20, 2, 0, 0, 0, 0, 0, 192, 0, 0, 0, 0, 0, 0, 70];
        assert_eq!(
            format_guid_le_bytes(&test),
            "00021401-0000-0000-c000-000000000046"
        );
    }

    #[test]
    fn test_format_guid_bad_size() {
        let test = [1, 20, 2];
        assert_eq!(format_guid_le_bytes(&test), "Not a GUID: [1, 20, 2]");
    }
}
