use crate::error::ConfigError;
use base64::{engine::general_purpose, Engine};
use log::error;

/// Base64 encode bytes that could not be represented as text
pub(crate) fn base64_encode_standard(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// Base64 decode a TOML collector passed on the command line
pub(crate) fn base64_decode_standard(data: &str) -> Result<Vec<u8>, ConfigError> {
    let decode_result = general_purpose::STANDARD.decode(data.trim());
    match decode_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[shelllink] Could not base64 decode TOML data: {err:?}");
            Err(ConfigError::Base64)
        }
    }
}

/// Render bytes as space separated hex pairs. Used by the diagnostic dump
pub(crate) fn hex_string(data: &[u8]) -> String {
    data.iter()
        .map(|value| format!("{value:02x}"))
        .collect::<Vec<String>>()
        .join(" ")
}
