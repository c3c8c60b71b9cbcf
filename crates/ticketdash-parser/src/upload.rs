use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::errors::ParserError;

const UTF8_BOM: char = '\u{feff}';

/// Turns the `contents` field of a browser upload into raw bytes.
///
/// Browsers hand uploads over as `data:<mime>;base64,<payload>`. Anything not
/// starting with `data:` is taken to be the file text itself.
pub fn decode_upload_contents(contents: &str) -> Result<Vec<u8>, ParserError> {
    let Some(rest) = contents.strip_prefix("data:") else {
        return Ok(contents.as_bytes().to_vec());
    };

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ParserError::decode("data URL is missing the ',' separator"))?;

    if header.ends_with(";base64") {
        BASE64
            .decode(payload.trim())
            .map_err(|err| ParserError::decode(format!("invalid base64 payload: {err}")))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

/// UTF-8 text of a payload, without a leading byte-order mark.
pub fn decode_payload(payload: &[u8]) -> Result<&str, ParserError> {
    let text = std::str::from_utf8(payload)
        .map_err(|err| ParserError::decode(format!("file contents were not valid UTF-8: {err}")))?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text))
}
