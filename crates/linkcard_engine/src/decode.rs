use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::{FailureKind, GenerateError};

/// Decode raw page bytes into UTF-8: BOM -> Content-Type charset ->
/// chardetng fallback.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<String, GenerateError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(header_charset) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, encoding);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn header_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.trim().split_at_checked("charset=".len())?;
        if !key.eq_ignore_ascii_case("charset=") {
            return None;
        }
        Some(value.trim_matches([' ', '"', '\''].as_ref()).to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<String, GenerateError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(GenerateError::new(
            FailureKind::Decode,
            format!("page could not be decoded as {}", encoding.name()),
        ));
    }
    Ok(text.into_owned())
}
