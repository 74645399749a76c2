use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use scout_core::{ErrorKind, ScoutError};

/// Decodes a response body to text: BOM, then Content-Type charset, then detection.
///
/// Malformed input for the chosen encoding is an `InvalidResponse`; nothing is
/// replaced silently.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> Result<String, ScoutError> {
    let (encoding, skip) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, bom_len),
        None => (choose_encoding(bytes, content_type), 0),
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[skip..]);
    if had_errors {
        return Err(ScoutError::new(
            ErrorKind::InvalidResponse,
            format!("body is not valid {}", encoding.name()),
        ));
    }
    Ok(text.into_owned())
}

fn choose_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some(encoding) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding;
    }
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}
