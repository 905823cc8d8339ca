//! Input decoding helpers.

use std::borrow::Cow;

/// Strip UTF-8 BOM if present.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

/// Decode bytes to a string, handling the encodings found in real FB2 files.
///
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the encoding declared in `<?xml encoding="..."?>`
/// 3. Falls back to windows-1252
///
/// Returns `Cow::Borrowed` when the input is already valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = declared_encoding(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the encoding name from an XML declaration, if one is present in
/// the first few hundred bytes.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(512)];
    // The declaration is ASCII even when the body is not.
    let head: String = head
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect();

    let start = head.find("encoding")?;
    let rest = &head[start + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}
