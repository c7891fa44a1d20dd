//! Mojibake repair.
//!
//! Meta writes exports whose UTF-8 bytes were each stored as a separate
//! Latin-1 code point, so "Привет" arrives as "Ð\u{9f}Ñ\u{80}Ð¸Ð²ÐµÑ\u{82}".
//! Other exporters occasionally do the same. [`fix_encoding`] reverses that
//! on a best-effort basis.

/// Repairs text that was decoded as Latin-1 while holding UTF-8 bytes.
///
/// Each char is taken as one byte and the bytes are decoded as UTF-8. Text
/// that cannot have come out of that mistake is returned unchanged:
///
/// - a char above U+00FF means the text was never Latin-1 decoded
/// - bytes that are not valid UTF-8 mean the Latin-1 reading was correct
///
/// ASCII is a fixed point.
///
/// # Example
///
/// ```rust
/// use chatecho::parsing::fix_encoding;
///
/// let mojibake: String = "café".bytes().map(char::from).collect();
/// assert_eq!(mojibake, "cafÃ©");
/// assert_eq!(fix_encoding(&mojibake), "café");
///
/// // Already correct text passes through
/// assert_eq!(fix_encoding("café"), "café");
/// assert_eq!(fix_encoding("Привет"), "Привет");
/// ```
pub fn fix_encoding(text: &str) -> String {
    if text.is_ascii() {
        return text.to_owned();
    }
    match latin1_bytes(text) {
        Some(bytes) => String::from_utf8(bytes).unwrap_or_else(|_| text.to_owned()),
        None => text.to_owned(),
    }
}

/// One byte per char, or `None` if some char does not fit in a byte.
fn latin1_bytes(text: &str) -> Option<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect()
}
