//! Small text helpers shared by the book and TOC generators.

use std::borrow::Cow;

/// Decode page bytes to a string.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. Falls back to Windows-1252 (common in old hand-edited pages)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8
/// without a BOM.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    // Superset of ISO-8859-1
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Return a header underline of `len` copies of `ch`.
pub fn underline(ch: char, len: usize) -> String {
    std::iter::repeat_n(ch, len).collect()
}

/// Length of a line as the author sees it (characters, not bytes).
pub fn display_len(line: &str) -> usize {
    line.chars().count()
}

/// Rewrite a published `.html` link target to the source page name.
///
/// `next=ch1.html` in a header means the page `ch1.adoc` when the page
/// extension is `adoc`. Names without an `.html` suffix are returned as is.
pub fn page_name(link: &str, extension: &str) -> String {
    match link.strip_suffix(".html") {
        Some(stem) => format!("{stem}.{extension}"),
        None => link.to_string(),
    }
}

/// Rewrite a source page name to the published `.html` name.
pub fn html_name(page: &str, extension: &str) -> String {
    match page
        .strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
    {
        Some(stem) => format!("{stem}.html"),
        None => page.to_string(),
    }
}

/// Does `name` carry the page extension?
pub fn has_extension(name: &str, extension: &str) -> bool {
    name.strip_suffix(extension)
        .is_some_and(|rest| rest.ends_with('.') && rest.len() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_with_bom() {
        let bytes = b"\xEF\xBB\xBFtitle=Intro";
        assert_eq!(decode_text(bytes), "title=Intro");
    }

    #[test]
    fn test_decode_falls_back_to_cp1252() {
        // 0xE9 is 'é' in Windows-1252 and invalid on its own in UTF-8
        let bytes = b"title=Caf\xE9";
        assert_eq!(decode_text(bytes), "title=Café");
    }

    #[test]
    fn test_underline() {
        assert_eq!(underline('=', 4), "====");
        assert_eq!(underline('~', 0), "");
    }

    #[test]
    fn test_page_and_html_names() {
        assert_eq!(page_name("ch1.html", "adoc"), "ch1.adoc");
        assert_eq!(page_name("ch1.adoc", "adoc"), "ch1.adoc");
        assert_eq!(page_name("html.txt", "adoc"), "html.txt");
        assert_eq!(html_name("ch1.adoc", "adoc"), "ch1.html");
        assert_eq!(html_name("notes.txt", "adoc"), "notes.txt");
        assert_eq!(html_name("adoc", "adoc"), "adoc");
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension("ch1.adoc", "adoc"));
        assert!(!has_extension("ch1.adoc.bak", "adoc"));
        assert!(!has_extension(".adoc", "adoc"));
        assert!(!has_extension("book-attributes.conf", "adoc"));
    }
}
