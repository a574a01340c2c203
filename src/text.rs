//! Text normalization, heading detection and byte decoding shared by every
//! format.

use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:第[\d一二三四五六七八九十百千万零两]+[章节回部卷]|(?:chapter|section|part)\s+\d+)")
        .expect("heading pattern is valid")
});

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Replace ideographic spaces with ASCII spaces and drop carriage returns.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|&c| c != '\r')
        .map(|c| if c == '\u{3000}' { ' ' } else { c })
        .collect()
}

/// Whether a single line starts like a chapter or section heading.
///
/// Recognises `第N章`-style headings (with `章 节 回 部 卷`, Arabic or Chinese
/// numerals) and `chapter|section|part <number>` in any case. Nothing else.
pub fn is_heading(line: &str) -> bool {
    HEADING.is_match(line)
}

/// Decode bytes as UTF-8, dropping a leading BOM and any invalid sequences.
pub fn decode_utf8_lossy(bytes: &[u8]) -> String {
    let (text, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if malformed {
        strip_replacement(&text)
    } else {
        text.into_owned()
    }
}

/// Decode bytes as UTF-8, or as GB18030 when they are not valid UTF-8.
///
/// Bytes that are undecodable even as GB18030 are discarded. A leading UTF-8
/// BOM is dropped and never switches the fallback back to UTF-8.
pub fn decode_utf8_or_gb18030(bytes: &[u8]) -> String {
    let (text, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return text.into_owned();
    }

    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let (text, malformed) = encoding_rs::GB18030.decode_without_bom_handling(bytes);
    if malformed {
        strip_replacement(&text)
    } else {
        text.into_owned()
    }
}

fn strip_replacement(text: &str) -> String {
    text.chars().filter(|&c| c != char::REPLACEMENT_CHARACTER).collect()
}
