//! DXF code page names to `encoding_rs` encodings.
//!
//! Pre-2007 drawings are written in the code page named by the
//! `$DWGCODEPAGE` header variable (`ANSI_1252`, `DOS850`, `GB2312`, ...).
//! Callers that know the code page of their files pass it to
//! [`DxfReaderConfiguration::with_code_page`](super::DxfReaderConfiguration::with_code_page).

use encoding_rs::Encoding;

/// Look up the encoding for a DXF code page name (case-insensitive).
///
/// Returns `None` for names that are not recognized.
pub fn encoding_from_code_page(code_page: &str) -> Option<&'static Encoding> {
    let name = code_page.trim().to_ascii_lowercase();

    if let Some(number) = name.strip_prefix("ansi_") {
        return windows_code_page(number);
    }
    if let Some(part) = name
        .strip_prefix("iso8859-")
        .or_else(|| name.strip_prefix("iso_8859-"))
    {
        return iso_8859(part);
    }

    match name.as_str() {
        "gb2312" => Some(encoding_rs::GBK),
        "big5" => Some(encoding_rs::BIG5),
        "korean" | "johab" => Some(encoding_rs::EUC_KR),
        "dos437" | "dos855" | "dos866" => Some(encoding_rs::IBM866),
        "dos850" | "dos860" | "dos861" | "dos863" | "dos865" => Some(encoding_rs::WINDOWS_1252),
        "dos852" => Some(encoding_rs::WINDOWS_1250),
        "dos857" => Some(encoding_rs::WINDOWS_1254),
        "dos869" => Some(encoding_rs::WINDOWS_1253),
        "koi8-r" => Some(encoding_rs::KOI8_R),
        "koi8-u" => Some(encoding_rs::KOI8_U),
        "ascii" | "utf-8" | "utf8" | "unicode" => Some(encoding_rs::UTF_8),
        _ => None,
    }
}

fn windows_code_page(number: &str) -> Option<&'static Encoding> {
    match number {
        "874" => Some(encoding_rs::WINDOWS_874),
        "932" => Some(encoding_rs::SHIFT_JIS),
        "936" => Some(encoding_rs::GBK),
        "949" => Some(encoding_rs::EUC_KR),
        "950" => Some(encoding_rs::BIG5),
        "1250" => Some(encoding_rs::WINDOWS_1250),
        "1251" => Some(encoding_rs::WINDOWS_1251),
        "1252" => Some(encoding_rs::WINDOWS_1252),
        "1253" => Some(encoding_rs::WINDOWS_1253),
        "1254" => Some(encoding_rs::WINDOWS_1254),
        "1255" => Some(encoding_rs::WINDOWS_1255),
        "1256" => Some(encoding_rs::WINDOWS_1256),
        "1257" => Some(encoding_rs::WINDOWS_1257),
        "1258" => Some(encoding_rs::WINDOWS_1258),
        _ => None,
    }
}

fn iso_8859(part: &str) -> Option<&'static Encoding> {
    match part {
        // encoding_rs folds Latin-1 and Latin-5 into their Windows supersets
        "1" => Some(encoding_rs::WINDOWS_1252),
        "9" => Some(encoding_rs::WINDOWS_1254),
        "2" => Some(encoding_rs::ISO_8859_2),
        "3" => Some(encoding_rs::ISO_8859_3),
        "4" => Some(encoding_rs::ISO_8859_4),
        "5" => Some(encoding_rs::ISO_8859_5),
        "6" => Some(encoding_rs::ISO_8859_6),
        "7" => Some(encoding_rs::ISO_8859_7),
        "8" => Some(encoding_rs::ISO_8859_8),
        "10" => Some(encoding_rs::ISO_8859_10),
        "13" => Some(encoding_rs::ISO_8859_13),
        "14" => Some(encoding_rs::ISO_8859_14),
        "15" => Some(encoding_rs::ISO_8859_15),
        _ => None,
    }
}
