//! OEM code page to charset name resolution and string decoding.
//!
//! The table may list a code page more than once under different aliases.
//! Lookup returns the first entry, so table order decides which alias wins.

use tracing::warn;

/// `(code page, charset name)` pairs, in lookup order.
static CODE_PAGES: &[(i32, &str)] = &[
    (37, "IBM037"),
    (437, "IBM437"),
    (500, "IBM500"),
    (708, "ASMO-708"),
    (720, "DOS-720"),
    (737, "ibm737"),
    (775, "ibm775"),
    (850, "ibm850"),
    (852, "ibm852"),
    (855, "IBM855"),
    (857, "ibm857"),
    (858, "IBM00858"),
    (860, "IBM860"),
    (861, "ibm861"),
    (862, "DOS-862"),
    (863, "IBM863"),
    (864, "IBM864"),
    (865, "IBM865"),
    (866, "ibm866"),
    (866, "cp866"),
    (869, "ibm869"),
    (870, "IBM870"),
    (874, "windows-874"),
    (875, "cp875"),
    (932, "shift_jis"),
    (936, "gb2312"),
    (936, "GBK"),
    (949, "ks_c_5601-1987"),
    (950, "big5"),
    (1026, "IBM1026"),
    (1047, "IBM01047"),
    (1200, "utf-16"),
    (1201, "unicodeFFFE"),
    (1250, "windows-1250"),
    (1251, "windows-1251"),
    (1252, "windows-1252"),
    (1253, "windows-1253"),
    (1254, "windows-1254"),
    (1255, "windows-1255"),
    (1256, "windows-1256"),
    (1257, "windows-1257"),
    (1258, "windows-1258"),
    (1361, "Johab"),
    (10000, "macintosh"),
    (10001, "x-mac-japanese"),
    (10002, "x-mac-chinesetrad"),
    (10003, "x-mac-korean"),
    (10004, "x-mac-arabic"),
    (10005, "x-mac-hebrew"),
    (10006, "x-mac-greek"),
    (10007, "x-mac-cyrillic"),
    (10008, "x-mac-chinesesimp"),
    (10010, "x-mac-romanian"),
    (10017, "x-mac-ukrainian"),
    (10021, "x-mac-thai"),
    (10029, "x-mac-ce"),
    (10079, "x-mac-icelandic"),
    (10081, "x-mac-turkish"),
    (10082, "x-mac-croatian"),
    (12000, "utf-32"),
    (12001, "utf-32BE"),
    (20127, "us-ascii"),
    (20127, "ascii"),
    (20866, "koi8-r"),
    (20932, "EUC-JP"),
    (20936, "x-cp20936"),
    (21866, "koi8-u"),
    (28591, "iso-8859-1"),
    (28591, "Latin1"),
    (28592, "iso-8859-2"),
    (28593, "iso-8859-3"),
    (28594, "iso-8859-4"),
    (28595, "iso-8859-5"),
    (28596, "iso-8859-6"),
    (28597, "iso-8859-7"),
    (28598, "iso-8859-8"),
    (28599, "iso-8859-9"),
    (28603, "iso-8859-13"),
    (28605, "iso-8859-15"),
    (38598, "iso-8859-8-i"),
    (50220, "iso-2022-jp"),
    (50221, "csISO2022JP"),
    (50222, "iso-2022-jp"),
    (50225, "iso-2022-kr"),
    (51932, "euc-jp"),
    (51936, "EUC-CN"),
    (51949, "euc-kr"),
    (52936, "hz-gb-2312"),
    (54936, "GB18030"),
    (65000, "utf-7"),
    (65001, "utf-8"),
];

/// Resolve a code page number to its charset name.
///
/// Returns `""` for code pages not in the table.
pub fn charset_for_code_page(code_page: i32) -> &'static str {
    CODE_PAGES
        .iter()
        .find(|(cp, _)| *cp == code_page)
        .map(|(_, name)| *name)
        .unwrap_or("")
}

/// Decode `bytes` using a charset name.
///
/// Empty or unrecognized names fall back to lossy UTF-8.
pub fn decode_text(bytes: &[u8], charset: &str) -> String {
    if charset.is_empty() {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    match encoding_rs::Encoding::for_label(charset.as_bytes()) {
        Some(encoding) => {
            let (decoded, _, _) = encoding.decode(bytes);
            decoded.into_owned()
        }
        None => {
            warn!(
                charset = charset,
                "Unknown charset, falling back to UTF-8 lossy"
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
