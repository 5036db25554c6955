//! Code page handling for screen dump characters
//!
//! Every character byte in a dump is a glyph index into an 8-bit code page.
//! IBM code page 437 is the hardware character set of the PC and the default.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Upper half (0x80-0xFF) of IBM code page 437
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', // 0x80
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', // 0x90
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', // 0xA0
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', // 0xB0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', // 0xC0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', // 0xD0
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', // 0xE0
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}', // 0xF0
];

/// Code page 865 (Nordic) replaces three code page 437 glyphs
const CP865_CHANGES: [(u8, char); 3] = [(0x9B, 'ø'), (0x9D, 'Ø'), (0xAF, '¤')];

/// A single-byte character set
#[derive(Clone, PartialEq, Eq)]
pub struct CodePage {
    name: Cow<'static, str>,
    table: Box<[char; 256]>,
}

impl fmt::Debug for CodePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodePage").field("name", &self.name).finish()
    }
}

impl Default for CodePage {
    fn default() -> Self {
        Self::cp437()
    }
}

impl CodePage {
    /// IBM code page 437. The lower half is plain ASCII.
    pub fn cp437() -> Self {
        let mut table = Box::new(['\0'; 256]);
        for (b, slot) in table.iter_mut().enumerate().take(0x80) {
            *slot = char::from(b as u8);
        }
        table[0x80..].copy_from_slice(&CP437_HIGH);
        Self {
            name: Cow::Borrowed("cp437"),
            table,
        }
    }

    /// IBM code page 865, used for Danish and Norwegian
    pub fn cp865() -> Self {
        let mut page = Self::cp437();
        for (b, c) in CP865_CHANGES {
            page.table[usize::from(b)] = c;
        }
        page.name = Cow::Borrowed("cp865");
        page
    }

    /// A caller-supplied table
    pub fn custom(name: impl Into<String>, table: [char; 256]) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            table: Box::new(table),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The glyph for a character byte
    pub fn glyph(&self, b: u8) -> char {
        self.table[usize::from(b)]
    }

    /// The glyph for a character byte, escaped for embedding in markup
    pub fn map_escaped(&self, b: u8) -> Cow<'static, str> {
        match escape_char(self.glyph(b)) {
            Some(entity) => Cow::Borrowed(entity),
            None => Cow::Owned(self.glyph(b).to_string()),
        }
    }
}

impl FromStr for CodePage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cp437" | "437" | "ibm437" => Ok(Self::cp437()),
            "cp865" | "865" | "ibm865" => Ok(Self::cp865()),
            _ => Err(format!("unknown code page '{s}' (expected cp437 or cp865)")),
        }
    }
}

impl Serialize for CodePage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for CodePage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Entity for a markup-sensitive character
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '\'' => Some("&#39;"),
        '"' => Some("&#34;"),
        _ => None,
    }
}

/// Append `text` to `out`, escaping angle brackets, ampersands and quotes
pub fn escape_markup(text: &str, out: &mut String) {
    for c in text.chars() {
        match escape_char(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cp437_ascii_half() {
        let cp = CodePage::cp437();
        assert_eq!(cp.glyph(b'A'), 'A');
        assert_eq!(cp.glyph(b' '), ' ');
        assert_eq!(cp.glyph(0x00), '\0');
        assert_eq!(cp.glyph(0x7E), '~');
    }

    #[test]
    fn test_cp437_box_drawing() {
        let cp = CodePage::cp437();
        assert_eq!(cp.glyph(0xC9), '╔');
        assert_eq!(cp.glyph(0xCD), '═');
        assert_eq!(cp.glyph(0xBB), '╗');
        assert_eq!(cp.glyph(0xB0), '░');
        assert_eq!(cp.glyph(0xDB), '█');
        assert_eq!(cp.glyph(0xFF), '\u{a0}');
    }

    #[test]
    fn test_cp865_differs_from_cp437() {
        let cp437 = CodePage::cp437();
        let cp865 = CodePage::cp865();
        let differing: Vec<u8> = (0..=255u8)
            .filter(|&b| cp437.glyph(b) != cp865.glyph(b))
            .collect();
        assert_eq!(differing, vec![0x9B, 0x9D, 0xAF]);
        assert_eq!(cp865.glyph(0x9B), 'ø');
    }

    #[test]
    fn test_map_escaped() {
        let cp = CodePage::default();
        assert_eq!(cp.map_escaped(b'<'), "&lt;");
        assert_eq!(cp.map_escaped(b'>'), "&gt;");
        assert_eq!(cp.map_escaped(b'&'), "&amp;");
        assert_eq!(cp.map_escaped(b'"'), "&#34;");
        assert_eq!(cp.map_escaped(b'\''), "&#39;");
        assert_eq!(cp.map_escaped(0xB1), "▒");
    }

    #[test]
    fn test_escape_markup() {
        let mut out = String::new();
        escape_markup("a<b>&\"c'", &mut out);
        assert_eq!(out, "a&lt;b&gt;&amp;&#34;c&#39;");
    }

    #[test]
    fn test_code_page_from_str() {
        assert_eq!("CP437".parse::<CodePage>().map(|c| c.name().to_string()), Ok("cp437".into()));
        assert_eq!("865".parse::<CodePage>().map(|c| c.name().to_string()), Ok("cp865".into()));
        assert_eq!(
            "CP1252".parse::<CodePage>().map(|c| c.name().to_string()),
            Err("unknown code page 'CP1252' (expected cp437 or cp865)".to_string())
        );
    }

    #[test]
    fn test_custom_code_page() {
        let cp = CodePage::custom("upper", ['X'; 256]);
        assert_eq!(cp.name(), "upper");
        assert_eq!(cp.glyph(b'a'), 'X');
    }
}
