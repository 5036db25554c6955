//! Video attribute byte decoding
//!
//! Text-mode video memory stores one attribute byte after each character:
//!
//! ```text
//!  bit  7   6 5 4   3   2 1 0
//!      blink  bg  intense  fg
//! ```

use serde::Serialize;

use crate::error::{Error, Result};

/// Highest index either color table accepts
const LAST_COLOR: u8 = 15;

/// Foreground and background color indices of one attribute byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Foreground index, 0-15 (bit 3 is the intensity flag)
    pub fg: u8,
    /// Background index, 0-7
    pub bg: u8,
    /// Blink bit. Decoded but never rendered.
    pub blink: bool,
}

impl Attribute {
    /// Reject color indices that do not fit the 16-color tables.
    ///
    /// Unreachable with the current bit layout, where `fg` is 4 bits and
    /// `bg` is 3 bits.
    pub fn validate(self, attr: u8) -> Result<Self> {
        if self.fg > LAST_COLOR || self.bg > LAST_COLOR {
            return Err(Error::InvalidAttribute {
                attr,
                fg: self.fg,
                bg: self.bg,
            });
        }
        Ok(self)
    }
}

/// Split an attribute byte into its color indices
pub fn decode_attr(b: u8) -> Attribute {
    let fg_low = b & 0x07; // bits 0-2
    let intense = (b >> 3) & 0x01; // bit 3
    let bg = (b >> 4) & 0x07; // bits 4-6
    Attribute {
        fg: fg_low | (intense << 3),
        bg,
        blink: b & 0x80 != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_black_on_black() {
        let a = decode_attr(0x00);
        assert_eq!((a.fg, a.bg, a.blink), (0, 0, false));
    }

    #[test]
    fn test_decode_intensity_bit() {
        assert_eq!(decode_attr(0x08).fg, 8);
        assert_eq!(decode_attr(0x0F).fg, 15);
        assert_eq!(decode_attr(0x07).fg, 7);
    }

    #[test]
    fn test_decode_background_and_blink() {
        // white on blue, blinking
        let a = decode_attr(0x9F);
        assert_eq!(a.fg, 15);
        assert_eq!(a.bg, 1);
        assert!(a.blink);

        let a = decode_attr(0x70);
        assert_eq!((a.fg, a.bg), (0, 7));
    }

    // Dead path: the bit layout can never produce these values, so the
    // struct is built directly instead of going through `decode_attr`.
    #[test]
    fn test_validate_rejects_out_of_range() {
        let bad = Attribute {
            fg: 16,
            bg: 0,
            blink: false,
        };
        assert!(matches!(
            bad.validate(0xFF),
            Err(Error::InvalidAttribute { fg: 16, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_decoded_indices_in_range(b in any::<u8>()) {
            let a = decode_attr(b);
            prop_assert!(a.fg <= 15);
            prop_assert!(a.bg <= 7);
            prop_assert!(a.validate(b).is_ok());
        }
    }
}
