use rgb::RGB8;
use snafu::prelude::*;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum HexError {
    #[snafu(display("hex color must have 6 digits, got {len} in {input:?}"))]
    InvalidLength { input: String, len: usize },

    #[snafu(display("invalid hex digit in {input:?}"))]
    InvalidDigit { input: String },
}

/// Formats a color as uppercase `#RRGGBB`.
pub fn to_hex(color: RGB8) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
}

/// Parses `#RRGGBB` or `RRGGBB`, in either case.
pub fn parse_hex(input: &str) -> Result<RGB8, HexError> {
    let digits = input.trim().strip_prefix('#').unwrap_or(input.trim());
    ensure!(
        digits.len() == 6,
        InvalidLengthSnafu {
            input,
            len: digits.len()
        }
    );
    ensure!(
        digits.bytes().all(|b| b.is_ascii_hexdigit()),
        InvalidDigitSnafu { input }
    );

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| InvalidDigitSnafu { input }.build())
    };

    Ok(RGB8 {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}
