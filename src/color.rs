/// Caller-facing color, channels already in final form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Rgb::new(red, green, blue)
    }
}

/// Parse `RRGGBB` or shorthand `RGB` hex (optionally `#`-prefixed).
///
/// Shorthand digits are doubled, so `f80` is `ff8800`. Anything beyond the
/// first six (or three) digits is ignored.
pub fn parse_hex(text: &str) -> Option<Rgb> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    if digits.len() >= 6 {
        Some(Rgb::new(
            hex_pair(digits.get(0..2)?)?,
            hex_pair(digits.get(2..4)?)?,
            hex_pair(digits.get(4..6)?)?,
        ))
    } else if digits.len() >= 3 {
        let nibble = |i: usize| -> Option<u8> {
            let value = hex_pair(digits.get(i..i + 1)?)?;
            Some((value << 4) | value)
        };
        Some(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?))
    } else {
        None
    }
}

fn hex_pair(text: &str) -> Option<u8> {
    // from_str_radix would also take a sign
    if !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(text, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_form() {
        assert_eq!(parse_hex("ff0000"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(parse_hex("#00Ff10"), Some(Rgb::new(0, 255, 16)));
        assert_eq!(parse_hex("0000ffee"), Some(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn test_short_form() {
        assert_eq!(parse_hex("f80"), Some(Rgb::new(0xff, 0x88, 0x00)));
        assert_eq!(parse_hex("#123"), Some(Rgb::new(0x11, 0x22, 0x33)));
        assert_eq!(parse_hex("abcd"), Some(Rgb::new(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn test_from_tuple() {
        assert_eq!(Rgb::from((1u8, 2u8, 3u8)), Rgb::new(1, 2, 3));
        assert_eq!(Rgb::default(), Rgb::BLACK);
    }

    #[test]
    fn test_rejects() {
        assert_eq!(parse_hex(""), None);
        assert_eq!(parse_hex("ff"), None);
        assert_eq!(parse_hex("zz0000"), None);
        assert_eq!(parse_hex("+f0"), None);
        assert_eq!(parse_hex("+1f000"), None);
        assert_eq!(parse_hex("é12"), None);
    }
}
