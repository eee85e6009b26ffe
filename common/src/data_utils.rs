//! Helpers for binary fields carried as base64 text.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error;

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn from_base64(data: &str) -> error::Result<Vec<u8>> {
    Ok(STANDARD.decode(data)?)
}

/// Decoded length of a base64 payload, without decoding it.
pub fn size(value: &str) -> usize {
    (value.len() / 4 * 3).saturating_sub(padding_size(value))
}

fn padding_size(value: &str) -> usize {
    if value.ends_with("==") {
        2
    } else if value.ends_with('=') {
        1
    } else {
        0
    }
}

/// Human readable size, digits grouped by three with spaces: `1 234 bytes`.
pub fn format_as_bytes(size: usize) -> String {
    let digits = size.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    format!("{} bytes", grouped)
}

pub fn byte_size(base64: &str) -> String {
    format_as_bytes(size(base64))
}

/// Data URL a viewer can open directly.
pub fn open_file(content_type: &str, data: &str) -> String {
    format!("data:{};base64,{}", content_type, data)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn size_accounts_for_padding() {
        assert_eq!(size(&to_base64(b"a")), 1);
        assert_eq!(size(&to_base64(b"ab")), 2);
        assert_eq!(size(&to_base64(b"abc")), 3);
        assert_eq!(size(""), 0);
    }

    #[test]
    fn bytes_are_grouped_by_thousands() {
        assert_eq!(format_as_bytes(12), "12 bytes");
        assert_eq!(format_as_bytes(1234), "1 234 bytes");
        assert_eq!(format_as_bytes(1234567), "1 234 567 bytes");
        assert_eq!(byte_size(&to_base64(&[0u8; 3000])), "3 000 bytes");
    }

    #[test]
    fn open_file_builds_data_url() {
        assert_eq!(
            open_file("image/png", "aGk="),
            "data:image/png;base64,aGk="
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(from_base64("aGk=").unwrap(), b"hi");
        assert!(from_base64("not base64!").is_err());
    }
}
