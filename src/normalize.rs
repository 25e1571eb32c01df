//! Subject-safe normalization
//!
//! Broker subjects only tolerate a narrow alphabet. [`normalize`] keeps ASCII
//! letters and digits and rewrites every other byte as `Q` followed by its
//! two-digit uppercase hex value. `Q` itself is the escape marker, so it is
//! always escaped (`Q51`).

const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";

#[inline]
fn passes_through(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() && byte != b'Q'
}

/// Escape `input` into `[a-zA-PR-Z0-9]` plus `Q`-escapes.
///
/// ```
/// use fanout_log::normalize::normalize;
///
/// assert_eq!(normalize("host one"), "hostQ20one");
/// assert_eq!(normalize("web-1.example"), "webQ2D1Q2Eexample");
/// ```
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        if passes_through(byte) {
            out.push(byte as char);
        } else {
            out.push('Q');
            out.push(UPPER_HEX[(byte >> 4) as usize] as char);
            out.push(UPPER_HEX[(byte & 0x0f) as usize] as char);
        }
    }
    out
}

fn unhex(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Reverse [`normalize`]. A `Q` not followed by two hex digits is kept as is.
/// Decoded bytes that do not form valid UTF-8 are replaced.
pub fn denormalize(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'Q' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).copied().and_then(unhex),
                bytes.get(i + 2).copied().and_then(unhex),
            ) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
