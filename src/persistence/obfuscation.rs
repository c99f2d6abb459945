//! Reversible byte masking
//!
//! Bytes are XORed position-wise with `OBFUSCATION_SECRET` (repeating) and the
//! result is rendered as standard base64, so the stored text never contains
//! JSON structural characters.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::consts::OBFUSCATION_SECRET;

/// XOR `bytes` in place with the repeating secret. Self-inverse.
fn mask(bytes: &mut [u8]) {
    for (byte, key) in bytes.iter_mut().zip(OBFUSCATION_SECRET.iter().cycle()) {
        *byte ^= key;
    }
}

/// Mask plaintext bytes and render them as storable text
pub fn obscure(plain: &[u8]) -> String {
    let mut buf = plain.to_vec();
    mask(&mut buf);
    BASE64.encode(buf)
}

/// Undo `obscure`. Returns `None` if `text` is not valid base64.
pub fn reveal(text: &str) -> Option<Vec<u8>> {
    let mut buf = BASE64.decode(text).ok()?;
    mask(&mut buf);
    Some(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_inverts_obscure() {
        let plain = "héllo wörld ✓ 🚀".as_bytes();
        let text = obscure(plain);
        assert_eq!(reveal(&text).as_deref(), Some(plain));
    }

    #[test]
    fn test_secret_repeats_past_its_length() {
        let plain = vec![0u8; OBFUSCATION_SECRET.len() * 2 + 3];
        let masked = BASE64.decode(obscure(&plain)).unwrap();
        assert_eq!(&masked[..OBFUSCATION_SECRET.len()], OBFUSCATION_SECRET);
        assert_eq!(
            &masked[OBFUSCATION_SECRET.len()..OBFUSCATION_SECRET.len() * 2],
            OBFUSCATION_SECRET
        );
        assert_eq!(&masked[OBFUSCATION_SECRET.len() * 2..], &OBFUSCATION_SECRET[..3]);
    }

    #[test]
    fn test_output_hides_braces() {
        let text = obscure(br#"{"a":{"b":{}}}"#);
        assert!(!text.contains('{'));
        assert!(!text.contains('}'));
    }

    #[test]
    fn test_reveal_rejects_non_base64() {
        assert_eq!(reveal("not base64!"), None);
        assert_eq!(reveal("{}"), None);
        assert_eq!(reveal("abc"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(obscure(b""), "");
        assert_eq!(reveal(""), Some(Vec::new()));
    }
}
