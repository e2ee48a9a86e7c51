//! String helpers and sealing of persisted secrets.
//!
//! Local account passwords and the saved session are sealed with
//! AES-256-GCM and stored as Base64 of `[nonce (12 bytes)][ciphertext]`.

use crate::error::Error;
use aes_gcm::{
    Aes256Gcm,
    aead::{Aead, AeadCore, KeyInit, Nonce, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

type Result<T, E = Error> = std::result::Result<T, E>;

const NONCE_LEN: usize = 12;

/// Key for sealing local secrets.
///
/// WARNING: compiled into the binary. It keeps secrets out of plain sight in
/// config files; it does not protect against someone holding the binary.
const SEAL_KEY: &[u8; 32] = b"LodgingAdminLocalSealKey#2026v01";

/// Seal a plaintext string with AES-256-GCM and a fresh random nonce
pub fn seal(plain_text: &str) -> Result<String> {
    let cipher = Aes256Gcm::new(SEAL_KEY.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plain_text.as_bytes())
        .map_err(|e| Error::Crypto {
            message: format!("Encryption failed: {e}"),
        })?;

    let mut combined = nonce.to_vec();
    combined.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(combined))
}

/// Open a value produced by [`seal`]. Fails on tampering or a wrong format.
pub fn open(sealed: &str) -> Result<String> {
    let data = BASE64.decode(sealed.trim()).map_err(|e| Error::Crypto {
        message: format!("Base64 decode failed: {e}"),
    })?;

    if data.len() < NONCE_LEN {
        return Err(Error::Crypto {
            message: "Ciphertext too short".to_string(),
        });
    }

    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(SEAL_KEY.into());
    let nonce = Nonce::<Aes256Gcm>::from_slice(nonce_bytes);

    let plain = cipher.decrypt(nonce, ciphertext).map_err(|e| Error::Crypto {
        message: format!("Decryption failed: {e}"),
    })?;

    String::from_utf8(plain).map_err(|e| Error::Crypto {
        message: format!("UTF-8 decode failed: {e}"),
    })
}

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True when the value is empty or whitespace only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open() {
        let sealed = seal("admin").expect("seal");
        assert_ne!(sealed, "admin");
        assert_eq!(open(&sealed).expect("open"), "admin");
    }

    #[test]
    fn test_seal_uses_fresh_nonce() {
        let a = seal("same").expect("seal");
        let b = seal("same").expect("seal");
        assert_ne!(a, b);
    }

    #[test]
    fn test_open_rejects_tampering() {
        let sealed = seal("role=staff").expect("seal");
        let mut bytes = BASE64.decode(&sealed).expect("decode");
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        assert!(open(&BASE64.encode(bytes)).is_err());
    }

    #[test]
    fn test_open_invalid_input() {
        assert!(open("not_valid_base64!!!").is_err());
        assert!(open("AQIDBA==").is_err());
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("EMP001", "emp"));
        assert!(contains_ignore_case("A101", ""));
        assert!(contains_ignore_case("张三", "三"));
        assert!(!contains_ignore_case("B202", "a"));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank("   "));
        assert!(!is_blank(" x "));
    }
}
