//! Credential obfuscation for `config.json`
//!
//! XOR with a fixed key, then standard base64. Keeps credentials out of
//! plain sight in the config file; it is not encryption. The key is part of
//! the on-disk format and must not change.

use base64::{engine::general_purpose, Engine as _};

use super::error::{RepoError, RepoResult};

const OBFUSCATION_KEY: &[u8] = b"t-countdown-2024-encrypt-key!@#$";

fn xor_cipher(data: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(OBFUSCATION_KEY.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect()
}

pub fn encrypt_str(plain: &str) -> String {
    general_purpose::STANDARD.encode(xor_cipher(plain.as_bytes()))
}

pub fn decrypt_str(encoded: &str) -> RepoResult<String> {
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| RepoError::Cipher(e.to_string()))?;
    String::from_utf8(xor_cipher(&bytes)).map_err(|e| RepoError::Cipher(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(encrypt_str("user"), "AV4GHQ==");
        assert_eq!(encrypt_str("密码"), "kYLliNXv");
        assert_eq!(encrypt_str(""), "");
    }

    #[test]
    fn test_decrypt_reverses_encrypt() {
        let long = "an-app-password-longer-than-the-32-byte-key";
        assert_eq!(decrypt_str(&encrypt_str(long)).unwrap(), long);
        assert_eq!(decrypt_str("kYLliNXv").unwrap(), "密码");
    }

    #[test]
    fn test_bad_base64() {
        assert!(matches!(decrypt_str("not base64!"), Err(RepoError::Cipher(_))));
    }

    #[test]
    fn test_invalid_utf8() {
        // Decodes to a lone continuation byte
        let encoded = general_purpose::STANDARD.encode([0x80 ^ OBFUSCATION_KEY[0]]);
        assert!(matches!(decrypt_str(&encoded), Err(RepoError::Cipher(_))));
    }
}
