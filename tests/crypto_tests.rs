//! Integration tests for the crypto module: the raw-key envelope and the
//! password envelope.

use keyvault::crypto::{decrypt, encrypt, unwrap, wrap, RawKey, NONCE_LEN, SALT_LEN, TAG_LEN};
use keyvault::errors::KeyVaultError;

// ---------------------------------------------------------------------------
// Raw-key envelope
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = RawKey::generate();
    let plaintext = b"the quick brown fox jumps over the lazy dog";

    let blob = encrypt(key.as_bytes(), plaintext).expect("encrypt should succeed");
    assert_eq!(blob.len(), NONCE_LEN + plaintext.len() + TAG_LEN);

    let recovered = decrypt(key.as_bytes(), &blob).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_roundtrips_binary_and_large_input() {
    let key = RawKey::generate();
    let plaintext: Vec<u8> = (0..=255u8).cycle().take(1 << 20).collect();

    let blob = encrypt(key.as_bytes(), &plaintext).unwrap();
    assert_eq!(decrypt(key.as_bytes(), &blob).unwrap(), plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];

    let ct1 = encrypt(&key, b"same input").unwrap();
    let ct2 = encrypt(&key, b"same input").unwrap();

    assert_ne!(ct1[..NONCE_LEN], ct2[..NONCE_LEN], "nonces must differ");
    assert_ne!(ct1, ct2);
}

#[test]
fn decrypt_with_wrong_key_is_authentication_error() {
    let blob = encrypt(&[0x11u8; 32], b"TOP_SECRET=42").unwrap();
    let err = decrypt(&[0x22u8; 32], &blob).unwrap_err();
    assert!(matches!(err, KeyVaultError::Authentication));
}

#[test]
fn decrypt_with_truncated_data_is_format_error() {
    let err = decrypt(&[0xAAu8; 32], &[0u8; 5]).unwrap_err();
    assert!(matches!(err, KeyVaultError::Format(_)));
}

#[test]
fn encrypt_with_wrong_key_size_is_invalid_key() {
    for len in [0, 16, 24, 31, 33] {
        let err = encrypt(&vec![0u8; len], b"data").unwrap_err();
        assert!(matches!(err, KeyVaultError::InvalidKey(_)), "len {len}");
    }
}

#[test]
fn any_flipped_bit_fails_decryption() {
    let key = [0xBBu8; 32];
    let blob = encrypt(&key, b"VALUE=abc").unwrap();

    for i in 0..blob.len() {
        for bit in 0..8 {
            let mut tampered = blob.clone();
            tampered[i] ^= 1 << bit;
            let err = decrypt(&key, &tampered).unwrap_err();
            assert!(
                matches!(err, KeyVaultError::Authentication),
                "byte {i} bit {bit} was not detected"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Password envelope
// ---------------------------------------------------------------------------

#[test]
fn wrap_unwrap_roundtrip() {
    let secret = RawKey::generate();

    let blob = wrap(secret.as_bytes(), b"correct-horse").unwrap();
    assert_eq!(blob.len(), SALT_LEN + NONCE_LEN + 32 + TAG_LEN);

    let recovered = unwrap(&blob, b"correct-horse").unwrap();
    assert_eq!(recovered.as_slice(), secret.as_bytes());
}

#[test]
fn unwrap_with_wrong_password_fails() {
    let blob = wrap(b"secret material", b"correct-horse").unwrap();

    for wrong in [&b"correct-horsE"[..], &b""[..], &b"correct-horse "[..], &b"battery-staple"[..]] {
        let err = unwrap(&blob, wrong).unwrap_err();
        assert!(matches!(err, KeyVaultError::Authentication));
    }
}

#[test]
fn wrong_password_message_does_not_reveal_cause() {
    let blob = wrap(b"secret", b"pw").unwrap();

    let wrong_password = unwrap(&blob, b"other").unwrap_err().to_string();

    let mut corrupted = blob.clone();
    let last = corrupted.len() - 1;
    corrupted[last] ^= 0x01;
    let corrupted_data = unwrap(&corrupted, b"pw").unwrap_err().to_string();

    assert_eq!(wrong_password, corrupted_data);
    assert!(wrong_password.contains("wrong password or corrupted data"));
}

#[test]
fn wrap_twice_gives_different_blobs() {
    let a = wrap(b"same secret", b"same password").unwrap();
    let b = wrap(b"same secret", b"same password").unwrap();

    assert_ne!(a[..SALT_LEN], b[..SALT_LEN], "salts must differ");
    assert_ne!(a, b);
}

#[test]
fn unwrap_short_blob_is_format_error() {
    for len in [0, 1, SALT_LEN, SALT_LEN + NONCE_LEN - 1] {
        let err = unwrap(&vec![0u8; len], b"pw").unwrap_err();
        assert!(matches!(err, KeyVaultError::Format(_)), "len {len}");
    }
}

#[test]
fn tampering_any_region_never_yields_plaintext() {
    let secret = [0x42u8; 32];
    let blob = wrap(&secret, b"pw").unwrap();

    // One bit in each of: salt, nonce, ciphertext, tag.
    let positions = [
        0,
        SALT_LEN - 1,
        SALT_LEN,
        SALT_LEN + NONCE_LEN - 1,
        SALT_LEN + NONCE_LEN,
        SALT_LEN + NONCE_LEN + 31,
        blob.len() - TAG_LEN,
        blob.len() - 1,
    ];

    for pos in positions {
        let mut tampered = blob.clone();
        tampered[pos] ^= 0x80;
        let err = unwrap(&tampered, b"pw").unwrap_err();
        assert!(matches!(err, KeyVaultError::Authentication), "position {pos}");
    }
}
