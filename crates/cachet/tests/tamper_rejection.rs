use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use cachet::{Cipher, DecryptError, Encrypter, SeedError, Signer};
use cachet_codec::frame;

fn test_encrypter(cipher: Cipher) -> Encrypter {
    Encrypter::new(cipher.generate_key(), cipher).expect("construction should succeed")
}

/// Re-frames a payload with one ciphertext byte flipped.
fn flip_ciphertext_byte(payload: &str, index: usize) -> String {
    let mut decoded = frame::decode(payload).expect("payload should unframe");
    decoded.ciphertext[index] ^= 0x01;
    frame::encode(&decoded.nonce, &decoded.ciphertext).expect("payload should reframe")
}

fn flip_nonce_byte(payload: &str, index: usize) -> String {
    let mut decoded = frame::decode(payload).expect("payload should unframe");
    decoded.nonce[index] ^= 0x01;
    frame::encode(&decoded.nonce, &decoded.ciphertext).expect("payload should reframe")
}

#[test]
fn any_flipped_ciphertext_byte_fails_decryption() {
    for cipher in Cipher::ALL {
        let encrypter = test_encrypter(cipher);
        let payload = encrypter.encrypt_string("hello").expect("encryption");
        let ciphertext_len = frame::decode(&payload)
            .expect("payload should unframe")
            .ciphertext
            .len();

        for index in 0..ciphertext_len {
            let tampered = flip_ciphertext_byte(&payload, index);
            let err = encrypter
                .decrypt_string(&tampered)
                .expect_err("tampered ciphertext should fail");
            assert_eq!(err, DecryptError::Decrypt);
        }
    }
}

#[test]
fn any_flipped_nonce_byte_fails_decryption() {
    for cipher in Cipher::ALL {
        let encrypter = test_encrypter(cipher);
        let payload = encrypter.encrypt_string("hello").expect("encryption");

        for index in 0..cipher.nonce_len() {
            let tampered = flip_nonce_byte(&payload, index);
            let err = encrypter
                .decrypt_string(&tampered)
                .expect_err("tampered nonce should fail");
            assert_eq!(err, DecryptError::Decrypt);
        }
    }
}

#[test]
fn any_flipped_detached_signature_byte_fails_verification() {
    let signer = Signer::generate();
    let signature = signer.sign_detached_string("hello");
    let raw = STANDARD.decode(&signature).expect("signature should decode");

    for index in 0..raw.len() {
        let mut tampered = raw.clone();
        tampered[index] ^= 0x01;
        let tampered = STANDARD.encode(tampered);
        assert!(!signer.verify_detached_string(&tampered, "hello"));
    }
}

#[test]
fn payload_missing_the_encrypted_key_is_rejected_before_crypto() {
    let encrypter = test_encrypter(Cipher::XChaCha20Poly1305);

    let json = r#"{"nonce":"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA="}"#;
    let err = encrypter
        .decrypt_string(&STANDARD.encode(json))
        .expect_err("missing field should fail");
    assert_eq!(err, DecryptError::InvalidPayload);
}

#[test]
fn malformed_payloads_are_rejected_uniformly() {
    let encrypter = test_encrypter(Cipher::Aes256Gcm);

    let cases = [
        String::new(),
        "@@@ not base64 @@@".to_string(),
        STANDARD.encode("not json"),
        STANDARD.encode(r#"{"nonce":1,"encrypted":2}"#),
        STANDARD.encode(r#"{"nonce":"AAAA","encrypted":null}"#),
        STANDARD.encode(r#"["nonce","encrypted"]"#),
    ];
    for payload in cases {
        let err = encrypter
            .decrypt_string(&payload)
            .expect_err("malformed payload should fail");
        assert_eq!(err, DecryptError::InvalidPayload);
    }
}

#[test]
fn garbage_detached_signatures_return_false_without_panicking() {
    let signer = Signer::generate();
    for len in [0_usize, 1, 16, 63, 65, 256] {
        let garbage = STANDARD.encode(vec![0x99_u8; len]);
        assert!(!signer.verify_detached_string(&garbage, "anything"));
    }
    assert!(!signer.verify_detached_string("???", "anything"));
}

#[test]
fn boundary_key_and_seed_lengths_fail_construction() {
    for cipher in Cipher::ALL {
        assert!(Encrypter::new(vec![0_u8; cipher.key_len() - 1], cipher).is_err());
        assert!(Encrypter::new(vec![0_u8; cipher.key_len() + 1], cipher).is_err());
    }

    assert_eq!(
        Signer::from_seed(&[0_u8; 31]).expect_err("short seed should fail"),
        SeedError::Length(31)
    );
    assert_eq!(
        Signer::from_seed(&[0_u8; 33]).expect_err("long seed should fail"),
        SeedError::Length(33)
    );
    assert_eq!(
        Signer::from_seed(&[]).expect_err("empty seed should fail"),
        SeedError::Empty
    );
}

#[test]
fn payloads_are_not_portable_across_ciphers() {
    let key = Cipher::Aes256Gcm.generate_key();
    let gcm = Encrypter::new(key.clone(), Cipher::Aes256Gcm).expect("construction");
    let xchacha = Encrypter::new(key, Cipher::XChaCha20Poly1305).expect("construction");

    let payload = gcm.encrypt_string("hello").expect("encryption");
    let err = xchacha
        .decrypt_string(&payload)
        .expect_err("cross-cipher payload should fail");
    assert_eq!(err, DecryptError::Decrypt);
}
