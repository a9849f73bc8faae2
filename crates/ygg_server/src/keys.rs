//! Property signing keys.
//!
//! Profile properties are signed with SHA1withRSA (PKCS#1 v1.5 padding) and
//! the signature travels base64-encoded. The key pair is supplied at startup
//! in PEM form and never rotated by the server.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha1::{Digest, Sha1};
use thiserror::Error;

/// Errors loading a key pair.
#[derive(Error, Debug)]
pub enum KeyError {
    /// The private key PEM could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// The public key PEM could not be parsed.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The public key does not belong to the private key.
    #[error("public key does not match private key")]
    Mismatch,

    /// The public key could not be rendered as PEM.
    #[error("failed to encode public key: {0}")]
    Encode(String),
}

/// Result type for key loading.
pub type KeyResult<T> = Result<T, KeyError>;

fn parse_private_key(pem: &str) -> KeyResult<RsaPrivateKey> {
    let pem = pem.trim();
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))
}

fn parse_public_key(pem: &str) -> KeyResult<RsaPublicKey> {
    let pem = pem.trim();
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))
}

/// The server's signing key pair.
#[derive(Clone)]
pub struct SigningKeys {
    private_key: RsaPrivateKey,
    verifier: SignatureVerifier,
    public_pem: String,
}

impl SigningKeys {
    /// Loads a key pair from PEM text.
    ///
    /// Accepts `RSA PRIVATE KEY` or `PRIVATE KEY` for the private half and
    /// `PUBLIC KEY` or `RSA PUBLIC KEY` for the public half.
    ///
    /// # Errors
    ///
    /// Fails if either key cannot be parsed or they do not form a pair.
    pub fn from_pem(private_pem: &str, public_pem: &str) -> KeyResult<Self> {
        let private_key = parse_private_key(private_pem)?;
        let public_key = parse_public_key(public_pem)?;
        if RsaPublicKey::from(&private_key) != public_key {
            return Err(KeyError::Mismatch);
        }
        Ok(Self::assemble(private_key, public_key, public_pem.trim().to_string()))
    }

    /// Loads a private key and derives the public half from it.
    ///
    /// # Errors
    ///
    /// Fails if the key cannot be parsed or re-encoded.
    pub fn from_private_pem(private_pem: &str) -> KeyResult<Self> {
        let private_key = parse_private_key(private_pem)?;
        let public_key = RsaPublicKey::from(&private_key);
        let public_pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| KeyError::Encode(e.to_string()))?;
        Ok(Self::assemble(
            private_key,
            public_key,
            public_pem.trim().to_string(),
        ))
    }

    fn assemble(private_key: RsaPrivateKey, public_key: RsaPublicKey, public_pem: String) -> Self {
        Self {
            private_key,
            verifier: SignatureVerifier::new(public_key),
            public_pem,
        }
    }

    /// PEM encoding of the public key, as advertised in the API metadata.
    pub fn public_key_pem(&self) -> &str {
        &self.public_pem
    }

    /// Signs `data`, returning the base64 signature.
    ///
    /// # Errors
    ///
    /// Fails only if the key is too small for a SHA-1 DigestInfo.
    pub fn sign(&self, data: &[u8]) -> rsa::Result<String> {
        let digest = Sha1::digest(data);
        let signature = self
            .private_key
            .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)?;
        Ok(STANDARD.encode(signature))
    }

    /// Returns the verifier for the public half.
    pub fn verifier(&self) -> &SignatureVerifier {
        &self.verifier
    }
}

impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeys")
            .field("public_pem", &self.public_pem)
            .finish_non_exhaustive()
    }
}

/// Verifies property signatures with a public key.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: RsaPublicKey,
}

impl SignatureVerifier {
    fn new(public_key: RsaPublicKey) -> Self {
        Self { key: public_key }
    }

    /// Loads a verifier from a PEM public key.
    ///
    /// # Errors
    ///
    /// Fails if the key cannot be parsed.
    pub fn from_pem(public_pem: &str) -> KeyResult<Self> {
        parse_public_key(public_pem).map(Self::new)
    }

    /// Returns true if `signature` (base64) is valid for `data`.
    pub fn verify(&self, data: &[u8], signature: &str) -> bool {
        let Ok(signature) = STANDARD.decode(signature) else {
            return false;
        };
        let digest = Sha1::digest(data);
        self.key
            .verify(Pkcs1v15Sign::new::<Sha1>(), &digest, &signature)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ygg_testkit::{OTHER_PUBLIC_KEY_PEM, TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM};

    #[test]
    fn sign_and_verify() {
        let keys = SigningKeys::from_pem(TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM).unwrap();
        let signature = keys.sign(b"payload").unwrap();

        assert!(keys.verifier().verify(b"payload", &signature));
        assert!(!keys.verifier().verify(b"tampered", &signature));
        assert!(!keys.verifier().verify(b"payload", "not base64!"));
    }

    #[test]
    fn signing_is_deterministic() {
        let keys = SigningKeys::from_private_pem(TEST_PRIVATE_KEY_PEM).unwrap();
        assert_eq!(keys.sign(b"payload").unwrap(), keys.sign(b"payload").unwrap());
    }

    #[test]
    fn derived_public_key_matches_supplied() {
        let derived = SigningKeys::from_private_pem(TEST_PRIVATE_KEY_PEM).unwrap();
        let verifier = SignatureVerifier::from_pem(derived.public_key_pem()).unwrap();
        let supplied = SignatureVerifier::from_pem(TEST_PUBLIC_KEY_PEM).unwrap();

        let signature = derived.sign(b"payload").unwrap();
        assert!(verifier.verify(b"payload", &signature));
        assert!(supplied.verify(b"payload", &signature));
    }

    #[test]
    fn public_pem_is_passed_through() {
        let keys = SigningKeys::from_pem(TEST_PRIVATE_KEY_PEM, TEST_PUBLIC_KEY_PEM).unwrap();
        assert_eq!(keys.public_key_pem(), TEST_PUBLIC_KEY_PEM.trim());
    }

    #[test]
    fn reject_mismatched_pair() {
        let result = SigningKeys::from_pem(TEST_PRIVATE_KEY_PEM, OTHER_PUBLIC_KEY_PEM);
        assert!(matches!(result, Err(KeyError::Mismatch)));
    }

    #[test]
    fn reject_garbage() {
        assert!(matches!(
            SigningKeys::from_private_pem("not a key"),
            Err(KeyError::InvalidPrivateKey(_))
        ));
        assert!(matches!(
            SignatureVerifier::from_pem("not a key"),
            Err(KeyError::InvalidPublicKey(_))
        ));
    }
}
