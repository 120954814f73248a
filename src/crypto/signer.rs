//! Canonical request strings and RSA-SHA256 signatures

use crate::{PayError, Result};
use base64::{engine::general_purpose, Engine as _};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde_json::Value;
use sha2::Sha256;

/// The fields of one outgoing request that go into its signature
///
/// Built per call and dropped after signing. The body may carry payment
/// data, so `Debug` only reports whether one is present.
#[derive(Clone, Copy)]
pub struct SignableRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub timestamp: &'a str,
    pub nonce: &'a str,
    pub body: Option<&'a str>,
}

impl std::fmt::Debug for SignableRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignableRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("timestamp", &self.timestamp)
            .field("nonce", &self.nonce)
            .field("body", &self.body.map(|_| "<omitted>"))
            .finish()
    }
}

impl<'a> SignableRequest<'a> {
    pub fn new(
        method: &'a str,
        path: &'a str,
        timestamp: &'a str,
        nonce: &'a str,
        body: Option<&'a str>,
    ) -> Self {
        Self {
            method,
            path,
            timestamp,
            nonce,
            body,
        }
    }

    /// `METHOD\npath\ntimestamp\nnonce\n`, followed by `body\n` when a
    /// non-empty body is present
    pub fn canonical_string(&self) -> String {
        let mut canonical = format!(
            "{}\n{}\n{}\n{}\n",
            self.method, self.path, self.timestamp, self.nonce
        );
        if let Some(body) = self.body.filter(|body| !body.is_empty()) {
            canonical.push_str(body);
            canonical.push('\n');
        }
        canonical
    }
}

/// Serialize a request body the way it is both signed and sent
///
/// Strings are taken as already serialized and `null` means no body.
/// Objects serialize with sorted keys, so equal values always produce the
/// same bytes.
pub fn serialize_body(body: &Value) -> Result<Option<String>> {
    match body {
        Value::Null => Ok(None),
        Value::String(raw) => Ok(Some(raw.clone())),
        other => Ok(Some(serde_json::to_string(other)?)),
    }
}

/// Parse an RSA private key from PKCS#8 or PKCS#1 PEM
pub fn parse_private_key(pem: &str) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|pkcs8_err| {
            RsaPrivateKey::from_pkcs1_pem(pem).map_err(|pkcs1_err| {
                PayError::invalid_key(format!(
                    "private key is neither PKCS#8 ({}) nor PKCS#1 ({})",
                    pkcs8_err, pkcs1_err
                ))
            })
        })
}

/// Parse an RSA public key from SPKI or PKCS#1 PEM
pub fn parse_public_key(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem).or_else(|spki_err| {
        RsaPublicKey::from_pkcs1_pem(pem).map_err(|pkcs1_err| {
            PayError::invalid_key(format!(
                "public key is neither SPKI ({}) nor PKCS#1 ({})",
                spki_err, pkcs1_err
            ))
        })
    })
}

/// Keys held by one client for its whole lifetime
///
/// Read-only after construction, so one instance can sign for any number of
/// concurrent calls.
#[derive(Clone, Default)]
pub struct KeyMaterial {
    signing_key: Option<SigningKey<Sha256>>,
    verifying_key: Option<VerifyingKey<Sha256>>,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("private_key", &self.signing_key.as_ref().map(|_| "<redacted>"))
            .field("public_key", &self.verifying_key.as_ref().map(|_| "<rsa>"))
            .finish()
    }
}

impl KeyMaterial {
    /// Load keys from optional PEM text
    pub fn from_pem(private_key: Option<&str>, public_key: Option<&str>) -> Result<Self> {
        let signing_key = private_key
            .map(parse_private_key)
            .transpose()?
            .map(SigningKey::<Sha256>::new);
        let verifying_key = public_key
            .map(parse_public_key)
            .transpose()?
            .map(VerifyingKey::<Sha256>::new);

        Ok(Self {
            signing_key,
            verifying_key,
        })
    }

    pub fn has_private_key(&self) -> bool {
        self.signing_key.is_some()
    }

    pub fn has_public_key(&self) -> bool {
        self.verifying_key.is_some()
    }

    /// Sign a request's canonical string
    ///
    /// Fails with [`PayError::MissingKeyMaterial`] before doing any work when
    /// no private key is configured, and with [`PayError::InvalidPath`] when
    /// the path still carries a scheme or host.
    pub fn sign_request(&self, request: &SignableRequest<'_>) -> Result<String> {
        let signing_key = self
            .signing_key
            .as_ref()
            .ok_or_else(PayError::missing_private_key)?;

        if !request.path.starts_with('/') {
            return Err(PayError::invalid_path(request.path));
        }

        sign_with(signing_key, &request.canonical_string())
    }

    /// Sign newline-terminated lines, as used for client-side pay signatures
    pub fn sign_message(&self, lines: &[&str]) -> Result<String> {
        let signing_key = self
            .signing_key
            .as_ref()
            .ok_or_else(PayError::missing_private_key)?;

        let message: String = lines.iter().map(|line| format!("{}\n", line)).collect();
        sign_with(signing_key, &message)
    }

    /// Verify a provider signature over `timestamp\nnonce\nbody\n`
    ///
    /// Used for response headers and payment notifications. A signature that
    /// is not valid base64 or has the wrong length verifies as `false`.
    pub fn verify(&self, timestamp: &str, nonce: &str, body: &str, signature: &str) -> Result<bool> {
        let verifying_key = self
            .verifying_key
            .as_ref()
            .ok_or_else(PayError::missing_public_key)?;

        let Ok(raw) = general_purpose::STANDARD.decode(signature) else {
            return Ok(false);
        };
        let Ok(signature) = Signature::try_from(raw.as_slice()) else {
            return Ok(false);
        };

        let message = format!("{}\n{}\n{}\n", timestamp, nonce, body);
        Ok(verifying_key.verify(message.as_bytes(), &signature).is_ok())
    }
}

fn sign_with(signing_key: &SigningKey<Sha256>, message: &str) -> Result<String> {
    let signature = signing_key
        .try_sign(message.as_bytes())
        .map_err(|e| PayError::signing(e.to_string()))?;
    Ok(general_purpose::STANDARD.encode(signature.to_bytes()))
}
