use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Signs and verifies identity tokens with a process-wide secret.
///
/// A token carries a single claim: the owning account's id. Tokens are only
/// trusted after their signature checks out; the payload of an unsigned or
/// tampered token is never read.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

/// The one claim an identity token carries.
#[derive(Serialize, Deserialize, Debug)]
struct IdentityClaims {
    sub: String,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no expiry claim; they stay valid until the secret is
        // rotated.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        TokenCodec {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }

    /// Issues a signed token asserting the given account identity.
    pub fn sign(&self, account_id: &str) -> Result<String, String> {
        let claims = IdentityClaims {
            sub: account_id.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| format!("Failed to encode identity token: {}", e))
    }

    /// Extracts the account id from a token, or None when the token is
    /// malformed or its signature does not verify.
    pub fn verify(&self, token: &str) -> Option<String> {
        match decode::<IdentityClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims.sub),
            Err(e) => {
                debug!("Rejected identity token: {}", e);
                None
            }
        }
    }
}
