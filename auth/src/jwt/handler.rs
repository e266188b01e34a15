use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::algorithm::SigningAlgorithm;
use super::claims::TokenClaims;
use super::errors::JwtError;

/// JWT token handler for encoding and decoding access tokens.
///
/// Signature checks are delegated to `jsonwebtoken`, which compares HMAC tags
/// in constant time. Expiry is checked here against a caller-supplied instant
/// with no leeway.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: SigningAlgorithm,
}

impl JwtHandler {
    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `algorithm` - Declared HMAC algorithm used to sign and to accept tokens
    ///
    /// # Security Notes
    /// - The secret should be at least as long as the HMAC output (32 bytes for HS256)
    /// - Every token signed with a secret becomes invalid once the secret changes
    pub fn new(secret: &[u8], algorithm: SigningAlgorithm) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
        }
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm.into());

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate an access token as of `now`.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, foreign algorithm, malformed payload or missing claim
    /// * `TokenExpired` - `exp` is at or before `now`
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm.into());
        // Expiry is checked below against the injected clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        if token_data.claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn claims(role: &str) -> TokenClaims {
        TokenClaims::for_user("alice", 42, role, issued_at(), Duration::minutes(30))
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET, SigningAlgorithm::Hs256);
        let claims = claims("admin");

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler
            .decode(&token, issued_at())
            .expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_expiry_boundary() {
        let handler = JwtHandler::new(SECRET, SigningAlgorithm::Hs256);
        let token = handler.encode(&claims("user")).unwrap();

        let just_before = issued_at() + Duration::minutes(29) + Duration::seconds(59);
        assert!(handler.decode(&token, just_before).is_ok());

        let at_expiry = issued_at() + Duration::minutes(30);
        assert_eq!(
            handler.decode(&token, at_expiry),
            Err(JwtError::TokenExpired)
        );

        let just_after = issued_at() + Duration::minutes(30) + Duration::seconds(1);
        assert_eq!(
            handler.decode(&token, just_after),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET, SigningAlgorithm::Hs256);

        let result = handler.decode("invalid.token.here", issued_at());
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(
            b"secret1_at_least_32_bytes_long_key!",
            SigningAlgorithm::Hs256,
        );
        let handler2 = JwtHandler::new(
            b"secret2_at_least_32_bytes_long_key!",
            SigningAlgorithm::Hs256,
        );

        let token = handler1.encode(&claims("user")).unwrap();

        let result = handler2.decode(&token, issued_at());
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_rejects_swapped_payload() {
        let handler = JwtHandler::new(SECRET, SigningAlgorithm::Hs256);

        let user_token = handler.encode(&claims("user")).unwrap();
        let admin_token = handler.encode(&claims("admin")).unwrap();

        // Admin payload grafted onto the user token's signature
        let user_parts: Vec<&str> = user_token.split('.').collect();
        let admin_parts: Vec<&str> = admin_token.split('.').collect();
        let forged = format!("{}.{}.{}", user_parts[0], admin_parts[1], user_parts[2]);

        let result = handler.decode(&forged, issued_at());
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_rejects_unsigned_token() {
        let handler = JwtHandler::new(SECRET, SigningAlgorithm::Hs256);
        let token = handler.encode(&claims("admin")).unwrap();
        let payload = token.split('.').nth(1).unwrap();

        // {"alg":"none","typ":"JWT"}
        let unsigned = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{}.", payload);

        let result = handler.decode(&unsigned, issued_at());
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_rejects_foreign_algorithm() {
        let hs512 = JwtHandler::new(SECRET, SigningAlgorithm::Hs512);
        let hs256 = JwtHandler::new(SECRET, SigningAlgorithm::Hs256);

        let token = hs512.encode(&claims("user")).unwrap();

        assert!(hs512.decode(&token, issued_at()).is_ok());
        assert!(matches!(
            hs256.decode(&token, issued_at()),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_decode_missing_claim() {
        let handler = JwtHandler::new(SECRET, SigningAlgorithm::Hs256);

        let token = handler
            .encode(&json!({
                "username": "alice",
                "role": "user",
                "exp": issued_at().timestamp() + 60,
            }))
            .unwrap();

        let result = handler.decode(&token, issued_at());
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }
}
