//! Role claims carried inside the session token.
//!
//! # Purpose
//! Extracts the `role` claim from a compact three-segment token so the UI can
//! decide what to show.
//!
//! # Key invariants
//! - [`decode_unverified_claims`] never checks the signature. The browser
//!   cannot hold the signing secret, so the role it yields is an
//!   [`AdvisoryRole`] and must not be used for access decisions.
//! - A [`VerifiedRole`] can only be produced by [`verify_role`], which
//!   validates the signature with a caller-supplied key.
//!
//! # Examples
//! ```rust
//! use reframed_authz::decode_unverified_claims;
//!
//! // {"alg":"HS256","typ":"JWT"} . {"role":"admin"} . <signature>
//! let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJyb2xlIjoiYWRtaW4ifQ.c2ln";
//! let claims = decode_unverified_claims(token).expect("claims");
//! assert_eq!(claims.role.as_deref(), Some("admin"));
//! ```
//!
//! # Common pitfalls
//! - Treating an advisory role as proof of identity. The server must
//!   re-authorize every request.
use crate::{AuthzError, AuthzResult};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Role read from a token whose signature was not checked.
///
/// Good enough to hide a button; never good enough to grant access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdvisoryRole(String);

impl AdvisoryRole {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AdvisoryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role read from a token whose signature was validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerifiedRole(String);

impl VerifiedRole {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A verified role may always be used where an advisory one is expected.
    pub fn to_advisory(&self) -> AdvisoryRole {
        AdvisoryRole::new(self.0.clone())
    }
}

impl std::fmt::Display for VerifiedRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decode the payload segment of a compact token without verifying it.
///
/// # Errors
/// - [`AuthzError::MalformedToken`] unless the token has exactly three segments.
/// - [`AuthzError::PayloadEncoding`] if the payload is not base64url.
/// - [`AuthzError::Json`] if the payload is not a JSON claims object.
pub fn decode_unverified_claims(token: &str) -> AuthzResult<RoleClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(AuthzError::MalformedToken(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    }
    // Some issuers keep base64 padding on the payload.
    let payload = segments[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Extract the advisory role claim, if any.
pub fn advisory_role(token: &str) -> AuthzResult<AdvisoryRole> {
    decode_unverified_claims(token)?
        .role
        .map(AdvisoryRole::new)
        .ok_or(AuthzError::MissingRole)
}

/// Validate the token signature and claims, then extract the role.
///
/// # Errors
/// - [`AuthzError::Jwt`] if the signature or any validated claim is rejected.
/// - [`AuthzError::MissingRole`] if the verified claims carry no role.
pub fn verify_role(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> AuthzResult<VerifiedRole> {
    let data = jsonwebtoken::decode::<RoleClaims>(token, key, validation)?;
    data.claims
        .role
        .map(VerifiedRole)
        .ok_or(AuthzError::MissingRole)
}
