use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use budgetly_core::errors::{Error as CoreError, Result as CoreResult};
use budgetly_core::identity::{IdentityResolverTrait, UserId};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::ApiError;
use crate::main_lib::AppState;

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
}

/// Resolves the principal from an HS256 bearer token issued by the identity
/// provider. The `sub` claim is the user id.
pub struct JwtIdentityResolver {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityResolver {
    pub fn new(secret: &[u8], issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        match issuer {
            Some(issuer) => {
                validation.set_issuer(&[issuer]);
                validation.set_required_spec_claims(&["exp", "sub", "iss"]);
            }
            None => validation.set_required_spec_claims(&["exp", "sub"]),
        }
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl IdentityResolverTrait for JwtIdentityResolver {
    fn resolve_current_user(&self, credentials: Option<&str>) -> CoreResult<UserId> {
        let token = credentials
            .ok_or_else(|| CoreError::Unauthenticated("Missing bearer token".into()))?;
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| CoreError::Unauthenticated(format!("Invalid token: {}", err)))?;
        let subject = data.claims.sub.trim();
        if subject.is_empty() {
            return Err(CoreError::Unauthenticated("Token has an empty subject".into()));
        }
        Ok(UserId::new(subject))
    }
}

/// Single-user mode: every request acts as the configured user.
pub struct LocalIdentityResolver {
    user_id: UserId,
}

impl LocalIdentityResolver {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl IdentityResolverTrait for LocalIdentityResolver {
    fn resolve_current_user(&self, _credentials: Option<&str>) -> CoreResult<UserId> {
        Ok(self.user_id.clone())
    }
}

pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

/// Extracts the bearer token, if any. A header with another scheme counts as
/// an authentication failure rather than an anonymous request.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, CoreError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let header = header
        .to_str()
        .map_err(|_| CoreError::Unauthenticated("Malformed Authorization header".into()))?;

    let mut split = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (split.next(), split.next()) else {
        return Err(CoreError::Unauthenticated("Malformed Authorization header".into()));
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(CoreError::Unauthenticated(
            "Unsupported authorization scheme".into(),
        ));
    }

    let token = token.trim();
    Ok((!token.is_empty()).then_some(token))
}

/// The authenticated principal of the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user_id = state.identity.resolve_current_user(token)?;
        Ok(CurrentUser(user_id))
    }
}
