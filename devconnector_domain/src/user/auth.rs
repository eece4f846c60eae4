use super::UserId;
use crate::error::{DcError, DcResult};
use crate::{GetConfig, System};

use axum_extra::TypedHeader;
use entrait::entrait_export as entrait;
use headers::authorization::Credentials;
use headers::Authorization;
use http::HeaderValue;
use jwt::VerifyWithKey;
use uuid::Uuid;

/// Header the browser client sends its session token in.
pub const X_AUTH_TOKEN: &str = "x-auth-token";

#[derive(serde::Serialize, serde::Deserialize)]
struct AuthUserClaims {
    user_id: Uuid,
    /// Standard JWT `exp` claim.
    exp: i64,
}

#[entrait(pub Authenticate, mock_api=AuthenticateMock)]
fn authenticate(deps: &(impl System + GetConfig), token: Token) -> DcResult<UserId> {
    let jwt = jwt::Token::<jwt::Header, AuthUserClaims, _>::parse_unverified(token.token())
        .map_err(|_| DcError::Unauthorized)?;

    let hmac = deps.get_jwt_signing_key();

    let jwt = jwt
        .verify_with_key(hmac)
        .map_err(|_| DcError::Unauthorized)?;
    let (_header, claims) = jwt.into();

    if claims.exp < deps.get_current_time().unix_timestamp() {
        return Err(DcError::Unauthorized);
    }

    Ok(UserId(claims.user_id))
}

///
/// A session token, taken either from `x-auth-token`
/// or from the `Token` authorization scheme.
///
#[derive(Debug)]
pub struct Token(String);

impl Token {
    pub fn from_token(token: &str) -> Self {
        Self(token.to_string())
    }

    pub fn token(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.token()
    }
}

impl Credentials for Token {
    const SCHEME: &'static str = "Token";

    fn decode(value: &HeaderValue) -> Option<Self> {
        let auth_header = value.to_str().ok()?;
        let token = auth_header.get(Self::SCHEME.len()..)?.trim_start();

        Some(Token(token.to_string()))
    }

    fn encode(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("{} {}", Self::SCHEME, self.0)).unwrap()
    }
}

#[async_trait::async_trait]
impl<S> axum::extract::FromRequestParts<S> for Token
where
    S: Send + Sync,
{
    type Rejection = DcError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        if let Some(value) = parts.headers.get(X_AUTH_TOKEN) {
            let token = value.to_str().map_err(|_| DcError::Unauthorized)?;
            return Ok(Token::from_token(token));
        }

        let TypedHeader(Authorization(token)) =
            TypedHeader::<Authorization<Token>>::from_request_parts(parts, state)
                .await
                .map_err(|_| DcError::Unauthorized)?;

        Ok(token)
    }
}
