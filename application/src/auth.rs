//! [`Principal`] extraction from bearer tokens.

use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use derive_more::Debug;
use serde::Deserialize;
use service::domain::user::{self, Principal};

use crate::{define_error, Error};

/// [JWT] decoding key the access tokens are verified with.
///
/// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
#[derive(Clone, Debug)]
pub struct JwtDecodingKey(#[debug(skip)] pub Arc<jsonwebtoken::DecodingKey>);

impl JwtDecodingKey {
    /// Creates a new [`JwtDecodingKey`] from the provided secret.
    #[must_use]
    pub fn from_secret(secret: &[u8]) -> Self {
        Self(Arc::new(jsonwebtoken::DecodingKey::from_secret(secret)))
    }
}

/// Claims carried by an access token.
#[derive(Clone, Copy, Debug, Deserialize)]
struct Claims {
    /// ID of the authenticated [`User`].
    ///
    /// [`User`]: service::domain::User
    sub: user::Id,

    /// [`user::Role`] of the authenticated [`User`].
    ///
    /// [`User`]: service::domain::User
    role: user::Role,

    /// Expiration timestamp of the token.
    #[expect(dead_code, reason = "validated by `jsonwebtoken`")]
    exp: u64,
}

/// Extractor of the authenticated [`Principal`].
///
/// The token is only *consumed* here: issuing and refreshing access tokens
/// is the identity provider's concern.
#[derive(Clone, Copy, Debug)]
pub struct Auth(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .extensions
            .get::<JwtDecodingKey>()
            .cloned()
            .ok_or_else(|| {
                Error::internal(&"missing `JwtDecodingKey` extension")
            })?;

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|e| {
                if e.is_missing() {
                    AuthError::AuthorizationRequired.into()
                } else {
                    Error::from(AuthError::InvalidAuthorizationToken)
                }
            })?;

        let claims = jsonwebtoken::decode::<Claims>(
            bearer.token(),
            &key.0,
            &jsonwebtoken::Validation::default(),
        )
        .map_err(|_| Error::from(AuthError::InvalidAuthorizationToken))?
        .claims;

        Ok(Self(Principal {
            id: claims.sub,
            role: claims.role,
        }))
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required"]
        AuthorizationRequired,

        #[code = "INVALID_AUTHORIZATION_TOKEN"]
        #[status = UNAUTHORIZED]
        #[message = "Invalid authorization token"]
        InvalidAuthorizationToken,
    }
}
