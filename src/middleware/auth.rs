use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Claims, Role};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from the bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }
}

/// Validates the bearer token and injects `AuthUser` into the request
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers)?;
    let claims = state.auth.tokens().verify(token)?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Must run after `require_auth`
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    require_role(Role::Admin, request, next).await
}

async fn require_role(required: Role, request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::forbidden("Role information missing"))?;

    if user.role != required {
        tracing::warn!(
            "User {} with role {} denied access to {} {}",
            user.user_id,
            user.role,
            request.method(),
            request.uri().path()
        );
        return Err(AuthError::InsufficientRole.into());
    }

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers_with("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_distinct() {
        assert!(matches!(extract_bearer(&HeaderMap::new()), Err(AuthError::MissingHeader)));
    }

    #[test]
    fn rejects_other_schemes_and_shapes() {
        for value in ["Basic abc", "Bearer", "Bearer ", "bearer abc", "Bearer a b", "abc"] {
            assert!(
                matches!(extract_bearer(&headers_with(value)), Err(AuthError::MalformedHeader)),
                "accepted {:?}",
                value
            );
        }
    }
}
