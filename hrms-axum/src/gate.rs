//! Session-token access gate.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::{self, Next},
    response::Response,
    Router,
};
use hrms_auth::{parse_authorization, AuthError, TokenCodec};
use hrms_core::{HrError, TenantContext};

use crate::ApiError;

/// Verify the bearer token and attach the caller's [`TenantContext`].
///
/// An absent or unparseable `Authorization` header, a bad signature and an
/// expired token all end the request with 401.
pub async fn access_gate(
    State(codec): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_authorization)
            .ok_or(AuthError::MissingToken)?;
        codec.verify(token)?
    };

    let ctx = claims.tenant_context();
    tracing::debug!(org_id = ctx.org_id(), user_id = ctx.user_id, "request authenticated");
    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

/// Put every route registered so far on `router` behind [`access_gate`].
pub fn protect(router: Router<()>, codec: Arc<TokenCodec>) -> Router<()> {
    router.route_layer(middleware::from_fn_with_state(codec, access_gate))
}

/// Extractor for the caller identity set by [`access_gate`].
#[derive(Debug, Clone)]
pub struct Tenant(pub TenantContext);

impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .map(Tenant)
            .ok_or_else(|| HrError::not_authenticated("No token provided").into())
    }
}
