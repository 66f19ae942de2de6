use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;

type Rejection = (StatusCode, Json<ApiResponse<()>>);

/// Verifies the caller and stores the `AuthUser` in request extensions so
/// handlers can take `Extension<AuthUser>`.
async fn extract_and_insert_authuser(req: Request<Body>) -> Result<Request<Body>, Rejection> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|(status, message)| (status, Json(ApiResponse::error(message))))?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);
    Ok(req)
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(req: Request<Body>, next: Next) -> Result<Response, Rejection> {
    let req = extract_and_insert_authuser(req).await?;
    Ok(next.run(req).await)
}
