use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

pub const PRINCIPAL_HEADER: &str = "X-Principal";

/// Authenticated identity of the caller, set by [`require_principal`].
#[derive(Debug, Clone)]
pub struct Principal(pub String);

pub async fn require_principal(mut request: Request<Body>, next: Next) -> Response {
    let principal = request
        .headers()
        .get(PRINCIPAL_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    let Some(principal) = principal else {
        return Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .body(Body::from("missing principal"))
            .unwrap_or_else(|_| Response::new(Body::from("missing principal")));
    };

    request.extensions_mut().insert(Principal(principal));
    next.run(request).await
}
