use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Ensures every request and its response carry an `x-request-id`.
///
/// A caller-supplied id is kept as long as it is a valid header value;
/// otherwise a fresh UUID v4 is generated.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let header_value = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|h| !h.is_empty())
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok());

    let Some(header_value) = header_value else {
        return next.run(req).await;
    };

    req.headers_mut()
        .insert(REQUEST_ID_HEADER, header_value.clone());

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER, header_value);

    response
}
