//! CORS for one allowed origin, with credentials.
//!
//! Every method and every request header is allowed. A preflight gets back
//! exactly the headers it asked for, so the allowed origin can send custom
//! headers without a fixed list here.

use warp::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
    ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN, VARY,
};
use warp::http::{Method, StatusCode};
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";

/// Seconds a browser may cache a preflight answer
const PREFLIGHT_MAX_AGE: &str = "600";

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origin: String,
}

impl CorsPolicy {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }

    pub fn allows(&self, origin: &HeaderValue) -> bool {
        origin.as_bytes() == self.allowed_origin.as_bytes()
    }

    /// Answer an `OPTIONS` preflight, or `None` when the request is not one
    /// (no `Origin` or no `Access-Control-Request-Method`).
    pub fn preflight(&self, method: &Method, request_headers: &HeaderMap) -> Option<Response> {
        if method != Method::OPTIONS || !request_headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD)
        {
            return None;
        }
        let origin = request_headers.get(ORIGIN)?;

        if !self.allows(origin) {
            let mut response =
                warp::reply::with_status("Disallowed CORS origin", StatusCode::BAD_REQUEST)
                    .into_response();
            response
                .headers_mut()
                .insert(VARY, HeaderValue::from_static("Origin"));
            return Some(response);
        }

        let mut response = warp::reply().into_response();
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        if let Some(requested) = request_headers.get(ACCESS_CONTROL_REQUEST_HEADERS) {
            headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
        }
        headers.insert(
            ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(PREFLIGHT_MAX_AGE),
        );
        headers.insert(VARY, HeaderValue::from_static("Origin"));
        Some(response)
    }

    /// Add the allow headers to an ordinary response when the request came
    /// from the allowed origin. Other origins get the response untouched.
    pub fn decorate(&self, request_headers: &HeaderMap, reply: impl Reply) -> Response {
        let mut response = reply.into_response();
        if let Some(origin) = request_headers.get(ORIGIN).filter(|o| self.allows(o)) {
            let headers = response.headers_mut();
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
            headers.insert(
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
            headers.append(VARY, HeaderValue::from_static("Origin"));
        }
        response
    }
}

/// Short-circuits preflights on any path. Everything else is rejected as not
/// found so the routes behind it decide.
pub fn preflight(policy: CorsPolicy) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::method()
        .and(warp::header::headers_cloned())
        .and_then(move |method: Method, headers: HeaderMap| {
            let answer = policy.preflight(&method, &headers);
            async move { answer.ok_or_else(warp::reject::not_found) }
        })
}
