//! Route handlers for the HTTP integration.
//!
//! # Responsibilities
//! - Define the boxed handler type stored in the route table
//! - Expose bound path parameters to handlers via request extensions
//! - Build handlers and a route table from `[[routes]]` config entries

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;

use crate::config::RouteConfig;
use crate::routing::{Params, RouteError, Router};

/// Handler stored in the route table. Cheap to clone.
pub type BoxHandler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Box an async function as a route handler.
///
/// ```
/// use urlrouter::http::handler::{handler_fn, params};
///
/// let hello = handler_fn(|req| async move {
///     let name = params(&req).and_then(|p| p.get("name")).unwrap_or("world");
///     format!("hello {name}")
/// });
/// # let _ = hello;
/// ```
pub fn handler_fn<F, Fut, R>(f: F) -> BoxHandler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + 'static,
{
    Arc::new(move |request: Request| -> BoxFuture<'static, Response> {
        let fut = f(request);
        Box::pin(async move { fut.await.into_response() })
    })
}

/// Path parameters bound while matching this request.
///
/// `None` when the matched route had no named segments.
pub fn params<B>(request: &axum::http::Request<B>) -> Option<&Params> {
    request.extensions().get::<Params>()
}

/// Build a handler answering with the static response described by `route`.
///
/// Returns `None` if the configured status code is not a valid HTTP status.
pub fn static_response(route: &RouteConfig) -> Option<BoxHandler> {
    let status = StatusCode::from_u16(route.status).ok()?;
    let content_type = route
        .content_type
        .as_deref()
        .and_then(|ct| HeaderValue::from_str(ct).ok());
    let template: Arc<str> = Arc::from(route.body.as_str());

    Some(handler_fn(move |request: Request| {
        let body = match params(&request) {
            Some(params) => render_body(&template, params),
            None => template.to_string(),
        };
        let content_type = content_type.clone();
        async move {
            let mut response = Response::new(Body::from(body));
            *response.status_mut() = status;
            if let Some(ct) = content_type {
                response.headers_mut().insert(header::CONTENT_TYPE, ct);
            }
            response
        }
    }))
}

/// Replace `{name}` placeholders in `template` with bound parameter values.
///
/// The template is scanned once; substituted values are copied verbatim and
/// never expanded again. Placeholders naming unbound parameters are kept.
pub fn render_body(template: &str, params: &Params) -> String {
    let mut body = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        body.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let bound = after
            .find('}')
            .and_then(|close| params.get(&after[..close]).map(|value| (close, value)));
        match bound {
            Some((close, value)) => {
                body.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                body.push('{');
                rest = after;
            }
        }
    }

    body.push_str(rest);
    body
}

/// Build a route table from config entries, in order.
///
/// Later entries for the same `(method, pattern)` replace earlier ones.
pub fn build_router(routes: &[RouteConfig]) -> Result<Router<BoxHandler>, RouteError> {
    let mut router = Router::new();
    for route in routes {
        router.handle(&route.method, &route.pattern, static_response(route))?;
        tracing::debug!(route = %route.display_name(), status = route.status, "Config route loaded");
    }
    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ParamBinder;

    #[test]
    fn test_render_body() {
        let mut params = Params::new();
        params.bind("id", "42");
        params.bind("name", "alice");

        assert_eq!(render_body("user {id} is {name}", &params), "user 42 is alice");
        assert_eq!(render_body("no placeholders", &params), "no placeholders");
        assert_eq!(render_body("{missing}", &params), "{missing}");
        assert_eq!(render_body("{{id}}", &params), "{42}");
        assert_eq!(render_body("unclosed {id", &params), "unclosed {id");
    }

    #[test]
    fn test_render_body_does_not_substitute_values() {
        let mut params = Params::new();
        params.bind("id", "{name}");
        params.bind("name", "alice");
        assert_eq!(render_body("user {id}", &params), "user {name}");
        assert_eq!(render_body("{name} {id}", &params), "alice {name}");

        let mut reversed = Params::new();
        reversed.bind("name", "alice");
        reversed.bind("id", "{name}");
        assert_eq!(render_body("user {id}", &reversed), "user {name}");
    }

    #[test]
    fn test_static_response_rejects_bad_status() {
        let mut route = RouteConfig::new("GET", "/", "x");
        route.status = 42;
        assert!(static_response(&route).is_none());
    }

    #[test]
    fn test_build_router_invalid_handler() {
        let mut route = RouteConfig::new("GET", "/broken", "x");
        route.status = 42;
        let err = build_router(&[RouteConfig::new("GET", "/ok", "ok"), route]).unwrap_err();
        assert!(matches!(err, RouteError::InvalidHandler { .. }));
    }

    #[test]
    fn test_build_router_invalid_pattern() {
        let err = build_router(&[RouteConfig::new("GET", "", "x")]).unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
    }

    #[tokio::test]
    async fn test_static_response_with_params() {
        let mut route = RouteConfig::new("GET", "/users/:id", "user {id}");
        route.status = 201;
        route.content_type = Some("text/plain".to_string());
        let handler = static_response(&route).unwrap();

        let mut bound = Params::new();
        bound.bind("id", "7");
        let mut request = Request::new(Body::empty());
        request.extensions_mut().insert(bound);

        let response = handler(request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"user 7");
    }
}
