//! [`filter`] applied to `http` requests.

use http::header::{
    ACCEPT_LANGUAGE,
    LOCATION,
};
use http::{
    HeaderMap,
    Request,
    Response,
    StatusCode,
    Uri,
};

use super::filter::{
    FilterDecision,
    filter,
};
use crate::config::{
    EdgeConfig,
    MatcherError,
    PathMatcher,
};

/// Redirect middleware for locale-less requests.
#[derive(Debug, Clone)]
pub struct EdgeRedirect {
    matcher: PathMatcher,
    preserve_query: bool,
}

impl EdgeRedirect {
    /// # Errors
    /// Returns error if an exclude pattern is not a valid glob.
    pub fn new(config: &EdgeConfig) -> Result<Self, MatcherError> {
        Ok(Self { matcher: PathMatcher::new(config)?, preserve_query: config.preserve_query })
    }

    /// Decision for a request target. Excluded paths always pass through.
    #[must_use]
    pub fn decide(&self, uri: &Uri, headers: &HeaderMap) -> FilterDecision {
        let path = uri.path();
        if self.matcher.is_excluded(path) {
            tracing::trace!(path, "Excluded from locale redirect");
            return FilterDecision::PassThrough;
        }

        // 不正な（非 ASCII の）ヘッダー値はヘッダーなしとして扱う
        let accept_language = headers.get(ACCEPT_LANGUAGE).and_then(|value| value.to_str().ok());

        match filter(path, accept_language) {
            FilterDecision::RedirectTo(target) => {
                let target = match uri.query() {
                    Some(query) if self.preserve_query => format!("{target}?{query}"),
                    _ => target,
                };
                tracing::debug!(path, %target, "Redirecting to localized path");
                FilterDecision::RedirectTo(target)
            }
            FilterDecision::PassThrough => FilterDecision::PassThrough,
        }
    }

    /// Builds the `302 Found` response for requests that need one.
    ///
    /// `Ok(None)` means the request should continue to the application.
    ///
    /// # Errors
    /// Returns error if the target cannot be used as a `Location` header.
    pub fn handle<B>(&self, request: &Request<B>) -> Result<Option<Response<()>>, http::Error> {
        match self.decide(request.uri(), request.headers()) {
            FilterDecision::PassThrough => Ok(None),
            FilterDecision::RedirectTo(target) => Response::builder()
                .status(StatusCode::FOUND)
                .header(LOCATION, target)
                .body(())
                .map(Some),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn redirect() -> EdgeRedirect {
        EdgeRedirect::new(&EdgeConfig::default()).unwrap()
    }

    fn request(uri: &str, accept_language: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = accept_language {
            builder = builder.header(ACCEPT_LANGUAGE, value);
        }
        builder.body(()).unwrap()
    }

    #[rstest]
    fn redirects_with_found_and_location(redirect: EdgeRedirect) {
        let response = redirect.handle(&request("/dashboard", Some("pt-BR,en;q=0.8"))).unwrap();

        let response = response.unwrap();
        assert_that!(response.status(), eq(StatusCode::FOUND));
        assert_that!(
            response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            some(eq("/pt/dashboard"))
        );
    }

    #[rstest]
    #[case::prefixed("/en/dashboard")]
    #[case::next_asset("/_next/static/chunks/app.js")]
    #[case::api("/api/transactions")]
    #[case::favicon("/favicon.ico")]
    #[case::image("/images/hero.png")]
    fn passes_through(redirect: EdgeRedirect, #[case] uri: &str) {
        let response = redirect.handle(&request(uri, Some("pt"))).unwrap();

        assert_that!(response, none());
    }

    #[rstest]
    fn keeps_query_string(redirect: EdgeRedirect) {
        let decision = redirect.decide(&"/dashboard?range=6m".parse().unwrap(), &HeaderMap::new());

        assert_that!(decision, eq(&FilterDecision::RedirectTo("/en/dashboard?range=6m".to_string())));
    }

    #[rstest]
    fn drops_query_string_when_configured() {
        let config = EdgeConfig { preserve_query: false, ..EdgeConfig::default() };
        let redirect = EdgeRedirect::new(&config).unwrap();

        let decision = redirect.decide(&"/?x=1".parse().unwrap(), &HeaderMap::new());

        assert_that!(decision, eq(&FilterDecision::RedirectTo("/en".to_string())));
    }

    #[rstest]
    fn invalid_header_value_falls_back_to_default(redirect: EdgeRedirect) {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, http::HeaderValue::from_bytes(b"pt\xff").unwrap());

        let decision = redirect.decide(&"/".parse().unwrap(), &headers);

        assert_that!(decision, eq(&FilterDecision::RedirectTo("/en".to_string())));
    }

    #[rstest]
    fn new_rejects_invalid_pattern() {
        let config = EdgeConfig { exclude_patterns: vec!["[".to_string()], ..EdgeConfig::default() };

        assert_that!(EdgeRedirect::new(&config), err(anything()));
    }
}
