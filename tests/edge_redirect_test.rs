//! エッジリダイレクトの結合テスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use dashboard_i18n::EdgeRedirect;
use dashboard_i18n::config::EdgeConfig;
use dashboard_i18n::edge::{
    FilterDecision,
    filter,
};
use dashboard_i18n::routing::{
    has_locale_prefix,
    path_without_locale,
};
use googletest::prelude::*;
use http::header::{
    ACCEPT_LANGUAGE,
    LOCATION,
};
use http::{
    Request,
    StatusCode,
};
use rstest::{
    fixture,
    rstest,
};

#[fixture]
fn edge() -> EdgeRedirect {
    EdgeRedirect::new(&EdgeConfig::default()).unwrap()
}

fn location(edge: &EdgeRedirect, uri: &str, accept_language: Option<&str>) -> Option<String> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = accept_language {
        builder = builder.header(ACCEPT_LANGUAGE, value);
    }
    let response = edge.handle(&builder.body(()).unwrap()).unwrap()?;

    assert_eq!(response.status(), StatusCode::FOUND);
    response.headers().get(LOCATION).and_then(|v| v.to_str().ok()).map(String::from)
}

#[rstest]
#[case::portuguese_browser("/dashboard", Some("pt-BR,en;q=0.8"), Some("/pt/dashboard"))]
#[case::weighted_portuguese("/dashboard", Some("en;q=0.3, pt;q=0.9"), Some("/pt/dashboard"))]
#[case::prefixed_passes("/en/dashboard", Some("pt-BR"), None)]
#[case::root_without_header("/", None, Some("/en"))]
#[case::root_unsupported("/", Some("ja-JP, fr;q=0.5"), Some("/en"))]
#[case::with_query("/dashboard?month=jun", Some("pt"), Some("/pt/dashboard?month=jun"))]
#[case::next_internals("/_next/data/build/index.json", None, None)]
fn redirect_locations(
    edge: EdgeRedirect,
    #[case] uri: &str,
    #[case] accept_language: Option<&str>,
    #[case] expected: Option<&str>,
) {
    assert_that!(location(&edge, uri, accept_language).as_deref(), eq(expected));
}

#[rstest]
#[case("/dashboard", Some("pt-BR"))]
#[case("/", None)]
#[case("/settings/profile", Some("en-US,en;q=0.9"))]
fn redirect_target_is_prefixed_and_keeps_path(
    #[case] path: &str,
    #[case] accept_language: Option<&str>,
) {
    let FilterDecision::RedirectTo(target) = filter(path, accept_language) else {
        panic!("expected a redirect for {path}");
    };

    assert!(has_locale_prefix(&target));
    assert_eq!(path_without_locale(&target), path);
    // 二度目はリダイレクトされない
    assert_eq!(filter(&target, accept_language), FilterDecision::PassThrough);
}
