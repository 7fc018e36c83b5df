use crate::{error::Result, AppState};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::sync::Arc;

/// Bytes escaped in a `Location` value. Reserved URL characters and existing
/// `%XX` escapes pass through unchanged; non-ASCII is always escaped.
const LOCATION: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// GET /:short_id
///
/// 302 to the stored URL, or 404 `{"error": "Short URL not found"}`.
/// `Redirect::to` would answer 303, so the response is built by hand.
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    Path(short_id): Path<String>,
) -> Result<Response> {
    let long_url = state.store.resolve(&short_id)?;
    let location = encode_location(&long_url);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Percent-encode `url` for use as a header value. A `%` that doesn't start
/// a valid escape becomes `%25`.
fn encode_location(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut rest = url;

    while let Some(pos) = rest.find('%') {
        out.extend(utf8_percent_encode(&rest[..pos], LOCATION));
        let tail = &rest[pos + 1..];
        let escaped = tail
            .as_bytes()
            .get(..2)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        out.push_str(if escaped { "%" } else { "%25" });
        rest = tail;
    }

    out.extend(utf8_percent_encode(rest, LOCATION));
    out
}

#[cfg(test)]
mod tests {
    use super::encode_location;
    use super::super::test_support::*;
    use crate::{generator::RandomIdGenerator, store::LinkStore};
    use axum::http::{header, StatusCode};
    use std::sync::Arc;

    #[tokio::test]
    async fn shorten_then_follow() {
        let router = router();
        let created = send(
            &router,
            post_json(
                "/shorten",
                r#"{"longUrl": "https://www.usatoday.com/story/travel/2022/02/10/amtrak-deal/"}"#,
            ),
        )
        .await;
        let id = json(created).await["shortUrl"].as_str().unwrap().to_owned();

        let response = send(&router, get(&format!("/{id}"))).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://www.usatoday.com/story/travel/2022/02/10/amtrak-deal/"
        );
    }

    #[tokio::test]
    async fn repeated_lookups_are_stable() {
        let store = LinkStore::new(Arc::new(RandomIdGenerator::default()));
        let id = store.create("https://example.com/a").unwrap();
        let router = router_with_store(store);

        for _ in 0..3 {
            let response = send(&router, get(&format!("/{id}"))).await;
            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(response.headers()[header::LOCATION], "https://example.com/a");
        }
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let response = send(&router(), get("/doesNotExist")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await["error"], "Short URL not found");
    }

    #[tokio::test]
    async fn root_is_not_found() {
        let response = send(&router(), get("/")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await["error"], "Short URL not found");
    }

    #[test]
    fn plain_urls_are_untouched() {
        let url = "https://example.com/a/b?q=1&r=a+b#frag";
        assert_eq!(encode_location(url), url);
    }

    #[test]
    fn unsafe_characters_are_escaped() {
        assert_eq!(
            encode_location("https://example.com/a b/\"<x>\""),
            "https://example.com/a%20b/%22%3Cx%3E%22"
        );
        assert_eq!(
            encode_location("https://example.com/caf\u{e9}"),
            "https://example.com/caf%C3%A9"
        );
    }

    #[test]
    fn existing_escapes_are_kept() {
        assert_eq!(
            encode_location("https://example.com/a%20b?p=100%"),
            "https://example.com/a%20b?p=100%25"
        );
        assert_eq!(encode_location("%zz%4"), "%25zz%254");
    }

    #[tokio::test]
    async fn location_header_is_encoded() {
        let store = LinkStore::new(Arc::new(RandomIdGenerator::default()));
        let id = store.create("https://example.com/caf\u{e9} menu").unwrap();
        let router = router_with_store(store);

        let response = send(&router, get(&format!("/{id}"))).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/caf%C3%A9%20menu"
        );
    }
}
