use thiserror::Error;
use tracing::{error, info, warn};

use crate::model::{AnswerEntry, JokeEntry, JokePayload};
use crate::store::JokeStore;

/// The joke API could not provide usable data.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("joke API request to `{url}` failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("joke API response from `{url}` is not a valid payload: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Build the `/joke` endpoint from the configured API base URL.
pub fn joke_endpoint(base_url: &str) -> String {
    format!("{}/joke", base_url.trim().trim_end_matches('/'))
}

/// Parse a `{ joke: [...], answer: [...] }` body.
pub fn parse_payload(body: &[u8]) -> Result<JokePayload, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Fetch both collections with a single GET. Entries come back exactly as
/// served: no sorting and no length check.
pub async fn fetch_all(
    client: &reqwest::Client,
    endpoint_url: &str,
) -> Result<(Vec<JokeEntry>, Vec<AnswerEntry>), DataUnavailable> {
    let http_error = |source| DataUnavailable::Http {
        url: endpoint_url.to_owned(),
        source,
    };

    let response = client
        .get(endpoint_url)
        .send()
        .await
        .map_err(http_error)?;
    info!(status = %response.status(), url = endpoint_url, "joke API responded");

    let body = response
        .error_for_status()
        .map_err(http_error)?
        .bytes()
        .await
        .map_err(http_error)?;

    let payload = parse_payload(&body).map_err(|source| DataUnavailable::Parse {
        url: endpoint_url.to_owned(),
        source,
    })?;

    Ok((payload.joke, payload.answer))
}

/// Fetch jokes into a fresh store, falling back to an empty store when the
/// API is unreachable or returns garbage.
pub async fn load_or_empty(client: &reqwest::Client, endpoint_url: &str) -> JokeStore {
    let mut store = JokeStore::new();

    match fetch_all(client, endpoint_url).await {
        Ok((jokes, answers)) => {
            info!(
                jokes = jokes.len(),
                answers = answers.len(),
                "joke data loaded"
            );
            if jokes.len() != answers.len() {
                warn!(
                    jokes = jokes.len(),
                    answers = answers.len(),
                    "joke and answer counts differ; only the shared prefix is used"
                );
            }
            store.load(jokes, answers);
        }
        Err(source) => {
            error!(?source, "failed to load joke data; continuing without jokes");
        }
    }

    if store.is_empty() {
        warn!("no joke data available from the API");
    }

    store
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::{DataUnavailable, fetch_all, joke_endpoint, load_or_empty, parse_payload};

    // Nothing listens on the discard port locally, so connects are refused.
    const UNREACHABLE: &str = "http://127.0.0.1:9/joke";

    /// Serve `response` verbatim to every connection and return the `/joke` URL.
    async fn serve_canned(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let response = response.clone();
                tokio::spawn(async move {
                    let mut request: Vec<u8> = Vec::new();
                    let mut buf = [0_u8; 1024];
                    while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                        match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(read) => request.extend_from_slice(&buf[..read]),
                        }
                    }
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        joke_endpoint(&format!("http://{addr}"))
    }

    fn http_response(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn endpoint_appends_joke_path() {
        assert_eq!(
            joke_endpoint("http://localhost:8080"),
            "http://localhost:8080/joke"
        );
        assert_eq!(
            joke_endpoint("http://localhost:8080/"),
            "http://localhost:8080/joke"
        );
        assert_eq!(
            joke_endpoint("  http://api.local/v1//  "),
            "http://api.local/v1/joke"
        );
    }

    #[test]
    fn parses_api_payload() {
        let body = br#"{
            "joke": [{ "id": 1, "joke": "Why did the chicken cross the road?" }],
            "answer": [{ "id": 1, "answer": "To get to the other side." }]
        }"#;

        let payload = parse_payload(body).expect("valid payload");
        assert_eq!(payload.joke.len(), 1);
        assert_eq!(payload.joke[0].id, 1);
        assert_eq!(payload.joke[0].text, "Why did the chicken cross the road?");
        assert_eq!(payload.answer[0].text, "To get to the other side.");
    }

    #[test]
    fn keeps_served_order_and_lengths() {
        let body = br#"{
            "joke": [{ "id": 2, "joke": "b" }, { "id": 1, "joke": "a" }],
            "answer": [{ "id": 7, "answer": "x" }],
            "extra": true
        }"#;

        let payload = parse_payload(body).expect("valid payload");
        let ids: Vec<i64> = payload.joke.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(payload.answer.len(), 1);
    }

    #[test]
    fn rejects_missing_fields() {
        assert!(parse_payload(br#"{ "joke": [] }"#).is_err());
        assert!(parse_payload(br#"{ "answer": [] }"#).is_err());
        assert!(parse_payload(br#"{ "joke": [{ "id": 1 }], "answer": [] }"#).is_err());
    }

    #[test]
    fn rejects_non_json() {
        assert!(parse_payload(b"<html>502 Bad Gateway</html>").is_err());
        assert!(parse_payload(b"").is_err());
    }

    #[tokio::test]
    async fn network_failure_is_data_unavailable() {
        let client = reqwest::Client::new();
        let err = fetch_all(&client, UNREACHABLE)
            .await
            .expect_err("nothing is listening");
        assert!(matches!(err, DataUnavailable::Http { .. }));
    }

    #[tokio::test]
    async fn network_failure_degrades_to_empty_store() {
        let client = reqwest::Client::new();
        let store = load_or_empty(&client, UNREACHABLE).await;
        assert!(store.is_empty());
        assert!(store.pick_random_pair().is_none());
    }

    #[tokio::test]
    async fn fetches_served_payload() {
        let body = r#"{"joke":[{"id":1,"joke":"q"}],"answer":[{"id":1,"answer":"a"}]}"#;
        let url = serve_canned(http_response("200 OK", "application/json", body)).await;

        let client = reqwest::Client::new();
        let (jokes, answers) = fetch_all(&client, &url).await.expect("valid response");
        assert_eq!(jokes[0].text, "q");
        assert_eq!(answers[0].text, "a");
    }

    #[tokio::test]
    async fn server_error_status_is_data_unavailable() {
        let body = r#"{"joke":[{"id":1,"joke":"q"}],"answer":[{"id":1,"answer":"a"}]}"#;
        let url = serve_canned(http_response(
            "500 Internal Server Error",
            "application/json",
            body,
        ))
        .await;

        let client = reqwest::Client::new();
        let err = fetch_all(&client, &url)
            .await
            .expect_err("500 is not usable data");
        assert!(matches!(err, DataUnavailable::Http { .. }), "{err}");
        assert!(load_or_empty(&client, &url).await.is_empty());
    }

    #[tokio::test]
    async fn html_body_is_data_unavailable() {
        let url = serve_canned(http_response(
            "200 OK",
            "text/html",
            "<html><body>maintenance</body></html>",
        ))
        .await;

        let client = reqwest::Client::new();
        let err = fetch_all(&client, &url)
            .await
            .expect_err("html is not a joke payload");
        assert!(matches!(err, DataUnavailable::Parse { .. }), "{err}");
        assert!(load_or_empty(&client, &url).await.is_empty());
    }
}
