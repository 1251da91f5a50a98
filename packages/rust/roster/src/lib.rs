//! Listing fetch: one bounded request against the collection endpoint.
//!
//! The roster is the first of the original 151 entities. One `GET
//! {endpoint}?limit=151` produces the ordered [`Reference`] sequence the
//! fan-out stage enriches. Any transport or decode failure aborts the whole
//! pipeline — a partial listing is never used.

mod decode;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use dexterm_shared::{DextermError, Reference, Result};

/// Size of the fetched roster. Fixed at compile time, not user-configurable.
pub const ROSTER_LIMIT: usize = 151;

/// Fetch the roster listing and return its ordered references.
#[instrument(skip_all, fields(endpoint = %endpoint))]
pub async fn fetch_roster(client: &Client, endpoint: &Url) -> Result<Vec<Reference>> {
    let response = client
        .get(endpoint.as_str())
        .query(&[("limit", ROSTER_LIMIT.to_string())])
        .send()
        .await
        .map_err(|e| DextermError::Network(format!("{endpoint}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DextermError::Network(format!("{endpoint}: HTTP {status}")));
    }

    let page: decode::RosterPage = response
        .json()
        .await
        .map_err(|e| DextermError::decode(format!("{endpoint}: {e}")))?;

    let references = decode::into_references(page)?;
    debug!(entries = references.len(), "roster listing fetched");

    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing_body(entries: &[(&str, &str)]) -> serde_json::Value {
        serde_json::json!({
            "count": entries.len(),
            "next": null,
            "previous": null,
            "results": entries
                .iter()
                .map(|(name, url)| serde_json::json!({"name": name, "url": url}))
                .collect::<Vec<_>>(),
        })
    }

    #[tokio::test]
    async fn fetches_ordered_references() {
        let server = MockServer::start().await;

        let body = listing_body(&[
            ("bulbasaur", &format!("{}/api/v2/pokemon/1/", server.uri())),
            ("ivysaur", &format!("{}/api/v2/pokemon/2/", server.uri())),
            ("venusaur", &format!("{}/api/v2/pokemon/3/", server.uri())),
        ]);

        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon"))
            .and(query_param("limit", "151"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = Client::new();
        let endpoint = Url::parse(&format!("{}/api/v2/pokemon", server.uri())).unwrap();
        let refs = fetch_roster(&client, &endpoint).await.unwrap();

        let names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["bulbasaur", "ivysaur", "venusaur"]);
    }

    #[tokio::test]
    async fn server_error_aborts_the_listing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = Client::new();
        let endpoint = Url::parse(&format!("{}/api/v2/pokemon", server.uri())).unwrap();
        let err = fetch_roster(&client, &endpoint).await.unwrap_err();

        assert!(matches!(err, DextermError::Network(_)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = Client::new();
        let endpoint = Url::parse(&format!("{}/api/v2/pokemon", server.uri())).unwrap();
        let err = fetch_roster(&client, &endpoint).await.unwrap_err();

        assert!(matches!(err, DextermError::Decode { .. }));
    }

    #[tokio::test]
    async fn empty_listing_yields_empty_roster() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/pokemon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing_body(&[])))
            .mount(&server)
            .await;

        let client = Client::new();
        let endpoint = Url::parse(&format!("{}/api/v2/pokemon", server.uri())).unwrap();
        let refs = fetch_roster(&client, &endpoint).await.unwrap();
        assert!(refs.is_empty());
    }
}
