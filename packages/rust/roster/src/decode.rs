//! Wire format of the collection endpoint.
//!
//! The listing response is a paginated envelope; only `results` matters here:
//! `{ "results": [ { "name": "...", "url": "..." }, ... ] }`. Unknown fields
//! (`count`, `next`, `previous`) are ignored.

use serde::Deserialize;
use url::Url;

use dexterm_shared::{DextermError, Reference, Result};

/// The listing response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct RosterPage {
    /// Ordered roster entries.
    pub results: Vec<RosterEntry>,
}

/// One entry of the listing response.
#[derive(Debug, Deserialize)]
pub(crate) struct RosterEntry {
    /// Entity name.
    pub name: String,
    /// Detail record locator, as sent by the API.
    pub url: String,
}

/// Convert a decoded listing page into ordered [`Reference`]s.
///
/// An unparsable locator aborts the whole listing — no partial roster is
/// ever produced.
pub(crate) fn into_references(page: RosterPage) -> Result<Vec<Reference>> {
    page.results
        .into_iter()
        .map(|entry| {
            let detail_url = Url::parse(&entry.url).map_err(|e| {
                DextermError::decode(format!("bad detail locator '{}': {e}", entry.url))
            })?;
            Ok(Reference {
                name: entry.name,
                detail_url,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_listing_envelope() {
        let json = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=151&limit=151",
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;

        let page: RosterPage = serde_json::from_str(json).expect("decode");
        let refs = into_references(page).expect("convert");

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].name, "bulbasaur");
        assert_eq!(refs[1].name, "ivysaur");
        assert_eq!(refs[0].detail_url.path(), "/api/v2/pokemon/1/");
    }

    #[test]
    fn preserves_listing_order() {
        let json = r#"{"results": [
            {"name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon/4/"},
            {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
            {"name": "squirtle", "url": "https://pokeapi.co/api/v2/pokemon/7/"}
        ]}"#;

        let page: RosterPage = serde_json::from_str(json).expect("decode");
        let refs = into_references(page).expect("convert");
        let names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["charmander", "bulbasaur", "squirtle"]);
    }

    #[test]
    fn bad_locator_fails_the_listing() {
        let json = r#"{"results": [
            {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
            {"name": "missingno", "url": "not a url"}
        ]}"#;

        let page: RosterPage = serde_json::from_str(json).expect("decode");
        let err = into_references(page).expect_err("bad locator");
        assert!(err.to_string().contains("bad detail locator"));
    }

    #[test]
    fn missing_results_is_a_decode_error() {
        let json = r#"{"count": 0}"#;
        assert!(serde_json::from_str::<RosterPage>(json).is_err());
    }
}
