//! Projection of (references, details) pairs into display records.

use dexterm_shared::{Detail, DisplayRecord, Reference};

/// Merge index-aligned references and details into display records.
///
/// Pure and side-effect-free. `out[i]` takes its name from `references[i]`
/// and its image from `details[i]`. No filtering, no deduplication, no
/// sorting — order is inherited from the listing response. Callers pass
/// slices of equal length (the fan-out guarantees alignment).
pub fn project(references: &[Reference], details: &[Detail]) -> Vec<DisplayRecord> {
    references
        .iter()
        .zip(details)
        .map(|(reference, detail)| DisplayRecord {
            name: reference.name.clone(),
            image: detail.image.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn reference(name: &str) -> Reference {
        Reference {
            name: name.into(),
            detail_url: Url::parse(&format!("https://api.example/v2/pokemon/{name}/")).unwrap(),
        }
    }

    #[test]
    fn merges_by_index() {
        let references = vec![reference("bulbasaur"), reference("ivysaur")];
        let details = vec![
            Detail {
                image: Some("img1.png".into()),
            },
            Detail { image: None },
        ];

        let records = project(&references, &details);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "bulbasaur");
        assert_eq!(records[0].image.as_deref(), Some("img1.png"));
        assert_eq!(records[1].name, "ivysaur");
        assert_eq!(records[1].image, None);
    }

    #[test]
    fn inherits_listing_order() {
        let references = vec![
            reference("charmander"),
            reference("bulbasaur"),
            reference("squirtle"),
        ];
        let details = vec![
            Detail { image: None },
            Detail { image: None },
            Detail { image: None },
        ];

        let names: Vec<String> = project(&references, &details)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["charmander", "bulbasaur", "squirtle"]);
    }

    #[test]
    fn empty_inputs_project_to_empty() {
        assert!(project(&[], &[]).is_empty());
    }
}
