//! Selector resolution use case.
//!
//! Turns a [`SelectorSpec`] into zero, one, or many matching records.
//! Strictly read-only: resolution is invoked by, but never performs, writes.

use crate::ports::asset_store::{AssetStore, StoreError};
use std::sync::Arc;
use tracing::debug;
use waypost_domain::{AssetId, AssetRecord, AssetType, SelectBy, SelectorSpec, fields,
    searchable_fields};

/// Resolves selectors against the asset store.
#[derive(Clone)]
pub struct SelectorResolver {
    store: Arc<dyn AssetStore>,
}

impl SelectorResolver {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self { store }
    }

    /// Resolve a selector. When the spec names no type, all known types are
    /// searched and the results concatenated in type order; `limit` truncates
    /// the combined list (an acceptance policy, not a scan bound).
    pub async fn resolve(&self, spec: &SelectorSpec) -> Result<Vec<AssetRecord>, StoreError> {
        let mut matches = Vec::new();
        for asset_type in spec.target_types() {
            matches.extend(self.resolve_for_type(asset_type, spec).await?);
        }
        if let Some(limit) = spec.limit {
            matches.truncate(limit);
        }
        debug!(
            by = spec.by.as_str(),
            value = %spec.value,
            count = matches.len(),
            "selector resolved"
        );
        Ok(matches)
    }

    async fn resolve_for_type(
        &self,
        asset_type: AssetType,
        spec: &SelectorSpec,
    ) -> Result<Vec<AssetRecord>, StoreError> {
        match spec.by {
            SelectBy::Id => {
                // An unparseable identifier is zero matches, not an error.
                match AssetId::parse(&spec.value) {
                    Some(id) => Ok(self
                        .store
                        .find_by_id(asset_type, &id)
                        .await?
                        .into_iter()
                        .collect()),
                    None => Ok(Vec::new()),
                }
            }
            SelectBy::Name => {
                self.store
                    .find_by_exact(asset_type, fields::NAME, &spec.value)
                    .await
            }
            SelectBy::QrTagId => {
                self.store
                    .find_by_exact(asset_type, fields::QR_TAG_ID, &spec.value)
                    .await
            }
            SelectBy::NameContains => {
                let needle = spec.value.to_lowercase();
                let all = self.store.find_all(asset_type).await?;
                Ok(all
                    .into_iter()
                    .filter(|r| {
                        r.name()
                            .is_some_and(|n| n.to_lowercase().contains(&needle))
                    })
                    .collect())
            }
            SelectBy::Search => {
                let needle = spec.value.to_lowercase();
                let all = self.store.find_all(asset_type).await?;
                if needle.is_empty() {
                    return Ok(all);
                }
                Ok(all
                    .into_iter()
                    .filter(|r| {
                        searchable_fields(asset_type).iter().any(|field| {
                            r.search_text(field)
                                .is_some_and(|text| text.to_lowercase().contains(&needle))
                        })
                    })
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeStore;
    use serde_json::json;
    use waypost_domain::FieldMap;

    fn road(name: &str, extra: &[(&str, serde_json::Value)]) -> FieldMap {
        let mut fields: FieldMap = extra
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        fields.insert("name".into(), json!(name));
        fields
    }

    async fn seeded() -> (Arc<FakeStore>, SelectorResolver) {
        let store = Arc::new(FakeStore::new());
        store
            .seed(
                AssetType::Road,
                road("Main Street East", &[("qrTagId", json!("ROA-101")), ("lanes", json!(4))]),
            )
            .await;
        store
            .seed(
                AssetType::Road,
                road("Main Street West", &[("condition", json!("fair"))]),
            )
            .await;
        store
            .seed(AssetType::Road, road("Cedar Lane", &[("speedLimit", json!(30))]))
            .await;
        store
            .seed(
                AssetType::Vehicle,
                road("Grader 7", &[("qrTagId", json!("VEH-201")), ("mileage", json!(48210))]),
            )
            .await;
        let resolver = SelectorResolver::new(store.clone());
        (store, resolver)
    }

    #[tokio::test]
    async fn exact_name_match() {
        let (_, resolver) = seeded().await;
        let spec = SelectorSpec::new(SelectBy::Name, "Cedar Lane").with_type(AssetType::Road);
        let matches = resolver.resolve(&spec).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name(), Some("Cedar Lane"));
    }

    #[tokio::test]
    async fn name_contains_is_case_insensitive() {
        let (_, resolver) = seeded().await;
        let spec =
            SelectorSpec::new(SelectBy::NameContains, "main street").with_type(AssetType::Road);
        let matches = resolver.resolve(&spec).await.unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn invalid_id_is_zero_matches() {
        let (_, resolver) = seeded().await;
        let spec = SelectorSpec::new(SelectBy::Id, "definitely-not-hex");
        assert!(resolver.resolve(&spec).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn id_lookup_round_trip() {
        let (store, resolver) = seeded().await;
        let id = store
            .seed(AssetType::Road, road("Elm Street", &[]))
            .await;
        let spec = SelectorSpec::new(SelectBy::Id, id.as_str());
        let matches = resolver.resolve(&spec).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, id);
    }

    #[tokio::test]
    async fn qr_tag_lookup() {
        let (_, resolver) = seeded().await;
        let spec = SelectorSpec::new(SelectBy::QrTagId, "VEH-201");
        let matches = resolver.resolve(&spec).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].asset_type, AssetType::Vehicle);
    }

    #[tokio::test]
    async fn search_covers_stringified_numbers() {
        let (_, resolver) = seeded().await;
        let spec = SelectorSpec::new(SelectBy::Search, "48210");
        let matches = resolver.resolve(&spec).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name(), Some("Grader 7"));
    }

    #[tokio::test]
    async fn empty_search_matches_everything_of_type() {
        let (_, resolver) = seeded().await;
        let spec = SelectorSpec::new(SelectBy::Search, "").with_type(AssetType::Road);
        assert_eq!(resolver.resolve(&spec).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn omitted_type_concatenates_across_types() {
        let (_, resolver) = seeded().await;
        let spec = SelectorSpec::new(SelectBy::Search, "");
        let matches = resolver.resolve(&spec).await.unwrap();
        assert_eq!(matches.len(), 4);
        // Roads first, vehicles after.
        assert_eq!(matches[0].asset_type, AssetType::Road);
        assert_eq!(matches[3].asset_type, AssetType::Vehicle);
    }

    #[tokio::test]
    async fn limit_truncates_after_concatenation() {
        let (_, resolver) = seeded().await;
        let spec = SelectorSpec::new(SelectBy::Search, "").with_limit(2);
        let matches = resolver.resolve(&spec).await.unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|r| r.asset_type == AssetType::Road));
    }
}
