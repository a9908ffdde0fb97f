//! Context accumulation.
//!
//! Gathers the per-request inputs a stage prompt needs: capability records
//! fetched by reference path and remote file contents fetched by URL. Both
//! fan out concurrently and reassemble in input order. Capability lookups are
//! partial-failure tolerant (a missing record is skipped with a warning);
//! file fetches substitute a fixed fallback string on any failure.

use futures::future::join_all;

use crate::fetch::{decode_envelope, ContentFetcher, FetchError, CONTENT_FALLBACK};
use crate::models::CapabilityFields;
use crate::store::{CapabilityStore, StoreError};

/// Separator between concatenated multi-file contents.
pub const FILE_SEPARATOR: &str = "\n\n---\n\n";

/// Fetch every capability record concurrently and accumulate the surviving
/// records' fields into index-aligned sequences.
///
/// A path that resolves to no record contributes nothing; the sequences stay
/// ordered relative to the surviving inputs. A store failure aborts the
/// whole request.
pub async fn gather_capabilities(
    store: &dyn CapabilityStore,
    refs: &[String],
) -> Result<CapabilityFields, StoreError> {
    let lookups = join_all(refs.iter().map(|path| store.get(path))).await;

    let mut fields = CapabilityFields::default();
    for (path, lookup) in refs.iter().zip(lookups) {
        match lookup? {
            Some(cap) => fields.push(cap),
            None => tracing::warn!("no capability record found for path: {}", path),
        }
    }
    Ok(fields)
}

/// Fetch every suggested file's content concurrently, decode each envelope,
/// and join the results with [`FILE_SEPARATOR`] in input order.
///
/// Transport failures degrade to the same fallback string as malformed
/// envelopes; one unreachable URL never fails the request.
pub async fn gather_file_contents(fetcher: &dyn ContentFetcher, urls: &[String]) -> String {
    let bodies = join_all(urls.iter().map(|url| fetcher.fetch(url))).await;

    let contents: Vec<String> = urls
        .iter()
        .zip(bodies)
        .map(|(url, body)| match body {
            Ok(text) => decode_envelope(&text),
            Err(FetchError::Http(e)) => {
                tracing::warn!("failed to fetch {}: {}", url, e);
                CONTENT_FALLBACK.to_string()
            }
        })
        .collect();

    contents.join(FILE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use std::collections::HashMap;

    use crate::models::Capability;
    use crate::store::MemoryCapabilityStore;

    struct MapFetcher {
        bodies: HashMap<String, String>,
    }

    #[async_trait]
    impl ContentFetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            Ok(self.bodies.get(url).cloned().unwrap_or_default())
        }
    }

    fn envelope(content: &str) -> String {
        serde_json::json!({
            "content": STANDARD.encode(content),
            "encoding": "base64",
        })
        .to_string()
    }

    fn capability(name: &str) -> Capability {
        serde_json::from_value(serde_json::json!({ "name": name })).unwrap()
    }

    #[tokio::test]
    async fn missing_capability_is_skipped_order_preserving() {
        let store = MemoryCapabilityStore::new();
        store.insert("caps/a", capability("a"));
        store.insert("caps/c", capability("c"));

        let refs = vec![
            "caps/a".to_string(),
            "caps/missing".to_string(),
            "caps/c".to_string(),
        ];
        let fields = gather_capabilities(&store, &refs).await.unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.names, vec!["a", "c"]);
        assert_eq!(fields.end_points.len(), 2);
    }

    #[tokio::test]
    async fn empty_refs_yield_empty_fields() {
        let store = MemoryCapabilityStore::new();
        let fields = gather_capabilities(&store, &[]).await.unwrap();
        assert!(fields.is_empty());
    }

    #[tokio::test]
    async fn file_contents_join_with_separator_in_input_order() {
        let mut bodies = HashMap::new();
        bodies.insert("http://x/one".to_string(), envelope("first"));
        bodies.insert("http://x/two".to_string(), envelope("second"));
        let fetcher = MapFetcher { bodies };

        let urls = vec!["http://x/one".to_string(), "http://x/two".to_string()];
        let joined = gather_file_contents(&fetcher, &urls).await;

        assert_eq!(joined, format!("first{}second", FILE_SEPARATOR));
    }

    #[tokio::test]
    async fn malformed_envelope_degrades_to_fallback() {
        let mut bodies = HashMap::new();
        bodies.insert("http://x/good".to_string(), envelope("ok"));
        bodies.insert("http://x/bad".to_string(), "<html>404</html>".to_string());
        let fetcher = MapFetcher { bodies };

        let urls = vec!["http://x/good".to_string(), "http://x/bad".to_string()];
        let joined = gather_file_contents(&fetcher, &urls).await;

        assert_eq!(joined, format!("ok{}{}", FILE_SEPARATOR, CONTENT_FALLBACK));
    }

    #[tokio::test]
    async fn no_urls_yield_empty_contents() {
        let fetcher = MapFetcher {
            bodies: HashMap::new(),
        };
        assert_eq!(gather_file_contents(&fetcher, &[]).await, "");
    }
}
