use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::synth::content_digest;
use crate::models::SwotAnalysisResponse;

/// In-memory cache of analysis responses
///
/// Entries expire after the configured TTL. Scores are deterministic for a
/// given input; a hit differs from a fresh run only in its metadata.
pub struct ResultCache {
    entries: moka::future::Cache<String, SwotAnalysisResponse>,
    ttl_secs: u64,
}

impl ResultCache {
    /// Create a new result cache
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries, ttl_secs }
    }

    /// Get a cached response
    pub async fn get(&self, key: &str) -> Option<SwotAnalysisResponse> {
        let hit = self.entries.get(key).await;
        if hit.is_some() {
            tracing::debug!("Result cache hit: {}", key);
        } else {
            tracing::trace!("Result cache miss: {}", key);
        }
        hit
    }

    /// Store a response, replacing any previous entry
    pub async fn set(&self, key: &str, value: SwotAnalysisResponse) {
        self.entries.insert(key.to_string(), value).await;
        tracing::trace!("Result cache set: {}", key);
    }

    /// Entry count (after pending maintenance has run) and TTL, served by `/health`
    pub async fn stats(&self) -> CacheStats {
        self.entries.run_pending_tasks().await;
        CacheStats {
            entries: self.entries.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// MD5 hex of `industry-location-audience-description`, case preserved
    pub fn analysis(industry: &str, location: &str, audience: &str, description: &str) -> String {
        let input = format!("{}-{}-{}-{}", industry, location, audience, description);
        content_digest(&input)
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AnalysisMetadata, CategoryScores, NormalizedMetrics, ScoringResult, SwotNarrative,
    };

    fn response(overall: f64) -> SwotAnalysisResponse {
        SwotAnalysisResponse {
            result: ScoringResult {
                overall_score: overall,
                success_probability: 50.0,
                component_scores: CategoryScores {
                    strengths: 0.0,
                    weaknesses: 0.0,
                    opportunities: 0.0,
                    threats: 0.0,
                },
                swot_analysis: SwotNarrative::default(),
                metrics: NormalizedMetrics::from_fn(|_| 50.0),
                recommendations: vec![],
            },
            analysis_method: "ml_model".to_string(),
            metadata: AnalysisMetadata {
                generated_at: chrono::Utc::now(),
                analysis_id: uuid::Uuid::new_v4(),
                industry: "FinTech".to_string(),
                location: "US".to_string(),
                audience: "SMB".to_string(),
                cache_key: "key".to_string(),
                analysis_type: "comprehensive_swot_analysis".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = ResultCache::new(100, 60);
        assert!(cache.get("missing").await.is_none());

        cache.set("key", response(42.0)).await;
        let hit = cache.get("key").await.unwrap();
        assert_eq!(hit.result.overall_score, 42.0);
        assert_eq!(cache.stats().await.entries, 1);
        assert_eq!(cache.stats().await.ttl_secs, 60);
    }

    #[tokio::test]
    async fn test_cache_set_replaces() {
        let cache = ResultCache::new(100, 60);
        cache.set("key", response(1.0)).await;
        cache.set("key", response(2.0)).await;
        assert_eq!(cache.get("key").await.unwrap().result.overall_score, 2.0);
        assert_eq!(cache.stats().await.entries, 1);
    }

    #[test]
    fn test_cache_key_builder() {
        let key = CacheKey::analysis("FinTech", "US", "SMB", "B2B payments");
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key, CacheKey::analysis("FinTech", "US", "SMB", "B2B payments"));
        assert_ne!(key, CacheKey::analysis("fintech", "US", "SMB", "B2B payments"));
        // md5("a-b-c-d")
        assert_eq!(CacheKey::analysis("a", "b", "c", "d"), "c004a76fff893f75395917313608effd");
    }
}
