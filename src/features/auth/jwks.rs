use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    n: String,
    e: String,
}

struct JwksCache {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
}

/// Minimum interval between JWKS fetches triggered by unknown key ids.
/// Keeps a stream of forged tokens from turning into a request flood
/// against the provider.
const REFETCH_COOLDOWN: Duration = Duration::from_secs(30);

/// Fetches and caches the provider's JSON Web Key Set.
///
/// Keys are refetched when the cache TTL expires or an unknown `kid`
/// shows up (key rotation), at most once per cooldown window.
pub struct JwksClient {
    issuer_url: String,
    client: reqwest::Client,
    cache: Arc<RwLock<Option<JwksCache>>>,
    cache_ttl: Duration,
}

impl JwksClient {
    pub fn new(issuer_url: &str, cache_ttl: Duration) -> Self {
        Self {
            issuer_url: issuer_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            cache: Arc::new(RwLock::new(None)),
            cache_ttl,
        }
    }

    pub async fn get_key(&self, kid: &str) -> Result<DecodingKey, JwksError> {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.fetched_at.elapsed() < self.cache_ttl {
                    if let Some(key) = cached.keys.get(kid) {
                        return Ok(key.clone());
                    }
                    // Unknown kid inside the cooldown window: treat it as
                    // bad rather than refetching on every garbage token
                    if cached.fetched_at.elapsed() < REFETCH_COOLDOWN {
                        return Err(JwksError::KeyNotFound(kid.to_string()));
                    }
                }
            }
        }

        // Cache miss, expired, or a possible key rotation
        self.fetch_jwks().await?;

        let cache = self.cache.read().await;
        cache
            .as_ref()
            .and_then(|cached| cached.keys.get(kid).cloned())
            .ok_or_else(|| JwksError::KeyNotFound(kid.to_string()))
    }

    async fn fetch_jwks(&self) -> Result<(), JwksError> {
        let jwks_url = format!("{}/jwks", self.issuer_url);

        let response = self
            .client
            .get(&jwks_url)
            .send()
            .await
            .map_err(|e| JwksError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JwksError::FetchError(format!(
                "Failed to fetch JWKS: HTTP {}",
                response.status()
            )));
        }

        let jwks: JwksResponse = response
            .json()
            .await
            .map_err(|e| JwksError::ParseError(e.to_string()))?;

        let mut keys = HashMap::new();
        for jwk in jwks.keys {
            // Only RS256 tokens are accepted, so only RSA keys matter
            if jwk.kty == "RSA" {
                let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
                    .map_err(|e| JwksError::KeyConversionError(e.to_string()))?;
                keys.insert(jwk.kid, decoding_key);
            }
        }

        let mut cache = self.cache.write().await;
        *cache = Some(JwksCache {
            keys,
            fetched_at: Instant::now(),
        });

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwksError {
    #[error("Failed to fetch JWKS: {0}")]
    FetchError(String),

    #[error("Failed to parse JWKS: {0}")]
    ParseError(String),

    #[error("Key not found in JWKS: {0}")]
    KeyNotFound(String),

    #[error("Failed to convert JWK to decoding key: {0}")]
    KeyConversionError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn client_with_cached_key(kid: &str) -> JwksClient {
        // Issuer points at a closed port so any accidental fetch fails fast
        let client = JwksClient::new("http://127.0.0.1:9", Duration::from_secs(3600));
        let mut keys = HashMap::new();
        keys.insert(kid.to_string(), DecodingKey::from_secret(b"test"));
        *client.cache.write().await = Some(JwksCache {
            keys,
            fetched_at: Instant::now(),
        });
        client
    }

    #[tokio::test]
    async fn cached_key_is_served_without_a_fetch() {
        let client = client_with_cached_key("known-kid").await;
        assert!(client.get_key("known-kid").await.is_ok());
    }

    #[tokio::test]
    async fn unknown_kid_within_cooldown_does_not_refetch() {
        let client = client_with_cached_key("known-kid").await;
        // A refetch against the dead issuer would surface as FetchError
        let err = client.get_key("forged-kid").await.unwrap_err();
        assert!(matches!(err, JwksError::KeyNotFound(kid) if kid == "forged-kid"));
    }
}
