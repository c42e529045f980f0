//! Per-call response metadata
//!
//! Diagnostic only: entries expire after a short TTL and the cache holds a
//! bounded number of them, evicting the oldest first.
// Copyright 2025 Francisco F. Pinochet
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use chrono::{DateTime, Utc};
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Handle of a single invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallId(Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the service reported about one answered call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub request_id: Option<String>,
    pub operation: &'static str,
    pub status: u16,
    pub latency: Duration,
    pub received_at: DateTime<Utc>,
}

struct Entry {
    inserted: Instant,
    metadata: ResponseMetadata,
}

pub struct ResponseMetadataCache {
    // `None` when the capacity is zero
    entries: Option<Mutex<LruCache<CallId, Entry>>>,
    ttl: Duration,
}

impl ResponseMetadataCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            ttl,
        }
    }

    pub async fn insert(&self, call_id: CallId, metadata: ResponseMetadata) {
        let Some(entries) = &self.entries else {
            return;
        };

        let now = Instant::now();
        let mut entries = entries.lock().await;

        // Lookups use `peek`, so the LRU end is also the oldest insert
        while let Some((_, entry)) = entries.peek_lru() {
            if now.duration_since(entry.inserted) < self.ttl {
                break;
            }
            entries.pop_lru();
        }

        entries.put(
            call_id,
            Entry {
                inserted: now,
                metadata,
            },
        );
    }

    /// Metadata for `call_id`, unless evicted or expired
    pub async fn get(&self, call_id: &CallId) -> Option<ResponseMetadata> {
        let mut entries = self.entries.as_ref()?.lock().await;
        let expired = match entries.peek(call_id) {
            Some(entry) if entry.inserted.elapsed() < self.ttl => {
                return Some(entry.metadata.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(call_id);
        }
        None
    }

    pub async fn len(&self) -> usize {
        match &self.entries {
            Some(entries) => entries.lock().await.len(),
            None => 0,
        }
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn clear(&self) {
        if let Some(entries) = &self.entries {
            entries.lock().await.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(request_id: &str) -> ResponseMetadata {
        ResponseMetadata {
            request_id: Some(request_id.to_string()),
            operation: "ListKeys",
            status: 200,
            latency: Duration::from_millis(5),
            received_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = ResponseMetadataCache::new(Duration::from_secs(60), 50);
        let call_id = CallId::new();
        cache.insert(call_id, metadata("req-1")).await;

        let found = cache.get(&call_id).await.unwrap();
        assert_eq!(found.request_id.as_deref(), Some("req-1"));
        assert!(cache.get(&CallId::new()).await.is_none());
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let cache = ResponseMetadataCache::new(Duration::from_secs(60), 2);
        let first = CallId::new();
        let second = CallId::new();
        let third = CallId::new();

        cache.insert(first, metadata("1")).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.insert(second, metadata("2")).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        cache.insert(third, metadata("3")).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get(&first).await.is_none());
        assert!(cache.get(&second).await.is_some());
        assert!(cache.get(&third).await.is_some());
    }

    #[tokio::test]
    async fn test_lookup_does_not_delay_eviction() {
        let cache = ResponseMetadataCache::new(Duration::from_secs(60), 2);
        let first = CallId::new();
        let second = CallId::new();
        let third = CallId::new();

        cache.insert(first, metadata("1")).await;
        cache.insert(second, metadata("2")).await;
        assert!(cache.get(&first).await.is_some());
        cache.insert(third, metadata("3")).await;

        assert!(cache.get(&first).await.is_none());
        assert!(cache.get(&second).await.is_some());
        assert!(cache.get(&third).await.is_some());
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = ResponseMetadataCache::new(Duration::from_millis(10), 50);
        let call_id = CallId::new();
        cache.insert(call_id, metadata("req-1")).await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get(&call_id).await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_zero_capacity_disables_cache() {
        let cache = ResponseMetadataCache::new(Duration::from_secs(60), 0);
        let call_id = CallId::new();
        cache.insert(call_id, metadata("req-1")).await;
        assert!(cache.get(&call_id).await.is_none());
    }
}
