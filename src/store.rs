use crate::{
    error::{Error, Result},
    generator::IdGenerator,
};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Path segments owned by other routes. An id equal to one of these could
/// never be reached through `GET /:id`, so it is treated as a collision.
const RESERVED_IDS: &[&str] = &["shorten", "health"];

/// Thread-safe in-memory store mapping short_id -> long_url.
///
/// Backed by a DashMap so lookups only contend with writers on the same
/// shard. `create` claims a candidate id through the entry API, which holds
/// the shard lock across the existence check and the insert; two concurrent
/// requests can never both win the same id.
///
/// One store is built at startup and shared with every handler through
/// `AppState`. Cloning is cheap and clones share the same mappings.
#[derive(Clone)]
pub struct LinkStore {
    inner: Arc<DashMap<String, String>>,
    generator: Arc<dyn IdGenerator>,
    max_attempts: u32,
    strict_urls: bool,
}

impl LinkStore {
    pub fn new(generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            generator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            strict_urls: false,
        }
    }

    /// Number of candidates tried before `create` gives up. At least one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Only accept URLs with an `http://` or `https://` scheme.
    pub fn with_strict_urls(mut self, strict_urls: bool) -> Self {
        self.strict_urls = strict_urls;
        self
    }

    /// Store `long_url` under a freshly generated id and return the id.
    pub fn create(&self, long_url: &str) -> Result<String> {
        self.validate(long_url)?;

        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();
            if RESERVED_IDS.contains(&candidate.as_str()) {
                tracing::debug!("Generated reserved id '{}', retrying", candidate);
                continue;
            }

            match self.inner.entry(candidate) {
                Entry::Occupied(taken) => {
                    tracing::debug!(
                        "Short id '{}' already taken (attempt {}/{})",
                        taken.key(),
                        attempt,
                        self.max_attempts
                    );
                }
                Entry::Vacant(slot) => {
                    let id = slot.key().clone();
                    slot.insert(long_url.to_owned());
                    tracing::debug!("Created short id '{}'", id);
                    return Ok(id);
                }
            }
        }

        tracing::warn!(
            "Gave up generating a short id after {} attempt(s)",
            self.max_attempts
        );
        Err(Error::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Look up the long URL for `short_id`.
    pub fn resolve(&self, short_id: &str) -> Result<String> {
        self.inner
            .get(short_id)
            .map(|v| v.clone())
            .ok_or(Error::NotFound)
    }

    /// Number of live mappings.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn validate(&self, long_url: &str) -> Result<()> {
        if long_url.is_empty() {
            return Err(Error::LongUrlRequired);
        }
        if long_url.chars().any(|c| c.is_ascii_control()) {
            return Err(Error::InvalidUrl(
                "Long URL must not contain control characters".into(),
            ));
        }
        if self.strict_urls
            && !long_url.starts_with("http://")
            && !long_url.starts_with("https://")
        {
            return Err(Error::InvalidUrl(
                "Long URL must start with http:// or https://".into(),
            ));
        }
        Ok(())
    }
}
