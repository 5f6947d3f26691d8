//! Fake collaborators for exercising the policy engine and the wizard.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;

use arcopy_policy::catalog::{
    LookupFailure, MediaLabels, MessageCatalog, SelectionSource, VolumeIdValidator,
};
use arcopy_policy::model::MediaType;

/// Message catalog backed by an in-memory template map with `{0}`-style
/// positional substitution.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<String, String>,
}

impl StaticCatalog {
    /// Empty catalog; every lookup fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a message template.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.entries.insert(key.into(), template.into());
        self
    }
}

impl MessageCatalog for StaticCatalog {
    fn resolve(&self, key: &str, args: &[&str]) -> Result<String, LookupFailure> {
        let template = self
            .entries
            .get(key)
            .ok_or_else(|| LookupFailure::new(30001, format!("unknown message id '{key}'")))?;
        let mut rendered = template.clone();
        for (index, arg) in args.iter().enumerate() {
            rendered = rendered.replace(&format!("{{{index}}}"), arg);
        }
        Ok(rendered)
    }
}

/// Media-label table with explicit entries; missing media fail the lookup.
#[derive(Debug, Clone, Default)]
pub struct StaticMediaLabels {
    labels: HashMap<MediaType, String>,
}

impl StaticMediaLabels {
    /// Empty table; every lookup fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a media label.
    #[must_use]
    pub fn with_label(mut self, media: MediaType, label: impl Into<String>) -> Self {
        self.labels.insert(media, label.into());
        self
    }

    /// Remove a label so lookups for `media` fail.
    #[must_use]
    pub fn without(mut self, media: MediaType) -> Self {
        self.labels.remove(&media);
        self
    }
}

impl MediaLabels for StaticMediaLabels {
    fn label(&self, media: MediaType) -> Result<String, LookupFailure> {
        self.labels.get(&media).cloned().ok_or_else(|| {
            LookupFailure::new(30002, format!("no label for media '{}'", media.as_str()))
        })
    }
}

/// Selection backend with canned lists, per-operation failures, and an
/// optional artificial delay for deadline tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSelectionSource {
    file_systems: Vec<String>,
    pools: Vec<String>,
    media_types: Vec<MediaType>,
    fail_file_systems: Option<LookupFailure>,
    fail_pools: Option<LookupFailure>,
    fail_media_types: Option<LookupFailure>,
    delay: Option<Duration>,
}

impl StaticSelectionSource {
    /// Backend with empty lists and no failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the archive file systems to return.
    #[must_use]
    pub fn with_file_systems<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_systems = items.into_iter().map(Into::into).collect();
        self
    }

    /// Set the volume pools to return.
    #[must_use]
    pub fn with_pools<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pools = items.into_iter().map(Into::into).collect();
        self
    }

    /// Set the media families to return.
    #[must_use]
    pub fn with_media_types(mut self, items: impl IntoIterator<Item = MediaType>) -> Self {
        self.media_types = items.into_iter().collect();
        self
    }

    /// Make file-system enumeration fail.
    #[must_use]
    pub fn failing_file_systems(mut self, failure: LookupFailure) -> Self {
        self.fail_file_systems = Some(failure);
        self
    }

    /// Make pool enumeration fail.
    #[must_use]
    pub fn failing_pools(mut self, failure: LookupFailure) -> Self {
        self.fail_pools = Some(failure);
        self
    }

    /// Make media-family enumeration fail.
    #[must_use]
    pub fn failing_media_types(mut self, failure: LookupFailure) -> Self {
        self.fail_media_types = Some(failure);
        self
    }

    /// Sleep for `delay` before answering each call.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl SelectionSource for StaticSelectionSource {
    async fn archive_file_systems(&self) -> Result<Vec<String>, LookupFailure> {
        self.pause().await;
        if let Some(failure) = &self.fail_file_systems {
            return Err(failure.clone());
        }
        Ok(self.file_systems.clone())
    }

    async fn pools(&self, _media: MediaType) -> Result<Vec<String>, LookupFailure> {
        self.pause().await;
        if let Some(failure) = &self.fail_pools {
            return Err(failure.clone());
        }
        Ok(self.pools.clone())
    }

    async fn media_types(&self) -> Result<Vec<MediaType>, LookupFailure> {
        self.pause().await;
        if let Some(failure) = &self.fail_media_types {
            return Err(failure.clone());
        }
        Ok(self.media_types.clone())
    }
}

/// Volume-id validator driven by explicit accept and reject lists.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedVolumeIds {
    accept: Option<HashSet<String>>,
    reject: HashSet<String>,
}

impl RuleBasedVolumeIds {
    /// Accept only the listed identifiers.
    #[must_use]
    pub fn accepting<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accept: Some(ids.into_iter().map(Into::into).collect()),
            reject: HashSet::new(),
        }
    }

    /// Accept everything except the listed identifiers.
    #[must_use]
    pub fn rejecting<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accept: None,
            reject: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl VolumeIdValidator for RuleBasedVolumeIds {
    fn is_valid(&self, candidate: &str) -> bool {
        let trimmed = candidate.trim();
        if self.reject.contains(trimmed) {
            return false;
        }
        self.accept
            .as_ref()
            .is_none_or(|allowed| allowed.contains(trimmed))
    }
}
