//! Selection lists for the media step, loaded under a deadline.

use std::future::Future;
use std::time::Duration;

use arcopy_policy::{LookupFailure, MediaType, PolicyError, PolicyResult, SelectionSource};
use arcopy_telemetry::Metrics;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Dropdown content offered by the copy media step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardChoices {
    /// File systems eligible for archiving.
    pub file_systems: Vec<String>,
    /// Volume pools defined for the requested media family.
    pub pools: Vec<String>,
    /// Media families with configured volumes.
    pub media_types: Vec<MediaType>,
}

/// Load every dropdown for the media step, bounding each collaborator call
/// by `deadline`.
///
/// Pool enumeration failures are tolerated with an empty list so the page
/// still renders; file-system and media-type failures propagate.
///
/// # Errors
///
/// `ExternalLookup` when a required lookup fails or its deadline elapses.
pub async fn load_choices(
    source: &dyn SelectionSource,
    media: MediaType,
    deadline: Duration,
    metrics: &Metrics,
) -> PolicyResult<WizardChoices> {
    let file_systems = bounded(
        deadline,
        metrics,
        "archive_file_systems",
        source.archive_file_systems(),
    )
    .await?;
    let media_types = bounded(deadline, metrics, "media_types", source.media_types()).await?;
    let pools = match bounded(deadline, metrics, "pools", source.pools(media)).await {
        Ok(pools) => pools,
        Err(err) => {
            warn!(media = media.as_str(), error = ?err, "pool lookup failed; offering no pools");
            Vec::new()
        }
    };
    Ok(WizardChoices {
        file_systems,
        pools,
        media_types,
    })
}

/// Run one collaborator call under the deadline, recording failures and
/// timeouts in metrics.
async fn bounded<T>(
    deadline: Duration,
    metrics: &Metrics,
    operation: &'static str,
    call: impl Future<Output = Result<T, LookupFailure>>,
) -> PolicyResult<T> {
    match tokio::time::timeout(deadline, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(failure)) => {
            metrics.inc_lookup_failure(operation);
            Err(PolicyError::external(operation, failure))
        }
        Err(_) => {
            metrics.inc_lookup_timeout();
            metrics.inc_lookup_failure(operation);
            Err(PolicyError::external(operation, LookupFailure::timeout()))
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use arcopy_policy::catalog::LOOKUP_TIMEOUT_CODE;
    use arcopy_test_support::fixtures::small_site_source;
    use arcopy_test_support::mocks::StaticSelectionSource;

    use super::*;

    const DEADLINE: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn loads_every_dropdown() -> Result<()> {
        let metrics = Metrics::new()?;
        let source = small_site_source();
        let choices = load_choices(&source, MediaType::Lto, DEADLINE, &metrics).await?;
        assert_eq!(choices.file_systems, vec!["samfs1", "samfs2"]);
        assert_eq!(choices.pools, vec!["scratch_pool", "archive_pool"]);
        assert_eq!(
            choices.media_types,
            vec![MediaType::Disk, MediaType::Lto, MediaType::T9840]
        );
        Ok(())
    }

    #[tokio::test]
    async fn pool_failure_is_tolerated() -> Result<()> {
        let metrics = Metrics::new()?;
        let source =
            small_site_source().failing_pools(LookupFailure::new(30620, "catalog daemon down"));
        let choices = load_choices(&source, MediaType::Lto, DEADLINE, &metrics).await?;
        assert!(choices.pools.is_empty());
        assert_eq!(choices.file_systems, vec!["samfs1", "samfs2"]);
        assert!(
            metrics
                .render()?
                .contains(r#"lookup_failures_total{operation="pools"} 1"#)
        );
        Ok(())
    }

    #[tokio::test]
    async fn media_type_failure_propagates() -> Result<()> {
        let metrics = Metrics::new()?;
        let source =
            small_site_source().failing_media_types(LookupFailure::new(30101, "rpc unreachable"));
        let err = load_choices(&source, MediaType::Disk, DEADLINE, &metrics)
            .await
            .unwrap_err();
        let PolicyError::ExternalLookup {
            operation, code, ..
        } = err
        else {
            panic!("expected external lookup failure");
        };
        assert_eq!(operation, "media_types");
        assert_eq!(code, 30101);
        Ok(())
    }

    #[tokio::test]
    async fn elapsed_deadline_surfaces_as_timeout() -> Result<()> {
        let metrics = Metrics::new()?;
        let source = StaticSelectionSource::new()
            .with_file_systems(["samfs1"])
            .with_delay(Duration::from_millis(200));
        let err = load_choices(&source, MediaType::Disk, Duration::from_millis(5), &metrics)
            .await
            .unwrap_err();
        let PolicyError::ExternalLookup { code, message, .. } = err else {
            panic!("expected external lookup failure");
        };
        assert_eq!(code, LOOKUP_TIMEOUT_CODE);
        assert_eq!(message, "deadline exceeded");
        assert!(metrics.render()?.contains("lookup_timeouts_total 1"));
        Ok(())
    }
}
