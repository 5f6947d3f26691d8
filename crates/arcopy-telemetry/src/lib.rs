//! Telemetry primitives shared across the arcopy workspace.
//!
//! This crate centralises logging and metrics so the policy engine and any
//! console surface built on top of it adopt a consistent observability story.

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

/// Default logging target when `RUST_LOG` is not provided.
const DEFAULT_LOG_LEVEL: &str = "info";

static BUILD_SHA: OnceCell<String> = OnceCell::new();

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the tracing subscriber cannot be installed (for example,
/// because another subscriber has already been set globally).
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let _ = BUILD_SHA.set(config.build_sha.to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level));

    let install = |format: LogFormat| {
        let builder = fmt::fmt()
            .with_env_filter(env_filter.clone())
            .with_target(false)
            .with_thread_ids(false);

        match format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.pretty().try_init(),
        }
    };

    install(config.format).map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    Ok(())
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig<'a> {
    pub level: &'a str,
    pub format: LogFormat,
    pub build_sha: &'a str,
}

impl Default for LoggingConfig<'_> {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL,
            format: LogFormat::infer(),
            build_sha: build_sha(),
        }
    }
}

/// Available output formats for the logger.
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// Choose a sensible default for the current build.
    #[must_use]
    pub const fn infer() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Access the build SHA recorded during logging initialisation.
#[must_use]
pub fn build_sha() -> &'static str {
    BUILD_SHA.get().map_or("dev", String::as_str)
}

/// Retrieve the wizard session identifier bound to the current task, if any.
#[must_use]
pub fn current_session_id() -> Option<String> {
    ACTIVE_SESSION_CONTEXT
        .try_with(|ctx| ctx.session_id.as_ref().to_string())
        .ok()
}

/// Execute the provided future with the supplied session identifier available
/// to downstream telemetry.
pub async fn with_session_context<Fut, T>(session_id: impl Into<String>, fut: Fut) -> T
where
    Fut: Future<Output = T>,
{
    let context = SessionContext {
        session_id: Arc::from(session_id.into()),
    };
    ACTIVE_SESSION_CONTEXT.scope(context, fut).await
}

#[derive(Clone)]
struct SessionContext {
    session_id: Arc<str>,
}

tokio::task_local! {
    static ACTIVE_SESSION_CONTEXT: SessionContext;
}

/// Prometheus-backed metrics registry shared across the engine.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    wizard_sessions_total: IntCounter,
    wizard_sessions_finished_total: IntCounterVec,
    wizard_steps_total: IntCounterVec,
    validation_failures_total: IntCounterVec,
    lookup_failures_total: IntCounterVec,
    lookup_timeouts_total: IntCounter,
    blocking_alerts_total: IntCounter,
    active_sessions: IntGauge,
}

/// Snapshot of selected gauges and counters for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub active_sessions: i64,
    pub sessions_total: u64,
    pub lookup_timeouts_total: u64,
    pub blocking_alerts_total: u64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let wizard_sessions_total = IntCounter::with_opts(Opts::new(
            "wizard_sessions_total",
            "Wizard sessions opened",
        ))?;
        let wizard_sessions_finished_total = IntCounterVec::new(
            Opts::new(
                "wizard_sessions_finished_total",
                "Wizard sessions finished by outcome",
            ),
            &["status"],
        )?;
        let wizard_steps_total = IntCounterVec::new(
            Opts::new(
                "wizard_steps_total",
                "Wizard step submissions by step and status",
            ),
            &["step", "status"],
        )?;
        let validation_failures_total = IntCounterVec::new(
            Opts::new(
                "validation_failures_total",
                "Field validation failures by field",
            ),
            &["field"],
        )?;
        let lookup_failures_total = IntCounterVec::new(
            Opts::new(
                "lookup_failures_total",
                "External selection lookup failures by operation",
            ),
            &["operation"],
        )?;
        let lookup_timeouts_total = IntCounter::with_opts(Opts::new(
            "lookup_timeouts_total",
            "External selection lookups that exceeded their deadline",
        ))?;
        let blocking_alerts_total = IntCounter::with_opts(Opts::new(
            "blocking_alerts_total",
            "Alerts severe enough to leave the wizard flow",
        ))?;
        let active_sessions =
            IntGauge::with_opts(Opts::new("active_sessions", "Wizard sessions in flight"))?;

        registry.register(Box::new(wizard_sessions_total.clone()))?;
        registry.register(Box::new(wizard_sessions_finished_total.clone()))?;
        registry.register(Box::new(wizard_steps_total.clone()))?;
        registry.register(Box::new(validation_failures_total.clone()))?;
        registry.register(Box::new(lookup_failures_total.clone()))?;
        registry.register(Box::new(lookup_timeouts_total.clone()))?;
        registry.register(Box::new(blocking_alerts_total.clone()))?;
        registry.register(Box::new(active_sessions.clone()))?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                wizard_sessions_total,
                wizard_sessions_finished_total,
                wizard_steps_total,
                validation_failures_total,
                lookup_failures_total,
                lookup_timeouts_total,
                blocking_alerts_total,
                active_sessions,
            }),
        })
    }

    /// Record a newly opened wizard session.
    pub fn inc_session_started(&self) {
        self.inner.wizard_sessions_total.inc();
        self.inner.active_sessions.inc();
    }

    /// Record a finished wizard session with its outcome label.
    pub fn inc_session_finished(&self, status: &str) {
        self.inner
            .wizard_sessions_finished_total
            .with_label_values(&[status])
            .inc();
        self.inner.active_sessions.dec();
    }

    /// Record a step submission outcome.
    pub fn inc_step(&self, step: &str, status: &str) {
        self.inner
            .wizard_steps_total
            .with_label_values(&[step, status])
            .inc();
    }

    /// Record a field validation failure.
    pub fn inc_validation_failure(&self, field: &str) {
        self.inner
            .validation_failures_total
            .with_label_values(&[field])
            .inc();
    }

    /// Record an external selection lookup failure.
    pub fn inc_lookup_failure(&self, operation: &str) {
        self.inner
            .lookup_failures_total
            .with_label_values(&[operation])
            .inc();
    }

    /// Record an external lookup that ran out of deadline.
    pub fn inc_lookup_timeout(&self) {
        self.inner.lookup_timeouts_total.inc();
    }

    /// Record an alert severe enough to leave the wizard flow.
    pub fn inc_blocking_alert(&self) {
        self.inner.blocking_alerts_total.inc();
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .context("failed to encode Prometheus metrics")?;
        String::from_utf8(buffer).context("metrics output was not valid UTF-8")
    }

    /// Take a point-in-time snapshot of the most relevant gauges and counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            active_sessions: self.inner.active_sessions.get(),
            sessions_total: self.inner.wizard_sessions_total.get(),
            lookup_timeouts_total: self.inner.lookup_timeouts_total.get(),
            blocking_alerts_total: self.inner.blocking_alerts_total.get(),
        }
    }
}
