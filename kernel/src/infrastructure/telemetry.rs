use anyhow::{Context, Result};
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource, propagation::TraceContextPropagator, trace::Sampler, trace::SdkTracerProvider,
};
use opentelemetry_semantic_conventions::resource;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter::Targets, fmt, layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Target the engine and the kernel use for audit records.
pub const AUDIT_TARGET: &str = "audit";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Builder for setting up logging, the audit trail and optional OTLP tracing.
pub struct TelemetryBuilder {
    service_name: String,
    service_version: String,
    otlp_endpoint: Option<String>,
    log_level: String,
    json: bool,
    sampling_ratio: f64,
    audit_file: Option<PathBuf>,
}

/// Keeps background writers and exporters alive; flushes them on drop.
#[must_use = "dropping the guard stops the audit writer"]
pub struct TelemetryGuard {
    _audit: Option<WorkerGuard>,
    tracer_provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Flushes and stops the trace exporter, if any.
    pub fn shutdown(mut self) {
        if let Some(provider) = self.tracer_provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Failed to shut down tracer provider");
            }
        }
    }
}

impl TelemetryBuilder {
    /// Creates a builder with human-readable output at `info`.
    pub fn new(service_name: impl Into<String>, service_version: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: service_version.into(),
            otlp_endpoint: None,
            log_level: "info".to_string(),
            json: false,
            sampling_ratio: 1.0,
            audit_file: None,
        }
    }

    /// Exports spans to an OTLP collector.
    #[must_use]
    pub fn with_tracing(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    /// Filter used when `RUST_LOG` is unset.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Switches console output to JSON lines.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Trace sampling ratio.
    #[must_use]
    pub fn with_sampling_ratio(mut self, ratio: f64) -> Self {
        self.sampling_ratio = ratio;
        self
    }

    /// Additionally writes `audit` events as JSON lines to `path`.
    #[must_use]
    pub fn with_audit_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.audit_file = Some(path.into());
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }

    /// Initializes the global subscriber.
    ///
    /// Console output goes to stderr so stdout stays free for run results.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The audit file path has no file name
    /// - The OTLP span exporter cannot be built
    /// - A global subscriber is already set
    pub fn init(self) -> Result<TelemetryGuard> {
        let mut layers: Vec<BoxedLayer> = Vec::new();

        let console = fmt::layer().with_writer(std::io::stderr).with_target(true);
        let console = if self.json {
            console.json().with_filter(self.env_filter()).boxed()
        } else {
            console.with_filter(self.env_filter()).boxed()
        };
        layers.push(console);

        let audit_guard = match &self.audit_file {
            Some(path) => {
                let (layer, guard) = audit_layer(path)?;
                layers.push(layer);
                Some(guard)
            }
            None => None,
        };

        let tracer_provider = match &self.otlp_endpoint {
            Some(endpoint) => {
                let provider = self.tracer_provider(endpoint)?;
                let tracer = provider.tracer("toolloop-kernel");
                layers.push(
                    tracing_opentelemetry::layer()
                        .with_tracer(tracer)
                        .with_filter(self.env_filter())
                        .boxed(),
                );
                Some(provider)
            }
            None => None,
        };

        Registry::default()
            .with(layers)
            .try_init()
            .context("Failed to init subscriber")?;

        Ok(TelemetryGuard {
            _audit: audit_guard,
            tracer_provider,
        })
    }

    fn tracer_provider(&self, endpoint: &str) -> Result<SdkTracerProvider> {
        opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

        let resource = Resource::builder()
            .with_attributes(vec![
                opentelemetry::KeyValue::new(resource::SERVICE_NAME, self.service_name.clone()),
                opentelemetry::KeyValue::new(
                    resource::SERVICE_VERSION,
                    self.service_version.clone(),
                ),
            ])
            .build();

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()
            .context("Failed to build OTLP span exporter")?;

        let processor = opentelemetry_sdk::trace::BatchSpanProcessor::builder(exporter).build();

        let provider = SdkTracerProvider::builder()
            .with_span_processor(processor)
            .with_resource(resource)
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
                self.sampling_ratio,
            ))))
            .build();

        opentelemetry::global::set_tracer_provider(provider.clone());
        Ok(provider)
    }
}

fn audit_layer(path: &Path) -> Result<(BoxedLayer, WorkerGuard)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Audit file path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("Failed to open audit file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer()
        .json()
        .with_writer(writer)
        .with_filter(Targets::new().with_target(AUDIT_TARGET, Level::INFO))
        .boxed();
    Ok((layer, guard))
}
