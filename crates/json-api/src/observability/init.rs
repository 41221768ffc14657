//! Subscriber installation and telemetry lifecycle.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{
    ServerConfig,
    observability::{LogFormat, LoggingConfig},
};

use super::{ObservabilityError, otel, settings};

/// Noisy dependencies held at `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: &str = "h2=warn,hyper=warn,rustls=warn,sqlx=warn,tonic=warn,opentelemetry=warn";

/// Installed telemetry. Call [`Observability::shutdown`] before exit so
/// batched spans are flushed.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::configure(&config.observability);

        let tracer_provider = if config.observability.otel_enabled {
            Some(otel::tracer_provider(&config.observability)?)
        } else {
            None
        };

        let service_name = config.observability.otel_service_name.as_str();

        match config.logging.log_format {
            LogFormat::Compact => install(
                &config.logging,
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_line_number(true),
                tracer_provider.as_ref(),
                service_name,
            )?,
            LogFormat::Json => install(
                &config.logging,
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_target(true),
                tracer_provider.as_ref(),
                service_name,
            )?,
        }

        Ok(Self { tracer_provider })
    }

    pub(crate) fn shutdown(self) {
        let Some(provider) = self.tracer_provider else {
            return;
        };

        if let Err(source) = provider.shutdown() {
            error!("failed to shut down tracer provider: {source}");
        }
    }
}

fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_ignored| EnvFilter::new(format!("{},{QUIET_TARGETS}", logging.log_level)))
}

fn install<L>(
    logging: &LoggingConfig,
    fmt_layer: L,
    tracer_provider: Option<&SdkTracerProvider>,
    service_name: &str,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(logging));

    match tracer_provider {
        Some(provider) => subscriber
            .with(tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name.to_owned())))
            .try_init()?,
        None => subscriber.try_init()?,
    }

    Ok(())
}
