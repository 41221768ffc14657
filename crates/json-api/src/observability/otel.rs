//! OTLP span export.

use std::time::Duration;

use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

/// Build a batching OTLP tracer provider and install the W3C trace-context
/// propagator.
pub(super) fn tracer_provider(
    config: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    let resource = Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", config.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build();

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(config.otel_exporter_otlp_timeout_seconds))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(config.otel_trace_sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}

fn sampler(ratio: f64) -> Sampler {
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(clamp_ratio(ratio))))
}

fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return 1.0;
    }

    ratio.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_ratio_is_clamped() {
        assert!((clamp_ratio(4.0) - 1.0).abs() < f64::EPSILON, "above range");
        assert!(clamp_ratio(-1.0).abs() < f64::EPSILON, "below range");
        assert!((clamp_ratio(0.25) - 0.25).abs() < f64::EPSILON, "in range");
    }

    #[test]
    fn nan_ratio_samples_everything() {
        assert!((clamp_ratio(f64::NAN) - 1.0).abs() < f64::EPSILON, "nan");
    }
}
