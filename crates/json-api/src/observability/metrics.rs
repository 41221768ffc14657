//! Prometheus metrics and the `/metrics` exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const LATENCY_BUCKETS: [f64; 12] = [
    0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_requests_in_flight: IntGauge,
    websocket_clients: IntGauge,
    order_events_total: IntCounterVec,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| {
            build_metrics()
                .inspect_err(|source| error!("failed to register metrics: {source}"))
                .ok()
        })
        .as_ref()
}

fn register<M>(registry: &Registry, metric: prometheus::Result<M>) -> prometheus::Result<M>
where
    M: Collector + Clone + 'static,
{
    let metric = metric?;

    registry.register(Box::new(metric.clone()))?;

    Ok(metric)
}

fn build_metrics() -> prometheus::Result<Metrics> {
    let registry = Registry::new();

    let http_requests_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "bazaar_json_http_requests_total",
                "HTTP requests by method, route and status.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let http_request_duration_seconds = register(
        &registry,
        HistogramVec::new(
            HistogramOpts::new(
                "bazaar_json_http_request_duration_seconds",
                "HTTP request latency by method and route.",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let http_requests_in_flight = register(
        &registry,
        IntGauge::new(
            "bazaar_json_http_requests_in_flight",
            "HTTP requests currently being served.",
        ),
    )?;

    let websocket_clients = register(
        &registry,
        IntGauge::new(
            "bazaar_json_websocket_clients",
            "Connected order event subscribers.",
        ),
    )?;

    let order_events_total = register(
        &registry,
        IntCounterVec::new(
            Opts::new(
                "bazaar_json_order_events_total",
                "Order events broadcast to subscribers.",
            ),
            &["event"],
        ),
    )?;

    Ok(Metrics {
        registry,
        http_requests_total,
        http_request_duration_seconds,
        http_requests_in_flight,
        websocket_clients,
        order_events_total,
    })
}

/// Decrements a gauge when dropped.
#[derive(Debug)]
struct GaugeGuard(Option<IntGauge>);

impl GaugeGuard {
    fn track(gauge: Option<&IntGauge>) -> Self {
        let gauge = gauge.cloned();

        if let Some(gauge) = &gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for GaugeGuard {
    fn drop(&mut self) {
        if let Some(gauge) = &self.0 {
            gauge.dec();
        }
    }
}

#[derive(Debug)]
pub(super) struct InFlightRequestGuard(GaugeGuard);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        Self(GaugeGuard::track(
            metrics().map(|metrics| &metrics.http_requests_in_flight),
        ))
    }
}

/// Counts a WebSocket subscriber for as long as it is held.
#[derive(Debug)]
pub(crate) struct SocketClientGuard(GaugeGuard);

impl SocketClientGuard {
    pub(crate) fn track() -> Self {
        Self(GaugeGuard::track(
            metrics().map(|metrics| &metrics.websocket_clients),
        ))
    }
}

pub(crate) fn record_order_event(event: &str) {
    if let Some(metrics) = metrics() {
        metrics.order_events_total.with_label_values(&[event]).inc();
    }
}

pub(super) fn observe_request(method: &str, route: &str, status: StatusCode, seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code = status.as_str();

    metrics
        .http_requests_total
        .with_label_values(&[method, route, status_class(status), status_code])
        .inc();

    metrics
        .http_request_duration_seconds
        .with_label_values(&[method, route])
        .observe(seconds);
}

fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Err(source) => {
            error!("failed to encode metrics content type: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    }

    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

#[cfg(test)]
mod tests {
    use salvo::{
        Router, Service,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use super::*;

    async fn scrape() -> Result<String, salvo::Error> {
        let service =
            Service::new(Router::new().push(Router::with_path("metrics").get(metrics_handler)));

        TestClient::get("http://example.com/metrics")
            .send(&service)
            .await
            .take_string()
            .await
    }

    #[tokio::test]
    async fn exposes_http_metrics() -> TestResult {
        observe_request("GET", "/api/products", StatusCode::OK, 0.042);
        observe_request("GET", "/api/products", StatusCode::INTERNAL_SERVER_ERROR, 0.1);

        let body = scrape().await?;

        assert!(
            body.contains("bazaar_json_http_requests_total"),
            "missing request counter"
        );
        assert!(
            body.contains("bazaar_json_http_request_duration_seconds"),
            "missing latency histogram"
        );
        assert!(
            body.contains("bazaar_json_http_requests_in_flight"),
            "missing in-flight gauge"
        );

        Ok(())
    }

    #[tokio::test]
    async fn exposes_order_event_counter() -> TestResult {
        record_order_event("orderCreated");

        let body = scrape().await?;

        assert!(
            body.contains(r#"bazaar_json_order_events_total{event="orderCreated"}"#),
            "missing order event counter"
        );
        assert!(
            body.contains("bazaar_json_websocket_clients"),
            "missing websocket gauge"
        );

        Ok(())
    }

    #[test]
    fn status_classes() {
        assert_eq!(status_class(StatusCode::CREATED), "2xx");
        assert_eq!(status_class(StatusCode::NOT_FOUND), "4xx");
        assert_eq!(status_class(StatusCode::BAD_GATEWAY), "5xx");
    }
}
