use prometheus::{Encoder, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub status_changes_total: IntCounterVec,
    pub status_change_latency_seconds: HistogramVec,
    pub active_deliveries: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let status_changes_total = IntCounterVec::new(
            Opts::new("status_changes_total", "Status change requests by outcome"),
            &["outcome"],
        )
        .expect("valid status_changes_total metric");

        let status_change_latency_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "status_change_latency_seconds",
                "Latency of status change handling in seconds",
            ),
            &["outcome"],
        )
        .expect("valid status_change_latency_seconds metric");

        let active_deliveries = IntGauge::new(
            "active_deliveries",
            "Number of delivery records currently tracked",
        )
        .expect("valid active_deliveries metric");

        registry
            .register(Box::new(status_changes_total.clone()))
            .expect("register status_changes_total");
        registry
            .register(Box::new(status_change_latency_seconds.clone()))
            .expect("register status_change_latency_seconds");
        registry
            .register(Box::new(active_deliveries.clone()))
            .expect("register active_deliveries");

        Self {
            registry,
            status_changes_total,
            status_change_latency_seconds,
            active_deliveries,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
