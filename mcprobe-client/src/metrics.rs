//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded by [`HttpRpcClient`](crate::HttpRpcClient)
//! when metrics are enabled through the builder. Without an installed meter
//! provider the instruments are no-ops.
//!
//! # Metrics Collected
//!
//! - **requests_total**: completed calls, by method and HTTP status
//! - **request_duration**: call latency in seconds, by method and HTTP status
//! - **malformed_responses**: calls whose body was not a JSON object
//! - **auth_rejections**: calls answered with HTTP 401
//! - **transport_errors**: calls that never got a response

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

pub struct ClientMetrics {
    pub requests_total: Counter<u64>,
    pub request_duration: Histogram<f64>,
    pub malformed_responses: Counter<u64>,
    pub auth_rejections: Counter<u64>,
    pub transport_errors: Counter<u64>,
}

impl ClientMetrics {
    pub fn new(service_name: impl Into<String>) -> Self {
        let meter = global::meter_with_scope(
            opentelemetry::InstrumentationScope::builder(service_name.into()).build(),
        );
        Self::new_with_meter(&meter)
    }

    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("mcprobe.client.requests.total")
                .with_description("Total number of calls that received a response")
                .build(),
            request_duration: meter
                .f64_histogram("mcprobe.client.request.duration")
                .with_description("Call duration in seconds")
                .with_unit("s")
                .build(),
            malformed_responses: meter
                .u64_counter("mcprobe.client.responses.malformed")
                .with_description("Responses whose body was not a JSON object")
                .build(),
            auth_rejections: meter
                .u64_counter("mcprobe.client.auth.rejections")
                .with_description("Responses with HTTP status 401")
                .build(),
            transport_errors: meter
                .u64_counter("mcprobe.client.transport.errors")
                .with_description("Calls that failed before a response was received")
                .build(),
        }
    }

    pub fn record_request(&self, method: &str, status_code: u16, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status_code", i64::from(status_code)),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    pub fn record_malformed(&self, method: &str) {
        self.malformed_responses
            .add(1, &[KeyValue::new("method", method.to_string())]);
    }

    pub fn record_auth_rejection(&self, scheme: &'static str) {
        self.auth_rejections.add(1, &[KeyValue::new("auth", scheme)]);
    }

    pub fn record_transport_error(&self, method: &str) {
        self.transport_errors
            .add(1, &[KeyValue::new("method", method.to_string())]);
    }
}
