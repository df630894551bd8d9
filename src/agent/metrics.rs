//! Counters for session exchanges
//!
//! Recorded through the `metrics` facade. Without an installed recorder the
//! macros are no-ops, so the binary pays nothing unless an exporter is set up.
//!
//! # Metrics
//!
//! - `vimtutor_exchanges_total`: Counter of successful exchanges
//! - `vimtutor_prompt_tokens_total`: Counter of prompt tokens reported
//! - `vimtutor_response_tokens_total`: Counter of response tokens reported
//! - `vimtutor_submit_errors_total`: Counter of failed submissions
//! - `vimtutor_submit_duration_seconds`: Histogram of round trip latency

use metrics::{counter, histogram, increment_counter};
use std::time::Instant;

use crate::providers::TokenUsage;

/// Timer for one submission
#[derive(Debug)]
pub struct SubmitMetrics {
    model: String,
    start: Instant,
}

impl SubmitMetrics {
    /// Start timing a submission against `model`
    pub fn start(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            start: Instant::now(),
        }
    }

    /// Record a successful exchange and its token usage
    pub fn record_success(self, usage: TokenUsage) {
        histogram!(
            "vimtutor_submit_duration_seconds",
            self.start.elapsed().as_secs_f64(),
            "model" => self.model.clone(),
            "status" => "success"
        );
        increment_counter!("vimtutor_exchanges_total", "model" => self.model.clone());
        counter!(
            "vimtutor_prompt_tokens_total",
            usage.prompt_tokens,
            "model" => self.model.clone()
        );
        counter!(
            "vimtutor_response_tokens_total",
            usage.response_tokens,
            "model" => self.model
        );
    }

    /// Record a failed submission
    pub fn record_error(self) {
        histogram!(
            "vimtutor_submit_duration_seconds",
            self.start.elapsed().as_secs_f64(),
            "model" => self.model.clone(),
            "status" => "error"
        );
        increment_counter!("vimtutor_submit_errors_total", "model" => self.model);
    }
}
