//! Fail-open request interceptor.
//!
//! `handle` never fails: any load/decode/encode problem returns the original
//! payload unmodified. `intercept` additionally dispatches the result.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use adsieve_core::error::{ClientCode, Result};
use adsieve_core::{transform, AdvertiseInfo, FieldLayout, Limits, Verdict};

use crate::dispatch::PayloadSink;
use crate::lists::AdvertiseLists;
use crate::obs::GatewayMetrics;

use super::timing::timed;

/// What happened to one payload.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Bytes to forward.
    pub payload: Bytes,
    /// `None` when the transform failed and the input was passed through.
    pub verdict: Option<Verdict>,
    pub stripped: bool,
    /// Set when the transform failed.
    pub error: Option<ClientCode>,
}

impl Outcome {
    /// Label for logs, metrics and the verdict response header.
    pub fn label(&self) -> &'static str {
        match self.verdict {
            Some(v) => v.as_str(),
            None => "passthrough",
        }
    }
}

pub struct Interceptor {
    lists: Arc<AdvertiseLists>,
    layout: FieldLayout,
    limits: Limits,
    metrics: Arc<GatewayMetrics>,
}

impl Interceptor {
    pub fn new(
        lists: Arc<AdvertiseLists>,
        layout: FieldLayout,
        limits: Limits,
        metrics: Arc<GatewayMetrics>,
    ) -> Self {
        Self {
            lists,
            layout,
            limits,
            metrics,
        }
    }

    pub fn lists(&self) -> &Arc<AdvertiseLists> {
        &self.lists
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Transform one payload, falling back to the input on any error.
    pub fn handle(&self, raw: Bytes) -> Outcome {
        let info = match self.lists.snapshot() {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, key = %self.lists.key(), "lists unavailable; classifying with empty lists");
                self.metrics
                    .transform_errors
                    .inc(&[("code", e.client_code().as_str())]);
                AdvertiseInfo::default()
            }
        };

        let res = timed("handle", Some(self.metrics.as_ref()), || {
            transform(raw.clone(), &info, &self.layout, &self.limits)
        });

        let outcome = match res {
            Ok(t) => {
                if t.stripped {
                    debug!(field = ?t.field, "advertisement detected, ad signals cleared");
                    self.metrics.stripped.inc(&[]);
                }
                Outcome {
                    payload: t.payload,
                    verdict: Some(t.verdict),
                    stripped: t.stripped,
                    error: None,
                }
            }
            Err(e) => {
                let code = e.client_code();
                warn!(error = %e, bytes = raw.len(), "transform failed; passing payload through");
                self.metrics.transform_errors.inc(&[("code", code.as_str())]);
                Outcome {
                    payload: raw,
                    verdict: None,
                    stripped: false,
                    error: Some(code),
                }
            }
        };

        self.metrics.requests.inc(&[("verdict", outcome.label())]);
        outcome
    }

    /// `handle`, then hand the payload to `sink`.
    pub async fn intercept(&self, raw: Bytes, sink: &dyn PayloadSink) -> Result<Outcome> {
        let outcome = self.handle(raw);
        Self::dispatch(outcome, sink).await
    }

    /// Hand an already computed outcome's payload to `sink`.
    pub async fn dispatch(outcome: Outcome, sink: &dyn PayloadSink) -> Result<Outcome> {
        sink.send(outcome.payload.clone()).await?;
        debug!(sink = sink.name(), verdict = outcome.label(), "payload dispatched");
        Ok(outcome)
    }
}
