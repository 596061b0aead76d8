//! Request-level logging and request IDs.

use std::time::{Duration, Instant};

use salvo::{
    Request, async_trait,
    http::{StatusCode, header::HeaderValue},
    prelude::{Depot, FlowCtrl, Handler, Response},
};
use tracing::{Instrument as _, error, info, warn};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";
const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Assigns a request id, wraps the request in an `http.request` span and logs its outcome.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogging {
    slow_request_threshold: Duration,
}

impl RequestLogging {
    pub(crate) fn new(slow_request_threshold: Duration) -> Self {
        Self {
            slow_request_threshold,
        }
    }
}

#[async_trait]
impl Handler for RequestLogging {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let started = Instant::now();

        let request_id = resolve_request_id(req.header::<String>(REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

        set_request_id_header(res, &request_id);

        let method = req.method().to_string();
        let path = req.uri().path().to_owned();
        let remote_addr = req.remote_addr().to_string();

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            request_id = %request_id,
            method = %method,
            path = %path,
            remote_addr = %remote_addr,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let duration = started.elapsed();
        let status = res.status_code.unwrap_or(StatusCode::OK);
        let duration_ms = duration.as_millis();
        let threshold_ms = self.slow_request_threshold.as_millis();

        span.record("status", status.as_u16());
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            info!(status = status.as_u16(), duration_ms, "request.completed");

            if status.is_server_error() {
                error!(
                    status = status.as_u16(),
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    "server error response"
                );
            } else if status.is_client_error() {
                warn!(
                    status = status.as_u16(),
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    "client error response"
                );
            }

            if duration > self.slow_request_threshold {
                warn!(
                    method = %method,
                    path = %path,
                    request_id = %request_id,
                    duration_ms,
                    threshold_ms,
                    "slow request detected"
                );
            }
        });
    }
}

fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn set_request_id_header(res: &mut Response, request_id: &str) {
    let header_value = match HeaderValue::from_str(request_id) {
        Ok(value) => value,
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );

            return;
        }
    };

    res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
}
