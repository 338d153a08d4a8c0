//! Single-service liveness probe.
//!
//! One bounded-time HTTP GET against `{base_address}/health`. The probe
//! never fails outward: its return type has no error variant, so "all
//! faults collapse to unhealthy" is a compile-time property rather than
//! a convention.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use fleetboard_state::HealthState;

/// Default per-probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Classification of one completed probe. Deliberately two-state:
/// a probe always resolves to a definite answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeVerdict {
    /// The health endpoint returned 2xx within the timeout.
    Healthy,
    /// Non-2xx, connection failure, malformed address, or timeout.
    Unhealthy,
}

impl ProbeVerdict {
    /// Widen into the store's three-state health model.
    pub fn as_health_state(self) -> HealthState {
        match self {
            ProbeVerdict::Healthy => HealthState::Healthy,
            ProbeVerdict::Unhealthy => HealthState::Unhealthy,
        }
    }
}

/// Result of one completed probe: the classification plus the moment
/// the probe resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub verdict: ProbeVerdict,
    pub observed_at: DateTime<Utc>,
}

/// Perform an HTTP health probe against a service's base address.
///
/// The request races a timer of `timeout`; if the timer fires first the
/// request future is dropped, which closes the underlying connection —
/// the probe never lingers in the background. Accepts a bare authority
/// (`host:port`) or an `http://` URL.
pub async fn http_probe(base_address: &str, timeout: Duration) -> ProbeOutcome {
    let authority = authority_of(base_address);
    let uri = format!("http://{authority}/health");

    let result = tokio::time::timeout(timeout, async {
        let stream = match tokio::net::TcpStream::connect(&authority).await {
            Ok(s) => s,
            Err(e) => {
                debug!(error = %e, %uri, "health probe connection failed");
                return ProbeVerdict::Unhealthy;
            }
        };

        let io = hyper_util::rt::TokioIo::new(stream);
        let (mut sender, conn) = match hyper::client::conn::http1::handshake(io).await {
            Ok(pair) => pair,
            Err(e) => {
                debug!(error = %e, %uri, "health probe handshake failed");
                return ProbeVerdict::Unhealthy;
            }
        };

        // Drive the connection while the request is in flight.
        tokio::spawn(async move {
            let _ = conn.await;
        });

        let req = match http::Request::builder()
            .method("GET")
            .uri(&uri)
            .header("host", &authority)
            .header("user-agent", "fleetboard-health/0.1")
            .body(http_body_util::Empty::<bytes::Bytes>::new())
        {
            Ok(req) => req,
            Err(e) => {
                debug!(error = %e, %uri, "health probe request build failed");
                return ProbeVerdict::Unhealthy;
            }
        };

        match sender.send_request(req).await {
            Ok(resp) if resp.status().is_success() => ProbeVerdict::Healthy,
            Ok(resp) => {
                debug!(status = %resp.status(), %uri, "health probe non-2xx");
                ProbeVerdict::Unhealthy
            }
            Err(e) => {
                debug!(error = %e, %uri, "health probe request failed");
                ProbeVerdict::Unhealthy
            }
        }
    })
    .await;

    let verdict = match result {
        Ok(verdict) => verdict,
        Err(_) => {
            debug!(%uri, "health probe timed out");
            ProbeVerdict::Unhealthy
        }
    };

    ProbeOutcome {
        verdict,
        observed_at: Utc::now(),
    }
}

/// Reduce a configured base address to a dialable `host:port` authority.
fn authority_of(base_address: &str) -> String {
    let trimmed = base_address
        .trim()
        .trim_start_matches("http://")
        .trim_start_matches("https://");
    trimmed.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Minimal backend that answers every request with the given status
    /// line, e.g. `"200 OK"` or `"500 Internal Server Error"`.
    async fn spawn_backend(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut sock, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = sock.read(&mut buf).await;
                    let resp = format!(
                        "HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                    );
                    let _ = sock.write_all(resp.as_bytes()).await;
                });
            }
        });

        format!("127.0.0.1:{}", addr.port())
    }

    /// Backend that accepts connections but never responds. Sets the
    /// flag once the client hangs up (read returns EOF).
    async fn spawn_silent_backend(client_gone: Arc<AtomicBool>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut sock, _)) = listener.accept().await {
                let client_gone = client_gone.clone();
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    loop {
                        match sock.read(&mut buf).await {
                            Ok(0) | Err(_) => {
                                client_gone.store(true, Ordering::SeqCst);
                                break;
                            }
                            Ok(_) => {}
                        }
                    }
                });
            }
        });

        format!("127.0.0.1:{}", addr.port())
    }

    #[tokio::test]
    async fn probe_2xx_is_healthy() {
        let addr = spawn_backend("200 OK").await;
        let outcome = http_probe(&addr, Duration::from_secs(2)).await;
        assert_eq!(outcome.verdict, ProbeVerdict::Healthy);
    }

    #[tokio::test]
    async fn probe_accepts_http_url_form() {
        let addr = spawn_backend("204 No Content").await;
        let outcome = http_probe(&format!("http://{addr}/"), Duration::from_secs(2)).await;
        assert_eq!(outcome.verdict, ProbeVerdict::Healthy);
    }

    #[tokio::test]
    async fn probe_500_is_unhealthy() {
        let addr = spawn_backend("500 Internal Server Error").await;
        let outcome = http_probe(&addr, Duration::from_secs(2)).await;
        assert_eq!(outcome.verdict, ProbeVerdict::Unhealthy);
    }

    #[tokio::test]
    async fn probe_refused_connection_is_unhealthy() {
        // Port 1 is not listening.
        let outcome = http_probe("127.0.0.1:1", Duration::from_millis(500)).await;
        assert_eq!(outcome.verdict, ProbeVerdict::Unhealthy);
    }

    #[tokio::test]
    async fn probe_malformed_address_is_unhealthy() {
        let outcome = http_probe("not a real address", Duration::from_millis(500)).await;
        assert_eq!(outcome.verdict, ProbeVerdict::Unhealthy);
    }

    #[tokio::test]
    async fn probe_timeout_is_unhealthy_and_bounded() {
        let client_gone = Arc::new(AtomicBool::new(false));
        let addr = spawn_silent_backend(client_gone.clone()).await;

        let start = Instant::now();
        let outcome = http_probe(&addr, Duration::from_millis(200)).await;
        let elapsed = start.elapsed();

        assert_eq!(outcome.verdict, ProbeVerdict::Unhealthy);
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_secs(2), "probe did not respect timeout");
    }

    #[tokio::test]
    async fn probe_timeout_drops_the_connection() {
        let client_gone = Arc::new(AtomicBool::new(false));
        let addr = spawn_silent_backend(client_gone.clone()).await;

        let outcome = http_probe(&addr, Duration::from_millis(200)).await;
        assert_eq!(outcome.verdict, ProbeVerdict::Unhealthy);

        // The abandoned request tears down its socket; the backend sees
        // EOF shortly after the timeout fires.
        for _ in 0..50 {
            if client_gone.load(Ordering::SeqCst) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("backend never saw the probe connection close");
    }

    #[tokio::test]
    async fn probe_always_reports_completion_time() {
        let before = Utc::now();
        let outcome = http_probe("127.0.0.1:1", Duration::from_millis(200)).await;
        assert!(outcome.observed_at >= before);
    }

    #[test]
    fn authority_strips_scheme_and_trailing_slash() {
        assert_eq!(authority_of("http://10.0.0.1:8080/"), "10.0.0.1:8080");
        assert_eq!(authority_of("https://svc.internal:9000"), "svc.internal:9000");
        assert_eq!(authority_of("127.0.0.1:3000"), "127.0.0.1:3000");
    }

    #[test]
    fn verdict_widens_to_health_state() {
        assert_eq!(ProbeVerdict::Healthy.as_health_state(), HealthState::Healthy);
        assert_eq!(
            ProbeVerdict::Unhealthy.as_health_state(),
            HealthState::Unhealthy
        );
    }
}
