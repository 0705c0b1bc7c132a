//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can the data file be read? |

use std::sync::Arc;

use tracing::warn;

use crate::store::PostStore;
use crate::{Request, Response, Status};

/// Liveness probe.
///
/// Always `200 OK` with body `"ok"`. If the process can answer HTTP at all, it
/// is alive.
pub async fn liveness(_req: Request, _store: Arc<PostStore>) -> Response {
    Response::text("ok")
}

/// Readiness probe.
///
/// `200 OK` with `"ready"` when the data file loads (a missing file counts),
/// `503 Service Unavailable` when it cannot be read or is corrupt.
pub async fn readiness(_req: Request, store: Arc<PostStore>) -> Response {
    match store.load().await {
        Ok(_) => Response::text("ready"),
        Err(e) => {
            warn!("readiness check failed: {e}");
            Response::builder()
                .status(Status::ServiceUnavailable)
                .text("not ready")
        }
    }
}
