//! Liveness probe.

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Health {
    Ok,
}

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    pub status: Health,
    pub service: String,
    pub version: String,
}

/// Liveness only; the database is not consulted, so a slow Postgres never
/// gets the process restarted.
#[endpoint(tags("health"), summary = "Liveness probe")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: Health::Ok,
        service: env!("CARGO_PKG_NAME").to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn reports_service_and_version() -> TestResult {
        let service = Service::new(Router::with_path("healthcheck").get(handler));

        let body: Value = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(
            body,
            json!({
                "status": "ok",
                "service": "shopease-json",
                "version": env!("CARGO_PKG_VERSION"),
            })
        );

        Ok(())
    }
}
