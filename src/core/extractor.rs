use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::error::AppError;

/// JSON body extractor that never rejects the payload.
///
/// The content type is not checked. A body that does not deserialize into
/// `T` (empty, not JSON, wrong shape) yields `T::default()`. Only failing to
/// read the body at all is an error.
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {}", e)))?;

        match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => Ok(Self(value)),
            Err(e) => {
                debug!(len = bytes.len(), error = %e, "Body is not usable JSON, using defaults");
                Ok(Self(T::default()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Router};
    use axum_test::TestServer;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    struct Payload {
        #[serde(default)]
        name: Option<String>,
    }

    async fn echo(LenientJson(payload): LenientJson<Payload>) -> String {
        payload.name.unwrap_or_else(|| "<none>".to_string())
    }

    fn server() -> TestServer {
        TestServer::new(Router::new().route("/", post(echo))).unwrap()
    }

    #[tokio::test]
    async fn test_reads_valid_json() {
        let response = server()
            .post("/")
            .json(&serde_json::json!({ "name": "Pelusa" }))
            .await;
        response.assert_status_ok();
        response.assert_text("Pelusa");
    }

    #[tokio::test]
    async fn test_unusable_bodies_fall_back_to_default() {
        let server = server();

        let response = server.post("/").text("name=Pelusa").await;
        response.assert_status_ok();
        response.assert_text("<none>");

        let response = server
            .post("/")
            .bytes(Bytes::from_static(b"{not json"))
            .content_type("application/json")
            .await;
        response.assert_status_ok();
        response.assert_text("<none>");

        let response = server.post("/").await;
        response.assert_status_ok();
        response.assert_text("<none>");
    }
}
