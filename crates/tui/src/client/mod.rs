use api_types::operation::{ErrorBody, Operation};
use operation_form::{OperationId, OperationStore, StoreError};
use reqwest::{Response, Url};

use crate::error::{AppError, Result};

/// HTTP implementation of the operation store (`/operations`).
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        // A trailing slash keeps any base path when joining endpoints.
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&base_url).map_err(|err| {
            AppError::Config(config::ConfigError::Message(format!(
                "invalid base_url: {err}"
            )))
        })?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|err| StoreError::Transport(format!("invalid endpoint {path}: {err}")))
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> std::result::Result<Response, StoreError> {
        let res = request.send().await.map_err(|err| {
            tracing::error!("{what}: request failed: {err}");
            StoreError::Transport(err.to_string())
        })?;

        let status = res.status();
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), "{what}: ok");
            return Ok(res);
        }

        let message = res
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(ErrorBody::message)
            .unwrap_or_else(|| "unknown error".to_string());
        tracing::debug!(status = status.as_u16(), %message, "{what}: rejected");
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    /// Reads the echoed record. A success with an unreadable body is still a
    /// success.
    async fn saved_body(res: Response, what: &str) -> Option<Operation> {
        match res.json::<Operation>().await {
            Ok(operation) => Some(operation),
            Err(err) => {
                tracing::warn!("{what}: unreadable response body: {err}");
                None
            }
        }
    }
}

impl OperationStore for Client {
    async fn get(&self, id: OperationId) -> std::result::Result<Operation, StoreError> {
        let endpoint = self.endpoint(&format!("operations/{id}"))?;
        let res = self.send(self.http.get(endpoint), "get operation").await?;
        res.json::<Operation>()
            .await
            .map_err(|err| StoreError::Transport(format!("invalid response body: {err}")))
    }

    async fn create(
        &self,
        operation: &Operation,
    ) -> std::result::Result<Option<Operation>, StoreError> {
        let endpoint = self.endpoint("operations")?;
        let res = self
            .send(self.http.post(endpoint).json(operation), "create operation")
            .await?;
        Ok(Self::saved_body(res, "create operation").await)
    }

    async fn update(
        &self,
        id: OperationId,
        operation: &Operation,
    ) -> std::result::Result<Option<Operation>, StoreError> {
        let endpoint = self.endpoint(&format!("operations/{id}"))?;
        let res = self
            .send(self.http.put(endpoint).json(operation), "update operation")
            .await?;
        Ok(Self::saved_body(res, "update operation").await)
    }

    async fn delete(&self, id: OperationId) -> std::result::Result<(), StoreError> {
        let endpoint = self.endpoint(&format!("operations/{id}"))?;
        self.send(self.http.delete(endpoint), "delete operation")
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use api_types::operation::OperationKind;
    use axum::{
        Json, Router,
        extract::Path,
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
    };
    use operation_form::amount::parse_amount;
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    async fn spawn_server() -> String {
        let app = Router::new()
            .route(
                "/operations",
                post(|Json(op): Json<Operation>| async move {
                    (StatusCode::CREATED, Json(Operation { id: Some(11), ..op }))
                }),
            )
            .route(
                "/operations/{id}",
                get(|Path(id): Path<i64>| async move {
                    if id != 7 {
                        return (
                            StatusCode::NOT_FOUND,
                            Json(json!({ "detail": "Operation not found" })),
                        )
                            .into_response();
                    }
                    Json(json!({
                        "id": 7,
                        "type": "income",
                        "amount": 250.5,
                        "category": "Зарплата",
                        "date": "2024-01-31",
                        "note": "jan"
                    }))
                    .into_response()
                })
                .put(|Path(id): Path<i64>, Json(op): Json<Operation>| async move {
                    match id {
                        7 => Json(Operation { id: Some(7), ..op }).into_response(),
                        8 => (StatusCode::OK, "saved").into_response(),
                        _ => (StatusCode::UNPROCESSABLE_ENTITY, "plain text").into_response(),
                    }
                })
                .delete(|Path(id): Path<i64>| async move {
                    if id == 7 {
                        StatusCode::NO_CONTENT
                    } else {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn expense() -> Operation {
        Operation {
            id: None,
            kind: OperationKind::Expense,
            amount: parse_amount("45.50").unwrap(),
            category: "Еда".to_string(),
            date: "2024-03-10".to_string(),
            note: String::new(),
        }
    }

    fn id(raw: i64) -> OperationId {
        OperationId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn get_reads_operation() {
        let client = Client::new(&spawn_server().await).unwrap();
        let op = client.get(id(7)).await.unwrap();
        assert_eq!(op.id, Some(7));
        assert_eq!(op.kind, OperationKind::Income);
        assert_eq!(op.amount, parse_amount("250.5").unwrap());
        assert_eq!(op.category, "Зарплата");
    }

    #[tokio::test]
    async fn get_missing_is_rejected_with_detail() {
        let client = Client::new(&spawn_server().await).unwrap();
        let err = client.get(id(99)).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::Rejected {
                status: 404,
                message: "Operation not found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn create_posts_body_and_reads_echo() {
        let client = Client::new(&spawn_server().await).unwrap();
        let created = client.create(&expense()).await.unwrap().unwrap();
        assert_eq!(created.id, Some(11));
        assert_eq!(created.amount, parse_amount("45.5").unwrap());
        assert_eq!(created.category, "Еда");
    }

    #[tokio::test]
    async fn update_tolerates_unreadable_success_body() {
        let client = Client::new(&spawn_server().await).unwrap();
        let updated = client.update(id(7), &expense()).await.unwrap();
        assert_eq!(updated.and_then(|op| op.id), Some(7));
        assert_eq!(client.update(id(8), &expense()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_rejection_without_json_body() {
        let client = Client::new(&spawn_server().await).unwrap();
        let err = client.update(id(9), &expense()).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::Rejected {
                status: 422,
                message: "unknown error".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn delete_maps_status() {
        let client = Client::new(&spawn_server().await).unwrap();
        assert_eq!(client.delete(id(7)).await, Ok(()));
        assert!(matches!(
            client.delete(id(8)).await,
            Err(StoreError::Rejected { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::new(&format!("http://{addr}")).unwrap();
        let err = client.delete(id(7)).await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)), "{err:?}");
    }

    #[test]
    fn base_path_is_kept() {
        let client = Client::new("http://example.test/api").unwrap();
        assert_eq!(
            client.endpoint("operations/3").unwrap().as_str(),
            "http://example.test/api/operations/3"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(Client::new("not a url").is_err());
    }
}
