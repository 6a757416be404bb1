//! HTTP server for the todo service
//!
//! Routes are registered explicitly, each tagged with a stable handler name
//! that is echoed in the `X-Handler-Name` response header.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, Request, State,
    },
    http::{HeaderName, HeaderValue, StatusCode, Uri},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use std::{future::Future, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    error::ApiError,
    handler::TodoHandler,
    request_logger::request_logging_middleware,
    serialization::{CreatedTodo, TodoView},
};

/// Response header carrying the name of the handler that served the request
pub const HANDLER_NAME_HEADER: &str = "x-handler-name";

pub const CREATE_TODO_ITEM: &str = "create_todo_item";
pub const GET_TODO_ITEM: &str = "get_todo_item";

pub const TODO_COLLECTION_PATH: &str = "/api/v0/todo/";
/// Same collection without the trailing slash
pub const TODO_COLLECTION_PATH_BARE: &str = "/api/v0/todo";
pub const TODO_ITEM_PATH: &str = "/api/v0/todo/:id";

/// HTTP front end for a [`TodoHandler`]
pub struct TodoServer {
    handler: Arc<TodoHandler>,
}

impl TodoServer {
    pub fn new(handler: TodoHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        let create = post(create_todo_item).layer(middleware::from_fn_with_state(
            CREATE_TODO_ITEM,
            tag_handler_name,
        ));

        Router::new()
            .route(TODO_COLLECTION_PATH, create.clone())
            .route(TODO_COLLECTION_PATH_BARE, create)
            .route(
                TODO_ITEM_PATH,
                get(get_todo_item).layer(middleware::from_fn_with_state(
                    GET_TODO_ITEM,
                    tag_handler_name,
                )),
            )
            .layer(middleware::from_fn(request_logging_middleware))
            .with_state(Arc::clone(&self.handler))
    }

    /// Bind `addr` and serve until `shutdown` resolves
    pub async fn serve<F>(self, addr: &str, shutdown: F) -> Result<(), Box<dyn std::error::Error>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| format!("Invalid address '{addr}': {e}"))?;

        let listener = TcpListener::bind(socket_addr).await?;
        self.serve_with_listener(listener, shutdown).await?;
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve_with_listener<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Starting todo server on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Todo server stopped");
        Ok(())
    }
}

/// Stamp the route's handler name on the response
async fn tag_handler_name(
    State(name): State<&'static str>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        HeaderName::from_static(HANDLER_NAME_HEADER),
        HeaderValue::from_static(name),
    );
    response
}

async fn create_todo_item(
    State(handler): State<Arc<TodoHandler>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<CreatedTodo>), ApiError> {
    let body = body.map_err(body_error)?;
    let created = handler.create_todo_item(&body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_todo_item(
    State(handler): State<Arc<TodoHandler>>,
    uri: Uri,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<TodoView>, ApiError> {
    let Path(id) = id.map_err(|rejection| path_error(&uri, rejection))?;
    let view = handler.get_todo_item(&id).await?;
    Ok(Json(view))
}

/// Unreadable bodies answer in JSON like every other failure
fn body_error(rejection: BytesRejection) -> ApiError {
    warn!(error = %rejection.body_text(), "Rejected unreadable request body");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(rejection.body_text())
    } else {
        ApiError::InvalidInput(rejection.body_text())
    }
}

/// An id segment that cannot even be percent-decoded is still a bad UUID
fn path_error(uri: &Uri, rejection: PathRejection) -> ApiError {
    let value = uri.path().rsplit('/').next().unwrap_or_default().to_string();
    warn!(id = %value, error = %rejection.body_text(), "Rejected undecodable todo id");
    ApiError::InvalidId {
        value,
        reason: rejection.body_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{self, Method},
    };
    use mocks::MockTodoRepository;
    use tower::ServiceExt;

    fn test_server() -> TodoServer {
        let repo = Arc::new(MockTodoRepository::new());
        TodoServer::new(TodoHandler::new(repo, tracing::Span::none()))
    }

    #[tokio::test]
    async fn test_routes_are_tagged() {
        let router = test_server().router();

        let response = router
            .clone()
            .oneshot(
                http::Request::builder()
                    .method(Method::POST)
                    .uri("/api/v0/todo/")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[HANDLER_NAME_HEADER], CREATE_TODO_ITEM);

        let response = router
            .oneshot(
                http::Request::builder()
                    .uri("/api/v0/todo/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[HANDLER_NAME_HEADER], GET_TODO_ITEM);
    }

    #[tokio::test]
    async fn test_unknown_route_is_untagged() {
        let response = test_server()
            .router()
            .oneshot(http::Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(HANDLER_NAME_HEADER).is_none());
    }

    #[tokio::test]
    async fn test_serve_rejects_bad_address() {
        let result = test_server().serve("not an address", async {}).await;
        assert!(result.unwrap_err().to_string().contains("Invalid address"));
    }
}
