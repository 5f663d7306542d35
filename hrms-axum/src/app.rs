use std::sync::Arc;

use axum::handler::Handler;
use axum::routing::get;
use axum::Router;
use hrms_core::TenantService;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::rest;

/// Router under construction plus the cross-cutting HTTP layers.
#[derive(Clone, Default)]
pub struct AxumApp {
    pub router: Router<()>,
}

impl AxumApp {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    pub fn use_router(mut self, path: &str, router: Router<()>) -> Self {
        self.router = self.router.nest(path, router);
        self
    }

    pub fn use_get<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        self.router = self.router.route(path, get(handler));
        self
    }

    /// Mount the REST routes of a tenant service at `path`.
    pub fn use_service<D, R, P>(
        self,
        path: &str,
        service: Arc<dyn TenantService<D, R, P>>,
        resource: &'static str,
    ) -> Self
    where
        D: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
        P: DeserializeOwned + Send + 'static,
    {
        self.use_router(path, rest::tenant_router(service, resource))
    }

    /// Finish the app: request ids (`x-request-id`), tracing and CORS
    /// around every route.
    pub fn into_router(self) -> Router<()> {
        let layers = ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        self.router.layer(layers)
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");
        axum::serve(listener, self.into_router()).await?;
        Ok(())
    }
}
