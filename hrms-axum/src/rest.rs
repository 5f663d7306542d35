use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query},
    http::StatusCode,
    routing::MethodRouter,
    Json, Router,
};
use hrms_core::{HrError, ServiceMethodKind, TenantService};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::{ApiError, Tenant};

pub fn map_json_rejection(rejection: JsonRejection) -> ApiError {
    HrError::validation(rejection.body_text()).into()
}

fn map_query_rejection(rejection: QueryRejection) -> ApiError {
    HrError::validation(rejection.body_text()).into()
}

/// Path ids are integers; anything else names no record.
pub fn parse_id(raw: &str, resource: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| HrError::not_found(format!("{resource} not found")).into())
}

/// Build the REST routes of one tenant service.
///
/// | method | path   | service call | success |
/// |--------|--------|--------------|---------|
/// | GET    | `/`    | `find`       | 200 list |
/// | POST   | `/`    | `create`     | 201 record |
/// | GET    | `/{id}`| `get`        | 200 record |
/// | PUT    | `/{id}`| `update`     | 200 record |
/// | DELETE | `/{id}`| `remove`     | 200 `{ "success": true }` |
///
/// Only the methods the service's capabilities allow are mounted. The
/// caller's [`Tenant`] comes from the access gate, so the returned router
/// must sit behind [`protect`](crate::protect).
pub fn tenant_router<D, R, P>(
    service: Arc<dyn TenantService<D, R, P>>,
    resource: &'static str,
) -> Router<()>
where
    D: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
    P: DeserializeOwned + Send + 'static,
{
    let caps = service.capabilities();
    let mut collection: MethodRouter<()> = MethodRouter::new();
    let mut member: MethodRouter<()> = MethodRouter::new();

    if caps.allows(&ServiceMethodKind::Find) {
        let svc = Arc::clone(&service);
        collection = collection.get(
            move |Tenant(ctx): Tenant, query: Result<Query<P>, QueryRejection>| async move {
                let Query(params) = query.map_err(map_query_rejection)?;
                let res = svc.find(&ctx, params).await?;
                Ok::<_, ApiError>(Json(res))
            },
        );
    }

    if caps.allows(&ServiceMethodKind::Create) {
        let svc = Arc::clone(&service);
        collection = collection.post(
            move |Tenant(ctx): Tenant, data: Result<Json<D>, JsonRejection>| async move {
                let Json(data) = data.map_err(map_json_rejection)?;
                let res = svc.create(&ctx, data).await?;
                Ok::<_, ApiError>((StatusCode::CREATED, Json(res)))
            },
        );
    }

    if caps.allows(&ServiceMethodKind::Get) {
        let svc = Arc::clone(&service);
        member = member.get(
            move |Tenant(ctx): Tenant, Path(id): Path<String>| async move {
                let id = parse_id(&id, resource)?;
                let res = svc.get(&ctx, id).await?;
                Ok::<_, ApiError>(Json(res))
            },
        );
    }

    if caps.allows(&ServiceMethodKind::Update) {
        let svc = Arc::clone(&service);
        member = member.put(
            move |Tenant(ctx): Tenant,
                  Path(id): Path<String>,
                  data: Result<Json<D>, JsonRejection>| async move {
                let id = parse_id(&id, resource)?;
                let Json(data) = data.map_err(map_json_rejection)?;
                let res = svc.update(&ctx, id, data).await?;
                Ok::<_, ApiError>(Json(res))
            },
        );
    }

    if caps.allows(&ServiceMethodKind::Remove) {
        let svc = Arc::clone(&service);
        member = member.delete(
            move |Tenant(ctx): Tenant, Path(id): Path<String>| async move {
                let id = parse_id(&id, resource)?;
                svc.remove(&ctx, id).await?;
                Ok::<_, ApiError>(Json(json!({ "success": true })))
            },
        );
    }

    let mut router = Router::new();
    if caps.allows(&ServiceMethodKind::Find) || caps.allows(&ServiceMethodKind::Create) {
        router = router.route("/", collection);
    }
    if [
        ServiceMethodKind::Get,
        ServiceMethodKind::Update,
        ServiceMethodKind::Remove,
    ]
    .iter()
    .any(|m| caps.allows(m))
    {
        router = router.route("/{id}", member);
    }
    router
}
