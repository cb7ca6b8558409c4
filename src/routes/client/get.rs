use crate::db;
use crate::guard;
use crate::helpers::JsonResponse;
use crate::models;
use crate::plans::Feature;
use crate::repository::TenantRepository;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Get client.", skip(repo, pg_pool))]
#[get("/{id}")]
pub async fn item_handler(
    tenant: web::ReqData<models::TenantId>,
    path: web::Path<(i32,)>,
    repo: web::Data<Arc<dyn TenantRepository>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let tenant_id = tenant.into_inner().0;
    guard::ensure_feature(repo.get_ref().as_ref(), &tenant_id, Feature::Clients).await?;

    let id = path.0;
    db::client::fetch(pg_pool.get_ref(), &tenant_id, id)
        .await
        .map_err(|msg| JsonResponse::<models::Client>::build().internal_server_error(msg))
        .and_then(|client| match client {
            Some(client) => Ok(JsonResponse::build().set_item(client).ok("OK")),
            None => Err(JsonResponse::<models::Client>::build().not_found("Client not found")),
        })
}

#[tracing::instrument(name = "List clients.", skip(repo, pg_pool))]
#[get("")]
pub async fn list_handler(
    tenant: web::ReqData<models::TenantId>,
    repo: web::Data<Arc<dyn TenantRepository>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let tenant_id = tenant.into_inner().0;
    guard::ensure_feature(repo.get_ref().as_ref(), &tenant_id, Feature::Clients).await?;

    db::client::fetch_by_tenant(pg_pool.get_ref(), &tenant_id)
        .await
        .map(|clients| JsonResponse::build().set_list(clients).ok("OK"))
        .map_err(|_err| JsonResponse::<models::Client>::build().internal_server_error(""))
}
