use crate::db;
use crate::guard;
use crate::helpers::JsonResponse;
use crate::models;
use crate::plans::Feature;
use crate::repository::TenantRepository;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Get work order.", skip(repo, pg_pool))]
#[get("/{id}")]
pub async fn item_handler(
    tenant: web::ReqData<models::TenantId>,
    path: web::Path<(i32,)>,
    repo: web::Data<Arc<dyn TenantRepository>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let tenant_id = tenant.into_inner().0;
    guard::ensure_feature(repo.get_ref().as_ref(), &tenant_id, Feature::WorkOrders).await?;

    let id = path.0;
    db::work_order::fetch(pg_pool.get_ref(), &tenant_id, id)
        .await
        .map_err(|msg| JsonResponse::<models::WorkOrder>::build().internal_server_error(msg))
        .and_then(|work_order| match work_order {
            Some(work_order) => Ok(JsonResponse::build().set_item(work_order).ok("OK")),
            None => Err(JsonResponse::<models::WorkOrder>::build().not_found("Work order not found")),
        })
}

#[tracing::instrument(name = "List work orders.", skip(repo, pg_pool))]
#[get("")]
pub async fn list_handler(
    tenant: web::ReqData<models::TenantId>,
    repo: web::Data<Arc<dyn TenantRepository>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let tenant_id = tenant.into_inner().0;
    guard::ensure_feature(repo.get_ref().as_ref(), &tenant_id, Feature::WorkOrders).await?;

    db::work_order::fetch_by_tenant(pg_pool.get_ref(), &tenant_id)
        .await
        .map(|work_orders| JsonResponse::build().set_list(work_orders).ok("OK"))
        .map_err(|_err| JsonResponse::<models::WorkOrder>::build().internal_server_error(""))
}
