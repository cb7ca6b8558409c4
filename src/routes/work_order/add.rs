use crate::db;
use crate::forms;
use crate::guard;
use crate::helpers::{body_into_form, JsonResponse};
use crate::models;
use crate::plans::Feature;
use crate::repository::TenantRepository;
use actix_web::{post, web, web::Bytes, HttpResponse, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Add work order.", skip(body, repo, pg_pool))]
#[post("")]
pub async fn add_handler(
    tenant: web::ReqData<models::TenantId>,
    body: Bytes,
    repo: web::Data<Arc<dyn TenantRepository>>,
    pg_pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tenant_id = tenant.into_inner().0;
    let repo = repo.get_ref().as_ref();
    guard::ensure_writable_feature(repo, &tenant_id, Feature::WorkOrders).await?;

    let form: forms::work_order::Add = body_into_form(&body)?;

    db::client::fetch(pg_pool.get_ref(), &tenant_id, form.client_id)
        .await
        .map_err(|msg| JsonResponse::<models::WorkOrder>::build().internal_server_error(msg))?
        .ok_or_else(|| JsonResponse::<models::WorkOrder>::build().not_found("Client not found"))?;

    let work_order = form.into_work_order(tenant_id);
    db::work_order::insert(pg_pool.get_ref(), work_order)
        .await
        .map(|work_order| {
            JsonResponse::build()
                .set_id(work_order.id)
                .set_item(work_order)
                .created("Work order saved")
        })
        .map_err(|msg| JsonResponse::<models::WorkOrder>::build().internal_server_error(msg))
}
