use crate::db;
use crate::forms;
use crate::guard;
use crate::helpers::{body_into_form, JsonResponse};
use crate::models;
use crate::plans::Feature;
use crate::repository::TenantRepository;
use actix_web::{put, web, web::Bytes, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Change work order status.", skip(body, repo, pg_pool))]
#[put("/{id}/status")]
pub async fn status_handler(
    tenant: web::ReqData<models::TenantId>,
    path: web::Path<(i32,)>,
    body: Bytes,
    repo: web::Data<Arc<dyn TenantRepository>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let tenant_id = tenant.into_inner().0;
    let repo = repo.get_ref().as_ref();
    guard::ensure_writable_feature(repo, &tenant_id, Feature::WorkOrders).await?;

    let form: forms::work_order::ChangeStatus = body_into_form(&body)?;

    let id = path.0;
    let mut work_order = db::work_order::fetch(pg_pool.get_ref(), &tenant_id, id)
        .await
        .map_err(|msg| JsonResponse::<models::WorkOrder>::build().internal_server_error(msg))?
        .ok_or_else(|| {
            JsonResponse::<models::WorkOrder>::build().not_found("Work order not found")
        })?;

    if !work_order.status.can_transition_to(form.status) {
        return Err(JsonResponse::<models::WorkOrder>::build().conflict(format!(
            "Can not move work order from {:?} to {:?}",
            work_order.status, form.status
        )));
    }

    tracing::info!(
        "Work order {} moves from {:?} to {:?}",
        work_order.id,
        work_order.status,
        form.status
    );
    work_order.status = form.status;

    db::work_order::update_status(pg_pool.get_ref(), work_order)
        .await
        .map(|work_order| JsonResponse::build().set_item(work_order).ok("success"))
        .map_err(|msg| JsonResponse::<models::WorkOrder>::build().internal_server_error(msg))
}
