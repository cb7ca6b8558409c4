use crate::db;
use crate::guard;
use crate::helpers::JsonResponse;
use crate::plans::Feature;
use crate::repository::TenantRepository;
use crate::views;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

/// Public storefront lookup; no tenant header involved.
#[tracing::instrument(name = "Track work order.", skip(repo, pg_pool))]
#[get("/{tracking_code}")]
pub async fn track_handler(
    path: web::Path<(String,)>,
    repo: web::Data<Arc<dyn TenantRepository>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let tracking_code = path.into_inner().0.trim().to_uppercase();

    let work_order = db::work_order::fetch_by_tracking_code(pg_pool.get_ref(), &tracking_code)
        .await
        .map_err(|msg| JsonResponse::<views::work_order::Tracking>::build().internal_server_error(msg))?
        .ok_or_else(|| {
            JsonResponse::<views::work_order::Tracking>::build().not_found("Work order not found")
        })?;

    // the storefront is an ECOMMERCE feature of the owning shop
    let tenant =
        guard::ensure_feature(repo.get_ref().as_ref(), &work_order.tenant_id, Feature::Ecommerce)
            .await?;

    Ok(JsonResponse::build()
        .set_item(views::work_order::Tracking::new(work_order, &tenant))
        .ok("OK"))
}
