use crate::guard::Rejection;
use crate::helpers::JsonResponse;
use crate::models;
use crate::repository::TenantRepository;
use crate::views;
use actix_web::{get, web, Responder, Result};
use std::sync::Arc;

/// Stored plan plus the plan the guards currently apply. Reading never downgrades.
#[tracing::instrument(name = "Get current tenant.", skip(repo))]
#[get("")]
pub async fn current_handler(
    tenant: web::ReqData<models::TenantId>,
    repo: web::Data<Arc<dyn TenantRepository>>,
) -> Result<impl Responder> {
    let tenant_id = tenant.into_inner().0;
    let tenant = repo
        .get_ref()
        .load(&tenant_id)
        .await
        .map_err(|err| {
            tracing::error!("Failed to load tenant {}: {:?}", tenant_id, err);
            JsonResponse::<views::tenant::Tenant>::build().internal_server_error("")
        })?
        .ok_or_else(|| Rejection::TenantNotFound.into_error())?;

    Ok(JsonResponse::build()
        .set_item(views::tenant::Tenant::from(tenant))
        .ok("OK"))
}
