use crate::forms;
use crate::guard::Rejection;
use crate::helpers::{body_into_form, JsonResponse};
use crate::models;
use crate::repository::TenantRepository;
use crate::views;
use actix_web::{put, web, web::Bytes, Responder, Result};
use std::sync::Arc;

/// Plan change coming from billing. Touches only the plan columns.
#[tracing::instrument(name = "Admin change tenant plan.", skip(body, repo))]
#[put("/{id}/plan")]
pub async fn admin_plan_handler(
    path: web::Path<(String,)>,
    body: Bytes,
    repo: web::Data<Arc<dyn TenantRepository>>,
) -> Result<impl Responder> {
    let tenant_id = path.into_inner().0;
    let form: forms::tenant::ChangePlan = body_into_form(&body)?;
    let repo = repo.get_ref().as_ref();

    let updated = repo
        .update_plan(&tenant_id, models::TenantPlan::from(form.plan), form.expires_at)
        .await
        .map_err(|err| {
            tracing::error!("Failed to change plan of tenant {}: {:?}", tenant_id, err);
            JsonResponse::<views::tenant::Tenant>::build().internal_server_error("")
        })?;
    if !updated {
        return Err(Rejection::TenantNotFound.into_error());
    }
    tracing::info!("Tenant {} moved to {}", tenant_id, form.plan);

    let tenant = repo
        .load(&tenant_id)
        .await
        .map_err(|err| {
            tracing::error!("Failed to reload tenant {}: {:?}", tenant_id, err);
            JsonResponse::<views::tenant::Tenant>::build().internal_server_error("")
        })?
        .ok_or_else(|| Rejection::TenantNotFound.into_error())?;

    Ok(JsonResponse::build()
        .set_item(views::tenant::Tenant::from(tenant))
        .ok("Plan changed"))
}
