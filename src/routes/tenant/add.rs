use crate::configuration::Settings;
use crate::forms;
use crate::helpers::{body_into_form, JsonResponse};
use crate::models;
use crate::repository::TenantRepository;
use crate::views;
use actix_web::{post, web, web::Bytes, HttpResponse, Result};
use std::sync::Arc;

/// Opens a new shop on a DEMO trial.
#[tracing::instrument(name = "Add tenant.", skip(body, repo, settings))]
#[post("")]
pub async fn add_handler(
    body: Bytes,
    repo: web::Data<Arc<dyn TenantRepository>>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse> {
    let form: forms::tenant::AddTenant = body_into_form(&body)?;
    let tenant = models::Tenant::new_trial(form.name, settings.trial_days);

    repo.get_ref()
        .save(&tenant)
        .await
        .map_err(|err| {
            tracing::error!("Failed to save new tenant: {:?}", err);
            JsonResponse::<views::tenant::Tenant>::build().internal_server_error("")
        })?;

    tracing::info!("Tenant {} started a trial until {:?}", tenant.id, tenant.plan_expires_at);
    Ok(JsonResponse::build()
        .set_item(views::tenant::Tenant::from(tenant))
        .created("Store created"))
}
