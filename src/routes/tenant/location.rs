use crate::forms;
use crate::guard::{self, Rejection};
use crate::helpers::maps::{self, MapsError};
use crate::helpers::{body_into_form, JsonResponse};
use crate::models;
use crate::plans::Feature;
use crate::repository::TenantRepository;
use crate::views;
use actix_web::{put, web, web::Bytes, Responder, Result};
use std::sync::Arc;

/// Pins the storefront on the map from a Google Maps share link.
#[tracing::instrument(name = "Update tenant location.", skip(body, repo, maps_client))]
#[put("/location")]
pub async fn location_handler(
    tenant: web::ReqData<models::TenantId>,
    body: Bytes,
    repo: web::Data<Arc<dyn TenantRepository>>,
    maps_client: web::Data<reqwest::Client>,
) -> Result<impl Responder> {
    let tenant_id = tenant.into_inner().0;
    let repo = repo.get_ref().as_ref();
    guard::ensure_writable_feature(repo, &tenant_id, Feature::Ecommerce).await?;

    let form: forms::tenant::Location = body_into_form(&body)?;
    let coordinates = maps::resolve_coordinates(maps_client.get_ref(), &form.maps_url)
        .await
        .map_err(|err| {
            tracing::info!("Could not resolve maps url: {}", err);
            match err {
                MapsError::Http(_) => JsonResponse::<views::tenant::Tenant>::build()
                    .internal_server_error("Could not reach Google Maps"),
                err => JsonResponse::<views::tenant::Tenant>::build().bad_request(err.to_string()),
            }
        })?;

    // only the location columns; the plan may have changed while resolving
    let updated = repo
        .update_location(
            &tenant_id,
            &form.maps_url,
            coordinates.latitude,
            coordinates.longitude,
        )
        .await
        .map_err(|err| {
            tracing::error!("Failed to save location of tenant {}: {:?}", tenant_id, err);
            JsonResponse::<views::tenant::Tenant>::build().internal_server_error("")
        })?;
    if !updated {
        return Err(Rejection::TenantNotFound.into_error());
    }

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
        .ok("Location saved"))
}
