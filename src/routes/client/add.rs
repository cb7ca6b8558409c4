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

#[tracing::instrument(name = "Add client.", skip(body, repo, pg_pool))]
#[post("")]
pub async fn add_handler(
    tenant: web::ReqData<models::TenantId>,
    body: Bytes,
    repo: web::Data<Arc<dyn TenantRepository>>,
    pg_pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let tenant_id = tenant.into_inner().0;
    let repo = repo.get_ref().as_ref();
    guard::ensure_writable_feature(repo, &tenant_id, Feature::Clients).await?;

    let form: forms::client::Add = body_into_form(&body)?;
    let client = form.into_client(tenant_id);

    db::client::insert(pg_pool.get_ref(), client)
        .await
        .map(|client| {
            JsonResponse::build()
                .set_id(client.id)
                .set_item(client)
                .created("Client saved")
        })
        .map_err(|msg| JsonResponse::<models::Client>::build().internal_server_error(msg))
}
