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

#[tracing::instrument(name = "Update client.", skip(body, repo, pg_pool))]
#[put("/{id}")]
pub async fn update_handler(
    tenant: web::ReqData<models::TenantId>,
    path: web::Path<(i32,)>,
    body: Bytes,
    repo: web::Data<Arc<dyn TenantRepository>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let tenant_id = tenant.into_inner().0;
    let repo = repo.get_ref().as_ref();
    guard::ensure_writable_feature(repo, &tenant_id, Feature::Clients).await?;

    let form: forms::client::Edit = body_into_form(&body)?;

    let id = path.0;
    let mut client = db::client::fetch(pg_pool.get_ref(), &tenant_id, id)
        .await
        .map_err(|msg| JsonResponse::<models::Client>::build().internal_server_error(msg))?
        .ok_or_else(|| JsonResponse::<models::Client>::build().not_found("Client not found"))?;

    form.update(&mut client);

    db::client::update(pg_pool.get_ref(), client)
        .await
        .map(|client| JsonResponse::build().set_item(client).ok("success"))
        .map_err(|msg| JsonResponse::<models::Client>::build().internal_server_error(msg))
}
