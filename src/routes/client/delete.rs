use crate::db;
use crate::guard;
use crate::helpers::JsonResponse;
use crate::models;
use crate::plans::Feature;
use crate::repository::TenantRepository;
use actix_web::{delete, web, Responder, Result};
use sqlx::PgPool;
use std::sync::Arc;

#[tracing::instrument(name = "Delete client.", skip(repo, pg_pool))]
#[delete("/{id}")]
pub async fn delete_handler(
    tenant: web::ReqData<models::TenantId>,
    path: web::Path<(i32,)>,
    repo: web::Data<Arc<dyn TenantRepository>>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let tenant_id = tenant.into_inner().0;
    let repo = repo.get_ref().as_ref();
    guard::ensure_writable_feature(repo, &tenant_id, Feature::Clients).await?;

    let id = path.0;
    match db::client::delete(pg_pool.get_ref(), &tenant_id, id).await {
        Ok(true) => Ok(JsonResponse::<models::Client>::build().set_id(id).ok("deleted")),
        Ok(false) => Err(JsonResponse::<models::Client>::build().not_found("Client not found")),
        Err(msg) => Err(JsonResponse::<models::Client>::build().internal_server_error(msg)),
    }
}
