use crate::helpers::JsonResponse;
use crate::middleware::tenant::{get_header, TENANT_HEADER};
use crate::models::TenantId;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse},
    Error, HttpMessage,
};
use futures::future::{FutureExt, LocalBoxFuture};
use std::rc::Rc;

pub struct ResolverMiddleware<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ResolverMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        async move {
            let tenant_id = get_header::<String>(&req, TENANT_HEADER)
                .map_err(|msg| JsonResponse::<TenantId>::build().bad_request(msg))?
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    JsonResponse::<TenantId>::build()
                        .bad_request(format!("{TENANT_HEADER} header is not set"))
                })?;

            tracing::debug!("Request scoped to tenant {}", tenant_id);
            req.extensions_mut().insert(TenantId(tenant_id));

            service.call(req).await
        }
        .boxed_local()
    }
}
