use crate::configuration::Settings;
use crate::helpers::maps;
use crate::middleware;
use crate::repository::{PgTenantRepository, TenantRepository};
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use sqlx::{Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

/// Route table. Expects `PgPool`, `Arc<dyn TenantRepository>`, `Settings` and
/// the maps `reqwest::Client` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health_check").service(routes::health_check))
        .service(
            web::scope("/plan")
                .service(routes::plan::list_handler)
                .service(routes::plan::minimum_plan_handler)
                .service(routes::plan::has_feature_handler),
        )
        .service(
            web::scope("/tenant")
                .service(
                    web::scope("/current")
                        .wrap(middleware::tenant::Resolver::new())
                        .service(routes::tenant::current_handler)
                        .service(routes::tenant::location_handler),
                )
                .service(routes::tenant::add_handler),
        )
        .service(
            web::scope("/client")
                .wrap(middleware::tenant::Resolver::new())
                .service(routes::client::list_handler)
                .service(routes::client::item_handler)
                .service(routes::client::add_handler)
                .service(routes::client::update_handler)
                .service(routes::client::delete_handler),
        )
        .service(
            web::scope("/work_order")
                .wrap(middleware::tenant::Resolver::new())
                .service(routes::work_order::list_handler)
                .service(routes::work_order::item_handler)
                .service(routes::work_order::add_handler)
                .service(routes::work_order::status_handler),
        )
        .service(web::scope("/track").service(routes::work_order::track_handler))
        .service(
            web::scope("/admin")
                .service(web::scope("/tenant").service(routes::tenant::admin_plan_handler)),
        );
}

pub async fn run(
    listener: TcpListener,
    pg_pool: Pool<Postgres>,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let tenant_repository: Arc<dyn TenantRepository> =
        Arc::new(PgTenantRepository::new(pg_pool.clone()));
    let tenant_repository = web::Data::new(tenant_repository);

    let maps_client = maps::http_client(&settings.maps)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    let maps_client = web::Data::new(maps_client);

    let settings = web::Data::new(settings);
    let pg_pool = web::Data::new(pg_pool);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(pg_pool.clone())
            .app_data(tenant_repository.clone())
            .app_data(settings.clone())
            .app_data(maps_client.clone())
            .configure(configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
