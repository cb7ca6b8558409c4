#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use repairdesk::configuration::{get_configuration, DatabaseSettings, MapsSettings, Settings};
use repairdesk::models::{Tenant, TenantPlan};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, Executor, PgConnection, PgPool};

pub fn test_settings() -> Settings {
    Settings {
        database: DatabaseSettings {
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            database_name: "repairdesk".to_string(),
        },
        app_port: 0,
        app_host: "127.0.0.1".to_string(),
        trial_days: 14,
        maps: MapsSettings::default(),
    }
}

/// Pool that never connects unless a query runs. Guarded requests that are
/// rejected must not reach it.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(1))
        .connect_lazy(&test_settings().database.connection_string())
        .expect("valid connection string")
}

pub fn tenant(id: &str, plan: TenantPlan, plan_expires_at: Option<DateTime<Utc>>) -> Tenant {
    Tenant {
        id: id.to_string(),
        name: format!("Shop {id}"),
        plan,
        plan_expires_at,
        created_at: Utc::now() - Duration::days(30),
        updated_at: Utc::now() - Duration::days(30),
        ..Default::default()
    }
}

/// Initializes the full route table over an in-memory tenant repository.
macro_rules! test_app {
    ($repo:expr) => {{
        let repo: std::sync::Arc<dyn repairdesk::repository::TenantRepository> = $repo;
        let settings = $crate::common::test_settings();
        let maps_client = repairdesk::helpers::maps::http_client(&settings.maps).unwrap();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($crate::common::lazy_pool()))
                .app_data(actix_web::web::Data::new(repo))
                .app_data(actix_web::web::Data::new(settings))
                .app_data(actix_web::web::Data::new(maps_client))
                .configure(repairdesk::startup::configure),
        )
        .await
    }};
}

pub(crate) use test_app;

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
}

/// Starts the real server on a fresh database. `None` when Postgres is not reachable.
pub async fn spawn_app() -> Option<TestApp> {
    let mut configuration = get_configuration().expect("Failed to get configuration");

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let server = repairdesk::startup::run(listener, connection_pool.clone(), configuration)
        .await
        .expect("Failed to bind address.");

    let _ = tokio::spawn(server);

    Some(TestApp {
        address,
        db_pool: connection_pool,
    })
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .map_err(|err| sqlx::Error::Migrate(Box::new(err)))?;

    Ok(connection_pool)
}
