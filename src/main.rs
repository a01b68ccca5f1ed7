use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use botica::config::Config;
use botica::middleware::{RateLimiter, RequestId, SessionAuth};
use botica::modules::catalog::{controllers as catalog_controllers, ProductRepository, ProductService};
use botica::modules::customers::{
    controllers as customer_controllers, CustomerRepository, CustomerService,
};
use botica::modules::orders::{controllers as order_controllers, OrderRepository, OrderService};
use botica::modules::pos::{
    controllers as pos_controllers, CartStore, SaleRepository, SaleService, TillRepository,
    TillService,
};
use botica::modules::reports::{
    controllers as report_controllers, MySqlSalesStore, ReportService,
};
use botica::modules::saft::{controllers as saft_controllers, ExportRepository, SaftService};
use botica::modules::users::{
    controllers as user_controllers, AuthService, SessionRepository, UserRepository, UserService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "botica=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Botica pharmacy management backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool and apply migrations
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Wire repositories and services
    let product_service = Arc::new(ProductService::new(ProductRepository::new(db_pool.clone())));
    let customer_service = Arc::new(CustomerService::new(
        CustomerRepository::new(db_pool.clone()),
        SessionRepository::new(db_pool.clone()),
        config.security.session_ttl_hours,
    ));
    let order_service = Arc::new(OrderService::new(
        OrderRepository::new(db_pool.clone()),
        ProductRepository::new(db_pool.clone()),
        CustomerRepository::new(db_pool.clone()),
    ));

    let cart_store = Arc::new(CartStore::new());
    let till_service = Arc::new(TillService::new(
        TillRepository::new(db_pool.clone()),
        SaleRepository::new(db_pool.clone()),
    ));
    let sale_service = Arc::new(SaleService::new(
        cart_store.clone(),
        SaleRepository::new(db_pool.clone()),
        ProductRepository::new(db_pool.clone()),
        CustomerRepository::new(db_pool.clone()),
        till_service.clone(),
    ));

    let report_service = Arc::new(ReportService::new(
        TillRepository::new(db_pool.clone()),
        SaleRepository::new(db_pool.clone()),
        Arc::new(MySqlSalesStore::new(db_pool.clone())),
        config.app.report_max_range_days,
    ));
    let saft_service = Arc::new(SaftService::new(
        ExportRepository::new(db_pool.clone()),
        config.company.clone(),
        config.app.report_max_range_days,
    ));

    let auth_service = Arc::new(AuthService::new(
        UserRepository::new(db_pool.clone()),
        SessionRepository::new(db_pool.clone()),
        config.security.session_ttl_hours,
    ));
    let user_service = Arc::new(UserService::new(UserRepository::new(db_pool.clone())));

    let company = config.company.clone();
    let rate_limit = config.security.rate_limit_per_minute;
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let pool_for_auth = db_pool.clone();

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(company.clone()))
            .app_data(web::Data::new(product_service.clone()))
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(till_service.clone()))
            .app_data(web::Data::new(sale_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .app_data(web::Data::new(saft_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .wrap(SessionAuth::new(pool_for_auth.clone()))
            .wrap(RateLimiter::new(rate_limit))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .wrap(cors)
            .configure(catalog_controllers::configure)
            .configure(customer_controllers::configure)
            .configure(order_controllers::configure)
            // The /storefront/orders scope must come before the broader
            // /storefront scope; actix does not backtrack out of a scope
            .configure(order_controllers::configure_storefront)
            .configure(customer_controllers::configure_storefront)
            .configure(pos_controllers::configure)
            .configure(report_controllers::configure)
            .configure(saft_controllers::configure)
            .configure(user_controllers::configure_auth)
            .configure(user_controllers::configure_users)
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "botica"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Botica Pharmacy Management Backend",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
