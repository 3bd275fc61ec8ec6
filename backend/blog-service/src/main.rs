use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use blog_service::{handlers, middleware};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "blog-service"
        })),
    }
}

/// Blog Service
///
/// HTTP backend exposing posts, per-post comments, groups and follow
/// relationships.
///
/// # Routes
///
/// - `/api/v1/posts` - list (optionally `?group=`), create, retrieve,
///   update, delete
/// - `/api/v1/posts/{post_id}/comments` - comments scoped to one post
/// - `/api/v1/group` - list/create groups
/// - `/api/v1/follow` - list "who follows me" (optional `?search=`),
///   follow, unfollow
/// - `/api/v1/signup`, `/api/v1/token`, `/api/v1/token/refresh` - accounts
///   and bearer credentials
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match blog_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    auth_core::jwt::initialize_secret(&config.auth.jwt_secret)
        .map_err(|e| anyhow::anyhow!("Failed to initialize JWT secret: {e}"))?;

    // Database pool + schema
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Connected to database, migrations applied");

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/signup", web::post().to(handlers::auth::signup))
            .route("/api/v1/token", web::post().to(handlers::auth::token))
            .route(
                "/api/v1/token/refresh",
                web::post().to(handlers::auth::refresh),
            )
            .service(
                web::scope("/api/v1")
                    .wrap(middleware::AuthMiddleware)
                    .service(
                        web::scope("/posts")
                            .service(
                                web::scope("/{post_id}/comments")
                                    .service(
                                        web::resource("")
                                            .route(web::get().to(handlers::comments::list_comments))
                                            .route(
                                                web::post().to(handlers::comments::create_comment),
                                            ),
                                    )
                                    .service(
                                        web::resource("/{comment_id}")
                                            .route(web::get().to(handlers::comments::get_comment))
                                            .route(
                                                web::put().to(handlers::comments::update_comment),
                                            )
                                            .route(
                                                web::patch().to(handlers::comments::update_comment),
                                            )
                                            .route(
                                                web::delete()
                                                    .to(handlers::comments::delete_comment),
                                            ),
                                    ),
                            )
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::posts::list_posts))
                                    .route(web::post().to(handlers::posts::create_post)),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::posts::get_post))
                                    .route(web::put().to(handlers::posts::update_post))
                                    .route(web::patch().to(handlers::posts::update_post))
                                    .route(web::delete().to(handlers::posts::delete_post)),
                            ),
                    )
                    .service(
                        web::scope("/group")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::groups::list_groups))
                                    .route(web::post().to(handlers::groups::create_group)),
                            )
                            .service(
                                web::resource("/{group_id}")
                                    .route(web::get().to(handlers::groups::get_group)),
                            ),
                    )
                    .service(
                        web::scope("/follow")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::follows::list_follows))
                                    .route(web::post().to(handlers::follows::create_follow)),
                            )
                            .service(
                                web::resource("/{follow_id}")
                                    .route(web::delete().to(handlers::follows::delete_follow)),
                            ),
                    ),
            )
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .workers(4)
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    tokio::select! {
        result = &mut server_task => {
            result.context("HTTP server task panicked")?
                .context("HTTP server failed")?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received, stopping HTTP server");
            server_handle.stop(true).await;
            server_task.await.context("HTTP server task panicked")?
                .context("HTTP server failed")?;
        }
    }

    tracing::info!("blog-service stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}
