use actix_cors::Cors;
use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

use muta_engineering::config::AppConfig;
use muta_engineering::routes;
use muta_engineering::runtime::lifetime;
use muta_engineering::utils::{json_error_handler, query_error_handler};

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allow_any_header()
        .supports_credentials()
        .max_age(config.cors.max_age);

    // 带 cookie 的跨域请求不能使用通配来源
    if config.cors.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.cors.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allowed_methods(config.cors.allowed_methods.iter().map(String::as_str))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let started_at = chrono::Utc::now();

    setup_panic!();
    AppConfig::init().map_err(std::io::Error::other)?;
    let config = AppConfig::get();

    // 初始化日志
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.app.log_level));
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    warn!(
        "Starting {}
        Project: {}
        Version: {}
        Authors: {}",
        config.app.system_name,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(|e| std::io::Error::other(e.format_simple()))?;

    let storage = startup.storage.clone();
    let cache = startup.cache.clone();
    let mailer = startup.mailer.clone();

    debug!(
        "Pre-startup processing completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(started_at)
            .num_milliseconds()
    );

    warn!("Using {} workers for the server", config.server.workers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(build_cors(config))
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add((
                "Keep-Alive",
                format!("timeout={}, max=1000", config.server.timeouts.keep_alive),
            )))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(cache.clone()))
            .app_data(web::Data::new(mailer.clone()))
            .app_data(web::PayloadConfig::new(
                config.server.limits.max_payload_size,
            ))
            .configure(routes::configure_auth_routes)
            .configure(routes::configure_department_routes)
            .configure(routes::configure_faculty_routes)
            .configure(routes::configure_exam_routes)
            .configure(routes::configure_exam_archive_routes)
            .configure(routes::configure_alert_routes)
            .configure(routes::configure_news_routes)
            .configure(routes::configure_support_routes)
            .configure(routes::configure_dashboard_routes)
            .configure(routes::configure_study_plan_routes)
            .configure(routes::configure_media_routes) // 上传文件与文档
            .configure(routes::configure_frontend_routes) // 放在最后作为 fallback
    })
    .keep_alive(std::time::Duration::from_secs(
        config.server.timeouts.keep_alive,
    ))
    .client_request_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_request,
    ))
    .client_disconnect_timeout(std::time::Duration::from_millis(
        config.server.timeouts.client_disconnect,
    ))
    .workers(config.server.workers);

    #[cfg(unix)]
    let server = if let Some(socket_path) = config.unix_socket_path() {
        warn!("Starting server on Unix socket: {}", socket_path);
        if std::path::Path::new(socket_path).exists() {
            std::fs::remove_file(socket_path)?;
        }
        server.bind_uds(socket_path)?
    } else {
        let bind_address = config.server_bind_address();
        warn!("Starting server at http://{}", bind_address);
        server.bind(bind_address)?
    };

    #[cfg(not(unix))]
    let server = {
        let bind_address = config.server_bind_address();
        warn!("Starting server at http://{}", bind_address);
        server.bind(bind_address)?
    };

    let server = server.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Graceful shutdown requested");
        }
    }

    Ok(())
}
