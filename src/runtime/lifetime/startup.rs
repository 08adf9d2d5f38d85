use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{MutaError, Result};
use crate::mail::{EmailSender, create_email_sender};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

use super::seed::seed_database;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub mailer: Arc<dyn EmailSender>,
}

async fn build_cache(cache_type: &str) -> Option<Arc<dyn ObjectCache>> {
    let Some(constructor) = get_object_cache_plugin(cache_type) else {
        warn!("Cache backend '{}' not found in registry", cache_type);
        return None;
    };
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", cache_type, e);
            None
        }
    }
}

/// 按配置创建缓存，失败时回退到内存缓存
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();
    warn!("Attempting to create {} cache backend", cache_type);

    if let Some(cache) = build_cache(cache_type).await {
        return Ok(cache);
    }
    if cache_type != "moka" {
        warn!("Falling back to Moka (in-memory) cache");
        if let Some(cache) = build_cache("moka").await {
            return Ok(cache);
        }
    }

    Err(MutaError::cache_plugin_not_found(format!(
        "No cache backend available (tried: {cache_type})"
    )))
}

/// 准备服务器启动的上下文：存储（含迁移与种子数据）、缓存、邮件
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_database(&storage).await;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    let mailer = create_email_sender(&AppConfig::get().smtp);

    Ok(StartupContext {
        storage,
        cache,
        mailer,
    })
}
