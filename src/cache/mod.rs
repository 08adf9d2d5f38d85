//! 缓存层
//!
//! 后端以插件形式注册（moka 内存缓存、redis），启动时按配置选择。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

/// 缓存读取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错，无法判断是否存在
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 声明缓存插件，进程启动时自动注册到插件表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        match <$ty>::new() {
                            Ok(cache) => Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>),
                            Err(e) => Err($crate::errors::MutaError::cache_connection(e)),
                        }
                    })
                }),
            );
        }
    };
}
