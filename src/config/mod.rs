//! 应用配置
//!
//! 配置来源（优先级从低到高）：`config.toml`、`config.{APP_ENV}.toml`、
//! `MUTA_` 前缀环境变量，以及少量常用环境变量的显式覆盖。

mod r#impl;
mod structs;

pub use structs::*;
