//! 穆塔大学工学院门户后端
//!
//! 公开页面所需的院系、教师、考试、考试档案、学术提醒与新闻数据，
//! 管理后台的增删改，以及技术支持工单。基于 Actix Web 与 SeaORM。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `mail`: 工单回复邮件
//! - `middlewares`: 认证、授权与限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 启动、种子数据与关闭
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod mail;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
