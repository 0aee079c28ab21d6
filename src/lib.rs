//! tunnelenv - 启动隧道并把公网地址写入 .env
//!
//! 核心是 `.env` 文件的幂等 upsert：保留无关行和顺序，已存在的键原地替换，
//! 不存在的键插入到文件开头。隧道本身由外部代理进程提供。

// 数据结构
pub mod types;

// 错误处理
pub mod error;

// 文件格式与设置
pub mod config;

// 读-改-写存储
pub mod core;

// 隧道协作方
pub mod tunnel;

// 命令层
pub mod commands;

// CLI 定义
pub mod cli;

// 应用程序容器
pub mod app;

pub mod utils;

#[cfg(test)]
pub mod test_utils;

// 重新导出常用类型
pub use config::format::dotenv::{DotenvParser, EnvDocument, EnvLine};
pub use crate::core::EnvFile;
pub use error::{EnvError, Result};
pub use types::{Protocol, TunnelOptions};
