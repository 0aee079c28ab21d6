//! 错误处理模块 (修复原则：明确抛出异常)

use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("文件IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("文件不存在: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("变量未找到: {0}")]
    NotFound(String),

    #[error("凭证缺失: 请在 {} 中设置 {key}", .path.display())]
    CredentialMissing { key: String, path: PathBuf },

    #[error("无效的变量名: {0}")]
    InvalidKey(String),

    #[error("无效的变量值: {0}")]
    InvalidValue(String),

    #[error("无效的隧道协议: {0}")]
    InvalidProtocol(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("命令未找到: {0}")]
    CommandNotFound(String),

    #[error("隧道启动失败: {0}")]
    Tunnel(String),

    #[error("等待隧道地址超时 ({0} 秒)")]
    TunnelTimeout(u64),

    #[error("隧道进程异常退出，退出码 {0}")]
    TunnelExited(i32),

    #[error("JSON序列化错误: {0}")]
    Json(#[from] serde_json::Error),
}

/// 详细的错误报告函数 (透明原则)
impl EnvError {
    /// 报告错误，支持详细/安静模式
    /// verbose = true: 详细错误链
    /// verbose = false: 关键信息，安静模式
    pub fn report(&self, verbose: bool) {
        if verbose {
            eprintln!("❌ 错误: {}", self);

            if let Some(source) = self.source() {
                eprintln!("  └─ 原因: {}", source);
                let mut current = source.source();
                while let Some(next) = current {
                    eprintln!("     └─ {}", next);
                    current = next.source();
                }
            }
        } else {
            match self {
                EnvError::NotFound(key) => eprintln!("未找到变量: {}", key),
                EnvError::Io(err) => eprintln!("文件错误: {}", err),
                EnvError::FileNotFound(path) => eprintln!("文件不存在: {}", path.display()),
                EnvError::CredentialMissing { key, .. } => {
                    eprintln!("Setup {} in your .env file", key)
                }
                _ => eprintln!("错误: {}", self),
            }
        }
    }
}

/// 简化 Result 类型别名
pub type Result<T> = std::result::Result<T, EnvError>;
