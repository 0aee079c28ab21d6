//! 核心数据结构定义 (表达原则：用数据结构表达逻辑)

use serde::{Deserialize, Serialize};
use std::fmt;

/// 隧道协议
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Tcp,
    Tls,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Tcp => write!(f, "tcp"),
            Protocol::Tls => write!(f, "tls"),
        }
    }
}

impl Protocol {
    /// 从字符串转换
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "http" => Some(Protocol::Http),
            "tcp" => Some(Protocol::Tcp),
            "tls" => Some(Protocol::Tls),
            _ => None,
        }
    }
}

/// 隧道选项，默认 `{protocol: http, address: 3000}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelOptions {
    pub protocol: Protocol,
    /// 本地端口或 host:port
    pub address: String,
}

impl Default for TunnelOptions {
    fn default() -> Self {
        Self {
            protocol: Protocol::Http,
            address: "3000".to_string(),
        }
    }
}

/// 输出格式类型
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    ENV,
    JSON,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "j" => OutputFormat::JSON,
            _ => OutputFormat::ENV,
        }
    }
}
