//! 工具设置
//!
//! 负责设置文件的加载和命令行覆盖。优先级：命令行 > 设置文件 > 内置默认值

use crate::error::{EnvError, Result};
use crate::types::{Protocol, TunnelOptions};
use crate::utils::paths::{file_exists, read_file};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 设置文件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tunnel: TunnelSettings,
    pub env_file: EnvFileSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelSettings {
    /// 默认协议
    pub protocol: Protocol,
    /// 本地端口或 host:port
    pub address: String,
    /// 隧道代理可执行文件
    pub agent: String,
    /// 等待公网地址的超时（秒）
    pub start_timeout_secs: u64,
}

impl Default for TunnelSettings {
    fn default() -> Self {
        let options = TunnelOptions::default();
        Self {
            protocol: options.protocol,
            address: options.address,
            agent: "ngrok".to_string(),
            start_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvFileSettings {
    /// .env 文件路径，相对于当前工作目录
    pub path: PathBuf,
    /// 写入隧道地址的键
    pub url_key: String,
    /// 凭证所在的键
    pub token_key: String,
}

impl Default for EnvFileSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("../.env"),
            url_key: "NGROK_SERVERHOST".to_string(),
            token_key: "NGROK_AUTHTOKEN".to_string(),
        }
    }
}

/// 命令行覆盖项，`None` 表示沿用设置文件
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub protocol: Option<Protocol>,
    pub address: Option<String>,
    pub agent: Option<String>,
    pub env_file: Option<PathBuf>,
    pub url_key: Option<String>,
    pub token_key: Option<String>,
}

impl Settings {
    /// 从文件加载设置，文件不存在时使用默认值
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !file_exists(path) {
            tracing::debug!(path = %path.display(), "设置文件不存在，使用默认值");
            return Ok(Self::default());
        }

        let content = read_file(path)?;
        let settings = toml::from_str(&content)
            .map_err(|e| EnvError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "已加载设置文件");
        Ok(settings)
    }

    /// 应用命令行覆盖
    pub fn apply(&mut self, overrides: SettingsOverrides) {
        if let Some(protocol) = overrides.protocol {
            self.tunnel.protocol = protocol;
        }
        if let Some(address) = overrides.address {
            self.tunnel.address = address;
        }
        if let Some(agent) = overrides.agent {
            self.tunnel.agent = agent;
        }
        if let Some(path) = overrides.env_file {
            self.env_file.path = path;
        }
        if let Some(key) = overrides.url_key {
            self.env_file.url_key = key;
        }
        if let Some(key) = overrides.token_key {
            self.env_file.token_key = key;
        }
    }

    pub fn tunnel_options(&self) -> TunnelOptions {
        TunnelOptions {
            protocol: self.tunnel.protocol,
            address: self.tunnel.address.clone(),
        }
    }

    pub fn start_timeout(&self) -> Duration {
        Duration::from_secs(self.tunnel.start_timeout_secs)
    }

    /// 序列化为 TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| EnvError::Config(e.to_string()))
    }
}
