//! CLI 参数定义

use crate::config::settings::SettingsOverrides;
use crate::error::{EnvError, Result};
use crate::types::Protocol;
use clap::{Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

/// tunnelenv - 启动隧道并把公网地址写入 .env
#[derive(Parser, Debug)]
#[command(
    name = "tunnelenv",
    version,
    about = "启动隧道并把公网地址写入 .env",
    long_about = "启动 ngrok 隧道指向本地端口，取得公网地址后更新 .env 文件中的对应变量。不带子命令时等同于 start。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 隧道协议 (http/tcp/tls)，默认 http
    #[arg(short = 'P', long = "proto", global = true)]
    pub proto: Option<String>,

    /// 本地端口或 host:port，默认 3000
    #[arg(short = 'p', long = "addr", visible_alias = "port", global = true)]
    pub addr: Option<String>,

    /// .env 文件路径，默认 ../.env
    #[arg(short = 'e', long, global = true)]
    pub env_file: Option<PathBuf>,

    /// 写入隧道地址的变量名，默认 NGROK_SERVERHOST
    #[arg(long, global = true)]
    pub url_key: Option<String>,

    /// 凭证变量名，默认 NGROK_AUTHTOKEN
    #[arg(long, global = true)]
    pub token_key: Option<String>,

    /// 隧道代理可执行文件，默认 ngrok
    #[arg(long, global = true)]
    pub agent: Option<String>,

    /// 设置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 详细输出模式
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// 启动隧道并更新 .env（默认）
    Start,

    /// 获取变量
    Get {
        /// 变量名称
        key: String,
    },

    /// 设置变量（存在则原地替换，否则插入到文件开头）
    Set {
        /// 变量名称
        key: String,
        /// 变量值
        value: String,
    },

    /// 列出变量
    List {
        /// 输出格式 (env/json)
        #[arg(short, long, default_value = "env")]
        format: String,
    },

    /// 检查凭证是否已配置
    Check,

    /// 显示生效的设置
    Config,
}

impl Cli {
    /// 收集命令行覆盖项
    pub fn overrides(&self) -> Result<SettingsOverrides> {
        if let Some(key) = &self.url_key {
            validate_key(key)?;
        }
        if let Some(key) = &self.token_key {
            validate_key(key)?;
        }

        Ok(SettingsOverrides {
            protocol: parse_protocol(self.proto.as_deref())?,
            address: self.addr.clone(),
            agent: self.agent.clone(),
            env_file: self.env_file.clone(),
            url_key: self.url_key.clone(),
            token_key: self.token_key.clone(),
        })
    }
}

/// 解析协议参数
pub fn parse_protocol(proto: Option<&str>) -> Result<Option<Protocol>> {
    proto
        .map(|p| Protocol::parse(p).ok_or_else(|| EnvError::InvalidProtocol(p.to_string())))
        .transpose()
}

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").expect("valid key regex"))
}

/// 变量名不能含 `=` 或换行，否则写回后无法按原样解析
pub fn validate_key(key: &str) -> Result<()> {
    if key_pattern().is_match(key) {
        Ok(())
    } else {
        Err(EnvError::InvalidKey(key.to_string()))
    }
}

/// 值可以含 `=`，但不能跨行
pub fn validate_value(value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        Err(EnvError::InvalidValue("变量值不能包含换行".to_string()))
    } else {
        Ok(())
    }
}
