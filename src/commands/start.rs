//! start 命令处理器
//!
//! 流程：
//! 1. 从 .env 读取凭证，缺失时在联网前中止
//! 2. 启动隧道，拿到公网地址
//! 3. 把地址写回 .env 的目标键
//! 4. 阻塞直到隧道代理退出

use super::{CommandContext, CommandHandler};
use crate::core::EnvFile;
use crate::error::{EnvError, Result};
use crate::tunnel::{TunnelProvider, TunnelRequest};
use crate::types::TunnelOptions;

/// start 命令
pub struct StartCommand {
    env_file: EnvFile,
    url_key: String,
    token_key: String,
    options: TunnelOptions,
    provider: Box<dyn TunnelProvider>,
}

impl StartCommand {
    pub fn new(
        env_file: EnvFile,
        url_key: String,
        token_key: String,
        options: TunnelOptions,
        provider: Box<dyn TunnelProvider>,
    ) -> Self {
        Self {
            env_file,
            url_key,
            token_key,
            options,
            provider,
        }
    }
}

impl CommandHandler for StartCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let authtoken = self.env_file.require(&self.token_key)?;

        let request = TunnelRequest::new(&self.options, authtoken);
        let tunnel = self.provider.connect(&request)?;

        // 写入失败时 tunnel 被 drop，代理进程随之终止
        let found = self.env_file.upsert(&self.url_key, tunnel.url())?;

        println!(
            "✓ 隧道已启动: 协议 '{}', 地址 '{}'",
            self.options.protocol, self.options.address
        );
        println!("当前公网地址: {}", tunnel.url());
        println!("✓ 已更新 {}", self.env_file.path().display());
        if ctx.verbose {
            let action = if found { "已替换" } else { "已插入到文件开头" };
            println!("  {} {}", self.url_key, action);
            println!("按 Ctrl+C 停止隧道");
        }

        match tunnel.wait()? {
            0 => Ok(()),
            code => Err(EnvError::TunnelExited(code)),
        }
    }
}
