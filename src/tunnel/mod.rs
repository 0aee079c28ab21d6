//! 隧道协作方
//!
//! 本工具不实现任何隧道协议，只负责启动外部代理并拿到它报告的公网地址。

use crate::error::Result;
use crate::types::{Protocol, TunnelOptions};
use std::process::{Child, ExitStatus};

pub mod ngrok;

pub use ngrok::NgrokAgent;

/// 启动隧道所需的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelRequest {
    pub protocol: Protocol,
    pub address: String,
    pub authtoken: String,
}

impl TunnelRequest {
    pub fn new(options: &TunnelOptions, authtoken: impl Into<String>) -> Self {
        Self {
            protocol: options.protocol,
            address: options.address.clone(),
            authtoken: authtoken.into(),
        }
    }
}

/// 隧道提供方
pub trait TunnelProvider {
    /// 建立隧道，成功时返回持有公网地址的句柄
    fn connect(&self, request: &TunnelRequest) -> Result<Tunnel>;
}

/// 已建立的隧道
///
/// 持有代理子进程时，drop 会终止该进程。
#[derive(Debug)]
pub struct Tunnel {
    url: String,
    child: Option<Child>,
}

impl Tunnel {
    /// 由子进程承载的隧道
    pub fn running(url: String, child: Child) -> Self {
        Self {
            url,
            child: Some(child),
        }
    }

    /// 不持有进程的隧道
    pub fn detached(url: String) -> Self {
        Self { url, child: None }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// 阻塞直到代理进程退出，返回退出码
    ///
    /// 被信号终止时按 shell 惯例返回 128 + 信号值。
    pub fn wait(mut self) -> Result<i32> {
        match self.child.take() {
            Some(mut child) => {
                let status = child.wait()?;
                Ok(exit_code(&status))
            }
            None => Ok(0),
        }
    }
}

fn exit_code(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

impl Drop for Tunnel {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            tracing::debug!(pid = child.id(), "终止隧道代理进程");
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
