//! ngrok 代理
//!
//! 以子进程方式运行 ngrok，从 JSON 格式的 stdout 日志里读出隧道地址：
//!
//! ```text
//! ngrok http 3000 --log stdout --log-format json
//! {"lvl":"info","msg":"started tunnel","url":"https://xxxx.ngrok-free.app",...}
//! ```
//!
//! 凭证通过子进程的 `NGROK_AUTHTOKEN` 环境变量传入，不出现在命令行上。

use super::{Tunnel, TunnelProvider, TunnelRequest};
use crate::error::{EnvError, Result};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// ngrok 读取凭证的环境变量
const AUTHTOKEN_ENV: &str = "NGROK_AUTHTOKEN";

/// 一条 ngrok 日志
#[derive(Debug, Deserialize)]
struct LogRecord {
    #[serde(default)]
    lvl: String,
    #[serde(default)]
    msg: String,
    url: Option<String>,
    err: Option<String>,
}

/// 日志中我们关心的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Started(String),
    Failed(String),
    Other,
}

/// 解析一行日志，非 JSON 行返回 `None`
pub fn parse_log_line(line: &str) -> Option<LogEvent> {
    let record: LogRecord = serde_json::from_str(line.trim()).ok()?;

    if record.msg == "started tunnel" {
        if let Some(url) = record.url.filter(|u| !u.is_empty()) {
            return Some(LogEvent::Started(url));
        }
    }

    let err = record.err.filter(|e| !e.is_empty() && e != "<nil>");
    if err.is_some() || matches!(record.lvl.as_str(), "eror" | "crit") {
        return Some(LogEvent::Failed(err.unwrap_or(record.msg)));
    }

    Some(LogEvent::Other)
}

/// ngrok 代理
#[derive(Debug, Clone)]
pub struct NgrokAgent {
    program: String,
    start_timeout: Duration,
}

impl NgrokAgent {
    pub fn new(program: impl Into<String>, start_timeout: Duration) -> Self {
        Self {
            program: program.into(),
            start_timeout,
        }
    }

    fn command(&self, request: &TunnelRequest) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(request.protocol.to_string())
            .arg(&request.address)
            .args(["--log", "stdout", "--log-format", "json"])
            .env(AUTHTOKEN_ENV, &request.authtoken);

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd
    }

    fn spawn(&self, request: &TunnelRequest) -> Result<Child> {
        self.command(request).spawn().map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => EnvError::CommandNotFound(format!(
                "{}: {} (请确保命令在 PATH 中或使用完整路径)",
                self.program, e
            )),
            _ => EnvError::Io(e),
        })
    }
}

impl TunnelProvider for NgrokAgent {
    fn connect(&self, request: &TunnelRequest) -> Result<Tunnel> {
        tracing::info!(
            program = %self.program,
            protocol = %request.protocol,
            address = %request.address,
            "启动隧道代理"
        );

        let mut child = self.spawn(request)?;
        let Some(stdout) = child.stdout.take() else {
            stop(&mut child);
            return Err(EnvError::Tunnel("无法读取隧道进程输出".to_string()));
        };

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || watch_log(stdout, tx));

        let outcome = match rx.recv_timeout(self.start_timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => {
                Err(EnvError::TunnelTimeout(self.start_timeout.as_secs()))
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(EnvError::Tunnel("隧道进程输出意外结束".to_string()))
            }
        };

        match outcome {
            Ok(url) => {
                tracing::info!(url = %url, pid = child.id(), "隧道已建立");
                Ok(Tunnel::running(url, child))
            }
            Err(e) => {
                stop(&mut child);
                Err(e)
            }
        }
    }
}

/// 读取代理输出直到拿到地址；之后继续读完，避免管道写满阻塞代理
fn watch_log(stdout: impl Read, tx: Sender<Result<String>>) {
    let mut reported = false;
    let mut last_error = None;

    for line in BufReader::new(stdout).lines() {
        let Ok(line) = line else { break };
        tracing::trace!(line = %line, "ngrok");

        if reported {
            continue;
        }
        match parse_log_line(&line) {
            Some(LogEvent::Started(url)) => {
                reported = true;
                let _ = tx.send(Ok(url));
            }
            Some(LogEvent::Failed(message)) => {
                tracing::warn!(error = %message, "隧道代理报告错误");
                last_error = Some(message);
            }
            Some(LogEvent::Other) | None => {}
        }
    }

    if !reported {
        let message = last_error.unwrap_or_else(|| "隧道进程在报告地址前退出".to_string());
        let _ = tx.send(Err(EnvError::Tunnel(message)));
    }
}

fn stop(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
