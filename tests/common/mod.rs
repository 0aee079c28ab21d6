//! 集成测试共用的辅助函数

#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 创建临时测试环境：<tmp>/.env 与工作目录 <tmp>/app
pub fn create_test_env(env_content: &str) -> TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::create_dir(temp_dir.path().join("app")).unwrap();
    fs::write(temp_dir.path().join(".env"), env_content).unwrap();
    temp_dir
}

pub fn env_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join(".env")
}

pub fn read_env(temp_dir: &TempDir) -> String {
    fs::read_to_string(env_path(temp_dir)).unwrap()
}

/// 在 <tmp>/app 下运行，设置文件指向一个不存在的路径，隔离宿主配置
pub fn tunnelenv(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tunnelenv"));
    cmd.current_dir(temp_dir.path().join("app"))
        .env("TUNNELENV_CONFIG", temp_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

/// 写入假的隧道代理脚本，与 src/test_utils.rs 的 write_fake_agent 保持一致
#[cfg(unix)]
pub fn fake_agent(dir: &Path, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-ngrok");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}
