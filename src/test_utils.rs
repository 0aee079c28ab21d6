//! 测试工具模块
//!
//! 提供统一的测试环境管理，避免环境变量污染和临时目录管理问题

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// 环境变量守卫 - 自动清理
///
/// 只恢复经由守卫修改过的变量，配合 `#[serial]` 使用。
#[derive(Default)]
pub struct EnvGuard {
    touched: std::cell::RefCell<HashMap<String, Option<String>>>,
}

impl EnvGuard {
    pub fn new() -> Self {
        Self::default()
    }

    fn remember(&self, key: &str) {
        self.touched
            .borrow_mut()
            .entry(key.to_string())
            .or_insert_with(|| env::var(key).ok());
    }

    /// 设置测试环境变量（自动包装为 unsafe）
    pub fn set_var(&self, key: &str, value: &str) {
        self.remember(key);
        unsafe {
            env::set_var(key, value);
        }
    }

    /// 移除环境变量（自动包装为 unsafe）
    pub fn remove_var(&self, key: &str) {
        self.remember(key);
        unsafe {
            env::remove_var(key);
        }
    }
}

impl Drop for EnvGuard {
    /// 释放时恢复原始环境变量
    fn drop(&mut self) {
        for (key, original) in self.touched.borrow().iter() {
            unsafe {
                match original {
                    Some(value) => env::set_var(key, value),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

/// 在目录中写入一个 .env 文件
pub fn write_env_file(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join(".env");
    std::fs::write(&path, content).unwrap();
    path
}

/// 写入一个假的隧道代理脚本，返回其路径
///
/// tests/common/mod.rs 的 fake_agent 与此保持一致。
#[cfg(unix)]
pub fn write_fake_agent(dir: &Path, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-ngrok");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_guard_cleanup() {
        {
            let guard = EnvGuard::new();
            guard.set_var("TUNNELENV_TEST_CLEANUP", "cleanup_test");
            assert_eq!(env::var("TUNNELENV_TEST_CLEANUP").unwrap(), "cleanup_test");
        }
        // guard 被释放后，变量应该被清理
        assert!(env::var("TUNNELENV_TEST_CLEANUP").is_err());
    }
}
