//! 核心存储引擎 (模块原则：清晰分离的存储逻辑)
//!
//! 每次操作都是一次完整的读-改-写，不做缓存。

use crate::config::format::dotenv::{DotenvParser, EnvDocument};
use crate::error::{EnvError, Result};
use crate::utils::paths::{read_file, write_file_safe};
use std::path::{Path, PathBuf};

/// 绑定到单个 .env 文件的存储
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取并解析文件
    pub fn read(&self) -> Result<EnvDocument> {
        let content = read_file(&self.path)?;
        Ok(DotenvParser::parse(&content))
    }

    /// 获取单个变量
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.get(key).map(str::to_string))
    }

    /// 获取必需的非空变量（如凭证）
    pub fn require(&self, key: &str) -> Result<String> {
        match self.get(key)? {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(EnvError::CredentialMissing {
                key: key.to_string(),
                path: self.path.clone(),
            }),
        }
    }

    /// 更新或插入变量，返回该键此前是否存在
    ///
    /// 读取失败时不会触碰文件。
    pub fn upsert(&self, key: &str, value: &str) -> Result<bool> {
        let doc = self.read()?;
        let (next, found) = doc.upsert(key, value);

        write_file_safe(&self.path, &DotenvParser::serialize(&next))?;

        tracing::debug!(
            path = %self.path.display(),
            key,
            found,
            "已更新 .env 文件"
        );
        Ok(found)
    }
}
