//! 跨平台路径处理工具 (传统原则：常识性接口设计)

use crate::error::{EnvError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 设置文件路径的环境变量
pub const CONFIG_ENV_VAR: &str = "TUNNELENV_CONFIG";

/// 获取工具配置目录：<config_dir>/tunnelenv
pub fn get_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| EnvError::Config("无法找到用户配置目录".to_string()))?;

    Ok(base.join("tunnelenv"))
}

/// 设置文件路径：显式参数 > $TUNNELENV_CONFIG > 默认位置
pub fn get_settings_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Ok(get_config_dir()?.join("config.toml"))
}

/// 检查文件是否存在
pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// 读取文件内容，返回错误时提供详细信息
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => EnvError::FileNotFound(path.to_path_buf()),
        _ => EnvError::Io(std::io::Error::new(
            e.kind(),
            format!("读取文件 {} 失败: {}", path.display(), e),
        )),
    })
}

/// 安全写入文件 (使用临时文件 + 原子替换)
///
/// 目标文件已存在时沿用它的权限位，.env 里通常有凭证。
/// 符号链接先解析到真实文件，替换发生在真实文件所在目录，链接本身保持不变。
pub fn write_file_safe(path: &Path, content: &str) -> Result<()> {
    let resolved = std::fs::canonicalize(path).ok();
    let path = resolved.as_deref().unwrap_or(path);
    let temp_path = temp_path_for(path);

    std::fs::write(&temp_path, content)?;

    if let Ok(metadata) = std::fs::metadata(path) {
        if let Err(e) = std::fs::set_permissions(&temp_path, metadata.permissions()) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e.into());
        }
    }

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}

/// 同目录下的临时文件：`.env` -> `.env.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("env"));
    name.push(".tmp");
    path.with_file_name(name)
}
