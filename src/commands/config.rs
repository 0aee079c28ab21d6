//! config 命令处理器：显示生效的设置

use super::{CommandContext, CommandHandler};
use crate::config::settings::Settings;
use crate::error::Result;
use crate::utils::paths::file_exists;
use std::path::PathBuf;

/// config 命令
pub struct ConfigCommand {
    settings: Settings,
    path: PathBuf,
}

impl ConfigCommand {
    pub fn new(settings: Settings, path: PathBuf) -> Self {
        Self { settings, path }
    }
}

impl CommandHandler for ConfigCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        let status = if file_exists(&self.path) { "存在" } else { "不存在，使用默认值" };
        println!("# 设置文件: {} ({})", self.path.display(), status);
        print!("{}", self.settings.to_toml()?);
        Ok(())
    }
}
