//! set 命令处理器

use super::{CommandContext, CommandHandler};
use crate::core::EnvFile;
use crate::error::Result;

/// set 命令
pub struct SetCommand {
    env_file: EnvFile,
    key: String,
    value: String,
}

impl SetCommand {
    pub fn new(env_file: EnvFile, key: String, value: String) -> Self {
        Self {
            env_file,
            key,
            value,
        }
    }
}

impl CommandHandler for SetCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let found = self.env_file.upsert(&self.key, &self.value)?;
        if ctx.verbose {
            let action = if found { "已更新" } else { "已新增" };
            println!("✓ {}变量 {} = {}", action, self.key, self.value);
        }
        Ok(())
    }
}
