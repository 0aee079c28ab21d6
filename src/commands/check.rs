//! check 命令处理器：确认凭证已配置

use super::{CommandContext, CommandHandler};
use crate::core::EnvFile;
use crate::error::Result;

/// check 命令
pub struct CheckCommand {
    env_file: EnvFile,
    token_key: String,
}

impl CheckCommand {
    pub fn new(env_file: EnvFile, token_key: String) -> Self {
        Self {
            env_file,
            token_key,
        }
    }
}

impl CommandHandler for CheckCommand {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        self.env_file.require(&self.token_key)?;
        if ctx.verbose {
            println!(
                "✓ {} 已在 {} 中配置",
                self.token_key,
                self.env_file.path().display()
            );
        }
        Ok(())
    }
}
