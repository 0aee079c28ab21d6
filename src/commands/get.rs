//! get 命令处理器

use super::{CommandContext, CommandHandler};
use crate::core::EnvFile;
use crate::error::{EnvError, Result};

/// get 命令
pub struct GetCommand {
    env_file: EnvFile,
    key: String,
}

impl GetCommand {
    pub fn new(env_file: EnvFile, key: String) -> Self {
        Self { env_file, key }
    }
}

impl CommandHandler for GetCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        match self.env_file.get(&self.key)? {
            Some(value) => {
                println!("{}", value);
                Ok(())
            }
            None => Err(EnvError::NotFound(self.key.clone())),
        }
    }
}
