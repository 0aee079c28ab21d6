//! list 命令处理器

use super::{CommandContext, CommandHandler};
use crate::core::EnvFile;
use crate::error::Result;
use crate::types::OutputFormat;
use serde::Serialize;

#[derive(Serialize)]
struct Entry<'a> {
    key: &'a str,
    value: &'a str,
}

/// list 命令
pub struct ListCommand {
    env_file: EnvFile,
    format: OutputFormat,
}

impl ListCommand {
    pub fn new(env_file: EnvFile, format: OutputFormat) -> Self {
        Self { env_file, format }
    }
}

impl CommandHandler for ListCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        let doc = self.env_file.read()?;

        match self.format {
            OutputFormat::ENV => {
                for (key, value) in doc.entries() {
                    println!("{}={}", key, value);
                }
            }
            OutputFormat::JSON => {
                let entries: Vec<_> = doc
                    .entries()
                    .map(|(key, value)| Entry { key, value })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            }
        }

        Ok(())
    }
}
