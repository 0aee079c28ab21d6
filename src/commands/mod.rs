//! 命令处理器
//!
//! 每个命令一个模块，实现 CommandHandler trait

use crate::error::Result;

pub mod check;
pub mod config;
pub mod get;
pub mod list;
pub mod set;
pub mod start;

pub use check::CheckCommand;
pub use config::ConfigCommand;
pub use get::GetCommand;
pub use list::ListCommand;
pub use set::SetCommand;
pub use start::StartCommand;

/// 命令上下文
#[derive(Debug, Default)]
pub struct CommandContext {
    pub verbose: bool,
}

/// 命令处理器 trait
pub trait CommandHandler {
    /// 执行命令
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}
