//! 应用程序容器
//!
//! 负责把命令行和设置文件组装成具体的命令处理器

use crate::cli::{self, Cli, Commands};
use crate::commands::{
    CheckCommand, CommandContext, CommandHandler, ConfigCommand, GetCommand, ListCommand,
    SetCommand, StartCommand,
};
use crate::config::settings::Settings;
use crate::core::EnvFile;
use crate::error::Result;
use crate::tunnel::NgrokAgent;
use crate::types::OutputFormat;
use crate::utils::paths;
use std::path::PathBuf;

/// 应用程序
pub struct Application {
    settings: Settings,
    settings_path: PathBuf,
    verbose: bool,
}

impl Application {
    /// 加载设置并应用命令行覆盖
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let settings_path = paths::get_settings_path(cli.config.as_deref())?;
        let mut settings = Settings::load_from_file(&settings_path)?;
        settings.apply(cli.overrides()?);

        tracing::debug!(?settings, "生效的设置");
        Ok(Self {
            settings,
            settings_path,
            verbose: cli.verbose,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn env_file(&self) -> EnvFile {
        EnvFile::new(self.settings.env_file.path.clone())
    }

    /// 为子命令创建处理器，未指定子命令时为 start
    pub fn handler(&self, command: Option<Commands>) -> Result<Box<dyn CommandHandler>> {
        let env_file = self.env_file();
        let env = &self.settings.env_file;

        let handler: Box<dyn CommandHandler> = match command.unwrap_or(Commands::Start) {
            Commands::Start => {
                let agent = NgrokAgent::new(
                    self.settings.tunnel.agent.clone(),
                    self.settings.start_timeout(),
                );
                Box::new(StartCommand::new(
                    env_file,
                    env.url_key.clone(),
                    env.token_key.clone(),
                    self.settings.tunnel_options(),
                    Box::new(agent),
                ))
            }
            Commands::Get { key } => {
                cli::validate_key(&key)?;
                Box::new(GetCommand::new(env_file, key))
            }
            Commands::Set { key, value } => {
                cli::validate_key(&key)?;
                cli::validate_value(&value)?;
                Box::new(SetCommand::new(env_file, key, value))
            }
            Commands::List { format } => {
                Box::new(ListCommand::new(env_file, OutputFormat::from(format.as_str())))
            }
            Commands::Check => Box::new(CheckCommand::new(env_file, env.token_key.clone())),
            Commands::Config => Box::new(ConfigCommand::new(
                self.settings.clone(),
                self.settings_path.clone(),
            )),
        };

        Ok(handler)
    }

    /// 执行命令
    pub fn run(&self, command: Option<Commands>) -> Result<()> {
        let ctx = CommandContext {
            verbose: self.verbose,
        };
        self.handler(command)?.execute(&ctx)
    }
}
