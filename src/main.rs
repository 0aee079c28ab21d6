//! tunnelenv 主程序入口
//!
//! 设计原则：
//! - 模块化：入口代码简洁，逻辑委托给各模块
//! - 错误处理：详细/安静错误模式，通过 --verbose 切换

use clap::Parser;
use tunnelenv::app::Application;
use tunnelenv::cli::Cli;
use tunnelenv::error::Result;
use tunnelenv::utils::logging;

fn main() {
    // 解析 CLI 参数
    let cli = Cli::parse();
    let verbose = cli.verbose;

    logging::init_tracing(verbose);
    tracing::debug!(?cli, "命令行参数");

    if let Err(e) = run(cli) {
        e.report(verbose);
        std::process::exit(1);
    }
}

/// 组装并运行命令
fn run(cli: Cli) -> Result<()> {
    let app = Application::from_cli(&cli)?;
    app.run(cli.command)
}
