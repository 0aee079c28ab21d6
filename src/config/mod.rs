//! 配置：.env 文件格式与工具自身的设置

pub mod format;
pub mod settings;
