//! 核心：.env 文件的读-改-写

pub mod store;

pub use store::EnvFile;
