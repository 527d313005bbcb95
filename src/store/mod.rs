//! # 配置存储层
//!
//! 管理三类持久化记录：浏览器配置列表、分组列表和全局键值数据。
//!
//! ## 主要功能
//! - **配置 CRUD**: 添加、替换、删除浏览器配置，id 单调分配
//! - **整体写入**: 每次变更都重写整个集合，避免部分合并引起的竞态
//! - **原生镜像**: 存在原生通道时，把变更结果同步给宿主（仅尽力而为）
//! - **损坏恢复**: 持久化数据损坏时本地重置为空默认值，不向调用方报错
//!
//! ## 模块结构
//! - `backend`: 抽象键值持久化能力及文件/内存实现
//! - `config_store`: 存储逻辑实现

pub mod backend;
pub mod config_store;

pub use backend::{FileBackend, MemoryBackend, StoreBackend};
pub use config_store::{ConfigStore, GLOBAL_KEY, GROUPS_KEY, PROFILES_KEY};
