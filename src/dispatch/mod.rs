//! # 命令分发层
//!
//! 命令桥本体：把抽象的浏览器控制命令路由到原生通道或启动器 REST 服务，
//! 并把两条路径的结果归一成同一个形状。
//!
//! ## 主要功能
//! - **传输选择**: 构造时探测一次传输方式，进程内不再变化
//! - **回调关联**: 原生调用通过关联令牌与异步响应配对
//! - **超时竞速**: 每个未决调用都受截止时间约束，超时后放弃而不取消
//! - **结果归一**: 两条路径统一返回 `{ data: <payload> }`
//!
//! ## 模块结构
//! - `command`: 封闭的命令枚举及宿主协议拼写
//! - `race`: 超时竞速组合子
//! - `dispatcher`: 分发器实现

pub mod command;
pub mod dispatcher;
pub mod race;

pub use command::Command;
pub use dispatcher::{CommandDispatcher, Response, REMOTE_BROWSER_VERSION};
pub use race::race;
