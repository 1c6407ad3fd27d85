// 服务器模块入口
// 提供监听、接受循环和连接处理功能

pub mod connection;
pub mod listener;

// Rust 不允许 loop 作为模块名（关键字），改用 server_loop
#[path = "loop.rs"]
pub mod server_loop;

// 重新导出常用类型
pub use listener::create_listener;
pub use server_loop::start_server_loop;
