pub mod client;
pub mod consts;
pub mod dispatch;
pub mod server;
pub mod source;
