mod command_result;
pub mod context;
pub mod extract;
pub mod helper;
pub mod init;
pub mod status;
pub mod translate;

pub use command_result::*;
