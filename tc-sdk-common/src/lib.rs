//! tc-sdk 各产品共用的签名和辅助代码

pub mod error;
pub mod helper;
pub mod tc3_sign;

pub use error::Error;
