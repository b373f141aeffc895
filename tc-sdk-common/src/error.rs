#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("error: {0}")]
    Common(String),
    #[error("invalid header `{name}`: {message}")]
    InvalidHeader { name: String, message: String },
}
