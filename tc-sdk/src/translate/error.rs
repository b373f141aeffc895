use crate::credentials::CredentialsError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("error: {0}")]
    Common(String),
    #[error("request api failed: {code}, message: {message}")]
    RequestAPIFailed { code: String, message: String },
    #[error("invalid header `{name}`: {message}")]
    InvalidHeader { name: String, message: String },
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("credentials error: {0}")]
    Credentials(#[from] CredentialsError),
}

impl From<tc_sdk_common::Error> for Error {
    fn from(e: tc_sdk_common::Error) -> Self {
        match e {
            tc_sdk_common::Error::Common(msg) => Error::Common(msg),
            tc_sdk_common::Error::InvalidHeader { name, message } => {
                Error::InvalidHeader { name, message }
            }
        }
    }
}
