//! Credentials and CredentialsProvider definitions.
//!
//! 构建client的时候需要传入实现了CredentialsProvider trait的类型，每次请求签名前都会调用一次`load`，
//! 所以临时密钥（STS token）过期后，provider返回新的Credentials即可，不需要重新构建client。
//!
//! `Credentials`本身也实现了CredentialsProvider，固定密钥直接传入即可。
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use tc_sdk::credentials::{Credentials, EnvCredentialsProvider};
//! use tc_sdk::translate;
//!
//! // 固定密钥
//! let client = translate::Client::builder()
//!     .credentials_provider(Arc::new(Credentials::new("AKID...", "secret", None)))
//!     .build();
//!
//! // 从环境变量TENCENTCLOUD_SECRET_ID、TENCENTCLOUD_SECRET_KEY、TENCENTCLOUD_TOKEN读取
//! let client = translate::Client::builder()
//!     .credentials_provider(Arc::new(EnvCredentialsProvider))
//!     .region("ap-shanghai")
//!     .build();
//! ```

use std::collections::HashMap;
use std::env;

pub const TENCENTCLOUD_SECRET_ID: &str = "TENCENTCLOUD_SECRET_ID";
pub const TENCENTCLOUD_SECRET_KEY: &str = "TENCENTCLOUD_SECRET_KEY";
pub const TENCENTCLOUD_TOKEN: &str = "TENCENTCLOUD_TOKEN";
pub const TENCENTCLOUD_SECURITY_TOKEN: &str = "TENCENTCLOUD_SECURITY_TOKEN";

#[derive(Clone)]
pub struct Credentials {
    pub secret_id: String,
    pub secret_key: String,
    pub token: Option<String>,
}

impl Credentials {
    pub fn new(
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            token,
        }
    }

    /// 读取环境变量，token可选，依次尝试`TENCENTCLOUD_TOKEN`和`TENCENTCLOUD_SECURITY_TOKEN`
    pub fn from_env() -> Result<Self, CredentialsError> {
        // 非UTF-8的变量直接忽略，env::vars()遇到会panic
        let envs = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self::from_env_vars(&envs)
    }

    /// 和[`Credentials::from_env`]相同，但从传入的环境变量中读取，值为空字符串的变量视为未设置
    pub fn from_env_vars(envs: &HashMap<String, String>) -> Result<Self, CredentialsError> {
        let get = |k: &str| envs.get(k).filter(|s| !s.is_empty()).cloned();

        let secret_id = get(TENCENTCLOUD_SECRET_ID).ok_or_else(|| {
            CredentialsError::Provider(format!("env {} is not set", TENCENTCLOUD_SECRET_ID))
        })?;
        let secret_key = get(TENCENTCLOUD_SECRET_KEY).ok_or_else(|| {
            CredentialsError::Provider(format!("env {} is not set", TENCENTCLOUD_SECRET_KEY))
        })?;
        let token = get(TENCENTCLOUD_TOKEN).or_else(|| get(TENCENTCLOUD_SECURITY_TOKEN));

        Ok(Self::new(secret_id, secret_key, token))
    }
}

// secret_key和token不输出
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"******")
            .field("token", &self.token.as_ref().map(|_| "******"))
            .finish()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CredentialsError {
    #[error("failed to load credentials: {0}")]
    Provider(String),
}

#[async_trait::async_trait]
pub trait CredentialsProvider: Send + Sync {
    async fn load(&self) -> Result<Credentials, CredentialsError>;
}

#[async_trait::async_trait]
impl CredentialsProvider for Credentials {
    async fn load(&self) -> Result<Credentials, CredentialsError> {
        Ok(self.clone())
    }
}

/// 每次调用都重新读取环境变量
#[derive(Debug, Default)]
pub struct EnvCredentialsProvider;

#[async_trait::async_trait]
impl CredentialsProvider for EnvCredentialsProvider {
    async fn load(&self) -> Result<Credentials, CredentialsError> {
        Credentials::from_env()
    }
}

#[test]
fn credentials_debug_test() {
    let creds = Credentials::new("AKID", "secret", Some("token".to_owned()));
    let s = format!("{:?}", creds);
    assert!(s.contains("AKID"));
    assert!(!s.contains("secret\""));
    assert!(!s.contains("\"token\""));
}

#[cfg(test)]
fn test_envs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn from_env_vars_test() {
    let envs = test_envs(&[
        (TENCENTCLOUD_SECRET_ID, "AKID"),
        (TENCENTCLOUD_SECRET_KEY, "secret"),
        (TENCENTCLOUD_TOKEN, "tok"),
        (TENCENTCLOUD_SECURITY_TOKEN, "sec-tok"),
    ]);
    let creds = Credentials::from_env_vars(&envs).unwrap();
    assert_eq!(creds.secret_id, "AKID");
    assert_eq!(creds.secret_key, "secret");
    assert_eq!(creds.token.as_deref(), Some("tok"));

    // TENCENTCLOUD_TOKEN为空时使用TENCENTCLOUD_SECURITY_TOKEN
    let envs = test_envs(&[
        (TENCENTCLOUD_SECRET_ID, "AKID"),
        (TENCENTCLOUD_SECRET_KEY, "secret"),
        (TENCENTCLOUD_TOKEN, ""),
        (TENCENTCLOUD_SECURITY_TOKEN, "sec-tok"),
    ]);
    let creds = Credentials::from_env_vars(&envs).unwrap();
    assert_eq!(creds.token.as_deref(), Some("sec-tok"));

    let envs = test_envs(&[
        (TENCENTCLOUD_SECRET_ID, "AKID"),
        (TENCENTCLOUD_SECRET_KEY, "secret"),
        (TENCENTCLOUD_SECURITY_TOKEN, "sec-tok"),
    ]);
    let creds = Credentials::from_env_vars(&envs).unwrap();
    assert_eq!(creds.token.as_deref(), Some("sec-tok"));

    let envs = test_envs(&[
        (TENCENTCLOUD_SECRET_ID, "AKID"),
        (TENCENTCLOUD_SECRET_KEY, "secret"),
        (TENCENTCLOUD_TOKEN, ""),
    ]);
    let creds = Credentials::from_env_vars(&envs).unwrap();
    assert_eq!(creds.token, None);
}

#[test]
fn from_env_vars_missing_test() {
    assert!(matches!(
        Credentials::from_env_vars(&HashMap::new()),
        Err(CredentialsError::Provider(_))
    ));

    let envs = test_envs(&[(TENCENTCLOUD_SECRET_ID, "AKID")]);
    match Credentials::from_env_vars(&envs) {
        Err(CredentialsError::Provider(msg)) => assert!(msg.contains(TENCENTCLOUD_SECRET_KEY)),
        Ok(_) => panic!("secret key is missing"),
    }

    let envs = test_envs(&[
        (TENCENTCLOUD_SECRET_ID, ""),
        (TENCENTCLOUD_SECRET_KEY, "secret"),
    ]);
    assert!(Credentials::from_env_vars(&envs).is_err());
}
