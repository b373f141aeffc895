//! 腾讯云机器翻译（TMT）文本翻译
//!
//! 接口文档：<https://cloud.tencent.com/document/api/551/15619>
//!
//! 请求使用TC3-HMAC-SHA256签名，签名逻辑见`tc_sdk_common::tc3_sign`。
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use tc_sdk::credentials::Credentials;
//! use tc_sdk::translate::{Client, Translator};
//!
//! # async fn run() -> Result<(), tc_sdk::translate::Error> {
//! let client = Client::builder()
//!     .credentials_provider(Arc::new(Credentials::new("AKID...", "secret", None)))
//!     .source_lang("zh")
//!     .target_lang("ja")
//!     .build();
//! let text = client.translate("你好").await?;
//! # Ok(())
//! # }
//! ```

use crate::credentials::{Credentials, CredentialsProvider};
use bon::bon;
use std::sync::Arc;

mod error;
pub use error::Error;

mod config;
pub use config::TranslateConfig;

#[cfg(feature = "blocking")]
pub mod blocking;

mod trans;
mod types_rs;
pub(crate) mod utils;
pub use types_rs::*;

pub const SERVICE: &str = "tmt";
pub const HOST: &str = "tmt.tencentcloudapi.com";
pub const VERSION: &str = "2018-03-21";
pub const ACTION: &str = "TextTranslate";
pub const DEFAULT_ENDPOINT: &str = "https://tmt.tencentcloudapi.com";
pub const DEFAULT_REGION: &str = "ap-guangzhou";
pub const DEFAULT_SOURCE_LANG: &str = "zh";
pub const DEFAULT_TARGET_LANG: &str = "ja";
/// 响应中没有`Response.TargetText`时`translate`返回的值
pub const TRANSLATION_FAILED: &str = "Translation failed";

/// 翻译能力，只有一个操作：输入文本，返回翻译后的文本
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, Error>;
}

/// 构建后不可修改的client配置
#[derive(Clone, Debug)]
pub struct ClientConfig {
    region: String,
    source_lang: String,
    target_lang: String,
    endpoint: String,
}

impl ClientConfig {
    /// 为空时请求不带`X-TC-Region`
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// 实际发送请求的地址，签名中的host始终是[`HOST`]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

pub struct Client {
    credentials_provider: Arc<dyn CredentialsProvider>,
    http_client: reqwest::Client,
    config: ClientConfig,
}

#[bon]
impl Client {
    /// 超时等传输层的配置通过传入的`http_client`设置
    #[builder(on(String, into))]
    pub fn new(
        credentials_provider: Arc<dyn CredentialsProvider>,
        /// [地域列表](https://cloud.tencent.com/document/api/551/15615#.E5.9C.B0.E5.9F.9F.E5.88.97.E8.A1.A8)，可以为空字符串
        #[builder(default = DEFAULT_REGION.to_owned())]
        region: String,
        #[builder(default = DEFAULT_SOURCE_LANG.to_owned())] source_lang: String,
        #[builder(default = DEFAULT_TARGET_LANG.to_owned())] target_lang: String,
        #[builder(default = DEFAULT_ENDPOINT.to_owned())] endpoint: String,
        http_client: Option<reqwest::Client>,
    ) -> Self {
        Self {
            credentials_provider,
            http_client: http_client.unwrap_or_default(),
            config: ClientConfig {
                region,
                source_lang,
                target_lang,
                endpoint,
            },
        }
    }

    pub fn from_config(conf: TranslateConfig) -> Self {
        let creds = Credentials::new(conf.secret_id, conf.secret_key, conf.token);
        Self::builder()
            .credentials_provider(Arc::new(creds))
            .region(conf.region)
            .source_lang(conf.source_lang)
            .target_lang(conf.target_lang)
            .endpoint(conf.endpoint)
            .build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
