//! 同步版本的文本翻译client，基于`reqwest::blocking`
//!
//! 不能在async runtime中使用
//!
//! ```no_run
//! use tc_sdk::translate::blocking::{Client, Translator};
//!
//! let client = Client::builder()
//!     .secret_id("AKID...")
//!     .secret_key("secret")
//!     .build();
//! let text = client.translate("你好").unwrap();
//! ```

use super::types_rs::Payload;
use super::utils::{extract_target_text, parse_json_body, prepare_request};
use super::{
    ClientConfig, DEFAULT_ENDPOINT, DEFAULT_REGION, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG,
    Error, TranslateConfig,
};
use crate::credentials::Credentials;
use bon::bon;
use serde_json::Value;
use tc_sdk_common::helper::now_timestamp;

/// 同步的翻译能力
pub trait Translator {
    fn translate(&self, text: &str) -> Result<String, Error>;
}

pub struct Client {
    credentials: Credentials,
    http_client: reqwest::blocking::Client,
    config: ClientConfig,
}

#[bon]
impl Client {
    #[builder(on(String, into))]
    pub fn new(
        secret_id: String,
        secret_key: String,
        token: Option<String>,
        #[builder(default = DEFAULT_REGION.to_owned())] region: String,
        #[builder(default = DEFAULT_SOURCE_LANG.to_owned())] source_lang: String,
        #[builder(default = DEFAULT_TARGET_LANG.to_owned())] target_lang: String,
        #[builder(default = DEFAULT_ENDPOINT.to_owned())] endpoint: String,
        http_client: Option<reqwest::blocking::Client>,
    ) -> Self {
        Self {
            credentials: Credentials::new(secret_id, secret_key, token.filter(|s| !s.is_empty())),
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
        Self::builder()
            .secret_id(conf.secret_id)
            .secret_key(conf.secret_key)
            .maybe_token(conf.token)
            .region(conf.region)
            .source_lang(conf.source_lang)
            .target_lang(conf.target_lang)
            .endpoint(conf.endpoint)
            .build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, text: &str) -> Result<Value, Error> {
        let payload = Payload {
            source_text: text,
            source: self.config.source_lang(),
            target: self.config.target_lang(),
            project_id: 0,
        };
        let req = prepare_request(&self.credentials, &self.config, &payload, now_timestamp())?;

        let resp = self
            .http_client
            .post(req.url)
            .headers(req.headers)
            .body(req.body)
            .send()?;
        log::debug!("TextTranslate response status: {}", resp.status());

        let text = resp.text()?;
        parse_json_body(&text)
    }
}

impl Translator for Client {
    fn translate(&self, text: &str) -> Result<String, Error> {
        let res = self
            .request(text)
            .inspect_err(|e| log::error!("TextTranslate api call error: {}", e))?;
        log::info!("TextTranslate request successful: {}", res);
        Ok(extract_target_text(&res))
    }
}
