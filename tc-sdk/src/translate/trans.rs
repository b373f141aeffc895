use super::types_rs::*;
use super::utils::{
    extract_target_text, into_text_translate_response, parse_json_body, prepare_request,
};
use super::{Client, Error, Translator};
use serde_json::Value;
use tc_sdk_common::helper::now_timestamp;

impl Client {
    /// 文本翻译
    ///
    /// 注意事项:
    /// 1. 默认接口请求频率限制：5次/秒
    /// 2. 单次请求的文本长度需要低于6000字符，不会在本地检查
    pub fn text_translate(&self) -> TextTranslateBuilder<'_> {
        TextTranslate::builder(self)
    }
}

impl TextTranslate<'_> {
    /// 返回结构化的响应，`Response.Error`会转换为[`Error::RequestAPIFailed`]
    pub async fn send(&self) -> Result<TextTranslateResponse, Error> {
        let res = self.send_raw().await?;
        into_text_translate_response(res)
    }

    pub(crate) fn payload(&self) -> Payload<'_> {
        let config = self.client.config();
        Payload {
            source_text: self.source_text,
            source: self.source.unwrap_or(config.source_lang()),
            target: self.target.unwrap_or(config.target_lang()),
            project_id: self.project_id,
        }
    }

    // 返回解析后的json，失败时记录日志后原样返回错误，不重试
    pub(crate) async fn send_raw(&self) -> Result<Value, Error> {
        let res = self
            .request()
            .await
            .inspect_err(|e| log::error!("TextTranslate api call error: {}", e))?;
        log::info!("TextTranslate request successful: {}", res);
        Ok(res)
    }

    async fn request(&self) -> Result<Value, Error> {
        let client = self.client;
        let creds = client.credentials_provider.load().await?;
        let req = prepare_request(&creds, client.config(), &self.payload(), now_timestamp())?;

        let resp = client
            .http_client
            .post(req.url)
            .headers(req.headers)
            .body(req.body)
            .send()
            .await?;
        log::debug!("TextTranslate response status: {}", resp.status());

        let text = resp.text().await?;
        parse_json_body(&text)
    }
}

#[async_trait::async_trait]
impl Translator for Client {
    async fn translate(&self, text: &str) -> Result<String, Error> {
        let res = self.text_translate().source_text(text).build().send_raw().await?;
        Ok(extract_target_text(&res))
    }
}
