use crate::translate::Client;
use bon::Builder;
use serde::{Deserialize, Serialize};

// region    --- text translate
#[derive(Builder)]
pub struct TextTranslate<'a> {
    #[builder(start_fn)]
    pub(crate) client: &'a Client,
    pub(crate) source_text: &'a str,
    /// 不填则使用client的source_lang
    pub(crate) source: Option<&'a str>,
    /// 不填则使用client的target_lang
    pub(crate) target: Option<&'a str>,
    #[builder(default)]
    pub(crate) project_id: i64,
}

// 请求body，序列化的结果既用于签名也用于发送
#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Payload<'a> {
    pub(crate) source_text: &'a str,
    pub(crate) source: &'a str,
    pub(crate) target: &'a str,
    pub(crate) project_id: i64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ResponseEnvelope<T> {
    pub response: T,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct TextTranslateResponse {
    pub target_text: Option<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub used_amount: Option<u64>,
    pub request_id: Option<String>,
    pub error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}
// endregion --- text translate

#[test]
fn serialize_payload_test() {
    let payload = Payload {
        source_text: "hello",
        source: "zh",
        target: "ja",
        project_id: 0,
    };
    assert_eq!(
        serde_json::to_string(&payload).unwrap(),
        r#"{"SourceText":"hello","Source":"zh","Target":"ja","ProjectId":0}"#
    );
}

#[test]
fn deserialize_response_test() {
    let s = r#"{"Response":{"TargetText":"こんにちは","Source":"zh","Target":"ja","UsedAmount":2,"RequestId":"id-1"}}"#;
    let res: ResponseEnvelope<TextTranslateResponse> = serde_json::from_str(s).unwrap();
    assert_eq!(res.response.target_text.as_deref(), Some("こんにちは"));
    assert_eq!(res.response.used_amount, Some(2));
    assert!(res.response.error.is_none());

    let s = r#"{"Response":{"Error":{"Code":"AuthFailure.SignatureFailure","Message":"bad signature"},"RequestId":"id-2"}}"#;
    let res: ResponseEnvelope<TextTranslateResponse> = serde_json::from_str(s).unwrap();
    let err = res.response.error.unwrap();
    assert_eq!(err.code, "AuthFailure.SignatureFailure");
    assert!(res.response.target_text.is_none());
}
