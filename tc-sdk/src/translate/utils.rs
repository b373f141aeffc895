use super::types_rs::{Payload, ResponseEnvelope, TextTranslateResponse};
use super::{ACTION, ClientConfig, Error, HOST, SERVICE, TRANSLATION_FAILED, VERSION};
use crate::credentials::Credentials;
use reqwest::header::HeaderMap;
use serde_json::Value;
use tc_sdk_common::helper::into_header_map;
use tc_sdk_common::tc3_sign::{SignParams, get_tc3_request_header};

/// 签名完成、可以直接发送的请求
pub(crate) struct PreparedRequest {
    pub url: String,
    pub headers: HeaderMap,
    // 签名时使用的body，发送时不能再做任何修改
    pub body: String,
}

// async和blocking的client共用，除发送外的步骤都在这里完成
pub(crate) fn prepare_request(
    creds: &Credentials,
    config: &ClientConfig,
    payload: &Payload<'_>,
    timestamp: i64,
) -> Result<PreparedRequest, Error> {
    let body = serde_json::to_string(payload)?;

    let sign_params = SignParams {
        host: HOST,
        service: SERVICE,
        x_tc_action: ACTION,
        x_tc_version: VERSION,
        x_tc_region: Some(config.region()),
        x_tc_token: creds.token.as_deref(),
        timestamp,
        payload: &body,
    };
    let common_headers = get_tc3_request_header(&creds.secret_id, &creds.secret_key, sign_params)?;
    let headers = into_header_map(common_headers)?;

    Ok(PreparedRequest {
        url: config.endpoint().to_owned(),
        headers,
        body,
    })
}

// 不检查http状态码，api的错误信息也在json中返回
pub(crate) fn parse_json_body(text: &str) -> Result<Value, Error> {
    let res = serde_json::from_str(text)?;
    Ok(res)
}

/// 取出`Response.TargetText`，没有则返回[`TRANSLATION_FAILED`]
///
/// 如果返回了`Response.Error`，只记录日志，返回值不变
pub(crate) fn extract_target_text(res: &Value) -> String {
    let response = res.get("Response");
    if let Some(err) = response.and_then(|r| r.get("Error")) {
        log::warn!(
            "TextTranslate api returned error, code: {}, message: {}",
            err.get("Code").and_then(Value::as_str).unwrap_or_default(),
            err.get("Message").and_then(Value::as_str).unwrap_or_default()
        );
    }

    response
        .and_then(|r| r.get("TargetText"))
        .and_then(Value::as_str)
        .unwrap_or(TRANSLATION_FAILED)
        .to_owned()
}

// 有`Response.Error`时转换为Error::RequestAPIFailed
pub(crate) fn into_text_translate_response(res: Value) -> Result<TextTranslateResponse, Error> {
    let envelope: ResponseEnvelope<TextTranslateResponse> = serde_json::from_value(res)?;
    let mut response = envelope.response;
    if let Some(err) = response.error.take() {
        return Err(Error::RequestAPIFailed {
            code: err.code,
            message: err.message,
        });
    }
    Ok(response)
}

#[cfg(test)]
fn test_config(region: &str) -> ClientConfig {
    ClientConfig {
        region: region.to_owned(),
        source_lang: "zh".to_owned(),
        target_lang: "ja".to_owned(),
        endpoint: super::DEFAULT_ENDPOINT.to_owned(),
    }
}

#[cfg(test)]
const TEST_PAYLOAD: Payload<'static> = Payload {
    source_text: "hello",
    source: "zh",
    target: "ja",
    project_id: 0,
};

#[test]
fn prepare_request_test() {
    let creds = Credentials::new("AKID", "secret", None);
    let req = prepare_request(&creds, &test_config("ap-guangzhou"), &TEST_PAYLOAD, 1700000000)
        .unwrap();

    assert_eq!(req.url, "https://tmt.tencentcloudapi.com");
    assert_eq!(
        req.body,
        r#"{"SourceText":"hello","Source":"zh","Target":"ja","ProjectId":0}"#
    );
    assert_eq!(
        req.headers["authorization"],
        "TC3-HMAC-SHA256 Credential=AKID/2023-11-14/tmt/tc3_request, \
         SignedHeaders=content-type;host;x-tc-action, \
         Signature=1c3417d59fa54426aba40575a6d02b8adc20ed702192c56d5ea9bfccbacff02a"
    );
    assert_eq!(req.headers["content-type"], "application/json; charset=utf-8");
    assert_eq!(req.headers["host"], "tmt.tencentcloudapi.com");
    assert_eq!(req.headers["x-tc-action"], "TextTranslate");
    assert_eq!(req.headers["x-tc-timestamp"], "1700000000");
    assert_eq!(req.headers["x-tc-version"], "2018-03-21");
    assert_eq!(req.headers["x-tc-region"], "ap-guangzhou");
    assert!(!req.headers.contains_key("x-tc-token"));
}

#[test]
fn prepare_request_optional_headers_test() {
    let creds = Credentials::new("AKID", "secret", Some("tok".to_owned()));
    let req = prepare_request(&creds, &test_config(""), &TEST_PAYLOAD, 1700000000).unwrap();
    assert!(!req.headers.contains_key("x-tc-region"));
    assert_eq!(req.headers["x-tc-token"], "tok");
    // token不参与签名
    assert!(
        req.headers["authorization"]
            .to_str()
            .unwrap()
            .ends_with("Signature=1c3417d59fa54426aba40575a6d02b8adc20ed702192c56d5ea9bfccbacff02a")
    );
}

#[test]
fn prepare_request_invalid_header_test() {
    let creds = Credentials::new("AKID", "secret", Some("bad\ntoken".to_owned()));
    match prepare_request(&creds, &test_config("ap-guangzhou"), &TEST_PAYLOAD, 1700000000) {
        Err(Error::InvalidHeader { name, .. }) => assert_eq!(name, "X-TC-Token"),
        Err(e) => panic!("unexpected error: {:?}", e),
        Ok(_) => panic!("token with line break should be rejected"),
    }
}

#[test]
fn extract_target_text_test() {
    let res = serde_json::json!({"Response": {"TargetText": "こんにちは", "RequestId": "1"}});
    assert_eq!(extract_target_text(&res), "こんにちは");

    let res = serde_json::json!({"Response": {"Error": {"Code": "x", "Message": "y"}}});
    assert_eq!(extract_target_text(&res), TRANSLATION_FAILED);

    assert_eq!(extract_target_text(&serde_json::json!([])), TRANSLATION_FAILED);
    assert_eq!(
        extract_target_text(&serde_json::json!({"Response": {"TargetText": 1}})),
        TRANSLATION_FAILED
    );
}

#[test]
fn into_text_translate_response_test() {
    let res = serde_json::json!({"Response": {"Error": {"Code": "LimitExceeded", "Message": "quota"}}});
    match into_text_translate_response(res) {
        Err(Error::RequestAPIFailed { code, message }) => {
            assert_eq!(code, "LimitExceeded");
            assert_eq!(message, "quota");
        }
        other => panic!("unexpected: {:?}", other),
    }

    assert!(matches!(
        into_text_translate_response(serde_json::json!({"foo": 1})),
        Err(Error::Json(_))
    ));
}
