#![cfg(feature = "translate")]

use mockito::{Matcher, Server};
use std::sync::Arc;
use tc_sdk::credentials::Credentials;
use tc_sdk::translate::*;

const AUTHORIZATION_PATTERN: &str = r"^TC3-HMAC-SHA256 Credential=AKID/\d{4}-\d{2}-\d{2}/tmt/tc3_request, SignedHeaders=content-type;host;x-tc-action, Signature=[0-9a-f]{64}$";
const HELLO_PAYLOAD: &str = r#"{"SourceText":"hello","Source":"zh","Target":"ja","ProjectId":0}"#;
const SUCCESS_BODY: &str = r#"{"Response":{"TargetText":"こんにちは","Source":"zh","Target":"ja","UsedAmount":5,"RequestId":"req-1"}}"#;
const ERROR_BODY: &str = r#"{"Response":{"Error":{"Code":"AuthFailure.SignatureFailure","Message":"The provided credentials could not be validated."},"RequestId":"req-2"}}"#;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn get_mock_client(endpoint: String, region: &str, token: Option<&str>) -> Client {
    let creds = Credentials::new("AKID", "secret", token.map(str::to_owned));
    Client::builder()
        .credentials_provider(Arc::new(creds))
        .region(region)
        .endpoint(endpoint)
        .build()
}

#[tokio::test]
async fn translate_test() {
    init_logger();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("authorization", Matcher::Regex(AUTHORIZATION_PATTERN.to_owned()))
        .match_header("content-type", "application/json; charset=utf-8")
        .match_header("host", HOST)
        .match_header("x-tc-action", "TextTranslate")
        .match_header("x-tc-version", "2018-03-21")
        .match_header("x-tc-timestamp", Matcher::Regex(r"^\d+$".to_owned()))
        .match_header("x-tc-region", "ap-guangzhou")
        .match_header("x-tc-token", Matcher::Missing)
        .match_body(Matcher::Exact(HELLO_PAYLOAD.to_owned()))
        .with_header("content-type", "application/json")
        .with_body(SUCCESS_BODY)
        .create_async()
        .await;

    let client = get_mock_client(server.url(), "ap-guangzhou", None);
    let res = client.translate("hello").await.unwrap();
    assert_eq!(res, "こんにちは");
    mock.assert_async().await;
}

#[tokio::test]
async fn translate_escaped_body_test() {
    init_logger();
    let mut server = Server::new_async().await;
    // 非ASCII字符原样输出，引号和换行转义
    let mock = server
        .mock("POST", "/")
        .match_header("authorization", Matcher::Regex(AUTHORIZATION_PATTERN.to_owned()))
        .match_body(Matcher::Exact(
            r#"{"SourceText":"你好\n\"x\"","Source":"zh","Target":"ja","ProjectId":0}"#.to_owned(),
        ))
        .with_body(SUCCESS_BODY)
        .create_async()
        .await;

    let client = get_mock_client(server.url(), "ap-guangzhou", None);
    let res = client.translate("你好\n\"x\"").await.unwrap();
    assert_eq!(res, "こんにちは");
    mock.assert_async().await;
}

#[tokio::test]
async fn translate_optional_headers_test() {
    init_logger();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_header("x-tc-region", Matcher::Missing)
        .match_header("x-tc-token", "session-token")
        .with_body(SUCCESS_BODY)
        .create_async()
        .await;

    let client = get_mock_client(server.url(), "", Some("session-token"));
    assert_eq!(client.translate("hello").await.unwrap(), "こんにちは");
    mock.assert_async().await;
}

#[tokio::test]
async fn translate_fallback_test() {
    init_logger();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_body(ERROR_BODY)
        .create_async()
        .await;

    let client = get_mock_client(server.url(), "ap-guangzhou", None);
    let res = client.translate("hello").await.unwrap();
    assert_eq!(res, TRANSLATION_FAILED);
    mock.assert_async().await;
}

#[tokio::test]
async fn translate_unexpected_shape_test() {
    init_logger();
    let mut server = Server::new_async().await;
    // http状态码不影响处理，只看json内容
    let _mock = server
        .mock("POST", "/")
        .with_status(500)
        .with_body(r#"{"unexpected":true}"#)
        .create_async()
        .await;

    let client = get_mock_client(server.url(), "ap-guangzhou", None);
    assert_eq!(client.translate("hello").await.unwrap(), TRANSLATION_FAILED);
}

#[tokio::test]
async fn translate_non_json_body_test() {
    init_logger();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_body("<html>bad gateway</html>")
        .create_async()
        .await;

    let client = get_mock_client(server.url(), "ap-guangzhou", None);
    let err = client.translate("hello").await.unwrap_err();
    assert!(matches!(err, Error::Json(_)), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn translate_transport_failure_test() {
    init_logger();
    // 没有服务监听的端口
    let client = get_mock_client("http://127.0.0.1:1".to_owned(), "ap-guangzhou", None);
    let err = client.translate("hello").await.unwrap_err();
    assert!(matches!(err, Error::Reqwest(_)), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn text_translate_send_test() {
    init_logger();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::Exact(
            r#"{"SourceText":"hello","Source":"en","Target":"zh","ProjectId":0}"#.to_owned(),
        ))
        .with_body(
            r#"{"Response":{"TargetText":"你好","Source":"en","Target":"zh","UsedAmount":5,"RequestId":"req-3"}}"#,
        )
        .create_async()
        .await;

    let client = get_mock_client(server.url(), "ap-guangzhou", None);
    let res = client
        .text_translate()
        .source_text("hello")
        .source("en")
        .target("zh")
        .build()
        .send()
        .await
        .unwrap();
    assert_eq!(res.target_text.as_deref(), Some("你好"));
    assert_eq!(res.request_id.as_deref(), Some("req-3"));
    assert_eq!(res.used_amount, Some(5));
    mock.assert_async().await;
}

#[tokio::test]
async fn text_translate_send_api_error_test() {
    init_logger();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_body(ERROR_BODY)
        .create_async()
        .await;

    let client = get_mock_client(server.url(), "ap-guangzhou", None);
    let err = client
        .text_translate()
        .source_text("hello")
        .build()
        .send()
        .await
        .unwrap_err();
    match err {
        Error::RequestAPIFailed { code, .. } => assert_eq!(code, "AuthFailure.SignatureFailure"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[cfg(feature = "blocking")]
#[test]
fn blocking_translate_test() {
    use tc_sdk::translate::blocking::{self, Translator as _};

    init_logger();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/")
        .match_header("authorization", Matcher::Regex(AUTHORIZATION_PATTERN.to_owned()))
        .match_header("x-tc-region", "ap-beijing")
        .match_header("x-tc-token", "tok")
        .match_body(Matcher::Exact(HELLO_PAYLOAD.to_owned()))
        .with_body(SUCCESS_BODY)
        .create();

    let client = blocking::Client::builder()
        .secret_id("AKID")
        .secret_key("secret")
        .token("tok".to_owned())
        .region("ap-beijing")
        .endpoint(server.url())
        .build();
    assert_eq!(client.translate("hello").unwrap(), "こんにちは");
    mock.assert();
}

#[cfg(feature = "blocking")]
#[test]
fn blocking_translate_failure_test() {
    use tc_sdk::translate::blocking::{self, Translator as _};

    init_logger();
    let client = blocking::Client::builder()
        .secret_id("AKID")
        .secret_key("secret")
        .endpoint("http://127.0.0.1:1")
        .build();
    let err = client.translate("hello").unwrap_err();
    assert!(matches!(err, Error::Reqwest(_)), "unexpected error: {:?}", err);
}

// 以下为真实请求，需要在tests/translate/config.toml中填入密钥

fn get_trans_config() -> TranslateConfig {
    let file_str = std::fs::read_to_string("tests/translate/config.toml").unwrap();
    toml::from_str(&file_str).unwrap()
}

#[tokio::test]
#[ignore]
async fn live_translate_test() {
    init_logger();
    let client = Client::from_config(get_trans_config());
    let res = client.translate("今天天气很好。").await;
    match res {
        Ok(s) => println!("[success] res: {}", s),
        Err(e) => println!("[error] {:#?}", e),
    }
}

#[tokio::test]
#[ignore]
async fn live_text_translate_test() {
    init_logger();
    let client = Client::from_config(get_trans_config());
    let res = client
        .text_translate()
        .source_text("test first line.\ntest second line.")
        .source("en")
        .target("zh")
        .build()
        .send()
        .await;
    match res {
        Ok(s) => println!("[success] res:\n{:#?}", s),
        Err(e) => println!("[error] {:#?}", e),
    }
}
