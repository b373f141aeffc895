use crate::Error;
use crate::helper::utc_date;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

// 腾讯云签名文档：https://cloud.tencent.com/document/api/551/30636

pub const ALGORITHM: &str = "TC3-HMAC-SHA256";
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";
const REQUEST_SCOPE: &str = "tc3_request";

pub struct SignParams<'a> {
    // 签名文档中的公共参数
    pub host: &'a str,
    pub service: &'a str,
    pub x_tc_action: &'a str,
    pub x_tc_version: &'a str,
    // 为空字符串时等同于None，不加入header
    pub x_tc_region: Option<&'a str>,
    pub x_tc_token: Option<&'a str>,

    // X-TC-Timestamp，同时用于计算CredentialScope中的日期
    pub timestamp: i64,
    // 签名用的body必须和发送的body完全一致
    pub payload: &'a str,
}

pub fn hash_sha256(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

pub fn sign_hmac_sha256_byte(secret: &[u8], str_to_sign: &[u8]) -> Vec<u8> {
    type HmacSha256 = Hmac<Sha256>;
    // HMAC接受任意长度的key
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(str_to_sign);
    mac.finalize().into_bytes().to_vec()
}

/// SecretSigning = HMAC(HMAC(HMAC("TC3" + SecretKey, Date), Service), "tc3_request")
pub fn derive_signing_key(secret_key: &str, date: &str, service: &str) -> Vec<u8> {
    let secret_date = sign_hmac_sha256_byte(
        format!("TC3{}", secret_key).as_bytes(),
        date.as_bytes(),
    );
    let secret_service = sign_hmac_sha256_byte(&secret_date, service.as_bytes());
    sign_hmac_sha256_byte(&secret_service, REQUEST_SCOPE.as_bytes())
}

// CanonicalHeaders，参与签名的只有content-type、host和x-tc-action
pub fn canonical_headers(host: &str, x_tc_action: &str) -> String {
    format!(
        "content-type:{}\nhost:{}\nx-tc-action:{}\n",
        CONTENT_TYPE,
        host,
        x_tc_action.to_lowercase()
    )
}

/// 构造CanonicalRequest
///
/// 固定为POST请求，CanonicalURI为`/`，CanonicalQueryString为空
pub fn canonical_request(host: &str, x_tc_action: &str, payload: &str) -> String {
    format!(
        "POST\n/\n\n{}\n{}\n{}",
        canonical_headers(host, x_tc_action),
        SIGNED_HEADERS,
        hash_sha256(payload.as_bytes())
    )
}

pub fn credential_scope(date: &str, service: &str) -> String {
    format!("{}/{}/{}", date, service, REQUEST_SCOPE)
}

pub fn string_to_sign(timestamp: i64, credential_scope: &str, canonical_request: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        timestamp,
        credential_scope,
        hash_sha256(canonical_request.as_bytes())
    )
}

/// 计算Authorization的值
///
/// `TC3-HMAC-SHA256 Credential=<SecretId>/<CredentialScope>, SignedHeaders=<SignedHeaders>, Signature=<Signature>`
pub fn authorization(
    secret_id: &str,
    secret_key: &str,
    sign_params: &SignParams<'_>,
) -> Result<String, Error> {
    // 日期必须由X-TC-Timestamp的时间戳得到，否则服务端校验失败
    let date = utc_date(sign_params.timestamp)?;
    let scope = credential_scope(&date, sign_params.service);

    let can_req_str = canonical_request(
        sign_params.host,
        sign_params.x_tc_action,
        sign_params.payload,
    );
    log::debug!("canonical request:\n{}", can_req_str);
    let str_to_sign = string_to_sign(sign_params.timestamp, &scope, &can_req_str);
    log::debug!("string to sign:\n{}", str_to_sign);

    let signing_key = derive_signing_key(secret_key, &date, sign_params.service);
    let signature = hex::encode(sign_hmac_sha256_byte(
        &signing_key,
        str_to_sign.as_bytes(),
    ));

    Ok(format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, secret_id, scope, SIGNED_HEADERS, signature
    ))
}

// 签名入口
//
// 返回的是完整的公共请求头，发送请求的时候直接加入headers即可
pub fn get_tc3_request_header(
    secret_id: &str,
    secret_key: &str,
    sign_params: SignParams<'_>,
) -> Result<BTreeMap<String, String>, Error> {
    let authorization = authorization(secret_id, secret_key, &sign_params)?;

    let mut common_headers = BTreeMap::new();
    common_headers.insert("Authorization".to_owned(), authorization);
    common_headers.insert("Content-Type".to_owned(), CONTENT_TYPE.to_owned());
    common_headers.insert("Host".to_owned(), sign_params.host.to_owned());
    common_headers.insert(
        "X-TC-Action".to_owned(),
        sign_params.x_tc_action.to_owned(),
    );
    common_headers.insert(
        "X-TC-Timestamp".to_owned(),
        sign_params.timestamp.to_string(),
    );
    common_headers.insert(
        "X-TC-Version".to_owned(),
        sign_params.x_tc_version.to_owned(),
    );
    if let Some(region) = sign_params.x_tc_region.filter(|s| !s.is_empty()) {
        common_headers.insert("X-TC-Region".to_owned(), region.to_owned());
    }
    if let Some(token) = sign_params.x_tc_token.filter(|s| !s.is_empty()) {
        common_headers.insert("X-TC-Token".to_owned(), token.to_owned());
    }

    Ok(common_headers)
}

#[cfg(test)]
const TEST_PAYLOAD: &str = r#"{"SourceText":"hello","Source":"zh","Target":"ja","ProjectId":0}"#;

#[cfg(test)]
fn test_sign_params(payload: &str) -> SignParams<'_> {
    SignParams {
        host: "tmt.tencentcloudapi.com",
        service: "tmt",
        x_tc_action: "TextTranslate",
        x_tc_version: "2018-03-21",
        x_tc_region: Some("ap-guangzhou"),
        x_tc_token: None,
        timestamp: 1700000000,
        payload,
    }
}

#[test]
fn hash_sha256_test() {
    assert_eq!(
        hash_sha256(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        hash_sha256(TEST_PAYLOAD.as_bytes()),
        "f72bce2e49d5e58304aa27d083510981857e347b052c326ef5baa14085ad10ff"
    );
}

#[test]
fn canonical_request_test() {
    let can_req_str = canonical_request("tmt.tencentcloudapi.com", "TextTranslate", TEST_PAYLOAD);
    assert_eq!(
        can_req_str,
        "POST\n/\n\n\
         content-type:application/json; charset=utf-8\n\
         host:tmt.tencentcloudapi.com\n\
         x-tc-action:texttranslate\n\n\
         content-type;host;x-tc-action\n\
         f72bce2e49d5e58304aa27d083510981857e347b052c326ef5baa14085ad10ff"
    );

    let scope = credential_scope("2023-11-14", "tmt");
    assert_eq!(scope, "2023-11-14/tmt/tc3_request");
    assert_eq!(
        string_to_sign(1700000000, &scope, &can_req_str),
        "TC3-HMAC-SHA256\n1700000000\n2023-11-14/tmt/tc3_request\n\
         6d6de71e3e7a9c76d431e6abe000d2c20fa41aa999ec956c286ebe771123fb2c"
    );
}

#[test]
fn derive_signing_key_test() {
    let key = derive_signing_key("secret", "2023-11-14", "tmt");
    assert_eq!(
        hex::encode(key),
        "e95e2bca9887b1ac22f9bc2ac532c2bf113a200ea3e76c393408791481a8c77f"
    );
}

#[test]
fn authorization_test() {
    let params = test_sign_params(TEST_PAYLOAD);
    let auth = authorization("AKID", "secret", &params).unwrap();
    assert_eq!(
        auth,
        "TC3-HMAC-SHA256 Credential=AKID/2023-11-14/tmt/tc3_request, \
         SignedHeaders=content-type;host;x-tc-action, \
         Signature=1c3417d59fa54426aba40575a6d02b8adc20ed702192c56d5ea9bfccbacff02a"
    );
    // 相同输入得到相同输出
    assert_eq!(auth, authorization("AKID", "secret", &params).unwrap());

    // payload改动一个字符，签名改变，但结构不变
    let changed = TEST_PAYLOAD.replace("hello", "hellp");
    let changed_auth = authorization("AKID", "secret", &test_sign_params(&changed)).unwrap();
    assert_eq!(
        changed_auth,
        "TC3-HMAC-SHA256 Credential=AKID/2023-11-14/tmt/tc3_request, \
         SignedHeaders=content-type;host;x-tc-action, \
         Signature=752659e06a3e6b048c4303e4b7f256f3b7983e278d89796650e67258a87299f6"
    );
}

#[test]
fn get_tc3_request_header_test() {
    let headers = get_tc3_request_header("AKID", "secret", test_sign_params(TEST_PAYLOAD)).unwrap();
    let keys = headers.keys().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(
        keys,
        [
            "Authorization",
            "Content-Type",
            "Host",
            "X-TC-Action",
            "X-TC-Region",
            "X-TC-Timestamp",
            "X-TC-Version"
        ]
    );
    assert_eq!(headers["X-TC-Timestamp"], "1700000000");
    assert_eq!(headers["Content-Type"], CONTENT_TYPE);

    let mut params = test_sign_params(TEST_PAYLOAD);
    params.x_tc_region = Some("");
    params.x_tc_token = Some("session-token");
    let headers = get_tc3_request_header("AKID", "secret", params).unwrap();
    assert!(!headers.contains_key("X-TC-Region"));
    assert_eq!(headers["X-TC-Token"], "session-token");

    let mut params = test_sign_params(TEST_PAYLOAD);
    params.x_tc_token = Some("");
    let headers = get_tc3_request_header("AKID", "secret", params).unwrap();
    assert!(!headers.contains_key("X-TC-Token"));
}
