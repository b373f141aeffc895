use crate::Error;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use time::macros::format_description;

/// 当前时间的Unix时间戳，单位为秒
pub fn now_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// 时间戳对应的UTC日期，输出格式: YYYY-MM-DD
///
/// eg: 2023-11-14
pub fn utc_date(timestamp: i64) -> Result<String, Error> {
    let date_time = OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| Error::Common(format!("invalid timestamp {}: {}", timestamp, e)))?;
    date_time
        .format(&format_description!("[year]-[month]-[day]"))
        .map_err(|e| Error::Common(format!("format date error: {}", e)))
}

pub fn into_header_map(map: BTreeMap<String, String>) -> Result<HeaderMap, Error> {
    let mut header_map = HeaderMap::with_capacity(map.len());
    for (k, v) in map {
        let name = HeaderName::from_bytes(k.as_bytes()).map_err(|e| Error::InvalidHeader {
            name: k.clone(),
            message: e.to_string(),
        })?;
        let mut value = HeaderValue::from_str(&v).map_err(|e| Error::InvalidHeader {
            name: k.clone(),
            message: e.to_string(),
        })?;
        if name == reqwest::header::AUTHORIZATION || k.eq_ignore_ascii_case("x-tc-token") {
            value.set_sensitive(true);
        }
        header_map.insert(name, value);
    }
    Ok(header_map)
}

#[test]
fn utc_date_test() {
    assert_eq!(utc_date(1700000000).unwrap(), "2023-11-14");
    assert_eq!(utc_date(0).unwrap(), "1970-01-01");
    // 23:59:59 UTC 仍然是当天
    assert_eq!(utc_date(1700006399).unwrap(), "2023-11-14");
    assert_eq!(utc_date(1700006400).unwrap(), "2023-11-15");
    assert!(utc_date(i64::MAX).is_err());
}

#[test]
fn into_header_map_test() {
    let mut map = BTreeMap::new();
    map.insert("X-TC-Action".to_owned(), "TextTranslate".to_owned());
    map.insert("Authorization".to_owned(), "TC3-HMAC-SHA256 xxx".to_owned());
    let header_map = into_header_map(map).unwrap();
    assert_eq!(header_map.get("x-tc-action").unwrap(), "TextTranslate");
    assert!(header_map.get("authorization").unwrap().is_sensitive());

    let mut bad = BTreeMap::new();
    bad.insert("X-TC-Token".to_owned(), "line\nbreak".to_owned());
    assert!(matches!(
        into_header_map(bad),
        Err(Error::InvalidHeader { name, .. }) if name == "X-TC-Token"
    ));
}
