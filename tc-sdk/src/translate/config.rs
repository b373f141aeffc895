use super::{DEFAULT_ENDPOINT, DEFAULT_REGION, DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG};
use serde::Deserialize;

/// 可以直接从配置文件反序列化，再通过[`Client::from_config`](super::Client::from_config)构建client
///
/// ```toml
/// secret_id = "AKID..."
/// secret_key = "..."
/// # 以下为可选
/// token = ""
/// region = "ap-guangzhou"
/// source_lang = "zh"
/// target_lang = "ja"
/// ```
#[derive(Deserialize, Clone)]
pub struct TranslateConfig {
    pub secret_id: String,
    pub secret_key: String,
    // 空字符串和不填一样
    #[serde(default, deserialize_with = "empty_as_none")]
    pub token: Option<String>,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_region() -> String {
    DEFAULT_REGION.to_owned()
}

fn default_source_lang() -> String {
    DEFAULT_SOURCE_LANG.to_owned()
}

fn default_target_lang() -> String {
    DEFAULT_TARGET_LANG.to_owned()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

#[test]
fn deserialize_config_test() {
    let conf: TranslateConfig =
        serde_json::from_str(r#"{"secret_id":"AKID","secret_key":"secret","token":""}"#).unwrap();
    assert_eq!(conf.secret_id, "AKID");
    assert_eq!(conf.token, None);
    assert_eq!(conf.region, "ap-guangzhou");
    assert_eq!(conf.source_lang, "zh");
    assert_eq!(conf.target_lang, "ja");
    assert_eq!(conf.endpoint, "https://tmt.tencentcloudapi.com");

    let conf: TranslateConfig = serde_json::from_str(
        r#"{"secret_id":"AKID","secret_key":"secret","token":"tok","region":"","target_lang":"en"}"#,
    )
    .unwrap();
    assert_eq!(conf.token.as_deref(), Some("tok"));
    assert_eq!(conf.region, "");
    assert_eq!(conf.target_lang, "en");
}
