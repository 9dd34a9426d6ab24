//! 설정 파일과 환경변수 기반 설정 모듈.
//!
//! 자격증명은 환경변수(또는 `.env`)에서만 읽습니다. 심볼 목록과 간격 같은
//! 비밀이 아닌 값은 선택적 TOML 설정 파일에서 기본값을 가져오고 환경변수로
//! 덮어쓸 수 있습니다.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use stock_core::Symbol;
use stock_data::{ALPHA_VANTAGE_BASE_URL, NOTION_BASE_URL};

use crate::error::UpdaterError;
use crate::Result;

/// 기본 심볼 목록
pub const DEFAULT_SYMBOLS: [&str; 8] = ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN", "META", "NVDA", "NFLX"];

/// 심볼 간 최소 간격 (초). Alpha Vantage 무료 등급은 분당 5회입니다.
pub const MIN_REQUEST_DELAY_SECS: u64 = 12;

/// 기본 HTTP 타임아웃 (초)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// 설정 파일 기본 경로
pub const DEFAULT_SETTINGS_PATH: &str = "config/updater.toml";

/// 설정 파일 경로를 지정하는 환경변수
pub const SETTINGS_PATH_ENV: &str = "STOCK_UPDATER_CONFIG";

/// 설정 파일에서 읽는 비밀이 아닌 설정
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdaterSettings {
    /// 처리할 심볼 목록
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    /// 심볼 간 간격 (초)
    #[serde(default = "default_request_delay_secs")]
    pub request_delay_secs: u64,
    /// HTTP 요청 타임아웃 (초)
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_symbols() -> Vec<String> {
    DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}

fn default_request_delay_secs() -> u64 {
    MIN_REQUEST_DELAY_SECS
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

impl Default for UpdaterSettings {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            request_delay_secs: default_request_delay_secs(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl UpdaterSettings {
    /// 설정 파일에서 로드합니다. 파일이 없으면 기본값을 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .build()?;
        config.try_deserialize()
    }

    /// `STOCK_UPDATER_CONFIG` 또는 기본 경로에서 로드합니다.
    pub fn load_default() -> std::result::Result<Self, config::ConfigError> {
        let path =
            std::env::var(SETTINGS_PATH_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
        Self::load(path)
    }
}

/// 외부 API 자격증명. 프로세스 수명 동안 변경되지 않습니다.
#[derive(Debug)]
pub struct Credentials {
    /// Alpha Vantage API 키
    pub alpha_vantage_api_key: SecretString,
    /// Notion integration 토큰
    pub notion_token: SecretString,
    /// 대상 Notion 데이터베이스 ID
    pub notion_database_id: SecretString,
}

/// Updater 전체 설정
#[derive(Debug)]
pub struct UpdaterConfig {
    /// 자격증명
    pub credentials: Credentials,
    /// 요약 페이지 ID (페이지 모드 전용)
    pub notion_page_id: Option<SecretString>,
    /// 처리할 심볼 (순서대로 처리)
    pub symbols: Vec<Symbol>,
    /// 심볼 간 간격
    pub request_delay: Duration,
    /// HTTP 요청 타임아웃
    pub http_timeout: Duration,
    /// Alpha Vantage API 기본 URL
    pub alpha_vantage_base_url: String,
    /// Notion API 기본 URL
    pub notion_base_url: String,
}

impl UpdaterConfig {
    /// `.env`, 설정 파일, 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = UpdaterSettings::load_default()?;
        Self::from_lookup(settings, |key| std::env::var(key).ok())
    }

    /// 조회 함수로 설정을 구성합니다.
    ///
    /// 필수 자격증명이 없거나 비어 있으면 `Config` 에러를 반환합니다.
    pub fn from_lookup<F>(settings: UpdaterSettings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials {
            alpha_vantage_api_key: required_secret(&lookup, &["ALPHA_VANTAGE_API_KEY"])?,
            notion_token: required_secret(&lookup, &["NOTION_TOKEN"])?,
            notion_database_id: required_secret(&lookup, &["NOTION_DATABASE_ID", "DATABASE_ID"])?,
        };

        let notion_page_id = first_non_empty(&lookup, &["NOTION_PAGE_ID", "PAGE_ID"])
            .map(|id| SecretString::new(id.into()));

        let symbols = match first_non_empty(&lookup, &["STOCK_SYMBOLS"]) {
            Some(list) => parse_symbols(&list)?,
            None => settings
                .symbols
                .iter()
                .map(Symbol::new)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| UpdaterError::Config(e.to_string()))?,
        };
        if symbols.is_empty() {
            return Err(UpdaterError::Config("처리할 심볼이 없습니다".to_string()));
        }

        let delay_secs = env_var_parse(&lookup, "QUOTE_REQUEST_DELAY_SECS", settings.request_delay_secs);
        if delay_secs < MIN_REQUEST_DELAY_SECS {
            tracing::warn!(
                requested = delay_secs,
                minimum = MIN_REQUEST_DELAY_SECS,
                "요청 간격이 최소값보다 작아 최소값을 사용합니다"
            );
        }
        let timeout_secs = env_var_parse(&lookup, "HTTP_TIMEOUT_SECS", settings.http_timeout_secs);

        Ok(Self {
            credentials,
            notion_page_id,
            symbols,
            request_delay: Duration::from_secs(delay_secs.max(MIN_REQUEST_DELAY_SECS)),
            http_timeout: Duration::from_secs(timeout_secs.max(1)),
            alpha_vantage_base_url: first_non_empty(&lookup, &["ALPHA_VANTAGE_BASE_URL"])
                .unwrap_or_else(|| ALPHA_VANTAGE_BASE_URL.to_string()),
            notion_base_url: first_non_empty(&lookup, &["NOTION_BASE_URL"])
                .unwrap_or_else(|| NOTION_BASE_URL.to_string()),
        })
    }

    /// 심볼 목록을 교체합니다 (CLI `--symbols`). 빈 목록은 설정 에러입니다.
    pub fn with_symbols(mut self, symbols: Vec<Symbol>) -> Result<Self> {
        if symbols.is_empty() {
            return Err(UpdaterError::Config("--symbols에 처리할 심볼이 없습니다".to_string()));
        }
        self.symbols = symbols;
        Ok(self)
    }

    /// 페이지 모드에 필요한 페이지 ID를 반환합니다.
    pub fn require_page_id(&self) -> Result<&SecretString> {
        self.notion_page_id.as_ref().ok_or_else(|| {
            UpdaterError::Config("NOTION_PAGE_ID 환경변수가 설정되지 않았습니다".to_string())
        })
    }

    /// 비밀값을 가린 유효 설정을 로그로 출력합니다.
    pub fn log_effective(&self) {
        let symbols: Vec<&str> = self.symbols.iter().map(Symbol::as_str).collect();
        tracing::info!(
            symbols = %symbols.join(","),
            request_delay = format!("{}s", self.request_delay.as_secs()),
            http_timeout = format!("{}s", self.http_timeout.as_secs()),
            alpha_vantage_api_key = %redact(&self.credentials.alpha_vantage_api_key),
            notion_token = %redact(&self.credentials.notion_token),
            notion_database_id = %redact(&self.credentials.notion_database_id),
            notion_page_id = %self.notion_page_id.as_ref().map(redact).unwrap_or("(없음)"),
            alpha_vantage_base_url = %self.alpha_vantage_base_url,
            notion_base_url = %self.notion_base_url,
            "유효 설정"
        );
    }
}

/// 쉼표로 구분된 심볼 목록을 파싱합니다.
pub fn parse_symbols(list: &str) -> Result<Vec<Symbol>> {
    Symbol::parse_list(list).map_err(|e| UpdaterError::Config(e.to_string()))
}

fn redact(secret: &SecretString) -> &'static str {
    if secret.expose_secret().is_empty() {
        "(비어 있음)"
    } else {
        "[REDACTED]"
    }
}

/// 후보 이름 중 처음으로 비어 있지 않은 값
fn first_non_empty<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(key))
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

fn required_secret<F>(lookup: &F, keys: &[&str]) -> Result<SecretString>
where
    F: Fn(&str) -> Option<String>,
{
    first_non_empty(lookup, keys)
        .map(|v| SecretString::new(v.into()))
        .ok_or_else(|| {
            UpdaterError::Config(format!("{} 환경변수가 설정되지 않았습니다", keys[0]))
        })
}

/// 값을 파싱 (없거나 실패 시 기본값 사용)
fn env_var_parse<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
