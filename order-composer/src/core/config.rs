use console_client::ClientConfig;

/// 编排器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | CONSOLE_API_URL | http://localhost:8000 | 后台 API 地址 |
/// | CONSOLE_API_TOKEN | (无) | Bearer 令牌 |
/// | REQUEST_TIMEOUT_SECS | 30 | 请求超时(秒) |
/// | DEFAULT_PRICE_LIST_ID | (无) | 未指定价目表时使用 |
/// | MAX_LINE_QUANTITY | 9999 | 单行最大数量 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录 (按天滚动) |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// CONSOLE_API_URL=https://console.example.com DEFAULT_PRICE_LIST_ID=1 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 后台 API 基础地址
    pub api_url: String,
    /// 后台 API 令牌
    pub api_token: Option<String>,
    /// 请求超时时间 (秒)
    pub request_timeout_secs: u64,
    /// 默认价目表
    pub default_price_list_id: Option<i64>,
    /// 单行最大数量，超出视为无效请求
    pub max_line_quantity: i32,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 加载 .env 后从环境变量读取配置
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("CONSOLE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".into()),
            api_token: std::env::var("CONSOLE_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            default_price_list_id: std::env::var("DEFAULT_PRICE_LIST_ID")
                .ok()
                .and_then(|v| v.parse().ok()),
            max_line_quantity: std::env::var("MAX_LINE_QUANTITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|q: &i32| *q > 0)
                .unwrap_or(9999),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义 API 地址覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(api_url: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.api_url = api_url.into();
        config
    }

    /// 派生 HTTP 客户端配置
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.clone()).with_timeout(self.request_timeout_secs);
        match &self.api_token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
