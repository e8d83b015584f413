use crate::auth::JwtConfig;
use std::path::PathBuf;

/// SMTP 配置 (未设置时使用日志邮件传输)
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

/// 服务器配置 - 所有配置项在进程启动时读取一次
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/menu-server | 工作目录 (数据库、上传、二维码) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | CLIENT_BASE_URL | http://localhost:5173 | 前端地址 (二维码目标) |
/// | JWT_SECRET | (dev 自动生成) | 令牌签名密钥 |
/// | SMTP_HOST / SMTP_USERNAME / SMTP_PASSWORD / MAIL_FROM | - | 邮件传输 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/menu HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 前端公共地址，二维码指向 {client_base_url}/m/{slug}?table={n}
    pub client_base_url: String,
    /// SMTP 配置 (可选)
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let smtp = match (
            std::env::var("SMTP_HOST"),
            std::env::var("SMTP_USERNAME"),
            std::env::var("SMTP_PASSWORD"),
            std::env::var("MAIL_FROM"),
        ) {
            (Ok(host), Ok(username), Ok(password), Ok(from)) => Some(SmtpConfig {
                host,
                username,
                password,
                from,
            }),
            _ => None,
        };

        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/menu-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            client_base_url: std::env::var("CLIENT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            smtp,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录: work_dir/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 上传文件目录: work_dir/uploads
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// 二维码图片目录: work_dir/qr
    pub fn qr_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("qr")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        std::fs::create_dir_all(self.qr_dir())?;
        Ok(())
    }

    /// 公开菜单地址: {client_base_url}/m/{slug}
    pub fn public_menu_url(&self, slug: &str) -> String {
        format!("{}/m/{}", self.client_base_url.trim_end_matches('/'), slug)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
