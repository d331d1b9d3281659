/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3333`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public base URL under which uploaded assets are served.
    pub public_asset_url: String,
    /// Directory where uploaded point images are stored and served from.
    pub upload_dir: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3333`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `PUBLIC_ASSET_URL`     | `http://localhost:3333/uploads`  |
    /// | `UPLOAD_DIR`           | `uploads`                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3333".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_asset_url = std::env::var("PUBLIC_ASSET_URL")
            .unwrap_or_else(|_| "http://localhost:3333/uploads".into());

        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_asset_url,
            upload_dir,
        }
    }

    /// Compose the public URL of an asset file name.
    pub fn asset_url(&self, file: &str) -> String {
        format!("{}/{}", self.public_asset_url.trim_end_matches('/'), file)
    }
}
