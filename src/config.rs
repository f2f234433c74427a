use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

#[derive(Debug, Clone, Deserialize)]
pub enum StorageConfig {
    /// Blobs live on the local filesystem beneath `root`.
    Local { root: String },
    S3(S3Config),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub storage: StorageConfig,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't need to
    /// touch the process environment.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let user = get("POSTGRES_USER")
                    .context("DATABASE_URL or POSTGRES_USER must be set")?;
                let password = get("POSTGRES_PASSWORD").unwrap_or_default();
                let host = get("POSTGRES_HOST").unwrap_or_else(|| "localhost".into());
                let port = get("POSTGRES_PORT").unwrap_or_else(|| "5432".into());
                let db = get("POSTGRES_DB").context("POSTGRES_DB must be set")?;
                format!("postgres://{user}:{password}@{host}:{port}/{db}")
            }
        };

        let storage = match get("STORAGE_BACKEND").as_deref().unwrap_or("local") {
            "local" => StorageConfig::Local {
                root: get("STORAGE_ROOT").unwrap_or_else(|| ".".into()),
            },
            "s3" => StorageConfig::S3(S3Config {
                endpoint: get("MINIO_ENDPOINT").context("MINIO_ENDPOINT must be set")?,
                bucket: get("MINIO_BUCKET").context("MINIO_BUCKET must be set")?,
                access_key: get("MINIO_ACCESS_KEY").context("MINIO_ACCESS_KEY must be set")?,
                secret_key: get("MINIO_SECRET_KEY").context("MINIO_SECRET_KEY must be set")?,
                region: get("MINIO_REGION").unwrap_or_else(|| "us-east-1".into()),
            }),
            other => anyhow::bail!("unknown STORAGE_BACKEND {other:?}, expected local or s3"),
        };

        let max_upload_mb = parse_or(&get, "MAX_UPLOAD_MB", 200usize)?;
        let max_upload_bytes = max_upload_mb
            .checked_mul(1024 * 1024)
            .with_context(|| format!("MAX_UPLOAD_MB is too large: {max_upload_mb}"))?;

        Ok(Self {
            database_url,
            max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10)?,
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&get, "APP_PORT", 8080)?,
            storage,
            max_upload_bytes,
        })
    }
}

fn parse_or<F, T>(get: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(v) => v
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value {v:?}")),
        None => Ok(default),
    }
}
