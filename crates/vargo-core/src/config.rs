//! Configuration module
//!
//! Service configuration is read from the environment (with `.env` support via
//! `dotenvy`) once at startup. The per-category upload policies are compile-time
//! data in [`crate::validation`] and are deliberately not configurable here.

use std::env;

use crate::models::{UploadCategory, UploadDefaults, DEFAULT_UPLOAD_FOLDER};
use crate::storage_types::{SignatureAlgorithm, StorageBackend};

const SERVER_PORT: u16 = 4000;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const CLOUDINARY_TIMEOUT_SECS: u64 = 60;
const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com";

/// HTTP server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub request_timeout_secs: u64,
}

/// Settings for the external storage collaborator
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_api_key: Option<String>,
    pub cloudinary_api_secret: Option<String>,
    pub cloudinary_api_base: String,
    pub cloudinary_timeout_secs: u64,
    pub cloudinary_signature_algorithm: SignatureAlgorithm,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

/// Full service configuration
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,
    pub upload_defaults: UploadDefaults,
    pub storage: StorageConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig {
                server_port: SERVER_PORT,
                cors_origins: vec!["*".to_string()],
                environment: "development".to_string(),
                request_timeout_secs: REQUEST_TIMEOUT_SECS,
            },
            upload_defaults: UploadDefaults::default(),
            storage: StorageConfig {
                backend: StorageBackend::Cloudinary,
                cloudinary_cloud_name: None,
                cloudinary_api_key: None,
                cloudinary_api_secret: None,
                cloudinary_api_base: CLOUDINARY_API_BASE.to_string(),
                cloudinary_timeout_secs: CLOUDINARY_TIMEOUT_SECS,
                cloudinary_signature_algorithm: SignatureAlgorithm::default(),
                local_storage_path: None,
                local_storage_base_url: None,
            },
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(REQUEST_TIMEOUT_SECS),
        };

        let upload_defaults = UploadDefaults {
            folder: env::var("UPLOAD_DEFAULT_FOLDER")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string()),
            category: UploadCategory::General,
        };

        let backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Cloudinary,
        };

        let cloudinary_signature_algorithm = match env::var("CLOUDINARY_SIGNATURE_ALGORITHM") {
            Ok(value) => value.parse()?,
            Err(_) => SignatureAlgorithm::default(),
        };

        let storage = StorageConfig {
            backend,
            cloudinary_cloud_name: env::var("CLOUDINARY_CLOUD_NAME").ok(),
            cloudinary_api_key: env::var("CLOUDINARY_API_KEY").ok(),
            cloudinary_api_secret: env::var("CLOUDINARY_API_SECRET").ok(),
            cloudinary_api_base: env::var("CLOUDINARY_API_BASE")
                .unwrap_or_else(|_| CLOUDINARY_API_BASE.to_string()),
            cloudinary_timeout_secs: env::var("CLOUDINARY_TIMEOUT_SECS")
                .unwrap_or_else(|_| CLOUDINARY_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CLOUDINARY_TIMEOUT_SECS),
            cloudinary_signature_algorithm,
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
        };

        Ok(ServiceConfig {
            base,
            upload_defaults,
            storage,
        })
    }

    pub fn is_production(&self) -> bool {
        let environment = self.base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.base.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS cannot be 0"));
        }

        match self.storage.backend {
            StorageBackend::Cloudinary => {
                for (name, value) in [
                    ("CLOUDINARY_CLOUD_NAME", &self.storage.cloudinary_cloud_name),
                    ("CLOUDINARY_API_KEY", &self.storage.cloudinary_api_key),
                    ("CLOUDINARY_API_SECRET", &self.storage.cloudinary_api_secret),
                ] {
                    if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                        return Err(anyhow::anyhow!(
                            "{} must be set when STORAGE_BACKEND=cloudinary",
                            name
                        ));
                    }
                }
            }
            StorageBackend::Local => {
                if self.storage.local_storage_path.is_none()
                    || self.storage.local_storage_base_url.is_none()
                {
                    return Err(anyhow::anyhow!(
                        "STORAGE_BACKEND=local requires LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL"
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn inner(&self) -> &ServiceConfig {
        &self.0
    }

    pub fn new(config: ServiceConfig) -> Self {
        Config(Box::new(config))
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn is_production(&self) -> bool {
        self.inner().is_production()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.inner().base.request_timeout_secs
    }

    pub fn upload_defaults(&self) -> &UploadDefaults {
        &self.inner().upload_defaults
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage.backend
    }

    pub fn cloudinary_cloud_name(&self) -> Option<&str> {
        self.inner().storage.cloudinary_cloud_name.as_deref()
    }

    pub fn cloudinary_api_key(&self) -> Option<&str> {
        self.inner().storage.cloudinary_api_key.as_deref()
    }

    pub fn cloudinary_api_secret(&self) -> Option<&str> {
        self.inner().storage.cloudinary_api_secret.as_deref()
    }

    pub fn cloudinary_api_base(&self) -> &str {
        &self.inner().storage.cloudinary_api_base
    }

    pub fn cloudinary_timeout_secs(&self) -> u64 {
        self.inner().storage.cloudinary_timeout_secs
    }

    pub fn cloudinary_signature_algorithm(&self) -> SignatureAlgorithm {
        self.inner().storage.cloudinary_signature_algorithm
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().storage.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().storage.local_storage_base_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.storage.backend = StorageBackend::Local;
        config.storage.local_storage_path = Some("/tmp/vargo".to_string());
        config.storage.local_storage_base_url = Some("http://localhost:4000/media".to_string());
        config
    }

    #[test]
    fn defaults_use_vargo_agro_folder_and_general_category() {
        let config = ServiceConfig::default();
        assert_eq!(config.upload_defaults.folder, "vargo-agro");
        assert_eq!(config.upload_defaults.category, UploadCategory::General);
        assert_eq!(config.base.server_port, 4000);
        assert_eq!(
            config.storage.cloudinary_signature_algorithm,
            SignatureAlgorithm::Sha1
        );
    }

    #[test]
    fn cloudinary_backend_requires_credentials() {
        let config = ServiceConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("CLOUDINARY_CLOUD_NAME"));
    }

    #[test]
    fn local_backend_validates_with_path_and_url() {
        assert!(local_config().validate().is_ok());

        let mut missing_url = local_config();
        missing_url.storage.local_storage_base_url = None;
        assert!(missing_url.validate().is_err());
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let mut config = local_config();
        config.base.environment = "Production".to_string();
        assert!(config.is_production());
        assert!(config.validate().is_err());

        config.base.cors_origins = vec!["https://vargoagro.com".to_string()];
        assert!(config.validate().is_ok());
    }
}
