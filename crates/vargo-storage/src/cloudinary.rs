//! Cloudinary upload backend
//!
//! Uploads go to `{api_base}/v1_1/{cloud_name}/{resource_kind}/upload` as a
//! signed multipart request carrying the file as a base64 data URI.
//! Signed parameters are sorted by name, joined as `k=v&k=v`, suffixed with
//! the API secret and hashed with the account's signature algorithm (SHA-1
//! unless the account opted into SHA-256).

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::keys::normalize_folder;
use crate::traits::{Storage, StorageError, StorageResult, StorageUpload, StoredObject};
use crate::StorageBackend;
use vargo_core::SignatureAlgorithm;

pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Credentials and endpoint for one Cloudinary account.
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base: String,
    pub timeout: Duration,
    pub signature_algorithm: SignatureAlgorithm,
}

impl Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("signature_algorithm", &self.signature_algorithm)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    format: Option<String>,
    bytes: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Cloudinary storage implementation
#[derive(Clone)]
pub struct CloudinaryStorage {
    http_client: reqwest::Client,
    config: CloudinaryConfig,
}

impl Debug for CloudinaryStorage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CloudinaryStorage")
            .field("config", &self.config)
            .finish()
    }
}

impl CloudinaryStorage {
    pub fn new(config: CloudinaryConfig) -> StorageResult<Self> {
        if config.cloud_name.trim().is_empty()
            || config.api_key.trim().is_empty()
            || config.api_secret.trim().is_empty()
        {
            return Err(StorageError::ConfigError(
                "Cloudinary cloud name, API key and API secret are required".to_string(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                StorageError::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn upload_url(&self, resource_kind: &str) -> String {
        format!(
            "{}/v1_1/{}/{}/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name,
            resource_kind
        )
    }
}

/// Sign request parameters the way the upload API expects.
pub(crate) fn sign_params(
    params: &[(&str, String)],
    api_secret: &str,
    algorithm: SignatureAlgorithm,
) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    match algorithm {
        SignatureAlgorithm::Sha1 => hex_digest::<Sha1>(&to_sign, api_secret),
        SignatureAlgorithm::Sha256 => hex_digest::<Sha256>(&to_sign, api_secret),
    }
}

fn hex_digest<D: Digest>(to_sign: &str, api_secret: &str) -> String {
    let mut hasher = D::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize().as_slice())
}

fn data_uri(mime_type: &str, data: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(data)
    )
}

#[async_trait]
impl Storage for CloudinaryStorage {
    async fn upload(&self, upload: StorageUpload) -> StorageResult<StoredObject> {
        let folder = normalize_folder(&upload.folder)?;
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [("folder", folder.clone()), ("timestamp", timestamp.clone())];
        let signature = sign_params(
            &signed,
            &self.config.api_secret,
            self.config.signature_algorithm,
        );
        let url = self.upload_url(upload.resource_kind.as_str());
        let size = upload.data.len();

        let form = reqwest::multipart::Form::new()
            .text("file", data_uri(&upload.mime_type, &upload.data))
            .text("folder", folder.clone())
            .text("timestamp", timestamp)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!("Failed to reach media service: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| {
                    if body.trim().is_empty() {
                        "Unknown error".to_string()
                    } else {
                        body
                    }
                });

            tracing::warn!(
                status = status.as_u16(),
                folder = %folder,
                resource_kind = %upload.resource_kind,
                error = %message,
                "Cloudinary rejected upload"
            );

            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            StorageError::UploadFailed(format!("Invalid response from media service: {}", e))
        })?;

        tracing::info!(
            public_id = %body.public_id,
            resource_kind = %upload.resource_kind,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Cloudinary upload successful"
        );

        Ok(StoredObject {
            secure_url: body.secure_url,
            public_id: body.public_id,
            format: body.format.unwrap_or_default(),
            size_bytes: body.bytes,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Cloudinary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use mockito::Matcher;
    use vargo_core::models::ResourceKind;

    fn test_config(api_base: String) -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: "vargo".to_string(),
            api_key: "123456".to_string(),
            api_secret: "abcd".to_string(),
            api_base,
            timeout: Duration::from_secs(5),
            signature_algorithm: SignatureAlgorithm::Sha1,
        }
    }

    fn pdf_upload() -> StorageUpload {
        StorageUpload {
            data: Bytes::from_static(b"%PDF-1.4"),
            mime_type: "application/pdf".to_string(),
            original_filename: "price-list.pdf".to_string(),
            folder: "vargo-agro/documents".to_string(),
            resource_kind: ResourceKind::Raw,
        }
    }

    fn signed_params() -> [(&'static str, String); 2] {
        [
            ("timestamp", "1700000000".to_string()),
            ("folder", "vargo-agro".to_string()),
        ]
    }

    #[test]
    fn signature_sorts_params_and_appends_secret() {
        assert_eq!(
            sign_params(&signed_params(), "abcd", SignatureAlgorithm::Sha1),
            "019cad72302db146866749287c3e3e2a68ded49b"
        );
    }

    #[test]
    fn signature_uses_sha256_when_configured() {
        assert_eq!(
            sign_params(&signed_params(), "abcd", SignatureAlgorithm::Sha256),
            "93bd2e146ccd0d62dd317bbc94ac7531f94ca500c4b6fb91529f4bcdf8fbd14e"
        );
    }

    #[test]
    fn data_uri_embeds_mime_and_base64() {
        assert_eq!(data_uri("text/plain", b"hi"), "data:text/plain;base64,aGk=");
    }

    #[test]
    fn new_rejects_missing_credentials() {
        let mut config = test_config(DEFAULT_API_BASE.to_string());
        config.api_secret = String::new();
        assert!(matches!(
            CloudinaryStorage::new(config),
            Err(StorageError::ConfigError(_))
        ));
    }

    #[test]
    fn debug_output_hides_secret() {
        let config = test_config(DEFAULT_API_BASE.to_string());
        assert!(!format!("{:?}", config).contains("abcd"));
    }

    #[tokio::test]
    async fn uploads_to_resource_kind_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1_1/vargo/raw/upload")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("name=\"folder\"\r\n\r\nvargo-agro/documents".to_string()),
                Matcher::Regex("name=\"api_key\"\r\n\r\n123456".to_string()),
                Matcher::Regex("data:application/pdf;base64,JVBERi0xLjQ=".to_string()),
                Matcher::Regex("name=\"signature\"\r\n\r\n[0-9a-f]{40}\r\n".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "secure_url": "https://res.cloudinary.com/vargo/raw/upload/v1/vargo-agro/documents/price-list.pdf",
                    "public_id": "vargo-agro/documents/price-list.pdf",
                    "bytes": 8,
                    "resource_type": "raw"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let storage = CloudinaryStorage::new(test_config(server.url())).unwrap();
        let stored = storage.upload(pdf_upload()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(stored.public_id, "vargo-agro/documents/price-list.pdf");
        assert_eq!(stored.format, "");
        assert_eq!(stored.size_bytes, 8);
        assert!(stored.secure_url.starts_with("https://res.cloudinary.com/"));
    }

    #[tokio::test]
    async fn remote_rejection_passes_message_through() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1_1/vargo/raw/upload")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"Invalid Signature"}}"#)
            .create_async()
            .await;

        let storage = CloudinaryStorage::new(test_config(server.url())).unwrap();
        let err = storage.upload(pdf_upload()).await.unwrap_err();

        match err {
            StorageError::Rejected { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid Signature");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invalid_folder_never_reaches_network() {
        let server = mockito::Server::new_async().await;
        let storage = CloudinaryStorage::new(test_config(server.url())).unwrap();

        let mut upload = pdf_upload();
        upload.folder = "../secrets".to_string();

        assert!(matches!(
            storage.upload(upload).await,
            Err(StorageError::InvalidFolder(_))
        ));
    }
}
