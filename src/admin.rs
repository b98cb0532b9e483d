//! App provisioning through the admin service.
//!
//! Admin operations authenticate with the developer account's dev key and
//! secret rather than an app's key, and always route through the global
//! admin host regardless of zone.

use serde::{Deserialize, Serialize};

use crate::client::JPushClient;
use crate::zone::Service;
use crate::Result;

/// Certificate bytes as a base64 string, the layout the admin API expects
/// for file uploads.
mod cert_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }
}

/// Payload for creating an app under a developer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppRequest {
    pub app_name: String,
    pub android_package: String,
    pub group_name: String,
}

impl AppRequest {
    pub fn new(
        app_name: impl Into<String>,
        android_package: impl Into<String>,
        group_name: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            android_package: android_package.into(),
            group_name: group_name.into(),
        }
    }
}

/// A provisioned app.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct App {
    pub app_key: String,
    pub android_package: String,
    /// `false` when an app with the same package already existed.
    #[serde(default)]
    pub is_new_created: bool,
}

/// APNs certificate upload.
///
/// The admin API takes camelCase keys here, unlike every other endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateUpload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_certificate_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pro_certificate_password: Option<String>,
    #[serde(with = "cert_bytes", skip_serializing_if = "Option::is_none")]
    pub dev_certificate_file: Option<Vec<u8>>,
    #[serde(with = "cert_bytes", skip_serializing_if = "Option::is_none")]
    pub pro_certificate_file: Option<Vec<u8>>,
}

impl CertificateUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dev_certificate(mut self, file: Vec<u8>) -> Self {
        self.dev_certificate_file = Some(file);
        self
    }

    pub fn with_dev_password(mut self, password: impl Into<String>) -> Self {
        self.dev_certificate_password = Some(password.into());
        self
    }

    pub fn with_pro_certificate(mut self, file: Vec<u8>) -> Self {
        self.pro_certificate_file = Some(file);
        self
    }

    pub fn with_pro_password(mut self, password: impl Into<String>) -> Self {
        self.pro_certificate_password = Some(password.into());
        self
    }
}

impl JPushClient {
    /// Provision an app.
    ///
    /// `POST /v1/app`
    pub async fn create_app(&self, request: &AppRequest) -> Result<App> {
        let url = self.endpoint(Service::Admin, "app");
        self.send_json(self.http().post(url).json(request)).await
    }

    /// Delete an app. The admin API models this as a POST with an empty
    /// body, not an HTTP DELETE.
    ///
    /// `POST /v1/app/{app_key}/delete`
    pub async fn delete_app(&self, app_key: &str) -> Result<()> {
        let path = format!("app/{app_key}/delete");
        let url = self.endpoint(Service::Admin, &path);
        self.send(self.http().post(url)).await?;
        Ok(())
    }

    /// Upload APNs certificates for an app.
    ///
    /// `POST /v1/app/{app_key}/certificate`
    pub async fn upload_certificate(
        &self,
        app_key: &str,
        upload: &CertificateUpload,
    ) -> Result<()> {
        let path = format!("app/{app_key}/certificate");
        let url = self.endpoint(Service::Admin, &path);
        self.send(self.http().post(url).json(upload)).await?;
        Ok(())
    }
}
