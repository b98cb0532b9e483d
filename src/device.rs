//! Device, alias and tag registry operations.
//!
//! Registration IDs identify device installs. Each install carries at most
//! one alias and up to a provider-side limit of tags; both are queried and
//! edited through the device service.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::client::JPushClient;
use crate::push::Platform;
use crate::zone::Service;
use crate::Result;

/// Incremental edit of a membership list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modify {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
}

impl Modify {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_add<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_remove<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove.extend(values.into_iter().map(Into::into));
        self
    }
}

/// Edit of a single device's registry entry.
///
/// Unset fields are left untouched by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DeviceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Modify>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl DeviceUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags(mut self, tags: Modify) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Bind a mobile number for the SMS fallback.
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }
}

/// Edit of a tag's device membership.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TagUpdate {
    pub registration_ids: Modify,
}

impl TagUpdate {
    pub fn new(registration_ids: Modify) -> Self {
        Self { registration_ids }
    }

    /// Add the given devices to the tag.
    pub fn add<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Modify::new().with_add(ids))
    }

    /// Remove the given devices from the tag.
    pub fn remove<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Modify::new().with_remove(ids))
    }
}

/// Registry entry of a single device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceInfo {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
}

/// Connectivity of a single device.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceStatus {
    pub online: bool,
    /// Last seen time, absent while the device is online.
    #[serde(default)]
    pub last_online_time: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatusQuery {
    registration_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AliasDevices {
    registration_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TagList {
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TagMembership {
    result: bool,
}

impl JPushClient {
    /// Look up the tags, alias and mobile bound to a device.
    ///
    /// `GET /v3/devices/{registration_id}`
    pub async fn device_info(&self, registration_id: &str) -> Result<DeviceInfo> {
        let url = self.endpoint(Service::Device, registration_id);
        self.send_json(self.http().get(url)).await
    }

    /// Apply a registry edit to a device.
    ///
    /// `POST /v3/devices/{registration_id}`
    pub async fn update_device(&self, registration_id: &str, update: &DeviceUpdate) -> Result<()> {
        let url = self.endpoint(Service::Device, registration_id);
        self.send(self.http().post(url).json(update)).await?;
        Ok(())
    }

    /// Query online status for a batch of devices, keyed by registration ID.
    ///
    /// `POST /v3/devices/status/`
    pub async fn device_status<I, S>(
        &self,
        registration_ids: I,
    ) -> Result<HashMap<String, DeviceStatus>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let url = self.endpoint(Service::Device, "status/");
        let query = StatusQuery {
            registration_ids: registration_ids.into_iter().map(Into::into).collect(),
        };
        self.send_json(self.http().post(url).json(&query)).await
    }

    /// List the devices bound to an alias, optionally filtered by platform.
    ///
    /// `GET /v3/aliases/{alias}`
    pub async fn devices_by_alias(
        &self,
        alias: &str,
        platforms: &[Platform],
    ) -> Result<Vec<String>> {
        let url = self.endpoint(Service::Alias, alias);
        let mut request = self.http().get(url);
        if !platforms.is_empty() {
            request = request.query(&[("platform", join_platforms(platforms))]);
        }
        let devices: AliasDevices = self.send_json(request).await?;
        Ok(devices.registration_ids)
    }

    /// Delete an alias from every device carrying it.
    ///
    /// `DELETE /v3/aliases/{alias}`
    pub async fn delete_alias(&self, alias: &str, platforms: &[Platform]) -> Result<()> {
        let url = self.endpoint(Service::Alias, alias);
        let mut request = self.http().delete(url);
        if !platforms.is_empty() {
            request = request.query(&[("platform", join_platforms(platforms))]);
        }
        self.send(request).await?;
        Ok(())
    }

    /// List every tag in use by the app.
    ///
    /// `GET /v3/tags/`
    pub async fn tags(&self) -> Result<Vec<String>> {
        let url = self.endpoint(Service::Tag, "");
        let list: TagList = self.send_json(self.http().get(url)).await?;
        Ok(list.tags)
    }

    /// Check whether a device carries a tag.
    ///
    /// `GET /v3/tags/{tag}/registration_ids/{registration_id}`
    pub async fn device_in_tag(&self, tag: &str, registration_id: &str) -> Result<bool> {
        let path = format!("{tag}/registration_ids/{registration_id}");
        let url = self.endpoint(Service::Tag, &path);
        let membership: TagMembership = self.send_json(self.http().get(url)).await?;
        Ok(membership.result)
    }

    /// Add or remove devices from a tag.
    ///
    /// `POST /v3/tags/{tag}`
    pub async fn update_tag(&self, tag: &str, update: &TagUpdate) -> Result<()> {
        let url = self.endpoint(Service::Tag, tag);
        self.send(self.http().post(url).json(update)).await?;
        Ok(())
    }

    /// Delete a tag from every device carrying it.
    ///
    /// `DELETE /v3/tags/{tag}`
    pub async fn delete_tag(&self, tag: &str, platforms: &[Platform]) -> Result<()> {
        let url = self.endpoint(Service::Tag, tag);
        let mut request = self.http().delete(url);
        if !platforms.is_empty() {
            request = request.query(&[("platform", join_platforms(platforms))]);
        }
        self.send(request).await?;
        Ok(())
    }
}

fn join_platforms(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(Platform::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_modify_skips_empty() {
        let only_add = Modify::new().with_add(["vip"]);
        assert_eq!(
            serde_json::to_value(&only_add).unwrap(),
            json!({ "add": ["vip"] })
        );

        let both = Modify::new().with_add(["a"]).with_remove(["b"]);
        assert_eq!(
            serde_json::to_value(&both).unwrap(),
            json!({ "add": ["a"], "remove": ["b"] })
        );
    }

    #[test]
    fn test_device_update_fields() {
        let update = DeviceUpdate::new()
            .with_alias("user-17")
            .with_tags(Modify::new().with_remove(["stale"]));
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "tags": { "remove": ["stale"] }, "alias": "user-17" })
        );
    }

    #[test]
    fn test_tag_update_shape() {
        let update = TagUpdate::add(["rid1", "rid2"]);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "registration_ids": { "add": ["rid1", "rid2"] } })
        );
    }

    #[test]
    fn test_device_info_nulls() {
        let info: DeviceInfo = serde_json::from_value(json!({
            "tags": ["vip"],
            "alias": null,
        }))
        .unwrap();
        assert_eq!(info.tags, vec!["vip"]);
        assert_eq!(info.alias, None);
        assert_eq!(info.mobile, None);
    }

    #[test]
    fn test_device_status_map() {
        let statuses: HashMap<String, DeviceStatus> = serde_json::from_value(json!({
            "rid1": { "online": true },
            "rid2": { "online": false, "last_online_time": "2020-01-01 10:00:00" },
        }))
        .unwrap();
        assert!(statuses["rid1"].online);
        assert_eq!(statuses["rid1"].last_online_time, None);
        assert_eq!(
            statuses["rid2"].last_online_time.as_deref(),
            Some("2020-01-01 10:00:00")
        );
    }

    #[test]
    fn test_platform_join() {
        assert_eq!(
            join_platforms(&[Platform::Android, Platform::Ios]),
            "android,ios"
        );
        assert_eq!(join_platforms(&[]), "");
    }
}
