//! Push payload types and delivery operations.
//!
//! A [`PushRequest`] carries the target platforms and audience plus any
//! combination of a [`Notification`], an in-app [`Message`], an
//! [`SmsMessage`] fallback and delivery [`Options`]. The same payload is
//! accepted by [`JPushClient::push`], [`JPushClient::validate_push`],
//! [`GroupClient::push`] and the schedule API.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::client::{GroupClient, JPushClient};
use crate::zone::Service;
use crate::Result;

/// A deliverable platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    Winphone,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Winphone => "winphone",
        }
    }
}

/// Target platforms for a push.
///
/// Serializes as the string `"all"` or as a list of platform names, which is
/// the shape the push endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Platforms {
    /// Deliver to every platform the app is registered on.
    #[default]
    All,
    /// Deliver to the listed platforms only.
    List(Vec<Platform>),
}

impl Platforms {
    pub fn list(platforms: impl IntoIterator<Item = Platform>) -> Self {
        Platforms::List(platforms.into_iter().collect())
    }
}

impl From<Platform> for Platforms {
    fn from(platform: Platform) -> Self {
        Platforms::List(vec![platform])
    }
}

impl Serialize for Platforms {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Platforms::All => serializer.serialize_str("all"),
            Platforms::List(platforms) => platforms.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Platforms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Sentinel(String),
            List(Vec<Platform>),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Sentinel(s) if s == "all" => Ok(Platforms::All),
            Repr::Sentinel(other) => Err(D::Error::custom(format!(
                "expected \"all\" or a platform list, got \"{other}\""
            ))),
            Repr::List(platforms) => Ok(Platforms::List(platforms)),
        }
    }
}

/// Selection criteria for a targeted push.
///
/// Fields are combined with AND; the values inside one field with OR. Empty
/// fields stay off the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AudienceTarget {
    /// Devices carrying any of these tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,
    /// Devices carrying all of these tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_and: Vec<String>,
    /// Devices carrying none of these tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_not: Vec<String>,
    /// Devices bound to any of these aliases.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alias: Vec<String>,
    /// Individual devices by registration ID.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registration_id: Vec<String>,
    /// Segment IDs defined in the console.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segment: Vec<String>,
    /// A/B test IDs defined in the console.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abtest: Vec<String>,
}

impl AudienceTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_tags_and<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_and.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_tags_not<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_not.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alias.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn with_registration_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registration_id.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segment.extend(segments.into_iter().map(Into::into));
        self
    }

    pub fn with_abtests<I, S>(mut self, abtests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abtest.extend(abtests.into_iter().map(Into::into));
        self
    }
}

/// The audience of a push.
///
/// Serializes as the string `"all"` for a broadcast or as an
/// [`AudienceTarget`] object for a targeted delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Audience {
    /// Broadcast to every device of the app.
    #[default]
    All,
    /// Deliver to devices matching the target criteria.
    Target(AudienceTarget),
}

impl Audience {
    /// Target devices carrying any of the given tags.
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AudienceTarget::new().with_tags(tags).into()
    }

    /// Target devices bound to any of the given aliases.
    pub fn aliases<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AudienceTarget::new().with_aliases(aliases).into()
    }

    /// Target the given registration IDs directly.
    pub fn registration_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AudienceTarget::new().with_registration_ids(ids).into()
    }
}

impl From<AudienceTarget> for Audience {
    fn from(target: AudienceTarget) -> Self {
        Audience::Target(target)
    }
}

impl Serialize for Audience {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Audience::All => serializer.serialize_str("all"),
            Audience::Target(target) => target.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Audience {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Sentinel(String),
            Target(AudienceTarget),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Sentinel(s) if s == "all" => Ok(Audience::All),
            Repr::Sentinel(other) => Err(D::Error::custom(format!(
                "expected \"all\" or an audience object, got \"{other}\""
            ))),
            Repr::Target(target) => Ok(Audience::Target(target)),
        }
    }
}

/// System notification payload, per platform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Notification {
    /// Fallback alert text for platforms without an override below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<String>,
    /// Android override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidNotification>,
    /// iOS (APNs) override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<IosNotification>,
    /// Windows Phone override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winphone: Option<WinphoneNotification>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alert text shared by all platforms.
    pub fn with_alert(mut self, alert: impl Into<String>) -> Self {
        self.alert = Some(alert.into());
        self
    }

    pub fn with_android(mut self, android: AndroidNotification) -> Self {
        self.android = Some(android);
        self
    }

    pub fn with_ios(mut self, ios: IosNotification) -> Self {
        self.ios = Some(ios);
        self
    }

    pub fn with_winphone(mut self, winphone: WinphoneNotification) -> Self {
        self.winphone = Some(winphone);
        self
    }
}

/// Android notification payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AndroidNotification {
    /// Notification text.
    pub alert: String,
    /// Title, defaults to the app name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Notification layout ID registered in the app.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builder_id: Option<i32>,
    /// Display priority, -2 to 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Notification category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Expanded style: 1 big text, 2 inbox, 3 big picture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<i32>,
    /// Sound, vibration and light mask.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<i32>,
    /// Text shown when expanded (style 1).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_text: Option<String>,
    /// Inbox lines shown when expanded (style 2).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub inbox: Map<String, Value>,
    /// Picture URL or path shown when expanded (style 3).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_pic_path: Option<String>,
    /// Large icon URL or path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_icon: Option<String>,
    /// Intent launched on tap.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub intent: Map<String, Value>,
    /// Custom key-value payload.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extras: Map<String, Value>,
}

impl AndroidNotification {
    pub fn new(alert: impl Into<String>) -> Self {
        Self {
            alert: alert.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_builder_id(mut self, builder_id: i32) -> Self {
        self.builder_id = Some(builder_id);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// iOS (APNs) notification payload.
///
/// `alert` is either a plain string or an APNs alert dictionary, so it is
/// kept as raw JSON. The `content-available` and `mutable-content` keys use
/// the hyphenated names APNs defines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IosNotification {
    /// Alert text or APNs alert dictionary.
    pub alert: Value,
    /// Sound file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Badge count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<i32>,
    /// Background refresh push.
    #[serde(rename = "content-available", skip_serializing_if = "Option::is_none")]
    pub content_available: Option<bool>,
    /// Allow a service extension to rewrite the payload.
    #[serde(rename = "mutable-content", skip_serializing_if = "Option::is_none")]
    pub mutable_content: Option<bool>,
    /// Action category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Custom key-value payload.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extras: Map<String, Value>,
}

impl IosNotification {
    pub fn new(alert: impl Into<Value>) -> Self {
        Self {
            alert: alert.into(),
            sound: None,
            badge: None,
            content_available: None,
            mutable_content: None,
            category: None,
            extras: Map::new(),
        }
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    pub fn with_badge(mut self, badge: i32) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Mark the push as a background refresh.
    pub fn with_content_available(mut self, available: bool) -> Self {
        self.content_available = Some(available);
        self
    }

    /// Allow a notification service extension to rewrite the payload.
    pub fn with_mutable_content(mut self, mutable: bool) -> Self {
        self.mutable_content = Some(mutable);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// Windows Phone notification payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WinphoneNotification {
    /// Notification text.
    pub alert: String,
    /// Title shown above the alert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// In-app page opened on tap, sent as `_open_page`.
    #[serde(rename = "_open_page", skip_serializing_if = "Option::is_none")]
    pub open_page: Option<String>,
    /// Custom key-value payload.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extras: Map<String, Value>,
}

impl WinphoneNotification {
    pub fn new(alert: impl Into<String>) -> Self {
        Self {
            alert: alert.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_open_page(mut self, page: impl Into<String>) -> Self {
        self.open_page = Some(page.into());
        self
    }
}

/// In-app message delivered to the application instead of the system tray.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Message {
    /// Message body.
    pub msg_content: String,
    /// Message title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Content type hint for the application.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Custom key-value payload.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extras: Map<String, Value>,
}

impl Message {
    pub fn new(msg_content: impl Into<String>) -> Self {
        Self {
            msg_content: msg_content.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// SMS fallback sent when the push is not confirmed in time.
///
/// `delay_time` and `temp_id` are always on the wire; the provider rejects
/// the section without them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SmsMessage {
    /// Seconds to wait for push confirmation before sending the SMS.
    pub delay_time: i32,
    /// SMS template ID registered with the provider.
    pub temp_id: i64,
    /// Template parameter substitutions.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub temp_para: Map<String, Value>,
}

impl SmsMessage {
    pub fn new(temp_id: i64, delay_time: i32) -> Self {
        Self {
            temp_id,
            delay_time,
            temp_para: Map::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.temp_para.insert(key.into(), value.into());
        self
    }
}

/// Delivery options.
///
/// `apns_production` is always serialized; leaving it implicit would let the
/// provider default to the production APNs environment on a payload that
/// meant the sandbox.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Options {
    /// Caller-chosen sequence number, echoed in the receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sendno: Option<i32>,
    /// Seconds the push stays deliverable to offline devices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<i32>,
    /// Message ID this push overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_msg_id: Option<i64>,
    /// Deliver through production APNs rather than the sandbox.
    #[serde(default)]
    pub apns_production: bool,
    /// APNs collapse identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apns_collapse_id: Option<String>,
    /// Spread delivery over this many minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_push_duration: Option<i32>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sendno(mut self, sendno: i32) -> Self {
        self.sendno = Some(sendno);
        self
    }

    pub fn with_time_to_live(mut self, seconds: i32) -> Self {
        self.time_to_live = Some(seconds);
        self
    }

    pub fn with_override_msg_id(mut self, msg_id: i64) -> Self {
        self.override_msg_id = Some(msg_id);
        self
    }

    pub fn with_apns_production(mut self, production: bool) -> Self {
        self.apns_production = production;
        self
    }

    pub fn with_apns_collapse_id(mut self, id: impl Into<String>) -> Self {
        self.apns_collapse_id = Some(id.into());
        self
    }

    pub fn with_big_push_duration(mut self, minutes: i32) -> Self {
        self.big_push_duration = Some(minutes);
        self
    }
}

/// A complete push payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Pre-allocated push ID from [`JPushClient::cid_pool`], for idempotent
    /// resubmission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    /// Target platforms.
    pub platform: Platforms,
    /// Target audience.
    pub audience: Audience,
    /// System notification section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    /// In-app message section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// SMS fallback section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_message: Option<SmsMessage>,
    /// Delivery options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

impl PushRequest {
    pub fn new(platform: Platforms, audience: Audience) -> Self {
        Self {
            cid: None,
            platform,
            audience,
            notification: None,
            message: None,
            sms_message: None,
            options: None,
        }
    }

    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_sms_message(mut self, sms: SmsMessage) -> Self {
        self.sms_message = Some(sms);
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }
}

/// Acknowledgement of an accepted push.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushReceipt {
    /// Provider-assigned message ID, usable with the report API.
    pub msg_id: String,
    /// Echo of the submitted sequence number.
    pub sendno: String,
}

/// What a pre-allocated push ID will be spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CidKind {
    Push,
    Schedule,
}

impl CidKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CidKind::Push => "push",
            CidKind::Schedule => "schedule",
        }
    }
}

#[derive(Debug, Deserialize)]
struct CidPool {
    cidlist: Vec<String>,
}

impl JPushClient {
    /// Deliver a push.
    ///
    /// `POST /v3/push`
    pub async fn push(&self, request: &PushRequest) -> Result<PushReceipt> {
        let url = self.endpoint(Service::Push, "push");
        self.send_json(self.http().post(url).json(request)).await
    }

    /// Run provider-side validation of a payload without delivering it.
    ///
    /// `POST /v3/push/validate`
    pub async fn validate_push(&self, request: &PushRequest) -> Result<PushReceipt> {
        let url = self.endpoint(Service::Push, "push/validate");
        self.send_json(self.http().post(url).json(request)).await
    }

    /// Reserve push IDs for later idempotent submission.
    ///
    /// `GET /v3/push/cid`
    pub async fn cid_pool(&self, count: usize, kind: Option<CidKind>) -> Result<Vec<String>> {
        let url = self.endpoint(Service::Push, "push/cid");
        let mut query: Vec<(&str, String)> = vec![("count", count.to_string())];
        if let Some(kind) = kind {
            query.push(("type", kind.as_str().to_owned()));
        }
        let pool: CidPool = self.send_json(self.http().get(url).query(&query)).await?;
        Ok(pool.cidlist)
    }
}

impl GroupClient {
    /// Deliver one push across every application in the group.
    ///
    /// `POST /v3/grouppush`
    pub async fn push(&self, request: &PushRequest) -> Result<PushReceipt> {
        let client = self.client();
        let url = client.endpoint(Service::Push, "grouppush");
        client.send_json(client.http().post(url).json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_platforms_serialize() {
        assert_eq!(serde_json::to_value(Platforms::All).unwrap(), json!("all"));
        assert_eq!(
            serde_json::to_value(Platforms::list([Platform::Android, Platform::Ios])).unwrap(),
            json!(["android", "ios"])
        );
    }

    #[test]
    fn test_platforms_deserialize() {
        let all: Platforms = serde_json::from_value(json!("all")).unwrap();
        assert_eq!(all, Platforms::All);

        let list: Platforms = serde_json::from_value(json!(["winphone"])).unwrap();
        assert_eq!(list, Platforms::List(vec![Platform::Winphone]));

        assert!(serde_json::from_value::<Platforms>(json!("some")).is_err());
    }

    #[test]
    fn test_audience_serialize() {
        assert_eq!(serde_json::to_value(Audience::All).unwrap(), json!("all"));

        let audience = Audience::tags(["vip", "beta"]);
        assert_eq!(
            serde_json::to_value(audience).unwrap(),
            json!({ "tag": ["vip", "beta"] })
        );
    }

    #[test]
    fn test_audience_deserialize() {
        let all: Audience = serde_json::from_value(json!("all")).unwrap();
        assert_eq!(all, Audience::All);

        let target: Audience = serde_json::from_value(json!({ "alias": ["u1"] })).unwrap();
        assert_eq!(target, Audience::aliases(["u1"]));

        assert!(serde_json::from_value::<Audience>(json!("some")).is_err());
    }

    #[test]
    fn test_audience_round_trip() {
        let audience = Audience::Target(
            AudienceTarget::new()
                .with_registration_ids(["rid1", "rid2"])
                .with_tags_not(["muted"]),
        );
        let value = serde_json::to_value(&audience).unwrap();
        assert_eq!(
            value,
            json!({ "tag_not": ["muted"], "registration_id": ["rid1", "rid2"] })
        );
        let back: Audience = serde_json::from_value(value).unwrap();
        assert_eq!(back, audience);
    }

    #[test]
    fn test_ios_hyphenated_keys() {
        let ios = IosNotification::new(json!({ "title": "hi", "body": "there" }))
            .with_sound("default")
            .with_content_available(true)
            .with_mutable_content(true);
        assert_eq!(
            serde_json::to_value(ios).unwrap(),
            json!({
                "alert": { "title": "hi", "body": "there" },
                "sound": "default",
                "content-available": true,
                "mutable-content": true,
            })
        );
    }

    #[test]
    fn test_winphone_open_page() {
        let winphone = WinphoneNotification::new("hello").with_open_page("/detail");
        assert_eq!(
            serde_json::to_value(winphone).unwrap(),
            json!({ "alert": "hello", "_open_page": "/detail" })
        );
    }

    #[test]
    fn test_options_apns_production() {
        assert_eq!(
            serde_json::to_value(Options::new()).unwrap(),
            json!({ "apns_production": false })
        );
    }

    #[test]
    fn test_sms_message_required_fields() {
        let sms = SmsMessage::new(1250, 60).with_param("code", "4711");
        assert_eq!(
            serde_json::to_value(sms).unwrap(),
            json!({ "delay_time": 60, "temp_id": 1250, "temp_para": { "code": "4711" } })
        );
    }

    #[test]
    fn test_push_request_skips_unset() {
        let request = PushRequest::new(Platforms::All, Audience::All)
            .with_notification(Notification::new().with_alert("hi"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "platform": "all",
                "audience": "all",
                "notification": { "alert": "hi" },
            })
        );
    }

    #[test]
    fn test_push_request_round_trip() {
        let request = PushRequest::new(
            Platform::Android.into(),
            Audience::registration_ids(["rid1"]),
        )
        .with_cid("8103a4c628a0b98994c-001")
        .with_notification(
            Notification::new()
                .with_android(AndroidNotification::new("hi").with_extra("k", "v")),
        )
        .with_message(Message::new("body").with_content_type("text"))
        .with_options(Options::new().with_apns_production(true).with_sendno(7));

        let value = serde_json::to_value(&request).unwrap();
        let back: PushRequest = serde_json::from_value(value).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn test_push_request_broadcast_decode() {
        let request: PushRequest = serde_json::from_value(json!({
            "platform": "all",
            "audience": "all",
        }))
        .unwrap();
        assert_eq!(request.platform, Platforms::All);
        assert_eq!(request.audience, Audience::All);
    }
}
