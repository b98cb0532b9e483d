//! Delivery and user statistics.
//!
//! The report service answers for pushes delivered earlier: per-message
//! receive counts, per-device delivery status and daily user activity.
//! Message IDs come from [`PushReceipt::msg_id`](crate::PushReceipt).

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::client::JPushClient;
use crate::zone::Service;
use crate::Result;

/// `%Y-%m-%d` dates, the layout the report API expects in request bodies.
mod report_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }
}

/// Receive counts for one message.
///
/// Counters for platforms the push did not target come back as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReceivedReport {
    pub msg_id: i64,
    #[serde(default)]
    pub android_received: Option<i32>,
    #[serde(default)]
    pub ios_apns_sent: Option<i32>,
    #[serde(default)]
    pub ios_apns_received: Option<i32>,
    #[serde(default)]
    pub ios_msg_received: Option<i32>,
    #[serde(default)]
    pub wp_mpns_sent: Option<i32>,
}

/// Query for per-device delivery status of one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageStatusRequest {
    pub msg_id: i64,
    pub registration_ids: Vec<String>,
    /// Day to query, defaults to today on the provider side.
    #[serde(with = "report_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl MessageStatusRequest {
    pub fn new<I, S>(msg_id: i64, registration_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            msg_id,
            registration_ids: registration_ids.into_iter().map(Into::into).collect(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Delivery status of one message on one device.
///
/// `0` received, `1` not received, `2` not a target, `3` invalid query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MessageStatus {
    pub status: i32,
}

/// Android delivery counters for one message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AndroidMessageStats {
    #[serde(default)]
    pub received: Option<i32>,
    #[serde(default)]
    pub target: Option<i32>,
    #[serde(default)]
    pub online_push: Option<i32>,
    #[serde(default)]
    pub click: Option<i32>,
    #[serde(default)]
    pub msg_click: Option<i32>,
}

/// iOS delivery counters for one message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct IosMessageStats {
    #[serde(default)]
    pub apns_sent: Option<i32>,
    #[serde(default)]
    pub apns_target: Option<i32>,
    #[serde(default)]
    pub apns_received: Option<i32>,
    #[serde(default)]
    pub click: Option<i32>,
    #[serde(default)]
    pub target: Option<i32>,
    #[serde(default)]
    pub received: Option<i32>,
}

/// Windows Phone delivery counters for one message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct WinphoneMessageStats {
    #[serde(default)]
    pub mpns_target: Option<i32>,
    #[serde(default)]
    pub mpns_sent: Option<i32>,
    #[serde(default)]
    pub click: Option<i32>,
}

/// Full per-platform delivery statistics for one message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct MessagesReport {
    #[serde(default)]
    pub msg_id: Option<String>,
    #[serde(default)]
    pub android: Option<AndroidMessageStats>,
    #[serde(default)]
    pub ios: Option<IosMessageStats>,
    #[serde(default)]
    pub winphone: Option<WinphoneMessageStats>,
}

/// Aggregation granularity for the user report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeUnit {
    Hour,
    Day,
    Month,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Hour => "HOUR",
            TimeUnit::Day => "DAY",
            TimeUnit::Month => "MONTH",
        }
    }

    /// Render a window start in the layout this granularity expects.
    fn format_start(&self, start: NaiveDateTime) -> String {
        let format = match self {
            TimeUnit::Hour => "%Y-%m-%d %H",
            TimeUnit::Day => "%Y-%m-%d",
            TimeUnit::Month => "%Y-%m",
        };
        start.format(format).to_string()
    }
}

/// User counters for one platform in one window.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UserPlatformStat {
    #[serde(default)]
    pub new: Option<i32>,
    #[serde(default)]
    pub active: Option<i32>,
    #[serde(default)]
    pub online: Option<i32>,
}

/// User counters for one window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserStat {
    /// Window start, echoed in the layout of the queried granularity.
    pub time: String,
    #[serde(default)]
    pub android: Option<UserPlatformStat>,
    #[serde(default)]
    pub ios: Option<UserPlatformStat>,
}

/// User activity over a queried range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UsersReport {
    pub time_unit: TimeUnit,
    /// Range start, echoed in the layout of the queried granularity.
    pub start: String,
    pub duration: i32,
    #[serde(default)]
    pub items: Vec<UserStat>,
}

impl JPushClient {
    /// Receive counts for up to 100 messages.
    ///
    /// `GET /v3/received`
    pub async fn report_received<I, S>(&self, msg_ids: I) -> Result<Vec<ReceivedReport>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let url = self.endpoint(Service::Report, "received");
        let request = self.http().get(url).query(&[("msg_ids", join_ids(msg_ids))]);
        self.send_json(request).await
    }

    /// Per-device delivery status of one message, keyed by registration ID.
    ///
    /// `POST /v3/status/message`
    pub async fn message_status(
        &self,
        request: &MessageStatusRequest,
    ) -> Result<HashMap<String, MessageStatus>> {
        let url = self.endpoint(Service::Report, "status/message");
        self.send_json(self.http().post(url).json(request)).await
    }

    /// Full per-platform statistics for a set of messages.
    ///
    /// `GET /v3/messages`
    pub async fn report_messages<I, S>(&self, msg_ids: I) -> Result<MessagesReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let url = self.endpoint(Service::Report, "messages");
        let request = self.http().get(url).query(&[("msg_ids", join_ids(msg_ids))]);
        self.send_json(request).await
    }

    /// User activity for `duration` windows starting at `start`.
    ///
    /// `GET /v3/users`
    pub async fn report_users(
        &self,
        time_unit: TimeUnit,
        start: NaiveDateTime,
        duration: i32,
    ) -> Result<UsersReport> {
        let url = self.endpoint(Service::Report, "users");
        let request = self.http().get(url).query(&[
            ("time_unit", time_unit.as_str().to_owned()),
            ("start", time_unit.format_start(start)),
            ("duration", duration.to_string()),
        ]);
        self.send_json(request).await
    }
}

fn join_ids<I, S>(ids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .map(|id| id.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(",")
}
