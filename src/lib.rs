//! # JPush Client
//!
//! Client for the JPush (Jiguang) push notification REST API.
//!
//! ## Features
//!
//! - **Push**: immediate, validated and group delivery to Android, iOS and
//!   Windows Phone
//! - **Devices**: registration ID, alias and tag registry management
//! - **Reports**: delivery receipts and user statistics
//! - **Schedules**: provider-side one-shot and periodical pushes
//! - **Admin**: app provisioning and APNs certificate upload
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jpush_client::{Audience, JPushClient, Notification, Platforms, PushRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JPushClient::new("app-key", "master-secret")?;
//!
//!     let request = PushRequest::new(Platforms::All, Audience::tags(["vip"]))
//!         .with_notification(Notification::new().with_alert("Hello!"));
//!
//!     let receipt = client.push(&request).await?;
//!     println!("accepted as message {}", receipt.msg_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Routing Through the Beijing Zone
//!
//! ```rust,ignore
//! use jpush_client::{JPushClient, Zone};
//!
//! let client = JPushClient::builder("app-key", "master-secret")
//!     .zone(Zone::Beijing)
//!     .build()?;
//! ```

mod admin;
mod client;
mod device;
mod error;
mod push;
mod report;
mod schedule;
mod zone;

pub use admin::{App, AppRequest, CertificateUpload};
pub use client::{ClientBuilder, GroupClient, JPushClient, RateLimit};
pub use device::{DeviceInfo, DeviceStatus, DeviceUpdate, Modify, TagUpdate};
pub use error::{Error, Result};
pub use push::{
    AndroidNotification, Audience, AudienceTarget, CidKind, IosNotification, Message,
    Notification, Options, Platform, Platforms, PushReceipt, PushRequest, SmsMessage,
    WinphoneNotification,
};
pub use report::{
    AndroidMessageStats, IosMessageStats, MessageStatus, MessageStatusRequest, MessagesReport,
    ReceivedReport, TimeUnit, UserPlatformStat, UserStat, UsersReport, WinphoneMessageStats,
};
pub use schedule::{
    PeriodUnit, Periodical, Schedule, ScheduleMsgIds, SchedulePage, ScheduleRequest, Trigger,
};
pub use zone::{Service, Zone};

/// Prelude for common imports.
///
/// ```
/// use jpush_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{GroupClient, JPushClient};
    pub use crate::error::{Error, Result};
    pub use crate::push::{
        Audience, AudienceTarget, Message, Notification, Options, Platform, Platforms,
        PushRequest,
    };
    pub use crate::schedule::{ScheduleRequest, Trigger};
    pub use crate::zone::Zone;
}
