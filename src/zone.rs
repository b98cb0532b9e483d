//! API zones and per-service endpoints.

/// Deployment zone hosting the provider's API.
///
/// Most applications use [`Zone::Default`]; applications provisioned in the
/// Beijing data center route through [`Zone::Beijing`], which serves every
/// API group from a single host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// Global endpoints (`*.jpush.cn`).
    #[default]
    Default,
    /// Beijing data center endpoints (`bjapi.push.jiguang.cn`).
    Beijing,
}

/// API grouping, each rooted at its own base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Push delivery (`/v3/push`, `/v3/push/validate`, ...).
    Push,
    /// Delivery and user statistics.
    Report,
    /// Device registration records.
    Device,
    /// Alias lookups and removal.
    Alias,
    /// Tag listing and membership.
    Tag,
    /// Remotely scheduled pushes.
    Schedule,
    /// Application administration.
    Admin,
}

impl Zone {
    /// Base URL for a service in this zone.
    ///
    /// Every base URL ends with `/`; operation paths are appended directly.
    pub fn url(&self, service: Service) -> &'static str {
        match self {
            Zone::Default => match service {
                Service::Push => "https://api.jpush.cn/v3/",
                Service::Report => "https://report.jpush.cn/v3/",
                Service::Device => "https://device.jpush.cn/v3/devices/",
                Service::Alias => "https://device.jpush.cn/v3/aliases/",
                Service::Tag => "https://device.jpush.cn/v3/tags/",
                Service::Schedule => "https://api.jpush.cn/v3/schedules/",
                Service::Admin => "https://admin.jpush.cn/v1/",
            },
            Zone::Beijing => match service {
                Service::Push => "https://bjapi.push.jiguang.cn/v3/",
                Service::Report => "https://bjapi.push.jiguang.cn/v3/report/",
                Service::Device => "https://bjapi.push.jiguang.cn/v3/device/",
                Service::Alias => "https://bjapi.push.jiguang.cn/v3/device/aliases/",
                Service::Tag => "https://bjapi.push.jiguang.cn/v3/device/tags/",
                Service::Schedule => "https://bjapi.push.jiguang.cn/v3/push/schedules/",
                Service::Admin => "https://admin.jpush.cn/v1/",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zone_endpoints() {
        assert_eq!(Zone::Default.url(Service::Push), "https://api.jpush.cn/v3/");
        assert_eq!(
            Zone::Default.url(Service::Report),
            "https://report.jpush.cn/v3/"
        );
        assert_eq!(
            Zone::Default.url(Service::Device),
            "https://device.jpush.cn/v3/devices/"
        );
        assert_eq!(
            Zone::Default.url(Service::Alias),
            "https://device.jpush.cn/v3/aliases/"
        );
        assert_eq!(
            Zone::Default.url(Service::Tag),
            "https://device.jpush.cn/v3/tags/"
        );
        assert_eq!(
            Zone::Default.url(Service::Schedule),
            "https://api.jpush.cn/v3/schedules/"
        );
        assert_eq!(
            Zone::Default.url(Service::Admin),
            "https://admin.jpush.cn/v1/"
        );
    }

    #[test]
    fn test_beijing_zone_endpoints() {
        for service in [
            Service::Push,
            Service::Report,
            Service::Device,
            Service::Alias,
            Service::Tag,
            Service::Schedule,
        ] {
            assert!(
                Zone::Beijing
                    .url(service)
                    .starts_with("https://bjapi.push.jiguang.cn/v3/"),
                "unexpected endpoint for {service:?}"
            );
        }
        // Administration stays on the global host even in the Beijing zone.
        assert_eq!(
            Zone::Beijing.url(Service::Admin),
            "https://admin.jpush.cn/v1/"
        );
    }

    #[test]
    fn test_endpoints_end_with_slash() {
        for zone in [Zone::Default, Zone::Beijing] {
            for service in [
                Service::Push,
                Service::Report,
                Service::Device,
                Service::Alias,
                Service::Tag,
                Service::Schedule,
                Service::Admin,
            ] {
                assert!(zone.url(service).ends_with('/'));
            }
        }
    }
}
