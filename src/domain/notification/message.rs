//! Outbound notification payloads.

use serde::Serialize;

use crate::domain::billing::Member;

/// Which notice a member is receiving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    EarlyReminder,
    FinalReminder,
    OverdueNotice,
}

impl NotificationKind {
    pub fn body(&self) -> &'static str {
        match self {
            NotificationKind::EarlyReminder => {
                "Reminder: please pay this month's membership fee before the end of the month."
            }
            NotificationKind::FinalReminder => {
                "Final reminder: this month's membership fee is still unpaid."
            }
            NotificationKind::OverdueNotice => {
                "Overdue payment! You now owe two monthly fees."
            }
        }
    }
}

/// JSON body delivered to the device's service worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NotificationPayload {
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Builds the per-member payload for each notice.
#[derive(Debug, Clone)]
pub struct ReminderMessages {
    club_name: String,
    app_url: String,
}

impl ReminderMessages {
    /// `app_url` must be absolute; a trailing slash is dropped.
    pub fn new(club_name: impl Into<String>, app_url: impl Into<String>) -> Self {
        let app_url: String = app_url.into();
        Self {
            club_name: club_name.into(),
            app_url: app_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute link to the member's profile view.
    pub fn profile_url(&self, member: &Member) -> String {
        format!("{}/p/{}", self.app_url, member.routing_token)
    }

    pub fn payload(&self, kind: NotificationKind, member: &Member) -> NotificationPayload {
        NotificationPayload {
            title: self.club_name.clone(),
            body: kind.body().to_string(),
            url: Some(self.profile_url(member)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::PaymentStatus;
    use crate::domain::foundation::MemberId;

    fn member() -> Member {
        Member::new(MemberId::new(), "Ivan Petrov", "tag-0042", PaymentStatus::Warning)
    }

    #[test]
    fn profile_url_is_absolute_deep_link() {
        let messages = ReminderMessages::new("Smart Club", "https://club.example/");
        assert_eq!(
            messages.profile_url(&member()),
            "https://club.example/p/tag-0042"
        );
    }

    #[test]
    fn payload_uses_club_name_and_kind_body() {
        let messages = ReminderMessages::new("Smart Club", "https://club.example");
        let payload = messages.payload(NotificationKind::FinalReminder, &member());

        assert_eq!(payload.title, "Smart Club");
        assert_eq!(payload.body, NotificationKind::FinalReminder.body());
        assert_eq!(payload.url.as_deref(), Some("https://club.example/p/tag-0042"));
    }

    #[test]
    fn serialized_payload_omits_missing_url() {
        let payload = NotificationPayload {
            title: "Smart Club".to_string(),
            body: "hello".to_string(),
            url: None,
        };
        let json: serde_json::Value = serde_json::from_slice(&payload.to_bytes().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "Smart Club", "body": "hello" }));
    }

    #[test]
    fn every_kind_has_distinct_body() {
        let bodies = [
            NotificationKind::EarlyReminder.body(),
            NotificationKind::FinalReminder.body(),
            NotificationKind::OverdueNotice.body(),
        ];
        assert_ne!(bodies[0], bodies[1]);
        assert_ne!(bodies[1], bodies[2]);
        assert_ne!(bodies[0], bodies[2]);
    }
}
