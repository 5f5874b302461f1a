//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use club_billing::adapters::http::{app_router, BillingAppState, CronSecret};
use club_billing::adapters::{InMemoryMemberStatusStore, InMemorySubscriptionStore};
use club_billing::application::{NotificationDispatcher, RunBillingCycleHandler};
use club_billing::domain::billing::{BillingCalendar, Member, PaymentStatus};
use club_billing::domain::foundation::{MemberId, SubscriptionId};
use club_billing::domain::notification::{PushKeys, PushSubscription, ReminderMessages};
use club_billing::ports::{Clock, PushError, PushTransport};
use secrecy::SecretString;

pub const CRON_SECRET: &str = "integration-cron-secret";

/// Clock pinned to one date.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

/// Records every send and answers with a configured status per endpoint.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(String, serde_json::Value)>>,
    statuses: Mutex<HashMap<String, u16>>,
}

impl RecordingTransport {
    pub fn respond_with(&self, endpoint: &str, status: u16) {
        self.statuses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), status);
    }

    pub fn endpoints(&self) -> Vec<String> {
        let mut endpoints: Vec<String> =
            self.sent.lock().unwrap().iter().map(|(e, _)| e.clone()).collect();
        endpoints.sort();
        endpoints
    }

    pub fn payloads(&self) -> Vec<serde_json::Value> {
        self.sent.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }
}

#[async_trait]
impl PushTransport for RecordingTransport {
    async fn send(&self, endpoint: &str, _keys: &PushKeys, payload: &[u8]) -> Result<(), PushError> {
        let body = serde_json::from_slice(payload).unwrap_or(serde_json::Value::Null);
        self.sent.lock().unwrap().push((endpoint.to_string(), body));

        match self.statuses.lock().unwrap().get(endpoint) {
            Some(&status) => Err(PushError::Rejected {
                status,
                body: String::new(),
            }),
            None => Ok(()),
        }
    }
}

/// Everything a test needs to drive and inspect one billing run.
pub struct Harness {
    pub members: InMemoryMemberStatusStore,
    pub subscriptions: InMemorySubscriptionStore,
    pub transport: Arc<RecordingTransport>,
    pub handler: Arc<RunBillingCycleHandler>,
}

impl Harness {
    pub fn on(today: NaiveDate) -> Self {
        let members = InMemoryMemberStatusStore::new();
        let subscriptions = InMemorySubscriptionStore::new().linked_to(members.clone());
        let transport = Arc::new(RecordingTransport::default());

        let dispatcher = Arc::new(NotificationDispatcher::new(
            Arc::new(subscriptions.clone()),
            transport.clone(),
        ));
        let handler = Arc::new(RunBillingCycleHandler::new(
            Arc::new(members.clone()),
            Arc::new(subscriptions.clone()),
            dispatcher,
            ReminderMessages::new("Smart Club", "https://app.club.example/"),
            BillingCalendar::default(),
            Arc::new(FixedClock(today)),
        ));

        Self {
            members,
            subscriptions,
            transport,
            handler,
        }
    }

    pub fn router(&self) -> axum::Router {
        app_router(
            BillingAppState::new(self.handler.clone()),
            CronSecret::new(SecretString::new(CRON_SECRET.to_string())),
        )
    }

    /// Adds a member with one device whose endpoint is derived from `tag`.
    pub async fn member(&self, tag: &str, status: PaymentStatus) -> MemberId {
        let id = MemberId::new();
        self.members
            .insert(Member::new(id, format!("Member {}", tag), tag, status))
            .await;
        self.device(id, &endpoint(tag)).await;
        id
    }

    pub async fn device(&self, member_id: MemberId, endpoint: &str) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscriptions
            .insert(PushSubscription {
                id,
                member_id,
                endpoint: endpoint.to_string(),
                keys: PushKeys {
                    p256dh: "client-public-key".to_string(),
                    auth: "client-auth".to_string(),
                },
            })
            .await;
        id
    }
}

pub fn endpoint(tag: &str) -> String {
    format!("https://push.example/{}", tag)
}
