//! Push registrations.

use std::collections::HashMap;
use std::fmt;

use crate::domain::foundation::{MemberId, SubscriptionId};

/// Encryption material a client hands out when it registers for push.
#[derive(Clone, PartialEq, Eq)]
pub struct PushKeys {
    /// Client public key (P-256 ECDH, base64url).
    pub p256dh: String,
    /// Client auth secret (base64url).
    pub auth: String,
}

impl fmt::Debug for PushKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushKeys")
            .field("p256dh", &self.p256dh)
            .field("auth", &"[REDACTED]")
            .finish()
    }
}

/// One registered device capable of receiving notifications for a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSubscription {
    pub id: SubscriptionId,
    pub member_id: MemberId,
    /// Push service URL identifying one installed client. The dedup key.
    pub endpoint: String,
    pub keys: PushKeys,
}

impl PushSubscription {
    /// Endpoint shortened for log lines.
    pub fn endpoint_preview(&self) -> &str {
        const MAX: usize = 60;
        match self.endpoint.char_indices().nth(MAX) {
            Some((idx, _)) => &self.endpoint[..idx],
            None => &self.endpoint,
        }
    }
}

/// Collapses rows that share an endpoint.
///
/// The last row read for an endpoint wins; endpoints keep the order in which
/// they first appeared.
pub fn dedupe_by_endpoint(rows: Vec<PushSubscription>) -> Vec<PushSubscription> {
    let mut position: HashMap<String, usize> = HashMap::with_capacity(rows.len());
    let mut unique: Vec<PushSubscription> = Vec::with_capacity(rows.len());

    for row in rows {
        match position.get(&row.endpoint) {
            Some(&idx) => unique[idx] = row,
            None => {
                position.insert(row.endpoint.clone(), unique.len());
                unique.push(row);
            }
        }
    }

    unique
}
