//! Typed, resource-specific surfaces over the generic request engine.
//!
//! Each module is a thin pass-through: it names the remote operation, builds
//! a descriptor, and shapes the envelope's payload into its model. All
//! authentication, retrying, and failure handling happens in the engine.

pub mod bills;
pub mod committees;
pub mod hearings;
pub mod members;
pub mod nominations;

pub use bills::{Bill, BillSummary};
pub use committees::Committee;
pub use hearings::Hearing;
pub use members::Member;
pub use nominations::Nomination;

use serde::{Deserialize, Serialize};

use crate::http::RequestDescriptor;

/// Windowing parameters accepted by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// ISO 8601 lower bound on the update time, e.g. `2024-01-01T00:00:00Z`.
    pub from_date_time: Option<String>,
    pub to_date_time: Option<String>,
}

impl ListQuery {
    pub(crate) fn apply(&self, mut descriptor: RequestDescriptor) -> RequestDescriptor {
        if let Some(offset) = self.offset {
            descriptor = descriptor.with_param("offset", offset);
        }
        if let Some(limit) = self.limit {
            descriptor = descriptor.with_param("limit", limit);
        }
        if let Some(from) = &self.from_date_time {
            descriptor = descriptor.with_param("fromDateTime", from);
        }
        if let Some(to) = &self.to_date_time {
            descriptor = descriptor.with_param("toDateTime", to);
        }
        descriptor
    }
}

/// Most recent action recorded against a bill or nomination.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LatestAction {
    pub action_date: Option<String>,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_applies_only_set_fields() {
        let query = ListQuery {
            offset: Some(40),
            limit: Some(20),
            ..Default::default()
        };
        let descriptor = query.apply(RequestDescriptor::new("bill"));
        assert_eq!(descriptor.param("offset"), Some("40"));
        assert_eq!(descriptor.param("limit"), Some("20"));
        assert_eq!(descriptor.param("fromDateTime"), None);
    }

    #[test]
    fn test_list_query_default_adds_nothing() {
        let descriptor = ListQuery::default().apply(RequestDescriptor::new("bill"));
        assert!(descriptor.params.is_empty());
    }
}
