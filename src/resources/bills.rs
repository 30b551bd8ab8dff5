//! Bill lookups: `/bill`, `/bill/{congress}`, `/bill/{congress}/{type}/{number}`.

use serde::{Deserialize, Serialize};

use super::{LatestAction, ListQuery};
use crate::client::{ApiResult, CongressClient};
use crate::http::{Envelope, RequestDescriptor};

/// One bill as returned by the list endpoints.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub congress: u32,
    pub number: String,
    #[serde(rename = "type")]
    pub bill_type: Option<String>,
    pub title: Option<String>,
    pub origin_chamber: Option<String>,
    pub update_date: Option<String>,
    pub latest_action: Option<LatestAction>,
}

/// Detail record for a single bill.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub congress: u32,
    pub number: String,
    #[serde(rename = "type")]
    pub bill_type: Option<String>,
    pub title: Option<String>,
    pub origin_chamber: Option<String>,
    pub introduced_date: Option<String>,
    pub update_date: Option<String>,
    pub latest_action: Option<LatestAction>,
    pub policy_area: Option<PolicyArea>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyArea {
    pub name: Option<String>,
}

impl CongressClient {
    /// Lists bills across all congresses, most recently updated first.
    #[tracing::instrument(skip(self, query))]
    pub async fn list_bills(&self, query: &ListQuery) -> ApiResult<Envelope<Vec<BillSummary>>> {
        self.request(&query.apply(RequestDescriptor::new("bill"))).await
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn list_bills_by_congress(
        &self,
        congress: u32,
        query: &ListQuery,
    ) -> ApiResult<Envelope<Vec<BillSummary>>> {
        let path = format!("bill/{}", congress);
        self.request(&query.apply(RequestDescriptor::new(path))).await
    }

    /// Fetches one bill, e.g. `get_bill(117, "hr", "3076")`.
    #[tracing::instrument(skip(self))]
    pub async fn get_bill(
        &self,
        congress: u32,
        bill_type: &str,
        number: &str,
    ) -> ApiResult<Envelope<Bill>> {
        let path = format!("bill/{}/{}/{}", congress, bill_type.to_lowercase(), number);
        self.request(&RequestDescriptor::new(path)).await
    }
}
