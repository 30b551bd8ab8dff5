//! Committee lookups: `/committee`, `/committee/{chamber}`,
//! `/committee/{chamber}/{committeeCode}`.

use serde::{Deserialize, Serialize};

use super::ListQuery;
use crate::client::{ApiResult, CongressClient};
use crate::http::{Envelope, RequestDescriptor};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Committee {
    pub system_code: Option<String>,
    pub name: Option<String>,
    pub chamber: Option<String>,
    pub committee_type_code: Option<String>,
    pub update_date: Option<String>,
}

impl CongressClient {
    #[tracing::instrument(skip(self, query))]
    pub async fn list_committees(&self, query: &ListQuery) -> ApiResult<Envelope<Vec<Committee>>> {
        self.request(&query.apply(RequestDescriptor::new("committee"))).await
    }

    /// Lists committees for one chamber (`house`, `senate`, or `joint`).
    #[tracing::instrument(skip(self, query))]
    pub async fn list_committees_by_chamber(
        &self,
        chamber: &str,
        query: &ListQuery,
    ) -> ApiResult<Envelope<Vec<Committee>>> {
        let path = format!("committee/{}", chamber.to_lowercase());
        self.request(&query.apply(RequestDescriptor::new(path))).await
    }

    /// Fetches one committee, e.g. `get_committee("house", "hspw00")`.
    #[tracing::instrument(skip(self))]
    pub async fn get_committee(
        &self,
        chamber: &str,
        committee_code: &str,
    ) -> ApiResult<Envelope<Committee>> {
        let path = format!("committee/{}/{}", chamber.to_lowercase(), committee_code);
        self.request(&RequestDescriptor::new(path)).await
    }
}
