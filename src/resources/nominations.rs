//! Nomination lookups: `/nomination`, `/nomination/{congress}`,
//! `/nomination/{congress}/{nominationNumber}`.

use serde::{Deserialize, Serialize};

use super::{LatestAction, ListQuery};
use crate::client::{ApiResult, CongressClient};
use crate::http::{Envelope, RequestDescriptor};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Nomination {
    pub congress: Option<u32>,
    pub number: Option<u32>,
    pub citation: Option<String>,
    pub organization: Option<String>,
    pub received_date: Option<String>,
    pub update_date: Option<String>,
    pub latest_action: Option<LatestAction>,
}

impl CongressClient {
    #[tracing::instrument(skip(self, query))]
    pub async fn list_nominations(
        &self,
        query: &ListQuery,
    ) -> ApiResult<Envelope<Vec<Nomination>>> {
        self.request(&query.apply(RequestDescriptor::new("nomination"))).await
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn list_nominations_by_congress(
        &self,
        congress: u32,
        query: &ListQuery,
    ) -> ApiResult<Envelope<Vec<Nomination>>> {
        let path = format!("nomination/{}", congress);
        self.request(&query.apply(RequestDescriptor::new(path))).await
    }

    /// Fetches one nomination, e.g. `get_nomination(117, 2467)`.
    #[tracing::instrument(skip(self))]
    pub async fn get_nomination(
        &self,
        congress: u32,
        nomination_number: u32,
    ) -> ApiResult<Envelope<Nomination>> {
        let path = format!("nomination/{}/{}", congress, nomination_number);
        self.request(&RequestDescriptor::new(path)).await
    }
}
