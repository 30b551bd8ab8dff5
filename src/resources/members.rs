//! Member lookups: `/member`, `/member/congress/{congress}`, `/member/{bioguideId}`.

use serde::{Deserialize, Serialize};

use super::ListQuery;
use crate::client::{ApiResult, CongressClient};
use crate::http::{Envelope, RequestDescriptor};

/// A member of Congress. List endpoints populate a subset of the fields the
/// detail endpoint returns, so everything beyond the id is optional.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub bioguide_id: String,
    pub name: Option<String>,
    pub state: Option<String>,
    pub party_name: Option<String>,
    pub district: Option<u32>,
    pub update_date: Option<String>,
}

impl CongressClient {
    #[tracing::instrument(skip(self, query))]
    pub async fn list_members(&self, query: &ListQuery) -> ApiResult<Envelope<Vec<Member>>> {
        self.request(&query.apply(RequestDescriptor::new("member"))).await
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn list_members_by_congress(
        &self,
        congress: u32,
        query: &ListQuery,
    ) -> ApiResult<Envelope<Vec<Member>>> {
        let path = format!("member/congress/{}", congress);
        self.request(&query.apply(RequestDescriptor::new(path))).await
    }

    /// Fetches one member by bioguide id, e.g. `get_member("L000174")`.
    #[tracing::instrument(skip(self))]
    pub async fn get_member(&self, bioguide_id: &str) -> ApiResult<Envelope<Member>> {
        let path = format!("member/{}", bioguide_id);
        self.request(&RequestDescriptor::new(path)).await
    }
}
