//! Hearing lookups: `/hearing`, `/hearing/{congress}`,
//! `/hearing/{congress}/{chamber}/{jacketNumber}`.

use serde::{Deserialize, Serialize};

use super::ListQuery;
use crate::client::{ApiResult, CongressClient};
use crate::http::{Envelope, RequestDescriptor};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Hearing {
    pub jacket_number: Option<u32>,
    pub congress: Option<u32>,
    pub chamber: Option<String>,
    pub title: Option<String>,
    pub citation: Option<String>,
    pub update_date: Option<String>,
}

impl CongressClient {
    #[tracing::instrument(skip(self, query))]
    pub async fn list_hearings(&self, query: &ListQuery) -> ApiResult<Envelope<Vec<Hearing>>> {
        self.request(&query.apply(RequestDescriptor::new("hearing"))).await
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn list_hearings_by_congress(
        &self,
        congress: u32,
        query: &ListQuery,
    ) -> ApiResult<Envelope<Vec<Hearing>>> {
        let path = format!("hearing/{}", congress);
        self.request(&query.apply(RequestDescriptor::new(path))).await
    }

    /// Fetches one hearing, e.g. `get_hearing(116, "house", 41365)`.
    #[tracing::instrument(skip(self))]
    pub async fn get_hearing(
        &self,
        congress: u32,
        chamber: &str,
        jacket_number: u32,
    ) -> ApiResult<Envelope<Hearing>> {
        let path = format!(
            "hearing/{}/{}/{}",
            congress,
            chamber.to_lowercase(),
            jacket_number
        );
        self.request(&RequestDescriptor::new(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_client;

    #[tokio::test]
    async fn test_list_hearings() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/hearing?api_key=test-key&format=json")
            .with_status(200)
            .with_body(
                r#"{
                    "hearings": [
                        {
                            "jacketNumber": 41365,
                            "congress": 116,
                            "chamber": "House",
                            "citation": "H.Hrg.116"
                        }
                    ],
                    "pagination": {"count": 1}
                }"#,
            )
            .create_async()
            .await;

        let client = test_client(&server.url());
        let envelope = client.list_hearings(&ListQuery::default()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].jacket_number, Some(41365));
    }

    #[tokio::test]
    async fn test_list_hearings_by_congress() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/hearing/116?api_key=test-key&format=json")
            .with_status(200)
            .with_body(r#"{"hearings": [{"congress": 116}]}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let envelope = client
            .list_hearings_by_congress(116, &ListQuery::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(envelope.data[0].congress, Some(116));
    }

    #[tokio::test]
    async fn test_get_hearing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/hearing/116/house/41365?api_key=test-key&format=json")
            .with_status(200)
            .with_body(r#"{"hearing": {"jacketNumber": 41365, "chamber": "House"}}"#)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let envelope = client.get_hearing(116, "House", 41365).await.unwrap();

        mock.assert_async().await;
        assert_eq!(envelope.data.chamber, Some("House".to_string()));
    }
}
