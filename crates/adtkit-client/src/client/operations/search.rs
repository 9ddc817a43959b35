//! Repository quick search.

use adtkit_transport::{RawResponse, Transport};

use super::decode;
use crate::client::core::AdtClient;
use crate::dispatcher::RequestSpec;
use crate::error::{AdtError, Result};
use crate::types::ObjectReference;

/// Search endpoint.
pub const SEARCH_URI: &str = "/sap/bc/adt/repository/informationsystem/search";

pub(crate) fn search_request(query: &str, max_results: u32) -> RequestSpec {
    RequestSpec::get(SEARCH_URI)
        .param("operation", "quickSearch")
        .param("query", query)
        .param("maxResults", max_results)
}

pub(crate) fn parse_search_response(response: RawResponse) -> Result<Vec<ObjectReference>> {
    if response.status != 200 {
        return Err(AdtError::UnexpectedStatus {
            operation: "search",
            status: response.status,
            body: response.body,
        });
    }
    let references = decode(&response.body)?
        .find_all(".//adtcore:objectReference")?
        .iter()
        .map(|element| ObjectReference::from_attributes(element.attributes()))
        .collect();
    Ok(references)
}

impl<T: Transport> AdtClient<T> {
    /// Searches the repository. `query` accepts `*` wildcards; hits come back
    /// in server order.
    ///
    /// # Errors
    ///
    /// [`AdtError::UnexpectedStatus`] for a non-200 answer,
    /// [`AdtError::MalformedResponse`] for a body that is not XML.
    pub async fn search_object(
        &mut self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<ObjectReference>> {
        let response = self.send(search_request(query, max_results)).await?;
        parse_search_response(response)
    }
}
