//! VisitKorea tourism source (KorService2)
//!
//! JSON API with two operations: an area listing when no keyword is given
//! and a keyword search otherwise. Fixed content-category constants narrow
//! every request to museum-type content. Each filter grouping's code is the
//! name of the query parameter its leaf codes are sent under.

use crate::config::TourismApiSettings;
use crate::error::SearchError;
use crate::network::ApiRequest;
use serde::Deserialize;

/// Operation used when the keyword is empty.
pub const AREA_LIST_OP: &str = "areaBasedSyncList2";
/// Operation used when a keyword is present.
pub const KEYWORD_OP: &str = "searchKeyword2";

/// One tourism content entry. `contentid` is globally unique upstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TourismItem {
    pub contentid: String,
    pub title: String,
    #[serde(default)]
    pub firstimage: String,
    pub addr1: String,
    pub mapx: String,
    pub mapy: String,
}

// The API nests its payload as response.body.items.item.
#[derive(Debug, Deserialize)]
struct Envelope {
    response: EnvelopeResponse,
}

#[derive(Debug, Deserialize)]
struct EnvelopeResponse {
    body: EnvelopeBody,
}

#[derive(Debug, Deserialize)]
struct EnvelopeBody {
    items: EnvelopeItems,
}

#[derive(Debug, Deserialize)]
struct EnvelopeItems {
    item: Vec<TourismItem>,
}

/// Parse one response document. A document that does not match the
/// `response.body.items.item` envelope is malformed.
pub fn parse_items(json: &str) -> Result<Vec<TourismItem>, SearchError> {
    let envelope: Envelope =
        serde_json::from_str(json).map_err(|err| SearchError::MalformedResponse(err.to_string()))?;
    Ok(envelope.response.body.items.item)
}

/// Build one request for a (grouping, leaf code) pair. The operation is
/// chosen by keyword presence.
pub fn request(
    api: &TourismApiSettings,
    group_code: &str,
    leaf_code: &str,
    keyword: &str,
) -> ApiRequest {
    let operation = if keyword.is_empty() {
        AREA_LIST_OP
    } else {
        KEYWORD_OP
    };
    let url = format!("{}/{}", api.base_url.trim_end_matches('/'), operation);

    let mut request = ApiRequest::get(url)
        .param("serviceKey", &api.service_key)
        .param("MobileOS", &api.mobile_os)
        .param("MobileApp", &api.mobile_app)
        .param("cat1", &api.cat1)
        .param("cat2", &api.cat2)
        .param("cat3", &api.cat3)
        .param("_type", "json")
        .param(group_code, leaf_code);
    if !keyword.is_empty() {
        request = request.param("keyword", keyword);
    }
    request
}
