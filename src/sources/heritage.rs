//! National Heritage Service (KHS) source
//!
//! Two-stage lookup: the list endpoint returns heritage items as XML, then
//! an image endpoint is queried once per item, keyed by the item's
//! (kind, serial, region) triple. The list endpoint accepts a single value
//! per code parameter, so a multi-code selection expands into one request
//! per (kind, region, palace) combination.
//!
//! Parsing is pure text-field extraction by tag name. Absent tags default to
//! an empty string (text) or zero (numeric) so downstream dedup and
//! filtering always see stable fields.

use crate::config::HeritageApiSettings;
use crate::network::ApiRequest;

/// Code of the designation-kind filter group.
pub const KIND_GROUP: &str = "ccbaKdcd";
/// Code of the region filter group.
pub const REGION_GROUP: &str = "ccbaCtcd";
/// Code of the palace/sub-area filter group.
pub const SUBAREA_GROUP: &str = "ccbaPcd1";

/// One heritage asset from the list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeritageItem {
    pub sn: u32,
    pub no: u32,
    /// Designation kind name (국보, 보물, ...)
    pub ccma_name: String,
    /// Primary name, the field keyword filtering runs against
    pub ccba_mnm1: String,
    /// Secondary (hanja) name
    pub ccba_mnm2: String,
    /// Region name
    pub ccba_ctcd_nm: String,
    /// City/district name
    pub ccsi_name: String,
    /// Administrating authority
    pub ccba_admin: String,
    /// Designation kind code
    pub ccba_kdcd: String,
    /// Region code
    pub ccba_ctcd: String,
    /// Serial number within the kind
    pub ccba_asno: String,
    /// Cancellation flag
    pub ccba_cncl: String,
    /// Request-processing code
    pub ccba_cpno: String,
    pub longitude: String,
    pub latitude: String,
    /// Registration date
    pub reg_dt: String,
}

impl HeritageItem {
    /// Two records with the same (serial, kind) pair describe the same
    /// real-world asset.
    pub fn dedup_key(&self) -> (String, String) {
        (self.ccba_asno.clone(), self.ccba_kdcd.clone())
    }
}

/// Image record from the image endpoint. The endpoint returns at most one
/// `<item>`; a document without one parses to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeritageImage {
    pub ccba_kdcd: String,
    pub ccba_asno: String,
    pub ccba_ctcd: String,
    pub ccba_mnm1: String,
    pub ccba_mnm2: String,
    pub sn: u32,
    /// Public-license notice URL
    pub image_nuri: String,
    pub image_url: String,
    /// Image description
    pub ccim_desc: String,
}

/// A heritage item enriched with its image lookup. A failed or absent
/// lookup leaves the image fields empty; the item is still eligible for
/// inclusion.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedHeritageItem {
    pub item: HeritageItem,
    pub image_url: String,
    pub image_desc: String,
}

impl MergedHeritageItem {
    pub fn new(item: HeritageItem, image: Option<HeritageImage>) -> Self {
        let (image_url, image_desc) = match image {
            Some(image) => (image.image_url, image.ccim_desc),
            None => (String::new(), String::new()),
        };
        Self {
            item,
            image_url,
            image_desc,
        }
    }
}

/// Build one list request for a (kind, region, sub-area) code triple. A
/// non-empty keyword is forwarded as the server-side name filter.
pub fn list_request(
    api: &HeritageApiSettings,
    kind: &str,
    region: &str,
    subarea: &str,
    keyword: &str,
) -> ApiRequest {
    let mut request = ApiRequest::get(&api.list_url)
        .param("ccbaKdcd", kind)
        .param("ccbaCtcd", region)
        .param("ccbaPcd1", subarea);
    if !keyword.is_empty() {
        request = request.param("ccbaMnm1", keyword);
    }
    request
}

/// Build the image lookup request for one item.
pub fn image_request(api: &HeritageApiSettings, item: &HeritageItem) -> ApiRequest {
    ApiRequest::get(&api.image_url)
        .param("ccbaKdcd", &item.ccba_kdcd)
        .param("ccbaAsno", &item.ccba_asno)
        .param("ccbaCtcd", &item.ccba_ctcd)
}

/// Parse a list response into heritage items, one per `<item>` element.
pub fn parse_items(xml: &str) -> Vec<HeritageItem> {
    item_blocks(xml)
        .map(|block| HeritageItem {
            sn: int_field(block, "sn", 0),
            no: int_field(block, "no", 0),
            ccma_name: text_field(block, "ccmaName"),
            ccba_mnm1: text_field(block, "ccbaMnm1"),
            ccba_mnm2: text_field(block, "ccbaMnm2"),
            ccba_ctcd_nm: text_field(block, "ccbaCtcdNm"),
            ccsi_name: text_field(block, "ccsiName"),
            ccba_admin: text_field(block, "ccbaAdmin"),
            ccba_kdcd: text_field(block, "ccbaKdcd"),
            ccba_ctcd: text_field(block, "ccbaCtcd"),
            ccba_asno: text_field(block, "ccbaAsno"),
            ccba_cncl: text_field(block, "ccbaCncl"),
            ccba_cpno: text_field(block, "ccbaCpno"),
            longitude: text_field(block, "longitude"),
            latitude: text_field(block, "latitude"),
            reg_dt: text_field(block, "regDt"),
        })
        .collect()
}

/// Parse an image response. `None` when the document has no `<item>`,
/// distinguishable from an image whose fields happen to be empty.
pub fn parse_image(xml: &str) -> Option<HeritageImage> {
    let block = item_blocks(xml).next()?;
    Some(HeritageImage {
        ccba_kdcd: text_field(block, "ccbaKdcd"),
        ccba_asno: text_field(block, "ccbaAsno"),
        ccba_ctcd: text_field(block, "ccbaCtcd"),
        ccba_mnm1: text_field(block, "ccbaMnm1"),
        ccba_mnm2: text_field(block, "ccbaMnm2"),
        // the image endpoint numbers images from 1
        sn: int_field(block, "sn", 1),
        image_nuri: text_field(block, "imageNuri"),
        image_url: text_field(block, "imageUrl"),
        ccim_desc: text_field(block, "ccimDesc"),
    })
}

/// Iterate the `<item>...</item>` blocks of a document in order.
fn item_blocks(xml: &str) -> impl Iterator<Item = &str> {
    xml.split("<item>")
        .skip(1)
        .filter_map(|rest| rest.find("</item>").map(|end| &rest[..end]))
}

/// Extract the text content of a tag, empty string when absent. The KHS API
/// wraps text values in CDATA sections.
fn text_field(block: &str, tag: &str) -> String {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let Some(start) = block.find(&open) else {
        return String::new();
    };
    let content_start = start + open.len();
    let Some(end) = block[content_start..].find(&close) else {
        return String::new();
    };

    let content = block[content_start..content_start + end].trim();
    let content = content
        .strip_prefix("<![CDATA[")
        .and_then(|inner| inner.strip_suffix("]]>"))
        .unwrap_or(content);
    content.trim().to_string()
}

/// Extract a numeric field, falling back to `default` when absent or not a
/// number.
fn int_field(block: &str, tag: &str, default: u32) -> u32 {
    let text = text_field(block, tag);
    if text.is_empty() {
        return default;
    }
    text.parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<result>
  <totalCnt>2</totalCnt>
  <item>
    <sn>1</sn>
    <no>1</no>
    <ccmaName><![CDATA[국보]]></ccmaName>
    <ccbaMnm1><![CDATA[서울 숭례문]]></ccbaMnm1>
    <ccbaMnm2><![CDATA[서울 崇禮門]]></ccbaMnm2>
    <ccbaCtcdNm><![CDATA[서울]]></ccbaCtcdNm>
    <ccsiName><![CDATA[중구]]></ccsiName>
    <ccbaAdmin><![CDATA[문화재청]]></ccbaAdmin>
    <ccbaKdcd>11</ccbaKdcd>
    <ccbaCtcd>11</ccbaCtcd>
    <ccbaAsno>00010000</ccbaAsno>
    <ccbaCncl>N</ccbaCncl>
    <ccbaCpno>1111100010000</ccbaCpno>
    <longitude>126.97537</longitude>
    <latitude>37.55998</latitude>
    <regDt>20150427</regDt>
  </item>
  <item>
    <ccbaMnm1>서울 흥인지문</ccbaMnm1>
    <ccbaKdcd>12</ccbaKdcd>
    <ccbaAsno>00010000</ccbaAsno>
  </item>
</result>"#;

    #[test]
    fn test_parse_items_count_matches_elements() {
        let items = parse_items(LIST_XML);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_parse_items_fields() {
        let items = parse_items(LIST_XML);
        let first = &items[0];
        assert_eq!(first.sn, 1);
        assert_eq!(first.ccma_name, "국보");
        assert_eq!(first.ccba_mnm1, "서울 숭례문");
        assert_eq!(first.ccba_kdcd, "11");
        assert_eq!(first.ccba_asno, "00010000");
        assert_eq!(first.longitude, "126.97537");
        assert_eq!(first.reg_dt, "20150427");
    }

    #[test]
    fn test_parse_items_absent_tags_default() {
        let items = parse_items(LIST_XML);
        let second = &items[1];
        assert_eq!(second.sn, 0);
        assert_eq!(second.no, 0);
        assert_eq!(second.ccma_name, "");
        assert_eq!(second.ccba_admin, "");
        assert_eq!(second.ccba_mnm1, "서울 흥인지문");
    }

    #[test]
    fn test_parse_items_empty_document() {
        let items = parse_items("<result><totalCnt>0</totalCnt></result>");
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_image_present() {
        let xml = r#"<result><item>
            <ccbaKdcd>11</ccbaKdcd>
            <ccbaAsno>00010000</ccbaAsno>
            <ccbaCtcd>11</ccbaCtcd>
            <sn>1</sn>
            <imageNuri><![CDATA[공공누리 제1유형]]></imageNuri>
            <imageUrl>http://example.com/image.jpg</imageUrl>
            <ccimDesc><![CDATA[정면 전경]]></ccimDesc>
        </item></result>"#;
        let image = parse_image(xml).unwrap();
        assert_eq!(image.image_url, "http://example.com/image.jpg");
        assert_eq!(image.ccim_desc, "정면 전경");
        assert_eq!(image.sn, 1);
    }

    #[test]
    fn test_parse_image_absent_is_none() {
        // no <item> element: the explicit absent sentinel, not a record of
        // empty strings masquerading as data
        assert_eq!(parse_image("<result></result>"), None);
        assert_eq!(parse_image(""), None);
    }

    #[test]
    fn test_parse_image_sn_defaults_to_one() {
        let image = parse_image("<result><item><ccbaKdcd>11</ccbaKdcd></item></result>").unwrap();
        assert_eq!(image.sn, 1);
        assert_eq!(image.image_url, "");
    }

    #[test]
    fn test_list_request_with_keyword() {
        let api = HeritageApiSettings::default();
        let request = list_request(&api, "11", "21", "00", "숭례문");
        assert_eq!(request.url, api.list_url);
        assert_eq!(request.param_value("ccbaKdcd"), Some("11"));
        assert_eq!(request.param_value("ccbaCtcd"), Some("21"));
        assert_eq!(request.param_value("ccbaPcd1"), Some("00"));
        assert_eq!(request.param_value("ccbaMnm1"), Some("숭례문"));
    }

    #[test]
    fn test_list_request_without_keyword() {
        let api = HeritageApiSettings::default();
        let request = list_request(&api, "11", "21", "00", "");
        assert_eq!(request.param_value("ccbaMnm1"), None);
    }

    #[test]
    fn test_image_request_keyed_by_item_triple() {
        let api = HeritageApiSettings::default();
        let item = HeritageItem {
            ccba_kdcd: "11".to_string(),
            ccba_asno: "00010000".to_string(),
            ccba_ctcd: "11".to_string(),
            ..Default::default()
        };
        let request = image_request(&api, &item);
        assert_eq!(request.url, api.image_url);
        assert_eq!(request.param_value("ccbaKdcd"), Some("11"));
        assert_eq!(request.param_value("ccbaAsno"), Some("00010000"));
        assert_eq!(request.param_value("ccbaCtcd"), Some("11"));
    }

    #[test]
    fn test_merge_without_image() {
        let item = HeritageItem::default();
        let merged = MergedHeritageItem::new(item, None);
        assert_eq!(merged.image_url, "");
        assert_eq!(merged.image_desc, "");
    }
}
