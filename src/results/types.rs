//! Public result type and normalizers

use crate::sources::heritage::MergedHeritageItem;
use crate::sources::tourism::TourismItem;
use serde::{Deserialize, Serialize};

/// Which upstream a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Heritage,
    Tourism,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heritage => write!(f, "heritage"),
            Self::Tourism => write!(f, "tourism"),
        }
    }
}

/// The common result shape handed to the caller. Both sources normalize
/// into this before leaving the core; missing-field defaults established by
/// the parsers carry through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchedItem {
    /// Stable identity: `{kind}-{serial}` for heritage, `contentid` for
    /// tourism
    pub id: String,
    pub source: Source,
    /// Designation kind name for heritage, content kind for tourism
    pub kind: String,
    /// Primary display name
    pub name: String,
    /// Region name for heritage, address for tourism
    pub region: String,
    /// Administrating authority, empty for tourism
    pub admin: String,
    pub longitude: f64,
    pub latitude: f64,
    pub image_url: Option<String>,
    pub description: String,
}

/// Content kind recorded for tourism results; the fixed category constants
/// limit upstream responses to museum content.
pub const TOURISM_KIND: &str = "박물관";

impl From<&MergedHeritageItem> for SearchedItem {
    fn from(merged: &MergedHeritageItem) -> Self {
        let item = &merged.item;
        Self {
            id: format!("{}-{}", item.ccba_kdcd, item.ccba_asno),
            source: Source::Heritage,
            kind: item.ccma_name.clone(),
            name: item.ccba_mnm1.clone(),
            region: item.ccba_ctcd_nm.clone(),
            admin: item.ccba_admin.clone(),
            longitude: item.longitude.parse().unwrap_or(0.0),
            latitude: item.latitude.parse().unwrap_or(0.0),
            image_url: (!merged.image_url.is_empty()).then(|| merged.image_url.clone()),
            description: merged.image_desc.clone(),
        }
    }
}

impl From<&TourismItem> for SearchedItem {
    fn from(item: &TourismItem) -> Self {
        Self {
            id: item.contentid.clone(),
            source: Source::Tourism,
            kind: TOURISM_KIND.to_string(),
            name: item.title.clone(),
            region: item.addr1.clone(),
            admin: String::new(),
            longitude: item.mapx.parse().unwrap_or(0.0),
            latitude: item.mapy.parse().unwrap_or(0.0),
            image_url: (!item.firstimage.is_empty()).then(|| item.firstimage.clone()),
            description: String::new(),
        }
    }
}
