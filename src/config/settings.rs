//! Settings structures for hansearch configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub outgoing: OutgoingSettings,
    pub heritage: HeritageApiSettings,
    pub tourism: TourismApiSettings,
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (HANSEARCH_* prefix). The tourism
    /// service key is injected configuration; `OPEN_API_KEY` is accepted as
    /// a fallback name.
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("HANSEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("HANSEARCH_REQUEST_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.outgoing.request_timeout = secs;
            }
        }
        if let Ok(val) = std::env::var("HANSEARCH_SERVICE_KEY") {
            self.tourism.service_key = val;
        } else if let Ok(val) = std::env::var("OPEN_API_KEY") {
            self.tourism.service_key = val;
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug mode
    pub debug: bool,
    /// Instance name reported to upstream APIs
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "hansearch".to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Per-request timeout in seconds
    pub request_timeout: f64,
    /// Connection pool size per host
    pub pool_maxsize: usize,
    /// Verify upstream TLS certificates
    pub verify_ssl: bool,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            pool_maxsize: 10,
            verify_ssl: true,
        }
    }
}

/// National Heritage Service API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeritageApiSettings {
    /// Heritage item list endpoint
    pub list_url: String,
    /// Heritage image lookup endpoint
    pub image_url: String,
}

impl Default for HeritageApiSettings {
    fn default() -> Self {
        Self {
            list_url: "http://www.khs.go.kr/cha/SearchKindOpenapiList.do".to_string(),
            image_url: "http://www.khs.go.kr/cha/SearchImageOpenapi.do".to_string(),
        }
    }
}

/// VisitKorea tourism API settings (KorService2)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TourismApiSettings {
    /// Service base URL; the operation name is appended per request
    pub base_url: String,
    /// API credential, injected via configuration or environment
    pub service_key: String,
    /// Client platform identification required by the API
    pub mobile_os: String,
    /// Client application identification required by the API
    pub mobile_app: String,
    /// Fixed content category constants narrowing results to museums
    pub cat1: String,
    pub cat2: String,
    pub cat3: String,
}

impl Default for TourismApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://apis.data.go.kr/B551011/KorService2".to_string(),
            service_key: String::new(),
            mobile_os: "WEB".to_string(),
            mobile_app: "hansearch".to_string(),
            cat1: "A02".to_string(),
            cat2: "A0206".to_string(),
            cat3: "A02060300".to_string(),
        }
    }
}
