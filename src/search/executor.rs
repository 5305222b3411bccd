//! Search execution and orchestration
//!
//! Both aggregators follow the same shape: build an explicit list of
//! request descriptors, dispatch them all concurrently, then join in a
//! single-threaded step that concatenates the per-task partial lists. No
//! accumulator is shared between tasks.

use super::models::SearchQuery;
use crate::category::Category;
use crate::config::Settings;
use crate::error::SearchError;
use crate::network::{ApiRequest, HttpClient};
use crate::results::{
    dedup_by_key, filter_by_name, SearchOutcome, SearchedItem, Source, SourceFailure,
};
use crate::sources::heritage::{self, HeritageItem, MergedHeritageItem};
use crate::sources::tourism::{self, TourismItem};
use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Outcome of one request batch. Pages arrive in completion order; the
/// counters drive the `UpstreamUnavailable` decision.
struct Batch<T> {
    pages: Vec<Vec<T>>,
    succeeded: usize,
    transport_failures: usize,
}

impl<T> Batch<T> {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            succeeded: 0,
            transport_failures: 0,
        }
    }

    /// A batch fails as a whole only when nothing succeeded and at least
    /// one transport-level fault was observed. Parse failures alone
    /// degrade to an empty contribution.
    fn is_unavailable(&self) -> bool {
        self.succeeded == 0 && self.transport_failures > 0
    }
}

/// Search executor that coordinates fan-out to both upstream sources.
pub struct Search {
    client: HttpClient,
    settings: Settings,
    default_timeout: Duration,
    max_timeout: Duration,
}

impl Search {
    /// Create a new search executor.
    pub fn new(client: HttpClient, settings: Settings) -> Self {
        let default_timeout = Duration::from_secs_f64(settings.outgoing.request_timeout);
        Self {
            client,
            settings,
            default_timeout,
            max_timeout: Duration::from_secs(crate::MAX_TIMEOUT),
        }
    }

    /// Create an executor and its HTTP client from settings.
    pub fn from_settings(settings: Settings) -> Result<Self, SearchError> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        Ok(Self::new(client, settings))
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    fn request_timeout(&self) -> Duration {
        self.default_timeout.min(self.max_timeout)
    }

    /// Run a query against every source it selects.
    pub async fn execute(&self, query: &SearchQuery) -> Result<SearchOutcome, SearchError> {
        self.execute_with_cancel(query, &CancellationToken::new())
            .await
    }

    /// Run a query with a cancellation token. Once the token is triggered,
    /// no further in-flight requests are awaited and the partial result
    /// gathered so far is returned.
    pub async fn execute_with_cancel(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        let heritage = async {
            match &query.heritage_filter {
                Some(filter) => Some(self.search_heritage(filter, &query.keyword, cancel).await),
                None => None,
            }
        };
        let tourism = async {
            match &query.tourism_filter {
                Some(filter) => Some(self.search_tourism(filter, &query.keyword, cancel).await),
                None => None,
            }
        };
        let (heritage, tourism) = tokio::join!(heritage, tourism);

        let mut outcome = SearchOutcome::default();
        let mut attempted = 0usize;
        let mut unavailable = 0usize;

        for (source, result) in [(Source::Heritage, heritage), (Source::Tourism, tourism)] {
            let Some(result) = result else { continue };
            attempted += 1;
            match result {
                Ok(items) => outcome.items.extend(items),
                Err(err @ SearchError::UpstreamUnavailable) => {
                    warn!(%source, "source unavailable, degrading");
                    unavailable += 1;
                    outcome.failures.push(SourceFailure {
                        source,
                        detail: err.to_string(),
                    });
                }
                // filter-construction bugs are not transient; surface them
                Err(err) => return Err(err),
            }
        }

        if attempted > 0 && unavailable == attempted {
            return Err(SearchError::UpstreamUnavailable);
        }

        Ok(outcome)
    }

    /// Search the heritage registry for one filter node.
    ///
    /// The filter node must carry the three named sub-groups; a missing
    /// group fails immediately with `CategoryNotFound`. The selection
    /// expands into one list request per (kind, region, sub-area) triple
    /// because the endpoint takes a single value per parameter.
    pub async fn search_heritage(
        &self,
        filter: &Category,
        keyword: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchedItem>, SearchError> {
        let kinds = filter.child_group(heritage::KIND_GROUP)?;
        let regions = filter.child_group(heritage::REGION_GROUP)?;
        let subareas = filter.child_group(heritage::SUBAREA_GROUP)?;

        let mut requests = Vec::new();
        for kind in &kinds.item {
            for region in &regions.item {
                for subarea in &subareas.item {
                    requests.push(heritage::list_request(
                        &self.settings.heritage,
                        &kind.code,
                        &region.code,
                        &subarea.code,
                        keyword,
                    ));
                }
            }
        }
        info!(
            "heritage selection expands to {} list requests",
            requests.len()
        );

        let batch = self
            .fetch_batch(requests, cancel, |text| Ok(heritage::parse_items(text)))
            .await;
        let unavailable = batch.is_unavailable();
        let items: Vec<HeritageItem> = batch.pages.into_iter().flatten().collect();

        if items.is_empty() && unavailable {
            return Err(SearchError::UpstreamUnavailable);
        }

        let merged = self.enrich_with_images(items, cancel).await;
        let merged = dedup_by_key(merged, |m| m.item.dedup_key());
        // client-side safety net on top of the server-side ccbaMnm1 filter
        let merged = filter_by_name(merged, keyword, |m| m.item.ccba_mnm1.as_str());

        Ok(merged.iter().map(SearchedItem::from).collect())
    }

    /// Search the tourism service for one filter node. Each immediate child
    /// is a location-code grouping whose code names the query parameter its
    /// leaf codes are sent under.
    pub async fn search_tourism(
        &self,
        filter: &Category,
        keyword: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchedItem>, SearchError> {
        let mut requests = Vec::new();
        for group in &filter.item {
            for leaf in &group.item {
                requests.push(tourism::request(
                    &self.settings.tourism,
                    &group.code,
                    &leaf.code,
                    keyword,
                ));
            }
        }
        info!("tourism selection expands to {} requests", requests.len());

        let batch = self.fetch_batch(requests, cancel, tourism::parse_items).await;
        let unavailable = batch.is_unavailable();
        let items: Vec<TourismItem> = batch.pages.into_iter().flatten().collect();

        if items.is_empty() && unavailable {
            return Err(SearchError::UpstreamUnavailable);
        }

        // contentids are globally unique upstream; this pass keeps the
        // merge symmetric with the heritage side
        let items = dedup_by_key(items, |item| item.contentid.clone());

        Ok(items.iter().map(SearchedItem::from).collect())
    }

    /// Dispatch a request batch concurrently and join the parsed pages.
    /// Per-request failures are logged and counted, never propagated.
    async fn fetch_batch<T, P>(
        &self,
        requests: Vec<ApiRequest>,
        cancel: &CancellationToken,
        parse: P,
    ) -> Batch<T>
    where
        P: Fn(&str) -> Result<Vec<T>, SearchError>,
    {
        let timeout = self.request_timeout();
        let parse = &parse;
        let mut inflight: FuturesUnordered<_> = requests
            .into_iter()
            .map(|request| {
                let client = &self.client;
                async move {
                    let response = client.execute_with_timeout(request, timeout).await?;
                    if !response.is_success() {
                        return Err(SearchError::HttpStatus(response.status));
                    }
                    parse(&response.text)
                }
            })
            .collect();

        let mut batch = Batch::new();
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("search cancelled, keeping partial results");
                    break;
                }
                next = inflight.next() => match next {
                    Some(Ok(page)) => {
                        batch.succeeded += 1;
                        batch.pages.push(page);
                    }
                    Some(Err(err)) => {
                        if err.is_transport() {
                            batch.transport_failures += 1;
                        }
                        warn!("sub-query failed: {err}");
                    }
                    None => break,
                },
            }
        }
        batch
    }

    /// Look up the image for every heritage item concurrently. A failed or
    /// absent lookup yields empty image fields rather than dropping the
    /// item.
    async fn enrich_with_images(
        &self,
        items: Vec<HeritageItem>,
        cancel: &CancellationToken,
    ) -> Vec<MergedHeritageItem> {
        let timeout = self.request_timeout();
        let mut inflight: FuturesUnordered<_> = items
            .into_iter()
            .map(|item| {
                let client = &self.client;
                let api = &self.settings.heritage;
                async move {
                    let request = heritage::image_request(api, &item);
                    let image = match client.execute_with_timeout(request, timeout).await {
                        Ok(response) if response.is_success() => {
                            heritage::parse_image(&response.text)
                        }
                        Ok(response) => {
                            warn!(status = response.status, "heritage image lookup failed");
                            None
                        }
                        Err(err) => {
                            warn!("heritage image lookup failed: {err}");
                            None
                        }
                    };
                    MergedHeritageItem::new(item, image)
                }
            })
            .collect();

        let mut merged = Vec::new();
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(
                        "search cancelled during image enrichment, keeping {} items",
                        merged.len()
                    );
                    break;
                }
                next = inflight.next() => match next {
                    Some(item) => merged.push(item),
                    None => break,
                },
            }
        }
        merged
    }
}
