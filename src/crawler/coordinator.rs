//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the traversal engine that coordinates:
//! - Managing the frontier and visited set
//! - Dispatching a bounded number of concurrent fetches
//! - Link extraction and normalization for each fetched page
//! - Cancellation and fetch failure handling
//!
//! The coordinator task is the only owner of `CrawlState`. Worker tasks fetch
//! a page, extract and normalize its links, and hand the ordered list of
//! canonical paths back; the coordinator then attaches the new ones to the
//! tree. A page's children therefore keep its document order, while pages
//! with different parents may be numbered in fetch completion order.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::scheduler::CrawlState;
use crate::crawler::{FetchError, HtmlLinkExtractor, HttpFetcher, LinkExtractor, PageFetcher};
use crate::state::{NodeId, Sitemap};
use crate::url::normalize;
use crate::SitemapError;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Called with each path just before it is fetched
pub type ProgressCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Result of expanding one page, produced by a worker task
struct PageOutcome {
    id: NodeId,
    path: String,
    links: Result<Vec<String>, FetchError>,
}

/// Main crawler coordinator structure
pub struct Coordinator<F, E> {
    fetcher: Arc<F>,
    extractor: Arc<E>,
    config: CrawlerConfig,
    progress_callback: Option<ProgressCallback>,
}

impl Coordinator<HttpFetcher, HtmlLinkExtractor> {
    /// Creates a coordinator that crawls over HTTP and parses HTML
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(SitemapError)` - The HTTP client could not be built
    pub fn from_config(config: &Config) -> Result<Self, SitemapError> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(fetcher, HtmlLinkExtractor, config.crawler.clone()))
    }
}

impl<F, E> Coordinator<F, E>
where
    F: PageFetcher + 'static,
    E: LinkExtractor + 'static,
{
    pub fn new(fetcher: F, extractor: E, config: CrawlerConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(extractor),
            config,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawls `domain` from `start_path` until every reachable page is expanded
    pub async fn crawl(&self, domain: &str, start_path: &str) -> Result<Sitemap, SitemapError> {
        self.crawl_until(domain, start_path, std::future::pending())
            .await
    }

    /// Crawls like `crawl`, giving up as soon as `shutdown` resolves
    ///
    /// On shutdown, in-flight fetches are aborted and the partial tree is
    /// dropped; `SitemapError::Cancelled` is returned instead.
    ///
    /// # Returns
    ///
    /// * `Ok(Sitemap)` - The frontier drained with no fetch in flight
    /// * `Err(SitemapError)` - Cancelled, a worker panicked, or a page failed
    ///   with `fail_fast` set
    pub async fn crawl_until<S>(
        &self,
        domain: &str,
        start_path: &str,
        shutdown: S,
    ) -> Result<Sitemap, SitemapError>
    where
        S: Future<Output = ()>,
    {
        tracing::info!(
            "Starting crawl of {}{} with up to {} concurrent fetches",
            domain,
            start_path,
            self.config.max_concurrent_fetches
        );

        let limit = self.config.max_concurrent_fetches.max(1) as usize;
        let mut state = CrawlState::new(start_path, self.config.frontier_order);
        let mut workers: JoinSet<PageOutcome> = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            while workers.len() < limit {
                let Some((id, path)) = state.next_page() else {
                    break;
                };
                self.dispatch(&mut workers, domain, id, path);
            }

            // Done only once nothing is queued and nothing is in flight
            if workers.is_empty() {
                break;
            }

            let joined = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::warn!(
                        "Crawl cancelled with {} fetches in flight and {} pages queued",
                        workers.len(),
                        state.pending()
                    );
                    workers.abort_all();
                    return Err(SitemapError::Cancelled);
                }
                joined = workers.join_next() => joined,
            };

            let Some(joined) = joined else {
                break;
            };
            let outcome = joined?;

            match outcome.links {
                Ok(links) => {
                    let found = links.len();
                    let mut added = 0;
                    for path in links {
                        if state.discover(outcome.id, path).is_some() {
                            added += 1;
                        }
                    }
                    state.complete(outcome.id);
                    tracing::debug!(
                        "{}: {} in-scope links, {} new pages",
                        outcome.path,
                        found,
                        added
                    );
                }
                Err(error) => {
                    if self.config.fail_fast {
                        workers.abort_all();
                        return Err(SitemapError::Fetch {
                            path: outcome.path,
                            source: error,
                        });
                    }
                    tracing::warn!("Failed to fetch {}: {}", outcome.path, error);
                    state.fail(outcome.id, &error);
                }
            }
        }

        debug_assert!(state
            .sitemap()
            .iter()
            .all(|(id, _)| state.sitemap().node(id).state().is_terminal()));
        tracing::info!("Crawl complete: {} pages discovered", state.discovered());
        Ok(state.into_sitemap())
    }

    /// Spawns a worker that fetches and expands one page
    fn dispatch(&self, workers: &mut JoinSet<PageOutcome>, domain: &str, id: NodeId, path: String) {
        tracing::debug!("Fetching {}", path);
        if let Some(ref callback) = self.progress_callback {
            callback(&path);
        }

        let fetcher = Arc::clone(&self.fetcher);
        let extractor = Arc::clone(&self.extractor);
        let domain = domain.to_string();

        workers.spawn(async move {
            let links = match fetcher.fetch(&domain, &path).await {
                Ok(body) => Ok(expand_page(extractor.as_ref(), &domain, &path, &body)),
                Err(error) => Err(error),
            };
            PageOutcome { id, path, links }
        });
    }
}

/// Extracts a page's links and keeps the in-scope ones as canonical paths,
/// in document order
fn expand_page<E: LinkExtractor + ?Sized>(
    extractor: &E,
    domain: &str,
    path: &str,
    body: &[u8],
) -> Vec<String> {
    extractor
        .extract_links(body)
        .filter_map(|target| match normalize(domain, path, &target) {
            Ok(canonical) => Some(canonical),
            Err(reason) => {
                tracing::trace!("Skipping {:?} on {}: {}", target, path, reason);
                None
            }
        })
        .collect()
}
