//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Seeding the frontier from the configured start address
//! - Deduplicating URLs through the run's visited set
//! - Coordinating fetching, analysis and link extraction
//! - Applying the depth limit and the domain scope
//! - Recording pages, media files and errors in the run state

use crate::config::Config;
use crate::crawler::fetcher::{FetchResult, Fetcher, HttpFetcher};
use crate::crawler::parser::analyze;
use crate::crawler::scheduler::{CrawlTarget, Scheduler};
use crate::state::{ErrorEntry, PageRecord, PageState, RunState};
use crate::url::{classify, is_followable, normalize, SiteRoot};
use crate::SweepError;
use indicatif::ProgressBar;

/// Main crawler coordinator structure
///
/// The coordinator is the single writer of the [`RunState`]; it is consumed by
/// [`Coordinator::run`], which hands the finished state back.
pub struct Coordinator<F: Fetcher = HttpFetcher> {
    config: Config,
    fetcher: F,
    state: RunState,
    scheduler: Scheduler,
    progress: ProgressBar,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(SweepError)` - The seed URL is invalid or the HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, SweepError> {
        let fetcher = HttpFetcher::new(&config.user_agent, &config.crawler)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetcher> Coordinator<F> {
    /// Creates a coordinator around any fetcher
    pub fn with_fetcher(config: Config, fetcher: F) -> Result<Self, SweepError> {
        let site = SiteRoot::from_seed(&config.crawler.seed_url)?;
        let seed_url = normalize(&config.crawler.seed_url, &site.root_url(), &site);
        tracing::debug!("Seed normalized to {}", seed_url);

        let scheduler = Scheduler::new(CrawlTarget::new(seed_url, 0), config.crawler.delay());

        Ok(Self {
            state: RunState::new(site),
            config,
            fetcher,
            scheduler,
            progress: ProgressBar::hidden(),
        })
    }

    /// Reports progress on the given bar instead of a hidden one
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Runs the main crawl loop until the frontier is exhausted
    ///
    /// This is the core crawling logic that:
    /// 1. Takes the next target from the scheduler
    /// 2. Claims it in the visited set (skipping it if already claimed)
    /// 3. Waits for the inter-request delay
    /// 4. Fetches and records it
    /// 5. Pushes its in-scope links when it is an HTML page above the depth limit
    ///
    /// No failure stops the run; every error is recorded against its URL.
    pub async fn run(mut self) -> RunState {
        tracing::info!(
            "Starting crawl of {} (max depth {})",
            self.state.site().root_url(),
            self.config.crawler.max_depth
        );

        while let Some(target) = self.scheduler.next_target() {
            if !self.state.begin_visit(&target.url) {
                tracing::trace!("Already visited: {}", target.url);
                continue;
            }

            self.scheduler.wait_turn().await;

            let children = self.visit(&target).await;
            self.scheduler.push_children(children);
        }

        self.state.finish();
        self.progress.finish_and_clear();

        tracing::info!(
            "Crawl completed: {} pages recorded, {} errors, {} requests",
            self.state.page_count(),
            self.state.errors().len(),
            self.scheduler.dispatched()
        );

        self.state
    }

    /// Fetches one target, records its outcome and returns the links to follow
    async fn visit(&mut self, target: &CrawlTarget) -> Vec<CrawlTarget> {
        self.progress.set_message(format!(
            "{} [depth {}] {}",
            self.state.page_count(),
            target.depth,
            target.url
        ));
        tracing::debug!("Fetching {} at depth {}", target.url, target.depth);

        let result = self.fetcher.fetch(&target.url).await;
        let is_html = result.is_html();

        match result {
            FetchResult::NetworkError { error } => {
                tracing::warn!("Error loading {}: {}", target.url, error);
                self.state
                    .record_error(ErrorEntry::transport(&target.url, &error));
                Vec::new()
            }

            FetchResult::Response { status_code, .. } if status_code != 200 => {
                tracing::warn!("HTTP {} for {}", status_code, target.url);
                self.state
                    .record_error(ErrorEntry::http(&target.url, status_code));
                Vec::new()
            }

            FetchResult::Response { content_type, .. } if !is_html => {
                let content_type = content_type.unwrap_or_default();
                tracing::debug!("Media file {} ({})", target.url, content_type);
                self.state
                    .record_page(&target.url, PageRecord::Media { content_type });
                Vec::new()
            }

            FetchResult::Response { body, .. } => {
                let analysis = analyze(&body);
                self.state
                    .record_page(&target.url, PageRecord::Html(analysis.meta));

                if target.depth >= self.config.crawler.max_depth {
                    tracing::debug!(
                        "Depth limit reached at {}, {} links not followed",
                        target.url,
                        analysis.hrefs.len()
                    );
                    return Vec::new();
                }

                self.discover_links(target, &analysis.hrefs)
            }
        }
    }

    /// Turns raw hrefs found on `page` into targets one level deeper
    ///
    /// Hrefs are dropped when they use a non-web scheme, leave the site, or point at a
    /// URL already dispatched in this run.
    fn discover_links(&self, page: &CrawlTarget, hrefs: &[String]) -> Vec<CrawlTarget> {
        let site = self.state.site();
        let mut children = Vec::new();

        for href in hrefs {
            if !is_followable(href) {
                tracing::debug!("Skipping non-web link {:?} on {}", href, page.url);
                continue;
            }

            let url = normalize(href, &page.url, site);

            if !classify(&url, &site.domain).should_crawl() {
                tracing::debug!("Skipping external link {}", url);
                continue;
            }

            if self.state.is_visited(&url) {
                continue;
            }

            children.push(page.child(url));
        }

        children
    }
}

/// Runs a complete crawl over HTTP and returns the finished run state
///
/// # Example
///
/// ```no_run
/// use site_sweep::config::Config;
/// use site_sweep::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let state = run_crawl(Config::default()).await?;
/// println!("{} pages", state.page_count());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<RunState, SweepError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}

/// Counts the visited URLs of a finished run by terminal state
pub fn terminal_counts(state: &RunState) -> Vec<(PageState, usize)> {
    PageState::all_states()
        .into_iter()
        .filter(PageState::is_terminal)
        .map(|s| (s, state.visited().count_in_state(s)))
        .collect()
}
