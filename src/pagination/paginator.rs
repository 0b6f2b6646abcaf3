//! Cursor-following paginator.
//!
//! The [`Paginator`] drives an injected fetch function, follows the
//! server's `next` links and yields each page as it arrives.

use std::future::Future;

use futures::stream::{self, Stream};

use crate::pagination::page::{NextPageParams, Page};

/// Page size used when none is given.
pub const DEFAULT_LIMIT: u32 = 1000;

/// A source of pages addressed by offset and limit.
///
/// Any `FnMut(u64, u32) -> impl Future<Output = Result<Page<T>, E>>`
/// implements this trait, so most callers pass a closure. Implement it
/// directly when the fetcher needs a named type.
pub trait FetchPage {
    /// Record type carried in [`Page::items`].
    type Item;
    /// Error returned by a failed fetch.
    type Error;
    /// Future resolving to one page.
    type Future: Future<Output = Result<Page<Self::Item>, Self::Error>>;

    /// Requests the page starting at `offset` holding at most `limit` items.
    fn fetch_page(&mut self, offset: u64, limit: u32) -> Self::Future;
}

impl<F, Fut, T, E> FetchPage for F
where
    F: FnMut(u64, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    type Item = T;
    type Error = E;
    type Future = Fut;

    fn fetch_page(&mut self, offset: u64, limit: u32) -> Fut {
        self(offset, limit)
    }
}

/// Position of the next fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PaginationCursor {
    offset: u64,
    limit: u32,
    done: bool,
}

impl PaginationCursor {
    const fn new(limit: u32) -> Self {
        Self {
            offset: 0,
            limit,
            done: false,
        }
    }

    /// Moves to the position named by the page's `next` link, or marks the
    /// cursor done when there is none.
    fn advance<T>(&mut self, page: &Page<T>) {
        match page.next_link() {
            Some(link) => {
                let params = NextPageParams::parse(&link.href);
                self.offset = params.offset.unwrap_or(0);
                self.limit = params.limit.unwrap_or(self.limit);
            }
            None => self.done = true,
        }
    }
}

/// Follows `next` links across pages produced by an injected fetch function.
///
/// The paginator starts at offset 0 with the configured limit (default
/// [`DEFAULT_LIMIT`]). After each page it reads the `next` link's `offset`
/// and `limit` query parameters: a missing or non-numeric `offset` becomes
/// 0, a missing or invalid `limit` keeps the previous limit. A page without
/// a `next` link ends pagination; `has_more`, `count` and `total_results`
/// are not consulted.
///
/// Fetches are strictly sequential and only happen while the caller polls.
/// A paginator supports exactly one traversal: once it is done, or once a
/// fetch has failed, it never fetches again.
///
/// # Example
///
/// ```rust
/// use futures::TryStreamExt;
/// use netsuite_api::{NavigationLink, Page, Paginator};
///
/// # tokio_test::block_on(async {
/// let mut paginator = Paginator::new(|offset: u64, limit: u32| async move {
///     let links = if offset == 0 {
///         vec![NavigationLink::next(format!("https://example.com/suiteql?offset={limit}&limit={limit}"))]
///     } else {
///         vec![]
///     };
///     Ok::<_, std::io::Error>(Page::new(vec![offset], links))
/// })
/// .with_limit(50);
///
/// let pages: Vec<Page<u64>> = paginator.run().try_collect().await.unwrap();
/// assert_eq!(pages.len(), 2);
/// assert_eq!(pages[1].items, vec![50]);
/// # });
/// ```
#[derive(Debug)]
pub struct Paginator<F> {
    fetcher: F,
    cursor: PaginationCursor,
    aborted: bool,
}

impl<F> Paginator<F> {
    /// Creates a paginator around a fetch closure.
    pub fn new<Fut, T, E>(fetch: F) -> Self
    where
        F: FnMut(u64, u32) -> Fut,
        Fut: Future<Output = Result<Page<T>, E>>,
    {
        Self::with_fetcher(fetch)
    }

    /// Creates a paginator around any [`FetchPage`] implementation.
    pub const fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            cursor: PaginationCursor::new(DEFAULT_LIMIT),
            aborted: false,
        }
    }

    /// Sets the initial page size. A zero limit is ignored.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        if limit > 0 {
            self.cursor.limit = limit;
        }
        self
    }

    /// Returns `true` once no further fetch will be issued.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.cursor.done || self.aborted
    }
}

impl<F: FetchPage> Paginator<F> {
    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` without fetching when the paginator is done.
    ///
    /// # Errors
    ///
    /// Returns the fetch function's error unchanged. The paginator is then
    /// permanently done and the cursor is left as it was.
    pub async fn fetch_next(&mut self) -> Result<Option<Page<F::Item>>, F::Error> {
        if self.is_done() {
            return Ok(None);
        }

        let PaginationCursor { offset, limit, .. } = self.cursor;
        tracing::debug!(offset, limit, "Fetching page");

        match self.fetcher.fetch_page(offset, limit).await {
            Ok(page) => {
                self.cursor.advance(&page);
                tracing::debug!(
                    items = page.items.len(),
                    done = self.cursor.done,
                    "Fetched page"
                );
                Ok(Some(page))
            }
            Err(error) => {
                self.aborted = true;
                Err(error)
            }
        }
    }

    /// Returns a stream of pages, fetching one page per poll.
    ///
    /// The stream ends after the page without a `next` link, or right after
    /// yielding a fetch error. Calling `run` again on a finished paginator
    /// yields an empty stream.
    pub fn run(&mut self) -> impl Stream<Item = Result<Page<F::Item>, F::Error>> + '_ {
        stream::try_unfold(self, |paginator| async move {
            let page = paginator.fetch_next().await?;
            Ok(page.map(|page| (page, paginator)))
        })
    }

    /// Consumes the paginator, returning the same stream as [`run`](Self::run).
    pub fn into_stream(self) -> impl Stream<Item = Result<Page<F::Item>, F::Error>> {
        stream::try_unfold(self, |mut paginator| async move {
            let page = paginator.fetch_next().await?;
            Ok(page.map(|page| (page, paginator)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::page::NavigationLink;
    use futures::{StreamExt, TryStreamExt};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, PartialEq, Eq)]
    struct FetchFailed(u32);

    type Calls = Arc<Mutex<Vec<(u64, u32)>>>;

    /// Builds a fetch closure that replays `responses` in order and records
    /// every `(offset, limit)` it is called with.
    fn scripted(
        responses: Vec<Result<Page<u32>, FetchFailed>>,
    ) -> (
        impl FnMut(u64, u32) -> std::future::Ready<Result<Page<u32>, FetchFailed>>,
        Calls,
    ) {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&calls);
        let mut responses = VecDeque::from(responses);

        let fetch = move |offset: u64, limit: u32| {
            recorded.lock().unwrap().push((offset, limit));
            std::future::ready(
                responses
                    .pop_front()
                    .unwrap_or_else(|| panic!("unexpected fetch({offset}, {limit})")),
            )
        };
        (fetch, calls)
    }

    fn page(items: Vec<u32>, next: Option<&str>) -> Page<u32> {
        Page::new(items, next.map(NavigationLink::next).into_iter().collect())
    }

    #[tokio::test]
    async fn test_two_pages_follow_next_link() {
        let (fetch, calls) = scripted(vec![
            Ok(page(
                vec![1, 2],
                Some("https://3609571.suitetalk.api.netsuite.com/services/rest/query/v1/suiteql?offset=1000&limit=1000"),
            )),
            Ok(page(vec![3, 4], None)),
        ]);

        let mut paginator = Paginator::new(fetch).with_limit(1000);
        let pages: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();

        assert_eq!(pages.len(), 2);
        let items: Vec<u32> = pages.into_iter().flat_map(|p| p.items).collect();
        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(*calls.lock().unwrap(), vec![(0, 1000), (1000, 1000)]);
        assert!(paginator.is_done());
    }

    #[tokio::test]
    async fn test_single_page_without_links() {
        let (fetch, calls) = scripted(vec![Ok(page(vec![3, 4], None))]);

        let mut paginator = Paginator::new(fetch);
        let pages: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(*calls.lock().unwrap(), vec![(0, DEFAULT_LIMIT)]);
    }

    #[tokio::test]
    async fn test_next_link_without_query_falls_back() {
        let (fetch, calls) = scripted(vec![
            Ok(page(vec![1], Some("https://example.com/services/rest/query/v1/suiteql"))),
            Ok(page(vec![2], None)),
        ]);

        let mut paginator = Paginator::new(fetch).with_limit(25);
        let pages: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(*calls.lock().unwrap(), vec![(0, 25), (0, 25)]);
    }

    #[tokio::test]
    async fn test_missing_limit_is_sticky_and_missing_offset_resets() {
        let (fetch, calls) = scripted(vec![
            Ok(page(vec![1], Some("https://example.com/x?offset=10&limit=5"))),
            Ok(page(vec![2], Some("https://example.com/x?offset=15"))),
            Ok(page(vec![3], Some("https://example.com/x?limit=7"))),
            Ok(page(vec![4], None)),
        ]);

        let mut paginator = Paginator::new(fetch).with_limit(10);
        let pages: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();

        assert_eq!(pages.len(), 4);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![(0, 10), (10, 5), (15, 5), (0, 7)]
        );
    }

    #[tokio::test]
    async fn test_malformed_next_link_values_fall_back() {
        let (fetch, calls) = scripted(vec![
            Ok(page(vec![1], Some("https://example.com/x?offset=abc&limit=zero"))),
            Ok(page(vec![2], None)),
        ]);

        let mut paginator = Paginator::new(fetch).with_limit(100);
        let pages: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(*calls.lock().unwrap(), vec![(0, 100), (0, 100)]);
    }

    #[tokio::test]
    async fn test_zero_item_page_with_next_link_is_yielded() {
        let (fetch, _calls) = scripted(vec![
            Ok(page(vec![], Some("https://example.com/x?offset=10&limit=10"))),
            Ok(page(vec![9], None)),
        ]);

        let mut paginator = Paginator::new(fetch);
        let pages: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages[0].items.is_empty());
        assert_eq!(pages[1].items, vec![9]);
    }

    #[tokio::test]
    async fn test_has_more_is_not_consulted() {
        let mut first = page(vec![1], None);
        first.has_more = true;
        first.total_results = 500;
        let mut second = page(vec![2], Some("https://example.com/x?offset=1&limit=1"));
        second.has_more = false;
        let (fetch, calls) = scripted(vec![Ok(first)]);

        let mut paginator = Paginator::new(fetch);
        let pages: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(calls.lock().unwrap().len(), 1);

        let (fetch, calls) = scripted(vec![Ok(second), Ok(page(vec![3], None))]);
        let mut paginator = Paginator::new(fetch);
        let pages: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failure_on_second_fetch_propagates() {
        let (fetch, calls) = scripted(vec![
            Ok(page(vec![1], Some("https://example.com/x?offset=1000&limit=1000"))),
            Err(FetchFailed(2)),
        ]);

        let mut paginator = Paginator::new(fetch);
        {
            let stream = paginator.run();
            futures::pin_mut!(stream);

            let first = stream.next().await.unwrap().unwrap();
            assert_eq!(first.items, vec![1]);
            assert_eq!(stream.next().await, Some(Err(FetchFailed(2))));
            assert!(stream.next().await.is_none());
        }

        assert_eq!(calls.lock().unwrap().len(), 2);
        assert!(paginator.is_done());
    }

    #[tokio::test]
    async fn test_failed_paginator_never_fetches_again() {
        let (fetch, calls) = scripted(vec![Err(FetchFailed(1))]);

        let mut paginator = Paginator::new(fetch);
        let result: Result<Vec<Page<u32>>, FetchFailed> = paginator.run().try_collect().await;
        assert_eq!(result.unwrap_err(), FetchFailed(1));

        let again: Vec<Result<Page<u32>, FetchFailed>> = paginator.run().collect().await;
        assert!(again.is_empty());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_run_is_not_restartable() {
        let (fetch, calls) = scripted(vec![Ok(page(vec![1], None))]);

        let mut paginator = Paginator::new(fetch);
        let first: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();
        let second: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_abandoned_stream_issues_no_further_fetches() {
        let (fetch, calls) = scripted(vec![
            Ok(page(vec![1], Some("https://example.com/x?offset=1&limit=1"))),
            Ok(page(vec![2], None)),
        ]);

        let mut paginator = Paginator::new(fetch);
        let taken: Vec<Page<u32>> = paginator.run().take(1).try_collect().await.unwrap();

        assert_eq!(taken.len(), 1);
        assert_eq!(*calls.lock().unwrap(), vec![(0, DEFAULT_LIMIT)]);
        assert!(!paginator.is_done());
    }

    #[tokio::test]
    async fn test_fetch_next_state_machine() {
        let (fetch, calls) = scripted(vec![
            Ok(page(vec![1], Some("?offset=2&limit=2"))),
            Ok(page(vec![2], None)),
        ]);

        let mut paginator = Paginator::new(fetch).with_limit(2);
        assert!(!paginator.is_done());

        let first = paginator.fetch_next().await.unwrap().unwrap();
        assert_eq!(first.items, vec![1]);
        assert!(!paginator.is_done());

        let second = paginator.fetch_next().await.unwrap().unwrap();
        assert_eq!(second.items, vec![2]);
        assert!(paginator.is_done());

        assert!(paginator.fetch_next().await.unwrap().is_none());
        assert_eq!(*calls.lock().unwrap(), vec![(0, 2), (2, 2)]);
    }

    #[tokio::test]
    async fn test_into_stream_owns_paginator() {
        let (fetch, calls) = scripted(vec![
            Ok(page(vec![1], Some("https://example.com/x?offset=3&limit=3"))),
            Ok(page(vec![2], None)),
        ]);

        let stream = Paginator::new(fetch).with_limit(3).into_stream();
        let pages: Vec<Page<u32>> = stream.try_collect().await.unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(*calls.lock().unwrap(), vec![(0, 3), (3, 3)]);
    }

    #[test]
    fn test_zero_limit_is_ignored() {
        let (fetch, _calls) = scripted(vec![]);
        let paginator = Paginator::new(fetch).with_limit(0);
        assert_eq!(paginator.cursor.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_cursor_advance() {
        let mut cursor = PaginationCursor::new(50);

        cursor.advance(&page(vec![], Some("https://example.com/x?offset=50&limit=50")));
        assert_eq!(cursor, PaginationCursor { offset: 50, limit: 50, done: false });

        cursor.advance(&page(vec![], None));
        assert!(cursor.done);
        assert_eq!(cursor.offset, 50);
    }

    struct CountingFetcher {
        calls: u32,
    }

    impl FetchPage for CountingFetcher {
        type Item = u32;
        type Error = FetchFailed;
        type Future = std::future::Ready<Result<Page<u32>, FetchFailed>>;

        fn fetch_page(&mut self, offset: u64, limit: u32) -> Self::Future {
            self.calls += 1;
            let next = (self.calls < 3).then(|| format!("?offset={}&limit={limit}", offset + 1));
            std::future::ready(Ok(page(vec![self.calls], next.as_deref())))
        }
    }

    #[tokio::test]
    async fn test_with_fetcher_accepts_trait_implementations() {
        let mut paginator = Paginator::with_fetcher(CountingFetcher { calls: 0 }).with_limit(1);
        let pages: Vec<Page<u32>> = paginator.run().try_collect().await.unwrap();

        assert_eq!(pages.iter().map(|p| p.items[0]).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
