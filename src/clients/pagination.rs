//! Offset pagination shared by order search and item search.
//!
//! Both APIs take a 1-based start offset and a page size, report the total
//! number of matches on every page, and return the page items somewhere in
//! the tree. [`Paginator`] walks the pages one after another until the total
//! is covered.

use std::future::Future;

use crate::clients::errors::{ClientError, ValidationError};
use crate::tree::Tree;

/// Progress of one pagination run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageState {
    /// 0-based offset of the next page.
    pub start_index: u64,
    /// Items requested per page.
    pub page_size: u64,
    /// Total reported by the last page.
    pub total_count: u64,
    /// Items collected so far.
    pub accumulated: Vec<Tree>,
}

impl PageState {
    /// Starts a run at offset zero.
    #[must_use]
    pub const fn new(page_size: u64) -> Self {
        Self {
            start_index: 0,
            page_size,
            total_count: 0,
            accumulated: Vec::new(),
        }
    }

    /// The 1-based start parameter for the next request.
    #[must_use]
    pub const fn next_start(&self) -> u64 {
        self.start_index.saturating_add(1)
    }

    /// Records a page and reports whether another one is needed.
    ///
    /// The offset saturates at `u64::MAX`; a run stops once it can no longer
    /// advance.
    pub fn advance(&mut self, total_count: u64, items: Vec<Tree>) -> bool {
        self.total_count = total_count;
        if total_count == 0 {
            return false;
        }
        self.accumulated.extend(items);
        let next = self.start_index.saturating_add(self.page_size);
        if next == self.start_index {
            return false;
        }
        self.start_index = next;
        self.start_index < self.total_count && self.start_index < u64::MAX
    }
}

/// Drives a paginated listing.
///
/// `total_count` reads the match total from a page and `page_items` extracts
/// its items, normalizing a single item into a one-element vector.
///
/// # Example
///
/// ```rust
/// use yahoo_shopping_api::clients::Paginator;
/// use yahoo_shopping_api::Tree;
///
/// # tokio_test::block_on(async {
/// let paginator = Paginator::new(
///     10,
///     |page: &Tree| page.get("total").and_then(Tree::as_u64).unwrap_or(0),
///     |page: &Tree| page.get("items").cloned().map(Tree::into_list).unwrap_or_default(),
/// )
/// .unwrap();
///
/// let items = paginator
///     .fetch_all(|start| async move {
///         Ok(Tree::from_pairs([
///             ("total", Tree::leaf("12")),
///             ("items", Tree::leaf(start.to_string())),
///         ]))
///     })
///     .await
///     .unwrap();
///
/// assert_eq!(items, vec![Tree::leaf("1"), Tree::leaf("11")]);
/// # });
/// ```
#[derive(Debug)]
pub struct Paginator<T, I> {
    page_size: u64,
    total_count: T,
    page_items: I,
}

impl<T, I> Paginator<T, I>
where
    T: Fn(&Tree) -> u64,
    I: Fn(&Tree) -> Vec<Tree>,
{
    /// Creates a paginator.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPageSize`] for a page size of zero.
    pub fn new(page_size: u64, total_count: T, page_items: I) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(Self {
            page_size,
            total_count,
            page_items,
        })
    }

    /// Returns the configured page size.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Requests pages until the reported total is covered.
    ///
    /// `fetch` receives the 1-based start offset of each page. Pages are
    /// requested strictly one after another, `ceil(total / page_size)` times
    /// in all. A total of zero stops after the first page.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `fetch`; items gathered before it
    /// are discarded.
    pub async fn fetch_all<F, Fut>(&self, mut fetch: F) -> Result<Vec<Tree>, ClientError>
    where
        F: FnMut(u64) -> Fut,
        Fut: Future<Output = Result<Tree, ClientError>>,
    {
        let mut state = PageState::new(self.page_size);

        loop {
            let start = state.next_start();
            tracing::debug!(start, page_size = self.page_size, "Requesting page");

            let page = fetch(start).await?;
            let total = (self.total_count)(&page);
            let items = (self.page_items)(&page);
            tracing::debug!(start, total, received = items.len(), "Received page");

            if !state.advance(total, items) {
                break;
            }
        }

        Ok(state.accumulated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn total(page: &Tree) -> u64 {
        page.get("total").and_then(Tree::as_u64).unwrap_or(0)
    }

    fn items(page: &Tree) -> Vec<Tree> {
        page.get("items")
            .cloned()
            .map(Tree::into_list)
            .unwrap_or_default()
    }

    fn page(total: u64, start: u64, size: u64) -> Tree {
        let end = (start + size - 1).min(total);
        let items: Vec<Tree> = (start..=end).map(Tree::from).collect();
        Tree::from_pairs([
            ("total", Tree::from(total)),
            ("items", Tree::List(items)),
        ])
    }

    #[tokio::test]
    async fn test_fetch_all_requests_each_page_once() {
        let starts = Arc::new(Mutex::new(Vec::new()));
        let paginator = Paginator::new(10, total, items).unwrap();

        let result = paginator
            .fetch_all(|start| {
                let starts = Arc::clone(&starts);
                async move {
                    starts.lock().unwrap().push(start);
                    Ok(page(25, start, 10))
                }
            })
            .await
            .unwrap();

        assert_eq!(*starts.lock().unwrap(), vec![1, 11, 21]);
        assert_eq!(result.len(), 25);
        assert_eq!(result.first(), Some(&Tree::leaf("1")));
        assert_eq!(result.last(), Some(&Tree::leaf("25")));
    }

    #[tokio::test]
    async fn test_fetch_all_exact_multiple() {
        let calls = Arc::new(Mutex::new(0));
        let paginator = Paginator::new(10, total, items).unwrap();

        let result = paginator
            .fetch_all(|start| {
                let calls = Arc::clone(&calls);
                async move {
                    *calls.lock().unwrap() += 1;
                    Ok(page(20, start, 10))
                }
            })
            .await
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), 2);
        assert_eq!(result.len(), 20);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_on_zero_total() {
        let calls = Arc::new(Mutex::new(0));
        let paginator = Paginator::new(10, total, items).unwrap();

        let result = paginator
            .fetch_all(|_| {
                let calls = Arc::clone(&calls);
                async move {
                    *calls.lock().unwrap() += 1;
                    Ok(Tree::from_pairs([("total", "0")]))
                }
            })
            .await
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), 1);
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_wraps_single_item_pages() {
        let paginator = Paginator::new(1, total, items).unwrap();

        let result = paginator
            .fetch_all(|start| async move {
                Ok(Tree::from_pairs([
                    ("total", Tree::leaf("2")),
                    ("items", Tree::from_pairs([("OrderId", start.to_string())])),
                ]))
            })
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[1].get("OrderId").and_then(Tree::as_str), Some("2"));
    }

    #[tokio::test]
    async fn test_fetch_all_propagates_first_error() {
        let paginator = Paginator::new(10, total, items).unwrap();

        let result = paginator
            .fetch_all(|start| async move {
                if start > 1 {
                    Err(ClientError::EmptyResponse)
                } else {
                    Ok(page(25, start, 10))
                }
            })
            .await;

        assert!(matches!(result, Err(ClientError::EmptyResponse)));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let result = Paginator::new(0, total, items);
        assert!(matches!(result, Err(ValidationError::InvalidPageSize)));
    }

    #[test]
    fn test_page_state_advance() {
        let mut state = PageState::new(10);
        assert_eq!(state.next_start(), 1);
        assert!(state.advance(15, vec![Tree::leaf("a")]));
        assert_eq!(state.next_start(), 11);
        assert!(!state.advance(15, vec![Tree::leaf("b")]));
        assert_eq!(state.accumulated.len(), 2);
    }

    #[test]
    fn test_page_state_saturates_on_huge_totals() {
        let mut state = PageState::new(u64::MAX / 2 + 1);
        assert!(state.advance(u64::MAX, vec![Tree::leaf("a")]));
        assert!(!state.advance(u64::MAX, vec![Tree::leaf("b")]));
        assert_eq!(state.start_index, u64::MAX);
        assert!(!state.advance(u64::MAX, Vec::new()));
        assert_eq!(state.accumulated.len(), 2);
    }
}
