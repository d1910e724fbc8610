use std::sync::{Arc, Mutex};

use handmixed::error::ProxyError;
use handmixed::types::Page;
use handmixed::utils::{MAX_PAGES, clamp_limit, generate_session_id, walk_pages};

// Builds a fetcher serving `total` numbered items in pages of `page_size`,
// counting every request it receives.
fn paged_fetcher(
    total: usize,
    page_size: usize,
    calls: Arc<Mutex<usize>>,
) -> impl FnMut(String) -> std::pin::Pin<Box<dyn Future<Output = Result<Page<usize>, ProxyError>>>>
{
    move |url: String| {
        let calls = Arc::clone(&calls);
        Box::pin(async move {
            *calls.lock().unwrap() += 1;
            let offset: usize = url.rsplit('=').next().unwrap().parse().unwrap();
            let end = (offset + page_size).min(total);
            let next = if end < total {
                Some(format!("https://upstream.example/items?offset={}", end))
            } else {
                None
            };
            Ok(Page {
                items: (offset..end).collect(),
                next,
            })
        })
    }
}

#[test]
fn test_generate_session_id() {
    let id = generate_session_id();

    // Should be exactly 64 alphanumeric characters
    assert_eq!(id.len(), 64);
    assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated ids should be different
    assert_ne!(id, generate_session_id());
}

#[test]
fn test_clamp_limit() {
    // Default applies when absent
    assert_eq!(clamp_limit(None, 50, 100), 50);

    // In-range values pass through
    assert_eq!(clamp_limit(Some(25), 50, 100), 25);

    // Values above the cap are clamped, zero is raised to one
    assert_eq!(clamp_limit(Some(500), 50, 100), 100);
    assert_eq!(clamp_limit(Some(0), 50, 100), 1);
}

#[tokio::test]
async fn test_walk_pages_issues_one_request_per_page() {
    // 120 items at page size 50 -> ceil(120/50) = 3 requests
    let calls = Arc::new(Mutex::new(0));
    let fetch = paged_fetcher(120, 50, Arc::clone(&calls));

    let items = walk_pages(
        "https://upstream.example/items?offset=0".to_string(),
        MAX_PAGES,
        fetch,
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 120);
    assert_eq!(*calls.lock().unwrap(), 3);
}

#[tokio::test]
async fn test_walk_pages_single_page_when_next_absent() {
    let calls = Arc::new(Mutex::new(0));
    let fetch = paged_fetcher(10, 50, Arc::clone(&calls));

    let items = walk_pages(
        "https://upstream.example/items?offset=0".to_string(),
        MAX_PAGES,
        fetch,
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 10);
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_walk_pages_terminates_on_repeated_cursor() {
    // Upstream keeps returning the URL just fetched as `next`
    let calls = Arc::new(Mutex::new(0));
    let counting = Arc::clone(&calls);

    let items = walk_pages(
        "https://upstream.example/items?offset=0".to_string(),
        MAX_PAGES,
        move |url: String| {
            let calls = Arc::clone(&counting);
            async move {
                *calls.lock().unwrap() += 1;
                Ok(Page {
                    items: vec![1usize, 2, 3],
                    next: Some(url),
                })
            }
        },
    )
    .await
    .unwrap();

    assert_eq!(items, vec![1, 2, 3]);
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_walk_pages_applies_page_cap() {
    // Endless distinct cursors must stop at the cap
    let calls = Arc::new(Mutex::new(0));
    let counting = Arc::clone(&calls);

    let items = walk_pages(
        "https://upstream.example/items?page=0".to_string(),
        5,
        move |url: String| {
            let calls = Arc::clone(&counting);
            async move {
                let mut lock = calls.lock().unwrap();
                *lock += 1;
                let page = *lock;
                drop(lock);
                Ok(Page {
                    items: vec![page],
                    next: Some(format!("https://upstream.example/items?page={}", page)),
                })
            }
        },
    )
    .await
    .unwrap();

    assert_eq!(items.len(), 5);
    assert_eq!(*calls.lock().unwrap(), 5);
}

#[tokio::test]
async fn test_walk_pages_error_discards_partial_results() {
    // A 401 on the second page aborts the whole walk
    let calls = Arc::new(Mutex::new(0));
    let counting = Arc::clone(&calls);

    let result: Result<Vec<usize>, ProxyError> = walk_pages(
        "https://upstream.example/items?page=0".to_string(),
        MAX_PAGES,
        move |_url: String| {
            let calls = Arc::clone(&counting);
            async move {
                let mut lock = calls.lock().unwrap();
                *lock += 1;
                if *lock > 1 {
                    return Err(ProxyError::SessionExpired);
                }
                Ok(Page {
                    items: vec![1usize],
                    next: Some("https://upstream.example/items?page=1".to_string()),
                })
            }
        },
    )
    .await;

    assert_eq!(result, Err(ProxyError::SessionExpired));
    assert_eq!(*calls.lock().unwrap(), 2);
}
