use std::future::Future;

use rand::{Rng, distr::Alphanumeric};

use crate::{error::ProxyError, types::Page};

/// Defensive cap on cursor-pagination walks. Upstream cursors are trusted to
/// terminate, but a buggy or adversarial `next` chain must not block a
/// request forever.
pub const MAX_PAGES: usize = 50;

pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Clamps a client-supplied page limit to `1..=max`.
pub fn clamp_limit(limit: Option<u64>, default: u64, max: u64) -> u64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Follows an upstream `next` cursor chain to exhaustion.
///
/// Calls `fetch` with the current page URL, collects the items of every page,
/// and continues with the returned `next` URL. The walk stops when `next` is
/// absent, when it repeats the URL just fetched, or after `max_pages`
/// requests. Any fetch error aborts the walk; items from earlier pages are
/// discarded, not returned.
pub async fn walk_pages<T, F, Fut>(
    first_url: String,
    max_pages: usize,
    mut fetch: F,
) -> Result<Vec<T>, ProxyError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, ProxyError>>,
{
    let mut items = Vec::new();
    let mut next = Some(first_url);
    let mut pages = 0usize;

    while let Some(url) = next {
        if pages >= max_pages {
            break;
        }
        pages += 1;

        let page = fetch(url.clone()).await?;
        items.extend(page.items);

        next = match page.next {
            // A cursor pointing back at the page just fetched would loop.
            Some(n) if n == url => None,
            other => other,
        };
    }

    Ok(items)
}
