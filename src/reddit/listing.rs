//! Cursor-paginated aggregation over subreddit hot listings.
//!
//! The operations here are generic over [`ListingSource`] so they run
//! identically against the live client and scripted fakes in tests. The
//! pagination engine is one explicit loop: the cursor returned with page N
//! is forwarded verbatim to fetch page N+1, and an absent cursor is the
//! only signal that the listing is exhausted.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::error::ApiError;
use crate::models::ListingPage;

/// Hard ceiling the listing endpoint places on a single page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination state for one aggregation run.
///
/// A fresh cursor is built inside every call; it is never shared across
/// invocations.
#[derive(Debug, Clone, Default)]
pub struct PageCursor {
    /// Continuation token from the previous page, absent on the first fetch.
    pub after: Option<String>,
    /// Posts seen so far, forwarded to the API as its `count` parameter.
    pub seen: u64,
    /// Requests issued so far.
    pub requests: u32,
}

/// A source of hot-listing pages.
///
/// Implemented over real HTTP by [`RedditClient`](crate::reddit::RedditClient)
/// and by scripted fakes in tests.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one page of hot posts.
    ///
    /// `cursor.after` must be used verbatim; the returned page carries
    /// `after == None` exactly when the listing is exhausted.
    async fn hot_page(
        &self,
        subreddit: &str,
        cursor: &PageCursor,
        limit: u32,
    ) -> Result<ListingPage, ApiError>;

    /// Largest page this source serves per request.
    fn page_size(&self) -> u32 {
        MAX_PAGE_SIZE
    }
}

/// Walk every page of a subreddit's hot listing, calling `visit` with each
/// post title in API order. Returns the final cursor state.
///
/// Any error aborts the walk immediately; nothing visited before the error
/// is surfaced to the caller.
async fn walk_hot<S, F>(source: &S, subreddit: &str, mut visit: F) -> Result<PageCursor, ApiError>
where
    S: ListingSource,
    F: FnMut(&str),
{
    let limit = source.page_size().min(MAX_PAGE_SIZE);
    let mut cursor = PageCursor::default();

    loop {
        let page = source.hot_page(subreddit, &cursor, limit).await?;
        debug!(
            "Page {} of r/{}: {} posts",
            cursor.requests + 1,
            subreddit,
            page.posts.len()
        );

        for post in &page.posts {
            visit(&post.title);
        }

        cursor.requests += 1;
        cursor.seen += page.posts.len() as u64;
        cursor.after = page.after;

        if cursor.after.is_none() {
            return Ok(cursor);
        }
    }
}

/// Collect every hot post title of `subreddit` across all pages, in the
/// order the API returns them.
///
/// An existing subreddit with no posts yields `Ok` with an empty vector;
/// a subreddit that does not exist yields [`ApiError::NotFound`]. The two
/// outcomes are never conflated.
pub async fn collect_titles<S>(source: &S, subreddit: &str) -> Result<Vec<String>, ApiError>
where
    S: ListingSource,
{
    let mut titles = Vec::new();
    let cursor = walk_hot(source, subreddit, |title| {
        titles.push(title.to_string());
    })
    .await?;

    debug!(
        "Collected {} titles from r/{} in {} requests",
        titles.len(),
        subreddit,
        cursor.requests
    );
    Ok(titles)
}

/// Count how often each of `words` occurs as a whitespace-delimited token
/// across every hot post title of `subreddit`.
///
/// Matching is case-insensitive and exact: the title `"going gone go"`
/// contains the target `go` once. Duplicates and case variants in `words`
/// collapse into a single lowercased target, and targets that never match
/// are omitted from the result entirely.
///
/// The result is sorted by descending count; ties break by ascending
/// lexicographic order of the word.
pub async fn count_words<S>(
    source: &S,
    subreddit: &str,
    words: &[String],
) -> Result<Vec<(String, u64)>, ApiError>
where
    S: ListingSource,
{
    let targets: HashSet<String> = words.iter().map(|word| word.to_lowercase()).collect();
    let mut counts: HashMap<String, u64> = HashMap::new();

    walk_hot(source, subreddit, |title| {
        for token in title.split_whitespace() {
            let token = token.to_lowercase();
            if targets.contains(&token) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
    })
    .await?;

    let mut tally: Vec<(String, u64)> = counts.into_iter().collect();
    tally.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(tally)
}

/// Return the first `limit` hot post titles of `subreddit`.
///
/// Issues exactly one listing fetch and never paginates. `limit` is
/// clamped to the 1..=100 range the listing endpoint accepts, so a
/// zero slipping in from a config file still yields one title.
pub async fn top_titles<S>(source: &S, subreddit: &str, limit: u32) -> Result<Vec<String>, ApiError>
where
    S: ListingSource,
{
    let limit = limit.clamp(1, MAX_PAGE_SIZE);
    let cursor = PageCursor::default();
    let page = source.hot_page(subreddit, &cursor, limit).await?;

    Ok(page
        .posts
        .into_iter()
        .take(limit as usize)
        .map(|post| post.title)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Post;
    use std::sync::Mutex;
    use tokio_test::assert_ok;

    /// What the fake returns for one request, consumed in order.
    enum PageScript {
        Page(ListingPage),
        NotFound,
        Fail,
    }

    struct ScriptedSource {
        script: Mutex<Vec<PageScript>>,
        calls: Mutex<Vec<(Option<String>, u32)>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<PageScript>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// The (after, limit) pairs received, in request order.
        fn calls(&self) -> Vec<(Option<String>, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ListingSource for ScriptedSource {
        async fn hot_page(
            &self,
            subreddit: &str,
            cursor: &PageCursor,
            limit: u32,
        ) -> Result<ListingPage, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push((cursor.after.clone(), limit));

            let mut script = self.script.lock().unwrap();
            assert!(!script.is_empty(), "fetched more pages than scripted");

            match script.remove(0) {
                PageScript::Page(page) => Ok(page),
                PageScript::NotFound => Err(ApiError::NotFound(format!("r/{}", subreddit))),
                PageScript::Fail => Err(ApiError::Malformed("scripted failure".to_string())),
            }
        }
    }

    fn page(titles: &[&str], after: Option<&str>) -> PageScript {
        PageScript::Page(ListingPage {
            posts: titles
                .iter()
                .map(|title| Post {
                    title: title.to_string(),
                })
                .collect(),
            after: after.map(String::from),
        })
    }

    fn words(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| word.to_string()).collect()
    }

    fn three_page_source() -> ScriptedSource {
        ScriptedSource::new(vec![
            page(&["first post", "second post"], Some("a")),
            page(&["third post"], Some("b")),
            page(&["fourth post"], None),
        ])
    }

    #[tokio::test]
    async fn test_empty_subreddit_is_ok_not_an_error() {
        let source = ScriptedSource::new(vec![page(&[], None)]);
        let titles = assert_ok!(collect_titles(&source, "newborn").await);
        assert!(titles.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_subreddit_is_not_found() {
        let source = ScriptedSource::new(vec![PageScript::NotFound]);
        let err = collect_titles(&source, "definitely_not_real").await.unwrap_err();
        assert!(err.is_not_found());

        let source = ScriptedSource::new(vec![PageScript::NotFound]);
        let err = count_words(&source, "definitely_not_real", &words(&["rust"]))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_cursors_are_followed_verbatim() {
        let source = three_page_source();
        let titles = assert_ok!(collect_titles(&source, "rust").await);

        assert_eq!(
            titles,
            vec!["first post", "second post", "third post", "fourth post"]
        );

        let calls = source.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].0, None);
        assert_eq!(calls[1].0, Some("a".to_string()));
        assert_eq!(calls[2].0, Some("b".to_string()));
        assert!(calls.iter().all(|(_, limit)| *limit == MAX_PAGE_SIZE));
    }

    #[tokio::test]
    async fn test_repeated_runs_give_identical_output() {
        let first = collect_titles(&three_page_source(), "rust").await.unwrap();
        let second = collect_titles(&three_page_source(), "rust").await.unwrap();
        assert_eq!(first, second);

        let targets = words(&["post", "third"]);
        let first = count_words(&three_page_source(), "rust", &targets)
            .await
            .unwrap();
        let second = count_words(&three_page_source(), "rust", &targets)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_count_sums_across_pages() {
        let source = ScriptedSource::new(vec![
            page(&["rust is fast", "why rust"], Some("t3_x")),
            page(&["rust again"], None),
        ]);
        let tally = count_words(&source, "rust", &words(&["rust"])).await.unwrap();
        assert_eq!(tally, vec![("rust".to_string(), 3)]);
    }

    #[tokio::test]
    async fn test_case_variants_collapse_to_one_target() {
        // "go" twice in the first title, once in the second.
        let source = ScriptedSource::new(vec![page(
            &["go stop Go", "ready set go"],
            None,
        )]);
        let tally = count_words(&source, "golang", &words(&["Go", "go", "GO"]))
            .await
            .unwrap();

        // Three spellings of the same target, one entry, no double counting.
        assert_eq!(tally, vec![("go".to_string(), 3)]);
    }

    #[tokio::test]
    async fn test_matching_is_exact_tokens_not_substrings() {
        let source = ScriptedSource::new(vec![page(&["going gone go"], None)]);
        let tally = count_words(&source, "rust", &words(&["go"])).await.unwrap();
        assert_eq!(tally, vec![("go".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_zero_match_targets_are_omitted() {
        let source = ScriptedSource::new(vec![page(&["rust rust"], None)]);
        let tally = count_words(&source, "rust", &words(&["rust", "cobol"]))
            .await
            .unwrap();
        assert_eq!(tally, vec![("rust".to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_all_targets_absent_yields_empty_ok() {
        let source = ScriptedSource::new(vec![page(&["nothing relevant here"], None)]);
        let tally = count_words(&source, "rust", &words(&["cobol"])).await.unwrap();
        assert!(tally.is_empty());
    }

    #[tokio::test]
    async fn test_ordering_descending_count_then_ascending_word() {
        let source = ScriptedSource::new(vec![
            page(&["ant ant ant cat", "dog ant"], Some("a")),
            page(&["cat dog ant"], None),
        ]);
        let tally = count_words(&source, "zoo", &words(&["dog", "cat", "ant"]))
            .await
            .unwrap();

        assert_eq!(
            tally,
            vec![
                ("ant".to_string(), 5),
                ("cat".to_string(), 2),
                ("dog".to_string(), 2),
            ]
        );
    }

    #[tokio::test]
    async fn test_mid_pagination_failure_aborts_whole_run() {
        let source = ScriptedSource::new(vec![
            page(&["salvaged nothing"], Some("a")),
            PageScript::Fail,
        ]);
        let err = collect_titles(&source, "rust").await.unwrap_err();

        assert!(!err.is_not_found());
        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_top_titles_issues_exactly_one_fetch() {
        // The scripted page advertises a next cursor; top must not follow it.
        let source = ScriptedSource::new(vec![page(
            &["one", "two", "three", "four", "five"],
            Some("a"),
        )]);
        let titles = top_titles(&source, "rust", 3).await.unwrap();

        assert_eq!(titles, vec!["one", "two", "three"]);
        assert_eq!(source.calls(), vec![(None, 3)]);
    }

    #[tokio::test]
    async fn test_top_titles_limit_clamped_to_page_ceiling() {
        let source = ScriptedSource::new(vec![page(&["one"], None)]);
        let titles = top_titles(&source, "rust", 500).await.unwrap();

        assert_eq!(titles, vec!["one"]);
        assert_eq!(source.calls(), vec![(None, MAX_PAGE_SIZE)]);
    }

    #[tokio::test]
    async fn test_top_titles_zero_limit_is_raised_to_one() {
        // A zero can only arrive via `top_limit = 0` in a config file;
        // it must not turn into a silent empty listing.
        let source = ScriptedSource::new(vec![page(&["one", "two"], None)]);
        let titles = top_titles(&source, "rust", 0).await.unwrap();

        assert_eq!(titles, vec!["one"]);
        assert_eq!(source.calls(), vec![(None, 1)]);
    }
}
