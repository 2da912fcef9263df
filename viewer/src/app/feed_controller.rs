//! Paginated feed controller
//!
//! Owns the query, cursor and fetch state of one feed session and decides,
//! for each trigger, whether a page fetch should be issued.
//!
//! The session lock is never held across the network call. `is_loading` is
//! set before the call starts, so a second trigger that arrives while a page
//! is in flight sees the guard and is dropped (not queued).
//!
//! Every `reset_query` bumps a generation counter. A response that belongs to
//! an older generation is discarded on arrival instead of overwriting the
//! state of the new query. The running fetch keeps `is_loading` across a
//! reset, so at most one call is outstanding per controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::entities::{Cursor, FeedFilter, FeedQuery, FetchState, Post};
use crate::domain::ports::{decode_result, RemoteFeedApi};
use crate::error::FeedError;

/// What a call to `request_next_page` did
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// A non-empty page; the caller appends it
    Page(Vec<Post>),
    /// The feed has no more posts for the current query
    Exhausted,
    /// Another page fetch was already running; nothing was requested
    InFlight,
    /// The response arrived after a query reset and was discarded
    Stale,
}

#[derive(Debug, Default)]
struct Session {
    query: FeedQuery,
    cursor: Cursor,
    fetch: FetchState,
    generation: u64,
}

pub struct FeedController<A: RemoteFeedApi + ?Sized> {
    api: Arc<A>,
    page_size: u32,
    session: Mutex<Session>,
}

impl<A: RemoteFeedApi + ?Sized> FeedController<A> {
    pub fn new(api: Arc<A>, page_size: u32) -> Self {
        Self {
            api,
            page_size,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn query(&self) -> FeedQuery {
        self.lock().query.clone()
    }

    pub fn cursor(&self) -> Cursor {
        self.lock().cursor.clone()
    }

    pub fn fetch_state(&self) -> FetchState {
        self.lock().fetch
    }

    /// Switch to a new filter/tag. Clears the cursor and re-enables fetching;
    /// does not fetch by itself. A fetch still in flight keeps the loading
    /// flag until it settles, and its answer is discarded.
    pub fn reset_query(&self, filter: FeedFilter, tag: Option<&str>) {
        let mut session = self.lock();
        session.query = FeedQuery::new(filter, tag);
        session.cursor = Cursor::default();
        session.fetch.has_more = true;
        session.generation += 1;

        tracing::debug!(
            filter = %session.query.filter,
            tag = session.query.tag.as_deref().unwrap_or(""),
            generation = session.generation,
            "Feed query reset"
        );
    }

    /// Fetch the page after the current cursor
    pub async fn request_next_page(&self) -> Result<PageOutcome, FeedError> {
        let (request, generation, flight) = {
            let mut session = self.lock();
            if session.fetch.is_loading {
                tracing::debug!("Page fetch already in flight, ignoring trigger");
                return Ok(PageOutcome::InFlight);
            }
            if !session.fetch.has_more {
                return Ok(PageOutcome::Exhausted);
            }

            session.fetch.is_loading = true;
            let request = session.query.page_request(&session.cursor, self.page_size);
            let flight = LoadingGuard {
                session: &self.session,
            };
            (request, session.generation, flight)
        };

        tracing::debug!(method = %request.method, generation, "Fetching feed page");

        let result = match self.api.call(&request.method, request.params).await {
            Ok(value) => decode_result::<Vec<Post>>(&request.method, value),
            Err(e) => Err(e),
        };

        let outcome = {
            let mut session = self.lock();
            if session.generation != generation {
                tracing::debug!(
                    generation,
                    current = session.generation,
                    "Discarding page for a previous query"
                );
                Ok(PageOutcome::Stale)
            } else {
                match result {
                    Ok(posts) if posts.is_empty() => {
                        session.fetch.has_more = false;
                        tracing::debug!("Feed exhausted");
                        Ok(PageOutcome::Exhausted)
                    }
                    Ok(posts) => {
                        if let Some(last) = posts.last() {
                            session.cursor = Cursor::after(last);
                        }
                        Ok(PageOutcome::Page(posts))
                    }
                    Err(e) => {
                        tracing::error!("Error fetching posts: {}", e);
                        Err(FeedError::from(e))
                    }
                }
            }
        };

        drop(flight);
        outcome
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        lock_session(&self.session)
    }
}

fn lock_session(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Releases `is_loading` when the fetch settles, including when the fetch
/// future is dropped mid-flight. Only one guard exists at a time, whatever
/// generation it was issued under.
struct LoadingGuard<'a> {
    session: &'a Mutex<Session>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock_session(self.session).fetch.is_loading = false;
    }
}
