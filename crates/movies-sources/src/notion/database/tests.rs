use super::*;
use crate::notion::document::{PropertyValue, RichText};
use crate::notion::api::QueryResponse;
use chrono::NaiveDate;
use movies_models::{MovieMetadata, Viewing};
use std::cell::{Cell, RefCell};

/// In-memory stand-in for the Notion API
///
/// Serves `per_page` results per query regardless of the requested page size
/// and uses the offset of the next result as its cursor.
struct FakeNotionApi {
    pages: RefCell<Vec<Page>>,
    per_page: usize,
    queries: RefCell<Vec<QueryRequest>>,
    fail_after: Option<usize>,
    drop_cursor: bool,
    created: Cell<usize>,
}

impl FakeNotionApi {
    fn new(per_page: usize) -> Self {
        Self {
            pages: RefCell::new(Vec::new()),
            per_page,
            queries: RefCell::new(Vec::new()),
            fail_after: None,
            drop_cursor: false,
            created: Cell::new(0),
        }
    }

    fn matches(page: &Page, filter: &Option<Filter>) -> bool {
        let Some(filter) = filter else {
            return true;
        };
        match page.properties.get(&filter.property) {
            Some(PropertyValue::Title { title }) => RichText::concat(title) == filter.title.equals,
            _ => false,
        }
    }
}

impl NotionApi for FakeNotionApi {
    fn create_page(&self, request: &CreatePageRequest) -> Result<Page, StoreError> {
        if self.fail_after == Some(self.created.get()) {
            return Err(StoreError::Api {
                status: 429,
                message: "rate_limited: slow down".to_string(),
            });
        }
        self.created.set(self.created.get() + 1);
        let page = Page {
            id: Some(format!("page-{}", self.created.get())),
            properties: request.properties.clone(),
            cover: request.cover.clone(),
        };
        self.pages.borrow_mut().push(page.clone());
        Ok(page)
    }

    fn query_database(&self, database_id: &str, query: &QueryRequest) -> Result<QueryResponse, StoreError> {
        assert_eq!(database_id, "db-test");
        self.queries.borrow_mut().push(query.clone());

        let matching: Vec<Page> = self
            .pages
            .borrow()
            .iter()
            .filter(|page| Self::matches(page, &query.filter))
            .cloned()
            .collect();
        let start: usize = query
            .start_cursor
            .as_deref()
            .map(|c| c.parse().unwrap())
            .unwrap_or(0);
        let end = (start + self.per_page).min(matching.len());
        let has_more = end < matching.len();

        Ok(QueryResponse {
            results: matching[start..end].to_vec(),
            has_more,
            next_cursor: if has_more && !self.drop_cursor {
                Some(end.to_string())
            } else {
                None
            },
        })
    }
}

fn movie(imdb_id: &str, title: &str) -> Movie {
    Movie::from_metadata(MovieMetadata {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        original_title: title.to_string(),
        release_date: NaiveDate::from_ymd_opt(1999, 3, 31),
        duration_in_sec: Some(8160),
        poster: Some(format!("https://example.com/{}.jpg", imdb_id)),
        director: "Lana Wachowski, Lilly Wachowski".to_string(),
        actors: "Keanu Reeves, Laurence Fishburne".to_string(),
        genres: vec!["Action".to_string(), "Sci-Fi".to_string()],
    })
    .unwrap()
}

fn database(per_page: usize) -> NotionDatabase<FakeNotionApi> {
    NotionDatabase::with_api(FakeNotionApi::new(per_page), "db-test")
}

fn five_movies() -> Vec<Movie> {
    vec![
        movie("tt0133093", "The Matrix"),
        movie("tt0234215", "The Matrix Reloaded"),
        movie("tt0242653", "The Matrix Revolutions"),
        movie("tt10838180", "The Matrix Resurrections"),
        movie("tt0106062", "The Matrix Preloaded"),
    ]
}

#[test]
fn test_insert_then_select() {
    let mut db = database(100);
    let matrix = movie("tt0133093", "The Matrix")
        .with_viewing(Viewing {
            rating: Some(9),
            watched: true,
            watched_date: NaiveDate::from_ymd_opt(1999, 6, 23),
            cinema: true,
            comment: String::new(),
        })
        .unwrap();
    db.insert_one(&matrix).unwrap();

    assert_eq!(db.select("tt0133093").unwrap(), Some(matrix));
    let queries = db.api().queries.borrow();
    let query = &queries[0];
    assert_eq!(query.filter, Some(Filter::title_equals("IMDb id", "tt0133093")));
    assert_eq!(query.page_size, Some(PAGE_SIZE));
}

#[test]
fn test_select_unknown_is_none() {
    let mut db = database(100);
    db.insert_one(&movie("tt0133093", "The Matrix")).unwrap();
    assert_eq!(db.select("tt0000001").unwrap(), None);
}

#[test]
fn test_select_ambiguous() {
    let mut db = database(100);
    let matrix = movie("tt0133093", "The Matrix");
    db.insert(&[matrix.clone(), matrix]).unwrap();

    match db.select("tt0133093") {
        Err(StoreError::AmbiguousRecord { imdb_id, count }) => {
            assert_eq!(imdb_id, "tt0133093");
            assert_eq!(count, 2);
        }
        other => panic!("expected AmbiguousRecord, got {:?}", other),
    }
}

#[test]
fn test_fetchall_follows_cursor() {
    let mut db = database(2);
    let movies = five_movies();
    db.insert(&movies).unwrap();

    let fetched = db.fetchall().unwrap();
    assert_eq!(fetched, movies);

    let queries = db.api().queries.borrow();
    let cursors: Vec<Option<&str>> = queries.iter().map(|q| q.start_cursor.as_deref()).collect();
    assert_eq!(cursors, vec![None, Some("2"), Some("4")]);
    assert!(queries.iter().all(|q| q.filter.is_none()));
}

#[test]
fn test_fetchall_empty() {
    let db = database(2);
    assert!(db.fetchall().unwrap().is_empty());
    assert_eq!(db.api().queries.borrow().len(), 1);
}

#[test]
fn test_fetchall_missing_cursor() {
    let mut db = database(2);
    db.insert(&five_movies()).unwrap();
    db.api.drop_cursor = true;

    assert!(matches!(db.fetchall(), Err(StoreError::Schema(_))));
    assert_eq!(db.api().queries.borrow().len(), 1);
}

#[test]
fn test_insert_failure_keeps_earlier_pages() {
    let mut api = FakeNotionApi::new(100);
    api.fail_after = Some(2);
    let mut db = NotionDatabase::with_api(api, "db-test");

    let result = db.insert(&five_movies());
    assert!(matches!(result, Err(StoreError::Api { status: 429, .. })));
    assert_eq!(db.fetchall().unwrap().len(), 2);
}

#[test]
fn test_insert_sends_cover() {
    let mut db = database(100);
    db.insert_one(&movie("tt0133093", "The Matrix")).unwrap();

    let pages = db.api().pages.borrow();
    assert_eq!(pages.len(), 1);
    assert!(pages[0].cover.is_some());
    assert_eq!(db.database_id(), "db-test");
}
