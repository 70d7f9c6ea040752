use super::*;
use chrono::NaiveDate;
use serde_json::{json, Value};

fn page(data: Value) -> String {
    let next_data = json!({
        "props": {"pageProps": {"aboveTheFoldData": data}},
        "page": "/title/[tconst]",
        "buildId": "abc"
    });
    format!(
        "<!DOCTYPE html><html><head><title>IMDb</title></head><body>\
         <div id=\"__next\"></div>\
         <script id=\"__NEXT_DATA__\" type=\"application/json\">{}</script>\
         </body></html>",
        next_data
    )
}

fn names(list: &[&str]) -> Value {
    Value::Array(
        list.iter()
            .map(|n| json!({"name": {"id": "nm0000000", "nameText": {"text": n}}}))
            .collect(),
    )
}

fn full_data() -> Value {
    json!({
        "id": "tt0111161",
        "titleText": {"text": "The Shawshank Redemption"},
        "originalTitleText": {"text": "The Shawshank Redemption"},
        "runtime": {"seconds": 8520},
        "primaryImage": {"url": "https://m.media-amazon.com/images/M/shawshank.jpg", "width": 1200},
        "releaseDate": {"year": 1994, "month": 10, "day": 14},
        "genres": {"genres": [{"text": "Drama", "id": "Drama"}]},
        "principalCredits": [
            {"category": {"text": "Director", "id": "director"}, "credits": names(&["Frank Darabont"])},
            {"category": {"text": "Writers", "id": "writer"}, "credits": names(&["Stephen King", "Frank Darabont"])},
            {"category": {"text": "Stars", "id": "cast"}, "credits": names(&["Tim Robbins", "Morgan Freeman", "Bob Gunton"])}
        ]
    })
}

#[test]
fn test_parse_full_page() {
    let movie = parse_title_page("tt0111161", &page(full_data())).unwrap();
    let metadata = movie.metadata();

    assert_eq!(metadata.imdb_id, "tt0111161");
    assert_eq!(metadata.title, "The Shawshank Redemption");
    assert_eq!(metadata.original_title, "The Shawshank Redemption");
    assert_eq!(metadata.release_date, NaiveDate::from_ymd_opt(1994, 10, 14));
    assert_eq!(metadata.duration_in_sec, Some(8520));
    assert_eq!(metadata.poster.as_deref(), Some("https://m.media-amazon.com/images/M/shawshank.jpg"));
    assert_eq!(metadata.director, "Frank Darabont");
    assert_eq!(metadata.actors, "Tim Robbins, Morgan Freeman, Bob Gunton");
    assert_eq!(metadata.genres, vec!["Drama".to_string()]);
    assert!(!movie.viewing().watched);
}

#[test]
fn test_parse_plural_directors() {
    let mut data = full_data();
    data["principalCredits"][0] = json!({
        "category": {"text": "Directors"},
        "credits": names(&["Joel Coen", "Ethan Coen"])
    });
    let movie = parse_title_page("tt0116282", &page(data)).unwrap();
    assert_eq!(movie.metadata().director, "Joel Coen, Ethan Coen");
}

#[test]
fn test_parse_degraded_page() {
    let data = json!({
        "titleText": {"text": "Untitled Project"},
        "originalTitleText": null,
        "runtime": null,
        "primaryImage": null,
        "releaseDate": null,
        "genres": {"genres": []},
        "principalCredits": []
    });
    let movie = parse_title_page("tt9999999", &page(data)).unwrap();
    let metadata = movie.metadata();

    assert_eq!(metadata.original_title, "Untitled Project");
    assert_eq!(metadata.release_date, None);
    assert_eq!(metadata.duration_in_sec, None);
    assert_eq!(metadata.poster, None);
    assert_eq!(metadata.director, "");
    assert_eq!(metadata.actors, "");
    assert!(metadata.genres.is_empty());
}

#[test]
fn test_parse_partial_release_date() {
    let mut data = full_data();
    data["releaseDate"] = json!({"year": 2026, "month": null, "day": null});
    let movie = parse_title_page("tt0111161", &page(data)).unwrap();
    assert_eq!(movie.metadata().release_date, NaiveDate::from_ymd_opt(2026, 1, 1));

    let mut data = full_data();
    data["releaseDate"] = json!({"year": 2026, "month": 5});
    let movie = parse_title_page("tt0111161", &page(data)).unwrap();
    assert_eq!(movie.metadata().release_date, NaiveDate::from_ymd_opt(2026, 5, 1));
}

#[test]
fn test_parse_missing_script() {
    let html = "<html><body><h1>503 Service Unavailable</h1></body></html>";
    assert!(matches!(
        parse_title_page("tt0111161", html),
        Err(StoreError::Schema(_))
    ));
}

#[test]
fn test_parse_missing_payload() {
    let html = "<script id=\"__NEXT_DATA__\" type=\"application/json\">{\"props\": {\"pageProps\": {}}}</script>";
    assert!(matches!(
        parse_title_page("tt0111161", html),
        Err(StoreError::Schema(_))
    ));

    let html = "<script id=\"__NEXT_DATA__\" type=\"application/json\">not json</script>";
    assert!(matches!(
        parse_title_page("tt0111161", html),
        Err(StoreError::Schema(_))
    ));
}

#[test]
fn test_parse_missing_title() {
    let mut data = full_data();
    data.as_object_mut().unwrap().remove("titleText");
    assert!(matches!(
        parse_title_page("tt0111161", &page(data)),
        Err(StoreError::Schema(_))
    ));
}
