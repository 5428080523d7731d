mod common;

use axum::http::StatusCode;
use common::{ids, setup_app, success};
use serde_json::json;

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn root_reports_online() {
    let app = setup_app();
    let (status, body) = app.send("GET", "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Sample books API is online"}));
}

#[tokio::test]
async fn create_then_list_shows_the_book() {
    let app = setup_app();

    let (status, body) = app.send("POST", "/books?title=Dune&pages=412").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, success());

    let (status, body) = app.send("GET", "/books?page=1&page_size=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status_code"], 200);

    let books = body["result"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Dune");
    assert_eq!(books[0]["pages"], 412);
    assert_eq!(books[0]["created_at"], today());
    assert!(books[0]["id"].is_i64());
}

#[tokio::test]
async fn create_does_not_return_the_id() {
    let app = setup_app();
    let (_, body) = app.send("POST", "/books?title=Dune&pages=412").await;
    assert!(body.get("result").is_none());
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn find_by_id_returns_book() {
    let app = setup_app();
    app.create("Dune", 412).await;

    let (status, body) = app.send("GET", "/books/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status_code": 200,
            "result": {
                "book": {"id": 1, "title": "Dune", "pages": 412, "created_at": today()}
            }
        })
    );
}

#[tokio::test]
async fn find_missing_returns_null_book() {
    let app = setup_app();

    let (status, body) = app.send("GET", "/books/9999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status_code": 200, "result": {"book": null}}));
}

#[tokio::test]
async fn list_empty_is_ok() {
    let app = setup_app();

    let (status, body) = app.send("GET", "/books").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status_code": 200, "result": {"books": []}}));
}

#[tokio::test]
async fn list_defaults_to_ten_per_page() {
    let app = setup_app();
    app.seed(25);

    let (_, body) = app.send("GET", "/books").await;
    assert_eq!(ids(&body), (1..=10).collect::<Vec<i64>>());
}

#[tokio::test]
async fn list_second_page_of_two() {
    let app = setup_app();
    app.seed(5);

    let (status, body) = app.send("GET", "/books?page_size=2&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 4]);
}

#[tokio::test]
async fn list_beyond_last_page_is_empty() {
    let app = setup_app();
    app.seed(3);

    let (status, body) = app.send("GET", "/books?page_size=2&page=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), Vec::<i64>::new());
}

#[tokio::test]
async fn oversized_page_size_behaves_like_one_hundred() {
    let app = setup_app();
    app.seed(130);

    let (_, hundred) = app.send("GET", "/books?page_size=100").await;
    let (_, large) = app.send("GET", "/books?page_size=150").await;
    assert_eq!(ids(&hundred).len(), 100);
    assert_eq!(large, hundred);
}

#[tokio::test]
async fn negative_page_size_behaves_like_one_hundred() {
    let app = setup_app();
    app.seed(130);

    let (_, hundred) = app.send("GET", "/books?page_size=100").await;
    let (status, negative) = app.send("GET", "/books?page_size=-5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(negative, hundred);

    let (_, second) = app.send("GET", "/books?page_size=-5&page=2").await;
    assert_eq!(ids(&second), (101..=130).collect::<Vec<i64>>());
}

#[tokio::test]
async fn zero_page_size_is_empty() {
    let app = setup_app();
    app.seed(3);

    let (status, body) = app.send("GET", "/books?page_size=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), Vec::<i64>::new());
}

#[tokio::test]
async fn non_positive_page_reads_from_the_start() {
    let app = setup_app();
    app.seed(4);

    for page in [0, -2] {
        let (status, body) = app
            .send("GET", &format!("/books?page_size=2&page={page}"))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), vec![1, 2], "page {page}");
    }
}

#[tokio::test]
async fn update_pages_only_keeps_title() {
    let app = setup_app();
    app.create("Dune", 412).await;

    let (status, body) = app.send("PUT", "/books?id=1&pages=500").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, success());

    let (_, body) = app.send("GET", "/books/1").await;
    assert_eq!(body["result"]["book"]["title"], "Dune");
    assert_eq!(body["result"]["book"]["pages"], 500);
}

#[tokio::test]
async fn update_title_and_pages() {
    let app = setup_app();
    app.create("Dune", 412).await;

    let (status, _) = app
        .send("PUT", "/books?id=1&title=Dune%20Messiah&pages=256")
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.send("GET", "/books/1").await;
    let book = &body["result"]["book"];
    assert_eq!(book["title"], "Dune Messiah");
    assert_eq!(book["pages"], 256);
    assert_eq!(book["created_at"], today());
}

#[tokio::test]
async fn update_with_no_fields_is_a_no_op() {
    let app = setup_app();
    app.create("Dune", 412).await;
    let (_, before) = app.send("GET", "/books/1").await;

    let (status, body) = app.send("PUT", "/books?id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, success());

    let (_, after) = app.send("GET", "/books/1").await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn delete_then_find_returns_null() {
    let app = setup_app();
    app.create("Dune", 412).await;

    let (status, body) = app.send("DELETE", "/books?id=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, success());

    let (status, body) = app.send("GET", "/books/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["result"]["book"].is_null());
}

#[tokio::test]
async fn delete_leaves_other_books() {
    let app = setup_app();
    app.create("Dune", 412).await;
    app.create("Emma", 474).await;

    app.send("DELETE", "/books?id=1").await;

    let (_, body) = app.send("GET", "/books").await;
    assert_eq!(ids(&body), vec![2]);
}

#[tokio::test]
async fn duplicate_titles_are_separate_books() {
    let app = setup_app();
    app.create("Dune", 412).await;
    app.create("Dune", 412).await;

    let (_, body) = app.send("GET", "/books").await;
    assert_eq!(ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn page_size_beyond_i64_clamps_to_one_hundred() {
    let app = setup_app();
    app.seed(130);

    let (_, hundred) = app.send("GET", "/books?page_size=100").await;

    let (status, huge) = app.send("GET", "/books?page_size=99999999999999999999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(huge, hundred);

    let (status, tiny) = app.send("GET", "/books?page_size=-99999999999999999999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tiny, hundred);
}
