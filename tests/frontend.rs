use postboard::{Blog, Method, PostStore, Request, Submissions, api, frontend};
use serde_json::{Value, json};

fn post(body: Value) -> Request {
    Request::new(Method::Post, "/api/posts").with_body(body.to_string())
}

#[tokio::test]
async fn accepts_posts_without_flashes() {
    let app = frontend::router(Submissions::new().shared());
    let res = app.handle(post(json!({ "title": "Hi", "content": "There" }))).await;
    assert_eq!(res.status_code(), 201);
    let body: Value = serde_json::from_slice(res.body()).expect("JSON body");
    assert_eq!(body, json!({ "id": 1, "title": "Hi", "content": "There" }));
}

#[tokio::test]
async fn validation_matches_the_backend() {
    let app = frontend::router(Submissions::new().shared());

    let res = app.handle(post(json!({ "content": "" }))).await;
    assert_eq!(res.status_code(), 400);
    let body: Value = serde_json::from_slice(res.body()).expect("JSON body");
    assert_eq!(body, json!({ "error": "Missing required field(s): title, content" }));

    let res = app.handle(Request::new(Method::Post, "/api/posts")).await;
    assert_eq!(res.status_code(), 400);
    let body: Value = serde_json::from_slice(res.body()).expect("JSON body");
    assert_eq!(body, json!({ "error": "Missing JSON body" }));
}

#[tokio::test]
async fn offers_nothing_but_creation() {
    let app = frontend::router(Submissions::new().shared());
    assert_eq!(app.handle(Request::new(Method::Get, "/api/posts")).await.status_code(), 405);
    assert_eq!(app.handle(Request::new(Method::Delete, "/api/posts/1")).await.status_code(), 404);
}

#[tokio::test]
async fn shares_no_state_with_the_backend() {
    let submissions = Submissions::new().shared();
    let blog = Blog::new(PostStore::seeded()).shared();
    let front = frontend::router(submissions.clone());
    let back = api::router(blog.clone());

    front.handle(post(json!({ "title": "Front", "content": "only" }))).await;

    let blog = blog.lock().expect("blog lock");
    assert_eq!(blog.store().posts().len(), 2);
    assert!(blog.pending_flashes().is_empty());
    drop(blog);

    let res = back.handle(Request::new(Method::Get, "/api/posts/search?title=front")).await;
    let body: Value = serde_json::from_slice(res.body()).expect("JSON body");
    assert_eq!(body["matches"], json!([]));
    assert_eq!(submissions.lock().expect("submissions lock").posts().len(), 1);
}
