//! End-to-end checks of the blog routes against a real data file, without a
//! socket.

use std::sync::Arc;

use bytes::Bytes;
use quire::{Post, PostDraft, PostStore, Response, Router, Status, routes};
use tempfile::TempDir;

struct Blog {
    _dir: TempDir,
    store: Arc<PostStore>,
    router: Router<PostStore>,
}

impl Blog {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(PostStore::open(dir.path().join("blog_posts.json")));
        Self { _dir: dir, store, router: routes::router() }
    }

    async fn get(&self, uri: &str) -> Response {
        let req = http::Request::get(uri).body(Bytes::new()).unwrap();
        self.router.handle(Arc::clone(&self.store), req).await
    }

    async fn post(&self, uri: &str, form: &str) -> Response {
        let req = http::Request::post(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Bytes::from(form.to_owned()))
            .unwrap();
        self.router.handle(Arc::clone(&self.store), req).await
    }

    async fn posts(&self) -> Vec<Post> {
        self.store.load().await.unwrap()
    }

    fn raw_file(&self) -> Option<Vec<u8>> {
        std::fs::read(self.store.path()).ok()
    }
}

fn body(res: &Response) -> String {
    String::from_utf8(res.body().to_vec()).unwrap()
}

fn assert_redirect_home(res: &Response) {
    assert_eq!(res.status_code(), Status::Found);
    assert_eq!(res.header("location"), Some("/"));
}

#[tokio::test]
async fn index_renders_with_no_data_file() {
    let blog = Blog::new();
    let res = blog.get("/").await;

    assert_eq!(res.status_code(), Status::Ok);
    assert_eq!(res.header("content-type"), Some("text/html; charset=utf-8"));
    assert!(body(&res).contains("No posts yet."));
    assert!(blog.raw_file().is_none());
}

#[tokio::test]
async fn add_form_renders() {
    let blog = Blog::new();
    let res = blog.get("/add").await;
    assert_eq!(res.status_code(), Status::Ok);
    assert!(body(&res).contains("action=\"/add\""));
}

#[tokio::test]
async fn adding_a_post_redirects_and_persists() {
    let blog = Blog::new();

    let res = blog.post("/add", "author=+Ada+&title=Hello&content=First+post").await;
    assert_redirect_home(&res);

    assert_eq!(
        blog.posts().await,
        vec![Post {
            id: 1,
            author: "Ada".into(),
            title: "Hello".into(),
            content: "First post".into(),
        }]
    );

    let page = body(&blog.get("/").await);
    assert!(page.contains("<h2>Hello</h2>"));
    assert!(page.contains("by Ada"));
}

#[tokio::test]
async fn blank_title_is_rejected_and_file_unchanged() {
    let blog = Blog::new();
    blog.post("/add", "author=A&title=T&content=C").await;
    let before = blog.raw_file();

    let res = blog.post("/add", "author=B&title=+++&content=C").await;

    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
    assert_eq!(body(&res), "title must not be blank");
    assert_eq!(blog.raw_file(), before);
}

#[tokio::test]
async fn missing_field_is_rejected() {
    let blog = Blog::new();
    let res = blog.post("/add", "author=A&title=T").await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert!(blog.raw_file().is_none());
}

#[tokio::test]
async fn delete_removes_post_and_keeps_other_ids() {
    let blog = Blog::new();
    blog.post("/add", "author=A&title=One&content=C").await;
    blog.post("/add", "author=A&title=Two&content=C").await;

    assert_redirect_home(&blog.post("/delete/1", "").await);

    let posts = blog.posts().await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, 2);
    assert_eq!(posts[0].title, "Two");
}

#[tokio::test]
async fn deleting_unknown_post_still_redirects() {
    let blog = Blog::new();
    blog.post("/add", "author=A&title=One&content=C").await;
    let before = blog.raw_file();

    assert_redirect_home(&blog.post("/delete/999", "").await);
    assert_redirect_home(&blog.post("/delete/abc", "").await);
    assert_eq!(blog.raw_file(), before);
}

#[tokio::test]
async fn update_form_is_prefilled() {
    let blog = Blog::new();
    blog.store.add(PostDraft::new("Ada", "Title <1>", "Body")).await.unwrap();

    let res = blog.get("/update/1").await;
    assert_eq!(res.status_code(), Status::Ok);
    let page = body(&res);
    assert!(page.contains("action=\"/update/1\""));
    assert!(page.contains("value=\"Title &lt;1&gt;\""));
}

#[tokio::test]
async fn update_form_for_unknown_post_is_404() {
    let blog = Blog::new();
    let res = blog.get("/update/999").await;
    assert_eq!(res.status_code(), Status::NotFound);
    assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));

    assert_eq!(blog.get("/update/not-a-number").await.status_code(), Status::NotFound);
}

#[tokio::test]
async fn update_overwrites_only_the_target() {
    let blog = Blog::new();
    for title in ["One", "Two", "Three"] {
        blog.post("/add", &format!("author=A&title={title}&content=C")).await;
    }

    let res = blog.post("/update/2", "author=B2&title=Second&content=Changed").await;
    assert_redirect_home(&res);

    let posts = blog.posts().await;
    assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(posts[1].author, "B2");
    assert_eq!(posts[1].title, "Second");
    assert_eq!(posts[1].content, "Changed");
    assert_eq!(posts[0].title, "One");
    assert_eq!(posts[2].title, "Three");
}

#[tokio::test]
async fn update_of_unknown_post_is_404_and_writes_nothing() {
    let blog = Blog::new();
    let res = blog.post("/update/5", "author=A&title=T&content=C").await;
    assert_eq!(res.status_code(), Status::NotFound);
    assert!(blog.raw_file().is_none());
}

#[tokio::test]
async fn update_with_blank_field_is_400() {
    let blog = Blog::new();
    blog.post("/add", "author=A&title=T&content=C").await;
    let before = blog.raw_file();

    let res = blog.post("/update/1", "author=A&title=T&content=").await;
    assert_eq!(res.status_code(), Status::BadRequest);
    assert_eq!(blog.raw_file(), before);
}

#[tokio::test]
async fn corrupt_data_file_is_500_and_not_ready() {
    let blog = Blog::new();
    std::fs::write(blog.store.path(), "not json").unwrap();

    let res = blog.get("/").await;
    assert_eq!(res.status_code(), Status::InternalServerError);
    assert_eq!(body(&res), "internal server error");

    let res = blog.post("/add", "author=A&title=T&content=C").await;
    assert_eq!(res.status_code(), Status::InternalServerError);
    assert_eq!(blog.raw_file().unwrap(), b"not json");

    assert_eq!(blog.get("/readyz").await.status_code(), Status::ServiceUnavailable);
    assert_eq!(blog.get("/healthz").await.status_code(), Status::Ok);
}

#[tokio::test]
async fn probes_answer_on_a_healthy_store() {
    let blog = Blog::new();
    assert_eq!(body(&blog.get("/healthz").await), "ok");
    assert_eq!(body(&blog.get("/readyz").await), "ready");
}

#[tokio::test]
async fn wrong_method_and_unknown_paths() {
    let blog = Blog::new();
    assert_eq!(blog.get("/delete/1").await.status_code(), Status::MethodNotAllowed);
    assert_eq!(blog.post("/", "").await.status_code(), Status::MethodNotAllowed);
    assert_eq!(blog.get("/add-post").await.status_code(), Status::NotFound);
}
