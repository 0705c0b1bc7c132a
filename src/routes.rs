//! The blog's HTTP surface.
//!
//! | Method | Path | Behavior |
//! |---|---|---|
//! | GET | `/` | list every post |
//! | GET | `/add` | creation form |
//! | POST | `/add` | validate, create, redirect to `/` |
//! | POST | `/delete/{post_id}` | delete (unknown ids ignored), redirect to `/` |
//! | GET | `/update/{post_id}` | pre-filled edit form, 404 if unknown |
//! | POST | `/update/{post_id}` | validate, overwrite, redirect to `/` |
//! | GET | `/healthz`, `/readyz` | probes, see [`crate::health`] |

use std::sync::Arc;

use tracing::{error, info};

use crate::health;
use crate::pages;
use crate::post::{PostForm, ValidationError};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;
use crate::status::Status;
use crate::store::{PostStore, StoreError};

/// Builds the application router over a [`PostStore`].
pub fn router() -> Router<PostStore> {
    Router::new()
        .get("/", index)
        .get("/add", add_form)
        .post("/add", add_post)
        .post("/delete/{post_id}", delete_post)
        .get("/update/{post_id}", update_form)
        .post("/update/{post_id}", update_post)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}

/// Why a blog request failed.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed form body: {0}")]
    Form(#[from] serde_urlencoded::de::Error),

    #[error("post not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::Form(_) => Status::BadRequest,
            Self::NotFound => Status::NotFound,
            Self::Store(e) => {
                error!("store error: {e}");
                return Response::builder()
                    .status(Status::InternalServerError)
                    .text("internal server error");
            }
        };
        Response::builder().status(status).text(self.to_string())
    }
}

type Result<T, E = RouteError> = std::result::Result<T, E>;

/// `post_id` path parameter; a value that is not an integer matches no post.
fn post_id(req: &Request) -> Result<u64> {
    req.param_as("post_id").ok_or(RouteError::NotFound)
}

async fn index(_req: Request, store: Arc<PostStore>) -> Result<Response> {
    let posts = store.load().await?;
    Ok(Response::html(pages::index(&posts)))
}

async fn add_form(_req: Request, _store: Arc<PostStore>) -> Response {
    Response::html(pages::add_form())
}

async fn add_post(req: Request, store: Arc<PostStore>) -> Result<Response> {
    let draft = req.form::<PostForm>()?.validate()?;
    let post = store.add(draft).await?;
    info!(id = post.id, "post created");
    Ok(Response::redirect("/"))
}

async fn delete_post(req: Request, store: Arc<PostStore>) -> Result<Response> {
    // Unknown ids, numeric or not, still redirect.
    if let Some(id) = req.param_as::<u64>("post_id") {
        if store.delete(id).await? {
            info!(id, "post deleted");
        }
    }
    Ok(Response::redirect("/"))
}

async fn update_form(req: Request, store: Arc<PostStore>) -> Result<Response> {
    let id = post_id(&req)?;
    let post = store.fetch(id).await?.ok_or(RouteError::NotFound)?;
    Ok(Response::html(pages::update_form(&post)))
}

async fn update_post(req: Request, store: Arc<PostStore>) -> Result<Response> {
    let id = post_id(&req)?;
    let draft = req.form::<PostForm>()?.validate()?;
    store.update(id, draft).await?.ok_or(RouteError::NotFound)?;
    info!(id, "post updated");
    Ok(Response::redirect("/"))
}
