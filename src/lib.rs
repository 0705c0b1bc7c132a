//! # quire
//!
//! A minimal blog: create, list, edit and delete posts over HTTP, with the
//! whole collection kept in one JSON file.
//!
//! ## The contract
//!
//! The data file is the only state. Every request re-reads it; every change
//! rewrites it whole. There is no database, no cache, no pagination and no
//! authentication. Put it behind a proxy if it faces the internet.
//!
//! What's in the box:
//!
//! - [`PostStore`]: load/save/add/fetch/update/delete over the JSON file
//! - [`routes::router`]: the HTML pages and form handlers
//! - A small hyper server with radix-tree routing via [`matchit`] and graceful
//!   shutdown on SIGTERM / Ctrl-C
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use quire::{PostStore, Server, routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quire::Error> {
//!     let store = PostStore::open("blog_posts.json");
//!     Server::bind("0.0.0.0:5000".parse().unwrap())
//!         .await?
//!         .serve(routes::router(), store)
//!         .await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod health;
pub mod pages;
pub mod post;
pub mod routes;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use post::{Post, PostDraft, PostForm, ValidationError};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::{PostStore, StoreError};
