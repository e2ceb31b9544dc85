mod error;
pub use error::ApiError;

mod handler;
pub use handler::ApiHandler;

mod adapter;
pub use adapter::ServiceApiAdapter;

mod links;
pub use links::LinkRenderer;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpApi;

#[cfg(feature = "http")]
mod server;

#[cfg(feature = "http")]
pub use server::{ServerConfig, serve};

#[cfg(feature = "http")]
pub use axum;
