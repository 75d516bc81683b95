use axum::extract::{FromRequest, FromRequestParts};
use serde::Deserialize;

use super::error::ApiError;
use crate::pagination::Page;

/// `Json` whose rejections use the API error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> Result<Page, ApiError> {
        Ok(self.page.map(Page::new).transpose()?.unwrap_or_default())
    }
}
