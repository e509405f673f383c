//! Chainable query builder mirroring the managed service's row API.
//!
//! Filters go into the query string (`column=eq.value`), row windows into a
//! `Range` header, and write behavior into `Prefer` headers.

use reqwest::{header, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use super::{check, Backend, BackendError};

pub struct TableQuery<'a> {
    backend: &'a Backend,
    table: String,
    params: Vec<(String, String)>,
    range: Option<(u64, u64)>,
}

impl<'a> TableQuery<'a> {
    pub(super) fn new(backend: &'a Backend, table: &str) -> Self {
        Self { backend, table: table.to_string(), params: Vec::new(), range: None }
    }

    /// Columns to return, including embedded resources such as
    /// `products(name,stock)`.
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params.push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params.push(("order".into(), format!("{column}.{direction}")));
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.params.push(("limit".into(), n.to_string()));
        self
    }

    /// Inclusive row window, sent as a `Range` header.
    pub fn range(mut self, from: u64, to: u64) -> Self {
        self.range = Some((from, to));
        self
    }

    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, BackendError> {
        let resp = check(self.request(Method::GET).send().await?).await?;
        Ok(resp.json().await?)
    }

    pub async fn fetch_optional<T: DeserializeOwned>(self) -> Result<Option<T>, BackendError> {
        Ok(self.limit(1).fetch().await?.into_iter().next())
    }

    /// Fetch plus the exact row count for the active filters, taken from the
    /// `Content-Range` response header.
    pub async fn fetch_with_count<T: DeserializeOwned>(self) -> Result<(Vec<T>, u64), BackendError> {
        let resp = self.request(Method::GET).header("Prefer", "count=exact").send().await?;
        let resp = check(resp).await?;
        let total = resp
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(content_range_total)
            .unwrap_or(0);
        Ok((resp.json().await?, total))
    }

    pub async fn insert_one<T, R>(self, row: &T) -> Result<R, BackendError>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let resp = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;
        let resp = check(resp).await?;
        let rows: Vec<R> = resp.json().await?;
        rows.into_iter().next().ok_or(BackendError::MissingRow)
    }

    pub async fn insert_many<T: Serialize>(self, rows: &[T]) -> Result<(), BackendError> {
        let resp = self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn update<T: Serialize>(self, patch: &T) -> Result<(), BackendError> {
        if !self.has_filter() {
            return Err(BackendError::UnfilteredMutation(self.table));
        }
        let resp = self.request(Method::PATCH).json(patch).send().await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn delete(self) -> Result<(), BackendError> {
        if !self.has_filter() {
            return Err(BackendError::UnfilteredMutation(self.table));
        }
        let resp = self.request(Method::DELETE).send().await?;
        check(resp).await?;
        Ok(())
    }

    fn request(&self, method: Method) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.backend.base_url, self.table);
        let mut req = self
            .backend
            .http
            .request(method, url)
            .header("apikey", &self.backend.anon_key)
            .bearer_auth(&self.backend.anon_key)
            .query(&self.params);
        if let Some((from, to)) = self.range {
            req = req
                .header(header::RANGE, format!("{from}-{to}"))
                .header("Range-Unit", "items");
        }
        req
    }

    /// Mutations must be scoped by at least one filter; an unfiltered PATCH or
    /// DELETE would hit the whole table.
    fn has_filter(&self) -> bool {
        self.params
            .iter()
            .any(|(key, _)| !matches!(key.as_str(), "select" | "order" | "limit"))
    }
}

fn content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn backend() -> Backend {
        Backend::new("http://localhost:54321/", "test-key").unwrap()
    }

    #[test]
    fn test_filters_build_query_params() {
        let backend = backend();
        let user = Uuid::nil();
        let query = backend
            .from("carts")
            .select("id,quantity")
            .eq("user_id", user)
            .eq("product_id", 7)
            .order("created_at", false);
        assert_eq!(
            query.params,
            vec![
                ("select".to_string(), "id,quantity".to_string()),
                ("user_id".to_string(), format!("eq.{user}")),
                ("product_id".to_string(), "eq.7".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_unfiltered_mutation_is_detected() {
        let backend = backend();
        assert!(!backend.from("carts").select("id").order("id", true).has_filter());
        assert!(backend.from("carts").eq("user_id", 1).has_filter());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = backend();
        assert_eq!(backend.base_url, "http://localhost:54321");
    }

    #[test]
    fn test_content_range_total() {
        assert_eq!(content_range_total("0-19/57"), Some(57));
        assert_eq!(content_range_total("*/0"), Some(0));
        assert_eq!(content_range_total("0-19/*"), None);
    }
}
