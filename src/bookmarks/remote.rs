use std::sync::Arc;

use futures::future::{
    BoxFuture,
    FutureExt,
};
use reqwest::Client;
use serde_json::Value;

use crate::core::{
    Verb,
    VerbDrillError,
};

/// A hosted JSON tree addressed by slash-separated paths.
pub trait RemoteStore: Send + Sync {
    /// `Ok(None)` when nothing is stored at `path`.
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Option<Value>, VerbDrillError>>;

    /// Overwrite whatever is stored at `path`.
    fn set<'a>(&'a self, path: &'a str, value: Value) -> BoxFuture<'a, Result<(), VerbDrillError>>;
}

/// REST access to a Firebase-style realtime database.
pub struct FirebaseStore {
    client: Client,
    database_url: String,
    auth_token: Option<String>,
}

impl FirebaseStore {
    pub fn new(client: Client, database_url: &str, auth_token: Option<String>) -> Self {
        Self {
            client,
            database_url: database_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.filter(|t| !t.trim().is_empty()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}.json", self.database_url, path.trim_matches('/'))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }
}

impl RemoteStore for FirebaseStore {
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Option<Value>, VerbDrillError>> {
        async move {
            let resp = self.with_auth(self.client.get(self.endpoint(path))).send().await?;
            if !resp.status().is_success() {
                return Err(VerbDrillError::Remote(format!(
                    "GET {} failed with status {}",
                    path,
                    resp.status()
                )));
            }

            let value: Value = resp.json().await?;
            Ok(Some(value).filter(|v| !v.is_null()))
        }
        .boxed()
    }

    fn set<'a>(&'a self, path: &'a str, value: Value) -> BoxFuture<'a, Result<(), VerbDrillError>> {
        async move {
            let resp = self.with_auth(self.client.put(self.endpoint(path))).json(&value).send().await?;
            if !resp.status().is_success() {
                return Err(VerbDrillError::Remote(format!(
                    "PUT {} failed with status {}",
                    path,
                    resp.status()
                )));
            }
            Ok(())
        }
        .boxed()
    }
}

/// A remote store bound to one user's saved-verb list.
#[derive(Clone)]
pub struct BookmarkSync {
    store: Arc<dyn RemoteStore>,
    user_id: String,
}

impl BookmarkSync {
    pub fn new(store: Arc<dyn RemoteStore>, user_id: &str) -> Self {
        Self { store, user_id: user_id.trim().to_string() }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn path(&self) -> String {
        format!("users/{}/savedVerbs", self.user_id)
    }

    /// Overwrite the stored list with `verbs`.
    pub async fn push(&self, verbs: &[Verb]) -> Result<(), VerbDrillError> {
        let value = serde_json::to_value(verbs)?;
        self.store.set(&self.path(), value).await
    }

    pub async fn fetch(&self) -> Result<Option<Vec<Verb>>, VerbDrillError> {
        match self.store.get(&self.path()).await? {
            Some(value) => decode_verbs(value).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for BookmarkSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkSync")
            .field("store", &"Arc<dyn RemoteStore>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Stored lists come back either as an array or, when sparse, as an object keyed by index.
fn decode_verbs(value: Value) -> Result<Vec<Verb>, VerbDrillError> {
    match value {
        Value::Array(items) => {
            let verbs: Vec<Option<Verb>> = serde_json::from_value(Value::Array(items))?;
            Ok(verbs.into_iter().flatten().collect())
        }
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, item) in map {
                let index: usize = key.parse().map_err(|_| {
                    VerbDrillError::Remote(format!("unexpected key in saved verbs: {key}"))
                })?;
                entries.push((index, serde_json::from_value::<Verb>(item)?));
            }
            entries.sort_by_key(|(index, _)| *index);
            Ok(entries.into_iter().map(|(_, verb)| verb).collect())
        }
        other => Err(VerbDrillError::Remote(format!("saved verbs are not a list: {other}"))),
    }
}
