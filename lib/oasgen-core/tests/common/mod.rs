#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use oasgen_core::cache::{BackendError, KeyValueBackend};
use oasgen_core::route::{MetadataSource, RouteRecord, StaticMetadataSource, Verb};
use oasgen_core::spec::Shape;
use rstest::fixture;
use tokio::sync::Mutex;
use tracing::info;
use utoipa::openapi::schema::{ObjectBuilder, Type};
use utoipa::openapi::{RefOr, Schema};

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

/// A metadata source counting how many times its routes are read.
#[derive(Debug, Default)]
pub struct CountingSource {
    inner: StaticMetadataSource,
    calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: StaticMetadataSource) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MetadataSource for CountingSource {
    fn route_metadata(&self) -> Vec<RouteRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.route_metadata()
    }

    fn model_shape(&self, name: &str) -> Option<Shape> {
        self.inner.model_shape(name)
    }
}

pub fn user_shape() -> Shape {
    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(Type::Object)
            .property("id", ObjectBuilder::new().schema_type(Type::Integer))
            .property("name", ObjectBuilder::new().schema_type(Type::String))
            .required("name")
            .build(),
    ))
}

pub fn users_routes() -> StaticMetadataSource {
    StaticMetadataSource::new()
        .with_route(
            RouteRecord::new(Verb::Get, "/users(.:format)", "users", "index")
                .with_documentation("# List users\n# @tags Users"),
        )
        .with_route(
            RouteRecord::new(Verb::Post, "/users(.:format)", "users", "create").with_documentation(
                "# Create a user\n# @tags Users\n# @request_body The user to create [!User]",
            ),
        )
        .with_model("User", user_shape())
}

#[fixture]
pub fn users() -> CountingSource {
    init_tracing();
    CountingSource::new(users_routes())
}

/// A key-value backend held in memory, ignoring TTLs.
#[derive(Debug, Default)]
pub struct MapBackend {
    entries: Mutex<HashMap<String, String>>,
    pattern_delete: bool,
}

impl MapBackend {
    pub fn with_pattern_delete() -> Self {
        Self {
            pattern_delete: true,
            ..Self::default()
        }
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys = self.entries.lock().await.keys().cloned().collect::<Vec<_>>();
        keys.sort();
        keys
    }
}

impl KeyValueBackend for MapBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String, _ttl: Duration) -> Result<(), BackendError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<u64, BackendError> {
        let mut entries = self.entries.lock().await;
        let next = entries
            .get(key)
            .and_then(|it| it.parse::<u64>().ok())
            .unwrap_or_default()
            + 1;
        entries.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    async fn delete_matched(&self, pattern: &str) -> Result<Option<u64>, BackendError> {
        if !self.pattern_delete {
            return Ok(None);
        }
        let prefix = pattern.trim_end_matches('*');
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(Some(u64::try_from(before - entries.len()).unwrap_or_default()))
    }
}
