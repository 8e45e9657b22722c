#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Bytes;
use axum_test::TestServer;
use chrono::Utc;
use cutlink::application::services::{
    AllocationSettings, IngestionPipeline, LinkService, UploadService,
};
use cutlink::domain::code_generator::CodeGenerator;
use cutlink::domain::entities::{Insertion, NewShortLink, ShortLink};
use cutlink::domain::repositories::{LinkRegistry, ObjectStore, StoreError, UploadTarget};
use cutlink::error::AppError;
use cutlink::routes::app_router;
use cutlink::state::AppState;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_ROOT: &str = "http://short.test";
pub const MAX_UPLOAD_FILES: usize = 5;
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Registry backed by a map; insert-if-absent is atomic under the lock.
#[derive(Default)]
pub struct MemoryRegistry {
    links: Mutex<HashMap<String, ShortLink>>,
    next_id: AtomicI64,
}

impl MemoryRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed(&self, short: &str, original: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.links.lock().unwrap().insert(
            short.to_string(),
            ShortLink::new(id, original.to_string(), short.to_string(), Utc::now()),
        );
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    pub fn codes(&self) -> Vec<String> {
        self.links.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl LinkRegistry for MemoryRegistry {
    async fn exists(&self, short: &str) -> Result<bool, AppError> {
        Ok(self.links.lock().unwrap().contains_key(short))
    }

    async fn insert_if_absent(&self, new_link: NewShortLink) -> Result<Insertion, AppError> {
        let mut links = self.links.lock().unwrap();
        if links.contains_key(&new_link.short) {
            return Ok(Insertion::Taken);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let link = ShortLink::new(id, new_link.original, new_link.short.clone(), Utc::now());
        links.insert(new_link.short, link.clone());
        Ok(Insertion::Inserted(link))
    }

    async fn get(&self, short: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.lock().unwrap().get(short).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.lock().unwrap().len() as i64)
    }
}

/// Object store that succeeds unless the filename is listed as failing.
#[derive(Default)]
pub struct FakeStore {
    pub fail_transfer: Vec<String>,
    pub unconfigured: bool,
    pub transferred: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn healthy() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_transfer(names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            fail_transfer: names.iter().map(|name| name.to_string()).collect(),
            ..Self::default()
        })
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            unconfigured: true,
            ..Self::default()
        })
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn request_upload_target(&self, filename: &str) -> Result<UploadTarget, StoreError> {
        Ok(UploadTarget {
            path: format!("app:/{filename}"),
            href: format!("https://uploader.test/{filename}"),
        })
    }

    async fn transfer(&self, target: &UploadTarget, _content: Bytes) -> Result<String, StoreError> {
        let name = target.path.trim_start_matches("app:/");
        if self.fail_transfer.iter().any(|bad| bad == name) {
            return Err(StoreError::Status {
                status: 500,
                body: "upload rejected".to_string(),
            });
        }

        self.transferred.lock().unwrap().push(name.to_string());
        Ok(format!("/{name}"))
    }

    async fn request_download_link(&self, location: &str) -> Result<String, StoreError> {
        Ok(format!("https://download.test{location}"))
    }

    fn is_configured(&self) -> bool {
        !self.unconfigured
    }
}

/// Generator that replays a fixed script of candidates, then falls back to
/// a counter-based code of the requested length.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<String>>,
    fallback: AtomicI64,
}

impl ScriptedGenerator {
    pub fn new(script: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.iter().map(|code| code.to_string()).collect()),
            fallback: AtomicI64::new(0),
        })
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self, length: usize) -> String {
        if let Some(code) = self.script.lock().unwrap().pop_front() {
            return code;
        }

        let n = self.fallback.fetch_add(1, Ordering::SeqCst);
        format!("{n:0>length$}")
    }
}

pub fn link_service(registry: Arc<MemoryRegistry>) -> Arc<LinkService> {
    Arc::new(LinkService::new(registry))
}

pub fn create_test_state(registry: Arc<MemoryRegistry>, store: Arc<FakeStore>) -> AppState {
    let links = link_service(registry);
    let pipeline = IngestionPipeline::new(store, Duration::from_secs(5));
    let uploads = Arc::new(UploadService::new(pipeline, links.clone()));

    AppState::new(links, uploads, Some(TEST_ROOT.to_string()), MAX_UPLOAD_FILES)
}

pub fn create_test_app(registry: Arc<MemoryRegistry>, store: Arc<FakeStore>) -> Router {
    app_router(create_test_state(registry, store), MAX_UPLOAD_BYTES)
}

pub fn create_test_server(registry: Arc<MemoryRegistry>, store: Arc<FakeStore>) -> TestServer {
    TestServer::new(create_test_app(registry, store)).unwrap()
}

pub fn allocation(code_length: usize, max_attempts: usize) -> AllocationSettings {
    AllocationSettings {
        code_length,
        max_attempts,
    }
}
