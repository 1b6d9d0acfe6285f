//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use green_book::engine::{CallPolicy, CompletionModel, DirectoryAssistant, EngineConfig, EngineError, LlmClient};
use green_book::store::{
    BusinessCatalog, CatalogCounts, CatalogError, MemoryCache, ResponseCache, StaticCatalog,
};
use green_book::types::{Business, Category, ChatMessage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Records every call and answers with a fixed reply (or a provider error).
pub struct RecordingModel {
    reply: Option<String>,
    calls: AtomicUsize,
    pub last_system: Mutex<Option<String>>,
    pub last_messages: Mutex<Vec<ChatMessage>>,
}

impl RecordingModel {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
            last_system: Mutex::new(None),
            last_messages: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            last_system: Mutex::new(None),
            last_messages: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn system_prompt(&self) -> String {
        self.last_system.lock().unwrap().clone().unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for RecordingModel {
    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
        _temperature: f64,
        _max_tokens: u64,
    ) -> Result<String, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_system.lock().unwrap() = Some(system.to_string());
        *self.last_messages.lock().unwrap() = messages.to_vec();

        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(EngineError::Generation(
                "groq: 503 upstream connect error".into(),
            )),
        }
    }
}

/// Catalog whose every query fails, as when the backing store is unreachable.
pub struct UnavailableCatalog;

impl UnavailableCatalog {
    fn error() -> CatalogError {
        CatalogError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused: 10.0.0.5:5432",
        ))
    }
}

#[async_trait]
impl BusinessCatalog for UnavailableCatalog {
    async fn list_with_category(&self) -> Result<Vec<Business>, CatalogError> {
        Err(Self::error())
    }

    async fn list_first(&self, _limit: usize) -> Result<Vec<Business>, CatalogError> {
        Err(Self::error())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Err(Self::error())
    }

    async fn get(&self, _id: &str) -> Result<Option<Business>, CatalogError> {
        Err(Self::error())
    }

    async fn counts(&self) -> Result<CatalogCounts, CatalogError> {
        Err(Self::error())
    }
}

pub fn business(id: &str, name: &str, description: &str, category: &str) -> Business {
    Business {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        address: "Сүхбаатар дүүрэг, Улаанбаатар".into(),
        phone: "+976-7711-0000".into(),
        email: format!("{id}@example.mn"),
        website: Some(format!("https://{id}.mn")),
        timetable: Some("Даваа-Ням 10:00-22:00".into()),
        category: Category {
            id: format!("cat-{category}"),
            name: category.into(),
        },
    }
}

/// Ten businesses across the five seed categories.
pub fn sample_corpus() -> Vec<Business> {
    vec![
        business("b01", "Modern Nomads", "Үндэсний болон европ хоолны ресторан", "Ресторан"),
        business("b02", "Beer House", "Шар айрагны бар", "Бар"),
        business("b03", "Millie's Espresso", "Кофе, өглөөний цай", "Кофе шоп"),
        business("b04", "Blue Sky Hotel", "Тансаг зэрэглэлийн зочид буудал", "Зочид буудал"),
        business("b05", "Nomin Supermarket", "Хүнсний дэлгүүр", "Дэлгүүр"),
        business("b06", "Rosewood Kitchen", "Итали хоол", "Ресторан"),
        business("b07", "Cosmo Pub", "Коктейль", "Бар"),
        business("b08", "Tom N Toms", "Кофе ба сэндвич", "Кофе шоп"),
        business("b09", "Kempinski Khan Palace", "Бизнес зочид буудал", "Зочид буудал"),
        business("b10", "State Department Store", "Их дэлгүүр", "Дэлгүүр"),
    ]
}

pub struct Harness {
    pub assistant: DirectoryAssistant,
    pub model: Arc<RecordingModel>,
    pub cache: Arc<MemoryCache>,
    pub catalog: Arc<dyn BusinessCatalog>,
}

pub fn harness_with(corpus: Vec<Business>, model: Arc<RecordingModel>) -> Harness {
    harness_over(Arc::new(StaticCatalog::new(corpus)), model)
}

pub fn harness_over(catalog: Arc<dyn BusinessCatalog>, model: Arc<RecordingModel>) -> Harness {
    let cache = Arc::new(MemoryCache::new());

    let cache_dyn: Arc<dyn ResponseCache> = cache.clone();
    let model_dyn: Arc<dyn CompletionModel> = model.clone();

    let assistant = DirectoryAssistant::new(
        catalog.clone(),
        cache_dyn,
        LlmClient::new(model_dyn, CallPolicy::default()),
        EngineConfig::default(),
    );

    Harness {
        assistant,
        model,
        cache,
        catalog,
    }
}

pub fn harness() -> Harness {
    harness_with(sample_corpus(), RecordingModel::replying("Танд Modern Nomads-ийг санал болгож байна."))
}
