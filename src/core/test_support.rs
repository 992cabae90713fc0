use crate::domain::{FactSource, Language, Storage};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Fact source answering from a fixed script. Scripted failures surface as
/// transport errors; unscripted requests fail the way a malformed response
/// does.
#[derive(Default)]
pub struct ScriptedSource {
    answers: HashMap<(u64, Language), Option<String>>,
    calls: Mutex<Vec<(u64, Language)>>,
    delay: Option<Duration>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fact(mut self, id: u64, language: Language, fact: &str) -> Self {
        self.answers.insert((id, language), Some(fact.to_string()));
        self
    }

    pub fn with_failure(mut self, id: u64, language: Language) -> Self {
        self.answers.insert((id, language), None);
        self
    }

    /// Waits this long before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(u64, Language)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FactSource for ScriptedSource {
    async fn fetch_fact(&self, id: u64, language: Language) -> Result<String> {
        self.calls.lock().unwrap().push((id, language));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.answers.get(&(id, language)) {
            Some(Some(fact)) => Ok(fact.clone()),
            Some(None) => Err(transport_error()),
            None => Err(EtlError::ResponseShapeError {
                message: format!("no scripted fact for id {} in {}", id, language.code()),
            }),
        }
    }
}

/// A real `reqwest::Error`: a request whose URL cannot be parsed fails when
/// the request is built, without touching the network.
pub fn transport_error() -> EtlError {
    match reqwest::Client::new().get("http://[not-a-host/").build() {
        Err(e) => EtlError::ApiError(e),
        Ok(_) => panic!("malformed URL unexpectedly produced a request"),
    }
}

#[derive(Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl Storage for MemoryStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        self.get_file(path).ok_or_else(|| {
            EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if self.read_only {
            return Err(EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage is read-only",
            )));
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn describe(&self, path: &str) -> String {
        format!("memory://{}", path)
    }
}
