//! Scripted drivers and stores for audit tests.

#![allow(dead_code)]

use async_trait::async_trait;
use folio_core::{GenerateRequest, GenerateResponse, Output};
use folio_error::{FolioResult, ModelsError, ModelsErrorKind, StorageError, StorageErrorKind};
use folio_interface::FolioDriver;
use folio_storage::NarrativeStore;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Driver that answers with queued responses and records every prompt.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedDriver {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl FolioDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> FolioResult<GenerateResponse> {
        let prompt = req
            .messages()
            .iter()
            .map(|m| m.content().as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.prompts.lock().unwrap().push(prompt);

        let text = self.responses.lock().unwrap().pop_front().unwrap_or_default();
        Ok(GenerateResponse::builder()
            .outputs(vec![Output::Text(text)])
            .build()
            .unwrap())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-1"
    }
}

/// Driver whose every call fails like an unreachable endpoint.
#[derive(Debug, Default)]
pub struct UnreachableDriver;

#[async_trait]
impl FolioDriver for UnreachableDriver {
    async fn generate(&self, _req: &GenerateRequest) -> FolioResult<GenerateResponse> {
        Err(ModelsError::new(ModelsErrorKind::Request("connection refused".to_string())).into())
    }

    fn provider_name(&self) -> &'static str {
        "unreachable"
    }

    fn model_name(&self) -> &str {
        "none"
    }
}

/// Store that serves a previous chapter but refuses every write.
#[derive(Debug, Default)]
pub struct ReadOnlyStore {
    pub previous_chapter: Option<String>,
}

#[async_trait]
impl NarrativeStore for ReadOnlyStore {
    async fn load_chapter(&self, _index: u32) -> FolioResult<Option<String>> {
        Ok(self.previous_chapter.clone())
    }

    async fn load_plot_arcs(&self) -> FolioResult<Option<String>> {
        Err(StorageError::new(StorageErrorKind::FileRead("plot_arcs.txt: denied".to_string())).into())
    }

    async fn save_plot_arcs(&self, _content: &str) -> FolioResult<()> {
        Err(StorageError::new(StorageErrorKind::FileWrite("plot_arcs.txt: denied".to_string())).into())
    }

    async fn save_report(&self, _chapter_index: u32, _report: &str) -> FolioResult<()> {
        Err(StorageError::new(StorageErrorKind::FileWrite("report: denied".to_string())).into())
    }
}
