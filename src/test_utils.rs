//! Shared test doubles for the translation pipeline.
#![cfg(test)]

use std::{
    io,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use anyhow::{Result, anyhow, bail};
use futures::future::{BoxFuture, FutureExt};
use tracing_subscriber::fmt::MakeWriter;

use crate::core::{
    messages::{TranslationMap, TranslationSet},
    store::TranslationStore,
    translator::{TEXT_MARKER, TextBackend},
};

type PromptPredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Backend that replies with `prefix + text` and records every prompt.
pub(crate) struct StubBackend {
    prefix: String,
    fail_when: Option<PromptPredicate>,
    yields: bool,
    prompts: Mutex<Vec<String>>,
}

impl StubBackend {
    pub(crate) fn prefixed(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            fail_when: None,
            yields: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reject every prompt matching `predicate`.
    pub(crate) fn failing_when(
        mut self,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.fail_when = Some(Box::new(predicate));
        self
    }

    /// Yield to the scheduler before answering, like a real network call.
    pub(crate) fn yielding(mut self) -> Self {
        self.yields = true;
        self
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// The texts that were sent, in call order.
    pub(crate) fn texts(&self) -> Vec<String> {
        self.prompts()
            .iter()
            .filter_map(|prompt| prompt.split_once(TEXT_MARKER).map(|(_, text)| text.to_string()))
            .collect()
    }
}

impl TextBackend for StubBackend {
    fn send(&self, prompt: String) -> BoxFuture<'_, Result<String>> {
        async move {
            if self.yields {
                tokio::task::yield_now().await;
            }
            self.prompts.lock().unwrap().push(prompt.clone());
            if let Some(predicate) = &self.fail_when
                && predicate(&prompt)
            {
                bail!("backend rejected the request");
            }
            let text = prompt
                .split_once(TEXT_MARKER)
                .map(|(_, text)| text)
                .ok_or_else(|| anyhow!("prompt has no text section"))?;
            Ok(format!("{}{}", self.prefix, text))
        }
        .boxed()
    }
}

/// In-memory store with merge semantics.
pub(crate) struct MemoryStore {
    data: Mutex<TranslationSet>,
    read_error: Option<String>,
    write_error_for: Option<String>,
    reads: AtomicUsize,
    writes: Mutex<Vec<TranslationSet>>,
}

impl MemoryStore {
    pub(crate) fn new(data: TranslationSet) -> Self {
        Self {
            data: Mutex::new(data),
            read_error: None,
            write_error_for: None,
            reads: AtomicUsize::new(0),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_read(message: &str) -> Self {
        Self {
            read_error: Some(message.to_string()),
            ..Self::new(TranslationSet::new())
        }
    }

    pub(crate) fn failing_write_for(mut self, language: &str) -> Self {
        self.write_error_for = Some(language.to_string());
        self
    }

    pub(crate) fn snapshot(&self) -> TranslationSet {
        self.data.lock().unwrap().clone()
    }

    pub(crate) fn language(&self, language: &str) -> TranslationMap {
        self.snapshot().remove(language).unwrap_or_default()
    }

    pub(crate) fn writes(&self) -> Vec<TranslationSet> {
        self.writes.lock().unwrap().clone()
    }

    pub(crate) fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl TranslationStore for MemoryStore {
    fn read_all(&self) -> BoxFuture<'_, Result<TranslationSet>> {
        async move {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if let Some(message) = &self.read_error {
                bail!("{}", message);
            }
            Ok(self.snapshot())
        }
        .boxed()
    }

    fn merge(&self, partial: TranslationSet) -> BoxFuture<'_, Result<()>> {
        async move {
            self.writes.lock().unwrap().push(partial.clone());
            if let Some(language) = &self.write_error_for
                && partial.contains_key(language)
            {
                bail!("disk full");
            }
            let mut data = self.data.lock().unwrap();
            for (language, translations) in partial {
                data.entry(language).or_default().extend(translations);
            }
            Ok(())
        }
        .boxed()
    }
}

/// Build a translation map from string pairs.
pub(crate) fn map(entries: &[(&str, &str)]) -> TranslationMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Build a translation set from language/map pairs.
pub(crate) fn set(entries: Vec<(&str, TranslationMap)>) -> TranslationSet {
    entries
        .into_iter()
        .map(|(language, translations)| (language.to_string(), translations))
        .collect()
}

/// Collects formatted tracing output for assertions.
#[derive(Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install as the thread-local subscriber until the guard is dropped.
    pub(crate) fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter(self.0.clone())
    }
}

pub(crate) struct LogWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
