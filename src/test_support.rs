// Fakes compartidos por los tests unitarios (solo cfg(test))

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use serde::Serialize;
use crate::models::StoredSession;
use crate::services::api_client::{ProxyReply, ProxyTransport, TransportError};
use crate::services::session_store::{SessionBackend, StorageError};
use crate::state::scan_state::NfcListener;
use crate::viewmodels::modal::{Modal, ModalSurface};
use crate::viewmodels::scan_session::{NfcEvent, NfcEventSink, NfcReader, ScanError, ScanView};

/// Transporte que registra cada request y responde desde una cola.
/// Sin respuestas encoladas contesta `{ "success": true }`.
#[derive(Clone, Default)]
pub struct FakeTransport {
    replies: Rc<RefCell<VecDeque<Result<ProxyReply, TransportError>>>>,
    requests: Rc<RefCell<Vec<serde_json::Value>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(&self, status: u16, body: serde_json::Value) {
        self.replies.borrow_mut().push_back(Ok(ProxyReply { status, body }));
    }

    pub fn fail(&self, error: TransportError) {
        self.replies.borrow_mut().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.requests.borrow().clone()
    }
}

impl ProxyTransport for FakeTransport {
    async fn post<B: Serialize>(&self, body: &B) -> Result<ProxyReply, TransportError> {
        let value = serde_json::to_value(body).map_err(|e| TransportError::Serialization(e.to_string()))?;
        self.requests.borrow_mut().push(value);
        self.replies.borrow_mut().pop_front().unwrap_or_else(|| {
            Ok(ProxyReply {
                status: 200,
                body: serde_json::json!({ "success": true }),
            })
        })
    }
}

#[derive(Clone, Default)]
pub struct FakeListener {
    cancels: Rc<Cell<u32>>,
}

impl FakeListener {
    pub fn cancels(&self) -> u32 {
        self.cancels.get()
    }
}

impl NfcListener for FakeListener {
    fn cancel(&mut self) {
        self.cancels.set(self.cancels.get() + 1);
    }
}

/// Lector NFC simulado; `emit` dispara eventos por la última activación
#[derive(Clone)]
pub struct FakeReader {
    supported: bool,
    failure: Option<String>,
    activations: Rc<Cell<u32>>,
    listener: FakeListener,
    sinks: Rc<RefCell<Vec<NfcEventSink>>>,
}

impl FakeReader {
    fn build(supported: bool, failure: Option<&str>) -> Self {
        Self {
            supported,
            failure: failure.map(str::to_string),
            activations: Rc::new(Cell::new(0)),
            listener: FakeListener::default(),
            sinks: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn supported() -> Self {
        Self::build(true, None)
    }

    pub fn unsupported() -> Self {
        Self::build(false, None)
    }

    pub fn failing(cause: &str) -> Self {
        Self::build(true, Some(cause))
    }

    pub fn activations(&self) -> u32 {
        self.activations.get()
    }

    pub fn cancels(&self) -> u32 {
        self.listener.cancels()
    }

    pub fn emit(&self, event: NfcEvent) {
        if let Some(sink) = self.sinks.borrow().last() {
            sink.emit(event);
        }
    }
}

impl NfcReader for FakeReader {
    type Listener = FakeListener;

    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn activate(&self, sink: NfcEventSink) -> Result<FakeListener, ScanError> {
        self.activations.set(self.activations.get() + 1);
        if let Some(cause) = &self.failure {
            return Err(ScanError::Activation(cause.clone()));
        }
        self.sinks.borrow_mut().push(sink);
        Ok(self.listener.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Ready,
    Listening,
    Alert(String),
}

#[derive(Clone, Default)]
pub struct RecordingView {
    calls: Rc<RefCell<Vec<ViewCall>>>,
}

impl RecordingView {
    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }
}

impl ScanView for RecordingView {
    fn show_ready(&self) {
        self.calls.borrow_mut().push(ViewCall::Ready);
    }

    fn show_listening(&self) {
        self.calls.borrow_mut().push(ViewCall::Listening);
    }

    fn alert(&self, message: &str) {
        self.calls.borrow_mut().push(ViewCall::Alert(message.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Render(Modal),
    Hide,
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
    calls: Rc<RefCell<Vec<SurfaceCall>>>,
}

impl RecordingSurface {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    pub fn hides(&self) -> usize {
        self.calls.borrow().iter().filter(|c| **c == SurfaceCall::Hide).count()
    }

    pub fn renders_of(&self, predicate: impl Fn(&Modal) -> bool) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Render(modal) if predicate(modal)))
            .count()
    }
}

impl ModalSurface for RecordingSurface {
    fn render(&self, modal: &Modal) {
        self.calls.borrow_mut().push(SurfaceCall::Render(modal.clone()));
    }

    fn hide(&self) {
        self.calls.borrow_mut().push(SurfaceCall::Hide);
    }
}

/// localStorage en memoria (guarda el JSON tal cual)
#[derive(Clone, Default)]
pub struct MemoryBackend {
    raw: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.set(true);
    }

    pub fn put_raw(&self, raw: &str) {
        *self.raw.borrow_mut() = Some(raw.to_string());
    }

    pub fn raw_json(&self) -> Option<serde_json::Value> {
        self.raw
            .borrow()
            .as_ref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Result<Option<StoredSession>, StorageError> {
        match self.raw.borrow().as_deref() {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| StorageError::Corrupt(e.to_string())),
            None => Ok(None),
        }
    }

    fn save(&self, record: &StoredSession) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Unavailable("QuotaExceededError".into()));
        }
        let raw = serde_json::to_string(record).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        *self.raw.borrow_mut() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.raw.borrow_mut() = None;
        Ok(())
    }
}
