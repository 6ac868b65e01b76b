// ============================================================================
// SCAN SESSION CONTROLLER - Escaneo NFC -> registro -> acuse
// ============================================================================
// Actor de un solo consumidor: el hardware, el botón ESCANEAR y el botón del
// modal envían ScanMessage a una cola; solo este controlador muta ScanState.
//
//   Idle -> Activating -> Listening -> Locked -> (acuse del guardia) -> Idle
//
// Por cada sesión de escaneo se reenvía como máximo UNA lectura al backend,
// por muchos eventos que dispare la antena en los milisegundos siguientes.
// ============================================================================

use std::ops::ControlFlow;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use thiserror::Error;
use crate::models::Session;
use crate::services::api_client::ProxyTransport;
use crate::services::submission_service::SubmissionClient;
use crate::state::scan_state::{LockAttempt, NfcListener, ScanPhase, ScanSessionId, ScanState};
use crate::utils::texts::{MODAL_REGISTERED, MODAL_REGISTERING};
use crate::viewmodels::modal::{Modal, ModalPresenter, ModalSurface};

/// Errores del lado del hardware. El Display es el texto mostrado al guardia.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("Tu dispositivo o navegador no soporta lectura NFC web. Asegúrate de usar Chrome en Android y HTTPS.")]
    Unsupported,
    #[error("Error al iniciar NFC: {0}")]
    Activation(String),
    #[error("Error al leer etiqueta. Intenta de nuevo.")]
    Read,
    #[error("Lectura vacía")]
    EmptyRead,
}

/// Evento emitido por la antena
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NfcEvent {
    Read { serial_number: Option<String> },
    ReadError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanMessage {
    StartRequested,
    Nfc { session: ScanSessionId, event: NfcEvent },
    ModalAcknowledged,
    Shutdown,
}

/// Extremo emisor de la cola del controlador
#[derive(Clone, Debug)]
pub struct ScanSender(UnboundedSender<ScanMessage>);

impl ScanSender {
    pub fn send(&self, message: ScanMessage) {
        if self.0.unbounded_send(message).is_err() {
            log::debug!("📭 [SCAN] Controlador detenido, mensaje descartado");
        }
    }
}

pub fn scan_channel() -> (ScanSender, UnboundedReceiver<ScanMessage>) {
    let (tx, rx) = mpsc::unbounded();
    (ScanSender(tx), rx)
}

/// Lo que recibe el lector al activarse: sella cada evento con su sesión
#[derive(Clone, Debug)]
pub struct NfcEventSink {
    session: ScanSessionId,
    sender: ScanSender,
}

impl NfcEventSink {
    pub fn new(session: ScanSessionId, sender: ScanSender) -> Self {
        Self { session, sender }
    }

    pub fn emit(&self, event: NfcEvent) {
        self.sender.send(ScanMessage::Nfc {
            session: self.session,
            event,
        });
    }
}

/// Hardware NFC
#[allow(async_fn_in_trait)]
pub trait NfcReader {
    type Listener: NfcListener;

    fn is_supported(&self) -> bool;

    /// Encender la antena. Resuelve cuando el hardware está escuchando.
    async fn activate(&self, sink: NfcEventSink) -> Result<Self::Listener, ScanError>;
}

/// Botón de escaneo y textos de estado de la pantalla principal
pub trait ScanView {
    fn show_ready(&self);
    fn show_listening(&self);
    /// Alerta bloqueante (dispositivo sin NFC web)
    fn alert(&self, message: &str);
}

pub struct ScanSessionController<R: NfcReader, T, V, S> {
    reader: R,
    submission: SubmissionClient<T>,
    view: V,
    modal: ModalPresenter<S>,
    session: Session,
    state: ScanState<R::Listener>,
    sender: ScanSender,
}

impl<R, T, V, S> ScanSessionController<R, T, V, S>
where
    R: NfcReader,
    T: ProxyTransport,
    V: ScanView,
    S: ModalSurface,
{
    pub fn new(
        reader: R,
        submission: SubmissionClient<T>,
        view: V,
        surface: S,
        session: Session,
        sender: ScanSender,
    ) -> Self {
        Self {
            reader,
            submission,
            view,
            modal: ModalPresenter::new(surface),
            session,
            state: ScanState::new(),
            sender,
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.state.phase()
    }

    pub fn state(&self) -> &ScanState<R::Listener> {
        &self.state
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.current()
    }

    /// Bucle del actor: un mensaje a la vez hasta Shutdown
    pub async fn run(mut self, mut inbox: UnboundedReceiver<ScanMessage>) {
        log::info!("▶️ [SCAN] Controlador iniciado para {} @ {}", self.session.guard_name, self.session.site_id);
        while let Some(message) = inbox.next().await {
            if self.handle(message).await.is_break() {
                break;
            }
        }
        self.state.reset();
        log::info!("⏹️ [SCAN] Controlador detenido");
    }

    pub async fn handle(&mut self, message: ScanMessage) -> ControlFlow<()> {
        match message {
            ScanMessage::StartRequested => self.start().await,
            ScanMessage::Nfc { session, event: NfcEvent::Read { serial_number } } => {
                self.on_read(session, serial_number).await
            }
            ScanMessage::Nfc { session, event: NfcEvent::ReadError } => self.on_read_error(session),
            ScanMessage::ModalAcknowledged => self.acknowledge(),
            ScanMessage::Shutdown => {
                self.state.reset();
                self.modal.clear();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    async fn start(&mut self) {
        if self.state.phase() != ScanPhase::Idle {
            log::debug!("⏳ [SCAN] Escaneo ya en curso ({:?}), ignorando", self.state.phase());
            return;
        }

        if !self.reader.is_supported() {
            let error = ScanError::Unsupported;
            log::warn!("⚠️ [SCAN] {}", error);
            self.view.alert(&error.to_string());
            return;
        }

        let Some(session) = self.state.begin_activation() else {
            return;
        };
        log::info!("📡 [SCAN] Activando lector NFC (sesión {})", session);

        let sink = NfcEventSink::new(session, self.sender.clone());
        match self.reader.activate(sink).await {
            Ok(listener) => {
                if self.state.activated(listener) {
                    self.view.show_listening();
                    log::info!("👂 [SCAN] Escuchando (sesión {})", session);
                }
            }
            Err(error) => {
                log::error!("❌ [SCAN] {}", error);
                self.state.activation_failed();
                self.view.show_ready();
                self.modal.show(Modal::error(error.to_string()));
            }
        }
    }

    async fn on_read(&mut self, session: ScanSessionId, serial_number: Option<String>) {
        // Sección crítica: el candado se toma antes de cualquier otro trabajo
        if !self.take_lock(session, "lectura") {
            return;
        }

        let tag_id = serial_number
            .map(|serial| serial.trim().to_string())
            .filter(|serial| !serial.is_empty());

        self.view.show_ready();

        let Some(tag_id) = tag_id else {
            log::warn!("⚠️ [SCAN] Etiqueta sin número de serie");
            self.modal.show(Modal::error(ScanError::EmptyRead.to_string()));
            return;
        };

        log::info!("🏷️ [SCAN] Tag leído: {}", tag_id);
        self.modal.show(Modal::loading(MODAL_REGISTERING));

        let outcome = self
            .submission
            .submit(&tag_id, &self.session.guard_name, &self.session.site_id)
            .await;

        // El candado sigue tomado: se libera al cerrar este modal
        match outcome {
            Ok(()) => self.modal.show(Modal::success(MODAL_REGISTERED)),
            Err(error) => self.modal.show(Modal::error(error.to_string())),
        }
    }

    fn on_read_error(&mut self, session: ScanSessionId) {
        if !self.take_lock(session, "error de lectura") {
            return;
        }
        log::warn!("⚠️ [SCAN] {}", ScanError::Read);
        self.modal.show(Modal::error(ScanError::Read.to_string()));
        self.view.show_ready();
    }

    fn take_lock(&mut self, session: ScanSessionId, what: &str) -> bool {
        match self.state.try_lock(session) {
            LockAttempt::Acquired => {
                log::info!("🔒 [SCAN] Candado tomado por {} (sesión {})", what, session);
                true
            }
            LockAttempt::AlreadyLocked => {
                log::debug!("🔁 [SCAN] {} ignorado: candado ya tomado", what);
                false
            }
            LockAttempt::Stale => {
                log::debug!("🗑️ [SCAN] {} obsoleto de la sesión {} descartado", what, session);
                false
            }
        }
    }

    fn acknowledge(&mut self) {
        if !self.modal.acknowledge() {
            log::debug!("🪟 [SCAN] Acuse sin modal de resultado visible, ignorado");
            return;
        }
        if self.state.release() {
            log::info!("🔓 [SCAN] Candado liberado por el guardia");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SiteId;
    use crate::services::api_client::TransportError;
    use crate::test_support::{
        FakeReader, FakeTransport, RecordingSurface, RecordingView, SurfaceCall, ViewCall,
    };
    use futures::executor::block_on;
    use serde_json::json;

    type Controller = ScanSessionController<FakeReader, FakeTransport, RecordingView, RecordingSurface>;

    struct Harness {
        controller: Controller,
        inbox: UnboundedReceiver<ScanMessage>,
        reader: FakeReader,
        transport: FakeTransport,
        view: RecordingView,
        surface: RecordingSurface,
    }

    impl Harness {
        fn new(reader: FakeReader) -> Self {
            let (sender, inbox) = scan_channel();
            let transport = FakeTransport::new();
            let view = RecordingView::default();
            let surface = RecordingSurface::default();
            let controller = ScanSessionController::new(
                reader.clone(),
                SubmissionClient::new(transport.clone()),
                view.clone(),
                surface.clone(),
                Session::new("juan", SiteId::from("C1")),
                sender,
            );
            Self { controller, inbox, reader, transport, view, surface }
        }

        fn send(&mut self, message: ScanMessage) {
            let _ = block_on(self.controller.handle(message));
        }

        /// Procesa lo que el lector haya encolado
        fn pump(&mut self) {
            while let Ok(Some(message)) = self.inbox.try_next() {
                let _ = block_on(self.controller.handle(message));
            }
        }

        fn arm(&mut self) {
            self.send(ScanMessage::StartRequested);
            assert_eq!(self.controller.phase(), ScanPhase::Listening);
        }

        fn tap(&self, serial: &str) {
            self.reader.emit(NfcEvent::Read { serial_number: Some(serial.to_string()) });
        }
    }

    #[test]
    fn burst_of_reads_submits_exactly_once() {
        for burst in 1..=12 {
            let mut h = Harness::new(FakeReader::supported());
            h.arm();
            for _ in 0..burst {
                h.tap("04A1B2C3");
            }
            h.pump();

            assert_eq!(h.transport.requests().len(), 1, "burst of {}", burst);
            assert_eq!(h.controller.phase(), ScanPhase::Locked);
            assert_eq!(h.reader.cancels(), 1);
        }
    }

    #[test]
    fn reads_mixed_with_errors_after_lock_change_nothing() {
        let mut h = Harness::new(FakeReader::supported());
        h.arm();
        h.tap("04A1B2C3");
        h.reader.emit(NfcEvent::ReadError);
        h.tap("04A1B2C3");
        h.reader.emit(NfcEvent::ReadError);
        h.pump();

        assert_eq!(h.transport.requests().len(), 1);
        assert_eq!(h.controller.modal(), Some(&Modal::success("Posición registrada")));
    }

    #[test]
    fn read_error_burst_shows_one_modal_per_lock_cycle() {
        let mut h = Harness::new(FakeReader::supported());
        h.arm();
        for _ in 0..5 {
            h.reader.emit(NfcEvent::ReadError);
        }
        h.pump();

        let errors: Vec<_> = h
            .surface
            .calls()
            .into_iter()
            .filter(|call| matches!(call, SurfaceCall::Render(Modal::Error(_))))
            .collect();
        assert_eq!(errors, vec![SurfaceCall::Render(Modal::error("Error al leer etiqueta. Intenta de nuevo."))]);
        assert_eq!(h.controller.phase(), ScanPhase::Locked);
        assert!(h.transport.requests().is_empty());

        // Nuevo ciclo: un nuevo error vuelve a mostrarse una vez
        h.send(ScanMessage::ModalAcknowledged);
        h.arm();
        h.reader.emit(NfcEvent::ReadError);
        h.reader.emit(NfcEvent::ReadError);
        h.pump();
        assert_eq!(h.surface.renders_of(|m| matches!(m, Modal::Error(_))), 2);
    }

    #[test]
    fn successful_scan_holds_lock_until_acknowledged() {
        let mut h = Harness::new(FakeReader::supported());
        h.transport.reply_json(200, json!({ "success": true }));
        h.arm();
        h.tap("04A1B2C3");
        h.pump();

        assert_eq!(h.controller.modal(), Some(&Modal::success("Posición registrada")));
        assert_eq!(h.controller.phase(), ScanPhase::Locked);
        assert_eq!(h.transport.requests()[0]["data"]["TagID"], "04A1B2C3");

        // Reintentar escanear con el candado tomado no hace nada
        h.send(ScanMessage::StartRequested);
        assert_eq!(h.reader.activations(), 1);

        h.send(ScanMessage::ModalAcknowledged);
        assert_eq!(h.controller.phase(), ScanPhase::Idle);
        assert_eq!(h.controller.modal(), None);
    }

    #[test]
    fn acknowledging_twice_is_noop() {
        let mut h = Harness::new(FakeReader::supported());
        h.arm();
        h.tap("04A1B2C3");
        h.pump();

        h.send(ScanMessage::ModalAcknowledged);
        h.send(ScanMessage::ModalAcknowledged);

        assert_eq!(h.controller.phase(), ScanPhase::Idle);
        assert_eq!(h.surface.hides(), 1);
    }

    #[test]
    fn empty_serial_reports_and_skips_submission() {
        let mut h = Harness::new(FakeReader::supported());
        h.arm();
        h.reader.emit(NfcEvent::Read { serial_number: Some(String::new()) });
        h.reader.emit(NfcEvent::Read { serial_number: None });
        h.pump();

        assert_eq!(h.controller.modal(), Some(&Modal::error("Lectura vacía")));
        assert!(h.transport.requests().is_empty());
        assert_eq!(h.controller.phase(), ScanPhase::Locked);
        assert_eq!(h.view.calls().last(), Some(&ViewCall::Ready));

        h.send(ScanMessage::ModalAcknowledged);
        assert_eq!(h.controller.phase(), ScanPhase::Idle);
    }

    #[test]
    fn transport_failure_keeps_lock_until_acknowledged() {
        let mut h = Harness::new(FakeReader::supported());
        h.transport.fail(TransportError::Network("Failed to fetch".into()));
        h.arm();
        h.tap("04A1B2C3");
        h.pump();

        assert_eq!(h.controller.modal(), Some(&Modal::error("Error de conexión")));
        assert_eq!(h.controller.phase(), ScanPhase::Locked);

        h.tap("04A1B2C3");
        h.pump();
        assert_eq!(h.transport.requests().len(), 1);

        h.send(ScanMessage::ModalAcknowledged);
        assert_eq!(h.controller.phase(), ScanPhase::Idle);
    }

    #[test]
    fn acknowledge_while_loading_keeps_lock() {
        let mut h = Harness::new(FakeReader::supported());
        h.arm();
        h.tap("04A1B2C3");
        h.pump();
        h.controller.modal.show(Modal::loading(MODAL_REGISTERING));

        h.send(ScanMessage::ModalAcknowledged);

        assert_eq!(h.controller.phase(), ScanPhase::Locked);
        assert_eq!(h.controller.modal(), Some(&Modal::loading(MODAL_REGISTERING)));
    }

    #[test]
    fn unsupported_device_alerts_without_state_change() {
        let mut h = Harness::new(FakeReader::unsupported());
        h.send(ScanMessage::StartRequested);

        assert_eq!(h.controller.phase(), ScanPhase::Idle);
        assert_eq!(h.reader.activations(), 0);
        assert_eq!(h.view.calls(), vec![ViewCall::Alert(ScanError::Unsupported.to_string())]);
        assert_eq!(h.controller.modal(), None);
    }

    #[test]
    fn activation_failure_returns_to_idle_and_reports() {
        let mut h = Harness::new(FakeReader::failing("NotAllowedError"));
        h.send(ScanMessage::StartRequested);

        assert_eq!(h.controller.phase(), ScanPhase::Idle);
        assert_eq!(h.controller.modal(), Some(&Modal::error("Error al iniciar NFC: NotAllowedError")));

        // El acuse solo oculta el modal; el guardia reintenta a mano
        h.send(ScanMessage::ModalAcknowledged);
        assert_eq!(h.controller.modal(), None);
        h.send(ScanMessage::StartRequested);
        assert_eq!(h.reader.activations(), 2);
    }

    #[test]
    fn stale_events_from_previous_session_are_ignored() {
        let mut h = Harness::new(FakeReader::supported());
        h.arm();
        let old_session = h.controller.state().session();
        h.tap("A");
        h.pump();
        h.send(ScanMessage::ModalAcknowledged);

        h.arm();
        h.send(ScanMessage::Nfc { session: old_session, event: NfcEvent::Read { serial_number: Some("A".into()) } });

        assert_eq!(h.controller.phase(), ScanPhase::Listening);
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[test]
    fn actor_loop_stops_on_shutdown_and_powers_down() {
        let Harness { controller, inbox, reader, transport, .. } = Harness::new(FakeReader::supported());
        let sender = controller.sender.clone();
        sender.send(ScanMessage::StartRequested);
        sender.send(ScanMessage::Shutdown);
        sender.send(ScanMessage::StartRequested);

        block_on(controller.run(inbox));

        assert_eq!(reader.activations(), 1);
        assert_eq!(reader.cancels(), 1);
        assert!(transport.requests().is_empty());
    }
}
