// ============================================================================
// NFC SERVICE - Lector Web NFC (NDEFReader + AbortController)
// ============================================================================
// Los callbacks del hardware NO tocan estado: solo encolan NfcEvent en el
// controlador. Apagar la antena = abortar la señal del scan.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::AbortController;
use crate::state::scan_state::NfcListener;
use crate::utils::nfc_ffi::{self, NdefReader, NdefReadingEvent};
use crate::viewmodels::scan_session::{NfcEvent, NfcEventSink, NfcReader, ScanError};

#[derive(Clone, Copy, Debug, Default)]
pub struct WebNfcReader;

/// Lector activo: mantiene vivos los closures hasta que se cancela
pub struct WebNfcListener {
    reader: NdefReader,
    abort: AbortController,
    _on_reading: Closure<dyn FnMut(NdefReadingEvent)>,
    _on_reading_error: Closure<dyn FnMut(web_sys::Event)>,
}

impl NfcListener for WebNfcListener {
    fn cancel(&mut self) {
        self.reader.set_onreading(None);
        self.reader.set_onreadingerror(None);
        self.abort.abort();
        log::debug!("📴 [NFC] Antena apagada");
    }
}

impl NfcReader for WebNfcReader {
    type Listener = WebNfcListener;

    fn is_supported(&self) -> bool {
        nfc_ffi::is_web_nfc_available()
    }

    async fn activate(&self, sink: NfcEventSink) -> Result<WebNfcListener, ScanError> {
        let abort = AbortController::new().map_err(activation_error)?;
        let reader = NdefReader::new().map_err(activation_error)?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("signal"), &abort.signal())
            .map_err(activation_error)?;

        let promise = reader.scan(&options).map_err(activation_error)?;
        JsFuture::from(promise).await.map_err(activation_error)?;

        let reading_sink = sink.clone();
        let on_reading = Closure::wrap(Box::new(move |event: NdefReadingEvent| {
            reading_sink.emit(NfcEvent::Read {
                serial_number: event.serial_number(),
            });
        }) as Box<dyn FnMut(NdefReadingEvent)>);

        let on_reading_error = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            sink.emit(NfcEvent::ReadError);
        }) as Box<dyn FnMut(web_sys::Event)>);

        reader.set_onreading(Some(on_reading.as_ref().unchecked_ref()));
        reader.set_onreadingerror(Some(on_reading_error.as_ref().unchecked_ref()));

        Ok(WebNfcListener {
            reader,
            abort,
            _on_reading: on_reading,
            _on_reading_error: on_reading_error,
        })
    }
}

fn activation_error(error: JsValue) -> ScanError {
    ScanError::Activation(describe_js_error(&error))
}

/// `NotAllowedError: ...` como lo mostraría `String(error)` en JS
fn describe_js_error(error: &JsValue) -> String {
    if let Some(js_error) = error.dyn_ref::<js_sys::Error>() {
        return String::from(js_error.to_string());
    }
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}
