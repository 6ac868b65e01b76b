// ============================================================================
// SCAN STATE - Estado de la sesión de escaneo NFC
// ============================================================================
// Propiedad exclusiva del ScanSessionController. Nunca se persiste.
// scanning == Listening, processing == Locked: nunca ambos a la vez.
// ============================================================================

use std::fmt;

/// Lector NFC activo: handle del lector + token de cancelación
pub trait NfcListener {
    /// Apagar la antena. Debe ser idempotente.
    fn cancel(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanPhase {
    /// Sin actividad del lector
    Idle,
    /// Esperando a que el hardware acepte el scan
    Activating,
    /// Antena encendida, esperando una lectura
    Listening,
    /// Lectura aceptada; solo el guardia (cerrando el modal) libera el candado
    Locked,
}

/// Número de activación; los eventos de activaciones anteriores son obsoletos
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScanSessionId(u64);

impl fmt::Display for ScanSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Resultado de intentar tomar el candado con un evento del hardware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockAttempt {
    Acquired,
    AlreadyLocked,
    Stale,
}

pub struct ScanState<L: NfcListener> {
    phase: ScanPhase,
    session: ScanSessionId,
    listener: Option<L>,
}

impl<L: NfcListener> ScanState<L> {
    pub fn new() -> Self {
        Self {
            phase: ScanPhase::Idle,
            session: ScanSessionId::default(),
            listener: None,
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn is_scanning(&self) -> bool {
        self.phase == ScanPhase::Listening
    }

    pub fn is_processing(&self) -> bool {
        self.phase == ScanPhase::Locked
    }

    pub fn session(&self) -> ScanSessionId {
        self.session
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Idle -> Activating con una sesión nueva
    pub fn begin_activation(&mut self) -> Option<ScanSessionId> {
        if self.phase != ScanPhase::Idle {
            return None;
        }
        self.session = ScanSessionId(self.session.0 + 1);
        self.phase = ScanPhase::Activating;
        Some(self.session)
    }

    /// Activating -> Listening. Fuera de Activating el lector se apaga al instante.
    pub fn activated(&mut self, mut listener: L) -> bool {
        if self.phase != ScanPhase::Activating {
            listener.cancel();
            return false;
        }
        self.listener = Some(listener);
        self.phase = ScanPhase::Listening;
        true
    }

    /// Activating -> Idle
    pub fn activation_failed(&mut self) {
        if self.phase == ScanPhase::Activating {
            self.phase = ScanPhase::Idle;
        }
    }

    /// Test-and-set del candado. Al adquirirlo se apaga la antena antes de devolver.
    pub fn try_lock(&mut self, session: ScanSessionId) -> LockAttempt {
        match self.phase {
            ScanPhase::Locked => LockAttempt::AlreadyLocked,
            ScanPhase::Listening if session == self.session => {
                self.phase = ScanPhase::Locked;
                self.power_down();
                LockAttempt::Acquired
            }
            _ => LockAttempt::Stale,
        }
    }

    /// Locked -> Idle. Solo tras el acuse del guardia.
    pub fn release(&mut self) -> bool {
        if self.phase != ScanPhase::Locked {
            return false;
        }
        self.phase = ScanPhase::Idle;
        true
    }

    /// Apagar todo y volver a Idle (logout / salida de pantalla)
    pub fn reset(&mut self) {
        self.power_down();
        self.phase = ScanPhase::Idle;
    }

    fn power_down(&mut self) {
        if let Some(mut listener) = self.listener.take() {
            listener.cancel();
        }
    }
}

impl<L: NfcListener> Default for ScanState<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: NfcListener> Drop for ScanState<L> {
    fn drop(&mut self) {
        self.power_down();
    }
}
