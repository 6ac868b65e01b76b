use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use crate::models::session::SiteId;
use crate::utils::constants::{FORM_RONDINES, VISIT_STATUS, VISIT_TYPE};

/// Visita a un punto de control (un rondín).
/// Se construye una por lectura aceptada y se envía una sola vez.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointVisit {
    #[serde(rename = "TagID")]
    pub tag_id: String,
    #[serde(rename = "Guardia")]
    pub guard_name: String,
    #[serde(rename = "Condominio")]
    pub site_id: SiteId,
    /// ISO-8601 en UTC con milisegundos (`2026-10-16T08:30:00.000Z`)
    #[serde(rename = "Fecha")]
    pub timestamp: String,
    #[serde(rename = "TipoMarca")]
    pub visit_type: &'static str,
    #[serde(rename = "Estatus")]
    pub status: &'static str,
}

impl CheckpointVisit {
    pub fn new(tag_id: &str, guard_name: &str, site_id: &SiteId, at: DateTime<Utc>) -> Self {
        Self {
            tag_id: tag_id.to_string(),
            guard_name: guard_name.to_string(),
            site_id: site_id.clone(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            visit_type: VISIT_TYPE,
            status: VISIT_STATUS,
        }
    }
}

/// Sobre `submit_form` que espera el proxy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitFormRequest {
    pub action: &'static str,
    pub formulario: &'static str,
    pub condominio: SiteId,
    pub usuario: String,
    pub data: CheckpointVisit,
}

impl SubmitFormRequest {
    pub fn rondin(visit: CheckpointVisit) -> Self {
        Self {
            action: "submit_form",
            formulario: FORM_RONDINES,
            condominio: visit.site_id.clone(),
            usuario: visit.guard_name.clone(),
            data: visit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct SubmitFormResponse {
    #[serde(default, deserialize_with = "crate::models::lenient::truthy")]
    pub success: bool,
    #[serde(default, deserialize_with = "crate::models::lenient::text")]
    pub message: Option<String>,
}
