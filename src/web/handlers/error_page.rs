//! Generic error page for failures that reach the response unhandled.

use askama::Template;
use askama_web::WebTemplate;

use crate::error::AppError;

/// Renders `templates/error.html`: a title, a message and a retry link.
#[derive(Debug, Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorPageTemplate {
    pub status: u16,
    pub title: String,
    pub message: String,
    pub retry_href: &'static str,
}

impl ErrorPageTemplate {
    pub fn from_error(err: &AppError) -> Self {
        let (title, message) = match err {
            AppError::Validation { .. } => (
                "Datos inválidos",
                "Revisa la información ingresada e intenta nuevamente.",
            ),
            AppError::NotFound { .. } => (
                "No encontrado",
                "No encontramos lo que buscabas. Verifica tu enlace o código.",
            ),
            AppError::Conflict { .. } => (
                "Acción no permitida",
                "Esta acción ya no es posible. Recarga la página.",
            ),
            AppError::Unauthorized { .. } => (
                "Sesión expirada",
                "Tu sesión ha expirado. Por favor inicia sesión nuevamente.",
            ),
            AppError::Upstream { .. } | AppError::Unavailable { .. } => (
                "Servicio no disponible",
                "No pudimos conectar con el servidor. Por favor intenta nuevamente.",
            ),
            AppError::Internal { .. } => (
                "Error inesperado",
                "Ocurrió un error inesperado. Por favor intenta nuevamente.",
            ),
        };

        Self {
            status: err.status_code().as_u16(),
            title: title.to_string(),
            message: message.to_string(),
            retry_href: "/",
        }
    }
}
