//! Error types for calendar imports.
//!
//! Only file-level failures are errors. Problems with a single record are
//! reported as warnings and never abort a parse.

use thiserror::Error;

/// File-level failures that reject a whole upload.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Format de fichier non supporté ({0}). Formats acceptés : {supported}", supported = crate::import::SUPPORTED_EXTENSIONS_LABEL)]
    UnsupportedFormat(String),

    #[error("Le fichier est vide")]
    EmptyInput,

    #[error("Impossible de lire le fichier : {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("Fichier invalide : {0}")]
    Invalid(String),

    #[error("Aucun événement trouvé dans le fichier")]
    NoEvents,

    #[error("Aucun événement valide trouvé dans le fichier")]
    NoValidEvents,

    #[error("Erreur inattendue pendant la lecture du fichier : {0}")]
    Unexpected(String),
}

/// Result type alias for import operations.
pub type ImportResult<T> = Result<T, ImportError>;
