use thiserror::Error;

use crate::core::models::atom::UnknownElementError;

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Structure records contain no models")]
    NoModels,

    #[error("Atom creation failed: {source}")]
    UnknownElement {
        #[from]
        source: UnknownElementError,
    },
}
