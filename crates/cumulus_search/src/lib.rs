//! # cumulus_search
//!
//! Vector search index provisioning for cumulus.
//!
//! A single idempotent create-if-absent call: the index specification is
//! typed, the already-exists rejection maps to success, and everything else
//! surfaces unmodified. Request signing is out of scope; callers may supply
//! a pre-built authorization header value.

pub mod error;
pub mod index;

pub use error::{IndexFault, IndexFaultKind, SearchError, SearchResult};
pub use index::{
    classify_error_type, Ensured, IndexClient, IndexSettings, IndexSpec, KnnMethod, TextField,
    VectorField,
};
