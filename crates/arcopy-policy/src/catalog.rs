//! External collaborator seams consumed by the policy engine.
//!
//! # Design
//! - The engine treats the storage backend, the message catalog, and the
//!   media-label table as opaque collaborators behind traits.
//! - Every collaborator failure carries an error code and detail text so the
//!   wizard can raise a page-level alert.

use async_trait::async_trait;

use crate::model::MediaType;

/// Error code attached to lookups that exceeded their deadline.
pub const LOOKUP_TIMEOUT_CODE: i32 = -1;

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    /// Backend error code.
    pub code: i32,
    /// Detail text for the page-level alert.
    pub message: String,
}

impl LookupFailure {
    /// Build a failure from a backend code and detail text.
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Failure used when a collaborator call exceeded its deadline.
    #[must_use]
    pub fn timeout() -> Self {
        Self {
            code: LOOKUP_TIMEOUT_CODE,
            message: "deadline exceeded".to_string(),
        }
    }
}

/// Lexical validator for volume identifiers.
pub trait VolumeIdValidator: Send + Sync {
    /// Whether `candidate` is a lexically valid volume identifier.
    fn is_valid(&self, candidate: &str) -> bool;
}

/// Localized message lookup keyed by message id with positional arguments.
pub trait MessageCatalog: Send + Sync {
    /// Resolve `key`, substituting positional arguments.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's failure when the key cannot be resolved.
    fn resolve(&self, key: &str, args: &[&str]) -> Result<String, LookupFailure>;
}

/// Display-label table for media families.
pub trait MediaLabels: Send + Sync {
    /// Resolve the display label for `media`.
    ///
    /// # Errors
    ///
    /// Returns the collaborator's failure when no label is known.
    fn label(&self, media: MediaType) -> Result<String, LookupFailure>;
}

/// Backend enumeration used to populate wizard selection lists.
#[async_trait]
pub trait SelectionSource: Send + Sync {
    /// Archive file systems the policy can apply to.
    ///
    /// # Errors
    ///
    /// Returns the backend failure when enumeration is unavailable.
    async fn archive_file_systems(&self) -> Result<Vec<String>, LookupFailure>;

    /// Volume pools compatible with `media`.
    ///
    /// # Errors
    ///
    /// Returns the backend failure when enumeration is unavailable.
    async fn pools(&self, media: MediaType) -> Result<Vec<String>, LookupFailure>;

    /// Media families currently attached to the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend failure when enumeration is unavailable.
    async fn media_types(&self) -> Result<Vec<MediaType>, LookupFailure>;
}

/// Volume-id rule for ANSI-labelled removable media: at most six characters,
/// each a digit, an uppercase letter, or one of the label punctuation marks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiLabelRule;

impl AnsiLabelRule {
    const fn is_label_char(c: char) -> bool {
        c.is_ascii_digit()
            || c.is_ascii_uppercase()
            || matches!(
                c,
                '!' | '"'
                    | '%'
                    | '&'
                    | '\''
                    | '('
                    | ')'
                    | '*'
                    | '+'
                    | ','
                    | '-'
                    | '.'
                    | '/'
                    | ':'
                    | ';'
                    | '<'
                    | '='
                    | '>'
                    | '?'
                    | '_'
            )
    }
}

impl VolumeIdValidator for AnsiLabelRule {
    fn is_valid(&self, candidate: &str) -> bool {
        let trimmed = candidate.trim();
        !trimmed.is_empty()
            && trimmed.len() <= 6
            && trimmed.chars().all(Self::is_label_char)
    }
}
