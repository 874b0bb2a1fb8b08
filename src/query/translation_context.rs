use uuid::Uuid;

/// Per-request locale identity used to resolve translated content.
/// Supplied by the caller and immutable for the duration of one query
/// build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationContext {
    pub locale_id: Uuid,
    pub fallback_locale_id: Option<Uuid>,
}

impl TranslationContext {
    pub fn new(locale_id: Uuid) -> Self {
        Self { locale_id, fallback_locale_id: None }
    }

    pub fn with_fallback(locale_id: Uuid, fallback_locale_id: Uuid) -> Self {
        Self { locale_id, fallback_locale_id: Some(fallback_locale_id) }
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback_locale_id.is_some()
    }
}
