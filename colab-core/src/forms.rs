//! API settings form with unsaved-change tracking.
//!
//! Each field is stored as its own plain string under `colab.api.<field>`.

use crate::store::{PreferenceStore, StoreError};

/// Store key prefix for API settings fields.
const API_KEY_PREFIX: &str = "colab.api.";

/// Message shown after a successful save.
pub const SAVED_MESSAGE: &str = "API Settings Saved (mock)!";

/// Fields of the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiField {
    Endpoint,
    ApiKey,
    DefaultModel,
}

impl ApiField {
    /// Get all fields in display order.
    pub fn all() -> &'static [ApiField] {
        &[Self::Endpoint, Self::ApiKey, Self::DefaultModel]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Endpoint => "api_endpoint",
            Self::ApiKey => "api_key",
            Self::DefaultModel => "default_model",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Endpoint => "API Endpoint",
            Self::ApiKey => "API Key",
            Self::DefaultModel => "Default Model",
        }
    }

    /// Whether the field should be masked when shown.
    pub fn is_secret(self) -> bool {
        matches!(self, Self::ApiKey)
    }

    fn store_key(self) -> String {
        format!("{API_KEY_PREFIX}{}", self.name())
    }

    fn index(self) -> usize {
        match self {
            Self::Endpoint => 0,
            Self::ApiKey => 1,
            Self::DefaultModel => 2,
        }
    }
}

/// Editable copy of the API settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiSettingsForm {
    values: [String; 3],
    dirty: bool,
}

impl ApiSettingsForm {
    /// Load the form from the store. Missing fields are empty.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let mut form = Self::default();
        form.reload(store);
        form
    }

    pub fn value(&self, field: ApiField) -> &str {
        &self.values[field.index()]
    }

    /// Set a field. Only an actual change marks the form dirty.
    pub fn edit(&mut self, field: ApiField, value: &str) {
        let slot = &mut self.values[field.index()];
        if slot != value {
            *slot = value.to_string();
            self.dirty = true;
        }
    }

    /// Whether there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persist every field and clear the dirty flag.
    pub fn save(&mut self, store: &dyn PreferenceStore) -> Result<&'static str, StoreError> {
        for field in ApiField::all() {
            store.set(&field.store_key(), self.value(*field))?;
        }
        self.dirty = false;
        tracing::info!("API settings saved");
        Ok(SAVED_MESSAGE)
    }

    /// Throw away edits and reload from the store.
    pub fn discard(&mut self, store: &dyn PreferenceStore) {
        self.reload(store);
    }

    fn reload(&mut self, store: &dyn PreferenceStore) {
        for field in ApiField::all() {
            self.values[field.index()] = match store.get(&field.store_key()) {
                Ok(value) => value.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!(field = field.name(), error = %e, "Failed to load API setting");
                    String::new()
                }
            };
        }
        self.dirty = false;
    }
}
