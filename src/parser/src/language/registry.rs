//! A process-wide collection of named languages.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use thiserror::Error;

use super::{validate, LanguageBuilder, LanguageDefinition, ValidationError};
use crate::{
    options::ParseOptions,
    result::{ParseCallError, ParseExpressionResult},
};

/// Why a language couldn't be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("a language named '{0}' is already registered")]
    Duplicate(String),
}

/// Languages by name.
///
/// Registration validates the definition, so everything in a registry is
/// known to be usable. The registry can be shared between threads, and
/// languages handed out are shared too.
#[derive(Debug, Default)]
pub struct LanguageRegistry {
    languages: RwLock<HashMap<String, Arc<LanguageDefinition>>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        LanguageRegistry::default()
    }

    /// Build and register a language.
    pub fn register(
        &self,
        builder: LanguageBuilder,
    ) -> Result<Arc<LanguageDefinition>, RegistryError> {
        self.register_definition(builder.build()?)
    }

    /// Register an already built language. It's validated again, as it may
    /// have come from somewhere else.
    pub fn register_definition(
        &self,
        language: LanguageDefinition,
    ) -> Result<Arc<LanguageDefinition>, RegistryError> {
        validate(&language)?;

        let mut languages = self
            .languages
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if languages.contains_key(language.name()) {
            return Err(RegistryError::Duplicate(language.name().to_string()));
        }

        let language = Arc::new(language);
        languages.insert(language.name().to_string(), Arc::clone(&language));
        tracing::debug!(language = %language.name(), "language registered");

        Ok(language)
    }

    pub fn get(&self, name: &str) -> Option<Arc<LanguageDefinition>> {
        self.languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// The names of every registered language, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    fn language(&self, name: &str) -> Result<Arc<LanguageDefinition>, ParseCallError> {
        self.get(name)
            .ok_or_else(|| ParseCallError::UnknownLanguage(name.to_string()))
    }

    /// Parse `text` with the language called `name`.
    pub fn parse_expression<'t>(
        &self,
        name: &str,
        text: &'t str,
        options: &ParseOptions,
    ) -> Result<ParseExpressionResult<'t>, ParseCallError> {
        crate::parse_expression(&*self.language(name)?, text, options)
    }

    /// Parse a single braces expression with the language called `name`.
    pub fn parse_braces_expression<'t>(
        &self,
        name: &str,
        text: &'t str,
        options: &ParseOptions,
    ) -> Result<ParseExpressionResult<'t>, ParseCallError> {
        crate::parse_braces_expression(&*self.language(name)?, text, options)
    }

    /// Parse a single code block with the language called `name`.
    pub fn parse_code_block_expression<'t>(
        &self,
        name: &str,
        text: &'t str,
        options: &ParseOptions,
    ) -> Result<ParseExpressionResult<'t>, ParseCallError> {
        crate::parse_code_block_expression(&*self.language(name)?, text, options)
    }
}
