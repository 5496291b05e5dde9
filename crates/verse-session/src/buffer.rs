//! Buffer Store: the named in-memory files of one editing session.
//!
//! Invariants:
//! - buffer names are unique
//! - at most one buffer is selected
//! - once loaded, the store never drops to zero buffers
//!
//! Names are normalized once, at creation, by appending the session
//! language's extension when missing. Renames are taken verbatim.

use verse_core::Language;

use crate::error::BufferError;

/// One named file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    name: String,
    content: String,
}

impl Buffer {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferStore {
    language: Language,
    /// Insertion order.
    buffers: Vec<Buffer>,
    selected: Option<String>,
}

impl BufferStore {
    /// An empty store. Call [`load`](Self::load) before editing.
    #[must_use]
    pub const fn new(language: Language) -> Self {
        Self {
            language,
            buffers: Vec::new(),
            selected: None,
        }
    }

    /// Reset to a single selected buffer.
    pub fn load(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        self.buffers = vec![Buffer {
            name: name.clone(),
            content: content.into(),
        }];
        self.selected = Some(name);
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn file_names(&self) -> Vec<&str> {
        self.buffers.iter().map(Buffer::name).collect()
    }

    #[must_use]
    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    #[must_use]
    pub fn content(&self, name: &str) -> Option<&str> {
        self.find(name).map(|i| self.buffers[i].content.as_str())
    }

    /// Content of the selected buffer, or `""` when nothing is selected.
    #[must_use]
    pub fn current_content(&self) -> &str {
        self.selected
            .as_deref()
            .and_then(|name| self.content(name))
            .unwrap_or_default()
    }

    /// Create an empty buffer and return its normalized name.
    ///
    /// Selection only moves to the new buffer when the store was empty.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidName`] for blank names or a bare extension,
    /// [`BufferError::DuplicateName`] if the normalized name is taken.
    pub fn add_file(&mut self, name: &str) -> Result<String, BufferError> {
        let trimmed = validate_name(name)?;
        if trimmed == self.language.extension() {
            return Err(BufferError::InvalidName {
                name: name.to_string(),
            });
        }
        let normalized = self.language.normalize_file_name(trimmed);
        if self.find(&normalized).is_some() {
            return Err(BufferError::DuplicateName { name: normalized });
        }

        self.buffers.push(Buffer {
            name: normalized.clone(),
            content: String::new(),
        });
        if self.selected.is_none() {
            self.selected = Some(normalized.clone());
        }
        tracing::trace!(file = %normalized, "buffer added");
        Ok(normalized)
    }

    /// Remove a buffer.
    ///
    /// # Errors
    ///
    /// [`BufferError::UnknownFile`], [`BufferError::CannotDeleteLast`] for the
    /// sole buffer, [`BufferError::CannotDeleteActive`] for the selected one.
    /// The store is unchanged on error.
    pub fn delete_file(&mut self, name: &str) -> Result<(), BufferError> {
        let index = self.index_of(name)?;
        if self.buffers.len() == 1 {
            return Err(BufferError::CannotDeleteLast {
                name: name.to_string(),
            });
        }
        if self.selected.as_deref() == Some(name) {
            return Err(BufferError::CannotDeleteActive {
                name: name.to_string(),
            });
        }

        self.buffers.remove(index);
        if self.selected.as_deref() == Some(name) {
            self.selected = self.buffers.first().map(|b| b.name.clone());
        }
        tracing::trace!(file = name, "buffer deleted");
        Ok(())
    }

    /// Rename a buffer. The new name is used verbatim; selection follows.
    ///
    /// # Errors
    ///
    /// [`BufferError::UnknownFile`], [`BufferError::InvalidName`], or
    /// [`BufferError::DuplicateName`].
    pub fn rename_file(&mut self, from: &str, to: &str) -> Result<(), BufferError> {
        let index = self.index_of(from)?;
        let to = validate_name(to)?;
        if to == from {
            return Ok(());
        }
        if self.find(to).is_some() {
            return Err(BufferError::DuplicateName {
                name: to.to_string(),
            });
        }

        to.clone_into(&mut self.buffers[index].name);
        if self.selected.as_deref() == Some(from) {
            self.selected = Some(to.to_string());
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`BufferError::UnknownFile`] if `name` is absent.
    pub fn select(&mut self, name: &str) -> Result<(), BufferError> {
        self.index_of(name)?;
        self.selected = Some(name.to_string());
        Ok(())
    }

    /// Replace a buffer's text. The text itself is not validated.
    ///
    /// # Errors
    ///
    /// [`BufferError::UnknownFile`] if `name` is absent.
    pub fn set_content(&mut self, name: &str, text: impl Into<String>) -> Result<(), BufferError> {
        let index = self.index_of(name)?;
        self.buffers[index].content = text.into();
        Ok(())
    }

    /// Replace the selected buffer's text.
    ///
    /// # Errors
    ///
    /// [`BufferError::NoSelection`] before the store is loaded.
    pub fn set_current_content(&mut self, text: impl Into<String>) -> Result<(), BufferError> {
        let name = self.selected.clone().ok_or(BufferError::NoSelection)?;
        self.set_content(&name, text)
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.buffers.iter().position(|b| b.name == name)
    }

    fn index_of(&self, name: &str) -> Result<usize, BufferError> {
        self.find(name).ok_or_else(|| BufferError::UnknownFile {
            name: name.to_string(),
        })
    }
}

fn validate_name(name: &str) -> Result<&str, BufferError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
        return Err(BufferError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(trimmed)
}
