//! Central type registry.
//!
//! The [`TypeRegistry`] owns every type declared through it and issues the tokens of types,
//! members and attributes.
//!
//! # Registry Architecture
//!
//! - **Token-based lookup**: Primary index using metadata tokens
//! - **Name-based lookup**: Secondary indices for full names and namespaces
//!
//! # Thread Safety
//!
//! - Lock-free data structures for primary storage (`SkipMap`)
//! - Concurrent hash maps for indices (`DashMap`)
//! - Atomic operations for token generation

use std::sync::atomic::{AtomicU32, Ordering};

use crossbeam_skiplist::SkipMap;
use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    metadata::{
        token::{TableId, Token, MAX_ROW},
        typesystem::{TypeBuilder, TypeRc},
    },
    Error, Result,
};

/// Owns registered types and indexes them by token, full name and namespace
pub struct TypeRegistry {
    /// Primary type storage indexed by metadata tokens
    types: SkipMap<Token, TypeRc>,
    /// Secondary index: types indexed by full name
    types_by_fullname: DashMap<String, Token>,
    /// Secondary index: types grouped by namespace
    types_by_namespace: DashMap<String, Vec<Token>>,
    next_type: AtomicU32,
    next_field: AtomicU32,
    next_method: AtomicU32,
    next_property: AtomicU32,
    next_attribute: AtomicU32,
}

impl TypeRegistry {
    /// Create a new, empty registry
    #[must_use]
    pub fn new() -> Self {
        TypeRegistry {
            types: SkipMap::new(),
            types_by_fullname: DashMap::new(),
            types_by_namespace: DashMap::new(),
            next_type: AtomicU32::new(1),
            next_field: AtomicU32::new(1),
            next_method: AtomicU32::new(1),
            next_property: AtomicU32::new(1),
            next_attribute: AtomicU32::new(1),
        }
    }

    /// Start declaring a new type
    #[must_use]
    pub fn builder(&self, namespace: &str, name: &str) -> TypeBuilder<'_> {
        TypeBuilder::new(self, namespace, name)
    }

    /// Issue the next token of `table`.
    ///
    /// # Errors
    /// Returns [`Error::TokenOverflow`] once every row of `table` has been issued.
    pub fn next_token(&self, table: TableId) -> Result<Token> {
        let counter = match table {
            TableId::TypeDef => &self.next_type,
            TableId::Field => &self.next_field,
            TableId::MethodDef => &self.next_method,
            TableId::Property => &self.next_property,
            TableId::CustomAttribute => &self.next_attribute,
        };

        let row = counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |row| {
                row.checked_add(1).filter(|_| row <= MAX_ROW)
            })
            .map_err(|_| Error::TokenOverflow(table))?;

        Ok(Token::from_parts(table, row))
    }

    /// Register a type.
    ///
    /// # Errors
    /// Returns [`Error::TypeInsert`] if a type with the same full name is already registered.
    pub fn insert(&self, new_type: &TypeRc) -> Result<()> {
        match self.types_by_fullname.entry(new_type.full_name()) {
            Entry::Occupied(_) => return Err(Error::TypeInsert(new_type.token)),
            Entry::Vacant(entry) => {
                entry.insert(new_type.token);
            }
        }

        self.types.insert(new_type.token, new_type.clone());
        self.types_by_namespace
            .entry(new_type.namespace.clone())
            .or_default()
            .push(new_type.token);

        Ok(())
    }

    /// Look up a type by its metadata token
    #[must_use]
    pub fn get(&self, token: &Token) -> Option<TypeRc> {
        self.types.get(token).map(|entry| entry.value().clone())
    }

    /// Look up a type by its full name
    #[must_use]
    pub fn get_by_fullname(&self, fullname: &str) -> Option<TypeRc> {
        let token = *self.types_by_fullname.get(fullname)?;
        self.get(&token)
    }

    /// All types declared directly in `namespace`, in registration order
    #[must_use]
    pub fn get_by_namespace(&self, namespace: &str) -> Vec<TypeRc> {
        if let Some(tokens) = self.types_by_namespace.get(namespace) {
            tokens
                .iter()
                .filter_map(|token| self.get(token))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Count of types in the registry
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Get all types in the registry, ordered by token
    #[must_use]
    pub fn all_types(&self) -> Vec<TypeRc> {
        self.types
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
