// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// One row of the product table. Quantity and SKU are kept as the strings the
/// user typed; nothing here parses them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub quantity: String,
    pub sku: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            sku: sku.into(),
        }
    }

    pub fn field(&self, field: ProductField) -> &str {
        match field {
            ProductField::Name => &self.name,
            ProductField::Sku => &self.sku,
            ProductField::Quantity => &self.quantity,
        }
    }

    /// Returns a copy with `field` replaced and every other field untouched.
    pub fn with_field(&self, field: ProductField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            ProductField::Name => next.name = value,
            ProductField::Sku => next.sku = value,
            ProductField::Quantity => next.quantity = value,
        }
        next
    }

    /// Case-insensitive substring match against every field. `needle` must
    /// already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        ProductField::ALL
            .iter()
            .any(|field| self.field(*field).to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductField {
    Name,
    Sku,
    Quantity,
}

impl ProductField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Sku, Self::Quantity];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Sku => "sku",
            Self::Quantity => "quantity",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "sku" => Some(Self::Sku),
            "quantity" => Some(Self::Quantity),
            _ => None,
        }
    }

    pub const fn header(self) -> &'static str {
        match self {
            Self::Name => "Nombre del Producto",
            Self::Sku => "SKU",
            Self::Quantity => "Cantidad",
        }
    }

    pub const fn column(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Sku => 1,
            Self::Quantity => 2,
        }
    }

    pub fn from_column(column: usize) -> Option<Self> {
        Self::ALL.get(column).copied()
    }
}
