use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::DomainResult;
use crate::filter::{ListFilter, QueryParams};
use crate::id::ProductId;

/// Product (SKU) record. The id is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Label used by search widgets and table cells.
    pub fn label(&self) -> String {
        if self.description.is_empty() {
            self.code.clone()
        } else {
            format!("{} - {}", self.code, self.description)
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
}

impl ListFilter for ProductFilter {
    fn to_query_params(&self) -> DomainResult<Vec<(String, String)>> {
        Ok(QueryParams::new()
            .text("search", self.search.as_deref())
            .finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_to_code() {
        let mut p = Product {
            id: ProductId::new(1),
            code: "SKU-9".into(),
            description: String::new(),
        };
        assert_eq!(p.label(), "SKU-9");
        p.description = "Bolt".into();
        assert_eq!(p.label(), "SKU-9 - Bolt");
    }
}
