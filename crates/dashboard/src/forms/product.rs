use smp_core::{DomainError, Product, ProductDraft};

use super::{EntityForm, FormMode, required};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub code: String,
    pub description: String,
}

impl EntityForm for ProductForm {
    type Entity = Product;
    const LIST_PATH: &'static str = "/products";

    fn seed_from(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            description: product.description.clone(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<ProductDraft, DomainError> {
        Ok(ProductDraft {
            code: required("code", &self.code, "Code")?,
            description: required("description", &self.description, "Description")?,
        })
    }
}
