use chrono::NaiveDate;
use smp_core::{
    Client, DomainError, Order, OrderCode, OrderDraft, OrderStatus, Product, progress_percent,
};

use super::{EntityForm, FormMode, quantity};

/// Order create/edit form.
///
/// Client and product come from search widgets as full objects; the form
/// submits only their ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderForm {
    pub code: String,
    pub client: Option<Client>,
    pub product: Option<Product>,
    pub total_quantity: String,
    pub produced_quantity: String,
    pub delivery_date: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
}

impl OrderForm {
    /// Normalize the code field when it loses focus.
    ///
    /// An invalid code stays as typed and the error is returned for an
    /// inline message.
    pub fn blur_code(&mut self) -> Result<(), DomainError> {
        let code = OrderCode::normalize(&self.code)?;
        self.code = code.to_string();
        Ok(())
    }

    /// Progress from the current field values; unparsable input counts as 0.
    pub fn progress_percent(&self) -> f64 {
        let parse = |s: &str| s.trim().parse::<i64>().unwrap_or(0);
        progress_percent(parse(&self.produced_quantity), parse(&self.total_quantity))
    }

    /// Non-blocking hint: more produced than ordered.
    pub fn overproduction_warning(&self) -> Option<String> {
        let total = self.total_quantity.trim().parse::<i64>().ok()?;
        let produced = self.produced_quantity.trim().parse::<i64>().ok()?;
        (produced > total).then(|| format!("Produced quantity ({produced}) exceeds total ({total})"))
    }
}

impl EntityForm for OrderForm {
    type Entity = Order;
    const LIST_PATH: &'static str = "/orders";

    fn seed_from(order: &Order) -> Self {
        Self {
            code: order.code.to_string(),
            client: order.client_id.map(|id| Client {
                id,
                name: order.client_name.clone().unwrap_or_default(),
            }),
            product: order.product_id.map(|id| Product {
                id,
                code: order.product_code.clone().unwrap_or_default(),
                description: order.product_description.clone().unwrap_or_default(),
            }),
            total_quantity: order.total_quantity.to_string(),
            produced_quantity: order.produced_quantity.to_string(),
            delivery_date: order.delivery_date,
            status: Some(order.status),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<OrderDraft, DomainError> {
        let code = OrderCode::normalize(&self.code)?;
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| DomainError::validation("clientId", "Client is required"))?;
        let product = self
            .product
            .as_ref()
            .ok_or_else(|| DomainError::validation("productId", "Product is required"))?;
        let total_quantity = quantity("totalQuantity", &self.total_quantity, "Total quantity")?;
        if total_quantity == 0 {
            return Err(DomainError::validation(
                "totalQuantity",
                "Total quantity must be greater than zero",
            ));
        }
        let produced_quantity = if self.produced_quantity.trim().is_empty() {
            0
        } else {
            quantity("producedQuantity", &self.produced_quantity, "Produced quantity")?
        };

        Ok(OrderDraft {
            code,
            client_id: client.id,
            product_id: product.id,
            total_quantity,
            produced_quantity,
            delivery_date: self.delivery_date,
            status: self.status,
        })
    }
}
