use core::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::filter::{ListFilter, QueryParams};
use crate::id::{ClientId, OrderId, ProductId};
use crate::value_object::ValueObject;

/// Number of digits after the `OP-` prefix.
pub const ORDER_CODE_DIGITS: usize = 7;
const ORDER_CODE_PREFIX: &str = "OP-";

// ─────────────────────────────────────────────────────────────────────────────
// Order code
// ─────────────────────────────────────────────────────────────────────────────

/// Human-facing production order identifier, always `OP-` + 7 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderCode(String);

impl ValueObject for OrderCode {}

impl OrderCode {
    /// Normalise raw input (`"123"`, `"op123"`, `" OP-0000123 "`) into the
    /// canonical `OP-0000123` form.
    pub fn normalize(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        let upper = trimmed.to_ascii_uppercase();
        let digits = upper
            .strip_prefix("OP")
            .map(|rest| rest.strip_prefix('-').unwrap_or(rest))
            .unwrap_or(&upper);

        if digits.is_empty() {
            return Err(DomainError::validation("code", "order code is required"));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation(
                "code",
                format!("order code must be numeric: {trimmed}"),
            ));
        }
        if digits.len() > ORDER_CODE_DIGITS {
            return Err(DomainError::validation(
                "code",
                format!("order code has more than {ORDER_CODE_DIGITS} digits"),
            ));
        }

        Ok(Self(format!(
            "{ORDER_CODE_PREFIX}{digits:0>width$}",
            width = ORDER_CODE_DIGITS
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix without padding.
    pub fn number(&self) -> u32 {
        self.0[ORDER_CODE_PREFIX.len()..].parse().unwrap_or(0)
    }
}

impl core::fmt::Display for OrderCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OrderCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Order status
// ─────────────────────────────────────────────────────────────────────────────

/// Order lifecycle status. Transitions are owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Released,
    Started,
    Finished,
    Stopped,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Released,
        OrderStatus::Started,
        OrderStatus::Finished,
        OrderStatus::Stopped,
        OrderStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Released => "RELEASED",
            OrderStatus::Started => "STARTED",
            OrderStatus::Finished => "FINISHED",
            OrderStatus::Stopped => "STOPPED",
            OrderStatus::Canceled => "CANCELED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Released => "Released",
            OrderStatus::Started => "Started",
            OrderStatus::Finished => "Finished",
            OrderStatus::Stopped => "Stopped",
            OrderStatus::Canceled => "Canceled",
        }
    }

    /// Finished and canceled orders accept no more production.
    pub fn is_closed(&self) -> bool {
        matches!(self, OrderStatus::Finished | OrderStatus::Canceled)
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        OrderStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == upper)
            .ok_or_else(|| DomainError::unknown_variant(format!("order status {s}")))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Order
// ─────────────────────────────────────────────────────────────────────────────

/// Production order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub code: OrderCode,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub product_description: Option<String>,
    pub total_quantity: i64,
    #[serde(default)]
    pub produced_quantity: i64,
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    pub status: OrderStatus,
}

impl Order {
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.produced_quantity, self.total_quantity)
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

/// Production progress as a percentage in `[0, 100]`.
///
/// A zero or negative total yields 0; over-production is capped at 100.
pub fn progress_percent(produced: i64, total: i64) -> f64 {
    if total <= 0 || produced <= 0 {
        return 0.0;
    }
    ((produced as f64 / total as f64) * 100.0).min(100.0)
}

/// Create/update payload for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub code: OrderCode,
    pub client_id: ClientId,
    pub product_id: ProductId,
    pub total_quantity: i64,
    pub produced_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

/// Filters of the orders list screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderFilter {
    /// Free text matched against code, client and product.
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    pub client_id: Option<ClientId>,
    pub delivery_from: Option<NaiveDate>,
    pub delivery_to: Option<NaiveDate>,
}

impl ListFilter for OrderFilter {
    fn to_query_params(&self) -> DomainResult<Vec<(String, String)>> {
        if let (Some(from), Some(to)) = (self.delivery_from, self.delivery_to) {
            if from > to {
                return Err(DomainError::validation(
                    "deliveryFrom",
                    "delivery range start is after its end",
                ));
            }
        }
        Ok(QueryParams::new()
            .text("search", self.search.as_deref())
            .opt("status", self.status)
            .opt("clientId", self.client_id)
            .opt("deliveryFrom", self.delivery_from)
            .opt("deliveryTo", self.delivery_to)
            .finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_is_padded() {
        assert_eq!(OrderCode::normalize("123").unwrap().as_str(), "OP-0000123");
    }

    #[test]
    fn prefix_variants_are_accepted() {
        for raw in ["op123", "OP-123", " Op-0000123 ", "OP0000123"] {
            assert_eq!(OrderCode::normalize(raw).unwrap().as_str(), "OP-0000123", "{raw}");
        }
    }

    #[test]
    fn rejects_non_numeric_and_overlong() {
        assert!(OrderCode::normalize("").is_err());
        assert!(OrderCode::normalize("OP-").is_err());
        assert!(OrderCode::normalize("12a").is_err());
        let err = OrderCode::normalize("12345678").unwrap_err();
        assert_eq!(err.field(), Some("code"));
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_percent(50, 200), 25.0);
        assert_eq!(progress_percent(300, 200), 100.0);
        assert_eq!(progress_percent(10, 0), 0.0);
        assert_eq!(progress_percent(-5, 10), 0.0);
    }

    #[test]
    fn deserializes_backend_order() {
        let json = serde_json::json!({
            "id": 9,
            "code": "OP-0000042",
            "clientId": 1,
            "clientName": "Acme",
            "productId": 2,
            "productCode": "SKU-1",
            "productDescription": "Widget",
            "totalQuantity": 100,
            "producedQuantity": 40,
            "deliveryDate": "2026-11-02",
            "status": "STARTED"
        });
        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.status, OrderStatus::Started);
        assert_eq!(order.code.number(), 42);
        assert_eq!(order.progress_percent(), 40.0);
    }

    #[test]
    fn filter_rejects_inverted_range() {
        let filter = OrderFilter {
            delivery_from: NaiveDate::from_ymd_opt(2026, 5, 2),
            delivery_to: NaiveDate::from_ymd_opt(2026, 5, 1),
            ..Default::default()
        };
        assert!(filter.to_query_params().is_err());
    }

    #[test]
    fn filter_maps_to_params() {
        let filter = OrderFilter {
            search: Some("acme".into()),
            status: Some(OrderStatus::Released),
            client_id: Some(ClientId::new(4)),
            ..Default::default()
        };
        let params = filter.to_query_params().unwrap();
        assert_eq!(
            params,
            vec![
                ("search".to_string(), "acme".to_string()),
                ("status".to_string(), "RELEASED".to_string()),
                ("clientId".to_string(), "4".to_string()),
            ]
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any 1..=7 digit input normalises to a code that
            /// normalises to itself.
            #[test]
            fn normalize_is_idempotent(n in 0u32..10_000_000) {
                let code = OrderCode::normalize(&n.to_string()).unwrap();
                prop_assert_eq!(code.as_str().len(), 3 + ORDER_CODE_DIGITS);
                prop_assert_eq!(code.number(), n);
                prop_assert_eq!(OrderCode::normalize(code.as_str()).unwrap(), code);
            }
        }
    }
}
