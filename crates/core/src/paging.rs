//! Paging and sorting primitives for list endpoints.
//!
//! List endpoints answer with `{ content: [...], page: { size, number,
//! totalElements, totalPages } }` and accept `page`, `size` and an optional
//! `sort=field,direction` query parameter.

use serde::{Deserialize, Serialize};

/// Page metadata as returned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub size: u32,
    pub number: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl PageInfo {
    /// Whether `number` is the last available page (or there are no pages).
    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.number + 1 >= self.total_pages
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageInfo,
}

impl<T> Page<T> {
    pub fn empty(size: u32) -> Self {
        Self {
            content: Vec::new(),
            page: PageInfo {
                size,
                ..PageInfo::default()
            },
        }
    }

    pub fn total_elements(&self) -> u64 {
        self.page.total_elements
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A single active sort key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Value of the `sort` query parameter (`field,direction`).
    pub fn to_param(&self) -> String {
        format!("{},{}", self.field, self.direction.as_str())
    }
}

/// Sort state of a list: at most one active field.
///
/// Clicking the same field cycles `unsorted -> asc -> desc -> unsorted`;
/// clicking a different field always starts at `asc`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState(Option<SortSpec>);

impl SortState {
    pub fn unsorted() -> Self {
        Self(None)
    }

    pub fn from_spec(spec: SortSpec) -> Self {
        Self(Some(spec))
    }

    pub fn spec(&self) -> Option<&SortSpec> {
        self.0.as_ref()
    }

    /// Direction for `field`, if it is the active sort field.
    pub fn direction_of(&self, field: &str) -> Option<SortDirection> {
        self.0
            .as_ref()
            .filter(|s| s.field == field)
            .map(|s| s.direction)
    }

    /// Apply a click on `field` and return the new state.
    pub fn cycle(&self, field: &str) -> Self {
        match &self.0 {
            Some(spec) if spec.field == field => match spec.direction {
                SortDirection::Asc => Self(Some(SortSpec::desc(field))),
                SortDirection::Desc => Self(None),
            },
            _ => Self(Some(SortSpec::asc(field))),
        }
    }
}

/// Page index + size + sort, as sent to a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Option<SortSpec>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: None,
        }
    }

    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        if let Some(sort) = &self.sort {
            params.push(("sort".to_string(), sort.to_param()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_page() {
        let json = serde_json::json!({
            "content": [1, 2, 3],
            "page": { "size": 3, "number": 0, "totalElements": 7, "totalPages": 3 }
        });
        let page: Page<i32> = serde_json::from_value(json).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements(), 7);
        assert!(!page.page.is_last());
    }

    #[test]
    fn empty_page_is_last() {
        assert!(Page::<i32>::empty(10).page.is_last());
    }

    #[test]
    fn query_params_include_sort_only_when_active() {
        let plain = PageRequest::new(2, 20).to_query_params();
        assert_eq!(
            plain,
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "20".to_string())
            ]
        );

        let sorted = PageRequest::new(0, 10)
            .with_sort(Some(SortSpec::desc("deliveryDate")))
            .to_query_params();
        assert_eq!(sorted[2], ("sort".to_string(), "deliveryDate,desc".to_string()));
    }

    #[test]
    fn same_field_cycles_through_three_states() {
        let s0 = SortState::unsorted();
        let s1 = s0.cycle("code");
        assert_eq!(s1.direction_of("code"), Some(SortDirection::Asc));
        let s2 = s1.cycle("code");
        assert_eq!(s2.direction_of("code"), Some(SortDirection::Desc));
        let s3 = s2.cycle("code");
        assert_eq!(s3, SortState::unsorted());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn field() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("code".to_string()),
                Just("status".to_string()),
                Just("deliveryDate".to_string()),
                Just("clientName".to_string()),
            ]
        }

        proptest! {
            /// Property: three clicks on the same column return to unsorted,
            /// whatever came before.
            #[test]
            fn three_clicks_reset(history in proptest::collection::vec(field(), 0..12), target in field()) {
                let mut state = SortState::unsorted();
                for f in &history {
                    state = state.cycle(f);
                }
                // Normalise to "target not active" first.
                while state.direction_of(&target).is_some() {
                    state = state.cycle(&target);
                }
                let after = state.cycle(&target).cycle(&target).cycle(&target);
                prop_assert!(after.direction_of(&target).is_none());
                prop_assert_eq!(after, SortState::unsorted());
            }

            /// Property: a click on a different column always starts ascending.
            #[test]
            fn other_column_starts_ascending(first in field(), second in field(), clicks in 1usize..3) {
                prop_assume!(first != second);
                let mut state = SortState::unsorted();
                for _ in 0..clicks {
                    state = state.cycle(&first);
                }
                let next = state.cycle(&second);
                prop_assert_eq!(next.direction_of(&second), Some(SortDirection::Asc));
                prop_assert!(next.direction_of(&first).is_none());
            }
        }
    }
}
