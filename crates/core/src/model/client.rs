use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::DomainResult;
use crate::filter::{ListFilter, QueryParams};
use crate::id::ClientId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> ClientId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientFilter {
    pub name: Option<String>,
}

impl ListFilter for ClientFilter {
    fn to_query_params(&self) -> DomainResult<Vec<(String, String)>> {
        Ok(QueryParams::new().text("name", self.name.as_deref()).finish())
    }
}
