use smp_core::{Client, ClientDraft, DomainError};

use super::{EntityForm, FormMode, required};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
}

impl EntityForm for ClientForm {
    type Entity = Client;
    const LIST_PATH: &'static str = "/clients";

    fn seed_from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<ClientDraft, DomainError> {
        Ok(ClientDraft {
            name: required("name", &self.name, "Name")?,
        })
    }
}
