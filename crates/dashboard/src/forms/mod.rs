//! Create/edit forms.
//!
//! A form holds raw field state, seeded from a fetched entity or defaults.
//! `validate` turns it into a draft or a [`DomainError`] before any network
//! call; [`FormController::submit`] performs the single mutation.

mod binding;
mod client;
mod order;
mod product;
mod user;

use std::str::FromStr;
use std::sync::Arc;

use smp_client::{ApiError, Navigator, Resource, ResourceService};
use smp_core::{DomainError, Entity, Severity};
use smp_notify::{FlashMessage, Notifier};

pub use binding::BindingForm;
pub use client::ClientForm;
pub use order::OrderForm;
pub use product::ProductForm;
pub use user::UserForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Field state of one entity's form.
pub trait EntityForm: Default + Clone + Send + Sync {
    type Entity: Resource + Clone;

    /// List screen shown after a successful save.
    const LIST_PATH: &'static str;

    fn seed_from(entity: &Self::Entity) -> Self;

    fn validate(&self, mode: FormMode) -> Result<<Self::Entity as Resource>::Draft, DomainError>;
}

type IdOf<F> = <<F as EntityForm>::Entity as Entity>::Id;

/// Outcome of opening an edit form from a route parameter.
pub enum FormLoad<F: EntityForm> {
    Ready(FormController<F>),
    /// Malformed id or the entity could not be fetched.
    NotFound,
}

/// Drives one form: validation toasts, the mutation, the navigation.
pub struct FormController<F: EntityForm> {
    pub form: F,
    editing: Option<IdOf<F>>,
    service: ResourceService<F::Entity>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    submitting: bool,
}

impl<F: EntityForm> FormController<F> {
    pub fn create(service: ResourceService<F::Entity>) -> Self {
        let notifier = service.api().notifier().clone();
        let navigator = service.api().navigator().clone();
        Self {
            form: F::default(),
            editing: None,
            service,
            notifier,
            navigator,
            submitting: false,
        }
    }

    /// Open the edit form for the raw route segment `raw_id`.
    pub async fn open_edit(service: ResourceService<F::Entity>, raw_id: &str) -> FormLoad<F>
    where
        IdOf<F>: FromStr,
    {
        let Ok(id) = raw_id.parse::<IdOf<F>>() else {
            tracing::warn!(raw_id, resource = F::Entity::NAME, "malformed id in route");
            return FormLoad::NotFound;
        };
        match service.get(id).await {
            Ok(entity) => {
                let mut ctl = Self::create(service);
                ctl.form = F::seed_from(&entity);
                ctl.editing = Some(id);
                FormLoad::Ready(ctl)
            }
            Err(e) => {
                tracing::debug!(error = %e, "edit target unavailable");
                FormLoad::NotFound
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.editing.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate, save, and go back to the list.
    ///
    /// On any failure the field state is left as typed.
    pub async fn submit(&mut self) -> Result<F::Entity, ApiError> {
        let draft = match self.form.validate(self.mode()) {
            Ok(draft) => draft,
            Err(e) => {
                self.notifier.notify(&e.user_message(), Severity::Warning);
                return Err(e.into());
            }
        };

        self.submitting = true;
        let saved = match self.editing {
            None => self.service.create_then_navigate(&draft).await,
            Some(id) => self.service.update_then_navigate(id, &draft).await,
        };
        self.submitting = false;
        let saved = saved?;

        let flash = self.service.api().flash();
        if !flash.is_staged() {
            let verb = match self.mode() {
                FormMode::Create => "created",
                FormMode::Edit => "updated",
            };
            flash.stage(&FlashMessage::new(
                format!("{} {verb}", capitalize(F::Entity::NAME)),
                Severity::Success,
            ));
        }
        self.navigator.navigate(F::LIST_PATH);
        Ok(saved)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Trimmed text, or a validation error naming `field`.
pub(crate) fn required(field: &str, value: &str, label: &str) -> Result<String, DomainError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(DomainError::validation(field, format!("{label} is required")));
    }
    Ok(v.to_string())
}

/// Parse a non-negative whole number typed into a field.
pub(crate) fn quantity(field: &str, value: &str, label: &str) -> Result<i64, DomainError> {
    let n: i64 = value
        .trim()
        .parse()
        .map_err(|_| DomainError::validation(field, format!("{label} must be a whole number")))?;
    if n < 0 {
        return Err(DomainError::validation(field, format!("{label} cannot be negative")));
    }
    Ok(n)
}
