use smp_core::{DomainError, Role, User, UserDraft, Username, is_plausible_email};

use super::{EntityForm, FormMode, required};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Blank on edit keeps the current password.
    pub password: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            username: String::new(),
            email: String::new(),
            role: Role::Operator,
            password: String::new(),
        }
    }
}

impl UserForm {
    /// Normalize the username field when it loses focus.
    pub fn blur_username(&mut self) -> Result<(), DomainError> {
        self.username = Username::normalize(&self.username)?.to_string();
        Ok(())
    }
}

impl EntityForm for UserForm {
    type Entity = User;
    const LIST_PATH: &'static str = "/users";

    fn seed_from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.to_string(),
            email: user.email.clone(),
            role: user.role,
            password: String::new(),
        }
    }

    fn validate(&self, mode: FormMode) -> Result<UserDraft, DomainError> {
        let first_name = required("firstName", &self.first_name, "First name")?;
        let last_name = required("lastName", &self.last_name, "Last name")?;
        let username = Username::normalize(&self.username)?;
        let email = required("email", &self.email, "E-mail")?;
        if !is_plausible_email(&email) {
            return Err(DomainError::validation("email", "E-mail address is not valid"));
        }

        let password = match (mode, self.password.is_empty()) {
            (FormMode::Create, true) => {
                return Err(DomainError::validation("password", "Password is required"));
            }
            (FormMode::Edit, true) => None,
            (_, false) if self.password.chars().count() < MIN_PASSWORD_LEN => {
                return Err(DomainError::validation(
                    "password",
                    format!("Password must have at least {MIN_PASSWORD_LEN} characters"),
                ));
            }
            (_, false) => Some(self.password.clone()),
        };

        Ok(UserDraft {
            first_name,
            last_name,
            username,
            email,
            role: self.role,
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> UserForm {
        UserForm {
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            username: " Ana.Silva ".into(),
            email: "ana@smp.io".into(),
            role: Role::Supervisor,
            password: "secret1".into(),
        }
    }

    #[test]
    fn username_is_normalized() {
        let mut f = form();
        f.blur_username().unwrap();
        assert_eq!(f.username, "ana.silva");
        assert_eq!(
            form().validate(FormMode::Create).unwrap().username.as_str(),
            "ana.silva"
        );
    }

    #[test]
    fn password_required_only_on_create() {
        let mut f = form();
        f.password.clear();
        assert_eq!(
            f.validate(FormMode::Create).unwrap_err().field(),
            Some("password")
        );
        assert_eq!(f.validate(FormMode::Edit).unwrap().password, None);

        f.password = "abc".into();
        assert!(f.validate(FormMode::Edit).is_err());
    }

    #[test]
    fn rejects_bad_email() {
        let mut f = form();
        f.email = "ana-at-smp".into();
        assert_eq!(
            f.validate(FormMode::Create).unwrap_err().field(),
            Some("email")
        );
    }
}
