//! Account registration service.

use super::model::Registration;
use crate::api::AccountApi;
use crate::error::{Result, ZerothError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email pattern is valid")
});

/// Creates accounts. Registration does not sign the user in.
#[derive(Clone)]
pub struct AccountService {
    api: Arc<dyn AccountApi>,
}

impl AccountService {
    pub fn new(api: Arc<dyn AccountApi>) -> Self {
        Self { api }
    }

    pub async fn register(&self, registration: &Registration) -> Result<()> {
        validate(registration)?;
        self.api.register(registration).await?;
        tracing::info!("[Account] Registered account '{}'", registration.screen_name);
        Ok(())
    }
}

/// Required-field and e-mail checks done before any request.
pub(crate) fn validate(registration: &Registration) -> Result<()> {
    let required = [
        ("name", &registration.user_name),
        ("account name", &registration.screen_name),
        ("password", &registration.password),
        ("prefecture", &registration.address),
        ("email", &registration.email),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ZerothError::validation(format!("{field} is required")));
    }
    if !EMAIL_PATTERN.is_match(&registration.email) {
        return Err(ZerothError::validation(
            "please enter a valid email address",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountSex;
    use crate::api::{ApiResult, BearerToken};
    use crate::session::{LoginGrant, UserIdentity};
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingAccountApi {
        registered: Mutex<Vec<Registration>>,
    }

    #[async_trait::async_trait]
    impl AccountApi for RecordingAccountApi {
        async fn register(&self, registration: &Registration) -> ApiResult<()> {
            self.registered.lock().unwrap().push(registration.clone());
            Ok(())
        }

        async fn login(&self, _email: &str, _password: &str) -> ApiResult<LoginGrant> {
            unreachable!("registration never logs in")
        }

        async fn me(&self, _token: &BearerToken) -> ApiResult<UserIdentity> {
            unreachable!("registration never refreshes identity")
        }
    }

    fn registration() -> Registration {
        Registration {
            user_name: "Hanako Yamada".into(),
            screen_name: "hanako".into(),
            password: "pw".into(),
            sex: AccountSex::Female,
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 1).unwrap(),
            address: "東京都".into(),
            email: "hanako@example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_register_sends_valid_form() {
        let api = Arc::new(RecordingAccountApi::default());
        let service = AccountService::new(api.clone());

        service.register(&registration()).await.unwrap();

        assert_eq!(api.registered.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_blank_field_without_request() {
        let api = Arc::new(RecordingAccountApi::default());
        let service = AccountService::new(api.clone());
        let mut form = registration();
        form.screen_name = "   ".into();

        let err = service.register(&form).await.unwrap_err();

        assert_eq!(err, ZerothError::validation("account name is required"));
        assert!(api.registered.lock().unwrap().is_empty());
    }

    #[test]
    fn test_email_pattern() {
        let mut form = registration();
        form.email = "Hanako@Example".into();
        assert!(validate(&form).is_err());
        form.email = "hanako.y+pets@mail.example.jp".into();
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn test_sex_parsing() {
        assert_eq!("m".parse::<AccountSex>().unwrap(), AccountSex::Male);
        assert_eq!("".parse::<AccountSex>().unwrap(), AccountSex::NotAnswered);
        assert!("x".parse::<AccountSex>().is_err());
    }
}
