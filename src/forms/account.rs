use std::sync::Arc;
use std::time::Duration;

use super::{
    reject_invalid, schedule_navigation, Fallbacks, Submission, SubmitButton, SubmitOutcome,
    MSG_CONNECTION, MSG_GENERIC_FAILURE, SUBMIT_BUTTON,
};
use crate::api::ApiClient;
use crate::banner::{MessageBanner, MESSAGE_CONTAINER};
use crate::dom::{DomError, Navigation, Page};
use crate::enhance;
use crate::models::{LoginRequest, RegisterRequest};
use crate::storage::{Storage, LAST_EMAIL_KEY, USER_KEY};
use crate::validation;

pub const LOGIN_FORM: &str = "loginForm";
pub const REGISTER_FORM: &str = "registerForm";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirmPassword";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";

pub const LOGIN_REDIRECT: &str = "/dashboard";
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_secs(1);
pub const REGISTER_REDIRECT: &str = "/login";
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_secs(2);

const LOGIN_FALLBACKS: Fallbacks = Fallbacks {
    success: "Autentificare reușită!",
    failure: "Email sau parolă incorectă!",
    transport: MSG_CONNECTION,
};

const REGISTER_FALLBACKS: Fallbacks = Fallbacks {
    success: "Cont creat cu succes!",
    failure: MSG_GENERIC_FAILURE,
    transport: MSG_CONNECTION,
};

pub struct LoginForm {
    api: ApiClient,
    page: Page,
    storage: Arc<dyn Storage>,
    banner: MessageBanner,
    button: SubmitButton,
}

impl LoginForm {
    /// Also pre-fills the email field from the last attempt.
    pub async fn bind(
        api: ApiClient,
        page: Page,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, DomError> {
        {
            let mut doc = page.lock().await;
            doc.require(&[LOGIN_FORM, EMAIL, PASSWORD, SUBMIT_BUTTON, MESSAGE_CONTAINER])?;
            if let Some(saved) = storage.get(LAST_EMAIL_KEY).filter(|s| !s.is_empty()) {
                doc.set_value(EMAIL, &saved)?;
            }
        }
        Ok(Self {
            api,
            page,
            storage,
            banner: MessageBanner::new(MESSAGE_CONTAINER),
            button: SubmitButton::new(SUBMIT_BUTTON, "Se autentifică..."),
        })
    }

    pub async fn submit(&self) -> Result<SubmitOutcome, DomError> {
        let (raw_email, password) = {
            let doc = self.page.lock().await;
            (doc.value(EMAIL)?, doc.value(PASSWORD)?)
        };
        self.remember_email(raw_email.trim());

        let email = raw_email.trim().to_lowercase();
        if let Err(e) = validation::validate_login(&email, &password) {
            return reject_invalid(&self.page, &self.banner, &e.message).await;
        }

        let req = LoginRequest { email, password };
        let (outcome, resp) = Submission {
            page: &self.page,
            banner: &self.banner,
            button: Some(&self.button),
            fallbacks: LOGIN_FALLBACKS,
        }
        .send(self.api.login(&req))
        .await?;

        if let Some(resp) = resp {
            if let Some(user) = resp.user {
                if let Err(e) = self.storage.set(USER_KEY, &user.to_string()) {
                    tracing::warn!(error = %e, "failed to store user hint");
                }
            }
            schedule_navigation(
                &self.page,
                Navigation::Assign(LOGIN_REDIRECT.to_string()),
                LOGIN_REDIRECT_DELAY,
            );
        }
        Ok(outcome)
    }

    fn remember_email(&self, email: &str) {
        if email.is_empty() {
            return;
        }
        if let Err(e) = self.storage.set(LAST_EMAIL_KEY, email) {
            tracing::warn!(error = %e, "failed to store last email");
        }
    }
}

pub struct RegisterForm {
    api: ApiClient,
    page: Page,
    banner: MessageBanner,
    button: SubmitButton,
}

impl RegisterForm {
    pub async fn bind(api: ApiClient, page: Page) -> Result<Self, DomError> {
        page.lock().await.require(&[
            REGISTER_FORM,
            FIRST_NAME,
            LAST_NAME,
            EMAIL,
            PASSWORD,
            CONFIRM_PASSWORD,
            SUBMIT_BUTTON,
            MESSAGE_CONTAINER,
        ])?;
        Ok(Self {
            api,
            page,
            banner: MessageBanner::new(MESSAGE_CONTAINER),
            button: SubmitButton::new(SUBMIT_BUTTON, "Se înregistrează..."),
        })
    }

    pub async fn submit(&self) -> Result<SubmitOutcome, DomError> {
        let req = {
            let doc = self.page.lock().await;
            RegisterRequest {
                first_name: doc.value(FIRST_NAME)?.trim().to_string(),
                last_name: doc.value(LAST_NAME)?.trim().to_string(),
                email: doc.value(EMAIL)?.trim().to_lowercase(),
                password: doc.value(PASSWORD)?,
            }
        };
        let confirm = self.page.lock().await.value(CONFIRM_PASSWORD)?;

        if let Err(e) = validation::validate_registration(
            &req.first_name,
            &req.last_name,
            &req.email,
            &req.password,
            &confirm,
        ) {
            return reject_invalid(&self.page, &self.banner, &e.message).await;
        }

        let (outcome, resp) = Submission {
            page: &self.page,
            banner: &self.banner,
            button: Some(&self.button),
            fallbacks: REGISTER_FALLBACKS,
        }
        .send(self.api.register(&req))
        .await?;

        if resp.is_some() {
            schedule_navigation(
                &self.page,
                Navigation::Assign(REGISTER_REDIRECT.to_string()),
                REGISTER_REDIRECT_DELAY,
            );
        }
        Ok(outcome)
    }

    pub async fn check_passwords(&self) -> Result<bool, DomError> {
        let mut doc = self.page.lock().await;
        enhance::check_password_match(&mut doc, PASSWORD, CONFIRM_PASSWORD)
    }
}
