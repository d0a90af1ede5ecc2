pub mod layout;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::api::ApiClient;
use crate::dom::{DomError, Document, Page};
use crate::enhance::{self, ActivityTracker};
use crate::forms::account::{CONFIRM_PASSWORD, LOGIN_FORM, PASSWORD, REGISTER_FORM};
use crate::forms::{
    BookingForm, LoginForm, MeetingActions, RegisterForm, ResponseForm, SubmitOutcome,
};
use crate::list::{self, ListState, ProfessorsLeaderboard, StudentsLeaderboard};
use crate::modal::{Modal, BOOKING_FORM, RESPONSE_FORM};
use crate::models::MeetingResponseKind;
use crate::storage::Storage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Login,
    Register,
    Leaderboard,
    Professors,
    Meetings,
}

impl PageKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "login" => Some(PageKind::Login),
            "register" => Some(PageKind::Register),
            "leaderboard" => Some(PageKind::Leaderboard),
            "professors" => Some(PageKind::Professors),
            "meetings" => Some(PageKind::Meetings),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    Submit { form: String },
    Click { target: String },
    KeyDown { key: String },
    Input { target: String },
    Blur { target: String },
    Paginate { page: u32 },
    JumpToPage { raw: String },
    SwitchTab { tab: String, trigger: String },
    Filter { level: String, trigger: String },
    OpenBooking { professor_id: i64, professor_name: String, now: NaiveDateTime },
    OpenResponse { meeting_id: i64, action: MeetingResponseKind },
    /// `confirmed` carries the user's answer to the confirmation prompt.
    CancelMeeting { meeting_id: i64, confirmed: bool },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Handled {
    Submitted(SubmitOutcome),
    Listed(ListState),
    ModalClosed(bool),
    Updated,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BootstrapError {
    #[error("{controller} was not initialised: {source}")]
    Init {
        controller: &'static str,
        #[source]
        source: DomError,
    },

    #[error("{controller} failed its initial load: {source}")]
    InitialLoad {
        controller: &'static str,
        #[source]
        source: DomError,
    },
}

#[async_trait]
pub trait PageController: Send + Sync {
    fn name(&self) -> &'static str;

    async fn initial_load(&self) -> Result<(), DomError> {
        Ok(())
    }

    /// `None` when the event is not for this controller.
    async fn handle(&self, event: &PageEvent) -> Result<Option<Handled>, DomError>;
}

fn modal_event(
    modal: &Modal,
    doc: &mut Document,
    event: &PageEvent,
    cancel: &str,
) -> Result<Option<Handled>, DomError> {
    match event {
        PageEvent::KeyDown { key } => Ok(Some(Handled::ModalClosed(modal.handle_key(doc, key)?))),
        PageEvent::Click { target } if target == cancel => {
            Ok(Some(Handled::ModalClosed(modal.close(doc)?)))
        }
        PageEvent::Click { target } => match modal.handle_click(doc, target)? {
            true => Ok(Some(Handled::ModalClosed(true))),
            false => Ok(None),
        },
        _ => Ok(None),
    }
}

struct LoginController(LoginForm);

#[async_trait]
impl PageController for LoginController {
    fn name(&self) -> &'static str {
        "login form"
    }

    async fn handle(&self, event: &PageEvent) -> Result<Option<Handled>, DomError> {
        match event {
            PageEvent::Submit { form } if form == LOGIN_FORM => {
                Ok(Some(Handled::Submitted(self.0.submit().await?)))
            }
            _ => Ok(None),
        }
    }
}

struct RegisterController(RegisterForm);

#[async_trait]
impl PageController for RegisterController {
    fn name(&self) -> &'static str {
        "register form"
    }

    async fn handle(&self, event: &PageEvent) -> Result<Option<Handled>, DomError> {
        match event {
            PageEvent::Submit { form } if form == REGISTER_FORM => {
                Ok(Some(Handled::Submitted(self.0.submit().await?)))
            }
            PageEvent::Input { target } if target == CONFIRM_PASSWORD || target == PASSWORD => {
                self.0.check_passwords().await?;
                Ok(Some(Handled::Updated))
            }
            _ => Ok(None),
        }
    }
}

struct StudentsController {
    list: StudentsLeaderboard,
    page: Page,
}

#[async_trait]
impl PageController for StudentsController {
    fn name(&self) -> &'static str {
        "students leaderboard"
    }

    async fn initial_load(&self) -> Result<(), DomError> {
        self.list.load(1).await.map(|_| ())
    }

    async fn handle(&self, event: &PageEvent) -> Result<Option<Handled>, DomError> {
        match event {
            PageEvent::Paginate { page } => {
                Ok(Some(Handled::Listed(self.list.load(*page).await?)))
            }
            PageEvent::JumpToPage { raw } => Ok(self.list.jump(raw).await?.map(Handled::Listed)),
            PageEvent::SwitchTab { tab, trigger } => {
                list::switch_tab(&mut *self.page.lock().await, tab, trigger)?;
                Ok(Some(Handled::Updated))
            }
            _ => Ok(None),
        }
    }
}

struct ProfessorsController(ProfessorsLeaderboard);

#[async_trait]
impl PageController for ProfessorsController {
    fn name(&self) -> &'static str {
        "professors leaderboard"
    }

    async fn initial_load(&self) -> Result<(), DomError> {
        self.0.reload().await.map(|_| ())
    }

    async fn handle(&self, event: &PageEvent) -> Result<Option<Handled>, DomError> {
        match event {
            PageEvent::Filter { level, trigger } => {
                Ok(Some(Handled::Listed(self.0.filter(level, trigger).await?)))
            }
            _ => Ok(None),
        }
    }
}

struct BookingController {
    form: BookingForm,
    page: Page,
}

#[async_trait]
impl PageController for BookingController {
    fn name(&self) -> &'static str {
        "booking form"
    }

    async fn handle(&self, event: &PageEvent) -> Result<Option<Handled>, DomError> {
        match event {
            PageEvent::OpenBooking {
                professor_id,
                professor_name,
                now,
            } => {
                self.form.open(*professor_id, professor_name, *now).await?;
                Ok(Some(Handled::Updated))
            }
            PageEvent::Submit { form } if form == BOOKING_FORM => {
                Ok(Some(Handled::Submitted(self.form.submit().await?)))
            }
            _ => {
                let mut doc = self.page.lock().await;
                modal_event(self.form.modal().modal(), &mut doc, event, layout::BOOKING_CANCEL)
            }
        }
    }
}

struct ResponseController {
    form: ResponseForm,
    page: Page,
}

#[async_trait]
impl PageController for ResponseController {
    fn name(&self) -> &'static str {
        "meeting response form"
    }

    async fn handle(&self, event: &PageEvent) -> Result<Option<Handled>, DomError> {
        match event {
            PageEvent::OpenResponse { meeting_id, action } => {
                self.form.open(*meeting_id, *action).await?;
                Ok(Some(Handled::Updated))
            }
            PageEvent::Submit { form } if form == RESPONSE_FORM => {
                Ok(Some(Handled::Submitted(self.form.submit().await?)))
            }
            _ => {
                let mut doc = self.page.lock().await;
                modal_event(self.form.modal().modal(), &mut doc, event, layout::RESPONSE_CANCEL)
            }
        }
    }
}

struct CancelController(MeetingActions);

#[async_trait]
impl PageController for CancelController {
    fn name(&self) -> &'static str {
        "meeting cancellation"
    }

    async fn handle(&self, event: &PageEvent) -> Result<Option<Handled>, DomError> {
        match event {
            PageEvent::CancelMeeting {
                meeting_id,
                confirmed,
            } => {
                let confirmed = *confirmed;
                let outcome = self.0.cancel(*meeting_id, |_| confirmed).await?;
                Ok(Some(Handled::Submitted(outcome)))
            }
            _ => Ok(None),
        }
    }
}

struct CommonController {
    page: Page,
}

#[async_trait]
impl PageController for CommonController {
    fn name(&self) -> &'static str {
        "page enhancements"
    }

    async fn initial_load(&self) -> Result<(), DomError> {
        let created = enhance::init_password_toggles(&mut *self.page.lock().await);
        tracing::debug!(toggles = created.len(), "password toggles ready");
        Ok(())
    }

    async fn handle(&self, event: &PageEvent) -> Result<Option<Handled>, DomError> {
        let mut doc = self.page.lock().await;
        match event {
            PageEvent::Click { target } if target.ends_with("-toggle") && doc.contains(target) => {
                enhance::toggle_password(&mut doc, target)?;
                Ok(Some(Handled::Updated))
            }
            PageEvent::Click { target } if doc.contains(target) => {
                Ok(enhance::follow_anchor(&mut doc, target)?.then_some(Handled::Updated))
            }
            PageEvent::Blur { target } if doc.contains(target) => {
                enhance::on_blur(&mut doc, target)?;
                Ok(Some(Handled::Updated))
            }
            PageEvent::Input { target } if doc.contains(target) => {
                enhance::on_input(&mut doc, target)?;
                Ok(Some(Handled::Updated))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Clone)]
pub struct Context {
    pub api: ApiClient,
    pub page: Page,
    pub storage: Arc<dyn Storage>,
    pub per_page: u32,
}

pub struct Bootstrap {
    kind: PageKind,
    page: Page,
    controllers: Vec<Box<dyn PageController>>,
    failures: Vec<BootstrapError>,
    activity: ActivityTracker,
    watcher: JoinHandle<()>,
}

impl Drop for Bootstrap {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

fn keep<C: PageController + 'static>(
    controllers: &mut Vec<Box<dyn PageController>>,
    failures: &mut Vec<BootstrapError>,
    controller: &'static str,
    bound: Result<C, DomError>,
) {
    match bound {
        Ok(c) => controllers.push(Box::new(c)),
        Err(source) => {
            tracing::error!(controller, error = %source, "initializer skipped");
            failures.push(BootstrapError::Init { controller, source });
        }
    }
}

impl Bootstrap {
    /// Binds every controller of `kind` and runs the initial loads. A
    /// missing anchor skips that controller only.
    pub async fn ready(kind: PageKind, ctx: Context) -> Self {
        let Context {
            api,
            page,
            storage,
            per_page,
        } = ctx;
        let mut controllers: Vec<Box<dyn PageController>> = Vec::new();
        let mut failures = Vec::new();

        controllers.push(Box::new(CommonController { page: page.clone() }));
        match kind {
            PageKind::Login => {
                let bound = LoginForm::bind(api, page.clone(), storage).await;
                keep(&mut controllers, &mut failures, "login form", bound.map(LoginController));
            }
            PageKind::Register => {
                let bound = RegisterForm::bind(api, page.clone()).await;
                keep(
                    &mut controllers,
                    &mut failures,
                    "register form",
                    bound.map(RegisterController),
                );
            }
            PageKind::Leaderboard => {
                let students = StudentsLeaderboard::bind(api.clone(), page.clone(), per_page)
                    .await
                    .map(|list| StudentsController {
                        list,
                        page: page.clone(),
                    });
                keep(&mut controllers, &mut failures, "students leaderboard", students);
                let professors = ProfessorsLeaderboard::bind(api, page.clone()).await;
                keep(
                    &mut controllers,
                    &mut failures,
                    "professors leaderboard",
                    professors.map(ProfessorsController),
                );
            }
            PageKind::Professors => {
                let booking = BookingForm::bind(api, page.clone())
                    .await
                    .map(|form| BookingController {
                        form,
                        page: page.clone(),
                    });
                keep(&mut controllers, &mut failures, "booking form", booking);
            }
            PageKind::Meetings => {
                let response = ResponseForm::bind(api.clone(), page.clone())
                    .await
                    .map(|form| ResponseController {
                        form,
                        page: page.clone(),
                    });
                keep(&mut controllers, &mut failures, "meeting response form", response);
                let cancel = MeetingActions::bind(api, page.clone()).await;
                keep(
                    &mut controllers,
                    &mut failures,
                    "meeting cancellation",
                    cancel.map(CancelController),
                );
            }
        }

        let loads = controllers
            .iter()
            .map(|c| async move { (c.name(), c.initial_load().await) });
        for (controller, result) in futures::future::join_all(loads).await {
            if let Err(source) = result {
                tracing::error!(controller, error = %source, "initial load failed");
                failures.push(BootstrapError::InitialLoad { controller, source });
            }
        }

        tracing::info!(
            ?kind,
            controllers = controllers.len(),
            failures = failures.len(),
            "page ready"
        );
        let activity = ActivityTracker::new();
        let watcher = activity.watch();
        Self {
            kind,
            page,
            controllers,
            failures,
            activity,
            watcher,
        }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn controller_names(&self) -> Vec<&'static str> {
        self.controllers.iter().map(|c| c.name()).collect()
    }

    pub fn failures(&self) -> &[BootstrapError] {
        &self.failures
    }

    pub fn activity(&self) -> &ActivityTracker {
        &self.activity
    }

    /// Delivers `event` to every controller, in binding order. Errors are
    /// logged and do not stop the remaining controllers.
    pub async fn dispatch(&self, event: PageEvent) -> Vec<Handled> {
        self.activity.touch();
        let mut handled = Vec::new();
        for controller in &self.controllers {
            match controller.handle(&event).await {
                Ok(Some(h)) => handled.push(h),
                Ok(None) => {}
                Err(e) => tracing::error!(
                    controller = controller.name(),
                    error = %e,
                    ?event,
                    "event handler failed"
                ),
            }
        }
        handled
    }
}
