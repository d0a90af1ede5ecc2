mod support;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use self::support::{students_page, Reply, ScriptedTransport};
use crate::banner::{BannerKind, MessageBanner, MESSAGE_CONTAINER};
use crate::bootstrap::{layout, Bootstrap, BootstrapError, Context, Handled, PageEvent, PageKind};
use crate::dom::{self, Document, Element, Navigation, Page};
use crate::enhance::{self, NotificationKind, BODY};
use crate::forms::account::{
    CONFIRM_PASSWORD, EMAIL, FIRST_NAME, LAST_NAME, LOGIN_FORM, PASSWORD, REGISTER_FORM,
};
use crate::forms::booking::{BOOKING_MESSAGE, POINTS_ANCHOR};
use crate::forms::meetings::{MEETING_LINK, RESPONSE_MESSAGE};
use crate::forms::{
    BookingForm, LoginForm, MeetingActions, RegisterForm, ResponseForm, SubmitOutcome,
    MSG_CONNECTION, SUBMIT_BUTTON,
};
use crate::list::pagination::BUTTON_CLASS;
use crate::list::professors::GRID;
use crate::list::students::{PAGINATION, TABLE_BODY, USER_RANK};
use crate::list::{ListState, ProfessorsLeaderboard, StudentsLeaderboard, ACTIVE_CLASS};
use crate::modal::{BACKDROP, BOOKING_DATE, BOOKING_MODAL, RESPONSE_LINK_GROUP, RESPONSE_MODAL};
use crate::models::MeetingResponseKind;
use crate::storage::{MemoryStorage, Storage, LAST_EMAIL_KEY, USER_KEY};
use crate::validation::{MSG_LOGIN_REQUIRED, MSG_NAME_TOO_SHORT, MSG_PASSWORD_TOO_SHORT};

fn fill(page: &Page, fields: &[(&str, &str)]) {
    let mut doc = page.try_lock().unwrap();
    for (id, value) in fields {
        doc.set_value(id, value).unwrap();
    }
}

async fn banner_text(page: &Page) -> String {
    page.lock().await.get(MESSAGE_CONTAINER).unwrap().text()
}

fn now() -> chrono::NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(9, 5, 0)
        .unwrap()
}

#[tokio::test]
async fn login_with_empty_password_sends_nothing() {
    let server = ScriptedTransport::new();
    let page = dom::page(layout::login());
    let storage = Arc::new(MemoryStorage::new());
    let form = LoginForm::bind(server.client(), page.clone(), storage)
        .await
        .unwrap();
    fill(&page, &[(EMAIL, "ana@example.ro"), (PASSWORD, "")]);

    let outcome = form.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Invalid(MSG_LOGIN_REQUIRED.to_string()));
    assert!(server.calls().is_empty());
    let doc = page.lock().await;
    let banner = doc.get(MESSAGE_CONTAINER).unwrap();
    assert!(banner.visible);
    assert!(banner.text().contains(MSG_LOGIN_REQUIRED));
    assert!(banner.inner_html().contains("message-error"));
    assert!(!doc.get(SUBMIT_BUTTON).unwrap().disabled);
}

#[tokio::test]
async fn register_with_short_password_sends_nothing() {
    let server = ScriptedTransport::new();
    let page = dom::page(layout::register());
    let form = RegisterForm::bind(server.client(), page.clone()).await.unwrap();
    fill(
        &page,
        &[
            (FIRST_NAME, "Ana"),
            (LAST_NAME, "Pop"),
            (EMAIL, "ana@example.ro"),
            (PASSWORD, "abc12"),
            (CONFIRM_PASSWORD, "abc12"),
        ],
    );

    let outcome = form.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Invalid(MSG_PASSWORD_TOO_SHORT.to_string()));
    assert!(server.calls().is_empty());
}

#[tokio::test]
async fn registration_reports_only_the_first_failing_rule() {
    let server = ScriptedTransport::new();
    let page = dom::page(layout::register());
    let form = RegisterForm::bind(server.client(), page.clone()).await.unwrap();
    fill(
        &page,
        &[
            (FIRST_NAME, "A"),
            (LAST_NAME, "Pop"),
            (EMAIL, "not-an-email"),
            (PASSWORD, "abc"),
            (CONFIRM_PASSWORD, "xyz"),
        ],
    );

    let outcome = form.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Invalid(MSG_NAME_TOO_SHORT.to_string()));
    assert_eq!(banner_text(&page).await.matches('!').count(), 1);
}

#[tokio::test(start_paused = true)]
async fn login_success_stores_hints_and_redirects_after_a_second() {
    let server = ScriptedTransport::new();
    server.json(
        "/api/login",
        json!({"success": true, "message": "Bine ai venit!", "user": {"id": 3, "role": "student"}}),
    );
    let page = dom::page(layout::login());
    let storage = Arc::new(MemoryStorage::new());
    let form = LoginForm::bind(server.client(), page.clone(), storage.clone())
        .await
        .unwrap();
    fill(&page, &[(EMAIL, "  Ana@Example.RO "), (PASSWORD, "secret1")]);

    let outcome = form.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Succeeded("Bine ai venit!".to_string()));
    let calls = server.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].body,
        Some(json!({"email": "ana@example.ro", "password": "secret1"}))
    );
    assert_eq!(storage.get(LAST_EMAIL_KEY).as_deref(), Some("Ana@Example.RO"));
    assert!(storage.get(USER_KEY).unwrap().contains("student"));

    tokio::time::sleep(Duration::from_millis(900)).await;
    assert!(page.lock().await.window.last_navigation().is_none());
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(
        page.lock().await.window.last_navigation(),
        Some(&Navigation::Assign("/dashboard".to_string()))
    );
}

#[tokio::test]
async fn login_prefills_the_last_email() {
    let server = ScriptedTransport::new();
    let page = dom::page(layout::login());
    let storage = Arc::new(MemoryStorage::new());
    storage.set(LAST_EMAIL_KEY, "ion@example.ro").unwrap();
    LoginForm::bind(server.client(), page.clone(), storage)
        .await
        .unwrap();
    assert_eq!(page.lock().await.value(EMAIL).unwrap(), "ion@example.ro");
}

#[tokio::test]
async fn server_rejection_reenables_the_submit_button() {
    let server = ScriptedTransport::new();
    server.json(
        "/api/login",
        json!({"success": false, "error": "Email sau parolă incorectă!"}),
    );
    let page = dom::page(layout::login());
    let form = LoginForm::bind(server.client(), page.clone(), Arc::new(MemoryStorage::new()))
        .await
        .unwrap();
    fill(&page, &[(EMAIL, "ana@example.ro"), (PASSWORD, "wrong12")]);

    let outcome = form.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected("Email sau parolă incorectă!".to_string())
    );
    let doc = page.lock().await;
    let button = doc.get(SUBMIT_BUTTON).unwrap();
    assert!(!button.disabled);
    assert_eq!(button.text(), "Autentificare");
    assert!(doc.window.navigations.is_empty());
}

#[tokio::test]
async fn broken_response_shows_the_connection_message() {
    let server = ScriptedTransport::new();
    server.reply("/api/register", Reply::Malformed);
    let page = dom::page(layout::register());
    let form = RegisterForm::bind(server.client(), page.clone()).await.unwrap();
    fill(
        &page,
        &[
            (FIRST_NAME, "Ana"),
            (LAST_NAME, "Pop"),
            (EMAIL, "ana@example.ro"),
            (PASSWORD, "secret1"),
            (CONFIRM_PASSWORD, "secret1"),
        ],
    );

    let outcome = form.submit().await.unwrap();

    assert_eq!(outcome, SubmitOutcome::TransportFailed(MSG_CONNECTION.to_string()));
    assert!(banner_text(&page).await.contains(MSG_CONNECTION));
    assert!(!page.lock().await.get(SUBMIT_BUTTON).unwrap().disabled);
}

#[tokio::test]
async fn banner_text_is_never_markup() {
    let page = dom::page(layout::login());
    let banner = MessageBanner::new(MESSAGE_CONTAINER);
    banner
        .show(&page, "<img src=x onerror=alert(1)>", BannerKind::Error)
        .await
        .unwrap();
    let html = page.lock().await.get(MESSAGE_CONTAINER).unwrap().inner_html();
    assert!(html.contains("&lt;img"));
    assert!(!html.contains("<img"));
}

#[tokio::test]
async fn second_page_of_thirty_students() {
    let server = ScriptedTransport::new();
    server.json("/api/leaderboard/global", students_page(5, 26, 30, 2, 25));
    let page = dom::page(layout::leaderboard());
    let list = StudentsLeaderboard::bind(server.client(), page.clone(), 25)
        .await
        .unwrap();

    assert_eq!(list.load(2).await.unwrap(), ListState::Rendered);

    let calls = server.calls();
    assert_eq!(
        calls[0].query,
        vec![
            ("page".to_string(), "2".to_string()),
            ("per_page".to_string(), "25".to_string())
        ]
    );
    let doc = page.lock().await;
    let strip = &doc.get(PAGINATION).unwrap().children;
    let text: String = strip.iter().map(|n| n.text_content()).collect();
    assert!(text.contains("Pagina 2 din 2"));
    let buttons: Vec<_> = strip.iter().filter(|n| n.has_class(BUTTON_CLASS)).collect();
    assert_eq!(buttons.len(), 2);
    assert!(!buttons[0].has_attr("disabled"));
    assert!(buttons[1].has_attr("disabled"));

    let rows = list.rows();
    assert_eq!(rows.first().map(|r| r.rank), Some(26));
    assert_eq!(rows.last().map(|r| r.rank), Some(30));
    assert!(doc.get(TABLE_BODY).unwrap().text().starts_with("26"));
}

#[tokio::test]
async fn podium_and_current_user_marking() {
    let server = ScriptedTransport::new();
    server.json(
        "/api/leaderboard/global",
        json!({
            "success": true,
            "leaderboard": [
                {"name": "Ana", "points": 900, "lessons_completed": 9},
                {"name": "Ion", "points": 800, "lessons_completed": 8, "is_current_user": true},
                {"name": "Eva", "points": 700, "lessons_completed": 7},
                {"name": "Dan", "points": 600, "lessons_completed": 6}
            ],
            "current_user_rank": 2,
            "total_users": 4,
            "page": 1,
            "per_page": 25
        }),
    );
    let page = dom::page(layout::leaderboard());
    let list = StudentsLeaderboard::bind(server.client(), page.clone(), 25)
        .await
        .unwrap();
    list.load(1).await.unwrap();

    let doc = page.lock().await;
    let body = doc.get(TABLE_BODY).unwrap();
    let html = body.inner_html();
    for medal in ["🥇", "🥈", "🥉"] {
        assert!(html.contains(medal));
    }
    assert!(html.contains(r#"<td class="rank-col">4</td>"#));
    assert!(html.contains(r#"<tr class="current-user">"#));
    assert!(html.contains("Ion (Tu)"));
    assert_eq!(doc.get(USER_RANK).unwrap().text(), "2");
    assert!(doc.get(PAGINATION).unwrap().children.is_empty());
}

#[tokio::test]
async fn empty_leaderboard_renders_placeholder_row() {
    let server = ScriptedTransport::new();
    server.json("/api/leaderboard/global", students_page(0, 1, 0, 1, 25));
    let page = dom::page(layout::leaderboard());
    let list = StudentsLeaderboard::bind(server.client(), page.clone(), 25)
        .await
        .unwrap();
    list.load(1).await.unwrap();
    let html = page.lock().await.get(TABLE_BODY).unwrap().inner_html();
    assert!(html.contains(r#"colspan="4""#));
    assert!(html.contains("Niciun student găsit"));
}

#[tokio::test(start_paused = true)]
async fn latest_issued_load_wins_the_render() {
    let server = ScriptedTransport::new();
    server
        .reply(
            "/api/leaderboard/global",
            Reply::Delayed(Duration::from_millis(500), students_page(25, 1, 60, 1, 25)),
        )
        .reply(
            "/api/leaderboard/global",
            Reply::Delayed(Duration::from_millis(50), students_page(25, 26, 60, 2, 25)),
        );
    let page = dom::page(layout::leaderboard());
    let list = StudentsLeaderboard::bind(server.client(), page.clone(), 25)
        .await
        .unwrap();

    let (first, second) = futures::join!(list.load(1), list.load(2));

    assert_eq!(second.unwrap(), ListState::Rendered);
    assert_eq!(first.unwrap(), ListState::Rendered);
    assert_eq!(list.current_page(), 2);
    assert_eq!(list.rows()[0].rank, 26);
    let text: String = page
        .lock()
        .await
        .get(PAGINATION)
        .unwrap()
        .children
        .iter()
        .map(|n| n.text_content())
        .collect();
    assert!(text.contains("Pagina 2 din 3"));
}

#[tokio::test]
async fn echoed_last_page_renders_without_a_next_link() {
    let server = ScriptedTransport::new();
    server.json(
        "/api/leaderboard/global",
        students_page(1, 1, u64::MAX, u32::MAX, 1),
    );
    let page = dom::page(layout::leaderboard());
    let list = StudentsLeaderboard::bind(server.client(), page.clone(), 1)
        .await
        .unwrap();

    assert_eq!(list.load(7).await.unwrap(), ListState::Rendered);

    assert_eq!(list.current_page(), u32::MAX);
    assert_eq!(list.rows()[0].rank, u32::MAX as u64);
    let doc = page.lock().await;
    let strip = &doc.get(PAGINATION).unwrap().children;
    let buttons: Vec<_> = strip.iter().filter(|n| n.has_class(BUTTON_CLASS)).collect();
    assert!(!buttons[0].has_attr("disabled"));
    assert!(buttons[1].has_attr("disabled"));
}

#[tokio::test]
async fn failed_list_load_is_visible() {
    let server = ScriptedTransport::new();
    server.reply("/api/leaderboard/professors", Reply::Malformed);
    let page = dom::page(layout::leaderboard());
    let list = ProfessorsLeaderboard::bind(server.client(), page.clone())
        .await
        .unwrap();

    let state = list.load(None).await.unwrap();

    assert!(matches!(state, ListState::Failed(_)));
    assert_eq!(list.state(), state);
    let html = page.lock().await.get(GRID).unwrap().inner_html();
    assert!(html.contains("load-error"));
    assert!(html.contains(r#"role="alert""#));
}

#[tokio::test]
async fn level_filter_sends_level_except_for_all() {
    let server = ScriptedTransport::new();
    server
        .json("/api/leaderboard/professors", json!({"success": true, "leaderboard": []}))
        .json(
            "/api/leaderboard/professors",
            json!({
                "success": true,
                "leaderboard": [{"name": "Prof. Ionescu", "level": "B2", "rating": 4.8}]
            }),
        );
    let page = dom::page(layout::leaderboard());
    let list = ProfessorsLeaderboard::bind(server.client(), page.clone())
        .await
        .unwrap();

    list.filter("all", &layout::filter_button_id("all")).await.unwrap();
    assert!(page
        .lock()
        .await
        .get(GRID)
        .unwrap()
        .text()
        .contains("Niciun profesor găsit"));

    list.filter("B2", &layout::filter_button_id("B2")).await.unwrap();

    let calls = server.calls();
    assert!(calls[0].query.is_empty());
    assert_eq!(calls[1].query, vec![("level".to_string(), "B2".to_string())]);
    assert_eq!(list.level(), "B2");
    let doc = page.lock().await;
    assert!(doc.get("filter-B2").unwrap().has_class(ACTIVE_CLASS));
    assert!(!doc.get("filter-all").unwrap().has_class(ACTIVE_CLASS));
    let grid = doc.get(GRID).unwrap().inner_html();
    assert!(grid.contains("Prof. Ionescu"));
    assert!(grid.contains("4.8 ⭐"));
}

#[tokio::test(start_paused = true)]
async fn booking_success_updates_points_and_redirects() {
    let server = ScriptedTransport::new();
    server.json(
        "/api/meetings/create",
        json!({"success": true, "message": "Cererea a fost trimisă!", "remaining_points": 40}),
    );
    let page = dom::page(layout::professors());
    let form = BookingForm::bind(server.client(), page.clone()).await.unwrap();
    form.open(7, "Prof. Ionescu", now()).await.unwrap();
    {
        let doc = page.lock().await;
        assert!(doc.get(BOOKING_MODAL).unwrap().visible);
        assert_eq!(
            doc.get(BOOKING_DATE).unwrap().attrs.get("min").map(String::as_str),
            Some("2026-10-18T09:05")
        );
    }
    fill(&page, &[(BOOKING_DATE, "2026-10-20T18:00"), (BOOKING_MESSAGE, "Salut")]);

    let outcome = form.submit().await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(
        server.calls()[0].body,
        Some(json!({"professor_id": 7, "meeting_date": "2026-10-20T18:00", "message": "Salut"}))
    );
    {
        let doc = page.lock().await;
        assert!(!doc.get(BOOKING_MODAL).unwrap().visible);
        assert!(!doc.get(BACKDROP).unwrap().visible);
        assert_eq!(doc.get(POINTS_ANCHOR).unwrap().text(), "40");
        assert!(doc.get(MESSAGE_CONTAINER).unwrap().visible);
    }

    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(
        page.lock().await.window.last_navigation(),
        Some(&Navigation::Assign("/meetings".to_string()))
    );
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!page.lock().await.get(MESSAGE_CONTAINER).unwrap().visible);
}

#[tokio::test]
async fn booking_with_non_numeric_professor_is_invalid() {
    let server = ScriptedTransport::new();
    let page = dom::page(layout::professors());
    let form = BookingForm::bind(server.client(), page.clone()).await.unwrap();
    fill(
        &page,
        &[
            (crate::modal::BOOKING_PROFESSOR_ID, "abc"),
            (BOOKING_DATE, "2026-10-20T18:00"),
        ],
    );
    let outcome = form.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Invalid("Profesor invalid!".to_string()));
    assert!(server.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn later_banner_is_not_hidden_by_an_earlier_timer() {
    let page = dom::page(layout::professors());
    let banner = MessageBanner::new(MESSAGE_CONTAINER).with_auto_hide(Duration::from_secs(5));
    banner.show(&page, "unu", BannerKind::Error).await.unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    banner.show(&page, "doi", BannerKind::Success).await.unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(page.lock().await.get(MESSAGE_CONTAINER).unwrap().visible);
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(!page.lock().await.get(MESSAGE_CONTAINER).unwrap().visible);
}

#[tokio::test(start_paused = true)]
async fn reject_hides_link_and_omits_it_from_payload() {
    let server = ScriptedTransport::new();
    server.json("/api/meetings/12/respond", json!({"success": true, "message": "Gata"}));
    let page = dom::page(layout::meetings());
    let form = ResponseForm::bind(server.client(), page.clone()).await.unwrap();

    form.open(12, MeetingResponseKind::Reject).await.unwrap();
    assert!(!page.lock().await.get(RESPONSE_LINK_GROUP).unwrap().visible);
    fill(
        &page,
        &[(RESPONSE_MESSAGE, "Nu pot"), (MEETING_LINK, "https://meet.example/x")],
    );

    let outcome = form.submit().await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(
        server.calls()[0].body,
        Some(json!({"action": "reject", "message": "Nu pot"}))
    );
    assert!(!page.lock().await.get(RESPONSE_MODAL).unwrap().visible);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(
        page.lock().await.window.last_navigation(),
        Some(&Navigation::Reload)
    );
}

#[tokio::test]
async fn confirm_sends_the_meeting_link() {
    let server = ScriptedTransport::new();
    server.json("/api/meetings/4/respond", json!({"success": true}));
    let page = dom::page(layout::meetings());
    let form = ResponseForm::bind(server.client(), page.clone()).await.unwrap();
    form.open(4, MeetingResponseKind::Confirm).await.unwrap();
    assert!(page.lock().await.get(RESPONSE_LINK_GROUP).unwrap().visible);
    fill(&page, &[(MEETING_LINK, " https://meet.example/x ")]);

    form.submit().await.unwrap();

    assert_eq!(
        server.calls()[0].body,
        Some(json!({"action": "confirm", "message": "", "meeting_link": "https://meet.example/x"}))
    );
}

#[tokio::test]
async fn declined_cancellation_sends_nothing() {
    let server = ScriptedTransport::new();
    let page = dom::page(layout::meetings());
    let actions = MeetingActions::bind(server.client(), page.clone()).await.unwrap();

    let mut prompt = String::new();
    let outcome = actions
        .cancel(5, |text| {
            prompt = text.to_string();
            false
        })
        .await
        .unwrap();

    assert_eq!(outcome, SubmitOutcome::Declined);
    assert!(prompt.contains("Punctele vor fi returnate"));
    assert!(server.calls().is_empty());
}

#[tokio::test]
async fn confirmed_cancellation_posts_to_the_meeting() {
    let server = ScriptedTransport::new();
    server.json("/api/meetings/5/cancel", json!({"success": true, "message": "Anulat"}));
    let page = dom::page(layout::meetings());
    let actions = MeetingActions::bind(server.client(), page.clone()).await.unwrap();

    let outcome = actions.cancel(5, |_| true).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Succeeded("Anulat".to_string()));
    let calls = server.calls();
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].body, None);
}

fn context(server: &Arc<ScriptedTransport>, doc: Document) -> Context {
    Context {
        api: server.client(),
        page: dom::page(doc),
        storage: Arc::new(MemoryStorage::new()),
        per_page: 25,
    }
}

#[tokio::test]
async fn bootstrap_loads_both_leaderboard_tabs() {
    let server = ScriptedTransport::new();
    server
        .json("/api/leaderboard/global", students_page(3, 1, 3, 1, 25))
        .json("/api/leaderboard/professors", json!({"success": true, "leaderboard": []}));

    let ctx = context(&server, layout::leaderboard());
    let boot = Bootstrap::ready(PageKind::Leaderboard, ctx).await;

    assert!(boot.failures().is_empty());
    let mut paths: Vec<_> = server.calls().into_iter().map(|c| c.path).collect();
    paths.sort();
    assert_eq!(paths, vec!["/api/leaderboard/global", "/api/leaderboard/professors"]);
    let handled = boot
        .dispatch(PageEvent::SwitchTab {
            tab: "professors".to_string(),
            trigger: layout::PROFESSORS_TAB_BUTTON.to_string(),
        })
        .await;
    assert_eq!(handled, vec![Handled::Updated]);
    let doc = boot.page().lock().await;
    assert!(doc.get("professors-tab").unwrap().has_class(ACTIVE_CLASS));
    assert!(!doc.get("students-tab").unwrap().has_class(ACTIVE_CLASS));
    assert!(!doc.get(layout::STUDENTS_TAB_BUTTON).unwrap().has_class(ACTIVE_CLASS));
}

#[tokio::test]
async fn missing_anchor_skips_only_that_initializer() {
    let server = ScriptedTransport::new();
    server.json("/api/leaderboard/global", students_page(2, 1, 2, 1, 25));
    let mut doc = Document::new();
    let full = layout::leaderboard();
    for id in [BODY, MESSAGE_CONTAINER, TABLE_BODY, PAGINATION, USER_RANK] {
        doc.insert(id, full.get(id).unwrap().clone());
    }

    let boot = Bootstrap::ready(PageKind::Leaderboard, context(&server, doc)).await;

    assert_eq!(
        boot.failures(),
        &[BootstrapError::Init {
            controller: "professors leaderboard",
            source: dom::DomError::MissingAnchor { id: GRID.to_string() },
        }]
    );
    assert!(boot.controller_names().contains(&"students leaderboard"));
    assert_eq!(server.calls().len(), 1);
    assert!(boot
        .page()
        .lock()
        .await
        .get(TABLE_BODY)
        .unwrap()
        .text()
        .contains("Student 1"));
}

#[tokio::test]
async fn escape_closes_the_modal_once() {
    let server = ScriptedTransport::new();
    let boot = Bootstrap::ready(PageKind::Professors, context(&server, layout::professors())).await;
    boot.dispatch(PageEvent::OpenBooking {
        professor_id: 3,
        professor_name: "Prof. Pop".to_string(),
        now: now(),
    })
    .await;
    fill(boot.page(), &[(BOOKING_MESSAGE, "draft")]);

    let first = boot.dispatch(PageEvent::KeyDown { key: "Escape".to_string() }).await;
    let second = boot.dispatch(PageEvent::KeyDown { key: "Escape".to_string() }).await;

    assert_eq!(first, vec![Handled::ModalClosed(true)]);
    assert_eq!(second, vec![Handled::ModalClosed(false)]);
    let doc = boot.page().lock().await;
    assert!(!doc.get(BOOKING_MODAL).unwrap().visible);
    assert!(!doc.get(BACKDROP).unwrap().visible);
    assert_eq!(doc.value(BOOKING_MESSAGE).unwrap(), "");
}

#[tokio::test]
async fn backdrop_and_cancel_button_close_the_response_modal() {
    let server = ScriptedTransport::new();
    let boot = Bootstrap::ready(PageKind::Meetings, context(&server, layout::meetings())).await;
    let open = PageEvent::OpenResponse {
        meeting_id: 1,
        action: MeetingResponseKind::Confirm,
    };

    boot.dispatch(open.clone()).await;
    let by_backdrop = boot.dispatch(PageEvent::Click { target: BACKDROP.to_string() }).await;
    boot.dispatch(open).await;
    let by_button = boot
        .dispatch(PageEvent::Click {
            target: layout::RESPONSE_CANCEL.to_string(),
        })
        .await;

    assert_eq!(by_backdrop, vec![Handled::ModalClosed(true)]);
    assert_eq!(by_button, vec![Handled::ModalClosed(true)]);
    assert!(!boot.page().lock().await.get(RESPONSE_MODAL).unwrap().visible);
}

#[tokio::test]
async fn register_page_gets_toggles_and_live_checks() {
    let server = ScriptedTransport::new();
    let boot = Bootstrap::ready(PageKind::Register, context(&server, layout::register())).await;
    {
        let doc = boot.page().lock().await;
        assert!(doc.contains("password-toggle"));
        assert!(doc.contains("confirmPassword-toggle"));
    }

    boot.dispatch(PageEvent::Blur { target: FIRST_NAME.to_string() }).await;
    fill(boot.page(), &[(PASSWORD, "secret1"), (CONFIRM_PASSWORD, "secret2")]);
    boot.dispatch(PageEvent::Input { target: CONFIRM_PASSWORD.to_string() }).await;
    boot.dispatch(PageEvent::Click { target: "password-toggle".to_string() }).await;

    let doc = boot.page().lock().await;
    assert!(doc.get(FIRST_NAME).unwrap().has_class(enhance::ERROR_CLASS));
    assert_eq!(
        doc.get(CONFIRM_PASSWORD).unwrap().custom_validity,
        enhance::MSG_PASSWORDS_DIFFER
    );
    assert_eq!(doc.get(PASSWORD).unwrap().input_type.as_deref(), Some("text"));
}

#[tokio::test]
async fn bootstrap_routes_submit_to_the_page_form() {
    let server = ScriptedTransport::new();
    let boot = Bootstrap::ready(PageKind::Login, context(&server, layout::login())).await;
    let handled = boot
        .dispatch(PageEvent::Submit { form: LOGIN_FORM.to_string() })
        .await;
    assert_eq!(
        handled,
        vec![Handled::Submitted(SubmitOutcome::Invalid(MSG_LOGIN_REQUIRED.to_string()))]
    );
    let ignored = boot
        .dispatch(PageEvent::Submit { form: REGISTER_FORM.to_string() })
        .await;
    assert!(ignored.is_empty());
}

#[tokio::test(start_paused = true)]
async fn notifications_remove_themselves() {
    let page = dom::page(layout::login());
    enhance::notify(&page, "Salvat", NotificationKind::Success).await.unwrap();
    {
        let doc = page.lock().await;
        let html = doc.get(BODY).unwrap().inner_html();
        assert!(html.contains("notification notification-success"));
        assert!(html.contains("Salvat"));
    }
    tokio::time::sleep(Duration::from_millis(3100)).await;
    assert!(page.lock().await.get(BODY).unwrap().children.is_empty());
}

#[tokio::test]
async fn hash_links_scroll_instead_of_navigating() {
    let server = ScriptedTransport::new();
    let doc = layout::login()
        .with("skip", Element::new("a").with_attr("href", "#loginForm"))
        .with("top", Element::new("a").with_attr("href", "#"));
    let boot = Bootstrap::ready(PageKind::Login, context(&server, doc)).await;

    let followed = boot.dispatch(PageEvent::Click { target: "skip".to_string() }).await;
    let bare = boot.dispatch(PageEvent::Click { target: "top".to_string() }).await;

    assert_eq!(followed, vec![Handled::Updated]);
    assert!(bare.is_empty());
    let doc = boot.page().lock().await;
    assert_eq!(doc.window.scroll_requests, vec![LOGIN_FORM.to_string()]);
    assert!(doc.window.navigations.is_empty());
}
