use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::api::{ApiClient, HttpTransport};
use crate::banner::BannerKind;
use crate::bootstrap::{layout, Bootstrap, Context, Handled, PageEvent, PageKind};
use crate::cli::args::{BookArgs, CliArgs, Command, RespondArgs};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::dom::{self, Page};
use crate::forms::account::{
    CONFIRM_PASSWORD, EMAIL, FIRST_NAME, LAST_NAME, LOGIN_FORM, PASSWORD, REGISTER_FORM,
};
use crate::forms::booking::BOOKING_MESSAGE;
use crate::forms::meetings::{CANCEL_PROMPT, MEETING_LINK, RESPONSE_MESSAGE};
use crate::forms::SubmitOutcome;
use crate::list::students::DEFAULT_PER_PAGE;
use crate::list::{professors, students, ListState, ProfessorsLeaderboard, StudentsLeaderboard};
use crate::modal::{
    BOOKING_DATE, BOOKING_FORM, BOOKING_PROFESSOR_ID, BOOKING_PROFESSOR_NAME, RESPONSE_FORM,
};
use crate::models::MeetingResponseKind;
use crate::output::{self, OutputFormat};
use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::validation::parse_leading_int;

#[derive(Clone, Debug)]
struct RunConfig {
    base_url: String,
    per_page: u32,
    storage_path: Option<PathBuf>,
    timeout: Option<u64>,
    no_color: bool,
    output_format: OutputFormat,
    verbose: u8,
    command: Command,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };
    let base_url = args
        .base_url
        .or(cfg.base_url)
        .unwrap_or_else(|| config::DEFAULT_BASE_URL.to_string());
    let per_page = match &args.command {
        Command::Leaderboard(lb) => lb.per_page,
        _ => None,
    }
    .or(cfg.per_page)
    .filter(|n| *n > 0)
    .unwrap_or(DEFAULT_PER_PAGE);
    let storage_path = args
        .storage
        .or(cfg.storage)
        .map(|p| config::expand_tilde(&p))
        .or_else(config::default_storage_path);
    let timeout = args.timeout.or(cfg.timeout).filter(|t| *t > 0);
    let output_format = args
        .output_format
        .as_deref()
        .and_then(OutputFormat::parse)
        .unwrap_or(OutputFormat::Text);

    Ok(RunConfig {
        base_url,
        per_page,
        storage_path,
        timeout,
        no_color,
        output_format,
        verbose: args.verbose,
        command: args.command,
    })
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "englishmaster=warn",
        1 => "englishmaster=info",
        _ => "englishmaster=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_storage(path: Option<&PathBuf>) -> Arc<dyn Storage> {
    match path.map(|p| FileStorage::open(p)) {
        Some(Ok(storage)) => Arc::new(storage),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "local storage unavailable, using memory");
            Arc::new(MemoryStorage::new())
        }
        None => Arc::new(MemoryStorage::new()),
    }
}

fn print_outcome(outcome: &SubmitOutcome, no_color: bool) -> Result<(), String> {
    let kind = if outcome.is_success() {
        BannerKind::Success
    } else {
        BannerKind::Error
    };
    if let Some(message) = outcome.message() {
        println!("{}", output::banner_line(message, kind, no_color));
    }
    match outcome {
        SubmitOutcome::Succeeded(_) | SubmitOutcome::Declined => Ok(()),
        SubmitOutcome::Invalid(m)
        | SubmitOutcome::Rejected(m)
        | SubmitOutcome::TransportFailed(m) => Err(m.clone()),
    }
}

fn submitted(handled: Vec<Handled>) -> Result<SubmitOutcome, String> {
    handled
        .into_iter()
        .find_map(|h| match h {
            Handled::Submitted(outcome) => Some(outcome),
            _ => None,
        })
        .ok_or_else(|| "page is missing the form controls".to_string())
}

async fn ready(
    kind: PageKind,
    run: &RunConfig,
    api: &ApiClient,
    storage: Arc<dyn Storage>,
) -> Result<Bootstrap, String> {
    let page: Page = dom::page(layout::document_for(kind));
    let ctx = Context {
        api: api.clone(),
        page,
        storage,
        per_page: run.per_page,
    };
    let boot = Bootstrap::ready(kind, ctx).await;
    if let Some(err) = boot.failures().first() {
        return Err(err.to_string());
    }
    Ok(boot)
}

async fn fill(boot: &Bootstrap, fields: &[(&str, &str)]) -> Result<(), String> {
    let mut doc = boot.page().lock().await;
    for (id, value) in fields {
        doc.set_value(id, value).map_err(|e| e.to_string())?;
    }
    Ok(())
}

async fn submit(boot: &Bootstrap, form: &str) -> Result<SubmitOutcome, String> {
    submitted(boot.dispatch(PageEvent::Submit { form: form.to_string() }).await)
}

async fn run_book(boot: &Bootstrap, args: &BookArgs) -> Result<SubmitOutcome, String> {
    if let Some(professor_id) = parse_leading_int(args.professor_id.as_str()) {
        boot.dispatch(PageEvent::OpenBooking {
            professor_id,
            professor_name: args.professor_name.clone(),
            now: chrono::Local::now().naive_local(),
        })
        .await;
    }
    fill(
        boot,
        &[
            (BOOKING_PROFESSOR_ID, args.professor_id.as_str()),
            (BOOKING_PROFESSOR_NAME, args.professor_name.as_str()),
            (BOOKING_DATE, args.date.as_str()),
            (BOOKING_MESSAGE, args.message.as_str()),
        ],
    )
    .await?;
    submit(boot, BOOKING_FORM).await
}

async fn run_respond(boot: &Bootstrap, args: &RespondArgs) -> Result<SubmitOutcome, String> {
    let action = MeetingResponseKind::parse(&args.action)
        .ok_or_else(|| format!("invalid action '{}'", args.action))?;
    boot.dispatch(PageEvent::OpenResponse {
        meeting_id: args.meeting_id,
        action,
    })
    .await;
    fill(
        boot,
        &[
            (RESPONSE_MESSAGE, args.message.as_str()),
            (MEETING_LINK, args.link.as_deref().unwrap_or("")),
        ],
    )
    .await?;
    submit(boot, RESPONSE_FORM).await
}

fn ask(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "da")
}

async fn run_leaderboard(run: &RunConfig, api: ApiClient, page_number: u32) -> Result<(), String> {
    let page = dom::page(layout::leaderboard());
    let list = StudentsLeaderboard::bind(api, page.clone(), run.per_page)
        .await
        .map_err(|e| e.to_string())?;
    if let ListState::Failed(e) = list.load(page_number).await.map_err(|e| e.to_string())? {
        return Err(e);
    }
    match run.output_format {
        OutputFormat::Text => print!(
            "{}",
            output::render_students_text(
                &list.rows(),
                list.current_page(),
                list.total_pages(),
                list.current_rank(),
                run.no_color
            )
        ),
        OutputFormat::Json => {
            std::io::stdout()
                .write_all(&output::render_json(&list.rows()))
                .map_err(|e| format!("failed to write output: {e}"))?;
            println!();
        }
        OutputFormat::Html => {
            let doc = page.lock().await;
            for id in [students::TABLE_BODY, students::PAGINATION] {
                println!("{}", doc.get(id).map_err(|e| e.to_string())?.inner_html());
            }
        }
    }
    Ok(())
}

async fn run_professors(run: &RunConfig, api: ApiClient, level: &str) -> Result<(), String> {
    let page = dom::page(layout::leaderboard());
    let list = ProfessorsLeaderboard::bind(api, page.clone())
        .await
        .map_err(|e| e.to_string())?;
    let trigger = layout::filter_button_id(level);
    let state = if page.lock().await.contains(&trigger) {
        list.filter(level, &trigger).await
    } else {
        list.load(Some(level)).await
    }
    .map_err(|e| e.to_string())?;
    if let ListState::Failed(e) = state {
        return Err(e);
    }
    match run.output_format {
        OutputFormat::Text => print!("{}", output::render_professors_text(&list.rows())),
        OutputFormat::Json => {
            std::io::stdout()
                .write_all(&output::render_json(&list.rows()))
                .map_err(|e| format!("failed to write output: {e}"))?;
            println!();
        }
        OutputFormat::Html => {
            let doc = page.lock().await;
            println!("{}", doc.get(professors::GRID).map_err(|e| e.to_string())?.inner_html());
        }
    }
    Ok(())
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    let transport = HttpTransport::new(&run.base_url, run.timeout).map_err(|e| e.to_string())?;
    let api = ApiClient::new(transport);
    let storage = open_storage(run.storage_path.as_ref());
    tracing::info!(base_url = %run.base_url, "client ready");

    let outcome = match &run.command {
        Command::Leaderboard(args) => return run_leaderboard(&run, api, args.page).await,
        Command::Professors(args) => return run_professors(&run, api, &args.level).await,
        Command::Login(args) => {
            let boot = ready(PageKind::Login, &run, &api, storage).await?;
            if let Some(email) = args.email.as_deref() {
                fill(&boot, &[(EMAIL, email)]).await?;
            }
            fill(&boot, &[(PASSWORD, args.password.as_str())]).await?;
            submit(&boot, LOGIN_FORM).await?
        }
        Command::Register(args) => {
            let boot = ready(PageKind::Register, &run, &api, storage).await?;
            fill(
                &boot,
                &[
                    (FIRST_NAME, args.first_name.as_str()),
                    (LAST_NAME, args.last_name.as_str()),
                    (EMAIL, args.email.as_str()),
                    (PASSWORD, args.password.as_str()),
                    (CONFIRM_PASSWORD, args.confirm_password.as_str()),
                ],
            )
            .await?;
            submit(&boot, REGISTER_FORM).await?
        }
        Command::Book(args) => {
            let boot = ready(PageKind::Professors, &run, &api, storage).await?;
            run_book(&boot, args).await?
        }
        Command::Respond(args) => {
            let boot = ready(PageKind::Meetings, &run, &api, storage).await?;
            run_respond(&boot, args).await?
        }
        Command::Cancel(args) => {
            let boot = ready(PageKind::Meetings, &run, &api, storage).await?;
            let confirmed = args.yes || ask(CANCEL_PROMPT);
            submitted(
                boot.dispatch(PageEvent::CancelMeeting {
                    meeting_id: args.meeting_id,
                    confirmed,
                })
                .await,
            )?
        }
    };
    if outcome == SubmitOutcome::Declined && !run.no_color {
        println!("{}", "Anulare abandonată.".dimmed());
    }
    print_outcome(&outcome, run.no_color)
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => {
                if let Err(e) = config::ensure_default_config_file(&path) {
                    eprintln!("warning: {e}");
                }
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;
    init_tracing(run.verbose);
    if run.no_color {
        colored::control::set_override(false);
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
