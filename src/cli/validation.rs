use crate::cli::args::{CliArgs, Command};
use crate::models::MeetingResponseKind;
use crate::output::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.output_format.as_deref() {
        OutputFormat::parse(raw).ok_or_else(|| {
            format!("invalid --output-format '{raw}', expected text, json or html")
        })?;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive number of seconds".to_string());
        }
    }
    if let Some(raw) = args.base_url.as_deref() {
        reqwest::Url::parse(raw).map_err(|e| format!("invalid --base-url '{raw}': {e}"))?;
    }
    match &args.command {
        Command::Leaderboard(lb) => {
            if lb.per_page == Some(0) {
                return Err("invalid per-page, expected positive integer".to_string());
            }
        }
        Command::Respond(r) => {
            MeetingResponseKind::parse(&r.action).ok_or_else(|| {
                format!("invalid --action '{}', expected confirm or reject", r.action)
            })?;
        }
        _ => {}
    }
    Ok(())
}
