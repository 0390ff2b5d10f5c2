//! Command-line driver for `formstate`.
//!
//! ```text
//! formstate <form.json> [script.json]
//! ```
//!
//! Loads a form declaration, renders it, then replays the script's change
//! and submit steps, printing the form after every step and each submit
//! result as JSON.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use formstate::prelude::*;
use formstate::widgets::render_form;
use log::{error, info};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

const DEFAULT_LOG_FILE: &str = "formstate.log";

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: formstate <form.json> [script.json]")]
    Usage,

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid form: {0}")]
    Form(#[from] FormError),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// A form declaration file.
#[derive(Debug, Deserialize)]
struct FormFile {
    #[serde(flatten)]
    config: FormConfig,
    children: Vec<Node>,
}

/// One scripted step: `{"change": {...}}`, `{"submit": {}}` or `"submit"`.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(untagged)]
enum Step {
    Event(Event),
    Keyword(Keyword),
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Event {
    Change {
        #[serde(default)]
        name: Option<String>,
        value: String,
    },
    Submit {},
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Keyword {
    Submit,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let mut args = std::env::args().skip(1);
    let form_path = args.next().map(PathBuf::from).ok_or(CliError::Usage)?;
    let script_path = args.next().map(PathBuf::from);

    init_logger()?;

    let form: FormFile = read_json(&form_path)?;
    let steps: Vec<Step> = match &script_path {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    info!(
        "Loaded {} with {} scripted steps",
        form_path.display(),
        steps.len()
    );

    let mut controller =
        FormController::new(form.children, form.config)?.on_submit(|result, _state| {
            match serde_json::to_string_pretty(result) {
                Ok(json) => println!("{json}"),
                Err(e) => error!("Failed to serialize submit result: {e}"),
            }
        });

    print_form(&mut controller);

    for step in steps {
        match step {
            Step::Event(Event::Change { name, value }) => {
                if let Err(e) = controller.dispatch(ChangeEvent { name, value }) {
                    eprintln!("Skipped change: {e}");
                }
            }
            Step::Event(Event::Submit {}) | Step::Keyword(Keyword::Submit) => {
                let mut event = SubmitEvent::new();
                controller.handle_submit(Some(&mut event));
            }
        }

        if controller.is_dirty() {
            print_form(&mut controller);
        }
    }

    Ok(())
}

fn init_logger() -> Result<(), CliError> {
    let path = std::env::var("FORMSTATE_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.into());
    let level = std::env::var("FORMSTATE_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Debug);

    let log_file = File::create(&path).map_err(|source| CliError::Io {
        path: path.into(),
        source,
    })?;
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn print_form(controller: &mut FormController) {
    for line in render_form(&controller.render()) {
        println!("{line}");
    }
    println!();
    controller.clear_dirty();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_accepts_map_and_bare_submit() {
        let json = r#"[
            {"change": {"name": "title", "value": "x"}},
            {"submit": {}},
            {"change": {"value": "orphan"}},
            "submit"
        ]"#;
        let steps: Vec<Step> = serde_json::from_str(json).unwrap();

        assert_eq!(
            steps,
            [
                Step::Event(Event::Change {
                    name: Some("title".into()),
                    value: "x".into(),
                }),
                Step::Event(Event::Submit {}),
                Step::Event(Event::Change {
                    name: None,
                    value: "orphan".into(),
                }),
                Step::Keyword(Keyword::Submit),
            ]
        );
    }

    #[test]
    fn test_script_rejects_unknown_step() {
        assert!(serde_json::from_str::<Vec<Step>>(r#"[{"reset": {}}]"#).is_err());
        assert!(serde_json::from_str::<Vec<Step>>(r#"["change"]"#).is_err());
    }

    #[test]
    fn test_sample_form_file() {
        let form: FormFile = serde_json::from_str(include_str!("../forms/article.json")).unwrap();
        assert_eq!(form.config.visible_submit_label(), Some("Submit form"));
        assert_eq!(form.config.values.get("color").map(String::as_str), Some("g"));

        let controller = FormController::new(form.children, form.config).unwrap();
        assert_eq!(controller.state().names(), ["title", "desc", "email", "age", "color"]);
        assert_eq!(controller.state().get("color").unwrap().value, "g");
    }

    #[test]
    fn test_sample_script_file() {
        let steps: Vec<Step> =
            serde_json::from_str(include_str!("../forms/article-script.json")).unwrap();
        let submits = steps
            .iter()
            .filter(|step| matches!(step, Step::Event(Event::Submit {}) | Step::Keyword(_)))
            .count();
        assert_eq!(submits, 2);
    }
}
