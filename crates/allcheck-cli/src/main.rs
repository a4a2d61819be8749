//! `allcheck` - audit a captured hierarchy snapshot from the command line.
//!
//! Exit codes: 0 when the audit passes, 1 when results reach the failure
//! threshold, 2 when an input cannot be read or is invalid.

use allcheck::audit::AuditRunner;
use allcheck::checks::{OcrResult, Parameters};
use allcheck::config::AuditConfig;
use allcheck::suggestions::FixSuggestionEngine;
use allcheck::{CheckResult, ConfigError, Hierarchy, HierarchyError, HierarchySnapshot};
use clap::{Parser, ValueEnum};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "allcheck", version, about = "Accessibility audit of a UI hierarchy snapshot")]
struct Cli {
  /// Hierarchy snapshot (JSON)
  snapshot: PathBuf,

  /// Text recognition results for the capture (JSON)
  #[arg(long)]
  ocr: Option<PathBuf>,

  /// Audit configuration (JSON)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Only evaluate the subtree of this element id (traversal order)
  #[arg(long)]
  root: Option<u32>,

  #[arg(long, value_enum, default_value_t = Format::Text)]
  format: Format,

  /// Include fix suggestions
  #[arg(long)]
  suggest: bool,

  /// Verbosity level (-v, -vv)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
  Text,
  Json,
}

#[derive(Debug, thiserror::Error)]
enum InputError {
  #[error("Cannot read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("Malformed JSON in {}: {source}", path.display())]
  Json {
    path: PathBuf,
    source: serde_json::Error,
  },

  #[error("Invalid hierarchy: {0}")]
  Hierarchy(#[from] HierarchyError),

  #[error("Invalid configuration: {0}")]
  Config(#[from] ConfigError),
}

/// Everything loaded from disk for one audit.
struct Inputs {
  hierarchy: Hierarchy,
  params: Parameters,
  runner: AuditRunner,
}

fn read(path: &Path) -> Result<String, InputError> {
  std::fs::read_to_string(path).map_err(|source| InputError::Read {
    path: path.to_owned(),
    source,
  })
}

fn load(cli: &Cli) -> Result<Inputs, InputError> {
  let json_error = |path: &Path| {
    let path = path.to_owned();
    move |source: serde_json::Error| InputError::Json { path, source }
  };

  let snapshot = HierarchySnapshot::from_json(&read(&cli.snapshot)?).map_err(json_error(&cli.snapshot))?;
  let hierarchy = snapshot.build()?;

  let mut config = match &cli.config {
    Some(path) => AuditConfig::from_json(&read(path)?)?,
    None => AuditConfig::default(),
  };
  if let Some(root) = cli.root {
    config.root = Some(root);
  }

  let mut params = Parameters::new();
  if let Some(path) = &cli.ocr {
    let ocr = OcrResult::from_json(&read(path)?).map_err(json_error(path))?;
    log::debug!("Loaded {} OCR paragraphs", ocr.paragraphs.len());
    params = params.with_ocr_result(ocr);
  }
  let params = config.parameters(params);

  Ok(Inputs {
    hierarchy,
    params,
    runner: config.into_runner()?,
  })
}

fn print_text(inputs: &Inputs, results: &[CheckResult], engine: Option<&FixSuggestionEngine>) {
  let Inputs {
    hierarchy: h,
    params,
    runner,
  } = inputs;
  for result in results.iter().filter(|r| r.severity().is_classified()) {
    let title = runner
      .title_for(h, result)
      .unwrap_or_else(|| result.check_id().to_owned());
    let message = runner.message_for(h, result).unwrap_or_default();
    match result.element() {
      Some(id) => println!("{} {title} (element {id}): {message}", result.severity()),
      None => println!("{} {title}: {message}", result.severity()),
    }
    if let Some(engine) = engine {
      for suggestion in engine.suggest(result, h, Some(params)) {
        match serde_json::to_string(&suggestion.kind) {
          Ok(kind) => println!("    suggest [{}] {kind}", suggestion.priority),
          Err(err) => log::warn!("Cannot render suggestion: {err}"),
        }
      }
    }
  }
  println!("{}", allcheck::audit::Summary::of(results));
}

fn print_json(inputs: &Inputs, results: &[CheckResult], passed: bool, engine: Option<&FixSuggestionEngine>) {
  let Inputs {
    hierarchy: h,
    params,
    runner,
  } = inputs;
  let entries: Vec<_> = results
    .iter()
    .map(|result| {
      let mut entry = json!({
        "result": result,
        "message": runner.message_for(h, result),
      });
      if let (Some(engine), Some(object)) = (engine, entry.as_object_mut()) {
        object.insert(
          "suggestions".to_owned(),
          json!(engine.suggest(result, h, Some(params))),
        );
      }
      entry
    })
    .collect();
  let report = json!({
    "passed": passed,
    "summary": allcheck::audit::Summary::of(results),
    "results": entries,
  });
  match serde_json::to_string_pretty(&report) {
    Ok(out) => println!("{out}"),
    Err(err) => log::error!("Cannot render report: {err}"),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = match cli.verbose {
    0 => "warn",
    1 => "info",
    _ => "debug",
  };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

  let inputs = match load(&cli) {
    Ok(inputs) => inputs,
    Err(err) => {
      eprintln!("error: {err}");
      return ExitCode::from(2);
    }
  };

  let (results, failure) = match inputs.runner.run(&inputs.hierarchy, Some(&inputs.params)) {
    Ok(results) => (results, None),
    Err(failure) => {
      let report = failure.report().to_owned();
      (failure.into_results(), Some(report))
    }
  };

  let engine = cli.suggest.then(FixSuggestionEngine::with_defaults);
  match cli.format {
    Format::Text => {
      print_text(&inputs, &results, engine.as_ref());
      if let Some(report) = &failure {
        eprintln!("{report}");
      }
    }
    Format::Json => print_json(&inputs, &results, failure.is_none(), engine.as_ref()),
  }

  if failure.is_some() {
    ExitCode::from(1)
  } else {
    ExitCode::SUCCESS
  }
}
