/*!
Serializable audit configuration.

[`AuditConfig`] is the JSON face of [`AuditRunnerBuilder`]: a preset plus
extra checks, a sub-root, suppressions and the failure threshold. Every id
is validated when the runner is built.

```json
{
  "preset": "latest",
  "threshold": "warning",
  "suppress_checks": ["duplicate_speakable_text"],
  "suppress_reasons": [{ "check": "touch_target_size", "reason": 2 }],
  "touch_target_size_dp": 44
}
```
*/

use crate::audit::{AuditRunner, AuditRunnerBuilder, Matcher};
use crate::checks::{self, Parameters, Preset};
use crate::types::{ConfigError, ConfigResult, ElementId, Locale, Severity};
use serde::{Deserialize, Serialize};

/// One suppressed `(check, reason)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressedReason {
  pub check: String,
  pub reason: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
  /// "latest" or "no_checks"
  pub preset: String,
  /// Bundled check ids appended after the preset
  pub checks: Vec<String>,
  /// Element id (traversal order) to restrict evaluation to
  pub root: Option<u32>,
  /// "info", "warning", "error" or "none"
  pub threshold: String,
  /// Message locale. Defaults to the hierarchy's device locale.
  pub locale: Option<String>,
  /// Checks whose results are all suppressed
  pub suppress_checks: Vec<String>,
  pub suppress_reasons: Vec<SuppressedReason>,
  pub touch_target_size_dp: Option<u32>,
  pub ocr_confidence_threshold: Option<f32>,
}

impl Default for AuditConfig {
  fn default() -> Self {
    Self {
      preset: "latest".to_owned(),
      checks: Vec::new(),
      root: None,
      threshold: "error".to_owned(),
      locale: None,
      suppress_checks: Vec::new(),
      suppress_reasons: Vec::new(),
      touch_target_size_dp: None,
      ocr_confidence_threshold: None,
    }
  }
}

impl AuditConfig {
  pub fn from_json(json: &str) -> ConfigResult<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Parse a threshold name. "none" disables failures.
  pub fn parse_threshold(name: &str) -> ConfigResult<Severity> {
    match name.to_ascii_lowercase().as_str() {
      "info" => Ok(Severity::Info),
      "warning" => Ok(Severity::Warning),
      "error" => Ok(Severity::Error),
      "none" => Ok(Severity::Suppressed),
      _ => Err(ConfigError::InvalidThreshold(name.to_owned())),
    }
  }

  /// A runner builder with everything in this config applied.
  pub fn builder(&self) -> ConfigResult<AuditRunnerBuilder> {
    let preset = Preset::from_name(&self.preset)
      .ok_or_else(|| ConfigError::UnknownPreset(self.preset.clone()))?;
    let mut builder = AuditRunner::builder()
      .preset(preset)
      .threshold(Self::parse_threshold(&self.threshold)?);

    for id in &self.checks {
      let check = checks::by_id(id).ok_or_else(|| ConfigError::UnknownCheck(id.clone()))?;
      builder = builder.shared_check(check);
    }

    if let Some(root) = self.root {
      builder = builder.root(ElementId(root));
    }
    if let Some(locale) = &self.locale {
      builder = builder.locale(Locale::new(locale.as_str()));
    }
    if let Some(matcher) = self.suppression()? {
      builder = builder.suppress(matcher);
    }
    Ok(builder)
  }

  pub fn into_runner(self) -> ConfigResult<AuditRunner> {
    Ok(self.builder()?.build())
  }

  /// Apply the parameter overrides in this config to `params`.
  pub fn parameters(&self, params: Parameters) -> Parameters {
    let params = match self.touch_target_size_dp {
      Some(size) => params.with_custom_touch_target_size_dp(size),
      None => params,
    };
    match self.ocr_confidence_threshold {
      Some(threshold) => params.with_ocr_confidence_threshold(threshold),
      None => params,
    }
  }

  fn suppression(&self) -> ConfigResult<Option<Matcher>> {
    let known = |id: &str| {
      checks::by_id(id)
        .map(|_| ())
        .ok_or_else(|| ConfigError::UnknownCheck(id.to_owned()))
    };

    let mut matchers = Vec::new();
    if !self.suppress_checks.is_empty() {
      for id in &self.suppress_checks {
        known(id)?;
      }
      matchers.push(Matcher::by_checks(self.suppress_checks.iter().cloned()));
    }
    for reason in &self.suppress_reasons {
      known(&reason.check)?;
      matchers.push(Matcher::by_reason(reason.check.clone(), reason.reason));
    }

    Ok((!matchers.is_empty()).then(|| Matcher::any(matchers)))
  }
}
