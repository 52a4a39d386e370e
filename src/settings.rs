//! Site settings and localized messages.
//!
//! Every timing constant, threshold and user-facing string of the site lives
//! in [`SiteSettings`]. Settings are layered: built-in defaults, then an
//! optional TOML file, then `OLOKUN_*` environment variables. The result is
//! validated with error accumulation, so every bad value is reported at once.
//!
//! ```ignore
//! use olokun_site::SiteSettings;
//!
//! // Reads $OLOKUN_SETTINGS (if set) and OLOKUN_* overrides
//! let settings = SiteSettings::load()?;
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stillwater::Validation;

use crate::env::{RealEnv, SettingsEnv};
use crate::error::{SettingsError, SettingsErrors, SettingsValidation};
use crate::validate::is_valid_email;

/// Prefix of environment variables that override settings.
pub const ENV_PREFIX: &str = "OLOKUN_";

/// Variable holding the path of the settings file for [`SiteSettings::load`].
pub const SETTINGS_PATH_VAR: &str = "OLOKUN_SETTINGS";

const MAX_PARTICLES: usize = 500;

/// User-facing text. Defaults are the site's Portuguese copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub required: String,
    pub invalid_email: String,
    /// Submit button label while a submission is in flight.
    pub sending: String,
    pub success: String,
    /// Placeholder for an empty phone number in the mail body.
    pub not_provided: String,
    /// Placeholder for an empty message in the mail body.
    pub no_message: String,
    pub subject_prefix: String,
    pub label_name: String,
    pub label_company: String,
    pub label_email: String,
    pub label_phone: String,
    pub label_service: String,
    pub label_message: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "Este campo é obrigatório".to_string(),
            invalid_email: "Por favor, insira um e-mail válido".to_string(),
            sending: "Enviando...".to_string(),
            success: "Mensagem enviada com sucesso! Entraremos em contato em breve.".to_string(),
            not_provided: "Não informado".to_string(),
            no_message: "Nenhuma mensagem adicional.".to_string(),
            subject_prefix: "Contato".to_string(),
            label_name: "Nome".to_string(),
            label_company: "Empresa".to_string(),
            label_email: "E-mail".to_string(),
            label_phone: "Telefone".to_string(),
            label_service: "Serviço de Interesse".to_string(),
            label_message: "Mensagem".to_string(),
        }
    }
}

/// Behavior settings for the whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Address the contact mail link is addressed to.
    pub recipient: String,
    /// Artificial latency between accepting a submission and handing it off.
    pub submit_delay_ms: u64,
    pub notification_display_ms: u64,
    /// Must match the CSS fade-out transition.
    pub notification_fade_ms: u64,
    /// Height of the fixed header, subtracted from anchor scroll targets.
    pub header_offset: f64,
    /// Viewports at or below this width are treated as mobile.
    pub mobile_breakpoint: f64,
    pub particle_count: usize,
    pub resize_debounce_ms: u64,
    pub typing_speed_ms: u64,
    pub typing_start_delay_ms: u64,
    pub counter_steps: u32,
    pub counter_interval_ms: u64,
    pub navbar_scrolled_threshold: f64,
    pub navbar_hide_threshold: f64,
    pub section_activation_offset: f64,
    pub parallax_rate: f64,
    pub messages: Messages,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            recipient: "olokun.ambiental@gmail.com".to_string(),
            submit_delay_ms: 1500,
            notification_display_ms: 5000,
            notification_fade_ms: 300,
            header_offset: 80.0,
            mobile_breakpoint: 768.0,
            particle_count: 50,
            resize_debounce_ms: 250,
            typing_speed_ms: 50,
            typing_start_delay_ms: 1000,
            counter_steps: 50,
            counter_interval_ms: 50,
            navbar_scrolled_threshold: 100.0,
            navbar_hide_threshold: 200.0,
            section_activation_offset: 200.0,
            parallax_rate: -0.5,
            messages: Messages::default(),
        }
    }
}

impl SiteSettings {
    /// Load settings from the real environment.
    ///
    /// The file named by `OLOKUN_SETTINGS` is read when that variable is set.
    pub fn load() -> Result<Self, SettingsErrors> {
        let env = RealEnv::new();
        let path = env.get_env(SETTINGS_PATH_VAR).map(PathBuf::from);
        Self::load_with_env(path.as_deref(), &env)
    }

    /// Load settings through an injected environment.
    pub fn load_with_env(
        path: Option<&Path>,
        env: &dyn SettingsEnv,
    ) -> Result<Self, SettingsErrors> {
        let mut settings = match path {
            Some(path) => Self::read_file(path, env)?,
            None => Self::default(),
        };

        settings.apply_env(env)?;

        match settings.validate() {
            Validation::Success(()) => {
                tracing::debug!(recipient = %settings.recipient, "site settings loaded");
                Ok(settings)
            }
            Validation::Failure(errors) => Err(errors),
        }
    }

    /// Parse settings from TOML text. Missing keys keep their defaults.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(source: &str, source_name: &str) -> Result<Self, SettingsErrors> {
        toml::from_str(source).map_err(|e| {
            SettingsErrors::single(SettingsError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })
        })
    }

    fn read_file(path: &Path, env: &dyn SettingsEnv) -> Result<Self, SettingsErrors> {
        let name = path.display().to_string();
        if !env.file_exists(path) {
            return Err(SettingsErrors::single(SettingsError::Io {
                path: name,
                message: "settings file not found".to_string(),
            }));
        }
        let content = env.read_file(path).map_err(|e| {
            SettingsErrors::single(SettingsError::Io {
                path: name.clone(),
                message: e.to_string(),
            })
        })?;

        #[cfg(feature = "toml")]
        {
            Self::from_toml_str(&content, &name)
        }

        #[cfg(not(feature = "toml"))]
        {
            let _ = content;
            Err(SettingsErrors::single(SettingsError::Parse {
                source_name: name,
                message: "settings files require the `toml` feature".to_string(),
            }))
        }
    }

    /// Apply `OLOKUN_*` overrides, collecting every unparsable value.
    fn apply_env(&mut self, env: &dyn SettingsEnv) -> Result<(), SettingsErrors> {
        let mut vars = env.env_vars_with_prefix(ENV_PREFIX);
        vars.sort();

        let mut errors = Vec::new();
        for (var, value) in vars {
            let key = &var[ENV_PREFIX.len()..];
            let applied = match key {
                "RECIPIENT" => {
                    self.recipient = value.clone();
                    Ok(())
                }
                "SUBMIT_DELAY_MS" => parse_env(&var, &value).map(|v| self.submit_delay_ms = v),
                "NOTIFICATION_DISPLAY_MS" => {
                    parse_env(&var, &value).map(|v| self.notification_display_ms = v)
                }
                "NOTIFICATION_FADE_MS" => {
                    parse_env(&var, &value).map(|v| self.notification_fade_ms = v)
                }
                "HEADER_OFFSET" => parse_env(&var, &value).map(|v| self.header_offset = v),
                "MOBILE_BREAKPOINT" => parse_env(&var, &value).map(|v| self.mobile_breakpoint = v),
                "PARTICLE_COUNT" => parse_env(&var, &value).map(|v| self.particle_count = v),
                "RESIZE_DEBOUNCE_MS" => {
                    parse_env(&var, &value).map(|v| self.resize_debounce_ms = v)
                }
                "TYPING_SPEED_MS" => parse_env(&var, &value).map(|v| self.typing_speed_ms = v),
                "TYPING_START_DELAY_MS" => {
                    parse_env(&var, &value).map(|v| self.typing_start_delay_ms = v)
                }
                "COUNTER_STEPS" => parse_env(&var, &value).map(|v| self.counter_steps = v),
                "COUNTER_INTERVAL_MS" => {
                    parse_env(&var, &value).map(|v| self.counter_interval_ms = v)
                }
                "NAVBAR_SCROLLED_THRESHOLD" => {
                    parse_env(&var, &value).map(|v| self.navbar_scrolled_threshold = v)
                }
                "NAVBAR_HIDE_THRESHOLD" => {
                    parse_env(&var, &value).map(|v| self.navbar_hide_threshold = v)
                }
                "SECTION_ACTIVATION_OFFSET" => {
                    parse_env(&var, &value).map(|v| self.section_activation_offset = v)
                }
                "PARALLAX_RATE" => parse_env(&var, &value).map(|v| self.parallax_rate = v),
                SETTINGS_FILE_KEY => continue,
                _ => {
                    tracing::debug!(%var, "ignoring unknown settings override");
                    continue;
                }
            };

            match applied {
                Ok(()) => tracing::debug!(%var, "settings override applied"),
                Err(e) => errors.push(e),
            }
        }

        match SettingsErrors::from_vec(errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }

    /// Check every setting, accumulating all failures.
    pub fn validate(&self) -> SettingsValidation<()> {
        let checks = vec![
            check(is_valid_email(&self.recipient), "recipient", "must be a valid email"),
            check(self.submit_delay_ms > 0, "submit_delay_ms", "must be positive"),
            check(
                self.notification_display_ms > 0,
                "notification_display_ms",
                "must be positive",
            ),
            check(self.notification_fade_ms > 0, "notification_fade_ms", "must be positive"),
            check(self.mobile_breakpoint > 0.0, "mobile_breakpoint", "must be positive"),
            check(
                self.particle_count <= MAX_PARTICLES,
                "particle_count",
                "must be at most 500",
            ),
            check(self.resize_debounce_ms > 0, "resize_debounce_ms", "must be positive"),
            check(self.typing_speed_ms > 0, "typing_speed_ms", "must be positive"),
            check(self.counter_steps >= 1, "counter_steps", "must be at least 1"),
            check(self.counter_interval_ms > 0, "counter_interval_ms", "must be positive"),
            check(self.header_offset.is_finite(), "header_offset", "must be finite"),
            check(self.parallax_rate.is_finite(), "parallax_rate", "must be finite"),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }

    pub fn notification_fade(&self) -> Duration {
        Duration::from_millis(self.notification_fade_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn typing_speed(&self) -> Duration {
        Duration::from_millis(self.typing_speed_ms)
    }

    pub fn typing_start_delay(&self) -> Duration {
        Duration::from_millis(self.typing_start_delay_ms)
    }

    pub fn counter_interval(&self) -> Duration {
        Duration::from_millis(self.counter_interval_ms)
    }

    /// Check if a viewport width counts as desktop.
    pub fn is_desktop(&self, viewport_width: f64) -> bool {
        viewport_width > self.mobile_breakpoint
    }
}

const SETTINGS_FILE_KEY: &str = "SETTINGS";

fn check(ok: bool, path: &str, message: &str) -> SettingsValidation<()> {
    if ok {
        Validation::Success(())
    } else {
        Validation::Failure(SettingsErrors::single(SettingsError::invalid(path, message)))
    }
}

fn parse_env<T: FromStr>(var: &str, value: &str) -> Result<T, SettingsError> {
    value.trim().parse::<T>().map_err(|_| SettingsError::InvalidEnv {
        var: var.to_string(),
        expected: std::any::type_name::<T>(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnv;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SiteSettings::default();
        assert!(settings.validate().is_success());
        assert_eq!(settings.submit_delay(), Duration::from_millis(1500));
        assert_eq!(settings.notification_display(), Duration::from_secs(5));
        assert_eq!(settings.notification_fade(), Duration::from_millis(300));
    }

    #[test]
    fn test_validate_accumulates_all_errors() {
        let settings = SiteSettings {
            recipient: "not-an-email".to_string(),
            submit_delay_ms: 0,
            particle_count: 10_000,
            ..SiteSettings::default()
        };

        match settings.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.to_string().contains("recipient")));
                assert!(errors.iter().any(|e| e.to_string().contains("submit_delay_ms")));
                assert!(errors.iter().any(|e| e.to_string().contains("particle_count")));
            }
            Validation::Success(()) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_env_overrides() {
        let env = MockEnv::new()
            .with_env("OLOKUN_RECIPIENT", "vendas@example.com")
            .with_env("OLOKUN_SUBMIT_DELAY_MS", "10")
            .with_env("OLOKUN_MOBILE_BREAKPOINT", "640.5")
            .with_env("OLOKUN_SOMETHING_ELSE", "ignored");

        let settings = SiteSettings::load_with_env(None, &env).unwrap();
        assert_eq!(settings.recipient, "vendas@example.com");
        assert_eq!(settings.submit_delay_ms, 10);
        assert_eq!(settings.mobile_breakpoint, 640.5);
    }

    #[test]
    fn test_every_tunable_has_an_env_override() {
        let env = MockEnv::new()
            .with_env("OLOKUN_NOTIFICATION_DISPLAY_MS", "4000")
            .with_env("OLOKUN_NOTIFICATION_FADE_MS", "200")
            .with_env("OLOKUN_HEADER_OFFSET", "64")
            .with_env("OLOKUN_PARTICLE_COUNT", "12")
            .with_env("OLOKUN_RESIZE_DEBOUNCE_MS", "100")
            .with_env("OLOKUN_TYPING_SPEED_MS", "30")
            .with_env("OLOKUN_TYPING_START_DELAY_MS", "500")
            .with_env("OLOKUN_COUNTER_STEPS", "20")
            .with_env("OLOKUN_COUNTER_INTERVAL_MS", "40")
            .with_env("OLOKUN_NAVBAR_SCROLLED_THRESHOLD", "60")
            .with_env("OLOKUN_NAVBAR_HIDE_THRESHOLD", "300")
            .with_env("OLOKUN_SECTION_ACTIVATION_OFFSET", "150")
            .with_env("OLOKUN_PARALLAX_RATE", "-0.25");

        let settings = SiteSettings::load_with_env(None, &env).unwrap();
        assert_eq!(settings.notification_display_ms, 4000);
        assert_eq!(settings.notification_fade_ms, 200);
        assert_eq!(settings.header_offset, 64.0);
        assert_eq!(settings.particle_count, 12);
        assert_eq!(settings.resize_debounce_ms, 100);
        assert_eq!(settings.typing_speed_ms, 30);
        assert_eq!(settings.typing_start_delay_ms, 500);
        assert_eq!(settings.counter_steps, 20);
        assert_eq!(settings.counter_interval_ms, 40);
        assert_eq!(settings.navbar_scrolled_threshold, 60.0);
        assert_eq!(settings.navbar_hide_threshold, 300.0);
        assert_eq!(settings.section_activation_offset, 150.0);
        assert_eq!(settings.parallax_rate, -0.25);
    }

    #[test]
    fn test_non_finite_values_name_their_field() {
        let settings = SiteSettings {
            parallax_rate: f64::NAN,
            ..SiteSettings::default()
        };

        match settings.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.first().to_string().contains("parallax_rate"));
            }
            Validation::Success(()) => panic!("expected failure"),
        }

        let env = MockEnv::new().with_env("OLOKUN_HEADER_OFFSET", "inf");
        let errors = SiteSettings::load_with_env(None, &env).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.first().to_string().contains("header_offset"));
    }

    #[test]
    fn test_env_parse_errors_accumulate() {
        let env = MockEnv::new()
            .with_env("OLOKUN_SUBMIT_DELAY_MS", "soon")
            .with_env("OLOKUN_PARTICLE_COUNT", "many");

        let errors = SiteSettings::load_with_env(None, &env).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, SettingsError::InvalidEnv { .. })));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let env = MockEnv::new();
        let errors = SiteSettings::load_with_env(Some(Path::new("site.toml")), &env).unwrap_err();
        match errors.first() {
            SettingsError::Io { path, message } => {
                assert_eq!(path, "site.toml");
                assert_eq!(message, "settings file not found");
            }
            other => panic!("expected an Io error, got {other:?}"),
        }
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_keeps_defaults_for_missing_keys() {
        let settings = SiteSettings::from_toml_str(
            r#"
            submit_delay_ms = 200

            [messages]
            success = "Thanks!"
            "#,
            "site.toml",
        )
        .unwrap();

        assert_eq!(settings.submit_delay_ms, 200);
        assert_eq!(settings.messages.success, "Thanks!");
        assert_eq!(settings.messages.required, Messages::default().required);
        assert_eq!(settings.notification_fade_ms, 300);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_parse_error() {
        let errors = SiteSettings::from_toml_str("submit_delay_ms = \"fast\"", "site.toml")
            .unwrap_err();
        assert!(matches!(errors.first(), SettingsError::Parse { .. }));
    }

    #[test]
    fn test_is_desktop() {
        let settings = SiteSettings::default();
        assert!(settings.is_desktop(1024.0));
        assert!(!settings.is_desktop(768.0));
    }
}
