//! Configuration validation.

use crate::schema::Config;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_logging(config, &mut result);
        result
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.trim();
        if level.is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "Log level cannot be empty",
            ));
        } else if level.contains('=') || level.contains(',') {
            // Full filter directives are accepted as-is by the subscriber.
            result.add_warning(ValidationWarning::new(
                "logging.level",
                "Log level is a filter directive, it will not be checked",
            ));
        } else if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!("Unknown log level '{}', valid values: {:?}", level, LOG_LEVELS),
            ));
        }

        if let Some(dir) = &config.logging.dir {
            if dir.exists() && !dir.is_dir() {
                result.add_error(ValidationError::new(
                    "logging.dir",
                    format!("Log path is not a directory: {:?}", dir),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
