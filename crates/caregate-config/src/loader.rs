//! Configuration loader with multi-source merging

use crate::{CaregateConfig, Paths};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader with builder pattern
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "CAREGATE".to_string(),
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "CAREGATE")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<CaregateConfig> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults
        let defaults = CaregateConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. User config (~/.config/caregate/config.toml)
        let paths = Paths::new();
        if let Ok(user_config_file) = paths.user_config_file() {
            if user_config_file.exists() {
                builder = builder.add_source(
                    config::File::from(user_config_file)
                        .required(false)
                        .format(config::FileFormat::Toml),
                );
            }
        }

        // 3. Project config (caregate.toml)
        let project_config_file = Paths::project_config_file(&self.project_dir);
        if project_config_file.exists() {
            builder = builder.add_source(
                config::File::from(project_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 4. Local config (caregate.local.toml, gitignored)
        let local_config_file = Paths::local_config_file(&self.project_dir);
        if local_config_file.exists() {
            builder = builder.add_source(
                config::File::from(local_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 5. Environment variables (CAREGATE_*)
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        // Build and deserialize
        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default(self) -> CaregateConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caregate_types::PlanTier;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_defaults_from_empty_dir() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = ConfigLoader::new()
            .with_project_dir(temp_dir.path())
            .with_env_prefix("CAREGATE_TEST_NONE")
            .load()
            .expect("Failed to load config");

        assert_eq!(config.organization.plan_tier, PlanTier::Free);
        assert!(config.roles.is_empty());
    }

    #[test]
    fn project_config_overrides_defaults() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        fs::write(
            Paths::project_config_file(temp_dir.path()),
            r#"
            [organization]
            name = "lakeside-family-practice"
            plan_tier = "enterprise"
            "#,
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_project_dir(temp_dir.path())
            .with_env_prefix("CAREGATE_TEST_NONE")
            .load()
            .expect("Failed to load config");

        assert_eq!(config.organization.name, "lakeside-family-practice");
        assert_eq!(config.organization.plan_tier, PlanTier::Enterprise);
        // Untouched sections keep defaults
        assert!(config.audit.enabled);
    }

    #[test]
    fn local_config_overrides_project_config() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        fs::write(
            Paths::project_config_file(temp_dir.path()),
            "[organization]\nplan_tier = \"starter\"\n",
        )
        .unwrap();
        fs::write(
            Paths::local_config_file(temp_dir.path()),
            "[organization]\nplan_tier = \"professional\"\n",
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_project_dir(temp_dir.path())
            .with_env_prefix("CAREGATE_TEST_NONE")
            .load()
            .expect("Failed to load config");

        assert_eq!(config.organization.plan_tier, PlanTier::Professional);
    }

    #[test]
    fn table_overrides_survive_the_loader() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        fs::write(
            Paths::project_config_file(temp_dir.path()),
            r#"
            [roles.night_auditor.reports]
            view = true
            export = true

            [plans]
            free = ["patientPortal"]
            "#,
        )
        .unwrap();

        let config = ConfigLoader::new()
            .with_project_dir(temp_dir.path())
            .with_env_prefix("CAREGATE_TEST_NONE")
            .load()
            .expect("Failed to load config");

        let (matrix, catalog) = config.build_tables();
        let auditor = caregate_types::RoleId::from_name("night_auditor").unwrap();
        assert!(matrix.permits(
            &auditor,
            caregate_types::PermissionModule::Reports,
            caregate_types::Action::Export
        ));
        assert!(catalog.entitles(PlanTier::Free, caregate_types::ModuleId::PatientPortal));
    }
}
