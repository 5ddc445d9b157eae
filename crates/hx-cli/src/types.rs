use std::collections::BTreeSet;

use hx_model::{RunConfig, WorkerRoster};

/// Command-line settings that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    /// Replaces the configured roster when non-empty.
    pub agents: Vec<String>,
    /// Enables the visit-status filter; never disables a configured one.
    pub visit_status_filter: bool,
    pub new_patient_marker: Option<String>,
    /// Accounts loaded from an escalation tracker, merged into the configured set.
    pub escalated_accounts: BTreeSet<String>,
}

impl RunOverrides {
    pub fn apply(self, mut config: RunConfig) -> RunConfig {
        if !self.agents.is_empty() {
            config.roster = WorkerRoster::new(self.agents);
        }
        if self.visit_status_filter {
            config.visit_status_filter = true;
        }
        if let Some(marker) = self.new_patient_marker {
            config.new_patient_marker = marker;
        }
        config.escalated_accounts.extend(self.escalated_accounts);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_config() {
        let config = RunConfig::new().with_visit_status_filter(true);
        assert_eq!(RunOverrides::default().apply(config.clone()), config);
    }

    #[test]
    fn test_agents_replace_roster() {
        let overrides = RunOverrides {
            agents: vec!["Ana".to_string(), "Ben".to_string()],
            new_patient_marker: Some("initial".to_string()),
            escalated_accounts: BTreeSet::from(["42".to_string()]),
            ..RunOverrides::default()
        };
        let config = overrides.apply(RunConfig::new());
        assert_eq!(config.roster, WorkerRoster::new(["Ana", "Ben"]));
        assert_eq!(config.new_patient_marker, "initial");
        assert!(config.escalated_accounts.contains("42"));
        assert!(!config.visit_status_filter);
    }
}
