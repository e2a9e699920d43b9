pub mod checks;
pub mod fixture;
pub mod reports;

use bestsellers_core::WidgetConfig;
use colored::Colorize;
use serde::Serialize;
use std::time::{Duration, Instant};

pub use checks::CheckFn;
pub use fixture::Fixture;

/// Logic half of a scenario: named checks run against a fixture.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub checks: Vec<(&'static str, CheckFn)>,
}

impl TestScenario {
    #[must_use]
    pub fn new(name: impl Into<String>, checks: Vec<(&'static str, CheckFn)>) -> Self {
        Self {
            name: name.into(),
            checks,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub fixture: String,
    pub passed: bool,
    pub checks_run: usize,
    pub failures: Vec<String>,
    pub duration: Duration,
}

pub struct LogicTester {
    config: WidgetConfig,
    verbose: bool,
}

impl LogicTester {
    #[must_use]
    pub fn new(config: WidgetConfig, verbose: bool) -> Self {
        Self { config, verbose }
    }

    #[must_use]
    pub fn run_scenario(&self, scenario: &TestScenario, fixture: &Fixture) -> ScenarioResult {
        let start = Instant::now();
        let mut failures = Vec::new();

        for (name, check) in &scenario.checks {
            match check(fixture, &self.config) {
                Ok(()) => {
                    if self.verbose {
                        println!("  ✔️  {} / {name}", scenario.name);
                    }
                }
                Err(err) => {
                    log::debug!("{} / {name} failed: {err:#}", scenario.name);
                    failures.push(format!("{name}: {err:#}"));
                }
            }
        }

        let result = ScenarioResult {
            scenario_name: scenario.name.clone(),
            fixture: fixture.name.clone(),
            passed: failures.is_empty(),
            checks_run: scenario.checks.len(),
            failures,
            duration: start.elapsed(),
        };

        let status = if result.passed {
            "✅".green()
        } else {
            "❌".red()
        };
        println!(
            "{status} {} ({} checks) - {:?}",
            result.scenario_name, result.checks_run, result.duration
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    fn always_fails(_fixture: &Fixture, _config: &WidgetConfig) -> anyhow::Result<()> {
        bail!("nope")
    }

    #[test]
    fn failing_check_marks_scenario_failed() {
        let tester = LogicTester::new(WidgetConfig::default_config(), false);
        let fixture = Fixture::load_default().expect("fixture");
        let scenario = TestScenario::new(
            "mixed",
            vec![
                ("resolve", checks::products_resolve as CheckFn),
                ("fails", always_fails as CheckFn),
            ],
        );
        let result = tester.run_scenario(&scenario, &fixture);
        assert!(!result.passed);
        assert_eq!(result.checks_run, 2);
        assert_eq!(result.failures, vec!["fails: nope".to_string()]);
    }
}
