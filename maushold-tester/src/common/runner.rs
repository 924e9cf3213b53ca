use colored::Colorize;
use maushold_core::{MausholdApi, SandboxBackend};
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};

use crate::common::scenario::{CombinedScenario, ScenarioCtx};
use crate::http::gateway_api;

/// Outcome of one scenario for one seed on one target. Durations serialize
/// as whole milliseconds.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    /// Where the scenario ran: `sandbox`, `api` or a browser name.
    pub target: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(serialize_with = "millis")]
    pub average_duration: Duration,
    #[serde(serialize_with = "millis_each")]
    pub performance_data: Vec<Duration>,
}

impl ScenarioResult {
    pub fn from_runs(
        scenario_name: &str,
        target: &str,
        seed: u64,
        iterations_run: usize,
        failures: Vec<String>,
        performance_data: Vec<Duration>,
    ) -> Self {
        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };
        Self {
            scenario_name: scenario_name.to_string(),
            target: target.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run,
            successful_iterations: performance_data.len(),
            failures,
            average_duration,
            performance_data,
        }
    }
}

/// Backend the workflow scenarios talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiTarget {
    /// Fresh in-memory backend per iteration, seeded from the run seed.
    Sandbox,
    /// Live deployment behind a gateway.
    Gateway { base_url: String },
}

impl ApiTarget {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Gateway { .. } => "api",
        }
    }
}

pub struct ApiRunner {
    target: ApiTarget,
    verbose: bool,
}

impl ApiRunner {
    pub const fn new(target: ApiTarget, verbose: bool) -> Self {
        Self { target, verbose }
    }

    pub async fn run_scenario(
        &self,
        scenario: &dyn CombinedScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();
        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (target: {} seed: {})",
                    scenario.name().bright_white(),
                    self.target.label(),
                    seed
                );
            }
            results.push(self.run_single_scenario(scenario, seed, iterations).await);
        }
        results
    }

    async fn run_single_scenario(
        &self,
        scenario: &dyn CombinedScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let gateway = match &self.target {
            ApiTarget::Gateway { base_url } => Some(gateway_api(base_url)),
            ApiTarget::Sandbox => None,
        };

        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let ctx = ScenarioCtx {
                seed: iteration_seed,
                run_tag: self.run_tag(i),
                verbose: self.verbose,
            };
            let sandbox;
            let api: &dyn MausholdApi = match &gateway {
                Some(api) => api,
                None => {
                    sandbox = SandboxBackend::new(iteration_seed);
                    &sandbox
                }
            };

            let start_time = Instant::now();
            match scenario.run_api(api, &ctx).await {
                Ok(()) => {
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!("  ✅ Iteration {}/{} passed ({duration:?})", i + 1, iterations);
                    }
                }
                Err(err) => {
                    let message = format!("{err:#}");
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            message.clone().red()
                        );
                    }
                    failures.push(format!("Iteration {} (seed {iteration_seed}): {message}", i + 1));
                }
            }
        }

        ScenarioResult::from_runs(
            scenario.name(),
            self.target.label(),
            seed,
            iterations,
            failures,
            performance_data,
        )
    }

    /// Sandboxes are fresh per iteration; live runs need names no earlier run used.
    fn run_tag(&self, iteration: usize) -> String {
        match self.target {
            ApiTarget::Sandbox => iteration.to_string(),
            ApiTarget::Gateway { .. } => {
                format!("{}{iteration}", chrono::Utc::now().format("%m%d%H%M%S%3f"))
            }
        }
    }
}

fn whole_millis(duration: &Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(whole_millis(duration))
}

fn millis_each<S: Serializer>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(durations.iter().map(whole_millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::scenario::get_scenario;

    #[test]
    fn sandbox_runs_every_iteration_on_a_fresh_backend() {
        let runner = ApiRunner::new(ApiTarget::Sandbox, false);
        let scenario = get_scenario("battle-roundtrip").unwrap();
        let results = tokio_test::block_on(runner.run_scenario(scenario.as_ref(), &[1, 2], 3));
        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.passed, "{:?}", result.failures);
            assert_eq!(result.target, "sandbox");
            assert_eq!(result.successful_iterations, 3);
        }
    }

    #[test]
    fn unreachable_gateway_fails_each_iteration() {
        let runner = ApiRunner::new(
            ApiTarget::Gateway {
                base_url: "http://127.0.0.1:9".to_string(),
            },
            false,
        );
        let scenario = get_scenario("smoke").unwrap();
        let results = tokio_test::block_on(runner.run_scenario(scenario.as_ref(), &[1], 2));
        assert!(!results[0].passed);
        assert_eq!(results[0].failures.len(), 2);
        assert_eq!(results[0].target, "api");
    }

    #[test]
    fn gateway_run_tags_differ_between_iterations() {
        let runner = ApiRunner::new(
            ApiTarget::Gateway {
                base_url: "http://localhost:8000".to_string(),
            },
            false,
        );
        assert_ne!(runner.run_tag(0), runner.run_tag(1));
        let sandbox = ApiRunner::new(ApiTarget::Sandbox, false);
        assert_eq!(sandbox.run_tag(4), "4");
    }

    #[test]
    fn results_serialize_durations_as_millis() {
        let result = ScenarioResult::from_runs(
            "Smoke Test",
            "sandbox",
            7,
            2,
            vec!["Iteration 2 (seed 8): boom".to_string()],
            vec![Duration::from_millis(12)],
        );
        assert!(!result.passed);
        assert_eq!(result.average_duration, Duration::from_millis(12));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 12);
        assert_eq!(json["performance_data"][0], 12);
    }
}
