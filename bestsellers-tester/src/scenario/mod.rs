use anyhow::Result;
use bestsellers_core::WidgetConfig;
use thirtyfour::prelude::*;

use crate::browser::SectionPage;
use crate::logic::{CheckFn, TestScenario, checks};

pub mod cart;
pub mod smoke;
pub mod wishlist;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub page: SectionPage<'a>,
    pub config: WidgetConfig,
    pub verbose: bool,
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;

    /// False for scenarios that only check the fixture.
    fn has_browser(&self) -> bool {
        true
    }
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

/// Fixture-only scenario with no browser counterpart.
pub struct LogicOnlyScenario {
    name: &'static str,
    checks: Vec<(&'static str, CheckFn)>,
}

#[async_trait::async_trait]
impl BrowserScenario for LogicOnlyScenario {
    async fn run_browser(&self, _driver: &WebDriver, _ctx: &ScenarioCtx<'_>) -> Result<()> {
        anyhow::bail!("{} has no browser implementation", self.name)
    }

    fn has_browser(&self) -> bool {
        false
    }
}

impl CombinedScenario for LogicOnlyScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(self.name, self.checks.clone()))
    }
}

const SCENARIOS: &[(&str, &str)] = &[
    (
        "smoke",
        "Section mounts; every category item selects exactly one product",
    ),
    (
        "wishlist",
        "Wishlist modal opens with a confirmation and closes again",
    ),
    (
        "cart",
        "Add to cart posts the form's id, fixed quantity and properties",
    ),
    (
        "rendering",
        "Badge cap, price display precedence and image variants (logic only)",
    ),
];

#[must_use]
pub fn list_scenarios() -> &'static [(&'static str, &'static str)] {
    SCENARIOS
}

#[must_use]
pub fn all_scenario_names() -> Vec<String> {
    SCENARIOS.iter().map(|(name, _)| (*name).to_string()).collect()
}

#[must_use]
pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "wishlist" => Some(Box::new(wishlist::WishlistScenario)),
        "cart" => Some(Box::new(cart::CartScenario)),
        "rendering" => Some(Box::new(LogicOnlyScenario {
            name: "rendering",
            checks: vec![
                ("badges-capped", checks::badges_capped as CheckFn),
                ("price-precedence", checks::price_precedence as CheckFn),
                ("image-variants", checks::image_variants as CheckFn),
            ],
        })),
        _ => None,
    }
}
