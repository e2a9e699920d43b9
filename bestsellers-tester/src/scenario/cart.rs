use anyhow::{Context, Result, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx};
use crate::logic::{CheckFn, TestScenario, checks};

pub struct CartScenario;

#[async_trait::async_trait]
impl BrowserScenario for CartScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        let page = &ctx.page;
        page.section().await?;
        page.record_cart_requests(&ctx.config.cart_endpoint).await?;

        page.click_add_to_cart().await?;
        tokio::time::sleep(Duration::from_millis(300)).await;

        let bodies = page.recorded_cart_bodies().await?;
        ensure!(
            bodies.len() == 1,
            "expected one cart request, saw {}",
            bodies.len()
        );
        let item = bodies[0]["items"]
            .get(0)
            .context("cart request has no items")?;
        ensure!(item["quantity"] == 1, "quantity was {}", item["quantity"]);
        ensure!(item["id"].is_string(), "id was {}", item["id"]);
        ensure!(
            item["properties"].is_object(),
            "properties were {}",
            item["properties"]
        );
        if ctx.verbose {
            println!("  🛒 Cart request: {}", bodies[0]);
        }

        Ok(())
    }
}

impl CombinedScenario for CartScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(
            "cart",
            vec![
                ("cart-payload", checks::cart_payload as CheckFn),
                ("missing-id-rejected", checks::missing_id_rejected as CheckFn),
            ],
        ))
    }
}
