use anyhow::{Result, ensure};
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx};
use crate::logic::{CheckFn, TestScenario, checks};

pub struct SmokeScenario;

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        let page = &ctx.page;
        page.section().await?;

        let count = page.category_items().await?.len();
        if ctx.verbose {
            println!("  🌐 Section loaded with {count} category items");
        }

        for index in 0..count {
            page.select(index).await?;
            let flags = page.selected_flags().await?;
            let selected: Vec<usize> = flags
                .iter()
                .enumerate()
                .filter_map(|(i, flag)| flag.then_some(i))
                .collect();
            ensure!(
                selected == [index],
                "after clicking item {index}, selected items were {selected:?}"
            );

            let title = page.preview_title().await?;
            ensure!(!title.trim().is_empty(), "preview title empty for item {index}");
            let href = page.preview_href().await?;
            ensure!(href.is_some(), "preview link lost its href for item {index}");
            if ctx.verbose {
                println!("  🖱️  Item {index}: {title}");
            }
        }

        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(
            "smoke",
            vec![
                ("products-resolve", checks::products_resolve as CheckFn),
                ("exactly-one-selected", checks::exactly_one_selected as CheckFn),
            ],
        ))
    }
}
