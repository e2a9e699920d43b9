use anyhow::{Result, ensure};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx};
use crate::logic::{CheckFn, TestScenario, checks};

pub struct WishlistScenario;

#[async_trait::async_trait]
impl BrowserScenario for WishlistScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        let page = &ctx.page;
        ensure!(!page.modal_shown().await?, "wishlist modal visible before any click");

        let title = page.preview_title().await?;
        page.click_wishlist().await?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        ensure!(page.modal_shown().await?, "wishlist modal did not open");

        let message = page.modal_message().await?;
        ensure!(
            message.contains(title.trim()),
            "confirmation {message:?} does not name {title:?}"
        );
        if ctx.verbose {
            println!("  💬 {message}");
        }

        page.click_modal_close().await?;
        tokio::time::sleep(Duration::from_millis(100)).await;
        ensure!(!page.modal_shown().await?, "close button did not hide the modal");

        Ok(())
    }
}

impl CombinedScenario for WishlistScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario::new(
            "wishlist",
            vec![("modal-cycle", checks::modal_cycle as CheckFn)],
        ))
    }
}
