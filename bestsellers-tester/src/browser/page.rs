use anyhow::{Context, Result, bail};
use bestsellers_core::MarkupContract;
use serde_json::Value;
use thirtyfour::prelude::*;

/// Records `/cart/add.js` request bodies instead of letting them reach the store.
/// The widget posts a `Request` object, so its body is read from a clone.
const CART_RECORDER: &str = r"
window.__bestSellersCart = [];
const endpoint = arguments[0];
const realFetch = window.fetch.bind(window);
window.fetch = async (input, init) => {
    const isRequest = input instanceof Request;
    const url = isRequest ? input.url : String(input);
    if (url.endsWith(endpoint)) {
        let body = init && init.body ? init.body : null;
        if (body === null && isRequest) {
            body = await input.clone().text();
        }
        window.__bestSellersCart.push(body || null);
        return new Response('{}', { headers: { 'Content-Type': 'application/json' } });
    }
    return realFetch(input, init);
};
";

/// Page object over one rendered best sellers section.
#[derive(Debug, Clone)]
pub struct SectionPage<'a> {
    driver: &'a WebDriver,
    contract: MarkupContract,
    tag_name: String,
}

impl<'a> SectionPage<'a> {
    pub fn new(driver: &'a WebDriver, contract: MarkupContract, tag_name: &str) -> Self {
        Self {
            driver,
            contract,
            tag_name: tag_name.to_string(),
        }
    }

    pub async fn section(&self) -> Result<WebElement> {
        self.driver
            .find(By::Css(self.tag_name.as_str()))
            .await
            .with_context(|| format!("<{}> not found on page", self.tag_name))
    }

    pub async fn category_items(&self) -> Result<Vec<WebElement>> {
        let section = self.section().await?;
        let selector = format!(
            "{} {}",
            self.contract.category_list, self.contract.category_item
        );
        let items = section.find_all(By::Css(selector.as_str())).await?;
        if items.is_empty() {
            bail!("section has no category items");
        }
        Ok(items)
    }

    /// `aria-selected` of each category item's button, in list order.
    pub async fn selected_flags(&self) -> Result<Vec<bool>> {
        let mut flags = Vec::new();
        for item in self.category_items().await? {
            let button = item
                .find(By::Css(self.contract.category_button.as_str()))
                .await;
            let marker = button.unwrap_or(item);
            let value = marker.attr("aria-selected").await?;
            flags.push(value.as_deref() == Some("true"));
        }
        Ok(flags)
    }

    pub async fn select(&self, index: usize) -> Result<()> {
        let items = self.category_items().await?;
        let item = items
            .get(index)
            .with_context(|| format!("no category item at {index}"))?;
        item.click().await?;
        Ok(())
    }

    pub async fn preview_title(&self) -> Result<String> {
        let section = self.section().await?;
        let card = section
            .find(By::Css(self.contract.product_card.as_str()))
            .await?;
        Ok(card
            .find(By::Css(self.contract.title.as_str()))
            .await?
            .text()
            .await?)
    }

    pub async fn preview_href(&self) -> Result<Option<String>> {
        let section = self.section().await?;
        let card = section
            .find(By::Css(self.contract.product_card.as_str()))
            .await?;
        Ok(card
            .find(By::Css(self.contract.card_link.as_str()))
            .await?
            .attr("href")
            .await?)
    }

    pub async fn click_wishlist(&self) -> Result<()> {
        let section = self.section().await?;
        section
            .find(By::Css(self.contract.wishlist_button.as_str()))
            .await?
            .click()
            .await?;
        Ok(())
    }

    pub async fn click_modal_close(&self) -> Result<()> {
        self.driver
            .find(By::Css(self.contract.modal_close.as_str()))
            .await?
            .click()
            .await?;
        Ok(())
    }

    pub async fn modal_shown(&self) -> Result<bool> {
        let modal = self.driver.find(By::Css(self.contract.modal.as_str())).await?;
        let hidden = modal.attr("aria-hidden").await?;
        let classes = modal.class_name().await?.unwrap_or_default();
        let open = classes
            .split_whitespace()
            .any(|class| class == self.contract.modal_open_class);
        Ok(hidden.as_deref() == Some("false") && open)
    }

    pub async fn modal_message(&self) -> Result<String> {
        Ok(self
            .driver
            .find(By::Css(self.contract.modal_message.as_str()))
            .await?
            .text()
            .await?)
    }

    pub async fn record_cart_requests(&self, endpoint: &str) -> Result<()> {
        self.driver
            .execute(CART_RECORDER, vec![Value::from(endpoint)])
            .await?;
        Ok(())
    }

    pub async fn click_add_to_cart(&self) -> Result<()> {
        let section = self.section().await?;
        section
            .find(By::Css(self.contract.submit_button.as_str()))
            .await?
            .click()
            .await?;
        Ok(())
    }

    pub async fn recorded_cart_bodies(&self) -> Result<Vec<Value>> {
        let ret = self
            .driver
            .execute("return window.__bestSellersCart || []", vec![])
            .await?;
        parse_recorded_bodies(ret.json().clone())
    }
}

/// Decode what the recorder collected: one JSON body string per request.
fn parse_recorded_bodies(recorded: Value) -> Result<Vec<Value>> {
    let raw: Vec<Option<String>> =
        serde_json::from_value(recorded).context("reading recorded requests")?;
    raw.into_iter()
        .map(|body| {
            let body = body.context("cart request had no body")?;
            serde_json::from_str(&body).context("cart request body is not JSON")
        })
        .collect()
}
