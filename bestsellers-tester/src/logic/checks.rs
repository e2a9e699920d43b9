//! Invariant checks run against a fixture.
use anyhow::{Result, bail, ensure};
use bestsellers_core::{
    CartError, ModalClickTarget, ModalState, PreviewView, PriceMode, Selection, WidgetConfig,
    build_cart_request, selection_flags, wishlist_message,
};

use super::Fixture;

pub type CheckFn = fn(&Fixture, &WidgetConfig) -> Result<()>;

pub fn products_resolve(fixture: &Fixture, config: &WidgetConfig) -> Result<()> {
    ensure!(!fixture.data.is_empty(), "section has no products");
    for index in 0..fixture.data.len() {
        let product = fixture.data.product(index)?;
        let view = PreviewView::from_product(product, config);
        ensure!(!view.title.is_empty(), "product {index} has an empty title");
        ensure!(!view.href.is_empty(), "product {index} has an empty url");
    }
    Ok(())
}

pub fn exactly_one_selected(fixture: &Fixture, _config: &WidgetConfig) -> Result<()> {
    let mut selection = Selection::new();
    let count = fixture.data.len();
    for index in 0..count {
        selection.select(&fixture.data, index)?;
        ensure!(selection.index() == Some(index), "selection did not move to {index}");
        let flags = selection_flags(count, index);
        let selected: Vec<usize> = flags
            .iter()
            .enumerate()
            .filter_map(|(i, flag)| flag.then_some(i))
            .collect();
        ensure!(
            selected == [index],
            "expected only item {index} selected, got {selected:?}"
        );
    }
    ensure!(
        selection.select(&fixture.data, count).is_err(),
        "index {count} past the end was accepted"
    );
    Ok(())
}

pub fn badges_capped(fixture: &Fixture, config: &WidgetConfig) -> Result<()> {
    for (index, entry) in fixture.data.entries().iter().enumerate() {
        let Some(product) = entry.product.first() else {
            continue;
        };
        let view = PreviewView::from_product(product, config);
        match (&view.badges, product.tags().is_empty()) {
            (None, true) => {}
            (Some(badges), false) => {
                ensure!(
                    badges.len() == product.tags().len().min(config.max_badges),
                    "product {index} rendered {} badges",
                    badges.len()
                );
                for (badge, tag) in badges.iter().zip(product.tags()) {
                    ensure!(badge.label == *tag, "badge order changed for product {index}");
                    ensure!(
                        badge.class == format!("badge {}", tag.to_lowercase()),
                        "badge class for {tag:?} is {:?}",
                        badge.class
                    );
                }
            }
            (badges, _) => bail!("product {index} badge presence mismatch: {badges:?}"),
        }
    }
    Ok(())
}

pub fn price_precedence(fixture: &Fixture, config: &WidgetConfig) -> Result<()> {
    for index in 0..fixture.data.len() {
        let product = fixture.data.product(index)?;
        let view = PreviewView::from_product(product, config);
        let on_sale = product
            .compare_at_price
            .as_ref()
            .and_then(bestsellers_core::PriceValue::amount)
            .zip(product.price.amount())
            .is_some_and(|(compare_at, price)| compare_at > price);
        let ok = match view.price {
            PriceMode::StartFrom(_) => product.price_varies,
            PriceMode::OnSale { .. } => !product.price_varies && on_sale,
            PriceMode::Regular(_) => !product.price_varies && !on_sale,
        };
        ensure!(ok, "product {index} rendered price mode {:?}", view.price);
    }
    Ok(())
}

pub fn image_variants(fixture: &Fixture, config: &WidgetConfig) -> Result<()> {
    for index in 0..fixture.data.len() {
        let product = fixture.data.product(index)?;
        let image = PreviewView::from_product(product, config).image;
        ensure!(image.sources.len() == 2, "product {index} missing picture sources");
        ensure!(
            image.src.ends_with(&format!("&width={}", config.image.fallback_width)),
            "product {index} fallback src is {}",
            image.src
        );
    }
    Ok(())
}

pub fn modal_cycle(fixture: &Fixture, _config: &WidgetConfig) -> Result<()> {
    let mut modal = ModalState::hidden();
    ensure!(modal.toggle().is_shown(), "open did not show the modal");
    ensure!(
        !ModalClickTarget::Inside.closes(),
        "clicks inside the modal body must not close it"
    );
    for target in [ModalClickTarget::CloseButton, ModalClickTarget::Backdrop] {
        ensure!(target.closes(), "{target:?} should close the modal");
    }
    ensure!(!modal.toggle().is_shown(), "close did not hide the modal");
    let title = &fixture.data.product(0)?.title;
    let message = wishlist_message(title);
    ensure!(message.starts_with(title.trim()), "message {message:?} lost the title");
    Ok(())
}

pub fn cart_payload(fixture: &Fixture, _config: &WidgetConfig) -> Result<()> {
    let request = build_cart_request(&fixture.form)?;
    let body: serde_json::Value = serde_json::from_str(&request.to_json()?)?;
    let item = &body["items"][0];
    ensure!(item["quantity"] == 1, "quantity should be fixed at 1");
    ensure!(item["id"].is_string(), "id should be sent as the form's string value");
    ensure!(item["properties"].is_object(), "properties should be an object");
    Ok(())
}

pub fn missing_id_rejected(fixture: &Fixture, _config: &WidgetConfig) -> Result<()> {
    let without_id: Vec<_> = fixture
        .form
        .iter()
        .filter(|field| field.name != "id")
        .cloned()
        .collect();
    match build_cart_request(&without_id) {
        Err(CartError::MissingId) => Ok(()),
        other => bail!("form without id produced {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixture_passes_every_check() {
        let fixture = Fixture::load_default().expect("fixture");
        let config = WidgetConfig::default_config();
        let checks: [CheckFn; 8] = [
            products_resolve,
            exactly_one_selected,
            badges_capped,
            price_precedence,
            image_variants,
            modal_cycle,
            cart_payload,
            missing_id_rejected,
        ];
        for check in checks {
            check(&fixture, &config).expect("check passes");
        }
    }

    #[test]
    fn empty_section_fails_resolution() {
        let fixture = Fixture::from_json("empty", "[]").expect("fixture");
        assert!(products_resolve(&fixture, &WidgetConfig::default_config()).is_err());
    }
}
