#![cfg(target_arch = "wasm32")]

use bestsellers_core::{Badge, ImageData, PreviewView, PriceMode, PriceValue, Product, WidgetConfig};
use bestsellers_web::dom;
use bestsellers_web::section::render::{badge_nodes, picture_node, price_nodes};
use wasm_bindgen_test::*;
use web_sys::{Document, Element};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn doc() -> Document {
    dom::document().expect("document")
}

fn product() -> Product {
    Product {
        id: serde_json::json!(42),
        available: true,
        price: PriceValue::from(100),
        compare_at_price: Some(PriceValue::from(150)),
        price_varies: false,
        start_from: Some(PriceValue::from(90)),
        image_data: ImageData {
            image: "//cdn.example.com/pack.jpg?v=1".to_string(),
            image_alt: "Trail pack \"navy\"".to_string(),
            image_focal_point: "30% 60%".to_string(),
        },
        title: "Trail Pack".to_string(),
        url: "/products/trail-pack".to_string(),
        tags: Some(
            ["New", "Sale", "Hot", "Limited"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        ),
    }
}

fn outer(nodes: &[Element]) -> Vec<String> {
    nodes.iter().map(Element::outer_html).collect()
}

#[wasm_bindgen_test]
fn badges_render_three_tags_in_order() {
    let view = PreviewView::from_product(&product(), &WidgetConfig::default_config());
    let nodes = badge_nodes(&doc(), &view.badges.expect("tags present")).expect("badges");
    assert_eq!(
        outer(&nodes),
        vec![
            r#"<span class="badge new">New</span>"#,
            r#"<span class="badge sale">Sale</span>"#,
            r#"<span class="badge hot">Hot</span>"#,
        ]
    );
}

#[wasm_bindgen_test]
fn badge_labels_stay_text() {
    let nodes = badge_nodes(&doc(), &[Badge::from_tag("<b>Promo</b>")]).expect("badges");
    assert_eq!(nodes[0].child_element_count(), 0);
    assert_eq!(nodes[0].text_content().as_deref(), Some("<b>Promo</b>"));
}

#[wasm_bindgen_test]
fn price_nodes_render_each_mode() {
    let render = |price: PriceMode| outer(&price_nodes(&doc(), &price).expect("price"));

    assert_eq!(
        render(PriceMode::StartFrom("90".into())),
        vec![r#"<span class="start-from">90</span>"#]
    );
    assert_eq!(
        render(PriceMode::OnSale {
            price: "100".into(),
            compare_at: "150".into(),
        }),
        vec![
            r#"<span class="current-price">100</span>"#,
            r#"<del class="old-price">150</del>"#,
        ]
    );
    assert_eq!(
        render(PriceMode::Regular("100".into())),
        vec![r#"<span class="price">100</span>"#]
    );
}

#[wasm_bindgen_test]
fn picture_has_sources_and_lazy_fallback() {
    let view = PreviewView::from_product(&product(), &WidgetConfig::default_config());
    let picture = picture_node(&doc(), &view.image).expect("picture");
    assert_eq!(picture.tag_name().to_lowercase(), "picture");

    let sources = dom::query_all(&picture, "source").expect("sources");
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].get_attribute("media").as_deref(), Some("(max-width: 749px)"));
    assert_eq!(
        sources[0].get_attribute("srcset").as_deref(),
        Some("//cdn.example.com/pack.jpg?v=1&width=343 1x, //cdn.example.com/pack.jpg?v=1&width=686 2x")
    );
    assert_eq!(sources[1].get_attribute("media").as_deref(), Some("(min-width: 750px)"));

    let img = dom::query_required(&picture, "img").expect("img");
    assert_eq!(img.get_attribute("src").as_deref(), Some("//cdn.example.com/pack.jpg?v=1&width=816"));
    assert_eq!(img.get_attribute("alt").as_deref(), Some("Trail pack \"navy\""));
    assert_eq!(img.get_attribute("loading").as_deref(), Some("lazy"));
    assert_eq!(img.get_attribute("width").as_deref(), Some("816"));
    assert_eq!(img.get_attribute("height").as_deref(), Some("816"));
    assert_eq!(img.get_attribute("style").as_deref(), Some("object-position: 30% 60%"));
    assert_eq!(img.get_attribute("class").as_deref(), Some("product-image"));
}

#[wasm_bindgen_test]
fn rendering_is_idempotent() {
    let config = WidgetConfig::default_config();
    let render = || {
        let view = PreviewView::from_product(&product(), &config);
        outer(&price_nodes(&doc(), &view.price).expect("price"))
    };
    assert_eq!(render(), render());
}
