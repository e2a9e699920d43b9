#![cfg(target_arch = "wasm32")]

use bestsellers_core::WidgetConfig;
use bestsellers_web::dom;
use bestsellers_web::element::{self, Registration};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

const PAYLOAD: &str = r#"[
  {"product":[{"id":1,"available":true,"price":100,"title":"Alpha Mug","url":"/products/alpha",
    "image_data":{"image":"//cdn.example.com/a.jpg?v=1","image_alt":"A","image_focal_point":"50% 50%"}}]},
  {"product":[{"id":2,"available":true,"price":40,"title":"Beta Cap","url":"/products/beta",
    "image_data":{"image":"//cdn.example.com/b.jpg?v=1","image_alt":"B","image_focal_point":"50% 50%"}}]}
]"#;

fn markup(tag: &str, section_id: &str, title_class: &str) -> String {
    format!(
        r#"
<script type="application/json" id="SectionData-{section_id}">{PAYLOAD}</script>
<{tag} data-section-id="{section_id}">
  <ul class="category-list">
    <li class="category-item" data-forloop-index="0"><button aria-selected="true">Alpha</button></li>
    <li class="category-item" data-forloop-index="1"><button aria-selected="false">Beta</button></li>
  </ul>
  <div class="product-card">
    <a class="product-card__link" href="/products/alpha"><div class="product-image-wrapper"></div></a>
    <div class="badges"></div>
    <div class="product-info">
      <p class="{title_class}">Alpha Mug</p>
      <div class="price-box"></div>
    </div>
    <div class="actions">
      <button class="wish-list-btn">Wishlist</button>
      <button data-submit-button>Add to bag</button>
    </div>
  </div>
</{tag}>
<div class="wishlist-modal" aria-hidden="true">
  <div class="wishlist-content"><p class="wishlist-message"></p></div>
</div>
<form data-product-form><input type="hidden" name="id" value="1"></form>
"#
    )
}

fn attach(html: &str) -> Element {
    let doc = dom::document().expect("document");
    let wrapper = doc.create_element("section").expect("create wrapper");
    wrapper.set_inner_html(html);
    doc.body()
        .expect("document body")
        .append_child(&wrapper)
        .expect("append wrapper");
    wrapper
}

fn click(wrapper: &Element, selector: &str) {
    wrapper
        .query_selector(selector)
        .expect("valid selector")
        .unwrap_or_else(|| panic!("{selector} present"))
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

fn text(wrapper: &Element, selector: &str) -> Option<String> {
    wrapper
        .query_selector(selector)
        .expect("valid selector")
        .and_then(|node| node.text_content())
}

fn config_for(tag: &str) -> WidgetConfig {
    WidgetConfig {
        tag_name: tag.to_string(),
        ..WidgetConfig::default_config()
    }
}

#[wasm_bindgen_test]
fn connected_element_mounts_and_disconnect_releases_listeners() {
    let tag = "bs-lifecycle-section";
    assert!(matches!(
        element::register(config_for(tag)),
        Ok(Registration::Defined)
    ));

    let wrapper = attach(&markup(tag, "lifecycle", "product-name"));
    click(&wrapper, "li.category-item[data-forloop-index='1']");
    assert_eq!(text(&wrapper, ".product-name").as_deref(), Some("Beta Cap"));

    wrapper.remove();
    click(&wrapper, "li.category-item[data-forloop-index='0']");
    assert_eq!(text(&wrapper, ".product-name").as_deref(), Some("Beta Cap"));
    click(&wrapper, ".wish-list-btn");
    assert_eq!(
        wrapper
            .query_selector(".wishlist-modal")
            .expect("query")
            .and_then(|modal| modal.get_attribute("aria-hidden"))
            .as_deref(),
        Some("true")
    );
}

#[wasm_bindgen_test]
fn registering_an_owned_tag_again_replaces_its_config() {
    let tag = "bs-config-section";
    assert!(matches!(
        element::register(config_for(tag)),
        Ok(Registration::Defined)
    ));

    let updated = WidgetConfig::from_json(
        r#"{"tag_name":"bs-config-section","markup":{"title":".product-info .name"}}"#,
    )
    .expect("config");
    assert!(matches!(element::register(updated), Ok(Registration::Updated)));
    assert_eq!(
        element::active_config(tag).expect("active").markup.title,
        ".product-info .name"
    );

    // Only resolvable under the replaced config.
    let wrapper = attach(&markup(tag, "configured", "name"));
    click(&wrapper, "li.category-item[data-forloop-index='1']");
    assert_eq!(text(&wrapper, ".name").as_deref(), Some("Beta Cap"));
}

#[wasm_bindgen_test]
fn register_with_config_rejects_foreign_tags_and_bad_json() {
    js_sys::Function::new_no_args(
        "customElements.define('bs-foreign-section', class extends HTMLElement {});",
    )
    .call0(&JsValue::UNDEFINED)
    .expect("define foreign element");

    assert!(bestsellers_web::register_with_config(r#"{"tag_name":"bs-foreign-section"}"#).is_err());
    assert!(element::active_config("bs-foreign-section").is_none());
    assert!(bestsellers_web::register_with_config("{not json").is_err());
    assert!(bestsellers_web::register_with_config(r#"{"tag_name":"nohyphen"}"#).is_err());
}

#[wasm_bindgen_test]
fn register_with_config_accepts_the_default_tag() {
    bestsellers_web::register_with_config(r#"{"max_badges":2}"#).expect("register");
    let active = element::active_config("best-sellers-section").expect("active config");
    assert_eq!(active.max_badges, 2);
}
