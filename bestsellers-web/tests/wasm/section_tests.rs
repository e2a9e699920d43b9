#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use bestsellers_core::{CartClient, CartError, CartRequest, WidgetConfig};
use bestsellers_web::dom;
use bestsellers_web::section::{CartHooks, SectionController};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

const PAYLOAD: &str = r#"[
  {"product":[{"id":1,"available":true,"price":100,"compare_at_price":150,"price_varies":false,
    "start_from":90,"image_data":{"image":"//cdn.example.com/a.jpg?v=1","image_alt":"A","image_focal_point":"50% 50%"},
    "title":"Alpha Mug","url":"/products/alpha","tags":["New","Sale","Hot","Limited"]}]},
  {"product":[{"id":2,"available":false,"price":40,"compare_at_price":0,"price_varies":true,
    "start_from":35,"image_data":{"image":"//cdn.example.com/b.jpg?v=1","image_alt":"B","image_focal_point":"10% 90%"},
    "title":"Beta Cap","url":"/products/beta","tags":[]}]}
]"#;

const MARKUP: &str = r#"
<script type="application/json" id="SectionData-test">__PAYLOAD__</script>
<best-sellers-host data-section-id="test">
  <ul class="category-list">
    <li class="category-item" data-forloop-index="0"><button aria-selected="true">Alpha</button></li>
    <li class="category-item" data-forloop-index="1"><button aria-selected="false">Beta</button></li>
  </ul>
  <div class="product-card">
    <a class="product-card__link" href="/products/alpha">
      <div class="product-image-wrapper"><img src="server.jpg"></div>
    </a>
    <div class="badges"><span class="badge server">Server</span></div>
    <div class="product-info">
      <p class="product-name">Alpha Mug</p>
      <div class="price-box"><span class="price">100</span></div>
    </div>
    <div class="actions">
      <button class="wish-list-btn">Wishlist</button>
      <button data-submit-button>Add to bag</button>
    </div>
  </div>
</best-sellers-host>
<div class="wishlist-modal" aria-hidden="true">
  <div class="wishlist-content">
    <p class="wishlist-message"></p>
    <button class="wishlist-close-btn"><span class="icon">x</span></button>
  </div>
</div>
<form data-product-form>
  <input type="hidden" name="id" value="42">
  <input type="hidden" name="properties[Size]" value="M">
  <input type="hidden" name="properties[Color]" value="Red">
</form>
"#;

#[derive(Default)]
struct RecordingClient {
    bodies: RefCell<Vec<String>>,
}

#[async_trait(?Send)]
impl CartClient for RecordingClient {
    async fn add_items(&self, request: &CartRequest) -> Result<serde_json::Value, CartError> {
        self.bodies.borrow_mut().push(request.to_json()?);
        Ok(serde_json::json!({ "items": [] }))
    }
}

struct Page {
    wrapper: Element,
    controller: SectionController,
    client: Rc<RecordingClient>,
}

impl Page {
    fn find(&self, selector: &str) -> Element {
        self.wrapper
            .query_selector(selector)
            .expect("valid selector")
            .unwrap_or_else(|| panic!("{selector} present"))
    }

    fn click(&self, selector: &str) {
        self.find(selector)
            .dyn_into::<HtmlElement>()
            .expect("html element")
            .click();
    }

    fn selected_flags(&self) -> Vec<String> {
        dom::query_all(&self.wrapper, "li.category-item button")
            .expect("items")
            .iter()
            .map(|button| button.get_attribute("aria-selected").unwrap_or_default())
            .collect()
    }
}

fn mount_page() -> Page {
    let doc = dom::document().expect("document");
    let wrapper = doc.create_element("section").expect("create wrapper");
    wrapper.set_inner_html(&MARKUP.replace("__PAYLOAD__", PAYLOAD));
    doc.body()
        .expect("document body")
        .append_child(&wrapper)
        .expect("append wrapper");
    let container = wrapper
        .query_selector("best-sellers-host")
        .expect("query host")
        .expect("host present");
    let client = Rc::new(RecordingClient::default());
    let controller = SectionController::mount(
        &container,
        Rc::new(WidgetConfig::default_config()),
        client.clone(),
        CartHooks::default(),
    )
    .expect("mount section");
    Page {
        wrapper,
        controller,
        client,
    }
}

#[wasm_bindgen_test]
fn clicking_category_item_selects_exactly_one() {
    let page = mount_page();
    page.click("li.category-item[data-forloop-index='1']");

    assert_eq!(page.controller.selected_index(), Some(1));
    assert_eq!(page.selected_flags(), vec!["false", "true"]);
    assert_eq!(
        page.find("a.product-card__link").get_attribute("href").as_deref(),
        Some("/products/beta")
    );
    assert_eq!(
        page.find(".product-name").text_content().as_deref(),
        Some("Beta Cap")
    );
    let price = page.find(".price-box").inner_html();
    assert!(price.contains("start-from"));
    assert!(price.contains("35"));
    // No tags: the badge region keeps whatever it had.
    assert!(page.find(".badges").inner_html().contains("badge server"));
    assert!(page.find("button[data-submit-button]").has_attribute("disabled"));
}

#[wasm_bindgen_test]
fn select_product_renders_badges_sale_price_and_picture() {
    let page = mount_page();
    page.controller.select_product(0).expect("select");

    assert_eq!(page.selected_flags(), vec!["true", "false"]);
    let badges = page.find(".badges");
    assert_eq!(badges.child_element_count(), 3);
    assert!(!badges.inner_html().contains("badge limited"));
    assert_eq!(
        page.find(".price-box").inner_html(),
        r#"<span class="current-price">100</span><del class="old-price">150</del>"#
    );
    let picture = page.find(".product-image-wrapper picture");
    assert_eq!(picture.query_selector_all("source").expect("sources").length(), 2);
    let img = page.find(".product-image-wrapper img.product-image");
    assert_eq!(
        img.get_attribute("src").as_deref(),
        Some("//cdn.example.com/a.jpg?v=1&width=816")
    );
    assert!(!page.find("button[data-submit-button]").has_attribute("disabled"));
}

#[wasm_bindgen_test]
fn out_of_range_selection_is_rejected() {
    let page = mount_page();
    assert!(page.controller.select_product(7).is_err());
    assert_eq!(page.controller.selected_index(), None);
}

#[wasm_bindgen_test]
fn wishlist_modal_opens_and_closes_from_backdrop_or_button() {
    let page = mount_page();
    let body = dom::document().and_then(|doc| doc.body()).expect("body");
    let modal = page.find(".wishlist-modal");

    page.click(".wish-list-btn");
    assert!(page.controller.modal_state().is_shown());
    assert_eq!(modal.get_attribute("aria-hidden").as_deref(), Some("false"));
    assert!(modal.class_list().contains("is-open"));
    assert!(body.class_list().contains("modal-open"));
    assert_eq!(
        page.find(".wishlist-message").text_content().as_deref(),
        Some("Alpha Mug has been added to your wishlist")
    );

    page.click(".wishlist-message");
    assert!(page.controller.modal_state().is_shown());

    page.click(".wishlist-close-btn .icon");
    assert!(!page.controller.modal_state().is_shown());
    assert_eq!(modal.get_attribute("aria-hidden").as_deref(), Some("true"));
    assert!(!body.class_list().contains("modal-open"));

    page.click(".wish-list-btn");
    page.click(".wishlist-modal");
    assert!(!page.controller.modal_state().is_shown());
    assert!(!modal.class_list().contains("is-open"));
}

#[wasm_bindgen_test]
async fn submit_posts_form_fields() {
    let page = mount_page();
    page.controller.submit().await.expect("submit");
    assert_eq!(
        page.client.bodies.borrow().as_slice(),
        [r#"{"items":[{"id":"42","quantity":1,"properties":{"Size":"M","Color":"Red"}}]}"#]
    );
}

#[wasm_bindgen_test]
async fn submit_without_id_never_reaches_client() {
    let page = mount_page();
    page.find("input[name='id']").remove();
    let err = page.controller.submit().await.expect_err("missing id");
    assert!(matches!(err, CartError::MissingId));
    assert!(page.client.bodies.borrow().is_empty());
}

#[wasm_bindgen_test]
async fn add_to_cart_click_reports_errors_to_hook() {
    let page = mount_page();
    page.find("input[name='id']").remove();
    let container = page.find("best-sellers-host");
    drop(page.controller);

    let errors = Rc::new(RefCell::new(Vec::new()));
    let sink = errors.clone();
    let hooks = CartHooks::default().on_error(move |err| sink.borrow_mut().push(err.to_string()));
    let _controller = SectionController::mount(
        &container,
        Rc::new(WidgetConfig::default_config()),
        Rc::new(RecordingClient::default()),
        hooks,
    )
    .expect("mount section");

    page.wrapper
        .query_selector("button[data-submit-button]")
        .expect("query")
        .expect("button")
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
    dom::sleep_ms(0).await.expect("tick");
    assert_eq!(errors.borrow().len(), 1);
    assert!(errors.borrow()[0].contains("id"));
}

#[wasm_bindgen_test]
fn dispose_removes_every_listener() {
    let mut page = mount_page();
    // Two items, wishlist button, modal and submit button.
    assert_eq!(page.controller.listener_count(), 5);
    page.controller.dispose();
    assert_eq!(page.controller.listener_count(), 0);

    page.click("li.category-item[data-forloop-index='1']");
    assert_eq!(page.controller.selected_index(), None);
    page.click(".wish-list-btn");
    assert!(!page.controller.modal_state().is_shown());
}

#[wasm_bindgen_test]
fn missing_region_fails_mount() {
    let doc = dom::document().expect("document");
    let wrapper = doc.create_element("section").expect("create wrapper");
    wrapper.set_inner_html(
        &MARKUP
            .replace("__PAYLOAD__", PAYLOAD)
            .replace("class=\"price-box\"", "class=\"cost\""),
    );
    doc.body().expect("body").append_child(&wrapper).expect("append");
    let container = wrapper
        .query_selector("best-sellers-host")
        .expect("query")
        .expect("host");
    let err = SectionController::mount(
        &container,
        Rc::new(WidgetConfig::default_config()),
        Rc::new(RecordingClient::default()),
        CartHooks::default(),
    )
    .err()
    .expect("mount should fail");
    assert!(err.to_string().contains(".price-box"));
}
