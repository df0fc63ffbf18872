#![cfg(target_arch = "wasm32")]

use folio_wasm::menu::MenuState;
use folio_wasm::modal::ModalState;
use folio_wasm::mount;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r##"
<div id="glitch-overlay"></div>
<button id="menu-toggle">MENU</button>
<nav id="hud-menu">
  <div class="menu-content">
    <a class="menu-link" href="#home">Home</a>
    <a class="menu-link" href="#nowhere">Gone</a>
  </div>
</nav>
<div class="section-indicator"></div>
<div class="section-indicator"></div>
<section id="home" style="height: 900px"><h1>Hi there</h1></section>
<section id="about" style="height: 900px">
  <div class="cert-card" data-pdf="/certs/a.pdf" data-title="A.pdf">
    <span class="name">A</span>
    <span class="download">download</span>
  </div>
</section>
<div id="resumeModal">
  <div class="pane"><h3></h3><iframe id="resumeFrame"></iframe></div>
</div>
<button id="openResume">CV</button>
<button id="closeResume">x</button>
"##;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fixture() -> HtmlElement {
    let document = document();
    let root: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    root.set_inner_html(FIXTURE);
    document.body().unwrap().append_child(&root).unwrap();
    root
}

fn html(selector: &str) -> HtmlElement {
    document()
        .query_selector(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("{selector} missing"))
        .dyn_into()
        .unwrap()
}

fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

#[wasm_bindgen_test]
fn menu_toggle_mirrors_state_in_label() {
    let root = fixture();
    let page = mount(&document()).unwrap();

    let toggle = html("#menu-toggle");
    toggle.click();
    assert_eq!(page.menu_state(), Some(MenuState::Open));
    assert_eq!(toggle.inner_text(), "CLOSE");
    assert_eq!(toggle.get_attribute("data-text").as_deref(), Some("CLOSE"));
    assert!(has_class(&html("#hud-menu"), "active"));

    // clicking inside the panel keeps it open, clicking elsewhere closes it
    html(".menu-content").click();
    assert_eq!(page.menu_state(), Some(MenuState::Open));
    html("#home").click();
    assert_eq!(page.menu_state(), Some(MenuState::Closed));
    assert_eq!(toggle.inner_text(), "MENU");

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn dead_menu_link_still_closes_menu() {
    let root = fixture();
    let page = mount(&document()).unwrap();

    html("#menu-toggle").click();
    html(".menu-link[href='#nowhere']").click();
    assert_eq!(page.menu_state(), Some(MenuState::Closed));

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn headings_are_split_into_chars() {
    let root = fixture();
    let page = mount(&document()).unwrap();

    let spans = document().query_selector_all("#home h1 .char").unwrap();
    assert_eq!(spans.length(), 8);
    assert_eq!(
        spans.item(2).unwrap().text_content().as_deref(),
        Some("\u{a0}")
    );

    drop(page);
    root.remove();
}

#[wasm_bindgen_test(async)]
async fn download_link_does_not_open_preview() {
    let root = fixture();
    let page = mount(&document()).unwrap();

    html(".cert-card .download").click();
    TimeoutFuture::new(30).await;
    assert_eq!(page.modal_state(), Some(ModalState::Closed));
    assert!(!page.scroll_locked());

    drop(page);
    root.remove();
}

#[wasm_bindgen_test(async)]
async fn card_preview_locks_scroll_until_closed() {
    let root = fixture();
    let page = mount(&document()).unwrap();

    html(".cert-card .name").click();
    TimeoutFuture::new(30).await;
    assert_eq!(
        page.modal_state(),
        Some(ModalState::Open {
            url: "/certs/a.pdf".into(),
            title: "A.pdf".into()
        })
    );
    assert!(page.scroll_locked());
    let body = document().body().unwrap();
    assert_eq!(
        body.style().get_property_value("overflow").unwrap(),
        "hidden"
    );
    assert_eq!(html("#resumeModal h3").text_content().as_deref(), Some("A.pdf"));

    html("#closeResume").click();
    assert_eq!(page.modal_state(), Some(ModalState::Closed));
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "");

    drop(page);
    root.remove();
}

#[wasm_bindgen_test(async)]
async fn only_the_backdrop_itself_closes_the_modal() {
    let root = fixture();
    let page = mount(&document()).unwrap();

    html("#openResume").click();
    TimeoutFuture::new(30).await;
    assert!(matches!(page.modal_state(), Some(ModalState::Open { .. })));

    // clicks on the content pane bubble through the backdrop but do not
    // land on it
    html("#resumeModal .pane").click();
    html("#resumeModal h3").click();
    assert!(matches!(page.modal_state(), Some(ModalState::Open { .. })));
    assert!(page.scroll_locked());

    html("#resumeModal").click();
    assert_eq!(page.modal_state(), Some(ModalState::Closed));
    assert!(!page.scroll_locked());
    let body = document().body().unwrap();
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "");
    assert!(!has_class(&html("#resumeModal"), "active"));

    drop(page);
    root.remove();
}

#[wasm_bindgen_test]
fn without_loader_home_is_revealed_during_mount() {
    let root = fixture();
    let page = mount(&document()).unwrap();

    // the headline characters already carry the first frame of their rise,
    // no load event or delay needed
    let first = html("#home h1 .char");
    assert_eq!(first.style().get_property_value("opacity").unwrap(), "0");
    assert_eq!(
        first.style().get_property_value("transform").unwrap(),
        "translateY(20px)"
    );
    assert_eq!(
        html("#home").style().get_property_value("opacity").unwrap(),
        "1"
    );

    drop(page);
    root.remove();
}
