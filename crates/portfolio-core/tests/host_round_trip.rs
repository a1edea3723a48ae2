use portfolio_core::config::ConfigField;
use portfolio_core::html::parse_page;
use portfolio_core::page::{Page, PageEffect, PageEvent};
use portfolio_core::{ConfigPatch, ConfigRecord, FieldValue, LocalHost, SiteHost, register_with_host};
use std::rc::Rc;

const PAGE: &str = r##"<!DOCTYPE html>
<html>
<body>
  <nav id="navbar"><a href="#contact">Contact</a></nav>
  <h1 id="main-headline">Loading</h1>
  <p id="sub-headline"></p>
  <a id="cta-button" href="#contact"></a>
  <section id="contact">
    <h2 id="contact-title"></h2>
    <p id="contact-subtitle"></p>
  </section>
</body>
</html>"##;

fn start(record: ConfigRecord) -> (Rc<LocalHost>, portfolio_core::ConfigBinder) {
    let local = LocalHost::new(parse_page(PAGE), record);
    let host: Rc<dyn SiteHost> = local.clone();
    let binder = register_with_host(Some(&host));
    (local, binder)
}

#[test]
fn registration_renders_initial_config() {
    let (local, binder) = start(ConfigRecord {
        contact_title: Some("Get in touch".to_string()),
        ..ConfigRecord::default()
    });

    assert!(local.is_registered());
    assert!(binder.is_attached());
    let doc = local.document();
    assert_eq!(doc.text("main-headline"), Some("Hi, I'm Muhammad Waqar"));
    assert_eq!(doc.text("contact-title"), Some("Get in touch"));
    assert_eq!(doc.root_style("font-size"), Some("16px"));
}

#[test]
fn capability_edits_round_trip_through_host() {
    let (local, _binder) = start(ConfigRecord::default());
    let caps = local.capabilities().expect("registered");

    caps.recolorables[0].set("#ABCDEF");
    caps.font_sizeable.set(20.0);
    caps.font_editable.set("Lexend");

    assert_eq!(
        local.patches(),
        vec![
            ConfigPatch::new(ConfigField::BackgroundColor, "#ABCDEF"),
            ConfigPatch::new(ConfigField::FontSize, 20.0),
            ConfigPatch::new(ConfigField::FontFamily, "Lexend"),
        ]
    );
    assert_eq!(caps.recolorables[0].get(), FieldValue::from("#ABCDEF"));
    let doc = local.document();
    assert_eq!(doc.root_style("--light-bg"), Some("#ABCDEF"));
    assert_eq!(doc.root_style("font-size"), Some("20px"));
    assert_eq!(doc.body_style("font-family"), Some("Lexend, Arial, sans-serif"));
}

#[test]
fn edit_panel_reflects_text_edits() {
    let (local, _binder) = start(ConfigRecord::default());
    local.edit_text(ConfigField::SubHeadline, "Designer");
    local.edit_text(ConfigField::MainHeadline, "");

    let panel = local.edit_panel().expect("registered");
    assert_eq!(panel.get(ConfigField::SubHeadline), Some("Designer"));
    assert_eq!(panel.get(ConfigField::MainHeadline), Some("Hi, I'm Muhammad Waqar"));
    assert_eq!(local.document().text("sub-headline"), Some("Designer"));
}

#[test]
fn page_behaviors_share_the_hosted_document() {
    let (local, _binder) = start(ConfigRecord::default());
    let mut page = local.with_document_mut(|doc| Page::new(doc));

    let effects = local.with_document_mut(|doc| {
        page.handle(
            doc,
            PageEvent::AnchorClicked {
                href: "#contact".to_string(),
            },
        )
    });
    assert!(matches!(
        effects.as_slice(),
        [PageEffect::PreventDefault, PageEffect::ScrollIntoView { .. }]
    ));

    local.with_document_mut(|doc| {
        page.handle(
            doc,
            PageEvent::Scrolled {
                scroll_y: 120.0,
                viewport_height: 900.0,
            },
        )
    });
    let doc = local.document();
    let navbar = doc.element_by_id("navbar").expect("navbar");
    assert!(doc.get(navbar).is_some_and(|e| e.has_class("scrolled")));
}
