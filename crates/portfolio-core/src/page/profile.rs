use super::{Page, PageEffect};
use crate::document::{PageDocument, escape_html};
use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const PROFILE_IMAGE_ALT: &str = "Muhammad Waqar Profile Photo";
const PROFILE_IMAGE_ID: &str = "profile-image";
const IMAGE_ACCEPT: &str = "image/*";

/// A file the visitor picked; only ever previewed locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self { name, bytes })
    }

    fn mime_type(&self) -> &'static str {
        if let Ok(format) = image::guess_format(&self.bytes) {
            return format.to_mime_type();
        }
        match Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
        {
            Some(ext) if ext == "png" => "image/png",
            Some(ext) if ext == "webp" => "image/webp",
            Some(ext) if ext == "gif" => "image/gif",
            Some(ext) if ext == "svg" => "image/svg+xml",
            _ => "image/jpeg",
        }
    }
}

pub fn preview_data_url(file: &SelectedFile) -> String {
    let encoded = BASE64_STANDARD.encode(&file.bytes);
    format!("data:{};base64,{}", file.mime_type(), encoded)
}

impl Page {
    pub(super) fn handle_profile_clicked(
        &self,
        doc: &PageDocument,
        effects: &mut Vec<PageEffect>,
    ) {
        if doc.element_by_id(PROFILE_IMAGE_ID).is_none() {
            return;
        }
        debug!("Opening profile image picker");
        effects.push(PageEffect::OpenFilePicker {
            accept: IMAGE_ACCEPT,
        });
    }

    pub(super) fn handle_profile_chosen(
        &self,
        doc: &mut PageDocument,
        file: Option<SelectedFile>,
    ) {
        let Some(file) = file else {
            debug!("Profile image picker closed without a file");
            return;
        };
        let Some(container) = doc.element_by_id(PROFILE_IMAGE_ID) else {
            return;
        };
        let markup = format!(
            r#"<img src="{}" alt="{}">"#,
            preview_data_url(&file),
            escape_html(PROFILE_IMAGE_ALT)
        );
        doc.replace_inner_html(container, &markup);
        info!(name = %file.name, bytes = file.bytes.len(), "Profile image preview updated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;
    use crate::page::PageEvent;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    fn profile_page() -> PageDocument {
        let mut doc = PageDocument::new();
        let mut container = Element::new("div");
        container
            .attributes
            .insert("id".to_string(), PROFILE_IMAGE_ID.to_string());
        let container = doc.append(doc.body(), container);
        doc.append(container, Element::new("span"));
        doc
    }

    #[test]
    fn click_requests_image_picker() {
        let mut doc = profile_page();
        let mut page = Page::new(&doc);
        let effects = page.handle(&mut doc, PageEvent::ProfileImageClicked);
        assert_eq!(effects, vec![PageEffect::OpenFilePicker { accept: "image/*" }]);
    }

    #[test]
    fn chosen_file_is_rendered_inline() {
        let mut doc = profile_page();
        let mut page = Page::new(&doc);
        let file = SelectedFile {
            name: "me.bin".to_string(),
            bytes: PNG_HEADER.to_vec(),
        };
        page.handle(&mut doc, PageEvent::ProfileImageChosen(Some(file)));

        let container = doc.element_by_id(PROFILE_IMAGE_ID).expect("container");
        let html = &doc.get(container).expect("element").inner_html;
        assert!(html.starts_with(r#"<img src="data:image/png;base64,"#));
        assert!(html.ends_with(r#"alt="Muhammad Waqar Profile Photo">"#));
        assert!(doc.get(container).is_some_and(|e| e.children.is_empty()));
    }

    #[test]
    fn cancelled_picker_leaves_page_alone() {
        let mut doc = profile_page();
        let mut page = Page::new(&doc);
        page.handle(&mut doc, PageEvent::ProfileImageChosen(None));
        let container = doc.element_by_id(PROFILE_IMAGE_ID).expect("container");
        assert_eq!(doc.get(container).map(|e| e.children.len()), Some(1));
    }

    #[test]
    fn mime_falls_back_to_extension() {
        let file = SelectedFile {
            name: "portrait.WEBP".to_string(),
            bytes: b"not really an image".to_vec(),
        };
        assert!(preview_data_url(&file).starts_with("data:image/webp;base64,"));

        let file = SelectedFile {
            name: "portrait".to_string(),
            bytes: Vec::new(),
        };
        assert_eq!(preview_data_url(&file), "data:image/jpeg;base64,");
    }
}
