use tracing::warn;
use treeloader::{Field, Region, RenderSurface};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

/// The loader page, addressed by element id.
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn region(&self, region: Region) -> Option<HtmlElement> {
        let element = self
            .document
            .get_element_by_id(region.id())
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        if element.is_none() {
            warn!(id = region.id(), "region missing from page");
        }
        element
    }

    fn input(&self, field: Field) -> Option<HtmlInputElement> {
        let input = self
            .document
            .get_element_by_id(field.id())
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok());
        if input.is_none() {
            warn!(id = field.id(), "input missing from page");
        }
        input
    }
}

impl RenderSurface for DomSurface {
    fn show(&self, region: Region) {
        if let Some(element) = self.region(region) {
            if let Err(error) = element.style().remove_property("display") {
                warn!(id = region.id(), ?error, "could not show region");
            }
        }
    }

    fn hide(&self, region: Region) {
        if let Some(element) = self.region(region) {
            if let Err(error) = element.style().set_property("display", "none") {
                warn!(id = region.id(), ?error, "could not hide region");
            }
        }
    }

    fn set_text(&self, region: Region, text: &str) {
        if let Some(element) = self.region(region) {
            element.set_text_content(Some(text));
        }
    }

    fn replace_content(&self, region: Region, markup: &str) {
        if let Some(element) = self.region(region) {
            element.set_inner_html(markup);
        }
    }

    fn read_text(&self, field: Field) -> String {
        self.input(field)
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn write_text(&self, field: Field, value: &str) {
        if let Some(input) = self.input(field) {
            input.set_value(value);
        }
    }

    fn read_flag(&self, field: Field) -> bool {
        self.input(field).is_some_and(|input| input.checked())
    }

    fn write_flag(&self, field: Field, value: bool) {
        if let Some(input) = self.input(field) {
            input.set_checked(value);
        }
    }
}
