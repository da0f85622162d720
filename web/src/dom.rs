use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList};

use crate::error::DomError;

pub fn document() -> Result<Document, DomError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| DomError::MissingElement("document".to_owned()))
}

pub fn element_by_id(document: &Document, id: &str) -> Result<Element, DomError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(format!("#{id}")))
}

/// Every element under `root` matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, DomError> {
    Ok(elements(&root.query_selector_all(selector)?))
}

pub fn query_document(document: &Document, selector: &str) -> Result<Vec<Element>, DomError> {
    Ok(elements(&document.query_selector_all(selector)?))
}

fn elements(nodes: &NodeList) -> Vec<Element> {
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) -> Result<(), DomError> {
    Ok(element.style().set_property(property, value)?)
}
