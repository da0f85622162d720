use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::config::{INVALID_CLASS, LOADING_CLASS, REQUIRED_FIELDS_SELECTOR, VALID_CLASS};
use crate::dom;
use crate::error::{describe_js, DomError};
use crate::validation::{validate_fields, RequiredField};

const FEEDBACK_CLASS: &str = "invalid-feedback";

/// Fields carrying either validation marker.
fn marked_fields_selector() -> String {
    format!(".{INVALID_CLASS}, .{VALID_CLASS}")
}

fn feedback_selector() -> String {
    format!(".{FEEDBACK_CLASS}")
}

/// A required `input`, `select` or `textarea`.
struct DomField(Element);

impl RequiredField for DomField {
    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(textarea) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else {
            String::new()
        }
    }

    fn set_invalid(&self, invalid: bool) {
        let class_list = self.0.class_list();
        let result = if invalid {
            class_list.add_1(INVALID_CLASS)
        } else {
            class_list.remove_1(INVALID_CLASS)
        };
        if let Err(error) = result {
            log::warn!("Fail to update field marker, error={}", describe_js(&error));
        }
    }
}

/// Flags blank required fields of form `form_id` and clears the others.
pub fn validate_form(form_id: &str) -> Result<bool, DomError> {
    let document = dom::document()?;
    let form = dom::element_by_id(&document, form_id)?;
    let fields: Vec<DomField> = dom::query_all(&form, REQUIRED_FIELDS_SELECTOR)?
        .into_iter()
        .map(DomField)
        .collect();
    Ok(validate_fields(&fields))
}

pub fn reset_validation(form_id: &str) -> Result<(), DomError> {
    let document = dom::document()?;
    let form = dom::element_by_id(&document, form_id)?;
    for field in dom::query_all(&form, &marked_fields_selector())? {
        field.class_list().remove_2(INVALID_CLASS, VALID_CLASS)?;
    }
    Ok(())
}

/// Marks `field_id` invalid and writes `message` into its feedback element,
/// creating one next to the field when the template has none.
pub fn show_field_error(field_id: &str, message: &str) -> Result<(), DomError> {
    let document = dom::document()?;
    let field = dom::element_by_id(&document, field_id)?;
    field.class_list().add_1(INVALID_CLASS)?;

    let parent = field
        .parent_element()
        .ok_or_else(|| DomError::MissingElement(format!("parent of #{field_id}")))?;
    let feedback = match parent.query_selector(&feedback_selector())? {
        Some(feedback) => feedback,
        None => {
            let feedback = document.create_element("div")?;
            feedback.set_class_name(FEEDBACK_CLASS);
            parent.append_child(&feedback)?;
            feedback
        }
    };
    feedback.set_text_content(Some(message));
    Ok(())
}

/// Shows `element` as busy and blocks pointer interaction, or restores it.
/// Overlapping callers are not counted: the last call wins.
pub fn set_loading(element: &HtmlElement, is_loading: bool) -> Result<(), DomError> {
    if is_loading {
        element.class_list().add_1(LOADING_CLASS)?;
        dom::set_style(element, "pointer-events", "none")
    } else {
        element.class_list().remove_1(LOADING_CLASS)?;
        dom::set_style(element, "pointer-events", "auto")
    }
}
