//! Standalone HTML page around a rendered form

use tera::{Context, Tera};

use crate::domain::UiNode;

const FORM_PAGE_TEMPLATE: &str = include_str!("../../templates/form_page.html");

/// Render `form` into a complete HTML document.
///
/// `title` and `endpoint` are escaped; the form markup is inserted as already-escaped HTML.
pub fn render_page(title: &str, form: &UiNode, endpoint: Option<&str>) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("form", &form.to_html());
    context.insert("endpoint", &endpoint);

    Tera::one_off(FORM_PAGE_TEMPLATE, &context, true)
}
