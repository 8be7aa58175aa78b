use crate::infer::component::Component;
use crate::report::report_model::{Render, collect_fields};
use crate::structure::field::Field;
use crate::structure::namespace::Namespace;
use crate::value::value_model::Value;

// ============================================================================
// HTML renderer: plain form markup
// ============================================================================

/// Renders each field as a label plus the input its inferred component
/// calls for. Classes come from the tree's theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Render for HtmlRenderer {
    fn render(&self, root: &Namespace) -> String {
        let mut out = format!("<form id=\"{}\">\n", escape_html(root.dom_id()));
        for field in collect_fields(root) {
            out.push_str(&render_field(&field));
        }
        out.push_str("</form>\n");
        out
    }
}

pub fn render_field(field: &Field) -> String {
    let mut out = String::new();

    if let Some(label) = field.label() {
        out.push_str(&format!(
            "<label for=\"{}\">{}</label>\n",
            escape_html(field.dom_id()),
            escape_html(&label)
        ));
    }

    let component = field.inferred_component();
    let mut attrs = vec![
        ("id", field.dom_id().to_string()),
        ("name", field.dom_name().to_string()),
    ];
    if let Some(classes) = field.context().theme.resolve(component.as_str()) {
        attrs.push(("class", classes.to_string()));
    }
    if let Some(placeholder) = field.placeholder() {
        attrs.push(("placeholder", placeholder));
    }

    let markup = match component {
        Component::Text | Component::Code => format!(
            "<textarea{}>{}</textarea>",
            format_attrs(&attrs),
            escape_html(field.dom_value())
        ),
        Component::Enum => render_select(field, &attrs),
        Component::Boolean => {
            // Unchecked boxes submit nothing, so a hidden "0" goes first.
            let hidden = format!(
                "<input type=\"hidden\" name=\"{}\" value=\"0\">",
                escape_html(field.dom_name())
            );
            attrs.push(("type", "checkbox".to_string()));
            attrs.push(("value", "1".to_string()));
            let checked = if *field.value() == Value::Bool(true) {
                " checked"
            } else {
                ""
            };
            format!("{}<input{}{}>", hidden, format_attrs(&attrs), checked)
        }
        Component::Password => {
            attrs.push(("type", "password".to_string()));
            format!("<input{}>", format_attrs(&attrs))
        }
        other => {
            attrs.push(("type", input_type(other).to_string()));
            if field.has_value() {
                attrs.push(("value", field.dom_value().to_string()));
            }
            format!("<input{}>", format_attrs(&attrs))
        }
    };

    out.push_str(&markup);
    out.push('\n');
    out
}

fn render_select(field: &Field, attrs: &[(&str, String)]) -> String {
    let selected = field.dom_value();
    let options: String = field
        .enum_values()
        .unwrap_or_default()
        .iter()
        .map(|option| {
            let marker = if option == selected { " selected" } else { "" };
            format!(
                "<option value=\"{0}\"{1}>{0}</option>",
                escape_html(option),
                marker
            )
        })
        .collect();

    format!("<select{}>{}</select>", format_attrs(attrs), options)
}

fn input_type(component: &Component) -> &'static str {
    match component {
        Component::Url => "url",
        Component::Email => "email",
        Component::Search => "search",
        Component::Phone => "tel",
        Component::Time => "time",
        Component::Date => "date",
        Component::DateTime => "datetime-local",
        Component::Number => "number",
        Component::Color => "color",
        Component::Attachment => "file",
        _ => "text",
    }
}

fn format_attrs(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape_html(value)))
        .collect()
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
