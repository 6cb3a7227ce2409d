//! Writer fuer den XML-Dokumentbaum.

use super::document::{XmlDocument, XmlElement, XmlNode};

const INDENT: &str = "    ";

/// Schreibt ein Dokument als XML-Text (UTF-8, eingerueckt)
pub fn write_document(document: &XmlDocument) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");

    if let Some(ref comment) = document.comment {
        // "--" ist in Kommentaren nicht erlaubt
        output.push_str(&format!("<!-- {} -->\n", comment.replace("--", "- -")));
    }

    write_element(&mut output, &document.root, 0);
    output
}

fn write_element(output: &mut String, element: &XmlElement, depth: usize) {
    let indent = INDENT.repeat(depth);
    output.push_str(&indent);
    output.push('<');
    output.push_str(&element.name);
    for (key, value) in &element.attributes {
        output.push_str(&format!(" {}=\"{}\"", key, escape_xml(value)));
    }

    if element.children.is_empty() {
        output.push_str("/>\n");
        return;
    }

    let text_only = element
        .children
        .iter()
        .all(|node| matches!(node, XmlNode::Text(_)));

    if text_only {
        output.push_str(&format!(
            ">{}</{}>\n",
            escape_xml(&element.text()),
            element.name
        ));
        return;
    }

    output.push_str(">\n");
    for node in &element.children {
        match node {
            XmlNode::Element(child) => write_element(output, child, depth + 1),
            XmlNode::Text(text) => {
                output.push_str(&INDENT.repeat(depth + 1));
                output.push_str(&escape_xml(text));
                output.push('\n');
            }
        }
    }
    output.push_str(&format!("{}</{}>\n", indent, element.name));
}

/// Formatiert einen Zahlenwert verlustfrei und ohne ueberfluessige Nachkommastellen
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
