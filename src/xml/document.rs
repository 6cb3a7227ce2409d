//! Abstrakter XML-Dokumentbaum (geordnete Elemente mit Attributen).

/// Knoten innerhalb eines Elements
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Kind-Element
    Element(XmlElement),
    /// Textinhalt
    Text(String),
}

/// Ein XML-Element mit Attributen in Einfuegereihenfolge
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Erstellt ein leeres Element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Setzt ein Attribut (Builder-Stil)
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Setzt ein Attribut; ein vorhandener Wert wird ersetzt
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Fuegt Text als einzigen Inhalt an (Builder-Stil)
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Haengt ein Kind-Element an
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Liest ein Attribut
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Alle Kind-Elemente
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Kind-Elemente mit dem angegebenen Namen
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |element| element.name == name)
    }

    /// Erstes Kind-Element mit dem angegebenen Namen
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// Zusammengefuegter Textinhalt
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }
}

/// Vollstaendiges Dokument: optionaler Kommentar vor dem Wurzelelement
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub comment: Option<String>,
    pub root: XmlElement,
}

impl XmlDocument {
    /// Erstellt ein Dokument ohne Kommentar
    pub fn new(root: XmlElement) -> Self {
        Self {
            comment: None,
            root,
        }
    }
}
