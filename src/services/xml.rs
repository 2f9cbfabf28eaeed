use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use crate::services::FeedError;

/// Minimal owned element tree, enough to walk the open data feeds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    /// Text and CDATA content directly under this element, trimmed at both ends
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// First direct child called `name`
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child called `name`, if present and non-empty
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
    }

    /// This element and all its descendants called `name`, in document order
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect_descendants(name, found);
        }
    }
}

/// Parse a whole document and return its root element
pub fn parse_document(xml: &str) -> Result<XmlElement, FeedError> {
    // Pieces are joined untrimmed so spaces around CDATA and comments survive
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            XmlEvent::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(XmlElement::new(name));
            }
            XmlEvent::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                attach(XmlElement::new(name), &mut stack, &mut root)?;
            }
            XmlEvent::End(_) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| FeedError::Malformed("closing tag without opening tag".into()))?;
                element.text = element.text.trim().to_string();
                attach(element, &mut stack, &mut root)?;
            }
            XmlEvent::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?);
                }
            }
            XmlEvent::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            XmlEvent::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(FeedError::Malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| FeedError::Malformed("document has no root element".into()))
}

fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<(), FeedError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(FeedError::Malformed("more than one root element".into())),
    }
    Ok(())
}
