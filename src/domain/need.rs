use std::fmt;

use serde::{Deserialize, Deserializer};

/// A documentation item: a requirement, workflow, work product, etc.
///
/// Needs are produced by the documentation framework. Only the fields used by
/// the compliance checks are modelled; everything else in the export is
/// ignored.
///
/// Link fields are always present on the record. A field missing from the
/// source, or set to `null`, is an empty list. Empty link values are dropped.
/// The compliance options are read under both their hyphenated and their
/// underscored names; a record carrying both gets the union.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawNeed")]
pub struct Need {
    id: String,
    need_type: NeedType,
    title: Option<String>,
    /// The document the need was declared in.
    docname: Option<String>,
    lineno: Option<u32>,
    compliance_gd: Vec<String>,
    compliance_wp: Vec<String>,
    output: Vec<String>,
}

/// A need as it appears in an export.
#[derive(Deserialize)]
struct RawNeed {
    #[serde(default)]
    id: String,

    #[serde(rename = "type", default)]
    need_type: NeedType,

    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    docname: Option<String>,

    #[serde(default)]
    lineno: Option<u32>,

    #[serde(rename = "compliance-gd", default, deserialize_with = "deserialize_links")]
    compliance_gd: Vec<String>,

    #[serde(rename = "compliance_gd", default, deserialize_with = "deserialize_links")]
    compliance_gd_underscored: Vec<String>,

    #[serde(rename = "compliance-wp", default, deserialize_with = "deserialize_links")]
    compliance_wp: Vec<String>,

    #[serde(rename = "compliance_wp", default, deserialize_with = "deserialize_links")]
    compliance_wp_underscored: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_links")]
    output: Vec<String>,
}

impl From<RawNeed> for Need {
    fn from(raw: RawNeed) -> Self {
        let mut compliance_gd = raw.compliance_gd;
        compliance_gd.extend(raw.compliance_gd_underscored);
        let mut compliance_wp = raw.compliance_wp;
        compliance_wp.extend(raw.compliance_wp_underscored);

        Self {
            id: raw.id,
            need_type: raw.need_type,
            title: raw.title,
            docname: raw.docname,
            lineno: raw.lineno,
            compliance_gd,
            compliance_wp,
            output: raw.output,
        }
    }
}

impl Need {
    /// Creates a need with the given ID and type and no links.
    #[must_use]
    pub fn new(id: impl Into<String>, need_type: impl Into<NeedType>) -> Self {
        Self {
            id: id.into(),
            need_type: need_type.into(),
            title: None,
            docname: None,
            lineno: None,
            compliance_gd: Vec::new(),
            compliance_wp: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the source location of the need.
    #[must_use]
    pub fn with_location(mut self, docname: impl Into<String>, lineno: u32) -> Self {
        self.docname = Some(docname.into());
        self.lineno = Some(lineno);
        self
    }

    /// Sets the `compliance-gd` links.
    #[must_use]
    pub fn with_compliance_gd<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compliance_gd = normalise(links);
        self
    }

    /// Sets the `compliance-wp` links.
    #[must_use]
    pub fn with_compliance_wp<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compliance_wp = normalise(links);
        self
    }

    /// Sets the `output` links (the work products produced by a workflow).
    #[must_use]
    pub fn with_output<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output = normalise(links);
        self
    }

    /// The unique identifier of the need.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The type of the need.
    #[must_use]
    pub const fn need_type(&self) -> &NeedType {
        &self.need_type
    }

    /// The title of the need, if it has one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// IDs of the standard requirements this need complies with.
    #[must_use]
    pub fn compliance_gd(&self) -> &[String] {
        &self.compliance_gd
    }

    /// IDs of the standard work products this need complies with.
    #[must_use]
    pub fn compliance_wp(&self) -> &[String] {
        &self.compliance_wp
    }

    /// IDs of the work products produced by this need.
    ///
    /// Only meaningful for workflows.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// The `docname:lineno` location of the need, as far as it is known.
    #[must_use]
    pub fn location(&self) -> Option<String> {
        match (&self.docname, self.lineno) {
            (Some(doc), Some(line)) => Some(format!("{doc}:{line}")),
            (Some(doc), None) => Some(doc.clone()),
            (None, _) => None,
        }
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// The `type` of a need.
///
/// Only workflows and work products are significant to the checks. Every
/// other type is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum NeedType {
    /// A process that produces work products through its `output` links.
    Workflow,
    /// An artefact produced by a workflow.
    Workproduct,
    /// Any other type.
    Other(String),
}

impl NeedType {
    /// The type string as it appears in the documentation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Workflow => "workflow",
            Self::Workproduct => "workproduct",
            Self::Other(other) => other,
        }
    }
}

impl Default for NeedType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for NeedType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "workflow" => Self::Workflow,
            "workproduct" => Self::Workproduct,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for NeedType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl fmt::Display for NeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drops empty link values. Values are otherwise kept verbatim.
fn normalise<I, S>(links: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    links
        .into_iter()
        .map(Into::into)
        .filter(|link| !link.is_empty())
        .collect()
}

/// The shapes a link field takes in an export.
///
/// Link options are lists, but extra options declared as plain strings hold
/// comma separated IDs.
#[derive(Deserialize)]
#[serde(untagged)]
enum LinkField {
    List(Vec<Option<String>>),
    Joined(String),
}

fn deserialize_links<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let links = match Option::<LinkField>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(LinkField::List(items)) => normalise(items.into_iter().flatten()),
        Some(LinkField::Joined(joined)) => normalise(joined.split(',').map(str::trim)),
    };
    Ok(links)
}
