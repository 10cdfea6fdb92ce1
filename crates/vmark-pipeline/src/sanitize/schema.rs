//! Sanitize schema in the hast-util-sanitize JSON shape.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use vmark_hast::PropertyValue;

static LANGUAGE_CLASS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^language-.").unwrap());

/// Which elements and properties survive sanitizing.
///
/// Serialises with camelCase keys so fragments written for
/// `hast-util-sanitize` (`tagNames`, `clobberPrefix`, ...) deserialize as-is.
/// [`Schema::default`] is the GitHub-style default schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schema {
    /// Allowed tag names. Other elements are replaced by their children.
    pub tag_names: Vec<String>,
    /// Allowed properties per tag name; `*` applies to every element.
    pub attributes: BTreeMap<String, Vec<AttributeRule>>,
    /// Disallowed tags removed together with their content.
    pub strip: Vec<String>,
    /// Allowed URL protocols per property name.
    pub protocols: BTreeMap<String, Vec<String>>,
    /// Properties whose values get [`clobber_prefix`](Self::clobber_prefix).
    pub clobber: Vec<String>,
    /// Prefix for clobber-prone values.
    pub clobber_prefix: String,
    /// Properties added to an element when missing.
    pub required: BTreeMap<String, BTreeMap<String, Value>>,
    /// Tags that are only allowed inside one of the listed ancestors.
    pub ancestors: BTreeMap<String, Vec<String>>,
    /// Keep comment nodes.
    pub allow_comments: bool,
    /// Keep doctype nodes.
    pub allow_doctypes: bool,
}

/// One allowed property, optionally restricted to a set of values.
///
/// JSON form is either the property name (`"href"`) or an array of the name
/// followed by allowed values (`["className", "task-list-item"]`). A value
/// written as `{"pattern": "^language-."}` is matched as a regular expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct AttributeRule {
    /// Property name, or `data*` for every data property.
    pub name: String,
    /// Allowed values; `None` allows any value.
    pub values: Option<Vec<ValueRule>>,
}

/// Allowed value of a restricted property.
#[derive(Clone, Debug)]
pub enum ValueRule {
    /// Value must equal this JSON scalar.
    Exact(Value),
    /// String form of the value must match.
    Pattern(Regex),
}

impl PartialEq for ValueRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl ValueRule {
    /// Whether a single (non-list) value satisfies this rule.
    #[must_use]
    pub fn matches(&self, value: &PropertyValue) -> bool {
        match (self, value) {
            (Self::Exact(Value::String(expected)), PropertyValue::Str(actual)) => expected == actual,
            (Self::Exact(Value::Bool(expected)), PropertyValue::Bool(actual)) => expected == actual,
            (Self::Exact(Value::Number(expected)), PropertyValue::Number(actual)) => {
                expected.as_f64() == Some(*actual)
            }
            (Self::Pattern(pattern), PropertyValue::Str(actual)) => pattern.is_match(actual),
            (Self::Pattern(pattern), PropertyValue::Number(actual)) => {
                pattern.is_match(&actual.to_string())
            }
            _ => false,
        }
    }
}

impl AttributeRule {
    /// Allow any value of `name`.
    #[must_use]
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: None,
        }
    }

    /// Allow only the given values of `name`.
    #[must_use]
    pub fn only(name: impl Into<String>, values: Vec<ValueRule>) -> Self {
        Self {
            name: name.into(),
            values: Some(values),
        }
    }

    /// Whether this rule covers the property `key`.
    #[must_use]
    pub fn covers(&self, key: &str) -> bool {
        self.name == key || (self.name == "data*" && is_data_property(key))
    }
}

fn is_data_property(key: &str) -> bool {
    key.strip_prefix("data")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase() || c == '-')
}

impl TryFrom<Value> for AttributeRule {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(name) => Ok(Self::any(name)),
            Value::Array(items) => {
                let mut items = items.into_iter();
                let Some(Value::String(name)) = items.next() else {
                    return Err("attribute rule must start with a property name".to_owned());
                };
                let values = items.map(value_rule).collect::<Result<Vec<_>, _>>()?;
                Ok(Self::only(name, values))
            }
            other => Err(format!("invalid attribute rule: {other}")),
        }
    }
}

fn value_rule(value: Value) -> Result<ValueRule, String> {
    match value {
        Value::Object(mut object) => match object.remove("pattern") {
            Some(Value::String(pattern)) => Regex::new(&pattern)
                .map(ValueRule::Pattern)
                .map_err(|e| format!("invalid value pattern `{pattern}`: {e}")),
            _ => Err("value object must have a string `pattern`".to_owned()),
        },
        Value::Array(_) | Value::Null => Err(format!("invalid attribute value: {value}")),
        scalar => Ok(ValueRule::Exact(scalar)),
    }
}

impl From<AttributeRule> for Value {
    fn from(rule: AttributeRule) -> Self {
        match rule.values {
            None => Value::String(rule.name),
            Some(values) => {
                let mut items = vec![Value::String(rule.name)];
                items.extend(values.into_iter().map(|value| match value {
                    ValueRule::Exact(value) => value,
                    ValueRule::Pattern(pattern) => json!({ "pattern": pattern.as_str() }),
                }));
                Value::Array(items)
            }
        }
    }
}

/// Convert a JSON scalar from [`Schema::required`] into a property value.
pub(crate) fn property_from_json(value: &Value) -> Option<PropertyValue> {
    match value {
        Value::Bool(b) => Some(PropertyValue::Bool(*b)),
        Value::Number(n) => n.as_f64().map(PropertyValue::Number),
        Value::String(s) => Some(PropertyValue::Str(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_owned))
            .collect::<Option<Vec<_>>>()
            .map(PropertyValue::List),
        Value::Null | Value::Object(_) => None,
    }
}

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn rules(items: &[&str]) -> Vec<AttributeRule> {
    items.iter().map(|name| AttributeRule::any(*name)).collect()
}

fn exact(name: &str, value: impl Into<Value>) -> AttributeRule {
    AttributeRule::only(name, vec![ValueRule::Exact(value.into())])
}

const ARIA: &[&str] = &["ariaDescribedBy", "ariaLabel", "ariaLabelledBy"];

const GLOBAL_PROPERTIES: &[&str] = &[
    "abbr", "accept", "acceptCharset", "accessKey", "action", "align", "alt", "axis", "border",
    "cellPadding", "cellSpacing", "char", "charOff", "charSet", "checked", "clear", "colSpan",
    "color", "cols", "compact", "coords", "dateTime", "dir", "encType", "frame", "hSpace",
    "headers", "height", "hrefLang", "htmlFor", "id", "isMap", "itemProp", "label", "lang",
    "maxLength", "media", "method", "multiple", "name", "noHref", "noShade", "noWrap", "open",
    "prompt", "readOnly", "rev", "rowSpan", "rows", "rules", "scope", "selected", "shape", "size",
    "span", "start", "summary", "tabIndex", "title", "useMap", "vAlign", "value", "width",
];

const TAG_NAMES: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "dd", "del", "details", "div", "dl", "dt", "em", "h1",
    "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "input", "ins", "kbd", "li", "ol", "p",
    "picture", "pre", "q", "rp", "rt", "ruby", "s", "samp", "section", "source", "span", "strike",
    "strong", "sub", "summary", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "tt",
    "ul", "var",
];

impl Default for Schema {
    fn default() -> Self {
        let with_aria = |extra: Vec<AttributeRule>| {
            let mut list = rules(ARIA);
            list.extend(extra);
            list
        };

        let mut attributes = BTreeMap::new();
        attributes.insert(
            "a".to_owned(),
            with_aria(vec![
                AttributeRule::any("dataFootnoteBackref"),
                AttributeRule::any("dataFootnoteRef"),
                exact("className", "data-footnote-backref"),
                AttributeRule::any("href"),
            ]),
        );
        attributes.insert("blockquote".to_owned(), rules(&["cite"]));
        attributes.insert(
            "code".to_owned(),
            vec![AttributeRule::only(
                "className",
                vec![ValueRule::Pattern(LANGUAGE_CLASS.clone())],
            )],
        );
        attributes.insert("del".to_owned(), rules(&["cite"]));
        attributes.insert("div".to_owned(), rules(&["itemScope", "itemType"]));
        attributes.insert("dl".to_owned(), rules(ARIA));
        attributes.insert("h2".to_owned(), vec![exact("className", "sr-only")]);
        attributes.insert(
            "img".to_owned(),
            with_aria(rules(&["longDesc", "src"])),
        );
        attributes.insert(
            "input".to_owned(),
            vec![exact("disabled", true), exact("type", "checkbox")],
        );
        attributes.insert("ins".to_owned(), rules(&["cite"]));
        attributes.insert("li".to_owned(), vec![exact("className", "task-list-item")]);
        attributes.insert(
            "ol".to_owned(),
            with_aria(vec![exact("className", "contains-task-list")]),
        );
        attributes.insert("q".to_owned(), rules(&["cite"]));
        attributes.insert(
            "section".to_owned(),
            vec![
                AttributeRule::any("dataFootnotes"),
                exact("className", "footnotes"),
            ],
        );
        attributes.insert("source".to_owned(), rules(&["srcSet"]));
        attributes.insert("summary".to_owned(), rules(ARIA));
        attributes.insert("table".to_owned(), rules(ARIA));
        attributes.insert(
            "ul".to_owned(),
            with_aria(vec![exact("className", "contains-task-list")]),
        );
        attributes.insert("*".to_owned(), rules(GLOBAL_PROPERTIES));

        let mut protocols = BTreeMap::new();
        protocols.insert("cite".to_owned(), names(&["http", "https"]));
        protocols.insert(
            "href".to_owned(),
            names(&["http", "https", "irc", "ircs", "mailto", "xmpp"]),
        );
        protocols.insert("longDesc".to_owned(), names(&["http", "https"]));
        protocols.insert("src".to_owned(), names(&["http", "https"]));

        let mut required = BTreeMap::new();
        required.insert(
            "input".to_owned(),
            BTreeMap::from([
                ("disabled".to_owned(), Value::Bool(true)),
                ("type".to_owned(), Value::String("checkbox".to_owned())),
            ]),
        );

        let ancestors = ["tbody", "td", "tfoot", "th", "thead", "tr"]
            .into_iter()
            .map(|tag| (tag.to_owned(), names(&["table"])))
            .collect();

        Self {
            tag_names: names(TAG_NAMES),
            attributes,
            strip: names(&["script"]),
            protocols,
            clobber: names(&["ariaDescribedBy", "ariaLabelledBy", "id", "name"]),
            clobber_prefix: "user-content-".to_owned(),
            required,
            ancestors,
            allow_comments: false,
            allow_doctypes: false,
        }
    }
}
