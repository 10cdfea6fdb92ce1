//! Attribute-information lookup.
//!
//! Maps a generic property name (as stored in [`Element::properties`](crate::Element))
//! to the attribute name used in markup. HTML attribute names are
//! case-insensitive and mostly lower-cased; SVG keeps camelCase names such as
//! `viewBox` but dashes its presentation attributes.
//!
//! # Example
//!
//! ```
//! use vmark_hast::{Space, find};
//!
//! assert_eq!(find(Space::Html, "className").attribute, "class");
//! assert_eq!(find(Space::Html, "dataFootnoteRef").attribute, "data-footnote-ref");
//! assert_eq!(find(Space::Svg, "strokeWidth").attribute, "stroke-width");
//! assert_eq!(find(Space::Svg, "viewBox").attribute, "viewBox");
//! ```

use std::borrow::Cow;

/// Markup namespace an element lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Space {
    /// HTML namespace.
    #[default]
    Html,
    /// SVG namespace (an `<svg>` element and all its descendants).
    Svg,
}

/// Result of an attribute lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeInfo<'a> {
    /// Property name that was looked up.
    pub property: &'a str,
    /// Attribute name to use in markup.
    pub attribute: Cow<'a, str>,
    /// Namespace the lookup ran in.
    pub space: Space,
}

/// Properties whose attribute name is not derivable by case folding.
const HTML_SPECIAL: &[(&str, &str)] = &[
    ("acceptCharset", "accept-charset"),
    ("className", "class"),
    ("htmlFor", "for"),
    ("httpEquiv", "http-equiv"),
];

/// camelCase HTML properties whose attribute is the lower-cased name.
const HTML_LOWERCASED: &[&str] = &[
    "accessKey",
    "allowFullScreen",
    "autoCapitalize",
    "autoComplete",
    "autoFocus",
    "autoPlay",
    "cellPadding",
    "cellSpacing",
    "charOff",
    "charSet",
    "colSpan",
    "contentEditable",
    "crossOrigin",
    "dateTime",
    "encType",
    "enterKeyHint",
    "formAction",
    "formEncType",
    "formMethod",
    "formNoValidate",
    "formTarget",
    "frameBorder",
    "hSpace",
    "hrefLang",
    "inputMode",
    "isMap",
    "itemId",
    "itemProp",
    "itemRef",
    "itemScope",
    "itemType",
    "longDesc",
    "marginHeight",
    "marginWidth",
    "maxLength",
    "minLength",
    "noHref",
    "noModule",
    "noResize",
    "noShade",
    "noValidate",
    "noWrap",
    "playsInline",
    "readOnly",
    "referrerPolicy",
    "rowSpan",
    "spellCheck",
    "srcDoc",
    "srcLang",
    "srcSet",
    "tabIndex",
    "useMap",
    "vAlign",
    "vSpace",
];

/// SVG properties with a non-identical attribute name.
const SVG_SPECIAL: &[(&str, &str)] = &[
    ("alignmentBaseline", "alignment-baseline"),
    ("baselineShift", "baseline-shift"),
    ("className", "class"),
    ("clipPath", "clip-path"),
    ("clipRule", "clip-rule"),
    ("colorInterpolation", "color-interpolation"),
    ("colorInterpolationFilters", "color-interpolation-filters"),
    ("colorProfile", "color-profile"),
    ("colorRendering", "color-rendering"),
    ("dominantBaseline", "dominant-baseline"),
    ("enableBackground", "enable-background"),
    ("fillOpacity", "fill-opacity"),
    ("fillRule", "fill-rule"),
    ("floodColor", "flood-color"),
    ("floodOpacity", "flood-opacity"),
    ("fontFamily", "font-family"),
    ("fontSize", "font-size"),
    ("fontSizeAdjust", "font-size-adjust"),
    ("fontStretch", "font-stretch"),
    ("fontStyle", "font-style"),
    ("fontVariant", "font-variant"),
    ("fontWeight", "font-weight"),
    ("glyphOrientationHorizontal", "glyph-orientation-horizontal"),
    ("glyphOrientationVertical", "glyph-orientation-vertical"),
    ("imageRendering", "image-rendering"),
    ("letterSpacing", "letter-spacing"),
    ("lightingColor", "lighting-color"),
    ("markerEnd", "marker-end"),
    ("markerMid", "marker-mid"),
    ("markerStart", "marker-start"),
    ("paintOrder", "paint-order"),
    ("pointerEvents", "pointer-events"),
    ("shapeRendering", "shape-rendering"),
    ("stopColor", "stop-color"),
    ("stopOpacity", "stop-opacity"),
    ("strikethroughPosition", "strikethrough-position"),
    ("strikethroughThickness", "strikethrough-thickness"),
    ("strokeDashArray", "stroke-dasharray"),
    ("strokeDashOffset", "stroke-dashoffset"),
    ("strokeLineCap", "stroke-linecap"),
    ("strokeLineJoin", "stroke-linejoin"),
    ("strokeMiterLimit", "stroke-miterlimit"),
    ("strokeOpacity", "stroke-opacity"),
    ("strokeWidth", "stroke-width"),
    ("textAnchor", "text-anchor"),
    ("textDecoration", "text-decoration"),
    ("textRendering", "text-rendering"),
    ("transformOrigin", "transform-origin"),
    ("underlinePosition", "underline-position"),
    ("underlineThickness", "underline-thickness"),
    ("unicodeBidi", "unicode-bidi"),
    ("vectorEffect", "vector-effect"),
    ("wordSpacing", "word-spacing"),
    ("writingMode", "writing-mode"),
    ("xLinkActuate", "xlink:actuate"),
    ("xLinkArcRole", "xlink:arcrole"),
    ("xLinkHref", "xlink:href"),
    ("xLinkRole", "xlink:role"),
    ("xLinkShow", "xlink:show"),
    ("xLinkTitle", "xlink:title"),
    ("xLinkType", "xlink:type"),
    ("xmlBase", "xml:base"),
    ("xmlLang", "xml:lang"),
    ("xmlSpace", "xml:space"),
    ("xmlnsXLink", "xmlns:xlink"),
];

/// Look up the markup attribute name for a property.
///
/// Unknown properties map to themselves.
#[must_use]
pub fn find(space: Space, property: &str) -> AttributeInfo<'_> {
    AttributeInfo {
        property,
        attribute: attribute_name(space, property),
        space,
    }
}

fn attribute_name(space: Space, property: &str) -> Cow<'_, str> {
    if let Some(rest) = camel_suffix(property, "data") {
        return Cow::Owned(format!("data{}", dash_upper(rest)));
    }
    if let Some(rest) = camel_suffix(property, "aria") {
        return Cow::Owned(format!("aria-{}", rest.to_ascii_lowercase()));
    }

    match space {
        Space::Html => {
            if let Some(attr) = lookup(HTML_SPECIAL, property) {
                Cow::Borrowed(attr)
            } else if HTML_LOWERCASED.contains(&property) {
                Cow::Owned(property.to_ascii_lowercase())
            } else {
                Cow::Borrowed(property)
            }
        }
        Space::Svg => match lookup(SVG_SPECIAL, property) {
            Some(attr) => Cow::Borrowed(attr),
            None => Cow::Borrowed(property),
        },
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], property: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(prop, _)| *prop == property)
        .map(|(_, attr)| *attr)
}

/// Return the part after `prefix` when the property is `prefixCamelCase`.
fn camel_suffix<'a>(property: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = property.strip_prefix(prefix)?;
    rest.chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
        .then_some(rest)
}

/// `FootnoteRef` → `-footnote-ref`.
fn dash_upper(rest: &str) -> String {
    let mut out = String::with_capacity(rest.len() + 4);
    for c in rest.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_special_names() {
        assert_eq!(find(Space::Html, "className").attribute, "class");
        assert_eq!(find(Space::Html, "htmlFor").attribute, "for");
        assert_eq!(find(Space::Html, "httpEquiv").attribute, "http-equiv");
    }

    #[test]
    fn test_html_lowercased() {
        assert_eq!(find(Space::Html, "tabIndex").attribute, "tabindex");
        assert_eq!(find(Space::Html, "colSpan").attribute, "colspan");
    }

    #[test]
    fn test_data_and_aria() {
        assert_eq!(
            find(Space::Html, "dataFootnoteBackref").attribute,
            "data-footnote-backref"
        );
        assert_eq!(find(Space::Html, "data-x").attribute, "data-x");
        assert_eq!(
            find(Space::Html, "ariaDescribedBy").attribute,
            "aria-describedby"
        );
        assert_eq!(find(Space::Svg, "ariaHidden").attribute, "aria-hidden");
    }

    #[test]
    fn test_prefix_without_camel_case_is_unknown() {
        assert_eq!(find(Space::Html, "database").attribute, "database");
        assert_eq!(find(Space::Html, "data").attribute, "data");
    }

    #[test]
    fn test_unknown_passthrough() {
        assert_eq!(find(Space::Html, "slot-name").attribute, "slot-name");
        assert_eq!(find(Space::Html, "href").attribute, "href");
    }

    #[test]
    fn test_svg_is_case_sensitive() {
        assert_eq!(find(Space::Svg, "viewBox").attribute, "viewBox");
        assert_eq!(find(Space::Html, "viewBox").attribute, "viewBox");
        assert_eq!(find(Space::Svg, "tabIndex").attribute, "tabIndex");
        assert_eq!(find(Space::Svg, "xLinkHref").attribute, "xlink:href");
        assert_eq!(find(Space::Svg, "className").attribute, "class");
    }

    #[test]
    fn test_space_recorded() {
        let info = find(Space::Svg, "fill");
        assert_eq!(info.space, Space::Svg);
        assert_eq!(info.property, "fill");
    }
}
