//! Typed panel property descriptors.
//!
//! A [`Property`] declares one user-facing configuration field of a filter:
//! its kind, default value(s), display label, help text, and kind-specific
//! extras (slider range, enumeration domain). Descriptors validate eagerly
//! at construction, get their panel identifier bound during discovery, and
//! render themselves to a markup fragment.

use crate::markup::Element;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The closed set of property kinds understood by the panel generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PropertyKind {
    /// An on/off toggle, stored as `0` or `1`.
    Boolean,
    /// One to three integers.
    Integer,
    /// A single line of text.
    String,
    /// One to three floating-point values, optionally with a slider range.
    Double,
    /// One value out of a closed, ordered set of named integers.
    IntegerEnum,
}

impl PropertyKind {
    /// Markup tag used for fields of this kind.
    pub fn tag_name(self) -> &'static str {
        match self {
            PropertyKind::Boolean | PropertyKind::Integer | PropertyKind::IntegerEnum => {
                "IntVectorProperty"
            }
            PropertyKind::String => "StringVectorProperty",
            PropertyKind::Double => "DoubleVectorProperty",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKind::Boolean => "boolean",
            PropertyKind::Integer => "integer",
            PropertyKind::String => "string",
            PropertyKind::Double => "double",
            PropertyKind::IntegerEnum => "integer-enum",
        };
        f.write_str(name)
    }
}

/// A single default value entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Scalar {
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Real(f64),
    /// A text value.
    Text(String),
}

impl Scalar {
    fn type_name(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "integer",
            Scalar::Real(_) => "real",
            Scalar::Text(_) => "text",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{n}"),
            // Integral doubles keep a trailing `.0` so double fields read
            // as doubles in the document.
            Scalar::Real(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Scalar::Real(v) => write!(f, "{v}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Default values for a property, accepted from single scalars or short
/// sequences. An empty sequence means "use the kind's zero value".
#[derive(Debug, Clone, Default)]
pub struct DefaultValues(Vec<Scalar>);

impl From<Scalar> for DefaultValues {
    fn from(value: Scalar) -> Self {
        DefaultValues(vec![value])
    }
}

impl From<Vec<Scalar>> for DefaultValues {
    fn from(values: Vec<Scalar>) -> Self {
        DefaultValues(values)
    }
}

impl From<bool> for DefaultValues {
    fn from(value: bool) -> Self {
        DefaultValues(vec![Scalar::Int(i64::from(value))])
    }
}

impl From<i32> for DefaultValues {
    fn from(value: i32) -> Self {
        DefaultValues(vec![Scalar::Int(i64::from(value))])
    }
}

impl From<i64> for DefaultValues {
    fn from(value: i64) -> Self {
        DefaultValues(vec![Scalar::Int(value)])
    }
}

impl From<f64> for DefaultValues {
    fn from(value: f64) -> Self {
        DefaultValues(vec![Scalar::Real(value)])
    }
}

impl From<&str> for DefaultValues {
    fn from(value: &str) -> Self {
        DefaultValues(vec![Scalar::Text(value.to_string())])
    }
}

impl From<String> for DefaultValues {
    fn from(value: String) -> Self {
        DefaultValues(vec![Scalar::Text(value)])
    }
}

impl From<Vec<i64>> for DefaultValues {
    fn from(values: Vec<i64>) -> Self {
        DefaultValues(values.into_iter().map(Scalar::Int).collect())
    }
}

impl From<Vec<f64>> for DefaultValues {
    fn from(values: Vec<f64>) -> Self {
        DefaultValues(values.into_iter().map(Scalar::Real).collect())
    }
}

impl<const N: usize> From<[bool; N]> for DefaultValues {
    fn from(values: [bool; N]) -> Self {
        DefaultValues(values.iter().map(|&v| Scalar::Int(i64::from(v))).collect())
    }
}

impl<const N: usize> From<[i64; N]> for DefaultValues {
    fn from(values: [i64; N]) -> Self {
        DefaultValues(values.iter().map(|&v| Scalar::Int(v)).collect())
    }
}

impl<const N: usize> From<[f64; N]> for DefaultValues {
    fn from(values: [f64; N]) -> Self {
        DefaultValues(values.iter().map(|&v| Scalar::Real(v)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DefaultValues {
    fn from(values: [&str; N]) -> Self {
        DefaultValues(values.iter().map(|v| Scalar::Text(v.to_string())).collect())
    }
}

/// One named entry of an enumeration domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumEntry {
    /// The underlying integer value.
    pub value: i64,
    /// The display name shown in the panel.
    pub name: String,
}

/// A closed, ordered set of named integer values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDomain {
    entries: Vec<EnumEntry>,
}

impl EnumDomain {
    /// Builds a domain from `(value, name)` pairs, preserving order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        EnumDomain {
            entries: entries
                .into_iter()
                .map(|(value, name)| EnumEntry {
                    value,
                    name: name.into(),
                })
                .collect(),
        }
    }

    /// Returns whether `value` is a member of the domain.
    pub fn contains(&self, value: i64) -> bool {
        self.entries.iter().any(|e| e.value == value)
    }

    /// Returns the entries in declaration order.
    pub fn entries(&self) -> &[EnumEntry] {
        &self.entries
    }
}

/// Errors raised while declaring or rendering a property.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// More than three default values were supplied.
    #[error("a property can carry at most 3 default values, got {0}")]
    TooManyValues(usize),
    /// A multi-valued default contained text; only numbers can repeat.
    #[error("only numeric properties can carry more than one default value")]
    MultiValueText,
    /// A boolean property was given more than one default value.
    #[error("boolean properties carry exactly one default value, got {0}")]
    BooleanArity(usize),
    /// A default value's scalar type does not fit the property kind.
    #[error("{kind} properties do not accept {got} default values")]
    WrongValueType {
        /// The declared property kind.
        kind: PropertyKind,
        /// The offending scalar type.
        got: &'static str,
    },
    /// An enumeration default is not a member of its domain.
    #[error("default value {0} is not a member of the enumeration domain")]
    NotInDomain(i64),
    /// A slider range was requested on a non-double property.
    #[error("slider ranges only apply to double properties")]
    SliderOnNonDouble,
    /// Multi-line text widgets are not supported by the host panel.
    #[error("multi-line string properties are not supported by the host panel")]
    MultiLineUnsupported,
    /// The property was rendered before a name was bound.
    #[error("property was rendered before a name was bound")]
    Unbound,
}

/// A typed, self-describing configuration field declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    kind: PropertyKind,
    name: Option<String>,
    label: Option<String>,
    defaults: Vec<Scalar>,
    help: String,
    slider: Option<(f64, f64)>,
    domain: Option<EnumDomain>,
}

impl Property {
    fn with_kind(kind: PropertyKind, defaults: Vec<Scalar>) -> Self {
        Property {
            kind,
            name: None,
            label: None,
            defaults,
            help: String::new(),
            slider: None,
            domain: None,
        }
    }

    /// Declares an on/off toggle. The default is coerced to `0` or `1`.
    pub fn boolean(default: impl Into<DefaultValues>) -> Result<Self, PropertyError> {
        let values = normalize(default.into(), Scalar::Int(0))?;
        if values.len() > 1 {
            return Err(PropertyError::BooleanArity(values.len()));
        }
        let coerced = values
            .into_iter()
            .map(|v| match v {
                Scalar::Int(n) => Ok(Scalar::Int(i64::from(n != 0))),
                other => Err(PropertyError::WrongValueType {
                    kind: PropertyKind::Boolean,
                    got: other.type_name(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_kind(PropertyKind::Boolean, coerced))
    }

    /// Declares an integer field with one to three default values.
    pub fn integer(default: impl Into<DefaultValues>) -> Result<Self, PropertyError> {
        let values = normalize(default.into(), Scalar::Int(0))?;
        for value in &values {
            if !matches!(value, Scalar::Int(_)) {
                return Err(PropertyError::WrongValueType {
                    kind: PropertyKind::Integer,
                    got: value.type_name(),
                });
            }
        }
        Ok(Self::with_kind(PropertyKind::Integer, values))
    }

    /// Declares a single-valued text field.
    pub fn string(default: impl Into<DefaultValues>) -> Result<Self, PropertyError> {
        let values = normalize(default.into(), Scalar::Text(String::new()))?;
        for value in &values {
            if !matches!(value, Scalar::Text(_)) {
                return Err(PropertyError::WrongValueType {
                    kind: PropertyKind::String,
                    got: value.type_name(),
                });
            }
        }
        Ok(Self::with_kind(PropertyKind::String, values))
    }

    /// Declares a floating-point field with one to three default values.
    /// Integer defaults are widened to doubles.
    pub fn double(default: impl Into<DefaultValues>) -> Result<Self, PropertyError> {
        let values = normalize(default.into(), Scalar::Real(0.0))?
            .into_iter()
            .map(|v| match v {
                Scalar::Real(x) => Ok(Scalar::Real(x)),
                Scalar::Int(n) => Ok(Scalar::Real(n as f64)),
                other => Err(PropertyError::WrongValueType {
                    kind: PropertyKind::Double,
                    got: other.type_name(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_kind(PropertyKind::Double, values))
    }

    /// Declares a choice out of a closed enumeration domain. The default
    /// must be a member of the domain and is stored as its integer value.
    pub fn enumeration(domain: EnumDomain, default: i64) -> Result<Self, PropertyError> {
        if !domain.contains(default) {
            return Err(PropertyError::NotInDomain(default));
        }
        let mut property = Self::with_kind(PropertyKind::IntegerEnum, vec![Scalar::Int(default)]);
        property.domain = Some(domain);
        Ok(property)
    }

    /// Sets an explicit display label. Without one, the label is derived
    /// from the name at bind time.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the help text shown as the field's documentation.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Attaches an inclusive slider range to a double property.
    pub fn with_slider(mut self, min: f64, max: f64) -> Result<Self, PropertyError> {
        if self.kind != PropertyKind::Double {
            return Err(PropertyError::SliderOnNonDouble);
        }
        self.slider = Some((min, max));
        Ok(self)
    }

    /// Requests a multi-line widget for a string property.
    ///
    /// Always rejected for now: a host defect keeps multi-line string
    /// widgets from loading
    /// (<https://gitlab.kitware.com/paraview/paraview/issues/18045>).
    pub fn multi_line(self) -> Result<Self, PropertyError> {
        Err(PropertyError::MultiLineUnsupported)
    }

    /// Binds the panel identifier. When no explicit label was given, one is
    /// derived from the name: underscores become spaces and each word is
    /// title-cased.
    pub fn bind_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.label.is_none() {
            self.label = Some(title_case(&name));
        }
        self.name = Some(name);
    }

    /// Returns the property kind.
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Returns the bound name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the display label, if set or derived.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Space-joined string form of the default values.
    pub fn default_values(&self) -> String {
        self.defaults
            .iter()
            .map(Scalar::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders the property to its markup fragment.
    ///
    /// Fails with [`PropertyError::Unbound`] when no name was bound.
    /// Rendering is idempotent: repeated calls on the same bound property
    /// produce identical fragments.
    pub fn xml_element(&self) -> Result<Element, PropertyError> {
        let name = self.name.as_deref().ok_or(PropertyError::Unbound)?;
        let label = self.label.as_deref().unwrap_or(name);

        let mut root = Element::new(self.kind.tag_name())
            .attr("name", name)
            .attr("label", label)
            .attr("initial_string", name)
            .attr("command", "SetParameter")
            .attr("animateable", "1")
            .attr("default_values", self.default_values())
            .attr("number_of_elements", self.defaults.len().to_string());

        if !self.help.is_empty() {
            root.push(Element::new("Documentation").text(&self.help));
        }

        match self.kind {
            PropertyKind::Boolean => {
                root.push(Element::new("BooleanDomain").attr("name", "bool"));
            }
            PropertyKind::IntegerEnum => {
                let mut domain = Element::new("EnumerationDomain").attr("name", "enum");
                if let Some(spec) = &self.domain {
                    for entry in spec.entries() {
                        domain.push(
                            Element::new("Entry")
                                .attr("value", entry.value.to_string())
                                .attr("text", &entry.name),
                        );
                    }
                }
                root.push(domain);
            }
            PropertyKind::Double => {
                if let Some((min, max)) = self.slider {
                    root.push(
                        Element::new("DoubleRangeDomain")
                            .attr("name", "range")
                            .attr("min", Scalar::Real(min).to_string())
                            .attr("max", Scalar::Real(max).to_string()),
                    );
                }
            }
            PropertyKind::Integer | PropertyKind::String => {}
        }

        Ok(root)
    }
}

/// Normalizes raw default values: empty falls back to the kind's zero,
/// at most three entries, and multi-valued sequences must be purely numeric.
fn normalize(values: DefaultValues, zero: Scalar) -> Result<Vec<Scalar>, PropertyError> {
    let mut values = values.0;
    if values.is_empty() {
        values.push(zero);
    }
    if values.len() > 3 {
        return Err(PropertyError::TooManyValues(values.len()));
    }
    if values.len() > 1 && values.iter().any(|v| matches!(v, Scalar::Text(_))) {
        return Err(PropertyError::MultiValueText);
    }
    Ok(values)
}

/// Replaces underscores with spaces and title-cases words the way Python's
/// `str.title` does: a letter is uppercased when the preceding character is
/// not a letter, lowercased otherwise.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for ch in name.chars() {
        if ch == '_' {
            out.push(' ');
            prev_alpha = false;
        } else if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn more_than_three_values_rejected() {
        let err = Property::integer([0i64, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, PropertyError::TooManyValues(4)), "{err:?}");
    }

    #[test]
    fn multi_valued_string_rejected() {
        let err = Property::string(["a", "b"]).unwrap_err();
        assert!(matches!(err, PropertyError::MultiValueText), "{err:?}");
    }

    #[test]
    fn boolean_takes_exactly_one_value() {
        let err = Property::boolean([true, false]).unwrap_err();
        assert!(matches!(err, PropertyError::BooleanArity(2)), "{err:?}");
    }

    #[test]
    fn boolean_coerces_to_zero_or_one() {
        let prop = Property::boolean(5i64).unwrap();
        assert_eq!(prop.default_values(), "1");
        let prop = Property::boolean(false).unwrap();
        assert_eq!(prop.default_values(), "0");
    }

    #[test]
    fn empty_defaults_fall_back_to_kind_zero() {
        assert_eq!(Property::integer(Vec::<i64>::new()).unwrap().default_values(), "0");
        assert_eq!(Property::double(Vec::<f64>::new()).unwrap().default_values(), "0.0");
        assert_eq!(Property::string("").unwrap().default_values(), "");
    }

    #[test]
    fn double_widens_integer_defaults() {
        let prop = Property::double(2i64).unwrap();
        assert_eq!(prop.default_values(), "2.0");
    }

    #[test]
    fn double_keeps_fractional_form() {
        let prop = Property::double(vec![0.5, 1.25]).unwrap();
        assert_eq!(prop.default_values(), "0.5 1.25");
    }

    #[test]
    fn integer_rejects_text_default() {
        let err = Property::integer(Scalar::Text("x".into())).unwrap_err();
        assert!(
            matches!(
                err,
                PropertyError::WrongValueType {
                    kind: PropertyKind::Integer,
                    ..
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn enumeration_default_must_be_member() {
        let domain = EnumDomain::new([(1, "one"), (2, "two")]);
        let err = Property::enumeration(domain, 3).unwrap_err();
        assert!(matches!(err, PropertyError::NotInDomain(3)), "{err:?}");
    }

    #[test]
    fn slider_only_on_doubles() {
        let err = Property::integer(0i64).unwrap().with_slider(0.0, 1.0).unwrap_err();
        assert!(matches!(err, PropertyError::SliderOnNonDouble), "{err:?}");
    }

    #[test]
    fn multi_line_is_rejected() {
        let err = Property::string("x").unwrap().multi_line().unwrap_err();
        assert!(matches!(err, PropertyError::MultiLineUnsupported), "{err:?}");
    }

    #[test]
    fn render_before_bind_fails() {
        let prop = Property::integer(1i64).unwrap();
        let err = prop.xml_element().unwrap_err();
        assert!(matches!(err, PropertyError::Unbound), "{err:?}");
    }

    #[test]
    fn label_derived_from_name() {
        let mut prop = Property::integer([0i64, 1, 2]).unwrap();
        prop.bind_name("many_ints");
        assert_eq!(prop.label(), Some("Many Ints"));
    }

    #[test]
    fn explicit_label_wins_over_derivation() {
        let mut prop = Property::boolean(true).unwrap().with_label("Use cache");
        prop.bind_name("use_cache");
        assert_eq!(prop.label(), Some("Use cache"));
    }

    #[test]
    fn title_case_matches_python_title() {
        assert_eq!(title_case("many_ints"), "Many Ints");
        assert_eq!(title_case("abc2def"), "Abc2Def");
        assert_eq!(title_case("already Title"), "Already Title");
    }

    #[test]
    fn render_is_idempotent_once_bound() {
        let mut prop = Property::double(0.5)
            .unwrap()
            .with_slider(0.0, 1.0)
            .unwrap()
            .with_help("double with slider");
        prop.bind_name("double_slider");
        let first = prop.xml_element().unwrap().to_xml();
        let second = prop.xml_element().unwrap().to_xml();
        assert_eq!(first, second);
    }

    #[test]
    fn boolean_renders_bool_domain() {
        let mut prop = Property::boolean(true).unwrap();
        prop.bind_name("flag");
        let xml = prop.xml_element().unwrap().to_xml();
        assert!(xml.starts_with("<IntVectorProperty name=\"flag\""), "{xml}");
        assert!(xml.contains("<BooleanDomain name=\"bool\"/>"), "{xml}");
        assert!(xml.contains("default_values=\"1\""), "{xml}");
        assert!(xml.contains("number_of_elements=\"1\""), "{xml}");
    }

    #[test]
    fn enumeration_renders_entries_in_declaration_order() {
        let domain = EnumDomain::new([(2, "two"), (1, "one"), (5, "five")]);
        let mut prop = Property::enumeration(domain, 5).unwrap();
        prop.bind_name("mode");
        let xml = prop.xml_element().unwrap().to_xml();
        let two = xml.find("<Entry value=\"2\" text=\"two\"/>").unwrap();
        let one = xml.find("<Entry value=\"1\" text=\"one\"/>").unwrap();
        let five = xml.find("<Entry value=\"5\" text=\"five\"/>").unwrap();
        assert!(two < one && one < five, "{xml}");
        assert!(xml.contains("default_values=\"5\""), "{xml}");
    }

    #[test]
    fn double_renders_range_domain_only_with_slider() {
        let mut plain = Property::double(0.5).unwrap();
        plain.bind_name("plain");
        assert!(!plain.xml_element().unwrap().to_xml().contains("DoubleRangeDomain"));

        let mut slid = Property::double(0.5).unwrap().with_slider(0.0, 1.0).unwrap();
        slid.bind_name("slid");
        let xml = slid.xml_element().unwrap().to_xml();
        assert!(
            xml.contains("<DoubleRangeDomain name=\"range\" min=\"0.0\" max=\"1.0\"/>"),
            "{xml}"
        );
    }

    #[test]
    fn help_emits_documentation_node() {
        let mut prop = Property::string("hi").unwrap().with_help("a greeting");
        prop.bind_name("greeting");
        let xml = prop.xml_element().unwrap().to_xml();
        assert!(xml.contains("<Documentation>a greeting</Documentation>"), "{xml}");

        let mut silent = Property::string("hi").unwrap();
        silent.bind_name("greeting");
        assert!(!silent.xml_element().unwrap().to_xml().contains("Documentation"));
    }

    #[test]
    fn common_attributes_in_fixed_order() {
        let mut prop = Property::string("hi").unwrap();
        prop.bind_name("s");
        let xml = prop.xml_element().unwrap().to_xml();
        assert_eq!(
            xml,
            "<StringVectorProperty name=\"s\" label=\"S\" initial_string=\"s\" \
             command=\"SetParameter\" animateable=\"1\" default_values=\"hi\" \
             number_of_elements=\"1\"/>\n"
        );
    }
}
