//! Kinds, flags and small value types shared by the schema components.

use std::{any::type_name, fmt, ops::BitOr};

use anyhow::anyhow;

/// Marks an unbounded `maxOccurs`.
pub const UNBOUNDED: i32 = 1 << 30;

/// XML Schemas defines multiple type of components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlSchemaTypeType {
    XmlSchemaTypeAny = 2,
    XmlSchemaTypeComplex = 5,
    XmlSchemaTypeSequence = 6,
    XmlSchemaTypeChoice,
    XmlSchemaTypeAll,
    XmlSchemaTypeSimpleContent,
    XmlSchemaTypeComplexContent,
    XmlSchemaTypeRestriction = 12,
    XmlSchemaTypeExtension,
    XmlSchemaTypeElement,
    XmlSchemaTypeAttribute,
    XmlSchemaTypeAttributegroup,
    XmlSchemaTypeGroup,
    XmlSchemaTypeAnyAttribute = 21,
    XmlSchemaTypeParticle = 25,
}

/// The content type of a compiled complex type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XmlSchemaContentType {
    #[default]
    XmlSchemaContentEmpty = 1,
    XmlSchemaContentElements,
    XmlSchemaContentMixed,
    XmlSchemaContentSimple,
}

/// The value of a `form` attribute, or of `elementFormDefault` and
/// `attributeFormDefault` on the schema document.
#[doc(alias = "xmlSchemaPValAttrFormDefault")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum XmlSchemaForm {
    #[default]
    Unspecified,
    Qualified,
    Unqualified,
}

impl XmlSchemaForm {
    pub fn is_specified(self) -> bool {
        self != Self::Unspecified
    }
}

impl TryFrom<&str> for XmlSchemaForm {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "qualified" => Ok(Self::Qualified),
            "unqualified" => Ok(Self::Unqualified),
            _ => Err(anyhow!(
                "Invalid convert from value '{value}' to {}: expected (qualified | unqualified)",
                type_name::<Self>()
            )),
        }
    }
}

/// The `processContents` of a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum XmlSchemaContentProcessing {
    Skip = 1,
    Lax = 2,
    #[default]
    Strict = 3,
}

impl TryFrom<&str> for XmlSchemaContentProcessing {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "skip" => Ok(Self::Skip),
            "lax" => Ok(Self::Lax),
            "strict" => Ok(Self::Strict),
            _ => Err(anyhow!(
                "Invalid convert from value '{value}' to {}: expected (skip | lax | strict)",
                type_name::<Self>()
            )),
        }
    }
}

/// The `use` of an attribute declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum XmlSchemaAttributeUseKind {
    Prohibited = 0,
    Required = 1,
    #[default]
    Optional = 2,
}

/// Occurrence bounds of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XmlSchemaOccurs {
    pub min_occurs: i32,
    pub max_occurs: i32,
}

impl XmlSchemaOccurs {
    pub const ONCE: Self = Self::new(1, 1);
    pub const NEVER: Self = Self::new(0, 0);

    pub const fn new(min_occurs: i32, max_occurs: i32) -> Self {
        Self {
            min_occurs,
            max_occurs,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_occurs >= UNBOUNDED
    }
}

impl Default for XmlSchemaOccurs {
    fn default() -> Self {
        Self::ONCE
    }
}

/// A set of derivation methods, as used by `block`, `final`, `blockDefault`
/// and `finalDefault`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct XmlSchemaDerivationSet(u8);

impl XmlSchemaDerivationSet {
    pub const EMPTY: Self = Self(0);
    pub const EXTENSION: Self = Self(1 << 0);
    pub const RESTRICTION: Self = Self(1 << 1);
    pub const SUBSTITUTION: Self = Self(1 << 2);
    pub const LIST: Self = Self(1 << 3);
    pub const UNION: Self = Self(1 << 4);
    pub const ALL: Self = Self(0x1F);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Keep only the methods that are also in `mask`.
    pub fn intersection(self, mask: Self) -> Self {
        Self(self.0 & mask.0)
    }
}

impl BitOr for XmlSchemaDerivationSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for XmlSchemaDerivationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(XmlSchemaDerivationSet, &str); 5] = [
            (XmlSchemaDerivationSet::EXTENSION, "extension"),
            (XmlSchemaDerivationSet::RESTRICTION, "restriction"),
            (XmlSchemaDerivationSet::SUBSTITUTION, "substitution"),
            (XmlSchemaDerivationSet::LIST, "list"),
            (XmlSchemaDerivationSet::UNION, "union"),
        ];
        f.debug_set()
            .entries(
                NAMES
                    .iter()
                    .filter(|(flag, _)| self.contains(*flag))
                    .map(|(_, name)| name),
            )
            .finish()
    }
}

impl TryFrom<&str> for XmlSchemaDerivationSet {
    type Error = anyhow::Error;

    /// Parse `#all` or a whitespace separated list of derivation methods.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim() == "#all" {
            return Ok(Self::ALL);
        }
        let mut set = Self::EMPTY;
        for token in value.split_ascii_whitespace() {
            let flag = match token {
                "extension" => Self::EXTENSION,
                "restriction" => Self::RESTRICTION,
                "substitution" => Self::SUBSTITUTION,
                "list" => Self::LIST,
                "union" => Self::UNION,
                _ => {
                    return Err(anyhow!(
                        "Invalid derivation method '{token}' in '{value}': expected (#all | List of (extension | restriction | substitution | list | union))"
                    ));
                }
            };
            set.insert(flag);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_form() {
        assert_eq!(
            XmlSchemaForm::try_from("qualified").unwrap(),
            XmlSchemaForm::Qualified
        );
        assert_eq!(
            XmlSchemaForm::try_from("unqualified").unwrap(),
            XmlSchemaForm::Unqualified
        );
        assert!(XmlSchemaForm::try_from("Qualified").is_err());
        assert!(!XmlSchemaForm::default().is_specified());

        assert_eq!(
            XmlSchemaContentProcessing::try_from("lax").unwrap(),
            XmlSchemaContentProcessing::Lax
        );
        assert!(XmlSchemaContentProcessing::try_from("none").is_err());
    }

    #[test]
    fn parse_derivation_set() {
        let set = XmlSchemaDerivationSet::try_from("extension  restriction").unwrap();
        assert!(set.contains(XmlSchemaDerivationSet::EXTENSION));
        assert!(set.contains(XmlSchemaDerivationSet::RESTRICTION));
        assert!(!set.contains(XmlSchemaDerivationSet::LIST));

        assert_eq!(
            XmlSchemaDerivationSet::try_from("#all").unwrap(),
            XmlSchemaDerivationSet::ALL
        );
        assert!(XmlSchemaDerivationSet::try_from("").unwrap().is_empty());
        assert!(XmlSchemaDerivationSet::try_from("extension bogus").is_err());
    }

    #[test]
    fn derivation_flags_are_independent() {
        let mut set = XmlSchemaDerivationSet::EXTENSION | XmlSchemaDerivationSet::UNION;
        set.remove(XmlSchemaDerivationSet::EXTENSION);
        assert_eq!(set, XmlSchemaDerivationSet::UNION);
        set.insert(XmlSchemaDerivationSet::LIST);
        assert_eq!(format!("{set:?}"), r#"{"list", "union"}"#);
        assert_eq!(
            XmlSchemaDerivationSet::ALL.intersection(XmlSchemaDerivationSet::RESTRICTION),
            XmlSchemaDerivationSet::RESTRICTION
        );
    }
}
