use std::{fmt, rc::Rc, str::FromStr};

use anyhow::{anyhow, bail};

/// A shared handle to a [`XmlSchemaQName`].
///
/// Identity of the handle matters: a component that must be rebound on
/// relocation receives a fresh handle whose value equals the original.
pub type XmlSchemaQNamePtr = Rc<XmlSchemaQName>;

/// A (namespace, local-name) identity pair of a named schema component.
///
/// The empty name (both parts empty) is used as "not set".
#[doc(alias = "xmlSchemaQNameRef")]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct XmlSchemaQName {
    namespace: Rc<str>,
    name: Rc<str>,
}

impl XmlSchemaQName {
    pub fn new(namespace: impl Into<Rc<str>>, name: impl Into<Rc<str>>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Create a name without a namespace.
    pub fn local(name: impl Into<Rc<str>>) -> Self {
        Self::new("", name)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty() && self.name.is_empty()
    }

    /// Wrap `self` into a new shared handle.
    pub fn into_ptr(self) -> XmlSchemaQNamePtr {
        Rc::new(self)
    }
}

/// Return a new handle whose value equals `name`.
///
/// The string storage is shared; only the handle is fresh.
pub(crate) fn rebind_qname(name: &XmlSchemaQNamePtr) -> XmlSchemaQNamePtr {
    Rc::new(XmlSchemaQName::clone(name))
}

/// Same as [`rebind_qname`] for optional names.
pub(crate) fn rebind_opt_qname(name: &Option<XmlSchemaQNamePtr>) -> Option<XmlSchemaQNamePtr> {
    name.as_ref().map(rebind_qname)
}

/// Check if `name` holds a non-empty qualified name.
pub(crate) fn is_qname_set(name: &Option<XmlSchemaQNamePtr>) -> bool {
    name.as_ref().is_some_and(|name| !name.is_empty())
}

impl fmt::Display for XmlSchemaQName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.name)
        }
    }
}

impl FromStr for XmlSchemaQName {
    type Err = anyhow::Error;

    /// Parse a name in Clark notation, `{namespace}local` or `local`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(rem) = s.strip_prefix('{') else {
            if s.contains(['{', '}']) {
                bail!("Unexpected brace in qualified name '{s}'");
            }
            return Ok(Self::local(s));
        };
        let (namespace, local) = rem
            .split_once('}')
            .ok_or_else(|| anyhow!("Unterminated namespace in qualified name '{s}'"))?;
        if local.is_empty() {
            bail!("Missing local name in qualified name '{s}'");
        }
        if local.contains(['{', '}']) {
            bail!("Unexpected brace in qualified name '{s}'");
        }
        Ok(Self::new(namespace, local))
    }
}
