use std::{collections::HashMap, rc::Rc};

use anyhow::{Context, bail};
use tracing::debug;

use super::{
    clone::clone_complex_type,
    complex_type::XmlSchemaComplexType,
    internals::{XmlSchemaDerivationSet, XmlSchemaForm},
    items::XmlSchemaElement,
};

/// Access to the defaults of the schema document enclosing a component.
///
/// The cloning functions query this to decide which local declarations depend
/// on the enclosing namespace.
pub trait XmlSchemaNamespaceContext {
    fn target_namespace(&self) -> Option<&str>;

    /// The value of `elementFormDefault`.
    fn element_form_default(&self) -> XmlSchemaForm;

    /// The value of `attributeFormDefault`.
    fn attribute_form_default(&self) -> XmlSchemaForm {
        XmlSchemaForm::Unqualified
    }
}

/// A schema document: its target namespace, its defaults and the complex type
/// definitions it holds.
#[doc(alias = "xmlSchema")]
#[derive(Debug)]
pub struct XmlSchema {
    pub(crate) target_namespace: Option<Rc<str>>,
    pub(crate) element_form_default: XmlSchemaForm,
    pub(crate) attribute_form_default: XmlSchemaForm,
    pub(crate) block_default: XmlSchemaDerivationSet,
    pub(crate) final_default: XmlSchemaDerivationSet,
    pub(crate) type_decl: HashMap<String, Rc<XmlSchemaComplexType>>,
}

impl XmlSchema {
    pub fn new(target_namespace: Option<&str>) -> Self {
        Self {
            target_namespace: target_namespace.map(Rc::from),
            element_form_default: XmlSchemaForm::Unqualified,
            attribute_form_default: XmlSchemaForm::Unqualified,
            block_default: XmlSchemaDerivationSet::EMPTY,
            final_default: XmlSchemaDerivationSet::EMPTY,
            type_decl: HashMap::new(),
        }
    }

    /// Set `elementFormDefault` from its lexical value.
    pub fn set_element_form_default(&mut self, value: &str) -> anyhow::Result<()> {
        self.element_form_default =
            XmlSchemaForm::try_from(value).context("Invalid value of 'elementFormDefault'")?;
        Ok(())
    }

    /// Set `attributeFormDefault` from its lexical value.
    pub fn set_attribute_form_default(&mut self, value: &str) -> anyhow::Result<()> {
        self.attribute_form_default =
            XmlSchemaForm::try_from(value).context("Invalid value of 'attributeFormDefault'")?;
        Ok(())
    }

    pub fn block_default(&self) -> XmlSchemaDerivationSet {
        self.block_default
    }

    /// Set `blockDefault` from its lexical value.
    ///
    /// Only `extension`, `restriction` and `substitution` are kept.
    pub fn set_block_default(&mut self, value: &str) -> anyhow::Result<()> {
        let set = XmlSchemaDerivationSet::try_from(value)
            .context("Invalid value of 'blockDefault'")?;
        self.block_default = set.intersection(
            XmlSchemaDerivationSet::EXTENSION
                | XmlSchemaDerivationSet::RESTRICTION
                | XmlSchemaDerivationSet::SUBSTITUTION,
        );
        Ok(())
    }

    pub fn final_default(&self) -> XmlSchemaDerivationSet {
        self.final_default
    }

    /// Set `finalDefault` from its lexical value.
    ///
    /// Only `extension`, `restriction`, `list` and `union` are kept.
    pub fn set_final_default(&mut self, value: &str) -> anyhow::Result<()> {
        let set =
            XmlSchemaDerivationSet::try_from(value).context("Invalid value of 'finalDefault'")?;
        self.final_default = set.intersection(
            XmlSchemaDerivationSet::EXTENSION
                | XmlSchemaDerivationSet::RESTRICTION
                | XmlSchemaDerivationSet::LIST
                | XmlSchemaDerivationSet::UNION,
        );
        Ok(())
    }

    /// Reset all defaults to their initial values.
    #[doc(alias = "xmlSchemaClearSchemaDefaults")]
    pub fn clear_defaults(&mut self) {
        self.element_form_default = XmlSchemaForm::Unqualified;
        self.attribute_form_default = XmlSchemaForm::Unqualified;
        self.block_default = XmlSchemaDerivationSet::EMPTY;
        self.final_default = XmlSchemaDerivationSet::EMPTY;
    }

    /// The form of `element` if specified, `elementFormDefault` otherwise.
    pub fn resolve_element_form(&self, element: &XmlSchemaElement) -> XmlSchemaForm {
        if element.form.is_specified() {
            element.form
        } else {
            self.element_form_default
        }
    }

    /// The `block` of `ty` if specified, `blockDefault` otherwise.
    ///
    /// Complex types can only block `extension` and `restriction`.
    pub fn resolve_block(&self, ty: &XmlSchemaComplexType) -> XmlSchemaDerivationSet {
        ty.block.unwrap_or(self.block_default).intersection(
            XmlSchemaDerivationSet::EXTENSION | XmlSchemaDerivationSet::RESTRICTION,
        )
    }

    /// Lookup a complex type definition of this schema by its local name.
    #[doc(alias = "xmlSchemaGetType")]
    pub fn get_type(&self, name: &str) -> Option<&Rc<XmlSchemaComplexType>> {
        self.type_decl.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &Rc<XmlSchemaComplexType>> {
        self.type_decl.values()
    }

    /// Register a named complex type definition.
    pub fn add_complex_type(
        &mut self,
        ty: XmlSchemaComplexType,
    ) -> anyhow::Result<Rc<XmlSchemaComplexType>> {
        let Some(name) = ty.name.as_deref() else {
            bail!("Only named complex types can be registered to a schema");
        };
        if self.type_decl.contains_key(name) {
            bail!("Duplicate complex type definition '{name}'");
        }
        let name = name.to_owned();
        let ty = Rc::new(ty);
        self.type_decl.insert(name, ty.clone());
        Ok(ty)
    }

    /// Adopt the complex types of `included`, a schema document without a
    /// target namespace, into this schema.
    ///
    /// Each type is cloned for this schema's namespace context. `included` is
    /// not modified. Returns the number of adopted types.
    pub fn include_chameleon(&mut self, included: &XmlSchema) -> anyhow::Result<usize> {
        if let Some(ns) = included.target_namespace.as_deref() {
            if self.target_namespace.as_deref() != Some(ns) {
                bail!(
                    "The included schema has the target namespace '{ns}', which differs from '{}'",
                    self.target_namespace.as_deref().unwrap_or("")
                );
            }
        }

        let mut names = included.type_decl.keys().collect::<Vec<_>>();
        names.sort();
        if let Some(dup) = names.iter().find(|name| self.type_decl.contains_key(name.as_str())) {
            bail!("Duplicate complex type definition '{dup}'");
        }

        for name in &names {
            let clone = clone_complex_type(&included.type_decl[name.as_str()], Some(&*self));
            debug!(
                name = name.as_str(),
                target_namespace = self.target_namespace.as_deref().unwrap_or(""),
                "adopted complex type from chameleon include"
            );
            self.type_decl.insert((*name).clone(), Rc::new(clone));
        }
        Ok(names.len())
    }
}

impl Default for XmlSchema {
    fn default() -> Self {
        Self::new(None)
    }
}

impl XmlSchemaNamespaceContext for XmlSchema {
    fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    fn element_form_default(&self) -> XmlSchemaForm {
        self.element_form_default
    }

    fn attribute_form_default(&self) -> XmlSchemaForm {
        self.attribute_form_default
    }
}

#[cfg(test)]
mod tests {
    use crate::xmlschemas::{
        items::{XmlSchemaContentModel, XmlSchemaElement, XmlSchemaParticle},
        qname::XmlSchemaQName,
    };

    use super::*;

    #[test]
    fn defaults_from_lexical_values() {
        let mut schema = XmlSchema::new(Some("urn:a"));
        assert_eq!(schema.element_form_default(), XmlSchemaForm::Unqualified);
        schema.set_element_form_default("qualified").unwrap();
        schema.set_attribute_form_default("qualified").unwrap();
        schema.set_block_default("#all").unwrap();
        schema.set_final_default("list union").unwrap();
        assert_eq!(schema.element_form_default(), XmlSchemaForm::Qualified);
        assert_eq!(schema.attribute_form_default(), XmlSchemaForm::Qualified);
        assert!(schema.block_default().contains(XmlSchemaDerivationSet::SUBSTITUTION));
        assert!(!schema.block_default().contains(XmlSchemaDerivationSet::LIST));
        assert_eq!(
            schema.final_default(),
            XmlSchemaDerivationSet::LIST | XmlSchemaDerivationSet::UNION
        );

        let err = schema.set_element_form_default("maybe").unwrap_err();
        assert!(err.to_string().contains("elementFormDefault"));
        assert_eq!(schema.element_form_default(), XmlSchemaForm::Qualified);

        schema.clear_defaults();
        assert_eq!(schema.element_form_default(), XmlSchemaForm::Unqualified);
        assert!(schema.block_default().is_empty());
    }

    #[test]
    fn resolve_form_and_block() {
        let mut schema = XmlSchema::new(None);
        schema.set_element_form_default("qualified").unwrap();
        schema.set_block_default("restriction substitution").unwrap();

        let elem = XmlSchemaElement::local("x");
        assert_eq!(schema.resolve_element_form(&elem), XmlSchemaForm::Qualified);
        let elem = XmlSchemaElement {
            form: XmlSchemaForm::Unqualified,
            ..elem
        };
        assert_eq!(schema.resolve_element_form(&elem), XmlSchemaForm::Unqualified);

        let mut ty = XmlSchemaComplexType::new(Some("T".into()));
        assert_eq!(schema.resolve_block(&ty), XmlSchemaDerivationSet::RESTRICTION);
        ty.block = Some(XmlSchemaDerivationSet::ALL);
        assert_eq!(
            schema.resolve_block(&ty),
            XmlSchemaDerivationSet::EXTENSION | XmlSchemaDerivationSet::RESTRICTION
        );
    }

    #[test]
    fn register_types() {
        let mut schema = XmlSchema::default();
        schema
            .add_complex_type(XmlSchemaComplexType::new(Some("T".into())))
            .unwrap();
        assert!(schema.get_type("T").is_some());
        assert!(
            schema
                .add_complex_type(XmlSchemaComplexType::new(Some("T".into())))
                .is_err()
        );
        assert!(schema.add_complex_type(XmlSchemaComplexType::new(None)).is_err());
        assert_eq!(schema.types().count(), 1);
    }

    #[test]
    fn chameleon_include_clones_types() {
        let mut included = XmlSchema::new(None);
        let mut ty = XmlSchemaComplexType::new(Some("T".into()));
        ty.content_model = XmlSchemaContentModel::implicit(
            XmlSchemaParticle::sequence(vec![XmlSchemaParticle::group_ref(
                XmlSchemaQName::local("g1").into_ptr(),
            )]),
            Rc::default(),
        );
        let source = included.add_complex_type(ty).unwrap();

        let mut including = XmlSchema::new(Some("urn:a"));
        assert_eq!(including.include_chameleon(&included).unwrap(), 1);
        let adopted = including.get_type("T").unwrap();
        assert!(!Rc::ptr_eq(adopted, &source));
        assert!(!adopted.particle().unwrap().ptr_eq(source.particle().unwrap()));
        assert!(Rc::ptr_eq(included.get_type("T").unwrap(), &source));

        // A second include would redefine `T`.
        assert!(including.include_chameleon(&included).is_err());

        let foreign = XmlSchema::new(Some("urn:b"));
        assert!(including.include_chameleon(&foreign).is_err());
    }
}
