use std::{collections::HashMap, rc::Rc};

use super::{
    internals::{
        UNBOUNDED, XmlSchemaContentProcessing, XmlSchemaContentType, XmlSchemaDerivationSet,
        XmlSchemaOccurs, XmlSchemaTypeType,
    },
    items::{
        XmlSchemaAttribute, XmlSchemaAttributeUses, XmlSchemaContentModel, XmlSchemaElement,
        XmlSchemaImplicitContent, XmlSchemaItem, XmlSchemaParticle, XmlSchemaWildcard,
    },
    qname::XmlSchemaQName,
};

/// The state of a complex type that is computed by the schema compiler.
///
/// A freshly parsed or freshly cloned type always holds the default state.
#[derive(Debug, Default)]
pub struct XmlSchemaComplexTypeState {
    pub(crate) content_type: XmlSchemaContentType,
    pub(crate) content_type_particle: XmlSchemaParticle,
    pub(crate) block_resolved: XmlSchemaDerivationSet,
    pub(crate) attribute_uses: HashMap<XmlSchemaQName, Rc<XmlSchemaAttribute>>,
    pub(crate) local_elements: HashMap<XmlSchemaQName, Rc<XmlSchemaElement>>,
    pub(crate) attribute_wildcard: Option<Rc<XmlSchemaWildcard>>,
}

impl XmlSchemaComplexTypeState {
    pub fn content_type(&self) -> XmlSchemaContentType {
        self.content_type
    }

    pub fn set_content_type(&mut self, content_type: XmlSchemaContentType) {
        self.content_type = content_type;
    }

    pub fn content_type_particle(&self) -> &XmlSchemaParticle {
        &self.content_type_particle
    }

    pub fn set_content_type_particle(&mut self, particle: XmlSchemaParticle) {
        self.content_type_particle = particle;
    }

    pub fn block_resolved(&self) -> XmlSchemaDerivationSet {
        self.block_resolved
    }

    pub fn set_block_resolved(&mut self, block: XmlSchemaDerivationSet) {
        self.block_resolved = block;
    }

    pub fn attribute_uses(&self) -> &HashMap<XmlSchemaQName, Rc<XmlSchemaAttribute>> {
        &self.attribute_uses
    }

    /// Register an attribute use of the compiled type.\
    /// Return the use previously registered under `name`, if any.
    pub fn insert_attribute_use(
        &mut self,
        name: XmlSchemaQName,
        attr: Rc<XmlSchemaAttribute>,
    ) -> Option<Rc<XmlSchemaAttribute>> {
        self.attribute_uses.insert(name, attr)
    }

    pub fn local_elements(&self) -> &HashMap<XmlSchemaQName, Rc<XmlSchemaElement>> {
        &self.local_elements
    }

    /// Register a local element declaration of the compiled type.\
    /// Return the declaration previously registered under `name`, if any.
    pub fn insert_local_element(
        &mut self,
        name: XmlSchemaQName,
        element: Rc<XmlSchemaElement>,
    ) -> Option<Rc<XmlSchemaElement>> {
        self.local_elements.insert(name, element)
    }

    pub fn attribute_wildcard(&self) -> Option<&Rc<XmlSchemaWildcard>> {
        self.attribute_wildcard.as_ref()
    }

    pub fn set_attribute_wildcard(&mut self, wildcard: Option<Rc<XmlSchemaWildcard>>) {
        self.attribute_wildcard = wildcard;
    }

    /// Forget everything the compiler has computed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if no field holds a compiled value.
    pub fn is_reset(&self) -> bool {
        self.content_type == XmlSchemaContentType::default()
            && self.content_type_particle.is_empty()
            && self.block_resolved.is_empty()
            && self.attribute_uses.is_empty()
            && self.local_elements.is_empty()
            && self.attribute_wildcard.is_none()
    }
}

/// A complex type definition.
#[doc(alias = "xmlSchemaType")]
#[derive(Debug, Default)]
pub struct XmlSchemaComplexType {
    /// `None` for anonymous types.
    pub name: Option<Rc<str>>,
    pub is_abstract: bool,
    pub is_mixed: bool,
    /// `None` if the `block` attribute is absent.
    pub block: Option<XmlSchemaDerivationSet>,
    /// `None` if the `final` attribute is absent.
    pub final_: Option<XmlSchemaDerivationSet>,
    pub content_model: XmlSchemaContentModel,
    pub(crate) compiled: XmlSchemaComplexTypeState,
}

impl XmlSchemaComplexType {
    pub fn new(name: Option<Rc<str>>) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// The definition of `anyType`.
    ///
    /// The definition is created once per thread and shared afterward.
    pub fn any_type() -> Rc<Self> {
        thread_local! {
            static ANY_TYPE: Rc<XmlSchemaComplexType> = Rc::new(XmlSchemaComplexType::new_any_type());
        }
        ANY_TYPE.with(Rc::clone)
    }

    fn new_any_type() -> Self {
        let any = XmlSchemaParticle::any(XmlSchemaWildcard {
            namespace: Some("##any".into()),
            process_contents: XmlSchemaContentProcessing::Lax,
            occurs: XmlSchemaOccurs::new(0, UNBOUNDED),
            is_attribute: false,
        });
        let any_attribute = Rc::new(XmlSchemaWildcard {
            namespace: Some("##any".into()),
            process_contents: XmlSchemaContentProcessing::Lax,
            occurs: XmlSchemaOccurs::ONCE,
            is_attribute: true,
        });
        Self {
            name: Some("anyType".into()),
            is_mixed: true,
            content_model: XmlSchemaContentModel::Implicit(XmlSchemaImplicitContent {
                particle: XmlSchemaParticle::sequence(vec![any]),
                attributes: Rc::default(),
                any_attribute: Some(any_attribute),
            }),
            ..Default::default()
        }
    }

    /// The particle of the content model. `None` for simple content.
    pub fn particle(&self) -> Option<&XmlSchemaParticle> {
        self.content_model.particle()
    }

    pub fn attributes(&self) -> &XmlSchemaAttributeUses {
        self.content_model.attributes()
    }

    pub fn compiled(&self) -> &XmlSchemaComplexTypeState {
        &self.compiled
    }

    /// The derived state, for use by the schema compiler.
    pub fn compiled_mut(&mut self) -> &mut XmlSchemaComplexTypeState {
        &mut self.compiled
    }

    /// Make a memberwise copy whose derived state is reset.
    ///
    /// The content model and everything below it are shared with `self`.
    pub(crate) fn shallow_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            is_abstract: self.is_abstract,
            is_mixed: self.is_mixed,
            block: self.block,
            final_: self.final_,
            content_model: self.content_model.clone(),
            compiled: XmlSchemaComplexTypeState::default(),
        }
    }
}

impl XmlSchemaItem for XmlSchemaComplexType {
    fn item_type(&self) -> XmlSchemaTypeType {
        XmlSchemaTypeType::XmlSchemaTypeComplex
    }

    fn duplicate(&self) -> Self {
        unreachable!(
            "complex type '{}' must be cloned with `clone_complex_type`",
            self.name.as_deref().unwrap_or("(anonymous)")
        )
    }
}
