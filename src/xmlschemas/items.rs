use std::rc::Rc;

use super::{
    complex_type::XmlSchemaComplexType,
    internals::{
        XmlSchemaAttributeUseKind, XmlSchemaContentProcessing, XmlSchemaDerivationSet,
        XmlSchemaForm, XmlSchemaOccurs, XmlSchemaTypeType,
    },
    qname::XmlSchemaQNamePtr,
};

/// Common behavior of schema components.
pub trait XmlSchemaItem {
    fn item_type(&self) -> XmlSchemaTypeType;

    /// Make a memberwise copy of this item.
    ///
    /// Shared children and names of the copy are the very same instances as
    /// those of `self`.
    fn duplicate(&self) -> Self
    where
        Self: Sized;
}

macro_rules! impl_xml_schema_item {
    {
        type: $t:ty
        $(, @self: $self:tt )?
        , @item_type: $( $item_type:tt )+
    } => {
        impl XmlSchemaItem for $t {
            fn item_type(&self) -> XmlSchemaTypeType {
                $( let $self = self; )?
                $( $item_type )+
            }

            fn duplicate(&self) -> Self {
                self.clone()
            }
        }
    };
}

/// The compositor of a model group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlSchemaCompositor {
    Sequence,
    Choice,
    All,
}

/// A model group component (`sequence`, `choice` or `all`).
#[doc(alias = "xmlSchemaModelGroup")]
#[derive(Debug, Clone)]
pub struct XmlSchemaModelGroup {
    pub compositor: XmlSchemaCompositor,
    pub occurs: XmlSchemaOccurs,
    pub children: Vec<XmlSchemaParticle>,
}

impl_xml_schema_item! {
    type: XmlSchemaModelGroup,
    @self: group,
    @item_type: match group.compositor {
        XmlSchemaCompositor::Sequence => XmlSchemaTypeType::XmlSchemaTypeSequence,
        XmlSchemaCompositor::Choice => XmlSchemaTypeType::XmlSchemaTypeChoice,
        XmlSchemaCompositor::All => XmlSchemaTypeType::XmlSchemaTypeAll,
    }
}

/// A reference to a named model group definition.
#[derive(Debug, Clone)]
pub struct XmlSchemaGroupRef {
    pub ref_name: XmlSchemaQNamePtr,
    pub occurs: XmlSchemaOccurs,
}

impl_xml_schema_item! {
    type: XmlSchemaGroupRef,
    @item_type: XmlSchemaTypeType::XmlSchemaTypeGroup
}

/// An element declaration, either local or a reference to a global one.
#[doc(alias = "xmlSchemaElement")]
#[derive(Debug, Clone, Default)]
pub struct XmlSchemaElement {
    pub name: Option<Rc<str>>,
    pub ref_name: Option<XmlSchemaQNamePtr>,
    /// The explicitly named type definition.
    pub type_name: Option<XmlSchemaQNamePtr>,
    pub substitution_group: Option<XmlSchemaQNamePtr>,
    pub form: XmlSchemaForm,
    pub occurs: XmlSchemaOccurs,
    pub is_abstract: bool,
    pub nillable: bool,
    pub default_value: Option<Rc<str>>,
    pub fixed_value: Option<Rc<str>>,
    pub block: Option<XmlSchemaDerivationSet>,
    pub final_: Option<XmlSchemaDerivationSet>,
    /// The anonymous type definition.
    pub schema_type: Option<Rc<XmlSchemaComplexType>>,
}

impl XmlSchemaElement {
    /// Create a local element declaration without a type.
    pub fn local(name: impl Into<Rc<str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create a reference to the global element declaration `ref_name`.
    pub fn reference(ref_name: XmlSchemaQNamePtr) -> Self {
        Self {
            ref_name: Some(ref_name),
            ..Default::default()
        }
    }
}

impl_xml_schema_item! {
    type: XmlSchemaElement,
    @item_type: XmlSchemaTypeType::XmlSchemaTypeElement
}

/// A wildcard, used both for `any` particles and for `anyAttribute`.
#[doc(alias = "xmlSchemaWildcard")]
#[derive(Debug, Clone, Default)]
pub struct XmlSchemaWildcard {
    /// The namespace constraint as written, e.g. `##any` or `##other`.
    pub namespace: Option<Rc<str>>,
    pub process_contents: XmlSchemaContentProcessing,
    pub occurs: XmlSchemaOccurs,
    pub is_attribute: bool,
}

impl_xml_schema_item! {
    type: XmlSchemaWildcard,
    @self: wildcard,
    @item_type: if wildcard.is_attribute {
        XmlSchemaTypeType::XmlSchemaTypeAnyAttribute
    } else {
        XmlSchemaTypeType::XmlSchemaTypeAny
    }
}

/// A node of a content model tree.
///
/// Every variant but `Empty` is a shared handle, so cloning a particle never
/// copies the component it refers to.
#[derive(Debug, Clone, Default)]
pub enum XmlSchemaParticle {
    ModelGroup(Rc<XmlSchemaModelGroup>),
    GroupRef(Rc<XmlSchemaGroupRef>),
    Element(Rc<XmlSchemaElement>),
    Any(Rc<XmlSchemaWildcard>),
    #[default]
    Empty,
}

impl XmlSchemaParticle {
    fn model_group(compositor: XmlSchemaCompositor, children: Vec<Self>) -> Self {
        Self::ModelGroup(Rc::new(XmlSchemaModelGroup {
            compositor,
            occurs: XmlSchemaOccurs::ONCE,
            children,
        }))
    }

    pub fn sequence(children: Vec<Self>) -> Self {
        Self::model_group(XmlSchemaCompositor::Sequence, children)
    }

    pub fn choice(children: Vec<Self>) -> Self {
        Self::model_group(XmlSchemaCompositor::Choice, children)
    }

    pub fn all(children: Vec<Self>) -> Self {
        Self::model_group(XmlSchemaCompositor::All, children)
    }

    pub fn group_ref(ref_name: XmlSchemaQNamePtr) -> Self {
        Self::GroupRef(Rc::new(XmlSchemaGroupRef {
            ref_name,
            occurs: XmlSchemaOccurs::ONCE,
        }))
    }

    pub fn element(element: XmlSchemaElement) -> Self {
        Self::Element(Rc::new(element))
    }

    pub fn any(wildcard: XmlSchemaWildcard) -> Self {
        Self::Any(Rc::new(wildcard))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn item_type(&self) -> XmlSchemaTypeType {
        match self {
            Self::ModelGroup(group) => group.item_type(),
            Self::GroupRef(group_ref) => group_ref.item_type(),
            Self::Element(element) => element.item_type(),
            Self::Any(wildcard) => wildcard.item_type(),
            Self::Empty => XmlSchemaTypeType::XmlSchemaTypeParticle,
        }
    }

    pub fn occurs(&self) -> XmlSchemaOccurs {
        match self {
            Self::ModelGroup(group) => group.occurs,
            Self::GroupRef(group_ref) => group_ref.occurs,
            Self::Element(element) => element.occurs,
            Self::Any(wildcard) => wildcard.occurs,
            Self::Empty => XmlSchemaOccurs::NEVER,
        }
    }

    /// The particles of a model group, or nothing for other particles.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::ModelGroup(group) => &group.children,
            _ => &[],
        }
    }

    /// Check if `self` and `other` are the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ModelGroup(l), Self::ModelGroup(r)) => Rc::ptr_eq(l, r),
            (Self::GroupRef(l), Self::GroupRef(r)) => Rc::ptr_eq(l, r),
            (Self::Element(l), Self::Element(r)) => Rc::ptr_eq(l, r),
            (Self::Any(l), Self::Any(r)) => Rc::ptr_eq(l, r),
            (Self::Empty, Self::Empty) => true,
            _ => false,
        }
    }
}

/// An attribute declaration, either local or a reference to a global one.
#[doc(alias = "xmlSchemaAttribute")]
#[derive(Debug, Clone, Default)]
pub struct XmlSchemaAttribute {
    pub name: Option<Rc<str>>,
    pub ref_name: Option<XmlSchemaQNamePtr>,
    pub type_name: Option<XmlSchemaQNamePtr>,
    pub form: XmlSchemaForm,
    pub use_kind: XmlSchemaAttributeUseKind,
    pub default_value: Option<Rc<str>>,
    pub fixed_value: Option<Rc<str>>,
}

impl XmlSchemaAttribute {
    pub fn local(name: impl Into<Rc<str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn reference(ref_name: XmlSchemaQNamePtr) -> Self {
        Self {
            ref_name: Some(ref_name),
            ..Default::default()
        }
    }
}

impl_xml_schema_item! {
    type: XmlSchemaAttribute,
    @item_type: XmlSchemaTypeType::XmlSchemaTypeAttribute
}

/// A reference to a named attribute group definition.
#[derive(Debug, Clone)]
pub struct XmlSchemaAttributeGroupRef {
    pub ref_name: XmlSchemaQNamePtr,
}

impl_xml_schema_item! {
    type: XmlSchemaAttributeGroupRef,
    @item_type: XmlSchemaTypeType::XmlSchemaTypeAttributegroup
}

/// An entry of an attribute-use list.
#[derive(Debug, Clone)]
pub enum XmlSchemaAttributeUse {
    Attribute(Rc<XmlSchemaAttribute>),
    AttributeGroupRef(Rc<XmlSchemaAttributeGroupRef>),
}

impl XmlSchemaAttributeUse {
    pub fn attribute(attr: XmlSchemaAttribute) -> Self {
        Self::Attribute(Rc::new(attr))
    }

    pub fn group_ref(ref_name: XmlSchemaQNamePtr) -> Self {
        Self::AttributeGroupRef(Rc::new(XmlSchemaAttributeGroupRef { ref_name }))
    }

    pub fn item_type(&self) -> XmlSchemaTypeType {
        match self {
            Self::Attribute(attr) => attr.item_type(),
            Self::AttributeGroupRef(group_ref) => group_ref.item_type(),
        }
    }

    /// Check if `self` and `other` are the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Attribute(l), Self::Attribute(r)) => Rc::ptr_eq(l, r),
            (Self::AttributeGroupRef(l), Self::AttributeGroupRef(r)) => Rc::ptr_eq(l, r),
            _ => false,
        }
    }
}

/// A shared list of attribute uses.
pub type XmlSchemaAttributeUses = Rc<Vec<XmlSchemaAttributeUse>>;

/// Whether a content model extends or restricts its base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlSchemaDerivationMethod {
    Extension,
    Restriction,
}

impl XmlSchemaDerivationMethod {
    pub fn item_type(self) -> XmlSchemaTypeType {
        match self {
            Self::Extension => XmlSchemaTypeType::XmlSchemaTypeExtension,
            Self::Restriction => XmlSchemaTypeType::XmlSchemaTypeRestriction,
        }
    }
}

/// `simpleContent` with its `extension` or `restriction`.
#[derive(Debug, Clone)]
pub struct XmlSchemaSimpleContent {
    pub derivation: XmlSchemaDerivationMethod,
    pub base_type_name: XmlSchemaQNamePtr,
    pub attributes: XmlSchemaAttributeUses,
    pub any_attribute: Option<Rc<XmlSchemaWildcard>>,
}

impl_xml_schema_item! {
    type: XmlSchemaSimpleContent,
    @item_type: XmlSchemaTypeType::XmlSchemaTypeSimpleContent
}

/// `complexContent` with its `extension` or `restriction`.
#[derive(Debug, Clone)]
pub struct XmlSchemaComplexContent {
    pub derivation: XmlSchemaDerivationMethod,
    /// The `mixed` attribute of `complexContent`, if present.
    pub mixed: Option<bool>,
    pub base_type_name: XmlSchemaQNamePtr,
    pub particle: XmlSchemaParticle,
    pub attributes: XmlSchemaAttributeUses,
    pub any_attribute: Option<Rc<XmlSchemaWildcard>>,
}

impl_xml_schema_item! {
    type: XmlSchemaComplexContent,
    @item_type: XmlSchemaTypeType::XmlSchemaTypeComplexContent
}

/// The content of a complex type without `simpleContent` or `complexContent`.
///
/// Such a type is implicitly derived from `anyType` by restriction.
#[derive(Debug, Clone, Default)]
pub struct XmlSchemaImplicitContent {
    pub particle: XmlSchemaParticle,
    pub attributes: XmlSchemaAttributeUses,
    pub any_attribute: Option<Rc<XmlSchemaWildcard>>,
}

/// The content model of a complex type.
#[derive(Debug, Clone)]
pub enum XmlSchemaContentModel {
    Implicit(XmlSchemaImplicitContent),
    SimpleContent(XmlSchemaSimpleContent),
    ComplexContent(XmlSchemaComplexContent),
}

impl XmlSchemaContentModel {
    /// Create an implicit content model without an attribute wildcard.
    pub fn implicit(particle: XmlSchemaParticle, attributes: XmlSchemaAttributeUses) -> Self {
        Self::Implicit(XmlSchemaImplicitContent {
            particle,
            attributes,
            any_attribute: None,
        })
    }

    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Implicit(_))
    }

    /// The explicit base type name. `None` for implicit content.
    pub fn base_type_name(&self) -> Option<&XmlSchemaQNamePtr> {
        match self {
            Self::Implicit(_) => None,
            Self::SimpleContent(content) => Some(&content.base_type_name),
            Self::ComplexContent(content) => Some(&content.base_type_name),
        }
    }

    pub fn derivation(&self) -> XmlSchemaDerivationMethod {
        match self {
            Self::Implicit(_) => XmlSchemaDerivationMethod::Restriction,
            Self::SimpleContent(content) => content.derivation,
            Self::ComplexContent(content) => content.derivation,
        }
    }

    /// The particle of the content. `None` for simple content.
    pub fn particle(&self) -> Option<&XmlSchemaParticle> {
        match self {
            Self::Implicit(content) => Some(&content.particle),
            Self::SimpleContent(_) => None,
            Self::ComplexContent(content) => Some(&content.particle),
        }
    }

    pub fn attributes(&self) -> &XmlSchemaAttributeUses {
        match self {
            Self::Implicit(content) => &content.attributes,
            Self::SimpleContent(content) => &content.attributes,
            Self::ComplexContent(content) => &content.attributes,
        }
    }

    pub fn any_attribute(&self) -> Option<&Rc<XmlSchemaWildcard>> {
        match self {
            Self::Implicit(content) => content.any_attribute.as_ref(),
            Self::SimpleContent(content) => content.any_attribute.as_ref(),
            Self::ComplexContent(content) => content.any_attribute.as_ref(),
        }
    }

    pub fn item_type(&self) -> XmlSchemaTypeType {
        match self {
            Self::Implicit(_) => XmlSchemaTypeType::XmlSchemaTypeRestriction,
            Self::SimpleContent(content) => content.item_type(),
            Self::ComplexContent(content) => content.item_type(),
        }
    }
}

impl Default for XmlSchemaContentModel {
    fn default() -> Self {
        Self::Implicit(XmlSchemaImplicitContent::default())
    }
}
