//! Provide data structures for XML Schema complex type definitions and the
//! functions that relocate them into another namespace context.
//!
//! A schema document without a target namespace that is included by another
//! schema document adopts the target namespace of the including one
//! ("chameleon include"). Definitions taken over this way must be cloned, and
//! every component that resolves a name against the enclosing document must be
//! copied so that it can be rebound. The entry point is
//! [`clone_complex_type`]; [`XmlSchema::include_chameleon`] applies it to all
//! types of an included schema document.
//!
//! # Example
//! ```
//! use std::rc::Rc;
//!
//! use xsclone::xmlschemas::{
//!     XmlSchema, XmlSchemaComplexType, XmlSchemaContentModel, XmlSchemaElement,
//!     XmlSchemaParticle, XmlSchemaQName, clone_complex_type,
//! };
//!
//! let mut ty = XmlSchemaComplexType::new(Some("T".into()));
//! let local = XmlSchemaParticle::element(XmlSchemaElement::local("x"));
//! let group = XmlSchemaParticle::group_ref(XmlSchemaQName::local("g1").into_ptr());
//! ty.content_model = XmlSchemaContentModel::implicit(
//!     XmlSchemaParticle::sequence(vec![local.clone(), group]),
//!     Rc::default(),
//! );
//!
//! let schema = XmlSchema::new(Some("urn:example"));
//! let clone = clone_complex_type(&ty, Some(&schema));
//! let particle = clone.particle().unwrap();
//! assert!(!particle.ptr_eq(ty.particle().unwrap()));
//! assert!(particle.children()[0].ptr_eq(&local));
//! ```

pub mod clone;
pub mod complex_type;
pub mod internals;
pub mod items;
pub mod qname;
pub mod refs;
pub mod schema;

pub use clone::{
    clone_attribute_uses, clone_complex_type, clone_group_base_children, clone_particle,
};
pub use complex_type::{XmlSchemaComplexType, XmlSchemaComplexTypeState};
pub use internals::{
    UNBOUNDED, XmlSchemaAttributeUseKind, XmlSchemaContentProcessing, XmlSchemaContentType,
    XmlSchemaDerivationSet, XmlSchemaForm, XmlSchemaOccurs, XmlSchemaTypeType,
};
pub use items::{
    XmlSchemaAttribute, XmlSchemaAttributeGroupRef, XmlSchemaAttributeUse, XmlSchemaAttributeUses,
    XmlSchemaComplexContent, XmlSchemaCompositor, XmlSchemaContentModel,
    XmlSchemaDerivationMethod, XmlSchemaElement, XmlSchemaGroupRef, XmlSchemaImplicitContent,
    XmlSchemaItem, XmlSchemaModelGroup, XmlSchemaParticle, XmlSchemaSimpleContent, XmlSchemaWildcard,
};
pub use qname::{XmlSchemaQName, XmlSchemaQNamePtr};
pub use refs::{has_attribute_ref, has_particle_ref};
pub use schema::{XmlSchema, XmlSchemaNamespaceContext};

/// The namespace of XML Schema components.
pub const XML_SCHEMA_NS: &str = "http://www.w3.org/2001/XMLSchema";
