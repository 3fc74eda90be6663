//! Detection of name references that depend on the enclosing namespace.
//!
//! A local component without such a reference never resolves a name against
//! the enclosing schema document, so it can be shared between a definition and
//! its relocated clone.

use tracing::trace;

use super::{
    internals::XmlSchemaForm,
    items::{XmlSchemaAttribute, XmlSchemaAttributeUse, XmlSchemaElement, XmlSchemaParticle},
    qname::is_qname_set,
    schema::XmlSchemaNamespaceContext,
};

/// The form of `element`, falling back to the `elementFormDefault` of `ctx`.
pub(crate) fn resolved_element_form(
    element: &XmlSchemaElement,
    ctx: Option<&dyn XmlSchemaNamespaceContext>,
) -> XmlSchemaForm {
    match (element.form, ctx) {
        (XmlSchemaForm::Unspecified, Some(ctx)) => ctx.element_form_default(),
        (form, _) => form,
    }
}

pub(crate) fn element_has_ref(
    element: &XmlSchemaElement,
    ctx: Option<&dyn XmlSchemaNamespaceContext>,
) -> bool {
    is_qname_set(&element.ref_name)
        || is_qname_set(&element.type_name)
        || resolved_element_form(element, ctx) == XmlSchemaForm::Qualified
}

pub(crate) fn attribute_has_ref(attr: &XmlSchemaAttribute) -> bool {
    is_qname_set(&attr.ref_name) || is_qname_set(&attr.type_name)
}

/// Check if `particle` contains a group reference, an element reference, an
/// element with an explicit type name, or a qualified element at any depth.
pub fn has_particle_ref(
    particle: &XmlSchemaParticle,
    ctx: Option<&dyn XmlSchemaNamespaceContext>,
) -> bool {
    let found = match particle {
        XmlSchemaParticle::ModelGroup(group) => group
            .children
            .iter()
            .any(|child| has_particle_ref(child, ctx)),
        XmlSchemaParticle::GroupRef(_) => true,
        XmlSchemaParticle::Element(element) => element_has_ref(element, ctx),
        XmlSchemaParticle::Any(_) | XmlSchemaParticle::Empty => false,
    };
    trace!(kind = ?particle.item_type(), found, "particle reference check");
    found
}

/// Check if `uses` contains an attribute group reference, or an attribute with
/// a reference or an explicit type name.
pub fn has_attribute_ref(uses: &[XmlSchemaAttributeUse]) -> bool {
    uses.iter().any(|entry| match entry {
        XmlSchemaAttributeUse::AttributeGroupRef(_) => true,
        XmlSchemaAttributeUse::Attribute(attr) => attribute_has_ref(attr),
    })
}
