//! Relocation of complex type definitions into another namespace context.
//!
//! When a definition is reused by a schema document with a different target
//! namespace (e.g. by a chameleon include), every component whose names are
//! resolved against the enclosing document must be copied, so that the copy
//! can be rebound without affecting the original. Components without such
//! names are shared between the original and the copy.
//!
//! Shared components must never be modified in place afterward.

use std::rc::Rc;

use tracing::{debug, trace};

use super::{
    complex_type::XmlSchemaComplexType,
    items::{
        XmlSchemaAttribute, XmlSchemaAttributeGroupRef, XmlSchemaAttributeUse,
        XmlSchemaAttributeUses, XmlSchemaComplexContent, XmlSchemaContentModel, XmlSchemaElement,
        XmlSchemaGroupRef, XmlSchemaImplicitContent, XmlSchemaItem, XmlSchemaModelGroup,
        XmlSchemaParticle, XmlSchemaSimpleContent,
    },
    qname::{rebind_opt_qname, rebind_qname},
    refs::{attribute_has_ref, element_has_ref, has_attribute_ref},
    schema::XmlSchemaNamespaceContext,
};

/// Copy an element declaration with fresh handles for all of its names.
///
/// An anonymous complex type of the element is cloned as well.
pub(crate) fn clone_element(
    element: &XmlSchemaElement,
    ctx: Option<&dyn XmlSchemaNamespaceContext>,
) -> XmlSchemaElement {
    let mut new = element.duplicate();
    new.ref_name = rebind_opt_qname(&element.ref_name);
    new.type_name = rebind_opt_qname(&element.type_name);
    new.substitution_group = rebind_opt_qname(&element.substitution_group);
    if let Some(ty) = element.schema_type.as_ref().filter(|ty| ty.name.is_none()) {
        new.schema_type = Some(Rc::new(clone_complex_type(ty, ctx)));
    }
    new
}

pub(crate) fn clone_attribute(attr: &XmlSchemaAttribute) -> XmlSchemaAttribute {
    let mut new = attr.duplicate();
    new.ref_name = rebind_opt_qname(&attr.ref_name);
    new.type_name = rebind_opt_qname(&attr.type_name);
    new
}

/// Copy `particle` if its subtree holds a namespace dependent reference.
///
/// Returns `None` if the subtree can be shared as it is. Each node is visited
/// once.
fn copy_particle(
    particle: &XmlSchemaParticle,
    ctx: Option<&dyn XmlSchemaNamespaceContext>,
) -> Option<XmlSchemaParticle> {
    let copy = match particle {
        XmlSchemaParticle::ModelGroup(group) => copy_group_children(&group.children, ctx).map(
            |children| {
                XmlSchemaParticle::ModelGroup(Rc::new(XmlSchemaModelGroup {
                    compositor: group.compositor,
                    occurs: group.occurs,
                    children,
                }))
            },
        ),
        XmlSchemaParticle::GroupRef(group_ref) => {
            Some(XmlSchemaParticle::GroupRef(Rc::new(XmlSchemaGroupRef {
                ref_name: rebind_qname(&group_ref.ref_name),
                occurs: group_ref.occurs,
            })))
        }
        XmlSchemaParticle::Element(element) if element_has_ref(element, ctx) => {
            Some(XmlSchemaParticle::Element(Rc::new(clone_element(element, ctx))))
        }
        XmlSchemaParticle::Element(_) | XmlSchemaParticle::Any(_) | XmlSchemaParticle::Empty => {
            None
        }
    };
    trace!(kind = ?particle.item_type(), copied = copy.is_some(), "particle clone");
    copy
}

/// Returns `None` if no child needs a copy.
fn copy_group_children(
    children: &[XmlSchemaParticle],
    ctx: Option<&dyn XmlSchemaNamespaceContext>,
) -> Option<Vec<XmlSchemaParticle>> {
    let copies = children
        .iter()
        .map(|child| copy_particle(child, ctx))
        .collect::<Vec<_>>();
    if copies.iter().all(Option::is_none) {
        return None;
    }
    let children = copies
        .into_iter()
        .zip(children)
        .map(|(copy, child)| copy.unwrap_or_else(|| child.clone()))
        .collect();
    Some(children)
}

/// Clone a particle tree for the namespace context `ctx`.
///
/// Subtrees without any namespace dependent reference are returned as they
/// are. Otherwise model groups and group references are always copied, and
/// elements are copied if they depend on the namespace context.
///
/// The result has the same shape as `particle`: the same kinds of nodes in the
/// same order with the same occurrence bounds.
pub fn clone_particle(
    particle: &XmlSchemaParticle,
    ctx: Option<&dyn XmlSchemaNamespaceContext>,
) -> XmlSchemaParticle {
    copy_particle(particle, ctx).unwrap_or_else(|| particle.clone())
}

/// Clone each particle of a model group independently.
pub fn clone_group_base_children(
    children: &[XmlSchemaParticle],
    ctx: Option<&dyn XmlSchemaNamespaceContext>,
) -> Vec<XmlSchemaParticle> {
    copy_group_children(children, ctx).unwrap_or_else(|| children.to_vec())
}

/// Clone an attribute-use list.
///
/// If no entry holds a reference, `uses` itself is returned.
pub fn clone_attribute_uses(uses: &XmlSchemaAttributeUses) -> XmlSchemaAttributeUses {
    if !has_attribute_ref(uses) {
        return uses.clone();
    }
    let new = uses
        .iter()
        .map(|entry| match entry {
            XmlSchemaAttributeUse::AttributeGroupRef(group_ref) => {
                XmlSchemaAttributeUse::AttributeGroupRef(Rc::new(XmlSchemaAttributeGroupRef {
                    ref_name: rebind_qname(&group_ref.ref_name),
                }))
            }
            XmlSchemaAttributeUse::Attribute(attr) if attribute_has_ref(attr) => {
                XmlSchemaAttributeUse::Attribute(Rc::new(clone_attribute(attr)))
            }
            XmlSchemaAttributeUse::Attribute(_) => entry.clone(),
        })
        .collect();
    Rc::new(new)
}

/// Clone a complex type definition for the namespace context `ctx`.
///
/// The result is a new definition that has not been compiled yet. `ty` is not
/// modified and stays usable.
pub fn clone_complex_type(
    ty: &XmlSchemaComplexType,
    ctx: Option<&dyn XmlSchemaNamespaceContext>,
) -> XmlSchemaComplexType {
    debug!(
        name = ty.name.as_deref().unwrap_or("(anonymous)"),
        content_model = ?ty.content_model.item_type(),
        target_namespace = ctx.and_then(|ctx| ctx.target_namespace()).unwrap_or(""),
        "cloning complex type"
    );

    let mut new = ty.shallow_copy();
    new.content_model = match &ty.content_model {
        XmlSchemaContentModel::Implicit(content) => {
            XmlSchemaContentModel::Implicit(XmlSchemaImplicitContent {
                particle: clone_particle(&content.particle, ctx),
                attributes: clone_attribute_uses(&content.attributes),
                any_attribute: content.any_attribute.clone(),
            })
        }
        XmlSchemaContentModel::SimpleContent(content) => {
            XmlSchemaContentModel::SimpleContent(XmlSchemaSimpleContent {
                base_type_name: rebind_qname(&content.base_type_name),
                attributes: clone_attribute_uses(&content.attributes),
                ..content.duplicate()
            })
        }
        XmlSchemaContentModel::ComplexContent(content) => {
            XmlSchemaContentModel::ComplexContent(XmlSchemaComplexContent {
                base_type_name: rebind_qname(&content.base_type_name),
                particle: clone_particle(&content.particle, ctx),
                attributes: clone_attribute_uses(&content.attributes),
                ..content.duplicate()
            })
        }
    };
    new.compiled_mut().reset();
    new
}
