/*! Which class members get a runtime definition, and in what form.
 *
 * A property descriptor is defined once per inheritance chain: the class that introduces a property
 * owns its descriptor and subclasses inherit it through the prototype chain. Re-emission only
 * happens when a subclass genuinely changes what the descriptor must hold. Final accessors are
 * referenced directly; open ones go through a forwarder so that dispatch stays dynamic.
 */

use crate::errors::{LoweringError, Result};
use jsexport_core::{
    AccessorInfo, ClassLike, DeclId, Expr, ExportedFunction, ExportedProperty, Namer,
    PropertyInfo, SourceModel, Stmt,
};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Interfaces and enum entries have no slot of their own to define on.
    OwnerWithoutSlot,
    /// The member carries no source property to read accessors from.
    NoSourceProperty,
    ExtensionReceiver,
    FakeOverride,
    /// A base class already defined a descriptor that covers this property.
    InheritedDescriptor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccessorEmission {
    /// `Owner.prototype.<compiled accessor>`
    Direct(Expr),
    /// `function () { return this.<compiled accessor>(); }` and its setter twin.
    Forwarder(Expr),
    /// Private accessors are not exposed.
    Omitted,
}

impl AccessorEmission {
    pub fn into_expr(self) -> Option<Expr> {
        match self {
            AccessorEmission::Direct(expr) | AccessorEmission::Forwarder(expr) => Some(expr),
            AccessorEmission::Omitted => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyDecision {
    Skip(SkipReason),
    Define {
        name: String,
        getter: AccessorEmission,
        setter: AccessorEmission,
    },
}

pub struct MemberPolicy<'a> {
    namer: &'a dyn Namer,
    model: &'a dyn SourceModel,
}

impl<'a> MemberPolicy<'a> {
    pub fn new(namer: &'a dyn Namer, model: &'a dyn SourceModel) -> Self {
        Self { namer, model }
    }

    pub fn prototype_ref(&self, owner: &dyn ClassLike) -> Expr {
        Expr::prototype_of(Expr::ident(self.namer.static_name(owner.ir())))
    }

    fn accessor_info(&self, id: DeclId) -> Result<&'a AccessorInfo> {
        self.model
            .accessor(id)
            .ok_or(LoweringError::UnknownSource {
                id,
                expected: "accessor",
            })
    }

    fn property_info(&self, id: DeclId) -> Result<&'a PropertyInfo> {
        self.model
            .property(id)
            .ok_or(LoweringError::UnknownSource {
                id,
                expected: "property",
            })
    }

    fn owner_without_slot(&self, owner: &dyn ClassLike) -> Result<bool> {
        let info = self
            .model
            .class(owner.ir())
            .ok_or(LoweringError::UnknownSource {
                id: owner.ir(),
                expected: "class",
            })?;
        Ok(owner.is_interface() || info.is_interface || info.is_enum_entry)
    }

    pub fn decide_property(
        &self,
        property: &ExportedProperty,
        owner: &dyn ClassLike,
    ) -> Result<PropertyDecision> {
        if self.owner_without_slot(owner)? {
            return Ok(PropertyDecision::Skip(SkipReason::OwnerWithoutSlot));
        }

        let Some(property_id) = property.ir else {
            return Ok(PropertyDecision::Skip(SkipReason::NoSourceProperty));
        };
        let info = self.property_info(property_id)?;

        let getter = info
            .getter
            .map(|id| self.accessor_info(id).map(|accessor| (id, accessor)))
            .transpose()?;
        let setter = info
            .setter
            .map(|id| self.accessor_info(id).map(|accessor| (id, accessor)))
            .transpose()?;

        if getter.map_or(false, |(_, a)| a.has_extension_receiver)
            || setter.map_or(false, |(_, a)| a.has_extension_receiver)
        {
            return Ok(PropertyDecision::Skip(SkipReason::ExtensionReceiver));
        }

        if info.is_fake_override && !info.is_enum_fake_override {
            return Ok(PropertyDecision::Skip(SkipReason::FakeOverride));
        }

        let introduces_getter = getter.map_or(false, |(_, a)| a.overridden.is_empty());
        let overrides_exported_getter = getter.map_or(false, |(id, a)| {
            !a.overridden.is_empty() && self.model.overrides_exported(id)
        });
        // Covers a read-only base property overridden as mutable: the base
        // descriptor has no setter, so this class must define a new one.
        let setter_override_not_exported =
            setter.map_or(false, |(id, _)| !self.model.overrides_exported(id));
        let needs_override = (overrides_exported_getter && setter_override_not_exported)
            || info.is_enum_fake_override;
        let getter_overrides_external =
            getter.map_or(false, |(id, _)| self.model.overrides_external(id));

        if !introduces_getter
            && !needs_override
            && !getter_overrides_external
            && info.js_name.is_none()
        {
            return Ok(PropertyDecision::Skip(SkipReason::InheritedDescriptor));
        }

        let prototype = self.prototype_ref(owner);
        let getter = match getter {
            Some((id, accessor)) => self.getter_emission(id, accessor, &prototype),
            None => AccessorEmission::Omitted,
        };
        let setter = match setter {
            Some((id, accessor)) => self.setter_emission(id, accessor, &prototype),
            None => AccessorEmission::Omitted,
        };

        Ok(PropertyDecision::Define {
            name: self.namer.property_name(property_id),
            getter,
            setter,
        })
    }

    fn getter_emission(
        &self,
        id: DeclId,
        accessor: &AccessorInfo,
        prototype: &Expr,
    ) -> AccessorEmission {
        if accessor.visibility.is_private() {
            return AccessorEmission::Omitted;
        }
        let compiled = self.namer.member_name(id);
        if accessor.modality.is_final() {
            return AccessorEmission::Direct(Expr::member(prototype.clone(), compiled));
        }
        AccessorEmission::Forwarder(Expr::function(
            Vec::new(),
            vec![Stmt::ret(Expr::call(
                Expr::member(Expr::This, compiled),
                Vec::new(),
            ))],
            "getter forwarder",
        ))
    }

    fn setter_emission(
        &self,
        id: DeclId,
        accessor: &AccessorInfo,
        prototype: &Expr,
    ) -> AccessorEmission {
        if accessor.visibility.is_private() {
            return AccessorEmission::Omitted;
        }
        let compiled = self.namer.member_name(id);
        if accessor.modality.is_final() {
            return AccessorEmission::Direct(Expr::member(prototype.clone(), compiled));
        }
        AccessorEmission::Forwarder(Expr::function(
            vec!["value".to_string()],
            vec![Expr::call(
                Expr::member(Expr::This, compiled),
                vec![Expr::ident("value")],
            )
            .make_stmt()],
            "setter forwarder",
        ))
    }

    /// `Object.defineProperty(Owner.prototype, ...)` for a member property, or
    /// nothing when the policy decides the property needs no definition here.
    pub fn property_statement(
        &self,
        property: &ExportedProperty,
        owner: &dyn ClassLike,
    ) -> Result<Option<Stmt>> {
        match self.decide_property(property, owner)? {
            PropertyDecision::Skip(reason) => {
                debug!(
                    owner = owner.name(),
                    property = %property.name,
                    ?reason,
                    "no descriptor for member property"
                );
                Ok(None)
            }
            PropertyDecision::Define {
                name,
                getter,
                setter,
            } => {
                trace!(owner = owner.name(), property = %name, "defining prototype descriptor");
                Ok(Some(
                    Expr::define_property(
                        self.prototype_ref(owner),
                        name,
                        getter.into_expr(),
                        setter.into_expr(),
                    )
                    .make_stmt(),
                ))
            }
        }
    }

    /// `Owner.prototype.exported = Owner.prototype.compiled;`
    pub fn function_statement(
        &self,
        function: &ExportedFunction,
        owner: &dyn ClassLike,
    ) -> Result<Stmt> {
        let info = self
            .model
            .function(function.ir)
            .ok_or(LoweringError::UnknownSource {
                id: function.ir,
                expected: "function",
            })?;
        let implementation = info.real_override_target.unwrap_or(function.ir);
        let prototype = self.prototype_ref(owner);

        Ok(Expr::assign(
            Expr::element_access(&function.name, prototype.clone()),
            Expr::member(prototype, self.namer.member_name(implementation)),
        )
        .make_stmt())
    }
}
