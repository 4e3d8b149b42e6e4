use crate::declarations::ExportLowering;
use crate::errors::Result;
use jsexport_core::{ClassLike, ClassMember, Expr, ExportedClass, Stmt};
use tracing::trace;

const BOUND_CONSTRUCTOR: &str = "__bind_constructor_";

impl ExportLowering<'_> {
    /// Exposes an inner class on the outer prototype through a getter that
    /// hands out the inner constructor bound to the outer `this`:
    ///
    /// ```text
    /// Object.defineProperty(Outer.prototype, 'Inner', {
    ///   configurable: true,
    ///   get: function () {
    ///     let __bind_constructor_ = Inner.bind(null, this);
    ///     __bind_constructor_.Companion = Inner.Companion;
    ///     __bind_constructor_.fromString = Inner_init_fromString.bind(null, this);
    ///     return __bind_constructor_;
    ///   }
    /// });
    /// ```
    pub(crate) fn generate_inner_class_assignment(
        &self,
        inner: &ExportedClass,
        outer: &dyn ClassLike,
    ) -> Result<Stmt> {
        let inner_ref = Expr::ident(self.namer.static_name(inner.ir));
        let outer_ref = Expr::ident(self.namer.static_name(outer.ir()));
        let bound = Expr::ident(BOUND_CONSTRUCTOR);

        let mut body = vec![Stmt::var(
            self.config.binding_kind,
            BOUND_CONSTRUCTOR,
            inner_ref.clone().bind_to_this(),
        )];

        if let Some(companion) = &self.class_info(inner.ir)?.companion {
            body.push(
                Expr::assign(
                    Expr::element_access(companion, bound.clone()),
                    Expr::element_access(companion, inner_ref.clone()),
                )
                .make_stmt(),
            );
        }

        for member in &inner.members {
            if let ClassMember::Function(constructor) = member {
                if constructor.is_static {
                    body.push(
                        Expr::assign(
                            Expr::element_access(&constructor.name, bound.clone()),
                            Expr::ident(self.namer.static_name(constructor.ir)).bind_to_this(),
                        )
                        .make_stmt(),
                    );
                }
            }
        }

        body.push(Stmt::ret(bound));

        trace!(outer = outer.name(), inner = %inner.name, "binding inner class");
        Ok(Expr::define_property(
            Expr::prototype_of(outer_ref),
            inner.name.clone(),
            Some(Expr::function(
                Vec::new(),
                body,
                format!("inner class '{}' getter", inner.name),
            )),
            None,
        )
        .make_stmt())
    }
}
