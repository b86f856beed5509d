//! The per-unit owner of every declaration.
//!
//! An [`AstContext`] is created for one compilation unit and owns all of its
//! declarations, lexical contexts, types, attribute sets and identifier
//! strings. Nodes are created only through the `create_*` methods and are
//! released together when the context is dropped (or passed to
//! [`AstContext::release`]). Handles from another context, including one that
//! was already released, are rejected both on lookup and when they are handed
//! to a context method that would store them.

use hashbrown::HashMap;
use vellum_log::{debug, trace, warn};
use vellum_mem::arena::SYNTAX_CHUNK_SIZE;
use vellum_mem::{IndexArena, StringInterner, Symbol};

use crate::attrs::{DeclAttributes, EMPTY_ATTRIBUTES, Resilience};
use crate::decl::{
    AccessPathElement, AsDeclContext, Decl, DeclClass, DeclData, DeclId, ExtensionDecl, FuncDecl,
    ImportDecl, NamedDecl, OneOfElementDecl, PatternBindingDecl, SubscriptDecl, SubscriptParts,
    TopLevelCodeDecl, TypeAliasDecl, ValueDecl, VarDecl, is_operator_identifier,
};
use crate::decl_context::{ContextData, ContextId, DeclContextKind};
use crate::error::{AstError, AstResult};
use crate::kind::DeclKind;
use crate::loc::{SourceLoc, SourceRange};
use crate::payload::{ExprId, FuncExprId, PatternId};
use crate::ty::{Type, TypeData};

/// Sizing knobs for a new [`AstContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstConfig {
    /// Size of the first chunk of the identifier arena.
    pub arena_chunk_size: usize,
    /// Number of declarations to reserve room for.
    pub decl_capacity: usize,
}

impl Default for AstConfig {
    fn default() -> Self {
        Self {
            arena_chunk_size: SYNTAX_CHUNK_SIZE,
            decl_capacity: 256,
        }
    }
}

/// A diagnostic recorded against the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the problem is.
    pub loc: SourceLoc,
    /// What the problem is.
    pub message: String,
}

/// Counts of what a context holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AstStats {
    /// Declarations.
    pub decls: usize,
    /// Lexical contexts, including the translation unit.
    pub contexts: usize,
    /// Uniqued types, including the error type.
    pub types: usize,
    /// Materialized attribute sets.
    pub attribute_sets: usize,
    /// Interned identifiers.
    pub symbols: usize,
    /// Bytes held by the node arenas and the identifier arena.
    pub bytes: usize,
}

/// Owner of one compilation unit's declarations.
pub struct AstContext {
    interner: StringInterner,
    decls: IndexArena<Decl>,
    contexts: IndexArena<ContextData>,
    types: IndexArena<TypeData>,
    type_map: HashMap<TypeData, Type>,
    attrs: IndexArena<DeclAttributes>,
    diagnostics: Vec<Diagnostic>,
    error_type: Type,
    translation_unit: ContextId,
}

impl AstContext {
    /// Creates a context with default sizing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AstConfig::default())
    }

    /// Creates a context sized by `config`.
    #[must_use]
    pub fn with_config(config: AstConfig) -> Self {
        let mut contexts = IndexArena::new();
        let translation_unit = contexts.alloc(ContextData {
            kind: DeclContextKind::TranslationUnit,
            parent: None,
            owner: None,
        });

        let mut types = IndexArena::new();
        let error_type = types.alloc(TypeData::Error);
        let mut type_map = HashMap::new();
        type_map.insert(TypeData::Error, error_type);

        Self {
            interner: StringInterner::with_chunk_size(config.arena_chunk_size),
            decls: IndexArena::with_capacity(config.decl_capacity),
            contexts,
            types,
            type_map,
            attrs: IndexArena::new(),
            diagnostics: Vec::new(),
            error_type,
            translation_unit,
        }
    }

    /// The root context of the unit.
    #[must_use]
    pub const fn translation_unit(&self) -> ContextId {
        self.translation_unit
    }

    // ---- identifiers ----

    /// Interns an identifier.
    pub fn intern(&mut self, s: &str) -> Symbol {
        self.interner.intern(s)
    }

    /// Resolves an interned identifier.
    #[must_use]
    pub fn resolve(&self, sym: Symbol) -> Option<&str> {
        self.interner.resolve(sym)
    }

    /// The identifier of a named declaration, as text.
    #[must_use]
    pub fn name_str(&self, decl: DeclId) -> Option<&str> {
        self.decl(decl).name().and_then(|name| self.resolve(name))
    }

    /// The interner backing this unit's identifiers.
    #[must_use]
    pub const fn interner(&self) -> &StringInterner {
        &self.interner
    }

    // ---- types ----

    /// Returns the unique handle for `data`.
    ///
    /// # Panics
    ///
    /// Panics if `data` refers to a type or declaration of another unit.
    #[track_caller]
    pub fn intern_type(&mut self, data: TypeData) -> Type {
        match &data {
            TypeData::Error | TypeData::Nominal(_) => {}
            TypeData::NameAlias(alias) => self.check_decl(*alias),
            TypeData::Tuple(elements) => elements.iter().for_each(|&ty| self.check_type(ty)),
            TypeData::Function { input, result } => {
                self.check_type(*input);
                self.check_type(*result);
            }
            TypeData::LValue(ty) | TypeData::MetaType(ty) => self.check_type(*ty),
        }
        if let Some(&ty) = self.type_map.get(&data) {
            return ty;
        }
        let ty = self.types.alloc(data.clone());
        self.type_map.insert(data, ty);
        ty
    }

    /// The nominal type named `name`.
    pub fn nominal_type(&mut self, name: Symbol) -> Type {
        self.intern_type(TypeData::Nominal(name))
    }

    /// The error sentinel written into ill-formed declarations.
    #[must_use]
    pub const fn error_type(&self) -> Type {
        self.error_type
    }

    /// Returns true if `ty` is the error sentinel.
    #[must_use]
    pub fn is_error_type(&self, ty: Type) -> bool {
        ty == self.error_type
    }

    /// The structure of `ty`.
    ///
    /// # Panics
    ///
    /// Panics if `ty` belongs to another unit.
    #[must_use]
    pub fn type_data(&self, ty: Type) -> &TypeData {
        &self.types[ty]
    }

    // ---- lexical contexts ----

    /// Creates a closure or function-body context inside `parent`.
    pub fn create_capturing_context(&mut self, parent: ContextId) -> ContextId {
        self.alloc_context(DeclContextKind::CapturingExpr, Some(parent), None)
    }

    /// Creates a builtin-module root.
    pub fn create_builtin_module(&mut self) -> ContextId {
        self.contexts.alloc(ContextData {
            kind: DeclContextKind::BuiltinModule,
            parent: None,
            owner: None,
        })
    }

    /// The data of a lexical context.
    ///
    /// # Panics
    ///
    /// Panics if `ctx` belongs to another unit.
    #[must_use]
    pub fn context(&self, ctx: ContextId) -> &ContextData {
        &self.contexts[ctx]
    }

    /// The kind of a lexical context.
    #[must_use]
    pub fn context_kind(&self, ctx: ContextId) -> DeclContextKind {
        self.context(ctx).kind
    }

    /// The enclosing context, `None` for module scopes.
    #[must_use]
    pub fn parent_context(&self, ctx: ContextId) -> Option<ContextId> {
        self.context(ctx).parent
    }

    /// The declaration that doubles as `ctx`, if any.
    #[must_use]
    pub fn context_owner(&self, ctx: ContextId) -> Option<DeclId> {
        self.context(ctx).owner
    }

    /// `ctx` followed by each of its ancestors, innermost first.
    pub fn context_chain(&self, ctx: ContextId) -> impl Iterator<Item = ContextId> + '_ {
        std::iter::successors(Some(ctx), move |&current| self.parent_context(current))
    }

    /// The module scope at the root of `ctx`'s chain.
    #[must_use]
    pub fn translation_unit_of(&self, ctx: ContextId) -> ContextId {
        self.context_chain(ctx).last().unwrap_or(ctx)
    }

    /// Returns true if `ctx` is local to executable code.
    #[must_use]
    pub fn is_local_context(&self, ctx: ContextId) -> bool {
        self.context_kind(ctx).is_local()
    }

    // ---- declaration creation ----

    /// Creates `import a.b.c` with the path components in order.
    pub fn create_import(
        &mut self,
        dc: ContextId,
        import_loc: SourceLoc,
        path: &[AccessPathElement],
    ) -> DeclId {
        self.alloc_decl(dc, DeclData::Import(ImportDecl::new(import_loc, path)))
    }

    /// Creates an extension without members.
    pub fn create_extension(
        &mut self,
        dc: ContextId,
        extension_loc: SourceLoc,
        extended_type: Type,
    ) -> DeclId {
        self.create_extension_with(dc, extension_loc, extended_type, |_, _| Vec::new())
    }

    /// Creates an extension and its members.
    ///
    /// `members` is called with the extension's own context, which the
    /// members should be created in; the declarations it returns become the
    /// extension's member list.
    pub fn create_extension_with(
        &mut self,
        dc: ContextId,
        extension_loc: SourceLoc,
        extended_type: Type,
        members: impl FnOnce(&mut Self, ContextId) -> Vec<DeclId>,
    ) -> DeclId {
        self.check_type(extended_type);
        let id = self.alloc_dual_role(dc, DeclContextKind::ExtensionDecl, |own| {
            DeclData::Extension(ExtensionDecl::new(extension_loc, extended_type, own))
        });

        let own = self.get::<ExtensionDecl>(id).as_decl_context();
        let members = members(self, own);
        members.iter().for_each(|&member| self.check_decl(member));
        self.get_mut::<ExtensionDecl>(id).set_members(members);
        id
    }

    /// Creates `var pattern = init`.
    pub fn create_pattern_binding(
        &mut self,
        dc: ContextId,
        var_loc: SourceLoc,
        pattern: PatternId,
        init: Option<ExprId>,
    ) -> DeclId {
        let data = DeclData::PatternBinding(PatternBindingDecl::new(var_loc, pattern, init));
        self.alloc_decl(dc, data)
    }

    /// Creates a top-level code container with no body yet.
    pub fn create_top_level_code(&mut self, dc: ContextId, start_loc: SourceLoc) -> DeclId {
        self.alloc_dual_role(dc, DeclContextKind::TopLevelCodeDecl, |own| {
            DeclData::TopLevelCode(TopLevelCodeDecl::new(start_loc, own))
        })
    }

    /// Creates a subscript.
    ///
    /// Only the subscript's side of the accessor link is recorded; see
    /// [`AstContext::wire_subscript_accessors`].
    pub fn create_subscript(&mut self, dc: ContextId, parts: SubscriptParts) -> DeclId {
        self.check_type(parts.element_type);
        parts.get.into_iter().chain(parts.set).for_each(|accessor| self.check_decl(accessor));
        self.alloc_decl(dc, DeclData::Subscript(SubscriptDecl::new(parts)))
    }

    /// Creates `typealias name : underlying`.
    ///
    /// The alias is a value whose type is the metatype of its own alias
    /// type, so its value slot is set on creation.
    pub fn create_type_alias(
        &mut self,
        dc: ContextId,
        type_alias_loc: SourceLoc,
        name: Symbol,
        underlying: Option<Type>,
    ) -> DeclId {
        underlying.into_iter().for_each(|ty| self.check_type(ty));
        let data = DeclData::TypeAlias(TypeAliasDecl::new(type_alias_loc, name, underlying));
        let id = self.alloc_decl(dc, data);

        let alias_ty = self.alias_type(id);
        let meta = self.intern_type(TypeData::MetaType(alias_ty));
        self.get_mut::<ValueDecl>(id).set_type(meta);
        id
    }

    /// Creates `var name : ty`.
    pub fn create_var(
        &mut self,
        dc: ContextId,
        var_loc: SourceLoc,
        name: Symbol,
        ty: Option<Type>,
    ) -> DeclId {
        ty.into_iter().for_each(|ty| self.check_type(ty));
        self.alloc_decl(dc, DeclData::Var(VarDecl::new(var_loc, name, ty)))
    }

    /// Creates a function. Pass [`SourceLoc::INVALID`] as `static_loc` for a
    /// non-static function.
    pub fn create_func(
        &mut self,
        dc: ContextId,
        static_loc: SourceLoc,
        func_loc: SourceLoc,
        name: Symbol,
        ty: Option<Type>,
        body: Option<FuncExprId>,
    ) -> DeclId {
        ty.into_iter().for_each(|ty| self.check_type(ty));
        let data = DeclData::Func(FuncDecl::new(static_loc, func_loc, name, ty, body));
        self.alloc_decl(dc, data)
    }

    /// Creates one case of a `oneof`.
    pub fn create_one_of_element(
        &mut self,
        dc: ContextId,
        identifier_loc: SourceLoc,
        name: Symbol,
        ty: Option<Type>,
        argument_type: Option<Type>,
    ) -> DeclId {
        ty.into_iter()
            .chain(argument_type)
            .for_each(|ty| self.check_type(ty));
        let data = DeclData::OneOfElement(OneOfElementDecl::new(
            identifier_loc,
            name,
            ty,
            argument_type,
        ));
        self.alloc_decl(dc, data)
    }

    fn alloc_decl(&mut self, dc: ContextId, data: DeclData) -> DeclId {
        // Rejects foreign contexts before the node exists.
        let _ = self.context(dc);
        let kind = data.kind();
        let id = self.decls.alloc(Decl::new(dc, data));
        trace!("created {kind} declaration {id:?}");
        id
    }

    fn alloc_dual_role(
        &mut self,
        dc: ContextId,
        kind: DeclContextKind,
        make: impl FnOnce(ContextId) -> DeclData,
    ) -> DeclId {
        let _ = self.context(dc);
        let contexts = &mut self.contexts;
        let id = self.decls.alloc_with(|id| {
            let own = contexts.alloc(ContextData {
                kind,
                parent: Some(dc),
                owner: Some(id),
            });
            Decl::new(dc, make(own))
        });
        trace!("created {} declaration {id:?} with its own context", self.decl(id).kind());
        id
    }

    #[track_caller]
    fn check_type(&self, ty: Type) {
        if let Err(err) = self.types.try_get(ty) {
            panic!("{}", AstError::Handle(err));
        }
    }

    #[track_caller]
    fn check_decl(&self, id: DeclId) {
        if let Err(err) = self.decls.try_get(id) {
            panic!("{}", AstError::Handle(err));
        }
    }

    fn alloc_context(
        &mut self,
        kind: DeclContextKind,
        parent: Option<ContextId>,
        owner: Option<DeclId>,
    ) -> ContextId {
        if let Some(parent) = parent {
            let _ = self.context(parent);
        }
        self.contexts.alloc(ContextData {
            kind,
            parent,
            owner,
        })
    }

    // ---- declaration lookup ----

    /// Resolves a declaration handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another unit.
    #[track_caller]
    #[must_use]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id]
    }

    /// Resolves a declaration handle mutably.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another unit.
    #[track_caller]
    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id]
    }

    /// Checked counterpart of [`AstContext::decl`].
    pub fn try_decl(&self, id: DeclId) -> AstResult<&Decl> {
        Ok(self.decls.try_get(id)?)
    }

    /// Resolves a handle and views the node as a `T`.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another unit or is not a `T`.
    #[track_caller]
    #[must_use]
    pub fn get<T: DeclClass>(&self, id: DeclId) -> &T {
        self.decl(id).cast::<T>()
    }

    /// Mutable counterpart of [`AstContext::get`].
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another unit or is not a `T`.
    #[track_caller]
    pub fn get_mut<T: DeclClass>(&mut self, id: DeclId) -> &mut T {
        self.decl_mut(id).cast_mut::<T>()
    }

    /// The lexical context `id` is attached to.
    #[must_use]
    pub fn decl_context_of(&self, id: DeclId) -> ContextId {
        self.decl(id).decl_context()
    }

    /// Every declaration of the unit, in creation order.
    pub fn decls(&self) -> impl Iterator<Item = (DeclId, &Decl)> + '_ {
        self.decls.iter()
    }

    /// Number of declarations.
    #[must_use]
    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// The members of an extension.
    ///
    /// # Panics
    ///
    /// Panics if `ext` is not an extension.
    #[must_use]
    pub fn members(&self, ext: DeclId) -> &[DeclId] {
        self.get::<ExtensionDecl>(ext).members()
    }

    // ---- attributes ----

    /// The attributes of a named declaration.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a named declaration.
    #[must_use]
    pub fn attrs(&self, id: DeclId) -> &DeclAttributes {
        match self.get::<NamedDecl>(id).own_attrs() {
            Some(attrs) => &self.attrs[attrs],
            None => &EMPTY_ATTRIBUTES,
        }
    }

    /// The attributes of a named declaration, for modification.
    ///
    /// The first call gives the declaration storage of its own; until then
    /// it shares the empty set.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a named declaration.
    pub fn attrs_mut(&mut self, id: DeclId) -> &mut DeclAttributes {
        let attrs = match self.get::<NamedDecl>(id).own_attrs() {
            Some(attrs) => attrs,
            None => {
                let attrs = self.attrs.alloc(DeclAttributes::new());
                self.get_mut::<NamedDecl>(id).set_own_attrs(attrs);
                attrs
            }
        };
        &mut self.attrs[attrs]
    }

    /// Returns true if the named declaration's identifier is an operator.
    #[must_use]
    pub fn is_operator(&self, id: DeclId) -> bool {
        let name = self.get::<NamedDecl>(id).name();
        self.resolve(name).is_some_and(is_operator_identifier)
    }

    /// How the declaration may change across versions: the written
    /// attribute if any, otherwise fragile for declarations local to code
    /// and resilient for everything else.
    #[must_use]
    pub fn resilience_of(&self, id: DeclId) -> Resilience {
        if let Some(resilience) = self.attrs(id).resilience {
            return resilience;
        }
        if self.is_local_context(self.decl_context_of(id)) {
            Resilience::InherentlyFragile
        } else {
            Resilience::Resilient
        }
    }

    // ---- value types ----

    /// The type of a value declaration.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a value declaration or has no type yet.
    #[track_caller]
    #[must_use]
    pub fn type_of(&self, id: DeclId) -> Type {
        self.get::<ValueDecl>(id).get_type()
    }

    /// Assigns the type of a value declaration.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a value declaration or already has a type.
    #[track_caller]
    pub fn set_type(&mut self, id: DeclId, ty: Type) {
        self.check_type(ty);
        self.get_mut::<ValueDecl>(id).set_type(ty);
    }

    /// Replaces the type of a value declaration and returns the old one.
    #[track_caller]
    pub fn overwrite_type(&mut self, id: DeclId, ty: Type) -> Option<Type> {
        self.check_type(ty);
        let previous = self.get_mut::<ValueDecl>(id).overwrite_type(ty);
        trace!("overwrote type of {id:?}: {previous:?} -> {ty:?}");
        previous
    }

    /// Assigns the underlying type of a `typealias`.
    ///
    /// # Panics
    ///
    /// Panics if `alias` is not a type alias or already has an underlying
    /// type.
    #[track_caller]
    pub fn set_underlying_type(&mut self, alias: DeclId, ty: Type) {
        self.check_type(ty);
        self.get_mut::<TypeAliasDecl>(alias).set_underlying_type(ty);
    }

    /// Replaces the underlying type of a `typealias`.
    #[track_caller]
    pub fn overwrite_underlying_type(&mut self, alias: DeclId, ty: Type) -> Option<Type> {
        self.check_type(ty);
        let previous = self.get_mut::<TypeAliasDecl>(alias).overwrite_underlying_type(ty);
        trace!("overwrote underlying type of {alias:?}: {previous:?} -> {ty:?}");
        previous
    }

    /// The type of an expression that refers to `id`: an lvalue for
    /// variables, the plain type otherwise.
    #[must_use]
    pub fn type_of_reference(&mut self, id: DeclId) -> Type {
        let ty = self.type_of(id);
        if self.decl(id).is_referenced_as_lvalue() {
            self.intern_type(TypeData::LValue(ty))
        } else {
            ty
        }
    }

    /// The sugared type that spells `alias` by name, created on first use.
    pub fn alias_type(&mut self, alias: DeclId) -> Type {
        if let Some(ty) = self.get::<TypeAliasDecl>(alias).cached_alias_type() {
            return ty;
        }
        let ty = self.intern_type(TypeData::NameAlias(alias));
        self.get_mut::<TypeAliasDecl>(alias).cache_alias_type(ty);
        ty
    }

    /// Returns true for variables and non-static functions declared
    /// directly inside an extension.
    #[must_use]
    pub fn is_instance_member(&self, id: DeclId) -> bool {
        let decl = self.decl(id);
        let _ = decl.cast::<ValueDecl>();
        if self.context_kind(decl.decl_context()) != DeclContextKind::ExtensionDecl {
            return false;
        }
        match decl.kind() {
            DeclKind::Var => true,
            DeclKind::Func => !decl.cast::<FuncDecl>().is_static(),
            _ => false,
        }
    }

    /// The extended type, when `func` is declared inside an extension.
    #[must_use]
    pub fn extension_type_of(&self, func: DeclId) -> Option<Type> {
        let _ = self.get::<FuncDecl>(func);
        let owner = self.context_owner(self.decl_context_of(func))?;
        self.decl(owner)
            .dyn_cast::<ExtensionDecl>()
            .map(ExtensionDecl::extended_type)
    }

    /// Returns true if `id` defines its declaration rather than forward
    /// declaring it. Only a function without a body is a forward
    /// declaration.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a value declaration.
    #[must_use]
    pub fn is_definition(&self, id: DeclId) -> bool {
        let _ = self.get::<ValueDecl>(id);
        match self.decl(id).data() {
            DeclData::Func(func) => func.body().is_some(),
            _ => true,
        }
    }

    // ---- accessor linkage ----

    /// Makes `var` a property and records the role of each accessor.
    ///
    /// # Panics
    ///
    /// Panics if `var` is not a variable or already is a property, or if an
    /// accessor is not a function of this unit.
    #[track_caller]
    pub fn wire_property(
        &mut self,
        var: DeclId,
        braces: SourceRange,
        get: Option<DeclId>,
        set: Option<DeclId>,
    ) {
        get.into_iter().chain(set).for_each(|accessor| self.check_decl(accessor));
        self.get_mut::<VarDecl>(var).set_property(braces, get, set);
        if let Some(get) = get {
            self.get_mut::<FuncDecl>(get).make_getter(var);
        }
        if let Some(set) = set {
            self.get_mut::<FuncDecl>(set).make_setter(var);
        }
    }

    /// Records on each accessor function of `subscript` the role it plays.
    ///
    /// # Panics
    ///
    /// Panics if `subscript` is not a subscript or an accessor is not a
    /// function.
    pub fn wire_subscript_accessors(&mut self, subscript: DeclId) {
        let decl = self.get::<SubscriptDecl>(subscript);
        let (get, set) = (decl.getter(), decl.setter());
        if let Some(get) = get {
            self.get_mut::<FuncDecl>(get).make_getter(subscript);
        }
        if let Some(set) = set {
            self.get_mut::<FuncDecl>(set).make_setter(subscript);
        }
    }

    // ---- diagnostics ----

    /// Records a diagnostic against the unit.
    pub fn diagnose(&mut self, loc: SourceLoc, message: impl Into<String>) {
        let message = message.into();
        warn!("{loc}: {message}");
        self.diagnostics.push(Diagnostic { loc, message });
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    // ---- lifecycle ----

    /// Counts of what the context holds.
    #[must_use]
    pub fn stats(&self) -> AstStats {
        AstStats {
            decls: self.decls.len(),
            contexts: self.contexts.len(),
            types: self.types.len(),
            attribute_sets: self.attrs.len(),
            symbols: self.interner.len(),
            bytes: self.decls.footprint()
                + self.contexts.footprint()
                + self.types.footprint()
                + self.attrs.footprint()
                + self.interner.bytes_allocated(),
        }
    }

    /// Releases every node of the unit at once.
    ///
    /// Handles into this context are invalid afterwards.
    pub fn release(self) -> AstStats {
        let stats = self.stats();
        debug!(
            "releasing unit: {} decls, {} contexts, {} types, {} bytes",
            stats.decls, stats.contexts, stats.types, stats.bytes
        );
        stats
    }
}

impl Default for AstContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AstContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AstContext")
            .field("decls", &self.decls.len())
            .field("contexts", &self.contexts.len())
            .field("types", &self.types.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::{Associativity, InfixData};
    use crate::loc::Located;

    #[test]
    fn test_new_context_has_translation_unit_and_error_type() {
        let ctx = AstContext::new();
        let tu = ctx.translation_unit();

        assert_eq!(ctx.context_kind(tu), DeclContextKind::TranslationUnit);
        assert_eq!(ctx.parent_context(tu), None);
        assert!(ctx.type_data(ctx.error_type()).is_error());
        assert_eq!(ctx.decl_count(), 0);
    }

    #[test]
    fn test_types_are_uniqued() {
        let mut ctx = AstContext::new();
        let int = ctx.intern("Int");

        let a = ctx.nominal_type(int);
        let b = ctx.nominal_type(int);
        assert_eq!(a, b);
        assert_eq!(ctx.intern_type(TypeData::Error), ctx.error_type());

        let lvalue = ctx.intern_type(TypeData::LValue(a));
        assert_ne!(lvalue, a);
    }

    #[test]
    fn test_extension_is_context_of_members() {
        let mut ctx = AstContext::new();
        let tu = ctx.translation_unit();
        let int = ctx.intern("Int");
        let ty = ctx.nominal_type(int);
        let count = ctx.intern("count");

        let ext = ctx.create_extension_with(tu, SourceLoc::new(0), ty, |ctx, own| {
            vec![ctx.create_var(own, SourceLoc::new(20), count, None)]
        });

        let ext_decl = ctx.get::<ExtensionDecl>(ext);
        let own = ext_decl.as_decl_context();
        assert_eq!(ctx.context_kind(own), DeclContextKind::ExtensionDecl);
        assert_eq!(ctx.context_owner(own), Some(ext));
        assert_eq!(ctx.parent_context(own), Some(tu));

        let [member] = ctx.members(ext) else {
            panic!("expected one member");
        };
        assert_eq!(ctx.decl_context_of(*member), own);
        assert!(ctx.is_instance_member(*member));
        assert_eq!(ctx.translation_unit_of(own), tu);
    }

    #[test]
    fn test_attrs_copy_on_first_write() {
        let mut ctx = AstContext::new();
        let tu = ctx.translation_unit();
        let plus = ctx.intern("+");
        let func = ctx.create_func(tu, SourceLoc::INVALID, SourceLoc::new(3), plus, None, None);

        assert!(ctx.attrs(func).is_empty());
        assert_eq!(ctx.stats().attribute_sets, 0);

        ctx.attrs_mut(func).infix = Some(InfixData::new(150, Associativity::Left));
        assert_eq!(ctx.stats().attribute_sets, 1);
        assert_eq!(
            ctx.attrs(func).infix,
            Some(InfixData::new(150, Associativity::Left))
        );

        ctx.attrs_mut(func).is_assignment = true;
        assert_eq!(ctx.stats().attribute_sets, 1);
        assert!(ctx.is_operator(func));
    }

    #[test]
    fn test_resilience_defaults_by_context() {
        let mut ctx = AstContext::new();
        let tu = ctx.translation_unit();
        let x = ctx.intern("x");

        let global = ctx.create_var(tu, SourceLoc::new(0), x, None);
        let top = ctx.create_top_level_code(tu, SourceLoc::new(10));
        let own = ctx.get::<TopLevelCodeDecl>(top).as_decl_context();
        let local = ctx.create_var(own, SourceLoc::new(12), x, None);

        assert_eq!(ctx.resilience_of(global), Resilience::Resilient);
        assert_eq!(ctx.resilience_of(local), Resilience::InherentlyFragile);

        ctx.attrs_mut(global).resilience = Some(Resilience::Fragile);
        assert_eq!(ctx.resilience_of(global), Resilience::Fragile);
    }

    #[test]
    fn test_diagnose_records() {
        let mut ctx = AstContext::new();
        ctx.diagnose(SourceLoc::new(4), "unresolved type");

        assert_eq!(
            ctx.diagnostics(),
            &[Diagnostic {
                loc: SourceLoc::new(4),
                message: "unresolved type".to_string(),
            }]
        );
    }

    #[test]
    fn test_loc_start_of_static_func() {
        let mut ctx = AstContext::new();
        let tu = ctx.translation_unit();
        let f = ctx.intern("f");
        let plain = ctx.create_func(tu, SourceLoc::INVALID, SourceLoc::new(8), f, None, None);
        let stat = ctx.create_func(tu, SourceLoc::new(1), SourceLoc::new(8), f, None, None);

        assert_eq!(ctx.decl(plain).loc_start(), SourceLoc::new(8));
        assert_eq!(ctx.decl(stat).loc_start(), SourceLoc::new(1));
        assert!(ctx.get::<FuncDecl>(stat).is_static());
    }

    #[test]
    fn test_only_bodyless_funcs_are_forward_declarations() {
        let mut ctx = AstContext::new();
        let tu = ctx.translation_unit();
        let f = ctx.intern("f");
        let x = ctx.intern("x");

        let declared = ctx.create_func(tu, SourceLoc::INVALID, SourceLoc::new(0), f, None, None);
        let defined = ctx.create_func(
            tu,
            SourceLoc::INVALID,
            SourceLoc::new(10),
            f,
            None,
            Some(FuncExprId::new(0)),
        );
        let var = ctx.create_var(tu, SourceLoc::new(20), x, None);
        let alias = ctx.create_type_alias(tu, SourceLoc::new(30), x, None);
        let case = ctx.create_one_of_element(tu, SourceLoc::new(40), x, None, None);

        assert!(!ctx.is_definition(declared));
        assert!(ctx.is_definition(defined));
        for id in [var, alias, case] {
            assert!(ctx.is_definition(id));
        }

        ctx.get_mut::<FuncDecl>(declared).set_body(Some(FuncExprId::new(1)));
        assert!(ctx.is_definition(declared));
    }

    #[test]
    #[should_panic(expected = "expected a ValueDecl declaration")]
    fn test_is_definition_rejects_non_values() {
        let mut ctx = AstContext::new();
        let tu = ctx.translation_unit();
        let code = ctx.create_top_level_code(tu, SourceLoc::new(0));
        let _ = ctx.is_definition(code);
    }

    #[test]
    fn test_release_reports_stats() {
        let mut ctx = AstContext::with_config(AstConfig {
            arena_chunk_size: 64,
            decl_capacity: 4,
        });
        let tu = ctx.translation_unit();
        let name = ctx.intern("v");
        for offset in 0..10 {
            ctx.create_var(tu, SourceLoc::new(offset), name, None);
        }

        let stats = ctx.release();
        assert_eq!(stats.decls, 10);
        assert_eq!(stats.contexts, 1);
        assert_eq!(stats.types, 1);
        assert!(stats.symbols >= 1);
        assert!(stats.bytes > 0);
    }
}
