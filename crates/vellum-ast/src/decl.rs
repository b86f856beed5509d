//! Declaration nodes.
//!
//! Every declaration is a [`Decl`]: the packed [`DeclBits`] word, the handle
//! of its enclosing lexical context, and a [`DeclData`] payload with one case
//! per concrete variant. The abstract layers of the hierarchy are embedded
//! structs: each value-bearing variant holds a [`ValueDecl`], which holds a
//! [`NamedDecl`].
//!
//! Views of a node go through [`DeclClass`]. Concrete variants check for
//! their exact kind; the [`NamedDecl`] and [`ValueDecl`] layers check the
//! family range of the kind registry.
//!
//! # Examples
//!
//! ```
//! use vellum_ast::decl::{FuncDecl, NamedDecl, ValueDecl, VarDecl};
//! use vellum_ast::loc::SourceLoc;
//! use vellum_ast::AstContext;
//!
//! let mut ctx = AstContext::new();
//! let tu = ctx.translation_unit();
//! let name = ctx.intern("count");
//! let var = ctx.create_var(tu, SourceLoc::new(0), name, None);
//!
//! let decl = ctx.decl(var);
//! assert!(decl.isa::<VarDecl>());
//! assert!(decl.isa::<ValueDecl>());
//! assert!(decl.isa::<NamedDecl>());
//! assert!(decl.dyn_cast::<FuncDecl>().is_none());
//! ```

use vellum_mem::{Idx, Symbol};

use crate::accessor::{AccessorRole, GetSetRecord};
use crate::attrs::AttrId;
use crate::decl_context::ContextId;
use crate::error::{AstError, AstResult};
use crate::flags::DeclBits;
use crate::kind::{DeclFamily, DeclKind};
use crate::loc::{Located, SourceLoc, SourceRange};
use crate::payload::{ExprId, FuncExprId, PatternId, StmtId};
use crate::ty::Type;

/// Handle to a declaration owned by an [`AstContext`](crate::AstContext).
pub type DeclId = Idx<Decl>;

/// One declaration node.
///
/// Nodes live only inside the arena of their [`AstContext`](crate::AstContext)
/// and are never cloned out of it.
#[derive(Debug)]
pub struct Decl {
    bits: DeclBits,
    context: ContextId,
    data: DeclData,
}

/// Variant payload of a [`Decl`].
#[derive(Debug)]
pub enum DeclData {
    /// `import a.b.c`
    Import(ImportDecl),
    /// `extension T { ... }`
    Extension(ExtensionDecl),
    /// `var pattern = init`
    PatternBinding(PatternBindingDecl),
    /// A top-level expression or statement.
    TopLevelCode(TopLevelCodeDecl),
    /// `subscript (indices) -> T { get set }`
    Subscript(SubscriptDecl),
    /// `typealias Name : Underlying`
    TypeAlias(TypeAliasDecl),
    /// `var name : T`
    Var(VarDecl),
    /// `func name(...)`
    Func(FuncDecl),
    /// One case of a `oneof`.
    OneOfElement(OneOfElementDecl),
}

impl DeclData {
    /// The kind matching this payload.
    #[must_use]
    pub const fn kind(&self) -> DeclKind {
        match self {
            Self::Import(_) => DeclKind::Import,
            Self::Extension(_) => DeclKind::Extension,
            Self::PatternBinding(_) => DeclKind::PatternBinding,
            Self::TopLevelCode(_) => DeclKind::TopLevelCode,
            Self::Subscript(_) => DeclKind::Subscript,
            Self::TypeAlias(_) => DeclKind::TypeAlias,
            Self::Var(_) => DeclKind::Var,
            Self::Func(_) => DeclKind::Func,
            Self::OneOfElement(_) => DeclKind::OneOfElement,
        }
    }
}

impl Decl {
    pub(crate) fn new(context: ContextId, data: DeclData) -> Self {
        Self {
            bits: DeclBits::new(data.kind()),
            context,
            data,
        }
    }

    /// The node's kind, fixed at construction.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> DeclKind {
        self.bits.kind()
    }

    /// The packed flag word.
    #[must_use]
    pub const fn bits(&self) -> DeclBits {
        self.bits
    }

    /// The lexical context the declaration is attached to.
    #[must_use]
    pub const fn decl_context(&self) -> ContextId {
        self.context
    }

    /// Re-attaches the declaration to another context.
    pub fn set_decl_context(&mut self, context: ContextId) {
        self.context = context;
    }

    /// The variant payload.
    #[must_use]
    pub const fn data(&self) -> &DeclData {
        &self.data
    }

    /// Returns true if the node is a `T`.
    #[inline]
    #[must_use]
    pub fn isa<T: DeclClass>(&self) -> bool {
        T::classof(self.kind())
    }

    /// Views the node as a `T`, or `None` if it is not one.
    #[must_use]
    pub fn dyn_cast<T: DeclClass>(&self) -> Option<&T> {
        if !self.isa::<T>() {
            return None;
        }
        T::project(&self.data)
    }

    /// Mutable counterpart of [`Decl::dyn_cast`].
    pub fn dyn_cast_mut<T: DeclClass>(&mut self) -> Option<&mut T> {
        if !self.isa::<T>() {
            return None;
        }
        T::project_mut(&mut self.data)
    }

    /// Views the node as a `T`, reporting a mismatch as an error.
    pub fn try_cast<T: DeclClass>(&self) -> AstResult<&T> {
        let found = self.kind();
        self.dyn_cast::<T>().ok_or(AstError::KindMismatch {
            expected: T::NAME,
            found,
        })
    }

    /// Views the node as a `T`.
    ///
    /// # Panics
    ///
    /// Panics if the node is not a `T`.
    #[track_caller]
    #[must_use]
    pub fn cast<T: DeclClass>(&self) -> &T {
        match self.try_cast::<T>() {
            Ok(view) => view,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable counterpart of [`Decl::cast`].
    ///
    /// # Panics
    ///
    /// Panics if the node is not a `T`.
    #[track_caller]
    pub fn cast_mut<T: DeclClass>(&mut self) -> &mut T {
        let found = self.kind();
        match self.dyn_cast_mut::<T>() {
            Some(view) => view,
            None => panic!(
                "{}",
                AstError::KindMismatch {
                    expected: T::NAME,
                    found,
                }
            ),
        }
    }

    /// The identifier of a named declaration, `None` for unnamed kinds.
    #[must_use]
    pub fn name(&self) -> Option<Symbol> {
        self.dyn_cast::<NamedDecl>().map(NamedDecl::name)
    }

    /// Whether the value is never used where it could be modified.
    ///
    /// # Panics
    ///
    /// Panics if the node is not a value declaration.
    #[track_caller]
    #[must_use]
    pub fn never_used_as_lvalue(&self) -> bool {
        self.expect_value();
        self.bits.never_used_as_lvalue()
    }

    /// Sets the "never used as lvalue" flag.
    ///
    /// # Panics
    ///
    /// Panics if the node is not a value declaration.
    #[track_caller]
    pub fn set_never_used_as_lvalue(&mut self, flag: bool) {
        self.expect_value();
        self.bits.set_never_used_as_lvalue(flag);
    }

    /// Whether the value lives exactly as long as its lexical scope.
    ///
    /// # Panics
    ///
    /// Panics if the node is not a value declaration.
    #[track_caller]
    #[must_use]
    pub fn has_fixed_lifetime(&self) -> bool {
        self.expect_value();
        self.bits.has_fixed_lifetime()
    }

    /// Sets the "fixed lifetime" flag.
    ///
    /// # Panics
    ///
    /// Panics if the node is not a value declaration.
    #[track_caller]
    pub fn set_has_fixed_lifetime(&mut self, flag: bool) {
        self.expect_value();
        self.bits.set_has_fixed_lifetime(flag);
    }

    /// Whether a reference to this value denotes mutable storage. Only
    /// variables do.
    ///
    /// # Panics
    ///
    /// Panics if the node is not a value declaration.
    #[track_caller]
    #[must_use]
    pub fn is_referenced_as_lvalue(&self) -> bool {
        self.expect_value();
        self.kind() == DeclKind::Var
    }

    #[track_caller]
    fn expect_value(&self) {
        if !self.isa::<ValueDecl>() {
            panic!(
                "{}",
                AstError::KindMismatch {
                    expected: ValueDecl::NAME,
                    found: self.kind(),
                }
            );
        }
    }
}

impl Located for Decl {
    fn loc_start(&self) -> SourceLoc {
        match &self.data {
            DeclData::Import(d) => d.import_loc,
            DeclData::Extension(d) => d.extension_loc,
            DeclData::PatternBinding(d) => d.var_loc,
            DeclData::TopLevelCode(d) => d.start_loc,
            DeclData::Subscript(d) => d.subscript_loc,
            DeclData::TypeAlias(d) => d.type_alias_loc,
            DeclData::Var(d) => d.var_loc,
            DeclData::Func(d) => d.loc_start(),
            DeclData::OneOfElement(d) => d.identifier_loc,
        }
    }
}

/// A view of a [`Decl`] selected by kind.
///
/// Implemented by each concrete variant struct (exact kind match) and by
/// the abstract [`NamedDecl`] and [`ValueDecl`] layers (family range match).
pub trait DeclClass: Sized {
    /// Name used in mismatch reports.
    const NAME: &'static str;

    /// Returns true if nodes of `kind` can be viewed as `Self`.
    fn classof(kind: DeclKind) -> bool;

    /// Projects the payload onto `Self`.
    fn project(data: &DeclData) -> Option<&Self>;

    /// Mutable counterpart of [`DeclClass::project`].
    fn project_mut(data: &mut DeclData) -> Option<&mut Self>;
}

macro_rules! concrete_decl_class {
    ($( $ty:ident => $kind:ident, )*) => {
        $(
            impl DeclClass for $ty {
                const NAME: &'static str = stringify!($ty);

                #[inline]
                fn classof(kind: DeclKind) -> bool {
                    kind == DeclKind::$kind
                }

                fn project(data: &DeclData) -> Option<&Self> {
                    match data {
                        DeclData::$kind(decl) => Some(decl),
                        _ => None,
                    }
                }

                fn project_mut(data: &mut DeclData) -> Option<&mut Self> {
                    match data {
                        DeclData::$kind(decl) => Some(decl),
                        _ => None,
                    }
                }
            }
        )*
    };
}

concrete_decl_class! {
    ImportDecl => Import,
    ExtensionDecl => Extension,
    PatternBindingDecl => PatternBinding,
    TopLevelCodeDecl => TopLevelCode,
    SubscriptDecl => Subscript,
    TypeAliasDecl => TypeAlias,
    VarDecl => Var,
    FuncDecl => Func,
    OneOfElementDecl => OneOfElement,
}

impl DeclClass for ValueDecl {
    const NAME: &'static str = "ValueDecl";

    #[inline]
    fn classof(kind: DeclKind) -> bool {
        kind.is_in(DeclFamily::Value)
    }

    fn project(data: &DeclData) -> Option<&Self> {
        match data {
            DeclData::TypeAlias(d) => Some(&d.value),
            DeclData::Var(d) => Some(&d.value),
            DeclData::Func(d) => Some(&d.value),
            DeclData::OneOfElement(d) => Some(&d.value),
            _ => None,
        }
    }

    fn project_mut(data: &mut DeclData) -> Option<&mut Self> {
        match data {
            DeclData::TypeAlias(d) => Some(&mut d.value),
            DeclData::Var(d) => Some(&mut d.value),
            DeclData::Func(d) => Some(&mut d.value),
            DeclData::OneOfElement(d) => Some(&mut d.value),
            _ => None,
        }
    }
}

impl DeclClass for NamedDecl {
    const NAME: &'static str = "NamedDecl";

    #[inline]
    fn classof(kind: DeclKind) -> bool {
        kind.is_in(DeclFamily::Named)
    }

    fn project(data: &DeclData) -> Option<&Self> {
        ValueDecl::project(data).map(|value| &value.named)
    }

    fn project_mut(data: &mut DeclData) -> Option<&mut Self> {
        ValueDecl::project_mut(data).map(|value| &mut value.named)
    }
}

/// A type slot with set-once assignment and explicit overwrite.
///
/// `set` moves the slot from unset to set and refuses a second call.
/// `overwrite` replaces the content from either state, for error recovery
/// (writing the error type) or deliberate re-resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeSlot(Option<Type>);

impl TypeSlot {
    /// An unset slot.
    pub const UNSET: TypeSlot = TypeSlot(None);

    /// A slot holding `ty`, or unset for `None`.
    #[must_use]
    pub const fn new(ty: Option<Type>) -> Self {
        Self(ty)
    }

    /// Returns true once a type has been assigned.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// The assigned type, if any.
    #[must_use]
    pub const fn as_option(&self) -> Option<Type> {
        self.0
    }

    /// Reads the assigned type.
    pub fn try_get(&self) -> AstResult<Type> {
        self.0.ok_or(AstError::TypeNotSet)
    }

    /// Reads the assigned type.
    ///
    /// # Panics
    ///
    /// Panics if the slot is unset.
    #[track_caller]
    #[must_use]
    pub fn get(&self) -> Type {
        match self.0 {
            Some(ty) => ty,
            None => panic!("{}", AstError::TypeNotSet),
        }
    }

    /// Assigns the type of an unset slot.
    pub fn try_set(&mut self, ty: Type) -> AstResult<()> {
        if let Some(existing) = self.0 {
            return Err(AstError::TypeAlreadySet { existing });
        }
        self.0 = Some(ty);
        Ok(())
    }

    /// Assigns the type of an unset slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already set.
    #[track_caller]
    pub fn set(&mut self, ty: Type) {
        if let Err(err) = self.try_set(ty) {
            panic!("{err}");
        }
    }

    /// Replaces the content unconditionally and returns the previous type.
    pub fn overwrite(&mut self, ty: Type) -> Option<Type> {
        self.0.replace(ty)
    }
}

/// The named-declaration layer: an identifier and attributes.
#[derive(Debug)]
pub struct NamedDecl {
    name: Symbol,
    attrs: Option<AttrId>,
}

impl NamedDecl {
    pub(crate) const fn new(name: Symbol) -> Self {
        Self { name, attrs: None }
    }

    /// The declared identifier.
    #[must_use]
    pub const fn name(&self) -> Symbol {
        self.name
    }

    /// The node's own attribute storage, or `None` while it still shares the
    /// empty set.
    #[must_use]
    pub const fn own_attrs(&self) -> Option<AttrId> {
        self.attrs
    }

    pub(crate) fn set_own_attrs(&mut self, attrs: AttrId) {
        self.attrs = Some(attrs);
    }
}

/// The value-declaration layer: a named declaration with a type.
#[derive(Debug)]
pub struct ValueDecl {
    named: NamedDecl,
    ty: TypeSlot,
}

impl ValueDecl {
    pub(crate) const fn new(name: Symbol, ty: Option<Type>) -> Self {
        Self {
            named: NamedDecl::new(name),
            ty: TypeSlot::new(ty),
        }
    }

    /// The embedded named-declaration layer.
    #[must_use]
    pub const fn named(&self) -> &NamedDecl {
        &self.named
    }

    /// The declared identifier.
    #[must_use]
    pub const fn name(&self) -> Symbol {
        self.named.name
    }

    /// The type slot.
    #[must_use]
    pub const fn type_slot(&self) -> &TypeSlot {
        &self.ty
    }

    /// Returns true once a type has been assigned.
    #[must_use]
    pub const fn has_type(&self) -> bool {
        self.ty.is_set()
    }

    /// The value's type.
    ///
    /// # Panics
    ///
    /// Panics if no type has been assigned.
    #[track_caller]
    #[must_use]
    pub fn get_type(&self) -> Type {
        self.ty.get()
    }

    /// Assigns the value's type.
    ///
    /// # Panics
    ///
    /// Panics if a type was already assigned.
    #[track_caller]
    pub fn set_type(&mut self, ty: Type) {
        self.ty.set(ty);
    }

    /// Replaces the value's type and returns the previous one.
    pub fn overwrite_type(&mut self, ty: Type) -> Option<Type> {
        self.ty.overwrite(ty)
    }
}

/// One component of an import path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPathElement {
    /// The component's identifier.
    pub name: Symbol,
    /// Where it is written.
    pub loc: SourceLoc,
}

impl AccessPathElement {
    /// Creates a path component.
    #[must_use]
    pub const fn new(name: Symbol, loc: SourceLoc) -> Self {
        Self { name, loc }
    }
}

/// `import a.b.c`
#[derive(Debug)]
pub struct ImportDecl {
    import_loc: SourceLoc,
    path: Box<[AccessPathElement]>,
}

impl ImportDecl {
    pub(crate) fn new(import_loc: SourceLoc, path: &[AccessPathElement]) -> Self {
        Self {
            import_loc,
            path: path.into(),
        }
    }

    /// Location of the `import` keyword.
    #[must_use]
    pub const fn import_loc(&self) -> SourceLoc {
        self.import_loc
    }

    /// The path components in source order.
    #[must_use]
    pub fn access_path(&self) -> &[AccessPathElement] {
        &self.path
    }
}

/// `extension T { members }`
///
/// Both a declaration and a lexical context; the members are attached to
/// [`ExtensionDecl::as_decl_context`].
#[derive(Debug)]
pub struct ExtensionDecl {
    extension_loc: SourceLoc,
    extended_type: Type,
    members: Box<[DeclId]>,
    context: ContextId,
}

impl ExtensionDecl {
    pub(crate) fn new(extension_loc: SourceLoc, extended_type: Type, context: ContextId) -> Self {
        Self {
            extension_loc,
            extended_type,
            members: Box::default(),
            context,
        }
    }

    /// Location of the `extension` keyword.
    #[must_use]
    pub const fn extension_loc(&self) -> SourceLoc {
        self.extension_loc
    }

    /// The type being extended.
    #[must_use]
    pub const fn extended_type(&self) -> Type {
        self.extended_type
    }

    /// The member declarations in source order.
    #[must_use]
    pub fn members(&self) -> &[DeclId] {
        &self.members
    }

    pub(crate) fn set_members(&mut self, members: Vec<DeclId>) {
        self.members = members.into_boxed_slice();
    }
}

/// `var pattern = init`
#[derive(Debug)]
pub struct PatternBindingDecl {
    var_loc: SourceLoc,
    pattern: PatternId,
    init: Option<ExprId>,
}

impl PatternBindingDecl {
    pub(crate) const fn new(var_loc: SourceLoc, pattern: PatternId, init: Option<ExprId>) -> Self {
        Self {
            var_loc,
            pattern,
            init,
        }
    }

    /// Location of the `var` keyword.
    #[must_use]
    pub const fn var_loc(&self) -> SourceLoc {
        self.var_loc
    }

    /// The bound pattern.
    #[must_use]
    pub const fn pattern(&self) -> PatternId {
        self.pattern
    }

    /// The initializer, if written.
    #[must_use]
    pub const fn init(&self) -> Option<ExprId> {
        self.init
    }

    /// Returns true if an initializer is present.
    #[must_use]
    pub const fn has_init(&self) -> bool {
        self.init.is_some()
    }

    /// Rebinds the initializer, e.g. after it was rewritten by type checking.
    pub fn set_init(&mut self, init: Option<ExprId>) {
        self.init = init;
    }
}

/// Body of a [`TopLevelCodeDecl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevelBody {
    /// A top-level expression.
    Expr(ExprId),
    /// A top-level statement.
    Stmt(StmtId),
}

/// A top-level expression or statement.
///
/// Gives top-level code a lexical context distinct from the translation
/// unit, so local top-level variables can be told apart from globals.
#[derive(Debug)]
pub struct TopLevelCodeDecl {
    start_loc: SourceLoc,
    body: Option<TopLevelBody>,
    context: ContextId,
}

impl TopLevelCodeDecl {
    pub(crate) const fn new(start_loc: SourceLoc, context: ContextId) -> Self {
        Self {
            start_loc,
            body: None,
            context,
        }
    }

    /// The body, if set.
    #[must_use]
    pub const fn body(&self) -> Option<TopLevelBody> {
        self.body
    }

    /// The body as an expression, `None` if unset or a statement.
    #[must_use]
    pub const fn body_expr(&self) -> Option<ExprId> {
        match self.body {
            Some(TopLevelBody::Expr(expr)) => Some(expr),
            _ => None,
        }
    }

    /// The body as a statement, `None` if unset or an expression.
    #[must_use]
    pub const fn body_stmt(&self) -> Option<StmtId> {
        match self.body {
            Some(TopLevelBody::Stmt(stmt)) => Some(stmt),
            _ => None,
        }
    }

    /// Makes the body an expression, replacing any statement body.
    pub fn set_body_expr(&mut self, expr: ExprId) {
        self.body = Some(TopLevelBody::Expr(expr));
    }

    /// Makes the body a statement, replacing any expression body.
    pub fn set_body_stmt(&mut self, stmt: StmtId) {
        self.body = Some(TopLevelBody::Stmt(stmt));
    }
}

/// `subscript (indices) -> Element { get set }`
#[derive(Debug)]
pub struct SubscriptDecl {
    subscript_loc: SourceLoc,
    arrow_loc: SourceLoc,
    indices: PatternId,
    element_type: Type,
    braces: SourceRange,
    get: Option<DeclId>,
    set: Option<DeclId>,
}

/// Source pieces of a subscript, as the parser sees them.
#[derive(Debug, Clone, Copy)]
pub struct SubscriptParts {
    /// Location of the `subscript` keyword.
    pub subscript_loc: SourceLoc,
    /// Location of the `->`.
    pub arrow_loc: SourceLoc,
    /// The index pattern.
    pub indices: PatternId,
    /// The element type.
    pub element_type: Type,
    /// The braces around the accessors.
    pub braces: SourceRange,
    /// The getter function.
    pub get: Option<DeclId>,
    /// The setter function.
    pub set: Option<DeclId>,
}

impl SubscriptDecl {
    pub(crate) const fn new(parts: SubscriptParts) -> Self {
        Self {
            subscript_loc: parts.subscript_loc,
            arrow_loc: parts.arrow_loc,
            indices: parts.indices,
            element_type: parts.element_type,
            braces: parts.braces,
            get: parts.get,
            set: parts.set,
        }
    }

    /// Location of the `subscript` keyword.
    #[must_use]
    pub const fn subscript_loc(&self) -> SourceLoc {
        self.subscript_loc
    }

    /// Location of the `->`.
    #[must_use]
    pub const fn arrow_loc(&self) -> SourceLoc {
        self.arrow_loc
    }

    /// The index pattern.
    #[must_use]
    pub const fn indices(&self) -> PatternId {
        self.indices
    }

    /// The type of the element a subscript expression refers to.
    #[must_use]
    pub const fn element_type(&self) -> Type {
        self.element_type
    }

    /// The braces around the accessors.
    #[must_use]
    pub const fn braces(&self) -> SourceRange {
        self.braces
    }

    /// The getter, which takes the indices and produces the element.
    #[must_use]
    pub const fn getter(&self) -> Option<DeclId> {
        self.get
    }

    /// The optional setter.
    #[must_use]
    pub const fn setter(&self) -> Option<DeclId> {
        self.set
    }
}

/// `typealias Name : Underlying`
#[derive(Debug)]
pub struct TypeAliasDecl {
    value: ValueDecl,
    type_alias_loc: SourceLoc,
    underlying: TypeSlot,
    alias_type: Option<Type>,
}

impl TypeAliasDecl {
    pub(crate) const fn new(type_alias_loc: SourceLoc, name: Symbol, underlying: Option<Type>) -> Self {
        Self {
            value: ValueDecl::new(name, None),
            type_alias_loc,
            underlying: TypeSlot::new(underlying),
            alias_type: None,
        }
    }

    /// The value-declaration layer.
    #[must_use]
    pub const fn value(&self) -> &ValueDecl {
        &self.value
    }

    /// Location of the `typealias` keyword.
    #[must_use]
    pub const fn type_alias_loc(&self) -> SourceLoc {
        self.type_alias_loc
    }

    /// Moves the keyword location, for aliases synthesized before the
    /// keyword is parsed.
    pub fn set_type_alias_loc(&mut self, loc: SourceLoc) {
        self.type_alias_loc = loc;
    }

    /// The underlying-type slot.
    #[must_use]
    pub const fn underlying(&self) -> &TypeSlot {
        &self.underlying
    }

    /// Returns true once an underlying type has been assigned.
    #[must_use]
    pub const fn has_underlying_type(&self) -> bool {
        self.underlying.is_set()
    }

    /// The underlying type.
    ///
    /// # Panics
    ///
    /// Panics if no underlying type has been assigned.
    #[track_caller]
    #[must_use]
    pub fn underlying_type(&self) -> Type {
        self.underlying.get()
    }

    /// Assigns the underlying type.
    ///
    /// # Panics
    ///
    /// Panics if an underlying type was already assigned.
    #[track_caller]
    pub fn set_underlying_type(&mut self, ty: Type) {
        self.underlying.set(ty);
    }

    /// Replaces the underlying type and returns the previous one.
    pub fn overwrite_underlying_type(&mut self, ty: Type) -> Option<Type> {
        self.underlying.overwrite(ty)
    }

    /// The sugared alias type, once materialized.
    #[must_use]
    pub const fn cached_alias_type(&self) -> Option<Type> {
        self.alias_type
    }

    pub(crate) fn cache_alias_type(&mut self, ty: Type) {
        self.alias_type = Some(ty);
    }
}

/// `var name : T`
#[derive(Debug)]
pub struct VarDecl {
    value: ValueDecl,
    var_loc: SourceLoc,
    get_set: Option<GetSetRecord>,
}

impl VarDecl {
    pub(crate) const fn new(var_loc: SourceLoc, name: Symbol, ty: Option<Type>) -> Self {
        Self {
            value: ValueDecl::new(name, ty),
            var_loc,
            get_set: None,
        }
    }

    /// The value-declaration layer.
    #[must_use]
    pub const fn value(&self) -> &ValueDecl {
        &self.value
    }

    /// Location of the `var` keyword.
    #[must_use]
    pub const fn var_loc(&self) -> SourceLoc {
        self.var_loc
    }

    /// Returns true if the variable has no storage and is accessed through
    /// a getter and setter.
    #[must_use]
    pub const fn is_property(&self) -> bool {
        self.get_set.is_some()
    }

    /// The accessor record of a property.
    #[must_use]
    pub const fn get_set_record(&self) -> Option<&GetSetRecord> {
        self.get_set.as_ref()
    }

    /// Turns the variable into a property.
    ///
    /// Only the variable's side is updated; the functions must be told about
    /// their role with [`FuncDecl::make_getter`] and [`FuncDecl::make_setter`].
    ///
    /// # Panics
    ///
    /// Panics if the variable already is a property.
    #[track_caller]
    pub fn set_property(&mut self, braces: SourceRange, get: Option<DeclId>, set: Option<DeclId>) {
        assert!(self.get_set.is_none(), "variable already has a getter/setter");
        self.get_set = Some(GetSetRecord { braces, get, set });
    }

    /// The getter of a property.
    #[must_use]
    pub fn getter(&self) -> Option<DeclId> {
        self.get_set.and_then(|record| record.get)
    }

    /// The setter of a property.
    #[must_use]
    pub fn setter(&self) -> Option<DeclId> {
        self.get_set.and_then(|record| record.set)
    }
}

/// `func name(...)`
#[derive(Debug)]
pub struct FuncDecl {
    value: ValueDecl,
    static_loc: SourceLoc,
    func_loc: SourceLoc,
    body: Option<FuncExprId>,
    accessor: Option<AccessorRole>,
}

impl FuncDecl {
    pub(crate) const fn new(
        static_loc: SourceLoc,
        func_loc: SourceLoc,
        name: Symbol,
        ty: Option<Type>,
        body: Option<FuncExprId>,
    ) -> Self {
        Self {
            value: ValueDecl::new(name, ty),
            static_loc,
            func_loc,
            body,
            accessor: None,
        }
    }

    /// The value-declaration layer.
    #[must_use]
    pub const fn value(&self) -> &ValueDecl {
        &self.value
    }

    /// Returns true if declared `static`.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.static_loc.is_valid()
    }

    /// Location of the `static` keyword, invalid for non-static functions.
    #[must_use]
    pub const fn static_loc(&self) -> SourceLoc {
        self.static_loc
    }

    /// Location of the `func` keyword.
    #[must_use]
    pub const fn func_loc(&self) -> SourceLoc {
        self.func_loc
    }

    /// The first keyword of the declaration.
    #[must_use]
    pub const fn loc_start(&self) -> SourceLoc {
        if self.static_loc.is_valid() {
            self.static_loc
        } else {
            self.func_loc
        }
    }

    /// The function expression with the signature and body.
    #[must_use]
    pub const fn body(&self) -> Option<FuncExprId> {
        self.body
    }

    /// Replaces the body.
    pub fn set_body(&mut self, body: Option<FuncExprId>) {
        self.body = body;
    }

    /// The function's accessor role, if any.
    #[must_use]
    pub const fn accessor_role(&self) -> Option<AccessorRole> {
        self.accessor
    }

    /// Records that this function is the getter of `storage`, replacing any
    /// previous role.
    ///
    /// A node cannot tell which unit `storage` came from; go through
    /// [`AstContext::wire_property`](crate::AstContext::wire_property) or
    /// [`AstContext::wire_subscript_accessors`](crate::AstContext::wire_subscript_accessors)
    /// to have it checked.
    pub fn make_getter(&mut self, storage: DeclId) {
        self.accessor = Some(AccessorRole::Getter(storage));
    }

    /// Records that this function is the setter of `storage`, replacing any
    /// previous role.
    pub fn make_setter(&mut self, storage: DeclId) {
        self.accessor = Some(AccessorRole::Setter(storage));
    }

    /// The declaration this function is the getter of.
    #[must_use]
    pub const fn getter_decl(&self) -> Option<DeclId> {
        match self.accessor {
            Some(AccessorRole::Getter(decl)) => Some(decl),
            _ => None,
        }
    }

    /// The declaration this function is the setter of.
    #[must_use]
    pub const fn setter_decl(&self) -> Option<DeclId> {
        match self.accessor {
            Some(AccessorRole::Setter(decl)) => Some(decl),
            _ => None,
        }
    }
}

/// One case of a `oneof`, e.g. `Y` in `oneof d { X : Int, Y : Int, Z }`.
#[derive(Debug)]
pub struct OneOfElementDecl {
    value: ValueDecl,
    identifier_loc: SourceLoc,
    argument_type: Option<Type>,
}

impl OneOfElementDecl {
    pub(crate) const fn new(
        identifier_loc: SourceLoc,
        name: Symbol,
        ty: Option<Type>,
        argument_type: Option<Type>,
    ) -> Self {
        Self {
            value: ValueDecl::new(name, ty),
            identifier_loc,
            argument_type,
        }
    }

    /// The value-declaration layer.
    #[must_use]
    pub const fn value(&self) -> &ValueDecl {
        &self.value
    }

    /// Location of the case name.
    #[must_use]
    pub const fn identifier_loc(&self) -> SourceLoc {
        self.identifier_loc
    }

    /// The payload type, `None` for a case without one.
    #[must_use]
    pub const fn argument_type(&self) -> Option<Type> {
        self.argument_type
    }
}

/// Declarations that are also lexical contexts.
pub trait AsDeclContext {
    /// The lexical context this declaration opens.
    fn as_decl_context(&self) -> ContextId;
}

impl AsDeclContext for ExtensionDecl {
    fn as_decl_context(&self) -> ContextId {
        self.context
    }
}

impl AsDeclContext for TopLevelCodeDecl {
    fn as_decl_context(&self) -> ContextId {
        self.context
    }
}

/// Returns true if `identifier` spells an operator.
#[must_use]
pub fn is_operator_identifier(identifier: &str) -> bool {
    identifier
        .chars()
        .next()
        .is_some_and(|c| "/=-+*%<>!&|^~.".contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_mem::IndexArena;

    fn some_type() -> Type {
        let mut types: IndexArena<crate::ty::TypeData> = IndexArena::new();
        types.alloc(crate::ty::TypeData::Error)
    }

    #[test]
    fn test_type_slot_set_once() {
        let ty = some_type();
        let mut slot = TypeSlot::UNSET;

        assert!(!slot.is_set());
        assert_eq!(slot.try_get(), Err(AstError::TypeNotSet));

        slot.set(ty);
        assert_eq!(slot.get(), ty);
        assert_eq!(slot.try_set(ty), Err(AstError::TypeAlreadySet { existing: ty }));
    }

    #[test]
    fn test_type_slot_overwrite_from_either_state() {
        let ty = some_type();
        let mut slot = TypeSlot::default();

        assert_eq!(slot.overwrite(ty), None);
        assert_eq!(slot.overwrite(ty), Some(ty));
        assert_eq!(slot.as_option(), Some(ty));
    }

    #[test]
    #[should_panic(expected = "type slot read before a type was set")]
    fn test_type_slot_get_unset_panics() {
        let _ = TypeSlot::UNSET.get();
    }

    #[test]
    fn test_operator_identifiers() {
        assert!(is_operator_identifier("+"));
        assert!(is_operator_identifier("==="));
        assert!(is_operator_identifier(".."));
        assert!(!is_operator_identifier("plus"));
        assert!(!is_operator_identifier(""));
    }

    #[test]
    fn test_func_role_replaces() {
        let owner: IndexArena<Decl> = IndexArena::new();
        let x = owner.next_idx();

        let mut func = FuncDecl::new(SourceLoc::INVALID, SourceLoc::new(4), Symbol::new(1), None, None);
        assert_eq!(func.accessor_role(), None);

        func.make_getter(x);
        assert_eq!(func.getter_decl(), Some(x));
        assert_eq!(func.setter_decl(), None);

        func.make_setter(x);
        assert_eq!(func.getter_decl(), None);
        assert_eq!(func.setter_decl(), Some(x));
        assert_eq!(func.loc_start(), SourceLoc::new(4));
    }
}
